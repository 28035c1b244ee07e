use common::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use super::fixture::{d, file_names, Fixture, OWNER};
use crate::adapter::{RecordingStorage, RecordingVersionControl, StubCompletion};
use crate::domain::Memory;
use crate::usecase::intake::IntakeRequest;

fn request<'a>(fx_dir: &'a std::path::Path, message: &'a str, attach: &'a [PathBuf]) -> IntakeRequest<'a> {
    IntakeRequest {
        memories_dir: fx_dir,
        message,
        today: d(2026, 2, 18),
        attach,
        owner: OWNER,
        push: true,
    }
}

#[test]
fn test_create_writes_record_and_commits() {
    let fx = Fixture::new();
    let llm = Arc::new(StubCompletion::new(
        r#"{"action":"create","target":"2026-02-21","title":"Spring Picnic","slug":"","time":"12:00","place":"Fresh Pond","content":"Bring a dish to share.","attachments":null}"#,
    ));
    let dir = fx.dir();

    let outcome = fx.intake(llm.clone()).run(&request(&dir, "Picnic on Saturday at noon", &[])).unwrap();

    assert_eq!(outcome.path, dir.join("2026-02-21-spring-picnic.md"));
    assert!(!outcome.updated);
    let stored = fx.records.load(&outcome.path).unwrap();
    assert_eq!(
        stored,
        Memory::new(Some(d(2026, 2, 21)), d(2026, 3, 23), "Bring a dish to share.", OWNER)
            .with_title("Spring Picnic")
            .with_time("12:00")
            .with_place("Fresh Pond")
    );
    assert_eq!(
        fx.vcs.commits.lock().unwrap().as_slice(),
        &["Update memory: 2026-02-21-spring-picnic.md".to_string()]
    );
    assert_eq!(fx.vcs.staged.lock().unwrap().as_slice(), &[vec![outcome.path.clone()]]);
    assert_eq!(fx.vcs.push_count(), 1);

    let prompts = llm.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Today is 2026-02-18"));
    assert!(prompts[0].contains("Existing events:\n(none)"));
    assert!(prompts[0].contains("Picnic on Saturday at noon"));
}

#[test]
fn test_ongoing_record_defaults_expiry_to_end_of_week() {
    let fx = Fixture::new();
    let llm = Arc::new(StubCompletion::new(
        "```json\n{\"action\":\"create\",\"target\":null,\"title\":\"Prayer Meeting\",\"content\":\"Every evening at 8.\"}\n```",
    ));
    let dir = fx.dir();

    let outcome = fx.intake(llm).run(&request(&dir, "Prayer every evening", &[])).unwrap();

    assert_eq!(outcome.path, dir.join("ongoing-prayer-meeting.md"));
    assert_eq!(outcome.memory.target, None);
    assert_eq!(outcome.memory.expires, d(2026, 2, 22));
}

#[test]
fn test_update_reuses_matching_file() {
    let fx = Fixture::new();
    let existing = fx.put(
        "2026-02-21-picnic.md",
        &Memory::new(Some(d(2026, 2, 21)), d(2026, 3, 23), "Old details", OWNER)
            .with_title("Picnic"),
    );
    let llm = Arc::new(StubCompletion::new(
        r#"{"action":"update","update_title":"Picnic","target":"2026-02-28","expires":"2026-03-01","title":"Picnic","slug":"picnic","content":"Moved to next week."}"#,
    ));
    let dir = fx.dir();

    let outcome = fx.intake(llm.clone()).run(&request(&dir, "野餐改到下週", &[])).unwrap();

    assert!(outcome.updated);
    assert_eq!(outcome.path, existing);
    assert_eq!(file_names(&dir), vec!["2026-02-21-picnic.md"]);
    let stored = fx.records.load(&existing).unwrap();
    assert_eq!(stored.target, Some(d(2026, 2, 28)));
    assert_eq!(stored.expires, d(2026, 3, 1));
    assert_eq!(stored.content, "Moved to next week.");
    assert!(llm.prompts.lock().unwrap()[0]
        .contains("- target=2026-02-21, title=Picnic, expires=2026-03-23"));
}

#[test]
fn test_update_with_unknown_title_falls_back_to_create() {
    let fx = Fixture::new();
    fx.put(
        "2026-02-21-picnic.md",
        &Memory::new(Some(d(2026, 2, 21)), d(2026, 3, 23), "Old", OWNER).with_title("Picnic"),
    );
    let llm = Arc::new(StubCompletion::new(
        r#"{"action":"update","update_title":"Spring Retreat","target":"2026-03-07","title":"Spring Retreat","content":"Retreat details."}"#,
    ));
    let dir = fx.dir();

    let outcome = fx.intake(llm).run(&request(&dir, "retreat update", &[])).unwrap();

    assert!(!outcome.updated);
    assert_eq!(
        file_names(&dir),
        vec!["2026-02-21-picnic.md", "2026-03-07-spring-retreat.md"]
    );
}

#[test]
fn test_other_owners_records_are_not_offered_or_matched() {
    let fx = Fixture::new();
    fx.put(
        "2026-02-21-picnic.md",
        &Memory::new(Some(d(2026, 2, 21)), d(2026, 3, 23), "Boston picnic", "boston")
            .with_title("Picnic"),
    );
    let llm = Arc::new(StubCompletion::new(
        r#"{"action":"update","update_title":"Picnic","target":"2026-02-22","title":"Picnic","content":"Ours."}"#,
    ));
    let dir = fx.dir();

    let outcome = fx.intake(llm.clone()).run(&request(&dir, "our picnic", &[])).unwrap();

    assert!(!outcome.updated);
    assert_eq!(outcome.path, dir.join("2026-02-22-picnic.md"));
    assert!(llm.prompts.lock().unwrap()[0].contains("Existing events:\n(none)"));
    assert_eq!(fx.records.load(&dir.join("2026-02-21-picnic.md")).unwrap().owner, "boston");
}

#[test]
fn test_attachments_are_uploaded_and_listed_in_prompt() {
    let fx = Fixture::new();
    let flyer = fx.tmp.path().join("flyer.pdf");
    std::fs::write(&flyer, b"%PDF").unwrap();
    let url = "https://storage.googleapis.com/test-bucket/attachments/flyer.pdf";
    let llm = Arc::new(StubCompletion::new(&format!(
        r#"{{"action":"create","target":"2026-02-21","title":"Picnic","content":"See flyer.","attachments":["{}"]}}"#,
        url
    )));
    let dir = fx.dir();
    let attach = vec![flyer.clone()];

    let outcome = fx.intake(llm.clone()).run(&request(&dir, "picnic", &attach)).unwrap();

    assert_eq!(fx.storage.uploads.lock().unwrap().as_slice(), &[flyer]);
    assert!(llm.prompts.lock().unwrap()[0].contains(&format!("- {}", url)));
    assert_eq!(outcome.memory.attachments(), &[url.to_string()]);
}

#[test]
fn test_intake_sweeps_expired_records_without_pushing_them_separately() {
    let fx = Fixture::new();
    let stale = fx.put(
        "2026-01-01-new-year.md",
        &Memory::new(Some(d(2026, 1, 1)), d(2026, 1, 31), "Old", OWNER).with_title("New Year"),
    );
    let llm = Arc::new(StubCompletion::new(
        r#"{"action":"create","target":"2026-02-21","title":"Picnic","content":"x"}"#,
    ));
    let dir = fx.dir();

    let outcome = fx.intake(llm).run(&request(&dir, "picnic", &[])).unwrap();

    assert_eq!(outcome.swept, vec![stale]);
    assert_eq!(file_names(&dir), vec!["2026-02-21-picnic.md"]);
    assert_eq!(
        fx.vcs.commits.lock().unwrap().as_slice(),
        &[
            "Cleanup expired memories: 2026-01-01-new-year.md".to_string(),
            "Update memory: 2026-02-21-picnic.md".to_string(),
        ]
    );
    assert_eq!(fx.vcs.push_count(), 1);
}

#[test]
fn test_no_push_mode() {
    let fx = Fixture::new();
    let llm = Arc::new(StubCompletion::new(r#"{"action":"create","content":"Note"}"#));
    let dir = fx.dir();
    let mut req = request(&dir, "note", &[]);
    req.push = false;

    let outcome = fx.intake(llm).run(&req).unwrap();

    assert_eq!(outcome.path, dir.join("ongoing.md"));
    assert_eq!(fx.vcs.commit_count(), 1);
    assert_eq!(fx.vcs.push_count(), 0);
}

#[test]
fn test_ai_failure_leaves_no_file() {
    let fx = Fixture::new();
    let llm = Arc::new(StubCompletion::failing(Error::http("quota exceeded")));
    let dir = fx.dir();

    let err = fx.intake(llm).run(&request(&dir, "picnic", &[])).unwrap_err();

    assert_eq!(err, Error::http("quota exceeded"));
    assert!(file_names(&dir).is_empty());
    assert_eq!(fx.vcs.commit_count(), 0);
}

#[test]
fn test_invalid_decision_leaves_no_file() {
    let fx = Fixture::new();
    let dir = fx.dir();
    for response in [
        r#"{"action":"delete","content":"x"}"#,
        r#"{"action":"create","title":"No body"}"#,
        "I could not understand the message.",
    ] {
        let llm = Arc::new(StubCompletion::new(response));
        let err = fx.intake(llm).run(&request(&dir, "picnic", &[])).unwrap_err();
        assert_eq!(err.exit_code(), 65, "{}", response);
    }
    assert!(file_names(&dir).is_empty());
    assert_eq!(fx.vcs.commit_count(), 0);
}

#[test]
fn test_commit_failure_is_fatal_but_record_is_complete() {
    let fx = Fixture::with(RecordingStorage::default(), RecordingVersionControl::failing_commit());
    let llm = Arc::new(StubCompletion::new(
        r#"{"action":"create","target":"2026-02-21","title":"Picnic","content":"x"}"#,
    ));
    let dir = fx.dir();

    let err = fx.intake(llm).run(&request(&dir, "picnic", &[])).unwrap_err();

    assert_eq!(err.exit_code(), 70);
    assert_eq!(fx.vcs.push_count(), 0);
    // 一時ファイルは残らず、書かれたレコードは読める
    assert_eq!(file_names(&dir), vec!["2026-02-21-picnic.md"]);
    assert_eq!(
        fx.records.load(&dir.join("2026-02-21-picnic.md")).unwrap().content,
        "x"
    );
}
