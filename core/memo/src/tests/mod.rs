mod intake_tests;
