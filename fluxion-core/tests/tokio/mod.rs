pub mod cancellation_token_tests;
