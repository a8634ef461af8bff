//! Dependency injection integration tests

mod typed_access_tests;
