//! Integration test harness for the StudyHub HTTP API.

mod helpers;

mod api_test;
mod sse_test;
