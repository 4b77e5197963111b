//! Integration tests for the scorecard pipelines
//!
//! These tests use wiremock to stand in for the target site and exercise
//! discovery, the browsing session, and full pipeline runs end-to-end.

mod common;
mod discovery_tests;
mod pipeline_tests;
mod session_tests;
