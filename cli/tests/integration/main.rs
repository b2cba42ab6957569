//! Integration tests for instllr
//!
//! These tests spawn the actual binary and check argument handling and the
//! failures that happen before anything on the host is touched.

mod cli_tests;
