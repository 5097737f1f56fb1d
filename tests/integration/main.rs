//! Integration tests for threadline

mod cli_test;
mod export_test;
mod helpers;
