//! Buffer integration tests

#[path = "../common/mod.rs"]
mod common;

mod contract_tests;
