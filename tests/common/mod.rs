//! Common test utilities for atcoder-cli integration tests

#[allow(dead_code)]
pub mod fixtures;
#[allow(dead_code)]
pub mod site;

#[allow(unused_imports)]
pub use fixtures::*;
pub use site::*;
