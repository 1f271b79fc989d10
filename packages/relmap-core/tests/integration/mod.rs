//! Integration test suite.
//!
//! 1. Mapping DAO behaviour over a shared store
//! 2. Snapshot persistence round trips
//! 3. Concurrent readers and writers

pub mod concurrency_tests;
pub mod helpers;
pub mod mapping_tests;
pub mod persistence_tests;
