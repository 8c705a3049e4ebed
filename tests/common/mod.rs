//! Common test utilities and helpers
//!
//! Shared fixtures and mock collaborators used by the integration tests.

#![allow(dead_code)]

pub mod mock_services;
pub mod test_fixtures;
