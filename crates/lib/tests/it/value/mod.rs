//! Value integration tests
//!
//! This module tests the Key, Value and Map types on their own,
//! including JSON serialization.
