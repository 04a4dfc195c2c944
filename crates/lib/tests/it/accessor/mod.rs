//! Accessor integration tests
//!
//! This module tests the Accessor type over caller-owned and cast maps.
//! Tests are organized by operation family for better maintainability.

mod construction_tests;
mod error_factory_tests;
mod mutation_tests;
mod path_tests;
