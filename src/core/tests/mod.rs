//! Core module tests
//!
//! Contains test suites for core functionality:
//! - Parser tests (format validation, line endings, folding, scenarios)
//! - Scanner tests (nesting, packing, filters, diagnostics)
//! - Naming tests (insertion, clear, force, idempotence)
//! - Type tests (Display, lookups)

#[cfg(test)]
mod fixtures;
#[cfg(test)]
mod types_tests;
