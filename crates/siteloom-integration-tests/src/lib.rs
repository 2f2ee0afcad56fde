//! Integration tests for Siteloom
//!
//! End-to-end scenarios over the fully wired axum application with in-memory
//! backends. See the `tests/` directory; this crate has no library code.
