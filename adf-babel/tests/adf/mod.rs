//! Wire JSON format tests
//!
//! Tests for Document ↔ ADF JSON conversion and the pending media guard.

mod pending;
mod wire;
