//! Lexshelf Server Library
//!
//! HTTP access to a shared [`lexshelf_core::Library`], exported for testing
//! and reuse.

pub mod handlers;
pub mod routes;
pub mod state;
