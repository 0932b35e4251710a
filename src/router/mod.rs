//! Path matching and route resolution.
//!
//! [`pattern`] compiles a route template into an anchored, case-insensitive
//! regular expression; [`Router`] keeps the compiled matchers in
//! registration order and resolves an incoming path to a handler identifier
//! with first-match-wins semantics.

pub mod pattern;

mod core;

pub use core::{RouteEntry, Router};
pub use pattern::{compile, CompiledMatcher};
