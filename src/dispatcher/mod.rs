//! Request dispatch pipeline.
//!
//! The [`Dispatcher`] owns the router, the format registry, and the handler
//! table, and runs one request through the fixed sequence: resolve the
//! route, check method support, invoke the operation, finalize the
//! response. Every possible failure collapses into a structured
//! [`DispatchOutcome`] here; nothing escapes
//! [`dispatch`](Dispatcher::dispatch).

mod core;

pub use core::{DispatchOutcome, Dispatcher};
