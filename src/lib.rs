// src/lib.rs
//! Compile-time type resolution for a compiler's checker and code generator.
//!
//! The member crates hold the model (`identity`, `frontend`) and the
//! resolver itself (`sema`); this crate adds the driver glue that turns a
//! fatal resolution error into a rendered diagnostic and an exit status.

pub mod driver;

pub use comptime_frontend as frontend;
pub use comptime_identity as identity;
pub use comptime_sema as sema;

pub use comptime_sema::{ResolveError, ResolveResult, TypeResolver};
pub use driver::{FATAL_EXIT_CODE, finish, init_tracing, render_error};
