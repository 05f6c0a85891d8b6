// crates/comptime-identity/src/lib.rs
//
// Foundational value types shared by the frontend and sema crates:
// source positions and packed type handles.

mod span;
mod type_id;

pub use span::Span;
pub use type_id::{TypeFlag, TypeId, TypeIdVec};
