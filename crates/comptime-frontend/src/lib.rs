//! Comptime frontend: the expression model handed to the resolver and the
//! binding taxonomy attached to identifiers by the checker.

pub mod ast;
pub mod ast_display;
pub mod binding;

pub use ast::{
    BinaryExpr, BinaryOp, CallExpr, CastExpr, ComptimeCallExpr, ComptimeSelectorExpr, Expr,
    ExprKind, Ident, IndexExpr, SelectorExpr,
};
pub use binding::{BindingKind, Var};
pub use comptime_identity::{Span, TypeFlag, TypeId, TypeIdVec};
