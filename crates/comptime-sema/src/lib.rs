//! Compile-time type resolution.
//!
//! Given the compile-time loop the checker is inside and the types it has
//! recorded so far, [`TypeResolver`] computes the concrete type of
//! expressions whose type is not known statically: loop variables, dynamic
//! field selectors, comptime method calls and generic call results.

pub mod context;
pub mod context_stack;
pub mod errors;
pub mod host;
pub mod options;
pub mod resolver;
pub mod table;
pub mod type_display;
pub mod type_map;

pub use context::{ComptimeContext, ComptimeLoop, FIELD_SELECTOR_BOOLS};
pub use context_stack::ContextStack;
pub use errors::{ResolveError, ResolveResult};
pub use host::{GenericHost, InstantiationScope};
pub use options::{ResolverOptions, STRICT_STACK_ENV, UnderflowPolicy};
pub use resolver::{ComptimeScope, TypeResolver, TypeResolverBuilder};
pub use table::{
    FieldDef, MethodDef, Param, StructInfo, SymbolKind, SymbolTable, TypeSymbol, TypeTable,
};
pub use type_display::display_type;
pub use type_map::{DynamicTypeMap, TypeMapKey};
