// crates/comptime-frontend/src/binding.rs
//! How a compile-time-relevant variable was introduced.

use comptime_identity::{Span, TypeId, TypeIdVec};

/// Binding category of a variable at the point it is referenced.
///
/// The checker tags every variable exactly once; the resolver picks its
/// lookup strategy from this tag alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BindingKind {
    /// Parameter of the enclosing generic function (`x T`)
    GenericParam,
    /// Result of a call to a generic function (`y := make[T]()`)
    GenericVar,
    /// Variable narrowed by a smart-cast over the current variant
    Smartcast,
    /// Key variable of a compile-time map/array loop
    KeyVar,
    /// Value variable of a compile-time map/array loop
    ValueVar,
    /// Field variable of a compile-time field loop
    FieldVar,
    #[default]
    Other,
}

impl BindingKind {
    /// Kinds whose type lives only in the dynamic type map.
    pub fn is_loop_var(self) -> bool {
        matches!(self, BindingKind::KeyVar | BindingKind::ValueVar)
    }

    pub fn is_comptime(self) -> bool {
        self != BindingKind::Other
    }
}

/// A declared variable as seen from a use site.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Var {
    pub name: String,
    /// Statically declared type
    pub typ: TypeId,
    pub kind: BindingKind,
    /// Types this variable was smart-cast to, oldest first
    pub smartcasts: TypeIdVec,
    /// Narrowed out of an optional wrapper
    pub is_unwrapped: bool,
    /// Declaration position
    pub pos: Span,
}

impl Var {
    pub fn new(name: impl Into<String>, typ: TypeId, kind: BindingKind) -> Self {
        Self {
            name: name.into(),
            typ,
            kind,
            ..Self::default()
        }
    }

    pub fn at(mut self, pos: Span) -> Self {
        self.pos = pos;
        self
    }

    pub fn unwrapped(mut self) -> Self {
        self.is_unwrapped = true;
        self
    }

    pub fn with_smartcasts(mut self, casts: impl IntoIterator<Item = TypeId>) -> Self {
        self.smartcasts.extend(casts);
        self
    }

    /// Most recent smart-cast, if any.
    pub fn last_smartcast(&self) -> Option<TypeId> {
        self.smartcasts.last().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_kind_is_not_comptime() {
        assert_eq!(BindingKind::default(), BindingKind::Other);
        assert!(!BindingKind::Other.is_comptime());
        assert!(BindingKind::FieldVar.is_comptime());
    }

    #[test]
    fn loop_vars() {
        assert!(BindingKind::KeyVar.is_loop_var());
        assert!(BindingKind::ValueVar.is_loop_var());
        assert!(!BindingKind::FieldVar.is_loop_var());
    }

    #[test]
    fn last_smartcast_is_newest() {
        let var = Var::new("v", TypeId::I64, BindingKind::GenericVar)
            .with_smartcasts([TypeId::I8, TypeId::STRING]);
        assert_eq!(var.last_smartcast(), Some(TypeId::STRING));
        assert_eq!(Var::default().last_smartcast(), None);
    }
}
