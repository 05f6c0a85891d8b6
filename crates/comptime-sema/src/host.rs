//! Capability the resolver needs from the checker / code generator.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use comptime_identity::TypeId;
use rustc_hash::FxHashMap;

use crate::table::SymbolTable;

/// Narrow view of the host component, injected at resolver construction.
///
/// The host keeps ownership of the current instantiation; implementations
/// that change it during traversal use interior mutability, since the
/// resolver holds a shared borrow for its whole lifetime.
pub trait GenericHost {
    /// Substitute bound generic parameters with the concrete arguments of
    /// the current instantiation. Non-generic types pass through.
    fn unwrap_generic(&self, ty: TypeId) -> TypeId;

    /// File being checked, for diagnostics.
    fn current_file(&self) -> &Path;
}

/// Generic-parameter bindings for one instantiation of a generic routine.
///
/// Bare parameters are substituted directly. Containers that mention a
/// parameter (`[]T`, `map[K]V`) are substituted once [`instantiate`] has
/// interned their concrete forms in the table. Substituted types keep the
/// optional/result wrappers of the use site (`?T` with `T = int` becomes
/// `?int`).
///
/// [`instantiate`]: InstantiationScope::instantiate
#[derive(Debug, Default)]
pub struct InstantiationScope {
    file: PathBuf,
    bindings: RefCell<FxHashMap<u32, TypeId>>,
    /// Generic container index -> concrete container
    containers: RefCell<FxHashMap<u32, TypeId>>,
}

impl InstantiationScope {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            bindings: RefCell::new(FxHashMap::default()),
            containers: RefCell::new(FxHashMap::default()),
        }
    }

    pub fn bind(&self, param: TypeId, concrete: TypeId) {
        tracing::trace!(?param, ?concrete, "bind generic parameter");
        self.bindings.borrow_mut().insert(param.idx(), concrete);
    }

    /// Bind parameters to arguments pairwise. Extra entries on either side
    /// are ignored.
    pub fn bind_all(&self, params: &[TypeId], concrete: &[TypeId]) {
        let mut bindings = self.bindings.borrow_mut();
        for (param, arg) in params.iter().zip(concrete) {
            bindings.insert(param.idx(), *arg);
        }
    }

    /// Intern the concrete form of every generic container in `table` under
    /// the current bindings. Call after binding and before resolving;
    /// containers created later stay generic until the next call.
    pub fn instantiate(&self, table: &mut SymbolTable) {
        let subs = self.bindings.borrow().clone();
        let mut containers = self.containers.borrow_mut();
        containers.clear();
        for generic in table.generic_containers() {
            let concrete = table.substitute(generic, &subs);
            if concrete.idx() != generic.idx() {
                containers.insert(generic.idx(), concrete);
            }
        }
        tracing::debug!(
            bindings = subs.len(),
            containers = containers.len(),
            "instantiated generic containers"
        );
    }

    /// Leave the instantiation: drop every binding.
    pub fn clear(&self) {
        self.bindings.borrow_mut().clear();
        self.containers.borrow_mut().clear();
    }

    pub fn binding(&self, param: TypeId) -> Option<TypeId> {
        self.bindings.borrow().get(&param.idx()).copied()
    }
}

impl GenericHost for InstantiationScope {
    fn unwrap_generic(&self, ty: TypeId) -> TypeId {
        if !ty.is_generic() {
            return ty;
        }
        let concrete = self
            .binding(ty)
            .or_else(|| self.containers.borrow().get(&ty.idx()).copied());
        match concrete {
            Some(concrete) => concrete.with_wrappers_of(ty),
            None => ty,
        }
    }

    fn current_file(&self) -> &Path {
        &self.file
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use comptime_identity::TypeFlag;

    fn param(index: u32) -> TypeId {
        TypeId::from_index(index).set_flag(TypeFlag::Generic)
    }

    #[test]
    fn unbound_and_concrete_pass_through() {
        let scope = InstantiationScope::new("main.v");
        assert_eq!(scope.unwrap_generic(TypeId::I32), TypeId::I32);
        assert_eq!(scope.unwrap_generic(param(30)), param(30));
        assert_eq!(scope.current_file(), Path::new("main.v"));
    }

    #[test]
    fn bound_param_is_substituted_with_wrappers() {
        let scope = InstantiationScope::new("main.v");
        let t = param(30);
        scope.bind(t, TypeId::STRING);
        assert_eq!(scope.unwrap_generic(t), TypeId::STRING);

        let opt_t = t.set_flag(TypeFlag::Option);
        let unwrapped = scope.unwrap_generic(opt_t);
        assert!(unwrapped.is_option());
        assert!(!unwrapped.is_generic());
        assert_eq!(unwrapped.idx(), TypeId::STRING.idx());
    }

    #[test]
    fn instantiated_containers_are_substituted() {
        let mut table = SymbolTable::new();
        let t = table.register_generic_param("T");
        let ts = table.array_of(t);
        let lookup = table.map_of(TypeId::STRING, t);

        let scope = InstantiationScope::new("main.v");
        scope.bind(t, TypeId::I32);
        // not yet instantiated
        assert_eq!(scope.unwrap_generic(ts), ts);

        scope.instantiate(&mut table);
        assert_eq!(scope.unwrap_generic(ts), table.array_of(TypeId::I32));
        assert_eq!(
            scope.unwrap_generic(lookup),
            table.map_of(TypeId::STRING, TypeId::I32)
        );
        let opt = scope.unwrap_generic(ts.set_flag(TypeFlag::Option));
        assert!(opt.is_option());
        assert!(!opt.is_generic());

        scope.clear();
        assert_eq!(scope.unwrap_generic(ts), ts);
    }

    #[test]
    fn bind_all_and_clear() {
        let scope = InstantiationScope::new("main.v");
        let (k, v) = (param(30), param(31));
        scope.bind_all(&[k, v], &[TypeId::STRING, TypeId::F64]);
        assert_eq!(scope.unwrap_generic(v), TypeId::F64);
        scope.clear();
        assert_eq!(scope.unwrap_generic(v), v);
    }
}
