//! Types recorded by the host during traversal, keyed by variable.

use comptime_identity::TypeId;
use rustc_hash::FxHashMap;

/// Structured form of the three key shapes the map is addressed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeMapKey<'a> {
    /// Loop key/value variable: the bare name
    Var(&'a str),
    /// Generic call result, disambiguated by declaration position:
    /// `t.<name>.<pos>`
    GenericVar { name: &'a str, pos: usize },
    /// Type bound to a loop variable: `<var>.typ`
    Selector { var: &'a str },
}

impl TypeMapKey<'_> {
    pub fn render(&self) -> String {
        match self {
            TypeMapKey::Var(name) => (*name).to_string(),
            TypeMapKey::GenericVar { name, pos } => format!("t.{name}.{pos}"),
            TypeMapKey::Selector { var } => format!("{var}.typ"),
        }
    }
}

/// String-keyed map from variables to resolved types.
///
/// Absence of a key is not an error; readers supply their own fallback.
#[derive(Debug, Clone, Default)]
pub struct DynamicTypeMap {
    types: FxHashMap<String, TypeId>,
}

impl DynamicTypeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `ty` under `key`, returning the previous entry.
    pub fn insert(&mut self, key: impl Into<String>, ty: TypeId) -> Option<TypeId> {
        let key = key.into();
        tracing::trace!(%key, ?ty, "type map insert");
        self.types.insert(key, ty)
    }

    pub fn insert_key(&mut self, key: TypeMapKey<'_>, ty: TypeId) -> Option<TypeId> {
        self.insert(key.render(), ty)
    }

    pub fn get(&self, key: &str) -> Option<TypeId> {
        self.types.get(key).copied()
    }

    pub fn get_key(&self, key: TypeMapKey<'_>) -> Option<TypeId> {
        self.get(&key.render())
    }

    pub fn remove(&mut self, key: &str) -> Option<TypeId> {
        self.types.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.types.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn clear(&mut self) {
        self.types.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, TypeId)> {
        self.types.iter().map(|(k, v)| (k.as_str(), *v))
    }
}
