//! Shared type table: symbols for every type the compiler knows about.
//!
//! The resolver only reads the table through [`TypeTable`]; [`SymbolTable`]
//! is the in-memory implementation the checker populates.
//!
//! - `symbol` - symbol records (structs, containers, aliases, methods, fields)
//! - `lookup` - the read-only lookup trait and its derived queries

mod lookup;
mod symbol;

pub use lookup::TypeTable;
pub use symbol::{FieldDef, MethodDef, Param, StructInfo, SymbolKind, TypeSymbol};

use comptime_identity::{TypeFlag, TypeId};
use rustc_hash::FxHashMap;

use crate::type_display::display_type;

/// Builtins in reserved-index order (see `TypeId` constants).
const BUILTIN_NAMES: [&str; TypeId::FIRST_DYNAMIC as usize] = [
    "void", "bool", "i8", "i16", "i32", "i64", "u8", "u16", "u32", "u64", "f32", "f64", "string",
];

/// In-memory type table. Ids are indices into `symbols`.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    symbols: Vec<TypeSymbol>,
    type_by_name: FxHashMap<String, TypeId>,

    // Interned container instantiations
    arrays: FxHashMap<TypeId, TypeId>,
    fixed_arrays: FxHashMap<(TypeId, usize), TypeId>,
    maps: FxHashMap<(TypeId, TypeId), TypeId>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        let mut table = Self {
            symbols: Vec::with_capacity(64),
            type_by_name: FxHashMap::default(),
            arrays: FxHashMap::default(),
            fixed_arrays: FxHashMap::default(),
            maps: FxHashMap::default(),
        };
        for name in BUILTIN_NAMES {
            table.register(TypeSymbol::new(name, SymbolKind::Builtin));
        }
        table
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Register a named symbol. Re-registering a name replaces the symbol in
    /// place and keeps its id.
    pub fn register(&mut self, sym: TypeSymbol) -> TypeId {
        if let Some(&existing) = self.type_by_name.get(&sym.name) {
            tracing::debug!(name = %sym.name, ?existing, "replacing registered symbol");
            self.symbols[existing.idx() as usize] = sym;
            return existing;
        }
        let id = TypeId::from_index(self.symbols.len() as u32);
        self.type_by_name.insert(sym.name.clone(), id);
        self.symbols.push(sym);
        id
    }

    /// Register a struct. Generic structs list their parameters in
    /// `info.generic_types`.
    pub fn register_struct(&mut self, name: &str, info: StructInfo) -> TypeId {
        self.register(TypeSymbol::new(name, SymbolKind::Struct(info)))
    }

    /// Register a generic parameter. The returned id carries the `Generic` flag.
    pub fn register_generic_param(&mut self, name: &str) -> TypeId {
        self.register(TypeSymbol::new(name, SymbolKind::GenericParam))
            .set_flag(TypeFlag::Generic)
    }

    pub fn register_alias(&mut self, name: &str, parent: TypeId) -> TypeId {
        self.register(TypeSymbol::new(name, SymbolKind::Alias { parent }))
    }

    pub fn register_enum(&mut self, name: &str, values: &[&str]) -> TypeId {
        let values = values.iter().map(|v| v.to_string()).collect();
        self.register(TypeSymbol::new(name, SymbolKind::Enum { values }))
    }

    /// `[]elem`, interned. Generic element types make the array generic.
    pub fn array_of(&mut self, elem: TypeId) -> TypeId {
        if let Some(&id) = self.arrays.get(&elem) {
            return id;
        }
        let name = format!("[]{}", display_type(elem, &*self));
        let id = self.push_anonymous(name, SymbolKind::Array { elem });
        let id = inherit_generic(id, &[elem]);
        self.arrays.insert(elem, id);
        id
    }

    /// `[size]elem`, interned.
    pub fn fixed_array_of(&mut self, elem: TypeId, size: usize) -> TypeId {
        if let Some(&id) = self.fixed_arrays.get(&(elem, size)) {
            return id;
        }
        let name = format!("[{size}]{}", display_type(elem, &*self));
        let id = self.push_anonymous(name, SymbolKind::FixedArray { elem, size });
        let id = inherit_generic(id, &[elem]);
        self.fixed_arrays.insert((elem, size), id);
        id
    }

    /// `map[key]value`, interned.
    pub fn map_of(&mut self, key: TypeId, value: TypeId) -> TypeId {
        if let Some(&id) = self.maps.get(&(key, value)) {
            return id;
        }
        let name = format!(
            "map[{}]{}",
            display_type(key, &*self),
            display_type(value, &*self)
        );
        let id = self.push_anonymous(name, SymbolKind::Map { key, value });
        let id = inherit_generic(id, &[key, value]);
        self.maps.insert((key, value), id);
        id
    }

    /// Attach a method to a type. Returns false if `ty` is not in the table.
    pub fn add_method(&mut self, ty: TypeId, method: MethodDef) -> bool {
        match self.symbols.get_mut(ty.idx() as usize) {
            Some(sym) => {
                sym.methods.push(method);
                true
            }
            None => false,
        }
    }

    /// Look up a named type.
    pub fn find_type(&self, name: &str) -> Option<TypeId> {
        self.type_by_name.get(name).copied()
    }

    /// Interned containers that still mention a generic parameter.
    pub fn generic_containers(&self) -> Vec<TypeId> {
        self.arrays
            .values()
            .chain(self.fixed_arrays.values())
            .chain(self.maps.values())
            .copied()
            .filter(|id| id.is_generic())
            .collect()
    }

    /// Replace generic parameters (keyed by table index) with concrete types,
    /// recursing through arrays, fixed arrays and maps. The result keeps the
    /// wrapper flags of `ty` and is interned like any other container.
    pub fn substitute(&mut self, ty: TypeId, subs: &FxHashMap<u32, TypeId>) -> TypeId {
        if subs.is_empty() || !ty.is_generic() {
            return ty;
        }
        let Some(kind) = self.sym(ty).map(|s| s.kind.clone()) else {
            return ty;
        };
        let substituted = match kind {
            SymbolKind::GenericParam => match subs.get(&ty.idx()) {
                Some(&concrete) => concrete,
                None => return ty,
            },
            SymbolKind::Array { elem } => {
                let elem = self.substitute(elem, subs);
                self.array_of(elem)
            }
            SymbolKind::FixedArray { elem, size } => {
                let elem = self.substitute(elem, subs);
                self.fixed_array_of(elem, size)
            }
            SymbolKind::Map { key, value } => {
                let key = self.substitute(key, subs);
                let value = self.substitute(value, subs);
                self.map_of(key, value)
            }
            SymbolKind::Builtin
            | SymbolKind::Struct(_)
            | SymbolKind::Alias { .. }
            | SymbolKind::Enum { .. } => return ty,
        };
        substituted.with_wrappers_of(ty)
    }

    fn push_anonymous(&mut self, name: String, kind: SymbolKind) -> TypeId {
        let id = TypeId::from_index(self.symbols.len() as u32);
        self.symbols.push(TypeSymbol::new(name, kind));
        id
    }
}

fn inherit_generic(id: TypeId, parts: &[TypeId]) -> TypeId {
    if parts.iter().any(|p| p.is_generic()) {
        id.set_flag(TypeFlag::Generic)
    } else {
        id
    }
}

impl TypeTable for SymbolTable {
    fn sym(&self, ty: TypeId) -> Option<&TypeSymbol> {
        self.symbols.get(ty.idx() as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    #[test]
    fn builtins_match_reserved_ids() {
        let table = SymbolTable::new();
        assert_eq!(table.find_type("void"), Some(TypeId::VOID));
        assert_eq!(table.find_type("bool"), Some(TypeId::BOOL));
        assert_eq!(table.find_type("i32"), Some(TypeId::I32));
        assert_eq!(table.find_type("u8"), Some(TypeId::U8));
        assert_eq!(table.find_type("f64"), Some(TypeId::F64));
        assert_eq!(table.find_type("string"), Some(TypeId::STRING));
        assert_eq!(table.len(), TypeId::FIRST_DYNAMIC as usize);
    }

    #[test]
    fn register_and_lookup_struct_field() {
        let mut table = SymbolTable::new();
        let point = table.register_struct(
            "Point",
            StructInfo {
                fields: vec![FieldDef::new("x", TypeId::I32), FieldDef::new("y", TypeId::I32)],
                ..StructInfo::default()
            },
        );
        let sym = table.sym(point).expect("registered");
        assert_eq!(sym.name, "Point");
        assert_eq!(table.find_field(sym, "y").map(|f| f.typ), Some(TypeId::I32));
        assert!(table.find_field(sym, "z").is_none());
        assert!(!sym.is_generic_struct());
    }

    #[test]
    fn reregistering_keeps_id() {
        let mut table = SymbolTable::new();
        let a = table.register_struct("Node", StructInfo::default());
        let b = table.register_struct(
            "Node",
            StructInfo {
                fields: vec![FieldDef::new("next", TypeId::I64)],
                ..StructInfo::default()
            },
        );
        assert_eq!(a, b);
        let sym = table.sym(a).expect("registered");
        assert!(sym.find_field("next").is_some());
    }

    #[test]
    fn generic_param_is_flagged() {
        let mut table = SymbolTable::new();
        let t = table.register_generic_param("T");
        assert!(t.is_generic());
        assert_eq!(table.sym(t).map(|s| &s.kind), Some(&SymbolKind::GenericParam));
    }

    #[test]
    fn containers_are_interned_and_inherit_generic() {
        let mut table = SymbolTable::new();
        let a = table.array_of(TypeId::I32);
        let b = table.array_of(TypeId::I32);
        assert_eq!(a, b);
        assert!(!a.is_generic());

        let t = table.register_generic_param("T");
        let ts = table.array_of(t);
        assert!(ts.is_generic());
        assert_eq!(table.sym(ts).map(|s| s.name.as_str()), Some("[]T"));

        let m = table.map_of(TypeId::STRING, t);
        assert!(m.is_generic());
        assert_eq!(table.sym(m).map(|s| s.name.as_str()), Some("map[string]T"));
    }

    #[test]
    fn value_type_of_containers() {
        let mut table = SymbolTable::new();
        let arr = table.array_of(TypeId::F64);
        let fixed = table.fixed_array_of(TypeId::BOOL, 4);
        let map = table.map_of(TypeId::STRING, TypeId::I64);
        assert_eq!(table.value_type(arr), TypeId::F64);
        assert_eq!(table.value_type(fixed), TypeId::BOOL);
        assert_eq!(table.value_type(map), TypeId::I64);
        assert_eq!(table.value_type(TypeId::STRING), TypeId::U8);
        assert_eq!(table.value_type(TypeId::I32), TypeId::VOID);
    }

    #[test]
    fn value_type_sees_through_aliases() {
        let mut table = SymbolTable::new();
        let arr = table.array_of(TypeId::U16);
        let alias = table.register_alias("Samples", arr);
        assert_eq!(table.value_type(alias), TypeId::U16);
        assert!(table.final_sym(alias).is_some_and(TypeSymbol::is_array));
    }

    #[test]
    fn cyclic_alias_terminates() {
        let mut table = SymbolTable::new();
        let a = table.register_alias("A", TypeId::VOID);
        let b = table.register_alias("B", a);
        table.register_alias("A", b);
        // Must not loop forever; the result is whatever the chain stops on.
        let _ = table.final_sym(a);
        assert_eq!(table.value_type(a), TypeId::VOID);
    }

    #[test]
    fn field_lookup_through_embeds() {
        let mut table = SymbolTable::new();
        let base = table.register_struct(
            "Base",
            StructInfo {
                fields: vec![FieldDef::new("id", TypeId::U64)],
                ..StructInfo::default()
            },
        );
        let mid = table.register_struct(
            "Mid",
            StructInfo {
                embeds: smallvec![base],
                ..StructInfo::default()
            },
        );
        let top = table.register_struct(
            "Top",
            StructInfo {
                fields: vec![FieldDef::new("name", TypeId::STRING)],
                embeds: smallvec![mid],
                ..StructInfo::default()
            },
        );
        let sym = table.sym(top).expect("registered");
        assert!(table.find_field(sym, "id").is_none());
        assert_eq!(
            table.find_field_with_embeds(sym, "id").map(|f| f.typ),
            Some(TypeId::U64)
        );
        assert_eq!(
            table.find_field_with_embeds(sym, "name").map(|f| f.typ),
            Some(TypeId::STRING)
        );
    }

    #[test]
    fn substitute_array_of_generic_param() {
        let mut table = SymbolTable::new();
        let t = table.register_generic_param("T");
        let ts = table.array_of(t);
        let subs: FxHashMap<u32, TypeId> = [(t.idx(), TypeId::STRING)].into_iter().collect();

        let result = table.substitute(ts, &subs);
        assert_eq!(result, table.array_of(TypeId::STRING));
        assert!(!result.is_generic());
        // interned: same answer twice
        assert_eq!(table.substitute(ts, &subs), result);
    }

    #[test]
    fn substitute_nested_containers_keeps_wrappers() {
        let mut table = SymbolTable::new();
        let k = table.register_generic_param("K");
        let v = table.register_generic_param("V");
        let inner = table.fixed_array_of(v, 3);
        let map = table.map_of(k, inner).set_flag(TypeFlag::Option);
        let subs: FxHashMap<u32, TypeId> = [(k.idx(), TypeId::STRING), (v.idx(), TypeId::F32)]
            .into_iter()
            .collect();

        let result = table.substitute(map, &subs);
        assert!(result.is_option());
        assert!(!result.is_generic());
        let concrete_inner = table.fixed_array_of(TypeId::F32, 3);
        assert_eq!(table.value_type(result), concrete_inner);
        assert_eq!(
            table.sym(result).map(|s| s.name.as_str()),
            Some("map[string][3]f32")
        );
    }

    #[test]
    fn substitute_leaves_unbound_and_concrete_types() {
        let mut table = SymbolTable::new();
        let t = table.register_generic_param("T");
        let u = table.register_generic_param("U");
        let subs: FxHashMap<u32, TypeId> = [(t.idx(), TypeId::I8)].into_iter().collect();
        assert_eq!(table.substitute(u, &subs), u);
        assert_eq!(table.substitute(TypeId::BOOL, &subs), TypeId::BOOL);
        assert_eq!(table.generic_containers(), Vec::<TypeId>::new());

        let us = table.array_of(u);
        assert_eq!(table.substitute(us, &subs), us);
        assert_eq!(table.generic_containers(), vec![us]);
    }

    #[test]
    fn enum_symbol_keeps_its_values() {
        let mut table = SymbolTable::new();
        let color = table.register_enum("Color", &["red", "green"]);
        let sym = table.sym(color).expect("registered");
        assert!(sym.is_enum());
        assert!(!sym.is_struct());
        assert_eq!(
            sym.kind,
            SymbolKind::Enum {
                values: vec!["red".to_string(), "green".to_string()]
            }
        );
    }

    #[test]
    fn methods_are_found_by_name() {
        let mut table = SymbolTable::new();
        let user = table.register_struct("User", StructInfo::default());
        assert!(table.add_method(user, MethodDef::new("greet", TypeId::STRING)));
        assert!(!table.add_method(TypeId::from_index(9999), MethodDef::default()));

        let sym = table.sym(user).expect("registered");
        assert_eq!(
            table.find_method(sym, "greet").map(|m| m.return_type),
            Some(TypeId::STRING)
        );
        assert!(table.find_method(sym, "wave").is_none());
    }
}
