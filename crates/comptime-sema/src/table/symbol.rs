// table/symbol.rs
//
// Symbol records stored in the type table.

use comptime_identity::{TypeId, TypeIdVec};

/// Table entry describing one type.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeSymbol {
    pub name: String,
    pub kind: SymbolKind,
    pub methods: Vec<MethodDef>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SymbolKind {
    /// Builtin scalar (bool, numbers, string) and the void sentinel
    Builtin,
    Struct(StructInfo),
    /// Unsubstituted generic parameter (`T`)
    GenericParam,
    Array {
        elem: TypeId,
    },
    FixedArray {
        elem: TypeId,
        size: usize,
    },
    Map {
        key: TypeId,
        value: TypeId,
    },
    Alias {
        parent: TypeId,
    },
    Enum {
        values: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StructInfo {
    pub fields: Vec<FieldDef>,
    /// Generic parameters of the declaration (`Box[T]` -> `[T]`)
    pub generic_types: TypeIdVec,
    /// Embedded structs, searched after own fields
    pub embeds: TypeIdVec,
}

impl StructInfo {
    pub fn is_generic(&self) -> bool {
        !self.generic_types.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldDef {
    pub name: String,
    /// Declared type, which may still mention generic parameters
    pub typ: TypeId,
    pub is_mut: bool,
    pub is_pub: bool,
    pub is_shared: bool,
    pub is_atomic: bool,
    pub attrs: Vec<String>,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, typ: TypeId) -> Self {
        Self {
            name: name.into(),
            typ,
            ..Self::default()
        }
    }

    pub fn mutable(mut self) -> Self {
        self.is_mut = true;
        self
    }

    pub fn public(mut self) -> Self {
        self.is_pub = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Param {
    pub name: String,
    pub typ: TypeId,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MethodDef {
    pub name: String,
    pub params: Vec<Param>,
    pub return_type: TypeId,
    pub attrs: Vec<String>,
}

impl MethodDef {
    pub fn new(name: impl Into<String>, return_type: TypeId) -> Self {
        Self {
            name: name.into(),
            return_type,
            ..Self::default()
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, typ: TypeId) -> Self {
        self.params.push(Param {
            name: name.into(),
            typ,
        });
        self
    }
}

impl TypeSymbol {
    pub fn new(name: impl Into<String>, kind: SymbolKind) -> Self {
        Self {
            name: name.into(),
            kind,
            methods: Vec::new(),
        }
    }

    pub fn struct_info(&self) -> Option<&StructInfo> {
        match &self.kind {
            SymbolKind::Struct(info) => Some(info),
            _ => None,
        }
    }

    /// Struct declared with at least one generic parameter.
    pub fn is_generic_struct(&self) -> bool {
        self.struct_info().is_some_and(StructInfo::is_generic)
    }

    /// Own field by name (no embeds).
    pub fn find_field(&self, name: &str) -> Option<&FieldDef> {
        self.struct_info()?.fields.iter().find(|f| f.name == name)
    }

    /// Own method by name.
    pub fn find_method(&self, name: &str) -> Option<&MethodDef> {
        self.methods.iter().find(|m| m.name == name)
    }

    pub fn is_array(&self) -> bool {
        matches!(
            self.kind,
            SymbolKind::Array { .. } | SymbolKind::FixedArray { .. }
        )
    }

    pub fn is_map(&self) -> bool {
        matches!(self.kind, SymbolKind::Map { .. })
    }

    pub fn is_alias(&self) -> bool {
        matches!(self.kind, SymbolKind::Alias { .. })
    }

    pub fn is_enum(&self) -> bool {
        matches!(self.kind, SymbolKind::Enum { .. })
    }

    pub fn is_struct(&self) -> bool {
        matches!(self.kind, SymbolKind::Struct(_))
    }
}
