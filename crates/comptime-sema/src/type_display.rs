//! Type display utilities for formatting types in diagnostics and traces.

use comptime_identity::TypeId;

use crate::table::TypeTable;

/// Render a type the way users write it: `?T` for optionals, `!T` for
/// results, the symbol name otherwise.
pub fn display_type<T: TypeTable + ?Sized>(ty: TypeId, table: &T) -> String {
    let base = match table.sym(ty) {
        Some(sym) => sym.name.clone(),
        None => format!("<unknown type #{}>", ty.idx()),
    };
    let prefix = match (ty.is_option(), ty.is_result()) {
        (true, true) => "?!",
        (true, false) => "?",
        (false, true) => "!",
        (false, false) => "",
    };
    format!("{prefix}{base}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::SymbolTable;
    use comptime_identity::TypeFlag;

    #[test]
    fn display_builtins_and_wrappers() {
        let table = SymbolTable::new();
        assert_eq!(display_type(TypeId::VOID, &table), "void");
        assert_eq!(display_type(TypeId::STRING, &table), "string");
        assert_eq!(
            display_type(TypeId::I32.set_flag(TypeFlag::Option), &table),
            "?i32"
        );
        assert_eq!(
            display_type(TypeId::BOOL.set_flag(TypeFlag::Result), &table),
            "!bool"
        );
    }

    #[test]
    fn display_unknown_index() {
        let table = SymbolTable::new();
        let missing = TypeId::from_index(4000);
        assert_eq!(display_type(missing, &table), "<unknown type #4000>");
    }
}
