// table/lookup.rs
//
// Read-only view of the type table used by the resolver.

use std::collections::VecDeque;

use comptime_identity::TypeId;
use rustc_hash::FxHashSet;

use super::symbol::{FieldDef, MethodDef, SymbolKind, TypeSymbol};

/// Alias chains longer than this are treated as cyclic.
const MAX_ALIAS_DEPTH: usize = 64;

/// Lookups the resolver needs from the compiler's shared type table.
///
/// Only `sym` is required; the rest derive from it but may be overridden by
/// tables with faster indexes.
pub trait TypeTable {
    /// Symbol for the index of `ty` (flags ignored).
    fn sym(&self, ty: TypeId) -> Option<&TypeSymbol>;

    /// Follow alias symbols to the aliased type. Keeps the flags of `ty`.
    fn unalias(&self, ty: TypeId) -> TypeId {
        let mut current = ty;
        for _ in 0..MAX_ALIAS_DEPTH {
            match self.sym(current).map(|s| &s.kind) {
                Some(SymbolKind::Alias { parent }) => {
                    current = parent.with_wrappers_of(current);
                }
                _ => return current,
            }
        }
        tracing::warn!(?ty, "alias chain too deep, treating as cyclic");
        current
    }

    /// Symbol of the type an alias ultimately names.
    fn final_sym(&self, ty: TypeId) -> Option<&TypeSymbol> {
        self.sym(self.unalias(ty))
    }

    fn find_field<'t>(&'t self, sym: &'t TypeSymbol, name: &str) -> Option<&'t FieldDef> {
        sym.find_field(name)
    }

    /// Own fields first, then embedded structs breadth-first.
    fn find_field_with_embeds<'t>(
        &'t self,
        sym: &'t TypeSymbol,
        name: &str,
    ) -> Option<&'t FieldDef> {
        if let Some(field) = self.find_field(sym, name) {
            return Some(field);
        }
        let info = sym.struct_info()?;
        let mut queue: VecDeque<TypeId> = info.embeds.iter().copied().collect();
        let mut seen = FxHashSet::default();
        while let Some(embed) = queue.pop_front() {
            if !seen.insert(embed.idx()) {
                continue;
            }
            let Some(embed_sym) = self.final_sym(embed) else {
                continue;
            };
            if let Some(field) = self.find_field(embed_sym, name) {
                return Some(field);
            }
            if let Some(embed_info) = embed_sym.struct_info() {
                queue.extend(embed_info.embeds.iter().copied());
            }
        }
        None
    }

    fn find_method<'t>(&'t self, sym: &'t TypeSymbol, name: &str) -> Option<&'t MethodDef> {
        sym.find_method(name)
    }

    /// Element type of a container: arrays yield their element, maps their
    /// value, strings `u8`. Anything else is `VOID`.
    fn value_type(&self, ty: TypeId) -> TypeId {
        let resolved = self.unalias(ty);
        if resolved.idx() == TypeId::STRING.idx() {
            return TypeId::U8;
        }
        match self.sym(resolved).map(|s| &s.kind) {
            Some(SymbolKind::Array { elem }) | Some(SymbolKind::FixedArray { elem, .. }) => *elem,
            Some(SymbolKind::Map { value, .. }) => *value,
            _ => TypeId::VOID,
        }
    }
}
