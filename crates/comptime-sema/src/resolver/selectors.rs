// resolver/selectors.rs
//
// Predicates over expressions and the comptime selector routines used by the
// checker and code generator alongside `get_type`.

use comptime_frontend::{BindingKind, ComptimeSelectorExpr, Expr, ExprKind, Ident};
use comptime_identity::TypeId;

use super::TypeResolver;
use crate::errors::{ResolveError, ResolveResult};
use crate::table::FieldDef;
use crate::type_map::TypeMapKey;

fn is_comptime_ident(expr: &Expr) -> bool {
    expr.as_ident().is_some_and(|ident| ident.is_comptime)
}

impl<'a> TypeResolver<'a> {
    /// Whether `expr`'s type depends on compile-time context.
    pub fn is_comptime(&self, expr: &Expr) -> bool {
        match &expr.kind {
            ExprKind::Identifier(ident) => ident.is_comptime,
            ExprKind::Index(idx) => is_comptime_ident(&idx.object),
            ExprKind::Selector(sel) => is_comptime_ident(&sel.expr),
            ExprKind::Binary(bin) => self.is_comptime(&bin.left) || self.is_comptime(&bin.right),
            ExprKind::Grouping(inner) => self.is_comptime(inner),
            ExprKind::ComptimeSelector(_) | ExprKind::ComptimeCall(_) => true,
            ExprKind::IntLiteral(_)
            | ExprKind::FloatLiteral(_)
            | ExprKind::BoolLiteral(_)
            | ExprKind::StringLiteral(_)
            | ExprKind::Call(_)
            | ExprKind::Cast(_) => false,
        }
    }

    /// Binding kind behind `expr`, looking through indexing, the left side of
    /// infix operations and parentheses.
    pub fn comptime_kind(&self, expr: &Expr) -> BindingKind {
        match &expr.kind {
            ExprKind::Identifier(ident) => ident.binding_kind(),
            ExprKind::Index(idx) => self.comptime_kind(&idx.object),
            ExprKind::Binary(bin) => self.comptime_kind(&bin.left),
            ExprKind::Grouping(inner) => self.comptime_kind(inner),
            _ => BindingKind::Other,
        }
    }

    /// Identifier bound to a parameter of the enclosing generic function.
    pub fn is_generic_param_var(&self, expr: &Expr) -> bool {
        expr.as_ident()
            .is_some_and(|ident| ident.binding_kind() == BindingKind::GenericParam)
    }

    /// Expression whose type mentions a generic parameter.
    pub fn is_generic_expr(&self, expr: &Expr) -> bool {
        match &expr.kind {
            ExprKind::Call(call) => !call.concrete_types.is_empty(),
            ExprKind::Identifier(_) => self.is_generic_param_var(expr),
            ExprKind::Index(idx) => self.is_generic_param_var(&idx.object),
            ExprKind::ComptimeSelector(sel) => self.is_generic_param_var(&sel.left),
            ExprKind::Cast(cast) => cast.typ.is_generic(),
            _ => false,
        }
    }

    /// `get_type` for compile-time expressions, `default` for everything else
    /// and for unresolved ones.
    pub fn get_expr_type_or_default(&self, expr: &Expr, default: TypeId) -> ResolveResult<TypeId> {
        if !self.is_comptime(expr) {
            return Ok(default);
        }
        let ctyp = self.get_type(expr)?;
        Ok(if ctyp.is_void() { default } else { ctyp })
    }

    /// `value.$(field.name)`: the current field's type, with generic
    /// parameters substituted.
    pub fn get_comptime_selector_type(&self, node: &ComptimeSelectorExpr, default: TypeId) -> TypeId {
        match &node.field_expr.kind {
            ExprKind::Selector(sel)
                if self.info.is_field_selector(sel) && sel.field_name == "name" =>
            {
                self.host.unwrap_generic(self.info.field_type)
            }
            _ => default,
        }
    }

    /// The declaration of the currently iterated field on the receiver of a
    /// dynamic selector. Embedded structs are searched too.
    pub fn get_comptime_selector_var_type(
        &self,
        node: &ComptimeSelectorExpr,
    ) -> ResolveResult<&'a FieldDef> {
        let field_name = self
            .info
            .field_value
            .as_ref()
            .map(|f| f.name.as_str())
            .unwrap_or_default();
        let table = self.table;
        let receiver = self.host.unwrap_generic(node.left_type);
        table
            .final_sym(receiver)
            .and_then(|sym| table.find_field_with_embeds(sym, field_name))
            .ok_or_else(|| ResolveError::FieldNotFound {
                expr: node.left.to_string(),
                field: field_name.to_string(),
                file: self.file_name(),
                span: node.left.span.into(),
            })
    }

    /// `<loop-var>.typ`: variant and method-parameter types come from the
    /// type map, everything else is the current field type.
    pub fn get_type_from_comptime_var(&self, ident: &Ident) -> TypeId {
        let name = ident.name.as_str();
        let bound = |slot: &Option<String>| slot.as_deref() == Some(name);
        if bound(&self.info.variant_var) || bound(&self.info.method_param_var) {
            self.type_map
                .get_key(TypeMapKey::Selector { var: name })
                .unwrap_or(TypeId::VOID)
        } else {
            self.info.field_type
        }
    }

    /// Value of a `field.is_*` property for the current field. `None` outside a
    /// field loop or for names that are not field properties.
    pub fn field_selector_bool(&self, name: &str) -> Option<bool> {
        let field = self.info.field_value.as_ref()?;
        let ty = self.host.unwrap_generic(self.info.field_type);
        let sym = self.table.final_sym(ty);
        let value = match name {
            "is_mut" => field.is_mut,
            "is_pub" => field.is_pub,
            "is_shared" => field.is_shared,
            "is_atomic" => field.is_atomic,
            "is_option" => ty.is_option(),
            "is_array" => sym.is_some_and(|s| s.is_array()),
            "is_map" => sym.is_some_and(|s| s.is_map()),
            // no channel types in the table
            "is_chan" => false,
            "is_struct" => sym.is_some_and(|s| s.is_struct()),
            "is_alias" => self.table.sym(ty).is_some_and(|s| s.is_alias()),
            "is_enum" => sym.is_some_and(|s| s.is_enum()),
            _ => return None,
        };
        Some(value)
    }
}
