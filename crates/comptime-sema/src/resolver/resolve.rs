// resolver/resolve.rs
//
// Resolution entry points: dispatch over expression shapes.

use comptime_frontend::{BindingKind, ComptimeCallExpr, Expr, ExprKind, SelectorExpr, Var};
use comptime_identity::{TypeFlag, TypeId};

use super::TypeResolver;
use crate::errors::{ResolveError, ResolveResult};
use crate::type_display::display_type;
use crate::type_map::TypeMapKey;

impl TypeResolver<'_> {
    /// Resolved type of `node` if it is a compile-time dependent shape this
    /// resolver understands, `default` otherwise. Never yields the void
    /// sentinel for a non-void `default`.
    pub fn get_type_or_default(&self, node: &Expr, default: TypeId) -> ResolveResult<TypeId> {
        match &node.kind {
            ExprKind::Identifier(ident) if ident.is_comptime => {
                let ctyp = self.get_type(node)?;
                Ok(if ctyp.is_void() { default } else { ctyp })
            }
            ExprKind::Selector(sel) => Ok(self.generic_field_type(sel)?.unwrap_or(default)),
            ExprKind::Grouping(inner) => self.get_type_or_default(inner, default),
            // Arithmetic operands share a type; the left side decides.
            ExprKind::Binary(bin) if bin.op.is_arithmetic() => {
                self.get_type_or_default(&bin.left, default)
            }
            ExprKind::Identifier(_)
            | ExprKind::Binary(_)
            | ExprKind::IntLiteral(_)
            | ExprKind::FloatLiteral(_)
            | ExprKind::BoolLiteral(_)
            | ExprKind::StringLiteral(_)
            | ExprKind::ComptimeSelector(_)
            | ExprKind::ComptimeCall(_)
            | ExprKind::Call(_)
            | ExprKind::Index(_)
            | ExprKind::Cast(_) => Ok(default),
        }
    }

    /// Concrete type of a compile-time dependent expression, or `VOID` when
    /// it cannot be resolved. Fails only when a compile-time method call
    /// names a method the receiver does not have.
    pub fn get_type(&self, node: &Expr) -> ResolveResult<TypeId> {
        let ty = match &node.kind {
            ExprKind::Identifier(ident) => match &ident.obj {
                Some(var) => self.var_type(var),
                None => TypeId::VOID,
            },
            ExprKind::ComptimeSelector(sel) => self.get_comptime_selector_type(sel, TypeId::VOID),
            ExprKind::Selector(sel) if self.info.is_comptime_selector_type(sel) => sel
                .expr
                .as_ident()
                .map_or(TypeId::VOID, |ident| self.get_type_from_comptime_var(ident)),
            ExprKind::ComptimeCall(call) => self.comptime_call_type(call)?,
            ExprKind::Index(idx) if self.is_comptime(&idx.object) => {
                let container = self.host.unwrap_generic(self.get_type(&idx.object)?);
                self.table.value_type(container)
            }
            ExprKind::Selector(_)
            | ExprKind::Index(_)
            | ExprKind::IntLiteral(_)
            | ExprKind::FloatLiteral(_)
            | ExprKind::BoolLiteral(_)
            | ExprKind::StringLiteral(_)
            | ExprKind::Call(_)
            | ExprKind::Grouping(_)
            | ExprKind::Binary(_)
            | ExprKind::Cast(_) => TypeId::VOID,
        };
        tracing::trace!(expr = %node, ?ty, "get_type");
        Ok(ty)
    }

    fn var_type(&self, var: &Var) -> TypeId {
        match var.kind {
            BindingKind::GenericParam => var.typ,
            BindingKind::GenericVar => var.last_smartcast().unwrap_or_else(|| {
                let key = TypeMapKey::GenericVar {
                    name: &var.name,
                    pos: var.pos.start,
                };
                self.type_map.get_key(key).unwrap_or(var.typ)
            }),
            BindingKind::Smartcast => {
                let ctyp = self
                    .info
                    .variant_var
                    .as_deref()
                    .and_then(|variant| self.type_map.get_key(TypeMapKey::Selector { var: variant }))
                    .unwrap_or(var.typ);
                if var.is_unwrapped {
                    ctyp.clear_flag(TypeFlag::Option)
                } else {
                    ctyp
                }
            }
            // No declared-type fallback: loop variables only exist in the map.
            BindingKind::KeyVar | BindingKind::ValueVar => self
                .type_map
                .get_key(TypeMapKey::Var(&var.name))
                .unwrap_or(TypeId::VOID),
            BindingKind::FieldVar => self.info.field_type,
            BindingKind::Other => TypeId::VOID,
        }
    }

    /// `base.field` on a generic struct: the field's declared type, even
    /// while the base is not fully instantiated.
    fn generic_field_type(&self, sel: &SelectorExpr) -> ResolveResult<Option<TypeId>> {
        if !sel.expr.as_ident().is_some_and(|ident| ident.is_comptime) {
            return Ok(None);
        }
        let base = self.host.unwrap_generic(self.get_type(&sel.expr)?);
        let Some(sym) = self.table.final_sym(base) else {
            return Ok(None);
        };
        if !sym.is_generic_struct() {
            return Ok(None);
        }
        Ok(self
            .table
            .find_field(sym, &sel.field_name)
            .map(|field| field.typ)
            .filter(|typ| !typ.is_void()))
    }

    fn comptime_call_type(&self, call: &ComptimeCallExpr) -> ResolveResult<TypeId> {
        let method_name = self
            .info
            .method
            .as_ref()
            .map(|m| m.name.as_str())
            .unwrap_or_default();
        let receiver = self.host.unwrap_generic(call.left_type);
        let method = self
            .table
            .sym(receiver)
            .and_then(|sym| self.table.find_method(sym, method_name));
        match method {
            Some(method) => Ok(method.return_type),
            None => {
                let receiver = display_type(receiver, self.table);
                tracing::debug!(method_name, %receiver, "comptime method not found");
                Err(ResolveError::MethodNotFound {
                    method: method_name.to_string(),
                    receiver,
                    file: self.file_name(),
                    span: call.method_span.into(),
                })
            }
        }
    }
}
