//! Compile-time loop context: which element each kind of compile-time loop
//! is currently iterating.
//!
//! Fields belong to independent loop categories. Only those of the innermost
//! active loop are meaningful; values left over from an outer loop of a
//! different kind are harmless but must not be relied upon.

use comptime_frontend::{ExprKind, SelectorExpr};
use comptime_identity::TypeId;

use crate::table::{FieldDef, MethodDef};

/// Boolean properties of the current field that `field.is_*` selectors read.
pub const FIELD_SELECTOR_BOOLS: [&str; 11] = [
    "is_mut",
    "is_pub",
    "is_shared",
    "is_atomic",
    "is_option",
    "is_array",
    "is_map",
    "is_chan",
    "is_struct",
    "is_alias",
    "is_enum",
];

/// One nested-scope state record. Every field is empty by default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComptimeContext {
    /// Distinguishes loop instances for generated names
    pub loop_id: u32,
    pub inside_comptime_for: bool,

    pub variant_var: Option<String>,

    pub field_var: Option<String>,
    /// Declared type of the field being iterated
    pub field_type: TypeId,
    pub field_value: Option<FieldDef>,

    pub enum_var: Option<String>,
    pub attr_var: Option<String>,

    pub method_var: Option<String>,
    pub method: Option<MethodDef>,
    pub method_ret_type: TypeId,

    pub method_param_var: Option<String>,
}

fn names(slot: &Option<String>, name: &str) -> bool {
    slot.as_deref() == Some(name)
}

fn selector_base_name(sel: &SelectorExpr) -> Option<&str> {
    match &sel.expr.kind {
        ExprKind::Identifier(ident) => Some(ident.name.as_str()),
        _ => None,
    }
}

impl ComptimeContext {
    /// `<loop-var>.typ` where the loop variable is the current variant,
    /// field, enum value or method.
    pub fn is_comptime_selector_type(&self, sel: &SelectorExpr) -> bool {
        if !self.inside_comptime_for || sel.field_name != "typ" {
            return false;
        }
        let Some(base) = selector_base_name(sel) else {
            return false;
        };
        names(&self.enum_var, base)
            || names(&self.variant_var, base)
            || names(&self.field_var, base)
            || names(&self.method_var, base)
    }

    /// The selector's base is the current field variable (`field.name`).
    pub fn is_field_selector(&self, sel: &SelectorExpr) -> bool {
        selector_base_name(sel).is_some_and(|base| names(&self.field_var, base))
    }

    /// `field.is_mut`, `field.is_option`, ... on the current field variable.
    pub fn is_field_selector_bool(&self, sel: &SelectorExpr) -> bool {
        self.is_field_selector(sel) && FIELD_SELECTOR_BOOLS.contains(&sel.field_name.as_str())
    }

    /// Name made unique to this loop instance.
    pub fn unique_name(&self, base: &str) -> String {
        format!("{base}_{}", self.loop_id)
    }
}

/// The compile-time loop being entered, with its category-specific bindings.
#[derive(Debug, Clone, PartialEq)]
pub enum ComptimeLoop {
    /// `$for v in T.variants`; the variant type is recorded in the type map
    /// under `<var>.typ`
    Variant { var: String },
    Field { var: String, field: FieldDef },
    EnumValue { var: String },
    Attribute { var: String },
    Method { var: String, method: MethodDef },
    /// The parameter type is recorded in the type map under `<var>.typ`
    MethodParam { var: String },
}

impl ComptimeLoop {
    pub fn var(&self) -> &str {
        match self {
            ComptimeLoop::Variant { var }
            | ComptimeLoop::Field { var, .. }
            | ComptimeLoop::EnumValue { var }
            | ComptimeLoop::Attribute { var }
            | ComptimeLoop::Method { var, .. }
            | ComptimeLoop::MethodParam { var } => var,
        }
    }

    pub fn category(&self) -> &'static str {
        match self {
            ComptimeLoop::Variant { .. } => "variant",
            ComptimeLoop::Field { .. } => "field",
            ComptimeLoop::EnumValue { .. } => "enum value",
            ComptimeLoop::Attribute { .. } => "attribute",
            ComptimeLoop::Method { .. } => "method",
            ComptimeLoop::MethodParam { .. } => "method parameter",
        }
    }

    /// Write this loop's bindings into `ctx`. Fields of other categories are
    /// left as they were.
    pub fn apply(self, ctx: &mut ComptimeContext, loop_id: u32) {
        ctx.loop_id = loop_id;
        ctx.inside_comptime_for = true;
        match self {
            ComptimeLoop::Variant { var } => ctx.variant_var = Some(var),
            ComptimeLoop::Field { var, field } => {
                ctx.field_var = Some(var);
                ctx.field_type = field.typ;
                ctx.field_value = Some(field);
            }
            ComptimeLoop::EnumValue { var } => ctx.enum_var = Some(var),
            ComptimeLoop::Attribute { var } => ctx.attr_var = Some(var),
            ComptimeLoop::Method { var, method } => {
                ctx.method_var = Some(var);
                ctx.method_ret_type = method.return_type;
                ctx.method = Some(method);
            }
            ComptimeLoop::MethodParam { var } => ctx.method_param_var = Some(var),
        }
    }
}
