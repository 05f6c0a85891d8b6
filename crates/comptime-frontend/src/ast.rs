// crates/comptime-frontend/src/ast.rs
//
// Expression shapes that reach compile-time type resolution. The checker
// annotates nodes (bindings, receiver types) before handing them over.

use comptime_identity::{Span, TypeId, TypeIdVec};

use crate::binding::{BindingKind, Var};

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    // Literals
    IntLiteral(i64),
    FloatLiteral(f64),
    BoolLiteral(bool),
    StringLiteral(String),

    // Variables
    Identifier(Ident),

    /// Member selector: `value.field`
    Selector(Box<SelectorExpr>),

    /// Dynamic field selector: `value.$(field.name)`
    ComptimeSelector(Box<ComptimeSelectorExpr>),

    /// Call of the method bound by the current method loop: `value.$method()`
    ComptimeCall(Box<ComptimeCallExpr>),

    /// Ordinary call: `make[int](n)`
    Call(Box<CallExpr>),

    /// Index expression: `items[0]`
    Index(Box<IndexExpr>),

    /// Parenthesized expression
    Grouping(Box<Expr>),

    /// Infix operation
    Binary(Box<BinaryExpr>),

    /// Cast: `T(value)`
    Cast(Box<CastExpr>),
}

/// Identifier reference, with the binding the checker resolved it to.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ident {
    pub name: String,
    /// `None` for identifiers that do not name a variable (types, functions, consts)
    pub obj: Option<Var>,
    /// The checker flagged this use as compile-time dependent
    pub is_comptime: bool,
}

impl Ident {
    /// The bound variable's kind, or `Other` when unbound.
    pub fn binding_kind(&self) -> BindingKind {
        self.obj.as_ref().map_or(BindingKind::Other, |var| var.kind)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectorExpr {
    pub expr: Expr,
    pub field_name: String,
    pub field_span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComptimeSelectorExpr {
    pub left: Expr,
    /// Static type of `left`, before generic substitution
    pub left_type: TypeId,
    /// Expression naming the field, usually `<field-var>.name`
    pub field_expr: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComptimeCallExpr {
    pub left: Expr,
    /// Static type of the receiver, before generic substitution
    pub left_type: TypeId,
    pub args: Vec<Expr>,
    pub method_span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub name: String,
    pub args: Vec<Expr>,
    /// Explicit generic arguments (`make[int]`)
    pub concrete_types: TypeIdVec,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexExpr {
    pub object: Expr,
    pub index: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub left: Expr,
    pub op: BinaryOp,
    pub right: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CastExpr {
    pub expr: Expr,
    pub typ: TypeId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    And,
    Or,
}

impl BinaryOp {
    /// `+ - * / %`: operands share the result type.
    pub fn is_arithmetic(self) -> bool {
        matches!(
            self,
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::Le => "<=",
            BinaryOp::Ge => ">=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }
}

// ============================================================================
// Construction helpers
// ============================================================================

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Identifier that does not name a variable.
    pub fn name(name: impl Into<String>, span: Span) -> Self {
        Self::new(
            ExprKind::Identifier(Ident {
                name: name.into(),
                obj: None,
                is_comptime: false,
            }),
            span,
        )
    }

    /// Identifier bound to `var`. Comptime-flagged when the binding kind is.
    pub fn var(var: Var, span: Span) -> Self {
        let is_comptime = var.kind.is_comptime();
        Self::new(
            ExprKind::Identifier(Ident {
                name: var.name.clone(),
                obj: Some(var),
                is_comptime,
            }),
            span,
        )
    }

    pub fn int(value: i64, span: Span) -> Self {
        Self::new(ExprKind::IntLiteral(value), span)
    }

    pub fn string(value: impl Into<String>, span: Span) -> Self {
        Self::new(ExprKind::StringLiteral(value.into()), span)
    }

    pub fn selector(expr: Expr, field_name: impl Into<String>, field_span: Span) -> Self {
        let span = expr.span.to(field_span);
        Self::new(
            ExprKind::Selector(Box::new(SelectorExpr {
                expr,
                field_name: field_name.into(),
                field_span,
            })),
            span,
        )
    }

    pub fn comptime_selector(left: Expr, left_type: TypeId, field_expr: Expr) -> Self {
        let span = left.span.to(field_expr.span);
        Self::new(
            ExprKind::ComptimeSelector(Box::new(ComptimeSelectorExpr {
                left,
                left_type,
                field_expr,
            })),
            span,
        )
    }

    pub fn comptime_call(left: Expr, left_type: TypeId, method_span: Span) -> Self {
        let span = left.span.to(method_span);
        Self::new(
            ExprKind::ComptimeCall(Box::new(ComptimeCallExpr {
                left,
                left_type,
                args: Vec::new(),
                method_span,
            })),
            span,
        )
    }

    pub fn index(object: Expr, index: Expr) -> Self {
        let span = object.span.to(index.span);
        Self::new(ExprKind::Index(Box::new(IndexExpr { object, index })), span)
    }

    pub fn grouping(inner: Expr) -> Self {
        let span = inner.span;
        Self::new(ExprKind::Grouping(Box::new(inner)), span)
    }

    pub fn binary(left: Expr, op: BinaryOp, right: Expr) -> Self {
        let span = left.span.to(right.span);
        Self::new(ExprKind::Binary(Box::new(BinaryExpr { left, op, right })), span)
    }

    pub fn cast(expr: Expr, typ: TypeId) -> Self {
        let span = expr.span;
        Self::new(ExprKind::Cast(Box::new(CastExpr { expr, typ })), span)
    }

    pub fn call(
        name: impl Into<String>,
        args: Vec<Expr>,
        concrete_types: TypeIdVec,
        span: Span,
    ) -> Self {
        Self::new(
            ExprKind::Call(Box::new(CallExpr {
                name: name.into(),
                args,
                concrete_types,
            })),
            span,
        )
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn as_ident(&self) -> Option<&Ident> {
        match &self.kind {
            ExprKind::Identifier(ident) => Some(ident),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic_ops() {
        for op in [
            BinaryOp::Add,
            BinaryOp::Sub,
            BinaryOp::Mul,
            BinaryOp::Div,
            BinaryOp::Mod,
        ] {
            assert!(op.is_arithmetic(), "{op:?}");
        }
        for op in [BinaryOp::Eq, BinaryOp::Lt, BinaryOp::And, BinaryOp::Or] {
            assert!(!op.is_arithmetic(), "{op:?}");
        }
    }

    #[test]
    fn var_ident_is_flagged_by_kind() {
        let ct = Expr::var(
            Var::new("f", TypeId::VOID, BindingKind::FieldVar),
            Span::default(),
        );
        let plain = Expr::var(Var::new("n", TypeId::I32, BindingKind::Other), Span::default());
        assert!(ct.as_ident().is_some_and(|i| i.is_comptime));
        assert!(plain.as_ident().is_some_and(|i| !i.is_comptime));
    }

    #[test]
    fn unbound_ident_has_other_kind() {
        let e = Expr::name("Point", Span::default());
        assert_eq!(e.as_ident().map(Ident::binding_kind), Some(BindingKind::Other));
    }

    #[test]
    fn binary_span_covers_operands() {
        let e = Expr::binary(
            Expr::int(1, Span::new(0, 1, 1, 1)),
            BinaryOp::Add,
            Expr::int(2, Span::new(4, 5, 1, 5)),
        );
        assert_eq!(e.span.start, 0);
        assert_eq!(e.span.end, 5);
    }
}
