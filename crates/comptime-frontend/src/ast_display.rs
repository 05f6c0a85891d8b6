// crates/comptime-frontend/src/ast_display.rs
//! Source-like rendering of expressions for diagnostics.

use std::fmt;

use crate::ast::{Expr, ExprKind};

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::IntLiteral(v) => write!(f, "{v}"),
            ExprKind::FloatLiteral(v) => write!(f, "{v}"),
            ExprKind::BoolLiteral(v) => write!(f, "{v}"),
            ExprKind::StringLiteral(s) => write!(f, "{s:?}"),
            ExprKind::Identifier(ident) => f.write_str(&ident.name),
            ExprKind::Selector(sel) => write!(f, "{}.{}", sel.expr, sel.field_name),
            ExprKind::ComptimeSelector(sel) => write!(f, "{}.$({})", sel.left, sel.field_expr),
            ExprKind::ComptimeCall(call) => {
                write!(f, "{}.$method(", call.left)?;
                write_args(f, &call.args)?;
                f.write_str(")")
            }
            ExprKind::Call(call) => {
                f.write_str(&call.name)?;
                if !call.concrete_types.is_empty() {
                    // Type names need the table; show arity only.
                    write!(f, "[{} types]", call.concrete_types.len())?;
                }
                f.write_str("(")?;
                write_args(f, &call.args)?;
                f.write_str(")")
            }
            ExprKind::Index(idx) => write!(f, "{}[{}]", idx.object, idx.index),
            ExprKind::Grouping(inner) => write!(f, "({inner})"),
            ExprKind::Binary(bin) => write!(f, "{} {} {}", bin.left, bin.op.as_str(), bin.right),
            ExprKind::Cast(cast) => write!(f, "cast({})", cast.expr),
        }
    }
}

fn write_args(f: &mut fmt::Formatter<'_>, args: &[Expr]) -> fmt::Result {
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{arg}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::ast::{BinaryOp, Expr};
    use crate::binding::{BindingKind, Var};
    use comptime_identity::{Span, TypeId};

    fn sp() -> Span {
        Span::default()
    }

    #[test]
    fn display_selector_and_index() {
        let items = Expr::name("items", sp());
        let e = Expr::selector(Expr::index(items, Expr::int(0, sp())), "len", sp());
        assert_eq!(e.to_string(), "items[0].len");
    }

    #[test]
    fn display_comptime_selector() {
        let field = Expr::var(Var::new("f", TypeId::VOID, BindingKind::FieldVar), sp());
        let e = Expr::comptime_selector(
            Expr::name("val", sp()),
            TypeId::VOID,
            Expr::selector(field, "name", sp()),
        );
        assert_eq!(e.to_string(), "val.$(f.name)");
    }

    #[test]
    fn display_grouped_binary() {
        let e = Expr::grouping(Expr::binary(
            Expr::name("a", sp()),
            BinaryOp::Mul,
            Expr::int(2, sp()),
        ));
        assert_eq!(e.to_string(), "(a * 2)");
    }

    #[test]
    fn display_string_literal_is_quoted() {
        assert_eq!(Expr::string("hi", sp()).to_string(), "\"hi\"");
    }
}
