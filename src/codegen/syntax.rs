use crate::codegen::naming::Naming;
use crate::symbolic::{coordinate_label, Func, Syntax};

/// A [`Syntax`] that can also bind a rendered expression to a name.
pub trait TargetSyntax: Syntax {
    fn binding(&self, name: &str, expression: &str) -> String;
}

/// OCaml float arithmetic: `+.`, `*.`, `**` and float literals only.
#[derive(Debug, Clone)]
pub struct OCamlSyntax {
    naming: Naming,
}

impl OCamlSyntax {
    pub fn new(naming: Naming) -> Self {
        Self { naming }
    }
}

impl Syntax for OCamlSyntax {
    fn add(&self) -> &str {
        " +. "
    }

    fn sub(&self) -> &str {
        " -. "
    }

    fn mul(&self) -> &str {
        " *. "
    }

    fn div(&self) -> &str {
        " /. "
    }

    fn neg(&self) -> &str {
        "-. "
    }

    // `-. x ** 2.0` parses as `(-. x) ** 2.0`
    fn neg_binds_tightly(&self) -> bool {
        true
    }

    fn number(&self, value: i64) -> String {
        format!("{}.0", value)
    }

    fn symbol(&self, name: &str) -> String {
        self.naming.apply(name)
    }

    fn coordinate(&self, name: &str, order: u8) -> String {
        coordinate_label(name, order)
    }

    fn power(&self, base: &str, exponent: u32) -> String {
        format!("{} ** {}", base, self.number(exponent as i64))
    }

    fn call(&self, func: Func, argument: &str, _atomic: bool) -> String {
        format!("{}({})", func.name(), argument)
    }
}

impl TargetSyntax for OCamlSyntax {
    fn binding(&self, name: &str, expression: &str) -> String {
        format!("let {} = {} in", name, expression)
    }
}

/// Rust `f64` arithmetic with method-call powers and trig.
#[derive(Debug, Clone)]
pub struct RustSyntax {
    naming: Naming,
}

impl RustSyntax {
    pub fn new(naming: Naming) -> Self {
        Self { naming }
    }
}

impl Syntax for RustSyntax {
    fn add(&self) -> &str {
        " + "
    }

    fn sub(&self) -> &str {
        " - "
    }

    fn mul(&self) -> &str {
        " * "
    }

    fn div(&self) -> &str {
        " / "
    }

    fn neg(&self) -> &str {
        "-"
    }

    fn number(&self, value: i64) -> String {
        format!("{}.0", value)
    }

    fn symbol(&self, name: &str) -> String {
        self.naming.apply(name)
    }

    fn coordinate(&self, name: &str, order: u8) -> String {
        coordinate_label(name, order)
    }

    fn power(&self, base: &str, exponent: u32) -> String {
        format!("{}.powi({})", base, exponent)
    }

    fn call(&self, func: Func, argument: &str, atomic: bool) -> String {
        if atomic {
            format!("{}.{}()", argument, func.name())
        } else {
            format!("({}).{}()", argument, func.name())
        }
    }
}

impl TargetSyntax for RustSyntax {
    fn binding(&self, name: &str, expression: &str) -> String {
        format!("let {} = {};", name, expression)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::{render, Angle, Expr};

    fn sample() -> Expr {
        // l1**2*m1/4 - m2*l2*cos(q2)**2
        Expr::rational(1, 4) * Expr::param("l1").pow(2) * Expr::param("m1")
            - Expr::param("m2") * Expr::param("l2") * Expr::cos(&Angle::coordinate("q2")).pow(2)
    }

    #[test]
    fn test_ocaml_rendering() {
        let naming = Naming::new().rename("m1", "m1'").rename("l1", "l1'");
        let syntax = OCamlSyntax::new(naming);
        assert_eq!(
            render(&sample().to_node(), &syntax),
            "l1' ** 2.0 *. m1' /. 4.0 -. l2 *. m2 *. cos(q2) ** 2.0"
        );
    }

    #[test]
    fn test_ocaml_parenthesizes_negated_power() {
        let syntax = OCamlSyntax::new(Naming::new());
        let e = -Expr::param("a").pow(2);
        assert_eq!(render(&e.to_node(), &syntax), "-. (a ** 2.0)");
    }

    #[test]
    fn test_rust_rendering() {
        let syntax = RustSyntax::new(Naming::new());
        assert_eq!(
            render(&sample().to_node(), &syntax),
            "l1.powi(2) * m1 / 4.0 - l2 * m2 * q2.cos().powi(2)"
        );
        assert_eq!(syntax.binding("m11", "1.0"), "let m11 = 1.0;");
    }
}
