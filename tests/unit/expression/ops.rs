use crate::expression::{Expr, datum};

#[test]
fn arithmetic_builds_nodes() {
    assert_eq!((datum("x") + datum("y")).to_string(), "(datum.x + datum.y)");
    assert_eq!((datum("x") - 1).to_string(), "(datum.x - 1)");
    assert_eq!((datum("x") * 2.5).to_string(), "(datum.x * 2.5)");
    assert_eq!((datum("x") / datum("y")).to_string(), "(datum.x / datum.y)");
    assert_eq!((datum("x") % 3).to_string(), "(datum.x % 3)");
}

#[test]
fn nesting_keeps_parentheses() {
    assert_eq!(((datum("x") + 1) * 2).to_string(), "((datum.x + 1) * 2)");
    assert_eq!(
        (datum("a") + datum("b") * datum("c")).to_string(),
        "(datum.a + (datum.b * datum.c))"
    );
}

#[test]
fn scalars_on_the_left() {
    let e: Expr = 1 + datum("x");
    assert_eq!(e.to_string(), "(1 + datum.x)");
    assert_eq!((2.0 * datum("x")).to_string(), "(2.0 * datum.x)");
    assert_eq!((10i64 - &datum("x")).to_string(), "(10 - datum.x)");
}

#[test]
fn references_do_not_consume() {
    let x = datum("x");
    let sum = &x + &x;
    assert_eq!(sum.to_string(), "(datum.x + datum.x)");
    assert_eq!((-&x).to_string(), "(-datum.x)");
    assert_eq!(x.to_string(), "datum.x");
}

#[test]
fn comparisons() {
    assert_eq!(datum("x").gt(5).to_string(), "(datum.x > 5)");
    assert_eq!(datum("x").ge(5).to_string(), "(datum.x >= 5)");
    assert_eq!(datum("x").lt(5).to_string(), "(datum.x < 5)");
    assert_eq!(datum("x").le(5).to_string(), "(datum.x <= 5)");
    assert_eq!(datum("year").equals(2000).to_string(), "(datum.year == 2000)");
    assert_eq!(datum("s").not_equals("a").to_string(), "(datum.s != 'a')");
}

#[test]
fn logic() {
    let e = datum("a").gt(1) & datum("b").lt(2);
    assert_eq!(e.to_string(), "((datum.a > 1) && (datum.b < 2))");
    let e = datum("a") | true;
    assert_eq!(e.to_string(), "(datum.a || true)");
    assert_eq!((!datum("flag")).to_string(), "(!datum.flag)");
    assert_eq!(datum("a").and(datum("b")).or(false).to_string(), "((datum.a && datum.b) || false)");
}

#[test]
fn unary_and_function_sugar() {
    assert_eq!((-datum("x")).to_string(), "(-datum.x)");
    assert_eq!(datum("x").pos().to_string(), "(+datum.x)");
    assert_eq!(datum("x").pow(2).to_string(), "pow(datum.x,2)");
    assert_eq!(datum("x").abs().to_string(), "abs(datum.x)");
}

#[test]
fn structural_equality_is_not_node_building() {
    assert_eq!(datum("x") + 1, datum("x") + 1);
    assert_ne!(datum("x") + 1, datum("x") + 2);
    let _: Expr = datum("x").equals(1);
}
