use crate::expression::{Expr, Literal, datum};

#[test]
fn literals_use_expression_tokens() {
    assert_eq!(Expr::from(true).to_string(), "true");
    assert_eq!(Expr::from(false).to_string(), "false");
    assert_eq!(Expr::Lit(Literal::Null).to_string(), "null");
    assert_eq!(Expr::from(5).to_string(), "5");
    assert_eq!(Expr::from(-5i64).to_string(), "-5");
    assert_eq!(Expr::from(2.0).to_string(), "2.0");
    assert_eq!(Expr::from(0.25).to_string(), "0.25");
    assert_eq!(Expr::from(f64::NAN).to_string(), "NaN");
    assert_eq!(Expr::from(f64::NEG_INFINITY).to_string(), "-Infinity");
}

#[test]
fn strings_are_quoted() {
    assert_eq!(Expr::from("abc").to_string(), "'abc'");
    assert_eq!(Expr::from("it's").to_string(), "\"it's\"");
    assert_eq!(Expr::from("a'b\"c").to_string(), "'a\\'b\"c'");
    assert_eq!(Expr::from("line\nbreak").to_string(), "'line\\nbreak'");
    assert_eq!(Expr::from("back\\slash").to_string(), "'back\\\\slash'");
}

#[test]
fn access_nodes() {
    assert_eq!(datum("x").to_string(), "datum.x");
    assert_eq!(datum("my field").to_string(), "datum['my field']");
    assert_eq!(
        Expr::var("event").attr("target").item("k").to_string(),
        "event.target['k']"
    );
    assert_eq!(Expr::param("brush").attr("x").to_string(), "brush.x");
}

#[test]
fn calls_have_no_whitespace() {
    let e = Expr::call("if", [datum("a"), Expr::from(1), Expr::from("b")]);
    assert_eq!(e.to_string(), "if(datum.a,1,'b')");
    assert_eq!(Expr::call("now", Vec::<Expr>::new()).to_string(), "now()");
}

#[test]
fn omitted_arguments() {
    let trailing = Expr::call_optional("inrange", [Some(datum("v")), Some(Expr::from(1)), None]);
    assert_eq!(trailing.to_string(), "inrange(datum.v,1)");

    let internal = Expr::call_optional("pad", [Some(datum("s")), None, Some(Expr::from("0"))]);
    assert_eq!(internal.to_string(), "pad(datum.s,null,'0')");
}

#[test]
fn render_is_a_pure_function_of_structure() {
    let a = (datum("x") + 1).gt(datum("y"));
    let b = a.clone();
    assert_eq!(a.render(), b.render());
    assert_eq!(a.render(), "((datum.x + 1) > datum.y)");
}

#[test]
fn serializes_as_rendered_string() {
    let e = datum("x").equals(2000);
    assert_eq!(
        serde_json::to_value(&e).unwrap(),
        serde_json::json!("(datum.x == 2000)")
    );
}
