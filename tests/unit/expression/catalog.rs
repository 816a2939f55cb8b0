use super::*;
use crate::expression::datum;

#[test]
fn constants_render_verbatim() {
    assert_eq!(CONSTANTS.len(), 9);
    assert_eq!(constant("PI").unwrap().to_string(), "PI");
    assert_eq!(constant("SQRT1_2").unwrap().to_string(), "SQRT1_2");
    assert!(constant("TAU").is_none());
    assert_eq!((constant("PI").unwrap() * 2).to_string(), "(PI * 2)");
}

#[test]
fn catalog_is_large_and_unique() {
    assert!(functions().len() >= 130);
    let mut names: Vec<_> = functions().iter().map(|f| f.name).collect();
    names.sort_unstable();
    let before = names.len();
    names.dedup();
    assert_eq!(names.len(), before);
    for f in functions() {
        assert!(!f.doc.is_empty(), "{}", f.name);
        assert!(f.max_args.is_none_or(|m| m >= f.min_args), "{}", f.name);
    }
}

#[test]
fn lookup_and_call() {
    let f = function("if").unwrap();
    assert_eq!(f.category, Category::Control);
    let e = f.call([datum("a").gt(1), Expr::from("big"), Expr::from("small")]);
    assert_eq!(e.to_string(), "if((datum.a > 1),'big','small')");
    assert!(function("nope").is_none());
}

#[test]
fn try_call_checks_arity() {
    let clamp = function("clamp").unwrap();
    assert!(clamp.try_call([datum("v"), 0.into(), 1.into()]).is_ok());
    let err = clamp.try_call([datum("v")]).unwrap_err();
    assert!(err.to_string().contains("clamp() takes 3 arguments, got 1"));

    let max = function("max").unwrap();
    assert!(max.accepts(7));
    assert!(!max.accepts(0));
    let join = function("join").unwrap();
    let err = join
        .try_call([datum("a"), "-".into(), "x".into()])
        .unwrap_err();
    assert!(err.to_string().contains("1..=2"));
}

#[test]
fn optional_arguments_through_the_catalog() {
    let f = function("timeFormat").unwrap();
    let e = f.call_optional([Some(datum("t")), Some(Expr::from("%Y")), None]);
    assert_eq!(e.to_string(), "timeFormat(datum.t,'%Y')");
}
