use crate::preview::transform;
use crate::Error;

#[test]
fn happy_path_yields_an_invocable_component() {
    let result = transform("function Foo(){ return null; }").unwrap();
    let component = result.expect("component extracted");
    assert_eq!(component.name, "Foo");
    assert_eq!(component.invoke(), "null");
}

#[test]
fn empty_input_is_nothing_to_preview_not_a_failure() {
    assert!(transform("").unwrap().is_none());
    assert!(transform("   \n\t").unwrap().is_none());
}

#[test]
fn text_without_a_function_declaration_is_not_a_component() {
    let err = transform("const Foo = () => null;");
    assert!(matches!(err, Err(Error::Preview(_))));
}

#[test]
fn the_first_function_match_wins() {
    // Documented limitation: an earlier helper shadows the real component.
    let source = "function helper(x) { return x * 2; }\nfunction Card() { return helper(1); }";
    let component = transform(source).unwrap().unwrap();
    assert_eq!(component.name, "helper");
}

#[test]
fn unbalanced_braces_surface_as_a_syntax_error() {
    let err = transform("function Foo() { return null;");
    match err {
        Err(Error::Preview(message)) => assert!(message.contains("unbalanced braces")),
        other => panic!("expected a preview error, got {other:?}"),
    }
}

#[test]
fn a_body_that_never_returns_is_not_a_valid_component() {
    let err = transform("function Foo() { const x = 1; }");
    match err {
        Err(Error::Preview(message)) => assert!(message.contains("never returns")),
        other => panic!("expected a preview error, got {other:?}"),
    }
}

#[test]
fn returned_markup_is_the_renderable_expression() {
    let source = "function Banner(props) {\n  const label = props.label;\n  return <div style={{color: 'red'}}>{label}</div>;\n}";
    let component = transform(source).unwrap().unwrap();
    assert_eq!(component.name, "Banner");
    assert!(component.invoke().starts_with("<div"));
}

#[test]
fn return_inside_an_identifier_does_not_count() {
    let err = transform("function Foo() { const returned = 1; }");
    assert!(matches!(err, Err(Error::Preview(_))));
}
