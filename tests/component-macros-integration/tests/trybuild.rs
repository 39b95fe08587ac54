//! trybuild compile-time tests for component_macros

#[test]
fn trybuild_component_macros() {
    let t = trybuild::TestCases::new();
    t.pass("tests/trybuild/component_ok.rs");
    t.pass("tests/trybuild/ok_component.rs");
}
