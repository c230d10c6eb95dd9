//! derive(Bean) 编译期测试

#[test]
fn trybuild_bean_derive() {
    let t = trybuild::TestCases::new();
    t.pass("tests/trybuild/bean_ok.rs");
    t.pass("tests/trybuild/bean_typed_collections.rs");
}
