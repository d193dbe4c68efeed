//! 定义资源加载器的集成测试

use registry_abstractions::{DefinitionResourceLoader, LocationKind};
use registry_common::Element;
use registry_impl::{
    document_from_json_value, toml_value_to_json, FileSystemResourceLoader, InMemoryResourceLoader,
};
use serde_json::json;

#[test]
fn test_document_conversion_from_json() {
    let value = json!({
        "components": {
            "profile": "dev",
            "default-lazy-init": true,
            "children": [
                {
                    "element": "component",
                    "name": "userService",
                    "class": "demo::UserService",
                    "children": [
                        { "element": "qualifier", "type": "persistence", "value": "jpa" }
                    ]
                },
                { "element": "alias", "name": "userService", "alias": "users" }
            ]
        }
    });

    let document = document_from_json_value(&value, Some("app.json")).unwrap();
    assert_eq!(document.location.as_deref(), Some("app.json"));

    let root = &document.root;
    assert_eq!(root.tag, "components");
    assert_eq!(root.attribute("profile"), Some("dev"));
    // 标量属性统一转为字符串
    assert_eq!(root.attribute("default-lazy-init"), Some("true"));
    assert_eq!(root.children.len(), 2);

    let component = &root.children[0];
    assert_eq!(component.tag, "component");
    assert_eq!(component.attribute("class"), Some("demo::UserService"));
    let qualifier = component.child("qualifier").unwrap();
    assert_eq!(qualifier.attribute("type"), Some("persistence"));
}

#[test]
fn test_document_conversion_rejects_invalid_shapes() {
    // 根必须是单键对象
    assert!(document_from_json_value(&json!({"a": {}, "b": {}}), None).is_err());
    assert!(document_from_json_value(&json!([1, 2]), None).is_err());
    // 子元素必须声明 element 标签
    let missing_tag = json!({ "components": { "children": [ { "name": "x" } ] } });
    assert!(document_from_json_value(&missing_tag, None).is_err());
    // 属性值必须是标量
    let nested_attr = json!({ "components": { "meta": { "a": 1 } } });
    assert!(document_from_json_value(&nested_attr, None).is_err());
}

#[test]
fn test_toml_value_conversion() {
    let parsed: toml::Value = toml::from_str(
        r#"
        [components]
        profile = "dev"

        [[components.children]]
        element = "component"
        name = "alpha"
        class = "demo::Alpha"
        "#,
    )
    .unwrap();

    let document = document_from_json_value(&toml_value_to_json(&parsed), Some("app.toml")).unwrap();
    assert_eq!(document.root.tag, "components");
    assert_eq!(document.root.children[0].attribute("name"), Some("alpha"));
}

#[test]
fn test_in_memory_loader() {
    let loader = InMemoryResourceLoader::new().with_document(
        "conf/app.json",
        Element::new("components").with_child(
            Element::new("component")
                .with_attribute("name", "svc")
                .with_attribute("class", "demo::Svc"),
        ),
    );

    assert!(loader.resource_exists("conf/app.json"));
    assert!(!loader.resource_exists("conf/other.json"));

    let document = loader.load_document("conf/app.json").unwrap();
    assert_eq!(document.root.children.len(), 1);
    assert!(loader.load_document("conf/other.json").is_err());

    assert_eq!(
        loader.resolve_relative("conf/app.json", "other.json"),
        "conf/other.json"
    );
    assert_eq!(loader.classify("mem://shared.json"), LocationKind::Absolute);
    assert_eq!(loader.classify("/abs/shared.json"), LocationKind::Absolute);
    assert_eq!(loader.classify("other.json"), LocationKind::Relative);
    assert_eq!(loader.classify(""), LocationKind::Unresolvable);
}

#[test]
fn test_filesystem_loader_parses_all_formats() {
    let dir = tempfile::tempdir().unwrap();
    let loader = FileSystemResourceLoader::new(dir.path());

    std::fs::write(
        dir.path().join("app.json"),
        r#"{"components": {"children": [{"element": "component", "name": "a", "class": "demo::A"}]}}"#,
    )
    .unwrap();
    std::fs::write(
        dir.path().join("app.toml"),
        "[components]\n[[components.children]]\nelement = \"component\"\nname = \"b\"\nclass = \"demo::B\"\n",
    )
    .unwrap();
    std::fs::write(
        dir.path().join("app.yaml"),
        "components:\n  children:\n    - element: component\n      name: c\n      class: demo::C\n",
    )
    .unwrap();

    for (file, name) in [("app.json", "a"), ("app.toml", "b"), ("app.yaml", "c")] {
        let document = loader.load_document(file).unwrap();
        assert_eq!(document.root.children[0].attribute("name"), Some(name));
    }

    assert!(loader.resource_exists("app.json"));
    assert!(!loader.resource_exists("absent.json"));
}

#[test]
fn test_filesystem_loader_rejects_unknown_format() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("app.ini"), "[components]").unwrap();

    let loader = FileSystemResourceLoader::new(dir.path());
    assert!(loader.load_document("app.ini").is_err());
    assert!(loader.load_document("missing.json").is_err());
}

#[test]
fn test_filesystem_loader_expands_patterns() {
    let dir = tempfile::tempdir().unwrap();
    let loader = FileSystemResourceLoader::new(dir.path());

    let body =
        r#"{"components": {"children": [{"element": "component", "name": "x", "class": "demo::X"}]}}"#;
    std::fs::write(dir.path().join("one.json"), body).unwrap();
    std::fs::write(dir.path().join("two.json"), body).unwrap();
    std::fs::write(dir.path().join("three.toml"), "[components]\n").unwrap();

    let expanded = loader.expand_pattern("*.json").unwrap();
    assert_eq!(expanded.len(), 2);
    // 展开结果排序, 重复运行保持一致
    assert!(expanded[0].ends_with("one.json"));
    assert!(expanded[1].ends_with("two.json"));

    // 无模式的位置原样返回
    assert_eq!(
        loader.expand_pattern("plain.json").unwrap(),
        vec!["plain.json".to_string()]
    );
}
