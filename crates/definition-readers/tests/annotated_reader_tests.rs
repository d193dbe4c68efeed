//! 注解类型读取器的集成测试

use definition_readers::{
    component_annotations, register_components, AnnotatedRegistration, Condition,
    DefinitionRegistry, ExplicitQualifier, Qualifier, RegistrySession, RegistrySessionBuilder,
    ScopedProxyMode, SCOPED_TARGET_PREFIX, SCOPED_PROXY_FACTORY_TYPE,
};
use registry_impl::{CollectingReaderEventSink, InMemoryResourceLoader, ProfileCondition};
use serde_json::json;
use std::sync::Arc;

fn build_session(profiles: &[&str]) -> (RegistrySession, Arc<CollectingReaderEventSink>) {
    let sink = Arc::new(CollectingReaderEventSink::new());
    let session = RegistrySessionBuilder::new()
        .with_resource_loader(Arc::new(InMemoryResourceLoader::new()))
        .with_event_sink(sink.clone())
        .with_active_profiles(profiles.iter().copied())
        .build()
        .unwrap();
    (session, sink)
}

#[derive(Debug)]
struct UserService;

component_annotations!(UserService {
    component_name: Some("userService".to_string()),
    description: Some("用户服务".to_string()),
    primary: true,
});

#[derive(Debug)]
struct OrderService;

component_annotations!(OrderService {});

#[derive(Debug)]
struct SessionCart;

component_annotations!(SessionCart {
    component_name: Some("sessionCart".to_string()),
    scope: Some("session".to_string()),
    proxy_mode: ScopedProxyMode::TargetClass,
});

#[derive(Debug)]
struct ProdOnlyService;

component_annotations!(ProdOnlyService {
    component_name: Some("prodOnly".to_string()),
    conditions: vec![Arc::new(ProfileCondition::new(["prod"]))],
});

#[test]
fn test_register_with_declared_metadata() {
    let (session, sink) = build_session(&[]);
    session.annotated_reader().register::<UserService>().unwrap();

    let registry = session.registry();
    let definition = registry.resolve("userService").unwrap();
    assert!(definition.primary);
    assert_eq!(definition.description.as_deref(), Some("用户服务"));
    assert_eq!(definition.scope, "singleton");
    assert!(definition.class_ref.as_ref().unwrap().id.is_some());

    assert_eq!(sink.registered_components(), vec!["userService".to_string()]);
}

#[test]
fn test_generated_name_from_type() {
    let (session, _) = build_session(&[]);
    session.annotated_reader().register::<OrderService>().unwrap();

    // 未声明名称时使用类型短名称的首字母小写形式
    assert!(session.registry().is_registered("orderService"));
}

#[test]
fn test_repeat_registration_is_idempotent() {
    let (session, _) = build_session(&[]);
    let reader = session.annotated_reader();
    reader.register::<OrderService>().unwrap();
    reader.register::<OrderService>().unwrap();

    assert_eq!(session.registry().definition_count(), 1);
}

#[test]
fn test_explicit_qualifiers() {
    let (session, _) = build_session(&[]);
    let registration = AnnotatedRegistration::new()
        .with_qualifier(ExplicitQualifier::Primary)
        .with_qualifier(ExplicitQualifier::Lazy)
        .with_qualifier(ExplicitQualifier::Named(
            Qualifier::new("persistence").with_value("jpa"),
        ))
        .with_qualifier(ExplicitQualifier::Named(Qualifier::new("persistence")));

    session
        .annotated_reader()
        .register_component::<OrderService>(registration)
        .unwrap();

    let definition = session.registry().resolve("orderService").unwrap();
    assert!(definition.primary);
    assert!(definition.is_lazy_init());
    // 同种类的限定符只追加一次, 先到者保留
    assert_eq!(definition.qualifiers.len(), 1);
    assert_eq!(definition.qualifiers[0].value.as_deref(), Some("jpa"));
}

#[test]
fn test_customizers_apply_in_order() {
    let (session, _) = build_session(&[]);
    let registration = AnnotatedRegistration::new()
        .with_customizer(|definition| {
            definition.set_attribute("stage", "first");
        })
        .with_customizer(|definition| {
            // 后执行的定制器观察到前者的效果
            let previous = definition.attribute("stage").unwrap_or("none").to_string();
            definition.set_attribute("stage", format!("{previous}-second"));
        });

    session
        .annotated_reader()
        .register_component::<OrderService>(registration)
        .unwrap();

    let definition = session.registry().resolve("orderService").unwrap();
    assert_eq!(definition.attribute("stage"), Some("first-second"));
}

#[test]
fn test_explicit_name_overrides_metadata() {
    let (session, _) = build_session(&[]);
    session
        .annotated_reader()
        .register_component::<UserService>(AnnotatedRegistration::new().with_name("primaryUsers"))
        .unwrap();

    assert!(session.registry().is_registered("primaryUsers"));
    assert!(!session.registry().is_registered("userService"));
}

#[test]
fn test_condition_skip_is_silent() {
    let (session, sink) = build_session(&["dev"]);
    session
        .annotated_reader()
        .register::<ProdOnlyService>()
        .unwrap();

    // 条件跳过静默完成: 不注册、不上报错误
    assert!(!session.registry().is_registered("prodOnly"));
    assert!(sink.errors().is_empty());
    assert!(sink.registered_components().is_empty());
}

#[test]
fn test_condition_accepted_registers() {
    let (session, _) = build_session(&["prod"]);
    session
        .annotated_reader()
        .register::<ProdOnlyService>()
        .unwrap();
    assert!(session.registry().is_registered("prodOnly"));
}

/// 只在解析阶段参与评估的条件
#[derive(Debug)]
struct NeverAtParse;

impl Condition for NeverAtParse {
    fn matches(
        &self,
        _context: &definition_readers::ConditionContext<'_>,
    ) -> bool {
        false
    }

    fn required_phase(&self) -> Option<definition_readers::ConfigurationPhase> {
        Some(definition_readers::ConfigurationPhase::ParseConfiguration)
    }
}

#[derive(Debug)]
struct DeferredService;

component_annotations!(DeferredService {
    component_name: Some("deferred".to_string()),
    conditions: vec![Arc::new(NeverAtParse)],
});

#[test]
fn test_parse_phase_condition_not_consulted_at_registration() {
    let (session, _) = build_session(&[]);
    session
        .annotated_reader()
        .register::<DeferredService>()
        .unwrap();
    // 解析阶段条件不影响注册阶段
    assert!(session.registry().is_registered("deferred"));
}

#[test]
fn test_scoped_proxy_is_transparent_to_registry() {
    let (session, _) = build_session(&[]);
    session.annotated_reader().register::<SessionCart>().unwrap();

    let registry = session.registry();
    // 请求的名称之下只有一个顶层注册项
    assert_eq!(registry.definition_count(), 1);
    let proxy = registry.resolve("sessionCart").unwrap();
    assert_eq!(proxy.type_name(), Some(SCOPED_PROXY_FACTORY_TYPE));
    assert_eq!(proxy.attribute("proxyTargetClass"), Some("true"));

    // 原始定义只能经由代理的嵌套引用到达
    let target = proxy.decorated_target.as_ref().unwrap();
    assert_eq!(target.name, format!("{SCOPED_TARGET_PREFIX}sessionCart"));
    assert_eq!(target.definition.scope, "session");
    assert!(!registry.is_registered(&target.name));
}

#[test]
fn test_instance_supplier_attached() {
    let (session, _) = build_session(&[]);
    let registration = AnnotatedRegistration::new().with_instance_supplier(Arc::new(
        || -> Box<dyn std::any::Any + Send + Sync> { Box::new(OrderService) },
    ));

    session
        .annotated_reader()
        .register_component::<OrderService>(registration)
        .unwrap();

    let definition = session.registry().resolve("orderService").unwrap();
    assert!(definition.instance_supplier.is_some());
}

#[test]
fn test_register_components_macro() {
    let (session, _) = build_session(&[]);
    let reader = session.annotated_reader();
    register_components!(reader, UserService, OrderService).unwrap();

    assert!(session.registry().is_registered("userService"));
    assert!(session.registry().is_registered("orderService"));
}

#[test]
fn test_annotated_and_markup_primary_semantics_agree() {
    // 注解路径: 声明元数据携带 primary
    let (annotated_session, _) = build_session(&[]);
    annotated_session
        .annotated_reader()
        .register::<UserService>()
        .unwrap();
    let from_annotations = annotated_session.registry().resolve("userService").unwrap();

    // 标记路径: component 元素携带等价的 primary 标记
    let (markup_session, _) = build_session(&[]);
    let document = registry_impl::document_from_json_value(
        &json!({
            "components": {
                "children": [
                    {
                        "element": "component",
                        "name": "userService",
                        "class": "demo::UserService",
                        "primary": "true"
                    }
                ]
            }
        }),
        None,
    )
    .unwrap();
    markup_session
        .markup_reader()
        .register_definitions(&document)
        .unwrap();
    let from_markup = markup_session.registry().resolve("userService").unwrap();

    // 两条入口对通用注解语义的解释一致
    assert!(from_annotations.primary);
    assert!(from_markup.primary);
    assert_eq!(from_annotations.is_lazy_init(), from_markup.is_lazy_init());
    assert_eq!(from_annotations.scope, from_markup.scope);
}
