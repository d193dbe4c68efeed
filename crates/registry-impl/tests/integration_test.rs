//! 注册表与默认实现的集成测试

use parking_lot::Mutex;
use registry_abstractions::{
    ComponentNameGenerator, Condition, ConditionContext, ConfigurationPhase, DefinitionRegistry,
    Environment, RegistryListener, ScopeMetadataResolver,
};
use registry_common::{
    ComponentDefinition, RegistryError, RegistryEvent, RegistryEventKind, ScopedProxyMode,
    TypeInfo, SCOPED_PROXY_ATTRIBUTE,
};
use registry_impl::{
    AnnotationNameGenerator, AnnotationScopeResolver, ConditionEvaluator, DefaultNameGenerator,
    ProfileCondition, PropertyCondition, StandardDefinitionRegistry, StandardEnvironment,
};
use std::sync::Arc;

fn definition_of(class_name: &str) -> ComponentDefinition {
    ComponentDefinition::new(Some(TypeInfo::from_name(class_name)))
}

/// 收集事件的测试监听器
#[derive(Default)]
struct RecordingListener {
    events: Mutex<Vec<RegistryEvent>>,
}

impl RegistryListener for RecordingListener {
    fn on_event(&self, event: &RegistryEvent) {
        self.events.lock().push(event.clone());
    }
}

#[test]
fn test_register_and_resolve() {
    let registry = StandardDefinitionRegistry::new();

    registry
        .register_definition("userService", definition_of("demo::UserService"))
        .unwrap();

    assert!(registry.is_registered("userService"));
    assert_eq!(registry.definition_count(), 1);
    assert_eq!(registry.definition_names(), vec!["userService".to_string()]);

    let resolved = registry.resolve("userService").unwrap();
    assert_eq!(resolved.type_name(), Some("demo::UserService"));
    assert_eq!(resolved.scope, "singleton");
}

#[test]
fn test_override_allowed_by_default() {
    let registry = StandardDefinitionRegistry::new();
    registry
        .register_definition("svc", definition_of("demo::First"))
        .unwrap();
    // 默认允许覆盖, 重新注册原子替换既有定义
    registry
        .register_definition("svc", definition_of("demo::Second"))
        .unwrap();

    assert_eq!(registry.definition_count(), 1);
    assert_eq!(
        registry.resolve("svc").unwrap().type_name(),
        Some("demo::Second")
    );
}

#[test]
fn test_override_disallowed() {
    let registry = StandardDefinitionRegistry::new().with_overriding(false);
    registry
        .register_definition("svc", definition_of("demo::First"))
        .unwrap();

    let error = registry
        .register_definition("svc", definition_of("demo::Second"))
        .unwrap_err();
    assert!(matches!(error, RegistryError::DuplicateName { name } if name == "svc"));
    // 失败的注册不影响既有定义
    assert_eq!(
        registry.resolve("svc").unwrap().type_name(),
        Some("demo::First")
    );
}

#[test]
fn test_alias_registration_and_resolution() {
    let registry = StandardDefinitionRegistry::new();
    registry
        .register_definition("userService", definition_of("demo::UserService"))
        .unwrap();
    registry.register_alias("userService", "users").unwrap();

    assert_eq!(
        registry.resolve("users").unwrap().type_name(),
        Some("demo::UserService")
    );
    assert_eq!(registry.aliases_of("userService"), vec!["users".to_string()]);

    // 同一映射的重复注册是幂等的
    registry.register_alias("userService", "users").unwrap();
    // 别名与名称相同时静默忽略
    registry
        .register_alias("userService", "userService")
        .unwrap();
    assert_eq!(registry.aliases_of("userService").len(), 1);
}

#[test]
fn test_alias_conflict_keeps_first_mapping() {
    let registry = StandardDefinitionRegistry::new();
    registry
        .register_definition("x", definition_of("demo::X"))
        .unwrap();
    registry
        .register_definition("y", definition_of("demo::Y"))
        .unwrap();

    registry.register_alias("x", "a").unwrap();
    let error = registry.register_alias("y", "a").unwrap_err();
    assert!(matches!(error, RegistryError::AliasConflict { alias, .. } if alias == "a"));

    // 冲突失败之后, 别名仍然指向最初的映射
    assert_eq!(registry.resolve("a").unwrap().type_name(), Some("demo::X"));
}

#[test]
fn test_alias_requires_registered_target() {
    let registry = StandardDefinitionRegistry::new();
    let error = registry.register_alias("missing", "m").unwrap_err();
    assert!(matches!(error, RegistryError::AliasConflict { .. }));
}

#[test]
fn test_alias_cannot_shadow_definition_name() {
    let registry = StandardDefinitionRegistry::new();
    registry
        .register_definition("x", definition_of("demo::X"))
        .unwrap();
    registry
        .register_definition("y", definition_of("demo::Y"))
        .unwrap();

    let error = registry.register_alias("x", "y").unwrap_err();
    assert!(matches!(error, RegistryError::AliasConflict { .. }));
}

#[test]
fn test_redefinition_keeps_aliases() {
    let registry = StandardDefinitionRegistry::new();
    registry
        .register_definition("svc", definition_of("demo::First"))
        .unwrap();
    registry.register_alias("svc", "service").unwrap();

    registry
        .register_definition("svc", definition_of("demo::Second"))
        .unwrap();
    // 覆盖注册不回收既有别名
    assert_eq!(
        registry.resolve("service").unwrap().type_name(),
        Some("demo::Second")
    );
}

#[test]
fn test_remove_definition_drops_aliases() {
    let registry = StandardDefinitionRegistry::new();
    registry
        .register_definition("svc", definition_of("demo::Svc"))
        .unwrap();
    registry.register_alias("svc", "service").unwrap();

    registry.remove_definition("svc").unwrap();
    assert!(!registry.is_registered("svc"));
    assert!(registry.resolve("service").is_err());
    assert!(registry.aliases_of("svc").is_empty());
}

#[test]
fn test_registry_events_fired_after_commit() {
    let registry = StandardDefinitionRegistry::new();
    let listener = Arc::new(RecordingListener::default());
    registry.add_listener(listener.clone());

    registry
        .register_definition("svc", definition_of("demo::Svc"))
        .unwrap();
    registry
        .register_definition("svc", definition_of("demo::Svc"))
        .unwrap();
    registry.register_alias("svc", "service").unwrap();

    let events = listener.events.lock();
    assert_eq!(events.len(), 3);
    assert!(matches!(
        &events[0].kind,
        RegistryEventKind::DefinitionRegistered { name, replaced: false } if name == "svc"
    ));
    assert!(matches!(
        &events[1].kind,
        RegistryEventKind::DefinitionRegistered { name, replaced: true } if name == "svc"
    ));
    assert!(matches!(
        &events[2].kind,
        RegistryEventKind::AliasRegistered { name, alias } if name == "svc" && alias == "service"
    ));
}

#[test]
fn test_name_generator_derives_short_name() {
    let registry = StandardDefinitionRegistry::new();
    let generator = DefaultNameGenerator::new();

    let name = generator.generate(&definition_of("demo::UserService"), &registry);
    assert_eq!(name, "userService");
}

#[test]
fn test_name_generator_deterministic_suffix_on_collision() {
    let registry = StandardDefinitionRegistry::new();
    let generator = DefaultNameGenerator::new();

    registry
        .register_definition("userService", definition_of("demo::UserService"))
        .unwrap();
    let second = generator.generate(&definition_of("demo::UserService"), &registry);
    assert_eq!(second, "userService#2");

    // 相同输入的重复调用结果一致
    let again = generator.generate(&definition_of("demo::UserService"), &registry);
    assert_eq!(again, "userService#2");
}

#[test]
fn test_annotation_name_generator_stays_stable_on_repeat() {
    let registry = StandardDefinitionRegistry::new();
    let generator = AnnotationNameGenerator::new();

    let name = generator.generate(&definition_of("demo::UserService"), &registry);
    assert_eq!(name, "userService");

    // 名称已被占用时不做序号消歧, 重复注册走覆盖策略
    registry
        .register_definition("userService", definition_of("demo::UserService"))
        .unwrap();
    let repeat = generator.generate(&definition_of("demo::UserService"), &registry);
    assert_eq!(repeat, "userService");
}

#[test]
fn test_name_generator_parent_only_definition() {
    let registry = StandardDefinitionRegistry::new();
    let generator = DefaultNameGenerator::new();

    let mut definition = ComponentDefinition::new(None);
    definition.parent_name = Some("template".to_string());
    assert_eq!(generator.generate(&definition, &registry), "template$child");
}

#[test]
fn test_environment_placeholder_resolution() {
    let environment = StandardEnvironment::new()
        .with_property("config.dir", "conf")
        .with_property("app.name", "demo");

    assert_eq!(
        environment
            .resolve_placeholders("${config.dir}/app-${app.name}.toml")
            .unwrap(),
        "conf/app-demo.toml"
    );
    // 默认值语法
    assert_eq!(
        environment.resolve_placeholders("${missing:fallback}").unwrap(),
        "fallback"
    );
    // 无占位符的文本原样返回
    assert_eq!(environment.resolve_placeholders("plain").unwrap(), "plain");

    let error = environment.resolve_placeholders("${missing}").unwrap_err();
    assert!(error.to_string().contains("missing"));
}

#[test]
fn test_environment_profile_acceptance() {
    let environment = StandardEnvironment::new().with_active_profiles(["dev"]);

    assert!(environment.accepts_profiles(&["dev"]));
    assert!(environment.accepts_profiles(&["dev", "prod"]));
    assert!(!environment.accepts_profiles(&["prod"]));
    // 取反语法: prod 未激活即接受
    assert!(environment.accepts_profiles(&["!prod"]));
    assert!(!environment.accepts_profiles(&["!dev"]));
    // 空列表视为没有限制
    assert!(environment.accepts_profiles(&[]));
}

#[test]
fn test_environment_reserved_default_profile() {
    let environment = StandardEnvironment::new();
    assert!(environment.accepts_profiles(&["default"]));

    let explicit = StandardEnvironment::new().with_active_profiles(["prod"]);
    assert!(!explicit.accepts_profiles(&["default"]));
}

#[test]
fn test_condition_evaluator_profile_condition() {
    let registry: Arc<dyn DefinitionRegistry> = Arc::new(StandardDefinitionRegistry::new());
    let environment: Arc<dyn Environment> =
        Arc::new(StandardEnvironment::new().with_active_profiles(["dev"]));
    let evaluator = ConditionEvaluator::new(registry, environment);

    let accepted: Vec<Arc<dyn Condition>> = vec![Arc::new(ProfileCondition::new(["dev"]))];
    assert!(!evaluator.should_skip(&accepted, ConfigurationPhase::RegisterComponent));

    let rejected: Vec<Arc<dyn Condition>> = vec![Arc::new(ProfileCondition::new(["prod"]))];
    assert!(evaluator.should_skip(&rejected, ConfigurationPhase::RegisterComponent));
}

#[test]
fn test_condition_evaluator_property_condition() {
    let registry: Arc<dyn DefinitionRegistry> = Arc::new(StandardDefinitionRegistry::new());
    let environment: Arc<dyn Environment> =
        Arc::new(StandardEnvironment::new().with_property("feature.enabled", "true"));
    let evaluator = ConditionEvaluator::new(registry, environment);

    let present: Vec<Arc<dyn Condition>> = vec![Arc::new(PropertyCondition::present(
        "feature.enabled",
    ))];
    assert!(!evaluator.should_skip(&present, ConfigurationPhase::RegisterComponent));

    let mismatch: Vec<Arc<dyn Condition>> = vec![Arc::new(PropertyCondition::equals(
        "feature.enabled",
        "false",
    ))];
    assert!(evaluator.should_skip(&mismatch, ConfigurationPhase::RegisterComponent));
}

/// 声明了评估阶段的条件只在对应阶段参与评估
#[derive(Debug)]
struct ParsePhaseOnly;

impl Condition for ParsePhaseOnly {
    fn matches(&self, _context: &ConditionContext<'_>) -> bool {
        false
    }

    fn required_phase(&self) -> Option<ConfigurationPhase> {
        Some(ConfigurationPhase::ParseConfiguration)
    }
}

#[test]
fn test_condition_evaluator_respects_phase() {
    let registry: Arc<dyn DefinitionRegistry> = Arc::new(StandardDefinitionRegistry::new());
    let environment: Arc<dyn Environment> = Arc::new(StandardEnvironment::new());
    let evaluator = ConditionEvaluator::new(registry, environment);

    let conditions: Vec<Arc<dyn Condition>> = vec![Arc::new(ParsePhaseOnly)];
    // 注册阶段不评估解析阶段条件
    assert!(!evaluator.should_skip(&conditions, ConfigurationPhase::RegisterComponent));
    assert!(evaluator.should_skip(&conditions, ConfigurationPhase::ParseConfiguration));
}

#[test]
fn test_scope_resolver_defaults_to_singleton() {
    let resolver = AnnotationScopeResolver::new();
    let metadata = resolver.resolve_scope_metadata(&definition_of("demo::Svc"));
    assert_eq!(metadata.scope_name, "singleton");
    assert_eq!(metadata.proxy_mode, ScopedProxyMode::No);
}

#[test]
fn test_scope_resolver_reads_proxy_attribute() {
    let resolver = AnnotationScopeResolver::new();
    let mut definition = definition_of("demo::Svc").with_scope("session");
    definition.set_attribute(SCOPED_PROXY_ATTRIBUTE, "targetClass");

    let metadata = resolver.resolve_scope_metadata(&definition);
    assert_eq!(metadata.scope_name, "session");
    assert_eq!(metadata.proxy_mode, ScopedProxyMode::TargetClass);
}
