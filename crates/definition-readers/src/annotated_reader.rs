//! 注解类型定义读取器
//!
//! 从类型声明的注解元数据直接派生定义并注册，是标记文档之外的
//! 另一条独立入口。条件评估、作用域解析、限定符处理与作用域
//! 代理包装在注册前依次完成。

use crate::annotation_config::{
    apply_common_metadata, apply_scoped_proxy_mode, CommonDefinitionHints,
};
use crate::support::register_definition_holder;
use registry_abstractions::{
    ComponentAnnotations, ComponentNameGenerator, ConfigurationPhase, ExplicitQualifier,
    ReaderContext, ScopeMetadataResolver,
};
use registry_common::{
    ComponentDefinition, DefinitionCustomizer, DefinitionHolder, InstanceSupplier,
    ScopedProxyMode, SourceLocation, StoreResult, SCOPED_PROXY_ATTRIBUTE,
};
use registry_impl::{AnnotationNameGenerator, AnnotationScopeResolver, ConditionEvaluator};
use std::sync::Arc;
use tracing::debug;

/// 注解注册的可选参数
#[derive(Default)]
pub struct AnnotatedRegistration {
    /// 显式注册名称，优先于注解声明的名称
    pub name: Option<String>,
    /// 实例提供函数
    pub instance_supplier: Option<InstanceSupplier>,
    /// 显式附加的限定符
    pub qualifiers: Vec<ExplicitQualifier>,
    /// 定义定制回调，按给出顺序应用
    pub customizers: Vec<DefinitionCustomizer>,
}

impl AnnotatedRegistration {
    /// 创建空的注册参数
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置显式名称
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// 设置实例提供函数
    pub fn with_instance_supplier(mut self, supplier: InstanceSupplier) -> Self {
        self.instance_supplier = Some(supplier);
        self
    }

    /// 追加显式限定符
    pub fn with_qualifier(mut self, qualifier: ExplicitQualifier) -> Self {
        self.qualifiers.push(qualifier);
        self
    }

    /// 追加定义定制回调
    pub fn with_customizer(
        mut self,
        customizer: impl Fn(&mut ComponentDefinition) + Send + Sync + 'static,
    ) -> Self {
        self.customizers.push(Box::new(customizer));
        self
    }
}

/// 注解类型定义读取器
pub struct AnnotatedDefinitionReader<'a> {
    context: &'a ReaderContext,
    scope_resolver: Arc<dyn ScopeMetadataResolver>,
    // 注解路径不做序号消歧, 同一类型重复注册保持幂等
    name_generator: Arc<dyn ComponentNameGenerator>,
    condition_evaluator: ConditionEvaluator,
}

impl<'a> AnnotatedDefinitionReader<'a> {
    /// 创建新的注解读取器
    pub fn new(context: &'a ReaderContext) -> Self {
        Self {
            context,
            scope_resolver: Arc::new(AnnotationScopeResolver::new()),
            name_generator: Arc::new(AnnotationNameGenerator::new()),
            condition_evaluator: ConditionEvaluator::new(
                context.registry.clone(),
                context.environment.clone(),
            ),
        }
    }

    /// 替换作用域解析器
    pub fn with_scope_resolver(mut self, resolver: Arc<dyn ScopeMetadataResolver>) -> Self {
        self.scope_resolver = resolver;
        self
    }

    /// 替换名称生成器
    pub fn with_name_generator(mut self, generator: Arc<dyn ComponentNameGenerator>) -> Self {
        self.name_generator = generator;
        self
    }

    /// 按声明元数据注册类型
    ///
    /// 对相同类型的重复调用派生等价的定义，可以安全重复。
    pub fn register<T: ComponentAnnotations>(&self) -> StoreResult<()> {
        self.register_component::<T>(AnnotatedRegistration::new())
    }

    /// 按声明元数据与附加参数注册类型
    pub fn register_component<T: ComponentAnnotations>(
        &self,
        registration: AnnotatedRegistration,
    ) -> StoreResult<()> {
        let metadata = T::annotations();

        // 条件不满足的跳过是静默的, 与标记路径的 profile 跳过一致
        if self
            .condition_evaluator
            .should_skip(&metadata.conditions, ConfigurationPhase::RegisterComponent)
        {
            debug!("注册条件未满足, 跳过: {}", std::any::type_name::<T>());
            return Ok(());
        }

        let mut definition = ComponentDefinition::of_type::<T>();
        definition.source = SourceLocation::new(None, std::any::type_name::<T>());
        definition.instance_supplier = registration.instance_supplier;

        if let Some(scope) = &metadata.scope {
            definition.scope = scope.clone();
        }
        if metadata.proxy_mode != ScopedProxyMode::No {
            definition.set_attribute(SCOPED_PROXY_ATTRIBUTE, metadata.proxy_mode.as_str());
        }
        let scope_metadata = self.scope_resolver.resolve_scope_metadata(&definition);
        definition.scope = scope_metadata.scope_name.clone();

        // 通用语义与标记路径共用同一处理函数
        apply_common_metadata(&mut definition, &CommonDefinitionHints::from(&metadata));

        let name = registration
            .name
            .clone()
            .or_else(|| metadata.component_name.clone())
            .unwrap_or_else(|| {
                self.name_generator
                    .generate(&definition, self.context.registry.as_ref())
            });

        for qualifier in &registration.qualifiers {
            match qualifier {
                ExplicitQualifier::Primary => definition.primary = true,
                ExplicitQualifier::Lazy => definition.lazy_init = Some(true),
                ExplicitQualifier::Named(named) => definition.add_qualifier(named.clone()),
            }
        }

        for customizer in &registration.customizers {
            customizer(&mut definition);
        }

        let holder = DefinitionHolder::new(name, definition);
        // 代理包装对注册表透明, 注册表只看到一个持有者
        let holder = apply_scoped_proxy_mode(&scope_metadata, holder);

        register_definition_holder(&holder, self.context.registry.as_ref())?;
        self.context.event_sink.component_registered(&holder);
        Ok(())
    }
}
