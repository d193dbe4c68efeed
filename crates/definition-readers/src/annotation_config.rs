//! 通用注解处理与作用域代理包装
//!
//! 标记路径与注解路径共用的定义后处理逻辑。两条路径对
//! primary、lazy-init、描述等通用语义必须保持一致，这里的
//! 纯函数是唯一的实现点。

use registry_abstractions::AnnotatedMetadata;
use registry_common::{
    ComponentDefinition, DefinitionHolder, DefinitionRole, Qualifier, ScopeMetadata,
    ScopedProxyMode, TypeInfo,
};

/// 作用域代理工厂的类型名称
pub const SCOPED_PROXY_FACTORY_TYPE: &str = "ScopedProxyFactory";

/// 代理目标定义的名称前缀
pub const SCOPED_TARGET_PREFIX: &str = "scopedTarget.";

/// 代理是否基于目标类型的属性键
pub const PROXY_TARGET_CLASS_ATTRIBUTE: &str = "proxyTargetClass";

/// 代理目标组件名称的属性键
pub const TARGET_COMPONENT_NAME_ATTRIBUTE: &str = "targetComponentName";

/// 通用定义语义
///
/// 从标记属性或注解元数据提取出的共同部分。
#[derive(Debug, Clone, Default)]
pub struct CommonDefinitionHints {
    /// 延迟初始化；`None` 表示维持定义现值
    pub lazy_init: Option<bool>,
    /// 首选标志
    pub primary: bool,
    /// 组件描述
    pub description: Option<String>,
    /// 依赖的组件名称
    pub depends_on: Vec<String>,
    /// 定义角色
    pub role: DefinitionRole,
    /// 限定符
    pub qualifiers: Vec<Qualifier>,
}

impl From<&AnnotatedMetadata> for CommonDefinitionHints {
    fn from(metadata: &AnnotatedMetadata) -> Self {
        Self {
            lazy_init: metadata.lazy_init,
            primary: metadata.primary,
            description: metadata.description.clone(),
            depends_on: metadata.depends_on.clone(),
            role: metadata.role,
            qualifiers: metadata.qualifiers.clone(),
        }
    }
}

/// 应用通用定义语义
///
/// 限定符按种类去重追加，依赖名称去重追加，其余字段只在给出
/// 时覆盖。
pub fn apply_common_metadata(definition: &mut ComponentDefinition, hints: &CommonDefinitionHints) {
    if let Some(lazy) = hints.lazy_init {
        definition.lazy_init = Some(lazy);
    }
    if hints.primary {
        definition.primary = true;
    }
    if let Some(description) = &hints.description {
        definition.description = Some(description.clone());
    }
    for dependency in &hints.depends_on {
        if !definition.depends_on.contains(dependency) {
            definition.depends_on.push(dependency.clone());
        }
    }
    definition.role = hints.role;
    for qualifier in &hints.qualifiers {
        definition.add_qualifier(qualifier.clone());
    }
}

/// 按作用域元信息应用代理包装
///
/// 不要求代理时原样返回。要求代理时返回代理持有者，原始定义
/// 嵌套其中；注册表只会看到一个持有者。
pub fn apply_scoped_proxy_mode(
    scope_metadata: &ScopeMetadata,
    holder: DefinitionHolder,
) -> DefinitionHolder {
    if scope_metadata.proxy_mode == ScopedProxyMode::No {
        return holder;
    }
    create_scoped_proxy(holder, scope_metadata.proxy_mode)
}

/// 创建作用域代理持有者
///
/// 代理定义接管原始名称与别名，原始定义改名为
/// `scopedTarget.<name>` 并作为嵌套目标挂在代理之下，不再进入
/// 注册表顶层。
pub fn create_scoped_proxy(
    target: DefinitionHolder,
    proxy_mode: ScopedProxyMode,
) -> DefinitionHolder {
    let original_name = target.name.clone();
    let aliases = target.aliases.clone();
    let target_name = format!("{SCOPED_TARGET_PREFIX}{original_name}");

    let mut proxy = ComponentDefinition::new(Some(TypeInfo::from_name(SCOPED_PROXY_FACTORY_TYPE)));
    proxy.source = target.definition.source.clone();
    proxy.primary = target.definition.primary;
    proxy.set_attribute(
        PROXY_TARGET_CLASS_ATTRIBUTE,
        (proxy_mode == ScopedProxyMode::TargetClass).to_string(),
    );
    proxy.set_attribute(TARGET_COMPONENT_NAME_ATTRIBUTE, target_name.clone());

    let mut inner = target;
    inner.name = target_name;
    inner.aliases = Vec::new();
    proxy.decorated_target = Some(Box::new(inner));

    DefinitionHolder::new(original_name, proxy).with_aliases(aliases)
}
