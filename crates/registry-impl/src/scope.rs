//! 默认作用域元信息解析器

use registry_abstractions::ScopeMetadataResolver;
use registry_common::{
    ComponentDefinition, ScopeMetadata, ScopedProxyMode, SCOPED_PROXY_ATTRIBUTE, SCOPE_SINGLETON,
};
use tracing::warn;

/// 默认作用域元信息解析器
///
/// 作用域名称取定义声明的值，未声明时为单例；代理模式从
/// [`SCOPED_PROXY_ATTRIBUTE`] 属性读取并原样返回，包装由调用方
/// 完成。
#[derive(Debug, Clone, Copy, Default)]
pub struct AnnotationScopeResolver;

impl AnnotationScopeResolver {
    /// 创建新的作用域解析器
    pub fn new() -> Self {
        Self
    }
}

impl ScopeMetadataResolver for AnnotationScopeResolver {
    fn resolve_scope_metadata(&self, definition: &ComponentDefinition) -> ScopeMetadata {
        let scope_name = if definition.scope.trim().is_empty() {
            SCOPE_SINGLETON.to_string()
        } else {
            definition.scope.clone()
        };

        let proxy_mode = match definition.attribute(SCOPED_PROXY_ATTRIBUTE) {
            None => ScopedProxyMode::No,
            Some(value) => ScopedProxyMode::parse(value).unwrap_or_else(|| {
                warn!("无法识别的作用域代理模式: {}, 按不代理处理", value);
                ScopedProxyMode::No
            }),
        };

        ScopeMetadata::new(scope_name, proxy_mode)
    }
}
