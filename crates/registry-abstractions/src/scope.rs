//! 作用域解析抽象接口

use registry_common::{ComponentDefinition, ScopeMetadata};

/// 作用域元信息解析器 trait
///
/// 从定义推导作用域名称与代理模式。解析器只返回请求的代理
/// 模式，代理包装由调用方完成。
pub trait ScopeMetadataResolver: Send + Sync {
    /// 解析定义的作用域元信息
    fn resolve_scope_metadata(&self, definition: &ComponentDefinition) -> ScopeMetadata;
}
