//! 作用域元信息
//!
//! 描述组件的作用域名称以及是否需要作用域代理包装

/// 单例作用域名称
pub const SCOPE_SINGLETON: &str = "singleton";

/// 请求作用域代理的开放属性键，值为 [`ScopedProxyMode`] 的属性值表示
pub const SCOPED_PROXY_ATTRIBUTE: &str = "scopedProxy";

/// 原型作用域名称
pub const SCOPE_PROTOTYPE: &str = "prototype";

/// 作用域代理模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScopedProxyMode {
    /// 不创建代理
    #[default]
    No,
    /// 基于接口的代理
    Interfaces,
    /// 基于目标类型的代理
    TargetClass,
}

impl ScopedProxyMode {
    /// 代理模式的属性值表示
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::No => "no",
            Self::Interfaces => "interfaces",
            Self::TargetClass => "targetClass",
        }
    }

    /// 从属性值解析代理模式
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "no" => Some(Self::No),
            "interfaces" => Some(Self::Interfaces),
            "targetClass" => Some(Self::TargetClass),
            _ => None,
        }
    }
}

/// 作用域元信息
///
/// 每个定义解析一次，由注册调用消费后即丢弃。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeMetadata {
    /// 作用域名称
    pub scope_name: String,
    /// 代理模式
    pub proxy_mode: ScopedProxyMode,
}

impl Default for ScopeMetadata {
    fn default() -> Self {
        Self {
            scope_name: SCOPE_SINGLETON.to_string(),
            proxy_mode: ScopedProxyMode::No,
        }
    }
}

impl ScopeMetadata {
    /// 创建新的作用域元信息
    pub fn new(scope_name: impl Into<String>, proxy_mode: ScopedProxyMode) -> Self {
        Self {
            scope_name: scope_name.into(),
            proxy_mode,
        }
    }
}
