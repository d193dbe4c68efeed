//! 注解组件的声明元数据

use crate::condition::Condition;
use registry_common::{DefinitionRole, Qualifier, ScopedProxyMode};
use std::sync::Arc;

/// 注解声明元数据
///
/// 注解路径的输入：类型在自身上声明的全部注册元数据。
/// 读取声明元数据不涉及任何文本解析。
#[derive(Debug, Clone, Default)]
pub struct AnnotatedMetadata {
    /// 显式声明的组件名称
    pub component_name: Option<String>,
    /// 声明的作用域
    pub scope: Option<String>,
    /// 声明的作用域代理模式
    pub proxy_mode: ScopedProxyMode,
    /// 声明的延迟初始化标志
    pub lazy_init: Option<bool>,
    /// 声明的首选标志
    pub primary: bool,
    /// 组件描述
    pub description: Option<String>,
    /// 依赖的组件名称
    pub depends_on: Vec<String>,
    /// 定义角色
    pub role: DefinitionRole,
    /// 类型级限定符
    pub qualifiers: Vec<Qualifier>,
    /// 注册条件列表
    pub conditions: Vec<Arc<dyn Condition>>,
}

/// 注解组件 trait
///
/// 实现此 trait 的类型可以直接经注解路径注册。
pub trait ComponentAnnotations: Send + Sync + 'static {
    /// 返回类型声明的注册元数据
    ///
    /// 同一类型的重复调用必须返回等价的元数据，注解路径的
    /// 幂等性依赖这一点。
    fn annotations() -> AnnotatedMetadata;
}

/// 注册调用时显式附加的限定符
#[derive(Debug, Clone)]
pub enum ExplicitQualifier {
    /// 首选标记：设置定义的 primary 标志
    Primary,
    /// 延迟标记：设置定义的 lazy-init 标志
    Lazy,
    /// 命名限定符：记录为注入消歧用的限定符
    Named(Qualifier),
}
