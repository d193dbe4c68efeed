//! 注册条件抽象接口

use crate::environment::Environment;
use crate::registry::DefinitionRegistry;
use std::fmt::Debug;

/// 条件评估阶段
///
/// 区分解析期与注册期，条件可以声明只在某个阶段参与评估，
/// 以便推迟到注册表填充更充分之后再做判定。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigurationPhase {
    /// 解析配置阶段
    ParseConfiguration,
    /// 注册组件阶段
    RegisterComponent,
}

/// 条件评估上下文
///
/// 条件只能读取注册表与环境，禁止任何注册表变更。
pub struct ConditionContext<'a> {
    /// 目标注册表的只读视图
    pub registry: &'a dyn DefinitionRegistry,
    /// 激活环境
    pub environment: &'a dyn Environment,
}

/// 注册条件 trait
pub trait Condition: Send + Sync + Debug {
    /// 判定条件是否满足；返回 `false` 将跳过定义的注册
    fn matches(&self, context: &ConditionContext<'_>) -> bool;

    /// 条件要求的评估阶段；`None` 表示任何阶段都参与评估
    fn required_phase(&self) -> Option<ConfigurationPhase> {
        None
    }
}
