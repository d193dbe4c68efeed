//! 注册条件评估器

use registry_abstractions::{
    Condition, ConditionContext, ConfigurationPhase, DefinitionRegistry, Environment,
};
use std::sync::Arc;
use tracing::trace;

/// 注册条件评估器
///
/// 对定义声明的条件逐个求值，第一个不满足的条件即判定为跳过。
/// 声明了评估阶段的条件只在对应阶段参与评估。
pub struct ConditionEvaluator {
    registry: Arc<dyn DefinitionRegistry>,
    environment: Arc<dyn Environment>,
}

impl ConditionEvaluator {
    /// 创建新的条件评估器
    pub fn new(registry: Arc<dyn DefinitionRegistry>, environment: Arc<dyn Environment>) -> Self {
        Self {
            registry,
            environment,
        }
    }

    /// 判定是否跳过注册
    pub fn should_skip(&self, conditions: &[Arc<dyn Condition>], phase: ConfigurationPhase) -> bool {
        if conditions.is_empty() {
            return false;
        }
        let context = ConditionContext {
            registry: self.registry.as_ref(),
            environment: self.environment.as_ref(),
        };
        for condition in conditions {
            if let Some(required) = condition.required_phase() {
                if required != phase {
                    continue;
                }
            }
            if !condition.matches(&context) {
                trace!("条件不满足，跳过注册: {:?}", condition);
                return true;
            }
        }
        false
    }
}

/// profile 条件
///
/// 激活环境接受列出的任意 profile 时满足。
#[derive(Debug, Clone)]
pub struct ProfileCondition {
    profiles: Vec<String>,
}

impl ProfileCondition {
    /// 创建新的 profile 条件
    pub fn new<I, S>(profiles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            profiles: profiles.into_iter().map(Into::into).collect(),
        }
    }
}

impl Condition for ProfileCondition {
    fn matches(&self, context: &ConditionContext<'_>) -> bool {
        let profiles: Vec<&str> = self.profiles.iter().map(String::as_str).collect();
        context.environment.accepts_profiles(&profiles)
    }
}

/// 属性条件
///
/// 指定属性存在（且在给出期望值时相等）时满足。
#[derive(Debug, Clone)]
pub struct PropertyCondition {
    key: String,
    expected: Option<String>,
}

impl PropertyCondition {
    /// 属性存在即满足的条件
    pub fn present(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            expected: None,
        }
    }

    /// 属性等于期望值时满足的条件
    pub fn equals(key: impl Into<String>, expected: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            expected: Some(expected.into()),
        }
    }
}

impl Condition for PropertyCondition {
    fn matches(&self, context: &ConditionContext<'_>) -> bool {
        match context.environment.property(&self.key) {
            None => false,
            Some(actual) => self
                .expected
                .as_ref()
                .map_or(true, |expected| expected == &actual),
        }
    }
}
