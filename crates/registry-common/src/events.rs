//! 注册表事件定义
//!
//! 注册与别名操作提交后发出的单向通知。观察者无法否决或阻断
//! 已提交的状态变更。

use chrono::{DateTime, Utc};

/// 注册表事件种类
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryEventKind {
    /// 组件定义已注册
    DefinitionRegistered {
        /// 注册名称
        name: String,
        /// 是否覆盖了既有定义
        replaced: bool,
    },
    /// 组件定义已移除
    DefinitionRemoved {
        /// 注册名称
        name: String,
    },
    /// 别名已注册
    AliasRegistered {
        /// 规范名称
        name: String,
        /// 别名
        alias: String,
    },
}

/// 注册表事件
#[derive(Debug, Clone)]
pub struct RegistryEvent {
    /// 事件种类
    pub kind: RegistryEventKind,
    /// 事件时间
    pub timestamp: DateTime<Utc>,
}

impl RegistryEvent {
    /// 以当前时间创建事件
    pub fn now(kind: RegistryEventKind) -> Self {
        Self {
            kind,
            timestamp: Utc::now(),
        }
    }
}
