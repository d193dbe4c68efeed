//! 组件命名抽象接口

use crate::registry::DefinitionRegistry;
use registry_common::ComponentDefinition;

/// 组件名称生成器 trait
///
/// 为没有显式名称的定义派生注册名称。同一进程内对相同输入的
/// 重复调用必须产生相同结果，幂等重放依赖这一点。
pub trait ComponentNameGenerator: Send + Sync {
    /// 生成注册名称
    ///
    /// 与当前注册表内容冲突时仍须返回可用的唯一名称。
    fn generate(&self, definition: &ComponentDefinition, registry: &dyn DefinitionRegistry)
        -> String;
}
