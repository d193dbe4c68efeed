//! 组件定义注册表抽象接口

use registry_common::{ComponentDefinition, RegistryEvent, RegistryResult};
use std::sync::Arc;

/// 组件定义注册表 trait
///
/// 名称到定义的映射加上别名间接寻址。名称在整个注册表内唯一，
/// 别名在名称与别名的并集内唯一。覆盖策略是注册表级别的配置，
/// 不随单次调用变化。
///
/// 单次注册或别名调用是原子的；多个解析会话写入同一注册表时
/// 由调用方负责串行化。
pub trait DefinitionRegistry: Send + Sync {
    /// 注册组件定义
    ///
    /// 名称已存在且不允许覆盖时返回 [`RegistryError::DuplicateName`]，
    /// 允许覆盖时原子替换既有定义，别名映射不受影响。
    ///
    /// [`RegistryError::DuplicateName`]: registry_common::RegistryError::DuplicateName
    fn register_definition(
        &self,
        name: &str,
        definition: ComponentDefinition,
    ) -> RegistryResult<()>;

    /// 注册别名
    ///
    /// 别名指向其他规范名称、与既有定义名称冲突或规范名称尚未
    /// 注册时返回 [`RegistryError::AliasConflict`]。别名与名称相同
    /// 时静默忽略；重复注册相同的映射是幂等的。
    ///
    /// [`RegistryError::AliasConflict`]: registry_common::RegistryError::AliasConflict
    fn register_alias(&self, name: &str, alias: &str) -> RegistryResult<()>;

    /// 按名称或别名解析组件定义
    fn resolve(&self, name_or_alias: &str) -> RegistryResult<Arc<ComponentDefinition>>;

    /// 检查名称是否已注册
    fn is_registered(&self, name: &str) -> bool;

    /// 获取所有已注册的名称
    fn definition_names(&self) -> Vec<String>;

    /// 已注册定义数量
    fn definition_count(&self) -> usize;

    /// 获取指向指定名称的全部别名
    fn aliases_of(&self, name: &str) -> Vec<String>;

    /// 移除组件定义，同时移除指向它的别名
    fn remove_definition(&self, name: &str) -> RegistryResult<Arc<ComponentDefinition>>;

    /// 设置是否允许覆盖注册
    fn set_allow_definition_overriding(&self, allow: bool);

    /// 当前是否允许覆盖注册
    fn allows_definition_overriding(&self) -> bool;

    /// 追加注册表事件监听器
    fn add_listener(&self, listener: Arc<dyn RegistryListener>);
}

/// 注册表事件监听器 trait
///
/// 事件在状态变更提交之后发出，监听器无法影响注册结果。
pub trait RegistryListener: Send + Sync {
    /// 接收注册表事件
    fn on_event(&self, event: &RegistryEvent);
}
