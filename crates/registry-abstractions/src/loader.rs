//! 定义资源加载抽象接口

use registry_common::{MarkupDocument, StoreResult};

/// 位置类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationKind {
    /// 绝对位置（携带方案前缀或语法上的绝对定位符）
    Absolute,
    /// 相对位置
    Relative,
    /// 无法判定
    Unresolvable,
}

/// 一次加载的结果统计
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedDefinitions {
    /// 本次加载注册的定义数量
    pub count: usize,
    /// 实际加载的资源位置
    pub resources: Vec<String>,
}

/// 定义资源加载器 trait
///
/// 将位置字符串转换为标记文档。加载是阻塞调用，解析管线
/// 在导入元素处同步进入加载器。
pub trait DefinitionResourceLoader: Send + Sync {
    /// 加载位置处的标记文档
    fn load_document(&self, location: &str) -> StoreResult<MarkupDocument>;

    /// 以基准位置解析相对路径
    fn resolve_relative(&self, base: &str, path: &str) -> String;

    /// 检查资源是否存在
    fn resource_exists(&self, location: &str) -> bool;

    /// 判定位置的绝对/相对类别
    ///
    /// 判定失败时返回 [`LocationKind::Unresolvable`]，调用方按
    /// 相对位置处理，判定失败不是解析错误。
    fn classify(&self, location: &str) -> LocationKind;

    /// 展开位置中的模式匹配
    ///
    /// 默认实现不支持模式，原样返回。
    fn expand_pattern(&self, location: &str) -> StoreResult<Vec<String>> {
        Ok(vec![location.to_string()])
    }
}
