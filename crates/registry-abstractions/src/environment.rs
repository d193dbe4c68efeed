//! 激活环境抽象接口

use registry_common::EnvironmentResult;

/// 激活环境 trait
///
/// 解析会话使用的环境视图：profile 判定与属性占位符解析。
/// 对本框架而言环境是只读的。
pub trait Environment: Send + Sync {
    /// 解析文本中的 `${key}` / `${key:default}` 占位符
    ///
    /// 无法解析且没有默认值时返回
    /// [`EnvironmentError::UnresolvedPlaceholder`]。
    ///
    /// [`EnvironmentError::UnresolvedPlaceholder`]: registry_common::EnvironmentError::UnresolvedPlaceholder
    fn resolve_placeholders(&self, text: &str) -> EnvironmentResult<String>;

    /// 判定 profile 列表是否被接受
    ///
    /// 任意一项匹配即接受；`!profile` 表示该 profile 未激活时匹配。
    /// 空列表视为没有限制。
    fn accepts_profiles(&self, profiles: &[&str]) -> bool;

    /// 读取属性值
    fn property(&self, key: &str) -> Option<String>;

    /// 当前激活的 profile 列表
    fn active_profiles(&self) -> Vec<String>;
}
