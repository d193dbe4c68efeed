//! 解析错误与事件接收接口

use registry_common::{DefinitionStoreError, DefinitionHolder, DocumentDefaults, SourceLocation};

/// 解析错误与事件接收器 trait
///
/// 解析管线的诊断出口。非致命的逐元素错误经 [`report_error`]
/// 上报后解析继续处理后续兄弟元素；事件在状态变更提交之后
/// 发出，接收器无法否决或阻断注册。
///
/// [`report_error`]: ReaderEventSink::report_error
pub trait ReaderEventSink: Send + Sync {
    /// 上报非致命解析错误
    fn report_error(
        &self,
        message: &str,
        location: &SourceLocation,
        cause: Option<&DefinitionStoreError>,
    );

    /// 组件定义注册完成
    fn component_registered(&self, holder: &DefinitionHolder);

    /// 别名注册完成
    fn alias_registered(&self, name: &str, alias: &str);

    /// 导入处理完成，携带实际加载的资源位置
    fn import_processed(&self, location: &str, resources: &[String]);

    /// 文档级默认值生效
    fn defaults_registered(&self, defaults: &DocumentDefaults);
}
