//! 解析错误与事件接收器实现

use parking_lot::Mutex;
use registry_abstractions::ReaderEventSink;
use registry_common::{DefinitionHolder, DefinitionStoreError, DocumentDefaults, SourceLocation};
use tracing::{debug, warn};

/// 日志事件接收器
///
/// 错误输出为 warn 日志，事件输出为 debug 日志。解析会话的
/// 默认接收器。
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingReaderEventSink;

impl LoggingReaderEventSink {
    /// 创建新的日志接收器
    pub fn new() -> Self {
        Self
    }
}

impl ReaderEventSink for LoggingReaderEventSink {
    fn report_error(
        &self,
        message: &str,
        location: &SourceLocation,
        cause: Option<&DefinitionStoreError>,
    ) {
        match cause {
            Some(cause) => warn!("解析错误: {} ({}), 原因: {}", message, location, cause),
            None => warn!("解析错误: {} ({})", message, location),
        }
    }

    fn component_registered(&self, holder: &DefinitionHolder) {
        debug!("组件定义注册完成: {}", holder.name);
    }

    fn alias_registered(&self, name: &str, alias: &str) {
        debug!("别名注册完成: {} -> {}", alias, name);
    }

    fn import_processed(&self, location: &str, resources: &[String]) {
        debug!("导入处理完成: {}, 实际资源: {:?}", location, resources);
    }

    fn defaults_registered(&self, defaults: &DocumentDefaults) {
        debug!("文档默认值生效: {:?}", defaults);
    }
}

/// 空事件接收器
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReaderEventSink;

impl ReaderEventSink for NullReaderEventSink {
    fn report_error(
        &self,
        _message: &str,
        _location: &SourceLocation,
        _cause: Option<&DefinitionStoreError>,
    ) {
    }

    fn component_registered(&self, _holder: &DefinitionHolder) {}

    fn alias_registered(&self, _name: &str, _alias: &str) {}

    fn import_processed(&self, _location: &str, _resources: &[String]) {}

    fn defaults_registered(&self, _defaults: &DocumentDefaults) {}
}

/// 收集事件接收器
///
/// 把错误与事件记入内部列表，主要用于测试中对解析行为断言。
#[derive(Debug, Default)]
pub struct CollectingReaderEventSink {
    errors: Mutex<Vec<String>>,
    components: Mutex<Vec<String>>,
    aliases: Mutex<Vec<(String, String)>>,
    imports: Mutex<Vec<(String, Vec<String>)>>,
    defaults: Mutex<Vec<DocumentDefaults>>,
}

impl CollectingReaderEventSink {
    /// 创建新的收集接收器
    pub fn new() -> Self {
        Self::default()
    }

    /// 已收集的错误消息
    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().clone()
    }

    /// 已注册组件的名称
    pub fn registered_components(&self) -> Vec<String> {
        self.components.lock().clone()
    }

    /// 已注册的 (规范名称, 别名) 对
    pub fn registered_aliases(&self) -> Vec<(String, String)> {
        self.aliases.lock().clone()
    }

    /// 已处理的导入 (位置, 实际资源)
    pub fn processed_imports(&self) -> Vec<(String, Vec<String>)> {
        self.imports.lock().clone()
    }

    /// 生效过的文档默认值
    pub fn registered_defaults(&self) -> Vec<DocumentDefaults> {
        self.defaults.lock().clone()
    }
}

impl ReaderEventSink for CollectingReaderEventSink {
    fn report_error(
        &self,
        message: &str,
        location: &SourceLocation,
        cause: Option<&DefinitionStoreError>,
    ) {
        let entry = match cause {
            Some(cause) => format!("{message} ({location}): {cause}"),
            None => format!("{message} ({location})"),
        };
        self.errors.lock().push(entry);
    }

    fn component_registered(&self, holder: &DefinitionHolder) {
        self.components.lock().push(holder.name.clone());
    }

    fn alias_registered(&self, name: &str, alias: &str) {
        self.aliases
            .lock()
            .push((name.to_string(), alias.to_string()));
    }

    fn import_processed(&self, location: &str, resources: &[String]) {
        self.imports
            .lock()
            .push((location.to_string(), resources.to_vec()));
    }

    fn defaults_registered(&self, defaults: &DocumentDefaults) {
        self.defaults.lock().push(defaults.clone());
    }
}
