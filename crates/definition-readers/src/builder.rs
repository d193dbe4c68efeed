//! 解析会话构建器
//!
//! 使用建造者模式组装一次解析会话需要的全部协作方：注册表、
//! 环境、资源加载器、事件接收器与命名空间处理器。

use crate::annotated_reader::AnnotatedDefinitionReader;
use crate::markup_reader::MarkupDefinitionReader;
use registry_abstractions::{
    ComponentNameGenerator, DefinitionRegistry, DefinitionResourceLoader, Environment,
    NamespaceHandler, NamespaceHandlerResolver, ReaderContext, ReaderEventSink,
};
use registry_common::{DefinitionStoreError, StoreResult};
use registry_impl::{
    DefaultNameGenerator, FileSystemResourceLoader, LoggingReaderEventSink, StandardEnvironment,
    StandardDefinitionRegistry,
};
use std::sync::Arc;
use tracing::{debug, info};

/// 日志配置
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: tracing::Level,
    /// 是否显示目标
    pub show_target: bool,
    /// 是否显示线程ID
    pub show_thread_ids: bool,
    /// 是否显示文件名
    pub show_file: bool,
    /// 是否显示行号
    pub show_line_number: bool,
    /// 是否使用 JSON 格式
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: tracing::Level::INFO,
            show_target: true,
            show_thread_ids: false,
            show_file: false,
            show_line_number: false,
            json_format: false,
        }
    }
}

impl LoggingConfig {
    /// 创建开发环境日志配置
    pub fn development() -> Self {
        Self {
            level: tracing::Level::DEBUG,
            show_target: true,
            show_thread_ids: true,
            show_file: true,
            show_line_number: true,
            json_format: false,
        }
    }

    /// 创建生产环境日志配置
    pub fn production() -> Self {
        Self {
            level: tracing::Level::INFO,
            show_target: false,
            show_thread_ids: false,
            show_file: false,
            show_line_number: false,
            json_format: true,
        }
    }
}

/// 解析会话构建器
pub struct RegistrySessionBuilder {
    registry: Option<Arc<dyn DefinitionRegistry>>,
    environment: Option<Arc<dyn Environment>>,
    resource_loader: Option<Arc<dyn DefinitionResourceLoader>>,
    event_sink: Option<Arc<dyn ReaderEventSink>>,
    name_generator: Option<Arc<dyn ComponentNameGenerator>>,
    namespace_handlers: NamespaceHandlerResolver,
    active_profiles: Vec<String>,
    properties: Vec<(String, String)>,
    allow_overriding: Option<bool>,
    logging_config: Option<LoggingConfig>,
}

impl RegistrySessionBuilder {
    /// 创建新的会话构建器
    pub fn new() -> Self {
        Self {
            registry: None,
            environment: None,
            resource_loader: None,
            event_sink: None,
            name_generator: None,
            namespace_handlers: NamespaceHandlerResolver::new(),
            active_profiles: Vec::new(),
            properties: Vec::new(),
            allow_overriding: None,
            logging_config: None,
        }
    }

    /// 使用指定的注册表
    pub fn with_registry(mut self, registry: Arc<dyn DefinitionRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// 使用指定的环境（优先于 profile 与属性配置）
    pub fn with_environment(mut self, environment: Arc<dyn Environment>) -> Self {
        self.environment = Some(environment);
        self
    }

    /// 设置默认环境激活的 profile 集合
    pub fn with_active_profiles<I, S>(mut self, profiles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.active_profiles = profiles.into_iter().map(Into::into).collect();
        self
    }

    /// 追加默认环境的属性
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.push((key.into(), value.into()));
        self
    }

    /// 使用指定的资源加载器
    pub fn with_resource_loader(mut self, loader: Arc<dyn DefinitionResourceLoader>) -> Self {
        self.resource_loader = Some(loader);
        self
    }

    /// 使用指定的事件接收器
    pub fn with_event_sink(mut self, sink: Arc<dyn ReaderEventSink>) -> Self {
        self.event_sink = Some(sink);
        self
    }

    /// 使用指定的名称生成器
    pub fn with_name_generator(mut self, generator: Arc<dyn ComponentNameGenerator>) -> Self {
        self.name_generator = Some(generator);
        self
    }

    /// 注册命名空间处理器
    ///
    /// 处理器必须在任何解析开始之前注册完毕。
    pub fn register_namespace_handler(
        self,
        namespace: impl Into<String>,
        handler: Arc<dyn NamespaceHandler>,
    ) -> Self {
        self.namespace_handlers.register(namespace, handler);
        self
    }

    /// 设置注册表的覆盖策略
    pub fn allow_definition_overriding(mut self, allow: bool) -> Self {
        self.allow_overriding = Some(allow);
        self
    }

    /// 配置并初始化日志
    pub fn with_logging(mut self, config: LoggingConfig) -> Self {
        self.logging_config = Some(config);
        self
    }

    /// 构建解析会话
    pub fn build(self) -> StoreResult<RegistrySession> {
        // 只有明确配置了日志时才初始化, 避免测试环境重复初始化
        if let Some(config) = &self.logging_config {
            initialize_logging(config)?;
        }

        let registry: Arc<dyn DefinitionRegistry> = match self.registry {
            Some(registry) => registry,
            None => Arc::new(StandardDefinitionRegistry::new()),
        };
        if let Some(allow) = self.allow_overriding {
            registry.set_allow_definition_overriding(allow);
        }

        let environment: Arc<dyn Environment> = match self.environment {
            Some(environment) => environment,
            None => {
                let mut environment =
                    StandardEnvironment::new().with_active_profiles(self.active_profiles);
                for (key, value) in self.properties {
                    environment = environment.with_property(key, value);
                }
                Arc::new(environment)
            }
        };

        let resource_loader: Arc<dyn DefinitionResourceLoader> = match self.resource_loader {
            Some(loader) => loader,
            None => Arc::new(FileSystemResourceLoader::new(".")),
        };
        let event_sink: Arc<dyn ReaderEventSink> = match self.event_sink {
            Some(sink) => sink,
            None => Arc::new(LoggingReaderEventSink::new()),
        };
        let name_generator: Arc<dyn ComponentNameGenerator> = match self.name_generator {
            Some(generator) => generator,
            None => Arc::new(DefaultNameGenerator::new()),
        };

        let context = ReaderContext::new(
            registry,
            environment,
            resource_loader,
            event_sink,
            name_generator,
            self.namespace_handlers,
        );

        info!(session = %context.session_id, "解析会话构建完成");
        Ok(RegistrySession { context })
    }
}

impl Default for RegistrySessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// 解析会话
///
/// 持有会话上下文，按需创建两条路径的读取器。注册表在会话
/// 结束后继续存活，作为唯一的下游产出。
pub struct RegistrySession {
    context: ReaderContext,
}

impl RegistrySession {
    /// 会话上下文
    pub fn context(&self) -> &ReaderContext {
        &self.context
    }

    /// 目标注册表
    pub fn registry(&self) -> Arc<dyn DefinitionRegistry> {
        self.context.registry.clone()
    }

    /// 创建标记文档读取器
    pub fn markup_reader(&self) -> MarkupDefinitionReader<'_> {
        MarkupDefinitionReader::new(&self.context)
    }

    /// 创建注解类型读取器
    pub fn annotated_reader(&self) -> AnnotatedDefinitionReader<'_> {
        AnnotatedDefinitionReader::new(&self.context)
    }
}

/// 初始化日志系统
fn initialize_logging(config: &LoggingConfig) -> StoreResult<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(config.level)
        .with_target(config.show_target)
        .with_thread_ids(config.show_thread_ids)
        .with_file(config.show_file)
        .with_line_number(config.show_line_number);

    if config.json_format {
        subscriber.json().try_init()
    } else {
        subscriber.try_init()
    }
    .map_err(|e| DefinitionStoreError::Bootstrap {
        message: format!("日志初始化失败: {e}"),
    })?;

    debug!("日志系统初始化完成");
    Ok(())
}
