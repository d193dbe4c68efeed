//! 解析会话上下文

use crate::environment::Environment;
use crate::loader::DefinitionResourceLoader;
use crate::namespace::NamespaceHandlerResolver;
use crate::naming::ComponentNameGenerator;
use crate::registry::DefinitionRegistry;
use crate::sink::ReaderEventSink;
use std::sync::Arc;
use uuid::Uuid;

/// 解析会话上下文
///
/// 两条注册路径共享的会话级状态：目标注册表、激活环境、资源
/// 加载器、事件接收器、名称生成器与命名空间处理器表。由发起
/// 会话的一方持有，以引用传入每个解析操作；单个会话内不存在
/// 并发修改。
pub struct ReaderContext {
    /// 目标注册表
    pub registry: Arc<dyn DefinitionRegistry>,
    /// 激活环境
    pub environment: Arc<dyn Environment>,
    /// 资源加载器
    pub resource_loader: Arc<dyn DefinitionResourceLoader>,
    /// 错误与事件接收器
    pub event_sink: Arc<dyn ReaderEventSink>,
    /// 名称生成器
    pub name_generator: Arc<dyn ComponentNameGenerator>,
    /// 命名空间处理器表
    pub namespace_handlers: NamespaceHandlerResolver,
    /// 会话标识，用于日志关联
    pub session_id: Uuid,
}

impl ReaderContext {
    /// 创建新的解析会话上下文
    pub fn new(
        registry: Arc<dyn DefinitionRegistry>,
        environment: Arc<dyn Environment>,
        resource_loader: Arc<dyn DefinitionResourceLoader>,
        event_sink: Arc<dyn ReaderEventSink>,
        name_generator: Arc<dyn ComponentNameGenerator>,
        namespace_handlers: NamespaceHandlerResolver,
    ) -> Self {
        Self {
            registry,
            environment,
            resource_loader,
            event_sink,
            name_generator,
            namespace_handlers,
            session_id: Uuid::new_v4(),
        }
    }
}
