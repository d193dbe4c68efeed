//! 命名空间扩展抽象接口
//!
//! 解析器自身词汇之外的元素按命名空间分发给可插拔的处理器。
//! 处理器在解析开始之前注册，解析期间按元素的命名空间前缀查找。

use crate::context::ReaderContext;
use dashmap::DashMap;
use registry_common::{DefinitionHolder, Element, StoreResult};
use std::sync::Arc;
use tracing::debug;

/// 命名空间处理器 trait
pub trait NamespaceHandler: Send + Sync {
    /// 解析命名空间下的元素，直接完成零个或多个注册
    ///
    /// 返回本次注册的定义数量。
    fn parse(&self, element: &Element, context: &ReaderContext) -> StoreResult<usize>;

    /// 基于命名空间属性或子元素装饰既有的定义持有者
    ///
    /// 默认实现原样返回。
    fn decorate(
        &self,
        element: &Element,
        holder: DefinitionHolder,
        context: &ReaderContext,
    ) -> StoreResult<DefinitionHolder> {
        let _ = (element, context);
        Ok(holder)
    }
}

/// 命名空间处理器解析表
///
/// 命名空间标识到处理器的并发映射。注册发生在任何解析开始之前，
/// 解析期间只有读取。
#[derive(Default)]
pub struct NamespaceHandlerResolver {
    handlers: DashMap<String, Arc<dyn NamespaceHandler>>,
}

impl NamespaceHandlerResolver {
    /// 创建空的解析表
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册命名空间处理器
    pub fn register(&self, namespace: impl Into<String>, handler: Arc<dyn NamespaceHandler>) {
        let namespace = namespace.into();
        debug!("注册命名空间处理器: {}", namespace);
        self.handlers.insert(namespace, handler);
    }

    /// 按命名空间查找处理器
    pub fn resolve(&self, namespace: &str) -> Option<Arc<dyn NamespaceHandler>> {
        self.handlers.get(namespace).map(|entry| entry.value().clone())
    }

    /// 已注册的命名空间列表
    pub fn registered_namespaces(&self) -> Vec<String> {
        self.handlers.iter().map(|e| e.key().clone()).collect()
    }
}
