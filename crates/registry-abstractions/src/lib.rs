//! # Registry Abstractions
//!
//! 组件注册框架的抽象层，定义注册表、环境、资源加载、条件评估
//! 与命名空间扩展的核心接口。
//!
//! ## 核心接口
//!
//! - [`DefinitionRegistry`] - 组件定义注册表接口
//! - [`Environment`] - 激活环境接口（profile 判定与占位符解析）
//! - [`DefinitionResourceLoader`] - 定义资源加载接口
//! - [`Condition`] - 注册条件接口
//! - [`NamespaceHandler`] - 命名空间扩展解析接口
//! - [`ReaderEventSink`] - 解析错误与事件接收接口
//! - [`ComponentAnnotations`] - 注解组件的声明元数据接口

pub mod annotations;
pub mod condition;
pub mod context;
pub mod environment;
pub mod loader;
pub mod namespace;
pub mod naming;
pub mod registry;
pub mod scope;
pub mod sink;

pub use annotations::*;
pub use condition::*;
pub use context::*;
pub use environment::*;
pub use loader::*;
pub use namespace::*;
pub use naming::*;
pub use registry::*;
pub use scope::*;
pub use sink::*;
