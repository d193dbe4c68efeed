//! # Registry Common
//!
//! 组件注册框架的公共数据模型层。
//!
//! ## 核心类型
//!
//! - [`ComponentDefinition`] - 组件定义，配置的基本单元
//! - [`DefinitionHolder`] - 组件定义与注册名称、别名的组合
//! - [`TypeInfo`] - 宿主类型的不透明引用
//! - [`Element`] - 层级化标记文档的元素树
//! - [`ScopeMetadata`] - 作用域元信息
//!
//! ## 设计原则
//!
//! - 定义在注册后不可变，覆盖注册是唯一的例外
//! - 错误类型按关注点划分，一个关注点一个枚举
//! - 数据模型不依赖任何解析或注册逻辑

pub mod definition;
pub mod element;
pub mod errors;
pub mod events;
pub mod metadata;
pub mod scope;

pub use definition::*;
pub use element::*;
pub use errors::*;
pub use events::*;
pub use metadata::*;
pub use scope::*;
