//! # Definition Readers
//!
//! 组件定义的两条注册路径：标记文档解析与注解类型注册。
//! 两条路径相互独立，最终都汇入同一个定义注册表，并共用
//! 通用注解处理与作用域解析逻辑。
//!
//! ## 主要类型
//!
//! - [`MarkupDefinitionReader`] - 标记文档定义读取器，支持嵌套文档、
//!   导入解析、别名注册与命名空间扩展分发
//! - [`AnnotatedDefinitionReader`] - 注解类型定义读取器
//! - [`ParserDelegate`] - 文档元素到定义持有者的解析委托
//! - [`RegistrySessionBuilder`] - 解析会话构建器
//!
//! ## 基本使用
//!
//! ```rust,no_run
//! use definition_readers::RegistrySessionBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let session = RegistrySessionBuilder::new()
//!         .with_active_profiles(["dev"])
//!         .build()?;
//!
//!     let loaded = session.markup_reader().load_definitions("components.toml")?;
//!     println!("加载 {} 个组件定义", loaded.count);
//!     Ok(())
//! }
//! ```

pub mod annotated_reader;
pub mod annotation_config;
pub mod builder;
pub mod delegate;
mod macros;
pub mod markup_reader;
pub mod support;

pub use annotated_reader::*;
pub use annotation_config::*;
pub use builder::*;
pub use delegate::*;
pub use markup_reader::*;
pub use support::*;

// 重新导出抽象层与数据模型，调用方通常只需要依赖本 crate
pub use registry_abstractions::*;
pub use registry_common::*;
