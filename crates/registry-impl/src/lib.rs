//! # Registry Impl
//!
//! 组件注册框架抽象接口的默认实现。
//!
//! ## 主要实现
//!
//! - [`StandardDefinitionRegistry`] - 基于内部读写锁的标准注册表
//! - [`StandardEnvironment`] - profile 集合与属性表组成的标准环境
//! - [`DefaultNameGenerator`] - 类型短名称派生的名称生成器
//! - [`AnnotationScopeResolver`] - 默认作用域元信息解析器
//! - [`ConditionEvaluator`] - 注册条件评估器
//! - [`InMemoryResourceLoader`] / [`FileSystemResourceLoader`] - 定义资源加载器

pub mod condition;
pub mod environment;
pub mod loaders;
pub mod naming;
pub mod registry;
pub mod scope;
pub mod sinks;

pub use condition::*;
pub use environment::*;
pub use loaders::*;
pub use naming::*;
pub use registry::*;
pub use scope::*;
pub use sinks::*;
