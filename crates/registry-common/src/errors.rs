//! 错误类型定义

use crate::definition::SourceLocation;
use thiserror::Error;

/// 注册表错误类型
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("组件名称已被注册且不允许覆盖: {name}")]
    DuplicateName { name: String },

    #[error("别名冲突: {alias}, 原因: {message}")]
    AliasConflict { alias: String, message: String },

    #[error("未找到组件定义: {name}")]
    NotFound { name: String },

    #[error("组件定义无效: {message}")]
    InvalidDefinition { message: String },
}

/// 定义读取管线错误类型
#[derive(Error, Debug)]
pub enum DefinitionStoreError {
    #[error("标记元素缺少必需属性: {attribute} ({location})")]
    Structural {
        attribute: String,
        location: SourceLocation,
    },

    #[error("资源加载失败: {location}, 原因: {message}")]
    Resource { location: String, message: String },

    #[error("文档格式无效: {location}, 原因: {message}")]
    Document { location: String, message: String },

    #[error("未注册的命名空间处理器: {namespace} ({location})")]
    UnknownNamespace {
        namespace: String,
        location: SourceLocation,
    },

    #[error("解析会话构建失败: {message}")]
    Bootstrap { message: String },

    #[error("环境错误: {source}")]
    Environment {
        #[from]
        source: EnvironmentError,
    },

    #[error("注册表错误: {source}")]
    Registry {
        #[from]
        source: RegistryError,
    },
}

/// 环境错误类型
#[derive(Error, Debug)]
pub enum EnvironmentError {
    #[error("占位符无法解析: {placeholder}, 原文: {text}")]
    UnresolvedPlaceholder { placeholder: String, text: String },
}

/// 结果类型别名
pub type RegistryResult<T> = Result<T, RegistryError>;
pub type StoreResult<T> = Result<T, DefinitionStoreError>;
pub type EnvironmentResult<T> = Result<T, EnvironmentError>;
