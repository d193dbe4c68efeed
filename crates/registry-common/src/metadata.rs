//! 类型元数据定义
//!
//! 提供组件宿主类型的不透明引用

use std::any::TypeId;

/// 类型信息
///
/// 对宿主类型的不透明引用。标记文档中声明的组件只有类型名称，
/// 由注解路径注册的组件额外携带 [`TypeId`]。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeInfo {
    /// 类型名称
    pub name: String,
    /// 类型ID（仅注解路径可用）
    pub id: Option<TypeId>,
    /// 模块路径
    pub module_path: String,
}

impl TypeInfo {
    /// 从类型获取类型信息
    pub fn of<T: 'static>() -> Self {
        Self {
            name: std::any::type_name::<T>()
                .split("::")
                .last()
                .unwrap_or("Unknown")
                .to_string(),
            id: Some(TypeId::of::<T>()),
            module_path: std::any::type_name::<T>().to_string(),
        }
    }

    /// 从类型名称创建类型信息（用于标记文档）
    pub fn from_name(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            module_path: name.clone(),
            name,
            id: None,
        }
    }

    /// 获取简短的类型名称（不包含模块路径）
    pub fn short_name(&self) -> &str {
        self.name.split("::").last().unwrap_or(&self.name)
    }
}
