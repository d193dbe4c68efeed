//! 标记文档元素树
//!
//! 层级化标记文档的抽象表示。具体文件格式（JSON/TOML/YAML）由
//! 资源加载层转换为这里的 [`Element`] 树，解析器只面对元素树工作。

use crate::definition::SourceLocation;
use std::collections::BTreeMap;

/// 标记文档元素
///
/// 元素标签中 `:` 之前的前缀是命名空间标识，没有前缀的元素属于
/// 默认命名空间。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// 元素标签（可能带命名空间前缀，如 `tx:advice`）
    pub tag: String,
    /// 属性集合
    pub attributes: BTreeMap<String, String>,
    /// 子元素列表（文档顺序）
    pub children: Vec<Element>,
    /// 文本内容
    pub text: Option<String>,
    /// 源位置信息
    pub location: SourceLocation,
}

impl Element {
    /// 创建新的元素
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// 设置属性
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// 追加子元素
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// 设置文本内容
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// 读取属性值
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// 读取非空属性值
    pub fn attribute_non_empty(&self, name: &str) -> Option<&str> {
        self.attribute(name).filter(|v| !v.trim().is_empty())
    }

    /// 元素的命名空间前缀
    pub fn namespace(&self) -> Option<&str> {
        self.tag.split_once(':').map(|(prefix, _)| prefix)
    }

    /// 元素的本地名称（去掉命名空间前缀）
    pub fn local_name(&self) -> &str {
        self.tag
            .split_once(':')
            .map_or(self.tag.as_str(), |(_, local)| local)
    }

    /// 是否属于默认命名空间
    pub fn is_default_namespace(&self) -> bool {
        self.namespace().is_none()
    }

    /// 查找第一个指定本地名称的子元素
    pub fn child(&self, local_name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.local_name() == local_name)
    }

    /// 遍历指定本地名称的子元素
    pub fn children_named<'a>(
        &'a self,
        local_name: &'a str,
    ) -> impl Iterator<Item = &'a Element> + 'a {
        self.children
            .iter()
            .filter(move |c| c.local_name() == local_name)
    }
}

/// 标记文档
///
/// 元素树的根加上文档自身的位置，位置用于相对导入的解析。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupDocument {
    /// 根元素
    pub root: Element,
    /// 文档位置
    pub location: Option<String>,
}

impl MarkupDocument {
    /// 创建新的标记文档
    pub fn new(root: Element, location: Option<String>) -> Self {
        Self { root, location }
    }
}

/// 文档级默认值
///
/// 根元素上声明的 `default-*` 属性。嵌套文档未声明的项
/// 沿父委托链向上回退。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentDefaults {
    /// 默认延迟初始化
    pub lazy_init: Option<bool>,
    /// 默认初始化方法名
    pub init_method: Option<String>,
    /// 默认销毁方法名
    pub destroy_method: Option<String>,
}
