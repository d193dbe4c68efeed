//! 定义资源加载器实现
//!
//! 把 JSON/TOML/YAML 文档统一转换为标记元素树。各格式先转换为
//! `serde_json::Value` 再进入同一套元素转换逻辑。

use dashmap::DashMap;
use registry_abstractions::{DefinitionResourceLoader, LocationKind};
use registry_common::{
    DefinitionStoreError, Element, MarkupDocument, SourceLocation, StoreResult,
};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// 文档对象里标识元素标签的键
const ELEMENT_KEY: &str = "element";
/// 文档对象里承载子元素数组的键
const CHILDREN_KEY: &str = "children";
/// 文档对象里承载文本内容的键
const TEXT_KEY: &str = "text";

fn document_error(location: Option<&str>, message: impl Into<String>) -> DefinitionStoreError {
    DefinitionStoreError::Document {
        location: location.unwrap_or("<inline>").to_string(),
        message: message.into(),
    }
}

fn scalar_to_string(value: &Value) -> Result<Option<String>, ()> {
    match value {
        Value::String(s) => Ok(Some(s.clone())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Null => Ok(None),
        Value::Array(_) | Value::Object(_) => Err(()),
    }
}

fn element_from_object(
    tag: &str,
    object: &serde_json::Map<String, Value>,
    resource: Option<&str>,
) -> StoreResult<Element> {
    let mut element = Element::new(tag);
    element.location = SourceLocation::new(resource.map(str::to_string), format!("<{tag}>"));

    for (key, value) in object {
        match key.as_str() {
            ELEMENT_KEY => {}
            TEXT_KEY => {
                element.text = Some(
                    value
                        .as_str()
                        .ok_or_else(|| document_error(resource, "text 内容必须是字符串"))?
                        .to_string(),
                );
            }
            CHILDREN_KEY => {
                let items = value
                    .as_array()
                    .ok_or_else(|| document_error(resource, "children 必须是数组"))?;
                for item in items {
                    let child = item.as_object().ok_or_else(|| {
                        document_error(resource, "子元素必须是对象")
                    })?;
                    let child_tag = child
                        .get(ELEMENT_KEY)
                        .and_then(Value::as_str)
                        .ok_or_else(|| document_error(resource, "子元素缺少 element 标签"))?;
                    element
                        .children
                        .push(element_from_object(child_tag, child, resource)?);
                }
            }
            _ => match scalar_to_string(value) {
                Ok(Some(text)) => {
                    element.attributes.insert(key.clone(), text);
                }
                Ok(None) => {}
                Err(()) => {
                    return Err(document_error(
                        resource,
                        format!("属性 {key} 的值必须是标量"),
                    ));
                }
            },
        }
    }

    Ok(element)
}

/// 把 JSON 值转换为标记文档
///
/// 文档根必须是单键对象，键名就是根元素标签。
pub fn document_from_json_value(
    value: &Value,
    location: Option<&str>,
) -> StoreResult<MarkupDocument> {
    let object = value
        .as_object()
        .ok_or_else(|| document_error(location, "文档根必须是对象"))?;
    if object.len() != 1 {
        return Err(document_error(location, "文档根必须是单键对象"));
    }
    let (tag, body) = object.iter().next().expect("已校验长度为 1");
    let body = body
        .as_object()
        .ok_or_else(|| document_error(location, "根元素必须是对象"))?;
    let root = element_from_object(tag, body, location)?;
    Ok(MarkupDocument::new(root, location.map(str::to_string)))
}

/// 把 TOML 值转换为 JSON 值
pub fn toml_value_to_json(value: &toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s.clone()),
        toml::Value::Integer(i) => Value::Number(serde_json::Number::from(*i)),
        toml::Value::Float(f) => Value::Number(
            serde_json::Number::from_f64(*f).unwrap_or_else(|| serde_json::Number::from(0)),
        ),
        toml::Value::Boolean(b) => Value::Bool(*b),
        toml::Value::Array(items) => Value::Array(items.iter().map(toml_value_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .iter()
                .map(|(k, v)| (k.clone(), toml_value_to_json(v)))
                .collect(),
        ),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
    }
}

/// 内存定义资源加载器
///
/// 位置到元素树的并发映射，面向测试与内嵌文档场景。
#[derive(Default)]
pub struct InMemoryResourceLoader {
    documents: DashMap<String, Element>,
}

impl InMemoryResourceLoader {
    /// 创建空的内存加载器
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记文档
    pub fn add_document(&self, location: impl Into<String>, root: Element) {
        self.documents.insert(location.into(), root);
    }

    /// 登记文档并返回自身，便于链式构建
    pub fn with_document(self, location: impl Into<String>, root: Element) -> Self {
        self.add_document(location, root);
        self
    }
}

impl DefinitionResourceLoader for InMemoryResourceLoader {
    fn load_document(&self, location: &str) -> StoreResult<MarkupDocument> {
        match self.documents.get(location) {
            Some(root) => Ok(MarkupDocument::new(
                root.clone(),
                Some(location.to_string()),
            )),
            None => Err(DefinitionStoreError::Resource {
                location: location.to_string(),
                message: "资源不存在".to_string(),
            }),
        }
    }

    fn resolve_relative(&self, base: &str, path: &str) -> String {
        match base.rfind('/') {
            Some(index) => format!("{}/{}", &base[..index], path),
            None => path.to_string(),
        }
    }

    fn resource_exists(&self, location: &str) -> bool {
        self.documents.contains_key(location)
    }

    fn classify(&self, location: &str) -> LocationKind {
        if location.trim().is_empty() {
            return LocationKind::Unresolvable;
        }
        if location.contains("://") || location.starts_with('/') {
            return LocationKind::Absolute;
        }
        LocationKind::Relative
    }
}

/// 文件系统定义资源加载器
///
/// 相对位置基于配置的根目录解析；按扩展名选择 JSON/TOML/YAML
/// 解析器；绝对位置支持 glob 模式展开。
#[derive(Debug, Clone)]
pub struct FileSystemResourceLoader {
    base_dir: PathBuf,
}

impl FileSystemResourceLoader {
    /// 以指定根目录创建加载器
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    fn absolute_path(&self, location: &str) -> PathBuf {
        let stripped = location.strip_prefix("file:").unwrap_or(location);
        let path = Path::new(stripped);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

impl DefinitionResourceLoader for FileSystemResourceLoader {
    fn load_document(&self, location: &str) -> StoreResult<MarkupDocument> {
        let path = self.absolute_path(location);
        debug!("加载定义文档: {}", path.display());

        let content =
            std::fs::read_to_string(&path).map_err(|e| DefinitionStoreError::Resource {
                location: location.to_string(),
                message: e.to_string(),
            })?;

        let extension = path
            .extension()
            .and_then(std::ffi::OsStr::to_str)
            .unwrap_or("");
        let value = match extension {
            "json" => serde_json::from_str::<Value>(&content)
                .map_err(|e| document_error(Some(location), e.to_string()))?,
            "toml" => {
                let parsed = toml::from_str::<toml::Value>(&content)
                    .map_err(|e| document_error(Some(location), e.to_string()))?;
                toml_value_to_json(&parsed)
            }
            "yaml" | "yml" => {
                let parsed = serde_yaml::from_str::<serde_yaml::Value>(&content)
                    .map_err(|e| document_error(Some(location), e.to_string()))?;
                serde_json::to_value(parsed)
                    .map_err(|e| document_error(Some(location), e.to_string()))?
            }
            other => {
                return Err(document_error(
                    Some(location),
                    format!("不支持的文档格式: {other}"),
                ));
            }
        };

        document_from_json_value(&value, Some(location))
    }

    fn resolve_relative(&self, base: &str, path: &str) -> String {
        Path::new(base).parent().map_or_else(
            || path.to_string(),
            |parent| parent.join(path).to_string_lossy().into_owned(),
        )
    }

    fn resource_exists(&self, location: &str) -> bool {
        self.absolute_path(location).exists()
    }

    fn classify(&self, location: &str) -> LocationKind {
        if location.trim().is_empty() {
            return LocationKind::Unresolvable;
        }
        if location.starts_with("file:")
            || location.contains("://")
            || Path::new(location).is_absolute()
        {
            return LocationKind::Absolute;
        }
        LocationKind::Relative
    }

    fn expand_pattern(&self, location: &str) -> StoreResult<Vec<String>> {
        if !location.contains(['*', '?', '[']) {
            return Ok(vec![location.to_string()]);
        }

        let pattern = self.absolute_path(location).to_string_lossy().into_owned();
        let entries = glob::glob(&pattern).map_err(|e| DefinitionStoreError::Resource {
            location: location.to_string(),
            message: e.to_string(),
        })?;

        let mut locations = Vec::new();
        for entry in entries {
            match entry {
                Ok(path) => locations.push(path.to_string_lossy().into_owned()),
                Err(e) => warn!("模式展开时跳过不可读条目: {}", e),
            }
        }
        // 目录遍历顺序不稳定，排序保证重复运行结果一致
        locations.sort();
        Ok(locations)
    }
}
