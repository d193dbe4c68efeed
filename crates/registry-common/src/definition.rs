//! 组件定义数据模型
//!
//! 提供组件配置的基本单元 [`ComponentDefinition`] 及其注册包装
//! [`DefinitionHolder`]

use crate::metadata::TypeInfo;
use crate::scope::SCOPE_SINGLETON;
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// 实例提供函数类型
///
/// 注解路径注册组件时可附带的工厂回调，由下游实例化引擎调用。
pub type InstanceSupplier = Arc<dyn Fn() -> Box<dyn Any + Send + Sync> + Send + Sync>;

/// 定义定制回调类型
///
/// 注册前按顺序应用，后执行的定制器可以观察到先执行者的修改。
pub type DefinitionCustomizer = Box<dyn Fn(&mut ComponentDefinition) + Send + Sync>;

/// 限定符
///
/// (种类, 可选值) 对，用于歧义注入候选的筛选。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Qualifier {
    /// 限定符种类
    pub kind: String,
    /// 限定符值
    pub value: Option<String>,
}

impl Qualifier {
    /// 创建新的限定符
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            value: None,
        }
    }

    /// 设置限定符值
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

/// 定义角色
///
/// 区分应用组件与框架自身的支撑组件
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DefinitionRole {
    /// 应用组件
    #[default]
    Application,
    /// 支撑组件
    Support,
    /// 框架内部组件
    Infrastructure,
}

/// 属性注入元数据
///
/// 由解析委托收集，本层不解释其含义，交由下游装配引擎消费。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyValue {
    /// 属性名称
    pub name: String,
    /// 字面值
    pub value: Option<String>,
    /// 引用的组件名称
    pub reference: Option<String>,
}

/// 构造参数元数据
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorArg {
    /// 参数序号
    pub index: Option<usize>,
    /// 字面值
    pub value: Option<String>,
    /// 引用的组件名称
    pub reference: Option<String>,
}

/// 源位置信息
///
/// 定义的来源描述，仅用于诊断输出。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceLocation {
    /// 来源资源位置
    pub resource: Option<String>,
    /// 资源内的细节描述（元素路径、类型名等）
    pub detail: Option<String>,
}

impl SourceLocation {
    /// 创建新的源位置信息
    pub fn new(resource: Option<String>, detail: impl Into<String>) -> Self {
        Self {
            resource,
            detail: Some(detail.into()),
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.resource, &self.detail) {
            (Some(resource), Some(detail)) => write!(f, "{resource}: {detail}"),
            (Some(resource), None) => write!(f, "{resource}"),
            (None, Some(detail)) => write!(f, "{detail}"),
            (None, None) => write!(f, "<unknown>"),
        }
    }
}

/// 组件定义
///
/// 单个组件的全部配置元数据。定义只在自身构建阶段和注册前的
/// 装饰阶段可变，进入注册表之后视为不可变，覆盖注册是唯一例外。
#[derive(Clone)]
pub struct ComponentDefinition {
    /// 组件类型引用（模板定义可以只声明父定义而省略类型）
    pub class_ref: Option<TypeInfo>,
    /// 作用域名称
    pub scope: String,
    /// 延迟初始化标志，`None` 表示继承文档默认值
    pub lazy_init: Option<bool>,
    /// 是否为歧义查找时的首选组件
    pub primary: bool,
    /// 是否为模板定义（不直接实例化）
    pub abstract_definition: bool,
    /// 限定符集合
    pub qualifiers: Vec<Qualifier>,
    /// 开放属性包，供定制器与命名空间装饰器使用
    pub attributes: BTreeMap<String, String>,
    /// 组件描述
    pub description: Option<String>,
    /// 初始化前必须就绪的组件名称
    pub depends_on: Vec<String>,
    /// 定义角色
    pub role: DefinitionRole,
    /// 初始化回调方法名
    pub init_method: Option<String>,
    /// 销毁回调方法名
    pub destroy_method: Option<String>,
    /// 父模板定义名称（只读引用，合并发生在下游）
    pub parent_name: Option<String>,
    /// 属性注入元数据
    pub property_values: Vec<PropertyValue>,
    /// 构造参数元数据
    pub constructor_args: Vec<ConstructorArg>,
    /// 实例提供函数
    pub instance_supplier: Option<InstanceSupplier>,
    /// 作用域代理包装时嵌套的原始定义
    pub decorated_target: Option<Box<DefinitionHolder>>,
    /// 源位置信息
    pub source: SourceLocation,
}

impl ComponentDefinition {
    /// 创建新的组件定义
    pub fn new(class_ref: Option<TypeInfo>) -> Self {
        Self {
            class_ref,
            scope: SCOPE_SINGLETON.to_string(),
            lazy_init: None,
            primary: false,
            abstract_definition: false,
            qualifiers: Vec::new(),
            attributes: BTreeMap::new(),
            description: None,
            depends_on: Vec::new(),
            role: DefinitionRole::default(),
            init_method: None,
            destroy_method: None,
            parent_name: None,
            property_values: Vec::new(),
            constructor_args: Vec::new(),
            instance_supplier: None,
            decorated_target: None,
            source: SourceLocation::default(),
        }
    }

    /// 从类型创建组件定义
    pub fn of_type<T: 'static>() -> Self {
        Self::new(Some(TypeInfo::of::<T>()))
    }

    /// 设置作用域
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    /// 设置延迟初始化
    pub fn with_lazy_init(mut self, lazy: bool) -> Self {
        self.lazy_init = Some(lazy);
        self
    }

    /// 设置首选标志
    pub fn with_primary(mut self, primary: bool) -> Self {
        self.primary = primary;
        self
    }

    /// 设置源位置
    pub fn with_source(mut self, source: SourceLocation) -> Self {
        self.source = source;
        self
    }

    /// 追加限定符；同种类的限定符只记录一次
    pub fn add_qualifier(&mut self, qualifier: Qualifier) {
        if !self.qualifiers.iter().any(|q| q.kind == qualifier.kind) {
            self.qualifiers.push(qualifier);
        }
    }

    /// 设置开放属性
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// 读取开放属性
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// 延迟初始化的最终取值（未声明时为非延迟）
    pub fn is_lazy_init(&self) -> bool {
        self.lazy_init.unwrap_or(false)
    }

    /// 类型名称，缺省时退化到父定义名称
    pub fn type_name(&self) -> Option<&str> {
        self.class_ref.as_ref().map(|t| t.name.as_str())
    }
}

impl fmt::Debug for ComponentDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentDefinition")
            .field("class_ref", &self.class_ref)
            .field("scope", &self.scope)
            .field("lazy_init", &self.lazy_init)
            .field("primary", &self.primary)
            .field("abstract_definition", &self.abstract_definition)
            .field("qualifiers", &self.qualifiers)
            .field("attributes", &self.attributes)
            .field("depends_on", &self.depends_on)
            .field("parent_name", &self.parent_name)
            .field(
                "instance_supplier",
                &self.instance_supplier.as_ref().map(|_| "<function>"),
            )
            .field("decorated_target", &self.decorated_target)
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

/// 组件定义持有者
///
/// 解析单元的最终产物：定义、注册名称与零个或多个别名。
/// 注册表消费后即丢弃，名称与别名分别落入两张映射。
#[derive(Debug, Clone)]
pub struct DefinitionHolder {
    /// 注册名称
    pub name: String,
    /// 别名列表
    pub aliases: Vec<String>,
    /// 组件定义
    pub definition: ComponentDefinition,
}

impl DefinitionHolder {
    /// 创建新的定义持有者
    pub fn new(name: impl Into<String>, definition: ComponentDefinition) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            definition,
        }
    }

    /// 设置别名列表
    pub fn with_aliases(mut self, aliases: Vec<String>) -> Self {
        self.aliases = aliases;
        self
    }
}
