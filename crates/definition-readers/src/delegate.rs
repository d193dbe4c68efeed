//! 标记文档解析委托
//!
//! 把单个 `component` 元素解析为定义持有者，并维护文档级默认值。
//! 每个（可能嵌套的）文档元素各自创建一个委托，未声明的默认值
//! 沿父委托链向上回退，委托链随递归作用域自然展开与收拢。

use crate::annotation_config::{apply_common_metadata, CommonDefinitionHints};
use crate::support::tokenize_multi_value;
use registry_abstractions::ReaderContext;
use registry_common::{
    ComponentDefinition, ConstructorArg, DefinitionHolder, DefinitionStoreError,
    DocumentDefaults, Element, PropertyValue, Qualifier, TypeInfo,
};
use tracing::trace;

/// 组件元素标签
pub const COMPONENT_ELEMENT: &str = "component";
/// 名称属性（可携带多个名称，首个为规范名称，其余为别名）
pub const NAME_ATTRIBUTE: &str = "name";
/// 类型属性
pub const CLASS_ATTRIBUTE: &str = "class";
/// 作用域属性
pub const SCOPE_ATTRIBUTE: &str = "scope";
/// 延迟初始化属性
pub const LAZY_INIT_ATTRIBUTE: &str = "lazy-init";
/// 首选属性
pub const PRIMARY_ATTRIBUTE: &str = "primary";
/// 模板定义属性
pub const ABSTRACT_ATTRIBUTE: &str = "abstract";
/// 父模板属性
pub const PARENT_ATTRIBUTE: &str = "parent";
/// 依赖属性
pub const DEPENDS_ON_ATTRIBUTE: &str = "depends-on";
/// 初始化方法属性
pub const INIT_METHOD_ATTRIBUTE: &str = "init-method";
/// 销毁方法属性
pub const DESTROY_METHOD_ATTRIBUTE: &str = "destroy-method";
/// 启用开关属性
pub const ENABLED_ATTRIBUTE: &str = "enabled";
/// 文档默认延迟初始化属性
pub const DEFAULT_LAZY_INIT_ATTRIBUTE: &str = "default-lazy-init";
/// 文档默认初始化方法属性
pub const DEFAULT_INIT_METHOD_ATTRIBUTE: &str = "default-init-method";
/// 文档默认销毁方法属性
pub const DEFAULT_DESTROY_METHOD_ATTRIBUTE: &str = "default-destroy-method";
/// 回退到文档默认值的属性取值
pub const DEFAULT_VALUE: &str = "default";
/// 布尔属性的真值
pub const TRUE_VALUE: &str = "true";
/// 布尔属性的假值
pub const FALSE_VALUE: &str = "false";
/// 限定符子元素标签
pub const QUALIFIER_ELEMENT: &str = "qualifier";
/// 限定符种类属性
pub const TYPE_ATTRIBUTE: &str = "type";
/// 字面值属性
pub const VALUE_ATTRIBUTE: &str = "value";
/// 组件引用属性
pub const REF_ATTRIBUTE: &str = "ref";
/// 属性注入子元素标签
pub const PROPERTY_ELEMENT: &str = "property";
/// 构造参数子元素标签
pub const CONSTRUCTOR_ARG_ELEMENT: &str = "constructor-arg";
/// 构造参数序号属性
pub const INDEX_ATTRIBUTE: &str = "index";
/// 描述子元素标签
pub const DESCRIPTION_ELEMENT: &str = "description";

/// 标记文档解析委托
pub struct ParserDelegate<'a> {
    context: &'a ReaderContext,
    defaults: DocumentDefaults,
}

impl<'a> ParserDelegate<'a> {
    /// 创建新的解析委托
    pub fn new(context: &'a ReaderContext) -> Self {
        Self {
            context,
            defaults: DocumentDefaults::default(),
        }
    }

    /// 从文档根元素初始化默认值
    ///
    /// 未显式声明（或声明为 `default`）的项回退到父委托的取值，
    /// 嵌套文档由此继承外层默认值。
    pub fn init_defaults(&mut self, root: &Element, parent: Option<&ParserDelegate<'_>>) {
        self.defaults.lazy_init = match root.attribute(DEFAULT_LAZY_INIT_ATTRIBUTE) {
            Some(TRUE_VALUE) => Some(true),
            Some(FALSE_VALUE) => Some(false),
            _ => parent.and_then(|p| p.defaults.lazy_init),
        };
        self.defaults.init_method = root
            .attribute_non_empty(DEFAULT_INIT_METHOD_ATTRIBUTE)
            .map(str::to_string)
            .or_else(|| parent.and_then(|p| p.defaults.init_method.clone()));
        self.defaults.destroy_method = root
            .attribute_non_empty(DEFAULT_DESTROY_METHOD_ATTRIBUTE)
            .map(str::to_string)
            .or_else(|| parent.and_then(|p| p.defaults.destroy_method.clone()));

        self.context.event_sink.defaults_registered(&self.defaults);
    }

    /// 当前文档默认值
    pub fn defaults(&self) -> &DocumentDefaults {
        &self.defaults
    }

    /// 解析 `component` 元素为定义持有者
    ///
    /// 结构性错误上报到事件接收器并返回 `None`；`enabled="false"`
    /// 是公认的空操作，静默跳过。
    pub fn parse_component_element(&self, element: &Element) -> Option<DefinitionHolder> {
        if element.attribute(ENABLED_ATTRIBUTE) == Some(FALSE_VALUE) {
            trace!("component 元素已禁用, 跳过");
            return None;
        }

        let class_attr = element.attribute_non_empty(CLASS_ATTRIBUTE);
        let parent_attr = element.attribute_non_empty(PARENT_ATTRIBUTE);
        if class_attr.is_none() && parent_attr.is_none() {
            self.context.event_sink.report_error(
                "component 元素必须声明 class 或 parent 属性",
                &element.location,
                Some(&DefinitionStoreError::Structural {
                    attribute: CLASS_ATTRIBUTE.to_string(),
                    location: element.location.clone(),
                }),
            );
            return None;
        }

        let mut definition = ComponentDefinition::new(class_attr.map(TypeInfo::from_name));
        definition.source = element.location.clone();
        definition.parent_name = parent_attr.map(str::to_string);

        if let Some(scope) = element.attribute_non_empty(SCOPE_ATTRIBUTE) {
            definition.scope = scope.to_string();
        }
        definition.lazy_init = match element.attribute(LAZY_INIT_ATTRIBUTE) {
            Some(TRUE_VALUE) => Some(true),
            Some(FALSE_VALUE) => Some(false),
            _ => self.defaults.lazy_init,
        };
        definition.abstract_definition = element.attribute(ABSTRACT_ATTRIBUTE) == Some(TRUE_VALUE);
        definition.init_method = element
            .attribute_non_empty(INIT_METHOD_ATTRIBUTE)
            .map(str::to_string)
            .or_else(|| self.defaults.init_method.clone());
        definition.destroy_method = element
            .attribute_non_empty(DESTROY_METHOD_ATTRIBUTE)
            .map(str::to_string)
            .or_else(|| self.defaults.destroy_method.clone());

        self.parse_property_elements(element, &mut definition);
        self.parse_constructor_arg_elements(element, &mut definition);

        // 通用语义与注解路径共用同一处理函数
        let hints = CommonDefinitionHints {
            lazy_init: None,
            primary: element.attribute(PRIMARY_ATTRIBUTE) == Some(TRUE_VALUE),
            description: element
                .child(DESCRIPTION_ELEMENT)
                .and_then(|child| child.text.clone()),
            depends_on: element
                .attribute(DEPENDS_ON_ATTRIBUTE)
                .map(tokenize_multi_value)
                .unwrap_or_default(),
            role: definition.role,
            qualifiers: self.parse_qualifier_elements(element),
        };
        apply_common_metadata(&mut definition, &hints);

        let names = element
            .attribute_non_empty(NAME_ATTRIBUTE)
            .map(tokenize_multi_value)
            .unwrap_or_default();
        let (name, aliases) = match names.split_first() {
            Some((first, rest)) => (first.clone(), rest.to_vec()),
            None => (
                self.context
                    .name_generator
                    .generate(&definition, self.context.registry.as_ref()),
                Vec::new(),
            ),
        };

        Some(DefinitionHolder::new(name, definition).with_aliases(aliases))
    }

    /// 基于命名空间属性与子元素装饰定义持有者
    ///
    /// 逐个查找对应的命名空间处理器调用其装饰能力；装饰阶段的
    /// 未知命名空间与装饰失败都只上报，不中断解析。
    pub fn decorate_if_required(
        &self,
        element: &Element,
        mut holder: DefinitionHolder,
    ) -> DefinitionHolder {
        let namespaces: Vec<String> = element
            .attributes
            .keys()
            .filter_map(|key| key.split_once(':').map(|(prefix, _)| prefix.to_string()))
            .chain(
                element
                    .children
                    .iter()
                    .filter_map(|child| child.namespace().map(str::to_string)),
            )
            .collect();

        for namespace in namespaces {
            match self.context.namespace_handlers.resolve(&namespace) {
                Some(handler) => {
                    let fallback = holder.clone();
                    match handler.decorate(element, holder, self.context) {
                        Ok(decorated) => holder = decorated,
                        Err(error) => {
                            self.context.event_sink.report_error(
                                &format!("命名空间 {namespace} 的装饰处理失败"),
                                &element.location,
                                Some(&error),
                            );
                            holder = fallback;
                        }
                    }
                }
                None => {
                    self.context.event_sink.report_error(
                        &format!("装饰阶段没有命名空间 {namespace} 的处理器"),
                        &element.location,
                        None,
                    );
                }
            }
        }
        holder
    }

    fn parse_qualifier_elements(&self, element: &Element) -> Vec<Qualifier> {
        let mut qualifiers = Vec::new();
        for child in element.children_named(QUALIFIER_ELEMENT) {
            match child.attribute_non_empty(TYPE_ATTRIBUTE) {
                Some(kind) => {
                    let mut qualifier = Qualifier::new(kind);
                    if let Some(value) = child.attribute_non_empty(VALUE_ATTRIBUTE) {
                        qualifier = qualifier.with_value(value);
                    }
                    qualifiers.push(qualifier);
                }
                None => {
                    self.context.event_sink.report_error(
                        "qualifier 元素缺少 type 属性",
                        &child.location,
                        Some(&DefinitionStoreError::Structural {
                            attribute: TYPE_ATTRIBUTE.to_string(),
                            location: child.location.clone(),
                        }),
                    );
                }
            }
        }
        qualifiers
    }

    fn parse_property_elements(&self, element: &Element, definition: &mut ComponentDefinition) {
        for child in element.children_named(PROPERTY_ELEMENT) {
            let Some(name) = child.attribute_non_empty(NAME_ATTRIBUTE) else {
                self.context.event_sink.report_error(
                    "property 元素缺少 name 属性",
                    &child.location,
                    Some(&DefinitionStoreError::Structural {
                        attribute: NAME_ATTRIBUTE.to_string(),
                        location: child.location.clone(),
                    }),
                );
                continue;
            };
            definition.property_values.push(PropertyValue {
                name: name.to_string(),
                value: child.attribute(VALUE_ATTRIBUTE).map(str::to_string),
                reference: child.attribute(REF_ATTRIBUTE).map(str::to_string),
            });
        }
    }

    fn parse_constructor_arg_elements(
        &self,
        element: &Element,
        definition: &mut ComponentDefinition,
    ) {
        for child in element.children_named(CONSTRUCTOR_ARG_ELEMENT) {
            definition.constructor_args.push(ConstructorArg {
                index: child
                    .attribute(INDEX_ATTRIBUTE)
                    .and_then(|value| value.parse().ok()),
                value: child.attribute(VALUE_ATTRIBUTE).map(str::to_string),
                reference: child.attribute(REF_ATTRIBUTE).map(str::to_string),
            });
        }
    }
}
