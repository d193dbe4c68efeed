//! 标记文档定义读取器
//!
//! 对单棵文档树的顺序状态机，遇到嵌套文档元素时递归进入自身。
//! 兄弟元素的处理顺序就是文档顺序，这是正确性要求：导入必须在
//! 后续元素引用其效果之前生效，同名的后注册定义也要能观察到
//! 先注册者以做出覆盖决策。

use crate::delegate::{ParserDelegate, COMPONENT_ELEMENT, NAME_ATTRIBUTE};
use crate::support::{apply_relative_path, register_definition_holder, tokenize_multi_value};
use registry_abstractions::{LoadedDefinitions, LocationKind, ReaderContext};
use registry_common::{DefinitionStoreError, Element, MarkupDocument, StoreResult};
use std::cell::RefCell;
use std::collections::HashSet;
use tracing::{debug, info, trace};

/// 文档根元素标签（同名的子元素按嵌套文档递归处理）
pub const DOCUMENT_ELEMENT: &str = "components";
/// 导入元素标签
pub const IMPORT_ELEMENT: &str = "import";
/// 别名元素标签
pub const ALIAS_ELEMENT: &str = "alias";
/// 导入资源属性
pub const RESOURCE_ATTRIBUTE: &str = "resource";
/// 别名元素的别名属性
pub const ALIAS_ATTRIBUTE: &str = "alias";
/// 文档的 profile 限制属性
pub const PROFILE_ATTRIBUTE: &str = "profile";

/// 解析钩子函数类型
///
/// 前置与后置处理的扩展点，默认不挂接任何钩子。
pub type ElementHook = Box<dyn Fn(&Element, &ReaderContext) + Send + Sync>;

/// 标记文档定义读取器
pub struct MarkupDefinitionReader<'a> {
    context: &'a ReaderContext,
    pre_processor: Option<ElementHook>,
    post_processor: Option<ElementHook>,
    /// 正在加载的资源集合，阻止循环导入
    loading: RefCell<HashSet<String>>,
}

impl<'a> MarkupDefinitionReader<'a> {
    /// 创建新的标记文档读取器
    pub fn new(context: &'a ReaderContext) -> Self {
        Self {
            context,
            pre_processor: None,
            post_processor: None,
            loading: RefCell::new(HashSet::new()),
        }
    }

    /// 挂接前置处理钩子
    pub fn with_pre_processor(mut self, hook: ElementHook) -> Self {
        self.pre_processor = Some(hook);
        self
    }

    /// 挂接后置处理钩子
    pub fn with_post_processor(mut self, hook: ElementHook) -> Self {
        self.post_processor = Some(hook);
        self
    }

    /// 注册文档中的全部定义
    ///
    /// 返回本次调用新增的定义数量。非致命的逐元素错误上报后继续
    /// 处理兄弟元素，只有未注册命名空间会中止所在子树并向外传播。
    pub fn register_definitions(&self, document: &MarkupDocument) -> StoreResult<usize> {
        let before = self.context.registry.definition_count();
        info!(
            session = %self.context.session_id,
            "开始解析定义文档: {}",
            document.location.as_deref().unwrap_or("<inline>")
        );
        self.do_register_definitions(&document.root, document.location.as_deref(), None)?;
        let count = self
            .context
            .registry
            .definition_count()
            .saturating_sub(before);
        info!("定义文档解析完成, 新增 {} 个定义", count);
        Ok(count)
    }

    /// 从资源位置加载并注册定义
    ///
    /// 位置先经模式展开，每个实际资源加载为文档后进入
    /// [`register_definitions`]。
    ///
    /// [`register_definitions`]: MarkupDefinitionReader::register_definitions
    pub fn load_definitions(&self, location: &str) -> StoreResult<LoadedDefinitions> {
        if !self.loading.borrow_mut().insert(location.to_string()) {
            return Err(DefinitionStoreError::Resource {
                location: location.to_string(),
                message: "检测到循环导入".to_string(),
            });
        }

        let result = self.do_load_definitions(location);
        self.loading.borrow_mut().remove(location);
        result
    }

    fn do_load_definitions(&self, location: &str) -> StoreResult<LoadedDefinitions> {
        let expanded = self.context.resource_loader.expand_pattern(location)?;
        let mut loaded = LoadedDefinitions::default();
        for resource in expanded {
            let document = self.context.resource_loader.load_document(&resource)?;
            loaded.count += self.register_definitions(&document)?;
            loaded.resources.push(resource);
        }
        Ok(loaded)
    }

    /// 注册单个（可能嵌套的）文档元素下的定义
    ///
    /// 每次进入都创建新的子委托并以父委托作为默认值回退链，返回
    /// 时子委托随作用域丢弃，外层委托自然恢复。
    fn do_register_definitions(
        &self,
        root: &Element,
        location: Option<&str>,
        parent: Option<&ParserDelegate<'_>>,
    ) -> StoreResult<()> {
        let mut delegate = ParserDelegate::new(self.context);
        delegate.init_defaults(root, parent);

        if root.is_default_namespace() {
            if let Some(profile_spec) = root.attribute_non_empty(PROFILE_ATTRIBUTE) {
                let profiles = tokenize_multi_value(profile_spec);
                let profile_refs: Vec<&str> = profiles.iter().map(String::as_str).collect();
                if !self.context.environment.accepts_profiles(&profile_refs) {
                    // 跳过不是失败，整个元素静默忽略
                    debug!("profile {:?} 未被激活环境接受, 跳过文档元素", profiles);
                    return Ok(());
                }
            }
        }

        if let Some(hook) = &self.pre_processor {
            hook(root, self.context);
        }
        self.parse_element_nodes(root, &delegate, location)?;
        if let Some(hook) = &self.post_processor {
            hook(root, self.context);
        }
        Ok(())
    }

    fn parse_element_nodes(
        &self,
        root: &Element,
        delegate: &ParserDelegate<'_>,
        location: Option<&str>,
    ) -> StoreResult<()> {
        if root.is_default_namespace() {
            for child in &root.children {
                if child.is_default_namespace() {
                    self.parse_default_element(child, delegate, location)?;
                } else {
                    self.parse_custom_element(child)?;
                }
            }
        } else {
            self.parse_custom_element(root)?;
        }
        Ok(())
    }

    /// 解析默认命名空间下的元素: import、alias、component 与嵌套文档
    fn parse_default_element(
        &self,
        element: &Element,
        delegate: &ParserDelegate<'_>,
        location: Option<&str>,
    ) -> StoreResult<()> {
        match element.local_name() {
            IMPORT_ELEMENT => {
                self.import_definition_resource(element, location);
                Ok(())
            }
            ALIAS_ELEMENT => {
                self.process_alias_registration(element);
                Ok(())
            }
            COMPONENT_ELEMENT => {
                self.process_component_element(element, delegate);
                Ok(())
            }
            DOCUMENT_ELEMENT => self.do_register_definitions(element, location, Some(delegate)),
            other => {
                debug!("忽略未知的默认命名空间元素: {}", other);
                Ok(())
            }
        }
    }

    /// 分发非默认命名空间元素
    ///
    /// 没有注册处理器的命名空间无法安全跳过，对所在子树是硬性
    /// 解析错误。
    fn parse_custom_element(&self, element: &Element) -> StoreResult<usize> {
        let namespace = element.namespace().unwrap_or_default();
        match self.context.namespace_handlers.resolve(namespace) {
            Some(handler) => handler.parse(element, self.context),
            None => Err(DefinitionStoreError::UnknownNamespace {
                namespace: namespace.to_string(),
                location: element.location.clone(),
            }),
        }
    }

    /// 处理 import 元素
    ///
    /// 占位符解析后的位置按绝对/相对分类：绝对位置直接交给资源
    /// 加载器；相对位置先对当前文档位置解析，不存在时退回基准
    /// 位置的字符串路径拼接。加载失败只上报，不影响兄弟元素。
    fn import_definition_resource(&self, element: &Element, doc_location: Option<&str>) {
        let sink = &self.context.event_sink;

        let Some(location_attr) = element.attribute_non_empty(RESOURCE_ATTRIBUTE) else {
            sink.report_error(
                "import 元素的 resource 属性不能为空",
                &element.location,
                Some(&DefinitionStoreError::Structural {
                    attribute: RESOURCE_ATTRIBUTE.to_string(),
                    location: element.location.clone(),
                }),
            );
            return;
        };

        let location = match self.context.environment.resolve_placeholders(location_attr) {
            Ok(resolved) => resolved,
            Err(error) => {
                let error = DefinitionStoreError::from(error);
                sink.report_error("导入位置的占位符解析失败", &element.location, Some(&error));
                return;
            }
        };

        // 分类失败按相对位置处理, 不让整个解析因此失败
        let absolute = matches!(
            self.context.resource_loader.classify(&location),
            LocationKind::Absolute
        );

        let outcome = if absolute {
            self.load_definitions(&location)
        } else {
            match doc_location {
                Some(base) => {
                    let resolved = self.context.resource_loader.resolve_relative(base, &location);
                    if self.context.resource_loader.resource_exists(&resolved) {
                        self.load_definitions(&resolved)
                    } else {
                        self.load_definitions(&apply_relative_path(base, &location))
                    }
                }
                None => self.load_definitions(&location),
            }
        };

        match outcome {
            Ok(loaded) => {
                trace!("从 {} 导入 {} 个组件定义", location, loaded.count);
                sink.import_processed(&location, &loaded.resources);
            }
            Err(error) => {
                sink.report_error(
                    &format!("导入定义资源失败: {location}"),
                    &element.location,
                    Some(&error),
                );
            }
        }
    }

    /// 处理 alias 元素
    fn process_alias_registration(&self, element: &Element) {
        let sink = &self.context.event_sink;
        let name = element.attribute_non_empty(NAME_ATTRIBUTE);
        let alias = element.attribute_non_empty(ALIAS_ATTRIBUTE);

        let mut valid = true;
        if name.is_none() {
            sink.report_error(
                "alias 元素的 name 属性不能为空",
                &element.location,
                Some(&DefinitionStoreError::Structural {
                    attribute: NAME_ATTRIBUTE.to_string(),
                    location: element.location.clone(),
                }),
            );
            valid = false;
        }
        if alias.is_none() {
            sink.report_error(
                "alias 元素的 alias 属性不能为空",
                &element.location,
                Some(&DefinitionStoreError::Structural {
                    attribute: ALIAS_ATTRIBUTE.to_string(),
                    location: element.location.clone(),
                }),
            );
            valid = false;
        }
        if !valid {
            return;
        }

        let (name, alias) = (name.expect("已校验"), alias.expect("已校验"));
        match self.context.registry.register_alias(name, alias) {
            Ok(()) => sink.alias_registered(name, alias),
            Err(error) => {
                let error = DefinitionStoreError::from(error);
                sink.report_error(
                    &format!("注册别名 {alias} 失败"),
                    &element.location,
                    Some(&error),
                );
            }
        }
    }

    /// 处理 component 元素
    fn process_component_element(&self, element: &Element, delegate: &ParserDelegate<'_>) {
        let Some(holder) = delegate.parse_component_element(element) else {
            return;
        };
        let holder = delegate.decorate_if_required(element, holder);

        match register_definition_holder(&holder, self.context.registry.as_ref()) {
            Ok(()) => self.context.event_sink.component_registered(&holder),
            Err(error) => {
                let error = DefinitionStoreError::from(error);
                self.context.event_sink.report_error(
                    &format!("注册组件定义 {} 失败", holder.name),
                    &element.location,
                    Some(&error),
                );
            }
        }
    }
}
