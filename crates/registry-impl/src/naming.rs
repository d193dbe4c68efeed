//! 默认组件名称生成器

use registry_abstractions::{ComponentNameGenerator, DefinitionRegistry};
use registry_common::ComponentDefinition;

/// 生成名称的序号分隔符
pub const GENERATED_NAME_SEPARATOR: &str = "#";

/// 默认组件名称生成器
///
/// 基础名称取类型短名称的首字母小写形式；只有父模板的定义
/// 退化为 `父名$child`，两者都没有时使用固定基础名。与注册表
/// 既有内容冲突时追加确定性的 `#2`、`#3` 序号，同一输入的重复
/// 运行总是得到相同名称。
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultNameGenerator;

impl DefaultNameGenerator {
    /// 创建新的名称生成器
    pub fn new() -> Self {
        Self
    }

    fn base_name(definition: &ComponentDefinition) -> String {
        if let Some(class_ref) = &definition.class_ref {
            return decapitalize(class_ref.short_name());
        }
        if let Some(parent) = &definition.parent_name {
            return format!("{parent}$child");
        }
        "component".to_string()
    }
}

impl ComponentNameGenerator for DefaultNameGenerator {
    fn generate(
        &self,
        definition: &ComponentDefinition,
        registry: &dyn DefinitionRegistry,
    ) -> String {
        let base = Self::base_name(definition);
        if registry.resolve(&base).is_err() {
            return base;
        }
        let mut counter = 2usize;
        loop {
            let candidate = format!("{base}{GENERATED_NAME_SEPARATOR}{counter}");
            if registry.resolve(&candidate).is_err() {
                return candidate;
            }
            counter += 1;
        }
    }
}

/// 注解路径的名称生成器
///
/// 只取类型短名称的首字母小写形式，不做序号消歧：同一类型的
/// 重复注册派生同一名称，落在注册表的覆盖策略上，注解路径的
/// 幂等性依赖这一行为。
#[derive(Debug, Clone, Copy, Default)]
pub struct AnnotationNameGenerator;

impl AnnotationNameGenerator {
    /// 创建新的注解名称生成器
    pub fn new() -> Self {
        Self
    }
}

impl ComponentNameGenerator for AnnotationNameGenerator {
    fn generate(
        &self,
        definition: &ComponentDefinition,
        _registry: &dyn DefinitionRegistry,
    ) -> String {
        definition
            .class_ref
            .as_ref()
            .map_or_else(|| "component".to_string(), |t| decapitalize(t.short_name()))
    }
}

/// 首字母小写
///
/// 前两个字符都是大写时保持原样，避免破坏 `URLService` 一类的
/// 缩写名称。
fn decapitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => {
            let second_upper = name.chars().nth(1).is_some_and(char::is_uppercase);
            if first.is_uppercase() && !second_upper {
                first.to_lowercase().collect::<String>() + chars.as_str()
            } else {
                name.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decapitalize_plain_name() {
        assert_eq!(decapitalize("UserService"), "userService");
    }

    #[test]
    fn test_decapitalize_keeps_acronym() {
        assert_eq!(decapitalize("URLService"), "URLService");
    }

    #[test]
    fn test_decapitalize_lowercase_unchanged() {
        assert_eq!(decapitalize("service"), "service");
    }
}
