//! 解析管线的公共工具

use registry_abstractions::DefinitionRegistry;
use registry_common::{DefinitionHolder, RegistryResult};

/// 多值属性的分隔符集合
pub const MULTI_VALUE_DELIMITERS: [char; 3] = [',', ';', ' '];

/// 注册定义持有者
///
/// 先以名称注册定义，再逐个注册别名。任何一步失败都直接返回，
/// 已注册的部分不回滚，与单次调用原子性的约定一致。
pub fn register_definition_holder(
    holder: &DefinitionHolder,
    registry: &dyn DefinitionRegistry,
) -> RegistryResult<()> {
    registry.register_definition(&holder.name, holder.definition.clone())?;
    for alias in &holder.aliases {
        registry.register_alias(&holder.name, alias)?;
    }
    Ok(())
}

/// 按 `,; ` 分隔符切分多值属性
pub fn tokenize_multi_value(value: &str) -> Vec<String> {
    value
        .split(MULTI_VALUE_DELIMITERS)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// 以字符串路径拼接的方式解析相对位置
///
/// 替换基准位置最后一个路径段。基准位置没有路径段时直接返回
/// 相对位置本身。
pub fn apply_relative_path(base: &str, relative: &str) -> String {
    match base.rfind('/') {
        Some(index) => format!("{}/{}", &base[..index], relative),
        None => relative.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_mixed_delimiters() {
        assert_eq!(
            tokenize_multi_value("a, b;c d"),
            vec!["a".to_string(), "b".to_string(), "c".to_string(), "d".to_string()]
        );
    }

    #[test]
    fn test_apply_relative_path() {
        assert_eq!(apply_relative_path("conf/app.json", "other.json"), "conf/other.json");
        assert_eq!(apply_relative_path("app.json", "other.json"), "other.json");
    }
}
