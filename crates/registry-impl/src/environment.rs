//! 标准激活环境实现

use once_cell::sync::Lazy;
use regex::Regex;
use registry_abstractions::Environment;
use registry_common::{EnvironmentError, EnvironmentResult};
use std::collections::{HashMap, HashSet};

/// 没有显式激活任何 profile 时生效的保留 profile 名称
pub const RESERVED_DEFAULT_PROFILE: &str = "default";

/// 占位符语法 `${key}` 与 `${key:default}`
static PLACEHOLDER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").expect("占位符正则必然合法"));

/// 标准激活环境
///
/// profile 集合加属性表。属性查找失败时回退到进程环境变量。
#[derive(Debug, Clone, Default)]
pub struct StandardEnvironment {
    active_profiles: HashSet<String>,
    properties: HashMap<String, String>,
}

impl StandardEnvironment {
    /// 创建空环境
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置激活的 profile 集合
    pub fn with_active_profiles<I, S>(mut self, profiles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.active_profiles = profiles.into_iter().map(Into::into).collect();
        self
    }

    /// 追加属性
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    fn is_profile_active(&self, profile: &str) -> bool {
        if self.active_profiles.contains(profile) {
            return true;
        }
        self.active_profiles.is_empty() && profile == RESERVED_DEFAULT_PROFILE
    }
}

impl Environment for StandardEnvironment {
    fn resolve_placeholders(&self, text: &str) -> EnvironmentResult<String> {
        let mut result = String::with_capacity(text.len());
        let mut last = 0;
        for captures in PLACEHOLDER_PATTERN.captures_iter(text) {
            let matched = captures.get(0).expect("捕获组 0 总是存在");
            let inner = &captures[1];
            let (key, default) = match inner.split_once(':') {
                Some((key, default)) => (key, Some(default)),
                None => (inner, None),
            };
            let value = match self.property(key) {
                Some(value) => value,
                None => match default {
                    Some(default) => default.to_string(),
                    None => {
                        return Err(EnvironmentError::UnresolvedPlaceholder {
                            placeholder: key.to_string(),
                            text: text.to_string(),
                        })
                    }
                },
            };
            result.push_str(&text[last..matched.start()]);
            result.push_str(&value);
            last = matched.end();
        }
        result.push_str(&text[last..]);
        Ok(result)
    }

    fn accepts_profiles(&self, profiles: &[&str]) -> bool {
        if profiles.is_empty() {
            return true;
        }
        for profile in profiles {
            let profile = profile.trim();
            if profile.is_empty() {
                continue;
            }
            if let Some(negated) = profile.strip_prefix('!') {
                if !self.is_profile_active(negated) {
                    return true;
                }
            } else if self.is_profile_active(profile) {
                return true;
            }
        }
        false
    }

    fn property(&self, key: &str) -> Option<String> {
        self.properties
            .get(key)
            .cloned()
            .or_else(|| std::env::var(key).ok())
    }

    fn active_profiles(&self) -> Vec<String> {
        let mut profiles: Vec<String> = self.active_profiles.iter().cloned().collect();
        profiles.sort();
        profiles
    }
}
