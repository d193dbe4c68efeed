//! 标准组件定义注册表实现

use parking_lot::RwLock;
use registry_abstractions::{DefinitionRegistry, RegistryListener};
use registry_common::{
    ComponentDefinition, RegistryError, RegistryEvent, RegistryEventKind, RegistryResult,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// 注册表内部状态
///
/// 名称映射与别名映射放在同一把锁之下，单次注册或别名调用
/// 对两张表的修改是原子的。
#[derive(Default)]
struct RegistryInner {
    /// 名称到定义的映射
    definitions: HashMap<String, Arc<ComponentDefinition>>,
    /// 别名到规范名称的映射
    aliases: HashMap<String, String>,
}

/// 标准组件定义注册表
///
/// [`DefinitionRegistry`] 的默认实现。覆盖策略是注册表级别的
/// 开关，默认允许覆盖。事件在写锁释放之后发出。
pub struct StandardDefinitionRegistry {
    inner: RwLock<RegistryInner>,
    allow_overriding: AtomicBool,
    listeners: RwLock<Vec<Arc<dyn RegistryListener>>>,
}

impl StandardDefinitionRegistry {
    /// 创建新的注册表
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(RegistryInner::default()),
            allow_overriding: AtomicBool::new(true),
            listeners: RwLock::new(Vec::new()),
        }
    }

    /// 设置覆盖策略并返回自身，便于链式构建
    pub fn with_overriding(self, allow: bool) -> Self {
        self.allow_overriding.store(allow, Ordering::Relaxed);
        self
    }

    fn fire(&self, kind: RegistryEventKind) {
        let event = RegistryEvent::now(kind);
        let listeners = self.listeners.read().clone();
        for listener in listeners {
            listener.on_event(&event);
        }
    }
}

impl Default for StandardDefinitionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl DefinitionRegistry for StandardDefinitionRegistry {
    fn register_definition(
        &self,
        name: &str,
        definition: ComponentDefinition,
    ) -> RegistryResult<()> {
        if name.trim().is_empty() {
            return Err(RegistryError::InvalidDefinition {
                message: "组件名称不能为空".to_string(),
            });
        }

        let replaced = {
            let mut inner = self.inner.write();
            if inner.aliases.contains_key(name) {
                return Err(RegistryError::InvalidDefinition {
                    message: format!("名称 {name} 已被用作别名"),
                });
            }
            let exists = inner.definitions.contains_key(name);
            if exists && !self.allow_overriding.load(Ordering::Relaxed) {
                return Err(RegistryError::DuplicateName {
                    name: name.to_string(),
                });
            }
            inner
                .definitions
                .insert(name.to_string(), Arc::new(definition));
            exists
        };

        if replaced {
            info!("覆盖注册组件定义: {}", name);
        } else {
            debug!("注册组件定义: {}", name);
        }
        self.fire(RegistryEventKind::DefinitionRegistered {
            name: name.to_string(),
            replaced,
        });
        Ok(())
    }

    fn register_alias(&self, name: &str, alias: &str) -> RegistryResult<()> {
        if name.trim().is_empty() || alias.trim().is_empty() {
            return Err(RegistryError::AliasConflict {
                alias: alias.to_string(),
                message: "名称与别名都不能为空".to_string(),
            });
        }
        if name == alias {
            debug!("别名与名称相同，忽略: {}", alias);
            return Ok(());
        }

        {
            let mut inner = self.inner.write();
            if !inner.definitions.contains_key(name) {
                return Err(RegistryError::AliasConflict {
                    alias: alias.to_string(),
                    message: format!("目标组件 {name} 未注册"),
                });
            }
            if inner.definitions.contains_key(alias) {
                return Err(RegistryError::AliasConflict {
                    alias: alias.to_string(),
                    message: "别名与已注册的组件名称冲突".to_string(),
                });
            }
            match inner.aliases.get(alias) {
                Some(existing) if existing == name => {
                    debug!("别名映射已存在: {} -> {}", alias, name);
                    return Ok(());
                }
                Some(existing) => {
                    return Err(RegistryError::AliasConflict {
                        alias: alias.to_string(),
                        message: format!("已指向 {existing}"),
                    });
                }
                None => {
                    inner.aliases.insert(alias.to_string(), name.to_string());
                }
            }
        }

        debug!("注册别名: {} -> {}", alias, name);
        self.fire(RegistryEventKind::AliasRegistered {
            name: name.to_string(),
            alias: alias.to_string(),
        });
        Ok(())
    }

    fn resolve(&self, name_or_alias: &str) -> RegistryResult<Arc<ComponentDefinition>> {
        let inner = self.inner.read();
        if let Some(definition) = inner.definitions.get(name_or_alias) {
            return Ok(definition.clone());
        }
        if let Some(canonical) = inner.aliases.get(name_or_alias) {
            if let Some(definition) = inner.definitions.get(canonical) {
                return Ok(definition.clone());
            }
        }
        Err(RegistryError::NotFound {
            name: name_or_alias.to_string(),
        })
    }

    fn is_registered(&self, name: &str) -> bool {
        self.inner.read().definitions.contains_key(name)
    }

    fn definition_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.inner.read().definitions.keys().cloned().collect();
        names.sort();
        names
    }

    fn definition_count(&self) -> usize {
        self.inner.read().definitions.len()
    }

    fn aliases_of(&self, name: &str) -> Vec<String> {
        let inner = self.inner.read();
        let mut aliases: Vec<String> = inner
            .aliases
            .iter()
            .filter(|(_, canonical)| canonical.as_str() == name)
            .map(|(alias, _)| alias.clone())
            .collect();
        aliases.sort();
        aliases
    }

    fn remove_definition(&self, name: &str) -> RegistryResult<Arc<ComponentDefinition>> {
        let removed = {
            let mut inner = self.inner.write();
            let removed = inner
                .definitions
                .remove(name)
                .ok_or_else(|| RegistryError::NotFound {
                    name: name.to_string(),
                })?;
            // 别名必须始终指向存在的定义
            inner.aliases.retain(|_, canonical| canonical != name);
            removed
        };

        debug!("移除组件定义: {}", name);
        self.fire(RegistryEventKind::DefinitionRemoved {
            name: name.to_string(),
        });
        Ok(removed)
    }

    fn set_allow_definition_overriding(&self, allow: bool) {
        self.allow_overriding.store(allow, Ordering::Relaxed);
    }

    fn allows_definition_overriding(&self) -> bool {
        self.allow_overriding.load(Ordering::Relaxed)
    }

    fn add_listener(&self, listener: Arc<dyn RegistryListener>) {
        self.listeners.write().push(listener);
    }
}
