//! 默认的 Bean 注册表实现

use di_abstractions::{BeanDefine, Ioc};
use infrastructure_common::TypeInfo;
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, warn};

/// 按类型移除时使用的键
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RemovalKey {
    /// 使用不含模块路径的简短类型名
    ///
    /// 按类型注册使用完整名称，因此只在以简短名称注册过时才能移除
    #[default]
    SimpleName,
    /// 使用完整类型名，与按类型注册的键一致
    QualifiedName,
}

/// 注册表配置
#[derive(Debug, Clone)]
pub struct IocConfig {
    /// 按类型移除时使用的键
    pub removal_key: RemovalKey,
    /// 初始容量
    pub initial_capacity: usize,
}

impl Default for IocConfig {
    fn default() -> Self {
        Self {
            removal_key: RemovalKey::SimpleName,
            initial_capacity: 32,
        }
    }
}

/// 基于读写锁保护的 `HashMap` 的注册表
///
/// 启动期间单线程注册，之后可以被多个线程并发读取
#[derive(Debug)]
pub struct SimpleIoc {
    pool: RwLock<HashMap<String, BeanDefine>>,
    config: IocConfig,
}

impl SimpleIoc {
    /// 使用默认配置创建注册表
    pub fn new() -> Self {
        Self::with_config(IocConfig::default())
    }

    /// 使用指定配置创建注册表
    pub fn with_config(config: IocConfig) -> Self {
        Self {
            pool: RwLock::new(HashMap::with_capacity(config.initial_capacity)),
            config,
        }
    }

    /// 注册表配置
    pub fn config(&self) -> &IocConfig {
        &self.config
    }
}

impl Default for SimpleIoc {
    fn default() -> Self {
        Self::new()
    }
}

fn insert(pool: &mut HashMap<String, BeanDefine>, name: &str, define: BeanDefine) {
    if pool.insert(name.to_string(), define).is_some() {
        warn!("重复的 Bean: {}", name);
    }
}

impl Ioc for SimpleIoc {
    fn add_bean_define(&self, name: &str, define: BeanDefine) {
        let mut pool = self.pool.write();
        let interfaces = define.interfaces();
        debug!("注册 Bean: {} ({})", name, define.bean_type());
        insert(&mut pool, name, define.clone());

        for interface in interfaces {
            let alias = interface.name();
            if alias == name {
                continue;
            }
            let claimed = pool
                .get(alias)
                .is_some_and(|existing| existing.provides(interface.id));
            if claimed {
                debug!("接口 {} 已有实现，跳过 {}", alias, name);
                continue;
            }
            debug!("注册接口别名: {} -> {}", alias, name);
            insert(&mut pool, alias, define.clone());
        }
    }

    fn set_bean_define(&self, name: &str, define: BeanDefine) {
        let mut pool = self.pool.write();
        match pool.get(name) {
            Some(existing) => {
                debug!("替换 Bean 实例: {}", name);
                existing.replace_bean(&define);
            }
            None => {
                debug!("注册 Bean: {}", name);
                pool.insert(name.to_string(), define);
            }
        }
    }

    fn get_bean_define_by_name(&self, name: &str) -> Option<BeanDefine> {
        self.pool.read().get(name).cloned()
    }

    fn get_bean_defines(&self) -> Vec<BeanDefine> {
        self.pool.read().values().cloned().collect()
    }

    fn get_bean_names(&self) -> HashSet<String> {
        self.pool.read().keys().cloned().collect()
    }

    fn remove(&self, name: &str) -> Option<BeanDefine> {
        let removed = self.pool.write().remove(name);
        if removed.is_some() {
            debug!("移除 Bean: {}", name);
        }
        removed
    }

    fn remove_type_key(&self, bean_type: &TypeInfo) -> Option<BeanDefine> {
        let key = match self.config.removal_key {
            RemovalKey::SimpleName => bean_type.simple_name(),
            RemovalKey::QualifiedName => bean_type.name(),
        };
        self.remove(key)
    }

    fn clear_all(&self) {
        let mut pool = self.pool.write();
        info!("清空注册表，共 {} 个 Bean", pool.len());
        pool.clear();
    }

    fn len(&self) -> usize {
        self.pool.read().len()
    }
}
