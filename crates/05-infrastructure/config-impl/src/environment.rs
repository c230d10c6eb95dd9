//! 键值配置环境实现

use config_abstractions::Environment;
use infrastructure_common::ConfigResult;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::Path;

/// 键值配置环境
///
/// 所有配置以点分键保存为字符串，可以在运行期间修改
#[derive(Debug, Default)]
pub struct PropertiesEnvironment {
    values: RwLock<HashMap<String, String>>,
}

impl PropertiesEnvironment {
    /// 创建空的配置环境
    pub fn new() -> Self {
        Self::default()
    }

    /// 从键值对创建配置环境
    pub fn from_map(values: HashMap<String, String>) -> Self {
        Self {
            values: RwLock::new(values),
        }
    }

    /// 从配置文件创建配置环境
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        crate::providers::load_file(path).map(Self::from_map)
    }

    /// 设置配置项
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.values.write().insert(key.into(), value.into());
    }

    /// 链式设置配置项
    pub fn with(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// 移除配置项
    pub fn remove(&self, key: &str) -> Option<String> {
        self.values.write().remove(key)
    }

    /// 合并配置，已存在的键会被覆盖
    pub fn merge(&self, values: HashMap<String, String>) {
        self.values.write().extend(values);
    }

    /// 配置项数量
    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.values.read().is_empty()
    }

    /// 获取所有配置的快照
    pub fn to_map(&self) -> HashMap<String, String> {
        self.values.read().clone()
    }
}

impl Environment for PropertiesEnvironment {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().get(key).cloned()
    }

    fn contains_key(&self, key: &str) -> bool {
        self.values.read().contains_key(key)
    }

    fn keys(&self) -> Vec<String> {
        self.values.read().keys().cloned().collect()
    }
}
