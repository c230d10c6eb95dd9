//! 配置环境抽象接口

use std::collections::HashMap;

/// 配置环境 trait
///
/// 以字符串键值对的形式提供配置，可以被同步、重复地查询
pub trait Environment: Send + Sync {
    /// 获取配置值
    fn get(&self, key: &str) -> Option<String>;

    /// 获取配置值，不存在时返回默认值
    fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    /// 检查配置键是否存在
    fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// 获取所有配置键
    fn keys(&self) -> Vec<String>;
}

impl Environment for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }

    fn contains_key(&self, key: &str) -> bool {
        HashMap::contains_key(self, key)
    }

    fn keys(&self) -> Vec<String> {
        HashMap::keys(self).cloned().collect()
    }
}
