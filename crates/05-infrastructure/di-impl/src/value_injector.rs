//! 配置值注入器
//!
//! 字符串字段直接赋值；列表字段按 `value.split`（默认 `,`）切分；
//! 映射字段先按列表分隔符切分，再按 `value.map.split`（默认 `:`）
//! 拆成键和值，不含分隔符的片段被丢弃。

use config_abstractions::Environment;
use di_abstractions::{Injector, ValueField, ValueSlot};
use infrastructure_common::DependencyResult;
use std::collections::HashMap;
use tracing::{debug, warn};

/// 列表分隔符的配置键
pub const VALUE_SPLIT_KEY: &str = "value.split";
/// 映射键值分隔符的配置键
pub const VALUE_MAP_SPLIT_KEY: &str = "value.map.split";
/// 默认列表分隔符
pub const DEFAULT_LIST_DELIMITER: &str = ",";
/// 默认映射键值分隔符
pub const DEFAULT_MAP_DELIMITER: &str = ":";

/// 从配置环境读取值并赋给字段
pub struct ValueInjector<'a, B> {
    environment: &'a dyn Environment,
    field: &'a ValueField<B>,
}

impl<'a, B> ValueInjector<'a, B> {
    /// 创建配置值注入器
    pub fn new(environment: &'a dyn Environment, field: &'a ValueField<B>) -> Self {
        Self { environment, field }
    }

    fn delimiter(&self, key: &str, default: &str) -> String {
        let delimiter = self.environment.get_or(key, default);
        if delimiter.is_empty() {
            default.to_string()
        } else {
            delimiter
        }
    }
}

impl<B> Injector<B> for ValueInjector<'_, B> {
    fn injection(&self, bean: &mut B) -> DependencyResult<()> {
        let name = self.field.name();
        let key = self.field.key();
        if key.is_empty() {
            warn!("配置键为空，无法注入字段: {}", name);
            return Ok(());
        }

        let value = match self.environment.get(key) {
            Some(value) if !value.is_empty() => value,
            Some(_) => {
                warn!("配置 {} 为空，无法注入字段: {}", key, name);
                return Ok(());
            }
            None => {
                warn!("配置 {} 不存在，无法注入字段: {}", key, name);
                return Ok(());
            }
        };

        match self.field.slot() {
            ValueSlot::Text(setter) => setter(bean, value),
            ValueSlot::List(setter) => {
                let delimiter = self.delimiter(VALUE_SPLIT_KEY, DEFAULT_LIST_DELIMITER);
                setter(bean, split_list(&value, &delimiter));
            }
            ValueSlot::Map(setter) => {
                let delimiter = self.delimiter(VALUE_SPLIT_KEY, DEFAULT_LIST_DELIMITER);
                let map_delimiter = self.delimiter(VALUE_MAP_SPLIT_KEY, DEFAULT_MAP_DELIMITER);
                setter(bean, split_map(&value, &delimiter, &map_delimiter));
            }
            ValueSlot::Unsupported(type_name) => {
                debug!("字段 {} 的类型 {} 不支持配置注入", name, type_name);
                return Ok(());
            }
        }

        debug!("注入配置 {} -> 字段 {}", key, name);
        Ok(())
    }
}

/// 按分隔符切分，末尾的空片段被丢弃
fn split_list(value: &str, delimiter: &str) -> Vec<String> {
    let mut items: Vec<String> = value.split(delimiter).map(str::to_string).collect();
    while items.last().is_some_and(String::is_empty) {
        items.pop();
    }
    items
}

fn split_map(value: &str, delimiter: &str, map_delimiter: &str) -> HashMap<String, String> {
    split_list(value, delimiter)
        .iter()
        .filter_map(|token| token.split_once(map_delimiter))
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}
