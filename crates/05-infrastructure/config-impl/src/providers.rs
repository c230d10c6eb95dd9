//! 配置源加载实现
//!
//! 所有配置源最终都被展开为 `点分键 -> 字符串值` 的映射

use infrastructure_common::{ConfigError, ConfigResult};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// 配置文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `key=value` 格式
    Properties,
    /// TOML 文件
    Toml,
    /// JSON 文件
    Json,
    /// YAML 文件
    Yaml,
}

impl ConfigFormat {
    /// 根据文件扩展名判断格式
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_lowercase();
        match extension.as_str() {
            "properties" => Some(Self::Properties),
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    /// 解析配置内容
    pub fn parse(self, content: &str) -> ConfigResult<HashMap<String, String>> {
        let value = match self {
            Self::Properties => return Ok(parse_properties(content)),
            Self::Toml => {
                let value: toml::Value = toml::from_str(content).map_err(|e| {
                    ConfigError::ParseError {
                        source: Box::new(e),
                    }
                })?;
                toml_to_json(&value)
            }
            Self::Json => serde_json::from_str(content).map_err(|e| ConfigError::ParseError {
                source: Box::new(e),
            })?,
            Self::Yaml => serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError {
                source: Box::new(e),
            })?,
        };

        let mut values = HashMap::new();
        flatten_value(&value, String::new(), &mut values);
        Ok(values)
    }
}

/// 加载配置文件
pub fn load_file<P: AsRef<Path>>(path: P) -> ConfigResult<HashMap<String, String>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ConfigError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let format = ConfigFormat::from_path(path).ok_or_else(|| ConfigError::UnsupportedFormat {
        path: path.display().to_string(),
    })?;

    debug!("加载配置文件: {} ({:?})", path.display(), format);
    let content = std::fs::read_to_string(path)?;
    let values = format.parse(&content)?;
    debug!("配置文件加载完成，共 {} 项", values.len());
    Ok(values)
}

/// 加载指定前缀的环境变量
///
/// `APP_SERVER_PORT=8080` 在前缀为 `APP` 时映射为 `server.port=8080`
pub fn load_env_vars(prefix: &str) -> HashMap<String, String> {
    debug!("加载环境变量，前缀: {}", prefix);
    let values: HashMap<String, String> = std::env::vars()
        .filter_map(|(key, value)| env_key_to_config_key(prefix, &key).map(|key| (key, value)))
        .collect();
    debug!("加载了 {} 个环境变量", values.len());
    values
}

fn env_key_to_config_key(prefix: &str, env_key: &str) -> Option<String> {
    let prefix = prefix.trim_end_matches('_');
    let key = if prefix.is_empty() {
        env_key
    } else {
        env_key.strip_prefix(prefix)?.strip_prefix('_')?
    };
    if key.is_empty() {
        return None;
    }
    Some(key.replace('_', ".").to_lowercase())
}

/// 解析 properties 内容
fn parse_properties(content: &str) -> HashMap<String, String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('!'))
        .filter_map(|line| {
            let index = line.find(|c: char| c == '=' || c == ':')?;
            let key = line[..index].trim();
            if key.is_empty() {
                return None;
            }
            Some((key.to_string(), line[index + 1..].trim().to_string()))
        })
        .collect()
}

/// 将 TOML 值转换为 JSON 值
fn toml_to_json(value: &toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s.clone()),
        toml::Value::Integer(i) => Value::Number(serde_json::Number::from(*i)),
        toml::Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(f.to_string())),
        toml::Value::Boolean(b) => Value::Bool(*b),
        toml::Value::Array(arr) => Value::Array(arr.iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .iter()
                .map(|(k, v)| (k.clone(), toml_to_json(v)))
                .collect(),
        ),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
    }
}

/// 递归展开嵌套对象，数组以逗号连接
fn flatten_value(value: &Value, prefix: String, values: &mut HashMap<String, String>) {
    match value {
        Value::Object(obj) => {
            for (key, nested) in obj {
                let full_key = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten_value(nested, full_key, values);
            }
        }
        Value::Array(items) => {
            let joined = items
                .iter()
                .map(scalar_to_string)
                .collect::<Vec<_>>()
                .join(",");
            values.insert(prefix, joined);
        }
        Value::Null => {
            values.insert(prefix, String::new());
        }
        scalar => {
            values.insert(prefix, scalar_to_string(scalar));
        }
    }
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
