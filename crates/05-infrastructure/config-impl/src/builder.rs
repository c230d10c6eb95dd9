//! 配置环境构建器
//!
//! 按添加顺序合并配置源，后添加的配置源覆盖先添加的同名键

use crate::environment::PropertiesEnvironment;
use crate::providers::{load_env_vars, load_file};
use infrastructure_common::ConfigResult;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, info};

/// 配置源描述
#[derive(Debug, Clone)]
pub enum ConfigSource {
    /// 配置文件，`optional` 为 true 时文件不存在不会报错
    File { path: PathBuf, optional: bool },
    /// 指定前缀的环境变量
    EnvVars { prefix: String },
    /// 内存中的键值对
    Memory(HashMap<String, String>),
}

/// 配置环境构建器
#[derive(Debug, Default)]
pub struct EnvironmentBuilder {
    sources: Vec<ConfigSource>,
}

impl EnvironmentBuilder {
    /// 创建新的构建器
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加必需的配置文件
    pub fn add_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.sources.push(ConfigSource::File {
            path: path.into(),
            optional: false,
        });
        self
    }

    /// 添加可选的配置文件
    pub fn add_optional_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.sources.push(ConfigSource::File {
            path: path.into(),
            optional: true,
        });
        self
    }

    /// 添加环境变量配置源
    pub fn add_env_vars(mut self, prefix: impl Into<String>) -> Self {
        self.sources.push(ConfigSource::EnvVars {
            prefix: prefix.into(),
        });
        self
    }

    /// 添加内存配置
    pub fn add_map(mut self, values: HashMap<String, String>) -> Self {
        self.sources.push(ConfigSource::Memory(values));
        self
    }

    /// 添加单个配置项
    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut values = HashMap::new();
        values.insert(key.into(), value.into());
        self.sources.push(ConfigSource::Memory(values));
        self
    }

    /// 配置源列表
    pub fn sources(&self) -> &[ConfigSource] {
        &self.sources
    }

    /// 构建配置环境
    pub fn build(self) -> ConfigResult<PropertiesEnvironment> {
        let environment = PropertiesEnvironment::new();

        for source in self.sources {
            match source {
                ConfigSource::File { path, optional } => {
                    if optional && !path.exists() {
                        debug!("可选配置文件不存在，跳过: {}", path.display());
                        continue;
                    }
                    environment.merge(load_file(&path)?);
                }
                ConfigSource::EnvVars { prefix } => environment.merge(load_env_vars(&prefix)),
                ConfigSource::Memory(values) => environment.merge(values),
            }
        }

        info!("配置环境构建完成，共 {} 项配置", environment.len());
        Ok(environment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config_abstractions::Environment;
    use infrastructure_common::ConfigError;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_later_sources_override_earlier() {
        let mut file = Builder::new().suffix(".properties").tempfile().unwrap();
        writeln!(file, "color=red").unwrap();
        writeln!(file, "size=large").unwrap();

        let environment = EnvironmentBuilder::new()
            .add_file(file.path())
            .set("color", "green")
            .build()
            .unwrap();

        assert_eq!(environment.get("color").as_deref(), Some("green"));
        assert_eq!(environment.get("size").as_deref(), Some("large"));
    }

    #[test]
    fn test_optional_file_is_skipped() {
        let environment = EnvironmentBuilder::new()
            .add_optional_file("/definitely/not/here.properties")
            .set("a", "1")
            .build()
            .unwrap();

        assert_eq!(environment.len(), 1);
    }

    #[test]
    fn test_required_file_missing_fails() {
        let result = EnvironmentBuilder::new()
            .add_file("/definitely/not/here.properties")
            .build();

        assert!(matches!(result, Err(ConfigError::FileNotFound { .. })));
    }

    #[test]
    fn test_env_vars_source() {
        std::env::set_var("LORNBUILDERTEST_FEATURE_FLAG", "on");

        let environment = EnvironmentBuilder::new()
            .add_env_vars("LORNBUILDERTEST")
            .build()
            .unwrap();

        assert_eq!(environment.get("feature.flag").as_deref(), Some("on"));
    }
}
