//! # Configuration Implementation
//!
//! 配置环境的具体实现，把多种配置源合并为扁平的字符串键值对。
//!
//! ## 主要组件
//!
//! - [`PropertiesEnvironment`] - 线程安全的键值配置环境
//! - [`EnvironmentBuilder`] - 按顺序合并配置源
//! - [`providers`] - properties / TOML / JSON / YAML 文件与环境变量加载

pub mod builder;
pub mod environment;
pub mod providers;

pub use builder::*;
pub use environment::*;
pub use providers::{load_env_vars, load_file, ConfigFormat};
