//! # Configuration Abstractions
//!
//! 配置查询抽象层，定义值注入器读取配置时使用的接口。
//!
//! ## 核心接口
//!
//! - [`Environment`] - 按键同步查询字符串配置

pub mod environment;

pub use environment::*;
