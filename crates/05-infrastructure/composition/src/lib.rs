//! # IoC 组合层
//!
//! 这个 crate 把配置、类型发现和 Bean 注册表组合成一个可以直接启动的 IoC 应用。
//!
//! ## 主要功能
//!
//! - **类路径**: 由目录和 `.jar`/`.zip` 归档组成的资源定位器
//! - **类型发现**: 按包自动选择目录读取器或归档读取器
//! - **启动器**: 按加载顺序构造、注入并注册发现的类型
//! - **应用构建器**: 使用构建者模式组装以上组件
//!
//! ## 基本使用
//!
//! ```rust,no_run
//! use infrastructure_composition::{IocBuilder, LoggingConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let application = IocBuilder::new()
//!         .with_logging(LoggingConfig::development())
//!         .add_optional_config_file("app.properties")
//!         .add_class_path("target/types")
//!         .scan_package("app.services")
//!         .build()?;
//!
//!     println!("注册了 {} 个 Bean", application.report().registered.len());
//!     Ok(())
//! }
//! ```

pub mod bootstrapper;
pub mod builder;
pub mod class_path;
pub mod classpath_reader;
pub mod dynamic_context;
pub mod jar_reader;

// 重新导出主要类型
pub use bootstrapper::{BootstrapReport, IocBootstrapper};
pub use builder::{IocApplication, IocBuilder, LoggingConfig};
pub use class_path::ClassPath;
pub use classpath_reader::ClassPathClassReader;
pub use dynamic_context::DynamicContext;
pub use jar_reader::JarReaderImpl;

// 重新导出错误类型
pub use infrastructure_common::InfrastructureError;
