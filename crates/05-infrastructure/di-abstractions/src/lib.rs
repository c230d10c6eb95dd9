//! # Dependency Injection Abstractions
//!
//! 依赖注入抽象层，定义 Bean 注册表、注入器和类型发现的核心接口。
//!
//! ## 核心接口
//!
//! - [`Ioc`] / [`IocExt`] - Bean 注册表接口
//! - [`BeanDefine`] - 注册表中的 Bean 定义
//! - [`Injector`] - 字段注入器接口
//! - [`ClassReader`] - 类型读取器接口
//! - [`ScannerRequest`] - 扫描请求

pub mod definition;
pub mod injector;
pub mod ioc;
pub mod reader;
pub mod scanner;

pub use definition::*;
pub use injector::*;
pub use ioc::*;
pub use reader::*;
pub use scanner::*;
