//! # 依赖注入具体实现
//!
//! 提供默认的 Bean 注册表、两种字段注入器、注入驱动以及进程级的类型目录。
//!
//! ```rust
//! use di_abstractions::IocExt;
//! use di_impl::SimpleIoc;
//! use infrastructure_common::Bean;
//!
//! struct Clock;
//! impl Bean for Clock {}
//!
//! let ioc = SimpleIoc::new();
//! ioc.add_bean(Clock);
//! assert!(ioc.get_bean::<Clock>().is_some());
//! ```

pub mod catalog;
pub mod field_injector;
pub mod injection;
pub mod simple_ioc;
pub mod value_injector;

pub use catalog::*;
pub use field_injector::*;
pub use injection::*;
pub use simple_ioc::*;
pub use value_injector::*;
