//! # Infrastructure Common
//!
//! 这个 crate 提供了 Lorn IoC 各层共享的基础 traits、类型元数据和错误类型。
//!
//! ## 核心组件
//!
//! - [`Bean`] - 受容器管理的类型需要实现的元数据 trait
//! - [`BeanFactory`] - 无参构造能力
//! - [`Interface`] - 类型擦除后的接口视图
//! - [`TypeInfo`] - 基于 `type_name` 的类型信息
//!
//! ## 设计原则
//!
//! - 不依赖运行时反射，类型信息在编译期确定
//! - 构造失败以显式的 `Result` 返回

pub mod component;
pub mod errors;
pub mod metadata;

pub use component::*;
pub use errors::*;
pub use metadata::*;
