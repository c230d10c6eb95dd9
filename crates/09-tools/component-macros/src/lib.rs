//! # Component Macros
//!
//! 这个 crate 提供了 `#[derive(Bean)]`，在编译期生成 Bean 元数据、
//! 注入点声明，并在程序启动时把类型登记到全局类型目录。
//!
//! 使用该宏的 crate 需要同时依赖 `infrastructure-common`、`di-abstractions`、
//! `di-impl` 和 `ctor`。
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use component_macros::Bean;
//! use std::sync::Arc;
//!
//! pub trait Greeter: Send + Sync {
//!     fn greet(&self) -> String;
//! }
//!
//! #[derive(Default, Bean)]
//! #[bean(order = 10, implements(dyn Greeter + Send + Sync))]
//! pub struct FormalGreeter {
//!     #[value("greeter.prefix")]
//!     prefix: String,
//!     #[inject]
//!     messages: Option<Arc<dyn MessageSource + Send + Sync>>,
//! }
//! ```

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod bean;
mod utils;

// Re-exports are not allowed in proc-macro crates

/// Bean 派生宏
///
/// # 结构体属性 `#[bean(...)]`
///
/// - `order = N` - 加载顺序，数值越小越先加载
/// - `prototype` - 非单例
/// - `annotations("a", "b")` - 类型上的标注，可用于扫描过滤
/// - `implements(dyn Trait + Send + Sync, ...)` - 实现的接口
/// - `factory = "path::to::fn"` - 自定义构造函数，默认使用 `Default`
///
/// # 字段属性
///
/// - `#[inject]` - 从注册表按类型注入，字段必须是 `Option<Arc<T>>`
/// - `#[value("key")]` 或 `#[value(key = "key")]` - 从配置环境注入，
///   支持 `String`、`Vec<String>` 和 `HashMap<String, String>`
#[proc_macro_derive(Bean, attributes(bean, inject, value))]
pub fn derive_bean(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    bean::derive_bean_impl(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
