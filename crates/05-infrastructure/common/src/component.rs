//! Bean 基础接口定义
//!
//! 受容器管理的类型通过 [`Bean`] 声明自己实现的接口、加载顺序和
//! 单例标记，通过 [`BeanFactory`] 提供无参构造。

use crate::errors::DependencyError;
use crate::metadata::{TypeInfo, DEFAULT_ORDER};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// 类型擦除后的 Bean 实例
pub type BeanInstance = Arc<dyn Any + Send + Sync>;

/// 接口视图转换函数
type Upcast = Arc<dyn Fn(BeanInstance) -> Option<Box<dyn Any + Send + Sync>> + Send + Sync>;

/// Bean 基础 trait
///
/// 所有需要注册到容器中的类型都必须实现此 trait
pub trait Bean: Send + Sync + 'static {
    /// 该类型实现的接口列表
    fn interfaces() -> Vec<Interface>
    where
        Self: Sized,
    {
        Vec::new()
    }

    /// 加载顺序，数值越大加载越靠后
    fn order() -> i32
    where
        Self: Sized,
    {
        DEFAULT_ORDER
    }

    /// 是否为单例
    fn singleton() -> bool
    where
        Self: Sized,
    {
        true
    }

    /// 类型上的标注
    fn annotations() -> &'static [&'static str]
    where
        Self: Sized,
    {
        &[]
    }
}

/// 无参构造 trait
pub trait BeanFactory: Bean + Sized {
    /// 创建默认实例
    fn create() -> Result<Self, DependencyError>;
}

/// 接口视图
///
/// 保存把具体 Bean 实例转换为 `Arc<I>` 的函数，`I` 通常是
/// `dyn Trait + Send + Sync`。
#[derive(Clone)]
pub struct Interface {
    type_info: TypeInfo,
    upcast: Upcast,
}

impl Interface {
    /// 为具体类型 `T` 创建接口 `I` 的视图
    ///
    /// ```rust
    /// use infrastructure_common::Interface;
    /// use std::sync::Arc;
    ///
    /// trait Greeter: Send + Sync {}
    /// struct Formal;
    /// impl Greeter for Formal {}
    ///
    /// let view = Interface::of::<Formal, dyn Greeter>(|bean| -> Arc<dyn Greeter> { bean });
    /// assert_eq!(view.type_info().simple_name(), "Greeter");
    /// ```
    pub fn of<T, I>(upcast: fn(Arc<T>) -> Arc<I>) -> Self
    where
        T: Send + Sync + 'static,
        I: ?Sized + Send + Sync + 'static,
    {
        Self {
            type_info: TypeInfo::of::<I>(),
            upcast: Arc::new(move |instance: BeanInstance| {
                instance
                    .downcast::<T>()
                    .ok()
                    .map(|bean| Box::new(upcast(bean)) as Box<dyn Any + Send + Sync>)
            }),
        }
    }

    /// 具体类型自身的视图
    pub fn identity<T: Send + Sync + 'static>() -> Self {
        Self::of::<T, T>(|bean| bean)
    }

    /// 接口的类型信息
    pub fn type_info(&self) -> TypeInfo {
        self.type_info
    }

    /// 把实例转换为接口类型
    pub fn cast<I: ?Sized + 'static>(&self, instance: &BeanInstance) -> Option<Arc<I>> {
        (self.upcast)(Arc::clone(instance))?
            .downcast::<Arc<I>>()
            .ok()
            .map(|view| *view)
    }
}

impl fmt::Debug for Interface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interface")
            .field("type_info", &self.type_info)
            .field("upcast", &"<function>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Greeter: Send + Sync {
        fn greet(&self) -> String;
    }

    #[derive(Debug, Default)]
    struct Formal;

    impl Greeter for Formal {
        fn greet(&self) -> String {
            "good day".to_string()
        }
    }

    impl Bean for Formal {
        fn interfaces() -> Vec<Interface> {
            vec![Interface::of::<Self, dyn Greeter>(|bean| -> Arc<dyn Greeter> { bean })]
        }
    }

    #[test]
    fn test_interface_cast_to_trait_object() {
        let instance: BeanInstance = Arc::new(Formal);
        let view = &Formal::interfaces()[0];

        let greeter = view.cast::<dyn Greeter>(&instance).unwrap();
        assert_eq!(greeter.greet(), "good day");
    }

    #[test]
    fn test_interface_cast_rejects_other_instance() {
        let instance: BeanInstance = Arc::new(42_u32);
        let view = &Formal::interfaces()[0];

        assert!(view.cast::<dyn Greeter>(&instance).is_none());
    }

    #[test]
    fn test_identity_view_keeps_same_allocation() {
        let formal = Arc::new(Formal);
        let instance: BeanInstance = formal.clone();

        let resolved = Interface::identity::<Formal>()
            .cast::<Formal>(&instance)
            .unwrap();
        assert!(Arc::ptr_eq(&formal, &resolved));
    }

    #[test]
    fn test_bean_defaults() {
        assert_eq!(Formal::order(), DEFAULT_ORDER);
        assert!(Formal::singleton());
        assert!(Formal::annotations().is_empty());
    }
}
