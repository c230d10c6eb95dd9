//! Bean 注册表抽象接口
//!
//! [`Ioc`] 是对象安全的底层接口，按字符串键保存 [`BeanDefine`]；
//! [`IocExt`] 在其上提供按类型注册和查找的泛型方法。

use crate::definition::BeanDefine;
use infrastructure_common::{
    Bean, BeanFactory, BeanInstance, DependencyError, DependencyResult, TypeInfo,
};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, error};

/// Bean 注册表 trait
///
/// 所有方法只需要共享引用，实现者自行负责内部同步
pub trait Ioc: Send + Sync {
    /// 在 `name` 下注册定义，并为定义声明的每个接口建立别名
    ///
    /// 接口别名先到先得：接口名下已有能提供该接口的定义时不会覆盖
    fn add_bean_define(&self, name: &str, define: BeanDefine);

    /// 替换 `name` 下定义的实例，不存在时插入，不建立接口别名
    fn set_bean_define(&self, name: &str, define: BeanDefine);

    /// 按名称获取定义
    fn get_bean_define_by_name(&self, name: &str) -> Option<BeanDefine>;

    /// 按名称获取实例
    fn get_bean_by_name(&self, name: &str) -> Option<BeanInstance> {
        self.get_bean_define_by_name(name)
            .map(|define| define.bean())
    }

    /// 所有定义的快照
    fn get_bean_defines(&self) -> Vec<BeanDefine>;

    /// 所有实例的快照
    fn get_beans(&self) -> Vec<BeanInstance> {
        self.get_bean_defines()
            .iter()
            .map(BeanDefine::bean)
            .collect()
    }

    /// 所有名称的快照
    fn get_bean_names(&self) -> HashSet<String>;

    /// 按名称移除
    fn remove(&self, name: &str) -> Option<BeanDefine>;

    /// 按类型移除，键的取法由实现决定
    fn remove_type_key(&self, bean_type: &TypeInfo) -> Option<BeanDefine>;

    /// 清空注册表
    fn clear_all(&self);

    /// 已注册的键数量
    fn len(&self) -> usize;

    /// 注册表是否为空
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 按类型操作注册表的扩展方法
pub trait IocExt: Ioc {
    /// 以具体类型的完整名称注册实例
    fn add_bean<T: Bean>(&self, bean: T) -> Arc<T> {
        self.add_shared_bean(Arc::new(bean))
    }

    /// 以具体类型的完整名称注册共享实例
    fn add_shared_bean<T: Bean>(&self, bean: Arc<T>) -> Arc<T> {
        self.add_named_bean(TypeInfo::of::<T>().name(), bean)
    }

    /// 以指定名称注册共享实例
    fn add_named_bean<T: Bean>(&self, name: &str, bean: Arc<T>) -> Arc<T> {
        self.add_bean_define(name, BeanDefine::new(Arc::clone(&bean)));
        bean
    }

    /// 无参构造并注册，单例标记取自 [`Bean::singleton`]
    fn create_bean<T: BeanFactory>(&self) -> DependencyResult<Arc<T>> {
        self.create_bean_with_scope::<T>(T::singleton())
    }

    /// 无参构造并以指定的单例标记注册
    ///
    /// 构造失败时不会注册任何内容
    fn create_bean_with_scope<T: BeanFactory>(&self, singleton: bool) -> DependencyResult<Arc<T>> {
        let type_info = TypeInfo::of::<T>();
        let bean = Arc::new(T::create().map_err(|e| {
            error!("创建 Bean 失败: {}, 原因: {}", type_info, e);
            e
        })?);

        debug!("创建 Bean: {}", type_info);
        self.add_bean_define(
            type_info.name(),
            BeanDefine::new(Arc::clone(&bean)).with_singleton(singleton),
        );
        Ok(bean)
    }

    /// 以具体类型的完整名称替换实例，总是后写者生效
    fn set_bean<T: Bean>(&self, bean: Arc<T>) {
        self.set_bean_define(TypeInfo::of::<T>().name(), BeanDefine::new(bean));
    }

    /// 按类型获取实例，不存在或类型不匹配时返回 `None`
    fn get_bean<T: ?Sized + 'static>(&self) -> Option<Arc<T>> {
        self.get_bean_define::<T>()?.resolve::<T>()
    }

    /// 按类型获取实例，区分未注册和类型不匹配
    fn lookup_bean<T: ?Sized + 'static>(&self) -> DependencyResult<Arc<T>> {
        let type_info = TypeInfo::of::<T>();
        let define = self.get_bean_define::<T>().ok_or_else(|| {
            DependencyError::ComponentNotRegistered {
                type_name: type_info.name().to_string(),
            }
        })?;

        define
            .resolve::<T>()
            .ok_or_else(|| DependencyError::TypeMismatch {
                name: type_info.name().to_string(),
                expected: type_info.name().to_string(),
                actual: define.bean_type().name().to_string(),
            })
    }

    /// 按名称获取并转换为指定类型
    fn get_named_bean<T: ?Sized + 'static>(&self, name: &str) -> Option<Arc<T>> {
        self.get_bean_define_by_name(name)?.resolve::<T>()
    }

    /// 按类型获取定义
    fn get_bean_define<T: ?Sized + 'static>(&self) -> Option<BeanDefine> {
        self.get_bean_define_by_name(TypeInfo::of::<T>().name())
    }

    /// 按类型移除
    fn remove_bean<T: ?Sized + 'static>(&self) -> Option<BeanDefine> {
        self.remove_type_key(&TypeInfo::of::<T>())
    }
}

impl<I: Ioc + ?Sized> IocExt for I {}
