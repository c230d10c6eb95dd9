//! Bean 定义
//!
//! 注册表中每个键对应一个 [`BeanDefine`]，保存实例、声明类型、单例标记
//! 以及实例可以被转换成的接口视图。

use infrastructure_common::{Bean, BeanInstance, Interface, TypeInfo};
use parking_lot::RwLock;
use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

/// 定义中可被替换的部分
struct Slot {
    bean_type: TypeInfo,
    bean: BeanInstance,
    /// 第 0 个视图总是具体类型自身
    views: Arc<[Interface]>,
}

impl Slot {
    fn of<T: Bean>(bean: Arc<T>) -> Self {
        let mut views = vec![Interface::identity::<T>()];
        views.extend(T::interfaces());

        Self {
            bean_type: TypeInfo::of::<T>(),
            bean,
            views: views.into(),
        }
    }
}

/// Bean 定义
///
/// 克隆一个定义只会复制句柄，同一次注册在类型键和接口别名下的所有
/// 副本共享同一个槽位，替换实例后从任何一个键都能看到新实例。
#[derive(Clone)]
pub struct BeanDefine {
    slot: Arc<RwLock<Slot>>,
    singleton: bool,
}

impl BeanDefine {
    /// 为已构造的实例创建定义，单例标记取自 [`Bean::singleton`]
    pub fn new<T: Bean>(bean: Arc<T>) -> Self {
        Self {
            slot: Arc::new(RwLock::new(Slot::of(bean))),
            singleton: T::singleton(),
        }
    }

    /// 覆盖单例标记
    pub fn with_singleton(mut self, singleton: bool) -> Self {
        self.singleton = singleton;
        self
    }

    /// 实例的具体类型
    pub fn bean_type(&self) -> TypeInfo {
        self.slot.read().bean_type
    }

    /// 类型擦除后的实例
    pub fn bean(&self) -> BeanInstance {
        Arc::clone(&self.slot.read().bean)
    }

    /// 是否为单例
    pub fn is_singleton(&self) -> bool {
        self.singleton
    }

    /// 实例声明实现的接口，不包含具体类型自身
    pub fn interfaces(&self) -> Vec<TypeInfo> {
        self.slot
            .read()
            .views
            .iter()
            .skip(1)
            .map(Interface::type_info)
            .collect()
    }

    /// 实例能否以 `type_id` 对应的类型取出
    pub fn provides(&self, type_id: TypeId) -> bool {
        self.slot
            .read()
            .views
            .iter()
            .any(|view| view.type_info().id == type_id)
    }

    /// 以具体类型或接口类型取出实例
    ///
    /// 类型不匹配时返回 `None`
    pub fn resolve<T: ?Sized + 'static>(&self) -> Option<Arc<T>> {
        let type_id = TypeId::of::<T>();
        let slot = self.slot.read();
        slot.views
            .iter()
            .find(|view| view.type_info().id == type_id)?
            .cast::<T>(&slot.bean)
    }

    /// 两个定义是否共享同一个槽位
    pub fn shares_slot(&self, other: &BeanDefine) -> bool {
        Arc::ptr_eq(&self.slot, &other.slot)
    }

    /// 替换实例，保留原有的单例标记
    pub fn set_bean<T: Bean>(&self, bean: Arc<T>) {
        *self.slot.write() = Slot::of(bean);
    }

    /// 用另一个定义的实例替换当前实例，保留原有的单例标记
    pub fn replace_bean(&self, source: &BeanDefine) {
        if self.shares_slot(source) {
            return;
        }
        let replacement = {
            let source = source.slot.read();
            Slot {
                bean_type: source.bean_type,
                bean: Arc::clone(&source.bean),
                views: Arc::clone(&source.views),
            }
        };
        *self.slot.write() = replacement;
    }
}

impl fmt::Debug for BeanDefine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeanDefine")
            .field("bean_type", &self.bean_type().name())
            .field("singleton", &self.singleton)
            .field(
                "interfaces",
                &self
                    .interfaces()
                    .iter()
                    .map(|info| info.name())
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}
