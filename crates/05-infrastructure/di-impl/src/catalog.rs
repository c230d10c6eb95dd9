//! 类型目录
//!
//! 进程级的类型登记表，把发现阶段得到的点分类型名映射到构造、注入和
//! 注册该类型的加载函数。`#[derive(Bean)]` 在程序启动时自动登记。

use crate::injection::load_bean;
use config_abstractions::Environment;
use di_abstractions::{Injectable, Ioc, TypeMetadata};
use infrastructure_common::{BeanFactory, DependencyResult, TypeInfo};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

type BeanLoader = Arc<dyn Fn(&dyn Ioc, &dyn Environment) -> DependencyResult<()> + Send + Sync>;

/// 一个可加载类型的登记信息
#[derive(Clone)]
pub struct BeanRegistration {
    class_name: String,
    type_info: TypeInfo,
    order: i32,
    singleton: bool,
    annotations: &'static [&'static str],
    interfaces: Vec<TypeInfo>,
    loader: BeanLoader,
}

impl BeanRegistration {
    /// 从类型的 Bean 元数据创建登记信息
    pub fn of<T: BeanFactory + Injectable>() -> Self {
        let type_info = TypeInfo::of::<T>();
        Self {
            class_name: type_info.dotted_name(),
            type_info,
            order: T::order(),
            singleton: T::singleton(),
            annotations: T::annotations(),
            interfaces: T::interfaces().iter().map(|view| view.type_info()).collect(),
            loader: Arc::new(|ioc: &dyn Ioc, environment: &dyn Environment| {
                load_bean::<T>(ioc, environment).map(|_| ())
            }),
        }
    }

    /// 点分类型名
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// 类型信息
    pub fn type_info(&self) -> TypeInfo {
        self.type_info
    }

    /// 加载顺序
    pub fn order(&self) -> i32 {
        self.order
    }

    /// 是否为单例
    pub fn is_singleton(&self) -> bool {
        self.singleton
    }

    /// 标注列表
    pub fn annotations(&self) -> &'static [&'static str] {
        self.annotations
    }

    /// 实现的接口
    pub fn interfaces(&self) -> &[TypeInfo] {
        &self.interfaces
    }

    /// 构造、注入并注册该类型
    pub fn load(&self, ioc: &dyn Ioc, environment: &dyn Environment) -> DependencyResult<()> {
        (self.loader)(ioc, environment)
    }
}

impl fmt::Debug for BeanRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeanRegistration")
            .field("class_name", &self.class_name)
            .field("order", &self.order)
            .field("singleton", &self.singleton)
            .field("annotations", &self.annotations)
            .finish()
    }
}

static GLOBAL_CATALOG: Lazy<TypeCatalog> = Lazy::new(TypeCatalog::new);

/// 类型目录
#[derive(Debug, Default)]
pub struct TypeCatalog {
    entries: RwLock<HashMap<String, BeanRegistration>>,
}

impl TypeCatalog {
    /// 创建空目录
    pub fn new() -> Self {
        Self::default()
    }

    /// 进程级的全局目录
    pub fn global() -> &'static TypeCatalog {
        &GLOBAL_CATALOG
    }

    /// 登记类型，同名登记会覆盖旧的
    pub fn register(&self, registration: BeanRegistration) {
        let name = registration.class_name.clone();
        debug!("登记类型: {}", name);
        if self.entries.write().insert(name.clone(), registration).is_some() {
            warn!("重复登记的类型: {}", name);
        }
    }

    /// 登记类型 `T`
    pub fn register_type<T: BeanFactory + Injectable>(&self) {
        self.register(BeanRegistration::of::<T>());
    }

    /// 按点分类型名查找
    pub fn get(&self, class_name: &str) -> Option<BeanRegistration> {
        self.entries.read().get(class_name).cloned()
    }

    /// 是否已登记
    pub fn contains(&self, class_name: &str) -> bool {
        self.entries.read().contains_key(class_name)
    }

    /// 所有已登记的类型名
    pub fn class_names(&self) -> Vec<String> {
        self.entries.read().keys().cloned().collect()
    }

    /// 已登记数量
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl TypeMetadata for TypeCatalog {
    fn implements(&self, class_name: &str, parent: &TypeInfo) -> bool {
        self.entries.read().get(class_name).is_some_and(|entry| {
            entry.type_info.name() == parent.name()
                || entry
                    .interfaces
                    .iter()
                    .any(|interface| interface.name() == parent.name())
        })
    }

    fn has_annotation(&self, class_name: &str, annotation: &str) -> bool {
        self.entries
            .read()
            .get(class_name)
            .is_some_and(|entry| entry.annotations.iter().any(|candidate| *candidate == annotation))
    }
}
