//! 注入器抽象接口
//!
//! 每个可注入字段以 [`InjectionPoint`] 的形式登记名称、需要的类型和
//! setter 函数，注入器只通过这些 setter 修改目标对象。

use crate::ioc::{Ioc, IocExt};
use infrastructure_common::{DependencyResult, TypeInfo};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// 注入器 trait
///
/// 一个注入器只负责目标对象上的一个字段，用完即弃
pub trait Injector<B> {
    /// 对目标对象执行注入
    fn injection(&self, bean: &mut B) -> DependencyResult<()>;
}

type Assign<B> = Box<dyn Fn(&mut B, &dyn Ioc) -> bool + Send + Sync>;

/// 按类型从注册表解析依赖的字段
pub struct InstanceField<B> {
    name: &'static str,
    required: TypeInfo,
    assign: Assign<B>,
}

impl<B: 'static> InstanceField<B> {
    /// 登记一个需要 `V` 类型依赖的字段
    pub fn new<V: ?Sized + 'static>(name: &'static str, setter: fn(&mut B, Arc<V>)) -> Self {
        Self {
            name,
            required: TypeInfo::of::<V>(),
            assign: Box::new(move |bean: &mut B, ioc: &dyn Ioc| match ioc.get_bean::<V>() {
                Some(dependency) => {
                    setter(bean, dependency);
                    true
                }
                None => false,
            }),
        }
    }
}

impl<B> InstanceField<B> {
    /// 字段名称
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// 字段需要的类型
    pub fn required(&self) -> TypeInfo {
        self.required
    }

    /// 从注册表解析并赋值，找不到依赖时返回 false
    pub fn assign(&self, bean: &mut B, ioc: &dyn Ioc) -> bool {
        (self.assign)(bean, ioc)
    }
}

impl<B> fmt::Debug for InstanceField<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstanceField")
            .field("name", &self.name)
            .field("required", &self.required.name())
            .finish()
    }
}

/// 配置值字段的赋值方式
pub enum ValueSlot<B> {
    /// 字符串字段
    Text(fn(&mut B, String)),
    /// 字符串列表字段
    List(fn(&mut B, Vec<String>)),
    /// 字符串映射字段
    Map(fn(&mut B, HashMap<String, String>)),
    /// 不支持的字段类型，注入时保持不变
    Unsupported(&'static str),
}

impl<B> ValueSlot<B> {
    /// 槽位类型的描述
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Unsupported(type_name) => *type_name,
        }
    }
}

/// 从配置环境读取值的字段
pub struct ValueField<B> {
    name: &'static str,
    key: String,
    slot: ValueSlot<B>,
}

impl<B> ValueField<B> {
    /// 通用构造
    pub fn new(name: &'static str, key: impl Into<String>, slot: ValueSlot<B>) -> Self {
        Self {
            name,
            key: key.into(),
            slot,
        }
    }

    /// 字符串字段
    pub fn text(name: &'static str, key: impl Into<String>, setter: fn(&mut B, String)) -> Self {
        Self::new(name, key, ValueSlot::Text(setter))
    }

    /// 列表字段
    pub fn list(
        name: &'static str,
        key: impl Into<String>,
        setter: fn(&mut B, Vec<String>),
    ) -> Self {
        Self::new(name, key, ValueSlot::List(setter))
    }

    /// 映射字段
    pub fn map(
        name: &'static str,
        key: impl Into<String>,
        setter: fn(&mut B, HashMap<String, String>),
    ) -> Self {
        Self::new(name, key, ValueSlot::Map(setter))
    }

    /// 类型不受支持的字段
    pub fn unsupported(name: &'static str, key: impl Into<String>, type_name: &'static str) -> Self {
        Self::new(name, key, ValueSlot::Unsupported(type_name))
    }

    /// 字段名称
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// 配置键
    pub fn key(&self) -> &str {
        &self.key
    }

    /// 赋值方式
    pub fn slot(&self) -> &ValueSlot<B> {
        &self.slot
    }
}

impl<B> fmt::Debug for ValueField<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueField")
            .field("name", &self.name)
            .field("key", &self.key)
            .field("slot", &self.slot.kind())
            .finish()
    }
}

/// 注入点
pub enum InjectionPoint<B> {
    /// 注入注册表中的实例
    Instance(InstanceField<B>),
    /// 注入配置值
    Value(ValueField<B>),
}

impl<B> InjectionPoint<B> {
    /// 字段名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::Instance(field) => field.name(),
            Self::Value(field) => field.name(),
        }
    }
}

impl<B> fmt::Debug for InjectionPoint<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Instance(field) => f.debug_tuple("Instance").field(field).finish(),
            Self::Value(field) => f.debug_tuple("Value").field(field).finish(),
        }
    }
}

/// 声明可注入字段的类型
pub trait Injectable: Sized + 'static {
    /// 该类型的所有注入点，按声明顺序排列
    fn injection_points() -> Vec<InjectionPoint<Self>> {
        Vec::new()
    }
}
