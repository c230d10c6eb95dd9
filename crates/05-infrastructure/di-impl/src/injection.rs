//! 注入驱动
//!
//! 新构造的 Bean 先完成所有字段注入，再发布到注册表中

use crate::field_injector::FieldInjector;
use crate::value_injector::ValueInjector;
use config_abstractions::Environment;
use di_abstractions::{BeanDefine, InjectionPoint, Injectable, Injector, Ioc};
use infrastructure_common::{BeanFactory, DependencyResult, TypeInfo};
use std::sync::Arc;
use tracing::{debug, error, info};

/// 对目标对象的所有注入点执行注入
///
/// 任何实例依赖缺失都会中止注入并返回错误
pub fn inject_fields<B: Injectable>(
    bean: &mut B,
    ioc: &dyn Ioc,
    environment: &dyn Environment,
) -> DependencyResult<()> {
    let points = B::injection_points();
    debug!("注入 {} 个字段: {}", points.len(), TypeInfo::of::<B>());

    for point in &points {
        match point {
            InjectionPoint::Instance(field) => FieldInjector::new(ioc, field).injection(bean)?,
            InjectionPoint::Value(field) => ValueInjector::new(environment, field).injection(bean)?,
        }
    }
    Ok(())
}

/// 构造、注入并注册一个 Bean
pub fn load_bean<T: BeanFactory + Injectable>(
    ioc: &dyn Ioc,
    environment: &dyn Environment,
) -> DependencyResult<Arc<T>> {
    let type_info = TypeInfo::of::<T>();
    let mut bean = T::create().map_err(|e| {
        error!("创建 Bean 失败: {}, 原因: {}", type_info, e);
        e
    })?;

    inject_fields(&mut bean, ioc, environment)?;

    let bean = Arc::new(bean);
    ioc.add_bean_define(type_info.name(), BeanDefine::new(Arc::clone(&bean)));
    info!("加载 Bean: {}", type_info);
    Ok(bean)
}
