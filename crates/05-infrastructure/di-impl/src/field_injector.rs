//! 实例注入器

use di_abstractions::{InstanceField, Injector, Ioc};
use infrastructure_common::{DependencyError, DependencyResult};
use tracing::debug;

/// 按字段声明的类型从注册表解析实例并赋值
pub struct FieldInjector<'a, B> {
    ioc: &'a dyn Ioc,
    field: &'a InstanceField<B>,
}

impl<'a, B> FieldInjector<'a, B> {
    /// 创建实例注入器
    pub fn new(ioc: &'a dyn Ioc, field: &'a InstanceField<B>) -> Self {
        Self { ioc, field }
    }
}

impl<B> Injector<B> for FieldInjector<'_, B> {
    fn injection(&self, bean: &mut B) -> DependencyResult<()> {
        if !self.field.assign(bean, self.ioc) {
            return Err(DependencyError::missing_dependency(
                self.field.name(),
                self.field.required().name(),
            ));
        }

        debug!(
            "注入字段 {}: {}",
            self.field.name(),
            self.field.required()
        );
        Ok(())
    }
}
