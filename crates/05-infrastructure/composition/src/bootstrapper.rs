//! IoC 启动器
//!
//! 负责协调类型发现、登记查找、排序和加载的顺序

use crate::dynamic_context::DynamicContext;
use config_abstractions::Environment;
use di_abstractions::{ClassInfo, Ioc};
use di_impl::{BeanRegistration, TypeCatalog};
use infrastructure_common::{ComponentError, InfrastructureError, InfrastructureResult};
use std::collections::HashSet;
use tracing::{debug, error, info};

/// 启动结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapReport {
    /// 发现的类型数量
    pub discovered: usize,
    /// 按加载顺序排列的已注册类型
    pub registered: Vec<String>,
    /// 发现但没有登记的类型
    pub skipped: Vec<String>,
}

/// IoC 启动器
pub struct IocBootstrapper<'a> {
    context: &'a DynamicContext,
    catalog: &'a TypeCatalog,
    packages: Vec<String>,
    strict: bool,
}

impl<'a> IocBootstrapper<'a> {
    /// 创建启动器
    pub fn new(context: &'a DynamicContext, catalog: &'a TypeCatalog) -> Self {
        Self {
            context,
            catalog,
            packages: Vec::new(),
            strict: false,
        }
    }

    /// 严格模式下，空包和未登记的类型都会中止启动
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// 添加要扫描的包
    pub fn add_package(mut self, package_name: impl Into<String>) -> Self {
        self.packages.push(package_name.into());
        self
    }

    /// 添加多个要扫描的包
    pub fn with_packages<I, S>(mut self, packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.packages.extend(packages.into_iter().map(Into::into));
        self
    }

    /// 扫描所有包，同名类型只保留一个
    pub fn scan(&self) -> InfrastructureResult<HashSet<ClassInfo>> {
        let mut classes = HashSet::new();
        for package in &self.packages {
            let before = classes.len();
            classes.extend(self.context.recursion_find_classes(package));
            if self.strict && classes.len() == before {
                return Err(ComponentError::discovery_error(format!(
                    "包 {} 中没有发现新的类型",
                    package
                ))
                .into());
            }
        }
        Ok(classes)
    }

    /// 按加载顺序排列登记信息，顺序相同时按类型名排列
    fn resolve_registrations(
        &self,
        classes: &HashSet<ClassInfo>,
        report: &mut BootstrapReport,
    ) -> InfrastructureResult<Vec<BeanRegistration>> {
        let mut registrations = Vec::new();
        for class in classes {
            match self.catalog.get(class.class_name()) {
                Some(registration) => registrations.push(registration),
                None if self.strict => {
                    return Err(ComponentError::UnknownType {
                        class_name: class.class_name().to_string(),
                    }
                    .into());
                }
                None => {
                    debug!("未登记的类型，跳过: {}", class.class_name());
                    report.skipped.push(class.class_name().to_string());
                }
            }
        }

        report.skipped.sort();
        registrations.sort_by(|a, b| {
            a.order()
                .cmp(&b.order())
                .then_with(|| a.class_name().cmp(b.class_name()))
        });
        Ok(registrations)
    }

    /// 发现并加载所有类型
    ///
    /// 任何一个类型加载失败都会中止启动
    pub fn bootstrap(
        &self,
        ioc: &dyn Ioc,
        environment: &dyn Environment,
    ) -> InfrastructureResult<BootstrapReport> {
        info!("开始启动 IoC 容器，扫描包: {:?}", self.packages);

        let classes = self.scan()?;
        let mut report = BootstrapReport {
            discovered: classes.len(),
            ..BootstrapReport::default()
        };

        for registration in self.resolve_registrations(&classes, &mut report)? {
            registration.load(ioc, environment).map_err(|e| {
                error!("加载 Bean 失败: {}, 原因: {}", registration.class_name(), e);
                InfrastructureError::from(e)
            })?;
            report.registered.push(registration.class_name().to_string());
        }

        info!(
            "IoC 容器启动完成: 发现 {} 个类型，注册 {} 个，跳过 {} 个",
            report.discovered,
            report.registered.len(),
            report.skipped.len()
        );
        Ok(report)
    }
}
