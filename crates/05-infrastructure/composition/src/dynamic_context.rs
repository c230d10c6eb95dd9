//! 类型发现调度
//!
//! 按包探测资源位置，位置位于归档内时使用归档读取器，否则使用松散文件读取器。
//! 只看第一个资源位置，同一个包不应同时分布在目录和归档中。

use crate::classpath_reader::ClassPathClassReader;
use crate::jar_reader::JarReaderImpl;
use di_abstractions::{ClassInfo, ClassReader, ResourceResolver, ScannerRequest, TypeMetadata};
use di_impl::TypeCatalog;
use infrastructure_common::TypeInfo;
use once_cell::sync::OnceCell;
use std::sync::Arc;
use tracing::{debug, error, info};

/// 归档内资源位置的标记
const ARCHIVE_MARKERS: [&str; 2] = [".jar!", ".zip!"];
/// 归档文件后缀
const ARCHIVE_SUFFIXES: [&str; 2] = [".jar", ".zip"];

static JAR_CONTEXT: OnceCell<bool> = OnceCell::new();

/// 类型发现调度器
pub struct DynamicContext {
    resolver: Arc<dyn ResourceResolver>,
    classpath_reader: Arc<dyn ClassReader>,
    jar_reader: Arc<dyn ClassReader>,
}

impl DynamicContext {
    /// 使用默认读取器创建，扫描过滤使用全局类型目录
    pub fn new(resolver: Arc<dyn ResourceResolver>) -> Self {
        let metadata: Arc<dyn TypeMetadata> = Arc::new(TypeCatalog::global());
        let classpath_reader = ClassPathClassReader::new(Arc::clone(&resolver))
            .with_metadata(Arc::clone(&metadata));
        let jar_reader = JarReaderImpl::new(Arc::clone(&resolver)).with_metadata(metadata);

        Self::with_readers(resolver, Arc::new(classpath_reader), Arc::new(jar_reader))
    }

    /// 使用指定的读取器创建
    pub fn with_readers(
        resolver: Arc<dyn ResourceResolver>,
        classpath_reader: Arc<dyn ClassReader>,
        jar_reader: Arc<dyn ClassReader>,
    ) -> Self {
        Self {
            resolver,
            classpath_reader,
            jar_reader,
        }
    }

    /// 资源定位器
    pub fn resolver(&self) -> &Arc<dyn ResourceResolver> {
        &self.resolver
    }

    /// 包是否位于归档中
    ///
    /// 包名为空或解析失败时按松散文件处理
    pub fn is_jar_package(&self, package_name: &str) -> bool {
        if package_name.trim().is_empty() {
            return false;
        }

        let path = package_name.replace('.', "/");
        match self.resolver.get_resources(&path) {
            Ok(resources) => resources.first().is_some_and(|url| {
                let location = url.as_str();
                ARCHIVE_MARKERS.iter().any(|marker| location.contains(marker))
            }),
            Err(e) => {
                error!("解析包 {} 的资源位置失败: {}", package_name, e);
                false
            }
        }
    }

    /// 选择包对应的读取器
    pub fn get_class_reader(&self, package_name: &str) -> &dyn ClassReader {
        if self.is_jar_package(package_name) {
            debug!("包 {} 使用归档读取器", package_name);
            self.jar_reader.as_ref()
        } else {
            debug!("包 {} 使用目录读取器", package_name);
            self.classpath_reader.as_ref()
        }
    }

    /// 递归查找包下的所有类型，每次调用都会重新扫描
    pub fn recursion_find_classes(&self, package_name: &str) -> impl Iterator<Item = ClassInfo> {
        let request = ScannerRequest::new(package_name).recursive(true);
        let classes = self.get_class_reader(package_name).read_classes(&request);
        info!("包 {} 中发现 {} 个类型", package_name, classes.len());
        classes.into_iter()
    }

    /// 按已知位置设置进程级的归档标记，只有第一次调用生效
    pub fn init(location: &str) -> bool {
        let is_jar = ARCHIVE_SUFFIXES.iter().any(|suffix| location.contains(suffix));
        *JAR_CONTEXT.get_or_init(|| {
            info!("运行环境: {}", if is_jar { "归档" } else { "目录" });
            is_jar
        })
    }

    /// 按类型 `T` 所在包的资源位置设置进程级的归档标记
    pub fn init_for<T: ?Sized + 'static>(&self) -> bool {
        self.init_for_package(&TypeInfo::of::<T>().package_name())
    }

    /// 按包的第一个资源位置设置进程级的归档标记
    ///
    /// 包无法解析时按目录处理
    pub fn init_for_package(&self, package_name: &str) -> bool {
        let package_path = package_name.replace('.', "/");
        let location = match self.resolver.get_resources(&package_path) {
            Ok(resources) => resources
                .first()
                .map(|url| url.to_string())
                .unwrap_or_default(),
            Err(e) => {
                error!("解析包 {} 的资源位置失败: {}", package_name, e);
                String::new()
            }
        };
        Self::init(&location)
    }

    /// 进程是否运行在归档中，未初始化时为 false
    pub fn is_jar_context() -> bool {
        JAR_CONTEXT.get().copied().unwrap_or(false)
    }
}
