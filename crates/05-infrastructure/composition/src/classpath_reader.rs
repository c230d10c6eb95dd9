//! 松散文件读取器
//!
//! 遍历 `file:` 资源位置下的 `.type` 条目

use di_abstractions::{
    ClassInfo, ClassReader, ClassSource, ResourceResolver, ScannerRequest, TypeMetadata,
};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error, warn};
use walkdir::WalkDir;

/// 从目录树读取类型
pub struct ClassPathClassReader {
    resolver: Arc<dyn ResourceResolver>,
    metadata: Option<Arc<dyn TypeMetadata>>,
}

impl ClassPathClassReader {
    /// 创建读取器
    pub fn new(resolver: Arc<dyn ResourceResolver>) -> Self {
        Self {
            resolver,
            metadata: None,
        }
    }

    /// 设置扫描过滤使用的元数据来源
    pub fn with_metadata(mut self, metadata: Arc<dyn TypeMetadata>) -> Self {
        self.metadata = Some(metadata);
        self
    }

    fn read_directory(
        &self,
        directory: &Path,
        request: &ScannerRequest,
        classes: &mut HashSet<ClassInfo>,
    ) {
        let package_path = request.package_path();
        let mut walker = WalkDir::new(directory).min_depth(1).follow_links(true);
        if !request.is_recursive() {
            walker = walker.max_depth(1);
        }

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("读取目录条目失败: {}", e);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(directory) else {
                continue;
            };

            let relative = relative
                .components()
                .map(|component| component.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            let entry_path = if package_path.is_empty() {
                relative
            } else {
                format!("{}/{}", package_path, relative)
            };

            let source = ClassSource::Directory(entry.path().to_path_buf());
            if let Some(info) = ClassInfo::from_entry_path(&entry_path, source) {
                if request.accepts(info.class_name(), self.metadata.as_deref()) {
                    debug!("发现类型: {}", info.class_name());
                    classes.insert(info);
                }
            }
        }
    }
}

impl ClassReader for ClassPathClassReader {
    fn read_classes(&self, request: &ScannerRequest) -> HashSet<ClassInfo> {
        let mut classes = HashSet::new();
        let resources = match self.resolver.get_resources(&request.package_path()) {
            Ok(resources) => resources,
            Err(e) => {
                error!("解析包 {} 失败: {}", request.package_name(), e);
                return classes;
            }
        };

        for url in resources.iter().filter(|url| url.scheme() == "file") {
            match url.to_file_path() {
                Ok(directory) => self.read_directory(&directory, request, &mut classes),
                Err(()) => warn!("无法转换为目录的资源位置: {}", url),
            }
        }
        classes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClassPath;
    use infrastructure_common::TypeInfo;
    use std::fs;
    use tempfile::TempDir;

    fn class_path_tree() -> TempDir {
        let root = TempDir::new().unwrap();
        let services = root.path().join("app/services");
        fs::create_dir_all(services.join("admin")).unwrap();
        fs::write(services.join("UserService.type"), "").unwrap();
        fs::write(services.join("README.md"), "").unwrap();
        fs::write(services.join("admin/AuditService.type"), "").unwrap();
        root
    }

    fn reader(root: &TempDir) -> ClassPathClassReader {
        ClassPathClassReader::new(Arc::new(ClassPath::new().with_root(root.path())))
    }

    fn names(classes: &HashSet<ClassInfo>) -> Vec<String> {
        let mut names: Vec<String> = classes.iter().map(|c| c.class_name().to_string()).collect();
        names.sort();
        names
    }

    #[test]
    fn test_non_recursive_reads_top_level_only() {
        let root = class_path_tree();
        let classes = reader(&root).read_classes(&ScannerRequest::new("app.services"));

        assert_eq!(names(&classes), vec!["app.services.UserService"]);
    }

    #[test]
    fn test_recursive_reads_sub_packages() {
        let root = class_path_tree();
        let request = ScannerRequest::new("app.services").recursive(true);
        let classes = reader(&root).read_classes(&request);

        assert_eq!(
            names(&classes),
            vec!["app.services.UserService", "app.services.admin.AuditService"]
        );
        assert!(classes.iter().all(|class| !class.is_archive()));
    }

    #[test]
    fn test_missing_package_yields_empty_set() {
        let root = class_path_tree();

        assert!(reader(&root)
            .read_classes(&ScannerRequest::new("app.unknown"))
            .is_empty());
    }

    #[test]
    fn test_filters_without_metadata_reject_everything() {
        let root = class_path_tree();
        let request = ScannerRequest::new("app.services").parent_type(TypeInfo::of::<String>());

        assert!(reader(&root).read_classes(&request).is_empty());
    }
}
