//! 归档读取器
//!
//! 枚举 `jar:` 资源位置对应归档中的 `.type` 条目，
//! 无法读取的条目和归档只记录警告。

use di_abstractions::{
    ClassInfo, ClassReader, ClassSource, ResourceResolver, ScannerRequest, TypeMetadata,
};
use std::collections::HashSet;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, warn};
use url::Url;
use zip::result::ZipResult;
use zip::ZipArchive;

/// 从 `.jar`/`.zip` 归档读取类型
pub struct JarReaderImpl {
    resolver: Arc<dyn ResourceResolver>,
    metadata: Option<Arc<dyn TypeMetadata>>,
}

impl JarReaderImpl {
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

    fn read_archive(
        &self,
        archive_path: &Path,
        prefix: &str,
        request: &ScannerRequest,
        classes: &mut HashSet<ClassInfo>,
    ) -> ZipResult<()> {
        let mut archive = ZipArchive::new(File::open(archive_path)?)?;

        for index in 0..archive.len() {
            let entry = match archive.by_index(index) {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("跳过无法读取的归档条目 {}#{}: {}", archive_path.display(), index, e);
                    continue;
                }
            };
            if entry.is_dir() {
                continue;
            }

            let name = entry.name().to_string();
            let relative = if prefix.is_empty() {
                name.as_str()
            } else {
                match name.strip_prefix(prefix).and_then(|rest| rest.strip_prefix('/')) {
                    Some(relative) => relative,
                    None => continue,
                }
            };
            if !request.is_recursive() && relative.contains('/') {
                continue;
            }

            let source = ClassSource::Archive {
                archive: archive_path.to_path_buf(),
                entry: name.clone(),
            };
            if let Some(info) = ClassInfo::from_entry_path(&name, source) {
                if request.accepts(info.class_name(), self.metadata.as_deref()) {
                    debug!("发现类型: {}", info.class_name());
                    classes.insert(info);
                }
            }
        }
        Ok(())
    }
}

impl ClassReader for JarReaderImpl {
    fn read_classes(&self, request: &ScannerRequest) -> HashSet<ClassInfo> {
        let mut classes = HashSet::new();
        let resources = match self.resolver.get_resources(&request.package_path()) {
            Ok(resources) => resources,
            Err(e) => {
                error!("解析包 {} 失败: {}", request.package_name(), e);
                return classes;
            }
        };

        for url in resources.iter().filter(|url| url.scheme() == "jar") {
            let Some((archive_path, prefix)) = split_jar_url(url) else {
                warn!("无法识别的归档位置: {}", url);
                continue;
            };
            if let Err(e) = self.read_archive(&archive_path, &prefix, request, &mut classes) {
                warn!("读取归档失败 {}: {}", archive_path.display(), e);
            }
        }
        classes
    }
}

/// 把 `jar:file:/a/b.jar!/pkg/path` 拆成归档路径和归档内的包路径
pub fn split_jar_url(url: &Url) -> Option<(PathBuf, String)> {
    let rest = url.as_str().strip_prefix("jar:")?;
    let (archive, entry) = rest
        .split_once("!/")
        .or_else(|| rest.strip_suffix('!').map(|archive| (archive, "")))?;
    let archive_path = Url::parse(archive).ok()?.to_file_path().ok()?;
    Some((archive_path, entry.trim_matches('/').to_string()))
}
