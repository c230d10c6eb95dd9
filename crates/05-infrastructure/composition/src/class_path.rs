//! 类路径
//!
//! 由有序的根目录和归档文件组成，负责把包路径解析为资源位置：
//! 目录根得到 `file:` URL，归档根得到 `jar:file:...!/包路径` URL。

use di_abstractions::ResourceResolver;
use std::ffi::OsStr;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;
use zip::ZipArchive;

/// 被视为归档的文件扩展名
const ARCHIVE_EXTENSIONS: [&str; 2] = ["jar", "zip"];

/// 类路径
#[derive(Debug, Clone, Default)]
pub struct ClassPath {
    roots: Vec<PathBuf>,
}

impl ClassPath {
    /// 创建空的类路径
    pub fn new() -> Self {
        Self::default()
    }

    /// 按平台路径分隔符解析，例如 `target/types:lib/app.jar`
    pub fn parse(value: &str) -> Self {
        Self {
            roots: std::env::split_paths(value)
                .filter(|root| !root.as_os_str().is_empty())
                .collect(),
        }
    }

    /// 追加根目录或归档
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.add_root(root);
        self
    }

    /// 追加根目录或归档
    pub fn add_root(&mut self, root: impl Into<PathBuf>) {
        self.roots.push(root.into());
    }

    /// 所有根
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    fn resolve_directory(root: &Path, path: &str) -> io::Result<Option<Url>> {
        let directory = root.join(path);
        if !directory.is_dir() {
            return Ok(None);
        }
        let directory = directory.canonicalize()?;
        Url::from_directory_path(&directory)
            .map(Some)
            .map_err(|()| invalid_path(&directory))
    }

    fn resolve_archive(root: &Path, path: &str) -> io::Result<Option<Url>> {
        let archive = ZipArchive::new(File::open(root)?)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let prefix = format!("{}/", path);
        let found = path.is_empty() || archive.file_names().any(|name| name.starts_with(&prefix));
        if !found {
            return Ok(None);
        }

        let root = root.canonicalize()?;
        let archive_url = Url::from_file_path(&root).map_err(|()| invalid_path(&root))?;
        let location = format!("jar:{}!/{}", archive_url, path);
        Url::parse(&location)
            .map(Some)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))
    }
}

impl ResourceResolver for ClassPath {
    fn get_resources(&self, path: &str) -> io::Result<Vec<Url>> {
        let path = path.trim_matches('/');
        let mut resources = Vec::new();

        for root in &self.roots {
            let resource = if root.is_dir() {
                Self::resolve_directory(root, path)?
            } else if is_archive(root) {
                Self::resolve_archive(root, path)?
            } else {
                debug!("忽略类路径条目: {}", root.display());
                None
            };
            resources.extend(resource);
        }

        debug!("解析资源 {}: {:?}", path, resources);
        Ok(resources)
    }
}

/// 路径是否为归档文件
pub fn is_archive(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(OsStr::to_str)
            .is_some_and(|extension| {
                ARCHIVE_EXTENSIONS
                    .iter()
                    .any(|candidate| extension.eq_ignore_ascii_case(candidate))
            })
}

fn invalid_path(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("无法转换为 URL 的路径: {}", path.display()),
    )
}
