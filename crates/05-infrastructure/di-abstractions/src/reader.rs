//! 类型发现抽象接口
//!
//! 可发现的类型以 `<类型名>.type` 条目的形式放在包路径下，
//! 可以是磁盘上的松散文件，也可以是 `.jar`/`.zip` 归档中的条目。

use crate::scanner::ScannerRequest;
use infrastructure_common::TypeInfo;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};
use std::io;
use std::path::PathBuf;
use url::Url;

/// 类型条目的文件后缀
pub const TYPE_ENTRY_SUFFIX: &str = ".type";

/// 类型条目的来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassSource {
    /// 磁盘上的条目文件
    Directory(PathBuf),
    /// 归档中的条目
    Archive {
        /// 归档文件路径
        archive: PathBuf,
        /// 归档内的条目名称
        entry: String,
    },
}

/// 发现的类型描述
///
/// 相等性只由点分类型名决定
#[derive(Debug, Clone)]
pub struct ClassInfo {
    class_name: String,
    source: ClassSource,
}

impl ClassInfo {
    /// 创建类型描述
    pub fn new(class_name: impl Into<String>, source: ClassSource) -> Self {
        Self {
            class_name: class_name.into(),
            source,
        }
    }

    /// 从包内的相对条目路径创建，例如 `app/services/UserService.type`
    pub fn from_entry_path(entry_path: &str, source: ClassSource) -> Option<Self> {
        let stem = entry_path.strip_suffix(TYPE_ENTRY_SUFFIX)?;
        let class_name = stem.trim_matches('/').replace('/', ".");
        if class_name.is_empty() {
            return None;
        }
        Some(Self::new(class_name, source))
    }

    /// 点分类型名
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// 不含包名的类型名
    pub fn simple_name(&self) -> &str {
        self.class_name
            .rsplit('.')
            .next()
            .unwrap_or(&self.class_name)
    }

    /// 点分包名
    pub fn package_name(&self) -> &str {
        self.class_name
            .rfind('.')
            .map_or("", |index| &self.class_name[..index])
    }

    /// 条目来源
    pub fn source(&self) -> &ClassSource {
        &self.source
    }

    /// 是否来自归档
    pub fn is_archive(&self) -> bool {
        matches!(self.source, ClassSource::Archive { .. })
    }
}

impl PartialEq for ClassInfo {
    fn eq(&self, other: &Self) -> bool {
        self.class_name == other.class_name
    }
}

impl Eq for ClassInfo {}

impl Hash for ClassInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.class_name.hash(state);
    }
}

/// 类型读取器 trait
///
/// 读取失败只记录日志，返回已读取到的部分结果
pub trait ClassReader: Send + Sync {
    /// 读取满足扫描请求的所有类型
    fn read_classes(&self, request: &ScannerRequest) -> HashSet<ClassInfo>;
}

/// 资源定位 trait
pub trait ResourceResolver: Send + Sync {
    /// 查找与 `/` 分隔的路径对应的所有资源位置
    fn get_resources(&self, path: &str) -> io::Result<Vec<Url>>;
}

/// 类型元数据 trait，供扫描过滤使用
pub trait TypeMetadata: Send + Sync {
    /// `class_name` 是否实现了 `parent`
    fn implements(&self, class_name: &str, parent: &TypeInfo) -> bool;

    /// `class_name` 是否带有指定标注
    fn has_annotation(&self, class_name: &str, annotation: &str) -> bool;
}

impl<T: TypeMetadata + ?Sized> TypeMetadata for &T {
    fn implements(&self, class_name: &str, parent: &TypeInfo) -> bool {
        (**self).implements(class_name, parent)
    }

    fn has_annotation(&self, class_name: &str, annotation: &str) -> bool {
        (**self).has_annotation(class_name, annotation)
    }
}
