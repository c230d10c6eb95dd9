//! 扫描请求
//!
//! 描述一次类型发现的范围：包名、是否递归以及可选的父类型和标注过滤条件

use crate::reader::TypeMetadata;
use infrastructure_common::TypeInfo;

/// 扫描请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannerRequest {
    package_name: String,
    recursive: bool,
    parent_type: Option<TypeInfo>,
    annotation: Option<String>,
}

impl ScannerRequest {
    /// 为指定包创建非递归的扫描请求
    pub fn new(package_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            recursive: false,
            parent_type: None,
            annotation: None,
        }
    }

    /// 设置是否递归扫描子包
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// 只接受实现了 `T` 的类型
    pub fn parent<T: ?Sized + 'static>(self) -> Self {
        self.parent_type(TypeInfo::of::<T>())
    }

    /// 只接受实现了指定类型的类型
    pub fn parent_type(mut self, parent_type: TypeInfo) -> Self {
        self.parent_type = Some(parent_type);
        self
    }

    /// 只接受带有指定标注的类型
    pub fn annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotation = Some(annotation.into());
        self
    }

    /// 点分形式的包名
    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    /// 以 `/` 分隔的包路径
    pub fn package_path(&self) -> String {
        self.package_name.replace('.', "/")
    }

    /// 是否递归
    pub fn is_recursive(&self) -> bool {
        self.recursive
    }

    /// 父类型过滤条件
    pub fn parent_filter(&self) -> Option<&TypeInfo> {
        self.parent_type.as_ref()
    }

    /// 标注过滤条件
    pub fn annotation_filter(&self) -> Option<&str> {
        self.annotation.as_deref()
    }

    /// 是否设置了任何过滤条件
    pub fn has_filters(&self) -> bool {
        self.parent_type.is_some() || self.annotation.is_some()
    }

    /// 判断发现的类型是否满足过滤条件
    ///
    /// 设置了过滤条件但没有元数据来源时，任何类型都不满足
    pub fn accepts(&self, class_name: &str, metadata: Option<&dyn TypeMetadata>) -> bool {
        if !self.has_filters() {
            return true;
        }
        let Some(metadata) = metadata else {
            return false;
        };

        let parent_ok = self
            .parent_type
            .as_ref()
            .map_or(true, |parent| metadata.implements(class_name, parent));
        let annotation_ok = self
            .annotation
            .as_deref()
            .map_or(true, |annotation| metadata.has_annotation(class_name, annotation));

        parent_ok && annotation_ok
    }
}
