//! 从目录启动时设置进程级的运行环境标记

use component_macros::Bean;
use infrastructure_common::TypeInfo;
use infrastructure_composition::{DynamicContext, IocBuilder};
use std::fs::{self, File};
use tempfile::TempDir;

mod app {
    use super::*;

    #[derive(Default, Bean)]
    pub struct Launcher;
}

#[test]
fn test_directory_root_marks_loose_context() {
    let root = TempDir::new().unwrap();
    let entry = root.path().join(format!(
        "{}.type",
        TypeInfo::of::<app::Launcher>().dotted_name().replace('.', "/")
    ));
    fs::create_dir_all(entry.parent().unwrap()).unwrap();
    File::create(&entry).unwrap();

    let application = IocBuilder::new()
        .add_class_path(root.path())
        .scan_package(TypeInfo::of::<app::Launcher>().package_name())
        .probe_package(TypeInfo::of::<app::Launcher>().package_name())
        .build()
        .unwrap();

    assert!(!DynamicContext::is_jar_context());
    // 标记已经设置，之后的归档位置不再生效
    assert!(!DynamicContext::init("jar:file:///lib/app.jar!/app"));
    assert!(application.get_bean::<app::Launcher>().is_some());
}
