//! 从归档启动时设置进程级的运行环境标记
//!
//! 标记在进程内只能设置一次，因此单独成为一个测试二进制

use component_macros::Bean;
use infrastructure_common::TypeInfo;
use infrastructure_composition::{DynamicContext, IocBuilder};
use std::fs::File;
use std::io::Write;
use tempfile::TempDir;
use zip::write::FileOptions;
use zip::ZipWriter;

mod app {
    use super::*;

    #[derive(Default, Bean)]
    pub struct Launcher;
}

#[test]
fn test_archive_root_marks_jar_context() {
    let root = TempDir::new().unwrap();
    let archive = root.path().join("app.jar");
    let entry = format!(
        "{}.type",
        TypeInfo::of::<app::Launcher>().dotted_name().replace('.', "/")
    );
    let mut writer = ZipWriter::new(File::create(&archive).unwrap());
    writer.start_file(entry, FileOptions::default()).unwrap();
    writer.write_all(b"").unwrap();
    writer.finish().unwrap();

    assert!(!DynamicContext::is_jar_context());

    let application = IocBuilder::new()
        .add_class_path(&archive)
        .scan_package(TypeInfo::of::<app::Launcher>().package_name())
        .probe_type::<app::Launcher>()
        .build()
        .unwrap();

    assert!(DynamicContext::is_jar_context());
    assert!(DynamicContext::init("file:///work/types/app/"));
    assert!(application.get_bean::<app::Launcher>().is_some());
}
