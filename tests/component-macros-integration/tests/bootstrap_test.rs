//! derive(Bean) 与类型发现的端到端启动测试

use component_macros::Bean;
use di_abstractions::{ClassReader, IocExt, ScannerRequest};
use di_impl::TypeCatalog;
use infrastructure_common::{InfrastructureError, TypeInfo};
use infrastructure_composition::{ClassPath, DynamicContext, IocBuilder};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use zip::write::FileOptions;
use zip::ZipWriter;

mod beans {
    use super::*;
    use std::collections::HashMap;

    pub trait Repository: Send + Sync {
        fn find(&self, id: &str) -> Option<String>;
    }

    #[derive(Default, Bean)]
    #[bean(order = 1, implements(dyn Repository + Send + Sync))]
    pub struct MemoryRepository {
        #[value("repository.entries")]
        pub entries: HashMap<String, String>,
    }

    impl Repository for MemoryRepository {
        fn find(&self, id: &str) -> Option<String> {
            self.entries.get(id).cloned()
        }
    }

    #[derive(Default, Bean)]
    #[bean(order = 2, annotations("service"))]
    pub struct UserService {
        #[inject]
        pub repository: Option<Arc<dyn Repository + Send + Sync>>,
        #[value("service.name")]
        pub name: String,
        #[value(key = "service.admins")]
        pub admins: Vec<String>,
    }
}

mod broken {
    use super::*;

    pub trait Mailer: Send + Sync {}

    #[derive(Default, Bean)]
    pub struct Notifier {
        #[inject]
        pub mailer: Option<Arc<dyn Mailer + Send + Sync>>,
    }
}

/// 类型在类路径中的条目路径
fn type_entry(info: TypeInfo) -> String {
    format!("{}.type", info.dotted_name().replace('.', "/"))
}

fn bean_entries() -> Vec<String> {
    vec![
        type_entry(TypeInfo::of::<beans::MemoryRepository>()),
        type_entry(TypeInfo::of::<beans::UserService>()),
    ]
}

fn write_directory(root: &Path, entries: &[String]) {
    for entry in entries {
        let path = root.join(entry);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        File::create(path).unwrap();
    }
}

fn write_archive(path: &Path, entries: &[String]) {
    let mut writer = ZipWriter::new(File::create(path).unwrap());
    for entry in entries {
        writer.start_file(entry.as_str(), FileOptions::default()).unwrap();
        writer.write_all(b"").unwrap();
    }
    writer.finish().unwrap();
}

fn beans_package() -> String {
    TypeInfo::of::<beans::UserService>().package_name()
}

fn builder() -> IocBuilder {
    IocBuilder::new()
        .set_property("repository.entries", "1:alice,2:bob")
        .set_property("service.name", "users")
        .set_property("service.admins", "alice,carol")
        .scan_package(beans_package())
}

fn assert_wired(application: &infrastructure_composition::IocApplication) {
    let service = application.get_bean::<beans::UserService>().unwrap();
    assert_eq!(service.name, "users");
    assert_eq!(service.admins, vec!["alice", "carol"]);
    assert_eq!(
        service.repository.as_ref().unwrap().find("2").as_deref(),
        Some("bob")
    );

    let repository = application
        .get_bean::<dyn beans::Repository + Send + Sync>()
        .unwrap();
    assert_eq!(repository.find("1").as_deref(), Some("alice"));
}

#[test]
fn test_derive_registers_in_global_catalog() {
    let class_name = TypeInfo::of::<beans::UserService>().dotted_name();
    let registration = TypeCatalog::global().get(&class_name).unwrap();

    assert_eq!(registration.order(), 2);
    assert!(registration.is_singleton());
    assert_eq!(registration.annotations(), &["service"]);
    assert!(TypeCatalog::global()
        .get(&TypeInfo::of::<beans::MemoryRepository>().dotted_name())
        .unwrap()
        .interfaces()
        .iter()
        .any(|info| info.simple_name() == "Repository"));
}

#[test]
fn test_bootstrap_from_directory() {
    let root = TempDir::new().unwrap();
    write_directory(root.path(), &bean_entries());

    let application = builder().add_class_path(root.path()).build().unwrap();

    assert_eq!(
        application.report().registered,
        vec![
            TypeInfo::of::<beans::MemoryRepository>().dotted_name(),
            TypeInfo::of::<beans::UserService>().dotted_name(),
        ]
    );
    assert!(!application.context().is_jar_package(&beans_package()));
    assert_wired(&application);
}

#[test]
fn test_bootstrap_from_archive() {
    let root = TempDir::new().unwrap();
    let archive = root.path().join("beans.jar");
    write_archive(&archive, &bean_entries());

    let application = builder().add_class_path(&archive).build().unwrap();

    assert_eq!(application.report().registered.len(), 2);
    assert!(application.context().is_jar_package(&beans_package()));
    assert_wired(&application);
}

#[test]
fn test_annotation_filter_uses_derived_metadata() {
    let root = TempDir::new().unwrap();
    write_directory(root.path(), &bean_entries());
    let context = DynamicContext::new(Arc::new(ClassPath::new().with_root(root.path())));
    let package = beans_package();

    let request = ScannerRequest::new(package.as_str())
        .recursive(true)
        .annotation("service");
    let classes = context.get_class_reader(&package).read_classes(&request);

    let names: Vec<_> = classes.iter().map(|info| info.simple_name()).collect();
    assert_eq!(names, vec!["UserService"]);
}

#[test]
fn test_missing_dependency_aborts_bootstrap() {
    let root = TempDir::new().unwrap();
    write_directory(
        root.path(),
        &[type_entry(TypeInfo::of::<broken::Notifier>())],
    );

    let result = IocBuilder::new()
        .add_class_path(root.path())
        .scan_package(TypeInfo::of::<broken::Notifier>().package_name())
        .build();

    assert!(matches!(
        result,
        Err(InfrastructureError::DependencyError { .. })
    ));
}
