//! 元数据定义
//!
//! 提供基于 `std::any::type_name` 的类型信息

use std::any::TypeId;
use std::fmt;

/// 未声明顺序的类型使用的默认加载顺序，数值越大加载越靠后
pub const DEFAULT_ORDER: i32 = i32::MAX;

/// 类型信息
///
/// `name` 是规范化后的完整路径名。trait object 的名称不包含 `dyn`
/// 前缀和自动 trait 约束，因此 `dyn app::Greeter + Send + Sync`
/// 的名称为 `app::Greeter`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeInfo {
    /// 完整类型名称
    pub name: &'static str,
    /// 类型ID
    pub id: TypeId,
    /// 模块路径
    pub module_path: &'static str,
}

impl TypeInfo {
    /// 从类型获取类型信息
    pub fn of<T: ?Sized + 'static>() -> Self {
        let name = normalize_type_name(std::any::type_name::<T>());
        let base = base_path(name);
        let module_path = base.rfind("::").map_or("", |index| &base[..index]);

        Self {
            name,
            id: TypeId::of::<T>(),
            module_path,
        }
    }

    /// 获取完整类型名称
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// 获取简短的类型名称（不包含模块路径和泛型参数）
    pub fn simple_name(&self) -> &'static str {
        let base = base_path(self.name);
        base.rsplit("::").next().unwrap_or(base)
    }

    /// 点分形式的类型名称，用于类型发现
    pub fn dotted_name(&self) -> String {
        self.name.replace("::", ".")
    }

    /// 点分形式的包名
    pub fn package_name(&self) -> String {
        self.module_path.replace("::", ".")
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

fn normalize_type_name(raw: &'static str) -> &'static str {
    let name = raw.strip_prefix("dyn ").unwrap_or(raw);
    if name.len() == raw.len() {
        return name;
    }
    // 去掉 `+ Send + Sync` 一类的附加约束
    name.split(" + ").next().unwrap_or(name)
}

fn base_path(name: &'static str) -> &'static str {
    name.split('<').next().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Greeter {}

    struct Formal;

    #[test]
    fn test_type_info_of_struct() {
        let info = TypeInfo::of::<Formal>();

        assert!(info.name().ends_with("metadata::tests::Formal"));
        assert_eq!(info.simple_name(), "Formal");
        assert!(info.module_path.ends_with("metadata::tests"));
        assert_eq!(info.id, TypeId::of::<Formal>());
    }

    #[test]
    fn test_trait_object_name_drops_dyn_and_auto_traits() {
        let bare = TypeInfo::of::<dyn Greeter>();
        let bounded = TypeInfo::of::<dyn Greeter + Send + Sync>();

        assert_eq!(bare.name(), bounded.name());
        assert!(!bounded.name().starts_with("dyn "));
        assert_eq!(bounded.simple_name(), "Greeter");
        assert_ne!(bare.id, bounded.id);
    }

    #[test]
    fn test_simple_name_ignores_generics() {
        let info = TypeInfo::of::<Vec<String>>();

        assert_eq!(info.simple_name(), "Vec");
    }

    #[test]
    fn test_dotted_and_package_names() {
        let info = TypeInfo::of::<Formal>();

        assert!(info.dotted_name().ends_with("metadata.tests.Formal"));
        assert!(info.package_name().ends_with("metadata.tests"));
        assert!(!info.dotted_name().contains("::"));
    }
}
