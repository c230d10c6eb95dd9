//! 宏工具函数

use proc_macro2::Span;
use syn::{Field, Ident, Type};

/// 类型路径最后一段的名称
pub fn last_segment_name(ty: &Type) -> Option<String> {
    match ty {
        Type::Path(type_path) => type_path
            .path
            .segments
            .last()
            .map(|segment| segment.ident.to_string()),
        _ => None,
    }
}

/// 从类型中提取第一个泛型参数
pub fn extract_generic_type(ty: &Type) -> Option<&Type> {
    if let Type::Path(type_path) = ty {
        if let Some(segment) = type_path.path.segments.last() {
            if let syn::PathArguments::AngleBracketed(args) = &segment.arguments {
                if let Some(syn::GenericArgument::Type(inner_type)) = args.args.first() {
                    return Some(inner_type);
                }
            }
        }
    }
    None
}

/// 类型路径最后一段的全部泛型类型参数
pub fn generic_type_args(ty: &Type) -> Vec<&Type> {
    let Type::Path(type_path) = ty else {
        return Vec::new();
    };
    let Some(segment) = type_path.path.segments.last() else {
        return Vec::new();
    };
    match &segment.arguments {
        syn::PathArguments::AngleBracketed(args) => args
            .args
            .iter()
            .filter_map(|arg| match arg {
                syn::GenericArgument::Type(inner) => Some(inner),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// 检查类型是否为 String
pub fn is_string_type(ty: &Type) -> bool {
    last_segment_name(ty).as_deref() == Some("String") && generic_type_args(ty).is_empty()
}

/// 检查类型是否为 Option<T>
pub fn is_option_type(ty: &Type) -> bool {
    last_segment_name(ty).as_deref() == Some("Option")
}

/// 提取 `Option<Arc<T>>` 中的 `T`
pub fn extract_option_arc(ty: &Type) -> Option<&Type> {
    if !is_option_type(ty) {
        return None;
    }
    let arc = extract_generic_type(ty)?;
    if last_segment_name(arc).as_deref() != Some("Arc") {
        return None;
    }
    extract_generic_type(arc)
}

/// 检查字段是否有特定属性
pub fn field_has_attribute(field: &Field, attr_name: &str) -> bool {
    field.attrs.iter().any(|attr| attr.path().is_ident(attr_name))
}

/// 生成唯一的标识符
pub fn generate_unique_ident(base_name: &str, suffix: &str) -> Ident {
    let unique_name = format!("__{}__{}", base_name, suffix);
    Ident::new(&unique_name, Span::call_site())
}
