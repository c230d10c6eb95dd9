//! Bean 派生宏实现

use crate::utils::{
    extract_option_arc, field_has_attribute, generate_unique_ident, generic_type_args,
    is_string_type, last_segment_name,
};
use proc_macro2::TokenStream;
use quote::{quote, ToTokens};
use syn::{
    parenthesized, punctuated::Punctuated, Data, DeriveInput, Error, Field, Fields, Ident, LitInt,
    LitStr, Path, Result, Token, Type,
};

/// `#[bean(...)]` 参数
#[derive(Default)]
pub struct BeanArgs {
    /// 加载顺序
    pub order: Option<i32>,
    /// 是否为原型
    pub prototype: bool,
    /// 类型标注
    pub annotations: Vec<String>,
    /// 实现的接口
    pub implements: Vec<Type>,
    /// 自定义构造函数
    pub factory: Option<Path>,
}

impl BeanArgs {
    /// 从结构体属性中解析参数
    pub fn from_attrs(input: &DeriveInput) -> Result<Self> {
        let mut args = Self::default();

        for attr in &input.attrs {
            if !attr.path().is_ident("bean") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("order") {
                    let lit: LitInt = meta.value()?.parse()?;
                    args.order = Some(lit.base10_parse()?);
                } else if meta.path.is_ident("prototype") {
                    args.prototype = true;
                } else if meta.path.is_ident("singleton") {
                    args.prototype = false;
                } else if meta.path.is_ident("annotations") {
                    let content;
                    parenthesized!(content in meta.input);
                    let names = Punctuated::<LitStr, Token![,]>::parse_terminated(&content)?;
                    args.annotations.extend(names.iter().map(LitStr::value));
                } else if meta.path.is_ident("implements") {
                    let content;
                    parenthesized!(content in meta.input);
                    let types = Punctuated::<Type, Token![,]>::parse_terminated(&content)?;
                    args.implements.extend(types);
                } else if meta.path.is_ident("factory") {
                    let lit: LitStr = meta.value()?.parse()?;
                    args.factory = Some(lit.parse()?);
                } else {
                    return Err(meta.error("未知的 bean 参数"));
                }
                Ok(())
            })?;
        }

        Ok(args)
    }
}

/// 可注入字段
pub enum FieldSpec {
    /// `#[inject]`
    Instance { ident: Ident, required: Type },
    /// `#[value(...)]`
    Value {
        ident: Ident,
        key: String,
        kind: ValueKind,
    },
}

/// 配置值字段的类型
#[derive(Debug, PartialEq, Eq)]
pub enum ValueKind {
    Text,
    List,
    Map,
    Unsupported(String),
}

impl ValueKind {
    fn of(ty: &Type) -> Self {
        let args = generic_type_args(ty);
        let all_strings = args.iter().all(|arg| is_string_type(arg));
        match (last_segment_name(ty).as_deref(), args.len()) {
            (Some("String"), 0) => Self::Text,
            (Some("Vec"), 1) if all_strings => Self::List,
            (Some("HashMap"), 2) if all_strings => Self::Map,
            _ => Self::Unsupported(ty.to_token_stream().to_string()),
        }
    }
}

/// 解析 `#[value("key")]` 或 `#[value(key = "key")]`
fn parse_value_key(field: &Field) -> Result<Option<String>> {
    let Some(attr) = field.attrs.iter().find(|attr| attr.path().is_ident("value")) else {
        return Ok(None);
    };

    if let Ok(lit) = attr.parse_args::<LitStr>() {
        return Ok(Some(lit.value()));
    }

    let mut key = None;
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("key") {
            let lit: LitStr = meta.value()?.parse()?;
            key = Some(lit.value());
            Ok(())
        } else {
            Err(meta.error("value 只支持 key 参数"))
        }
    })?;

    key.map(Some)
        .ok_or_else(|| Error::new_spanned(attr, "缺少配置键，请使用 #[value(\"key\")]"))
}

/// 按声明顺序收集结构体的注入点
pub fn collect_fields(input: &DeriveInput) -> Result<Vec<FieldSpec>> {
    let fields = match &input.data {
        Data::Struct(data) => &data.fields,
        _ => return Err(Error::new_spanned(&input.ident, "derive(Bean) 只能用于结构体")),
    };

    let named = match fields {
        Fields::Named(named) => named,
        Fields::Unit => return Ok(Vec::new()),
        Fields::Unnamed(_) => {
            if fields.iter().any(|field| !field.attrs.is_empty()) {
                return Err(Error::new_spanned(fields, "元组结构体不支持字段注入"));
            }
            return Ok(Vec::new());
        }
    };

    let mut specs = Vec::new();
    for field in &named.named {
        let Some(ident) = field.ident.clone() else {
            continue;
        };
        let inject = field_has_attribute(field, "inject");
        let value_key = parse_value_key(field)?;

        match (inject, value_key) {
            (true, Some(_)) => {
                return Err(Error::new_spanned(field, "字段不能同时使用 #[inject] 和 #[value]"));
            }
            (true, None) => {
                let required = extract_option_arc(&field.ty).cloned().ok_or_else(|| {
                    Error::new_spanned(&field.ty, "#[inject] 字段必须是 Option<Arc<T>>")
                })?;
                specs.push(FieldSpec::Instance { ident, required });
            }
            (false, Some(key)) => specs.push(FieldSpec::Value {
                ident,
                key,
                kind: ValueKind::of(&field.ty),
            }),
            (false, None) => {}
        }
    }
    Ok(specs)
}

fn expand_injection_point(spec: &FieldSpec) -> TokenStream {
    match spec {
        FieldSpec::Instance { ident, required } => {
            let name = ident.to_string();
            quote! {
                ::di_abstractions::InjectionPoint::Instance(
                    ::di_abstractions::InstanceField::new::<#required>(
                        #name,
                        |bean: &mut Self, dependency: ::std::sync::Arc<#required>| {
                            bean.#ident = ::std::option::Option::Some(dependency);
                        },
                    ),
                )
            }
        }
        FieldSpec::Value { ident, key, kind } => {
            let name = ident.to_string();
            let field = match kind {
                ValueKind::Text => quote! {
                    ::di_abstractions::ValueField::text(
                        #name,
                        #key,
                        |bean: &mut Self, value: ::std::string::String| bean.#ident = value,
                    )
                },
                ValueKind::List => quote! {
                    ::di_abstractions::ValueField::list(
                        #name,
                        #key,
                        |bean: &mut Self, value: ::std::vec::Vec<::std::string::String>| {
                            bean.#ident = value;
                        },
                    )
                },
                ValueKind::Map => quote! {
                    ::di_abstractions::ValueField::map(
                        #name,
                        #key,
                        |bean: &mut Self,
                         value: ::std::collections::HashMap<
                            ::std::string::String,
                            ::std::string::String,
                        >| {
                            bean.#ident = value;
                        },
                    )
                },
                ValueKind::Unsupported(type_name) => quote! {
                    ::di_abstractions::ValueField::unsupported(#name, #key, #type_name)
                },
            };
            quote! { ::di_abstractions::InjectionPoint::Value(#field) }
        }
    }
}

/// 实现 #[derive(Bean)]
pub fn derive_bean_impl(input: DeriveInput) -> Result<TokenStream> {
    if !input.generics.params.is_empty() {
        return Err(Error::new_spanned(&input.generics, "derive(Bean) 不支持泛型类型"));
    }

    let args = BeanArgs::from_attrs(&input)?;
    let fields = collect_fields(&input)?;
    let struct_name = &input.ident;

    let order_fn = args.order.map(|order| {
        quote! {
            fn order() -> i32 {
                #order
            }
        }
    });
    let singleton_fn = args.prototype.then(|| {
        quote! {
            fn singleton() -> bool {
                false
            }
        }
    });
    let annotations_fn = (!args.annotations.is_empty()).then(|| {
        let annotations = &args.annotations;
        quote! {
            fn annotations() -> &'static [&'static str] {
                &[#(#annotations),*]
            }
        }
    });
    let interfaces_fn = (!args.implements.is_empty()).then(|| {
        let implements = &args.implements;
        quote! {
            fn interfaces() -> ::std::vec::Vec<::infrastructure_common::Interface> {
                ::std::vec![
                    #(
                        ::infrastructure_common::Interface::of::<Self, #implements>(
                            |bean| -> ::std::sync::Arc<#implements> { bean },
                        )
                    ),*
                ]
            }
        }
    });

    let create_body = match &args.factory {
        Some(factory) => quote! { #factory() },
        None => quote! { ::std::result::Result::Ok(<Self as ::std::default::Default>::default()) },
    };

    let points = fields.iter().map(expand_injection_point);

    let register_fn = generate_unique_ident(&struct_name.to_string(), "register_bean");

    Ok(quote! {
        impl ::infrastructure_common::Bean for #struct_name {
            #interfaces_fn
            #order_fn
            #singleton_fn
            #annotations_fn
        }

        impl ::infrastructure_common::BeanFactory for #struct_name {
            fn create() -> ::std::result::Result<Self, ::infrastructure_common::DependencyError> {
                #create_body
            }
        }

        impl ::di_abstractions::Injectable for #struct_name {
            fn injection_points() -> ::std::vec::Vec<::di_abstractions::InjectionPoint<Self>> {
                ::std::vec![#(#points),*]
            }
        }

        // 程序启动时登记到全局类型目录
        #[ctor::ctor]
        #[allow(non_snake_case)]
        fn #register_fn() {
            ::di_impl::TypeCatalog::global().register_type::<#struct_name>();
        }
    })
}
