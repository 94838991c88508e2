use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

/// Derive macro for the `Object` and `Typed` traits.
///
/// Generates a static `TypeInfo` for the type and the capability views
/// requested through attributes.
///
/// # Example
///
/// ```ignore
/// use emulsion_core::{CacheableDependency, Object, TypeInfo};
///
/// static ENTITY: TypeInfo = TypeInfo::new("EntityInterface", &[]);
///
/// #[derive(Debug, Object)]
/// #[object(name = "Node", extends(ENTITY), cacheable)]
/// struct Node {
///     tags: Vec<String>,
/// }
///
/// impl CacheableDependency for Node {
///     fn cache_tags(&self) -> &[String] {
///         &self.tags
///     }
///
///     fn cache_contexts(&self) -> &[String] {
///         &[]
///     }
/// }
/// ```
///
/// # Attributes
///
/// - `#[object(name = "...")]` - Type name (defaults to the Rust identifier)
/// - `#[object(extends(PATH, ...))]` - Statics holding the parent `TypeInfo`s
/// - `#[object(cacheable)]` - Expose `as_cacheable` (requires `CacheableDependency`)
/// - `#[object(field_item)]` - Expose `as_field_item` (requires `FieldItem`)
/// - `#[object(field_item_list)]` - Expose `as_field_item_list` (requires `FieldItemList`)
#[proc_macro_derive(Object, attributes(object))]
pub fn derive_object(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match derive_object_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn derive_object_impl(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    if let syn::Data::Union(_) = &input.data {
        return Err(syn::Error::new_spanned(input, "Object cannot be derived for unions"));
    }
    if !input.generics.params.is_empty() {
        // A static descriptor cannot depend on type parameters.
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Object cannot be derived for generic types",
        ));
    }

    let ident = &input.ident;
    let attrs = parse_object_attrs(&input.attrs)?;
    let type_name = attrs.name.unwrap_or_else(|| ident.to_string());
    let parents = &attrs.extends;

    let cacheable = attrs.cacheable.then(|| {
        quote! {
            fn as_cacheable(
                &self,
            ) -> ::std::option::Option<&dyn ::emulsion_core::CacheableDependency> {
                ::std::option::Option::Some(self)
            }
        }
    });
    let field_item = attrs.field_item.then(|| {
        quote! {
            fn as_field_item(&self) -> ::std::option::Option<&dyn ::emulsion_core::FieldItem> {
                ::std::option::Option::Some(self)
            }
        }
    });
    let field_item_list = attrs.field_item_list.then(|| {
        quote! {
            fn as_field_item_list(
                &self,
            ) -> ::std::option::Option<&dyn ::emulsion_core::FieldItemList> {
                ::std::option::Option::Some(self)
            }
        }
    });

    Ok(quote! {
        impl ::emulsion_core::Typed for #ident {
            fn descriptor() -> &'static ::emulsion_core::TypeInfo {
                static TYPE_INFO: ::emulsion_core::TypeInfo =
                    ::emulsion_core::TypeInfo::new(#type_name, &[#(&#parents),*]);
                &TYPE_INFO
            }
        }

        impl ::emulsion_core::Object for #ident {
            fn type_info(&self) -> &'static ::emulsion_core::TypeInfo {
                <Self as ::emulsion_core::Typed>::descriptor()
            }

            #cacheable
            #field_item
            #field_item_list
        }
    })
}

#[derive(Default)]
struct ObjectAttrs {
    name: Option<String>,
    extends: Vec<syn::Path>,
    cacheable: bool,
    field_item: bool,
    field_item_list: bool,
}

fn parse_object_attrs(attrs: &[syn::Attribute]) -> syn::Result<ObjectAttrs> {
    let mut result = ObjectAttrs::default();

    for attr in attrs {
        if !attr.path().is_ident("object") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let value: syn::LitStr = meta.value()?.parse()?;
                result.name = Some(value.value());
            } else if meta.path.is_ident("extends") {
                meta.parse_nested_meta(|parent| {
                    result.extends.push(parent.path);
                    Ok(())
                })?;
            } else if meta.path.is_ident("cacheable") {
                result.cacheable = true;
            } else if meta.path.is_ident("field_item") {
                result.field_item = true;
            } else if meta.path.is_ident("field_item_list") {
                result.field_item_list = true;
            } else {
                return Err(meta.error("unsupported object attribute"));
            }
            Ok(())
        })?;
    }

    Ok(result)
}
