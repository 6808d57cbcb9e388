// reflect_derive/src/lib.rs
extern crate proc_macro;
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    Attribute,
    Data,
    DeriveInput,
    Fields,
    Ident,
    Lit,
    LitInt,
    LitStr,
    Token,
    Type,
    Visibility,
    meta::ParseNestedMeta,
    parse_macro_input
};

/// Inspector metadata collected from the `#[inspect(...)]` attributes of one member.
#[derive(Default)]
struct MemberMeta {
    /// `Attribute` constructor expressions, in declaration order.
    attributes: Vec<TokenStream2>,
    /// Inline the members of this field's type instead of exposing the field.
    base: bool,
    /// Leave the field out of reflection entirely.
    skip: bool,
}

/// A property-like member declared on the struct with
/// `#[inspect(property(name = "...", get = getter, set = setter))]`.
struct PropertyMeta {
    name: LitStr,
    get: Ident,
    set: Option<Ident>,
    private_set: bool,
    meta: MemberMeta,
}

/// `#[derive(Reflect)]` – generates the `Typed`, `Reflect` and `ReflectValue`
/// impls that the inspector consumes.
#[proc_macro_derive(Reflect, attributes(inspect))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    // Parse the input token stream into a syntax tree
    let input = parse_macro_input!(input as DeriveInput);
    let name = input.ident;

    if !input.generics.params.is_empty() {
        return syn::Error::new_spanned(
            input.generics,
            "Reflect can only be derived for non-generic structs",
        )
        .to_compile_error()
        .into();
    }

    // Collect field information (only works for structs with named fields)
    let fields = match input.data {
        Data::Struct(s) => match s.fields {
            Fields::Named(named) => named.named,
            Fields::Unit => Default::default(),
            _ => {
                return syn::Error::new_spanned(
                    s.struct_token,
                    "Reflect can only be derived for structs with named fields",
                )
                .to_compile_error()
                .into();
            }
        },
        _ => {
            return syn::Error::new_spanned(
                name,
                "Reflect can only be derived for structs",
            )
            .to_compile_error()
            .into();
        }
    };

    let properties = match struct_properties(&input.attrs) {
        Ok(properties) => properties,
        Err(e) => return e.to_compile_error().into(),
    };

    let name_str = name.to_string();
    let mut bases = Vec::new();
    let mut members = Vec::new();
    let mut get_arms = Vec::new();
    let mut set_arms = Vec::new();
    let mut base_gets = Vec::new();
    let mut base_sets = Vec::new();

    for f in fields.iter() {
        let Some(field_name) = f.ident.as_ref() else { continue };
        let field_str = field_name.to_string();
        let ty = &f.ty;
        let meta = member_meta(&f.attrs);

        if meta.skip {
            continue;
        }

        if meta.base {
            bases.push(quote! {
                .base(<#ty as ::inspector_core::reflect::Typed>::static_type_info())
            });
            base_gets.push(quote! {
                if <#ty as ::inspector_core::reflect::Typed>::static_type_info().member(member).is_some() {
                    return ::inspector_core::reflect::Reflect::get(&self.#field_name, member);
                }
            });
            base_sets.push(quote! {
                if <#ty as ::inspector_core::reflect::Typed>::static_type_info().member(member).is_some() {
                    return ::inspector_core::reflect::Reflect::set(&mut self.#field_name, member, value);
                }
            });
            continue;
        }

        let visibility = visibility_tokens(&f.vis);
        let attributes = &meta.attributes;
        members.push(quote! {
            .member(
                ::inspector_core::reflect::MemberInfo::field(
                    #field_str,
                    declaring_type,
                    #visibility,
                    <#ty as ::inspector_core::reflect::ReflectValue>::value_kind(),
                    ::std::any::type_name::<#ty>(),
                )
                .with_attributes(::std::vec![#(#attributes),*])
            )
        });
        get_arms.push(quote! {
            #field_str => ::inspector_core::reflect::ReflectValue::to_value(&self.#field_name),
        });
        set_arms.push(quote! {
            #field_str => {
                self.#field_name = ::inspector_core::reflect::ReflectValue::from_value(value)?;
                ::std::result::Result::Ok(())
            }
        });
    }

    for property in &properties {
        let property_name = &property.name;
        let getter = &property.get;
        let attributes = &property.meta.attributes;
        let setter_info = match (&property.set, property.private_set) {
            (Some(_), false) => quote! { .with_setter(::inspector_core::reflect::Visibility::Public) },
            (Some(_), true) => quote! { .with_setter(::inspector_core::reflect::Visibility::Private) },
            (None, _) => quote! {},
        };

        members.push(quote! {
            .member({
                let (kind, type_name) = ::inspector_core::reflect::getter_value_type(#name::#getter);
                ::inspector_core::reflect::MemberInfo::property(#property_name, declaring_type, kind, type_name)
                    .with_getter(::inspector_core::reflect::Visibility::Public)
                    #setter_info
                    .with_attributes(::std::vec![#(#attributes),*])
            })
        });
        get_arms.push(quote! {
            #property_name => ::inspector_core::reflect::ReflectValue::to_value(&self.#getter()),
        });
        set_arms.push(match &property.set {
            Some(setter) => quote! {
                #property_name => {
                    self.#setter(::inspector_core::reflect::ReflectValue::from_value(value)?);
                    ::std::result::Result::Ok(())
                }
            },
            None => quote! {
                #property_name => ::std::result::Result::Err(
                    ::inspector_core::error::AccessError::NotWritable(member.to_string())
                ),
            },
        });
    }

    // Build the final impl blocks
    let expanded = quote! {
        impl ::inspector_core::reflect::Typed for #name {
            fn static_type_info() -> &'static ::inspector_core::reflect::TypeInfo {
                static INFO: ::inspector_core::__private::Lazy<::inspector_core::reflect::TypeInfo> =
                    ::inspector_core::__private::Lazy::new(|| {
                        let declaring_type = ::std::any::type_name::<#name>();
                        ::inspector_core::reflect::TypeInfo::builder::<#name>(#name_str)
                            #(#bases)*
                            #(#members)*
                            .build()
                    });
                &INFO
            }
        }

        impl ::inspector_core::reflect::Reflect for #name {
            fn type_info(&self) -> &'static ::inspector_core::reflect::TypeInfo {
                <Self as ::inspector_core::reflect::Typed>::static_type_info()
            }

            fn get(
                &self,
                member: &str,
            ) -> ::std::result::Result<::inspector_core::reflect::Value, ::inspector_core::error::AccessError> {
                match member {
                    #(#get_arms)*
                    _ => {
                        #(#base_gets)*
                        ::std::result::Result::Err(
                            ::inspector_core::error::AccessError::unknown_member(#name_str, member)
                        )
                    }
                }
            }

            #[allow(unused_variables)]
            fn set(
                &mut self,
                member: &str,
                value: ::inspector_core::reflect::Value,
            ) -> ::std::result::Result<(), ::inspector_core::error::AccessError> {
                match member {
                    #(#set_arms)*
                    _ => {
                        #(#base_sets)*
                        ::std::result::Result::Err(
                            ::inspector_core::error::AccessError::unknown_member(#name_str, member)
                        )
                    }
                }
            }

            fn clone_reflect(&self) -> ::std::boxed::Box<dyn ::inspector_core::reflect::Reflect> {
                ::std::boxed::Box::new(::std::clone::Clone::clone(self))
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn into_any(self: ::std::boxed::Box<Self>) -> ::std::boxed::Box<dyn ::std::any::Any> {
                self
            }
        }

        impl ::inspector_core::reflect::ReflectValue for #name {
            fn to_value(
                &self,
            ) -> ::std::result::Result<::inspector_core::reflect::Value, ::inspector_core::error::AccessError> {
                ::std::result::Result::Ok(::inspector_core::reflect::Value::Object(
                    ::std::boxed::Box::new(::std::clone::Clone::clone(self)),
                ))
            }

            fn from_value(
                value: ::inspector_core::reflect::Value,
            ) -> ::std::result::Result<Self, ::inspector_core::error::AccessError> {
                ::inspector_core::reflect::object_from_value::<Self>(value)
            }

            fn value_kind() -> ::inspector_core::reflect::ValueKind {
                ::inspector_core::reflect::ValueKind::Object
            }
        }
    };

    // Hand the generated code back to the compiler
    TokenStream::from(expanded)
}

fn visibility_tokens(vis: &Visibility) -> TokenStream2 {
    match vis {
        Visibility::Public(_) => quote! { ::inspector_core::reflect::Visibility::Public },
        _ => quote! { ::inspector_core::reflect::Visibility::Private },
    }
}

/// Collects the metadata of every `#[inspect(...)]` attribute on a field.
/// An attribute that fails to parse contributes nothing, the field is
/// still reflected.
fn member_meta(attrs: &[Attribute]) -> MemberMeta {
    let mut result = MemberMeta::default();

    for attr in attrs {
        if !attr.path().is_ident("inspect") {
            continue;
        }

        let mut meta = MemberMeta::default();
        let parsed = attr.parse_nested_meta(|nested| {
            if parse_member_key(&nested, &mut meta)? {
                return Ok(());
            }
            if nested.path.is_ident("base") {
                meta.base = true;
            } else if nested.path.is_ident("skip") {
                meta.skip = true;
            } else {
                skip_unknown(&nested)?;
            }
            Ok(())
        });

        // If parsing fails we just ignore the attribute
        if parsed.is_ok() {
            result.attributes.extend(meta.attributes);
            result.base |= meta.base;
            result.skip |= meta.skip;
        }
    }

    result
}

/// Reads the `property(...)` declarations from the struct attributes.
fn struct_properties(attrs: &[Attribute]) -> syn::Result<Vec<PropertyMeta>> {
    let mut properties = Vec::new();

    for attr in attrs {
        if !attr.path().is_ident("inspect") {
            continue;
        }

        attr.parse_nested_meta(|nested| {
            if !nested.path.is_ident("property") {
                return skip_unknown(&nested);
            }

            let mut name = None;
            let mut get = None;
            let mut set = None;
            let mut private_set = false;
            let mut meta = MemberMeta::default();

            nested.parse_nested_meta(|inner| {
                if inner.path.is_ident("name") {
                    name = Some(inner.value()?.parse::<LitStr>()?);
                } else if inner.path.is_ident("get") {
                    get = Some(inner.value()?.parse::<Ident>()?);
                } else if inner.path.is_ident("set") {
                    set = Some(inner.value()?.parse::<Ident>()?);
                } else if inner.path.is_ident("private_set") {
                    private_set = true;
                } else if !parse_member_key(&inner, &mut meta)? {
                    skip_unknown(&inner)?;
                }
                Ok(())
            })?;

            let name = name.ok_or_else(|| nested.error("property requires `name = \"...\"`"))?;
            let get = get.ok_or_else(|| nested.error("property requires `get = getter`"))?;
            properties.push(PropertyMeta { name, get, set, private_set, meta });
            Ok(())
        })?;
    }

    Ok(properties)
}

/// Parses one of the shared metadata keys. Returns `false` when the key is
/// not a metadata key so the caller can handle it.
fn parse_member_key(meta: &ParseNestedMeta, out: &mut MemberMeta) -> syn::Result<bool> {
    let attribute = quote! { ::inspector_core::reflect::Attribute };

    if meta.path.is_ident("order") {
        let order = parse_i32(meta)?;
        out.attributes.push(quote! { #attribute::Order(#order) });
    } else if meta.path.is_ident("group") {
        let lit: LitStr = meta.value()?.parse()?;
        out.attributes.push(quote! { #attribute::Group(::std::string::String::from(#lit)) });
    } else if meta.path.is_ident("display_name") {
        let lit: LitStr = meta.value()?.parse()?;
        out.attributes.push(quote! { #attribute::DisplayName(::std::string::String::from(#lit)) });
    } else if meta.path.is_ident("tooltip") {
        let lit: LitStr = meta.value()?.parse()?;
        out.attributes.push(quote! { #attribute::Tooltip(::std::string::String::from(#lit)) });
    } else if meta.path.is_ident("header") {
        let lit: LitStr = meta.value()?.parse()?;
        out.attributes.push(quote! { #attribute::Header(::std::string::String::from(#lit)) });
    } else if meta.path.is_ident("editor_alias") {
        let lit: LitStr = meta.value()?.parse()?;
        out.attributes.push(quote! { #attribute::CustomEditorAlias(::std::string::String::from(#lit)) });
    } else if meta.path.is_ident("editor") {
        let ty: Type = meta.value()?.parse()?;
        out.attributes.push(quote! {
            #attribute::CustomEditor(::inspector_core::reflect::EditorTypeRef::of::<#ty>())
        });
    } else if meta.path.is_ident("space") {
        let height = parse_f32(meta)?;
        out.attributes.push(quote! { #attribute::Space(#height) });
    } else if meta.path.is_ident("hide") {
        out.attributes.push(quote! { #attribute::HideInEditor });
    } else if meta.path.is_ident("read_only") {
        out.attributes.push(quote! { #attribute::ReadOnly });
    } else {
        return Ok(false);
    }

    Ok(true)
}

fn parse_i32(meta: &ParseNestedMeta) -> syn::Result<i32> {
    let input = meta.value()?;
    let negative = input.peek(Token![-]);
    if negative {
        input.parse::<Token![-]>()?;
    }
    let lit: LitInt = input.parse()?;
    let value: i32 = lit.base10_parse()?;
    Ok(if negative { -value } else { value })
}

fn parse_f32(meta: &ParseNestedMeta) -> syn::Result<f32> {
    let input = meta.value()?;
    let negative = input.peek(Token![-]);
    if negative {
        input.parse::<Token![-]>()?;
    }
    let value: f32 = match input.parse::<Lit>()? {
        Lit::Float(f) => f.base10_parse()?,
        Lit::Int(i) => i.base10_parse()?,
        other => return Err(syn::Error::new_spanned(other, "expected a number")),
    };
    Ok(if negative { -value } else { value })
}

/// Consumes the value of a key this macro does not know about.
fn skip_unknown(meta: &ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        let input = meta.value()?;
        while !input.is_empty() && !input.peek(Token![,]) {
            input.parse::<proc_macro2::TokenTree>()?;
        }
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        syn::parenthesized!(content in meta.input);
        content.parse::<TokenStream2>()?;
    }
    Ok(())
}
