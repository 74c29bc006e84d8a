use proc_macro2::TokenStream;
use quote::quote;
use syn::{DataStruct, DeriveInput, Error, Expr, Field, Fields, Ident, Type};

use crate::MAPPED_ATTRIBUTE_NAME;

/// One named field plus its parsed `#[mapped(...)]` attributes.
struct MappedField<'a> {
    ident: &'a Ident,
    ty: &'a Type,
    default: Option<FieldDefault>,
}

enum FieldDefault {
    /// `#[mapped(default)]`, the field type's `Default` impl.
    Trait,
    /// `#[mapped(default = EXPR)]`.
    Expr(Expr),
}

fn parse_field(field: &Field) -> Result<MappedField<'_>, Error> {
    let ident = field
        .ident
        .as_ref()
        .ok_or_else(|| Error::new_spanned(field, "expected a named field"))?;

    let mut default = None;
    for attr in &field.attrs {
        if !attr.path().is_ident(MAPPED_ATTRIBUTE_NAME) {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("default") {
                default = Some(if meta.input.peek(syn::Token![=]) {
                    FieldDefault::Expr(meta.value()?.parse()?)
                } else {
                    FieldDefault::Trait
                });
                Ok(())
            } else {
                Err(meta.error("unsupported field attribute, expected `default`"))
            }
        })?;
    }

    Ok(MappedField {
        ident,
        ty: &field.ty,
        default,
    })
}

/// Expands `#[derive(Mapped)]` for a struct with named fields.
pub(crate) fn expand(input: &DeriveInput, data: &DataStruct) -> Result<TokenStream, Error> {
    let Fields::Named(named) = &data.fields else {
        return Err(Error::new_spanned(
            &input.ident,
            "#[derive(Mapped)] requires named fields",
        ));
    };

    let fields: Vec<MappedField<'_>> = named
        .named
        .iter()
        .map(parse_field)
        .collect::<Result<_, _>>()?;

    let ident = &input.ident;
    let typed_impl = expand_typed(ident, &fields);
    let mapped_impl = expand_mapped(ident, &fields);
    let constructible_impl = expand_constructible(ident, &fields);

    Ok(quote! {
        const _: () = {
            #typed_impl
            #mapped_impl
            #constructible_impl

            impl plainmap::FromPlain for #ident {
                fn from_plain(
                    value: plainmap::PlainValue,
                ) -> ::std::result::Result<Self, plainmap::MapError> {
                    plainmap::ObjectBuilder::new().build(value)
                }
            }
        };
    })
}

fn expand_typed(ident: &Ident, fields: &[MappedField<'_>]) -> TokenStream {
    let field_specs = fields.iter().map(|field| {
        let name = field.ident.to_string();
        let ty = field.ty;
        quote! {
            plainmap::info::FieldSpec::new::<#ty>(#name)
        }
    });

    quote! {
        impl plainmap::info::Typed for #ident {
            fn type_info() -> &'static plainmap::info::TypeInfo {
                static CELL: ::std::sync::OnceLock<plainmap::info::TypeInfo> =
                    ::std::sync::OnceLock::new();
                CELL.get_or_init(|| {
                    plainmap::info::TypeInfo::Struct(plainmap::info::StructInfo::new::<#ident>(
                        ::std::vec![#(#field_specs),*],
                    ))
                })
            }
        }
    }
}

fn expand_mapped(ident: &Ident, fields: &[MappedField<'_>]) -> TokenStream {
    let field_arms = fields.iter().enumerate().map(|(index, field)| {
        let field_ident = field.ident;
        quote! {
            #index => ::std::option::Option::Some(&self.#field_ident as &dyn plainmap::Mapped),
        }
    });

    quote! {
        impl plainmap::Mapped for #ident {
            #[inline]
            fn mapped_ref(&self) -> plainmap::MappedRef<'_> {
                plainmap::MappedRef::Struct(self)
            }
        }

        impl plainmap::StructMapped for #ident {
            fn struct_info(&self) -> &'static plainmap::info::StructInfo {
                match <Self as plainmap::info::Typed>::type_info() {
                    plainmap::info::TypeInfo::Struct(info) => info,
                    _ => ::core::unreachable!(),
                }
            }

            fn field_at(&self, index: usize) -> ::std::option::Option<&dyn plainmap::Mapped> {
                match index {
                    #(#field_arms)*
                    _ => ::std::option::Option::None,
                }
            }
        }
    }
}

fn expand_constructible(ident: &Ident, fields: &[MappedField<'_>]) -> TokenStream {
    let param_specs = fields.iter().map(|field| {
        let name = field.ident.to_string();
        let ty = field.ty;
        let spec = quote! {
            plainmap::info::ParamSpec::new::<#ty>(#name)
        };
        match &field.default {
            Some(FieldDefault::Trait) => quote! {
                #spec.with_default(|| {
                    ::std::boxed::Box::new(<#ty as ::core::default::Default>::default())
                        as ::std::boxed::Box<dyn ::core::any::Any>
                })
            },
            Some(FieldDefault::Expr(expr)) => quote! {
                #spec.with_default(|| {
                    ::std::boxed::Box::new(#expr) as ::std::boxed::Box<dyn ::core::any::Any>
                })
            },
            None => spec,
        }
    });

    let takes = fields.iter().map(|field| {
        let field_ident = field.ident;
        let name = field_ident.to_string();
        let ty = field.ty;
        quote! {
            #field_ident: args.take::<#ty>(#name)?,
        }
    });

    // A fieldless struct leaves the argument list untouched.
    let args_pat = if fields.is_empty() {
        quote! { _args }
    } else {
        quote! { mut args }
    };

    quote! {
        impl plainmap::Constructible for #ident {
            fn constructor_spec() -> &'static plainmap::info::ConstructorSpec {
                static CELL: ::std::sync::OnceLock<plainmap::info::ConstructorSpec> =
                    ::std::sync::OnceLock::new();
                CELL.get_or_init(|| {
                    plainmap::info::ConstructorSpec::new::<#ident>(
                        ::std::vec![#(#param_specs),*],
                        |args| {
                            <#ident as plainmap::Constructible>::construct(args).map(|built| {
                                ::std::boxed::Box::new(built)
                                    as ::std::boxed::Box<dyn ::core::any::Any>
                            })
                        },
                    )
                })
            }

            fn construct(
                #args_pat: plainmap::info::Arguments,
            ) -> ::std::result::Result<Self, plainmap::MapError> {
                ::std::result::Result::Ok(Self {
                    #(#takes)*
                })
            }
        }
    }
}
