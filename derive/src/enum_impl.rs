use proc_macro2::TokenStream;
use quote::quote;
use syn::{DataEnum, DeriveInput, Error, Fields, Ident, Lit};

use crate::MAPPED_ATTRIBUTE_NAME;

/// One unit variant plus its parsed backing value.
struct MappedVariant<'a> {
    ident: &'a Ident,
    backing: Option<Backing>,
}

enum Backing {
    Int(i64),
    Str(String),
}

fn parse_variant(variant: &syn::Variant) -> Result<MappedVariant<'_>, Error> {
    if !matches!(variant.fields, Fields::Unit) {
        return Err(Error::new_spanned(
            variant,
            "#[derive(Mapped)] requires unit variants",
        ));
    }

    let mut backing = None;
    for attr in &variant.attrs {
        if !attr.path().is_ident(MAPPED_ATTRIBUTE_NAME) {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if !meta.path.is_ident("value") {
                return Err(meta.error("unsupported variant attribute, expected `value`"));
            }
            backing = Some(match meta.value()?.parse::<Lit>()? {
                Lit::Str(lit) => Backing::Str(lit.value()),
                Lit::Int(lit) => Backing::Int(lit.base10_parse()?),
                other => {
                    return Err(Error::new_spanned(
                        other,
                        "backing values must be string or integer literals",
                    ));
                }
            });
            Ok(())
        })?;
    }

    Ok(MappedVariant {
        ident: &variant.ident,
        backing,
    })
}

/// Expands `#[derive(Mapped)]` for an enum with unit variants.
pub(crate) fn expand(input: &DeriveInput, data: &DataEnum) -> Result<TokenStream, Error> {
    let variants: Vec<MappedVariant<'_>> = data
        .variants
        .iter()
        .map(parse_variant)
        .collect::<Result<_, _>>()?;

    if variants.is_empty() {
        return Err(Error::new_spanned(
            &input.ident,
            "#[derive(Mapped)] requires at least one variant",
        ));
    }

    // Backing is all-or-nothing across the enum.
    let backed = variants.iter().filter(|v| v.backing.is_some()).count();
    if backed != 0 && backed != variants.len() {
        return Err(Error::new_spanned(
            &input.ident,
            "either every variant declares #[mapped(value = ...)] or none does",
        ));
    }

    let ident = &input.ident;

    let case_infos = variants.iter().map(|variant| {
        let name = variant.ident.to_string();
        let backing = backing_tokens(variant.backing.as_ref());
        quote! {
            plainmap::info::CaseInfo::new(#name, #backing)
        }
    });

    let name_arms = variants.iter().map(|variant| {
        let variant_ident = variant.ident;
        let name = variant_ident.to_string();
        quote! {
            Self::#variant_ident => #name,
        }
    });

    let backing_arms = variants.iter().map(|variant| {
        let variant_ident = variant.ident;
        let backing = backing_tokens(variant.backing.as_ref());
        quote! {
            Self::#variant_ident => #backing,
        }
    });

    let match_checks = variants.iter().map(|variant| {
        let variant_ident = variant.ident;
        let name = variant_ident.to_string();
        let backing = backing_tokens(variant.backing.as_ref());
        quote! {
            if plainmap::info::CaseInfo::new(#name, #backing).matches(&value) {
                return ::std::result::Result::Ok(Self::#variant_ident);
            }
        }
    });

    Ok(quote! {
        const _: () = {
            impl plainmap::info::Typed for #ident {
                fn type_info() -> &'static plainmap::info::TypeInfo {
                    static CELL: ::std::sync::OnceLock<plainmap::info::TypeInfo> =
                        ::std::sync::OnceLock::new();
                    CELL.get_or_init(|| {
                        plainmap::info::TypeInfo::Enum(plainmap::info::EnumInfo::new::<#ident>(
                            ::std::vec![#(#case_infos),*],
                        ))
                    })
                }
            }

            impl plainmap::Mapped for #ident {
                #[inline]
                fn mapped_ref(&self) -> plainmap::MappedRef<'_> {
                    plainmap::MappedRef::Enum(self)
                }
            }

            impl plainmap::EnumMapped for #ident {
                fn enum_info(&self) -> &'static plainmap::info::EnumInfo {
                    match <Self as plainmap::info::Typed>::type_info() {
                        plainmap::info::TypeInfo::Enum(info) => info,
                        _ => ::core::unreachable!(),
                    }
                }

                fn case_name(&self) -> &'static str {
                    match self {
                        #(#name_arms)*
                    }
                }

                fn backing(&self) -> ::std::option::Option<plainmap::info::Backing> {
                    match self {
                        #(#backing_arms)*
                    }
                }
            }

            impl plainmap::FromPlain for #ident {
                fn from_plain(
                    value: plainmap::PlainValue,
                ) -> ::std::result::Result<Self, plainmap::MapError> {
                    #(#match_checks)*
                    ::std::result::Result::Err(plainmap::MapError::invalid_cast(
                        value,
                        ::core::any::type_name::<Self>(),
                    ))
                }
            }
        };
    })
}

fn backing_tokens(backing: Option<&Backing>) -> TokenStream {
    match backing {
        Some(Backing::Int(value)) => quote! {
            ::std::option::Option::Some(plainmap::info::Backing::Int(#value))
        },
        Some(Backing::Str(value)) => quote! {
            ::std::option::Option::Some(plainmap::info::Backing::Str(#value))
        },
        None => quote! { ::std::option::Option::None },
    }
}
