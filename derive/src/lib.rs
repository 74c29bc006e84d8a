//! Derive macro for the `plainmap` mapping traits.
//!
//! See [`Mapped`].

use proc_macro::TokenStream;
use syn::{parse_macro_input, Data, DeriveInput, Error};

mod enum_impl;
mod struct_impl;

static MAPPED_ATTRIBUTE_NAME: &str = "mapped";

/// # Mapping derivation
///
/// `#[derive(Mapped)]` implements the full mapping surface for a type:
///
/// - `Typed` (the static descriptor)
/// - `Mapped` plus the kind subtrait (`StructMapped` or `EnumMapped`)
/// - `FromPlain`
/// - `Constructible` (structs only)
///
/// Supported shapes are structs with named fields and enums with unit
/// variants. Generic types are not supported.
///
/// ## Field attributes (structs)
///
/// A field may declare a default, used when input omits the field or
/// provides null:
///
/// ```rust, ignore
/// #[derive(Mapped)]
/// struct Employee {
///     name: String,
///     #[mapped(default = String::from("general"))]
///     department: String,
///     #[mapped(default)]
///     tags: Vec<String>,
/// }
/// ```
///
/// The bare form uses the field type's `Default` impl.
///
/// ## Variant attributes (enums)
///
/// A backed enum declares one backing value per variant; backing is
/// all-or-nothing across the enum:
///
/// ```rust, ignore
/// #[derive(Mapped)]
/// enum Currency {
///     #[mapped(value = "BRL")]
///     Brl,
///     #[mapped(value = "USD")]
///     Usd,
/// }
/// ```
///
/// Backed variants export their backing value and import by backing value
/// or variant name; unbacked variants export and import by name alone.
#[proc_macro_derive(Mapped, attributes(mapped))]
pub fn derive_mapped(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    if let Some(param) = input.generics.params.first() {
        return Error::new_spanned(param, "#[derive(Mapped)] does not support generic types")
            .to_compile_error()
            .into();
    }

    let expanded = match &input.data {
        Data::Struct(data) => struct_impl::expand(&input, data),
        Data::Enum(data) => enum_impl::expand(&input, data),
        Data::Union(_) => Err(Error::new_spanned(
            &input.ident,
            "#[derive(Mapped)] does not support unions",
        )),
    };

    match expanded {
        Ok(tokens) => tokens.into(),
        Err(error) => error.to_compile_error().into(),
    }
}
