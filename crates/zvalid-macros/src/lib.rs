//! Procedural macros for zvalid
//!
//! - `#[derive(Record)]` - Field-resolution contract for a struct with named fields
//!
//! Field attributes:
//!
//! - `#[zvalid(rename = "name")]` - Look the field up under another name
//! - `#[zvalid(skip)]` - Hide the field from validation
//!
//! Container attribute:
//!
//! - `#[zvalid(rename_all = "camelCase")]` - Rename every field, `rename` still wins

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Fields, LitStr};

/// Derive `zvalid::Record`
///
/// Every named field becomes resolvable by name. Field types must be
/// `Clone` and convertible into `zvalid::Value`; `Option<T>` members are
/// reported as optionals so a `None` counts as absent.
///
/// # Example
///
/// ```rust,ignore
/// use zvalid::Record;
///
/// #[derive(Record)]
/// #[zvalid(rename_all = "camelCase")]
/// struct Signup {
///     password: String,
///     re_password: Option<String>,
///     #[zvalid(skip)]
///     session: Session,
/// }
/// ```
#[proc_macro_derive(Record, attributes(zvalid))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand_record(&input) {
        Ok(tokens) => TokenStream::from(tokens),
        Err(err) => TokenStream::from(err.to_compile_error()),
    }
}

#[derive(Default)]
struct FieldOptions {
    rename: Option<String>,
    skip: bool,
}

#[derive(Default)]
struct ContainerOptions {
    rename_all: Option<RenameRule>,
}

#[derive(Clone, Copy)]
enum RenameRule {
    CamelCase,
    PascalCase,
    Lowercase,
}

impl RenameRule {
    fn parse(lit: &LitStr) -> syn::Result<Self> {
        match lit.value().as_str() {
            "camelCase" => Ok(Self::CamelCase),
            "PascalCase" => Ok(Self::PascalCase),
            "lowercase" => Ok(Self::Lowercase),
            other => Err(syn::Error::new(
                lit.span(),
                format!(
                    "unsupported rename_all rule `{other}`, expected \"camelCase\", \"PascalCase\" or \"lowercase\""
                ),
            )),
        }
    }

    fn apply(self, field: &str) -> String {
        match self {
            Self::Lowercase => field.to_lowercase(),
            Self::CamelCase | Self::PascalCase => {
                let mut out = String::with_capacity(field.len());
                let mut upper = matches!(self, Self::PascalCase);
                for c in field.chars() {
                    if c == '_' {
                        upper = !out.is_empty();
                    } else if upper {
                        out.extend(c.to_uppercase());
                        upper = false;
                    } else {
                        out.push(c);
                    }
                }
                out
            }
        }
    }
}

fn container_options(attrs: &[Attribute]) -> syn::Result<ContainerOptions> {
    let mut options = ContainerOptions::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("zvalid")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename_all") {
                let lit: LitStr = meta.value()?.parse()?;
                options.rename_all = Some(RenameRule::parse(&lit)?);
                Ok(())
            } else {
                Err(meta.error("unknown zvalid container attribute"))
            }
        })?;
    }
    Ok(options)
}

fn field_options(attrs: &[Attribute]) -> syn::Result<FieldOptions> {
    let mut options = FieldOptions::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("zvalid")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                let lit: LitStr = meta.value()?.parse()?;
                options.rename = Some(lit.value());
                Ok(())
            } else if meta.path.is_ident("skip") {
                options.skip = true;
                Ok(())
            } else {
                Err(meta.error("unknown zvalid field attribute"))
            }
        })?;
    }
    Ok(options)
}

fn expand_record(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    name,
                    "Record can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "Record can only be derived for structs",
            ))
        }
    };

    let container = container_options(&input.attrs)?;

    let mut names = Vec::new();
    let mut arms = Vec::new();
    for field in fields {
        let options = field_options(&field.attrs)?;
        if options.skip {
            continue;
        }
        let Some(ident) = &field.ident else {
            continue;
        };

        // Raw identifiers resolve under their plain name.
        let source = ident.to_string().trim_start_matches("r#").to_string();
        let lookup = match (options.rename, container.rename_all) {
            (Some(rename), _) => rename,
            (None, Some(rule)) => rule.apply(&source),
            (None, None) => source,
        };

        if names.contains(&lookup) {
            return Err(syn::Error::new_spanned(
                ident,
                format!("duplicate field name `{lookup}`"),
            ));
        }

        arms.push(quote! {
            #lookup => ::core::option::Option::Some(
                ::core::convert::Into::<::zvalid::Value>::into(
                    ::core::clone::Clone::clone(&self.#ident)
                )
            ),
        });
        names.push(lookup);
    }

    let record_name = name.to_string();

    Ok(quote! {
        impl #impl_generics ::zvalid::Record for #name #ty_generics #where_clause {
            fn field(&self, name: &str) -> ::core::option::Option<::zvalid::Value> {
                match name {
                    #(#arms)*
                    _ => ::core::option::Option::None,
                }
            }

            fn declared_fields() -> &'static [&'static str] {
                &[#(#names),*]
            }

            fn record_name() -> &'static str {
                #record_name
            }
        }
    })
}
