//! Proc-macro for generating the strongly-typed HTTP error catalog from JSON.
//!
//! The macro reads a JSON file at compile time, validates every entry and
//! generates the `ErrorType` enum together with the `DESCRIPTORS` table.
//!
//! ## Usage
//!
//! ```rust,ignore
//! declare_catalog! {
//!     path = "catalog/http_errors.json",
//!     vis = "pub"
//! }
//! ```
//!
//! The generated code refers to `::restful_errors::ErrorDescriptor`, so the
//! invoking crate must be (or alias itself as) `restful_errors`.

use std::collections::{HashMap, HashSet};

use heck::ToUpperCamelCase;
use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use serde::Deserialize;
use syn::parse::{Parse, ParseStream};
use syn::{LitStr, Token, parse_macro_input};

/// Reserved for errors built without a catalog descriptor.
const RESERVED_CODE: &str = "UNKNOWN_INTERNAL_ERROR";

/// JSON schema for a single catalog entry
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct CatalogEntry {
    code: String,
    status_text: String,
    status: u16,
    description: String,
}

/// Parsed macro input
struct DeclareCatalogInput {
    path: String,
    vis: syn::Visibility,
}

impl Parse for DeclareCatalogInput {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut path = None;
        let mut vis = syn::Visibility::Inherited;

        while !input.is_empty() {
            let key: syn::Ident = input.parse()?;
            input.parse::<Token![=]>()?;

            match key.to_string().as_str() {
                "path" => {
                    let lit: LitStr = input.parse()?;
                    path = Some(lit.value());
                }
                "vis" => {
                    let lit: LitStr = input.parse()?;
                    vis = match lit.value().as_str() {
                        "pub" => syn::Visibility::Public(syn::token::Pub::default()),
                        _ => syn::Visibility::Inherited,
                    };
                }
                _ => return Err(syn::Error::new(key.span(), "Unknown parameter")),
            }

            if !input.is_empty() {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(DeclareCatalogInput {
            path: path.ok_or_else(|| input.error("Missing 'path' parameter"))?,
            vis,
        })
    }
}

/// Main proc-macro entry point
#[proc_macro]
pub fn declare_catalog(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeclareCatalogInput);

    match generate_catalog(&input) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

fn generate_catalog(input: &DeclareCatalogInput) -> syn::Result<TokenStream2> {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR")
        .map_err(|_| syn::Error::new(Span::call_site(), "CARGO_MANIFEST_DIR not set"))?;
    let json_path = std::path::Path::new(&manifest_dir).join(&input.path);

    let json_content = std::fs::read_to_string(&json_path).map_err(|e| {
        syn::Error::new(
            Span::call_site(),
            format!(
                "Failed to read error catalog at {}: {e}",
                json_path.display()
            ),
        )
    })?;

    let entries: Vec<CatalogEntry> = serde_json::from_str(&json_content).map_err(|e| {
        syn::Error::new(
            Span::call_site(),
            format!(
                "Failed to parse error catalog JSON at {}: {e}",
                json_path.display()
            ),
        )
    })?;

    validate_entries(&entries)?;

    let vis = &input.vis;
    let json_file_path = &input.path;
    let len = entries.len();

    let variants = generate_variants(&entries);
    let all = generate_all(&entries);
    let key_arms = generate_key_arms(&entries);
    let status_arms = generate_status_arms(&entries);
    let descriptor_arms = generate_descriptor_arms(&entries);
    let from_key_arms = generate_from_key_arms(&entries);
    let from_status_arms = generate_from_status_arms(&entries);
    let table = generate_table(&entries);

    Ok(quote! {
        // Force Cargo to rebuild if the catalog JSON changes
        const _: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/", #json_file_path));

        /// Strongly-typed HTTP error keys generated from the JSON catalog
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[non_exhaustive]
        #vis enum ErrorType {
            #(#variants),*
        }

        impl ErrorType {
            /// Every catalog entry, in catalog order
            pub const ALL: [Self; #len] = [#(#all),*];

            /// Symbolic key, e.g. `NOT_FOUND`
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    #(#key_arms),*
                }
            }

            /// HTTP status code for this error
            #[must_use]
            pub const fn status(self) -> u16 {
                match self {
                    #(#status_arms),*
                }
            }

            /// Catalog descriptor for this error
            #[must_use]
            pub const fn descriptor(self) -> ::restful_errors::ErrorDescriptor {
                match self {
                    #(#descriptor_arms),*
                }
            }

            /// Resolve a symbolic key; `None` when the key is not in the catalog
            #[must_use]
            pub fn from_key(key: &str) -> Option<Self> {
                match key {
                    #(#from_key_arms,)*
                    _ => None,
                }
            }

            /// Resolve an HTTP status code; `None` when no entry carries it
            #[must_use]
            pub const fn from_status(status: u16) -> Option<Self> {
                match status {
                    #(#from_status_arms,)*
                    _ => None,
                }
            }
        }

        /// Every catalog descriptor, in catalog order
        #vis const DESCRIPTORS: &[::restful_errors::ErrorDescriptor] = &[
            #(#table),*
        ];
    })
}

fn validate_entries(entries: &[CatalogEntry]) -> syn::Result<()> {
    let mut codes = HashSet::new();
    let mut variants = HashMap::new();
    let mut statuses = HashMap::new();

    if entries.is_empty() {
        return Err(syn::Error::new(Span::call_site(), "Error catalog is empty"));
    }

    for entry in entries {
        validate_code_format(&entry.code)?;

        if entry.code == RESERVED_CODE {
            return Err(syn::Error::new(
                Span::call_site(),
                format!("'{RESERVED_CODE}' is reserved for errors without a descriptor"),
            ));
        }

        if !(400..=599).contains(&entry.status) {
            return Err(syn::Error::new(
                Span::call_site(),
                format!(
                    "Invalid HTTP error status {} for '{}': expected 400..=599",
                    entry.status, entry.code
                ),
            ));
        }

        if entry.status_text.trim().is_empty() {
            return Err(syn::Error::new(
                Span::call_site(),
                format!("Empty statusText for '{}'", entry.code),
            ));
        }

        if entry.description.trim().is_empty() {
            return Err(syn::Error::new(
                Span::call_site(),
                format!("Empty description for '{}'", entry.code),
            ));
        }

        if !codes.insert(entry.code.as_str()) {
            return Err(syn::Error::new(
                Span::call_site(),
                format!("Duplicate error code: '{}'", entry.code),
            ));
        }

        // Distinct keys can still collapse to the same variant name
        let variant = entry.code.to_upper_camel_case();
        if let Some(existing) = variants.insert(variant.clone(), entry.code.as_str()) {
            return Err(syn::Error::new(
                Span::call_site(),
                format!(
                    "Error codes '{existing}' and '{}' map to the same variant '{variant}'",
                    entry.code
                ),
            ));
        }

        if let Some(existing) = statuses.insert(entry.status, entry.code.as_str()) {
            return Err(syn::Error::new(
                Span::call_site(),
                format!(
                    "Error codes '{existing}' and '{}' share HTTP status {}",
                    entry.code, entry.status
                ),
            ));
        }
    }

    Ok(())
}

/// Codes are `SCREAMING_SNAKE_CASE`: uppercase ASCII letters and digits in
/// non-empty segments separated by single underscores, starting with a letter.
fn validate_code_format(code: &str) -> syn::Result<()> {
    let starts_with_letter = code.chars().next().is_some_and(|c| c.is_ascii_uppercase());
    let segments_ok = code.split('_').all(|segment| {
        !segment.is_empty()
            && segment
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
    });

    if starts_with_letter && segments_ok {
        Ok(())
    } else {
        Err(syn::Error::new(
            Span::call_site(),
            format!("Error code '{code}' must be SCREAMING_SNAKE_CASE"),
        ))
    }
}

fn variant_ident(code: &str) -> syn::Ident {
    syn::Ident::new(&code.to_upper_camel_case(), Span::call_site())
}

fn generate_variants(entries: &[CatalogEntry]) -> Vec<TokenStream2> {
    entries
        .iter()
        .map(|e| {
            let variant = variant_ident(&e.code);
            let doc = format!("`{}` ({}): {}", e.code, e.status, e.status_text);
            quote! {
                #[doc = #doc]
                #variant
            }
        })
        .collect()
}

fn generate_all(entries: &[CatalogEntry]) -> Vec<TokenStream2> {
    entries
        .iter()
        .map(|e| {
            let variant = variant_ident(&e.code);
            quote! { Self::#variant }
        })
        .collect()
}

fn generate_key_arms(entries: &[CatalogEntry]) -> Vec<TokenStream2> {
    entries
        .iter()
        .map(|e| {
            let variant = variant_ident(&e.code);
            let code = &e.code;
            quote! { Self::#variant => #code }
        })
        .collect()
}

fn generate_status_arms(entries: &[CatalogEntry]) -> Vec<TokenStream2> {
    entries
        .iter()
        .map(|e| {
            let variant = variant_ident(&e.code);
            let status = e.status;
            quote! { Self::#variant => #status }
        })
        .collect()
}

fn descriptor_literal(e: &CatalogEntry) -> TokenStream2 {
    let code = &e.code;
    let status_text = &e.status_text;
    let status = e.status;
    let description = &e.description;
    quote! {
        ::restful_errors::ErrorDescriptor {
            code: #code,
            status_text: #status_text,
            http_status_code: #status,
            description: #description,
        }
    }
}

fn generate_descriptor_arms(entries: &[CatalogEntry]) -> Vec<TokenStream2> {
    entries
        .iter()
        .map(|e| {
            let variant = variant_ident(&e.code);
            let descriptor = descriptor_literal(e);
            quote! { Self::#variant => #descriptor }
        })
        .collect()
}

fn generate_from_key_arms(entries: &[CatalogEntry]) -> Vec<TokenStream2> {
    entries
        .iter()
        .map(|e| {
            let variant = variant_ident(&e.code);
            let code = &e.code;
            quote! { #code => Some(Self::#variant) }
        })
        .collect()
}

fn generate_from_status_arms(entries: &[CatalogEntry]) -> Vec<TokenStream2> {
    entries
        .iter()
        .map(|e| {
            let variant = variant_ident(&e.code);
            let status = e.status;
            quote! { #status => Some(Self::#variant) }
        })
        .collect()
}

fn generate_table(entries: &[CatalogEntry]) -> Vec<TokenStream2> {
    entries.iter().map(descriptor_literal).collect()
}
