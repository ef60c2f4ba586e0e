use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, Lit, Meta, Type};

/// Derive macro that generates wire-format documentation from struct fields.
///
/// For each field, extracts:
/// - Wire name (respects #[serde(rename = "...")] and container-level
///   #[serde(rename_all = "camelCase")])
/// - Required (false if Option<T> or the field has a serde default)
/// - Description (from doc comments)
///
/// Generates a `field_docs() -> &'static [FieldDoc]` method.
#[proc_macro_derive(FieldDocs, attributes(serde))]
pub fn derive_field_docs(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => panic!("FieldDocs only supports structs with named fields"),
        },
        _ => panic!("FieldDocs only supports structs"),
    };

    let camel_case = has_rename_all_camel_case(&input.attrs);

    let field_info: Vec<_> = fields
        .iter()
        .map(|field| {
            let field_name = field.ident.as_ref().unwrap().to_string();

            // #[serde(rename = "...")] wins, then rename_all, then the raw name
            let wire_name = get_serde_rename(&field.attrs).unwrap_or_else(|| {
                if camel_case {
                    to_camel_case(&field_name)
                } else {
                    field_name
                }
            });

            let is_optional = is_option_type(&field.ty) || has_serde_default(&field.attrs);

            // Extract doc comments
            let doc = get_doc_comment(&field.attrs);

            (wire_name, !is_optional, doc)
        })
        .collect();

    let field_entries = field_info.iter().map(|(name, required, desc)| {
        quote! {
            FieldDoc {
                name: #name,
                required: #required,
                description: #desc,
            }
        }
    });

    let expanded = quote! {
        impl #name {
            pub fn field_docs() -> &'static [FieldDoc] {
                static DOCS: &[FieldDoc] = &[
                    #(#field_entries),*
                ];
                DOCS
            }
        }
    };

    TokenStream::from(expanded)
}

fn has_rename_all_camel_case(attrs: &[syn::Attribute]) -> bool {
    for attr in attrs {
        if !attr.path().is_ident("serde") {
            continue;
        }
        if let Meta::List(meta_list) = &attr.meta {
            let tokens = meta_list.tokens.to_string();
            if tokens.contains("rename_all") && tokens.contains("camelCase") {
                return true;
            }
        }
    }
    false
}

fn get_serde_rename(attrs: &[syn::Attribute]) -> Option<String> {
    for attr in attrs {
        if !attr.path().is_ident("serde") {
            continue;
        }

        if let Meta::List(meta_list) = &attr.meta {
            let tokens = meta_list.tokens.to_string();
            // Simple parsing: look for rename = "..."
            if let Some(start) = tokens.find("rename") {
                let rest = &tokens[start..];
                if let Some(eq_pos) = rest.find('=') {
                    let after_eq = rest[eq_pos + 1..].trim();
                    if let Some(stripped) = after_eq.strip_prefix('"') {
                        if let Some(end_quote) = stripped.find('"') {
                            return Some(stripped[..end_quote].to_string());
                        }
                    }
                }
            }
        }
    }
    None
}

fn has_serde_default(attrs: &[syn::Attribute]) -> bool {
    for attr in attrs {
        if !attr.path().is_ident("serde") {
            continue;
        }
        if let Meta::List(meta_list) = &attr.meta {
            let tokens = meta_list.tokens.to_string();
            if tokens.contains("default") {
                return true;
            }
        }
    }
    false
}

fn get_doc_comment(attrs: &[syn::Attribute]) -> String {
    attrs
        .iter()
        .filter_map(|attr| {
            if !attr.path().is_ident("doc") {
                return None;
            }
            if let Meta::NameValue(meta) = &attr.meta {
                if let syn::Expr::Lit(expr_lit) = &meta.value {
                    if let Lit::Str(lit_str) = &expr_lit.lit {
                        return Some(lit_str.value().trim().to_string());
                    }
                }
            }
            None
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_option_type(ty: &Type) -> bool {
    if let Type::Path(type_path) = ty {
        if let Some(segment) = type_path.path.segments.last() {
            return segment.ident == "Option";
        }
    }
    false
}

fn to_camel_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut upper_next = false;
    for ch in s.chars() {
        if ch == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}
