//! Type display rendering
//!
//! Renders `syn` types as compact display strings such as
//! `Option<Vec<types::Tag>>`. Lifetimes are dropped. Syntax without a
//! dedicated rendering falls back to its token text.

use quote::ToTokens;
use syn::{GenericArgument, Path, PathArguments, ReturnType, Type};

/// Render a type as a display string
pub fn render_type(ty: &Type) -> String {
    match ty {
        Type::Path(type_path) if type_path.qself.is_none() => render_path(&type_path.path),
        Type::Reference(reference) => {
            let mutability = if reference.mutability.is_some() {
                "mut "
            } else {
                ""
            };
            format!("&{mutability}{}", render_type(&reference.elem))
        }
        Type::Slice(slice) => format!("[{}]", render_type(&slice.elem)),
        Type::Array(array) => format!(
            "[{}; {}]",
            render_type(&array.elem),
            compact_tokens(&array.len)
        ),
        Type::Tuple(tuple) => {
            let elems: Vec<_> = tuple.elems.iter().map(render_type).collect();
            if elems.len() == 1 {
                format!("({},)", elems[0])
            } else {
                format!("({})", elems.join(", "))
            }
        }
        Type::Ptr(ptr) => {
            let kind = if ptr.mutability.is_some() {
                "*mut "
            } else {
                "*const "
            };
            format!("{kind}{}", render_type(&ptr.elem))
        }
        Type::Paren(paren) => render_type(&paren.elem),
        Type::Group(group) => render_type(&group.elem),
        Type::Never(_) => "!".to_string(),
        Type::Infer(_) => "_".to_string(),
        other => compact_tokens(other),
    }
}

/// Render a path with its generic arguments
pub fn render_path(path: &Path) -> String {
    let segments: Vec<String> = path
        .segments
        .iter()
        .map(|segment| {
            let mut rendered = segment.ident.to_string();
            match &segment.arguments {
                PathArguments::None => {}
                PathArguments::AngleBracketed(args) => {
                    let args: Vec<_> = args.args.iter().filter_map(render_generic_arg).collect();
                    if !args.is_empty() {
                        rendered.push('<');
                        rendered.push_str(&args.join(", "));
                        rendered.push('>');
                    }
                }
                PathArguments::Parenthesized(args) => {
                    let inputs: Vec<_> = args.inputs.iter().map(render_type).collect();
                    rendered.push('(');
                    rendered.push_str(&inputs.join(", "));
                    rendered.push(')');
                    if let ReturnType::Type(_, output) = &args.output {
                        rendered.push_str(" -> ");
                        rendered.push_str(&render_type(output));
                    }
                }
            }
            rendered
        })
        .collect();

    let prefix = if path.leading_colon.is_some() {
        "::"
    } else {
        ""
    };
    format!("{prefix}{}", segments.join("::"))
}

fn render_generic_arg(arg: &GenericArgument) -> Option<String> {
    match arg {
        GenericArgument::Lifetime(_) => None,
        GenericArgument::Type(ty) => Some(render_type(ty)),
        GenericArgument::AssocType(assoc) => {
            Some(format!("{} = {}", assoc.ident, render_type(&assoc.ty)))
        }
        other => Some(compact_tokens(other)),
    }
}

/// Token text with the spacing `to_string` inserts around punctuation removed
pub fn compact_tokens<T: ToTokens>(node: &T) -> String {
    const REPLACEMENTS: &[(&str, &str)] = &[
        (" :: ", "::"),
        (":: ", "::"),
        (" < ", "<"),
        ("< ", "<"),
        (" <", "<"),
        (" >", ">"),
        (" ,", ","),
        ("& ", "&"),
    ];

    let mut text = node.to_token_stream().to_string();
    for (from, to) in REPLACEMENTS {
        text = text.replace(from, to);
    }
    text
}
