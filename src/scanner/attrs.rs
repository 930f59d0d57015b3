//! Serde attribute parsing
//!
//! Reads the wire-naming parts of `#[serde(...)]` attributes. Keys that do
//! not affect a field's serialized name are consumed and ignored.

use heck::{ToKebabCase, ToLowerCamelCase, ToShoutyKebabCase, ToShoutySnakeCase, ToUpperCamelCase};
use syn::meta::ParseNestedMeta;
use syn::{Attribute, LitStr, Token};
use tracing::debug;

/// Container-level `rename_all` conventions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameRule {
    Lower,
    Upper,
    Pascal,
    Camel,
    Snake,
    ScreamingSnake,
    Kebab,
    ScreamingKebab,
}

impl RenameRule {
    /// Parse a serde case convention name
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "lowercase" => Some(RenameRule::Lower),
            "UPPERCASE" => Some(RenameRule::Upper),
            "PascalCase" => Some(RenameRule::Pascal),
            "camelCase" => Some(RenameRule::Camel),
            "snake_case" => Some(RenameRule::Snake),
            "SCREAMING_SNAKE_CASE" => Some(RenameRule::ScreamingSnake),
            "kebab-case" => Some(RenameRule::Kebab),
            "SCREAMING-KEBAB-CASE" => Some(RenameRule::ScreamingKebab),
            _ => None,
        }
    }

    /// Apply the rule to a snake_case field name
    pub fn apply_to_field(self, field: &str) -> String {
        match self {
            RenameRule::Lower | RenameRule::Snake => field.to_string(),
            RenameRule::Upper => field.to_ascii_uppercase(),
            RenameRule::Pascal => field.to_upper_camel_case(),
            RenameRule::Camel => field.to_lower_camel_case(),
            RenameRule::ScreamingSnake => field.to_shouty_snake_case(),
            RenameRule::Kebab => field.to_kebab_case(),
            RenameRule::ScreamingKebab => field.to_shouty_kebab_case(),
        }
    }
}

/// Serde settings of a struct
#[derive(Debug, Default)]
pub struct ContainerAttrs {
    pub rename_all: Option<RenameRule>,
}

/// Serde settings of a field
#[derive(Debug, Default)]
pub struct FieldAttrs {
    pub rename: Option<String>,
    pub skip: bool,
}

fn serde_attrs(attrs: &[Attribute]) -> impl Iterator<Item = &Attribute> {
    attrs.iter().filter(|attr| attr.path().is_ident("serde"))
}

/// Read container attributes
pub fn container_attrs(attrs: &[Attribute]) -> ContainerAttrs {
    let mut result = ContainerAttrs::default();

    for attr in serde_attrs(attrs) {
        let parsed = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename_all") {
                if let Some(name) = serialize_name(&meta)? {
                    result.rename_all = RenameRule::parse(&name);
                    if result.rename_all.is_none() {
                        debug!("Ignoring unknown rename_all rule '{}'", name);
                    }
                }
                Ok(())
            } else {
                skip_meta(&meta)
            }
        });
        if let Err(e) = parsed {
            debug!("Ignoring malformed serde attribute: {}", e);
        }
    }

    result
}

/// Read field attributes
pub fn field_attrs(attrs: &[Attribute]) -> FieldAttrs {
    let mut result = FieldAttrs::default();

    for attr in serde_attrs(attrs) {
        let parsed = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                if let Some(name) = serialize_name(&meta)? {
                    result.rename = Some(name);
                }
                Ok(())
            } else if meta.path.is_ident("skip") || meta.path.is_ident("skip_serializing") {
                result.skip = true;
                Ok(())
            } else {
                skip_meta(&meta)
            }
        });
        if let Err(e) = parsed {
            debug!("Ignoring malformed serde attribute: {}", e);
        }
    }

    result
}

/// Value of `key = "x"` or the `serialize` half of `key(serialize = "x", ...)`
fn serialize_name(meta: &ParseNestedMeta) -> syn::Result<Option<String>> {
    if meta.input.peek(Token![=]) {
        let value: LitStr = meta.value()?.parse()?;
        return Ok(Some(value.value()));
    }

    let mut name = None;
    meta.parse_nested_meta(|inner| {
        let value: LitStr = inner.value()?.parse()?;
        if inner.path.is_ident("serialize") {
            name = Some(value.value());
        }
        Ok(())
    })?;
    Ok(name)
}

/// Consume an unrecognised key together with its value or argument list
fn skip_meta(meta: &ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        let _: syn::Expr = meta.value()?.parse()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        syn::parenthesized!(content in meta.input);
        let _: proc_macro2::TokenStream = content.parse()?;
    }
    Ok(())
}
