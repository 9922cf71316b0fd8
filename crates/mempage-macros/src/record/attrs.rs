//! Attribute parsing for the Record derive macro.
//!
//! Names come from two places: the `#[record(...)]` attributes owned by this
//! crate, and the `#[serde(...)]` attributes already on the struct. Serde
//! attributes are read leniently: keys that do not affect naming are skipped
//! so any valid serde annotation is accepted.

use proc_macro2::Span;
use syn::{
    ext::IdentExt,
    meta::ParseNestedMeta,
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Error, Expr, ExprLit, Field, Ident, Lit, LitStr, Meta, Result, Token,
};

/// Case conversion applied to field names by `rename_all`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameRule {
    LowerCase,
    UpperCase,
    PascalCase,
    CamelCase,
    SnakeCase,
    ScreamingSnakeCase,
    KebabCase,
    ScreamingKebabCase,
}

impl RenameRule {
    /// Parses a rule from its serde spelling.
    pub fn from_str(s: &str, span: Span) -> Result<Self> {
        match s {
            "lowercase" => Ok(RenameRule::LowerCase),
            "UPPERCASE" => Ok(RenameRule::UpperCase),
            "PascalCase" => Ok(RenameRule::PascalCase),
            "camelCase" => Ok(RenameRule::CamelCase),
            "snake_case" => Ok(RenameRule::SnakeCase),
            "SCREAMING_SNAKE_CASE" => Ok(RenameRule::ScreamingSnakeCase),
            "kebab-case" => Ok(RenameRule::KebabCase),
            "SCREAMING-KEBAB-CASE" => Ok(RenameRule::ScreamingKebabCase),
            other => Err(Error::new(
                span,
                format!(
                    "unknown rename rule: '{}'. Expected one of: lowercase, UPPERCASE, PascalCase, \
                     camelCase, snake_case, SCREAMING_SNAKE_CASE, kebab-case, SCREAMING-KEBAB-CASE",
                    other
                ),
            )),
        }
    }

    /// Applies the rule to a snake_case field name, the way serde does.
    pub fn apply_to_field(self, field: &str) -> String {
        match self {
            RenameRule::LowerCase | RenameRule::SnakeCase => field.to_owned(),
            RenameRule::UpperCase | RenameRule::ScreamingSnakeCase => field.to_ascii_uppercase(),
            RenameRule::PascalCase => {
                let mut pascal = String::with_capacity(field.len());
                let mut capitalize = true;
                for ch in field.chars() {
                    if ch == '_' {
                        capitalize = true;
                    } else if capitalize {
                        pascal.push(ch.to_ascii_uppercase());
                        capitalize = false;
                    } else {
                        pascal.push(ch);
                    }
                }
                pascal
            }
            RenameRule::CamelCase => {
                let pascal = RenameRule::PascalCase.apply_to_field(field);
                let mut chars = pascal.chars();
                match chars.next() {
                    Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
                    None => pascal,
                }
            }
            RenameRule::KebabCase => field.replace('_', "-"),
            RenameRule::ScreamingKebabCase => field.to_ascii_uppercase().replace('_', "-"),
        }
    }
}

/// Container-level attributes.
#[derive(Debug, Clone, Default)]
pub struct ContainerAttr {
    /// Rule from `#[serde(rename_all)]`.
    pub serde_rename_all: Option<RenameRule>,
    /// Rule from `#[record(rename_all)]`, which wins over serde's.
    pub rename_all: Option<RenameRule>,
}

impl ContainerAttr {
    pub fn rule(&self) -> Option<RenameRule> {
        self.rename_all.or(self.serde_rename_all)
    }
}

/// The container form of `#[record(...)]`: only `rename_all` is accepted.
struct RecordContainerArgs {
    rename_all: Option<RenameRule>,
}

impl Parse for RecordContainerArgs {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut rename_all = None;
        let content: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in content {
            match &meta {
                Meta::NameValue(nv) if nv.path.is_ident("rename_all") => {
                    let lit = expect_str(&nv.value, "rename_all")?;
                    rename_all = Some(RenameRule::from_str(&lit.value(), lit.span())?);
                }
                _ => {
                    return Err(Error::new(
                        meta.span(),
                        "unknown record container attribute. Expected: rename_all = \"...\"",
                    ))
                }
            }
        }

        Ok(RecordContainerArgs { rename_all })
    }
}

/// Field-level attributes from `#[record(...)]` and `#[serde(...)]`.
#[derive(Debug, Clone)]
pub struct FieldAttr {
    /// Exclude the field from resolution.
    pub skip: bool,
    /// Explicit serialized name.
    pub rename: Option<String>,
    /// Extra names the field answers to.
    pub aliases: Vec<String>,
    /// The field holds a sub-record reachable by dotted keys.
    pub nested: bool,
    /// The sub-record's fields are promoted to this record.
    pub flatten: bool,
    /// The field is carried as an unsupported value.
    pub opaque: bool,
    /// Where `#[record]` was written, for error reporting.
    pub span: Span,
}

impl Default for FieldAttr {
    fn default() -> Self {
        FieldAttr {
            skip: false,
            rename: None,
            aliases: Vec::new(),
            nested: false,
            flatten: false,
            opaque: false,
            span: Span::call_site(),
        }
    }
}

impl FieldAttr {
    /// Reads the field as a sub-record rather than a leaf value.
    pub fn is_record(&self) -> bool {
        self.nested || self.flatten
    }

    fn merge_record(&mut self, args: FieldAttr) {
        self.skip |= args.skip;
        self.nested |= args.nested;
        self.flatten |= args.flatten;
        self.opaque |= args.opaque;
        if args.rename.is_some() {
            self.rename = args.rename;
        }
        self.aliases.extend(args.aliases);
        self.span = args.span;
    }
}

impl Parse for FieldAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = FieldAttr {
            span: input.span(),
            ..FieldAttr::default()
        };

        let content: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in content {
            match &meta {
                Meta::Path(p) if p.is_ident("skip") => attr.skip = true,
                Meta::Path(p) if p.is_ident("nested") => attr.nested = true,
                Meta::Path(p) if p.is_ident("flatten") => attr.flatten = true,
                Meta::Path(p) if p.is_ident("opaque") => attr.opaque = true,
                Meta::NameValue(nv) if nv.path.is_ident("rename") => {
                    attr.rename = Some(expect_str(&nv.value, "rename")?.value());
                }
                Meta::NameValue(nv) if nv.path.is_ident("alias") => {
                    attr.aliases.push(expect_str(&nv.value, "alias")?.value());
                }
                _ => {
                    return Err(Error::new(
                        meta.span(),
                        "unknown record attribute. Expected: skip, nested, flatten, opaque, rename = \"...\", or alias = \"...\"",
                    ))
                }
            }
        }

        Ok(attr)
    }
}

/// Extract container attributes from a struct's attributes.
pub fn parse_container_attrs(attrs: &[Attribute]) -> Result<ContainerAttr> {
    let mut container = ContainerAttr::default();

    for attr in attrs {
        if attr.path().is_ident("record") {
            let args = attr.parse_args::<RecordContainerArgs>()?;
            if args.rename_all.is_some() {
                container.rename_all = args.rename_all;
            }
        } else if attr.path().is_ident("serde") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename_all") {
                    if let Some(lit) = serialize_name(&meta)? {
                        container.serde_rename_all = Some(RenameRule::from_str(&lit.value(), lit.span())?);
                    }
                    Ok(())
                } else {
                    skip_meta(&meta)
                }
            })?;
        }
    }

    Ok(container)
}

/// Extract `#[record(...)]` and `#[serde(...)]` attributes from a field.
///
/// `#[record]` settings win over serde's when both name the field.
pub fn parse_field_attrs(field: &Field) -> Result<FieldAttr> {
    let mut serde_attr = FieldAttr::default();
    let mut record_attr: Option<FieldAttr> = None;

    for attr in &field.attrs {
        if attr.path().is_ident("record") {
            let parsed = attr.parse_args::<FieldAttr>()?;
            match record_attr.as_mut() {
                Some(existing) => existing.merge_record(parsed),
                None => record_attr = Some(parsed),
            }
        } else if attr.path().is_ident("serde") {
            parse_serde_field(attr, &mut serde_attr)?;
        }
    }

    let mut attr = serde_attr;
    if let Some(record) = record_attr {
        attr.merge_record(record);
    }

    if attr.opaque && attr.is_record() {
        return Err(Error::new(
            attr.span,
            "opaque cannot be combined with nested or flatten",
        ));
    }

    Ok(attr)
}

/// The name a field is known by before any `rename_all` rule.
pub fn field_ident_name(ident: &Ident) -> String {
    ident.unraw().to_string()
}

fn parse_serde_field(attr: &Attribute, out: &mut FieldAttr) -> Result<()> {
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("rename") {
            if meta.input.peek(Token![=]) {
                out.rename = Some(meta.value()?.parse::<LitStr>()?.value());
            } else {
                meta.parse_nested_meta(|inner| {
                    let lit: LitStr = inner.value()?.parse()?;
                    if inner.path.is_ident("serialize") {
                        out.rename = Some(lit.value());
                    } else if inner.path.is_ident("deserialize") {
                        out.aliases.push(lit.value());
                    }
                    Ok(())
                })?;
            }
            Ok(())
        } else if meta.path.is_ident("alias") {
            out.aliases.push(meta.value()?.parse::<LitStr>()?.value());
            Ok(())
        } else if meta.path.is_ident("skip") || meta.path.is_ident("skip_serializing") {
            out.skip = true;
            Ok(())
        } else if meta.path.is_ident("flatten") {
            out.flatten = true;
            Ok(())
        } else {
            skip_meta(&meta)
        }
    })
}

/// Reads `key = "x"` or `key(serialize = "x", ...)`, returning the
/// serialize-side string.
fn serialize_name(meta: &ParseNestedMeta) -> Result<Option<LitStr>> {
    if meta.input.peek(Token![=]) {
        return Ok(Some(meta.value()?.parse()?));
    }

    let mut name = None;
    meta.parse_nested_meta(|inner| {
        let lit: LitStr = inner.value()?.parse()?;
        if inner.path.is_ident("serialize") {
            name = Some(lit);
        }
        Ok(())
    })?;
    Ok(name)
}

/// Consumes a serde key this macro does not care about.
fn skip_meta(meta: &ParseNestedMeta) -> Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<Expr>()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        syn::parenthesized!(content in meta.input);
        content.parse::<proc_macro2::TokenStream>()?;
    }
    Ok(())
}

fn expect_str<'e>(value: &'e Expr, key: &str) -> Result<&'e LitStr> {
    match value {
        Expr::Lit(ExprLit {
            lit: Lit::Str(s), ..
        }) => Ok(s),
        _ => Err(Error::new(
            value.span(),
            format!("{} must be a string literal", key),
        )),
    }
}
