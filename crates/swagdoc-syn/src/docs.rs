use syn::{Attribute, Expr, ExprLit, Item, Lit, Meta};

/// Collect `#[doc = "..."]` attributes (`///`, `//!`, `/** */`) into a single
/// block with one trimmed line per source line.
pub fn doc_block(attrs: &[Attribute]) -> Option<String> {
    let lines: Vec<String> = attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(doc_value)
        .flat_map(|value| {
            value
                .lines()
                .map(|line| line.trim().to_string())
                .collect::<Vec<_>>()
        })
        .collect();

    if lines.iter().all(|l| l.is_empty()) {
        return None;
    }
    Some(lines.join("\n"))
}

fn doc_value(attr: &Attribute) -> Option<String> {
    match &attr.meta {
        Meta::NameValue(meta) => match &meta.value {
            Expr::Lit(ExprLit {
                lit: Lit::Str(lit), ..
            }) => Some(lit.value()),
            _ => None,
        },
        _ => None,
    }
}

/// Doc comment text with annotation lines removed, for use as a description.
pub fn prose(attrs: &[Attribute]) -> String {
    doc_block(attrs)
        .map(|block| {
            block
                .lines()
                .filter(|l| !l.starts_with('@') && !l.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .unwrap_or_default()
}

/// Outer attributes of an item, for the item kinds that can carry docs.
pub fn item_attrs(item: &Item) -> &[Attribute] {
    match item {
        Item::Const(i) => &i.attrs,
        Item::Enum(i) => &i.attrs,
        Item::ExternCrate(i) => &i.attrs,
        Item::Fn(i) => &i.attrs,
        Item::ForeignMod(i) => &i.attrs,
        Item::Impl(i) => &i.attrs,
        Item::Macro(i) => &i.attrs,
        Item::Mod(i) => &i.attrs,
        Item::Static(i) => &i.attrs,
        Item::Struct(i) => &i.attrs,
        Item::Trait(i) => &i.attrs,
        Item::TraitAlias(i) => &i.attrs,
        Item::Type(i) => &i.attrs,
        Item::Union(i) => &i.attrs,
        Item::Use(i) => &i.attrs,
        _ => &[],
    }
}
