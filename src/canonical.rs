//! Mapping raw identifiers onto canonical names.

use crate::registry::{Registry, EFFECT_LABELS, NAMES};
use heck::ToUpperCamelCase;

/// Strip everything but ASCII letters and digits from a display name.
/// `"Mr. Mime"` becomes `"MrMime"`.
pub fn name_to_enum(name: &str) -> String {
    name.chars().filter(|c| c.is_ascii_alphanumeric()).collect()
}

/// Canonical name of an upstream constant: the alias table first, then
/// `SCREAMING_SNAKE` to `UpperCamel`.
pub fn const_to_enum(constant: &str) -> String {
    match NAMES.get(constant) {
        Some(name) => (*name).to_string(),
        None => constant.to_upper_camel_case(),
    }
}

/// The name to look a listing's move constant up by in the dex. Constants
/// missing from the generation's alias table are looked up as they are.
pub fn move_dex_name<'a>(registry: &Registry, constant: &'a str) -> &'a str {
    registry
        .move_aliases
        .get(constant)
        .copied()
        .unwrap_or(constant)
}

/// Canonical name of an effect constant from a move listing.
pub fn const_to_effect(constant: &str) -> String {
    if let Some(name) = NAMES.get(constant) {
        return (*name).to_string();
    }
    constant
        .to_upper_camel_case()
        .replacen("SideEffect", "Chance", 1)
        .replacen("Effect", "", 1)
}

/// Canonical name of a label from the effects listing.
pub fn effect_label(label: &str) -> String {
    EFFECT_LABELS
        .get(label)
        .map(|name| (*name).to_string())
        .unwrap_or_else(|| label.to_string())
}

/// Human-readable name of an identifier: a space goes before every capital
/// that starts a lowercase run, except at the very start.
/// `"BlackBelt"` becomes `"Black Belt"`, `"HPUp"` becomes `"HP Up"`.
pub fn display_name(ident: &str) -> String {
    let chars: Vec<char> = ident.chars().collect();
    let mut out = String::with_capacity(ident.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        let starts_word = i > 0
            && c.is_ascii_uppercase()
            && chars.get(i + 1).is_some_and(|next| next.is_ascii_lowercase());
        if starts_word {
            out.push(' ');
        }
        out.push(c);
    }
    out
}
