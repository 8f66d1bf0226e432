//! Name mangling
//!
//! Source identifiers may contain operator characters (`to-string`,
//! `empty?`), so every name is rewritten into `$`-prefixed target text in
//! which anything outside `[A-Za-z0-9_]` becomes `$` plus its character code.

use super::ir::Ident;

/// What a source name refers to after mangling
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mangled {
    Nil,
    True,
    False,
    /// Lexical variable
    Local(Ident),
    /// Field on the current receiver (`_count` reads `$count`)
    Field(Ident),
}

pub fn mangle(name: &str) -> Mangled {
    match name {
        "nil" => Mangled::Nil,
        "true" => Mangled::True,
        "false" => Mangled::False,
        _ => match name.strip_prefix('_') {
            Some(rest) => Mangled::Field(Ident::new(escape(rest), name)),
            None => Mangled::Local(Ident::new(escape(name), name)),
        },
    }
}

/// Storage key of the field behind a property named `name`
pub fn field_key(name: &str) -> Ident {
    let bare = name.strip_prefix('_').unwrap_or(name);
    Ident::new(escape(bare), format!("_{}", bare))
}

/// `$` followed by `name` with every non-word character escaped
pub fn escape(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 1);
    out.push('$');
    for c in name.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            out.push(c);
        } else {
            out.push('$');
            out.push_str(&(c as u32).to_string());
        }
    }
    out
}
