//! Casing helpers for user-supplied identifiers

/// Upper-case the first letter of every word
///
/// Within ASCII a word starts after any character that is not alphanumeric
/// and not `_`, so `order_item` stays one word while `order-item` becomes
/// `Order-Item`. Outside ASCII only whitespace separates words, which keeps
/// combining marks attached to their letter. Letters inside a word are left
/// alone.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;

    for c in s.chars() {
        if at_word_start {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = is_separator(c);
    }

    out
}

fn is_separator(c: char) -> bool {
    if c.is_ascii() {
        !(c.is_ascii_alphanumeric() || c == '_')
    } else {
        c.is_whitespace()
    }
}

/// Lower-case the whole string
pub fn lower_case(s: &str) -> String {
    s.to_lowercase()
}
