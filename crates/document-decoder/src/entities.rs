//! Character reference decoding.
//!
//! Resolves `&name;`, `&#NN;` and `&#xHH;` spans to the characters they
//! name. Anything that does not resolve is copied through verbatim, so
//! decoding never fails.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static CHARACTER_REFERENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(#[xX]?[0-9A-Fa-f]+|\w+);").expect("character reference pattern is valid")
});

/// Decode character references in `text`.
///
/// Returns the input borrowed when it holds no character reference.
///
/// # Example
///
/// ```rust
/// use document_decoder::decode_entities;
///
/// assert_eq!(decode_entities("Fish &amp; Chips"), "Fish & Chips");
/// assert_eq!(decode_entities("&#x41;&#66;"), "AB");
/// assert_eq!(decode_entities("&unknown;"), "&unknown;");
/// ```
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    CHARACTER_REFERENCE.replace_all(text, |caps: &Captures| match decode_reference(&caps[1]) {
        Some(c) => c.to_string(),
        None => caps[0].to_string(),
    })
}

/// Resolve the body of a reference (the part between `&` and `;`)
fn decode_reference(reference: &str) -> Option<char> {
    if let Some(hex) = reference
        .strip_prefix("#x")
        .or_else(|| reference.strip_prefix("#X"))
    {
        decode_numeric(hex, 16)
    } else if let Some(decimal) = reference.strip_prefix('#') {
        decode_numeric(decimal, 10)
    } else {
        named_entity(reference)
    }
}

fn decode_numeric(digits: &str, radix: u32) -> Option<char> {
    u32::from_str_radix(digits, radix)
        .ok()
        .and_then(char::from_u32)
}

fn named_entity(name: &str) -> Option<char> {
    let c = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{00A0}',
        "copy" => '©',
        "reg" => '®',
        "trade" => '™',
        "hellip" => '…',
        "mdash" => '—',
        "ndash" => '–',
        "lsquo" => '‘',
        "rsquo" => '’',
        "ldquo" => '“',
        "rdquo" => '”',
        "laquo" => '«',
        "raquo" => '»',
        "bull" => '•',
        "middot" => '·',
        "times" => '×',
        "divide" => '÷',
        "deg" => '°',
        "plusmn" => '±',
        "para" => '¶',
        "sect" => '§',
        "cent" => '¢',
        "pound" => '£',
        "yen" => '¥',
        "euro" => '€',
        "iexcl" => '¡',
        "iquest" => '¿',
        "shy" => '\u{00AD}',
        "zwj" => '\u{200D}',
        "zwnj" => '\u{200C}',
        _ => return None,
    };
    Some(c)
}
