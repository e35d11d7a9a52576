//! XML entity escaping and Excel's `_xHHHH_` character escapes

/// Escape text for use in XML content or attribute values
pub(crate) fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Decode `_xHHHH_` sequences (`_x000D_` is CR, `_x005F_` an underscore).
/// Malformed sequences are kept literally.
pub(crate) fn decode_excel_escapes(s: &str) -> String {
    if !s.contains("_x") {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(pos) = rest.find("_x") {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match escaped_char(tail) {
            Some(c) => {
                out.push(c);
                rest = &tail[7..];
            }
            None => {
                out.push('_');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Encode characters XML cannot carry, and underscores that would otherwise
/// read back as the start of an escape
pub(crate) fn encode_excel_escapes(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for (i, c) in s.char_indices() {
        if c == '_' && escaped_char(&s[i..]).is_some() {
            out.push_str("_x005F_");
        } else if (c as u32) < 0x20 && !matches!(c, '\t' | '\n' | '\r') {
            out.push_str(&format!("_x{:04X}_", c as u32));
        } else {
            out.push(c);
        }
    }
    out
}

/// Text ready to be placed in a `<t>`, `<v>` or `<f>` element
pub(crate) fn xml_text(s: &str) -> String {
    escape_xml(&encode_excel_escapes(s))
}

/// The character of a `_xHHHH_` sequence at the start of `tail`
fn escaped_char(tail: &str) -> Option<char> {
    let hex = tail.strip_prefix("_x")?.get(..4)?;
    if tail.as_bytes().get(6) != Some(&b'_') || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
}
