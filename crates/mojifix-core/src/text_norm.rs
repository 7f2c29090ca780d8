// crates/mojifix-core/src/text_norm.rs
//
// Text normalization applied after a successful decode.
//
// Rules:
// - Drop one leading U+FEFF (byte order mark that survived decoding).
// - Convert CRLF and CR to LF.
// - Leave every other character unchanged.

pub const BOM: char = '\u{feff}';

pub fn strip_bom(text: &str) -> &str {
    text.strip_prefix(BOM).unwrap_or(text)
}

pub fn normalize_newlines(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\r' {
            // CRLF -> LF, lone CR -> LF
            if chars.peek() == Some(&'\n') {
                chars.next();
            }
            out.push('\n');
            continue;
        }
        out.push(c);
    }
    out
}
