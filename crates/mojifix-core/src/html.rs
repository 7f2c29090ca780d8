// crates/mojifix-core/src/html.rs
//
// Structural repair for HTML documents: doctype and charset meta.

use regex::Regex;

use crate::error::Result;

pub const DOCTYPE_LINE: &str = "<!DOCTYPE html>\n";
pub const CHARSET_META: &str = "<meta charset=\"UTF-8\">";

const HEAD_TAG_PATTERN: &str = r"(?i)<head.*?>";

pub fn has_doctype(text: &str) -> bool {
    text.trim_start()
        .get(..9)
        .is_some_and(|head| head.eq_ignore_ascii_case("<!doctype"))
}

pub fn has_charset_meta(text: &str) -> bool {
    text.contains(CHARSET_META) || text.to_lowercase().contains("<meta charset=\"utf-8\">")
}

/// Holds the compiled head tag pattern so a batch compiles it once.
#[derive(Debug, Clone)]
pub struct HtmlPatcher {
    head: Regex,
}

impl HtmlPatcher {
    pub fn new() -> Result<Self> {
        Ok(Self {
            head: Regex::new(HEAD_TAG_PATTERN)?,
        })
    }

    /// Prepend a doctype when missing, then inject the charset meta right
    /// after the first head tag. Only the first match is patched; text with
    /// no head tag gets no meta.
    pub fn patch(&self, text: &str) -> String {
        let mut out = if has_doctype(text) {
            text.to_string()
        } else {
            format!("{DOCTYPE_LINE}{text}")
        };

        if !has_charset_meta(&out) {
            if let Some(m) = self.head.find(&out) {
                out.insert_str(m.end(), &format!("\n  {CHARSET_META}"));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patcher() -> HtmlPatcher {
        HtmlPatcher::new().expect("pattern compiles")
    }

    #[test]
    fn bare_document_gets_doctype_and_single_meta() {
        let out = patcher().patch("<html><head></head><body>x</body></html>");
        assert_eq!(
            out,
            "<!DOCTYPE html>\n<html><head>\n  <meta charset=\"UTF-8\"></head><body>x</body></html>"
        );
        assert_eq!(out.matches(CHARSET_META).count(), 1);
    }

    #[test]
    fn patch_is_idempotent() {
        let p = patcher();
        let once = p.patch("<html><HEAD lang=\"ko\"><title>t</title></HEAD></html>");
        let twice = p.patch(&once);
        assert_eq!(once, twice);
        assert!(once.starts_with(DOCTYPE_LINE));
        assert!(once.contains("<HEAD lang=\"ko\">\n  <meta charset=\"UTF-8\">"));
    }

    #[test]
    fn doctype_check_ignores_case_and_leading_whitespace() {
        assert!(has_doctype("  \n<!doctype html><html></html>"));
        assert!(has_doctype("<!DocType html>"));
        assert!(!has_doctype("<html><!DOCTYPE html>"));
        assert!(!has_doctype("<!doc"));
    }

    #[test]
    fn existing_charset_in_any_case_is_respected() {
        let src = "<!DOCTYPE html><html><head><META CHARSET=\"utf-8\"></head></html>";
        assert!(has_charset_meta(src));
        assert_eq!(patcher().patch(src), src);
    }

    #[test]
    fn only_first_head_tag_is_patched() {
        let out = patcher().patch("<!DOCTYPE html><head></head><head></head>");
        assert_eq!(out.matches(CHARSET_META).count(), 1);
        assert!(out.starts_with("<!DOCTYPE html><head>\n  <meta charset=\"UTF-8\"></head><head></head>"));
    }

    #[test]
    fn no_head_tag_means_no_meta() {
        let out = patcher().patch("<!DOCTYPE html><body>x</body>");
        assert_eq!(out, "<!DOCTYPE html><body>x</body>");
    }
}
