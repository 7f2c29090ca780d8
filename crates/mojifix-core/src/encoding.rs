// crates/mojifix-core/src/encoding.rs
//
// Ordered trial decoding over a fixed set of candidate encodings.
// The first candidate that decodes without error wins. No plausibility
// check is made on the resulting text.

use std::fmt;
use std::str::FromStr;

use encoding_rs::{EUC_KR, UTF_16BE, UTF_16LE, UTF_8};

use crate::error::{FixError, Result};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// One entry of the candidate encoding list.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Candidate {
    Utf16Be,
    Utf16Le,
    /// BOM-sniffing UTF-16; little endian when no BOM is present.
    Utf16,
    /// UTF-8 with one optional leading BOM consumed.
    Utf8Sig,
    Utf8,
    /// Unified Hangul Code (Windows code page 949).
    Cp949,
    /// Strict KS X 1001 two-byte structure.
    EucKr,
}

/// Most specific legacy guesses first, generic UTF-8 next, regional last.
pub const DEFAULT_ORDER: [Candidate; 7] = [
    Candidate::Utf16Be,
    Candidate::Utf16Le,
    Candidate::Utf16,
    Candidate::Utf8Sig,
    Candidate::Utf8,
    Candidate::Cp949,
    Candidate::EucKr,
];

impl Candidate {
    pub fn label(self) -> &'static str {
        match self {
            Candidate::Utf16Be => "utf-16-be",
            Candidate::Utf16Le => "utf-16-le",
            Candidate::Utf16 => "utf-16",
            Candidate::Utf8Sig => "utf-8-sig",
            Candidate::Utf8 => "utf-8",
            Candidate::Cp949 => "cp949",
            Candidate::EucKr => "euc-kr",
        }
    }

    /// Strict decode. `None` on any malformed sequence; never substitutes
    /// replacement characters.
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            Candidate::Utf16Be => strict(UTF_16BE, bytes),
            Candidate::Utf16Le => strict(UTF_16LE, bytes),
            Candidate::Utf16 => match bytes {
                [0xFF, 0xFE, rest @ ..] => strict(UTF_16LE, rest),
                [0xFE, 0xFF, rest @ ..] => strict(UTF_16BE, rest),
                _ => strict(UTF_16LE, bytes),
            },
            Candidate::Utf8Sig => {
                let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
                strict(UTF_8, body)
            }
            Candidate::Utf8 => strict(UTF_8, bytes),
            Candidate::Cp949 => strict(EUC_KR, bytes),
            Candidate::EucKr => {
                if is_ksx1001_structure(bytes) {
                    strict(EUC_KR, bytes)
                } else {
                    None
                }
            }
        }
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Candidate {
    type Err = FixError;

    fn from_str(s: &str) -> Result<Self> {
        let norm = s.trim().to_ascii_lowercase().replace('_', "-");
        let c = match norm.as_str() {
            "utf-16-be" | "utf-16be" => Candidate::Utf16Be,
            "utf-16-le" | "utf-16le" => Candidate::Utf16Le,
            "utf-16" | "utf16" => Candidate::Utf16,
            "utf-8-sig" | "utf8-sig" => Candidate::Utf8Sig,
            "utf-8" | "utf8" => Candidate::Utf8,
            "cp949" | "uhc" | "windows-949" => Candidate::Cp949,
            "euc-kr" | "euckr" => Candidate::EucKr,
            _ => return Err(FixError::UnknownEncoding(s.to_string())),
        };
        Ok(c)
    }
}

/// Parse a comma separated candidate list, e.g. `utf-8,cp949`.
pub fn parse_candidates(list: &str) -> Result<Vec<Candidate>> {
    let out = list
        .split(',')
        .filter(|s| !s.trim().is_empty())
        .map(Candidate::from_str)
        .collect::<Result<Vec<_>>>()?;
    if out.is_empty() {
        return Err(FixError::Config("candidate list is empty".into()));
    }
    Ok(out)
}

/// Outcome of trying a candidate list against one byte buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Detection {
    Decoded { encoding: Candidate, text: String },
    Exhausted { tried: Vec<Candidate> },
}

pub fn detect(bytes: &[u8], candidates: &[Candidate]) -> Detection {
    for &enc in candidates {
        match enc.decode(bytes) {
            Some(text) => {
                tracing::debug!(encoding = %enc, len = bytes.len(), "candidate accepted");
                return Detection::Decoded { encoding: enc, text };
            }
            None => tracing::debug!(encoding = %enc, "candidate rejected"),
        }
    }
    Detection::Exhausted {
        tried: candidates.to_vec(),
    }
}

fn strict(enc: &'static encoding_rs::Encoding, bytes: &[u8]) -> Option<String> {
    enc.decode_without_bom_handling_and_without_replacement(bytes)
        .map(|cow| cow.into_owned())
}

// ASCII, or a lead/trail pair both in A1..=FE.
fn is_ksx1001_structure(bytes: &[u8]) -> bool {
    let mut i = 0usize;
    while i < bytes.len() {
        let b = bytes[i];
        if b < 0x80 {
            i += 1;
            continue;
        }
        let trail = match bytes.get(i + 1) {
            Some(&t) => t,
            None => return false,
        };
        if !(0xA1..=0xFE).contains(&b) || !(0xA1..=0xFE).contains(&trail) {
            return false;
        }
        i += 2;
    }
    true
}
