pub mod error;

pub mod config;
pub mod css;
pub mod encoding;
pub mod html;
pub mod normalize;
pub mod reencode;
pub mod targets;
pub mod text_norm;

pub use crate::config::{NormalizeConfig, ReencodeConfig};
pub use crate::encoding::{Candidate, Detection};
pub use crate::error::{FixError, Result};
pub use crate::normalize::{FileOutcome, Normalizer};
pub use crate::reencode::{ReencodeOutcome, Reencoder};
