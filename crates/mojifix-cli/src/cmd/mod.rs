// crates/mojifix-cli/src/cmd/mod.rs

pub mod normalize;
pub mod reencode;
