// crates/mojifix-cli/src/io/mod.rs

pub mod logging;
pub mod status;
