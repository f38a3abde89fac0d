//! Adapter implementations that handle I/O
//!
//! - `toml/` - Version catalog file loading
//!
//! The composition core never reads files; callers load a catalog here and
//! hand it to the registry.

pub mod toml;
