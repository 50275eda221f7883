//! Grapheme-aware transcoding between UTF-8 and legacy DOS code pages.
//!
//! DOS code pages have exactly 256 slots, host text is arbitrary Unicode,
//! and the guest needs one byte per visible character to keep cursor and
//! column arithmetic honest. The conversion is therefore driven by
//! externally loaded mapping tables and a multi-stage fallback chain that
//! guarantees a deterministic one-byte-per-grapheme output.
//!
//! # Module organization
//!
//! - [`codec`]: UTF-8 ⇄ code point codec and the screen-code glyph table
//! - [`types`]: the [`Grapheme`] value type, table types, error types
//! - `format`: recognizers for the mapping configuration files
//! - [`host`]: the [`HostContext`] seam to the emulator
//! - [`Transcoder`]: the registry, builder, and public operations

pub mod codec;
mod convert;
mod format;
pub mod host;
mod transcoder;
pub mod types;

pub use host::{FixedHost, HostContext};
pub use transcoder::Transcoder;
pub use types::error::{MappingError, Result};
pub use types::grapheme::{is_combining_mark, Grapheme};
pub use types::models::{CodePoint, DEFAULT_CODE_PAGE, END_OF_FILE_MARKING, UNKNOWN_CHARACTER};
