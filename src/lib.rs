//! Bidirectional text transcoding between UTF-8 and legacy DOS code pages,
//! as needed by a DOS-era emulation environment.
//!
//! The hard part is not byte remapping: host text may use precomposed
//! characters or base-plus-combining-mark sequences, while the guest wants
//! exactly one byte per visible character. The [`Transcoder`] assembles
//! graphemes, consults per-code-page mapping tables loaded from plain-text
//! configuration files, and walks a fallback chain (direct mapping, alias,
//! ASCII fallback, decomposition, mark stripping) before giving up with a
//! `?`.
//!
//! # Example
//!
//! ```no_run
//! use dos_unicode::{FixedHost, Transcoder};
//!
//! let host = FixedHost::new("resources").with_code_page(852);
//! let mut transcoder = Transcoder::new(host);
//!
//! // One byte per grapheme, even for combining sequences
//! let (bytes, ok) = transcoder.utf8_to_dos("Zażółć".as_bytes());
//! assert!(ok);
//! assert_eq!(bytes.len(), 6);
//!
//! // The reverse direction always succeeds
//! let text = transcoder.dos_to_utf8(&bytes);
//! # let _ = text;
//! ```
//!
//! Mapping tables live under the host's `mapping` resource directory
//! (`MAIN.TXT`, `ASCII.TXT`, `DECOMPOSITION.TXT`), with per-code-page
//! tables in directories named by `EXTENDS FILE` entries. This crate ships
//! a working set under `resources/`.

pub mod unicode;

pub use unicode::{
    is_combining_mark, CodePoint, FixedHost, Grapheme, HostContext, MappingError, Transcoder,
    DEFAULT_CODE_PAGE, UNKNOWN_CHARACTER,
};
