//! Foundation types for the ts-sh toolchain.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`FileId`] - Dense file identifiers assigned by a program
//! - [`TextSpan`] - Half-open request spans with the host's intersection rule
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//!
//! This module has NO dependencies on other ts-sh modules.

mod file_id;
mod span;

pub use file_id::FileId;
pub use span::TextSpan;

pub use text_size::{TextRange, TextSize};
