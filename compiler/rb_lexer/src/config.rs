//! Scanner configuration.
//!
//! Everything a host selects before a scan: the grammar variant, how ranges
//! are measured, where scanning starts, and whether comments are kept.

use rb_lexer_core::SourceBuffer;
use thiserror::Error;

/// Rejected configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unsupported language version {version}; supported versions are 18 through 27")]
    UnsupportedVersion { version: u8 },
    #[error("start offset {offset} lies beyond the end of the source ({len} bytes)")]
    StartOffsetOutOfBounds { offset: u32, len: u32 },
    #[error("start offset {offset} is not on a character boundary")]
    StartOffsetNotCharBoundary { offset: u32 },
}

/// Grammar variant, written as major and minor digits (`25` is 2.5).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub struct LanguageVersion(u8);

impl LanguageVersion {
    pub const SUPPORTED: [u8; 10] = [18, 19, 20, 21, 22, 23, 24, 25, 26, 27];
    pub const LATEST: LanguageVersion = LanguageVersion(27);

    pub fn new(version: u8) -> Result<Self, ConfigError> {
        if Self::SUPPORTED.contains(&version) {
            Ok(LanguageVersion(version))
        } else {
            Err(ConfigError::UnsupportedVersion { version })
        }
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    #[inline]
    pub(crate) const fn at_least(self, version: u8) -> bool {
        self.0 >= version
    }
}

impl Default for LanguageVersion {
    fn default() -> Self {
        Self::LATEST
    }
}

/// Options for one scan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LexerConfig {
    pub version: LanguageVersion,
    /// Measure ranges in codepoints instead of bytes.
    pub force_utf32: bool,
    /// Scanning starts inside a keyword-argument list: a newline right after
    /// a label is significant.
    pub in_kwarg: bool,
    /// Byte offset where scanning starts and where `reset` returns to.
    pub start_offset: u32,
    pub emit_comments: bool,
}

impl Default for LexerConfig {
    fn default() -> Self {
        LexerConfig {
            version: LanguageVersion::default(),
            force_utf32: false,
            in_kwarg: false,
            start_offset: 0,
            emit_comments: true,
        }
    }
}

impl LexerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a grammar variant by number.
    pub fn with_version(mut self, version: u8) -> Result<Self, ConfigError> {
        self.version = LanguageVersion::new(version)?;
        Ok(self)
    }

    #[must_use]
    pub fn with_force_utf32(mut self, force_utf32: bool) -> Self {
        self.force_utf32 = force_utf32;
        self
    }

    #[must_use]
    pub fn with_in_kwarg(mut self, in_kwarg: bool) -> Self {
        self.in_kwarg = in_kwarg;
        self
    }

    #[must_use]
    pub fn with_start_offset(mut self, offset: u32) -> Self {
        self.start_offset = offset;
        self
    }

    #[must_use]
    pub fn with_comments(mut self, emit_comments: bool) -> Self {
        self.emit_comments = emit_comments;
        self
    }

    /// Codepoint index of `start_offset` in `source`.
    pub(crate) fn start_index(&self, source: &SourceBuffer) -> Result<usize, ConfigError> {
        let offset = self.start_offset;
        if offset > source.byte_len() {
            return Err(ConfigError::StartOffsetOutOfBounds {
                offset,
                len: source.byte_len(),
            });
        }
        source
            .char_index(offset)
            .ok_or(ConfigError::StartOffsetNotCharBoundary { offset })
    }
}

#[cfg(test)]
mod tests;
