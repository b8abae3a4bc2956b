//! Error types for KBI encoding/decoding and legacy MDO/KEC reading

/// Errors that can occur when reading or writing Karel world files
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KbiError {
    /// Invalid magic bytes (expected "KW")
    #[error("Invalid magic bytes (expected 'KW')")]
    InvalidMagic,

    /// Version byte is neither 0 (1.0) nor 1 (1.1)
    #[error("Unsupported KBI version: {0}")]
    UnsupportedVersion(u8),

    /// A read ran past the end of the input
    #[error("Unexpected end of file")]
    UnexpectedEof,

    /// Argument to a single-character write is not exactly one byte-sized character
    #[error("Expected a single one-byte character, got {0:?}")]
    InvalidChar(String),

    /// Word width code outside {0, 1, 2}
    #[error("Unsupported word width code: {0}")]
    UnsupportedWordWidth(u8),

    /// Legacy document shorter than its fixed header
    #[error("{document} file too small: {words} words (need at least {required})")]
    LegacyTooSmall {
        document: &'static str,
        words: usize,
        required: usize,
    },

    /// Legacy MDO document without the "KAREL OMI." signature
    #[error("Invalid MDO magic number")]
    LegacyInvalidMagic,
}
