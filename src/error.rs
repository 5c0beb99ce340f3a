use thiserror::Error;

/// Errors reported by the persistence layer. Any error means the caller keeps running on the
/// compiled-in defaults; settings are never critical to boot. Soft problems inside a readable
/// file (short field count, out of range values, conflicting button mapping) are not errors, see
/// [`crate::codec::Decoded`].
#[derive(Error, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum Error {
    /// No settings file has been written yet.
    #[error("settings file not found")]
    NotFound,

    /// The storage layer refused to open the file, e.g. the directory could not be created or
    /// the media is full.
    #[error("failed to open settings file")]
    OpenFailed,

    /// The file was written with a format version this build does not understand.
    #[error("unsupported settings version: {0}")]
    UnsupportedVersion(u8),

    /// The file is empty, not even the version byte is present.
    #[error("missing settings header")]
    MissingHeader,

    /// The internal error value is returned from the provided `NorFlash`
    #[error("internal flash error")]
    FlashError,

    /// The encoded settings do not fit into the storage region.
    #[error("settings file too large")]
    FileTooLarge,

    /// A write on an open handle failed or the handle is not writable.
    #[error("write failed")]
    WriteFailed,

    /// The region offset has to be aligned to the erase size of the flash
    #[error("invalid region offset")]
    InvalidRegionOffset,

    /// The region size has to be a non-zero multiple of the erase size of the flash
    #[error("invalid region size")]
    InvalidRegionSize,
}
