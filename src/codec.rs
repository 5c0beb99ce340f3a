//! Binary settings file format.
//!
//! ```text
//! u8          format version, must equal FORMAT_VERSION
//! u8          number of fields that follow
//! fields...   in SCHEMA order; bytes as one byte, text as u32 LE length + bytes
//! ```
//!
//! There is no checksum. A file from an older build is a strict prefix of the current schema and
//! loads with the missing fields left at their defaults.

use crate::buttons::{FrontButtons, MappingOutcome};
use crate::error::Error;
use crate::record::{RawValue, Settings};
use crate::schema::{FRONT_BUTTON_MAPPING_END, Field, FieldKind, SCHEMA};
use alloc::vec::Vec;
#[cfg(feature = "defmt")]
use defmt::{trace, warn};

pub const FORMAT_VERSION: u8 = 1;

/// Number of fields this build writes. Grows by one for every field appended to [`SCHEMA`].
pub const FIELD_COUNT: u8 = SCHEMA.len() as u8;

const TEXT_LENGTH_SIZE: usize = core::mem::size_of::<u32>();

/// Result of a successful decode, including what had to be repaired along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub settings: Settings,
    /// Field count as stored in the file.
    pub stored_field_count: u8,
    /// Fields actually decoded, at most [`FIELD_COUNT`].
    pub fields_read: usize,
    /// Enumerated fields whose stored value was out of range and kept the default.
    pub rejected: Vec<Field>,
    /// The first field whose data ended early. It and all following fields kept the default.
    pub truncated: Option<Field>,
    pub mapping: MappingOutcome,
}

/// Encodes all fields known to this build.
pub fn encode(settings: &Settings) -> Vec<u8> {
    encode_prefix(settings, SCHEMA.len())
}

/// Encodes only the first `count` fields, producing the file an older build with a shorter
/// schema would have written.
pub fn encode_prefix(settings: &Settings, count: usize) -> Vec<u8> {
    let fields = &SCHEMA[..count.min(SCHEMA.len())];
    let mut out = Vec::with_capacity(2 + fields.len());

    out.push(FORMAT_VERSION);
    out.push(fields.len() as u8);
    for &field in fields {
        match settings.raw(field) {
            RawValue::Byte(byte) => out.push(byte),
            RawValue::Text(bytes) => {
                out.extend_from_slice(&(bytes.len() as u32).to_le_bytes());
                out.extend_from_slice(bytes);
            }
        }
    }

    out
}

/// Decodes a settings file written by this or an older build.
///
/// Only an empty file or a version mismatch fail. Everything else degrades to defaults on a
/// per field basis, see [`Decoded`].
pub fn decode(data: &[u8]) -> Result<Decoded, Error> {
    let mut reader = Reader::new(data);

    let version = reader.byte().ok_or(Error::MissingHeader)?;
    if version != FORMAT_VERSION {
        #[cfg(feature = "defmt")]
        warn!("settings: unsupported version {}", version);
        #[cfg(feature = "debug-logs")]
        println!("codec: decode: unsupported version {version}");
        return Err(Error::UnsupportedVersion(version));
    }
    let mut truncated = None;
    let stored_field_count = match reader.byte() {
        Some(count) => count,
        None => {
            // version byte only, loads like a file without fields
            #[cfg(feature = "defmt")]
            warn!("settings: data ends inside field count");
            #[cfg(feature = "debug-logs")]
            println!("codec: decode: data ends inside field count");
            truncated = Some(SCHEMA[0]);
            0
        }
    };

    #[cfg(feature = "debug-logs")]
    {
        if stored_field_count > FIELD_COUNT {
            println!(
                "codec: decode: file has {stored_field_count} fields, ignoring {} unknown",
                stored_field_count - FIELD_COUNT
            );
        }
    }

    let mut settings = Settings::default();
    let mut rejected = Vec::new();
    let mut fields_read = 0;
    let mut mapping_read = false;

    for &field in SCHEMA.iter().take(stored_field_count as usize) {
        let value = match field.kind() {
            FieldKind::Enumerated { .. } | FieldKind::Byte => reader.byte().map(RawValue::Byte),
            FieldKind::Text { .. } => reader.text().map(RawValue::Text),
        };
        let Some(value) = value else {
            #[cfg(feature = "defmt")]
            warn!("settings: data ends inside field {}", field);
            #[cfg(feature = "debug-logs")]
            println!("codec: decode: data ends inside {field:?}");
            truncated = Some(field);
            break;
        };

        if !settings.apply(field, value) {
            #[cfg(feature = "defmt")]
            trace!("settings: rejected {} = {}", field, value_byte(value));
            #[cfg(feature = "debug-logs")]
            println!("codec: decode: rejected {field:?} = {value:?}");
            rejected.push(field);
        }
        fields_read += 1;

        if field == FRONT_BUTTON_MAPPING_END {
            mapping_read = true;
        }
    }

    let mapping = if mapping_read {
        if settings.front_buttons.enforce_distinct() {
            MappingOutcome::Reset
        } else {
            MappingOutcome::Kept
        }
    } else {
        settings.front_buttons = FrontButtons::from_legacy(settings.front_button_layout);
        MappingOutcome::Migrated
    };

    #[cfg(feature = "defmt")]
    trace!(
        "settings: decoded {} of {} fields, mapping {}",
        fields_read, stored_field_count, mapping
    );
    #[cfg(feature = "debug-logs")]
    println!("codec: decode: {fields_read}/{stored_field_count} fields, mapping {mapping:?}");

    Ok(Decoded {
        settings,
        stored_field_count,
        fields_read,
        rejected,
        truncated,
        mapping,
    })
}

#[cfg(feature = "defmt")]
fn value_byte(value: RawValue<'_>) -> u8 {
    match value {
        RawValue::Byte(byte) => byte,
        RawValue::Text(_) => 0,
    }
}

struct Reader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    fn take(&mut self, len: usize) -> Option<&'a [u8]> {
        let end = self.offset.checked_add(len)?;
        let bytes = self.data.get(self.offset..end)?;
        self.offset = end;
        Some(bytes)
    }

    fn byte(&mut self) -> Option<u8> {
        self.take(1).map(|b| b[0])
    }

    fn text(&mut self) -> Option<&'a [u8]> {
        let len = self.take(TEXT_LENGTH_SIZE)?;
        let len = u32::from_le_bytes([len[0], len[1], len[2], len[3]]) as usize;
        self.take(len)
    }
}
