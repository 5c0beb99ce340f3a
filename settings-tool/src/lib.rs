//! Host side conversion of crosspoint settings files to and from CSV, for inspecting a device's
//! settings and for provisioning them.

pub mod error;

mod csv;

use std::fs;
use std::io::Write;
use std::path::Path;

pub use crosspoint_settings::{Field, MappingOutcome, Settings};
pub use error::Error;

/// What loading a settings file had to repair.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostics {
    /// Field count as stored in the file.
    pub stored_field_count: u8,
    /// Fields actually decoded.
    pub fields_read: usize,
    /// Enumerated fields whose stored value was out of range.
    pub rejected: Vec<Field>,
    /// The first field whose data ended early.
    pub truncated: Option<Field>,
    pub mapping: MappingOutcome,
}

impl Diagnostics {
    /// Whether the file loaded without any repair.
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
            && self.truncated.is_none()
            && self.mapping == MappingOutcome::Kept
            && self.fields_read == usize::from(self.stored_field_count)
    }
}

/// A settings record together with how it was loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsDocument {
    pub settings: Settings,
    /// Present if the document was parsed from a settings file.
    pub diagnostics: Option<Diagnostics>,
}

impl SettingsDocument {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            diagnostics: None,
        }
    }

    /// Decode a settings file from an in-memory byte slice.
    ///
    /// Loads exactly like the device does: out of range values keep their default and conflicting
    /// front button mappings are repaired. What was repaired is kept in
    /// [`SettingsDocument::diagnostics`].
    pub fn parse(data: &[u8]) -> Result<Self, Error> {
        let decoded = crosspoint_settings::decode(data)?;
        Ok(Self {
            diagnostics: Some(Diagnostics {
                stored_field_count: decoded.stored_field_count,
                fields_read: decoded.fields_read,
                rejected: decoded.rejected,
                truncated: decoded.truncated,
                mapping: decoded.mapping,
            }),
            settings: decoded.settings,
        })
    }

    /// Decode the settings file at the given `path`.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        Self::parse(&fs::read(path)?)
    }

    /// Parse settings CSV content from a string.
    ///
    /// Fields without a row keep their default. Unknown keys, values out of range for their field,
    /// text longer than the field capacity and front button mappings that are not distinct are
    /// errors.
    pub fn from_csv(content: &str) -> Result<Self, Error> {
        csv::parser::parse_csv(content)
    }

    /// Parse the settings CSV file at the given `path`.
    pub fn from_csv_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let content = fs::read_to_string(path)?;
        csv::parser::parse_csv(&content)
    }

    /// Serialize the settings to CSV and return the content as a `String`.
    ///
    /// The header is `key,type,value,label` followed by one row per field in file order.
    pub fn to_csv(&self) -> Result<String, Error> {
        csv::writer::write_csv_content(self)
    }

    /// Serialize the settings to a CSV file at the given `path`.
    pub fn to_csv_file<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        csv::writer::write_csv(self, path)
    }

    /// Encode the settings file in memory.
    pub fn generate(&self) -> Vec<u8> {
        crosspoint_settings::encode(&self.settings)
    }

    /// Encode the settings file and write it to `path`.
    pub fn generate_file<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let data = self.generate();
        fs::File::create(path)?.write_all(&data)?;
        Ok(())
    }
}
