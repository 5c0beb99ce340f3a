use std::path::Path;

use crosspoint_settings::{RawValue, SCHEMA};
use csv::Writer;

use crate::csv::{type_name, HEX_TEXT};
use crate::error::Error;
use crate::SettingsDocument;

/// Serialize the settings to a CSV file at the given `output_path`.
///
/// One row per field in file order. Enumerated fields carry their variant name in the `label`
/// column, it is ignored when the CSV is read back. Text that is not valid UTF-8 is written
/// with type `hex`.
pub(crate) fn write_csv<P: AsRef<Path>>(
    document: &SettingsDocument,
    output_path: P,
) -> Result<(), Error> {
    let mut wtr = Writer::from_path(output_path)?;
    write_records(&mut wtr, document)
}

/// Serialize the settings to CSV and return the content as a `String`.
pub(crate) fn write_csv_content(document: &SettingsDocument) -> Result<String, Error> {
    let mut wtr = Writer::from_writer(Vec::new());
    write_records(&mut wtr, document)?;
    let bytes = wtr
        .into_inner()
        .map_err(|e| Error::IoError(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| Error::InvalidValue(format!("CSV output is not valid UTF-8: {}", e)))
}

fn write_records<W: std::io::Write>(
    wtr: &mut Writer<W>,
    document: &SettingsDocument,
) -> Result<(), Error> {
    wtr.write_record(["key", "type", "value", "label"])?;

    for field in SCHEMA {
        let (value_type, value, label) = match document.settings.raw(field) {
            RawValue::Byte(byte) => (
                type_name(field),
                byte.to_string(),
                field.label(byte).unwrap_or_default(),
            ),
            RawValue::Text(bytes) => match std::str::from_utf8(bytes) {
                Ok(text) => (type_name(field), text.to_string(), ""),
                // text read from a device is not guaranteed to be UTF-8
                Err(_) => (HEX_TEXT, hex::encode(bytes), ""),
            },
        };
        wtr.write_record([field.name(), value_type, &value, label])?;
    }

    wtr.flush()?;
    Ok(())
}
