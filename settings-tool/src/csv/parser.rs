use crosspoint_settings::{Field, FieldKind, RawValue, Settings};

use crate::csv::{type_name, HEX_TEXT};
use crate::error::Error;
use crate::SettingsDocument;

#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    key: String,
    #[serde(rename = "type")]
    value_type: String,
    value: String,
}

/// Parse settings CSV content into a [`SettingsDocument`].
///
/// Fields without a row keep their default. Unlike loading a settings file nothing is repaired:
/// every value must be valid for its field.
pub(crate) fn parse_csv(content: &str) -> Result<SettingsDocument, Error> {
    let mut settings = Settings::default();
    let mut seen = Vec::new();
    let mut reader = csv::Reader::from_reader(content.as_bytes());

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        let field = Field::from_name(&row.key).ok_or_else(|| Error::InvalidKey(row.key.clone()))?;

        if seen.contains(&field) {
            return Err(Error::InvalidValue(format!("duplicate key {}", row.key)));
        }
        seen.push(field);

        parse_row(&mut settings, field, &row)?;
    }

    if !settings.front_buttons.is_distinct() {
        return Err(Error::InvalidValue(
            "front buttons must be mapped to distinct hardware buttons".to_string(),
        ));
    }

    Ok(SettingsDocument {
        settings,
        diagnostics: None,
    })
}

fn parse_row(settings: &mut Settings, field: Field, row: &CsvRow) -> Result<(), Error> {
    let expected = type_name(field);
    let hex_text = matches!(field.kind(), FieldKind::Text { .. }) && row.value_type == HEX_TEXT;
    if row.value_type != expected && !hex_text {
        return Err(Error::InvalidType {
            key: row.key.clone(),
            expected,
            found: row.value_type.clone(),
        });
    }

    match field.kind() {
        FieldKind::Enumerated { bound } => {
            let value = parse_byte(row)?;
            if value >= bound {
                return Err(Error::InvalidValue(format!(
                    "{}: {} is out of range (0..{})",
                    row.key, value, bound
                )));
            }
            settings.apply(field, RawValue::Byte(value));
        }
        FieldKind::Byte => {
            let value = parse_byte(row)?;
            settings.apply(field, RawValue::Byte(value));
        }
        FieldKind::Text { capacity } => {
            let bytes = if hex_text {
                hex::decode(row.value.trim())?
            } else {
                row.value.as_bytes().to_vec()
            };
            if bytes.contains(&0) {
                return Err(Error::InvalidValue(format!("{}: text contains NUL", row.key)));
            }
            if bytes.len() >= capacity {
                return Err(Error::InvalidValue(format!(
                    "{}: text is longer than {} bytes",
                    row.key,
                    capacity - 1
                )));
            }
            settings.apply(field, RawValue::Text(&bytes));
        }
    }

    Ok(())
}

fn parse_byte(row: &CsvRow) -> Result<u8, Error> {
    row.value
        .trim()
        .parse::<u8>()
        .map_err(|e| Error::InvalidValue(format!("{}: invalid u8 value: {}", row.key, e)))
}
