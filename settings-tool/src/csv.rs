pub(crate) mod parser;
pub(crate) mod writer;

use crosspoint_settings::{Field, FieldKind};

/// `type` of text fields whose content is not valid UTF-8, the value is hex encoded.
pub(crate) const HEX_TEXT: &str = "hex";

/// Value of the `type` column for `field`.
pub(crate) fn type_name(field: Field) -> &'static str {
    match field.kind() {
        FieldKind::Enumerated { .. } => "enum",
        FieldKind::Byte => "u8",
        FieldKind::Text { .. } => "string",
    }
}
