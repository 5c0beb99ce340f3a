#![doc = include_str ! ("../README.md")]
#![cfg_attr(not(target_arch = "x86_64"), no_std)]

pub mod buttons;
pub mod codec;
pub mod derived;
pub mod error;
pub mod options;
pub mod platform;
mod record;
pub mod schema;
mod store;
mod text;

extern crate alloc;

pub use buttons::{FrontButtons, MappingOutcome};
pub use codec::{Decoded, FIELD_COUNT, FORMAT_VERSION, decode, encode};
pub use derived::FontId;
pub use error::Error;
pub use record::{
    BLE_MAC_CAPACITY, BleMac, OPDS_CREDENTIAL_CAPACITY, OPDS_URL_CAPACITY, OpdsCredential,
    OpdsUrl, RawValue, Settings,
};
pub use schema::{Field, FieldKind, SCHEMA};
pub use store::{SETTINGS_DIR, SETTINGS_FILE, STORAGE_TAG, SettingsStore};
pub use text::BoundedText;
