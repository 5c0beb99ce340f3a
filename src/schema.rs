//! The persisted field order.
//!
//! A settings file contains a prefix of [`SCHEMA`]. New fields are appended at the end and the
//! list is never reordered or shortened, the position of a field is part of the file format.

use crate::options::{
    ButtonModMode, FontFamily, FontSize, FrontButton, FrontButtonLayout, HideBatteryPercentage,
    LineSpacing, Orientation, ParagraphAlignment, RefreshFrequency, ShortPowerButton,
    SideButtonLayout, SleepScreen, SleepScreenCoverFilter, SleepScreenCoverMode, SleepTimeout,
    StatusBar, StoredEnum,
};
use crate::record::{BLE_MAC_CAPACITY, OPDS_CREDENTIAL_CAPACITY, OPDS_URL_CAPACITY};

#[derive(
    strum::FromRepr,
    strum::EnumCount,
    strum::EnumIter,
    strum::IntoStaticStr,
    Debug,
    PartialEq,
    Eq,
    Copy,
    Clone,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Field {
    SleepScreen = 0,
    ExtraParagraphSpacing = 1,
    ShortPowerButton = 2,
    StatusBar = 3,
    Orientation = 4,
    FrontButtonLayout = 5,
    SideButtonLayout = 6,
    FontFamily = 7,
    FontSize = 8,
    LineSpacing = 9,
    ParagraphAlignment = 10,
    SleepTimeout = 11,
    RefreshFrequency = 12,
    ScreenMargin = 13,
    SleepScreenCoverMode = 14,
    OpdsServerUrl = 15,
    TextAntiAliasing = 16,
    HideBatteryPercentage = 17,
    LongPressChapterSkip = 18,
    HyphenationEnabled = 19,
    OpdsUsername = 20,
    OpdsPassword = 21,
    SleepScreenCoverFilter = 22,
    UiTheme = 23,
    FrontButtonBack = 24,
    FrontButtonConfirm = 25,
    FrontButtonLeft = 26,
    FrontButtonRight = 27,
    FadingFix = 28,
    EmbeddedStyle = 29,
    ButtonModMode = 30,
    BlePageTurnerMac = 31,
}

/// How a field is laid out in the file and validated on load.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FieldKind {
    /// One byte, kept only if strictly less than `bound`.
    Enumerated { bound: u8 },
    /// One byte, stored as is.
    Byte,
    /// Length prefixed bytes, truncated to `capacity - 1` on load.
    Text { capacity: usize },
}

pub const SCHEMA: [Field; 32] = [
    Field::SleepScreen,
    Field::ExtraParagraphSpacing,
    Field::ShortPowerButton,
    Field::StatusBar,
    Field::Orientation,
    Field::FrontButtonLayout,
    Field::SideButtonLayout,
    Field::FontFamily,
    Field::FontSize,
    Field::LineSpacing,
    Field::ParagraphAlignment,
    Field::SleepTimeout,
    Field::RefreshFrequency,
    Field::ScreenMargin,
    Field::SleepScreenCoverMode,
    Field::OpdsServerUrl,
    Field::TextAntiAliasing,
    Field::HideBatteryPercentage,
    Field::LongPressChapterSkip,
    Field::HyphenationEnabled,
    Field::OpdsUsername,
    Field::OpdsPassword,
    Field::SleepScreenCoverFilter,
    Field::UiTheme,
    Field::FrontButtonBack,
    Field::FrontButtonConfirm,
    Field::FrontButtonLeft,
    Field::FrontButtonRight,
    Field::FadingFix,
    Field::EmbeddedStyle,
    Field::ButtonModMode,
    Field::BlePageTurnerMac,
];

// Compile-time assertion that every field appears exactly once, at its own discriminant
const _: () = {
    assert!(SCHEMA.len() == <Field as strum::EnumCount>::COUNT);
    assert!(SCHEMA.len() <= u8::MAX as usize);
    let mut i = 0;
    while i < SCHEMA.len() {
        assert!(SCHEMA[i] as usize == i, "schema order must match field discriminants");
        i += 1;
    }
};

/// The last of the per-button mapping fields. Files that contain it carry an explicit mapping,
/// older files only have [`Field::FrontButtonLayout`].
pub const FRONT_BUTTON_MAPPING_END: Field = Field::FrontButtonRight;

impl Field {
    pub const fn kind(self) -> FieldKind {
        match self {
            Field::SleepScreen => enumerated::<SleepScreen>(),
            Field::ShortPowerButton => enumerated::<ShortPowerButton>(),
            Field::StatusBar => enumerated::<StatusBar>(),
            Field::Orientation => enumerated::<Orientation>(),
            Field::FrontButtonLayout => enumerated::<FrontButtonLayout>(),
            Field::SideButtonLayout => enumerated::<SideButtonLayout>(),
            Field::FontFamily => enumerated::<FontFamily>(),
            Field::FontSize => enumerated::<FontSize>(),
            Field::LineSpacing => enumerated::<LineSpacing>(),
            Field::ParagraphAlignment => enumerated::<ParagraphAlignment>(),
            Field::SleepTimeout => enumerated::<SleepTimeout>(),
            Field::RefreshFrequency => enumerated::<RefreshFrequency>(),
            Field::SleepScreenCoverMode => enumerated::<SleepScreenCoverMode>(),
            Field::HideBatteryPercentage => enumerated::<HideBatteryPercentage>(),
            Field::SleepScreenCoverFilter => enumerated::<SleepScreenCoverFilter>(),
            Field::FrontButtonBack
            | Field::FrontButtonConfirm
            | Field::FrontButtonLeft
            | Field::FrontButtonRight => enumerated::<FrontButton>(),
            Field::ButtonModMode => enumerated::<ButtonModMode>(),

            Field::ExtraParagraphSpacing
            | Field::ScreenMargin
            | Field::TextAntiAliasing
            | Field::LongPressChapterSkip
            | Field::HyphenationEnabled
            | Field::UiTheme
            | Field::FadingFix
            | Field::EmbeddedStyle => FieldKind::Byte,

            Field::OpdsServerUrl => FieldKind::Text {
                capacity: OPDS_URL_CAPACITY,
            },
            Field::OpdsUsername | Field::OpdsPassword => FieldKind::Text {
                capacity: OPDS_CREDENTIAL_CAPACITY,
            },
            Field::BlePageTurnerMac => FieldKind::Text {
                capacity: BLE_MAC_CAPACITY,
            },
        }
    }

    /// Position of the field in the file, counted from the first field after the header.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Stable snake case name, e.g. `"font_family"`.
    pub fn name(self) -> &'static str {
        self.into()
    }

    pub fn from_name(name: &str) -> Option<Self> {
        SCHEMA.iter().copied().find(|field| field.name() == name)
    }

    /// Variant name of `value` for enumerated fields. `None` for other kinds and for values out
    /// of range.
    pub fn label(self, value: u8) -> Option<&'static str> {
        match self {
            Field::SleepScreen => label_of::<SleepScreen>(value),
            Field::ShortPowerButton => label_of::<ShortPowerButton>(value),
            Field::StatusBar => label_of::<StatusBar>(value),
            Field::Orientation => label_of::<Orientation>(value),
            Field::FrontButtonLayout => label_of::<FrontButtonLayout>(value),
            Field::SideButtonLayout => label_of::<SideButtonLayout>(value),
            Field::FontFamily => label_of::<FontFamily>(value),
            Field::FontSize => label_of::<FontSize>(value),
            Field::LineSpacing => label_of::<LineSpacing>(value),
            Field::ParagraphAlignment => label_of::<ParagraphAlignment>(value),
            Field::SleepTimeout => label_of::<SleepTimeout>(value),
            Field::RefreshFrequency => label_of::<RefreshFrequency>(value),
            Field::SleepScreenCoverMode => label_of::<SleepScreenCoverMode>(value),
            Field::HideBatteryPercentage => label_of::<HideBatteryPercentage>(value),
            Field::SleepScreenCoverFilter => label_of::<SleepScreenCoverFilter>(value),
            Field::FrontButtonBack
            | Field::FrontButtonConfirm
            | Field::FrontButtonLeft
            | Field::FrontButtonRight => label_of::<FrontButton>(value),
            Field::ButtonModMode => label_of::<ButtonModMode>(value),
            _ => None,
        }
    }
}

const fn enumerated<E: StoredEnum>() -> FieldKind {
    FieldKind::Enumerated { bound: E::BOUND }
}

fn label_of<E: StoredEnum>(value: u8) -> Option<&'static str> {
    E::from_byte(value).map(E::label)
}
