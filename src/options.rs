//! Enumerated preferences. Every option is stored as a single byte; the number of variants is the
//! bound a stored byte is validated against on load. Variants may only ever be appended.

use strum::EnumCount;

/// An option that is persisted as one byte with a build-time upper bound.
pub trait StoredEnum: Copy + Sized {
    /// Raw values must be strictly less than this.
    const BOUND: u8;

    fn from_byte(value: u8) -> Option<Self>;

    fn to_byte(self) -> u8;

    /// Variant name, e.g. `"TenMinutes"`.
    fn label(self) -> &'static str;
}

macro_rules! stored_enum {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl StoredEnum for $ty {
                const BOUND: u8 = {
                    assert!(<$ty as EnumCount>::COUNT <= u8::MAX as usize);
                    <$ty as EnumCount>::COUNT as u8
                };

                fn from_byte(value: u8) -> Option<Self> {
                    Self::from_repr(value)
                }

                fn to_byte(self) -> u8 {
                    self as u8
                }

                fn label(self) -> &'static str {
                    self.into()
                }
            }
        )+
    };
}

#[derive(
    strum::FromRepr,
    strum::EnumCount,
    strum::EnumIter,
    strum::Display,
    strum::IntoStaticStr,
    Debug,
    Default,
    PartialEq,
    Eq,
    Copy,
    Clone,
)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum SleepScreen {
    #[default]
    Dark = 0,
    Light = 1,
    Custom = 2,
    Cover = 3,
    Blank = 4,
    CoverCustom = 5,
}

#[derive(
    strum::FromRepr,
    strum::EnumCount,
    strum::EnumIter,
    strum::Display,
    strum::IntoStaticStr,
    Debug,
    Default,
    PartialEq,
    Eq,
    Copy,
    Clone,
)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum SleepScreenCoverMode {
    #[default]
    Fit = 0,
    Crop = 1,
}

#[derive(
    strum::FromRepr,
    strum::EnumCount,
    strum::EnumIter,
    strum::Display,
    strum::IntoStaticStr,
    Debug,
    Default,
    PartialEq,
    Eq,
    Copy,
    Clone,
)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum SleepScreenCoverFilter {
    #[default]
    NoFilter = 0,
    BlackAndWhite = 1,
    InvertedBlackAndWhite = 2,
}

#[derive(
    strum::FromRepr,
    strum::EnumCount,
    strum::EnumIter,
    strum::Display,
    strum::IntoStaticStr,
    Debug,
    Default,
    PartialEq,
    Eq,
    Copy,
    Clone,
)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum StatusBar {
    Hidden = 0,
    NoProgress = 1,
    #[default]
    Full = 2,
    BookProgressBar = 3,
    OnlyBookProgressBar = 4,
    ChapterProgressBar = 5,
}

#[derive(
    strum::FromRepr,
    strum::EnumCount,
    strum::EnumIter,
    strum::Display,
    strum::IntoStaticStr,
    Debug,
    Default,
    PartialEq,
    Eq,
    Copy,
    Clone,
)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Orientation {
    // 480x800 logical coordinates
    #[default]
    Portrait = 0,
    // 800x480, rotated 180° against the panel
    LandscapeCw = 1,
    Inverted = 2,
    // 800x480, native panel orientation
    LandscapeCcw = 3,
}

/// Front button layout from before per-button remapping existed. Still written so older builds
/// keep working, but only read for migration.
#[derive(
    strum::FromRepr,
    strum::EnumCount,
    strum::EnumIter,
    strum::Display,
    strum::IntoStaticStr,
    Debug,
    Default,
    PartialEq,
    Eq,
    Copy,
    Clone,
)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum FrontButtonLayout {
    #[default]
    BackConfirmLeftRight = 0,
    LeftRightBackConfirm = 1,
    LeftBackConfirmRight = 2,
    BackConfirmRightLeft = 3,
}

/// Physical front buttons, numbered in hardware order.
#[derive(
    strum::FromRepr,
    strum::EnumCount,
    strum::EnumIter,
    strum::Display,
    strum::IntoStaticStr,
    Debug,
    PartialEq,
    Eq,
    Copy,
    Clone,
)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum FrontButton {
    Back = 0,
    Confirm = 1,
    Left = 2,
    Right = 3,
}

#[derive(
    strum::FromRepr,
    strum::EnumCount,
    strum::EnumIter,
    strum::Display,
    strum::IntoStaticStr,
    Debug,
    Default,
    PartialEq,
    Eq,
    Copy,
    Clone,
)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum SideButtonLayout {
    #[default]
    PrevNext = 0,
    NextPrev = 1,
}

#[derive(
    strum::FromRepr,
    strum::EnumCount,
    strum::EnumIter,
    strum::Display,
    strum::IntoStaticStr,
    Debug,
    Default,
    PartialEq,
    Eq,
    Copy,
    Clone,
)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ButtonModMode {
    Off = 0,
    Simple = 1,
    #[default]
    Full = 2,
}

#[derive(
    strum::FromRepr,
    strum::EnumCount,
    strum::EnumIter,
    strum::Display,
    strum::IntoStaticStr,
    Debug,
    Default,
    PartialEq,
    Eq,
    Copy,
    Clone,
)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum FontFamily {
    #[default]
    Bookerly = 0,
    NotoSans = 1,
    OpenDyslexic = 2,
}

#[derive(
    strum::FromRepr,
    strum::EnumCount,
    strum::EnumIter,
    strum::Display,
    strum::IntoStaticStr,
    Debug,
    Default,
    PartialEq,
    Eq,
    Copy,
    Clone,
)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum FontSize {
    Small = 0,
    #[default]
    Medium = 1,
    Large = 2,
    ExtraLarge = 3,
}

#[derive(
    strum::FromRepr,
    strum::EnumCount,
    strum::EnumIter,
    strum::Display,
    strum::IntoStaticStr,
    Debug,
    Default,
    PartialEq,
    Eq,
    Copy,
    Clone,
)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum LineSpacing {
    Tight = 0,
    #[default]
    Normal = 1,
    Wide = 2,
}

#[derive(
    strum::FromRepr,
    strum::EnumCount,
    strum::EnumIter,
    strum::Display,
    strum::IntoStaticStr,
    Debug,
    Default,
    PartialEq,
    Eq,
    Copy,
    Clone,
)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ParagraphAlignment {
    #[default]
    Justified = 0,
    Left = 1,
    Center = 2,
    Right = 3,
    BookStyle = 4,
}

/// Auto sleep timeout.
#[derive(
    strum::FromRepr,
    strum::EnumCount,
    strum::EnumIter,
    strum::Display,
    strum::IntoStaticStr,
    Debug,
    Default,
    PartialEq,
    Eq,
    Copy,
    Clone,
)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum SleepTimeout {
    OneMinute = 0,
    FiveMinutes = 1,
    #[default]
    TenMinutes = 2,
    FifteenMinutes = 3,
    ThirtyMinutes = 4,
}

/// Number of page turns between two full e-ink refreshes.
#[derive(
    strum::FromRepr,
    strum::EnumCount,
    strum::EnumIter,
    strum::Display,
    strum::IntoStaticStr,
    Debug,
    Default,
    PartialEq,
    Eq,
    Copy,
    Clone,
)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum RefreshFrequency {
    Every1 = 0,
    Every5 = 1,
    Every10 = 2,
    #[default]
    Every15 = 3,
    Every30 = 4,
}

/// What a short press of the power button does.
#[derive(
    strum::FromRepr,
    strum::EnumCount,
    strum::EnumIter,
    strum::Display,
    strum::IntoStaticStr,
    Debug,
    Default,
    PartialEq,
    Eq,
    Copy,
    Clone,
)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ShortPowerButton {
    #[default]
    Ignore = 0,
    Sleep = 1,
    PageTurn = 2,
}

#[derive(
    strum::FromRepr,
    strum::EnumCount,
    strum::EnumIter,
    strum::Display,
    strum::IntoStaticStr,
    Debug,
    Default,
    PartialEq,
    Eq,
    Copy,
    Clone,
)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum HideBatteryPercentage {
    #[default]
    Never = 0,
    InReader = 1,
    Always = 2,
}

/// Not validated on load, the byte is stored as is. See [`crate::Settings::theme`].
#[derive(strum::FromRepr, strum::Display, Debug, Default, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum UiTheme {
    Classic = 0,
    #[default]
    Lyra = 1,
}

stored_enum!(
    SleepScreen,
    SleepScreenCoverMode,
    SleepScreenCoverFilter,
    StatusBar,
    Orientation,
    FrontButtonLayout,
    FrontButton,
    SideButtonLayout,
    ButtonModMode,
    FontFamily,
    FontSize,
    LineSpacing,
    ParagraphAlignment,
    SleepTimeout,
    RefreshFrequency,
    ShortPowerButton,
    HideBatteryPercentage,
);
