use crate::buttons::FrontButtons;
use crate::options::{
    ButtonModMode, FontFamily, FontSize, FrontButtonLayout, HideBatteryPercentage, LineSpacing,
    Orientation, ParagraphAlignment, RefreshFrequency, ShortPowerButton, SideButtonLayout,
    SleepScreen, SleepScreenCoverFilter, SleepScreenCoverMode, SleepTimeout, StatusBar,
    StoredEnum, UiTheme,
};
use crate::schema::Field;
use crate::text::BoundedText;

pub const OPDS_URL_CAPACITY: usize = 128;
pub const OPDS_CREDENTIAL_CAPACITY: usize = 64;
/// `AA:BB:CC:DD:EE:FF` plus terminator
pub const BLE_MAC_CAPACITY: usize = 18;

pub type OpdsUrl = BoundedText<OPDS_URL_CAPACITY>;
pub type OpdsCredential = BoundedText<OPDS_CREDENTIAL_CAPACITY>;
pub type BleMac = BoundedText<BLE_MAC_CAPACITY>;

/// All user preferences. Every field has a compiled-in default and holds a legal value at all
/// times; loading a file only overwrites the fields it contains.
///
/// Derived values (timeouts, font ids, ...) are not stored, see the accessors in
/// [`crate::derived`].
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub sleep_screen: SleepScreen,
    pub sleep_screen_cover_mode: SleepScreenCoverMode,
    pub sleep_screen_cover_filter: SleepScreenCoverFilter,
    pub status_bar: StatusBar,
    pub extra_paragraph_spacing: u8,
    pub text_anti_aliasing: u8,
    pub short_power_button: ShortPowerButton,
    pub orientation: Orientation,
    /// Only read to migrate files without [`Settings::front_buttons`].
    pub front_button_layout: FrontButtonLayout,
    pub side_button_layout: SideButtonLayout,
    pub front_buttons: FrontButtons,
    pub font_family: FontFamily,
    pub font_size: FontSize,
    pub line_spacing: LineSpacing,
    pub paragraph_alignment: ParagraphAlignment,
    pub sleep_timeout: SleepTimeout,
    pub refresh_frequency: RefreshFrequency,
    pub hyphenation_enabled: u8,
    pub screen_margin: u8,
    pub opds_server_url: OpdsUrl,
    pub opds_username: OpdsCredential,
    pub opds_password: OpdsCredential,
    pub ble_page_turner_mac: BleMac,
    pub hide_battery_percentage: HideBatteryPercentage,
    pub long_press_chapter_skip: u8,
    pub ui_theme: u8,
    /// Sunlight fading compensation
    pub fading_fix: u8,
    /// Use the book's embedded CSS when rendering
    pub embedded_style: u8,
    pub button_mod_mode: ButtonModMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sleep_screen: SleepScreen::Dark,
            sleep_screen_cover_mode: SleepScreenCoverMode::Fit,
            sleep_screen_cover_filter: SleepScreenCoverFilter::NoFilter,
            status_bar: StatusBar::Full,
            extra_paragraph_spacing: 1,
            text_anti_aliasing: 1,
            short_power_button: ShortPowerButton::Ignore,
            orientation: Orientation::Portrait,
            front_button_layout: FrontButtonLayout::BackConfirmLeftRight,
            side_button_layout: SideButtonLayout::PrevNext,
            front_buttons: FrontButtons::CANONICAL,
            font_family: FontFamily::Bookerly,
            font_size: FontSize::Medium,
            line_spacing: LineSpacing::Normal,
            paragraph_alignment: ParagraphAlignment::Justified,
            sleep_timeout: SleepTimeout::TenMinutes,
            refresh_frequency: RefreshFrequency::Every15,
            hyphenation_enabled: 0,
            screen_margin: 5,
            opds_server_url: BoundedText::new(),
            opds_username: BoundedText::new(),
            opds_password: BoundedText::new(),
            ble_page_turner_mac: BoundedText::new(),
            hide_battery_percentage: HideBatteryPercentage::Never,
            long_press_chapter_skip: 1,
            ui_theme: UiTheme::Lyra as u8,
            fading_fix: 0,
            embedded_style: 1,
            button_mod_mode: ButtonModMode::Full,
        }
    }
}

/// The stored representation of a single field.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum RawValue<'a> {
    Byte(u8),
    Text(&'a [u8]),
}

impl Settings {
    /// Current value of `field` as it is written to a file.
    pub fn raw(&self, field: Field) -> RawValue<'_> {
        use RawValue::{Byte, Text};

        match field {
            Field::SleepScreen => Byte(self.sleep_screen.to_byte()),
            Field::ExtraParagraphSpacing => Byte(self.extra_paragraph_spacing),
            Field::ShortPowerButton => Byte(self.short_power_button.to_byte()),
            Field::StatusBar => Byte(self.status_bar.to_byte()),
            Field::Orientation => Byte(self.orientation.to_byte()),
            Field::FrontButtonLayout => Byte(self.front_button_layout.to_byte()),
            Field::SideButtonLayout => Byte(self.side_button_layout.to_byte()),
            Field::FontFamily => Byte(self.font_family.to_byte()),
            Field::FontSize => Byte(self.font_size.to_byte()),
            Field::LineSpacing => Byte(self.line_spacing.to_byte()),
            Field::ParagraphAlignment => Byte(self.paragraph_alignment.to_byte()),
            Field::SleepTimeout => Byte(self.sleep_timeout.to_byte()),
            Field::RefreshFrequency => Byte(self.refresh_frequency.to_byte()),
            Field::ScreenMargin => Byte(self.screen_margin),
            Field::SleepScreenCoverMode => Byte(self.sleep_screen_cover_mode.to_byte()),
            Field::OpdsServerUrl => Text(self.opds_server_url.as_bytes()),
            Field::TextAntiAliasing => Byte(self.text_anti_aliasing),
            Field::HideBatteryPercentage => Byte(self.hide_battery_percentage.to_byte()),
            Field::LongPressChapterSkip => Byte(self.long_press_chapter_skip),
            Field::HyphenationEnabled => Byte(self.hyphenation_enabled),
            Field::OpdsUsername => Text(self.opds_username.as_bytes()),
            Field::OpdsPassword => Text(self.opds_password.as_bytes()),
            Field::SleepScreenCoverFilter => Byte(self.sleep_screen_cover_filter.to_byte()),
            Field::UiTheme => Byte(self.ui_theme),
            Field::FrontButtonBack => Byte(self.front_buttons.back.to_byte()),
            Field::FrontButtonConfirm => Byte(self.front_buttons.confirm.to_byte()),
            Field::FrontButtonLeft => Byte(self.front_buttons.left.to_byte()),
            Field::FrontButtonRight => Byte(self.front_buttons.right.to_byte()),
            Field::FadingFix => Byte(self.fading_fix),
            Field::EmbeddedStyle => Byte(self.embedded_style),
            Field::ButtonModMode => Byte(self.button_mod_mode.to_byte()),
            Field::BlePageTurnerMac => Text(self.ble_page_turner_mac.as_bytes()),
        }
    }

    /// Stores a raw value into `field`.
    ///
    /// Enumerated fields keep their current value if `value` is out of range, text is truncated
    /// to the field capacity. Returns `false` if the value was rejected, including a value of
    /// the wrong kind for the field.
    pub fn apply(&mut self, field: Field, value: RawValue<'_>) -> bool {
        match value {
            RawValue::Byte(byte) => self.apply_byte(field, byte),
            RawValue::Text(bytes) => self.apply_text(field, bytes),
        }
    }

    fn apply_byte(&mut self, field: Field, byte: u8) -> bool {
        match field {
            Field::SleepScreen => validated(&mut self.sleep_screen, byte),
            Field::ExtraParagraphSpacing => free(&mut self.extra_paragraph_spacing, byte),
            Field::ShortPowerButton => validated(&mut self.short_power_button, byte),
            Field::StatusBar => validated(&mut self.status_bar, byte),
            Field::Orientation => validated(&mut self.orientation, byte),
            Field::FrontButtonLayout => validated(&mut self.front_button_layout, byte),
            Field::SideButtonLayout => validated(&mut self.side_button_layout, byte),
            Field::FontFamily => validated(&mut self.font_family, byte),
            Field::FontSize => validated(&mut self.font_size, byte),
            Field::LineSpacing => validated(&mut self.line_spacing, byte),
            Field::ParagraphAlignment => validated(&mut self.paragraph_alignment, byte),
            Field::SleepTimeout => validated(&mut self.sleep_timeout, byte),
            Field::RefreshFrequency => validated(&mut self.refresh_frequency, byte),
            Field::ScreenMargin => free(&mut self.screen_margin, byte),
            Field::SleepScreenCoverMode => validated(&mut self.sleep_screen_cover_mode, byte),
            Field::TextAntiAliasing => free(&mut self.text_anti_aliasing, byte),
            Field::HideBatteryPercentage => validated(&mut self.hide_battery_percentage, byte),
            Field::LongPressChapterSkip => free(&mut self.long_press_chapter_skip, byte),
            Field::HyphenationEnabled => free(&mut self.hyphenation_enabled, byte),
            Field::SleepScreenCoverFilter => validated(&mut self.sleep_screen_cover_filter, byte),
            Field::UiTheme => free(&mut self.ui_theme, byte),
            Field::FrontButtonBack => validated(&mut self.front_buttons.back, byte),
            Field::FrontButtonConfirm => validated(&mut self.front_buttons.confirm, byte),
            Field::FrontButtonLeft => validated(&mut self.front_buttons.left, byte),
            Field::FrontButtonRight => validated(&mut self.front_buttons.right, byte),
            Field::FadingFix => free(&mut self.fading_fix, byte),
            Field::EmbeddedStyle => free(&mut self.embedded_style, byte),
            Field::ButtonModMode => validated(&mut self.button_mod_mode, byte),
            Field::OpdsServerUrl
            | Field::OpdsUsername
            | Field::OpdsPassword
            | Field::BlePageTurnerMac => false,
        }
    }

    fn apply_text(&mut self, field: Field, bytes: &[u8]) -> bool {
        match field {
            Field::OpdsServerUrl => self.opds_server_url = BoundedText::from_bytes(bytes),
            Field::OpdsUsername => self.opds_username = BoundedText::from_bytes(bytes),
            Field::OpdsPassword => self.opds_password = BoundedText::from_bytes(bytes),
            Field::BlePageTurnerMac => self.ble_page_turner_mac = BoundedText::from_bytes(bytes),
            _ => return false,
        }
        true
    }
}

fn validated<E: StoredEnum>(slot: &mut E, byte: u8) -> bool {
    match E::from_byte(byte) {
        Some(value) => {
            *slot = value;
            true
        }
        None => false,
    }
}

fn free(slot: &mut u8, byte: u8) -> bool {
    *slot = byte;
    true
}
