//! Runtime values computed from stored options. None of these are persisted, so presentation
//! constants can change between builds without touching the file format.

use crate::Settings;
use crate::options::{
    FontFamily, FontSize, LineSpacing, RefreshFrequency, ShortPowerButton, SleepTimeout, UiTheme,
};

/// Reader font resources, one per family and point size.
#[derive(strum::Display, strum::EnumCount, Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FontId {
    Bookerly12,
    Bookerly14,
    Bookerly16,
    Bookerly18,
    NotoSans12,
    NotoSans14,
    NotoSans16,
    NotoSans18,
    OpenDyslexic8,
    OpenDyslexic10,
    OpenDyslexic12,
    OpenDyslexic14,
}

impl FontId {
    pub const fn new(family: FontFamily, size: FontSize) -> Self {
        use FontSize::*;

        match family {
            FontFamily::Bookerly => match size {
                Small => FontId::Bookerly12,
                Medium => FontId::Bookerly14,
                Large => FontId::Bookerly16,
                ExtraLarge => FontId::Bookerly18,
            },
            FontFamily::NotoSans => match size {
                Small => FontId::NotoSans12,
                Medium => FontId::NotoSans14,
                Large => FontId::NotoSans16,
                ExtraLarge => FontId::NotoSans18,
            },
            FontFamily::OpenDyslexic => match size {
                Small => FontId::OpenDyslexic8,
                Medium => FontId::OpenDyslexic10,
                Large => FontId::OpenDyslexic12,
                ExtraLarge => FontId::OpenDyslexic14,
            },
        }
    }

    pub const fn family(self) -> FontFamily {
        match self {
            FontId::Bookerly12 | FontId::Bookerly14 | FontId::Bookerly16 | FontId::Bookerly18 => {
                FontFamily::Bookerly
            }
            FontId::NotoSans12 | FontId::NotoSans14 | FontId::NotoSans16 | FontId::NotoSans18 => {
                FontFamily::NotoSans
            }
            FontId::OpenDyslexic8
            | FontId::OpenDyslexic10
            | FontId::OpenDyslexic12
            | FontId::OpenDyslexic14 => FontFamily::OpenDyslexic,
        }
    }

    pub const fn point_size(self) -> u8 {
        match self {
            FontId::OpenDyslexic8 => 8,
            FontId::OpenDyslexic10 => 10,
            FontId::Bookerly12 | FontId::NotoSans12 | FontId::OpenDyslexic12 => 12,
            FontId::Bookerly14 | FontId::NotoSans14 | FontId::OpenDyslexic14 => 14,
            FontId::Bookerly16 | FontId::NotoSans16 => 16,
            FontId::Bookerly18 | FontId::NotoSans18 => 18,
        }
    }
}

impl Settings {
    pub const fn reader_font_id(&self) -> FontId {
        FontId::new(self.font_family, self.font_size)
    }

    /// Line height multiplier for the reader font.
    pub const fn line_compression(&self) -> f32 {
        match self.font_family {
            FontFamily::Bookerly => match self.line_spacing {
                LineSpacing::Tight => 0.95,
                LineSpacing::Normal => 1.0,
                LineSpacing::Wide => 1.1,
            },
            FontFamily::NotoSans | FontFamily::OpenDyslexic => match self.line_spacing {
                LineSpacing::Tight => 0.90,
                LineSpacing::Normal => 0.95,
                LineSpacing::Wide => 1.0,
            },
        }
    }

    pub const fn sleep_timeout_ms(&self) -> u32 {
        const MINUTE_MS: u32 = 60 * 1000;

        match self.sleep_timeout {
            SleepTimeout::OneMinute => MINUTE_MS,
            SleepTimeout::FiveMinutes => 5 * MINUTE_MS,
            SleepTimeout::TenMinutes => 10 * MINUTE_MS,
            SleepTimeout::FifteenMinutes => 15 * MINUTE_MS,
            SleepTimeout::ThirtyMinutes => 30 * MINUTE_MS,
        }
    }

    /// Page turns between two full refreshes of the panel.
    pub const fn refresh_pages(&self) -> u16 {
        match self.refresh_frequency {
            RefreshFrequency::Every1 => 1,
            RefreshFrequency::Every5 => 5,
            RefreshFrequency::Every10 => 10,
            RefreshFrequency::Every15 => 15,
            RefreshFrequency::Every30 => 30,
        }
    }

    /// How long the power button has to be held before a press is handled. Sleeping on a short
    /// press reacts almost immediately.
    pub const fn power_button_duration_ms(&self) -> u16 {
        match self.short_power_button {
            ShortPowerButton::Sleep => 10,
            ShortPowerButton::Ignore | ShortPowerButton::PageTurn => 400,
        }
    }

    /// The stored theme byte is not validated, anything unknown renders as the default theme.
    pub fn theme(&self) -> UiTheme {
        UiTheme::from_repr(self.ui_theme).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::{EnumCount, IntoEnumIterator};

    #[test]
    fn defaults() {
        let settings = Settings::default();
        assert_eq!(settings.reader_font_id(), FontId::Bookerly14);
        assert_eq!(settings.line_compression(), 1.0);
        assert_eq!(settings.sleep_timeout_ms(), 600_000);
        assert_eq!(settings.refresh_pages(), 15);
        assert_eq!(settings.power_button_duration_ms(), 400);
        assert_eq!(settings.theme(), UiTheme::Lyra);
    }

    #[test]
    fn font_table_is_a_bijection() {
        let mut seen = [false; FontId::COUNT];
        for family in FontFamily::iter() {
            for size in FontSize::iter() {
                let id = FontId::new(family, size);
                assert_eq!(id.family(), family);
                assert!(!seen[id as usize], "{id} used twice");
                seen[id as usize] = true;
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn noto_sans_large() {
        let settings = Settings {
            font_family: FontFamily::NotoSans,
            font_size: FontSize::Large,
            ..Settings::default()
        };
        assert_eq!(settings.reader_font_id(), FontId::NotoSans16);
        assert_eq!(settings.reader_font_id().point_size(), 16);
    }

    #[test]
    fn open_dyslexic_is_smaller() {
        assert_eq!(
            FontId::new(FontFamily::OpenDyslexic, FontSize::Small).point_size(),
            8
        );
    }

    #[test]
    fn line_compression_table() {
        let mut settings = Settings {
            font_family: FontFamily::NotoSans,
            line_spacing: LineSpacing::Tight,
            ..Settings::default()
        };
        assert_eq!(settings.line_compression(), 0.90);
        settings.font_family = FontFamily::Bookerly;
        settings.line_spacing = LineSpacing::Wide;
        assert_eq!(settings.line_compression(), 1.1);
    }

    #[test]
    fn timeouts_and_refresh() {
        let settings = Settings {
            sleep_timeout: SleepTimeout::OneMinute,
            refresh_frequency: RefreshFrequency::Every30,
            short_power_button: ShortPowerButton::Sleep,
            ..Settings::default()
        };
        assert_eq!(settings.sleep_timeout_ms(), 60_000);
        assert_eq!(settings.refresh_pages(), 30);
        assert_eq!(settings.power_button_duration_ms(), 10);
    }

    #[test]
    fn unknown_theme_falls_back() {
        let mut settings = Settings::default();
        settings.ui_theme = 0;
        assert_eq!(settings.theme(), UiTheme::Classic);
        settings.ui_theme = 42;
        assert_eq!(settings.theme(), UiTheme::Lyra);
    }
}
