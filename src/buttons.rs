//! Logical to physical mapping of the four front buttons.

use crate::options::{FrontButton, FrontButtonLayout};

/// Which physical button performs each logical role. The four entries must be pairwise
/// distinct so that every physical button routes to exactly one role.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrontButtons {
    pub back: FrontButton,
    pub confirm: FrontButton,
    pub left: FrontButton,
    pub right: FrontButton,
}

/// What happened to the mapping after a file was decoded.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MappingOutcome {
    /// Mapping was stored in the file and is valid.
    Kept,
    /// Mapping was stored in the file but assigned a button twice, so it was reset.
    Reset,
    /// File predates the per-button mapping, it was derived from the legacy layout.
    Migrated,
}

impl FrontButtons {
    /// Hardware order: back, confirm, left, right.
    pub const CANONICAL: Self = Self {
        back: FrontButton::Back,
        confirm: FrontButton::Confirm,
        left: FrontButton::Left,
        right: FrontButton::Right,
    };

    pub const fn as_array(&self) -> [FrontButton; 4] {
        [self.back, self.confirm, self.left, self.right]
    }

    pub fn is_distinct(&self) -> bool {
        let mapping = self.as_array();
        (0..mapping.len()).all(|i| !mapping[i + 1..].contains(&mapping[i]))
    }

    /// Resets to [`Self::CANONICAL`] if any physical button is assigned twice.
    /// Returns `true` if a reset happened.
    pub fn enforce_distinct(&mut self) -> bool {
        if self.is_distinct() {
            return false;
        }
        *self = Self::CANONICAL;
        true
    }

    /// Derives the explicit mapping from the pre-remapping layout option.
    pub const fn from_legacy(layout: FrontButtonLayout) -> Self {
        match layout {
            FrontButtonLayout::BackConfirmLeftRight => Self::CANONICAL,
            FrontButtonLayout::LeftRightBackConfirm => Self {
                back: FrontButton::Left,
                confirm: FrontButton::Right,
                left: FrontButton::Back,
                right: FrontButton::Confirm,
            },
            FrontButtonLayout::LeftBackConfirmRight => Self {
                back: FrontButton::Confirm,
                confirm: FrontButton::Left,
                left: FrontButton::Back,
                right: FrontButton::Right,
            },
            FrontButtonLayout::BackConfirmRightLeft => Self {
                back: FrontButton::Back,
                confirm: FrontButton::Confirm,
                left: FrontButton::Right,
                right: FrontButton::Left,
            },
        }
    }

    /// Same as [`Self::from_legacy`] for a raw stored byte; unknown values map to
    /// [`Self::CANONICAL`].
    pub fn from_legacy_byte(value: u8) -> Self {
        match FrontButtonLayout::from_repr(value) {
            Some(layout) => Self::from_legacy(layout),
            None => Self::CANONICAL,
        }
    }

    /// The logical role a physical button is currently bound to.
    pub fn role_of(&self, button: FrontButton) -> Option<FrontButton> {
        let roles = [
            FrontButton::Back,
            FrontButton::Confirm,
            FrontButton::Left,
            FrontButton::Right,
        ];
        self.as_array()
            .iter()
            .position(|&b| b == button)
            .map(|i| roles[i])
    }
}

impl Default for FrontButtons {
    fn default() -> Self {
        Self::CANONICAL
    }
}
