//! Cached brightness state.

/// Highest brightness level.
pub const LEVEL_MAX: u8 = 8;

/// Highest raw register value.
pub const RAW_MAX: u8 = u8::MAX;

/// Value reported for a level that cannot be derived from the raw byte.
pub const LEVEL_UNKNOWN: i32 = -1;

/// Map a level (0-8) onto its register value, `2^level - 1`.
///
/// Levels above [`LEVEL_MAX`] saturate at [`RAW_MAX`].
pub fn level_to_raw(level: u8) -> u8 {
    let level = level.min(LEVEL_MAX);
    ((1u16 << level) - 1) as u8
}

/// A snapshot of the cached brightness.
///
/// `level` is `Some(n)` only when `raw` was produced by writing level `n`,
/// in which case `raw == 2^n - 1`. Any directly written or externally read
/// raw value clears it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BrightnessState {
    /// Coarse brightness level, or `None` when indeterminate.
    pub level: Option<u8>,
    /// The byte last written to (or read from) the register.
    pub raw: u8,
}

impl BrightnessState {
    /// State derived from writing `level`.
    pub fn from_level(level: u8) -> Self {
        Self {
            level: Some(level.min(LEVEL_MAX)),
            raw: level_to_raw(level),
        }
    }

    /// State for a raw value that did not come from a level write.
    pub fn from_raw(raw: u8) -> Self {
        Self { level: None, raw }
    }

    /// The level as exposed to readers, [`LEVEL_UNKNOWN`] when indeterminate.
    pub fn level_value(&self) -> i32 {
        self.level.map_or(LEVEL_UNKNOWN, i32::from)
    }

    /// Whether `level` and `raw` agree.
    pub fn is_consistent(&self) -> bool {
        self.level.is_none_or(|level| self.raw == level_to_raw(level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_to_raw() {
        assert_eq!(level_to_raw(0), 0);
        assert_eq!(level_to_raw(1), 1);
        assert_eq!(level_to_raw(4), 15);
        assert_eq!(level_to_raw(8), 255);
        assert_eq!(level_to_raw(12), 255);
    }

    #[test]
    fn test_default_is_unknown() {
        let state = BrightnessState::default();
        assert_eq!(state.level, None);
        assert_eq!(state.raw, 0);
        assert_eq!(state.level_value(), LEVEL_UNKNOWN);
    }

    #[test]
    fn test_consistency() {
        for level in 0..=LEVEL_MAX {
            assert!(BrightnessState::from_level(level).is_consistent());
        }
        assert!(BrightnessState::from_raw(200).is_consistent());

        let torn = BrightnessState {
            level: Some(3),
            raw: 8,
        };
        assert!(!torn.is_consistent());
    }
}
