//! The two brightness attributes and the translation of written text into a
//! new brightness state.
//!
//! Everything here is pure: no device access happens until the resulting
//! [`PendingWrite`] is committed by the controller.

use std::fmt;

use crate::error::WriteError;
use crate::state::{BrightnessState, LEVEL_MAX, RAW_MAX};

/// A brightness attribute exposed to consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    /// `brightness_level`: coarse level 0-8.
    Level,
    /// `brightness_raw`: register byte 0-255.
    Raw,
}

impl Attribute {
    /// Both attributes, in the order they are exposed.
    pub const ALL: [Attribute; 2] = [Attribute::Level, Attribute::Raw];

    /// The attribute's externally visible name.
    pub fn name(self) -> &'static str {
        match self {
            Attribute::Level => "brightness_level",
            Attribute::Raw => "brightness_raw",
        }
    }

    /// Look up an attribute by its externally visible name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|attr| attr.name() == name)
    }

    /// Inclusive range of accepted values.
    pub fn range(self) -> (i32, i32) {
        match self {
            Attribute::Level => (0, i32::from(LEVEL_MAX)),
            Attribute::Raw => (0, i32::from(RAW_MAX)),
        }
    }

    /// Parse and validate `input`, producing the state a successful write
    /// would commit.
    ///
    /// # Errors
    ///
    /// - [`WriteError::Parse`] if `input` is not a base-10 integer
    /// - [`WriteError::Range`] if the integer is outside [`Attribute::range`]
    pub fn translate(self, input: &str) -> Result<PendingWrite, WriteError> {
        let value = parse_int(input)?;
        self.translate_value(value)
    }

    /// Validate an already parsed value.
    pub fn translate_value(self, value: i32) -> Result<PendingWrite, WriteError> {
        let (min, max) = self.range();
        if !(min..=max).contains(&value) {
            return Err(WriteError::Range {
                attribute: self,
                value,
                min,
                max,
            });
        }

        // In range, so the narrowing cannot truncate.
        let state = match self {
            Attribute::Level => BrightnessState::from_level(value as u8),
            Attribute::Raw => BrightnessState::from_raw(value as u8),
        };

        Ok(PendingWrite {
            attribute: self,
            state,
        })
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A validated write that has not reached the device yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingWrite {
    /// The attribute that was written.
    pub attribute: Attribute,
    /// The state to commit once the register write succeeds.
    pub state: BrightnessState,
}

impl PendingWrite {
    /// The byte to send to the brightness register.
    pub fn raw(&self) -> u8 {
        self.state.raw
    }
}

/// Parse a base-10 signed integer.
///
/// A single trailing newline is tolerated since attribute writes usually come
/// from `echo`. Whitespace anywhere else, an empty string, or a value that
/// overflows `i32` is rejected.
pub fn parse_int(input: &str) -> Result<i32, WriteError> {
    let digits = input.strip_suffix('\n').unwrap_or(input);
    digits.parse::<i32>().map_err(|_| WriteError::Parse {
        input: input.to_string(),
    })
}
