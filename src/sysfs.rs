//! Attribute-file adapter.
//!
//! Maps named attribute reads and writes onto the controller using the
//! conventions of a `show`/`store` pair: reads produce decimal text, writes
//! return the number of bytes consumed or a negative errno.

use log::warn;

use crate::attribute::Attribute;
use crate::controller::BrightnessController;
use crate::error::ENOENT;

/// A name that is not one of the brightness attributes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown attribute {0:?}")]
pub struct UnknownAttribute(pub String);

impl UnknownAttribute {
    /// The positive errno reported to the attribute layer.
    pub fn errno(&self) -> i32 {
        ENOENT
    }
}

/// The table of brightness attribute entries.
#[derive(Clone)]
pub struct AttributeTable {
    controller: BrightnessController,
}

impl AttributeTable {
    /// Expose `controller` through named attributes.
    pub fn new(controller: BrightnessController) -> Self {
        Self { controller }
    }

    /// Names of the exposed attributes.
    pub fn names(&self) -> [&'static str; 2] {
        Attribute::ALL.map(Attribute::name)
    }

    /// Render an attribute's value.
    pub fn show(&self, name: &str) -> Result<String, UnknownAttribute> {
        let attribute = lookup(name)?;
        Ok(self.controller.read(attribute).to_string())
    }

    /// Write an attribute, returning `buf.len()` or `-errno`.
    pub fn store(&self, name: &str, buf: &str) -> isize {
        let attribute = match lookup(name) {
            Ok(attribute) => attribute,
            Err(e) => return -(e.errno() as isize),
        };

        match self.controller.write(attribute, buf) {
            Ok(()) => buf.len() as isize,
            Err(e) => -(e.errno() as isize),
        }
    }
}

fn lookup(name: &str) -> Result<Attribute, UnknownAttribute> {
    Attribute::from_name(name).ok_or_else(|| {
        warn!("no brightness attribute named {:?}", name);
        UnknownAttribute(name.to_string())
    })
}
