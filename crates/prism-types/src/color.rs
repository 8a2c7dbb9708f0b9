//! The blue-green color axis
//!
//! A color is never persisted as an authoritative state field; it is always
//! derived, either from an application name suffix or from the variables a
//! prior operation left behind.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two copies of a blue-green deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationColor {
    Blue,
    Green,
}

impl ApplicationColor {
    /// The other color.
    pub fn opposite(&self) -> ApplicationColor {
        match self {
            ApplicationColor::Blue => ApplicationColor::Green,
            ApplicationColor::Green => ApplicationColor::Blue,
        }
    }

    /// Application name suffix carried by this color.
    pub fn suffix(&self) -> &'static str {
        match self {
            ApplicationColor::Blue => "-blue",
            ApplicationColor::Green => "-green",
        }
    }

    /// Derive the color implied by an application name.
    ///
    /// Unsuffixed names mean Blue: applications deployed before blue-green
    /// support carried no suffix, and those are treated as the blue copy.
    /// This compatibility rule is load-bearing; do not change it.
    pub fn from_application_name(name: &str) -> ApplicationColor {
        if name.ends_with(ApplicationColor::Green.suffix()) {
            ApplicationColor::Green
        } else {
            ApplicationColor::Blue
        }
    }

    /// Whether `name` carries an explicit color suffix at all.
    pub fn has_color_suffix(name: &str) -> bool {
        name.ends_with(ApplicationColor::Blue.suffix())
            || name.ends_with(ApplicationColor::Green.suffix())
    }
}

impl fmt::Display for ApplicationColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApplicationColor::Blue => write!(f, "blue"),
            ApplicationColor::Green => write!(f, "green"),
        }
    }
}
