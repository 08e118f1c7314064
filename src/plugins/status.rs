//! Plugin status selector

use crate::error::{Error, Result};
use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::{BitAnd, BitOr};
use std::str::FromStr;

/// Which plugins to select: enabled, disabled, or both.
///
/// Behaves like a two-bit flag set. `All` is the union of the other two;
/// the empty intersection is represented as `None` by [`BitAnd`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PluginStatus {
    Enabled = 1,
    Disabled = 2,
    #[default]
    All = 3,
}

impl PluginStatus {
    pub const MEMBERS: [PluginStatus; 3] = [
        PluginStatus::Enabled,
        PluginStatus::Disabled,
        PluginStatus::All,
    ];

    /// Underlying flag value
    pub fn bits(self) -> u8 {
        self as u8
    }

    /// Upper-case member name
    pub fn name(self) -> &'static str {
        match self {
            Self::Enabled => "ENABLED",
            Self::Disabled => "DISABLED",
            Self::All => "ALL",
        }
    }

    /// Member names, sorted
    pub fn list_valid() -> Vec<&'static str> {
        let mut valid: Vec<_> = Self::MEMBERS.iter().map(|s| s.name()).collect();
        valid.sort_unstable();
        valid
    }

    /// Parse a member name in any case
    pub fn from_value(value: impl AsRef<str>) -> Result<Self> {
        let raw = value.as_ref();
        let upper = raw.to_uppercase();
        Self::MEMBERS
            .into_iter()
            .find(|s| s.name() == upper)
            .ok_or_else(|| Error::InvalidStatus(raw.to_string()))
    }

    /// Parse a raw flag value (1, 2 or 3)
    pub fn from_bits(bits: i64) -> Result<Self> {
        Self::MEMBERS
            .into_iter()
            .find(|s| i64::from(s.bits()) == bits)
            .ok_or_else(|| Error::InvalidStatus(bits.to_string()))
    }

    /// Whether every bit of `other` is set in `self`
    pub fn contains(self, other: PluginStatus) -> bool {
        self.bits() & other.bits() == other.bits()
    }

    /// Whether `self` and `other` share any bit
    pub fn intersects(self, other: PluginStatus) -> bool {
        (self & other).is_some()
    }
}

impl BitOr for PluginStatus {
    type Output = PluginStatus;

    fn bitor(self, rhs: Self) -> Self::Output {
        match self.bits() | rhs.bits() {
            1 => Self::Enabled,
            2 => Self::Disabled,
            _ => Self::All,
        }
    }
}

impl BitAnd for PluginStatus {
    type Output = Option<PluginStatus>;

    fn bitand(self, rhs: Self) -> Self::Output {
        match self.bits() & rhs.bits() {
            1 => Some(Self::Enabled),
            2 => Some(Self::Disabled),
            3 => Some(Self::All),
            _ => None,
        }
    }
}

impl AsRef<str> for PluginStatus {
    fn as_ref(&self) -> &str {
        self.name()
    }
}

impl fmt::Display for PluginStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts a member name or, failing that, an integer flag value
impl FromStr for PluginStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().parse::<i64>() {
            Ok(bits) => Self::from_bits(bits),
            Err(_) => Self::from_value(s),
        }
    }
}

impl Serialize for PluginStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}
