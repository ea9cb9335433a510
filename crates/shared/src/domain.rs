use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Fare tier chosen before a trip starts. Only 1, 2 and 3 exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct FareLevel(u8);

impl FareLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 3;
    pub const ALL: [FareLevel; 3] = [FareLevel(1), FareLevel(2), FareLevel(3)];

    pub fn new(level: u8) -> Result<Self, DomainError> {
        if (Self::MIN..=Self::MAX).contains(&level) {
            Ok(Self(level))
        } else {
            Err(DomainError::InvalidFareLevel(level))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Zero-based position among the level controls.
    pub fn index(self) -> usize {
        usize::from(self.0 - Self::MIN)
    }
}

impl Default for FareLevel {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl TryFrom<u8> for FareLevel {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FareLevel> for u8 {
    fn from(value: FareLevel) -> Self {
        value.0
    }
}

impl fmt::Display for FareLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurchargeOption {
    City,
    Night,
}

impl SurchargeOption {
    pub const ALL: [SurchargeOption; 2] = [SurchargeOption::City, SurchargeOption::Night];

    pub fn wire_name(self) -> &'static str {
        match self {
            Self::City => "city",
            Self::Night => "night",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::City => "Out of city",
            Self::Night => "Night",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Self::City => 0,
            Self::Night => 1,
        }
    }
}

impl std::str::FromStr for SurchargeOption {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "city" => Ok(Self::City),
            "night" => Ok(Self::Night),
            other => Err(DomainError::UnknownOption(other.to_string())),
        }
    }
}

impl fmt::Display for SurchargeOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Binary taxi state mirrored by the action button. The backend sends `"1"` while moving;
/// every other value (`"0"`, `"2"`) means the taxi is stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TripState {
    Moving,
    #[default]
    Stopped,
}

impl From<String> for TripState {
    fn from(value: String) -> Self {
        if value.trim() == "1" {
            Self::Moving
        } else {
            Self::Stopped
        }
    }
}

impl From<TripState> for String {
    fn from(value: TripState) -> Self {
        match value {
            TripState::Moving => "1".to_string(),
            TripState::Stopped => "0".to_string(),
        }
    }
}
