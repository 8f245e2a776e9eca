//! Records and the submission state flag

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A raw or transformed record: one JSON object
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Publication state attached to every transformed record of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum State {
    /// Published immediately
    Live,
    /// Held for review
    #[default]
    Draft,
}

impl State {
    /// Numeric code used by the pyvideo.org API
    pub fn code(self) -> u8 {
        match self {
            State::Live => 1,
            State::Draft => 2,
        }
    }

    /// Map a numeric code back to a state
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(State::Live),
            2 => Some(State::Draft),
            _ => None,
        }
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            State::Live => write!(f, "live"),
            State::Draft => write!(f, "draft"),
        }
    }
}

impl Serialize for State {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for State {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let code = u8::deserialize(deserializer)?;
        State::from_code(code)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid state code {}", code)))
    }
}
