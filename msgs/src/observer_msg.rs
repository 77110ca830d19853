use serde::{Deserialize, Serialize};

use crate::{role::{Intent, Role}, Floor};

/// Messages sent from an observer to the authority
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObserverMsg {
    /// Where the sender currently stands, and what it wants to do there
    Position {
        x: i32,
        y: i32,
        #[serde(default = "crate::default_floor", deserialize_with = "crate::floor_or_default")]
        floor: Floor,
        #[serde(default, deserialize_with = "crate::lenient_or_default")]
        role: Role,
        #[serde(default, deserialize_with = "crate::lenient_or_default")]
        intent: Intent,
    },

    ToggleHazard {
        x: i32,
        y: i32,
        #[serde(default = "crate::default_floor", deserialize_with = "crate::floor_or_default")]
        floor: Floor,
    },

    ClearHazards {
        #[serde(default = "crate::default_floor", deserialize_with = "crate::floor_or_default")]
        floor: Floor,
    },

    /// Drop the sender's occupant while keeping the connection open
    Withdraw,
}

impl ObserverMsg {
    pub fn decode(text: &str) -> serde_json::Result<ObserverMsg> {
        serde_json::from_str(text.trim())
    }

    pub fn encode(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
