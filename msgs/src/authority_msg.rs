use serde::{Deserialize, Serialize};

use crate::{role::{Intent, Role}, Floor, OccupantId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupantEntry {
    pub id: OccupantId,
    pub x: i32,
    pub y: i32,
    pub floor: Floor,
    pub role: Role,
    pub intent: Intent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HazardEntry {
    pub x: i32,
    pub y: i32,
    pub floor: Floor,
}

/// Full copy of both registries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub occupants: Vec<OccupantEntry>,
    pub hazards: Vec<HazardEntry>,
}

/// Messages sent from the authority to every observer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthorityMsg {
    /// Sent once when the connection is established
    Welcome {
        identity: OccupantId,
        #[serde(flatten)]
        snapshot: Snapshot,
    },

    /// Sent to every observer after each accepted mutation
    Snapshot(Snapshot),
}

impl AuthorityMsg {
    pub fn snapshot(&self) -> &Snapshot {
        match self {
            AuthorityMsg::Welcome { snapshot, .. } => snapshot,
            AuthorityMsg::Snapshot(snapshot) => snapshot,
        }
    }

    pub fn into_snapshot(self) -> Snapshot {
        match self {
            AuthorityMsg::Welcome { snapshot, .. } => snapshot,
            AuthorityMsg::Snapshot(snapshot) => snapshot,
        }
    }

    pub fn decode(text: &str) -> serde_json::Result<AuthorityMsg> {
        serde_json::from_str(text)
    }

    pub fn encode(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
