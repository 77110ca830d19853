use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    #[default]
    Civilian,
    Responder,
}

impl Role {
    pub fn parse(name: &str) -> Option<Role> {
        match name {
            "civilian" => Some(Role::Civilian),
            "responder" => Some(Role::Responder),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Civilian => "civilian",
            Role::Responder => "responder",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Intent {
    #[default]
    Evacuate,
    SeekHazard,
}

impl Intent {
    pub fn parse(name: &str) -> Option<Intent> {
        match name {
            "evacuate" => Some(Intent::Evacuate),
            "seek-hazard" | "seek" => Some(Intent::SeekHazard),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Evacuate => "evacuate",
            Intent::SeekHazard => "seek-hazard",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_are_kebab_case() {
        assert_eq!(serde_json::to_string(&Intent::SeekHazard).unwrap(), "\"seek-hazard\"");
        assert_eq!(serde_json::to_string(&Role::Responder).unwrap(), "\"responder\"");
        assert_eq!(serde_json::from_str::<Intent>("\"evacuate\"").unwrap(), Intent::Evacuate);
    }

    #[test]
    fn parse_accepts_console_spellings() {
        assert_eq!(Role::parse("responder"), Some(Role::Responder));
        assert_eq!(Role::parse("boss"), None);
        assert_eq!(Intent::parse("seek"), Some(Intent::SeekHazard));
        assert_eq!(Intent::parse(Intent::SeekHazard.as_str()), Some(Intent::SeekHazard));
    }
}
