// Validator (core) status: sync state, ledger and peers

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Label the validator reports once it has caught up with the network.
const SYNCED_LABELS: [&str; 2] = ["synced!", "synchronized"];

/// Normalized sync state. Unknown states keep the validator's own wording ("Catching up", "Joining SCP").
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ValidatorState {
    Synced,
    #[default]
    Error,
    Other(String),
}

impl ValidatorState {
    pub fn from_raw(raw: &str) -> Self {
        let trimmed = raw.trim();
        if SYNCED_LABELS
            .iter()
            .any(|label| trimmed.eq_ignore_ascii_case(label))
        {
            ValidatorState::Synced
        } else {
            ValidatorState::Other(trimmed.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ValidatorState::Synced => "Synced",
            ValidatorState::Error => "Error",
            ValidatorState::Other(s) => s,
        }
    }
}

impl Serialize for ValidatorState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ValidatorState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(match s.as_str() {
            "Synced" => ValidatorState::Synced,
            "Error" => ValidatorState::Error,
            _ => ValidatorState::Other(s),
        })
    }
}

/// Authenticated peer count, or "unavailable" when the validator didn't report one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PeerCount {
    Count(u64),
    #[default]
    Unavailable,
}

const UNAVAILABLE: &str = "unavailable";

impl Serialize for PeerCount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PeerCount::Count(n) => serializer.serialize_u64(*n),
            PeerCount::Unavailable => serializer.serialize_str(UNAVAILABLE),
        }
    }
}

impl<'de> Deserialize<'de> for PeerCount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Count(u64),
            Label(String),
        }
        match Raw::deserialize(deserializer)? {
            Raw::Count(n) => Ok(PeerCount::Count(n)),
            Raw::Label(s) if s == UNAVAILABLE => Ok(PeerCount::Unavailable),
            Raw::Label(s) => Err(serde::de::Error::custom(format!(
                "expected peer count or {:?}, got {:?}",
                UNAVAILABLE, s
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidatorStatus {
    pub state: ValidatorState,
    #[serde(rename = "ledger")]
    pub ledger_number: u64,
    #[serde(rename = "peers")]
    pub peer_count: PeerCount,
}

impl ValidatorStatus {
    /// Stand-in used when the validator can't be queried directly: Horizon's latest ledger
    /// counts as the core ledger and a non-zero ledger counts as synced.
    pub fn derived_from_ledger_index(latest_ledger: u64) -> Self {
        Self {
            state: if latest_ledger > 0 {
                ValidatorState::Synced
            } else {
                ValidatorState::Error
            },
            ledger_number: latest_ledger,
            peer_count: PeerCount::Unavailable,
        }
    }
}
