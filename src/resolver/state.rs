//! Resolution lifecycle state

use crate::error::Result;
use crate::geocode::AddressRecord;
use serde::Serialize;

/// Lifecycle of one resolution request
///
/// Exactly one state is current per resolver. States are replaced on every
/// transition and never mutated in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ResolutionState {
    /// Nothing has been requested yet
    #[default]
    Idle,
    /// A provider call is in flight
    Loading,
    /// The provider answered; may hold zero records
    Success { records: Vec<AddressRecord> },
    /// The provider call failed
    Failed { reason: String },
}

impl ResolutionState {
    /// Whether this state ends a request
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success { .. } | Self::Failed { .. })
    }

    /// Records of a successful resolution
    pub fn records(&self) -> Option<&[AddressRecord]> {
        match self {
            Self::Success { records } => Some(records),
            _ => None,
        }
    }

    /// Short name, used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Success { .. } => "success",
            Self::Failed { .. } => "failed",
        }
    }
}

impl From<Result<Vec<AddressRecord>>> for ResolutionState {
    fn from(outcome: Result<Vec<AddressRecord>>) -> Self {
        match outcome {
            Ok(records) => Self::Success { records },
            Err(e) => Self::Failed {
                reason: e.failure_reason(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::Coordinates;
    use crate::error::Error;

    #[test]
    fn test_default_is_idle() {
        assert_eq!(ResolutionState::default(), ResolutionState::Idle);
        assert!(!ResolutionState::Idle.is_terminal());
        assert!(!ResolutionState::Loading.is_terminal());
    }

    #[test]
    fn test_from_outcome() {
        let outcome: Result<Vec<AddressRecord>> = Ok(Vec::new());
        let empty = ResolutionState::from(outcome);
        assert_eq!(empty, ResolutionState::Success { records: vec![] });
        assert!(empty.is_terminal());
        assert_eq!(empty.records(), Some(&[][..]));

        let outcome: Result<Vec<AddressRecord>> =
            Err(Error::NoResults("ZERO_RESULTS".to_string()));
        let failed = ResolutionState::from(outcome);
        assert_eq!(
            failed,
            ResolutionState::Failed {
                reason: "No results found".to_string()
            }
        );
        assert!(failed.records().is_none());
    }

    #[test]
    fn test_serialization_is_tagged() {
        let record = AddressRecord::new("A", "d", Coordinates::new(1.0, 2.0)).unwrap();
        let state = ResolutionState::Success {
            records: vec![record],
        };
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["state"], "success");
        assert_eq!(json["records"][0]["title"], "A");

        let json = serde_json::to_value(ResolutionState::Loading).unwrap();
        assert_eq!(json, serde_json::json!({"state": "loading"}));
    }
}
