use serde::{Deserialize, Serialize};

use crate::guide::types::{Action, ResolvedTarget};

/// Lifecycle of a guided tour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TourStatus {
    Idle,
    Running,
    Finished,
    Skipped,
}

/// Notifications coming back from whatever renders the tour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TourSignal {
    Advance,
    Back,
    Finished,
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TourStep {
    pub ordinal: u32,
    pub display_text: String,
    pub target: ResolvedTarget,
}

impl TourStep {
    pub fn describe(action: &Action) -> String {
        format!(
            "Step {}: {} '{}'",
            action.ordinal,
            action.kind.verb(),
            action.target_text
        )
    }
}
