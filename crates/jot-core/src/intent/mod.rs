//! Classified intents.

pub mod action;
pub mod params;

pub use action::{ActionTag, Confidence};
pub use params::{Params, SelectionType};

use serde::{Deserialize, Serialize};

/// The classification result for one line of input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    pub action: ActionTag,
    pub params: Params,
    pub confidence: Confidence,
}

impl Intent {
    pub fn new(action: ActionTag, params: Params, confidence: Confidence) -> Self {
        Self {
            action,
            params,
            confidence,
        }
    }

    pub fn unknown() -> Self {
        Self::new(ActionTag::Unknown, Params::None, Confidence::None)
    }
}
