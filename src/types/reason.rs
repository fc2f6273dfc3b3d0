//! Reason codes explaining what a swipe did to the model

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum ReasonCode {
    // =========================================================================
    // R100: Swipe recording
    // =========================================================================
    /// Like recorded, scores raised
    R100_SWIPE_LIKED,
    /// Dislike recorded, scores lowered at half weight
    R101_SWIPE_DISLIKED,
    /// Profile was already swiped; prior contribution is kept
    R102_REPEAT_SWIPE,
    /// Profile has no visual metadata; only the id lists moved
    R103_NO_VISUAL_METADATA,

    // =========================================================================
    // R200: Confidence
    // =========================================================================
    /// Below the prediction gate, predictions stay neutral
    R200_CONFIDENCE_LEARNING,
    /// Crossed the prediction gate on this swipe
    R201_CONFIDENCE_GATE_OPENED,
    /// Confidence saturated at 100
    R202_CONFIDENCE_FULL,
}

impl ReasonCode {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::R100_SWIPE_LIKED => "R100_SWIPE_LIKED",
            Self::R101_SWIPE_DISLIKED => "R101_SWIPE_DISLIKED",
            Self::R102_REPEAT_SWIPE => "R102_REPEAT_SWIPE",
            Self::R103_NO_VISUAL_METADATA => "R103_NO_VISUAL_METADATA",
            Self::R200_CONFIDENCE_LEARNING => "R200_CONFIDENCE_LEARNING",
            Self::R201_CONFIDENCE_GATE_OPENED => "R201_CONFIDENCE_GATE_OPENED",
            Self::R202_CONFIDENCE_FULL => "R202_CONFIDENCE_FULL",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::R100_SWIPE_LIKED => "Like recorded",
            Self::R101_SWIPE_DISLIKED => "Dislike recorded",
            Self::R102_REPEAT_SWIPE => "Profile swiped again",
            Self::R103_NO_VISUAL_METADATA => "No visual metadata to learn from",
            Self::R200_CONFIDENCE_LEARNING => "Still learning",
            Self::R201_CONFIDENCE_GATE_OPENED => "Predictions enabled",
            Self::R202_CONFIDENCE_FULL => "Model fully confident",
        }
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}
