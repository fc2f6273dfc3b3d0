//! Output structures for a recorded swipe

use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::{Deserialize, Serialize};

use crate::types::{Category, ReasonCode};

/// What the caller gets back alongside the updated model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwipeOutcome {
    pub timestamp: DateTime<Utc>,
    pub profile_id: String,
    pub liked: bool,
    /// Confidence after the swipe
    pub confidence: u8,
    pub total_swipes: usize,
    /// Top categories after the swipe
    pub top_categories: Vec<Category>,
    /// Everything notable about this update, most specific first
    pub reasons: Vec<ReasonCode>,
}

impl SwipeOutcome {
    /// Primary reason (like/dislike)
    pub fn reason(&self) -> ReasonCode {
        self.reasons
            .first()
            .copied()
            .unwrap_or(if self.liked {
                ReasonCode::R100_SWIPE_LIKED
            } else {
                ReasonCode::R101_SWIPE_DISLIKED
            })
    }

    pub fn has_reason(&self, reason: ReasonCode) -> bool {
        self.reasons.contains(&reason)
    }

    fn top_list(&self) -> String {
        self.top_categories
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let verdict = if self.liked {
            "♥ liked".green().bold()
        } else {
            "✕ passed".red().bold()
        };
        let confidence = format!("{}%", self.confidence);
        let confidence = if self.confidence >= crate::CONFIDENCE_MAX {
            confidence.green()
        } else if self.confidence >= crate::PREDICTION_MIN_CONFIDENCE {
            confidence.yellow()
        } else {
            confidence.dimmed()
        };
        format!(
            "{} {} | confidence={} | swipes={} | top={} | {}",
            verdict,
            self.profile_id,
            confidence,
            self.total_swipes,
            self.top_list().purple(),
            self.reason().code().dimmed()
        )
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "profile={} | liked={} | confidence={} | swipes={} | top={} | reason={}",
            self.profile_id,
            self.liked,
            self.confidence,
            self.total_swipes,
            self.top_list(),
            self.reason().code()
        )
    }
}
