//! Typed stage and run outcomes.

use serde::Serialize;

use super::narrative;

/// How the forest was crossed. Each branch carries its own narration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ForestCrossing {
    /// Walked straight through.
    Unhindered,
    /// Sprang a trap, rested, and carried on.
    RestedAfterTrap,
    /// Found a mysterious relic on the way.
    FoundRelic,
}

impl ForestCrossing {
    /// The resolver's own description of the crossing.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ForestCrossing::Unhindered => narrative::FOREST_UNHINDERED,
            ForestCrossing::RestedAfterTrap => narrative::FOREST_RESTED,
            ForestCrossing::FoundRelic => narrative::FOREST_RELIC,
        }
    }

    /// Narration shown once the forest is behind the player.
    #[must_use]
    pub fn narration(self) -> &'static str {
        match self {
            ForestCrossing::Unhindered => narrative::FOREST_UNHINDERED_NARRATION,
            ForestCrossing::RestedAfterTrap => narrative::FOREST_RESTED_NARRATION,
            ForestCrossing::FoundRelic => narrative::FOREST_RELIC_NARRATION,
        }
    }
}

/// The guard let the player through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuardPassage {
    /// The password handed over.
    pub password: String,
    /// The guard's response.
    pub message: String,
}

/// Result of one full run of the expedition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum RunOutcome {
    /// Every stage succeeded; carries the final message.
    Completed(String),
    /// A stage failed; carries the failure reason.
    Aborted(String),
}

impl RunOutcome {
    /// The text appended to the play history for this run.
    #[must_use]
    pub fn history_entry(&self) -> &str {
        match self {
            RunOutcome::Completed(message) => message,
            RunOutcome::Aborted(reason) => reason,
        }
    }

    /// Whether the player should be offered a restart.
    #[must_use]
    pub fn can_restart(&self) -> bool {
        matches!(self, RunOutcome::Aborted(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_forest_branch_has_distinct_narration() {
        let narrations = [
            ForestCrossing::Unhindered.narration(),
            ForestCrossing::RestedAfterTrap.narration(),
            ForestCrossing::FoundRelic.narration(),
        ];

        assert_ne!(narrations[0], narrations[1]);
        assert_ne!(narrations[1], narrations[2]);
        assert_ne!(narrations[0], narrations[2]);
    }

    #[test]
    fn test_only_aborted_runs_offer_restart() {
        assert!(RunOutcome::Aborted(narrative::GAVE_UP.to_owned()).can_restart());
        assert!(!RunOutcome::Completed(narrative::TREASURE_FOUND.to_owned()).can_restart());
    }

    #[test]
    fn test_run_outcome_serializes_with_status_tag() {
        let json = serde_json::to_value(RunOutcome::Aborted("河水太急".to_owned())).unwrap();

        assert_eq!(json["status"], "aborted");
        assert_eq!(json["message"], "河水太急");
    }
}
