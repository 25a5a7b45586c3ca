//! Stage and step identifiers, and the background asset table.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Background shown when no stage-specific asset applies.
pub const DEFAULT_BACKGROUND: &str = "背景.jpg";

/// Scenery identifier; selects the background asset and the stage banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Stage {
    /// The library where the first clue is found.
    Initial,
    /// The steep mountain climb.
    ClimbSteepMountain,
    /// The mystical forest.
    CrossMysticalForest,
    /// The river past the forest.
    EncounterRiverAfterForest,
    /// The guard at the treasure site.
    HandleGuardEncounter,
    /// The dig site.
    DigForTreasure,
}

impl Stage {
    /// All stages in presentation order.
    pub const ALL: [Stage; 6] = [
        Stage::Initial,
        Stage::ClimbSteepMountain,
        Stage::CrossMysticalForest,
        Stage::EncounterRiverAfterForest,
        Stage::HandleGuardEncounter,
        Stage::DigForTreasure,
    ];

    /// The stable string identifier.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Stage::Initial => "initial",
            Stage::ClimbSteepMountain => "climbSteepMountain",
            Stage::CrossMysticalForest => "crossMysticalForest",
            Stage::EncounterRiverAfterForest => "encounterRiverAfterForest",
            Stage::HandleGuardEncounter => "handleGuardEncounter",
            Stage::DigForTreasure => "digForTreasure",
        }
    }

    /// Parses a stage identifier.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|stage| stage.id() == id)
    }

    /// The background asset for this stage.
    #[must_use]
    pub fn background_asset(self) -> &'static str {
        match self {
            Stage::Initial => DEFAULT_BACKGROUND,
            Stage::ClimbSteepMountain => "爬山.jpg",
            Stage::CrossMysticalForest => "森林.jpg",
            Stage::EncounterRiverAfterForest => "河流.jpg",
            Stage::HandleGuardEncounter => "守卫.jpg",
            Stage::DigForTreasure => "宝藏.jpg",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Looks up the background asset for a raw stage id, falling back to the
/// default background for ids that are not in the table.
#[must_use]
pub fn background_asset_for(stage_id: &str) -> &'static str {
    Stage::from_id(stage_id).map_or(DEFAULT_BACKGROUND, Stage::background_asset)
}

/// One step of the expedition pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Finding the first clue in the library.
    InitialClue,
    /// Decoding the ancient script on the clue.
    DecodeScript,
    /// Climbing the steep mountain.
    ClimbMountain,
    /// Crossing the mystical forest.
    CrossForest,
    /// Crossing the river.
    CrossRiver,
    /// Locating the hidden chamber.
    FindChamber,
    /// Solving the map puzzle.
    SolvePuzzle,
    /// Getting past the guard.
    GuardEncounter,
    /// Digging up the treasure.
    DigForTreasure,
}

impl Step {
    /// The full pipeline in execution order.
    pub const PIPELINE: [Step; 9] = [
        Step::InitialClue,
        Step::DecodeScript,
        Step::ClimbMountain,
        Step::CrossForest,
        Step::CrossRiver,
        Step::FindChamber,
        Step::SolvePuzzle,
        Step::GuardEncounter,
        Step::DigForTreasure,
    ];

    /// Name used in log fields.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Step::InitialClue => "initial_clue",
            Step::DecodeScript => "decode_script",
            Step::ClimbMountain => "climb_mountain",
            Step::CrossForest => "cross_forest",
            Step::CrossRiver => "cross_river",
            Step::FindChamber => "find_chamber",
            Step::SolvePuzzle => "solve_puzzle",
            Step::GuardEncounter => "guard_encounter",
            Step::DigForTreasure => "dig_for_treasure",
        }
    }

    /// The scenery this step switches to, if it opens a new stage.
    #[must_use]
    pub fn stage(self) -> Option<Stage> {
        match self {
            Step::InitialClue => Some(Stage::Initial),
            Step::ClimbMountain => Some(Stage::ClimbSteepMountain),
            Step::CrossForest => Some(Stage::CrossMysticalForest),
            Step::CrossRiver => Some(Stage::EncounterRiverAfterForest),
            Step::GuardEncounter => Some(Stage::HandleGuardEncounter),
            Step::DigForTreasure => Some(Stage::DigForTreasure),
            Step::DecodeScript | Step::FindChamber | Step::SolvePuzzle => None,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_table_matches_assets() {
        assert_eq!(background_asset_for("initial"), "背景.jpg");
        assert_eq!(background_asset_for("climbSteepMountain"), "爬山.jpg");
        assert_eq!(background_asset_for("crossMysticalForest"), "森林.jpg");
        assert_eq!(background_asset_for("encounterRiverAfterForest"), "河流.jpg");
        assert_eq!(background_asset_for("handleGuardEncounter"), "守卫.jpg");
        assert_eq!(background_asset_for("digForTreasure"), "宝藏.jpg");
    }

    #[test]
    fn test_unknown_stage_id_falls_back_to_default_background() {
        assert_eq!(background_asset_for("volcano"), DEFAULT_BACKGROUND);
        assert_eq!(background_asset_for(""), DEFAULT_BACKGROUND);
    }

    #[test]
    fn test_stage_ids_round_trip_through_from_id() {
        for stage in Stage::ALL {
            assert_eq!(Stage::from_id(stage.id()), Some(stage));
        }
    }

    #[test]
    fn test_stage_serializes_as_camel_case_id() {
        let json = serde_json::to_value(Stage::EncounterRiverAfterForest).unwrap();

        assert_eq!(json, serde_json::json!("encounterRiverAfterForest"));
    }

    #[test]
    fn test_pipeline_places_chamber_before_puzzle() {
        let chamber = Step::PIPELINE
            .iter()
            .position(|s| *s == Step::FindChamber)
            .unwrap();
        let puzzle = Step::PIPELINE
            .iter()
            .position(|s| *s == Step::SolvePuzzle)
            .unwrap();

        assert!(chamber < puzzle);
        assert_eq!(Step::PIPELINE.first(), Some(&Step::InitialClue));
        assert_eq!(Step::PIPELINE.last(), Some(&Step::DigForTreasure));
    }
}
