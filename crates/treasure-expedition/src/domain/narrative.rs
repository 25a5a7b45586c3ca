//! Player-facing text.

use treasure_core::stage::Step;

/// The clue found in the library.
pub const INITIAL_CLUE: &str = "在古老的图书馆里找到了第一个线索...";
/// The only known reading of the ancient script.
pub const DECODED_CLUE: &str = "线索解密：宝藏答案：太阳。";

/// Mountain option: keep climbing.
pub const CLIMB_OPTION: &str = "继续向前";
/// Option to abandon the hunt, offered on the mountain and after the forest trap.
pub const GIVE_UP_OPTION: &str = "放弃";
/// Result of reaching the summit.
pub const CLIMB_SUCCESS: &str = "成功爬上陡峭山峰，继续前往下一个关卡。";
/// Failure reason when the player gives up.
pub const GAVE_UP: &str = "你选择了放弃，寻宝失败。";
/// Narration after the climb.
pub const CLIMB_NARRATION: &str = "厉害呀，成功爬上了陡峭山峰，离宝藏又近了一步！";

/// Forest event: nothing happens.
pub const FOREST_UNHINDERED: &str = "成功穿越神秘森林，未遇到任何阻碍。";
/// Forest event: the player is caught in a trap.
pub const FOREST_TRAP: &str = "哎呀，在神秘森林中遇到了陷阱，受伤了，不过可以先休整一下再继续哦。";
/// Trap option: rest, then carry on.
pub const REST_OPTION: &str = "休整后继续";
/// Result of resting after the trap.
pub const FOREST_RESTED: &str = "经过休整，成功穿越神秘森林，继续前往下一个关卡。";
/// Forest event: a relic is found.
pub const FOREST_RELIC: &str = "在神秘森林中发现了神秘道具，可能对后续寻宝有帮助。";
/// Narration after an uneventful forest crossing.
pub const FOREST_UNHINDERED_NARRATION: &str = "太棒了，我们成功穿越了神秘森林，继续前进吧！";
/// Narration after resting through the trap.
pub const FOREST_RESTED_NARRATION: &str = "经过休整，成功穿越了神秘森林，继续前进吧！";
/// Narration after finding the relic.
pub const FOREST_RELIC_NARRATION: &str =
    "哇哦，在神秘森林中发现了神秘道具，说不定后面能派上大用场呢，继续前进！";

/// Shown when the river comes into view.
pub const RIVER_INTRO: &str = "穿过森林遇到了一条小河。";
/// River option that gets across.
pub const RAFT_OPTION: &str = "木筏";
/// River option that snaps.
pub const ROPE_OPTION: &str = "绳索";
/// River option that is swept away.
pub const SWIM_OPTION: &str = "游泳";
/// Result of crossing by raft.
pub const RAFT_SUCCESS: &str = "成功乘坐木筏渡过小河，继续前往下一个关卡。";
/// Failure reason for the rope.
pub const ROPE_FAILURE: &str = "绳索断裂，掉进河里，寻宝失败。";
/// Failure reason for swimming.
pub const SWIM_FAILURE: &str = "河水太急，游泳体力不支，寻宝失败。";
/// Narration after the river.
pub const RIVER_NARRATION: &str = "顺利渡过小河，继续前进吧！";

/// The hidden chamber, reached by following the clue.
pub const CHAMBER_FOUND: &str = "发现隐藏的密室，里面有一张地图指向宝藏的位置。";
/// Failure reason when there is no clue to follow.
pub const CHAMBER_LOST: &str = "未能找到隐藏的密室，线索丢失。";

/// The answer to the chamber puzzle.
pub const PUZZLE_SOLUTION: &str = "太阳";
/// Result of a correct puzzle answer.
pub const PUZZLE_SOLVED: &str = "谜题解开，宝藏就在眼前的洞穴中。";
/// Failure reason for a wrong puzzle answer.
pub const PUZZLE_WRONG: &str = "谜题答案错误";
/// Shown after a wrong answer while retries remain.
pub const PUZZLE_RETRY_HINT: &str = "谜题答案错误，请重试。";

/// The password the guard accepts.
pub const GUARD_PASSWORD: &str = "secretpassword";
/// Guard option: hand over the password.
pub const HAND_OVER_OPTION: &str = "交出密码";
/// Guard option: fight.
pub const FIGHT_OPTION: &str = "击败";
/// Guard option: run.
pub const FLEE_OPTION: &str = "逃跑";
/// Result of handing over the password.
pub const GUARD_PASSED: &str = "成功交出密码，守卫放行。";
/// Failure reason for fighting the guard.
pub const FIGHT_FAILURE: &str = "你选择了击败守卫，不幸身亡，寻宝失败。";
/// Failure reason for running from the guard.
pub const FLEE_FAILURE: &str = "你选择了逃跑，守卫追了上来，寻宝失败。";
/// Narration after the guard lets the player through.
pub const GUARD_NARRATION: &str = "哈哈，成功交出密码，守卫放行啦，继续前进咯！";

/// Final message of a completed run.
pub const TREASURE_FOUND: &str = "挖掘成功，找到了宝藏！";

/// Shown after the ancient script is decoded.
#[must_use]
pub fn decoded_clue_message(decoded: &str) -> String {
    format!("经过一番仔细研究，我们成功解密了这条线索：{decoded}")
}

/// Shown when the guard is handed the password.
#[must_use]
pub fn password_reveal(password: &str) -> String {
    format!("密码是：{password}，赶紧输入密码交给守卫吧。")
}

/// Terminal message for an aborted run.
#[must_use]
pub fn failure_banner(reason: &str) -> String {
    format!("任务失败：{reason}")
}

/// Banner announcing a new stage, for the steps that open one.
#[must_use]
pub fn stage_banner(step: Step) -> Option<String> {
    let name = match step {
        Step::ClimbMountain => "攀爬陡峭山峰",
        Step::CrossForest => "穿越神秘森林",
        Step::CrossRiver => "穿过森林遇到小河",
        Step::GuardEncounter => "遇到守卫",
        Step::DigForTreasure => "挖掘宝藏",
        _ => return None,
    };
    Some(format!("你来到了新的关卡：{name}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_banner_names_stage() {
        assert_eq!(
            stage_banner(Step::GuardEncounter).as_deref(),
            Some("你来到了新的关卡：遇到守卫")
        );
    }

    #[test]
    fn test_steps_without_scenery_have_no_banner() {
        assert!(stage_banner(Step::InitialClue).is_none());
        assert!(stage_banner(Step::FindChamber).is_none());
        assert!(stage_banner(Step::SolvePuzzle).is_none());
    }

    #[test]
    fn test_failure_banner_prefixes_reason() {
        assert_eq!(failure_banner(GAVE_UP), "任务失败：你选择了放弃，寻宝失败。");
    }
}
