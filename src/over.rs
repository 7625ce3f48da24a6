use crate::innings::Innings;
use crate::strike;
use crate::types::Delivery;

pub const BALLS_PER_OVER: u32 = 6;

/// "overs.balls" notation, e.g. 20 legal balls -> "3.2".
pub fn format_overs(legal_balls: u32) -> String {
    format!("{}.{}", legal_balls / BALLS_PER_OVER, legal_balls % BALLS_PER_OVER)
}

/// True once per six legal balls: `completed` is the number of overs
/// already acknowledged, so a repeated check for the same ball is false.
pub fn is_over_complete(legal_balls: u32, completed: u32) -> bool {
    legal_balls > 0 && legal_balls % BALLS_PER_OVER == 0 && legal_balls / BALLS_PER_OVER > completed
}

/// Appends a ball to the over in progress, opening the first over if needed.
pub(crate) fn record(innings: &mut Innings, delivery: Delivery) {
    if innings.overs.is_empty() {
        innings.overs.push(Vec::new());
    }
    if let Some(current) = innings.overs.last_mut() {
        current.push(delivery);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverCheck {
    InProgress,
    /// Six legal balls bowled; a new over was opened and strike rotated.
    Completed,
    /// Six legal balls bowled on the innings' final ball; nothing else changes.
    CompletedFinal,
}

/// Called exactly once after every legal ball.
pub(crate) fn after_legal_ball(innings: &mut Innings) -> OverCheck {
    if !is_over_complete(innings.legal_balls, innings.overs_completed) {
        return OverCheck::InProgress;
    }
    innings.overs_completed = innings.legal_balls / BALLS_PER_OVER;

    if innings.overs_exhausted() || innings.wickets_exhausted() {
        return OverCheck::CompletedFinal;
    }

    innings.overs.push(Vec::new());
    strike::swap(innings);
    tracing::debug!(
        overs = innings.overs_completed,
        team = %innings.batting_team,
        "over complete"
    );
    OverCheck::Completed
}
