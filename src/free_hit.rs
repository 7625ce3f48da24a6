use crate::innings::Innings;

/// A no-ball makes the next legal ball a free hit. Further no-balls or
/// wides keep it pending.
pub(crate) fn arm(innings: &mut Innings) {
    if !innings.free_hit_pending {
        tracing::debug!(team = %innings.batting_team, "free hit pending");
    }
    innings.free_hit_pending = true;
}

/// Spends the free hit on a legal ball. Returns whether one was pending.
pub(crate) fn consume(innings: &mut Innings) -> bool {
    std::mem::replace(&mut innings.free_hit_pending, false)
}
