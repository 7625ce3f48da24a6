use crate::innings::Innings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextBatter {
    /// Roster slot of the incoming batter.
    Slot(usize),
    AllOut,
}

/// First batter in roster order who is not out and not already at the crease.
pub fn next_batter(innings: &Innings) -> NextBatter {
    innings
        .batters
        .iter()
        .enumerate()
        .find(|(slot, b)| !b.dismissed && *slot != innings.striker && *slot != innings.non_striker)
        .map_or(NextBatter::AllOut, |(slot, _)| NextBatter::Slot(slot))
}
