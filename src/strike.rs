use crate::innings::Innings;

/// Exchanges striker and non-striker.
pub fn swap(innings: &mut Innings) {
    std::mem::swap(&mut innings.striker, &mut innings.non_striker);
}

/// Batters cross for odd runs taken on a legal ball. Returns whether they did.
pub(crate) fn rotate_for_runs(innings: &mut Innings, runs: u32) -> bool {
    if runs % 2 == 1 {
        swap(innings);
        true
    } else {
        false
    }
}
