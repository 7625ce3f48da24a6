mod innings_tests;
mod signal_tests;

use std::collections::HashMap;

use crate::delivery::DeliveryRequest;
use crate::innings::Innings;
use crate::match_engine::{DeliveryOutcome, Match};

pub(crate) fn names(players: &[&str]) -> Vec<String> {
    players.iter().map(|p| p.to_string()).collect()
}

/// Six-a-side rosters for two clubs.
pub(crate) fn rosters() -> HashMap<String, Vec<String>> {
    HashMap::from([
        ("Lions".to_string(), names(&["L1", "L2", "L3", "L4", "L5", "L6"])),
        ("Tigers".to_string(), names(&["T1", "T2", "T3", "T4", "T5", "T6"])),
    ])
}

/// Lions batting against Tigers, seven overs.
pub(crate) fn lions_innings() -> Innings {
    let r = rosters();
    Innings::start("Lions", &r["Lions"], "Tigers", &r["Tigers"], 7).unwrap()
}

pub(crate) fn seven_over_match() -> Match {
    Match::start("Lions", "Tigers", 7, &rosters()).unwrap()
}

pub(crate) fn runs(m: &mut Match, r: i64) -> DeliveryOutcome {
    m.submit_delivery(&DeliveryRequest::run(r)).unwrap()
}

/// Plays `balls` dot balls.
pub(crate) fn dots(m: &mut Match, balls: u32) {
    for _ in 0..balls {
        runs(m, 0);
    }
}
