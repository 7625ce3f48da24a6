/// Tests for innings setup, between-ball selection and finalization.
use crate::delivery::{process, DeliveryRequest};
use crate::error::ScoringError;
use crate::innings::{Innings, InningsEndReason, Partnership, MAX_ROSTER};
use crate::types::ExtraKind;

use super::{lions_innings, names};

// ── Setup ────────────────────────────────────────────────────────────────────

#[test]
fn openers_are_first_two_in_roster() {
    let inn = lions_innings();
    assert_eq!(inn.striker().name, "L1");
    assert_eq!(inn.non_striker().name, "L2");
    assert_eq!(inn.current_bowler(), "T1");
    assert_eq!(inn.max_balls(), 42);
    assert_eq!(inn.balls_remaining(), 42);
    assert_eq!(inn.max_wickets(), 5);
    assert_eq!(inn.overs_played(), "0.0");
}

#[test]
fn roster_truncated_to_six() {
    let long = names(&["A", "B", "C", "D", "E", "F", "G", "H"]);
    let inn = Innings::start("Bat", &long, "Bowl", &long, 2).unwrap();
    assert_eq!(inn.batters().len(), MAX_ROSTER);
    assert_eq!(inn.max_wickets(), 5);
}

#[test]
fn zero_overs_rejected() {
    let r = names(&["A", "B"]);
    let err = Innings::start("Bat", &r, "Bowl", &r, 0).unwrap_err();
    assert!(matches!(err, ScoringError::InvalidSetup(_)));
}

#[test]
fn single_batter_rejected() {
    let err = Innings::start("Bat", &names(&["A"]), "Bowl", &names(&["X"]), 5).unwrap_err();
    assert!(matches!(err, ScoringError::InvalidSetup(_)));
}

#[test]
fn empty_bowling_roster_rejected() {
    let err = Innings::start("Bat", &names(&["A", "B"]), "Bowl", &[], 5).unwrap_err();
    assert!(matches!(err, ScoringError::InvalidSetup(_)));
}

// ── Selection ────────────────────────────────────────────────────────────────

#[test]
fn set_bowler_changes_bowler() {
    let mut inn = lions_innings();
    inn.set_bowler("T4").unwrap();
    assert_eq!(inn.current_bowler(), "T4");
}

#[test]
fn set_bowler_unknown_name_rejected() {
    let mut inn = lions_innings();
    let err = inn.set_bowler("Ghost").unwrap_err();
    assert_eq!(err, ScoringError::InvalidReference { name: "Ghost".into() });
    assert_eq!(inn.current_bowler(), "T1");
}

#[test]
fn set_non_striker_to_striker_swaps_ends() {
    let mut inn = lions_innings();
    inn.set_non_striker("L1").unwrap();
    assert_eq!(inn.striker().name, "L2");
    assert_eq!(inn.non_striker().name, "L1");
}

#[test]
fn set_non_striker_brings_in_waiting_batter() {
    let mut inn = lions_innings();
    inn.set_non_striker("L5").unwrap();
    assert_eq!(inn.striker().name, "L1");
    assert_eq!(inn.non_striker().name, "L5");
}

#[test]
fn dismissed_batter_cannot_be_selected() {
    let mut inn = lions_innings();
    process(&mut inn, &DeliveryRequest::wicket()).unwrap();

    let err = inn.set_striker("L1").unwrap_err();
    assert_eq!(err, ScoringError::InvalidReference { name: "L1".into() });
    assert_eq!(inn.striker().name, "L3");
}

// ── Finalize ─────────────────────────────────────────────────────────────────

#[test]
fn finalize_twice_fails() {
    let mut inn = lions_innings();
    inn.finalize(InningsEndReason::Forced).unwrap();
    assert!(inn.is_finalized());
    assert_eq!(inn.finalize(InningsEndReason::Forced).unwrap_err(), ScoringError::AlreadyFinalized);
}

#[test]
fn finalized_innings_rejects_deliveries() {
    let mut inn = lions_innings();
    inn.finalize(InningsEndReason::Forced).unwrap();
    let err = process(&mut inn, &DeliveryRequest::run(1)).unwrap_err();
    assert_eq!(err, ScoringError::InningsClosed);
}

#[test]
fn summary_drops_trailing_empty_over() {
    let mut inn = lions_innings();
    for _ in 0..6 {
        process(&mut inn, &DeliveryRequest::run(1)).unwrap();
    }
    assert_eq!(inn.overs().len(), 2);

    let summary = inn.finalize(InningsEndReason::Forced).unwrap();
    assert_eq!(summary.overs.len(), 1);
    assert_eq!(summary.overs[0].len(), 6);
    assert_eq!(summary.overs_played, "1.0");
}

#[test]
fn summary_keeps_partial_over() {
    let mut inn = lions_innings();
    for _ in 0..8 {
        process(&mut inn, &DeliveryRequest::run(0)).unwrap();
    }
    let summary = inn.finalize(InningsEndReason::Forced).unwrap();
    assert_eq!(summary.overs.len(), 2);
    assert_eq!(summary.overs[1].len(), 2);
    assert_eq!(summary.overs_played, "1.2");
}

#[test]
fn summary_carries_unbroken_partnership() {
    let mut inn = lions_innings();
    process(&mut inn, &DeliveryRequest::run(4)).unwrap();
    process(&mut inn, &DeliveryRequest::wicket()).unwrap();
    process(&mut inn, &DeliveryRequest::run(2)).unwrap();
    process(&mut inn, &DeliveryRequest::extra(ExtraKind::Wide, 1)).unwrap();

    let summary = inn.finalize(InningsEndReason::OversComplete).unwrap();
    assert_eq!(summary.total_runs, 7);
    assert_eq!(summary.wickets, 1);
    assert_eq!(summary.end_reason, InningsEndReason::OversComplete);
    assert_eq!(
        summary.partnerships,
        vec![Partnership { players: ["L1".into(), "L2".into()], runs: 4 }]
    );
    assert_eq!(
        summary.unbroken_partnership,
        Some(Partnership { players: ["L3".into(), "L2".into()], runs: 2 })
    );
}

#[test]
fn summary_records_pending_free_hit() {
    let mut inn = lions_innings();
    process(&mut inn, &DeliveryRequest::extra(ExtraKind::NoBall, 1)).unwrap();
    let summary = inn.finalize(InningsEndReason::Forced).unwrap();
    assert!(summary.free_hit_pending);
    assert_eq!(summary.extras.no_ball, 1);
}
