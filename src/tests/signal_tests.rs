/// Tests for BallSignal parsing and mapping signals onto scoring commands.
use crate::delivery::DeliveryRequest;
use crate::scorer::Command;
use crate::types::{BallKind, BallSignal, ExtraKind};

// ── BallSignal::parse ─────────────────────────────────────────────────────────

#[test]
fn parse_runs_zero_to_six() {
    for r in 0u8..=6 {
        let s = r.to_string();
        assert_eq!(BallSignal::parse(&s), Some(BallSignal::Runs(r)), "failed for {r}");
    }
}

#[test]
fn parse_runs_out_of_range_returns_none() {
    assert_eq!(BallSignal::parse("7"), None);
    assert_eq!(BallSignal::parse("99"), None);
}

#[test]
fn parse_wicket_plain_and_with_runs() {
    assert_eq!(BallSignal::parse("W"), Some(BallSignal::Wicket(0)));
    assert_eq!(BallSignal::parse("W2"), Some(BallSignal::Wicket(2)));
    assert_eq!(BallSignal::parse("W7"), None);
}

#[test]
fn parse_wide_is_not_mistaken_for_wicket() {
    assert_eq!(BallSignal::parse("Wd"), Some(BallSignal::Wide(0)));
    assert_eq!(BallSignal::parse("Wd4"), Some(BallSignal::Wide(4)));
}

#[test]
fn parse_no_ball_with_runs() {
    assert_eq!(BallSignal::parse("N"), Some(BallSignal::NoBall(0)));
    assert_eq!(BallSignal::parse("N6"), Some(BallSignal::NoBall(6)));
}

#[test]
fn parse_byes_and_leg_byes() {
    assert_eq!(BallSignal::parse("B"), Some(BallSignal::Bye(1)));
    assert_eq!(BallSignal::parse("B4"), Some(BallSignal::Bye(4)));
    assert_eq!(BallSignal::parse("LB"), Some(BallSignal::LegBye(1)));
    assert_eq!(BallSignal::parse("LB3"), Some(BallSignal::LegBye(3)));
    assert_eq!(BallSignal::parse("B0"), None, "a bye must carry at least one run");
    assert_eq!(BallSignal::parse("LB9"), None);
}

#[test]
fn parse_commands() {
    assert_eq!(BallSignal::parse("SW"), Some(BallSignal::SwapStrike));
    assert_eq!(BallSignal::parse("IO"), Some(BallSignal::InningsOver));
    assert_eq!(BallSignal::parse("MO"), Some(BallSignal::MatchOver));
}

#[test]
fn parse_garbage_returns_none() {
    assert_eq!(BallSignal::parse(""), None);
    assert_eq!(BallSignal::parse("X"), None);
    assert_eq!(BallSignal::parse("WICKET"), None);
    assert_eq!(BallSignal::parse("-1"), None);
    assert_eq!(BallSignal::parse("W99"), None);
}

#[test]
fn parse_trims_whitespace() {
    assert_eq!(BallSignal::parse("  W  "), Some(BallSignal::Wicket(0)));
    assert_eq!(BallSignal::parse(" LB2 "), Some(BallSignal::LegBye(2)));
    assert_eq!(BallSignal::parse(" 4 "), Some(BallSignal::Runs(4)));
}

#[test]
fn display_parses_back_to_the_same_signal() {
    let signals = vec![
        BallSignal::Runs(0),
        BallSignal::Wicket(0),
        BallSignal::Wicket(4),
        BallSignal::Wide(0),
        BallSignal::NoBall(3),
        BallSignal::Bye(2),
        BallSignal::LegBye(1),
        BallSignal::SwapStrike,
        BallSignal::InningsOver,
        BallSignal::MatchOver,
    ];
    for sig in signals {
        let s = format!("{sig}");
        assert_eq!(BallSignal::parse(&s), Some(sig.clone()), "display→parse failed for {s}");
    }
}

#[test]
fn wicket_is_detected_by_is_wicket() {
    assert!(BallSignal::Wicket(0).is_wicket());
    assert!(!BallSignal::Runs(4).is_wicket());
    assert!(!BallSignal::Wide(0).is_wicket());
}

// ── Command mapping ───────────────────────────────────────────────────────────

#[test]
fn wide_and_no_ball_signals_add_the_penalty_run() {
    assert_eq!(
        Command::from(&BallSignal::Wide(0)),
        Command::Deliver(DeliveryRequest::extra(ExtraKind::Wide, 1))
    );
    assert_eq!(
        Command::from(&BallSignal::NoBall(4)),
        Command::Deliver(DeliveryRequest::extra(ExtraKind::NoBall, 5))
    );
}

#[test]
fn bye_signal_carries_runs_as_is() {
    assert_eq!(
        Command::from(&BallSignal::LegBye(2)),
        Command::Deliver(DeliveryRequest::extra(ExtraKind::LegBye, 2))
    );
}

#[test]
fn wicket_signal_carries_continuation_runs() {
    let Command::Deliver(req) = Command::from(&BallSignal::Wicket(2)) else {
        panic!("expected a delivery");
    };
    assert_eq!(req.kind, BallKind::Wicket);
    assert_eq!(req.runs, Some(2));
}

#[test]
fn control_signals_map_to_commands() {
    assert_eq!(Command::from(&BallSignal::SwapStrike), Command::SwapStrike);
    assert_eq!(Command::from(&BallSignal::InningsOver), Command::EndInnings);
    assert_eq!(Command::from(&BallSignal::MatchOver), Command::EndMatch);
}

// ── BallKind::from_str ────────────────────────────────────────────────────────

#[test]
fn ball_kind_parses_api_names() {
    assert_eq!("run".parse::<BallKind>(), Ok(BallKind::Run));
    assert_eq!("Wicket".parse::<BallKind>(), Ok(BallKind::Wicket));
    assert_eq!("noball".parse::<BallKind>(), Ok(BallKind::Extra(ExtraKind::NoBall)));
    assert_eq!("legbye".parse::<BallKind>(), Ok(BallKind::Extra(ExtraKind::LegBye)));
    assert!("googly".parse::<BallKind>().is_err());
}
