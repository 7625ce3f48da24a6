use serde::{Deserialize, Serialize};

use crate::batting_order::{self, NextBatter};
use crate::error::{Result, ScoringError};
use crate::free_hit;
use crate::innings::{FallOfWicket, Innings, Partnership};
use crate::over::{self, OverCheck};
use crate::strike;
use crate::types::{BallKind, Delivery, DeliveryKind, ExtraKind};

/// Most runs a single ball can add, penalty and overthrows included.
pub const MAX_RUNS_PER_BALL: u32 = 12;

/// One ball as submitted by the scorer. `runs` is left signed so that bad
/// input can be reported rather than wrapped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryRequest {
    pub kind: BallKind,
    #[serde(default)]
    pub runs: Option<i64>,
    #[serde(default)]
    pub striker: Option<String>,
    #[serde(default)]
    pub bowler: Option<String>,
}

impl DeliveryRequest {
    pub fn run(runs: i64) -> Self {
        Self { kind: BallKind::Run, runs: Some(runs), striker: None, bowler: None }
    }

    pub fn wicket() -> Self {
        Self { kind: BallKind::Wicket, runs: None, striker: None, bowler: None }
    }

    pub fn extra(kind: ExtraKind, runs: i64) -> Self {
        Self { kind: BallKind::Extra(kind), runs: Some(runs), striker: None, bowler: None }
    }

    pub fn with_runs(mut self, runs: i64) -> Self {
        self.runs = Some(runs);
        self
    }

    pub fn with_striker(mut self, name: &str) -> Self {
        self.striker = Some(name.to_string());
        self
    }

    pub fn with_bowler(mut self, name: &str) -> Self {
        self.bowler = Some(name.to_string());
        self
    }

    fn resolved_runs(&self) -> Result<u32> {
        let raw = match (self.kind, self.runs) {
            (BallKind::Run, None) => {
                return Err(ScoringError::InvalidRunValue("a scoring ball needs a run count".into()))
            }
            (BallKind::Run, Some(r)) => r,
            (BallKind::Wicket, r) => r.unwrap_or(0),
            (BallKind::Extra(_), r) => r.unwrap_or(1),
        };
        if raw < 0 {
            return Err(ScoringError::InvalidRunValue(format!("{raw} is negative")));
        }
        u32::try_from(raw)
            .ok()
            .filter(|r| *r <= MAX_RUNS_PER_BALL)
            .ok_or_else(|| {
                ScoringError::InvalidRunValue(format!("{raw} is more than {MAX_RUNS_PER_BALL} off one ball"))
            })
    }
}

/// What a single ball did to the innings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BallOutcome {
    pub delivery: Delivery,
    pub runs_added: u32,
    pub dismissed: Option<String>,
    pub dismissal_nullified: bool,
    pub strike_rotated: bool,
    pub over_completed: bool,
    pub all_out: bool,
}

impl BallOutcome {
    fn new(delivery: Delivery) -> Self {
        Self {
            runs_added: delivery.kind.runs(),
            delivery,
            dismissed: None,
            dismissal_nullified: false,
            strike_rotated: false,
            over_completed: false,
            all_out: false,
        }
    }
}

/// Applies one ball to the live innings. Everything is validated before the
/// first mutation, so a rejected ball leaves the innings untouched.
pub fn process(innings: &mut Innings, req: &DeliveryRequest) -> Result<BallOutcome> {
    innings.ensure_open()?;
    let runs = req.resolved_runs()?;

    if let Some(name) = &req.striker {
        innings.available_batter(name)?;
    }
    if let Some(name) = &req.bowler {
        innings.bowler_slot(name).ok_or_else(|| ScoringError::unknown_player(name))?;
    }
    if req.kind == BallKind::Wicket && runs > 0 && !innings.free_hit_pending {
        return Err(ScoringError::InvalidRunValue(format!(
            "{runs} runs on a wicket ball only count on a free hit"
        )));
    }

    if let Some(name) = &req.striker {
        innings.set_striker(name)?;
    }
    if let Some(name) = &req.bowler {
        innings.set_bowler(name)?;
    }

    let outcome = match req.kind {
        BallKind::Run => bat_runs(innings, runs),
        BallKind::Wicket if innings.free_hit_pending => {
            tracing::info!(
                batter = %innings.striker().name,
                "wicket on a free hit — not out"
            );
            let mut outcome = bat_runs(innings, runs);
            outcome.dismissal_nullified = true;
            outcome
        }
        BallKind::Wicket => wicket(innings),
        BallKind::Extra(kind) if kind.is_legal() => legal_extra(innings, kind, runs),
        BallKind::Extra(kind) => illegal_extra(innings, kind, runs),
    };

    tracing::debug!(
        ball = %outcome.delivery.kind,
        score = innings.total_runs,
        wickets = innings.wickets,
        overs = %innings.overs_played(),
        "delivery recorded"
    );
    Ok(outcome)
}

fn delivery_now(innings: &Innings, kind: DeliveryKind, legal: bool, free_hit: bool) -> Delivery {
    Delivery {
        kind,
        striker: innings.striker().name.clone(),
        bowler: innings.current_bowler().to_string(),
        legal,
        free_hit,
    }
}

fn bat_runs(innings: &mut Innings, runs: u32) -> BallOutcome {
    let free_hit = free_hit::consume(innings);
    let delivery = delivery_now(innings, DeliveryKind::Run { runs }, true, free_hit);

    innings.legal_balls += 1;
    innings.total_runs += runs;
    let striker = &mut innings.batters[innings.striker];
    striker.runs += runs;
    striker.balls += 1;
    let figures = innings.bowler_figures_mut();
    figures.runs_conceded += runs;
    figures.legal_balls += 1;
    innings.partnership_runs += runs;
    over::record(innings, delivery.clone());

    let mut outcome = BallOutcome::new(delivery);
    outcome.strike_rotated = strike::rotate_for_runs(innings, runs);
    outcome.over_completed = over::after_legal_ball(innings) != OverCheck::InProgress;
    outcome
}

fn wicket(innings: &mut Innings) -> BallOutcome {
    free_hit::consume(innings);
    let delivery = delivery_now(innings, DeliveryKind::Wicket, true, false);
    let out_name = innings.striker().name.clone();

    innings.legal_balls += 1;
    innings.wickets += 1;
    innings.batters[innings.striker].dismissed = true;
    let figures = innings.bowler_figures_mut();
    figures.wickets += 1;
    figures.legal_balls += 1;
    over::record(innings, delivery.clone());

    innings.fall_of_wickets.push(FallOfWicket {
        wickets: innings.wickets,
        runs: innings.total_runs,
        over: innings.overs_played(),
    });
    innings.partnerships.push(Partnership {
        players: [out_name.clone(), innings.non_striker().name.clone()],
        runs: innings.partnership_runs,
    });
    innings.partnership_runs = 0;

    tracing::info!(
        batter = %out_name,
        bowler = %delivery.bowler,
        fall = %format!("{}-{}", innings.wickets, innings.total_runs),
        "wicket"
    );

    let mut outcome = BallOutcome::new(delivery);
    outcome.dismissed = Some(out_name);
    match batting_order::next_batter(innings) {
        NextBatter::Slot(slot) => {
            // the incoming batter always takes strike
            innings.striker = slot;
            outcome.over_completed = over::after_legal_ball(innings) != OverCheck::InProgress;
        }
        NextBatter::AllOut => {
            tracing::info!(team = %innings.batting_team, "all out — no batters left");
            outcome.all_out = true;
        }
    }
    outcome
}

fn illegal_extra(innings: &mut Innings, kind: ExtraKind, runs: u32) -> BallOutcome {
    let delivery = delivery_now(
        innings,
        DeliveryKind::Extra { kind, runs },
        false,
        innings.free_hit_pending,
    );

    innings.total_runs += runs;
    match kind {
        ExtraKind::Wide => innings.extras.wide += runs,
        _ => innings.extras.no_ball += runs,
    }
    innings.bowler_figures_mut().runs_conceded += runs;
    if kind == ExtraKind::NoBall {
        free_hit::arm(innings);
    }
    over::record(innings, delivery.clone());

    BallOutcome::new(delivery)
}

fn legal_extra(innings: &mut Innings, kind: ExtraKind, runs: u32) -> BallOutcome {
    let free_hit = free_hit::consume(innings);
    let delivery = delivery_now(innings, DeliveryKind::Extra { kind, runs }, true, free_hit);

    innings.total_runs += runs;
    match kind {
        ExtraKind::Bye => innings.extras.bye += runs,
        _ => innings.extras.leg_bye += runs,
    }
    innings.legal_balls += 1;
    innings.bowler_figures_mut().legal_balls += 1;
    over::record(innings, delivery.clone());

    let mut outcome = BallOutcome::new(delivery);
    outcome.strike_rotated = strike::rotate_for_runs(innings, runs);
    outcome.over_completed = over::after_legal_ball(innings) != OverCheck::InProgress;
    outcome
}
