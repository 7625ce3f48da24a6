use rust_decimal::Decimal;
use serde::Serialize;

use crate::innings::{Extras, FallOfWicket, InningsSummary, Partnership};
use crate::match_engine::{runs_per_over, Match};
use crate::over::format_overs;
use crate::types::Delivery;

/// Runs per hundred balls, two decimals.
pub fn strike_rate(runs: u32, balls: u32) -> Decimal {
    if balls == 0 {
        return Decimal::ZERO;
    }
    (Decimal::from(runs) * Decimal::ONE_HUNDRED / Decimal::from(balls)).round_dp(2)
}

/// Runs conceded per over, two decimals.
pub fn economy(runs_conceded: u32, legal_balls: u32) -> Decimal {
    runs_per_over(runs_conceded, legal_balls).round_dp(2)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatterLine {
    pub name: String,
    pub runs: u32,
    pub balls: u32,
    pub out: bool,
    pub strike_rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BowlerLine {
    pub name: String,
    pub overs: String,
    pub runs: u32,
    pub wickets: u32,
    pub economy: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InningsReport {
    pub batting_team: String,
    pub bowling_team: String,
    pub total_runs: u32,
    pub wickets: u32,
    pub overs_played: String,
    pub batters: Vec<BatterLine>,
    pub bowlers: Vec<BowlerLine>,
    pub extras: Extras,
    pub extras_total: u32,
    pub partnerships: Vec<Partnership>,
    pub fall_of_wickets: Vec<FallOfWicket>,
    pub over_history: Vec<Vec<Delivery>>,
}

impl From<&InningsSummary> for InningsReport {
    fn from(inn: &InningsSummary) -> Self {
        let mut partnerships = inn.partnerships.clone();
        partnerships.extend(inn.unbroken_partnership.clone());

        Self {
            batting_team: inn.batting_team.clone(),
            bowling_team: inn.bowling_team.clone(),
            total_runs: inn.total_runs,
            wickets: inn.wickets,
            overs_played: inn.overs_played.clone(),
            batters: inn
                .batters
                .iter()
                .map(|b| BatterLine {
                    name: b.name.clone(),
                    runs: b.runs,
                    balls: b.balls,
                    out: b.dismissed,
                    strike_rate: strike_rate(b.runs, b.balls),
                })
                .collect(),
            bowlers: inn
                .bowlers
                .iter()
                .map(|b| BowlerLine {
                    name: b.name.clone(),
                    overs: format_overs(b.legal_balls),
                    runs: b.runs_conceded,
                    wickets: b.wickets,
                    economy: economy(b.runs_conceded, b.legal_balls),
                })
                .collect(),
            extras: inn.extras,
            extras_total: inn.extras.total(),
            partnerships,
            fall_of_wickets: inn.fall_of_wickets.clone(),
            over_history: inn.overs.clone(),
        }
    }
}

/// Everything an exporter needs to render a scorecard, built from the
/// finalized innings only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchReport {
    pub team_a: String,
    pub team_b: String,
    pub overs: u32,
    pub innings: Vec<InningsReport>,
    pub winner: String,
}

impl MatchReport {
    /// `None` until at least one innings has been closed.
    pub fn from_match(m: &Match) -> Option<Self> {
        let summaries = m.innings_summaries();
        if summaries.is_empty() {
            return None;
        }
        Some(Self {
            team_a: m.team_a().to_string(),
            team_b: m.team_b().to_string(),
            overs: m.overs_limit(),
            innings: summaries.iter().map(InningsReport::from).collect(),
            winner: m.winner().map(|w| w.to_string()).unwrap_or_default(),
        })
    }

    pub fn file_stem(&self) -> String {
        format!("{}_vs_{}_report", self.team_a, self.team_b).replace(char::is_whitespace, "_")
    }
}
