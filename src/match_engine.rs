use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::delivery::{self, BallOutcome, DeliveryRequest};
use crate::error::{Result, ScoringError};
use crate::innings::{Innings, InningsEndReason, InningsSummary};
use crate::over::BALLS_PER_OVER;
use crate::roster::RosterLookup;
use crate::strike;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPhase {
    NotStarted,
    Innings1InProgress,
    Innings2InProgress,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Winner {
    Team { name: String },
    Tie,
    /// Target reached in the second innings.
    Chase { team: String, balls_remaining: u32 },
    Incomplete,
}

impl std::fmt::Display for Winner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Winner::Team { name } => write!(f, "{name}"),
            Winner::Tie => write!(f, "Tie"),
            Winner::Chase { team, balls_remaining } => {
                write!(f, "{team} won by {balls_remaining} balls remaining")
            }
            Winner::Incomplete => write!(f, "Incomplete"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub winner: Winner,
    pub innings: Vec<InningsSummary>,
}

/// Second-innings chase arithmetic. `required_rate` is exact; use
/// [`ChaseStatus::display_rate`] for the two-decimal figure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChaseStatus {
    pub target: u32,
    pub runs_needed: u32,
    pub balls_left: u32,
    pub required_rate: Decimal,
}

impl ChaseStatus {
    pub fn display_rate(&self) -> Decimal {
        self.required_rate.round_dp(2)
    }
}

/// Runs per six legal balls; zero before any ball is bowled.
pub fn runs_per_over(runs: u32, balls: u32) -> Decimal {
    if balls == 0 {
        return Decimal::ZERO;
    }
    Decimal::from(runs) * Decimal::from(BALLS_PER_OVER) / Decimal::from(balls)
}

/// Emitted when a command closes an innings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InningsClosed {
    pub summary: InningsSummary,
    /// Present when the closed innings was the last one.
    pub result: Option<MatchResult>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryOutcome {
    pub ball: BallOutcome,
    pub innings_closed: Option<InningsClosed>,
}

impl DeliveryOutcome {
    pub fn result(&self) -> Option<&MatchResult> {
        self.innings_closed.as_ref().and_then(|c| c.result.as_ref())
    }
}

/// One two-innings match. The first named team bats first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    team_a: String,
    team_b: String,
    team_a_roster: Vec<String>,
    team_b_roster: Vec<String>,
    overs_limit: u32,
    phase: MatchPhase,
    innings: Vec<InningsSummary>,
    live: Option<Innings>,
    target: Option<u32>,
    winner: Option<Winner>,
}

impl Default for Match {
    fn default() -> Self {
        Self {
            team_a: String::new(),
            team_b: String::new(),
            team_a_roster: Vec::new(),
            team_b_roster: Vec::new(),
            overs_limit: 0,
            phase: MatchPhase::NotStarted,
            innings: Vec::new(),
            live: None,
            target: None,
            winner: None,
        }
    }
}

impl Match {
    pub fn start(
        team_a: &str,
        team_b: &str,
        overs_limit: u32,
        rosters: &impl RosterLookup,
    ) -> Result<Self> {
        let (team_a, team_b) = (team_a.trim(), team_b.trim());
        if team_a.is_empty() || team_b.is_empty() {
            return Err(ScoringError::InvalidSetup("select both teams".into()));
        }
        if team_a == team_b {
            return Err(ScoringError::InvalidSetup("teams must be different".into()));
        }
        let team_a_roster = rosters
            .roster(team_a)
            .ok_or_else(|| ScoringError::UnknownTeam(team_a.to_string()))?;
        let team_b_roster = rosters
            .roster(team_b)
            .ok_or_else(|| ScoringError::UnknownTeam(team_b.to_string()))?;

        // validates both rosters up front so the second innings cannot fail to start
        Innings::start(team_b, &team_b_roster, team_a, &team_a_roster, overs_limit)?;
        let first = Innings::start(team_a, &team_a_roster, team_b, &team_b_roster, overs_limit)?;

        tracing::info!(team_a, team_b, overs_limit, "match started — {team_a} batting");

        Ok(Self {
            team_a: team_a.to_string(),
            team_b: team_b.to_string(),
            team_a_roster,
            team_b_roster,
            overs_limit,
            phase: MatchPhase::Innings1InProgress,
            innings: Vec::new(),
            live: Some(first),
            target: None,
            winner: None,
        })
    }

    /// Checks a deserialized match before it replaces the live one: the
    /// live innings exists exactly while one is in progress, and its slots
    /// are in range.
    pub fn validate_snapshot(&self) -> Result<()> {
        let expected_done = match self.phase {
            MatchPhase::Innings1InProgress => Some(0),
            MatchPhase::Innings2InProgress => Some(1),
            MatchPhase::NotStarted | MatchPhase::Completed => None,
        };
        match (&self.live, expected_done) {
            (Some(live), Some(done)) if self.innings.len() == done => live.check_slots(),
            (None, None) => Ok(()),
            _ => Err(ScoringError::InvalidSetup(format!(
                "corrupt snapshot: {:?} with {} closed innings and live innings {}",
                self.phase,
                self.innings.len(),
                if self.live.is_some() { "present" } else { "missing" }
            ))),
        }
    }

    pub fn team_a(&self) -> &str {
        &self.team_a
    }

    pub fn team_b(&self) -> &str {
        &self.team_b
    }

    pub fn overs_limit(&self) -> u32 {
        self.overs_limit
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    /// 0 before the match, then 1 or 2.
    pub fn current_innings(&self) -> u8 {
        match self.phase {
            MatchPhase::NotStarted => 0,
            MatchPhase::Innings1InProgress => 1,
            MatchPhase::Innings2InProgress => 2,
            MatchPhase::Completed => self.innings.len() as u8,
        }
    }

    pub fn live_innings(&self) -> Option<&Innings> {
        self.live.as_ref()
    }

    pub fn innings_summaries(&self) -> &[InningsSummary] {
        &self.innings
    }

    pub fn target(&self) -> Option<u32> {
        self.target
    }

    pub fn winner(&self) -> Option<&Winner> {
        self.winner.as_ref()
    }

    pub fn is_complete(&self) -> bool {
        self.phase == MatchPhase::Completed
    }

    pub fn result(&self) -> Option<MatchResult> {
        self.winner.as_ref().map(|winner| MatchResult {
            winner: winner.clone(),
            innings: self.innings.clone(),
        })
    }

    pub fn bowling_roster(&self) -> &[String] {
        match self.phase {
            MatchPhase::Innings2InProgress => &self.team_a_roster,
            _ => &self.team_b_roster,
        }
    }

    pub fn run_rate(&self) -> Option<Decimal> {
        self.live.as_ref().map(|inn| runs_per_over(inn.total_runs(), inn.legal_balls()))
    }

    /// Only meaningful while the second innings is live.
    pub fn chase(&self) -> Option<ChaseStatus> {
        if self.phase != MatchPhase::Innings2InProgress {
            return None;
        }
        let target = self.target?;
        let live = self.live.as_ref()?;
        let runs_needed = target.saturating_sub(live.total_runs());
        let balls_left = live.balls_remaining();
        let required_rate = if balls_left > 0 {
            runs_per_over(runs_needed, balls_left)
        } else {
            Decimal::ZERO
        };
        Some(ChaseStatus { target, runs_needed, balls_left, required_rate })
    }

    fn live_mut(&mut self) -> Result<&mut Innings> {
        match self.phase {
            MatchPhase::NotStarted => Err(ScoringError::MatchNotStarted),
            MatchPhase::Completed => Err(ScoringError::MatchAlreadyComplete),
            _ => self.live.as_mut().ok_or(ScoringError::InningsClosed),
        }
    }

    /// Scores one ball, then closes the innings or the match if the ball
    /// ended either.
    pub fn submit_delivery(&mut self, req: &DeliveryRequest) -> Result<DeliveryOutcome> {
        let ball = delivery::process(self.live_mut()?, req)?;
        let innings_closed = self.check_termination(ball.all_out)?;
        Ok(DeliveryOutcome { ball, innings_closed })
    }

    fn check_termination(&mut self, all_out: bool) -> Result<Option<InningsClosed>> {
        let Some(live) = self.live.as_ref() else {
            return Ok(None);
        };

        if self.phase == MatchPhase::Innings2InProgress
            && self.target.is_some_and(|t| live.total_runs() >= t)
        {
            let winner = Winner::Chase {
                team: live.batting_team().to_string(),
                balls_remaining: live.balls_remaining(),
            };
            return self.close_innings(InningsEndReason::TargetReached, Some(winner)).map(Some);
        }

        let reason = if all_out {
            Some(InningsEndReason::RosterExhausted)
        } else if live.overs_exhausted() {
            Some(InningsEndReason::OversComplete)
        } else if live.wickets_exhausted() {
            Some(InningsEndReason::AllOut)
        } else {
            None
        };
        match reason {
            Some(reason) => self.close_innings(reason, None).map(Some),
            None => Ok(None),
        }
    }

    fn close_innings(
        &mut self,
        reason: InningsEndReason,
        winner: Option<Winner>,
    ) -> Result<InningsClosed> {
        let next = match self.phase {
            MatchPhase::Innings1InProgress => Some(Innings::start(
                &self.team_b,
                &self.team_b_roster,
                &self.team_a,
                &self.team_a_roster,
                self.overs_limit,
            )?),
            _ => None,
        };
        let live = self.live.as_mut().ok_or(ScoringError::InningsClosed)?;
        let summary = live.finalize(reason)?;
        self.innings.push(summary.clone());
        self.live = next;

        if self.phase == MatchPhase::Innings1InProgress {
            let target = *self.target.get_or_insert(summary.total_runs + 1);
            self.phase = MatchPhase::Innings2InProgress;
            tracing::info!(
                batting = %self.team_b,
                target,
                "second innings started"
            );
            return Ok(InningsClosed { summary, result: None });
        }

        let winner = winner.unwrap_or_else(|| self.winner_by_totals());
        Ok(InningsClosed { summary, result: Some(self.complete(winner)) })
    }

    fn complete(&mut self, winner: Winner) -> MatchResult {
        tracing::info!(result = %winner, "match complete");
        self.phase = MatchPhase::Completed;
        self.live = None;
        self.winner = Some(winner.clone());
        MatchResult { winner, innings: self.innings.clone() }
    }

    fn winner_by_totals(&self) -> Winner {
        match (self.innings.first(), self.innings.get(1)) {
            (Some(first), Some(second)) => match first.total_runs.cmp(&second.total_runs) {
                std::cmp::Ordering::Greater => Winner::Team { name: first.batting_team.clone() },
                std::cmp::Ordering::Less => Winner::Team { name: second.batting_team.clone() },
                std::cmp::Ordering::Equal => Winner::Tie,
            },
            _ => Winner::Incomplete,
        }
    }

    pub fn manual_swap_strike(&mut self) -> Result<()> {
        let live = self.live_mut()?;
        live.ensure_open()?;
        strike::swap(live);
        Ok(())
    }

    pub fn set_bowler(&mut self, name: &str) -> Result<()> {
        self.live_mut()?.set_bowler(name)
    }

    pub fn set_striker(&mut self, name: &str) -> Result<()> {
        self.live_mut()?.set_striker(name)
    }

    pub fn set_non_striker(&mut self, name: &str) -> Result<()> {
        self.live_mut()?.set_non_striker(name)
    }

    /// Scorer's manual override: close the live innings where it stands.
    pub fn end_innings_now(&mut self) -> Result<InningsClosed> {
        self.live_mut()?;
        tracing::info!(innings = self.current_innings(), "innings ended by scorer");
        self.close_innings(InningsEndReason::Forced, None)
    }

    /// Stops the match. Any live innings is closed where it stands; with
    /// only one innings on the card the result is `Incomplete`.
    pub fn abandon(&mut self) -> Result<MatchResult> {
        let live = self.live_mut()?;
        let summary = live.finalize(InningsEndReason::Abandoned)?;
        self.innings.push(summary);
        let winner = self.winner_by_totals();
        Ok(self.complete(winner))
    }
}
