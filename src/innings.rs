use serde::{Deserialize, Serialize};

use crate::error::{Result, ScoringError};
use crate::over::{self, BALLS_PER_OVER};
use crate::types::Delivery;

/// Only the first six names of a roster take part in an innings.
pub const MAX_ROSTER: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batter {
    pub name: String,
    pub runs: u32,
    pub balls: u32,
    pub dismissed: bool,
}

impl Batter {
    fn new(name: &str) -> Self {
        Self { name: name.to_string(), runs: 0, balls: 0, dismissed: false }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BowlerFigures {
    pub name: String,
    pub legal_balls: u32,
    pub runs_conceded: u32,
    pub wickets: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extras {
    pub wide: u32,
    pub no_ball: u32,
    pub bye: u32,
    pub leg_bye: u32,
}

impl Extras {
    pub fn total(&self) -> u32 {
        self.wide + self.no_ball + self.bye + self.leg_bye
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partnership {
    pub players: [String; 2],
    pub runs: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallOfWicket {
    pub wickets: u32,
    pub runs: u32,
    pub over: String,
}

/// How an innings came to an end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InningsEndReason {
    OversComplete,
    /// Wicket count reached roster size − 1.
    AllOut,
    /// A wicket fell and nobody was left to come in.
    RosterExhausted,
    TargetReached,
    Forced,
    Abandoned,
}

/// Live state of the innings currently being scored.
///
/// Striker, non-striker and current bowler are slot indices: the first two
/// into `batters`, the last into `bowling_roster`. Bowling figures are
/// created the first time a bowler delivers a ball.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Innings {
    pub(crate) batting_team: String,
    pub(crate) bowling_team: String,
    pub(crate) overs_limit: u32,
    pub(crate) batters: Vec<Batter>,
    pub(crate) bowling_roster: Vec<String>,
    pub(crate) bowlers: Vec<BowlerFigures>,
    pub(crate) striker: usize,
    pub(crate) non_striker: usize,
    pub(crate) current_bowler: usize,
    pub(crate) total_runs: u32,
    pub(crate) wickets: u32,
    pub(crate) legal_balls: u32,
    pub(crate) extras: Extras,
    pub(crate) overs: Vec<Vec<Delivery>>,
    pub(crate) partnership_runs: u32,
    pub(crate) partnerships: Vec<Partnership>,
    pub(crate) fall_of_wickets: Vec<FallOfWicket>,
    pub(crate) free_hit_pending: bool,
    pub(crate) overs_completed: u32,
    pub(crate) finalized: bool,
}

impl Innings {
    /// Fresh innings with the first two roster entries opening the batting.
    pub fn start(
        batting_team: &str,
        roster: &[String],
        bowling_team: &str,
        bowling_roster: &[String],
        overs_limit: u32,
    ) -> Result<Self> {
        if overs_limit == 0 {
            return Err(ScoringError::InvalidSetup("overs limit must be at least 1".into()));
        }
        let batters: Vec<Batter> = roster.iter().take(MAX_ROSTER).map(|n| Batter::new(n)).collect();
        if batters.len() < 2 {
            return Err(ScoringError::InvalidSetup(format!(
                "{batting_team} needs at least two batters"
            )));
        }
        let bowling_roster: Vec<String> = bowling_roster.iter().take(MAX_ROSTER).cloned().collect();
        if bowling_roster.is_empty() {
            return Err(ScoringError::InvalidSetup(format!("{bowling_team} has no bowlers")));
        }

        Ok(Self {
            batting_team: batting_team.to_string(),
            bowling_team: bowling_team.to_string(),
            overs_limit,
            batters,
            bowling_roster,
            bowlers: Vec::new(),
            striker: 0,
            non_striker: 1,
            current_bowler: 0,
            total_runs: 0,
            wickets: 0,
            legal_balls: 0,
            extras: Extras::default(),
            overs: Vec::new(),
            partnership_runs: 0,
            partnerships: Vec::new(),
            fall_of_wickets: Vec::new(),
            free_hit_pending: false,
            overs_completed: 0,
            finalized: false,
        })
    }

    pub fn batting_team(&self) -> &str {
        &self.batting_team
    }

    pub fn bowling_team(&self) -> &str {
        &self.bowling_team
    }

    pub fn overs_limit(&self) -> u32 {
        self.overs_limit
    }

    pub fn total_runs(&self) -> u32 {
        self.total_runs
    }

    pub fn wickets(&self) -> u32 {
        self.wickets
    }

    pub fn legal_balls(&self) -> u32 {
        self.legal_balls
    }

    pub fn extras(&self) -> &Extras {
        &self.extras
    }

    pub fn batters(&self) -> &[Batter] {
        &self.batters
    }

    pub fn bowlers(&self) -> &[BowlerFigures] {
        &self.bowlers
    }

    pub fn overs(&self) -> &[Vec<Delivery>] {
        &self.overs
    }

    pub fn partnership_runs(&self) -> u32 {
        self.partnership_runs
    }

    pub fn partnerships(&self) -> &[Partnership] {
        &self.partnerships
    }

    pub fn fall_of_wickets(&self) -> &[FallOfWicket] {
        &self.fall_of_wickets
    }

    pub fn is_free_hit(&self) -> bool {
        self.free_hit_pending
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    pub fn striker(&self) -> &Batter {
        &self.batters[self.striker]
    }

    pub fn non_striker(&self) -> &Batter {
        &self.batters[self.non_striker]
    }

    pub fn current_bowler(&self) -> &str {
        &self.bowling_roster[self.current_bowler]
    }

    pub fn max_balls(&self) -> u32 {
        self.overs_limit * BALLS_PER_OVER
    }

    pub fn balls_remaining(&self) -> u32 {
        self.max_balls().saturating_sub(self.legal_balls)
    }

    /// Highest wicket count the roster allows: one batter is always left
    /// without a partner.
    pub fn max_wickets(&self) -> u32 {
        self.batters.len() as u32 - 1
    }

    pub fn overs_exhausted(&self) -> bool {
        self.legal_balls >= self.max_balls()
    }

    pub fn wickets_exhausted(&self) -> bool {
        self.wickets >= self.max_wickets()
    }

    pub fn overs_played(&self) -> String {
        over::format_overs(self.legal_balls)
    }

    pub(crate) fn batter_slot(&self, name: &str) -> Option<usize> {
        self.batters.iter().position(|b| b.name == name)
    }

    pub(crate) fn bowler_slot(&self, name: &str) -> Option<usize> {
        self.bowling_roster.iter().position(|b| b == name)
    }

    /// Figures for the current bowler, created on first use.
    pub(crate) fn bowler_figures_mut(&mut self) -> &mut BowlerFigures {
        let name = &self.bowling_roster[self.current_bowler];
        let idx = match self.bowlers.iter().position(|b| &b.name == name) {
            Some(idx) => idx,
            None => {
                self.bowlers.push(BowlerFigures {
                    name: name.clone(),
                    legal_balls: 0,
                    runs_conceded: 0,
                    wickets: 0,
                });
                self.bowlers.len() - 1
            }
        };
        &mut self.bowlers[idx]
    }

    /// Between-ball bowler change.
    pub fn set_bowler(&mut self, name: &str) -> Result<()> {
        let slot = self.bowler_slot(name).ok_or_else(|| ScoringError::unknown_player(name))?;
        self.current_bowler = slot;
        Ok(())
    }

    /// Puts a named batter on strike. Naming the non-striker swaps ends;
    /// naming a batter who is not at the crease replaces the striker.
    pub fn set_striker(&mut self, name: &str) -> Result<()> {
        let slot = self.available_batter(name)?;
        if slot == self.non_striker {
            std::mem::swap(&mut self.striker, &mut self.non_striker);
        } else {
            self.striker = slot;
        }
        Ok(())
    }

    /// Mirror of [`Innings::set_striker`] for the non-striker's end.
    pub fn set_non_striker(&mut self, name: &str) -> Result<()> {
        let slot = self.available_batter(name)?;
        if slot == self.striker {
            std::mem::swap(&mut self.striker, &mut self.non_striker);
        } else {
            self.non_striker = slot;
        }
        Ok(())
    }

    pub(crate) fn available_batter(&self, name: &str) -> Result<usize> {
        match self.batter_slot(name) {
            Some(slot) if !self.batters[slot].dismissed => Ok(slot),
            _ => Err(ScoringError::unknown_player(name)),
        }
    }

    pub(crate) fn ensure_open(&self) -> Result<()> {
        if self.finalized || self.overs_exhausted() || self.wickets_exhausted() {
            return Err(ScoringError::InningsClosed);
        }
        Ok(())
    }

    /// Crease and bowler slots must point into their rosters. Only a hand
    /// edited or truncated snapshot can break this.
    pub(crate) fn check_slots(&self) -> Result<()> {
        let batters = self.batters.len();
        let corrupt = |what: String| -> Result<()> {
            Err(ScoringError::InvalidSetup(format!("corrupt snapshot: {what}")))
        };
        if batters < 2 {
            return corrupt(format!("{} has {batters} batters", self.batting_team));
        }
        if self.striker >= batters || self.non_striker >= batters {
            return corrupt(format!(
                "crease slots {}/{} outside {batters} batters",
                self.striker, self.non_striker
            ));
        }
        if self.striker == self.non_striker {
            return corrupt("striker and non-striker are the same batter".into());
        }
        if self.current_bowler >= self.bowling_roster.len() {
            return corrupt(format!(
                "bowler slot {} outside {} bowlers",
                self.current_bowler,
                self.bowling_roster.len()
            ));
        }
        Ok(())
    }

    /// Closes the innings and hands back its immutable scorecard. Can only
    /// happen once.
    pub fn finalize(&mut self, reason: InningsEndReason) -> Result<InningsSummary> {
        if self.finalized {
            return Err(ScoringError::AlreadyFinalized);
        }
        self.finalized = true;

        let mut overs = self.overs.clone();
        if overs.last().is_some_and(|o| o.is_empty()) {
            overs.pop();
        }

        let unbroken_partnership = (!self.batters[self.striker].dismissed
            && !self.batters[self.non_striker].dismissed)
            .then(|| Partnership {
                players: [
                    self.batters[self.striker].name.clone(),
                    self.batters[self.non_striker].name.clone(),
                ],
                runs: self.partnership_runs,
            });

        tracing::info!(
            team = %self.batting_team,
            runs = self.total_runs,
            wickets = self.wickets,
            overs = %self.overs_played(),
            ?reason,
            "innings finalized"
        );

        Ok(InningsSummary {
            batting_team: self.batting_team.clone(),
            bowling_team: self.bowling_team.clone(),
            total_runs: self.total_runs,
            wickets: self.wickets,
            legal_balls: self.legal_balls,
            overs_played: self.overs_played(),
            batters: self.batters.clone(),
            bowlers: self.bowlers.clone(),
            overs,
            extras: self.extras,
            partnerships: self.partnerships.clone(),
            unbroken_partnership,
            fall_of_wickets: self.fall_of_wickets.clone(),
            free_hit_pending: self.free_hit_pending,
            end_reason: reason,
        })
    }
}

/// Scorecard of a completed innings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InningsSummary {
    pub batting_team: String,
    pub bowling_team: String,
    pub total_runs: u32,
    pub wickets: u32,
    pub legal_balls: u32,
    pub overs_played: String,
    pub batters: Vec<Batter>,
    pub bowlers: Vec<BowlerFigures>,
    pub overs: Vec<Vec<Delivery>>,
    pub extras: Extras,
    pub partnerships: Vec<Partnership>,
    pub unbroken_partnership: Option<Partnership>,
    pub fall_of_wickets: Vec<FallOfWicket>,
    pub free_hit_pending: bool,
    pub end_reason: InningsEndReason,
}
