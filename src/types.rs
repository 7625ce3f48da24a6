use serde::{Deserialize, Serialize};

/// Extra-run categories tracked separately on the scorecard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtraKind {
    Wide,
    NoBall,
    Bye,
    LegBye,
}

impl ExtraKind {
    /// Wides and no-balls are re-bowled; byes and leg-byes count toward the over.
    pub fn is_legal(self) -> bool {
        matches!(self, ExtraKind::Bye | ExtraKind::LegBye)
    }
}

impl std::fmt::Display for ExtraKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtraKind::Wide => write!(f, "wide"),
            ExtraKind::NoBall => write!(f, "noball"),
            ExtraKind::Bye => write!(f, "bye"),
            ExtraKind::LegBye => write!(f, "legbye"),
        }
    }
}

impl std::str::FromStr for ExtraKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "wide" | "wd" => Ok(ExtraKind::Wide),
            "noball" | "no_ball" | "nb" => Ok(ExtraKind::NoBall),
            "bye" | "b" => Ok(ExtraKind::Bye),
            "legbye" | "leg_bye" | "lb" => Ok(ExtraKind::LegBye),
            other => Err(format!("unknown extra kind: {other}")),
        }
    }
}

/// What the scorer says happened on a ball, before validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BallKind {
    Run,
    Wicket,
    Extra(ExtraKind),
}

impl std::str::FromStr for BallKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "run" | "runs" => Ok(BallKind::Run),
            "wicket" | "w" => Ok(BallKind::Wicket),
            other => other.parse::<ExtraKind>().map(BallKind::Extra),
        }
    }
}

/// A recorded ball as it appears in the over history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DeliveryKind {
    Run { runs: u32 },
    Wicket,
    Extra { kind: ExtraKind, runs: u32 },
}

impl DeliveryKind {
    pub fn runs(&self) -> u32 {
        match self {
            DeliveryKind::Run { runs } | DeliveryKind::Extra { runs, .. } => *runs,
            DeliveryKind::Wicket => 0,
        }
    }
}

impl std::fmt::Display for DeliveryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeliveryKind::Run { runs } => write!(f, "{runs}"),
            DeliveryKind::Wicket => write!(f, "W"),
            DeliveryKind::Extra { kind, runs } => write!(f, "{kind}+{runs}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delivery {
    #[serde(flatten)]
    pub kind: DeliveryKind,
    pub striker: String,
    pub bowler: String,
    pub legal: bool,
    pub free_hit: bool,
}

/// Raw ball signal typed at the scorer's terminal or posted to `/api/signal`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BallSignal {
    Runs(u8),         // 0..6
    Wicket(u8),       // W (0 runs), W1..W6 (runs taken on a free-hit wicket ball)
    Wide(u8),         // Wd, Wd1..Wd6 — runs beyond the one-run penalty
    NoBall(u8),       // N, N1..N6 — runs beyond the one-run penalty
    Bye(u8),          // B1..B6
    LegBye(u8),       // LB1..LB6
    SwapStrike,       // SW
    InningsOver,      // IO — close the innings now
    MatchOver,        // MO — stop everything
}

impl BallSignal {
    pub fn is_wicket(&self) -> bool {
        matches!(self, Self::Wicket(_))
    }

    /// Parse a raw string into a ball signal.
    /// Formats: "0".."6", "W","W0".."W6", "Wd","Wd0".."Wd6", "N","N0".."N6",
    /// "B","B1".."B6", "LB","LB1".."LB6", "SW", "IO", "MO"
    pub fn parse(raw: &str) -> Option<Self> {
        let s = raw.trim();
        match s {
            "IO" => Some(Self::InningsOver),
            "MO" => Some(Self::MatchOver),
            "SW" => Some(Self::SwapStrike),
            "W" => Some(Self::Wicket(0)),
            "N" => Some(Self::NoBall(0)),
            "Wd" => Some(Self::Wide(0)),
            "B" => Some(Self::Bye(1)),
            "LB" => Some(Self::LegBye(1)),
            _ if s.starts_with("Wd") => {
                let runs: u8 = s.strip_prefix("Wd")?.parse().ok()?;
                if runs <= 6 { Some(Self::Wide(runs)) } else { None }
            }
            _ if s.starts_with("LB") => {
                let runs: u8 = s.strip_prefix("LB")?.parse().ok()?;
                if (1..=6).contains(&runs) { Some(Self::LegBye(runs)) } else { None }
            }
            _ if s.starts_with('W') => {
                let runs: u8 = s.strip_prefix('W')?.parse().ok()?;
                if runs <= 6 { Some(Self::Wicket(runs)) } else { None }
            }
            _ if s.starts_with('N') => {
                let runs: u8 = s.strip_prefix('N')?.parse().ok()?;
                if runs <= 6 { Some(Self::NoBall(runs)) } else { None }
            }
            _ if s.starts_with('B') => {
                let runs: u8 = s.strip_prefix('B')?.parse().ok()?;
                if (1..=6).contains(&runs) { Some(Self::Bye(runs)) } else { None }
            }
            _ => {
                let runs: u8 = s.parse().ok()?;
                if runs <= 6 { Some(Self::Runs(runs)) } else { None }
            }
        }
    }
}

impl std::fmt::Display for BallSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Runs(r) => write!(f, "{r}"),
            Self::Wicket(0) => write!(f, "W"),
            Self::Wicket(r) => write!(f, "W{r}"),
            Self::Wide(0) => write!(f, "Wd"),
            Self::Wide(r) => write!(f, "Wd{r}"),
            Self::NoBall(0) => write!(f, "N"),
            Self::NoBall(r) => write!(f, "N{r}"),
            Self::Bye(r) => write!(f, "B{r}"),
            Self::LegBye(r) => write!(f, "LB{r}"),
            Self::SwapStrike => write!(f, "SW"),
            Self::InningsOver => write!(f, "IO"),
            Self::MatchOver => write!(f, "MO"),
        }
    }
}
