use std::sync::Arc;

use serde::Serialize;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::delivery::DeliveryRequest;
use crate::error::ScoringError;
use crate::match_engine::{DeliveryOutcome, InningsClosed, MatchResult};
use crate::state::AppState;
use crate::types::{BallSignal, ExtraKind};

/// A scoring command, whichever surface it arrived on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Deliver(DeliveryRequest),
    SwapStrike,
    EndInnings,
    EndMatch,
}

impl From<&BallSignal> for Command {
    fn from(signal: &BallSignal) -> Self {
        match *signal {
            BallSignal::Runs(r) => Command::Deliver(DeliveryRequest::run(r.into())),
            BallSignal::Wicket(r) => Command::Deliver(DeliveryRequest::wicket().with_runs(r.into())),
            // wide and no-ball signals carry runs beyond the one-run penalty
            BallSignal::Wide(r) => {
                Command::Deliver(DeliveryRequest::extra(ExtraKind::Wide, i64::from(r) + 1))
            }
            BallSignal::NoBall(r) => {
                Command::Deliver(DeliveryRequest::extra(ExtraKind::NoBall, i64::from(r) + 1))
            }
            BallSignal::Bye(r) => Command::Deliver(DeliveryRequest::extra(ExtraKind::Bye, r.into())),
            BallSignal::LegBye(r) => {
                Command::Deliver(DeliveryRequest::extra(ExtraKind::LegBye, r.into()))
            }
            BallSignal::SwapStrike => Command::SwapStrike,
            BallSignal::InningsOver => Command::EndInnings,
            BallSignal::MatchOver => Command::EndMatch,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CommandOutcome {
    Delivery { outcome: DeliveryOutcome },
    StrikeSwapped,
    InningsClosed { closed: InningsClosed },
    MatchOver { result: MatchResult },
}

/// Applies one command to the shared match, records it in the event log,
/// and autosaves. A rejected command changes nothing.
pub fn apply(app: &AppState, command: Command) -> Result<CommandOutcome, ScoringError> {
    let mut scorecard = app.scorecard.write().unwrap();

    let outcome = match command {
        Command::Deliver(req) => {
            let outcome = scorecard.submit_delivery(&req)?;
            let ball = &outcome.ball;
            app.push_event("ball", &format!(
                "{} — {} to {}{}",
                ball.delivery.kind,
                ball.delivery.bowler,
                ball.delivery.striker,
                if ball.delivery.free_hit { " (free hit)" } else { "" },
            ));
            if let Some(out) = &ball.dismissed {
                app.push_event("wicket", &format!("{out} out, b {}", ball.delivery.bowler));
            }
            if ball.dismissal_nullified {
                app.push_event("free_hit", &format!("{} not out — free hit", ball.delivery.striker));
            }
            CommandOutcome::Delivery { outcome }
        }
        Command::SwapStrike => {
            scorecard.manual_swap_strike()?;
            app.push_event("strike", "strike swapped");
            CommandOutcome::StrikeSwapped
        }
        Command::EndInnings => CommandOutcome::InningsClosed { closed: scorecard.end_innings_now()? },
        Command::EndMatch => CommandOutcome::MatchOver { result: scorecard.abandon()? },
    };

    let closed = match &outcome {
        CommandOutcome::Delivery { outcome } => outcome.innings_closed.as_ref(),
        CommandOutcome::InningsClosed { closed } => Some(closed),
        _ => None,
    };
    if let Some(closed) = closed {
        let s = &closed.summary;
        app.push_event("innings", &format!(
            "{} {}/{} ({} ov)",
            s.batting_team, s.total_runs, s.wickets, s.overs_played
        ));
        if let Some(target) = scorecard.target().filter(|_| closed.result.is_none()) {
            app.push_event("innings", &format!(
                "{} need {target} to win",
                scorecard.team_b()
            ));
        }
    }
    let result = match &outcome {
        CommandOutcome::MatchOver { result } => Some(result),
        _ => closed.and_then(|c| c.result.as_ref()),
    };
    if let Some(result) = result {
        app.push_event("match", &format!("result: {}", result.winner));
    }

    app.autosave(&scorecard);
    Ok(outcome)
}

pub fn apply_signal(app: &AppState, signal: &BallSignal) -> Result<CommandOutcome, ScoringError> {
    apply(app, Command::from(signal))
}

/// Consumes ball signals until the channel closes or the token is cancelled.
pub async fn run(
    mut signal_rx: mpsc::Receiver<BallSignal>,
    app: Arc<AppState>,
    cancel: CancellationToken,
) {
    tracing::info!("scorer loop started");

    loop {
        let signal = tokio::select! {
            s = signal_rx.recv() => match s {
                Some(s) => s,
                None => break,
            },
            _ = cancel.cancelled() => break,
        };

        match apply_signal(&app, &signal) {
            Ok(CommandOutcome::MatchOver { result }) => {
                tracing::info!(signal = %signal, result = %result.winner, "match stopped");
            }
            Ok(_) if signal.is_wicket() => {
                tracing::info!(signal = %signal, "wicket signal applied");
            }
            Ok(_) => {
                tracing::debug!(signal = %signal, "signal applied");
            }
            Err(e) => {
                tracing::warn!(signal = %signal, error = %e, "signal rejected");
                app.push_event("rejected", &format!("{signal}: {e}"));
            }
        }
    }

    tracing::info!("scorer loop stopped");
}
