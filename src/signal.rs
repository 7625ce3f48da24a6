use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::types::BallSignal;

/// Terminal scoring: one or more signals per line, separated by spaces
/// (`1 4 W Wd 0 6` scores a whole over). Lines starting with `#` are skipped.
pub async fn run_stdin(signal_tx: mpsc::Sender<BallSignal>) {
    tracing::info!("signal listener started (stdin mode)");
    tracing::info!("enter signals: 0-6, W, Wd, N, B1, LB1, SW, IO, MO");

    let forwarded = forward_lines(BufReader::new(tokio::io::stdin()), &signal_tx).await;
    tracing::info!(forwarded, "signal listener stopped");
}

/// Forwards every recognised token from `reader` until EOF, a read error,
/// or the receiver going away. Returns how many signals were sent.
pub async fn forward_lines<R>(reader: R, signal_tx: &mpsc::Sender<BallSignal>) -> usize
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut forwarded = 0;

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "signal read error");
                break;
            }
        };
        if line.trim_start().starts_with('#') {
            continue;
        }

        for token in line.split_whitespace() {
            let Some(signal) = BallSignal::parse(token) else {
                tracing::warn!(input = token, "unknown signal, ignoring");
                continue;
            };
            tracing::debug!(signal = %signal, "signal received");
            if signal_tx.send(signal).await.is_err() {
                tracing::error!("signal channel closed");
                return forwarded;
            }
            forwarded += 1;
        }
    }
    forwarded
}
