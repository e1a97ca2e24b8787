//! Single-resolution hedged race.
//!
//! Two independently awaited legs feed one resolution: a primary future that
//! may miss (`None`), and a hedge started lazily — on a confirmed primary
//! miss or when the delay elapses, whichever comes first. Neither leg is
//! forcibly cancelled; the loser runs to completion wherever it was spawned
//! and its result is simply discarded.

use std::future::Future;
use std::time::Duration;

use tracing::debug;

/// Which leg resolved the race.
#[derive(Debug)]
pub enum HedgeOutcome<H, R> {
    /// The primary leg produced a confident result.
    Primary(H),
    /// The hedged leg's result was used.
    Hedged(R),
}

/// Run the race. A hedge error while the primary is still pending counts as
/// a non-result: the race keeps waiting for the primary and surfaces the
/// error only if the primary then misses.
pub async fn run<H, R, E, P, F, HF>(
    primary: P,
    hedge: F,
    delay: Duration,
) -> Result<HedgeOutcome<H, R>, E>
where
    P: Future<Output = Option<H>>,
    F: FnOnce() -> HF,
    HF: Future<Output = Result<R, E>>,
{
    tokio::pin!(primary);
    let timer = tokio::time::sleep(delay);
    tokio::pin!(timer);

    // Primary-only phase.
    let hedge_fut = tokio::select! {
        outcome = &mut primary => {
            return match outcome {
                Some(hit) => Ok(HedgeOutcome::Primary(hit)),
                None => {
                    // Confirmed miss: no point waiting out the rest of the
                    // delay.
                    debug!("primary missed before the hedge fired; starting hedge leg");
                    hedge().await.map(HedgeOutcome::Hedged)
                }
            };
        }
        _ = &mut timer => {
            debug!("hedge timer fired; racing both legs");
            hedge()
        }
    };

    // Both legs racing.
    tokio::pin!(hedge_fut);
    tokio::select! {
        outcome = &mut primary => match outcome {
            Some(hit) => Ok(HedgeOutcome::Primary(hit)),
            None => hedge_fut.await.map(HedgeOutcome::Hedged),
        },
        result = &mut hedge_fut => match result {
            Ok(value) => Ok(HedgeOutcome::Hedged(value)),
            Err(error) => match primary.await {
                Some(hit) => Ok(HedgeOutcome::Primary(hit)),
                None => Err(error),
            },
        },
    }
}
