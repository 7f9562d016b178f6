use std::time::Duration;

use tokio::{
    sync::mpsc::UnboundedSender,
    time::{self, Instant, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

const ENABLE_LOGS: bool = true;

use crate::log_debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownKind {
    Tick { remaining_ms: u64 },
    Finished,
}

/// A message from a running countdown, tagged with the round that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownEvent {
    pub round_id: Uuid,
    pub kind: CountdownKind,
}

impl CountdownEvent {
    pub fn tick(round_id: Uuid, remaining_ms: u64) -> Self {
        Self {
            round_id,
            kind: CountdownKind::Tick { remaining_ms },
        }
    }

    pub fn finished(round_id: Uuid) -> Self {
        Self {
            round_id,
            kind: CountdownKind::Finished,
        }
    }
}

/// Cancel handle for one scheduled countdown. Dropping it cancels the countdown.
#[derive(Debug)]
pub struct CountdownHandle {
    round_id: Uuid,
    cancel_token: CancellationToken,
}

impl CountdownHandle {
    pub fn new(round_id: Uuid, cancel_token: CancellationToken) -> Self {
        Self {
            round_id,
            cancel_token,
        }
    }

    pub fn round_id(&self) -> Uuid {
        self.round_id
    }

    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }
}

impl Drop for CountdownHandle {
    fn drop(&mut self) {
        self.cancel_token.cancel();
    }
}

/// Starts periodic countdowns on behalf of a [`GameSession`](super::GameSession).
pub trait CountdownScheduler {
    fn schedule(&mut self, round_id: Uuid, duration: Duration, interval: Duration)
        -> CountdownHandle;
}

/// Runs each countdown as a tokio task and forwards its messages to a channel.
#[derive(Clone)]
pub struct TokioScheduler {
    events_tx: UnboundedSender<CountdownEvent>,
}

impl TokioScheduler {
    pub fn new(events_tx: UnboundedSender<CountdownEvent>) -> Self {
        Self { events_tx }
    }
}

impl CountdownScheduler for TokioScheduler {
    fn schedule(
        &mut self,
        round_id: Uuid,
        duration: Duration,
        interval: Duration,
    ) -> CountdownHandle {
        let cancel_token = CancellationToken::new();
        tokio::spawn(countdown_loop(
            round_id,
            duration,
            interval,
            self.events_tx.clone(),
            cancel_token.clone(),
        ));
        CountdownHandle::new(round_id, cancel_token)
    }
}

/// Emits a tick right away, then one per `interval` carrying the time left
/// until the deadline, then `Finished` once the deadline passes.
async fn countdown_loop(
    round_id: Uuid,
    duration: Duration,
    interval: Duration,
    events_tx: UnboundedSender<CountdownEvent>,
    cancel_token: CancellationToken,
) {
    let deadline = Instant::now() + duration;
    let mut ticker = time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        let event = tokio::select! {
            biased;
            _ = cancel_token.cancelled() => {
                log_debug!("countdown for round {} cancelled", round_id);
                return;
            }
            _ = time::sleep_until(deadline) => CountdownEvent::finished(round_id),
            _ = ticker.tick() => {
                let remaining = deadline.saturating_duration_since(Instant::now());
                if remaining.is_zero() {
                    CountdownEvent::finished(round_id)
                } else {
                    CountdownEvent::tick(round_id, remaining.as_millis() as u64)
                }
            }
        };

        let finished = event.kind == CountdownKind::Finished;
        if events_tx.send(event).is_err() || finished {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    async fn collect(rx: &mut mpsc::UnboundedReceiver<CountdownEvent>) -> Vec<CountdownKind> {
        let mut kinds = Vec::new();
        while let Some(event) = rx.recv().await {
            kinds.push(event.kind);
            if event.kind == CountdownKind::Finished {
                break;
            }
        }
        kinds
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_every_interval_then_finishes() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = TokioScheduler::new(tx);
        let round_id = Uuid::new_v4();

        let _handle = scheduler.schedule(
            round_id,
            Duration::from_millis(3_000),
            Duration::from_millis(1_000),
        );

        assert_eq!(
            collect(&mut rx).await,
            vec![
                CountdownKind::Tick { remaining_ms: 3_000 },
                CountdownKind::Tick { remaining_ms: 2_000 },
                CountdownKind::Tick { remaining_ms: 1_000 },
                CountdownKind::Finished,
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn finishes_on_deadline_between_ticks() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = TokioScheduler::new(tx);

        let started = Instant::now();
        let _handle = scheduler.schedule(
            Uuid::new_v4(),
            Duration::from_millis(1_500),
            Duration::from_millis(1_000),
        );

        assert_eq!(
            collect(&mut rx).await,
            vec![
                CountdownKind::Tick { remaining_ms: 1_500 },
                CountdownKind::Tick { remaining_ms: 500 },
                CountdownKind::Finished,
            ]
        );
        assert_eq!(started.elapsed(), Duration::from_millis(1_500));
    }

    #[tokio::test(start_paused = true)]
    async fn events_carry_round_id() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = TokioScheduler::new(tx);
        let round_id = Uuid::new_v4();

        let _handle = scheduler.schedule(
            round_id,
            Duration::from_millis(1_000),
            Duration::from_millis(1_000),
        );

        let first = rx.recv().await.unwrap();
        assert_eq!(first.round_id, round_id);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_handle_stops_countdown() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = TokioScheduler::new(tx);

        let handle = scheduler.schedule(
            Uuid::new_v4(),
            Duration::from_millis(5_000),
            Duration::from_millis(1_000),
        );
        let first = rx.recv().await.unwrap();
        assert_eq!(first.kind, CountdownKind::Tick { remaining_ms: 5_000 });

        drop(handle);
        drop(scheduler);

        // The task exits on cancellation and drops the last sender.
        assert_eq!(rx.recv().await, None);
    }
}
