use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use tokio::time::{Duration, Interval, MissedTickBehavior};

use crate::domain::entity::{RunMode, TimerDuration, TimerSnapshot};
use crate::domain::timer::inbound::{
    AlreadyRunningSnafu, InvalidOperationError, NoDurationSelectedSnafu, NotRunningSnafu,
};
use crate::domain::timer::outbound::TimerObserver;
use crate::domain::timer::worker::handle::Command;
use crate::domain::timer::worker::routine::WorkerContext;

const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug)]
#[repr(transparent)]
pub struct WorkerState {
    inner: Option<WorkerStateInner>,
}

impl WorkerState {
    /// Creates a new [`WorkerState`].
    pub fn new() -> Self {
        Self {
            inner: Some(WorkerStateInner::new()),
        }
    }

    /// Handle one tick or command, then announce the change to observers.
    pub async fn run(&mut self, context: &mut WorkerContext) {
        self.inner = match self.inner.take() {
            Some(inner) => {
                let before = inner.snapshot(context.selected);
                let inner = inner.run(context).await;
                let after = inner.snapshot(context.selected);
                context.announce(&before, &after);
                Some(inner)
            }
            None => unreachable!("`WorkerState`'s inner should not be `None`"),
        };
    }

    /// Returns `true` if the command channel of this [`WorkerState`] is closed.
    pub fn is_closed(&self) -> bool {
        matches!(self.inner, Some(WorkerStateInner::Closed(_)))
    }
}

#[enum_dispatch::enum_dispatch]
trait StateRun {
    async fn run(self, context: &mut WorkerContext) -> WorkerStateInner;

    fn snapshot(&self, selected: Option<TimerDuration>) -> TimerSnapshot;
}

/// Actual implementation of running state of [`WorkerRoutine`].
///
/// [`WorkerRoutine`]: crate::domain::timer::worker::routine::WorkerRoutine
#[derive(Debug)]
#[enum_dispatch::enum_dispatch(StateRun)]
enum WorkerStateInner {
    Idle(IdleState),
    Running(RunningState),
    Paused(PausedState),
    Closed(ClosedState),
}

impl WorkerStateInner {
    pub fn new() -> Self {
        Self::Idle(IdleState { remaining: 0 })
    }
}

/// A state in which no countdown is active. `remaining` is zero unless a
/// snapshot from a previous session has been loaded for display.
#[derive(Debug)]
struct IdleState {
    remaining: u64,
}

impl StateRun for IdleState {
    async fn run(self, context: &mut WorkerContext) -> WorkerStateInner {
        match context.commands.recv().await {
            Some(Command::Select { duration }) => {
                context.select(duration);
                self.into()
            }
            Some(Command::Start { responder }) => {
                let (state, res) = self.handle_start(context).await;
                let _ = responder.send(res);
                state
            }
            Some(Command::Pause { responder }) => {
                let _ = responder.send(NotRunningSnafu { mode: RunMode::Idle }.fail());
                self.into()
            }
            Some(Command::Stop) => stop(context).await,
            Some(Command::Reconcile) => self.into(),
            Some(Command::Load { responder }) => {
                let state = self.handle_load(context).await;
                let _ = responder.send(());
                state
            }
            Some(Command::Persist { responder }) => {
                context.persist(self.remaining).await;
                let _ = responder.send(());
                self.into()
            }
            Some(Command::Query { responder }) => {
                let _ = responder.send(self.snapshot(context.selected));
                self.into()
            }
            Some(Command::Subscribe { observer }) => self.handle_subscribe(context, observer),
            None => close(self, context),
        }
    }

    fn snapshot(&self, selected: Option<TimerDuration>) -> TimerSnapshot {
        TimerSnapshot {
            remaining: self.remaining,
            selected,
            mode: RunMode::Idle,
            started_at: None,
            scheduled_completion_at: None,
        }
    }
}

impl IdleState {
    async fn handle_start(
        self,
        context: &mut WorkerContext,
    ) -> (WorkerStateInner, Result<(), InvalidOperationError>) {
        match context.selected {
            Some(duration) => (run_countdown(duration.seconds(), context).await, Ok(())),
            None => (self.into(), NoDurationSelectedSnafu.fail()),
        }
    }

    async fn handle_load(self, context: &mut WorkerContext) -> WorkerStateInner {
        let remaining = context.load().await.unwrap_or(self.remaining);
        IdleState { remaining }.into()
    }

    fn handle_subscribe(
        self,
        context: &mut WorkerContext,
        observer: Arc<dyn TimerObserver>,
    ) -> WorkerStateInner {
        context.subscribe(observer, self.snapshot(context.selected));
        self.into()
    }
}

/// A state which indicates that the countdown is running, with a ticker
/// working internally.
///
/// `synced_at` is the wall-clock instant up to which `remaining` accounts for
/// elapsed time. Every tick advances it by one second, so reconciliation only
/// deducts time the ticker missed.
#[derive(Debug)]
struct RunningState {
    remaining: u64,
    started_at: DateTime<Utc>,
    synced_at: DateTime<Utc>,
    scheduled_completion_at: DateTime<Utc>,
    ticker: Interval,
}

impl StateRun for RunningState {
    async fn run(mut self, context: &mut WorkerContext) -> WorkerStateInner {
        tokio::select! {
            _ = self.ticker.tick() => self.handle_tick(context).await,
            command = context.commands.recv() => match command {
                Some(Command::Select { duration }) => {
                    context.select(duration);
                    self.into()
                }
                Some(Command::Start { responder }) => {
                    let _ = responder.send(AlreadyRunningSnafu.fail());
                    self.into()
                }
                Some(Command::Pause { responder }) => {
                    let (state, res) = self.handle_pause(context).await;
                    let _ = responder.send(res);
                    state
                }
                Some(Command::Stop) => stop(context).await,
                Some(Command::Reconcile) => self.handle_reconcile(context).await,
                Some(Command::Load { responder }) => {
                    let state = self.handle_load(context).await;
                    let _ = responder.send(());
                    state
                }
                Some(Command::Persist { responder }) => {
                    context.persist(self.remaining).await;
                    let _ = responder.send(());
                    self.into()
                }
                Some(Command::Query { responder }) => {
                    let _ = responder.send(self.snapshot(context.selected));
                    self.into()
                }
                Some(Command::Subscribe { observer }) => {
                    context.subscribe(observer, self.snapshot(context.selected));
                    self.into()
                }
                None => close(self, context),
            },
        }
    }

    fn snapshot(&self, selected: Option<TimerDuration>) -> TimerSnapshot {
        TimerSnapshot {
            remaining: self.remaining,
            selected,
            mode: RunMode::Running,
            started_at: Some(self.started_at),
            scheduled_completion_at: Some(self.scheduled_completion_at),
        }
    }
}

impl RunningState {
    async fn handle_tick(mut self, context: &mut WorkerContext) -> WorkerStateInner {
        if self.remaining == 0 {
            tracing::info!("Countdown completed");
            return stop(context).await;
        }

        self.remaining -= 1;
        self.synced_at = after_seconds(self.synced_at, 1);
        tracing::debug!(remaining = self.remaining, "Tick");
        self.into()
    }

    async fn handle_pause(
        self,
        context: &mut WorkerContext,
    ) -> (WorkerStateInner, Result<(), InvalidOperationError>) {
        context.cancel_completion().await;
        tracing::info!(remaining = self.remaining, "Countdown paused");

        let state = PausedState {
            remaining: self.remaining,
            started_at: self.started_at,
        };
        (state.into(), Ok(()))
    }

    async fn handle_reconcile(mut self, context: &mut WorkerContext) -> WorkerStateInner {
        let elapsed = elapsed_seconds(self.synced_at, context.now());
        let remaining = self.remaining.saturating_sub(elapsed);

        if remaining == 0 {
            tracing::info!(elapsed, "Countdown ran out while suspended");
            return stop(context).await;
        }

        if elapsed > 0 {
            tracing::info!(elapsed, remaining, "Reconciled elapsed time");
        }

        self.remaining = remaining;
        self.synced_at = after_seconds(self.synced_at, elapsed);
        self.into()
    }

    /// Reconcile the countdown, then bound it by the slot value corrected for
    /// the time since it was written. A running countdown never goes back up.
    async fn handle_load(self, context: &mut WorkerContext) -> WorkerStateInner {
        let saved = context.load().await;
        let written_at = context.persisted_at().unwrap_or(self.synced_at);

        let mut state = match self.handle_reconcile(context).await {
            WorkerStateInner::Running(state) => state,
            state => return state,
        };

        if let Some(saved) = saved {
            let restored = saved.saturating_sub(elapsed_seconds(written_at, context.now()));
            if restored == 0 {
                tracing::info!(saved, "Snapshot has run out since it was written");
                return stop(context).await;
            }
            state.remaining = state.remaining.min(restored);
        }
        state.into()
    }
}

/// A state which indicates that the countdown is suspended. `remaining` is
/// kept exactly as the last tick left it.
#[derive(Debug)]
struct PausedState {
    remaining: u64,
    started_at: DateTime<Utc>,
}

impl StateRun for PausedState {
    async fn run(self, context: &mut WorkerContext) -> WorkerStateInner {
        match context.commands.recv().await {
            Some(Command::Select { duration }) => {
                context.select(duration);
                self.into()
            }
            Some(Command::Start { responder }) => {
                let state = run_countdown(self.remaining, context).await;
                let _ = responder.send(Ok(()));
                state
            }
            Some(Command::Pause { responder }) => {
                let _ = responder.send(
                    NotRunningSnafu {
                        mode: RunMode::Paused,
                    }
                    .fail(),
                );
                self.into()
            }
            Some(Command::Stop) => stop(context).await,
            Some(Command::Reconcile) => self.into(),
            Some(Command::Load { responder }) => {
                let state = self.handle_load(context).await;
                let _ = responder.send(());
                state
            }
            Some(Command::Persist { responder }) => {
                context.persist(self.remaining).await;
                let _ = responder.send(());
                self.into()
            }
            Some(Command::Query { responder }) => {
                let _ = responder.send(self.snapshot(context.selected));
                self.into()
            }
            Some(Command::Subscribe { observer }) => {
                context.subscribe(observer, self.snapshot(context.selected));
                self.into()
            }
            None => close(self, context),
        }
    }

    fn snapshot(&self, selected: Option<TimerDuration>) -> TimerSnapshot {
        TimerSnapshot {
            remaining: self.remaining,
            selected,
            mode: RunMode::Paused,
            started_at: Some(self.started_at),
            scheduled_completion_at: None,
        }
    }
}

impl PausedState {
    async fn handle_load(mut self, context: &mut WorkerContext) -> WorkerStateInner {
        if let Some(remaining) = context.load().await {
            self.remaining = remaining;
        }
        self.into()
    }
}

/// A state which indicates that every [`WorkerHandle`] is gone and the
/// [`WorkerRoutine`] should stop running.
///
/// [`WorkerHandle`]: crate::domain::timer::worker::WorkerHandle
/// [`WorkerRoutine`]: crate::domain::timer::worker::routine::WorkerRoutine
#[derive(Debug)]
struct ClosedState {
    last: TimerSnapshot,
}

impl StateRun for ClosedState {
    async fn run(self, _context: &mut WorkerContext) -> WorkerStateInner {
        self.into()
    }

    fn snapshot(&self, _selected: Option<TimerDuration>) -> TimerSnapshot {
        self.last.clone()
    }
}

/// Enter [`RunningState`] with `remaining` seconds left: start the ticker,
/// persist the snapshot and schedule the completion alert.
async fn run_countdown(remaining: u64, context: &mut WorkerContext) -> WorkerStateInner {
    let now = context.now();
    let scheduled_completion_at = after_seconds(now, remaining);
    let ticker = spawn_ticker().await;

    context.persist(remaining).await;
    context.schedule_completion(scheduled_completion_at).await;
    tracing::info!(remaining, "Countdown running");

    RunningState {
        remaining,
        started_at: now,
        synced_at: now,
        scheduled_completion_at,
        ticker,
    }
    .into()
}

async fn stop(context: &mut WorkerContext) -> WorkerStateInner {
    context.cancel_completion().await;
    tracing::info!("Countdown stopped");
    IdleState { remaining: 0 }.into()
}

fn close<S: StateRun>(state: S, context: &WorkerContext) -> WorkerStateInner {
    ClosedState {
        last: state.snapshot(context.selected),
    }
    .into()
}

async fn spawn_ticker() -> Interval {
    let mut ticker = tokio::time::interval(TICK_PERIOD);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    ticker.tick().await;
    ticker
}

/// Whole seconds from `from` to `to`, zero if `to` is earlier.
fn elapsed_seconds(from: DateTime<Utc>, to: DateTime<Utc>) -> u64 {
    (to - from).num_seconds().max(0).unsigned_abs()
}

fn after_seconds(at: DateTime<Utc>, seconds: u64) -> DateTime<Utc> {
    i64::try_from(seconds)
        .ok()
        .and_then(TimeDelta::try_seconds)
        .and_then(|delta| at.checked_add_signed(delta))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;
    use std::sync::Mutex;

    use chrono::TimeZone;
    use snafu::prelude::*;
    use tokio::sync::mpsc::Sender;
    use tokio::sync::oneshot;

    use crate::domain::entity::NotificationMessage;
    use crate::domain::repository::snapshot::{SnapshotStore, StorageError};
    use crate::domain::timer::outbound::{
        Clock, NotificationScheduler, ScheduleNotificationError, ScheduleRequest, TimerEvent,
    };
    use crate::domain::timer::worker::routine::{WorkerConfig, WorkerPorts};

    const KEY: &str = "SavedSeconds";

    #[tokio::test(start_paused = true)]
    async fn ticker_operation() {
        let mut ticker = spawn_ticker().await;
        let start = tokio::time::Instant::now();
        let now = ticker.tick().await;
        assert_eq!(now - start, TICK_PERIOD);
    }

    #[tokio::test(start_paused = true)]
    async fn idle_state_start_every_option() {
        for duration in TimerDuration::options() {
            let (_, mut context, fakes) = new_worker_context(Some(duration));
            let (state, res) = IdleState { remaining: 0 }.handle_start(&mut context).await;
            assert_eq!(res, Ok(()));

            match state {
                WorkerStateInner::Running(state) => {
                    assert_eq!(state.remaining, duration.seconds());
                    assert_eq!(state.started_at, fakes.clock.now());
                    assert_eq!(
                        state.scheduled_completion_at,
                        fakes.clock.now() + TimeDelta::seconds(duration.seconds() as i64)
                    );
                }
                _ => unreachable!(),
            }

            assert_eq!(fakes.store.value(), Some(duration.seconds()));
            let scheduled = fakes.scheduler.scheduled.lock().unwrap().clone();
            assert_eq!(scheduled.len(), 1);
            assert_eq!(scheduled[0].identifier, "TimerNotification");
            assert_eq!(
                scheduled[0].fire_at,
                fakes.clock.now() + TimeDelta::seconds(duration.seconds() as i64)
            );
        }
    }

    #[tokio::test(start_paused = true)]
    async fn idle_state_start_without_selection() {
        let (_, mut context, fakes) = new_worker_context(None);
        let (state, res) = IdleState { remaining: 0 }.handle_start(&mut context).await;

        assert_eq!(res, Err(InvalidOperationError::NoDurationSelected));
        assert!(matches!(state, WorkerStateInner::Idle(IdleState { remaining: 0 })));
        assert_eq!(fakes.store.value(), None);
        assert!(fakes.scheduler.scheduled.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn running_state_handle_tick() {
        let (_, mut context, _) = new_worker_context(None);
        let state = new_running_state(3, &mut context).await;
        let state = state.handle_tick(&mut context).await;

        match state {
            WorkerStateInner::Running(state) => assert_eq!(state.remaining, 2),
            _ => unreachable!(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn running_state_handle_tick_completion() {
        let (_, mut context, fakes) = new_worker_context(None);
        let state = new_running_state(0, &mut context).await;
        let state = state.handle_tick(&mut context).await;

        let snapshot = state.snapshot(None);
        assert_eq!(snapshot.mode, RunMode::Idle);
        assert_eq!(snapshot.remaining, 0);
        assert_eq!(snapshot.started_at, None);
        assert_eq!(
            fakes.scheduler.cancelled.lock().unwrap().last().map(String::as_str),
            Some("TimerNotification")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn running_state_pause_then_resume() {
        let (sender, mut context, fakes) = new_worker_context(None);
        let state = new_running_state(30, &mut context).await;
        let state = match state.handle_tick(&mut context).await {
            WorkerStateInner::Running(state) => state,
            _ => unreachable!(),
        };

        let cancelled_before = fakes.scheduler.cancelled.lock().unwrap().len();
        let (state, res) = state.handle_pause(&mut context).await;
        assert_eq!(res, Ok(()));
        assert_eq!(
            fakes.scheduler.cancelled.lock().unwrap().len(),
            cancelled_before + 1
        );

        let paused = match state {
            WorkerStateInner::Paused(state) => state,
            _ => unreachable!(),
        };
        assert_eq!(paused.remaining, 29);

        fakes.clock.advance(100);

        let (responder, receiver) = oneshot::channel();
        sender.send(Command::Start { responder }).await.unwrap();
        let state = WorkerStateInner::from(paused).run(&mut context).await;
        assert_eq!(receiver.await.unwrap(), Ok(()));

        let snapshot = state.snapshot(None);
        assert_eq!(snapshot.mode, RunMode::Running);
        assert_eq!(snapshot.remaining, 29);
        assert_eq!(snapshot.started_at, Some(fakes.clock.now()));
    }

    #[tokio::test(start_paused = true)]
    async fn running_state_reconcile() {
        let (_, mut context, fakes) = new_worker_context(None);
        let state = new_running_state(30, &mut context).await;

        fakes.clock.advance(12);
        match state.handle_reconcile(&mut context).await {
            WorkerStateInner::Running(state) => assert_eq!(state.remaining, 18),
            _ => unreachable!(),
        }

        let state = new_running_state(30, &mut context).await;
        fakes.clock.advance(31);
        let snapshot = state.handle_reconcile(&mut context).await.snapshot(None);
        assert_eq!(snapshot.mode, RunMode::Idle);
        assert_eq!(snapshot.remaining, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn running_state_reconcile_after_ticks() {
        let (_, mut context, fakes) = new_worker_context(None);
        let state = new_running_state(30, &mut context).await;
        let state = match state.handle_tick(&mut context).await {
            WorkerStateInner::Running(state) => state,
            _ => unreachable!(),
        };

        fakes.clock.advance(1);
        match state.handle_reconcile(&mut context).await {
            WorkerStateInner::Running(state) => assert_eq!(state.remaining, 29),
            _ => unreachable!(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn running_state_persist_then_load() {
        let (_, mut context, fakes) = new_worker_context(None);
        let state = new_running_state(30, &mut context).await;
        context.persist(state.remaining).await;
        assert_eq!(fakes.store.value(), Some(30));

        match state.handle_load(&mut context).await {
            WorkerStateInner::Running(state) => assert_eq!(state.remaining, 30),
            _ => unreachable!(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn running_state_load_after_ticks() {
        let (_, mut context, fakes) = new_worker_context(None);
        let mut state = new_running_state(30, &mut context).await;
        for _ in 0..10 {
            fakes.clock.advance(1);
            state = match state.handle_tick(&mut context).await {
                WorkerStateInner::Running(state) => state,
                _ => unreachable!(),
            };
        }
        assert_eq!(state.remaining, 20);
        assert_eq!(fakes.store.value(), Some(30));

        match state.handle_load(&mut context).await {
            WorkerStateInner::Running(state) => assert_eq!(state.remaining, 20),
            _ => unreachable!(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn running_state_hide_then_show() {
        let (_, mut context, fakes) = new_worker_context(None);
        let mut state = new_running_state(30, &mut context).await;
        for _ in 0..4 {
            fakes.clock.advance(1);
            state = match state.handle_tick(&mut context).await {
                WorkerStateInner::Running(state) => state,
                _ => unreachable!(),
            };
        }
        context.persist(state.remaining).await;
        assert_eq!(fakes.store.value(), Some(26));

        for _ in 0..5 {
            fakes.clock.advance(1);
            state = match state.handle_tick(&mut context).await {
                WorkerStateInner::Running(state) => state,
                _ => unreachable!(),
            };
        }
        // Suspended for 7 s without ticks.
        fakes.clock.advance(7);

        match state.handle_load(&mut context).await {
            WorkerStateInner::Running(state) => assert_eq!(state.remaining, 14),
            _ => unreachable!(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn running_state_load_run_out_snapshot() {
        let (_, mut context, fakes) = new_worker_context(None);
        let state = new_running_state(30, &mut context).await;
        fakes.store.values.lock().unwrap().insert(KEY.to_owned(), 5);
        fakes.clock.advance(5);

        let state = state.handle_load(&mut context).await;
        let snapshot = state.snapshot(None);
        assert_eq!(snapshot.mode, RunMode::Idle);
        assert_eq!(snapshot.remaining, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn idle_state_load() {
        let (_, mut context, fakes) = new_worker_context(None);
        let state = IdleState { remaining: 0 }.handle_load(&mut context).await;
        assert_eq!(state.snapshot(None).remaining, 0);

        fakes.store.values.lock().unwrap().insert(KEY.to_owned(), 12);
        let state = IdleState { remaining: 0 }.handle_load(&mut context).await;
        let snapshot = state.snapshot(None);
        assert_eq!(snapshot.mode, RunMode::Idle);
        assert_eq!(snapshot.remaining, 12);
    }

    #[tokio::test(start_paused = true)]
    async fn unavailable_store_keeps_remaining() {
        let (_, mut context, fakes) = new_worker_context(None);
        fakes.store.values.lock().unwrap().insert(KEY.to_owned(), 12);
        *fakes.store.broken.lock().unwrap() = true;

        let state = PausedState {
            remaining: 7,
            started_at: fakes.clock.now(),
        };
        let state = state.handle_load(&mut context).await;
        assert_eq!(state.snapshot(None).remaining, 7);
    }

    #[tokio::test(start_paused = true)]
    async fn refused_notification_keeps_counting() {
        let (_, mut context, fakes) = new_worker_context(None);
        *fakes.scheduler.refuse.lock().unwrap() = true;

        let state = new_running_state(5, &mut context).await;
        match state.handle_tick(&mut context).await {
            WorkerStateInner::Running(state) => assert_eq!(state.remaining, 4),
            _ => unreachable!(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn worker_state_announces_changes() {
        let duration = TimerDuration::try_new(10).unwrap();
        let (sender, mut context, fakes) = new_worker_context(Some(duration));
        let mut state = WorkerState::new();

        let (responder, receiver) = oneshot::channel();
        sender.send(Command::Start { responder }).await.unwrap();
        state.run(&mut context).await;
        assert_eq!(receiver.await.unwrap(), Ok(()));

        let events = fakes.observer.events.lock().unwrap().clone();
        assert_eq!(events.len(), 2);
        assert!(matches!(&events[0], TimerEvent::Changed(s) if s.remaining == 10));
        assert!(
            matches!(&events[1], TimerEvent::BecameRunning(s) if s.mode == RunMode::Running)
        );

        let (responder, receiver) = oneshot::channel();
        sender.send(Command::Query { responder }).await.unwrap();
        state.run(&mut context).await;
        assert_eq!(receiver.await.unwrap().remaining, 10);
        assert_eq!(fakes.observer.events.lock().unwrap().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn worker_state_rejects_invalid_operations() {
        let (sender, mut context, _) = new_worker_context(None);
        let mut state = WorkerState::new();

        let (responder, receiver) = oneshot::channel();
        sender.send(Command::Pause { responder }).await.unwrap();
        state.run(&mut context).await;
        assert_eq!(
            receiver.await.unwrap(),
            Err(InvalidOperationError::NotRunning { mode: RunMode::Idle })
        );

        sender
            .send(Command::Select {
                duration: TimerDuration::try_new(5).unwrap(),
            })
            .await
            .unwrap();
        state.run(&mut context).await;

        let (responder, _receiver) = oneshot::channel();
        sender.send(Command::Start { responder }).await.unwrap();
        state.run(&mut context).await;

        let (responder, receiver) = oneshot::channel();
        sender.send(Command::Start { responder }).await.unwrap();
        state.run(&mut context).await;
        assert_eq!(
            receiver.await.unwrap(),
            Err(InvalidOperationError::AlreadyRunning)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn worker_state_subscribe_and_close() {
        let (sender, mut context, _) = new_worker_context(None);
        let mut state = WorkerState::new();

        let late = Arc::new(RecordingObserver::default());
        sender
            .send(Command::Subscribe {
                observer: Arc::clone(&late) as Arc<dyn TimerObserver>,
            })
            .await
            .unwrap();
        state.run(&mut context).await;
        assert_eq!(late.events.lock().unwrap().len(), 1);

        drop(sender);
        state.run(&mut context).await;
        assert!(state.is_closed());
        assert_eq!(late.events.lock().unwrap().len(), 1);
    }

    #[test]
    fn after_seconds_saturates() {
        let at = Utc.with_ymd_and_hms(2023, 8, 13, 12, 0, 0).unwrap();
        assert_eq!(after_seconds(at, 60), at + TimeDelta::seconds(60));
        assert_eq!(after_seconds(at, u64::MAX), DateTime::<Utc>::MAX_UTC);
    }

    struct ManualClock {
        now: Mutex<DateTime<Utc>>,
    }

    impl ManualClock {
        fn advance(&self, seconds: i64) {
            *self.now.lock().unwrap() += TimeDelta::seconds(seconds);
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.now.lock().unwrap()
        }
    }

    #[derive(Default)]
    struct MemoryStore {
        values: Mutex<HashMap<String, u64>>,
        broken: Mutex<bool>,
    }

    impl MemoryStore {
        fn value(&self) -> Option<u64> {
            self.values.lock().unwrap().get(KEY).copied()
        }
    }

    #[async_trait::async_trait]
    impl SnapshotStore for MemoryStore {
        async fn get(&self, key: &str) -> Result<Option<u64>, StorageError> {
            if *self.broken.lock().unwrap() {
                whatever!("suite is missing");
            }
            Ok(self.values.lock().unwrap().get(key).copied())
        }

        async fn set(&self, key: &str, value: u64) -> Result<(), StorageError> {
            if *self.broken.lock().unwrap() {
                whatever!("suite is missing");
            }
            self.values.lock().unwrap().insert(key.to_owned(), value);
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingScheduler {
        scheduled: Mutex<Vec<ScheduleRequest>>,
        cancelled: Mutex<Vec<String>>,
        refuse: Mutex<bool>,
    }

    #[async_trait::async_trait]
    impl NotificationScheduler for RecordingScheduler {
        async fn schedule_impl(
            &self,
            request: ScheduleRequest,
        ) -> Result<(), ScheduleNotificationError> {
            if *self.refuse.lock().unwrap() {
                whatever!("permission denied");
            }
            self.scheduled.lock().unwrap().push(request);
            Ok(())
        }

        async fn cancel(&self, identifier: &str) {
            self.cancelled.lock().unwrap().push(identifier.to_owned());
        }
    }

    #[derive(Default)]
    struct RecordingObserver {
        events: Mutex<Vec<TimerEvent>>,
    }

    impl TimerObserver for RecordingObserver {
        fn notify(&self, event: &TimerEvent) {
            self.events.lock().unwrap().push(event.clone());
        }
    }

    struct Fakes {
        clock: Arc<ManualClock>,
        store: Arc<MemoryStore>,
        scheduler: Arc<RecordingScheduler>,
        observer: Arc<RecordingObserver>,
    }

    fn new_worker_context(
        selected: Option<TimerDuration>,
    ) -> (Sender<Command>, WorkerContext, Fakes) {
        let (sender, receiver) = tokio::sync::mpsc::channel(1);
        let fakes = Fakes {
            clock: Arc::new(ManualClock {
                now: Mutex::new(Utc.with_ymd_and_hms(2023, 8, 13, 12, 0, 0).unwrap()),
            }),
            store: Arc::new(MemoryStore::default()),
            scheduler: Arc::new(RecordingScheduler::default()),
            observer: Arc::new(RecordingObserver::default()),
        };

        let config = WorkerConfig {
            notification: NotificationMessage::try_new(
                "TimerNotification".to_owned(),
                "Timer Completed".to_owned(),
                Some("Your timer has finished!".to_owned()),
            )
            .unwrap(),
            snapshot_key: KEY.to_owned(),
            initial_selection: selected,
        };
        let ports = WorkerPorts {
            store: Arc::clone(&fakes.store) as Arc<dyn SnapshotStore>,
            scheduler: Arc::clone(&fakes.scheduler) as Arc<dyn NotificationScheduler>,
            clock: Arc::clone(&fakes.clock) as Arc<dyn Clock>,
            observers: vec![Arc::clone(&fakes.observer) as Arc<dyn TimerObserver>],
        };

        (sender, WorkerContext::new(config, receiver, ports), fakes)
    }

    async fn new_running_state(remaining: u64, context: &mut WorkerContext) -> RunningState {
        match run_countdown(remaining, context).await {
            WorkerStateInner::Running(state) => state,
            _ => unreachable!(),
        }
    }
}
