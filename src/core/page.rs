//! Display page: one engine, its tick loop and its poll loop, driven by a
//! single cooperative scheduler.
//!
//! Staleness is bounded, not pushed: an edit made by another context shows
//! up at the next notification check or, at the latest, one poll interval
//! later.

use crate::core::clock::Clock;
use crate::core::countdown::{CountdownEngine, EngineSettings, InitOutcome};
use crate::core::scheduler::{Scheduler, Task, TimerId};
use crate::errors::AppResult;
use crate::store::KeyValueStore;
use crate::ui::messages::warning;
use crate::ui::view::CountdownView;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
pub struct PageSettings {
    pub engine: EngineSettings,
    pub poll_interval: Duration,
    /// Longest sleep between two notification checks.
    pub notify_slice: Duration,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            engine: EngineSettings::default(),
            poll_interval: Duration::from_secs(1),
            notify_slice: Duration::from_millis(200),
        }
    }
}

impl PageSettings {
    pub fn from_config(cfg: &crate::config::Config) -> Self {
        Self {
            engine: EngineSettings {
                tick_interval: cfg.tick_interval(),
                default_total_secs: cfg.default_duration_secs,
            },
            poll_interval: cfg.poll_interval(),
            notify_slice: cfg.notify_slice(),
        }
    }
}

pub struct DisplayPage<S: KeyValueStore, C: Clock> {
    engine: CountdownEngine<S, C>,
    scheduler: Scheduler,
    poll_timer: Option<TimerId>,
    settings: PageSettings,
}

impl<S: KeyValueStore, C: Clock> DisplayPage<S, C> {
    pub fn new(store: S, clock: C, settings: PageSettings) -> Self {
        Self {
            engine: CountdownEngine::new(store, clock, settings.engine),
            scheduler: Scheduler::new(),
            poll_timer: None,
            settings,
        }
    }

    pub fn engine(&self) -> &CountdownEngine<S, C> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut CountdownEngine<S, C> {
        &mut self.engine
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Page load: initialize the engine and start the poll loop.
    pub fn start<V: CountdownView + ?Sized>(
        &mut self,
        now: Instant,
        view: &mut V,
    ) -> AppResult<InitOutcome> {
        let outcome = self.engine.initialize(&mut self.scheduler, now, view)?;

        if let Some(id) = self.poll_timer.take() {
            self.scheduler.clear_interval(id);
        }
        self.poll_timer = Some(
            self.scheduler
                .set_interval(Task::Poll, self.settings.poll_interval, now),
        );

        Ok(outcome)
    }

    /// Run one tick right away, outside the schedule.
    pub fn tick_now<V: CountdownView + ?Sized>(&mut self, view: &mut V) {
        self.engine.tick(&mut self.scheduler, view);
    }

    /// Handle pending notifications, then run every task due at `now`.
    ///
    /// A store failure does not skip the rest of the batch: every due tick
    /// still runs, and the first error is returned afterwards.
    pub fn run_due<V: CountdownView + ?Sized>(
        &mut self,
        now: Instant,
        view: &mut V,
    ) -> AppResult<Vec<InitOutcome>> {
        let mut first_err = None;
        let mut outcomes = match self.engine.drain_events(&mut self.scheduler, now, view) {
            Ok(o) => o,
            Err(e) => {
                first_err = Some(e);
                Vec::new()
            }
        };

        for (id, task) in self.scheduler.take_due(now) {
            // an earlier task in this batch may have replaced the timer
            if !self.scheduler.is_active(id) {
                continue;
            }
            match task {
                Task::Tick => self.engine.tick(&mut self.scheduler, view),
                Task::Poll => match self.engine.poll(&mut self.scheduler, now, view) {
                    Ok(Some(o)) => outcomes.push(o),
                    Ok(None) => {}
                    Err(e) => {
                        first_err.get_or_insert(e);
                    }
                },
            }
        }

        match first_err {
            Some(e) => Err(e),
            None => Ok(outcomes),
        }
    }

    /// How long to sleep before the next call to [`run_due`](Self::run_due).
    pub fn sleep_hint(&self, now: Instant) -> Duration {
        let until_next = self
            .scheduler
            .next_deadline()
            .map(|d| d.saturating_duration_since(now))
            .unwrap_or(self.settings.notify_slice);
        until_next.min(self.settings.notify_slice)
    }

    /// Drive the page in real time until `keep_running` says stop.
    /// Every outcome other than [`InitOutcome::Stored`] is handed to
    /// `on_outcome` (the CLI logs them).
    ///
    /// A failed pass (a locked database, say) is reported and the loop goes
    /// on; the next poll retries. Only [`start`](Self::start) failing is fatal.
    pub fn run<V, F, G>(
        &mut self,
        view: &mut V,
        mut keep_running: F,
        mut on_outcome: G,
    ) where
        V: CountdownView + ?Sized,
        F: FnMut() -> bool,
        G: FnMut(&S, &InitOutcome),
    {
        while keep_running() {
            let now = Instant::now();
            match self.run_due(now, view) {
                Ok(outcomes) => {
                    for o in outcomes {
                        if o != InitOutcome::Stored {
                            on_outcome(self.engine.store(), &o);
                        }
                    }
                }
                Err(e) => warning(format!("Display update failed, retrying: {}", e)),
            }
            std::thread::sleep(self.sleep_hint(Instant::now()));
        }
    }
}
