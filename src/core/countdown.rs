//! Countdown engine for one display context.
//!
//! Remaining time is always recomputed from the stored start time and
//! length; the per-second decrement only advances the display between
//! recomputations.

use crate::core::clock::Clock;
use crate::core::scheduler::{Scheduler, Task, TimerId};
use crate::errors::AppResult;
use crate::models::due_date::{DUE_KEY, load_due};
use crate::models::duration::{
    DEFAULT_TOTAL_SECONDS, DURATION_KEY, DurationRecord, LoadOutcome, load_record, save_record,
};
use crate::models::submission::{SUBMISSION_KEY, SubmissionRecord, load_submission};
use crate::models::tier::{Status, Tier};
use crate::store::{KeyValueStore, StorageEvent};
use crate::ui::view::CountdownView;
use crate::utils::formatting::format_hms;
use std::time::{Duration, Instant};

pub const TIME_UP_TEXT: &str = "00:00:00";

#[derive(Debug, Clone, Copy)]
pub struct EngineSettings {
    pub tick_interval: Duration,
    pub default_total_secs: u64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(1),
            default_total_secs: DEFAULT_TOTAL_SECONDS,
        }
    }
}

/// How [`CountdownEngine::initialize`] obtained its record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    /// A valid record was already stored.
    Stored,
    /// Nothing was stored; the default was written.
    Defaulted,
    /// The stored payload was unreadable; the default replaced it.
    Recovered(String),
}

pub struct CountdownEngine<S: KeyValueStore, C: Clock> {
    store: S,
    clock: C,
    settings: EngineSettings,
    record: Option<DurationRecord>,
    remaining_seconds: u64,
    timer: Option<TimerId>,
    status: Status,
    /// Last submission read from the store; `None` until the first read.
    seen_submission: Option<Option<SubmissionRecord>>,
}

impl<S: KeyValueStore, C: Clock> CountdownEngine<S, C> {
    pub fn new(store: S, clock: C, settings: EngineSettings) -> Self {
        Self {
            store,
            clock,
            settings,
            record: None,
            remaining_seconds: 0,
            timer: None,
            status: Status::InProgress,
            seen_submission: None,
        }
    }

    pub fn record(&self) -> Option<&DurationRecord> {
        self.record.as_ref()
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    pub fn timer(&self) -> Option<TimerId> {
        self.timer
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// (Re)start the countdown from whatever the store holds now.
    ///
    /// Any running tick timer is cancelled before the new one starts, so at
    /// most one is live. When the store cannot be read or written the old
    /// countdown keeps running untouched.
    pub fn initialize<V: CountdownView + ?Sized>(
        &mut self,
        scheduler: &mut Scheduler,
        now: Instant,
        view: &mut V,
    ) -> AppResult<InitOutcome> {
        let wall_now = self.clock.now();
        let loaded = load_record(&self.store)?;
        let outcome = match &loaded {
            LoadOutcome::Present(_) => InitOutcome::Stored,
            LoadOutcome::Missing => InitOutcome::Defaulted,
            LoadOutcome::Malformed(reason) => InitOutcome::Recovered(reason.clone()),
        };

        let record = loaded.or_default(self.settings.default_total_secs, wall_now);
        if outcome != InitOutcome::Stored {
            save_record(&mut self.store, &record)?;
        }

        self.stop(scheduler);
        self.remaining_seconds = record.remaining_at(wall_now);
        self.record = Some(record);

        if self.status == Status::TimeUp {
            self.status = Status::InProgress;
        }
        view.render_status(self.status.text());

        self.timer = Some(scheduler.set_interval(Task::Tick, self.settings.tick_interval, now));
        self.refresh_due_date(view)?;
        self.refresh_submission(view)?;

        Ok(outcome)
    }

    /// One step of the tick loop: render the current value, then decrement.
    pub fn tick<V: CountdownView + ?Sized>(&mut self, scheduler: &mut Scheduler, view: &mut V) {
        if self.timer.is_none() {
            return;
        }

        if self.remaining_seconds == 0 {
            self.stop(scheduler);
            self.status = Status::TimeUp;
            view.render_timer(TIME_UP_TEXT, Tier::Urgent);
            view.render_status(self.status.text());
            return;
        }

        let tier = Tier::for_remaining(self.remaining_seconds);
        view.render_timer(&format_hms(self.remaining_seconds), tier);

        self.remaining_seconds -= 1;
    }

    /// Self-poll: re-initialize when the stored countdown differs from the
    /// one applied last. The due date is refreshed every time.
    pub fn poll<V: CountdownView + ?Sized>(
        &mut self,
        scheduler: &mut Scheduler,
        now: Instant,
        view: &mut V,
    ) -> AppResult<Option<InitOutcome>> {
        let mut outcome = None;

        if let LoadOutcome::Present(fresh) = load_record(&self.store)? {
            let changed = match &self.record {
                Some(applied) => !applied.same_countdown(&fresh),
                None => true,
            };
            if changed {
                outcome = Some(self.initialize(scheduler, now, view)?);
            }
        }

        self.refresh_due_date(view)?;
        self.refresh_submission(view)?;
        Ok(outcome)
    }

    /// React to a change notification from another context.
    pub fn handle_event<V: CountdownView + ?Sized>(
        &mut self,
        event: &StorageEvent,
        scheduler: &mut Scheduler,
        now: Instant,
        view: &mut V,
    ) -> AppResult<Option<InitOutcome>> {
        match event.key.as_str() {
            DURATION_KEY => Ok(Some(self.initialize(scheduler, now, view)?)),
            DUE_KEY => {
                self.refresh_due_date(view)?;
                Ok(None)
            }
            SUBMISSION_KEY => {
                self.refresh_submission(view)?;
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    /// Drain pending store notifications and handle each one.
    pub fn drain_events<V: CountdownView + ?Sized>(
        &mut self,
        scheduler: &mut Scheduler,
        now: Instant,
        view: &mut V,
    ) -> AppResult<Vec<InitOutcome>> {
        let events = self.store.take_events()?;
        let mut outcomes = Vec::new();
        for ev in &events {
            if let Some(o) = self.handle_event(ev, scheduler, now, view)? {
                outcomes.push(o);
            }
        }
        Ok(outcomes)
    }

    pub fn refresh_due_date<V: CountdownView + ?Sized>(&mut self, view: &mut V) -> AppResult<()> {
        let due = load_due(&self.store)?;
        view.render_due_date(&due.display());
        Ok(())
    }

    /// Switch to `Submitted` when a submission newer than the one seen on
    /// the first read appears. A display started after a submission stays
    /// `In Progress`.
    pub fn refresh_submission<V: CountdownView + ?Sized>(
        &mut self,
        view: &mut V,
    ) -> AppResult<()> {
        let current = load_submission(&self.store)?;
        let is_new = matches!(&self.seen_submission, Some(seen) if *seen != current);
        if is_new && current.is_some() {
            self.mark_submitted(view);
        }
        self.seen_submission = Some(current);
        Ok(())
    }

    /// Show the submitted status; the countdown itself keeps running.
    pub fn mark_submitted<V: CountdownView + ?Sized>(&mut self, view: &mut V) {
        self.status = Status::Submitted;
        view.render_status(self.status.text());
    }

    fn stop(&mut self, scheduler: &mut Scheduler) {
        if let Some(id) = self.timer.take() {
            scheduler.clear_interval(id);
        }
    }
}
