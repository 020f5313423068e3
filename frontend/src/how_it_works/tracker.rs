use std::collections::BTreeSet;
use std::time::Duration;

/// How long the final step stays active before it counts as read.
pub const FINAL_STEP_DELAY: Duration = Duration::from_millis(800);

/// A single layout signal about one step element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// The step entered its focus region.
    Focus(usize),
    /// The step scrolled out of view above the viewport.
    Completed(usize),
    /// A previously scheduled final-step completion came due.
    DeferredElapsed(u64),
}

/// Request to run `Signal::DeferredElapsed(ticket)` after `delay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeferredCompletion {
    pub ticket: u64,
    pub delay: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Pending,
    Active,
    Completed,
}

/// Immutable copy of the tracker state handed to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressSnapshot {
    pub total: usize,
    pub active: Option<usize>,
    pub completed: BTreeSet<usize>,
    pub progress: f64,
}

impl ProgressSnapshot {
    pub fn empty(total: usize) -> Self {
        Self {
            total,
            active: None,
            completed: BTreeSet::new(),
            progress: 0.0,
        }
    }

    pub fn status(&self, index: usize) -> StepStatus {
        if self.completed.contains(&index) {
            StepStatus::Completed
        } else if self.active == Some(index) {
            StepStatus::Active
        } else {
            StepStatus::Pending
        }
    }

    pub fn percent(&self) -> f64 {
        self.progress * 100.0
    }

    /// Steps the reader has reached: completed ones plus an active step that
    /// is not completed yet.
    pub fn reached(&self) -> usize {
        let active_pending = self
            .active
            .map_or(false, |index| !self.completed.contains(&index));
        self.completed.len() + usize::from(active_pending)
    }
}

/// Scroll-driven progress through an ordered list of narrative steps.
///
/// The tracker is purely observation driven: focus signals move the active
/// step forward and complete everything before it, completion signals mark a
/// step as passed, and the final step completes itself after
/// [`FINAL_STEP_DELAY`] because nothing follows it to scroll past. Completed
/// steps are never removed, so progress only grows until the tracker is
/// dropped.
#[derive(Debug, Clone)]
pub struct StepProgressTracker {
    total: usize,
    active: Option<usize>,
    completed: BTreeSet<usize>,
    progress: f64,
    pending_final: Option<u64>,
    next_ticket: u64,
    torn_down: bool,
}

impl StepProgressTracker {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            active: None,
            completed: BTreeSet::new(),
            progress: 0.0,
            pending_final: None,
            next_ticket: 0,
            torn_down: false,
        }
    }

    #[cfg(test)]
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    #[cfg(test)]
    pub fn is_completed(&self, index: usize) -> bool {
        self.completed.contains(&index)
    }

    #[cfg(test)]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn last_index(&self) -> Option<usize> {
        self.total.checked_sub(1)
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            total: self.total,
            active: self.active,
            completed: self.completed.clone(),
            progress: self.progress,
        }
    }

    /// Applies one signal. Returns the deferred completion the caller has to
    /// schedule, if the signal asked for one.
    pub fn apply(&mut self, signal: Signal) -> Option<DeferredCompletion> {
        match signal {
            Signal::Focus(index) => self.focus(index),
            Signal::Completed(index) => {
                self.complete(index);
                None
            }
            Signal::DeferredElapsed(ticket) => {
                self.deferred_elapsed(ticket);
                None
            }
        }
    }

    pub fn focus(&mut self, index: usize) -> Option<DeferredCompletion> {
        if self.torn_down || index >= self.total {
            log::debug!("ignoring focus for step {} of {}", index, self.total);
            return None;
        }

        self.active = Some(index);
        self.completed.extend(0..index);
        self.recompute();

        if Some(index) != self.last_index()
            || self.pending_final.is_some()
            || self.completed.contains(&index)
        {
            return None;
        }

        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.pending_final = Some(ticket);
        Some(DeferredCompletion {
            ticket,
            delay: FINAL_STEP_DELAY,
        })
    }

    pub fn complete(&mut self, index: usize) {
        if self.torn_down || index >= self.total {
            log::debug!("ignoring completion for step {} of {}", index, self.total);
            return;
        }
        self.completed.insert(index);
        self.recompute();
    }

    pub fn deferred_elapsed(&mut self, ticket: u64) {
        if self.torn_down || self.pending_final != Some(ticket) {
            log::debug!("stale final step completion {}", ticket);
            return;
        }
        self.pending_final = None;
        if let Some(last) = self.last_index() {
            self.completed.insert(last);
            self.recompute();
        }
    }

    /// Stops the tracker. Any later signal, including a timer that slipped
    /// past cancellation, is a no-op.
    pub fn teardown(&mut self) {
        self.torn_down = true;
        self.pending_final = None;
    }

    fn recompute(&mut self) {
        if self.total == 0 {
            self.progress = 0.0;
            return;
        }
        let reached = self.completed.len() + usize::from(self.active.is_some());
        self.progress = (reached as f64 / self.total as f64).min(1.0);
    }
}
