use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use std::time::Duration;

use gloo_timers::callback::Timeout;

use super::tracker::{ProgressSnapshot, Signal, StepProgressTracker};
use super::viewport::{EntryCallback, RegionKind, ViewportRegion, VisibilityEntry, VisibilityObserver};

/// A scheduled one-shot task that can be called off.
pub trait Cancel {
    fn cancel(self);
}

pub trait Scheduler {
    type Handle: Cancel + 'static;

    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Self::Handle;
}

/// Browser scheduler backed by `setTimeout`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeoutScheduler;

impl Cancel for Timeout {
    fn cancel(self) {
        // Dropping a pending timeout clears it.
        drop(self);
    }
}

impl Scheduler for TimeoutScheduler {
    type Handle = Timeout;

    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Timeout {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        Timeout::new(millis, task)
    }
}

struct SessionInner<S: Scheduler> {
    tracker: RefCell<StepProgressTracker>,
    queue: RefCell<VecDeque<Signal>>,
    draining: Cell<bool>,
    pending: RefCell<Option<S::Handle>>,
    scheduler: S,
    on_change: Box<dyn Fn(ProgressSnapshot)>,
}

impl<S: Scheduler + 'static> SessionInner<S> {
    fn dispatch(self: &Rc<Self>, signal: Signal) {
        self.queue.borrow_mut().push_back(signal);
        if self.draining.get() {
            // The outer loop further up the stack picks it up in order.
            return;
        }

        self.draining.set(true);
        loop {
            let next = self.queue.borrow_mut().pop_front();
            let Some(signal) = next else { break };

            let (deferred, before, after) = {
                let mut tracker = self.tracker.borrow_mut();
                let before = tracker.snapshot();
                let deferred = tracker.apply(signal);
                (deferred, before, tracker.snapshot())
            };

            if let Some(deferred) = deferred {
                let weak = Rc::downgrade(self);
                let handle = self.scheduler.schedule(
                    deferred.delay,
                    Box::new(move || {
                        if let Some(inner) = weak.upgrade() {
                            inner.dispatch(Signal::DeferredElapsed(deferred.ticket));
                        }
                    }),
                );
                let stale = self.pending.borrow_mut().replace(handle);
                if let Some(stale) = stale {
                    stale.cancel();
                }
            }

            if after != before {
                (self.on_change)(after);
            }
        }
        self.draining.set(false);
    }

    fn dispatch_entries(self: &Rc<Self>, kind: RegionKind, entries: &[VisibilityEntry]) {
        for entry in entries {
            match entry.signal(kind) {
                Some(signal) => self.dispatch(signal),
                None if entry.step_index.is_none() => {
                    log::debug!("visibility entry without a step index");
                }
                None => {}
            }
        }
    }
}

/// Binds a [`StepProgressTracker`] to a visibility observer and a scheduler
/// for the lifetime of one mounted section.
pub struct ProgressSession<O: VisibilityObserver, S: Scheduler + 'static> {
    inner: Rc<SessionInner<S>>,
    observer: O,
    torn_down: bool,
}

impl<O: VisibilityObserver, S: Scheduler + 'static> ProgressSession<O, S> {
    /// Registers every `(index, target)` pair and starts tracking. The final
    /// step is watched with the looser final-step band, every target is also
    /// watched for leaving through the top.
    pub fn mount(
        total: usize,
        targets: Vec<(usize, O::Target)>,
        mut observer: O,
        scheduler: S,
        on_change: impl Fn(ProgressSnapshot) + 'static,
    ) -> Self {
        let inner = Rc::new(SessionInner {
            tracker: RefCell::new(StepProgressTracker::new(total)),
            queue: RefCell::new(VecDeque::new()),
            draining: Cell::new(false),
            pending: RefCell::new(None),
            scheduler,
            on_change: Box::new(on_change),
        });

        let mut body = Vec::new();
        let mut last = Vec::new();
        let mut tracked = 0;
        for (index, target) in targets {
            if index >= total {
                log::debug!("skipping step target {} of {}", index, total);
                continue;
            }
            tracked += 1;
            if index + 1 == total {
                last.push(target);
            } else {
                body.push(target);
            }
        }
        log::debug!("tracking {} of {} steps", tracked, total);

        let focus = Self::callback(&inner, RegionKind::Focus);
        let completion = Self::callback(&inner, RegionKind::Completion);

        observer.observe(&body, &ViewportRegion::focus_band(), focus.clone());
        observer.observe(&last, &ViewportRegion::final_step_band(), focus);
        // Completion watches the same elements; regroup them in index order.
        let mut targets: Vec<O::Target> = body;
        targets.extend(last);
        observer.observe(&targets, &ViewportRegion::completion_band(), completion);

        Self {
            inner,
            observer,
            torn_down: false,
        }
    }

    fn callback(inner: &Rc<SessionInner<S>>, kind: RegionKind) -> EntryCallback {
        let weak: Weak<SessionInner<S>> = Rc::downgrade(inner);
        Rc::new(move |entries: &[VisibilityEntry]| {
            if let Some(inner) = weak.upgrade() {
                inner.dispatch_entries(kind, entries);
            }
        })
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> ProgressSnapshot {
        self.inner.tracker.borrow().snapshot()
    }

    /// Releases observers and the pending final-step timer. Idempotent.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.observer.unobserve_all();
        self.inner.tracker.borrow_mut().teardown();
        let pending = self.inner.pending.borrow_mut().take();
        if let Some(handle) = pending {
            handle.cancel();
        }
        self.inner.queue.borrow_mut().clear();
    }
}

impl<O: VisibilityObserver, S: Scheduler + 'static> Drop for ProgressSession<O, S> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::how_it_works::tracker::FINAL_STEP_DELAY;

    type Task = Box<dyn FnOnce()>;

    #[derive(Default)]
    struct Clock {
        now: u64,
        next_id: u64,
        tasks: Vec<(u64, u64, Option<Task>)>,
    }

    /// Deterministic scheduler driven by `advance`.
    #[derive(Clone, Default)]
    struct ManualScheduler {
        clock: Rc<RefCell<Clock>>,
    }

    struct ManualHandle {
        id: u64,
        clock: Rc<RefCell<Clock>>,
    }

    impl Cancel for ManualHandle {
        fn cancel(self) {
            let mut clock = self.clock.borrow_mut();
            for (_, id, task) in clock.tasks.iter_mut() {
                if *id == self.id {
                    task.take();
                }
            }
        }
    }

    impl Scheduler for ManualScheduler {
        type Handle = ManualHandle;

        fn schedule(&self, delay: Duration, task: Task) -> ManualHandle {
            let mut clock = self.clock.borrow_mut();
            let id = clock.next_id;
            clock.next_id += 1;
            let due = clock.now + delay.as_millis() as u64;
            clock.tasks.push((due, id, Some(task)));
            ManualHandle {
                id,
                clock: self.clock.clone(),
            }
        }
    }

    impl ManualScheduler {
        fn advance(&self, millis: u64) {
            let target = self.clock.borrow().now + millis;
            loop {
                let due = {
                    let mut clock = self.clock.borrow_mut();
                    clock.tasks.sort_by_key(|(due, id, _)| (*due, *id));
                    let position = clock
                        .tasks
                        .iter()
                        .position(|(due, _, task)| *due <= target && task.is_some());
                    position.map(|position| {
                        let (due, _, task) = clock.tasks.remove(position);
                        clock.now = due;
                        task
                    })
                };
                match due {
                    Some(Some(task)) => task(),
                    _ => break,
                }
            }
            self.clock.borrow_mut().now = target;
        }

        fn live_tasks(&self) -> usize {
            self.clock.borrow().tasks.iter().filter(|(_, _, task)| task.is_some()).count()
        }
    }

    #[derive(Default)]
    struct Registry {
        registrations: Vec<(Vec<usize>, ViewportRegion, EntryCallback)>,
        unobserved: usize,
    }

    /// Observer whose targets are plain indices; the test fires entries.
    #[derive(Clone, Default)]
    struct FakeViewport {
        registry: Rc<RefCell<Registry>>,
    }

    impl VisibilityObserver for FakeViewport {
        type Target = usize;

        fn observe(&mut self, targets: &[usize], region: &ViewportRegion, on_change: EntryCallback) {
            self.registry
                .borrow_mut()
                .registrations
                .push((targets.to_vec(), region.clone(), on_change));
        }

        fn unobserve_all(&mut self) {
            let mut registry = self.registry.borrow_mut();
            registry.registrations.clear();
            registry.unobserved += 1;
        }
    }

    impl FakeViewport {
        fn fire(&self, region: &ViewportRegion, entries: &[VisibilityEntry]) {
            let callbacks: Vec<EntryCallback> = self
                .registry
                .borrow()
                .registrations
                .iter()
                .filter(|(_, registered, _)| registered == region)
                .map(|(_, _, callback)| callback.clone())
                .collect();
            for callback in callbacks {
                callback(entries);
            }
        }

        fn focus(&self, index: usize, total: usize) {
            let region = if index + 1 == total {
                ViewportRegion::final_step_band()
            } else {
                ViewportRegion::focus_band()
            };
            self.fire(&region, &[entering(index)]);
        }

        fn scroll_past(&self, index: usize) {
            self.fire(&ViewportRegion::completion_band(), &[leaving_top(index)]);
        }

        fn targets(&self, region: &ViewportRegion) -> Vec<usize> {
            self.registry
                .borrow()
                .registrations
                .iter()
                .filter(|(_, registered, _)| registered == region)
                .flat_map(|(targets, _, _)| targets.clone())
                .collect()
        }
    }

    fn entering(index: usize) -> VisibilityEntry {
        VisibilityEntry {
            step_index: Some(index),
            intersection_ratio: 0.3,
            is_intersecting: true,
            bounding_top: 240.0,
        }
    }

    fn leaving_top(index: usize) -> VisibilityEntry {
        VisibilityEntry {
            step_index: Some(index),
            intersection_ratio: 0.0,
            is_intersecting: false,
            bounding_top: -480.0,
        }
    }

    struct Harness {
        viewport: FakeViewport,
        scheduler: ManualScheduler,
        seen: Rc<RefCell<Vec<ProgressSnapshot>>>,
        session: ProgressSession<FakeViewport, ManualScheduler>,
    }

    fn mount(total: usize) -> Harness {
        let viewport = FakeViewport::default();
        let scheduler = ManualScheduler::default();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let session = ProgressSession::mount(
            total,
            (0..total).map(|index| (index, index)).collect(),
            viewport.clone(),
            scheduler.clone(),
            move |snapshot| sink.borrow_mut().push(snapshot),
        );
        Harness {
            viewport,
            scheduler,
            seen,
            session,
        }
    }

    #[test]
    fn registers_final_step_with_looser_band() {
        let harness = mount(4);
        let viewport = &harness.viewport;

        assert_eq!(viewport.targets(&ViewportRegion::focus_band()), vec![0, 1, 2]);
        assert_eq!(viewport.targets(&ViewportRegion::final_step_band()), vec![3]);
        assert_eq!(viewport.targets(&ViewportRegion::completion_band()), vec![0, 1, 2, 3]);
    }

    #[test]
    fn focus_and_scroll_past_update_listener() {
        let harness = mount(4);
        harness.viewport.focus(0, 4);
        harness.viewport.scroll_past(0);
        harness.viewport.focus(1, 4);

        let seen = harness.seen.borrow();
        assert_eq!(seen.len(), 3);
        let last = seen.last().expect("snapshot");
        assert_eq!(last.active, Some(1));
        assert_eq!(last.completed.iter().copied().collect::<Vec<_>>(), vec![0]);
        assert_eq!(last.progress, 0.5);
    }

    #[test]
    fn final_step_completes_after_delay() {
        let harness = mount(3);
        harness.viewport.focus(2, 3);
        assert_eq!(harness.session.snapshot().active, Some(2));
        assert!(!harness.session.snapshot().completed.contains(&2));

        harness.scheduler.advance(FINAL_STEP_DELAY.as_millis() as u64 - 1);
        assert!(!harness.session.snapshot().completed.contains(&2));

        harness.scheduler.advance(1);
        assert!(harness.session.snapshot().completed.contains(&2));
        assert_eq!(harness.session.snapshot().progress, 1.0);
    }

    #[test]
    fn teardown_before_deadline_cancels_completion() {
        let mut harness = mount(3);
        harness.viewport.focus(2, 3);
        harness.scheduler.advance(500);

        harness.session.teardown();
        assert_eq!(harness.scheduler.live_tasks(), 0);
        assert_eq!(harness.viewport.registry.borrow().unobserved, 1);

        harness.scheduler.advance(1_000);
        assert!(!harness.session.snapshot().completed.contains(&2));

        harness.session.teardown();
        assert_eq!(harness.viewport.registry.borrow().unobserved, 1);
    }

    #[test]
    fn signals_after_teardown_are_ignored() {
        let mut harness = mount(3);
        let viewport = harness.viewport.clone();
        // Keep a registration alive past teardown to mimic a late browser callback.
        let late = viewport.registry.borrow().registrations[0].2.clone();
        harness.session.teardown();
        let notified = harness.seen.borrow().len();

        late(&[entering(1)]);

        assert_eq!(harness.seen.borrow().len(), notified);
        assert_eq!(harness.session.snapshot().active, None);
    }

    #[test]
    fn dropping_the_session_releases_everything() {
        let harness = mount(2);
        harness.viewport.focus(1, 2);
        let Harness {
            viewport,
            scheduler,
            seen,
            session,
        } = harness;
        drop(session);

        assert_eq!(scheduler.live_tasks(), 0);
        assert_eq!(viewport.registry.borrow().unobserved, 1);
        let notified = seen.borrow().len();
        scheduler.advance(2_000);
        assert_eq!(seen.borrow().len(), notified);
    }

    #[test]
    fn batches_apply_in_arrival_order() {
        let harness = mount(4);
        harness
            .viewport
            .fire(&ViewportRegion::focus_band(), &[entering(2), entering(0)]);

        let snapshot = harness.session.snapshot();
        assert_eq!(snapshot.active, Some(0));
        assert_eq!(snapshot.completed.iter().copied().collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn entries_without_index_are_ignored() {
        let harness = mount(3);
        let orphan = VisibilityEntry {
            step_index: None,
            intersection_ratio: 1.0,
            is_intersecting: true,
            bounding_top: 0.0,
        };
        harness.viewport.fire(&ViewportRegion::focus_band(), &[orphan]);

        assert!(harness.seen.borrow().is_empty());
    }

    #[test]
    fn reentrant_dispatch_is_queued() {
        let viewport = FakeViewport::default();
        let scheduler = ManualScheduler::default();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let echo = viewport.clone();
        let _session = ProgressSession::mount(
            4,
            (0..4).map(|index| (index, index)).collect(),
            viewport.clone(),
            scheduler,
            move |snapshot: ProgressSnapshot| {
                if snapshot.active == Some(0) {
                    // The listener scrolls the page, which reports step 0 as passed.
                    echo.scroll_past(0);
                }
                sink.borrow_mut().push(snapshot);
            },
        );

        viewport.focus(0, 4);

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].completed.len(), 0);
        assert!(seen[1].completed.contains(&0));
    }
}
