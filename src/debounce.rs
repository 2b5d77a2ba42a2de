//! Per-Field Debounce
//!
//! Schedules one pending save per note field, cancelling and rescheduling on
//! every keystroke. The timer backend sits behind the `Schedule` trait so
//! the bookkeeping is testable off the browser event loop.

use std::cell::RefCell;
use std::collections::HashMap;

use gloo_timers::callback::Timeout;

/// Quiet period after the last keystroke before a note save fires.
pub const NOTE_DEBOUNCE_MS: u32 = 600;

/// Timer backend seam. A returned handle must cancel its timer when dropped.
pub trait Schedule {
    type Handle;

    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Self::Handle;
}

/// `gloo` timeout backend used in the browser.
pub struct TimeoutScheduler;

impl Schedule for TimeoutScheduler {
    type Handle = Timeout;

    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(delay_ms, callback)
    }
}

/// Independent debounce timers keyed by field index. Scheduling a key that
/// already has a pending timer replaces the handle, which cancels the old
/// timer; keys never affect each other.
pub struct Debouncer<S: Schedule> {
    scheduler: S,
    pending: RefCell<HashMap<usize, S::Handle>>,
}

/// The debouncer the note list uses.
pub type NoteDebouncer = Debouncer<TimeoutScheduler>;

impl Default for NoteDebouncer {
    fn default() -> Self {
        Debouncer::new(TimeoutScheduler)
    }
}

impl<S: Schedule> Debouncer<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            pending: RefCell::new(HashMap::new()),
        }
    }

    /// (Re)start the quiet-period timer for one field. Any pending timer for
    /// the same field is cancelled first; the event loop is single-threaded,
    /// so cancel-then-reschedule cannot interleave with a firing timer.
    pub fn schedule(&self, key: usize, delay_ms: u32, callback: impl FnOnce() + 'static) {
        let handle = self.scheduler.schedule(delay_ms, Box::new(callback));
        self.pending.borrow_mut().insert(key, handle);
    }

    /// Cancel the pending timer for one field, returning whether one was
    /// scheduled. Used on blur, where the caller saves immediately instead.
    /// A handle whose timer already fired may still be present; dropping it
    /// is a no-op.
    pub fn flush(&self, key: usize) -> bool {
        self.pending.borrow_mut().remove(&key).is_some()
    }

    /// Cancel everything (page teardown).
    pub fn cancel_all(&self) {
        self.pending.borrow_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Task {
        id: usize,
        due: u32,
        cancelled: bool,
        callback: Option<Box<dyn FnOnce()>>,
    }

    #[derive(Default)]
    struct ClockInner {
        now: u32,
        next_id: usize,
        tasks: Vec<Task>,
    }

    /// Manual clock: timers fire only when the test advances time.
    #[derive(Clone, Default)]
    struct TestClock(Rc<RefCell<ClockInner>>);

    impl TestClock {
        /// Move time without running timers: an input event at time `t` is
        /// processed before a timer due at the same instant.
        fn set_now(&self, time: u32) {
            self.0.borrow_mut().now = time;
        }

        fn advance_to(&self, time: u32) {
            loop {
                let callback = {
                    let mut inner = self.0.borrow_mut();
                    inner.now = time;
                    inner
                        .tasks
                        .iter_mut()
                        .filter(|t| !t.cancelled && t.due <= time && t.callback.is_some())
                        .min_by_key(|t| t.due)
                        .and_then(|t| t.callback.take())
                };
                match callback {
                    Some(cb) => cb(),
                    None => break,
                }
            }
        }
    }

    struct TestHandle {
        id: usize,
        clock: TestClock,
    }

    impl Drop for TestHandle {
        fn drop(&mut self) {
            let mut inner = self.clock.0.borrow_mut();
            if let Some(task) = inner.tasks.iter_mut().find(|t| t.id == self.id) {
                task.cancelled = true;
            }
        }
    }

    struct TestScheduler {
        clock: TestClock,
    }

    impl Schedule for TestScheduler {
        type Handle = TestHandle;

        fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> TestHandle {
            let mut inner = self.clock.0.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            let due = inner.now + delay_ms;
            inner.tasks.push(Task {
                id,
                due,
                cancelled: false,
                callback: Some(callback),
            });
            TestHandle {
                id,
                clock: self.clock.clone(),
            }
        }
    }

    fn debouncer_with_clock() -> (Debouncer<TestScheduler>, TestClock) {
        let clock = TestClock::default();
        let debouncer = Debouncer::new(TestScheduler {
            clock: clock.clone(),
        });
        (debouncer, clock)
    }

    #[test]
    fn keystroke_bursts_collapse_to_one_save() {
        let (debouncer, clock) = debouncer_with_clock();
        let saves = Rc::new(Cell::new(0u32));

        // keystrokes at t=0, t=100, t=700; the one at t=700 lands before
        // the timer scheduled at t=100 would fire
        for t in [0, 100, 700] {
            clock.set_now(t);
            let saves = Rc::clone(&saves);
            debouncer.schedule(0, NOTE_DEBOUNCE_MS, move || saves.set(saves.get() + 1));
        }

        clock.advance_to(1299);
        assert_eq!(saves.get(), 0);
        clock.advance_to(1300);
        assert_eq!(saves.get(), 1, "save fires once, at t+700+600");
        clock.advance_to(10_000);
        assert_eq!(saves.get(), 1);
    }

    #[test]
    fn blur_cancels_pending_timer() {
        let (debouncer, clock) = debouncer_with_clock();
        let timer_saves = Rc::new(Cell::new(0u32));
        let mut immediate_saves = 0u32;

        for t in [0, 100, 700] {
            clock.set_now(t);
            let saves = Rc::clone(&timer_saves);
            debouncer.schedule(0, NOTE_DEBOUNCE_MS, move || saves.set(saves.get() + 1));
        }

        // blur at t=750: cancel the pending timer and save right away
        clock.advance_to(750);
        assert!(debouncer.flush(0));
        immediate_saves += 1;

        clock.advance_to(10_000);
        assert_eq!(timer_saves.get(), 0, "cancelled timer never fires");
        assert_eq!(immediate_saves, 1);
        assert!(!debouncer.flush(0), "nothing left pending");
    }

    #[test]
    fn fields_debounce_independently() {
        let (debouncer, clock) = debouncer_with_clock();
        let first = Rc::new(Cell::new(0u32));
        let second = Rc::new(Cell::new(0u32));

        {
            let first = Rc::clone(&first);
            debouncer.schedule(0, NOTE_DEBOUNCE_MS, move || first.set(first.get() + 1));
        }
        clock.advance_to(300);
        {
            let second = Rc::clone(&second);
            debouncer.schedule(1, NOTE_DEBOUNCE_MS, move || second.set(second.get() + 1));
        }

        // rescheduling field 1 leaves field 0's timer alone
        clock.advance_to(500);
        {
            let second = Rc::clone(&second);
            debouncer.schedule(1, NOTE_DEBOUNCE_MS, move || second.set(second.get() + 1));
        }

        clock.advance_to(600);
        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 0);
        clock.advance_to(1100);
        assert_eq!(second.get(), 1);
    }

    #[test]
    fn cancel_all_clears_every_pending_timer() {
        let (debouncer, clock) = debouncer_with_clock();
        let saves = Rc::new(Cell::new(0u32));
        for key in 0..3 {
            let saves = Rc::clone(&saves);
            debouncer.schedule(key, NOTE_DEBOUNCE_MS, move || saves.set(saves.get() + 1));
        }

        debouncer.cancel_all();
        clock.advance_to(10_000);
        assert_eq!(saves.get(), 0);
    }
}
