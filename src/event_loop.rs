//! A single-threaded, timer-driven event loop.
//!
//! Every simulated lookup schedules its completion as a timer on an
//! [`EventLoop`]. Callbacks run on the thread that drives the loop, one at a
//! time and in deadline order, so nothing here needs to be `Send`.
//!
//! The loop is also a minimal executor: [`EventLoop::block_on`] polls a
//! future whenever its waker fired and otherwise advances the clock to the
//! next timer. A future that is pending while no timers remain can never
//! make progress, which `block_on` reports as [`EventLoopError::Stalled`].

use core::{
    cmp::{Ordering, Reverse},
    future::Future,
    task::{Context, Poll, Waker},
    time::Duration,
};

use std::{
    cell::{Cell, RefCell},
    collections::BinaryHeap,
    rc::Rc,
    sync::{
        atomic::{self, AtomicBool},
        Arc,
    },
    task::Wake,
    thread,
    time::Instant,
};

use tracing::trace;

use crate::error::EventLoopError;

type Task = Box<dyn FnOnce()>;

/// Longest delay a timer can be scheduled with; longer ones are clamped.
pub const MAX_DELAY: Duration = Duration::from_secs(365 * 24 * 60 * 60);

struct Timer {
    deadline: Instant,
    // ties on `deadline` fire in scheduling order
    seq: u64,
    task: Task,
}

impl PartialEq for Timer {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Timer {}

impl PartialOrd for Timer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timer {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.deadline, self.seq).cmp(&(other.deadline, other.seq))
    }
}

#[derive(Default)]
struct Reactor {
    timers: RefCell<BinaryHeap<Reverse<Timer>>>,
    next_seq: Cell<u64>,
}

/// Handle to an event loop. Clones share the same timer queue.
#[derive(Clone, Default)]
pub struct EventLoop {
    reactor: Rc<Reactor>,
}

impl EventLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `task` to run once `delay` has elapsed.
    ///
    /// The task never runs inside this call, even for a zero delay. Delays
    /// above [`MAX_DELAY`] are clamped to it.
    pub fn set_timeout(&self, delay: Duration, task: impl FnOnce() + 'static) {
        let delay = delay.min(MAX_DELAY);
        let seq = self.reactor.next_seq.get();
        self.reactor.next_seq.set(seq + 1);
        trace!(seq, ?delay, "timer scheduled");

        self.reactor.timers.borrow_mut().push(Reverse(Timer {
            deadline: Instant::now() + delay,
            seq,
            task: Box::new(task),
        }));
    }

    pub fn pending_timers(&self) -> usize {
        self.reactor.timers.borrow().len()
    }

    /// Fire timers until none are left.
    pub fn run(&self) {
        while self.turn() {}
    }

    /// Drive `future` to completion on the current thread.
    ///
    /// Timers still queued when the future completes are left unfired.
    pub fn block_on<F: Future>(&self, future: F) -> Result<F::Output, EventLoopError> {
        futures_lite::pin!(future);

        let signal = Arc::new(Signal(AtomicBool::new(true)));
        let waker = Waker::from(Arc::clone(&signal));
        let mut cx = Context::from_waker(&waker);

        loop {
            if signal.take() {
                if let Poll::Ready(output) = future.as_mut().poll(&mut cx) {
                    return Ok(output);
                }
                continue;
            }
            if !self.turn() {
                return Err(EventLoopError::Stalled);
            }
        }
    }

    /// Fire the earliest timer, sleeping until its deadline. Returns `false`
    /// when the queue is empty.
    fn turn(&self) -> bool {
        // the borrow must end before the task runs: tasks schedule timers
        let next = self.reactor.timers.borrow_mut().pop();
        let Some(Reverse(timer)) = next else {
            return false;
        };

        let now = Instant::now();
        if timer.deadline > now {
            thread::sleep(timer.deadline - now);
        }
        trace!(seq = timer.seq, "timer fired");
        (timer.task)();
        true
    }
}

/// Wake flag for the root future of `block_on`.
struct Signal(AtomicBool);

impl Signal {
    fn take(&self) -> bool {
        self.0.swap(false, atomic::Ordering::AcqRel)
    }
}

impl Wake for Signal {
    fn wake(self: Arc<Self>) {
        self.wake_by_ref();
    }

    fn wake_by_ref(self: &Arc<Self>) {
        self.0.store(true, atomic::Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use futures_lite::future;

    use super::*;

    fn recorder() -> (Rc<RefCell<Vec<u32>>>, impl Fn(u32) -> Box<dyn FnOnce()>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let push = {
            let log = Rc::clone(&log);
            move |n: u32| -> Box<dyn FnOnce()> {
                let log = Rc::clone(&log);
                Box::new(move || log.borrow_mut().push(n))
            }
        };
        (log, push)
    }

    #[test]
    fn fires_in_deadline_order() {
        let event_loop = EventLoop::new();
        let (log, push) = recorder();

        event_loop.set_timeout(Duration::from_millis(20), push(3));
        event_loop.set_timeout(Duration::from_millis(5), push(1));
        event_loop.set_timeout(Duration::from_millis(10), push(2));
        event_loop.run();

        assert_eq!(*log.borrow(), [1, 2, 3]);
        assert_eq!(event_loop.pending_timers(), 0);
    }

    #[test]
    fn equal_deadlines_fire_in_scheduling_order() {
        let event_loop = EventLoop::new();
        let (log, push) = recorder();

        for n in 0..5 {
            event_loop.set_timeout(Duration::ZERO, push(n));
        }
        event_loop.run();

        assert_eq!(*log.borrow(), [0, 1, 2, 3, 4]);
    }

    #[test]
    fn zero_delay_never_runs_inline() {
        let event_loop = EventLoop::new();
        let (log, push) = recorder();

        event_loop.set_timeout(Duration::ZERO, push(1));
        assert!(log.borrow().is_empty());
        assert_eq!(event_loop.pending_timers(), 1);

        event_loop.run();
        assert_eq!(*log.borrow(), [1]);
    }

    #[test]
    fn tasks_can_schedule_more_tasks() {
        let event_loop = EventLoop::new();
        let (log, push) = recorder();

        let handle = event_loop.clone();
        let second = push(2);
        let first = push(1);
        event_loop.set_timeout(Duration::ZERO, move || {
            first();
            handle.set_timeout(Duration::ZERO, second);
        });
        event_loop.run();

        assert_eq!(*log.borrow(), [1, 2]);
    }

    #[test]
    fn huge_delay_is_clamped() {
        let event_loop = EventLoop::new();
        let (log, push) = recorder();

        event_loop.set_timeout(Duration::MAX, push(2));
        event_loop.set_timeout(Duration::ZERO, push(1));
        assert_eq!(event_loop.pending_timers(), 2);

        // only fire the zero-delay timer; the clamped one stays queued
        assert!(event_loop.turn());
        assert_eq!(*log.borrow(), [1]);
        assert_eq!(event_loop.pending_timers(), 1);
    }

    #[test]
    fn sleeps_until_deadline() {
        const DELAY: Duration = Duration::from_millis(30);
        let event_loop = EventLoop::new();
        let start = Instant::now();
        event_loop.set_timeout(DELAY, || {});
        event_loop.run();
        assert!(start.elapsed() >= DELAY);
    }

    #[test]
    fn block_on_ready_future() {
        let event_loop = EventLoop::new();
        assert_eq!(event_loop.block_on(async { 7 }), Ok(7));
    }

    #[test]
    fn block_on_reports_stall() {
        let event_loop = EventLoop::new();
        let result = event_loop.block_on(future::pending::<()>());
        assert_eq!(result, Err(EventLoopError::Stalled));
    }
}
