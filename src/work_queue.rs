//! Blocking FIFO shared between the dispatching thread and the workers.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

/// Returned by [`WorkQueue::push`] after shutdown, handing the item back.
#[derive(PartialEq, Eq)]
pub struct PushError<T>(pub T);

impl<T> fmt::Debug for PushError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PushError(..)")
    }
}

impl<T> fmt::Display for PushError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("push on a work queue that has been shut down")
    }
}

impl<T> std::error::Error for PushError<T> {}

struct QueueState<T> {
    items: VecDeque<T>,
    shutdown: bool,
}

pub struct WorkQueue<T> {
    state: Mutex<QueueState<T>>,
    available: Condvar,
}

impl<T> WorkQueue<T> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(QueueState {
                items: VecDeque::new(),
                shutdown: false,
            }),
            available: Condvar::new(),
        }
    }

    // Every operation leaves the state consistent, so a panic elsewhere
    // while holding the lock does not invalidate it.
    fn lock(&self) -> MutexGuard<'_, QueueState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends an item and wakes one waiting consumer.
    pub fn push(&self, item: T) -> Result<(), PushError<T>> {
        let mut state = self.lock();
        if state.shutdown {
            return Err(PushError(item));
        }
        state.items.push_back(item);
        self.available.notify_one();
        Ok(())
    }

    /// Blocks until an item is available or the queue is shut down.
    ///
    /// Pending items are still handed out after shutdown; `None` means the
    /// queue is both drained and shut down, and no more work will arrive.
    pub fn pop(&self) -> Option<T> {
        let mut state = self
            .available
            .wait_while(self.lock(), |s| s.items.is_empty() && !s.shutdown)
            .unwrap_or_else(PoisonError::into_inner);
        state.items.pop_front()
    }

    /// Marks the queue closed for pushes and wakes every waiting consumer.
    pub fn shutdown(&self) {
        let mut state = self.lock();
        state.shutdown = true;
        self.available.notify_all();
    }

    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_shutdown(&self) -> bool {
        self.lock().shutdown
    }
}

impl<T> Default for WorkQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn pops_in_fifo_order_then_reports_no_more_work() {
        let queue = WorkQueue::new();
        for i in 0..5 {
            queue.push(i).unwrap();
        }
        queue.shutdown();

        let drained: Vec<_> = (0..5).map(|_| queue.pop()).collect();
        assert_eq!(drained, vec![Some(0), Some(1), Some(2), Some(3), Some(4)]);
        assert_eq!(queue.pop(), None);
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn push_after_shutdown_hands_item_back() {
        let queue = WorkQueue::new();
        queue.shutdown();
        assert_eq!(queue.push(7), Err(PushError(7)));
        assert!(queue.is_empty());
        assert!(queue.is_shutdown());
    }

    #[test]
    fn shutdown_wakes_every_blocked_consumer() {
        let queue: WorkQueue<u32> = WorkQueue::new();
        thread::scope(|s| {
            let waiters: Vec<_> = (0..4).map(|_| s.spawn(|| queue.pop())).collect();
            thread::sleep(Duration::from_millis(50));
            queue.shutdown();
            for waiter in waiters {
                assert_eq!(waiter.join().unwrap(), None);
            }
        });
    }

    #[test]
    fn blocked_consumer_receives_late_push() {
        let queue = WorkQueue::new();
        thread::scope(|s| {
            let consumer = s.spawn(|| queue.pop());
            thread::sleep(Duration::from_millis(50));
            queue.push("tile").unwrap();
            assert_eq!(consumer.join().unwrap(), Some("tile"));
        });
    }

    #[test]
    fn concurrent_consumers_take_each_item_exactly_once() {
        const ITEMS: usize = 10_000;
        let queue = WorkQueue::new();
        for i in 0..ITEMS {
            queue.push(i).unwrap();
        }
        queue.shutdown();

        let mut seen: Vec<usize> = thread::scope(|s| {
            let workers: Vec<_> = (0..8)
                .map(|_| {
                    s.spawn(|| {
                        let mut taken = Vec::new();
                        while let Some(i) = queue.pop() {
                            taken.push(i);
                        }
                        taken
                    })
                })
                .collect();
            workers
                .into_iter()
                .flat_map(|w| w.join().unwrap())
                .collect()
        });

        seen.sort_unstable();
        assert_eq!(seen, (0..ITEMS).collect::<Vec<_>>());
    }
}
