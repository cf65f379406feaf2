//! Background jobs whose result the single-threaded host polls for.

use std::sync::mpsc;
use std::thread;

/// Outcome of polling a [`Pending`] job.
#[derive(Debug, PartialEq, Eq)]
pub enum PendingPoll<T> {
    Ready(T),
    Waiting,
    /// The worker ended without sending a result.
    Disconnected,
}

/// Handle to a job running on a worker thread.
#[derive(Debug)]
pub struct Pending<T> {
    rx: mpsc::Receiver<T>,
}

pub fn spawn_worker<T, W>(work: W) -> Pending<T>
where
    T: Send + 'static,
    W: FnOnce() -> T + Send + 'static,
{
    let (tx, rx) = mpsc::channel::<T>();
    thread::spawn(move || {
        let result = work();
        let _ = tx.send(result);
    });
    Pending { rx }
}

impl<T> Pending<T> {
    pub fn poll(&self) -> PendingPoll<T> {
        match self.rx.try_recv() {
            Ok(result) => PendingPoll::Ready(result),
            Err(mpsc::TryRecvError::Empty) => PendingPoll::Waiting,
            Err(mpsc::TryRecvError::Disconnected) => PendingPoll::Disconnected,
        }
    }

    /// Blocks until the job finishes. `None` when the worker died.
    pub fn wait(self) -> Option<T> {
        self.rx.recv().ok()
    }
}
