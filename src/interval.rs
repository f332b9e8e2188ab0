use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{dispatcher, info, warn};

/// Allows at most one holder at a time. Callers that lose the race skip
/// their work instead of waiting.
#[derive(Debug, Clone, Default)]
pub struct SingleFlight {
    running: Arc<AtomicBool>,
}

impl SingleFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a guard if nothing else is running. The flag is released when
    /// the guard drops.
    pub fn try_begin(&self) -> Option<FlightGuard> {
        self.running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| FlightGuard {
                running: Arc::clone(&self.running),
            })
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}

#[derive(Debug)]
pub struct FlightGuard {
    running: Arc<AtomicBool>,
}

impl Drop for FlightGuard {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Release);
    }
}

/// Calls a job every `delay` until stopped.
///
/// Ticks follow a fixed schedule (`start + n * delay`) on a ticker thread and
/// each run happens on its own worker thread. A tick that comes due while the
/// previous run still holds the [`SingleFlight`] guard is skipped.
pub struct IntervalRunner {
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl IntervalRunner {
    pub fn start<F>(delay: Duration, flight: SingleFlight, job: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        let job = Arc::new(job);
        let dispatch = dispatcher::get_default(|d| d.clone());
        let (stop, stopped) = mpsc::channel::<()>();
        let handle = thread::spawn(move || {
            dispatcher::with_default(&dispatch, || {
                let mut worker: Option<JoinHandle<()>> = None;
                let mut next = Instant::now() + delay;
                loop {
                    let wait = next.saturating_duration_since(Instant::now());
                    match stopped.recv_timeout(wait) {
                        Err(RecvTimeoutError::Timeout) => {}
                        // Stop requested, or the runner was dropped.
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                    next += delay;

                    let Some(guard) = flight.try_begin() else {
                        warn!(
                            "interval script takes longer to run than interval allows, \
                             skipping this run"
                        );
                        continue;
                    };
                    if let Some(done) = worker.take() {
                        let _ = done.join();
                    }
                    let job = Arc::clone(&job);
                    let dispatch = dispatch.clone();
                    worker = Some(thread::spawn(move || {
                        let _guard = guard;
                        dispatcher::with_default(&dispatch, || (*job)());
                    }));
                }
                if let Some(running) = worker {
                    let _ = running.join();
                }
            })
        });
        Self {
            stop: Some(stop),
            handle: Some(handle),
        }
    }

    /// Stops ticking and waits for a run in progress to finish.
    pub fn stop(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for IntervalRunner {
    fn drop(&mut self) {
        self.stop();
    }
}

/// The intervals owned by one action.
#[derive(Default)]
pub struct Intervals {
    running: Vec<IntervalRunner>,
}

impl Intervals {
    pub fn push(&mut self, runner: IntervalRunner) {
        self.running.push(runner);
    }

    pub fn len(&self) -> usize {
        self.running.len()
    }

    pub fn is_empty(&self) -> bool {
        self.running.is_empty()
    }

    pub fn clear(&mut self) {
        info!(
            "clearing intervals (found {} running, should be 1)",
            self.running.len()
        );
        for mut runner in self.running.drain(..) {
            runner.stop();
        }
    }
}
