// ticker.rs - Periodic generation ticks driven by a tokio interval

use std::time::Duration;
use tokio::runtime::Runtime;
use tokio::sync::mpsc::{self, Receiver, error::TrySendError};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Emits one tick per interval while running. At most one tick waits to be
/// taken with [`Ticker::take_tick`]; ticks that find one already waiting are
/// dropped, so a UI that falls behind never replays a backlog.
pub struct Ticker {
    runtime  : Runtime,
    interval : Duration,
    task     : Option<JoinHandle<()>>,
    ticks    : Option<Receiver<()>>,
}

impl Ticker {
    pub fn new(interval: Duration) -> std::io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("conway-ticker")
            .enable_time()
            .build()?;

        Ok(Self { runtime, interval, task: None, ticks: None })
    }

    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Starts ticking. `wake` runs after every tick so an idle UI notices it.
    pub fn start<F>(&mut self, wake: F)
    where
        F: Fn() + Send + 'static,
    {
        self.stop();

        let (tx, rx) = mpsc::channel(1);
        let period = self.interval;
        let task = self.runtime.spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            interval.tick().await;    // the first tick completes immediately

            loop {
                interval.tick().await;
                match tx.try_send(()) {
                    Ok(()) => wake(),
                    Err(TrySendError::Full(())) => {}
                    Err(TrySendError::Closed(())) => break,
                }
            }
        });

        self.task = Some(task);
        self.ticks = Some(rx);
    }

    /// Stops ticking and drops any ticks not yet drained.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.ticks = None;
    }

    /// Changes the interval, restarting the task if it is running.
    pub fn set_interval<F>(&mut self, interval: Duration, wake: F)
    where
        F: Fn() + Send + 'static,
    {
        self.interval = interval;
        if self.is_running() {
            self.start(wake);
        }
    }

    /// Takes the waiting tick, if any.
    pub fn take_tick(&mut self) -> bool {
        self.ticks.as_mut().is_some_and(|ticks| ticks.try_recv().is_ok())
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}
