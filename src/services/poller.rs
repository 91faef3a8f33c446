//! Fixed-interval polling task with explicit start/stop.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

/// Runs a job immediately and then on every interval until stopped.
///
/// Each run is awaited before the next one is scheduled, so runs never
/// overlap. `trigger` forces an early run without resetting the schedule.
pub struct Poller {
    handle: Option<JoinHandle<()>>,
    shutdown: watch::Sender<bool>,
    wake: Arc<Notify>,
}

impl Poller {
    /// Spawn the polling task on the current runtime.
    pub fn start<F, Fut>(interval: Duration, mut job: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (shutdown, mut shutdown_rx) = watch::channel(false);
        let wake = Arc::new(Notify::new());
        let wake_rx = wake.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = shutdown_rx.changed() => break,
                    _ = ticker.tick() => {}
                    _ = wake_rx.notified() => {}
                }

                tokio::select! {
                    _ = shutdown_rx.changed() => break,
                    _ = job() => {}
                }
            }
            debug!("Poller stopped");
        });

        Self {
            handle: Some(handle),
            shutdown,
            wake,
        }
    }

    /// Run the job as soon as the current run (if any) finishes.
    pub fn trigger(&self) {
        self.wake.notify_one();
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Signal the task to stop and wait for it to exit.
    ///
    /// A run in progress is cancelled at its next await point.
    pub async fn stop(mut self) {
        let _ = self.shutdown.send(true);
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_poller(interval: Duration) -> (Poller, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();
        let poller = Poller::start(interval, move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });
        (poller, count)
    }

    #[tokio::test(start_paused = true)]
    async fn test_runs_immediately_then_on_interval() {
        let (poller, count) = counting_poller(Duration::from_secs(60));

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(count.load(Ordering::SeqCst), 2);

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);

        poller.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_halts_polling() {
        let (poller, count) = counting_poller(Duration::from_secs(60));

        tokio::time::sleep(Duration::from_secs(90)).await;
        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert!(poller.is_running());

        poller.stop().await;
        tokio::time::sleep(Duration::from_secs(600)).await;
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_trigger_runs_early() {
        let (poller, count) = counting_poller(Duration::from_secs(60));

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);

        poller.trigger();
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(count.load(Ordering::SeqCst), 2);

        poller.stop().await;
    }
}
