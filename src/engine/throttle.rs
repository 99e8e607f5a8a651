//! Cooperative throttle: a park/unpark permit and the ticker that releases it.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Single-permit parking spot for the caller's thread.
///
/// [`Pacer::unpark`] makes the permit available; [`Pacer::park`] consumes it,
/// blocking until one is available. Permits do not accumulate, so any number
/// of unparks while the caller is busy release at most one park.
#[derive(Debug, Clone, Default)]
pub struct Pacer {
    inner: Arc<PacerInner>,
}

#[derive(Debug, Default)]
struct PacerInner {
    permit: Mutex<bool>,
    wakeup: Condvar,
}

impl Pacer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blocks until the permit is available, then consumes it.
    pub fn park(&self) {
        let mut permit = self
            .inner
            .permit
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        while !*permit {
            permit = self
                .inner
                .wakeup
                .wait(permit)
                .unwrap_or_else(PoisonError::into_inner);
        }
        *permit = false;
    }

    /// Like [`Pacer::park`] but gives up after `timeout`.
    ///
    /// Returns `true` if the permit was consumed.
    pub fn park_timeout(&self, timeout: Duration) -> bool {
        let permit = self
            .inner
            .permit
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let (mut permit, _) = self
            .inner
            .wakeup
            .wait_timeout_while(permit, timeout, |available| !*available)
            .unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *permit, false)
    }

    /// Makes the permit available and wakes a parked caller.
    pub fn unpark(&self) {
        let mut permit = self
            .inner
            .permit
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *permit = true;
        self.inner.wakeup.notify_one();
    }
}

/// Background thread that unparks a [`Pacer`] once per interval.
#[derive(Debug)]
pub struct Ticker {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    /// Starts ticking `pacer` every `interval`.
    ///
    /// # Errors
    /// Fails if the thread cannot be spawned.
    pub fn spawn(pacer: Pacer, interval: Duration) -> io::Result<Self> {
        let stop = Arc::new(AtomicBool::new(false));
        let thread_stop = Arc::clone(&stop);
        let handle = thread::Builder::new()
            .name("easel-ticker".to_string())
            .spawn(move || {
                while !thread_stop.load(Ordering::Acquire) {
                    thread::sleep(interval);
                    pacer.unpark();
                }
            })?;
        log::debug!("Ticker started with {:?} interval", interval);
        Ok(Self {
            stop,
            handle: Some(handle),
        })
    }

    /// Stops the thread and waits for it to exit.
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
            log::debug!("Ticker stopped");
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Suspends the caller after each drawing call until the next tick.
///
/// With no interval the throttle is disabled and [`Throttle::wait`] returns
/// immediately.
#[derive(Debug)]
pub struct Throttle {
    pacer: Pacer,
    interval: Option<Duration>,
    ticker: Option<Ticker>,
}

impl Throttle {
    pub fn new(interval: Option<Duration>) -> Self {
        Self {
            pacer: Pacer::new(),
            interval,
            ticker: None,
        }
    }

    /// Handle for releasing the caller by hand, e.g. from tests.
    pub fn pacer(&self) -> Pacer {
        self.pacer.clone()
    }

    pub fn is_enabled(&self) -> bool {
        self.interval.is_some()
    }

    /// Starts the ticker thread; a no-op when disabled or already started.
    ///
    /// # Errors
    /// Fails if the ticker thread cannot be spawned.
    pub fn start(&mut self) -> io::Result<()> {
        if self.ticker.is_some() {
            return Ok(());
        }
        if let Some(interval) = self.interval {
            self.ticker = Some(Ticker::spawn(self.pacer.clone(), interval)?);
        }
        Ok(())
    }

    /// Parks the caller until the next tick.
    pub fn wait(&self) {
        if self.is_enabled() {
            self.pacer.park();
        }
    }

    pub fn stop(&mut self) {
        if let Some(mut ticker) = self.ticker.take() {
            ticker.stop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn unpark_before_park_releases_immediately() {
        let pacer = Pacer::new();
        pacer.unpark();
        pacer.unpark();
        assert!(pacer.park_timeout(Duration::from_millis(10)));
        // Only one permit was banked.
        assert!(!pacer.park_timeout(Duration::from_millis(10)));
    }

    #[test]
    fn park_waits_for_another_thread() {
        let pacer = Pacer::new();
        let releaser = pacer.clone();
        let handle = thread::spawn(move || releaser.unpark());
        pacer.park();
        handle.join().unwrap();
    }

    #[test]
    fn ticker_releases_parked_caller_repeatedly() {
        let pacer = Pacer::new();
        let mut ticker = Ticker::spawn(pacer.clone(), Duration::from_millis(1)).unwrap();
        for _ in 0..3 {
            assert!(pacer.park_timeout(Duration::from_secs(5)));
        }
        ticker.stop();
    }

    #[test]
    fn disabled_throttle_never_blocks() {
        let mut throttle = Throttle::new(None);
        throttle.start().unwrap();
        let started = Instant::now();
        for _ in 0..1000 {
            throttle.wait();
        }
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn throttle_can_be_driven_by_hand() {
        let throttle = Throttle::new(Some(Duration::from_secs(3600)));
        throttle.pacer().unpark();
        throttle.wait();
    }
}
