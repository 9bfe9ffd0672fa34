//! Recurring "now" clock for the live views.
//!
//! The cursor owns the only timer in the crate. Each tick reads the clock once
//! and publishes the instant through a watch channel; consumers always see a
//! whole `DateTime` value and pass it into the next layout build.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Local};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::error::{CalendarError, CalendarResult};

pub const DEFAULT_TICK_INTERVAL: StdDuration = StdDuration::from_secs(60);

/// Source of the current instant.
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

/// Wall clock of the machine.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock stopped at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Local>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

pub struct TimeCursor {
    clock: Arc<dyn Clock>,
    interval: StdDuration,
    sender: Arc<watch::Sender<DateTime<Local>>>,
    task: Option<JoinHandle<()>>,
}

impl TimeCursor {
    pub fn new(clock: Arc<dyn Clock>, interval: StdDuration) -> Self {
        let (sender, _) = watch::channel(clock.now());
        Self {
            clock,
            interval,
            sender: Arc::new(sender),
            task: None,
        }
    }

    /// Cursor on the system clock.
    pub fn system(interval: StdDuration) -> Self {
        Self::new(Arc::new(SystemClock), interval)
    }

    pub fn interval(&self) -> StdDuration {
        self.interval
    }

    /// Latest published instant.
    pub fn now(&self) -> DateTime<Local> {
        *self.sender.borrow()
    }

    /// Receiver that is notified on every tick.
    pub fn subscribe(&self) -> watch::Receiver<DateTime<Local>> {
        self.sender.subscribe()
    }

    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    /// Read the clock now and publish the result without waiting for the timer.
    pub fn tick(&self) -> DateTime<Local> {
        let now = self.clock.now();
        self.sender.send_replace(now);
        now
    }

    /// Start ticking on the current tokio runtime. The first tick fires
    /// immediately. Starting a running cursor does nothing.
    pub fn start(&mut self) -> CalendarResult<()> {
        if self.task.is_some() {
            return Ok(());
        }
        let handle = tokio::runtime::Handle::try_current().map_err(|_| CalendarError::NoRuntime)?;

        let clock = Arc::clone(&self.clock);
        let sender = Arc::clone(&self.sender);
        let period = self.interval.max(StdDuration::from_millis(1));

        self.task = Some(handle.spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                sender.send_replace(clock.now());
            }
        }));

        log::info!("Time cursor started ({}s interval)", period.as_secs_f64());
        Ok(())
    }

    /// Cancel the timer. The last published instant stays readable.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            log::info!("Time cursor stopped");
        }
    }
}

impl Drop for TimeCursor {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for TimeCursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimeCursor")
            .field("interval", &self.interval)
            .field("now", &self.now())
            .field("running", &self.is_running())
            .finish()
    }
}
