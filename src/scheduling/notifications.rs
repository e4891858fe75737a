//! Per-employee break reminder timers.
//!
//! Each armed reminder is a tokio task that sleeps until the break is due.
//! Every task carries a unique token that is also kept in the employee's
//! pending list. When it wakes, a task removes its token under the same lock
//! [`NotificationScheduler::clear_notifications`] takes and only delivers its
//! alert if the token was still there. A reminder is either claimed by its
//! task or discarded by a clear, never both, so a cleared reminder can never
//! fire. Delivery happens after the lock is released.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use dashmap::DashMap;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::config::SchedulerConfig;
use crate::models::BreakEvent;

use super::clock::Clock;
use super::transport::{Alert, NotificationTransport};

/// What happened to a break passed to [`NotificationScheduler::arm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArmOutcome {
    /// A reminder will fire when the break is due.
    Armed,
    /// The break was already due; nothing was scheduled.
    Elapsed,
}

#[derive(Debug)]
struct PendingTimer {
    token: u64,
    handle: JoinHandle<()>,
}

struct Timers {
    pending: DashMap<String, Vec<PendingTimer>>,
    next_token: AtomicU64,
    transport: Arc<dyn NotificationTransport>,
    display_for: Duration,
}

impl Timers {
    /// Removes the timer's token, returning false if it was already cleared.
    fn claim(&self, token: u64, employee_id: &str) -> bool {
        let now_empty = {
            let Some(mut timers) = self.pending.get_mut(employee_id) else {
                return false;
            };
            let Some(index) = timers.iter().position(|t| t.token == token) else {
                return false;
            };
            timers.swap_remove(index);
            timers.is_empty()
        };

        if now_empty {
            self.pending.remove_if(employee_id, |_, timers| timers.is_empty());
        }
        true
    }

    fn fire(&self, token: u64, event: &BreakEvent) {
        if !self.claim(token, &event.employee_id) {
            return;
        }

        self.transport.notify(Alert {
            title: format!("{} Break Required", event.kind.title()),
            description: format!("{} minute {} break is now due", event.duration, event.kind),
            display_for: self.display_for,
        });
        debug!(employee_id = %event.employee_id, kind = %event.kind, "Break reminder fired");
    }
}

impl Drop for Timers {
    fn drop(&mut self) {
        for entry in self.pending.iter() {
            for timer in entry.value() {
                timer.handle.abort();
            }
        }
    }
}

/// Arms and cancels break reminders.
///
/// Dropping the scheduler aborts every reminder still pending.
pub struct NotificationScheduler {
    timers: Arc<Timers>,
    clock: Arc<dyn Clock>,
    runtime: Handle,
}

impl NotificationScheduler {
    /// Creates a scheduler that spawns reminder tasks on `runtime`.
    pub fn new(
        runtime: Handle,
        transport: Arc<dyn NotificationTransport>,
        clock: Arc<dyn Clock>,
        config: &SchedulerConfig,
    ) -> Self {
        Self {
            timers: Arc::new(Timers {
                pending: DashMap::new(),
                next_token: AtomicU64::new(1),
                transport,
                display_for: Duration::from_secs(config.alert_display_seconds),
            }),
            clock,
            runtime,
        }
    }

    /// Schedules a reminder for `event`.
    ///
    /// Breaks that are already due are dropped and reported as
    /// [`ArmOutcome::Elapsed`]; there is no way to remind someone in the past.
    pub fn arm(&self, event: BreakEvent) -> ArmOutcome {
        let delay = match (event.scheduled_time - self.clock.now()).to_std() {
            Ok(delay) if !delay.is_zero() => delay,
            _ => {
                debug!(
                    employee_id = %event.employee_id,
                    scheduled_time = %event.scheduled_time,
                    "Break time already passed, reminder dropped"
                );
                return ArmOutcome::Elapsed;
            }
        };

        let token = self.timers.next_token.fetch_add(1, Ordering::Relaxed);
        let employee_id = event.employee_id.clone();

        let mut timers = self.timers.pending.entry(employee_id.clone()).or_default();
        let weak: Weak<Timers> = Arc::downgrade(&self.timers);
        let handle = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(timers) = weak.upgrade() {
                timers.fire(token, &event);
            }
        });
        timers.push(PendingTimer { token, handle });

        debug!(employee_id = %employee_id, delay_secs = delay.as_secs(), "Break reminder armed");
        ArmOutcome::Armed
    }

    /// Cancels every pending reminder for an employee.
    ///
    /// Returns how many reminders were cancelled. Calling this for an
    /// employee with nothing pending does nothing and returns 0.
    pub fn clear_notifications(&self, employee_id: &str) -> usize {
        match self.timers.pending.remove(employee_id) {
            Some((_, timers)) => {
                for timer in &timers {
                    timer.handle.abort();
                }
                debug!(
                    employee_id = %employee_id,
                    cancelled = timers.len(),
                    "Break reminders cleared"
                );
                timers.len()
            }
            None => 0,
        }
    }

    /// Returns how many reminders are pending for an employee.
    pub fn pending(&self, employee_id: &str) -> usize {
        self.timers
            .pending
            .get(employee_id)
            .map_or(0, |timers| timers.len())
    }

    /// Returns the runtime reminders are spawned on.
    pub fn runtime(&self) -> &Handle {
        &self.runtime
    }

    /// Returns the transport alerts are delivered through.
    pub fn transport(&self) -> &Arc<dyn NotificationTransport> {
        &self.timers.transport
    }

    /// Returns how long alerts ask to stay visible.
    pub fn display_for(&self) -> Duration {
        self.timers.display_for
    }
}
