//! Active shift tracking for clocked-in employees.
//!
//! The store keeps one [`EmployeeShiftStatus`] per employee between clock-in
//! and clock-out, arms break reminders for it, and publishes a snapshot of
//! every active shift to subscribers after each change.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};

use chrono::Duration;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::SchedulerConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{BreakEvent, ClockInEvent, EmployeeShiftStatus, EvaluationMode, Shift};
use crate::rules::RuleRegistry;

use super::break_events::break_events_from_requirements;
use super::notifications::{ArmOutcome, NotificationScheduler};
use super::transport::Alert;

/// Every active shift, sorted by employee id.
pub type Snapshot = Arc<[EmployeeShiftStatus]>;

struct Subscriber {
    id: u64,
    sender: mpsc::UnboundedSender<Snapshot>,
}

#[derive(Default)]
struct Subscribers {
    next_id: AtomicU64,
    list: Mutex<Vec<Subscriber>>,
}

impl Subscribers {
    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Subscriber>> {
        self.list.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Handle returned by [`ShiftStatusStore::subscribe`].
///
/// Dropping the handle keeps the subscription alive; call
/// [`Subscription::unsubscribe`] to stop receiving snapshots.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    subscribers: Weak<Subscribers>,
}

impl Subscription {
    /// Stops delivery to this subscriber.
    ///
    /// Safe to call after the store has been dropped.
    pub fn unsubscribe(self) {
        if let Some(subscribers) = self.subscribers.upgrade() {
            subscribers.lock().retain(|s| s.id != self.id);
        }
    }
}

/// Tracks clocked-in employees and their scheduled breaks.
///
/// Clock-in and clock-out for the same employee are serialized; different
/// employees proceed independently.
pub struct ShiftStatusStore {
    registry: Arc<RuleRegistry>,
    notifications: Arc<NotificationScheduler>,
    config: SchedulerConfig,
    active: DashMap<String, EmployeeShiftStatus>,
    subscribers: Arc<Subscribers>,
}

impl ShiftStatusStore {
    /// Creates an empty store.
    pub fn new(
        registry: Arc<RuleRegistry>,
        notifications: Arc<NotificationScheduler>,
        config: SchedulerConfig,
    ) -> Self {
        Self {
            registry,
            notifications,
            config,
            active: DashMap::new(),
            subscribers: Arc::new(Subscribers::default()),
        }
    }

    /// Returns the reminder scheduler this store arms.
    pub fn notifications(&self) -> &NotificationScheduler {
        &self.notifications
    }

    /// Clocks an employee in and schedules their breaks.
    ///
    /// Any shift the employee already has is replaced after its reminders
    /// are cancelled. An unknown region, or a clock-in so late that the
    /// shift or its breaks cannot be represented, fails the call before
    /// anything is recorded or armed.
    pub fn clock_in(&self, event: &ClockInEvent) -> EngineResult<EmployeeShiftStatus> {
        let rules = self.registry.resolve(&event.region)?;

        let shift = Shift::planned(
            format!("{}-{}", event.employee_id, Uuid::new_v4()),
            event.employee_id.as_str(),
            event.timestamp,
            self.config.shift_window_hours,
        )?;
        let result = rules.check_compliance(&shift, EvaluationMode::Advisory);
        let required_breaks = break_events_from_requirements(
            &event.employee_id,
            event.timestamp,
            &result.required_breaks,
            Duration::hours(i64::from(self.config.break_spacing_hours)),
        )
        .ok_or_else(|| EngineError::InvalidShift {
            shift_id: shift.id.clone(),
            message: "a scheduled break falls out of range".to_string(),
        })?;

        let status = EmployeeShiftStatus {
            employee_id: event.employee_id.clone(),
            shift_id: shift.id,
            clock_in_time: event.timestamp,
            required_breaks,
            completed_breaks: Vec::new(),
            region: event.region.clone(),
        };

        let (superseded, armed) = {
            let entry = self.active.entry(event.employee_id.clone());
            let cancelled = self.notifications.clear_notifications(&event.employee_id);
            let armed = status
                .required_breaks
                .iter()
                .filter(|b| self.notifications.arm((*b).clone()) == ArmOutcome::Armed)
                .count();

            let superseded = match entry {
                Entry::Occupied(mut occupied) => {
                    occupied.insert(status.clone());
                    true
                }
                Entry::Vacant(vacant) => {
                    vacant.insert(status.clone());
                    false
                }
            };
            if superseded {
                info!(employee_id = %event.employee_id, cancelled, "Replaced active shift");
            }
            (superseded, armed)
        };

        info!(
            employee_id = %status.employee_id,
            region = rules.code(),
            shift_id = %status.shift_id,
            breaks = status.required_breaks.len(),
            armed,
            superseded,
            "Employee clocked in"
        );

        self.show_schedule(&status.required_breaks);
        self.publish();
        Ok(status)
    }

    /// Clocks an employee out, cancelling their reminders.
    ///
    /// Returns the removed shift, or `None` if the employee was not clocked
    /// in. Subscribers are notified either way.
    pub fn clock_out(&self, employee_id: &str) -> Option<EmployeeShiftStatus> {
        let removed = match self.active.entry(employee_id.to_string()) {
            Entry::Occupied(occupied) => {
                self.notifications.clear_notifications(employee_id);
                Some(occupied.remove())
            }
            Entry::Vacant(_) => {
                self.notifications.clear_notifications(employee_id);
                None
            }
        };

        if removed.is_some() {
            info!(employee_id = %employee_id, "Employee clocked out");
        } else {
            info!(employee_id = %employee_id, "Clock-out for employee without an active shift");
        }

        self.publish();
        removed
    }

    /// Returns the active shift for an employee, if any.
    pub fn status(&self, employee_id: &str) -> Option<EmployeeShiftStatus> {
        self.active.get(employee_id).map(|s| s.value().clone())
    }

    /// Returns every active shift, sorted by employee id.
    pub fn active_shifts(&self) -> Vec<EmployeeShiftStatus> {
        self.snapshot().to_vec()
    }

    /// Registers an observer of active shifts.
    ///
    /// The callback first receives the current snapshot, then a fresh one
    /// after every clock-in and clock-out. Callbacks run on their own task,
    /// so a slow subscriber never holds up the store or other subscribers,
    /// and a panicking callback is logged and keeps its subscription.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&[EmployeeShiftStatus]) + Send + 'static,
    {
        let id = self.subscribers.next_id.fetch_add(1, Ordering::Relaxed);
        let (sender, mut receiver) = mpsc::unbounded_channel::<Snapshot>();

        self.notifications.runtime().spawn(async move {
            while let Some(snapshot) = receiver.recv().await {
                if catch_unwind(AssertUnwindSafe(|| callback(&snapshot))).is_err() {
                    warn!(subscriber_id = id, "Subscriber panicked while handling snapshot");
                }
            }
        });

        {
            let mut list = self.subscribers.lock();
            // Send the initial snapshot under the lock so it cannot arrive
            // after a newer one.
            let _ = sender.send(self.snapshot());
            list.push(Subscriber { id, sender });
        }

        Subscription {
            id,
            subscribers: Arc::downgrade(&self.subscribers),
        }
    }

    /// Returns how many subscribers are registered.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }

    fn snapshot(&self) -> Snapshot {
        let mut statuses: Vec<EmployeeShiftStatus> =
            self.active.iter().map(|s| s.value().clone()).collect();
        statuses.sort_by(|a, b| a.employee_id.cmp(&b.employee_id));
        Arc::from(statuses)
    }

    fn publish(&self) {
        let mut list = self.subscribers.lock();
        let snapshot = self.snapshot();
        list.retain(|s| s.sender.send(Arc::clone(&snapshot)).is_ok());
    }

    fn show_schedule(&self, breaks: &[BreakEvent]) {
        if breaks.is_empty() {
            return;
        }

        let description = breaks
            .iter()
            .map(|b| format!("{} break at {}", b.kind, b.scheduled_time.format("%H:%M:%S")))
            .collect::<Vec<_>>()
            .join("\n");

        self.notifications.transport().notify(Alert {
            title: "Your Break Schedule".to_string(),
            description,
            display_for: self.notifications.display_for(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BreakType;
    use crate::scheduling::{ManualClock, RecordingTransport};
    use chrono::{DateTime, TimeZone, Utc};
    use tokio::runtime::Handle;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 20, 9, 0, 0).unwrap()
    }

    fn store() -> (ShiftStatusStore, Arc<RecordingTransport>) {
        let transport = Arc::new(RecordingTransport::new());
        let config = SchedulerConfig::default();
        let notifications = NotificationScheduler::new(
            Handle::current(),
            transport.clone(),
            Arc::new(ManualClock::new(now())),
            &config,
        );
        let store = ShiftStatusStore::new(
            Arc::new(RuleRegistry::standard()),
            Arc::new(notifications),
            config,
        );
        (store, transport)
    }

    #[tokio::test(start_paused = true)]
    async fn test_clock_in_schedules_california_breaks() {
        let (store, transport) = store();

        let status = store.clock_in(&ClockInEvent::new("emp1", "CA", now())).unwrap();

        let kinds: Vec<BreakType> = status.required_breaks.iter().map(|b| b.kind).collect();
        assert_eq!(kinds, vec![BreakType::Meal, BreakType::Rest, BreakType::Rest]);
        assert_eq!(status.required_breaks[1].duration, 10);
        assert!(status.shift_id.starts_with("emp1-"));
        assert!(status.completed_breaks.is_empty());
        assert_eq!(store.notifications().pending("emp1"), 3);

        let schedule = transport.with_title("Your Break Schedule");
        assert_eq!(schedule.len(), 1);
        assert_eq!(
            schedule[0].description,
            "meal break at 11:00:00\nrest break at 13:00:00\nrest break at 15:00:00"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_york_rest_breaks_keep_their_duration() {
        let (store, _transport) = store();
        let status = store.clock_in(&ClockInEvent::new("emp1", "new york", now())).unwrap();

        let rest: Vec<&BreakEvent> =
            status.required_breaks.iter().filter(|b| b.kind == BreakType::Rest).collect();
        assert_eq!(rest.len(), 2);
        assert!(rest.iter().all(|b| b.duration == 15 && b.is_paid));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unsupported_region_leaves_no_state() {
        let (store, transport) = store();

        let err = store.clock_in(&ClockInEvent::new("emp1", "TX", now())).unwrap_err();

        assert!(matches!(err, EngineError::UnsupportedRegion { .. }));
        assert!(store.status("emp1").is_none());
        assert_eq!(store.notifications().pending("emp1"), 0);
        assert!(transport.alerts().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_unsupported_region_keeps_existing_shift() {
        let (store, _transport) = store();
        let original = store.clock_in(&ClockInEvent::new("emp1", "CA", now())).unwrap();

        assert!(store.clock_in(&ClockInEvent::new("emp1", "TX", now())).is_err());

        assert_eq!(store.status("emp1"), Some(original));
        assert_eq!(store.notifications().pending("emp1"), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clock_in_at_end_of_time_fails_cleanly() {
        let (store, transport) = store();
        let late = DateTime::<Utc>::MAX_UTC - Duration::hours(3);

        let err = store.clock_in(&ClockInEvent::new("emp1", "CA", late)).unwrap_err();

        assert!(matches!(err, EngineError::InvalidShift { .. }));
        assert!(store.status("emp1").is_none());
        assert_eq!(store.notifications().pending("emp1"), 0);
        assert!(transport.alerts().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_clock_in_with_breaks_past_end_of_time_fails_cleanly() {
        let transport = Arc::new(RecordingTransport::new());
        let config = SchedulerConfig {
            break_spacing_hours: 4,
            ..SchedulerConfig::default()
        };
        let notifications = NotificationScheduler::new(
            Handle::current(),
            transport.clone(),
            Arc::new(ManualClock::new(now())),
            &config,
        );
        let store = ShiftStatusStore::new(
            Arc::new(RuleRegistry::standard()),
            Arc::new(notifications),
            config,
        );
        // The 8 hour shift fits but the third break, 12 hours in, does not.
        let late = DateTime::<Utc>::MAX_UTC - Duration::hours(9);

        let err = store.clock_in(&ClockInEvent::new("emp1", "CA", late)).unwrap_err();

        assert!(matches!(err, EngineError::InvalidShift { .. }));
        assert!(store.active_shifts().is_empty());
        assert!(transport.alerts().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_clock_out_twice_is_harmless() {
        let (store, _transport) = store();
        store.clock_in(&ClockInEvent::new("emp1", "CA", now())).unwrap();

        assert!(store.clock_out("emp1").is_some());
        assert!(store.clock_out("emp1").is_none());
        assert!(store.status("emp1").is_none());
        assert_eq!(store.notifications().pending("emp1"), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reclock_in_replaces_shift_and_timers() {
        let (store, _transport) = store();
        let first = store.clock_in(&ClockInEvent::new("emp1", "CA", now())).unwrap();
        let second = store
            .clock_in(&ClockInEvent::new("emp1", "NY", now() + Duration::hours(1)))
            .unwrap();

        assert_ne!(first.shift_id, second.shift_id);
        assert_eq!(store.active_shifts().len(), 1);
        assert_eq!(store.status("emp1").unwrap().region, "NY");
        assert_eq!(store.notifications().pending("emp1"), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_active_shifts_sorted_by_employee() {
        let (store, _transport) = store();
        store.clock_in(&ClockInEvent::new("emp2", "CA", now())).unwrap();
        store.clock_in(&ClockInEvent::new("emp1", "NY", now())).unwrap();

        let ids: Vec<String> = store.active_shifts().into_iter().map(|s| s.employee_id).collect();
        assert_eq!(ids, vec!["emp1", "emp2"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscriber_receives_initial_and_updates() {
        let (store, _transport) = store();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _subscription = store.subscribe(move |snapshot| {
            let _ = tx.send(snapshot.len());
        });

        assert_eq!(rx.recv().await, Some(0));
        store.clock_in(&ClockInEvent::new("emp1", "CA", now())).unwrap();
        assert_eq!(rx.recv().await, Some(1));
        store.clock_out("emp1");
        assert_eq!(rx.recv().await, Some(0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unsubscribe_stops_delivery() {
        let (store, _transport) = store();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let subscription = store.subscribe(move |snapshot| {
            let _ = tx.send(snapshot.len());
        });
        assert_eq!(rx.recv().await, Some(0));

        subscription.unsubscribe();
        assert_eq!(store.subscriber_count(), 0);

        store.clock_in(&ClockInEvent::new("emp1", "CA", now())).unwrap();
        // The sender was dropped with the subscriber, so the channel closes.
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unsubscribe_after_store_dropped() {
        let (store, _transport) = store();
        let subscription = store.subscribe(|_| {});
        drop(store);
        subscription.unsubscribe();
    }

    #[tokio::test(start_paused = true)]
    async fn test_panicking_subscriber_does_not_stop_others() {
        let (store, _transport) = store();
        let _bad = store.subscribe(|snapshot| {
            if !snapshot.is_empty() {
                panic!("subscriber failure");
            }
        });
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _good = store.subscribe(move |snapshot| {
            let _ = tx.send(snapshot.len());
        });

        assert_eq!(rx.recv().await, Some(0));
        store.clock_in(&ClockInEvent::new("emp1", "CA", now())).unwrap();
        assert_eq!(rx.recv().await, Some(1));
        store.clock_in(&ClockInEvent::new("emp2", "CA", now())).unwrap();
        assert_eq!(rx.recv().await, Some(2));
        assert_eq!(store.subscriber_count(), 2);
    }
}
