//! Background poller that notices newly created bookings.
//!
//! Every tick reads the hotel's booking count. Growth since the previous
//! reading is added to a pending-notification counter the front end can show
//! and acknowledge. In auto-refresh mode the dashboard snapshots are dropped
//! as well so the next request refetches.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::errors::AppError;
use crate::graphql::GraphqlClient;
use crate::services::bookings;
use crate::services::dashboard::DashboardCache;

/// Published poller state.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct BookingWatchState {
    pub enabled: bool,
    pub auto_refresh: bool,
    pub last_count: Option<u64>,
    pub pending_new_bookings: u64,
    pub last_checked: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
}

/// Shared handle to the poller state.
#[derive(Debug, Clone)]
pub struct BookingWatch {
    tx: Arc<watch::Sender<BookingWatchState>>,
}

impl BookingWatch {
    pub fn new(enabled: bool, auto_refresh: bool) -> Self {
        let (tx, _rx) = watch::channel(BookingWatchState {
            enabled,
            auto_refresh,
            ..Default::default()
        });
        Self { tx: Arc::new(tx) }
    }

    pub fn current(&self) -> BookingWatchState {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<BookingWatchState> {
        self.tx.subscribe()
    }

    /// Clear pending notifications, returning the state after the reset.
    pub fn acknowledge(&self) -> BookingWatchState {
        self.tx.send_modify(|state| state.pending_new_bookings = 0);
        self.current()
    }

    /// Record a booking count reading and return how many bookings are new.
    ///
    /// The first reading only sets the baseline. A drop (deleted bookings)
    /// resets the baseline without notifying.
    pub fn record_count(&self, count: u64, at: DateTime<Utc>) -> u64 {
        let mut new_bookings = 0;
        self.tx.send_modify(|state| {
            if let Some(last) = state.last_count {
                if count > last {
                    new_bookings = count - last;
                    state.pending_new_bookings += new_bookings;
                }
            }
            state.last_count = Some(count);
            state.last_checked = Some(at);
            state.last_error = None;
        });
        new_bookings
    }

    pub fn record_failure(&self, message: String, at: DateTime<Utc>) {
        self.tx.send_modify(|state| {
            state.last_checked = Some(at);
            state.last_error = Some(message);
        });
    }
}

/// Everything a polling loop needs.
#[derive(Debug, Clone)]
pub struct BookingPoller {
    pub watch: BookingWatch,
    pub client: GraphqlClient,
    pub cache: Arc<DashboardCache>,
    pub token: String,
    pub hotel_id: String,
    pub interval: Duration,
}

impl BookingPoller {
    /// Take one reading and apply it.
    pub async fn poll_once(&self) -> Result<u64, AppError> {
        let count =
            match bookings::count_bookings(&self.client, Some(&self.token), &self.hotel_id).await {
                Ok(count) => count,
                Err(e) => {
                    tracing::warn!(error = %e, hotel_id = %self.hotel_id, "Booking count poll failed");
                    self.watch.record_failure(e.to_string(), Utc::now());
                    return Err(e);
                }
            };

        let new_bookings = self.watch.record_count(count, Utc::now());
        if new_bookings > 0 {
            tracing::info!(
                hotel_id = %self.hotel_id,
                new_bookings,
                total = count,
                "New bookings detected"
            );
            if self.watch.current().auto_refresh {
                let dropped = self.cache.invalidate_all().await;
                tracing::debug!(dropped, "Dashboard snapshots invalidated");
            }
        }
        Ok(new_bookings)
    }

    /// Poll forever on a fixed interval. Failures are logged and the next
    /// tick proceeds as normal.
    pub async fn run(self) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tracing::info!(
            hotel_id = %self.hotel_id,
            interval_secs = self.interval.as_secs(),
            "Booking poller started"
        );
        loop {
            ticker.tick().await;
            if self.poll_once().await.is_err() {
                continue;
            }
        }
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_reading_sets_baseline() {
        let watch = BookingWatch::new(true, false);
        assert_eq!(watch.record_count(40, Utc::now()), 0);
        let state = watch.current();
        assert_eq!(state.last_count, Some(40));
        assert_eq!(state.pending_new_bookings, 0);
    }

    #[test]
    fn growth_accumulates_until_acknowledged() {
        let watch = BookingWatch::new(true, false);
        watch.record_count(40, Utc::now());
        assert_eq!(watch.record_count(42, Utc::now()), 2);
        assert_eq!(watch.record_count(45, Utc::now()), 3);
        assert_eq!(watch.current().pending_new_bookings, 5);

        let after = watch.acknowledge();
        assert_eq!(after.pending_new_bookings, 0);
        assert_eq!(after.last_count, Some(45));
    }

    #[test]
    fn drop_resets_baseline_silently() {
        let watch = BookingWatch::new(true, false);
        watch.record_count(40, Utc::now());
        assert_eq!(watch.record_count(38, Utc::now()), 0);
        assert_eq!(watch.record_count(39, Utc::now()), 1);
        assert_eq!(watch.current().pending_new_bookings, 1);
    }

    #[test]
    fn failure_is_recorded_and_cleared_by_next_reading() {
        let watch = BookingWatch::new(true, true);
        watch.record_failure("timeout".to_string(), Utc::now());
        assert_eq!(watch.current().last_error.as_deref(), Some("timeout"));
        watch.record_count(1, Utc::now());
        assert!(watch.current().last_error.is_none());
    }

    #[tokio::test]
    async fn subscribers_see_updates() {
        let watch = BookingWatch::new(true, false);
        let mut rx = watch.subscribe();
        watch.record_count(10, Utc::now());
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().last_count, Some(10));
    }
}
