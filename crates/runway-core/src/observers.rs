//! Concrete observer implementations.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use crossbeam_channel::Sender;
use tracing::{debug, info};

use crate::metrics::Metrics;
use crate::model::GrowthModel;
use crate::observer::ChangeObserver;
use crate::trajectory::Trajectory;
use crate::units::DisplayUnit;

/// Owned copy of the displayed state, for consumers on another thread.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeNotice {
    /// Free financial parameters.
    pub trajectory: Trajectory,
    /// Derived fields.
    pub metrics: Metrics,
    /// Current display unit.
    pub display_unit: DisplayUnit,
    /// Current instruction hint opacity.
    pub hint_opacity: f64,
}

impl ChangeNotice {
    /// Capture the current state of `model`.
    #[must_use]
    pub fn capture(model: &GrowthModel) -> Self {
        Self {
            trajectory: *model.trajectory(),
            metrics: *model.metrics(),
            display_unit: model.display_unit(),
            hint_opacity: model.hint().opacity,
        }
    }
}

/// Observer that sends a [`ChangeNotice`] through a channel (non-blocking).
///
/// A full channel drops the notice; the receiver only ever needs the latest.
pub struct ChannelObserver {
    sender: Sender<ChangeNotice>,
}

impl ChannelObserver {
    /// Create a new channel observer.
    #[must_use]
    pub fn new(sender: Sender<ChangeNotice>) -> Self {
        Self { sender }
    }
}

impl ChangeObserver for ChannelObserver {
    fn on_changed(&self, model: &GrowthModel) {
        let _ = self.sender.try_send(ChangeNotice::capture(model));
    }
}

/// Observer that logs changes with temporal throttling.
///
/// Animation ticks notify on every frame, so anything arriving within
/// `min_interval_ms` of the last logged change is skipped unless the
/// financial parameters moved.
pub struct LoggingObserver {
    min_interval_ms: u64,
    last_time: AtomicU64,
    last_trajectory: parking_lot::Mutex<Option<Trajectory>>,
}

impl LoggingObserver {
    /// Create a new logging observer with the given minimum interval.
    #[must_use]
    pub fn new(min_interval_ms: u64) -> Self {
        Self {
            min_interval_ms,
            last_time: AtomicU64::new(0),
            last_trajectory: parking_lot::Mutex::new(None),
        }
    }
}

impl ChangeObserver for LoggingObserver {
    #[allow(clippy::cast_possible_truncation)]
    fn on_changed(&self, model: &GrowthModel) {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;

        let trajectory = *model.trajectory();
        let mut last_trajectory = self.last_trajectory.lock();
        let financial_change = last_trajectory.as_ref() != Some(&trajectory);

        let last_time = self.last_time.load(Ordering::Relaxed);
        if !financial_change && now.saturating_sub(last_time) < self.min_interval_ms {
            return;
        }

        if financial_change {
            let m = model.metrics();
            info!(
                rev0 = trajectory.rev0,
                exp0 = trajectory.exp0,
                rev_growth = trajectory.rev_growth,
                exp_growth = trajectory.exp_growth,
                breakeven_week = ?m.breakeven_week(),
                capital_needed = ?m.capital_needed(),
                "Growth model changed"
            );
        } else {
            debug!(
                units = %model.display_unit(),
                hint_opacity = model.hint().opacity,
                "Presentation state changed"
            );
        }
        *last_trajectory = Some(trajectory);
        self.last_time.store(now, Ordering::Relaxed);
    }
}

/// Observer that counts notifications.
#[derive(Debug, Default)]
pub struct CountingObserver {
    count: AtomicUsize,
}

impl CountingObserver {
    /// Create a counter starting at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of notifications received so far.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count.load(Ordering::Relaxed)
    }
}

impl ChangeObserver for CountingObserver {
    fn on_changed(&self, _model: &GrowthModel) {
        self.count.fetch_add(1, Ordering::Relaxed);
    }
}

/// Observer that ignores notifications.
pub struct NoOpObserver;

impl NoOpObserver {
    /// Create a new no-op observer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoOpObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeObserver for NoOpObserver {
    fn on_changed(&self, _model: &GrowthModel) {
        // Intentionally empty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_observer_does_nothing() {
        let observer = NoOpObserver::default();
        observer.on_changed(&GrowthModel::new());
    }

    #[test]
    fn channel_observer_sends_capture() {
        let (tx, rx) = crossbeam_channel::bounded(4);
        let observer = ChannelObserver::new(tx);
        let model = GrowthModel::new();
        observer.on_changed(&model);

        let notice = rx.try_recv().unwrap();
        assert_eq!(notice.trajectory, *model.trajectory());
        assert_eq!(notice.display_unit, DisplayUnit::Week);
        assert_eq!(notice, ChangeNotice::capture(&model));
    }

    #[test]
    fn channel_observer_full_channel_does_not_panic() {
        let (tx, rx) = crossbeam_channel::bounded(1);
        let observer = ChannelObserver::new(tx);
        let model = GrowthModel::new();
        observer.on_changed(&model);
        observer.on_changed(&model);
        assert_eq!(rx.len(), 1);
    }

    #[test]
    fn channel_observer_disconnected_does_not_panic() {
        let (tx, rx) = crossbeam_channel::bounded(1);
        drop(rx);
        ChannelObserver::new(tx).on_changed(&GrowthModel::new());
    }

    #[test]
    fn logging_observer_throttles_presentation_changes() {
        let observer = LoggingObserver::new(60_000);
        let mut model = GrowthModel::new();
        observer.on_changed(&model);
        let first = observer.last_time.load(Ordering::Relaxed);
        assert!(first > 0);

        model.set_display_unit(DisplayUnit::Year);
        observer.on_changed(&model);
        assert_eq!(observer.last_time.load(Ordering::Relaxed), first);
    }

    #[test]
    fn logging_observer_always_logs_financial_changes() {
        let observer = LoggingObserver::new(60_000);
        let mut model = GrowthModel::new();
        observer.on_changed(&model);

        model.set_revenue_at_week(0.0, 300.0).unwrap();
        observer.on_changed(&model);
        assert_eq!(*observer.last_trajectory.lock(), Some(*model.trajectory()));
    }

    #[test]
    fn counting_observer_counts() {
        let observer = CountingObserver::new();
        let model = GrowthModel::new();
        observer.on_changed(&model);
        observer.on_changed(&model);
        assert_eq!(observer.count(), 2);
    }
}
