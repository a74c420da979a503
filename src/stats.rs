use crate::slots::SlotError;
use crate::utils::periodic_worker::PeriodicWorker;
use chrono::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Counts protocol anomalies and reports them once per second, so that a
/// misbehaving device doesn't flood the log.
#[derive(Clone)]
pub struct Stats {
    unknown_lifts: Arc<AtomicUsize>,
    overflows: Arc<AtomicUsize>,
    dropped: Arc<AtomicUsize>,
}

impl Stats {
    pub fn new() -> Stats {
        Stats {
            unknown_lifts: Arc::new(AtomicUsize::new(0)),
            overflows: Arc::new(AtomicUsize::new(0)),
            dropped: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn spawn(&self) -> PeriodicWorker {
        let clone = self.clone();
        PeriodicWorker::new(Duration::from_secs(1), move || clone.print_output())
    }

    pub fn log_slot_error(&self, error: &SlotError) {
        let counter = match error {
            SlotError::NotFound { .. } => &self.unknown_lifts,
            SlotError::CapacityExceeded { .. } => &self.overflows,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn log_dropped(&self) {
        self.dropped.fetch_add(1, Ordering::Relaxed);
    }

    #[cfg(test)]
    pub fn dropped(&self) -> usize {
        self.dropped.load(Ordering::Relaxed)
    }

    fn output(&self) -> Option<String> {
        let mut messages = vec![];
        let unknown_lifts = self.unknown_lifts.swap(0, Ordering::Relaxed);
        if unknown_lifts > 0 {
            messages.push(format!("lifts of unknown ids: {}", unknown_lifts));
        }
        let overflows = self.overflows.swap(0, Ordering::Relaxed);
        if overflows > 0 {
            messages.push(format!("events beyond capacity: {}", overflows));
        }
        let dropped = self.dropped.swap(0, Ordering::Relaxed);
        if dropped > 0 {
            messages.push(format!("dropped kernel buffers: {}", dropped));
        }
        if !messages.is_empty() {
            Some(format!(
                "[{}]: {}",
                Utc::now().format("%F %T"),
                messages.join(", ")
            ))
        } else {
            None
        }
    }

    fn print_output(&self) {
        match self.output() {
            None => {}
            Some(output) => {
                log::warn!("{}", output);
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn not_found() -> SlotError {
        SlotError::NotFound { id: 3 }
    }

    #[test]
    fn output_includes_timestamp() {
        let stats = Stats::new();
        stats.log_slot_error(&not_found());
        let output = stats.output().unwrap();
        let expected = Utc::now().format("[%F %T]: lifts of unknown ids: 1").to_string();
        assert_eq!(output.len(), expected.len());
        assert!(output.ends_with("]: lifts of unknown ids: 1"), "{}", output);
    }

    #[test]
    fn output_returns_nothing_if_nothing_was_logged() {
        let stats = Stats::new();
        assert_eq!(stats.output(), None);
    }

    #[test]
    fn output_resets_the_counters() {
        let stats = Stats::new();
        stats.log_slot_error(&not_found());
        stats.log_dropped();
        stats.output();
        assert_eq!(stats.output(), None);
    }

    #[test]
    fn output_counts_capacity_overflows() {
        let stats = Stats::new();
        stats.log_slot_error(&SlotError::CapacityExceeded { id: 5 });
        stats.log_slot_error(&SlotError::CapacityExceeded { id: 5 });
        let output = stats.output().unwrap();
        assert!(output.ends_with("]: events beyond capacity: 2"), "{}", output);
    }

    #[test]
    fn output_combines_all_counters() {
        let stats = Stats::new();
        stats.log_slot_error(&not_found());
        stats.log_slot_error(&SlotError::CapacityExceeded { id: 5 });
        stats.log_dropped();
        let output = stats.output().unwrap();
        assert!(
            output.ends_with(
                "]: lifts of unknown ids: 1, events beyond capacity: 1, dropped kernel buffers: 1"
            ),
            "{}",
            output
        );
    }

    #[test]
    fn counters_are_shared_between_clones() {
        let stats = Stats::new();
        let clone = stats.clone();
        ::std::thread::spawn(move || clone.log_dropped())
            .join()
            .unwrap();
        assert!(stats.output().unwrap().ends_with("dropped kernel buffers: 1"));
    }
}
