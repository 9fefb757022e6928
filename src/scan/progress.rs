// Mon Oct 19 2026 - Alex

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

pub type ProgressSink<'a> = &'a (dyn Fn(f64) + Sync);

/// Bytes scanned so far across all workers, reported as a fraction of the total.
///
/// Workers add concurrently; reports go through a lock so the sink only ever sees a
/// non-decreasing sequence.
pub struct ScanProgress<'a> {
    scanned: AtomicU64,
    total: u64,
    last_reported: Mutex<f64>,
    sink: Option<ProgressSink<'a>>,
}

impl<'a> ScanProgress<'a> {
    pub fn new(total: u64, sink: Option<ProgressSink<'a>>) -> Self {
        Self {
            scanned: AtomicU64::new(0),
            total,
            last_reported: Mutex::new(0.0),
            sink,
        }
    }

    pub fn add(&self, bytes: u64) {
        let scanned = self.scanned.fetch_add(bytes, Ordering::Relaxed) + bytes;
        self.report(self.fraction_of(scanned));
    }

    pub fn scanned(&self) -> u64 {
        self.scanned.load(Ordering::Relaxed)
    }

    pub fn fraction(&self) -> f64 {
        self.fraction_of(self.scanned())
    }

    pub fn finish(&self) {
        self.report(1.0);
    }

    fn fraction_of(&self, scanned: u64) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            (scanned as f64 / self.total as f64).min(1.0)
        }
    }

    fn report(&self, fraction: f64) {
        let Some(sink) = self.sink else {
            return;
        };
        let mut last = self.last_reported.lock();
        if fraction > *last {
            *last = fraction;
            sink(fraction);
        }
    }
}

/// Cooperative cancellation, checked by the scanner between chunks.
#[derive(Debug, Default)]
pub struct ScanControl {
    cancelled: AtomicBool,
}

impl ScanControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}
