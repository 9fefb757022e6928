// Mon Oct 19 2026 - Alex

use crate::config::ScanConfig;
use crate::memory::{FileRange, MemoryContext};
use crate::scan::{ModuleExclusion, ProgressSink, ScanControl, ScanProgress};
use crate::utils::{align_up, format_bytes, ScopedTimer};
use log::{debug, info, warn};
use rayon::prelude::*;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    pub bytes_scanned: u64,
    pub candidates: u64,
    pub accepted: u64,
    pub groups: usize,
    pub used_regions: bool,
    pub cancelled: bool,
}

/// Sweeps captured memory for struct-shaped data.
pub struct ObjectScanner {
    config: ScanConfig,
}

struct Counters {
    candidates: AtomicU64,
    accepted: AtomicU64,
}

impl ObjectScanner {
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Tests every aligned offset of captured memory with `candidate_test` and hands hits to
    /// `process_candidate` together with their absolute file offset.
    ///
    /// `process_candidate` returns whether it accepted the candidate and may be called from
    /// several threads at once. Invocation order is unspecified.
    pub fn scan_aligned<T, P>(
        &self,
        ctx: &MemoryContext,
        candidate_test: T,
        process_candidate: P,
        min_struct_size: usize,
        progress: Option<ProgressSink<'_>>,
    ) -> ScanSummary
    where
        T: Fn(&[u8], usize) -> bool + Sync,
        P: Fn(&[u8], usize, u64) -> bool + Sync,
    {
        self.scan_aligned_with_control(
            ctx,
            candidate_test,
            process_candidate,
            min_struct_size,
            progress,
            &ScanControl::new(),
        )
    }

    pub fn scan_aligned_with_control<T, P>(
        &self,
        ctx: &MemoryContext,
        candidate_test: T,
        process_candidate: P,
        min_struct_size: usize,
        progress: Option<ProgressSink<'_>>,
        control: &ScanControl,
    ) -> ScanSummary
    where
        T: Fn(&[u8], usize) -> bool + Sync,
        P: Fn(&[u8], usize, u64) -> bool + Sync,
    {
        let _timer = ScopedTimer::new("object scan");
        let file_size = ctx.file_size();
        let resolver = ctx.resolver();
        let exclusion = ModuleExclusion::new(&resolver.module_ranges());
        let counters = Counters {
            candidates: AtomicU64::new(0),
            accepted: AtomicU64::new(0),
        };

        let used_regions = resolver.is_valid();
        let spans: Vec<FileRange> = if used_regions {
            resolver
                .region_groups()
                .iter()
                .filter_map(|g| g.span())
                .map(|s| s.clamp_to(file_size))
                .filter(|s| !s.is_empty())
                .collect()
        } else {
            warn!("No usable memory regions, scanning the whole file sequentially");
            vec![FileRange::new(0, file_size)]
        };

        let total: u64 = spans.iter().map(|s| s.size).sum();
        let tracker = ScanProgress::new(total, progress);
        info!(
            "Scanning {} in {} span(s), {} module range(s) excluded",
            format_bytes(total),
            spans.len(),
            exclusion.len()
        );

        let scan_span = |span: &FileRange| {
            self.scan_span(
                ctx,
                *span,
                &exclusion,
                &candidate_test,
                &process_candidate,
                min_struct_size,
                &tracker,
                &counters,
                control,
            )
        };

        if used_regions && spans.len() > 1 {
            match rayon::ThreadPoolBuilder::new()
                .num_threads(self.config.max_threads)
                .build()
            {
                Ok(pool) => pool.install(|| spans.par_iter().for_each(scan_span)),
                Err(e) => {
                    warn!("Failed to build scan thread pool ({}), scanning sequentially", e);
                    spans.iter().for_each(scan_span);
                }
            }
        } else {
            spans.iter().for_each(scan_span);
        }

        let cancelled = control.is_cancelled();
        if !cancelled {
            tracker.finish();
        }

        let summary = ScanSummary {
            bytes_scanned: tracker.scanned(),
            candidates: counters.candidates.load(Ordering::Relaxed),
            accepted: counters.accepted.load(Ordering::Relaxed),
            groups: spans.len(),
            used_regions,
            cancelled,
        };
        info!(
            "Scan finished: {} candidates, {} accepted{}",
            summary.candidates,
            summary.accepted,
            if cancelled { " (cancelled)" } else { "" }
        );
        summary
    }

    #[allow(clippy::too_many_arguments)]
    fn scan_span<T, P>(
        &self,
        ctx: &MemoryContext,
        span: FileRange,
        exclusion: &ModuleExclusion,
        candidate_test: &T,
        process_candidate: &P,
        min_struct_size: usize,
        progress: &ScanProgress<'_>,
        counters: &Counters,
        control: &ScanControl,
    ) where
        T: Fn(&[u8], usize) -> bool + Sync,
        P: Fn(&[u8], usize, u64) -> bool + Sync,
    {
        let bytes = ctx.bytes();
        let alignment = self.config.alignment.max(1) as u64;
        let chunk_size = self.config.chunk_size.max(1) as u64;
        let overlap = self.config.chunk_overlap.max(min_struct_size) as u64;
        let span_end = span.end();

        debug!("Scanning span {}", span);

        let mut chunk_start = span.file_offset;
        while chunk_start < span_end {
            if control.is_cancelled() {
                debug!("Scan of span {} cancelled at {:#x}", span, chunk_start);
                return;
            }

            let chunk_end = chunk_start.saturating_add(chunk_size).min(span_end);
            let buffer_end = chunk_end.saturating_add(overlap).min(span_end);
            let buffer = &bytes[chunk_start as usize..buffer_end as usize];

            let mut candidates = 0u64;
            let mut accepted = 0u64;
            let mut offset = align_up(chunk_start, alignment);
            while offset < chunk_end {
                let local = (offset - chunk_start) as usize;
                if local + min_struct_size > buffer.len() {
                    break;
                }
                if !exclusion.contains(offset) && candidate_test(buffer, local) {
                    candidates += 1;
                    if process_candidate(buffer, local, offset) {
                        accepted += 1;
                    }
                }
                offset += alignment;
            }

            counters.candidates.fetch_add(candidates, Ordering::Relaxed);
            counters.accepted.fetch_add(accepted, Ordering::Relaxed);
            progress.add(chunk_end - chunk_start);
            chunk_start = chunk_end;
        }
    }
}

impl Default for ObjectScanner {
    fn default() -> Self {
        Self::new(ScanConfig::default())
    }
}
