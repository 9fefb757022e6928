// Mon Oct 19 2026 - Alex

use crate::form::header::{FORM_ID_OFFSET, TYPE_TAG_OFFSET, VTABLE_OFFSET};
use crate::form::{is_valid_form_id, Anchor, FormType, Record, RecordArena};
use crate::readers::Reconstructor;
use crate::scan::{ObjectScanner, ProgressSink, ScanControl, ScanSummary};
use crate::structure::LayoutResolver;
use crate::utils::BinaryUtils;
use log::{debug, info};
use parking_lot::Mutex;
use serde::Serialize;

/// Where the console maps executable code; every live form's vtable points in here.
pub const VTABLE_RANGE: std::ops::Range<u32> = 0x8200_0000..0x8400_0000;

#[derive(Debug, Clone, Default, Serialize)]
pub struct DiscoveryReport {
    pub summary: ScanSummary,
    /// Candidates that passed the quick test but failed reconstruction or were duplicates.
    pub rejected: u64,
    pub records: RecordArena,
}

/// Cheap header test run at every aligned offset. False positives are fine; the readers
/// reject them later.
pub fn form_candidate_test(types: &[FormType]) -> impl Fn(&[u8], usize) -> bool + Sync {
    let tags: Vec<u8> = types.iter().map(|t| t.tag()).collect();
    move |buf: &[u8], at: usize| {
        let Some(tag) = BinaryUtils::read_u8(buf, at + TYPE_TAG_OFFSET) else {
            return false;
        };
        if !tags.contains(&tag) {
            return false;
        }
        let form_id = BinaryUtils::read_u32_be(buf, at + FORM_ID_OFFSET).unwrap_or(0);
        if !is_valid_form_id(form_id) {
            return false;
        }
        BinaryUtils::read_u32_be(buf, at + VTABLE_OFFSET)
            .map(|vtable| VTABLE_RANGE.contains(&vtable))
            .unwrap_or(false)
    }
}

/// Scans the dump for forms of `types` and reconstructs every hit.
///
/// Records are inserted in (form id, offset) order, so when the same id shows up twice the
/// copy at the lower offset wins regardless of thread scheduling.
pub fn discover(
    scanner: &ObjectScanner,
    reconstructor: &Reconstructor<'_>,
    types: &[FormType],
    progress: Option<ProgressSink<'_>>,
) -> DiscoveryReport {
    discover_with_control(scanner, reconstructor, types, progress, &ScanControl::new())
}

pub fn discover_with_control(
    scanner: &ObjectScanner,
    reconstructor: &Reconstructor<'_>,
    types: &[FormType],
    progress: Option<ProgressSink<'_>>,
    control: &ScanControl,
) -> DiscoveryReport {
    let ctx = reconstructor.context();
    let shift = reconstructor.layout().shift();
    let min_struct_size = types
        .iter()
        .map(|t| LayoutResolver::struct_size(t.tag(), shift))
        .max()
        .unwrap_or(0);

    info!(
        "Discovering {} form type(s) for {} build, minimum struct size {:#x}",
        types.len(),
        reconstructor.build(),
        min_struct_size
    );

    let found: Mutex<Vec<(u32, u64, Record)>> = Mutex::new(Vec::new());
    let summary = scanner.scan_aligned_with_control(
        ctx,
        form_candidate_test(types),
        |buf, at, offset| {
            let (Some(tag), Some(form_id)) = (
                BinaryUtils::read_u8(buf, at + TYPE_TAG_OFFSET),
                BinaryUtils::read_u32_be(buf, at + FORM_ID_OFFSET),
            ) else {
                return false;
            };
            match reconstructor.read(&Anchor::with_tag(offset, tag, form_id)) {
                Some(record) => {
                    found.lock().push((form_id, offset, record));
                    true
                }
                None => false,
            }
        },
        min_struct_size,
        progress,
        control,
    );

    let mut found = found.into_inner();
    found.sort_by_key(|(form_id, offset, _)| (*form_id, *offset));

    let mut records = RecordArena::new();
    let mut rejected = summary.candidates.saturating_sub(found.len() as u64);
    for (form_id, offset, record) in found {
        if !records.insert(record) {
            debug!("Duplicate form {:#010x} at {:#x} ignored", form_id, offset);
            rejected += 1;
        }
    }

    info!("Reconstructed {} record(s), {} candidate(s) rejected", records.len(), rejected);
    DiscoveryReport {
        summary,
        rejected,
        records,
    }
}

/// Reconstructs anchors that came from an external index instead of a scan.
pub fn reconstruct_all(reconstructor: &Reconstructor<'_>, anchors: &[Anchor]) -> RecordArena {
    let mut sorted: Vec<&Anchor> = anchors.iter().collect();
    sorted.sort_by_key(|a| (a.form_id, a.file_offset));

    let mut records = RecordArena::new();
    for anchor in sorted {
        match reconstructor.read(anchor) {
            Some(record) => {
                records.insert(record);
            }
            None => debug!("No record for {:#010x} at {:#x}", anchor.form_id, anchor.file_offset),
        }
    }
    records
}
