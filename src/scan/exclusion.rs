// Mon Oct 19 2026 - Alex

use crate::memory::FileRange;

/// File ranges that can never hold heap objects, sorted and merged for binary search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleExclusion {
    ranges: Vec<(u64, u64)>,
}

impl ModuleExclusion {
    pub fn new(ranges: &[FileRange]) -> Self {
        let mut spans: Vec<(u64, u64)> = ranges
            .iter()
            .filter(|r| !r.is_empty())
            .map(|r| (r.file_offset, r.end()))
            .collect();
        spans.sort_unstable();

        let mut merged: Vec<(u64, u64)> = Vec::with_capacity(spans.len());
        for (start, end) in spans {
            match merged.last_mut() {
                Some(last) if start <= last.1 => last.1 = last.1.max(end),
                _ => merged.push((start, end)),
            }
        }
        Self { ranges: merged }
    }

    pub fn contains(&self, offset: u64) -> bool {
        let index = self.ranges.partition_point(|(_, end)| *end <= offset);
        self.ranges
            .get(index)
            .map(|(start, _)| *start <= offset)
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}
