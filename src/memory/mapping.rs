// Mon Oct 19 2026 - Alex

use crate::memory::{FileRange, MemoryError, MemoryRegion, ModuleRange, RegionGroup};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Translates target virtual addresses into dump file offsets.
///
/// Parsing of the dump container itself lives outside this crate; anything that can describe
/// which virtual ranges were captured, and where, can drive reconstruction.
pub trait AddressResolver: Send + Sync {
    fn va_to_offset(&self, address: u64) -> Option<u64>;

    fn region_groups(&self) -> Vec<RegionGroup>;

    fn module_ranges(&self) -> Vec<FileRange>;

    /// Whether the resolver knows enough about the capture to drive a region-aware scan.
    fn is_valid(&self) -> bool;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct RegionMapFile {
    #[serde(default)]
    regions: Vec<MemoryRegion>,
    #[serde(default)]
    modules: Vec<ModuleRange>,
}

/// Resolver backed by an explicit list of captured regions.
#[derive(Debug, Clone, Default)]
pub struct RegionMap {
    regions: Vec<MemoryRegion>,
    modules: Vec<ModuleRange>,
}

impl RegionMap {
    pub fn new(
        mut regions: Vec<MemoryRegion>,
        modules: Vec<ModuleRange>,
    ) -> Result<Self, MemoryError> {
        if let Some(empty) = regions.iter().find(|r| r.size == 0) {
            return Err(MemoryError::InvalidRegionMap(format!(
                "zero-sized region at {:#010x}",
                empty.virtual_address
            )));
        }

        regions.sort_by_key(|r| r.virtual_address);

        for pair in regions.windows(2) {
            if pair[0].virtual_end() > pair[1].virtual_address {
                return Err(MemoryError::InvalidRegionMap(format!(
                    "regions {} and {} overlap",
                    pair[0], pair[1]
                )));
            }
        }

        Ok(Self { regions, modules })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self, MemoryError> {
        let file: RegionMapFile = serde_json::from_str(json)?;
        Self::new(file.regions, file.modules)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, MemoryError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn regions(&self) -> &[MemoryRegion] {
        &self.regions
    }

    pub fn modules(&self) -> &[ModuleRange] {
        &self.modules
    }

    pub fn find_region(&self, address: u64) -> Option<&MemoryRegion> {
        let index = self.regions.partition_point(|r| r.virtual_end() <= address);
        self.regions.get(index).filter(|r| r.contains(address))
    }
}

impl AddressResolver for RegionMap {
    fn va_to_offset(&self, address: u64) -> Option<u64> {
        self.find_region(address)?.offset_of(address)
    }

    fn region_groups(&self) -> Vec<RegionGroup> {
        let mut ranges: Vec<FileRange> = self.regions.iter().map(|r| r.file_range()).collect();
        ranges.sort_by_key(|r| r.file_offset);

        let mut groups: Vec<RegionGroup> = Vec::new();
        for range in ranges {
            let contiguous = groups
                .last()
                .and_then(|g| g.regions.last())
                .map(|last| last.end() == range.file_offset)
                .unwrap_or(false);

            if !contiguous {
                groups.push(RegionGroup::default());
            }
            if let Some(group) = groups.last_mut() {
                group.push(range);
            }
        }
        groups
    }

    fn module_ranges(&self) -> Vec<FileRange> {
        self.modules.iter().map(|m| m.file_range()).collect()
    }

    fn is_valid(&self) -> bool {
        !self.regions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_map() -> RegionMap {
        RegionMap::new(
            vec![
                MemoryRegion::new(0x7000_0000, 0x1000, 0x3000),
                MemoryRegion::new(0x4000_0000, 0x1000, 0x1000),
                MemoryRegion::new(0x4000_1000, 0x1000, 0x2000),
            ],
            vec![ModuleRange::new("default.xex", 0x1800, 0x100)],
        )
        .unwrap()
    }

    #[test]
    fn test_va_to_offset() {
        let map = sample_map();
        assert_eq!(map.va_to_offset(0x4000_0010), Some(0x1010));
        assert_eq!(map.va_to_offset(0x4000_1004), Some(0x2004));
        assert_eq!(map.va_to_offset(0x7000_0FFF), Some(0x3FFF));
        assert_eq!(map.va_to_offset(0x5000_0000), None);
        assert_eq!(map.va_to_offset(0), None);
    }

    #[test]
    fn test_region_groups_merge_file_contiguous_regions() {
        let map = sample_map();
        let groups = map.region_groups();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].total_size, 0x3000);
        assert_eq!(groups[0].regions.len(), 3);

        let split = RegionMap::new(
            vec![
                MemoryRegion::new(0x4000_0000, 0x100, 0x0),
                MemoryRegion::new(0x5000_0000, 0x100, 0x200),
            ],
            Vec::new(),
        )
        .unwrap();
        assert_eq!(split.region_groups().len(), 2);
    }

    #[test]
    fn test_module_ranges() {
        let map = sample_map();
        assert_eq!(map.module_ranges(), vec![FileRange::new(0x1800, 0x100)]);
    }

    #[test]
    fn test_rejects_overlapping_regions() {
        let result = RegionMap::new(
            vec![
                MemoryRegion::new(0x4000_0000, 0x2000, 0x0),
                MemoryRegion::new(0x4000_1000, 0x1000, 0x2000),
            ],
            Vec::new(),
        );
        assert!(matches!(result, Err(MemoryError::InvalidRegionMap(_))));
    }

    #[test]
    fn test_rejects_zero_sized_region() {
        let result = RegionMap::new(vec![MemoryRegion::new(0x4000_0000, 0, 0)], Vec::new());
        assert!(matches!(result, Err(MemoryError::InvalidRegionMap(_))));
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "regions": [
                { "virtual_address": 1073741824, "size": 4096, "file_offset": 0, "name": "heap" }
            ],
            "modules": [
                { "name": "default.xex", "file_offset": 4096, "size": 512 }
            ]
        }"#;
        let map = RegionMap::from_json_str(json).unwrap();
        assert!(map.is_valid());
        assert_eq!(map.regions()[0].name.as_deref(), Some("heap"));
        assert_eq!(map.va_to_offset(0x4000_0004), Some(4));
        assert_eq!(map.modules().len(), 1);
    }

    #[test]
    fn test_empty_map_is_invalid() {
        let map = RegionMap::empty();
        assert!(!map.is_valid());
        assert!(map.region_groups().is_empty());
        assert!(RegionMap::from_json_str("{}").unwrap().regions().is_empty());
        assert!(matches!(RegionMap::from_json_str("not json"), Err(MemoryError::Json(_))));
    }
}
