// Mon Oct 19 2026 - Alex

//! Synthetic big-endian dump images for unit tests.

use crate::form::header::{FLAGS_OFFSET, FORM_ID_OFFSET, TYPE_TAG_OFFSET, VTABLE_OFFSET};
use crate::form::FormType;
use crate::memory::{BufferDump, MemoryContext, MemoryRegion, ModuleRange, RegionMap};
use std::sync::Arc;

pub const TEST_VTABLE: u32 = 0x8200_1000;

/// Builds one captured region starting at file offset zero and writes fields by virtual address.
pub struct DumpBuilder {
    base: u32,
    data: Vec<u8>,
    regions: Option<Vec<MemoryRegion>>,
    modules: Vec<ModuleRange>,
}

impl DumpBuilder {
    pub fn new(base: u32, size: usize) -> Self {
        Self {
            base,
            data: vec![0u8; size],
            regions: None,
            modules: Vec::new(),
        }
    }

    pub fn offset_of(&self, va: u32) -> usize {
        (va - self.base) as usize
    }

    pub fn write_bytes(&mut self, va: u32, bytes: &[u8]) -> &mut Self {
        let start = self.offset_of(va);
        self.data[start..start + bytes.len()].copy_from_slice(bytes);
        self
    }

    pub fn write_u8(&mut self, va: u32, value: u8) -> &mut Self {
        self.write_bytes(va, &[value])
    }

    pub fn write_u16(&mut self, va: u32, value: u16) -> &mut Self {
        self.write_bytes(va, &value.to_be_bytes())
    }

    pub fn write_u32(&mut self, va: u32, value: u32) -> &mut Self {
        self.write_bytes(va, &value.to_be_bytes())
    }

    pub fn write_i32(&mut self, va: u32, value: i32) -> &mut Self {
        self.write_bytes(va, &value.to_be_bytes())
    }

    pub fn write_f32(&mut self, va: u32, value: f32) -> &mut Self {
        self.write_bytes(va, &value.to_be_bytes())
    }

    pub fn raw_header(&mut self, va: u32, vtable: u32, tag: u8, flags: u32, form_id: u32) -> &mut Self {
        self.write_u32(va + VTABLE_OFFSET as u32, vtable);
        self.write_u8(va + TYPE_TAG_OFFSET as u32, tag);
        self.write_u32(va + FLAGS_OFFSET as u32, flags);
        self.write_u32(va + FORM_ID_OFFSET as u32, form_id)
    }

    pub fn form_header(&mut self, va: u32, form_type: FormType, form_id: u32) -> &mut Self {
        self.raw_header(va, TEST_VTABLE, form_type.tag(), 0, form_id)
    }

    /// Writes the text at `text_va` and a descriptor pointing at it at `descriptor_va`.
    pub fn string_descriptor(&mut self, descriptor_va: u32, text_va: u32, text: &str) -> &mut Self {
        self.write_bytes(text_va, text.as_bytes());
        self.write_u32(descriptor_va, text_va);
        self.write_u16(descriptor_va + 4, text.len() as u16)
    }

    pub fn list_node(&mut self, va: u32, data: u32, next: u32) -> &mut Self {
        self.write_u32(va, data);
        self.write_u32(va + 4, next)
    }

    /// Replaces the default single region covering the whole buffer.
    pub fn with_regions(&mut self, regions: Vec<MemoryRegion>) -> &mut Self {
        self.regions = Some(regions);
        self
    }

    pub fn module(&mut self, name: &str, file_offset: u64, size: u64) -> &mut Self {
        self.modules.push(ModuleRange::new(name, file_offset, size));
        self
    }

    pub fn region_map(&self) -> RegionMap {
        let regions = self
            .regions
            .clone()
            .unwrap_or_else(|| vec![MemoryRegion::new(self.base as u64, self.data.len() as u64, 0)]);
        RegionMap::new(regions, self.modules.clone()).expect("test regions must not overlap")
    }

    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn build(&self) -> MemoryContext {
        MemoryContext::new(
            Arc::new(BufferDump::new(self.data.clone())),
            Arc::new(self.region_map()),
        )
    }

    /// A context whose resolver knows no regions, forcing whole-file fallbacks.
    pub fn build_without_regions(&self) -> MemoryContext {
        MemoryContext::new(
            Arc::new(BufferDump::new(self.data.clone())),
            Arc::new(RegionMap::empty()),
        )
    }
}
