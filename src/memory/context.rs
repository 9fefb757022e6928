// Mon Oct 19 2026 - Alex

use crate::form::header::FORM_HEADER_SIZE;
use crate::form::{Anchor, FormHeader, FormRef, FormType};
use crate::memory::{Address, AddressResolver, DumpReader, MemoryError};
use crate::utils::BinaryUtils;
use log::trace;
use std::sync::Arc;

pub const DEFAULT_MAX_STRING_LENGTH: usize = 4096;

/// Size of an inline string descriptor: pointer u32 followed by length u16 and padding.
pub const STRING_DESCRIPTOR_SIZE: usize = 8;

/// The only path through which dump bytes are read.
///
/// Every primitive here answers `None` (or `false`, or `0.0`) for anything that looks like
/// garbage. Callers treat absence as routine.
#[derive(Clone)]
pub struct MemoryContext {
    dump: Arc<dyn DumpReader>,
    resolver: Arc<dyn AddressResolver>,
    max_string_length: usize,
}

impl MemoryContext {
    pub fn new(dump: Arc<dyn DumpReader>, resolver: Arc<dyn AddressResolver>) -> Self {
        Self {
            dump,
            resolver,
            max_string_length: DEFAULT_MAX_STRING_LENGTH,
        }
    }

    pub fn with_max_string_length(mut self, max: usize) -> Self {
        self.max_string_length = max;
        self
    }

    pub fn file_size(&self) -> u64 {
        self.dump.len()
    }

    pub fn bytes(&self) -> &[u8] {
        self.dump.as_slice()
    }

    pub fn resolver(&self) -> &dyn AddressResolver {
        self.resolver.as_ref()
    }

    pub fn max_string_length(&self) -> usize {
        self.max_string_length
    }

    pub fn is_valid_pointer(&self, value: u32) -> bool {
        self.address_to_offset(value).is_some()
    }

    pub fn address_to_offset(&self, value: u32) -> Option<u64> {
        if value == 0 {
            return None;
        }
        self.resolver
            .va_to_offset(value as u64)
            .filter(|offset| *offset < self.dump.len())
    }

    /// Like [`address_to_offset`](Self::address_to_offset) for callers that report failures.
    pub fn resolve(&self, address: Address) -> Result<u64, MemoryError> {
        self.address_to_offset(address.as_u32())
            .ok_or(MemoryError::Unmapped(address.as_u64()))
    }

    /// Exactly `count` bytes at `offset`, or nothing.
    pub fn read_bytes(&self, offset: u64, count: usize) -> Option<Vec<u8>> {
        match self.dump.read_at(offset, count) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                trace!("read of {} bytes at {:#x} failed: {}", count, offset, e);
                None
            }
        }
    }

    pub fn read_form_header(&self, offset: u64) -> Option<FormHeader> {
        let buf = self.read_bytes(offset, FORM_HEADER_SIZE)?;
        FormHeader::parse(&buf)
    }

    /// Anchor for a form at a virtual address, if the address is captured.
    pub fn anchor_at(&self, address: u32, form_type: FormType, form_id: u32) -> Option<Anchor> {
        self.address_to_offset(address)
            .map(|offset| Anchor::new(offset, form_type, form_id))
    }

    /// Follows the pointer stored at `field` in `buf` and returns the header it lands on.
    ///
    /// With `expected` set, any other type tag is rejected. Without it, only tags past the
    /// known-type ceiling are rejected. Sentinel form ids are always rejected.
    pub fn follow_pointer(
        &self,
        buf: &[u8],
        field: usize,
        expected: Option<FormType>,
    ) -> Option<FormRef> {
        let pointer = BinaryUtils::read_u32_be(buf, field)?;
        if pointer == 0 {
            return None;
        }
        let offset = match self.address_to_offset(pointer) {
            Some(offset) => offset,
            None => {
                trace!("pointer {:#010x} at +{:#x} is not captured", pointer, field);
                return None;
            }
        };
        let header = self.read_form_header(offset)?;

        match expected {
            Some(ty) if header.type_tag != ty.tag() => {
                trace!(
                    "pointer {:#010x} expected {} but found tag {:#04x}",
                    pointer,
                    ty,
                    header.type_tag
                );
                return None;
            }
            None if !header.has_known_type_range() => return None,
            _ => {}
        }

        if !header.has_valid_form_id() {
            trace!("pointer {:#010x} lands on sentinel form id", pointer);
            return None;
        }

        Some(FormRef {
            form_id: header.form_id,
            type_tag: header.type_tag,
        })
    }

    pub fn follow_pointer_to_form_id(
        &self,
        buf: &[u8],
        field: usize,
        expected: Option<FormType>,
    ) -> Option<u32> {
        self.follow_pointer(buf, field, expected).map(|r| r.form_id)
    }

    /// Probes each candidate type in order and keeps the first that resolves.
    pub fn follow_pointer_to_any(
        &self,
        buf: &[u8],
        field: usize,
        candidates: &[FormType],
    ) -> Option<FormRef> {
        candidates
            .iter()
            .find_map(|ty| self.follow_pointer(buf, field, Some(*ty)))
    }

    /// Reads the string descriptor at `base_offset + field_offset` and decodes its target.
    pub fn read_length_prefixed_string(&self, base_offset: u64, field_offset: usize) -> Option<String> {
        let descriptor_offset = base_offset.checked_add(field_offset as u64)?;
        let descriptor = self.read_bytes(descriptor_offset, STRING_DESCRIPTOR_SIZE)?;
        self.read_string_descriptor(&descriptor, 0)
    }

    /// Same as [`read_length_prefixed_string`](Self::read_length_prefixed_string) for a
    /// descriptor already held in a struct buffer.
    pub fn read_string_descriptor(&self, buf: &[u8], field: usize) -> Option<String> {
        let pointer = BinaryUtils::read_u32_be(buf, field)?;
        let length = BinaryUtils::read_u16_be(buf, field + 4)? as usize;

        if length == 0 || length > self.max_string_length {
            return None;
        }
        let offset = self.address_to_offset(pointer)?;
        let end = offset.checked_add(length as u64)?;
        if end > self.file_size() {
            trace!("string at {:#x} runs past end of file", offset);
            return None;
        }

        let bytes = self.read_bytes(offset, length)?;
        let text = decode_printable(&bytes);
        if text.is_none() {
            trace!("string at {:#x} is not printable", offset);
        }
        text
    }
}

impl std::fmt::Debug for MemoryContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryContext")
            .field("file_size", &self.dump.len())
            .field("max_string_length", &self.max_string_length)
            .finish()
    }
}

/// Big-endian float at `offset`, or `0.0` when it is short, non-finite, or outside `[min, max]`.
pub fn read_validated_float(buf: &[u8], offset: usize, min: f32, max: f32) -> f32 {
    match BinaryUtils::read_f32_be(buf, offset) {
        Some(value) if value.is_finite() && value >= min && value <= max => value,
        _ => 0.0,
    }
}

/// Decodes game text: trailing NULs dropped, then every byte must be printable ASCII,
/// common whitespace, or Latin-1 from 0xA0 up.
pub fn decode_printable(bytes: &[u8]) -> Option<String> {
    let end = bytes.iter().rposition(|b| *b != 0).map(|i| i + 1)?;
    let trimmed = &bytes[..end];

    let printable = trimmed
        .iter()
        .all(|&b| matches!(b, 0x20..=0x7E | b'\t' | b'\n' | b'\r' | 0xA0..=0xFF));
    if !printable {
        return None;
    }
    Some(trimmed.iter().map(|&b| b as char).collect())
}
