// Mon Oct 19 2026 - Alex

use crate::form::{FormType, MAX_FORM_TYPE};
use crate::utils::BinaryUtils;
use bitflags::bitflags;
use serde::Serialize;

/// Bytes read when probing a pointer target: vtable, type tag, flags, form id.
pub const FORM_HEADER_SIZE: usize = 0x10;
/// End of the common form base; build-specific members start here.
pub const FORM_BASE_SIZE: usize = 0x18;

pub const VTABLE_OFFSET: usize = 0x00;
pub const TYPE_TAG_OFFSET: usize = 0x04;
pub const FLAGS_OFFSET: usize = 0x08;
pub const FORM_ID_OFFSET: usize = 0x0C;

/// Form id reserved for "no form".
pub const NULL_FORM_ID: u32 = 0;
/// All bits set marks an unassigned or freed form.
pub const INVALID_FORM_ID: u32 = 0xFFFF_FFFF;

pub fn is_valid_form_id(form_id: u32) -> bool {
    form_id != NULL_FORM_ID && form_id != INVALID_FORM_ID
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
    pub struct FormFlags: u32 {
        const DELETED = 0x0000_0020;
        const PERSISTENT = 0x0000_0400;
        const INITIALLY_DISABLED = 0x0000_0800;
    }
}

/// The fixed prefix every reconstructible object starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormHeader {
    pub vtable: u32,
    pub type_tag: u8,
    pub flags: FormFlags,
    pub form_id: u32,
}

impl FormHeader {
    pub fn parse(buf: &[u8]) -> Option<Self> {
        Some(Self {
            vtable: BinaryUtils::read_u32_be(buf, VTABLE_OFFSET)?,
            type_tag: BinaryUtils::read_u8(buf, TYPE_TAG_OFFSET)?,
            flags: FormFlags::from_bits_retain(BinaryUtils::read_u32_be(buf, FLAGS_OFFSET)?),
            form_id: BinaryUtils::read_u32_be(buf, FORM_ID_OFFSET)?,
        })
    }

    pub fn form_type(&self) -> Option<FormType> {
        FormType::from_u8(self.type_tag)
    }

    pub fn has_known_type_range(&self) -> bool {
        self.type_tag <= MAX_FORM_TYPE
    }

    pub fn has_valid_form_id(&self) -> bool {
        is_valid_form_id(self.form_id)
    }
}

/// A resolved reference to another form, carried by id only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FormRef {
    pub form_id: u32,
    pub type_tag: u8,
}

impl FormRef {
    pub fn form_type(&self) -> Option<FormType> {
        FormType::from_u8(self.type_tag)
    }
}

/// Where a form is believed to live and what it should be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Anchor {
    pub file_offset: u64,
    pub type_tag: u8,
    pub form_id: u32,
}

impl Anchor {
    pub fn new(file_offset: u64, form_type: FormType, form_id: u32) -> Self {
        Self {
            file_offset,
            type_tag: form_type.tag(),
            form_id,
        }
    }

    pub fn with_tag(file_offset: u64, type_tag: u8, form_id: u32) -> Self {
        Self {
            file_offset,
            type_tag,
            form_id,
        }
    }

    pub fn form_type(&self) -> Option<FormType> {
        FormType::from_u8(self.type_tag)
    }
}
