// Mon Oct 19 2026 - Alex

pub mod actor;
pub mod dialogue;
pub mod discovery;
pub mod item;
pub mod script;
pub mod terminal;
pub mod world;

pub use discovery::{
    discover, discover_with_control, form_candidate_test, reconstruct_all, DiscoveryReport, VTABLE_RANGE,
};

use crate::config::ValidationLimits;
use crate::form::{Anchor, FormHeader, FormRef, FormType, Record};
use crate::memory::{read_validated_float, MemoryContext};
use crate::structure::{BuildIdentifier, FieldLayout, ListWalker, PointerArray};
use crate::utils::BinaryUtils;
use log::debug;

/// A form struct that passed the bounds, read and identity checks.
pub struct FormView {
    pub offset: u64,
    pub header: FormHeader,
    pub form_type: FormType,
    buf: Vec<u8>,
}

impl FormView {
    pub fn form_id(&self) -> u32 {
        self.header.form_id
    }

    pub fn bytes(&self) -> &[u8] {
        &self.buf
    }
}

/// Turns anchors into records for one dump and one build.
pub struct Reconstructor<'a> {
    ctx: &'a MemoryContext,
    build: BuildIdentifier,
    layout: FieldLayout,
    limits: ValidationLimits,
    lists: ListWalker,
}

impl<'a> Reconstructor<'a> {
    pub fn new(ctx: &'a MemoryContext, build: BuildIdentifier, limits: ValidationLimits) -> Self {
        Self {
            ctx,
            build,
            layout: FieldLayout::for_build(build),
            lists: ListWalker::new(limits.max_list_items),
            limits,
        }
    }

    pub fn context(&self) -> &MemoryContext {
        self.ctx
    }

    pub fn build(&self) -> BuildIdentifier {
        self.build
    }

    pub fn layout(&self) -> FieldLayout {
        self.layout
    }

    pub fn limits(&self) -> &ValidationLimits {
        &self.limits
    }

    /// Bounds check, single read and identity check shared by every reader.
    pub fn load(&self, anchor: &Anchor, accepted: &[FormType]) -> Option<FormView> {
        let form_type = anchor.form_type().filter(|t| accepted.contains(t))?;
        let size = self.layout.struct_size(form_type);

        let end = anchor.file_offset.checked_add(size as u64)?;
        if end > self.ctx.file_size() {
            debug!("{} {:#010x} at {:#x} runs past end of dump", form_type, anchor.form_id, anchor.file_offset);
            return None;
        }

        let buf = self.ctx.read_bytes(anchor.file_offset, size)?;
        let header = FormHeader::parse(&buf)?;
        if !header.has_valid_form_id() {
            debug!("{} at {:#x} carries sentinel form id {:#010x}", form_type, anchor.file_offset, header.form_id);
            return None;
        }
        if header.form_id != anchor.form_id {
            debug!(
                "{} at {:#x}: expected form id {:#010x}, found {:#010x}",
                form_type, anchor.file_offset, anchor.form_id, header.form_id
            );
            return None;
        }
        if header.type_tag != anchor.type_tag {
            debug!(
                "{:#010x} at {:#x}: expected {} but header says {:#04x}",
                anchor.form_id, anchor.file_offset, form_type, header.type_tag
            );
            return None;
        }

        Some(FormView {
            offset: anchor.file_offset,
            header,
            form_type,
            buf,
        })
    }

    /// Dispatches on the anchor's type tag.
    pub fn read(&self, anchor: &Anchor) -> Option<Record> {
        let form_type = anchor.form_type()?;
        match form_type {
            FormType::Npc | FormType::Creature => self.read_actor(anchor).map(Record::Actor),
            t if t.is_item() => self.read_item(anchor).map(Record::Item),
            FormType::Topic => self.read_topic(anchor).map(Record::Topic),
            FormType::TopicInfo => self.read_topic_info(anchor).map(Record::TopicInfo),
            FormType::Quest => self.read_quest(anchor).map(Record::Quest),
            FormType::Script => self.read_script(anchor).map(Record::Script),
            FormType::Terminal => self.read_terminal(anchor).map(Record::Terminal),
            FormType::Cell => self.read_cell(anchor).map(Record::Cell),
            FormType::Worldspace => self.read_worldspace(anchor).map(Record::Worldspace),
            t if t.is_reference() => self.read_reference(anchor).map(Record::Reference),
            _ => None,
        }
    }

    fn at(&self, baseline: usize) -> usize {
        self.layout.at(baseline)
    }

    fn u8_field(&self, view: &FormView, offset: usize) -> u8 {
        BinaryUtils::read_u8(&view.buf, self.at(offset)).unwrap_or(0)
    }

    fn u16_field(&self, view: &FormView, offset: usize) -> u16 {
        BinaryUtils::read_u16_be(&view.buf, self.at(offset)).unwrap_or(0)
    }

    fn i16_field(&self, view: &FormView, offset: usize) -> i16 {
        BinaryUtils::read_i16_be(&view.buf, self.at(offset)).unwrap_or(0)
    }

    fn u32_field(&self, view: &FormView, offset: usize) -> u32 {
        BinaryUtils::read_u32_be(&view.buf, self.at(offset)).unwrap_or(0)
    }

    fn i32_field(&self, view: &FormView, offset: usize) -> i32 {
        BinaryUtils::read_i32_be(&view.buf, self.at(offset)).unwrap_or(0)
    }

    fn f32_field(&self, view: &FormView, offset: usize, min: f32, max: f32) -> f32 {
        read_validated_float(&view.buf, self.at(offset), min, max)
    }

    fn string_field(&self, view: &FormView, offset: usize) -> Option<String> {
        self.ctx.read_string_descriptor(&view.buf, self.at(offset))
    }

    fn form_field(&self, view: &FormView, offset: usize, expected: FormType) -> Option<u32> {
        self.ctx
            .follow_pointer_to_form_id(&view.buf, self.at(offset), Some(expected))
    }

    fn any_form_field(&self, view: &FormView, offset: usize, candidates: &[FormType]) -> Option<FormRef> {
        self.ctx.follow_pointer_to_any(&view.buf, self.at(offset), candidates)
    }

    fn list_field<T, F>(&self, view: &FormView, offset: usize, visit: F) -> Vec<T>
    where
        F: FnMut(u32) -> Option<T>,
    {
        self.lists
            .walk(self.ctx, &view.buf, view.offset, self.at(offset), visit)
    }

    fn array_field(&self, buf: &[u8], offset: usize) -> Option<PointerArray> {
        PointerArray::read(self.ctx, buf, offset, self.limits.max_array_elements)
    }

    /// Reads `len` bytes behind a list payload pointer.
    fn payload(&self, pointer: u32, len: usize) -> Option<Vec<u8>> {
        let offset = self.ctx.address_to_offset(pointer)?;
        self.ctx.read_bytes(offset, len)
    }

    /// Resolves a pointer held as a bare value, as list nodes carry them.
    fn form_at(&self, pointer: u32, expected: Option<FormType>) -> Option<FormRef> {
        self.ctx.follow_pointer(&pointer.to_be_bytes(), 0, expected)
    }
}

/// `value` when it lies in `[min, max]`, otherwise the type's default.
pub(crate) fn clamped<T: PartialOrd + Default>(value: T, min: T, max: T) -> T {
    if value >= min && value <= max {
        value
    } else {
        T::default()
    }
}
