// Mon Oct 19 2026 - Alex

use crate::form::{FormType, FORM_BASE_SIZE, FORM_HEADER_SIZE};
use crate::structure::BuildIdentifier;

/// Maps build identity to struct geometry.
///
/// Offsets in the readers are written against the release build. Other builds insert members
/// after the form base, which pushes every later field by a fixed amount.
pub struct LayoutResolver;

impl LayoutResolver {
    pub fn layout_shift(build: BuildIdentifier) -> i32 {
        match build {
            BuildIdentifier::Release => 0,
            BuildIdentifier::Beta => 4,
            BuildIdentifier::Debug => 8,
            BuildIdentifier::Unknown => 0,
        }
    }

    /// Release-build size of the struct behind `form_type`, when it is one the readers handle.
    pub fn baseline_size(form_type: FormType) -> Option<usize> {
        let size = match form_type {
            FormType::Npc | FormType::Creature => 0x60,
            FormType::Weapon => 0x50,
            FormType::Armor | FormType::Ammo | FormType::Note => 0x40,
            FormType::Misc | FormType::Key => 0x30,
            FormType::Ingestible => 0x38,
            FormType::Topic | FormType::TopicInfo => 0x38,
            FormType::Quest => 0x40,
            FormType::Script => 0x48,
            FormType::Terminal => 0x38,
            FormType::Cell => 0x38,
            FormType::Worldspace => 0x48,
            FormType::Reference | FormType::PlacedNpc | FormType::PlacedCreature => 0x40,
            FormType::Class | FormType::Faction | FormType::Race | FormType::FormList => return None,
        };
        Some(size)
    }

    pub fn struct_size(type_tag: u8, shift: i32) -> usize {
        match FormType::from_u8(type_tag).and_then(Self::baseline_size) {
            Some(size) => apply_shift(size, shift).max(FORM_HEADER_SIZE),
            None => FORM_HEADER_SIZE,
        }
    }

    /// Largest struct any reader reads at this shift.
    pub fn max_struct_size(shift: i32) -> usize {
        FormType::ALL
            .iter()
            .map(|t| Self::struct_size(t.tag(), shift))
            .max()
            .unwrap_or(FORM_HEADER_SIZE)
    }
}

fn apply_shift(offset: usize, shift: i32) -> usize {
    let shifted = offset as i64 + shift as i64;
    shifted.max(0) as usize
}

/// Field offsets for one build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldLayout {
    shift: i32,
}

impl FieldLayout {
    pub fn new(shift: i32) -> Self {
        Self { shift }
    }

    pub fn for_build(build: BuildIdentifier) -> Self {
        Self::new(LayoutResolver::layout_shift(build))
    }

    pub fn shift(&self) -> i32 {
        self.shift
    }

    /// Adjusts a release-build offset. The form base is never shifted.
    pub fn at(&self, baseline: usize) -> usize {
        if baseline < FORM_BASE_SIZE {
            baseline
        } else {
            apply_shift(baseline, self.shift)
        }
    }

    pub fn struct_size(&self, form_type: FormType) -> usize {
        LayoutResolver::struct_size(form_type.tag(), self.shift)
    }
}
