// Mon Oct 19 2026 - Alex

use crate::form::{Anchor, FormType, ScriptRecord, ScriptReference, ScriptVariable};
use crate::readers::{clamped, Reconstructor};
use crate::utils::BinaryUtils;

const REF_COUNT: usize = 0x1C;
const COMPILED_SIZE: usize = 0x20;
const VARIABLE_COUNT: usize = 0x24;
const SCRIPT_TYPE: usize = 0x28;
const FLAGS: usize = 0x2A;
const COMPILED_DATA: usize = 0x30;
const OWNER_QUEST: usize = 0x34;
const REFERENCES: usize = 0x38;
const VARIABLES: usize = 0x40;

mod scro {
    pub const EDITOR_ID: usize = 0x00;
    pub const FORM: usize = 0x08;
    pub const VARIABLE_INDEX: usize = 0x0C;
    pub const SIZE: usize = 0x10;
}

mod variable {
    pub const INDEX: usize = 0x00;
    pub const TYPE: usize = 0x0C;
    pub const NAME: usize = 0x10;
    pub const SIZE: usize = 0x18;
}

const MAX_SCRIPT_ENTRIES: u32 = 1024;
const MAX_COMPILED_SIZE: u32 = 0x40000;

/// Object, quest and effect scripts.
const SCRIPT_TYPES: [u16; 3] = [0x000, 0x001, 0x100];

impl<'a> Reconstructor<'a> {
    /// Reads script metadata. The compiled bytecode is only checked for presence.
    pub fn read_script(&self, anchor: &Anchor) -> Option<ScriptRecord> {
        let view = self.load(anchor, &[FormType::Script])?;

        let script_type = self.u16_field(&view, SCRIPT_TYPE);
        let compiled_pointer = self.u32_field(&view, COMPILED_DATA);

        let referenced_objects = self.list_field(&view, REFERENCES, |pointer| {
            let payload = self.payload(pointer, scro::SIZE)?;
            let editor_id = self.context().read_string_descriptor(&payload, scro::EDITOR_ID);
            let form = self.context().follow_pointer(&payload, scro::FORM, None);
            if editor_id.is_none() && form.is_none() {
                return None;
            }
            let variable_index = BinaryUtils::read_u32_be(&payload, scro::VARIABLE_INDEX).unwrap_or(0);
            Some(ScriptReference {
                editor_id,
                form,
                variable_index: clamped(variable_index, 0, MAX_SCRIPT_ENTRIES),
            })
        });

        let variables = self.list_field(&view, VARIABLES, |pointer| {
            let payload = self.payload(pointer, variable::SIZE)?;
            let index = BinaryUtils::read_u32_be(&payload, variable::INDEX)?;
            if !(1..=MAX_SCRIPT_ENTRIES).contains(&index) {
                return None;
            }
            let var_type = clamped(BinaryUtils::read_u8(&payload, variable::TYPE).unwrap_or(0), 0, 1);
            Some(ScriptVariable {
                index,
                is_integer: var_type == 1,
                name: self.context().read_string_descriptor(&payload, variable::NAME),
            })
        });

        Some(ScriptRecord {
            form_id: view.form_id(),
            ref_object_count: clamped(self.u32_field(&view, REF_COUNT), 0, MAX_SCRIPT_ENTRIES),
            compiled_size: clamped(self.u32_field(&view, COMPILED_SIZE), 0, MAX_COMPILED_SIZE),
            variable_count: clamped(self.u32_field(&view, VARIABLE_COUNT), 0, MAX_SCRIPT_ENTRIES),
            script_type: if SCRIPT_TYPES.contains(&script_type) { script_type } else { 0 },
            flags: self.u16_field(&view, FLAGS),
            has_compiled_data: self.context().is_valid_pointer(compiled_pointer),
            owner_quest_form_id: self.form_field(&view, OWNER_QUEST, FormType::Quest),
            referenced_objects,
            variables,
        })
    }
}
