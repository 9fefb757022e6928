// Mon Oct 19 2026 - Alex

use crate::form::{Anchor, FormType, TerminalMenuItem, TerminalRecord};
use crate::readers::{clamped, Reconstructor};
use crate::utils::BinaryUtils;

const NAME: usize = 0x18;
const WELCOME_TEXT: usize = 0x20;
const DIFFICULTY: usize = 0x28;
const FLAGS: usize = 0x29;
const SERVER_TYPE: usize = 0x2A;
const PASSWORD_NOTE: usize = 0x2C;
const MENU_ITEMS: usize = 0x30;

mod menu {
    pub const ITEM_TEXT: usize = 0x00;
    pub const RESULT_TEXT: usize = 0x08;
    pub const FLAGS: usize = 0x10;
    pub const DISPLAY_NOTE: usize = 0x14;
    pub const SUB_MENU: usize = 0x18;
    pub const SIZE: usize = 0x1C;
}

const MAX_DIFFICULTY: u8 = 5;
const MAX_SERVER_TYPE: u8 = 9;

impl<'a> Reconstructor<'a> {
    pub fn read_terminal(&self, anchor: &Anchor) -> Option<TerminalRecord> {
        let view = self.load(anchor, &[FormType::Terminal])?;

        let menu_items = self.list_field(&view, MENU_ITEMS, |pointer| {
            let payload = self.payload(pointer, menu::SIZE)?;
            let ctx = self.context();
            let item = TerminalMenuItem {
                item_text: ctx.read_string_descriptor(&payload, menu::ITEM_TEXT),
                result_text: ctx.read_string_descriptor(&payload, menu::RESULT_TEXT),
                flags: BinaryUtils::read_u8(&payload, menu::FLAGS).unwrap_or(0),
                display_note_form_id: ctx.follow_pointer_to_form_id(&payload, menu::DISPLAY_NOTE, Some(FormType::Note)),
                sub_menu_form_id: ctx.follow_pointer_to_form_id(&payload, menu::SUB_MENU, Some(FormType::Terminal)),
            };
            let present = item.item_text.is_some()
                || item.result_text.is_some()
                || item.display_note_form_id.is_some()
                || item.sub_menu_form_id.is_some();
            present.then_some(item)
        });

        Some(TerminalRecord {
            form_id: view.form_id(),
            name: self.string_field(&view, NAME),
            welcome_text: self.string_field(&view, WELCOME_TEXT),
            difficulty: clamped(self.u8_field(&view, DIFFICULTY), 0, MAX_DIFFICULTY),
            flags: self.u8_field(&view, FLAGS),
            server_type: clamped(self.u8_field(&view, SERVER_TYPE), 0, MAX_SERVER_TYPE),
            password_note_form_id: self.form_field(&view, PASSWORD_NOTE, FormType::Note),
            menu_items,
        })
    }
}
