// Mon Oct 19 2026 - Alex

use crate::form::{
    AmmoData, Anchor, ArmorData, FormType, IngestibleData, ItemDetail, ItemRecord, NoteData, WeaponData,
};
use crate::readers::{clamped, FormView, Reconstructor};

const NAME: usize = 0x18;
const VALUE: usize = 0x20;
const WEIGHT: usize = 0x24;
const SCRIPT: usize = 0x28;

mod weapon {
    pub const HEALTH: usize = 0x2C;
    pub const DAMAGE: usize = 0x30;
    pub const CLIP_SIZE: usize = 0x32;
    pub const SKILL: usize = 0x33;
    pub const AMMO: usize = 0x34;
    pub const SPEED: usize = 0x38;
    pub const REACH: usize = 0x3C;
    pub const MIN_SPREAD: usize = 0x40;
    pub const WEAPON_TYPE: usize = 0x44;
    pub const FLAGS: usize = 0x45;
    pub const CRIT_DAMAGE: usize = 0x48;
    pub const CRIT_CHANCE: usize = 0x4C;
}

mod armor {
    pub const HEALTH: usize = 0x2C;
    pub const BIPED_FLAGS: usize = 0x30;
    pub const DAMAGE_THRESHOLD: usize = 0x34;
    pub const DAMAGE_RESISTANCE: usize = 0x38;
}

mod ammo {
    pub const SPEED: usize = 0x2C;
    pub const FLAGS: usize = 0x30;
    pub const PROJECTILES: usize = 0x34;
    pub const SHORT_NAME: usize = 0x38;
}

mod ingestible {
    pub const FLAGS: usize = 0x2C;
    pub const ADDICTION_CHANCE: usize = 0x30;
}

mod note {
    pub const NOTE_TYPE: usize = 0x2C;
    pub const TEXT: usize = 0x30;
    pub const READ: usize = 0x38;
}

/// Highest actor value index a weapon skill can name.
const MAX_SKILL: u8 = 76;
const MAX_WEAPON_TYPE: u8 = 13;

impl<'a> Reconstructor<'a> {
    pub fn read_item(&self, anchor: &Anchor) -> Option<ItemRecord> {
        let view = self.load(anchor, &FormType::ITEMS)?;

        let detail = match view.form_type {
            FormType::Weapon => ItemDetail::Weapon(self.weapon_data(&view)),
            FormType::Armor => ItemDetail::Armor(self.armor_data(&view)),
            FormType::Ammo => ItemDetail::Ammo(self.ammo_data(&view)),
            FormType::Ingestible => ItemDetail::Ingestible(IngestibleData {
                flags: self.u8_field(&view, ingestible::FLAGS),
                addiction_chance: self.f32_field(&view, ingestible::ADDICTION_CHANCE, 0.0, 1.0),
            }),
            FormType::Note => ItemDetail::Note(NoteData {
                note_type: clamped(self.u8_field(&view, note::NOTE_TYPE), 0, 3),
                text: self.string_field(&view, note::TEXT),
                read: clamped(self.u8_field(&view, note::READ), 0, 1) == 1,
            }),
            FormType::Key => ItemDetail::Key,
            _ => ItemDetail::Misc,
        };

        Some(ItemRecord {
            form_id: view.form_id(),
            form_type: view.form_type,
            name: self.string_field(&view, NAME),
            value: clamped(self.i32_field(&view, VALUE), 0, 1_000_000),
            weight: self.f32_field(&view, WEIGHT, 0.0, 1000.0),
            script_form_id: self.form_field(&view, SCRIPT, FormType::Script),
            detail,
        })
    }

    fn weapon_data(&self, view: &FormView) -> WeaponData {
        WeaponData {
            health: clamped(self.i32_field(view, weapon::HEALTH), 0, 1_000_000),
            damage: clamped(self.i16_field(view, weapon::DAMAGE), 0, 10_000),
            clip_size: self.u8_field(view, weapon::CLIP_SIZE),
            skill: clamped(self.u8_field(view, weapon::SKILL), 0, MAX_SKILL),
            ammo: self.any_form_field(view, weapon::AMMO, &[FormType::Ammo, FormType::FormList]),
            speed: self.f32_field(view, weapon::SPEED, 0.0, 100.0),
            reach: self.f32_field(view, weapon::REACH, 0.0, 1000.0),
            min_spread: self.f32_field(view, weapon::MIN_SPREAD, 0.0, 1000.0),
            weapon_type: clamped(self.u8_field(view, weapon::WEAPON_TYPE), 0, MAX_WEAPON_TYPE),
            flags: self.u8_field(view, weapon::FLAGS),
            crit_damage: clamped(self.i16_field(view, weapon::CRIT_DAMAGE), 0, 10_000),
            crit_chance_multiplier: self.f32_field(view, weapon::CRIT_CHANCE, 0.0, 100.0),
        }
    }

    fn armor_data(&self, view: &FormView) -> ArmorData {
        ArmorData {
            health: clamped(self.i32_field(view, armor::HEALTH), 0, 1_000_000),
            biped_flags: self.u32_field(view, armor::BIPED_FLAGS),
            damage_threshold: self.f32_field(view, armor::DAMAGE_THRESHOLD, 0.0, 1000.0),
            damage_resistance: clamped(self.i16_field(view, armor::DAMAGE_RESISTANCE), 0, 100),
        }
    }

    fn ammo_data(&self, view: &FormView) -> AmmoData {
        AmmoData {
            speed: self.f32_field(view, ammo::SPEED, 0.0, 10_000.0),
            flags: self.u8_field(view, ammo::FLAGS),
            projectiles_per_shot: clamped(self.u32_field(view, ammo::PROJECTILES), 0, 100),
            short_name: self.string_field(view, ammo::SHORT_NAME),
        }
    }
}
