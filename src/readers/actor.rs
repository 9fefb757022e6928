// Mon Oct 19 2026 - Alex

use crate::form::{is_heap_fill, is_heap_fill_u16, ActorRecord, ActorStats, Anchor, CreatureStats, FactionRank, FormType};
use crate::readers::{clamped, FormView, Reconstructor};
use crate::utils::BinaryUtils;

const NAME: usize = 0x18;
const ACBS_FLAGS: usize = 0x20;
const ACBS_FATIGUE: usize = 0x24;
const ACBS_BARTER_GOLD: usize = 0x26;
const ACBS_LEVEL: usize = 0x28;
const ACBS_CALC_MIN: usize = 0x2A;
const ACBS_CALC_MAX: usize = 0x2C;
const ACBS_SPEED_MULT: usize = 0x2E;
const ACBS_KARMA: usize = 0x30;
const ACBS_DISPOSITION: usize = 0x34;
const ACBS_TEMPLATE_FLAGS: usize = 0x36;
const FACTIONS: usize = 0x38;
const SCRIPT: usize = 0x40;
const TEMPLATE: usize = 0x44;
const NPC_RACE: usize = 0x48;
const NPC_CLASS: usize = 0x4C;
const CREATURE_TYPE: usize = 0x50;
const CREATURE_COMBAT_SKILL: usize = 0x51;
const CREATURE_MAGIC_SKILL: usize = 0x52;
const CREATURE_STEALTH_SKILL: usize = 0x53;
const CREATURE_ATTACK_DAMAGE: usize = 0x54;
const HEALTH: usize = 0x58;

/// Faction membership payload: faction pointer, rank byte.
const FACTION_RANK_SIZE: usize = 8;

impl<'a> Reconstructor<'a> {
    pub fn read_actor(&self, anchor: &Anchor) -> Option<ActorRecord> {
        let view = self.load(anchor, &FormType::ACTORS)?;

        let creature = match view.form_type {
            FormType::Creature => Some(CreatureStats {
                creature_type: clamped(self.u8_field(&view, CREATURE_TYPE), 0, 7),
                combat_skill: clamped(self.u8_field(&view, CREATURE_COMBAT_SKILL), 0, 100),
                magic_skill: clamped(self.u8_field(&view, CREATURE_MAGIC_SKILL), 0, 100),
                stealth_skill: clamped(self.u8_field(&view, CREATURE_STEALTH_SKILL), 0, 100),
                attack_damage: clamped(self.i16_field(&view, CREATURE_ATTACK_DAMAGE), 0, 10_000),
            }),
            _ => None,
        };
        let (race_form_id, class_form_id) = match view.form_type {
            FormType::Npc => (
                self.form_field(&view, NPC_RACE, FormType::Race),
                self.form_field(&view, NPC_CLASS, FormType::Class),
            ),
            _ => (None, None),
        };

        Some(ActorRecord {
            form_id: view.form_id(),
            form_type: view.form_type,
            name: self.string_field(&view, NAME),
            stats: self.actor_stats(&view),
            factions: self.actor_factions(&view),
            script_form_id: self.form_field(&view, SCRIPT, FormType::Script),
            template: self.any_form_field(&view, TEMPLATE, &FormType::ACTORS),
            race_form_id,
            class_form_id,
            creature,
            health: clamped(self.i32_field(&view, HEALTH), 0, 1_000_000),
        })
    }

    fn actor_stats(&self, view: &FormView) -> ActorStats {
        let raw_flags = self.u32_field(view, ACBS_FLAGS);
        // Flags and template flags bracket the block; fill in one means neither is trustworthy.
        let raw_template_flags = self.u16_field(view, ACBS_TEMPLATE_FLAGS);
        let (flags, template_flags) = if is_heap_fill(raw_flags) {
            (0, 0)
        } else if is_heap_fill_u16(raw_template_flags) {
            (raw_flags, 0)
        } else {
            (raw_flags, raw_template_flags)
        };

        ActorStats {
            flags,
            fatigue: self.u16_field(view, ACBS_FATIGUE),
            barter_gold: self.u16_field(view, ACBS_BARTER_GOLD),
            level: clamped(self.i16_field(view, ACBS_LEVEL), 0, 255),
            calc_min_level: self.u16_field(view, ACBS_CALC_MIN),
            calc_max_level: self.u16_field(view, ACBS_CALC_MAX),
            speed_multiplier: clamped(self.u16_field(view, ACBS_SPEED_MULT), 0, 1000),
            karma: self.f32_field(view, ACBS_KARMA, -1000.0, 1000.0),
            disposition_base: clamped(self.i16_field(view, ACBS_DISPOSITION), 0, 100),
            template_flags,
        }
    }

    fn actor_factions(&self, view: &FormView) -> Vec<FactionRank> {
        self.list_field(view, FACTIONS, |pointer| {
            let payload = self.payload(pointer, FACTION_RANK_SIZE)?;
            let faction_form_id = self
                .context()
                .follow_pointer_to_form_id(&payload, 0, Some(FormType::Faction))?;
            let rank = BinaryUtils::read_i8(&payload, 4).unwrap_or(0);
            Some(FactionRank {
                faction_form_id,
                rank: clamped(rank, -1, 100),
            })
        })
    }
}
