// Mon Oct 19 2026 - Alex

use crate::form::{FormRef, FormType};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ActorStats {
    pub flags: u32,
    pub fatigue: u16,
    pub barter_gold: u16,
    pub level: i16,
    pub calc_min_level: u16,
    pub calc_max_level: u16,
    pub speed_multiplier: u16,
    pub karma: f32,
    pub disposition_base: i16,
    pub template_flags: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FactionRank {
    pub faction_form_id: u32,
    pub rank: i8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreatureStats {
    pub creature_type: u8,
    pub combat_skill: u8,
    pub magic_skill: u8,
    pub stealth_skill: u8,
    pub attack_damage: i16,
}

/// An NPC or creature base form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActorRecord {
    pub form_id: u32,
    pub form_type: FormType,
    pub name: Option<String>,
    pub stats: ActorStats,
    pub factions: Vec<FactionRank>,
    pub script_form_id: Option<u32>,
    pub template: Option<FormRef>,
    pub race_form_id: Option<u32>,
    pub class_form_id: Option<u32>,
    pub creature: Option<CreatureStats>,
    pub health: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WeaponData {
    pub health: i32,
    pub damage: i16,
    pub clip_size: u8,
    pub skill: u8,
    pub ammo: Option<FormRef>,
    pub speed: f32,
    pub reach: f32,
    pub min_spread: f32,
    pub weapon_type: u8,
    pub flags: u8,
    pub crit_damage: i16,
    pub crit_chance_multiplier: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ArmorData {
    pub health: i32,
    pub biped_flags: u32,
    pub damage_threshold: f32,
    pub damage_resistance: i16,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AmmoData {
    pub speed: f32,
    pub flags: u8,
    pub projectiles_per_shot: u32,
    pub short_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IngestibleData {
    pub flags: u8,
    pub addiction_chance: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NoteData {
    pub note_type: u8,
    pub text: Option<String>,
    pub read: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemDetail {
    Weapon(WeaponData),
    Armor(ArmorData),
    Ammo(AmmoData),
    Misc,
    Key,
    Ingestible(IngestibleData),
    Note(NoteData),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemRecord {
    pub form_id: u32,
    pub form_type: FormType,
    pub name: Option<String>,
    pub value: i32,
    pub weight: f32,
    pub script_form_id: Option<u32>,
    pub detail: ItemDetail,
}

/// One quest's slice of a topic: the quest and the infos it contributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicQuestLink {
    pub quest_form_id: Option<u32>,
    pub info_form_ids: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicRecord {
    pub form_id: u32,
    pub name: Option<String>,
    pub topic_type: u8,
    pub flags: u8,
    pub priority: f32,
    pub quest_links: Vec<TopicQuestLink>,
    pub dummy_prompt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicInfoRecord {
    pub form_id: u32,
    pub topic_type: u8,
    pub next_speaker: u8,
    pub info_flags: u8,
    pub info_flags_ext: u8,
    pub prompt: Option<String>,
    pub info_index: u16,
    pub difficulty: u8,
    pub speaker_form_id: Option<u32>,
    pub quest_form_id: Option<u32>,
    pub choice_form_ids: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestStage {
    pub index: u8,
    pub flags: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestObjective {
    pub index: i32,
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestRecord {
    pub form_id: u32,
    pub name: Option<String>,
    pub script_form_id: Option<u32>,
    pub flags: u8,
    pub priority: u8,
    pub delay: f32,
    pub stages: Vec<QuestStage>,
    pub objectives: Vec<QuestObjective>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptReference {
    pub editor_id: Option<String>,
    pub form: Option<FormRef>,
    pub variable_index: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptVariable {
    pub index: u32,
    pub is_integer: bool,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptRecord {
    pub form_id: u32,
    pub ref_object_count: u32,
    pub compiled_size: u32,
    pub variable_count: u32,
    pub script_type: u16,
    pub flags: u16,
    pub has_compiled_data: bool,
    pub owner_quest_form_id: Option<u32>,
    pub referenced_objects: Vec<ScriptReference>,
    pub variables: Vec<ScriptVariable>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TerminalMenuItem {
    pub item_text: Option<String>,
    pub result_text: Option<String>,
    pub flags: u8,
    pub display_note_form_id: Option<u32>,
    pub sub_menu_form_id: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TerminalRecord {
    pub form_id: u32,
    pub name: Option<String>,
    pub welcome_text: Option<String>,
    pub difficulty: u8,
    pub flags: u8,
    pub server_type: u8,
    pub password_note_form_id: Option<u32>,
    pub menu_items: Vec<TerminalMenuItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellRecord {
    pub form_id: u32,
    pub name: Option<String>,
    pub is_interior: bool,
    pub grid: Option<(i32, i32)>,
    pub worldspace_form_id: Option<u32>,
    pub water_height: f32,
    pub owner: Option<FormRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorldspaceRecord {
    pub form_id: u32,
    pub name: Option<String>,
    pub parent_form_id: Option<u32>,
    pub flags: u8,
    pub land_height: f32,
    pub water_height: f32,
    pub bounds_min: (f32, f32),
    pub bounds_max: (f32, f32),
    pub persistent_cell_form_id: Option<u32>,
}

/// A placed instance of a base form in a cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceRecord {
    pub form_id: u32,
    pub form_type: FormType,
    pub base: Option<FormRef>,
    pub position: [f32; 3],
    pub rotation: [f32; 3],
    pub scale: f32,
    pub parent_cell_form_id: Option<u32>,
    pub persistent: bool,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "record", rename_all = "snake_case")]
pub enum Record {
    Actor(ActorRecord),
    Item(ItemRecord),
    Topic(TopicRecord),
    TopicInfo(TopicInfoRecord),
    Quest(QuestRecord),
    Script(ScriptRecord),
    Terminal(TerminalRecord),
    Cell(CellRecord),
    Worldspace(WorldspaceRecord),
    Reference(ReferenceRecord),
}

impl Record {
    pub fn form_id(&self) -> u32 {
        match self {
            Record::Actor(r) => r.form_id,
            Record::Item(r) => r.form_id,
            Record::Topic(r) => r.form_id,
            Record::TopicInfo(r) => r.form_id,
            Record::Quest(r) => r.form_id,
            Record::Script(r) => r.form_id,
            Record::Terminal(r) => r.form_id,
            Record::Cell(r) => r.form_id,
            Record::Worldspace(r) => r.form_id,
            Record::Reference(r) => r.form_id,
        }
    }

    pub fn form_type(&self) -> FormType {
        match self {
            Record::Actor(r) => r.form_type,
            Record::Item(r) => r.form_type,
            Record::Topic(_) => FormType::Topic,
            Record::TopicInfo(_) => FormType::TopicInfo,
            Record::Quest(_) => FormType::Quest,
            Record::Script(_) => FormType::Script,
            Record::Terminal(_) => FormType::Terminal,
            Record::Cell(_) => FormType::Cell,
            Record::Worldspace(_) => FormType::Worldspace,
            Record::Reference(r) => r.form_type,
        }
    }

    /// Form ids this record points at.
    pub fn references(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = Vec::new();
        match self {
            Record::Actor(r) => {
                ids.extend(r.factions.iter().map(|f| f.faction_form_id));
                ids.extend(r.script_form_id);
                ids.extend(r.template.map(|t| t.form_id));
                ids.extend(r.race_form_id);
                ids.extend(r.class_form_id);
            }
            Record::Item(r) => {
                ids.extend(r.script_form_id);
                if let ItemDetail::Weapon(w) = &r.detail {
                    ids.extend(w.ammo.map(|a| a.form_id));
                }
            }
            Record::Topic(r) => {
                for link in &r.quest_links {
                    ids.extend(link.quest_form_id);
                    ids.extend(link.info_form_ids.iter().copied());
                }
            }
            Record::TopicInfo(r) => {
                ids.extend(r.speaker_form_id);
                ids.extend(r.quest_form_id);
                ids.extend(r.choice_form_ids.iter().copied());
            }
            Record::Quest(r) => ids.extend(r.script_form_id),
            Record::Script(r) => {
                ids.extend(r.owner_quest_form_id);
                ids.extend(r.referenced_objects.iter().filter_map(|o| o.form.map(|f| f.form_id)));
            }
            Record::Terminal(r) => {
                ids.extend(r.password_note_form_id);
                for item in &r.menu_items {
                    ids.extend(item.display_note_form_id);
                    ids.extend(item.sub_menu_form_id);
                }
            }
            Record::Cell(r) => {
                ids.extend(r.worldspace_form_id);
                ids.extend(r.owner.map(|o| o.form_id));
            }
            Record::Worldspace(r) => {
                ids.extend(r.parent_form_id);
                ids.extend(r.persistent_cell_form_id);
            }
            Record::Reference(r) => {
                ids.extend(r.base.map(|b| b.form_id));
                ids.extend(r.parent_cell_form_id);
            }
        }
        ids
    }
}
