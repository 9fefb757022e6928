// Mon Oct 19 2026 - Alex

use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest type tag the engine's form-type enumeration defines.
pub const MAX_FORM_TYPE: u8 = 0x78;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum FormType {
    Class = 0x07,
    Faction = 0x08,
    Race = 0x0C,
    Script = 0x11,
    Terminal = 0x17,
    Armor = 0x18,
    Misc = 0x1F,
    Weapon = 0x28,
    Ammo = 0x29,
    Npc = 0x2A,
    Creature = 0x2B,
    Key = 0x2E,
    Ingestible = 0x2F,
    Note = 0x31,
    Cell = 0x39,
    Reference = 0x3A,
    PlacedNpc = 0x3B,
    PlacedCreature = 0x3C,
    Worldspace = 0x41,
    Topic = 0x45,
    TopicInfo = 0x46,
    Quest = 0x47,
    FormList = 0x55,
}

impl FormType {
    pub const ALL: [FormType; 23] = [
        FormType::Class,
        FormType::Faction,
        FormType::Race,
        FormType::Script,
        FormType::Terminal,
        FormType::Armor,
        FormType::Misc,
        FormType::Weapon,
        FormType::Ammo,
        FormType::Npc,
        FormType::Creature,
        FormType::Key,
        FormType::Ingestible,
        FormType::Note,
        FormType::Cell,
        FormType::Reference,
        FormType::PlacedNpc,
        FormType::PlacedCreature,
        FormType::Worldspace,
        FormType::Topic,
        FormType::TopicInfo,
        FormType::Quest,
        FormType::FormList,
    ];

    pub const ITEMS: [FormType; 7] = [
        FormType::Weapon,
        FormType::Armor,
        FormType::Ammo,
        FormType::Misc,
        FormType::Key,
        FormType::Ingestible,
        FormType::Note,
    ];

    pub const ACTORS: [FormType; 2] = [FormType::Npc, FormType::Creature];

    pub const REFERENCES: [FormType; 3] = [
        FormType::Reference,
        FormType::PlacedNpc,
        FormType::PlacedCreature,
    ];

    pub fn from_u8(tag: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| *t as u8 == tag)
    }

    pub fn tag(self) -> u8 {
        self as u8
    }

    /// Four-character record signature used by the plugin format.
    pub fn signature(self) -> &'static str {
        match self {
            FormType::Class => "CLAS",
            FormType::Faction => "FACT",
            FormType::Race => "RACE",
            FormType::Script => "SCPT",
            FormType::Terminal => "TERM",
            FormType::Armor => "ARMO",
            FormType::Misc => "MISC",
            FormType::Weapon => "WEAP",
            FormType::Ammo => "AMMO",
            FormType::Npc => "NPC_",
            FormType::Creature => "CREA",
            FormType::Key => "KEYM",
            FormType::Ingestible => "ALCH",
            FormType::Note => "NOTE",
            FormType::Cell => "CELL",
            FormType::Reference => "REFR",
            FormType::PlacedNpc => "ACHR",
            FormType::PlacedCreature => "ACRE",
            FormType::Worldspace => "WRLD",
            FormType::Topic => "DIAL",
            FormType::TopicInfo => "INFO",
            FormType::Quest => "QUST",
            FormType::FormList => "FLST",
        }
    }

    pub fn from_signature(signature: &str) -> Option<Self> {
        let upper = signature.trim().to_ascii_uppercase();
        Self::ALL.iter().copied().find(|t| t.signature() == upper)
    }

    pub fn is_item(self) -> bool {
        Self::ITEMS.contains(&self)
    }

    pub fn is_actor(self) -> bool {
        Self::ACTORS.contains(&self)
    }

    pub fn is_reference(self) -> bool {
        Self::REFERENCES.contains(&self)
    }
}

impl fmt::Display for FormType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.signature())
    }
}
