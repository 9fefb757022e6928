// Mon Oct 19 2026 - Alex

use crate::form::{
    is_heap_fill, Anchor, FormType, QuestObjective, QuestRecord, QuestStage, TopicInfoRecord, TopicQuestLink,
    TopicRecord,
};
use crate::readers::{clamped, FormView, Reconstructor};
use crate::utils::BinaryUtils;
use log::trace;

mod topic {
    pub const NAME: usize = 0x18;
    pub const TOPIC_TYPE: usize = 0x20;
    pub const FLAGS: usize = 0x21;
    pub const PRIORITY: usize = 0x24;
    pub const QUEST_INFOS: usize = 0x28;
    pub const DUMMY_PROMPT: usize = 0x30;
}

mod info {
    pub const DATA: usize = 0x18;
    pub const PROMPT: usize = 0x1C;
    pub const INFO_INDEX: usize = 0x24;
    pub const DIFFICULTY: usize = 0x26;
    pub const SPEAKER: usize = 0x28;
    pub const QUEST: usize = 0x2C;
    pub const CHOICES: usize = 0x30;
}

mod quest {
    pub const NAME: usize = 0x18;
    pub const SCRIPT: usize = 0x20;
    pub const FLAGS: usize = 0x24;
    pub const PRIORITY: usize = 0x25;
    pub const DELAY: usize = 0x28;
    pub const STAGES: usize = 0x2C;
    pub const OBJECTIVES: usize = 0x34;
}

/// Quest pointer followed by an inline array of info pointers.
const QUEST_INFO_SIZE: usize = 0x10;
const QUEST_INFO_ARRAY: usize = 0x04;
const STAGE_SIZE: usize = 0x02;
const OBJECTIVE_SIZE: usize = 0x0C;
const OBJECTIVE_TEXT: usize = 0x04;

const SPEAKER_TYPES: [FormType; 2] = [FormType::Npc, FormType::Creature];

/// The four co-located bytes of an info's DATA block.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct InfoData {
    topic_type: u8,
    next_speaker: u8,
    flags: u8,
    flags_ext: u8,
}

impl<'a> Reconstructor<'a> {
    pub fn read_topic(&self, anchor: &Anchor) -> Option<TopicRecord> {
        let view = self.load(anchor, &[FormType::Topic])?;

        let quest_links = self.list_field(&view, topic::QUEST_INFOS, |pointer| {
            let payload = self.payload(pointer, QUEST_INFO_SIZE)?;
            let quest_form_id = self
                .context()
                .follow_pointer_to_form_id(&payload, 0, Some(FormType::Quest));
            let info_form_ids = self
                .array_field(&payload, QUEST_INFO_ARRAY)
                .map(|array| array.form_ids(self.context(), Some(FormType::TopicInfo)))
                .unwrap_or_default();

            if quest_form_id.is_none() && info_form_ids.is_empty() {
                return None;
            }
            Some(TopicQuestLink {
                quest_form_id,
                info_form_ids,
            })
        });

        Some(TopicRecord {
            form_id: view.form_id(),
            name: self.string_field(&view, topic::NAME),
            topic_type: clamped(self.u8_field(&view, topic::TOPIC_TYPE), 0, self.limits().max_topic_type),
            flags: self.u8_field(&view, topic::FLAGS),
            priority: self.f32_field(&view, topic::PRIORITY, 0.0, self.limits().max_topic_priority),
            quest_links,
            dummy_prompt: self.string_field(&view, topic::DUMMY_PROMPT),
        })
    }

    pub fn read_topic_info(&self, anchor: &Anchor) -> Option<TopicInfoRecord> {
        let view = self.load(anchor, &[FormType::TopicInfo])?;
        let data = self.info_data(&view);

        let choice_form_ids = self.list_field(&view, info::CHOICES, |pointer| {
            self.form_at(pointer, Some(FormType::Topic)).map(|r| r.form_id)
        });

        Some(TopicInfoRecord {
            form_id: view.form_id(),
            topic_type: data.topic_type,
            next_speaker: data.next_speaker,
            info_flags: data.flags,
            info_flags_ext: data.flags_ext,
            prompt: self.string_field(&view, info::PROMPT),
            info_index: self.u16_field(&view, info::INFO_INDEX),
            difficulty: clamped(self.u8_field(&view, info::DIFFICULTY), 0, self.limits().max_info_difficulty),
            speaker_form_id: self
                .any_form_field(&view, info::SPEAKER, &SPEAKER_TYPES)
                .map(|r| r.form_id),
            quest_form_id: self.form_field(&view, info::QUEST, FormType::Quest),
            choice_form_ids,
        })
    }

    /// Zeroes the whole block when any part of it looks corrupt.
    fn info_data(&self, view: &FormView) -> InfoData {
        let offset = self.layout().at(info::DATA);
        let raw = BinaryUtils::read_u32_be(view.bytes(), offset).unwrap_or(0);
        let [topic_type, next_speaker, flags, flags_ext] = raw.to_be_bytes();

        let limits = self.limits();
        if is_heap_fill(raw) || topic_type > limits.max_topic_type || next_speaker > limits.max_next_speaker {
            trace!("INFO {:#010x}: DATA block {:#010x} rejected", view.form_id(), raw);
            return InfoData::default();
        }
        InfoData {
            topic_type,
            next_speaker,
            flags,
            flags_ext,
        }
    }

    pub fn read_quest(&self, anchor: &Anchor) -> Option<QuestRecord> {
        let view = self.load(anchor, &[FormType::Quest])?;

        let stages = self.list_field(&view, quest::STAGES, |pointer| {
            let payload = self.payload(pointer, STAGE_SIZE)?;
            Some(QuestStage {
                index: payload[0],
                flags: payload[1],
            })
        });
        let objectives = self.list_field(&view, quest::OBJECTIVES, |pointer| {
            let payload = self.payload(pointer, OBJECTIVE_SIZE)?;
            let index = BinaryUtils::read_i32_be(&payload, 0)?;
            Some(QuestObjective {
                index: clamped(index, 0, 10_000),
                text: self.context().read_string_descriptor(&payload, OBJECTIVE_TEXT),
            })
        });

        Some(QuestRecord {
            form_id: view.form_id(),
            name: self.string_field(&view, quest::NAME),
            script_form_id: self.form_field(&view, quest::SCRIPT, FormType::Script),
            flags: self.u8_field(&view, quest::FLAGS),
            priority: self.u8_field(&view, quest::PRIORITY),
            delay: self.f32_field(&view, quest::DELAY, 0.0, 3600.0),
            stages,
            objectives,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValidationLimits;
    use crate::structure::BuildIdentifier;
    use crate::testing::DumpBuilder;

    const HEAP: u32 = 0x4000_0000;
    const INFO_ID: u32 = 0x1234;
    const SPEAKER_ID: u32 = 0x5678;
    const QUEST_ID: u32 = 0x9ABC;

    fn info_dump(next_speaker: u8) -> DumpBuilder {
        let mut dump = DumpBuilder::new(HEAP, 0x400);
        dump.form_header(HEAP, FormType::TopicInfo, INFO_ID);
        dump.write_bytes(HEAP + info::DATA as u32, &[3, next_speaker, 0x11, 0x22]);
        dump.write_u8(HEAP + info::DIFFICULTY as u32, 2);
        dump.write_u16(HEAP + info::INFO_INDEX as u32, 7);
        dump.form_header(HEAP + 0x100, FormType::Npc, SPEAKER_ID);
        dump.write_u32(HEAP + info::SPEAKER as u32, HEAP + 0x100);
        dump.form_header(HEAP + 0x120, FormType::Quest, QUEST_ID);
        dump.write_u32(HEAP + info::QUEST as u32, HEAP + 0x120);
        dump
    }

    fn read_info(dump: &DumpBuilder) -> Option<TopicInfoRecord> {
        let ctx = dump.build();
        Reconstructor::new(&ctx, BuildIdentifier::Release, ValidationLimits::default())
            .read_topic_info(&Anchor::new(0, FormType::TopicInfo, INFO_ID))
    }

    #[test]
    fn test_read_topic_info() {
        let info = read_info(&info_dump(1)).unwrap();
        assert_eq!(info.form_id, 0x1234);
        assert_eq!(info.topic_type, 3);
        assert_eq!(info.next_speaker, 1);
        assert_eq!(info.info_flags, 0x11);
        assert_eq!(info.info_flags_ext, 0x22);
        assert_eq!(info.difficulty, 2);
        assert_eq!(info.info_index, 7);
        assert_eq!(info.speaker_form_id, Some(0x5678));
        assert_eq!(info.quest_form_id, Some(0x9ABC));
    }

    #[test]
    fn test_read_topic_info_on_debug_build() {
        let field = |baseline: usize| HEAP + baseline as u32 + 8;
        let mut dump = DumpBuilder::new(HEAP, 0x400);
        dump.form_header(HEAP, FormType::TopicInfo, INFO_ID);
        dump.write_bytes(field(info::DATA), &[3, 1, 0x11, 0x22]);
        dump.write_u16(field(info::INFO_INDEX), 7);
        dump.write_u8(field(info::DIFFICULTY), 2);
        dump.form_header(HEAP + 0x100, FormType::Npc, SPEAKER_ID);
        dump.write_u32(field(info::SPEAKER), HEAP + 0x100);
        dump.form_header(HEAP + 0x120, FormType::Quest, QUEST_ID);
        dump.write_u32(field(info::QUEST), HEAP + 0x120);
        dump.form_header(HEAP + 0x180, FormType::Topic, 0xD001);
        dump.form_header(HEAP + 0x1A0, FormType::Topic, 0xD002);
        dump.list_node(field(info::CHOICES), HEAP + 0x180, HEAP + 0x200);
        dump.list_node(HEAP + 0x200, HEAP + 0x1A0, 0);
        let ctx = dump.build();
        let anchor = Anchor::new(0, FormType::TopicInfo, INFO_ID);

        let info = Reconstructor::new(&ctx, BuildIdentifier::Debug, ValidationLimits::default())
            .read_topic_info(&anchor)
            .unwrap();
        assert_eq!(info.form_id, INFO_ID);
        assert_eq!((info.topic_type, info.next_speaker), (3, 1));
        assert_eq!((info.info_flags, info.info_flags_ext), (0x11, 0x22));
        assert_eq!(info.info_index, 7);
        assert_eq!(info.difficulty, 2);
        assert_eq!(info.speaker_form_id, Some(SPEAKER_ID));
        assert_eq!(info.quest_form_id, Some(QUEST_ID));
        assert_eq!(info.choice_form_ids, vec![0xD001, 0xD002]);

        let unshifted = Reconstructor::new(&ctx, BuildIdentifier::Release, ValidationLimits::default())
            .read_topic_info(&anchor)
            .unwrap();
        assert_eq!(unshifted.speaker_form_id, None);
        assert!(unshifted.choice_form_ids.is_empty());
    }

    #[test]
    fn test_out_of_range_next_speaker_zeroes_data_block() {
        let info = read_info(&info_dump(5)).unwrap();
        assert_eq!(info.topic_type, 0);
        assert_eq!(info.next_speaker, 0);
        assert_eq!(info.info_flags, 0);
        assert_eq!(info.info_flags_ext, 0);
        assert_eq!(info.form_id, 0x1234);
        assert_eq!(info.speaker_form_id, Some(0x5678));
        assert_eq!(info.difficulty, 2);
    }

    #[test]
    fn test_heap_fill_data_block_is_zeroed() {
        let mut dump = info_dump(1);
        dump.write_u32(HEAP + info::DATA as u32, 0xCDCD_CDCD);
        let info = read_info(&dump).unwrap();
        assert_eq!((info.topic_type, info.next_speaker, info.info_flags), (0, 0, 0));
    }

    #[test]
    fn test_configured_limits_apply() {
        let dump = info_dump(1);
        let ctx = dump.build();
        let limits = ValidationLimits {
            max_topic_type: 2,
            ..ValidationLimits::default()
        };
        let info = Reconstructor::new(&ctx, BuildIdentifier::Release, limits)
            .read_topic_info(&Anchor::new(0, FormType::TopicInfo, INFO_ID))
            .unwrap();
        assert_eq!(info.topic_type, 0);
        assert_eq!(info.next_speaker, 0);
    }

    #[test]
    fn test_identity_mismatch_is_absent() {
        let dump = info_dump(1);
        let ctx = dump.build();
        let reconstructor = Reconstructor::new(&ctx, BuildIdentifier::Release, ValidationLimits::default());
        assert!(reconstructor
            .read_topic_info(&Anchor::new(0, FormType::TopicInfo, 0x1235))
            .is_none());
    }

    #[test]
    fn test_speaker_pointing_at_quest_is_rejected() {
        let mut dump = info_dump(1);
        dump.write_u32(HEAP + info::SPEAKER as u32, HEAP + 0x120);
        let info = read_info(&dump).unwrap();
        assert_eq!(info.speaker_form_id, None);
        assert_eq!(info.quest_form_id, Some(QUEST_ID));
    }

    #[test]
    fn test_creature_speaker_and_prompt() {
        let mut dump = info_dump(0);
        dump.form_header(HEAP + 0x140, FormType::Creature, 0x7777);
        dump.write_u32(HEAP + info::SPEAKER as u32, HEAP + 0x140);
        dump.string_descriptor(HEAP + info::PROMPT as u32, HEAP + 0x300, "What happened here?");
        let info = read_info(&dump).unwrap();
        assert_eq!(info.speaker_form_id, Some(0x7777));
        assert_eq!(info.prompt.as_deref(), Some("What happened here?"));
    }

    #[test]
    fn test_choices_follow_topic_pointers() {
        let mut dump = info_dump(1);
        dump.form_header(HEAP + 0x180, FormType::Topic, 0xD001);
        dump.form_header(HEAP + 0x1A0, FormType::Topic, 0xD002);
        dump.list_node(HEAP + info::CHOICES as u32, HEAP + 0x180, HEAP + 0x200);
        dump.list_node(HEAP + 0x200, HEAP + 0x120, HEAP + 0x208);
        dump.list_node(HEAP + 0x208, HEAP + 0x1A0, 0);
        let info = read_info(&dump).unwrap();
        assert_eq!(info.choice_form_ids, vec![0xD001, 0xD002]);
    }

    #[test]
    fn test_read_topic_with_quest_links() {
        let mut dump = DumpBuilder::new(HEAP, 0x400);
        dump.form_header(HEAP, FormType::Topic, 0xD000);
        dump.string_descriptor(HEAP + topic::NAME as u32, HEAP + 0x380, "GREETING");
        dump.write_u8(HEAP + topic::TOPIC_TYPE as u32, 2);
        dump.write_f32(HEAP + topic::PRIORITY as u32, 50.0);

        dump.form_header(HEAP + 0x100, FormType::Quest, QUEST_ID);
        dump.form_header(HEAP + 0x120, FormType::TopicInfo, 0x1001);
        dump.form_header(HEAP + 0x140, FormType::TopicInfo, 0x1002);
        // info pointer table
        dump.write_u32(HEAP + 0x200, HEAP + 0x120);
        dump.write_u32(HEAP + 0x204, HEAP + 0x140);
        // quest info payload: quest, array { data, capacity, count }
        dump.write_u32(HEAP + 0x220, HEAP + 0x100);
        dump.write_u32(HEAP + 0x224, HEAP + 0x200);
        dump.write_u32(HEAP + 0x228, 2);
        dump.write_u32(HEAP + 0x22C, 2);
        // an empty payload that contributes nothing
        dump.list_node(HEAP + topic::QUEST_INFOS as u32, HEAP + 0x220, HEAP + 0x240);
        dump.list_node(HEAP + 0x240, HEAP + 0x260, 0);
        let ctx = dump.build();

        let topic = Reconstructor::new(&ctx, BuildIdentifier::Release, ValidationLimits::default())
            .read_topic(&Anchor::new(0, FormType::Topic, 0xD000))
            .unwrap();
        assert_eq!(topic.name.as_deref(), Some("GREETING"));
        assert_eq!(topic.topic_type, 2);
        assert_eq!(topic.priority, 50.0);
        assert_eq!(
            topic.quest_links,
            vec![TopicQuestLink {
                quest_form_id: Some(QUEST_ID),
                info_form_ids: vec![0x1001, 0x1002],
            }]
        );
    }

    #[test]
    fn test_topic_priority_outside_range() {
        let mut dump = DumpBuilder::new(HEAP, 0x100);
        dump.form_header(HEAP, FormType::Topic, 0xD000);
        dump.write_f32(HEAP + topic::PRIORITY as u32, 250.0);
        dump.write_u8(HEAP + topic::TOPIC_TYPE as u32, 9);
        let ctx = dump.build();
        let topic = Reconstructor::new(&ctx, BuildIdentifier::Release, ValidationLimits::default())
            .read_topic(&Anchor::new(0, FormType::Topic, 0xD000))
            .unwrap();
        assert_eq!(topic.priority, 0.0);
        assert_eq!(topic.topic_type, 0);
        assert!(topic.quest_links.is_empty());
    }

    #[test]
    fn test_read_quest() {
        let mut dump = DumpBuilder::new(HEAP, 0x400);
        dump.form_header(HEAP, FormType::Quest, QUEST_ID);
        dump.string_descriptor(HEAP + quest::NAME as u32, HEAP + 0x300, "Following in His Footsteps");
        dump.write_u8(HEAP + quest::FLAGS as u32, 0x01);
        dump.write_u8(HEAP + quest::PRIORITY as u32, 60);
        dump.write_f32(HEAP + quest::DELAY as u32, 5.0);

        dump.write_bytes(HEAP + 0x100, &[10, 0]);
        dump.write_bytes(HEAP + 0x104, &[20, 1]);
        dump.list_node(HEAP + quest::STAGES as u32, HEAP + 0x100, HEAP + 0x108);
        dump.list_node(HEAP + 0x108, HEAP + 0x104, 0);

        dump.write_i32(HEAP + 0x140, 10);
        dump.string_descriptor(HEAP + 0x144, HEAP + 0x340, "Find Dad");
        dump.list_node(HEAP + quest::OBJECTIVES as u32, HEAP + 0x140, 0);
        let ctx = dump.build();

        let quest = Reconstructor::new(&ctx, BuildIdentifier::Release, ValidationLimits::default())
            .read_quest(&Anchor::new(0, FormType::Quest, QUEST_ID))
            .unwrap();
        assert_eq!(quest.name.as_deref(), Some("Following in His Footsteps"));
        assert_eq!(quest.priority, 60);
        assert_eq!(quest.delay, 5.0);
        assert_eq!(
            quest.stages,
            vec![QuestStage { index: 10, flags: 0 }, QuestStage { index: 20, flags: 1 }]
        );
        assert_eq!(
            quest.objectives,
            vec![QuestObjective { index: 10, text: Some("Find Dad".to_string()) }]
        );
    }
}
