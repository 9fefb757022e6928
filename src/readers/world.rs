// Mon Oct 19 2026 - Alex

use crate::form::{Anchor, CellRecord, FormFlags, FormType, ReferenceRecord, WorldspaceRecord};
use crate::readers::{clamped, FormView, Reconstructor};

mod cell {
    pub const NAME: usize = 0x18;
    pub const FLAGS: usize = 0x20;
    pub const GRID_X: usize = 0x24;
    pub const GRID_Y: usize = 0x28;
    pub const WORLDSPACE: usize = 0x2C;
    pub const WATER_HEIGHT: usize = 0x30;
    pub const OWNER: usize = 0x34;

    pub const INTERIOR: u8 = 0x01;
}

mod worldspace {
    pub const NAME: usize = 0x18;
    pub const PARENT: usize = 0x20;
    pub const FLAGS: usize = 0x24;
    pub const LAND_HEIGHT: usize = 0x28;
    pub const WATER_HEIGHT: usize = 0x2C;
    pub const MIN_X: usize = 0x30;
    pub const MIN_Y: usize = 0x34;
    pub const MAX_X: usize = 0x38;
    pub const MAX_Y: usize = 0x3C;
    pub const PERSISTENT_CELL: usize = 0x40;
}

mod reference {
    pub const BASE: usize = 0x18;
    pub const ROTATION: usize = 0x1C;
    pub const POSITION: usize = 0x28;
    pub const SCALE: usize = 0x34;
    pub const PARENT_CELL: usize = 0x38;
}

const MAX_GRID: i32 = 256;
const MAX_HEIGHT: f32 = 1.0e6;
const MAX_BOUND: f32 = 1.0e7;
const MAX_COORDINATE: f32 = 1.0e6;
/// A little over 2*pi, so wrapped angles still pass.
const MAX_ROTATION: f32 = 7.0;

const OWNER_TYPES: [FormType; 2] = [FormType::Faction, FormType::Npc];

impl<'a> Reconstructor<'a> {
    pub fn read_cell(&self, anchor: &Anchor) -> Option<CellRecord> {
        let view = self.load(anchor, &[FormType::Cell])?;
        let is_interior = self.u8_field(&view, cell::FLAGS) & cell::INTERIOR != 0;

        let grid = (!is_interior).then(|| {
            (
                clamped(self.i32_field(&view, cell::GRID_X), -MAX_GRID, MAX_GRID),
                clamped(self.i32_field(&view, cell::GRID_Y), -MAX_GRID, MAX_GRID),
            )
        });

        Some(CellRecord {
            form_id: view.form_id(),
            name: self.string_field(&view, cell::NAME),
            is_interior,
            grid,
            worldspace_form_id: self.form_field(&view, cell::WORLDSPACE, FormType::Worldspace),
            water_height: self.f32_field(&view, cell::WATER_HEIGHT, -MAX_HEIGHT, MAX_HEIGHT),
            owner: self.any_form_field(&view, cell::OWNER, &OWNER_TYPES),
        })
    }

    pub fn read_worldspace(&self, anchor: &Anchor) -> Option<WorldspaceRecord> {
        let view = self.load(anchor, &[FormType::Worldspace])?;
        let bound = |offset| self.f32_field(&view, offset, -MAX_BOUND, MAX_BOUND);

        Some(WorldspaceRecord {
            form_id: view.form_id(),
            name: self.string_field(&view, worldspace::NAME),
            parent_form_id: self.form_field(&view, worldspace::PARENT, FormType::Worldspace),
            flags: self.u8_field(&view, worldspace::FLAGS),
            land_height: self.f32_field(&view, worldspace::LAND_HEIGHT, -MAX_HEIGHT, MAX_HEIGHT),
            water_height: self.f32_field(&view, worldspace::WATER_HEIGHT, -MAX_HEIGHT, MAX_HEIGHT),
            bounds_min: (bound(worldspace::MIN_X), bound(worldspace::MIN_Y)),
            bounds_max: (bound(worldspace::MAX_X), bound(worldspace::MAX_Y)),
            persistent_cell_form_id: self.form_field(&view, worldspace::PERSISTENT_CELL, FormType::Cell),
        })
    }

    /// Placed objects, placed NPCs and placed creatures.
    pub fn read_reference(&self, anchor: &Anchor) -> Option<ReferenceRecord> {
        let view = self.load(anchor, &FormType::REFERENCES)?;

        let base_type = match view.form_type {
            FormType::PlacedNpc => Some(FormType::Npc),
            FormType::PlacedCreature => Some(FormType::Creature),
            _ => None,
        };
        let base = self
            .context()
            .follow_pointer(view.bytes(), self.layout().at(reference::BASE), base_type);

        let scale = match self.f32_field(&view, reference::SCALE, 0.01, 100.0) {
            s if s == 0.0 => 1.0,
            s => s,
        };

        Some(ReferenceRecord {
            form_id: view.form_id(),
            form_type: view.form_type,
            base,
            position: self.vector_field(&view, reference::POSITION, MAX_COORDINATE),
            rotation: self.vector_field(&view, reference::ROTATION, MAX_ROTATION),
            scale,
            parent_cell_form_id: self.form_field(&view, reference::PARENT_CELL, FormType::Cell),
            persistent: view.header.flags.contains(FormFlags::PERSISTENT),
            disabled: view.header.flags.contains(FormFlags::INITIALLY_DISABLED),
        })
    }

    fn vector_field(&self, view: &FormView, offset: usize, limit: f32) -> [f32; 3] {
        [0, 4, 8].map(|i| self.f32_field(view, offset + i, -limit, limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValidationLimits;
    use crate::structure::BuildIdentifier;
    use crate::testing::{DumpBuilder, TEST_VTABLE};

    const HEAP: u32 = 0x4000_0000;

    #[test]
    fn test_read_exterior_cell() {
        let mut dump = DumpBuilder::new(HEAP, 0x200);
        dump.form_header(HEAP, FormType::Cell, 0x0000_A000);
        dump.string_descriptor(HEAP + cell::NAME as u32, HEAP + 0x180, "Megaton");
        dump.write_i32(HEAP + cell::GRID_X as u32, -3);
        dump.write_i32(HEAP + cell::GRID_Y as u32, 300);
        dump.write_f32(HEAP + cell::WATER_HEIGHT as u32, -2048.0);
        dump.form_header(HEAP + 0x100, FormType::Worldspace, 0x0000_003C);
        dump.write_u32(HEAP + cell::WORLDSPACE as u32, HEAP + 0x100);
        dump.form_header(HEAP + 0x120, FormType::Npc, 0x0000_B000);
        dump.write_u32(HEAP + cell::OWNER as u32, HEAP + 0x120);

        let ctx = dump.build();
        let cell = Reconstructor::new(&ctx, BuildIdentifier::Release, ValidationLimits::default())
            .read_cell(&Anchor::new(0, FormType::Cell, 0xA000))
            .unwrap();
        assert_eq!(cell.name.as_deref(), Some("Megaton"));
        assert!(!cell.is_interior);
        assert_eq!(cell.grid, Some((-3, 0)));
        assert_eq!(cell.worldspace_form_id, Some(0x3C));
        assert_eq!(cell.water_height, -2048.0);
        assert_eq!(cell.owner.map(|o| (o.form_id, o.form_type())), Some((0xB000, Some(FormType::Npc))));
    }

    #[test]
    fn test_interior_cell_has_no_grid() {
        let mut dump = DumpBuilder::new(HEAP, 0x100);
        dump.form_header(HEAP, FormType::Cell, 0x0000_A001);
        dump.write_u8(HEAP + cell::FLAGS as u32, 0x01);
        dump.write_i32(HEAP + cell::GRID_X as u32, 5);
        let ctx = dump.build();
        let cell = Reconstructor::new(&ctx, BuildIdentifier::Release, ValidationLimits::default())
            .read_cell(&Anchor::new(0, FormType::Cell, 0xA001))
            .unwrap();
        assert!(cell.is_interior);
        assert_eq!(cell.grid, None);
    }

    #[test]
    fn test_read_worldspace() {
        let mut dump = DumpBuilder::new(HEAP, 0x200);
        dump.form_header(HEAP, FormType::Worldspace, 0x0000_003C);
        dump.string_descriptor(HEAP + worldspace::NAME as u32, HEAP + 0x180, "Wasteland");
        dump.write_f32(HEAP + worldspace::LAND_HEIGHT as u32, -4096.0);
        dump.write_f32(HEAP + worldspace::WATER_HEIGHT as u32, f32::NAN);
        dump.write_f32(HEAP + worldspace::MIN_X as u32, -131_072.0);
        dump.write_f32(HEAP + worldspace::MIN_Y as u32, -131_072.0);
        dump.write_f32(HEAP + worldspace::MAX_X as u32, 131_072.0);
        dump.write_f32(HEAP + worldspace::MAX_Y as u32, 5.0e7);
        dump.form_header(HEAP + 0x100, FormType::Cell, 0x0000_A002);
        dump.write_u32(HEAP + worldspace::PERSISTENT_CELL as u32, HEAP + 0x100);
        let ctx = dump.build();

        let world = Reconstructor::new(&ctx, BuildIdentifier::Release, ValidationLimits::default())
            .read_worldspace(&Anchor::new(0, FormType::Worldspace, 0x3C))
            .unwrap();
        assert_eq!(world.name.as_deref(), Some("Wasteland"));
        assert_eq!(world.land_height, -4096.0);
        assert_eq!(world.water_height, 0.0);
        assert_eq!(world.bounds_min, (-131_072.0, -131_072.0));
        assert_eq!(world.bounds_max, (131_072.0, 0.0));
        assert_eq!(world.persistent_cell_form_id, Some(0xA002));
        assert_eq!(world.parent_form_id, None);
    }

    #[test]
    fn test_read_placed_npc() {
        let mut dump = DumpBuilder::new(HEAP, 0x200);
        dump.raw_header(HEAP, TEST_VTABLE, FormType::PlacedNpc.tag(), 0x0000_0C00, 0x0000_C000);
        dump.write_f32(HEAP + reference::ROTATION as u32 + 8, 1.5);
        dump.write_f32(HEAP + reference::POSITION as u32, 1024.0);
        dump.write_f32(HEAP + reference::POSITION as u32 + 4, -512.0);
        dump.write_f32(HEAP + reference::POSITION as u32 + 8, 2.0e6);
        dump.form_header(HEAP + 0x100, FormType::Npc, 0x0000_C001);
        dump.write_u32(HEAP + reference::BASE as u32, HEAP + 0x100);
        dump.form_header(HEAP + 0x120, FormType::Cell, 0x0000_A003);
        dump.write_u32(HEAP + reference::PARENT_CELL as u32, HEAP + 0x120);
        let ctx = dump.build();

        let placed = Reconstructor::new(&ctx, BuildIdentifier::Release, ValidationLimits::default())
            .read_reference(&Anchor::new(0, FormType::PlacedNpc, 0xC000))
            .unwrap();
        assert_eq!(placed.base.map(|b| b.form_id), Some(0xC001));
        assert_eq!(placed.rotation, [0.0, 0.0, 1.5]);
        assert_eq!(placed.position, [1024.0, -512.0, 0.0]);
        assert_eq!(placed.scale, 1.0);
        assert_eq!(placed.parent_cell_form_id, Some(0xA003));
        assert!(placed.persistent);
        assert!(placed.disabled);
    }

    #[test]
    fn test_placed_creature_rejects_npc_base() {
        let mut dump = DumpBuilder::new(HEAP, 0x200);
        dump.form_header(HEAP, FormType::PlacedCreature, 0x0000_C100);
        dump.form_header(HEAP + 0x100, FormType::Npc, 0x0000_C001);
        dump.write_u32(HEAP + reference::BASE as u32, HEAP + 0x100);
        dump.write_f32(HEAP + reference::SCALE as u32, 1.5);
        let ctx = dump.build();

        let placed = Reconstructor::new(&ctx, BuildIdentifier::Release, ValidationLimits::default())
            .read_reference(&Anchor::new(0, FormType::PlacedCreature, 0xC100))
            .unwrap();
        assert_eq!(placed.base, None);
        assert_eq!(placed.scale, 1.5);
        assert!(!placed.persistent);
    }

    #[test]
    fn test_plain_reference_accepts_any_base() {
        let mut dump = DumpBuilder::new(HEAP, 0x200);
        dump.form_header(HEAP, FormType::Reference, 0x0000_C200);
        dump.form_header(HEAP + 0x100, FormType::Terminal, 0x0002_1000);
        dump.write_u32(HEAP + reference::BASE as u32, HEAP + 0x100);
        dump.write_f32(HEAP + reference::SCALE as u32, 500.0);
        let ctx = dump.build();

        let placed = Reconstructor::new(&ctx, BuildIdentifier::Release, ValidationLimits::default())
            .read_reference(&Anchor::new(0, FormType::Reference, 0xC200))
            .unwrap();
        assert_eq!(placed.base.and_then(|b| b.form_type()), Some(FormType::Terminal));
        assert_eq!(placed.scale, 1.0);
    }
}
