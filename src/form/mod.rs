// Mon Oct 19 2026 - Alex

pub mod arena;
pub mod fill;
pub mod header;
pub mod record;
pub mod types;

pub use arena::RecordArena;
pub use fill::{is_heap_fill, is_heap_fill_u16};
pub use header::{is_valid_form_id, Anchor, FormFlags, FormHeader, FormRef, FORM_BASE_SIZE, FORM_HEADER_SIZE};
pub use record::*;
pub use types::{FormType, MAX_FORM_TYPE};
