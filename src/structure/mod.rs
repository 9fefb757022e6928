// Mon Oct 19 2026 - Alex

pub mod build;
pub mod layout;
pub mod traversal;

pub use build::BuildIdentifier;
pub use layout::{FieldLayout, LayoutResolver};
pub use traversal::{ListWalker, PointerArray};
