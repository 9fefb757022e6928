// Mon Oct 19 2026 - Alex

pub mod config;
pub mod form;
pub mod memory;
pub mod readers;
pub mod scan;
pub mod structure;
pub mod utils;

#[cfg(test)]
mod testing;

pub use config::{Config, ScanConfig, ValidationLimits};
pub use form::{Anchor, FormType, Record, RecordArena};
pub use memory::{MemoryContext, MemoryError, MmapDump, RegionMap};
pub use readers::{discover, reconstruct_all, DiscoveryReport, Reconstructor};
pub use scan::{ObjectScanner, ScanSummary};
pub use structure::{BuildIdentifier, FieldLayout};
