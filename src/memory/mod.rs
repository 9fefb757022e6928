// Mon Oct 19 2026 - Alex

pub mod address;
pub mod context;
pub mod error;
pub mod mapping;
pub mod mmap;
pub mod range;
pub mod region;
pub mod traits;

pub use address::Address;
pub use context::{decode_printable, read_validated_float, MemoryContext};
pub use error::MemoryError;
pub use mapping::{AddressResolver, RegionMap};
pub use mmap::{BufferDump, MmapDump};
pub use range::FileRange;
pub use region::{MemoryRegion, ModuleRange, RegionGroup};
pub use traits::DumpReader;
