// Mon Oct 19 2026 - Alex

use crate::memory::{DumpReader, MemoryError};
use memmap2::Mmap;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A dump file mapped read-only into the address space.
pub struct MmapDump {
    mmap: Arc<Mmap>,
    path: PathBuf,
}

impl MmapDump {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, MemoryError> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)?;
        // The mapping is never written through and the dump is treated as immutable input.
        let mmap = unsafe { Mmap::map(&file) }?;
        log::debug!("Mapped {} ({} bytes)", path.display(), mmap.len());
        Ok(Self {
            mmap: Arc::new(mmap),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DumpReader for MmapDump {
    fn len(&self) -> u64 {
        self.mmap.len() as u64
    }

    fn as_slice(&self) -> &[u8] {
        self.mmap.as_ref()
    }
}

/// An owned in-memory dump image.
#[derive(Debug, Clone, Default)]
pub struct BufferDump {
    data: Arc<[u8]>,
}

impl BufferDump {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data: data.into() }
    }
}

impl DumpReader for BufferDump {
    fn len(&self) -> u64 {
        self.data.len() as u64
    }

    fn as_slice(&self) -> &[u8] {
        &self.data
    }
}
