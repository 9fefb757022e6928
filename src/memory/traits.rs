// Mon Oct 19 2026 - Alex

use crate::memory::MemoryError;

/// Read-only access to the raw bytes of a dump file.
pub trait DumpReader: Send + Sync {
    fn len(&self) -> u64;

    fn as_slice(&self) -> &[u8];

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read_at(&self, offset: u64, len: usize) -> Result<Vec<u8>, MemoryError> {
        let size = self.len();
        let end = offset.checked_add(len as u64);
        match end {
            Some(end) if end <= size => {
                let start = offset as usize;
                Ok(self.as_slice()[start..start + len].to_vec())
            }
            _ => Err(MemoryError::OutOfBounds { offset, len, size }),
        }
    }

    fn read_u32_be(&self, offset: u64) -> Result<u32, MemoryError> {
        let bytes = self.read_at(offset, 4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn read_u16_be(&self, offset: u64) -> Result<u16, MemoryError> {
        let bytes = self.read_at(offset, 2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }
}
