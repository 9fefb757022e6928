// Mon Oct 19 2026 - Alex

/// Bounds-checked big-endian field decoding over a struct buffer.
///
/// Every reader returns `None` when the field does not fit in `data`, so callers never index
/// past a short read.
pub struct BinaryUtils;

impl BinaryUtils {
    pub fn read_u8(data: &[u8], offset: usize) -> Option<u8> {
        data.get(offset).copied()
    }

    pub fn read_i8(data: &[u8], offset: usize) -> Option<i8> {
        data.get(offset).map(|&b| b as i8)
    }

    pub fn read_u16_be(data: &[u8], offset: usize) -> Option<u16> {
        let bytes = data.get(offset..offset.checked_add(2)?)?;
        Some(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_i16_be(data: &[u8], offset: usize) -> Option<i16> {
        Self::read_u16_be(data, offset).map(|v| v as i16)
    }

    pub fn read_u32_be(data: &[u8], offset: usize) -> Option<u32> {
        let bytes = data.get(offset..offset.checked_add(4)?)?;
        Some(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn read_i32_be(data: &[u8], offset: usize) -> Option<i32> {
        Self::read_u32_be(data, offset).map(|v| v as i32)
    }

    pub fn read_f32_be(data: &[u8], offset: usize) -> Option<f32> {
        Self::read_u32_be(data, offset).map(f32::from_bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_big_endian() {
        let data = [0x12, 0x34, 0x56, 0x78, 0xFF];
        assert_eq!(BinaryUtils::read_u8(&data, 4), Some(0xFF));
        assert_eq!(BinaryUtils::read_i8(&data, 4), Some(-1));
        assert_eq!(BinaryUtils::read_u16_be(&data, 0), Some(0x1234));
        assert_eq!(BinaryUtils::read_u32_be(&data, 0), Some(0x1234_5678));
        assert_eq!(BinaryUtils::read_i16_be(&[0xFF, 0xFE], 0), Some(-2));
    }

    #[test]
    fn test_read_past_end() {
        let data = [0u8; 4];
        assert_eq!(BinaryUtils::read_u32_be(&data, 1), None);
        assert_eq!(BinaryUtils::read_u16_be(&data, 3), None);
        assert_eq!(BinaryUtils::read_u32_be(&data, usize::MAX), None);
        assert_eq!(BinaryUtils::read_u8(&data, 4), None);
    }

    #[test]
    fn test_read_float() {
        let data = 1.5f32.to_be_bytes();
        assert_eq!(BinaryUtils::read_f32_be(&data, 0), Some(1.5));
    }
}
