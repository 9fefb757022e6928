// Mon Oct 19 2026 - Alex

/// Words the console allocator and debug runtime leave in uninitialised or freed memory.
pub const HEAP_FILL_WORDS: [u32; 6] = [
    0xCDCD_CDCD,
    0xDDDD_DDDD,
    0xFDFD_FDFD,
    0xFEEE_FEEE,
    0xBAAD_F00D,
    0xABAB_ABAB,
];

pub fn is_heap_fill(word: u32) -> bool {
    HEAP_FILL_WORDS.contains(&word)
}

/// A 16-bit half of a fill word, for fields narrower than 32 bits.
pub fn is_heap_fill_u16(half: u16) -> bool {
    HEAP_FILL_WORDS
        .iter()
        .any(|w| (*w >> 16) as u16 == half && (*w & 0xFFFF) as u16 == half)
}
