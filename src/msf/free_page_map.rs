use bytes::Bytes;

/// One bit per page: 0 = in use, 1 = free.
#[derive(Debug, Clone)]
pub struct FreePageMap(Bytes);

impl FreePageMap {
    pub fn new(bits: &[u8]) -> Self {
        Self(Bytes::copy_from_slice(bits))
    }

    /// Reports whether `page` is unused. Pages beyond the bitmap are reported
    /// as in use.
    pub fn is_free(&self, page: u32) -> bool {
        let byte = (page / 8) as usize;
        let mask = 1u8 << (page % 8);
        self.0.get(byte).is_some_and(|b| b & mask != 0)
    }

    /// Free pages among the first `page_count` pages.
    pub fn free_pages(&self, page_count: u32) -> impl Iterator<Item = u32> + '_ {
        (0..page_count).filter(|p| self.is_free(*p))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}
