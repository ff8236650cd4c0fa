use super::{Error, Result};
use bytes::Buf;

/// Number of pages needed to hold `size` bytes.
pub fn page_count(size: usize, page_size: usize) -> usize {
    size.div_ceil(page_size)
}

pub fn ensure_remaining<B: Buf>(buf: &B, what: &'static str, needed: usize) -> Result<()> {
    if buf.remaining() < needed {
        return Err(Error::TruncatedData {
            what,
            needed,
            available: buf.remaining(),
        });
    }
    Ok(())
}

pub fn read_n_bytes<B: Buf>(buf: &mut B, what: &'static str, n: usize) -> Result<Vec<u8>> {
    ensure_remaining(&*buf, what, n)?;
    let mut out = vec![0u8; n];
    buf.copy_to_slice(&mut out);
    Ok(out)
}

pub fn read_u16_le<B: Buf>(buf: &mut B, what: &'static str) -> Result<u16> {
    ensure_remaining(&*buf, what, 2)?;
    Ok(buf.get_u16_le())
}

pub fn read_u32_le<B: Buf>(buf: &mut B, what: &'static str) -> Result<u32> {
    ensure_remaining(&*buf, what, 4)?;
    Ok(buf.get_u32_le())
}

pub fn read_i32_le<B: Buf>(buf: &mut B, what: &'static str) -> Result<i32> {
    ensure_remaining(&*buf, what, 4)?;
    Ok(buf.get_i32_le())
}

/// Reads `n` consecutive little-endian page numbers.
pub fn read_page_numbers<B: Buf>(buf: &mut B, what: &'static str, n: usize) -> Result<Vec<u16>> {
    ensure_remaining(&*buf, what, n.saturating_mul(2))?;
    Ok((0..n).map(|_| buf.get_u16_le()).collect())
}
