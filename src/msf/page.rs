use super::{Error, Result};
use bytes::{Bytes, BytesMut};

/// Maps page numbers onto the in-memory file buffer.
#[derive(Debug, Clone, Copy)]
pub struct PageReader<'a> {
    data: &'a Bytes,
    page_size: usize,
}

impl<'a> PageReader<'a> {
    pub fn new(data: &'a Bytes, page_size: usize) -> Self {
        Self { data, page_size }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Bytes `[page * page_size, (page + 1) * page_size)` of the file.
    pub fn read_page(&self, page: u32) -> Result<Bytes> {
        let out_of_range = || Error::PageOutOfRange {
            page,
            page_size: self.page_size,
            file_len: self.data.len(),
        };
        let start = (page as usize)
            .checked_mul(self.page_size)
            .ok_or_else(out_of_range)?;
        let end = start.checked_add(self.page_size).ok_or_else(out_of_range)?;
        if end > self.data.len() {
            return Err(out_of_range());
        }
        Ok(self.data.slice(start..end))
    }

    /// Concatenates `pages` in order and truncates the result to `len` bytes.
    /// The result never shares the file buffer.
    pub fn read_pages(&self, pages: &[u16], len: usize) -> Result<Bytes> {
        match pages {
            [] => Ok(Bytes::new()),
            [page] => {
                let data = self.read_page(*page as u32)?;
                Ok(Bytes::copy_from_slice(&data[..len.min(data.len())]))
            }
            _ => {
                let mut buf = BytesMut::with_capacity(pages.len() * self.page_size);
                for page in pages {
                    buf.extend_from_slice(&self.read_page(*page as u32)?);
                }
                buf.truncate(len);
                Ok(buf.freeze())
            }
        }
    }
}
