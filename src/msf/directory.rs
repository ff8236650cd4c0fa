use super::{page::PageReader, superblock::Superblock, utils, Error, Result};
use bytes::{Buf, Bytes, BytesMut};

/// Size of a stream plus a reserved field whose meaning is unknown and which
/// is kept as read.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct StreamInfo {
    size: u32,
    reserved: u32,
}

impl StreamInfo {
    /// Writers mark deleted streams with this size.
    const DELETED: u32 = u32::MAX;

    pub fn new(size: u32, reserved: u32) -> Self {
        Self { size, reserved }
    }

    pub(crate) fn read<B: Buf>(buf: &mut B, what: &'static str) -> Result<Self> {
        utils::ensure_remaining(&*buf, what, 8)?;
        Ok(Self {
            size: buf.get_u32_le(),
            reserved: buf.get_u32_le(),
        })
    }

    /// Stream length in bytes; deleted streams are empty.
    pub fn byte_len(&self) -> usize {
        if self.size == Self::DELETED {
            0
        } else {
            self.size as usize
        }
    }

    pub fn raw_size(&self) -> u32 {
        self.size
    }

    pub fn reserved(&self) -> u32 {
        self.reserved
    }
}

/// The stream table: size and page list of every stream.
///
/// Example: with 4096-byte pages and streams of {1000, 8000, 16000, 9000}
/// bytes, the page lists hold {1, 2, 4, 3} entries respectively.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct StreamDirectory {
    infos: Vec<StreamInfo>,
    // Jagged; each list holds ceil(size / page_size) entries.
    pages: Vec<Vec<u16>>,
}

impl StreamDirectory {
    pub(crate) fn read(pages: &PageReader<'_>, superblock: &Superblock) -> Result<Self> {
        let len = superblock.directory_info().byte_len();
        let mut buf = BytesMut::with_capacity(superblock.directory_pages().len() * pages.page_size());
        for page in superblock.directory_pages() {
            match pages.read_page(*page as u32) {
                Ok(data) => buf.extend_from_slice(&data),
                Err(Error::PageOutOfRange { .. }) => {
                    return Err(Error::TruncatedData {
                        what: "stream directory",
                        needed: len,
                        available: buf.len(),
                    })
                }
                Err(e) => return Err(e),
            }
        }
        // Slack at the end of the last page is never interpreted.
        buf.truncate(len);
        tracing::debug!(len, pages = ?superblock.directory_pages(), "read stream directory");

        Self::parse(buf.freeze(), pages.page_size())
    }

    /// Decodes the directory bytes. Every size must be known before the page
    /// lists can be split, so decoding is strictly sequential.
    pub fn parse(mut buf: Bytes, page_size: usize) -> Result<Self> {
        let count = utils::read_u32_le(&mut buf, "stream count")? as usize;

        utils::ensure_remaining(&buf, "stream infos", count.saturating_mul(8))?;
        let infos = (0..count)
            .map(|_| StreamInfo::read(&mut buf, "stream info"))
            .collect::<Result<Vec<_>>>()?;

        let pages = infos
            .iter()
            .map(|info| {
                let n = utils::page_count(info.byte_len(), page_size);
                utils::read_page_numbers(&mut buf, "stream page numbers", n)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { infos, pages })
    }

    pub fn num_streams(&self) -> u32 {
        self.infos.len() as u32
    }

    pub fn info(&self, stream: u32) -> Result<StreamInfo> {
        self.infos
            .get(stream as usize)
            .copied()
            .ok_or_else(|| self.unknown(stream))
    }

    pub fn pages(&self, stream: u32) -> Result<&[u16]> {
        self.pages
            .get(stream as usize)
            .map(Vec::as_slice)
            .ok_or_else(|| self.unknown(stream))
    }

    pub fn infos(&self) -> &[StreamInfo] {
        &self.infos
    }

    pub(crate) fn check_page_bounds(&self, page_count: u16) -> Result<()> {
        let bad = self.pages.iter().flatten().find(|p| **p >= page_count);
        match bad {
            Some(page) => Err(Error::PageBeyondCount {
                page: *page as u32,
                page_count,
            }),
            None => Ok(()),
        }
    }

    fn unknown(&self, stream: u32) -> Error {
        Error::UnknownStream {
            stream,
            count: self.num_streams(),
        }
    }
}
