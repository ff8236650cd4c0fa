use super::{directory::StreamInfo, utils, Error, Result};
use bytes::Buf;

pub const MAGIC_SIZE: usize = 44;
pub const MAGIC: &[u8; MAGIC_SIZE] = b"Microsoft C/C++ program database 2.00\r\n\x1a\x4a\x47\x00\x00";

/// Signature of the big (32-bit page index) variant, which this reader refuses.
const BIG_MAGIC: &[u8; 32] = b"Microsoft C/C++ MSF 7.00\r\n\x1a\x44\x53\x00\x00\x00";

/// The fixed header at the start of page 0.
///
/// Fields are stored back to back with no alignment; whatever follows the
/// directory page list up to the end of page 0 is never read.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Superblock {
    page_size: i32,
    free_page_map: u16,
    page_count: u16,
    directory_info: StreamInfo,
    directory_pages: Vec<u16>,
}

impl Superblock {
    pub(crate) fn parse(data: &[u8]) -> Result<Self> {
        if data.starts_with(BIG_MAGIC) {
            return Err(Error::Format(
                "big MSF (32-bit page numbers) is not supported".into(),
            ));
        }

        let mut buf = data;
        Self::read(&mut buf).map_err(|e| match e {
            Error::TruncatedData {
                what,
                needed,
                available,
            } => Error::Format(format!(
                "superblock truncated reading {what}: need {needed} bytes, {available} available"
            )),
            other => other,
        })
    }

    fn read<B: Buf>(buf: &mut B) -> Result<Self> {
        let magic = utils::read_n_bytes(buf, "magic", MAGIC_SIZE)?;
        if magic.as_slice() != MAGIC.as_slice() {
            return Err(Error::Format(format!(
                "invalid MSF signature; expected {:?}, got {:?}",
                String::from_utf8_lossy(MAGIC),
                String::from_utf8_lossy(&magic),
            )));
        }

        let page_size = utils::read_i32_le(buf, "page size")?;
        if page_size <= 0 || !(page_size as u32).is_power_of_two() {
            return Err(Error::Format(format!(
                "page size must be a positive power of two, got {page_size}"
            )));
        }

        let free_page_map = utils::read_u16_le(buf, "free page map page number")?;
        let page_count = utils::read_u16_le(buf, "page count")?;
        let directory_info = StreamInfo::read(buf, "stream directory info")?;

        let n = utils::page_count(directory_info.byte_len(), page_size as usize);
        let directory_pages = utils::read_page_numbers(buf, "stream directory page numbers", n)?;

        Ok(Self {
            page_size,
            free_page_map,
            page_count,
            directory_info,
            directory_pages,
        })
    }

    pub fn page_size(&self) -> usize {
        self.page_size as usize
    }

    pub fn free_page_map_page(&self) -> u16 {
        self.free_page_map
    }

    pub fn page_count(&self) -> u16 {
        self.page_count
    }

    pub fn directory_info(&self) -> StreamInfo {
        self.directory_info
    }

    /// Pages holding the stream directory, in order.
    pub fn directory_pages(&self) -> &[u16] {
        &self.directory_pages
    }
}
