use super::{superblock::MAGIC, utils};
use std::collections::BTreeSet;

pub(crate) const SUPERBLOCK_PAGE: u16 = 0;
pub(crate) const FREE_PAGE_MAP_PAGE: u16 = 1;

// Superblock offsets.
pub(crate) const DIRECTORY_SIZE_OFFSET: usize = 52;
pub(crate) const DIRECTORY_PAGES_OFFSET: usize = 60;

#[derive(Debug)]
struct Entry {
    data: Vec<u8>,
    pages: Option<Vec<u16>>,
    reserved: u32,
}

// Page 0 superblock, page 1 free page map, then the directory and streams on
// the next unclaimed pages.
#[derive(Debug)]
pub(crate) struct MsfWriter {
    page_size: usize,
    streams: Vec<Entry>,
}

impl MsfWriter {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size,
            streams: vec![],
        }
    }

    pub fn stream(mut self, data: Vec<u8>) -> Self {
        self.streams.push(Entry {
            data,
            pages: None,
            reserved: 0,
        });
        self
    }

    pub fn stream_on_pages(mut self, data: Vec<u8>, pages: Vec<u16>) -> Self {
        self.streams.push(Entry {
            data,
            pages: Some(pages),
            reserved: 0,
        });
        self
    }

    pub fn reserved(mut self, reserved: u32) -> Self {
        if let Some(entry) = self.streams.last_mut() {
            entry.reserved = reserved;
        }
        self
    }

    pub fn build(self) -> Vec<u8> {
        let page_size = self.page_size;
        let page_count = |len: usize| utils::page_count(len, page_size);

        let mut claimed: BTreeSet<u16> = [SUPERBLOCK_PAGE, FREE_PAGE_MAP_PAGE].into();
        claimed.extend(self.streams.iter().filter_map(|e| e.pages.as_ref()).flatten());

        let mut next = 0u16;
        let mut allocate = |n: usize, claimed: &mut BTreeSet<u16>| -> Vec<u16> {
            let mut pages = Vec::with_capacity(n);
            while pages.len() < n {
                if claimed.insert(next) {
                    pages.push(next);
                }
                next += 1;
            }
            pages
        };

        let directory_len = 4
            + 8 * self.streams.len()
            + 2 * self
                .streams
                .iter()
                .map(|e| page_count(e.data.len()))
                .sum::<usize>();
        let directory_pages = allocate(page_count(directory_len), &mut claimed);

        let stream_pages: Vec<Vec<u16>> = self
            .streams
            .iter()
            .map(|e| match &e.pages {
                Some(pages) => pages.clone(),
                None => allocate(page_count(e.data.len()), &mut claimed),
            })
            .collect();

        let mut directory = (self.streams.len() as u32).to_le_bytes().to_vec();
        for entry in &self.streams {
            directory.extend_from_slice(&(entry.data.len() as u32).to_le_bytes());
            directory.extend_from_slice(&entry.reserved.to_le_bytes());
        }
        for page in stream_pages.iter().flatten() {
            directory.extend_from_slice(&page.to_le_bytes());
        }

        let total = claimed.last().map_or(0, |p| *p as usize + 1);
        let mut file = vec![0u8; total * page_size];
        let mut place = |data: &[u8], pages: &[u16]| {
            for (chunk, page) in data.chunks(page_size).zip(pages) {
                let start = *page as usize * page_size;
                file[start..start + chunk.len()].copy_from_slice(chunk);
            }
        };

        let mut superblock = MAGIC.to_vec();
        superblock.extend_from_slice(&(page_size as i32).to_le_bytes());
        superblock.extend_from_slice(&FREE_PAGE_MAP_PAGE.to_le_bytes());
        superblock.extend_from_slice(&(total as u16).to_le_bytes());
        superblock.extend_from_slice(&(directory_len as u32).to_le_bytes());
        superblock.extend_from_slice(&0u32.to_le_bytes());
        for page in &directory_pages {
            superblock.extend_from_slice(&page.to_le_bytes());
        }
        place(&superblock, &[SUPERBLOCK_PAGE]);

        let mut free_page_map = vec![0u8; page_size];
        for page in 0..page_size * 8 {
            if page > u16::MAX as usize || !claimed.contains(&(page as u16)) {
                free_page_map[page / 8] |= 1 << (page % 8);
            }
        }
        place(&free_page_map, &[FREE_PAGE_MAP_PAGE]);

        place(&directory, &directory_pages);
        for (entry, pages) in self.streams.iter().zip(&stream_pages) {
            place(&entry.data, pages);
        }

        file
    }
}
