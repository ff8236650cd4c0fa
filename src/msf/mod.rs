pub mod directory;
pub mod free_page_map;
pub mod info_stream;
pub mod page;
pub mod stream;
pub mod superblock;
#[cfg(test)]
pub(crate) mod testing;

use super::{error::LoadStage, utils, Error, Result};
use bytes::Bytes;
use directory::StreamDirectory;
use free_page_map::FreePageMap;
use info_stream::InfoStream;
use page::PageReader;
use std::path::Path;
use stream::{Diagnostic, Stream};
use superblock::Superblock;

#[derive(Debug, Clone, Copy)]
pub struct PdbBuilder {
    dispatch: bool,
    check_page_bounds: bool,
}

impl Default for PdbBuilder {
    fn default() -> Self {
        Self {
            dispatch: true,
            check_page_bounds: false,
        }
    }
}

impl PdbBuilder {
    pub fn dispatch(self, dispatch: bool) -> Self {
        Self { dispatch, ..self }
    }

    pub fn check_page_bounds(self, check: bool) -> Self {
        Self {
            check_page_bounds: check,
            ..self
        }
    }

    pub fn open<P: AsRef<Path>>(self, path: P) -> Result<Pdb> {
        let data = std::fs::read(path)?;
        self.load(data)
    }

    pub fn load<B: Into<Bytes>>(self, data: B) -> Result<Pdb> {
        let data: Bytes = data.into();

        let superblock = Superblock::parse(&data).map_err(Error::at(LoadStage::Superblock))?;
        tracing::debug!(
            page_size = superblock.page_size(),
            page_count = superblock.page_count(),
            directory_size = superblock.directory_info().byte_len(),
            "parsed superblock"
        );
        let pages = PageReader::new(&data, superblock.page_size());

        let free_page_map = pages
            .read_page(superblock.free_page_map_page() as u32)
            .map(|page| FreePageMap::new(&page))
            .map_err(Error::at(LoadStage::FreePageMap))?;

        let directory = StreamDirectory::read(&pages, &superblock)
            .and_then(|dir| {
                if self.check_page_bounds {
                    dir.check_page_bounds(superblock.page_count())?;
                }
                Ok(dir)
            })
            .map_err(Error::at(LoadStage::StreamDirectory))?;
        tracing::debug!(streams = directory.num_streams(), "parsed stream directory");

        let (streams, diagnostics) = if self.dispatch {
            stream::dispatch(&directory, &pages)
        } else {
            (vec![], vec![])
        };

        Ok(Pdb {
            data,
            superblock,
            free_page_map,
            directory,
            streams,
            diagnostics,
        })
    }
}

/// A loaded container. Immutable once built.
#[derive(Debug)]
pub struct Pdb {
    data: Bytes,
    superblock: Superblock,
    free_page_map: FreePageMap,
    directory: StreamDirectory,
    streams: Vec<Stream>,
    diagnostics: Vec<Diagnostic>,
}

impl Pdb {
    pub fn builder() -> PdbBuilder {
        PdbBuilder::default()
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().open(path)
    }

    pub fn from_bytes<B: Into<Bytes>>(data: B) -> Result<Self> {
        Self::builder().load(data)
    }

    pub fn superblock(&self) -> &Superblock {
        &self.superblock
    }

    pub fn free_page_map(&self) -> &FreePageMap {
        &self.free_page_map
    }

    pub fn is_free(&self, page: u32) -> bool {
        self.free_page_map.is_free(page)
    }

    pub fn directory(&self) -> &StreamDirectory {
        &self.directory
    }

    pub fn num_streams(&self) -> u32 {
        self.directory.num_streams()
    }

    pub fn stream_size(&self, stream: u32) -> Result<usize> {
        self.directory.info(stream).map(|info| info.byte_len())
    }

    pub fn read_page(&self, page: u32) -> Result<Bytes> {
        self.pages().read_page(page)
    }

    /// The bytes of any stream, whether or not a decoder exists for it.
    pub fn read_stream(&self, stream: u32) -> Result<Bytes> {
        stream::reassemble(&self.directory, &self.pages(), stream)
    }

    /// Streams in stream number order; empty when dispatch was disabled.
    pub fn streams(&self) -> &[Stream] {
        &self.streams
    }

    pub fn stream(&self, stream: u32) -> Option<&Stream> {
        self.streams.get(stream as usize)
    }

    pub fn info(&self) -> Option<&InfoStream> {
        match self.stream(stream::StreamId::Pdb.number()) {
            Some(Stream::Info(info)) => Some(info),
            _ => None,
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    fn pages(&self) -> PageReader<'_> {
        PageReader::new(&self.data, self.superblock.page_size())
    }
}
