use super::{
    directory::StreamDirectory, info_stream::InfoStream, page::PageReader, Error, Result,
};
use bytes::Bytes;
use std::fmt;

/// Fixed stream numbers.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum StreamId {
    OldDirectory,
    Pdb,
    Tpi,
    Dbi,
    NameMap,
}

impl StreamId {
    pub fn new(stream: u32) -> Option<Self> {
        match stream {
            0 => Some(Self::OldDirectory),
            1 => Some(Self::Pdb),
            2 => Some(Self::Tpi),
            3 => Some(Self::Dbi),
            4 => Some(Self::NameMap),
            _ => None,
        }
    }

    pub fn number(&self) -> u32 {
        match self {
            Self::OldDirectory => 0,
            Self::Pdb => 1,
            Self::Tpi => 2,
            Self::Dbi => 3,
            Self::NameMap => 4,
        }
    }
}

/// A stream after dispatch.
#[derive(Debug, Clone)]
pub enum Stream {
    Raw(Bytes),
    Info(InfoStream),
    /// The stream's pages could not be read.
    Unreadable,
}

impl Stream {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Raw(_) => "raw",
            Self::Info(_) => "info",
            Self::Unreadable => "unreadable",
        }
    }
}

#[derive(Debug)]
pub struct Diagnostic {
    pub stream: u32,
    pub error: Error,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stream {}: {}", self.stream, self.error)
    }
}

/// Concatenates the pages of `stream` and cuts them to its declared size.
pub(crate) fn reassemble(
    directory: &StreamDirectory,
    pages: &PageReader<'_>,
    stream: u32,
) -> Result<Bytes> {
    let info = directory.info(stream)?;
    let list = directory.pages(stream)?;
    tracing::debug!(stream, size = info.byte_len(), pages = ?list, "reassembling stream");
    pages.read_pages(list, info.byte_len())
}

/// Reassembles every stream in order and decodes the ones with a known
/// layout. Nothing here aborts the load.
pub(crate) fn dispatch(
    directory: &StreamDirectory,
    pages: &PageReader<'_>,
) -> (Vec<Stream>, Vec<Diagnostic>) {
    let mut streams = Vec::with_capacity(directory.num_streams() as usize);
    let mut diagnostics = vec![];
    let mut report = |stream: u32, error: Error| {
        tracing::warn!(stream, %error, "stream not decoded");
        diagnostics.push(Diagnostic { stream, error });
    };

    for stream in 0..directory.num_streams() {
        let data = match reassemble(directory, pages, stream) {
            Ok(data) => data,
            Err(e) => {
                report(stream, e);
                streams.push(Stream::Unreadable);
                continue;
            }
        };

        let decoded = match StreamId::new(stream) {
            Some(StreamId::Pdb) => match InfoStream::parse(data.clone()) {
                Ok(info) => Stream::Info(info),
                Err(e) => {
                    report(stream, e);
                    Stream::Raw(data)
                }
            },
            _ => {
                report(stream, Error::UnimplementedStream(stream));
                Stream::Raw(data)
            }
        };
        streams.push(decoded);
    }

    (streams, diagnostics)
}
