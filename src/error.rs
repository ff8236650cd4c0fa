use std::{fmt, io};
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("ERR - io: {0}")]
    Io(#[from] io::Error),

    #[error("ERR - format: {0}")]
    Format(String),

    #[error("ERR - truncated {what}: need {needed} bytes, {available} available")]
    TruncatedData {
        what: &'static str,
        needed: usize,
        available: usize,
    },

    #[error("ERR - page {page} out of range (page size {page_size}, file length {file_len})")]
    PageOutOfRange {
        page: u32,
        page_size: usize,
        file_len: usize,
    },

    #[error("ERR - page {page} at or beyond page count {page_count}")]
    PageBeyondCount { page: u32, page_count: u16 },

    #[error("ERR - unknown stream {stream} (stream count {count})")]
    UnknownStream { stream: u32, count: u32 },

    #[error("ERR - support for stream {0} not yet implemented")]
    UnimplementedStream(u32),

    #[error("ERR - {stage}: {source}")]
    Load {
        stage: LoadStage,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    pub(crate) fn at(stage: LoadStage) -> impl FnOnce(Error) -> Error {
        move |source| Error::Load {
            stage,
            source: Box::new(source),
        }
    }

    /// The underlying error with any load stage wrappers removed.
    pub fn root(&self) -> &Error {
        match self {
            Self::Load { source, .. } => source.root(),
            other => other,
        }
    }

    /// The load stage that failed, if this error aborted a load.
    pub fn stage(&self) -> Option<LoadStage> {
        match self {
            Self::Load { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoadStage {
    Superblock,
    FreePageMap,
    StreamDirectory,
}

impl fmt::Display for LoadStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Superblock => write!(f, "superblock"),
            Self::FreePageMap => write!(f, "free page map"),
            Self::StreamDirectory => write!(f, "stream directory"),
        }
    }
}
