mod cli;
mod error;
pub mod msf;
mod utils;

pub type Result<T> = std::result::Result<T, Error>;
pub use cli::{Cli, Command};
pub use error::{Error, LoadStage};
pub use msf::{Pdb, PdbBuilder};
