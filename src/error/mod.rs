mod cbom;
mod index;
mod io;
mod scan;

pub use cbom::CbomError;
pub use index::IndexError;
pub use io::IoError;
pub use scan::ScanError;

use thiserror::Error;

/// The progress sink can no longer reach its client. Whichever operation
/// tried to send aborts and hands this back to the caller.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("progress client disconnected")]
pub struct ClientDisconnected;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] IoError),

    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Cbom(#[from] CbomError),

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    ClientDisconnected(#[from] ClientDisconnected),
}

pub type Result<T> = std::result::Result<T, Error>;
