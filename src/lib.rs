#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

mod util;

pub mod format;
pub mod module;
pub mod sanity;

#[cfg(test)]
mod fixture;

pub use crate::format::{probe, Decoder, ModuleVariant, TableSize, VariantCache};
pub use crate::module::{ModuleRecord, PatternBlock, SampleDescriptor};
pub use crate::sanity::is_sane;

use std::cell::RefCell;
use std::error;
use std::fmt;
use std::io::{self, Read, Seek};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

thread_local! {
    static CACHE: RefCell<VariantCache> = RefCell::new(VariantCache::new());
}

/// Read a module file, reusing this thread's decoders. The result should be
/// passed to `is_sane` before it is trusted.
pub fn read<R: Read + Seek>(r: R) -> Result<ModuleRecord, Error> {
    CACHE.with(|cache| cache.borrow_mut().read(r))
}


#[derive(Debug)]
pub enum Error {
    Truncated { offset: u64, wanted: usize },
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            &Error::Truncated{ offset, wanted } => write!(f, "short read at offset {} ({} bytes wanted)", offset, wanted),
            &Error::Io(ref err)                 => write!(f, "{}", err),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Error::Io(ref err) => Some(err),
            _                  => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}
