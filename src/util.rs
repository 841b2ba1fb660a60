use std::io::{self, Read};
use byteorder::{BigEndian, ReadBytesExt};
use crate::Error;


/// Sequential big-endian field reader. Tracks the absolute offset so that a
/// short read can say where the source ran out.
pub struct FieldReader<R: Read> {
    inner: R,
    ofs  : u64,
}

impl<R: Read> FieldReader<R> {
    pub fn new(inner: R) -> Self {
        FieldReader {
            inner,
            ofs: 0,
        }
    }

    pub fn offset(&self) -> u64 {
        self.ofs
    }

    pub fn read8(&mut self) -> Result<u8, Error> {
        let ofs = self.ofs;
        let v = self.inner.read_u8().map_err(|e| short_read(e, ofs, 1))?;
        self.ofs += 1;
        Ok(v)
    }

    pub fn read16b(&mut self) -> Result<u16, Error> {
        let ofs = self.ofs;
        let v = self.inner.read_u16::<BigEndian>().map_err(|e| short_read(e, ofs, 2))?;
        self.ofs += 2;
        Ok(v)
    }

    pub fn read_bytes(&mut self, size: usize) -> Result<Vec<u8>, Error> {
        let mut buf = vec![0; size];
        self.read_into(&mut buf)?;
        Ok(buf)
    }

    pub fn read_into(&mut self, buf: &mut [u8]) -> Result<(), Error> {
        let ofs = self.ofs;
        self.inner.read_exact(buf).map_err(|e| short_read(e, ofs, buf.len()))?;
        self.ofs += buf.len() as u64;
        Ok(())
    }

    /// Reads a fixed-size text field and drops its trailing padding.
    pub fn read_string(&mut self, size: usize) -> Result<String, Error> {
        let b = self.read_bytes(size)?;
        Ok(trim_padding(&b))
    }
}

fn short_read(err: io::Error, offset: u64, wanted: usize) -> Error {
    match err.kind() {
        io::ErrorKind::UnexpectedEof => Error::Truncated { offset, wanted },
        _                            => Error::Io(err),
    }
}

/// Decodes a padded text field one byte per char, without the trailing NUL
/// and space bytes.
pub fn trim_padding(b: &[u8]) -> String {
    let end = b.iter().rposition(|&c| c != 0 && c != b' ').map_or(0, |i| i + 1);
    b[..end].iter().map(|&c| c as char).collect()
}

pub fn is_printable(s: &str) -> bool {
    s.chars().all(|c| c == ' ' || c.is_ascii_graphic())
}
