use std::fmt;

pub const PATTERN_SIZE: usize = 1024;


/// One block of pattern command data. The bytes are kept as read.
#[derive(Clone, PartialEq)]
pub struct PatternBlock {
    data: Vec<u8>,
}

impl PatternBlock {
    pub fn from_slice(b: &[u8]) -> Self {
        debug_assert_eq!(b.len(), PATTERN_SIZE);
        PatternBlock {
            data: b.to_vec(),
        }
    }

    pub fn commands(&self) -> &[u8] {
        &self.data
    }

    /// The four command bytes of a row/channel cell, assuming 4 channels.
    pub fn cell(&self, row: usize, chn: usize) -> Option<&[u8]> {
        if row >= 64 || chn >= 4 {
            return None
        }
        let ofs = row * 16 + chn * 4;
        Some(&self.data[ofs..ofs + 4])
    }
}

impl fmt::Debug for PatternBlock {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "PatternBlock({} bytes)", self.data.len())
    }
}
