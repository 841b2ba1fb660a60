pub mod pattern;
pub mod sample;

pub use self::pattern::PatternBlock;
pub use self::sample::SampleDescriptor;

use crate::format;


/// A fully decoded module file.
#[derive(Clone, Debug)]
pub struct ModuleRecord {
    pub title              : String,
    pub sample_table       : Vec<SampleDescriptor>,
    pub song_positions     : u8,
    pub restart_position   : u8,  // Noisetracker restart
    pub orders             : [u8; 128],
    pub tag                : Option<String>,
    pub patterns           : Vec<PatternBlock>,
    pub samples            : Vec<Vec<u8>>,
    pub used_sample_count  : usize,
    pub sample_byte_lengths: Vec<usize>,
}

impl ModuleRecord {
    pub fn channels(&self) -> usize {
        self.tag.as_ref().and_then(|t| format::magic(t.as_bytes())).map_or(4, |m| m.ch)
    }

    /// The pattern played at a song position.
    pub fn pattern_in_position(&self, pos: usize) -> Option<&PatternBlock> {
        if pos >= self.song_positions as usize {
            return None
        }
        self.orders.get(pos).and_then(|&p| self.patterns.get(p as usize))
    }

    /// Sample data of a sample table entry, if the entry is used.
    pub fn sample_data(&self, ins: usize) -> Option<&[u8]> {
        let entry = self.sample_table.get(ins)?;
        if !entry.is_used() {
            return None
        }
        let idx = self.sample_table[..ins].iter().filter(|s| s.is_used()).count();
        self.samples.get(idx).map(|x| &x[..])
    }
}

/// Number of sample table entries that have waveform data.
pub fn used_sample_count(table: &[SampleDescriptor]) -> usize {
    table.iter().filter(|s| s.is_used()).count()
}

/// Byte length of each stored sample, in table order.
pub fn sample_byte_lengths(table: &[SampleDescriptor]) -> Vec<usize> {
    table.iter().filter(|s| s.is_used()).map(|s| s.sample_length as usize).collect()
}
