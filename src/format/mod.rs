pub mod cache;
pub mod load;
pub mod probe;

pub use self::cache::VariantCache;
pub use self::load::Decoder;
pub use self::probe::probe;

use std::fmt;


/// Sample table sizes a module file can have.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableSize {
    Short,  // Soundtracker, 15 instruments
    Long,   // Protracker and clones, 31 instruments
}

impl TableSize {
    pub fn len(self) -> usize {
        match self {
            TableSize::Short => 15,
            TableSize::Long  => 31,
        }
    }
}

/// A recognized format tag and the channel count it implies.
pub struct Magic {
    pub magic: &'static str,
    pub ch   : usize,
}

lazy_static! {
    static ref MAGIC: Box<[Magic; 6]> = Box::new([
        Magic{magic:"M.K.", ch:4},
        Magic{magic:"M!K!", ch:4},  // more than 64 patterns
        Magic{magic:"FLT4", ch:4},  // Startrekker
        Magic{magic:"FLT8", ch:8},  // Startrekker
        Magic{magic:"6CHN", ch:6},  // Fast Tracker
        Magic{magic:"8CHN", ch:8},  // Fast Tracker
    ]);
}

/// Finds the recognized tag matching a raw 4-byte field.
pub fn magic(b: &[u8]) -> Option<&'static Magic> {
    MAGIC.iter().find(|m| m.magic.as_bytes() == b)
}

/// Structural shape of a module file, as classified by the probe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModuleVariant {
    pub table: TableSize,
    pub tag  : Option<&'static str>,
}

impl ModuleVariant {
    pub fn new(table: TableSize, tag: Option<&'static str>) -> Self {
        ModuleVariant{ table, tag }
    }

    pub fn sample_table_size(&self) -> usize {
        self.table.len()
    }

    pub fn has_trailing_tag(&self) -> bool {
        self.tag.is_some()
    }

    pub fn tag_value(&self) -> Option<&'static str> {
        self.tag
    }

    pub fn channels(&self) -> usize {
        self.tag.and_then(|t| magic(t.as_bytes())).map_or(4, |m| m.ch)
    }
}

impl fmt::Display for ModuleVariant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} samples, tag {}", self.sample_table_size(), self.tag.unwrap_or("none"))
    }
}
