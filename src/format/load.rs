use std::io::Read;
use std::mem;
use crate::format::{ModuleVariant, TableSize};
use crate::module::{self, ModuleRecord, PatternBlock, SampleDescriptor};
use crate::module::pattern::PATTERN_SIZE;
use crate::module::sample::finetune_from_byte;
use crate::util::FieldReader;
use crate::Error;

const TITLE_SIZE    : usize = 20;
const INSTRUMENT_SIZE: usize = 30;
const NAME_SIZE     : usize = 22;
const ORDERS_SIZE   : usize = 128;
const TAG_SIZE      : usize = 4;


/// Fixed part of a variant's field layout, computed once per decoder.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    pub table      : TableSize,
    pub has_tag    : bool,
    pub orders_ofs : usize,
    pub header_size: usize,  // where pattern data starts
}

impl Layout {
    pub fn new(table: TableSize, has_tag: bool) -> Self {
        let orders_ofs = TITLE_SIZE + table.len() * INSTRUMENT_SIZE + 2;
        let mut header_size = orders_ofs + ORDERS_SIZE;
        if has_tag {
            header_size += TAG_SIZE;
        }

        Layout {
            table,
            has_tag,
            orders_ofs,
            header_size,
        }
    }
}


/// Sequential decoder for one module variant. Fields are collected in the
/// decoder while a file is read and moved into the record once the whole
/// file has been decoded, so a failed read leaves its partial state behind
/// until the next `reset`.
pub struct Decoder {
    layout          : Layout,
    title           : String,
    sample_table    : Vec<SampleDescriptor>,
    song_positions  : u8,
    restart_position: u8,
    orders          : [u8; ORDERS_SIZE],
    tag             : Option<String>,
    patterns        : Vec<PatternBlock>,
    samples         : Vec<Vec<u8>>,
}

impl Decoder {
    pub fn new(variant: ModuleVariant) -> Self {
        Decoder::with_shape(variant.table, variant.has_trailing_tag())
    }

    pub fn with_shape(table: TableSize, has_tag: bool) -> Self {
        Decoder {
            layout          : Layout::new(table, has_tag),
            title           : String::new(),
            sample_table    : Vec::with_capacity(table.len()),
            song_positions  : 0,
            restart_position: 0,
            orders          : [0; ORDERS_SIZE],
            tag             : None,
            patterns        : Vec::new(),
            samples         : Vec::new(),
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Drop everything decoded from the previous file.
    pub fn reset(&mut self) {
        self.title.clear();
        self.sample_table.clear();
        self.song_positions = 0;
        self.restart_position = 0;
        self.orders = [0; ORDERS_SIZE];
        self.tag = None;
        self.patterns.clear();
        self.samples.clear();
    }

    /// Whether no decoded data is held.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.sample_table.is_empty() && self.song_positions == 0 &&
            self.restart_position == 0 && self.orders.iter().all(|&x| x == 0) &&
            self.tag.is_none() && self.patterns.is_empty() && self.samples.is_empty()
    }

    /// Decode a module from the start of the source.
    pub fn decode<R: Read>(&mut self, r: R) -> Result<ModuleRecord, Error> {
        let mut r = FieldReader::new(r);
        let size = self.layout.table.len();

        self.title = r.read_string(TITLE_SIZE)?;

        // Load instruments
        self.sample_table.clear();
        for _ in 0..size {
            let ins = load_instrument(&mut r)?;
            self.sample_table.push(ins);
        }

        // Load orders
        self.song_positions = r.read8()?;
        self.restart_position = r.read8()?;
        debug_assert_eq!(r.offset(), self.layout.orders_ofs as u64);
        r.read_into(&mut self.orders)?;

        self.tag = if self.layout.has_tag {
            Some(r.read_string(TAG_SIZE)?)
        } else {
            None
        };
        debug_assert_eq!(r.offset(), self.layout.header_size as u64);

        // Patterns are stored sequentially, the highest pattern referenced in
        // the orders tells how many there are.
        let pat = self.orders.iter().max().map_or(0, |&x| x as usize) + 1;
        debug!("{} patterns, title {:?}", pat, self.title);

        self.patterns.clear();
        let mut buf = [0_u8; PATTERN_SIZE];
        for _ in 0..pat {
            r.read_into(&mut buf)?;
            self.patterns.push(PatternBlock::from_slice(&buf));
        }

        // Load samples, placeholders have no data
        let lengths = module::sample_byte_lengths(&self.sample_table);
        self.samples.clear();
        for &len in &lengths {
            let smp = r.read_bytes(len)?;
            self.samples.push(smp);
        }
        debug!("{} samples, {} bytes read", lengths.len(), r.offset());

        Ok(ModuleRecord {
            title              : mem::take(&mut self.title),
            sample_table       : mem::replace(&mut self.sample_table, Vec::with_capacity(size)),
            song_positions     : mem::take(&mut self.song_positions),
            restart_position   : mem::take(&mut self.restart_position),
            orders             : mem::replace(&mut self.orders, [0; ORDERS_SIZE]),
            tag                : self.tag.take(),
            patterns           : mem::take(&mut self.patterns),
            samples            : mem::take(&mut self.samples),
            used_sample_count  : lengths.len(),
            sample_byte_lengths: lengths,
        })
    }
}

/// Decode with a fresh decoder, bypassing any cache.
pub fn decode<R: Read>(r: R, variant: ModuleVariant) -> Result<ModuleRecord, Error> {
    Decoder::new(variant).decode(r)
}

fn load_instrument<R: Read>(r: &mut FieldReader<R>) -> Result<SampleDescriptor, Error> {
    let mut ins = SampleDescriptor::new();

    ins.name = r.read_string(NAME_SIZE)?;
    ins.sample_length = r.read16b()?;
    ins.finetune = finetune_from_byte(r.read8()?);
    ins.volume = r.read8()?;
    ins.repeat_offset = r.read16b()?;
    ins.repeat_length = r.read16b()?;

    Ok(ins)
}
