use std::io::{Read, Seek};
use crate::format::{probe, Decoder, ModuleVariant, TableSize};
use crate::module::ModuleRecord;
use crate::Error;


/// One prebuilt decoder per (table size, tag presence) pair. A slot is
/// reset every time it is handed out, so nothing from the previous file
/// read through it is visible to the next one.
///
/// The cache is meant to be owned by a single thread; use one cache per
/// thread to decode files concurrently.
pub struct VariantCache {
    slots: [Decoder; 4],
}

impl VariantCache {
    pub fn new() -> Self {
        VariantCache {
            slots: [
                Decoder::with_shape(TableSize::Long,  true),
                Decoder::with_shape(TableSize::Long,  false),
                Decoder::with_shape(TableSize::Short, true),
                Decoder::with_shape(TableSize::Short, false),
            ],
        }
    }

    fn slot(variant: &ModuleVariant) -> usize {
        match (variant.table, variant.has_trailing_tag()) {
            (TableSize::Long,  true)  => 0,
            (TableSize::Long,  false) => 1,
            (TableSize::Short, true)  => 2,
            (TableSize::Short, false) => 3,
        }
    }

    /// Select the decoder for a variant and clear any state left in it.
    pub fn acquire(&mut self, variant: &ModuleVariant) -> &mut Decoder {
        let i = Self::slot(variant);
        trace!("cache: slot {} for {}", i, variant);
        let decoder = &mut self.slots[i];
        decoder.reset();
        decoder
    }

    /// Probe the source, rewind it and decode it with the matching decoder.
    pub fn read<R: Read + Seek>(&mut self, mut r: R) -> Result<ModuleRecord, Error> {
        let variant = probe(&mut r)?;
        self.acquire(&variant).decode(r)
    }
}

impl Default for VariantCache {
    fn default() -> Self {
        VariantCache::new()
    }
}
