/// One entry of the sample table. Entries with a length of 0 or 1 are
/// placeholders, often used to hold comments in their name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SampleDescriptor {
    pub name         : String,
    pub sample_length: u16,
    pub finetune     : i8,
    pub volume       : u8,
    pub repeat_offset: u16,
    pub repeat_length: u16,
}

impl SampleDescriptor {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn is_used(&self) -> bool {
        self.sample_length > 1
    }

    /// Whether the repeat section fits in the sample. Always true for unused
    /// entries.
    pub fn has_valid_loop(&self) -> bool {
        if !self.is_used() {
            return true
        }
        self.repeat_offset <= self.sample_length &&
            self.repeat_length <= self.sample_length - self.repeat_offset
    }
}

/// Sign-extend the low nibble of the finetune byte.
pub fn finetune_from_byte(b: u8) -> i8 {
    ((b << 4) as i8) >> 4
}
