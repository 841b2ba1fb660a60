use std::fmt;
use crate::module::{self, ModuleRecord};
use crate::util::is_printable;


/// The first consistency check a decoded module failed.
#[derive(Debug, PartialEq)]
pub enum Insanity {
    Title,
    SampleName(usize),
    SampleCount { expected: usize, found: usize },
    SampleLength { sample: usize, expected: usize, found: usize },
}

impl fmt::Display for Insanity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Insanity::Title =>
                write!(f, "title has non-printable characters"),
            Insanity::SampleName(i) =>
                write!(f, "sample {} name has non-printable characters", i + 1),
            Insanity::SampleCount{ expected, found } =>
                write!(f, "{} samples used but {} stored", expected, found),
            Insanity::SampleLength{ sample, expected, found } =>
                write!(f, "sample data {} is {} bytes, expected {}", sample, found, expected),
        }
    }
}

/// Check if what was decoded looks sane. This may give false positives.
pub fn is_sane(m: &ModuleRecord) -> bool {
    diagnose(m).is_none()
}

/// Find which consistency check fails, if any. Sample counts and lengths are
/// derived again from the sample table rather than taken from the record.
pub fn diagnose(m: &ModuleRecord) -> Option<Insanity> {
    if !is_printable(&m.title) {
        return Some(Insanity::Title)
    }

    if let Some(i) = m.sample_table.iter().position(|s| !is_printable(&s.name)) {
        return Some(Insanity::SampleName(i))
    }

    let expected = module::used_sample_count(&m.sample_table);
    if m.samples.len() != expected {
        return Some(Insanity::SampleCount{ expected, found: m.samples.len() })
    }

    let lengths = module::sample_byte_lengths(&m.sample_table);
    for (i, (smp, &len)) in m.samples.iter().zip(lengths.iter()).enumerate() {
        if smp.len() != len {
            return Some(Insanity::SampleLength{ sample: i, expected: len, found: smp.len() })
        }
    }

    None
}
