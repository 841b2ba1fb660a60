use std::io::{self, Read, Seek, SeekFrom};
use crate::format::{self, ModuleVariant, TableSize};
use crate::Error;

// Where the tag sits in the 15 and 31 sample layouts
const MAGIC_ONE_OFS: u64 = 600;
const MAGIC_TWO_OFS: u64 = 1080;


/// Classify a module file by the markers found at the two tag offsets. The
/// source is rewound to the start afterwards.
pub fn probe<R: Read + Seek>(r: &mut R) -> Result<ModuleVariant, Error> {
    let magic_one = read_magic(r, MAGIC_ONE_OFS)?;
    let magic_two = read_magic(r, MAGIC_TWO_OFS)?;
    r.seek(SeekFrom::Start(0))?;

    // Only the Protracker tag at the 31-sample position selects the long table
    let table = match magic_two {
        Some(ref m) if m == b"M.K." => TableSize::Long,
        _                           => TableSize::Short,
    };

    let tag = magic_one.and_then(|m| format::magic(&m))
        .or_else(|| magic_two.and_then(|m| format::magic(&m)))
        .map(|m| m.magic);

    let variant = ModuleVariant::new(table, tag);
    debug!("probe: {}", variant);

    Ok(variant)
}

// A source too short to hold the field has no marker there.
fn read_magic<R: Read + Seek>(r: &mut R, ofs: u64) -> Result<Option<[u8; 4]>, Error> {
    r.seek(SeekFrom::Start(ofs))?;
    let mut b = [0; 4];
    match r.read_exact(&mut b) {
        Ok(())                                                => Ok(Some(b)),
        Err(ref e) if e.kind() == io::ErrorKind::UnexpectedEof => {
            trace!("probe: no data at offset {}", ofs);
            Ok(None)
        }
        Err(e)                                                => Err(Error::Io(e)),
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use crate::fixture::{BrokenSource, ModBuilder};

    fn with_markers(one: &[u8; 4], two: &[u8; 4]) -> Cursor<Vec<u8>> {
        let mut b = vec![0; 1200];
        b[600..604].copy_from_slice(one);
        b[1080..1084].copy_from_slice(two);
        Cursor::new(b)
    }

    #[test]
    fn test_protracker_tag_selects_long_table() {
        let v = probe(&mut with_markers(b"\0\0\0\0", b"M.K.")).unwrap();
        assert_eq!(v.table, TableSize::Long);
        assert_eq!(v.tag, Some("M.K."));
    }

    #[test]
    fn test_other_tags_keep_short_table() {
        for m in &[b"M!K!", b"FLT4", b"FLT8", b"6CHN", b"8CHN", b"xyzw"] {
            let v = probe(&mut with_markers(b"\0\0\0\0", m)).unwrap();
            assert_eq!(v.table, TableSize::Short);
        }
    }

    #[test]
    fn test_tag_found_at_either_offset() {
        let v = probe(&mut with_markers(b"FLT8", b"\0\0\0\0")).unwrap();
        assert_eq!(v.tag, Some("FLT8"));
        assert_eq!(v.table, TableSize::Short);

        let v = probe(&mut with_markers(b"\0\0\0\0", b"8CHN")).unwrap();
        assert_eq!(v.tag, Some("8CHN"));

        let v = probe(&mut with_markers(b"\0\0\0\0", b"\0\0\0\0")).unwrap();
        assert!(!v.has_trailing_tag());
    }

    #[test]
    fn test_first_offset_wins_tag_value() {
        let v = probe(&mut with_markers(b"6CHN", b"M.K.")).unwrap();
        assert_eq!(v.table, TableSize::Long);
        assert_eq!(v.tag, Some("6CHN"));
    }

    #[test]
    fn test_rewinds_source() {
        let mut src = Cursor::new(ModBuilder::new(TableSize::Long).build());
        probe(&mut src).unwrap();
        assert_eq!(src.position(), 0);
    }

    #[test]
    fn test_short_source_has_no_tag() {
        let v = probe(&mut Cursor::new(vec![0; 100])).unwrap();
        assert_eq!(v, ModuleVariant::new(TableSize::Short, None));

        let mut b = vec![0; 700];
        b[600..604].copy_from_slice(b"M!K!");
        let v = probe(&mut Cursor::new(b)).unwrap();
        assert_eq!(v, ModuleVariant::new(TableSize::Short, Some("M!K!")));
    }

    #[test]
    fn test_failing_source_is_io_error() {
        let data = ModBuilder::new(TableSize::Long).build();
        let mut src = BrokenSource::new(data, 600);
        match probe(&mut src) {
            Err(Error::Io(_)) => (),
            other             => panic!("unexpected result {:?}", other),
        }
    }
}
