// In-memory module files for tests.

use std::io::{self, Cursor, Read, Seek, SeekFrom};
use crate::format::TableSize;


pub struct Smp {
    name    : String,
    len     : u16,
    finetune: u8,
    volume  : u8,
    repeat  : u16,
    replen  : u16,
}

impl Smp {
    pub fn new(name: &str, len: u16) -> Self {
        Smp {
            name: name.to_owned(),
            len,
            finetune: 0,
            volume  : 64,
            repeat  : 0,
            replen  : 0,
        }
    }

    pub fn finetune(mut self, v: u8) -> Self {
        self.finetune = v;
        self
    }

    pub fn volume(mut self, v: u8) -> Self {
        self.volume = v;
        self
    }

    pub fn repeat(mut self, ofs: u16, len: u16) -> Self {
        self.repeat = ofs;
        self.replen = len;
        self
    }
}

pub struct ModBuilder {
    table         : TableSize,
    title         : String,
    samples       : Vec<Smp>,
    song_positions: u8,
    restart       : u8,
    orders        : [u8; 128],
    tag           : Option<[u8; 4]>,
    fill          : fn(usize) -> u8,
}

impl ModBuilder {
    pub fn new(table: TableSize) -> Self {
        ModBuilder {
            table,
            title         : String::new(),
            samples       : Vec::new(),
            song_positions: 1,
            restart       : 0,
            orders        : [0; 128],
            tag           : None,
            fill          : |_| 0,
        }
    }

    pub fn title(mut self, s: &str) -> Self {
        self.title = s.to_owned();
        self
    }

    pub fn sample(mut self, smp: Smp) -> Self {
        assert!(self.samples.len() < self.table.len());
        self.samples.push(smp);
        self
    }

    /// Sets the order table and the song length to match it.
    pub fn orders(mut self, o: &[u8]) -> Self {
        self.orders = [0; 128];
        self.orders[..o.len()].copy_from_slice(o);
        self.song_positions = o.len() as u8;
        self
    }

    pub fn song_positions(mut self, n: u8) -> Self {
        self.song_positions = n;
        self
    }

    pub fn restart(mut self, n: u8) -> Self {
        self.restart = n;
        self
    }

    pub fn tag(mut self, t: &[u8; 4]) -> Self {
        self.tag = Some(*t);
        self
    }

    /// Byte used to fill each pattern, by pattern number.
    pub fn pattern_fill(mut self, f: fn(usize) -> u8) -> Self {
        self.fill = f;
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut b = Vec::new();
        put_text(&mut b, &self.title, 20);

        for i in 0..self.table.len() {
            match self.samples.get(i) {
                Some(s) => {
                    put_text(&mut b, &s.name, 22);
                    b.extend_from_slice(&s.len.to_be_bytes());
                    b.push(s.finetune);
                    b.push(s.volume);
                    b.extend_from_slice(&s.repeat.to_be_bytes());
                    b.extend_from_slice(&s.replen.to_be_bytes());
                }
                None => b.extend_from_slice(&[0; 30]),
            }
        }

        b.push(self.song_positions);
        b.push(self.restart);
        b.extend_from_slice(&self.orders);
        if let Some(ref t) = self.tag {
            b.extend_from_slice(t);
        }

        let pat = *self.orders.iter().max().unwrap_or(&0) as usize + 1;
        for p in 0..pat {
            b.extend(std::iter::repeat((self.fill)(p)).take(1024));
        }

        for s in self.samples.iter().filter(|s| s.len > 1) {
            b.extend((0..s.len).map(|x| x as u8));
        }

        b
    }
}

fn put_text(b: &mut Vec<u8>, s: &str, size: usize) {
    let mut field = s.as_bytes().to_vec();
    field.resize(size, 0);
    b.extend_from_slice(&field);
}

/// A source that fails with an I/O error once reads reach a given offset.
pub struct BrokenSource {
    inner: Cursor<Vec<u8>>,
    limit: u64,
}

impl BrokenSource {
    pub fn new(data: Vec<u8>, limit: u64) -> Self {
        BrokenSource {
            inner: Cursor::new(data),
            limit,
        }
    }
}

impl Read for BrokenSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let pos = self.inner.position();
        if pos >= self.limit {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "source closed"));
        }
        let n = buf.len().min((self.limit - pos) as usize);
        self.inner.read(&mut buf[..n])
    }
}

impl Seek for BrokenSource {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.inner.seek(pos)
    }
}
