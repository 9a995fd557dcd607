// source.rs
//
// Copyright (c) 2019-2025  Douglas Lau
//
//! Chunk sources
use crate::error::Result;
use std::io::{ErrorKind, Read};

/// Default read size, in bytes
pub const READ_SZ: usize = 512;

/// An `Iterator` of chunks read from a `Read`er.
///
/// Each chunk is at most the read size, and never empty.
pub struct ReadChunks<R: Read> {
    /// Reader for input data
    reader: R,
    /// Read size
    read_sz: usize,
    /// End of file or error reached
    done: bool,
}

impl<R: Read> ReadChunks<R> {
    /// Create chunks with the default read size
    pub fn new(reader: R) -> Self {
        Self::with_read_sz(reader, READ_SZ)
    }

    /// Create chunks with a given read size
    pub fn with_read_sz(reader: R, read_sz: usize) -> Self {
        ReadChunks {
            reader,
            read_sz: read_sz.max(1),
            done: false,
        }
    }
}

impl<R: Read> Iterator for ReadChunks<R> {
    type Item = Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut buf = vec![0; self.read_sz];
        while !self.done {
            match self.reader.read(&mut buf) {
                Ok(0) => self.done = true, // EOF
                Ok(n) => {
                    buf.truncate(n);
                    return Some(Ok(buf));
                }
                Err(ref e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::Error;
    use std::io::{self, Cursor};

    /// Reader which is interrupted before every read
    struct Flaky<R> {
        reader: R,
        interrupt: bool,
    }

    impl<R: Read> Read for Flaky<R> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.interrupt = !self.interrupt;
            if self.interrupt {
                Err(io::Error::new(ErrorKind::Interrupted, "again"))
            } else {
                self.reader.read(buf)
            }
        }
    }

    /// Reader which fails after one read
    struct Broken(bool);

    impl Read for Broken {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.0 {
                Err(io::Error::new(ErrorKind::BrokenPipe, "gone"))
            } else {
                self.0 = true;
                buf[0] = 0x47;
                Ok(1)
            }
        }
    }

    #[test]
    fn chunk_sizes() {
        let data: Vec<u8> = (0..=255).collect();
        let chunks: Vec<Vec<u8>> = ReadChunks::with_read_sz(&data[..], 100)
            .collect::<Result<_>>()
            .unwrap();
        let lens: Vec<usize> = chunks.iter().map(|c| c.len()).collect();
        assert_eq!(lens, vec![100, 100, 56]);
        assert_eq!(chunks.concat(), data);
    }

    #[test]
    fn interrupted() {
        let reader = Flaky {
            reader: Cursor::new(vec![7; 1000]),
            interrupt: false,
        };
        let chunks: Vec<Vec<u8>> =
            ReadChunks::new(reader).collect::<Result<_>>().unwrap();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks.concat(), vec![7; 1000]);
    }

    #[test]
    fn read_error() {
        let mut chunks = ReadChunks::new(Broken(false));
        assert_eq!(chunks.next().unwrap().unwrap(), vec![0x47]);
        assert!(matches!(chunks.next(), Some(Err(Error::Io(_)))));
        assert!(chunks.next().is_none());
    }

    #[test]
    fn empty() {
        assert!(ReadChunks::new(io::empty()).next().is_none());
    }
}
