// private.rs
//
// Copyright (c) 2019-2025  Douglas Lau
//
//! Private module for top-level items
use crate::deanimate::Fragments;
use crate::rechunk::Chunks;
use crate::source::ReadChunks;
use crate::Result;
use std::io::Read;

/// Default minimum chunk size, in bytes
pub const MIN_CHUNK_SZ: usize = 1024;

/// GIF de-animator
///
/// Rewrites a GIF, one chunk at a time, keeping only the first frame and
/// removing the looping extension.  Neither the input nor the output is
/// ever held in memory all at once.
///
/// Can be converted to one of two `Iterator`s:
/// * [into_iter] / [into_chunks] for chunks of a minimum size
/// * [into_fragments] for fragments, as small as one byte
///
/// ## Example: De-animate a GIF
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// # let gif = &[
/// #   0x47, 0x49, 0x46, 0x38, 0x39, 0x61, 0x02, 0x00,
/// #   0x02, 0x00, 0x80, 0x01, 0x00, 0x00, 0x00, 0x00,
/// #   0xff, 0xff, 0xff, 0x2c, 0x00, 0x00, 0x00, 0x00,
/// #   0x02, 0x00, 0x02, 0x00, 0x00, 0x02, 0x03, 0x0c,
/// #   0x10, 0x05, 0x00, 0x3b,
/// # ][..];
/// use stillgif::Deanimator;
///
/// // ... open a `File` as "gif"
/// let mut still = vec![];
/// for chunk in Deanimator::from_reader(gif) {
///     // was there an error?
///     still.extend(chunk?);
/// }
/// # assert_eq!(&still[..], gif);
/// # Ok(())
/// # }
/// ```
///
/// [into_chunks]: struct.Deanimator.html#method.into_chunks
/// [into_fragments]: struct.Deanimator.html#method.into_fragments
/// [into_iter]: struct.Deanimator.html#method.into_iter
pub struct Deanimator<I> {
    /// Input chunks
    chunks: I,
    /// Minimum output chunk size, in bytes
    min_chunk_sz: usize,
    /// Flush short chunk at end
    flush_tail: bool,
}

impl<R: Read> Deanimator<ReadChunks<R>> {
    /// Create a new de-animator reading from a `Read`er.
    pub fn from_reader(reader: R) -> Self {
        Self::new(ReadChunks::new(reader))
    }
}

impl<I, B> Deanimator<I>
where
    I: Iterator<Item = Result<B>>,
    B: AsRef<[u8]>,
{
    /// Create a new de-animator from an `Iterator` of chunks.
    pub fn new(chunks: I) -> Self {
        Deanimator {
            chunks,
            min_chunk_sz: MIN_CHUNK_SZ,
            flush_tail: true,
        }
    }

    /// Set the minimum output chunk size (in bytes).
    pub fn min_chunk_sz(mut self, min_chunk_sz: usize) -> Self {
        self.min_chunk_sz = min_chunk_sz;
        self
    }

    /// Set whether a last chunk shorter than the minimum size is returned.
    ///
    /// When `false`, the output of a short GIF may be empty.
    pub fn flush_tail(mut self, flush_tail: bool) -> Self {
        self.flush_tail = flush_tail;
        self
    }

    /// Convert into a fragment `Iterator`.
    pub fn into_fragments(self) -> Fragments<I> {
        Fragments::new(self.chunks)
    }

    /// Convert into a chunk `Iterator`.
    pub fn into_chunks(self) -> Chunks<Fragments<I>> {
        let min_chunk_sz = self.min_chunk_sz;
        let flush_tail = self.flush_tail;
        Chunks::new(self.into_fragments(), min_chunk_sz, flush_tail)
    }
}

impl<I, B> IntoIterator for Deanimator<I>
where
    I: Iterator<Item = Result<B>>,
    B: AsRef<[u8]>,
{
    type Item = Result<Vec<u8>>;
    type IntoIter = Chunks<Fragments<I>>;

    /// Convert into a chunk `Iterator`
    fn into_iter(self) -> Self::IntoIter {
        self.into_chunks()
    }
}

/// De-animate a GIF from an `Iterator` of chunks.
///
/// Output chunks are at least `min_chunk_sz` bytes, except the last.
pub fn deanimate<C, B>(
    chunks: C,
    min_chunk_sz: usize,
) -> Chunks<Fragments<C::IntoIter>>
where
    C: IntoIterator<Item = Result<B>>,
    B: AsRef<[u8]>,
{
    Deanimator::new(chunks.into_iter())
        .min_chunk_sz(min_chunk_sz)
        .into_chunks()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::sample::*;
    use crate::Error;
    use std::error::Error as _;
    use std::io::Cursor;

    #[test]
    fn from_reader() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let gif = animated();
        let mut out = vec![];
        for chunk in Deanimator::from_reader(Cursor::new(&gif)) {
            out.extend(chunk?);
        }
        assert_eq!(out, animated_still());
        Ok(())
    }

    #[test]
    fn chunk_sizes() {
        let chunks = chunked(SIMPLE, 3).into_iter().map(Ok);
        let chunks: Vec<Vec<u8>> = Deanimator::new(chunks)
            .min_chunk_sz(16)
            .into_chunks()
            .collect::<Result<_>>()
            .unwrap();
        let (last, rest) = chunks.split_last().unwrap();
        assert!(rest.iter().all(|c| c.len() >= 16));
        assert!(!last.is_empty());
        assert_eq!(chunks.concat(), SIMPLE);
    }

    #[test]
    fn default_chunk_sz() {
        let chunks: Vec<Vec<u8>> = Deanimator::from_reader(SIMPLE)
            .into_iter()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(chunks, vec![SIMPLE.to_vec()]);
    }

    #[test]
    fn short_tail_dropped() {
        let mut chunks = Deanimator::from_reader(SIMPLE)
            .flush_tail(false)
            .into_chunks();
        assert!(chunks.next().is_none());
        let chunks: Vec<Vec<u8>> = Deanimator::from_reader(SIMPLE)
            .min_chunk_sz(8)
            .flush_tail(false)
            .into_iter()
            .collect::<Result<_>>()
            .unwrap();
        assert!(chunks.iter().all(|c| c.len() >= 8));
        assert!(SIMPLE.starts_with(&chunks.concat()));
    }

    #[test]
    fn fragments() {
        let frags: Vec<Vec<u8>> = Deanimator::from_reader(&MINIMAL[..])
            .into_fragments()
            .collect::<Result<_>>()
            .unwrap();
        // header, image desc, LZW + len, data, terminator, trailer
        let lens: Vec<usize> = frags.iter().map(|f| f.len()).collect();
        assert_eq!(lens, vec![13, 1, 9, 2, 3, 1, 1]);
        assert_eq!(frags.concat(), MINIMAL);
    }

    #[test]
    fn invalid() {
        let mut gif = MINIMAL[..13].to_vec();
        gif.push(0xFF);
        let mut chunks = deanimate(vec![Ok(gif)], 4);
        assert_eq!(chunks.next().unwrap().unwrap(), &MINIMAL[..13]);
        let err = chunks.next().unwrap().unwrap_err();
        assert!(matches!(err, Error::InvalidBlockCode(0xFF)));
        assert!(err.source().is_none());
        assert!(chunks.next().is_none());
    }

    #[test]
    fn one_byte_chunks() {
        let gif = animated();
        let a: Vec<u8> = deanimate(chunked(&gif, 1).into_iter().map(Ok), 1)
            .collect::<Result<Vec<_>>>()
            .unwrap()
            .concat();
        let b: Vec<u8> = deanimate(vec![Ok(gif)], 1)
            .collect::<Result<Vec<_>>>()
            .unwrap()
            .concat();
        assert_eq!(a, b);
        assert_eq!(a, animated_still());
    }
}
