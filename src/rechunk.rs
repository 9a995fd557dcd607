// rechunk.rs
//
// Copyright (c) 2019-2025  Douglas Lau
//
//! Gathering small fragments into larger chunks
use crate::error::Result;
use std::mem;

/// Buffer which releases chunks of a minimum size
#[derive(Debug)]
pub struct Rechunker {
    /// Minimum chunk size, in bytes
    min_chunk_sz: usize,
    /// Accumulated fragments
    buffer: Vec<u8>,
}

impl Rechunker {
    /// Create a new rechunker
    pub fn new(min_chunk_sz: usize) -> Self {
        Rechunker {
            min_chunk_sz,
            buffer: Vec::with_capacity(min_chunk_sz),
        }
    }

    /// Push one fragment.
    ///
    /// Returns a chunk once at least the minimum size has accumulated.
    pub fn push(&mut self, frag: &[u8]) -> Option<Vec<u8>> {
        self.buffer.extend_from_slice(frag);
        if !self.buffer.is_empty() && self.buffer.len() >= self.min_chunk_sz {
            trace!("chunk: {} bytes", self.buffer.len());
            let cap = self.min_chunk_sz;
            Some(mem::replace(&mut self.buffer, Vec::with_capacity(cap)))
        } else {
            None
        }
    }

    /// Take any remaining (short) chunk
    pub fn finish(&mut self) -> Option<Vec<u8>> {
        if self.buffer.is_empty() {
            None
        } else {
            trace!("last chunk: {} bytes", self.buffer.len());
            Some(mem::take(&mut self.buffer))
        }
    }
}

/// An `Iterator` of de-animated GIF chunks.
///
/// Every chunk except the last is at least the minimum chunk size.
///
/// Created with Deanimator.[into_chunks].
///
/// [into_chunks]: struct.Deanimator.html#method.into_chunks
pub struct Chunks<I> {
    /// Fragment iterator
    frags: I,
    /// Chunk buffer
    rechunker: Rechunker,
    /// Flush short chunk at end
    flush_tail: bool,
    /// Iteration finished
    done: bool,
}

impl<I> Chunks<I>
where
    I: Iterator<Item = Result<Vec<u8>>>,
{
    /// Create a new chunk iterator
    pub(crate) fn new(
        frags: I,
        min_chunk_sz: usize,
        flush_tail: bool,
    ) -> Self {
        Chunks {
            frags,
            rechunker: Rechunker::new(min_chunk_sz),
            flush_tail,
            done: false,
        }
    }
}

impl<I> Iterator for Chunks<I>
where
    I: Iterator<Item = Result<Vec<u8>>>,
{
    type Item = Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            match self.frags.next() {
                Some(Ok(frag)) => {
                    if let Some(chunk) = self.rechunker.push(&frag) {
                        return Some(Ok(chunk));
                    }
                }
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(e));
                }
                None => {
                    self.done = true;
                    let tail = self.rechunker.finish();
                    if self.flush_tail {
                        return tail.map(Ok);
                    } else if let Some(t) = tail {
                        debug!("dropping last chunk: {} bytes", t.len());
                    }
                }
            }
        }
        None
    }
}
