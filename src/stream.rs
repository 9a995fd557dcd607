// stream.rs
//
// Copyright (c) 2019-2025  Douglas Lau
//
//! Async `Stream` adapter
use crate::deanimate::Transducer;
use crate::error::{Error, Result};
use crate::private::MIN_CHUNK_SZ;
use crate::rechunk::Rechunker;
use futures_util::stream::Stream;
use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{ready, Context, Poll};

/// A `Stream` of de-animated GIF chunks.
///
/// Wraps a `Stream` of input chunks, such as an HTTP response body.  Input
/// is only polled when no output chunk is ready, and polling stops once
/// the first frame is complete.
///
/// ## Example
/// ```
/// # futures::executor::block_on(async {
/// use futures::stream::{self, TryStreamExt};
/// use stillgif::DeanimateStream;
///
/// # let gif: Vec<u8> = vec![
/// #   0x47, 0x49, 0x46, 0x38, 0x39, 0x61, 0x01, 0x00, 0x01, 0x00, 0x00,
/// #   0x00, 0x00, 0x2C, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00,
/// #   0x00, 0x02, 0x02, 0x4C, 0x01, 0x00, 0x3B,
/// # ];
/// let body = stream::iter(gif.chunks(8).map(Ok));
/// let chunks: Vec<Vec<u8>> = DeanimateStream::new(body)
///     .min_chunk_sz(16)
///     .try_collect()
///     .await?;
/// # assert_eq!(chunks.concat(), gif);
/// # Ok::<(), stillgif::Error>(())
/// # }).unwrap();
/// ```
pub struct DeanimateStream<S> {
    /// Input chunk stream
    inner: S,
    /// De-animation state machine
    transducer: Transducer,
    /// Chunk buffer
    rechunker: Rechunker,
    /// Flush short chunk at end
    flush_tail: bool,
    /// Fragments produced by the transducer
    frags: VecDeque<Vec<u8>>,
    /// Chunks ready to be returned
    ready: VecDeque<Vec<u8>>,
    /// Error to return after ready chunks
    error: Option<Error>,
    /// No more input will be polled
    done: bool,
}

impl<S, B> DeanimateStream<S>
where
    S: Stream<Item = Result<B>> + Unpin,
    B: AsRef<[u8]>,
{
    /// Create a new de-animating stream
    pub fn new(inner: S) -> Self {
        DeanimateStream {
            inner,
            transducer: Transducer::new(),
            rechunker: Rechunker::new(MIN_CHUNK_SZ),
            flush_tail: true,
            frags: VecDeque::new(),
            ready: VecDeque::new(),
            error: None,
            done: false,
        }
    }

    /// Set the minimum output chunk size (in bytes).
    pub fn min_chunk_sz(mut self, min_chunk_sz: usize) -> Self {
        self.rechunker = Rechunker::new(min_chunk_sz);
        self
    }

    /// Set whether a last chunk shorter than the minimum size is returned.
    pub fn flush_tail(mut self, flush_tail: bool) -> Self {
        self.flush_tail = flush_tail;
        self
    }

    /// Get the state machine (for statistics)
    pub fn transducer(&self) -> &Transducer {
        &self.transducer
    }

    /// Feed one input chunk
    fn feed(&mut self, chunk: &[u8]) {
        let res = self.transducer.consume(chunk, &mut self.frags);
        self.rechunk();
        match res {
            Err(e) => {
                self.error = Some(e);
                self.done = true;
            }
            Ok(()) if self.transducer.is_done() => self.end(),
            Ok(()) => (),
        }
    }

    /// Move fragments into the rechunker
    fn rechunk(&mut self) {
        while let Some(frag) = self.frags.pop_front() {
            if let Some(chunk) = self.rechunker.push(&frag) {
                self.ready.push_back(chunk);
            }
        }
    }

    /// End of input
    fn end(&mut self) {
        if let Some(b) = self.transducer.finish() {
            self.frags.push_back(b);
            self.rechunk();
        }
        if let Some(tail) = self.rechunker.finish() {
            if self.flush_tail {
                self.ready.push_back(tail);
            } else {
                debug!("dropping last chunk: {} bytes", tail.len());
            }
        }
        self.done = true;
    }
}

impl<S, B> Stream for DeanimateStream<S>
where
    S: Stream<Item = Result<B>> + Unpin,
    B: AsRef<[u8]>,
{
    type Item = Result<Vec<u8>>;

    fn poll_next(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Self::Item>> {
        let this = &mut *self;
        loop {
            if let Some(chunk) = this.ready.pop_front() {
                return Poll::Ready(Some(Ok(chunk)));
            }
            if let Some(e) = this.error.take() {
                return Poll::Ready(Some(Err(e)));
            }
            if this.done {
                return Poll::Ready(None);
            }
            match ready!(Pin::new(&mut this.inner).poll_next(cx)) {
                Some(Ok(chunk)) => this.feed(chunk.as_ref()),
                Some(Err(e)) => {
                    this.error = Some(e);
                    this.done = true;
                }
                None => this.end(),
            }
        }
    }
}
