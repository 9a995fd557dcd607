// deanimate.rs
//
// Copyright (c) 2019-2025  Douglas Lau
//
//! Streaming GIF de-animation
use crate::block::*;
use crate::error::{Error, Result};
use std::collections::VecDeque;
use std::mem;

/// Parsing state, with the byte count wanted before each transition.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum State {
    HeaderLsd,
    GlobalColorTable,
    BlockHeader,
    ExtensionCode,
    ExtensionPayloadLen,
    ExtensionPayload,
    ExtensionSubBlockLen,
    ExtensionSubBlock,
    ImageDesc,
    LocalColorTable,
    ImageDataHeader,
    ImageData,
    Done,
    Failed(u8),
}

/// Incremental GIF de-animator.
///
/// Consumes a GIF in arbitrary chunks and produces fragments of a GIF
/// with only the first frame, and no looping extension.  A fragment is
/// produced as soon as the structural unit containing it has been read.
///
/// This is the state machine only; see [Fragments] for an `Iterator`.
///
/// [Fragments]: struct.Fragments.html
#[derive(Debug)]
pub struct Transducer {
    /// Current state
    state: State,
    /// Bytes wanted for the current state
    want: usize,
    /// Bytes read for the current state
    buffer: Vec<u8>,
    /// Extension segments held back until the extension is complete
    holdback: Vec<Vec<u8>>,
    /// Extension label
    ext_code: Option<ExtensionCode>,
    /// Index of extension payload within holdback
    ext_payload: Option<usize>,
    /// Total bytes consumed
    consumed: usize,
    /// Total bytes emitted
    emitted: usize,
    /// Extensions passed through
    exts_kept: usize,
    /// Extensions dropped
    exts_dropped: usize,
}

impl Default for Transducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Transducer {
    /// Create a new transducer, expecting a GIF header.
    pub fn new() -> Self {
        Transducer {
            state: State::HeaderLsd,
            want: HEADER_LSD_SZ,
            buffer: Vec::with_capacity(HEADER_LSD_SZ),
            holdback: vec![],
            ext_code: None,
            ext_payload: None,
            consumed: 0,
            emitted: 0,
            exts_kept: 0,
            exts_dropped: 0,
        }
    }

    /// Check if the retained frame has been completed
    pub fn is_done(&self) -> bool {
        self.state == State::Done
    }

    /// Get total bytes consumed from input
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Get total bytes emitted
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// Get count of extensions passed through
    pub fn extensions_kept(&self) -> usize {
        self.exts_kept
    }

    /// Get count of extensions dropped
    pub fn extensions_dropped(&self) -> usize {
        self.exts_dropped
    }

    /// Consume a chunk of input.
    ///
    /// Emitted fragments are appended to `out`.  Once the retained frame is
    /// complete, any remaining input is ignored.  After an error, every
    /// call returns the same error without consuming input.
    pub fn consume(
        &mut self,
        mut buf: &[u8],
        out: &mut VecDeque<Vec<u8>>,
    ) -> Result<()> {
        trace!("consume: got {}, want {}", buf.len(), self.wanted());
        loop {
            match self.state {
                State::Done => return Ok(()),
                State::Failed(code) => {
                    return Err(Error::InvalidBlockCode(code));
                }
                _ => (),
            }
            if self.buffer.len() == self.want {
                let b = mem::take(&mut self.buffer);
                self.transition(b, out)?;
                continue;
            }
            if buf.is_empty() {
                return Ok(());
            }
            let n = self.wanted().min(buf.len());
            self.buffer.extend_from_slice(&buf[..n]);
            self.consumed += n;
            buf = &buf[n..];
        }
    }

    /// Finish at end of input.
    ///
    /// If the input was truncated, the partial bytes read for the current
    /// state are returned as a best effort.  Nothing is returned after an
    /// error.
    pub fn finish(&mut self) -> Option<Vec<u8>> {
        match self.state {
            State::Done | State::Failed(_) => return None,
            _ => (),
        }
        if self.buffer.is_empty() {
            return None;
        }
        warn!(
            "truncated in {:?}: flushing {} of {} bytes",
            self.state,
            self.buffer.len(),
            self.want
        );
        let b = mem::take(&mut self.buffer);
        self.emitted += b.len();
        Some(b)
    }

    /// Get number of bytes still wanted for current state
    fn wanted(&self) -> usize {
        self.want - self.buffer.len()
    }

    /// Move to the next state
    fn next_state(&mut self, state: State, want: usize) {
        debug!("  state  : {:?} (want {})", state, want);
        self.state = state;
        self.want = want;
        self.buffer = Vec::with_capacity(want);
    }

    /// Emit one fragment
    fn emit(&mut self, b: Vec<u8>, out: &mut VecDeque<Vec<u8>>) {
        if !b.is_empty() {
            self.emitted += b.len();
            out.push_back(b);
        }
    }

    /// Transition from the current state with all wanted bytes
    fn transition(
        &mut self,
        b: Vec<u8>,
        out: &mut VecDeque<Vec<u8>>,
    ) -> Result<()> {
        use self::State::*;
        match self.state {
            HeaderLsd => self.header_lsd(b, out),
            GlobalColorTable => {
                self.emit(b, out);
                self.next_state(BlockHeader, 1);
            }
            BlockHeader => self.block_header(b, out)?,
            ExtensionCode => self.extension_code(b),
            ExtensionPayloadLen => {
                let len: usize = b[0].into();
                self.holdback.push(b);
                self.next_state(ExtensionPayload, len);
            }
            ExtensionPayload => {
                self.ext_payload = Some(self.holdback.len());
                self.holdback.push(b);
                self.next_state(ExtensionSubBlockLen, 1);
            }
            ExtensionSubBlockLen => self.extension_sub_block_len(b, out),
            ExtensionSubBlock => {
                self.holdback.push(b);
                self.next_state(ExtensionSubBlockLen, 1);
            }
            ImageDesc => self.image_desc(b, out),
            LocalColorTable => {
                self.emit(b, out);
                self.next_state(ImageDataHeader, 2);
            }
            ImageDataHeader => self.image_data_header(b, out),
            ImageData => {
                self.emit(b, out);
                self.next_state(ImageDataHeader, 1);
            }
            Done | Failed(_) => (),
        }
        Ok(())
    }

    /// Header and logical screen descriptor read
    fn header_lsd(&mut self, b: Vec<u8>, out: &mut VecDeque<Vec<u8>>) {
        let sz = match ScreenDesc::new(&b) {
            Some(desc) => {
                if !desc.is_gif() {
                    warn!("unexpected signature: {:?}", &b[..6]);
                }
                desc.color_table_config().size_bytes()
            }
            None => 0,
        };
        self.emit(b, out);
        if sz > 0 {
            self.next_state(State::GlobalColorTable, sz);
        } else {
            self.next_state(State::BlockHeader, 1);
        }
    }

    /// Block header read
    fn block_header(
        &mut self,
        b: Vec<u8>,
        out: &mut VecDeque<Vec<u8>>,
    ) -> Result<()> {
        match BlockCode::from_u8(b[0]) {
            Some(BlockCode::Extension_) => {
                self.holdback = vec![b];
                self.next_state(State::ExtensionCode, 1);
            }
            Some(BlockCode::ImageDesc_) => {
                self.emit(b, out);
                self.next_state(State::ImageDesc, IMAGE_DESC_SZ);
            }
            _ => {
                warn!("invalid block code: 0x{:02X}", b[0]);
                self.next_state(State::Failed(b[0]), 0);
                return Err(Error::InvalidBlockCode(b[0]));
            }
        }
        Ok(())
    }

    /// Extension label read
    fn extension_code(&mut self, b: Vec<u8>) {
        let code = ExtensionCode::from(b[0]);
        debug!("extension: {:?} (0x{:02X})", code, u8::from(code));
        self.ext_code = Some(code);
        self.ext_payload = None;
        self.holdback.push(b);
        // Comment payload is just sub-blocks, which may be empty
        if code == ExtensionCode::Comment_ {
            self.next_state(State::ExtensionSubBlockLen, 1);
        } else {
            self.next_state(State::ExtensionPayloadLen, 1);
        }
    }

    /// Extension sub-block length read
    fn extension_sub_block_len(
        &mut self,
        b: Vec<u8>,
        out: &mut VecDeque<Vec<u8>>,
    ) {
        let len: usize = b[0].into();
        self.holdback.push(b);
        if len > 0 {
            self.next_state(State::ExtensionSubBlock, len);
            return;
        }
        let holdback = mem::take(&mut self.holdback);
        if self.is_looping_ext(&holdback) {
            debug!("dropping looping extension");
            self.exts_dropped += 1;
        } else {
            self.exts_kept += 1;
            for seg in holdback {
                self.emit(seg, out);
            }
        }
        self.ext_code = None;
        self.ext_payload = None;
        self.next_state(State::BlockHeader, 1);
    }

    /// Check if held back extension is a looping application extension
    fn is_looping_ext(&self, holdback: &[Vec<u8>]) -> bool {
        match (self.ext_code, self.ext_payload) {
            (Some(ExtensionCode::Application_), Some(i)) => {
                holdback.get(i).map_or(false, |p| is_looping(p))
            }
            _ => false,
        }
    }

    /// Image descriptor read
    fn image_desc(&mut self, b: Vec<u8>, out: &mut VecDeque<Vec<u8>>) {
        let sz = match ImageDesc::new(&b) {
            Some(desc) => {
                debug!(
                    "image: {}x{} at {},{} (interlaced: {})",
                    desc.width(),
                    desc.height(),
                    desc.left(),
                    desc.top(),
                    desc.interlaced()
                );
                desc.color_table_config().size_bytes()
            }
            None => 0,
        };
        self.emit(b, out);
        if sz > 0 {
            self.next_state(State::LocalColorTable, sz);
        } else {
            // LZW minimum code size + first sub-block length
            self.next_state(State::ImageDataHeader, 2);
        }
    }

    /// Image data sub-block length read
    fn image_data_header(&mut self, b: Vec<u8>, out: &mut VecDeque<Vec<u8>>) {
        let len: usize = b.last().copied().unwrap_or_default().into();
        self.emit(b, out);
        if len > 0 {
            self.next_state(State::ImageData, len);
        } else {
            self.emit(BlockCode::Trailer_.signature().to_vec(), out);
            self.next_state(State::Done, 0);
        }
    }
}

/// An `Iterator` of de-animated GIF fragments.
///
/// Fragments are produced with the granularity of GIF structural units,
/// some as small as one byte.  Use [Chunks] to gather them into larger
/// chunks.
///
/// Created with Deanimator.[into_fragments].
///
/// [Chunks]: struct.Chunks.html
/// [into_fragments]: struct.Deanimator.html#method.into_fragments
pub struct Fragments<I> {
    /// Input chunks
    chunks: I,
    /// De-animation state machine
    transducer: Transducer,
    /// Fragments ready to be returned
    pending: VecDeque<Vec<u8>>,
    /// Error to return after pending fragments
    error: Option<Error>,
    /// No more input will be read
    done: bool,
}

impl<I, B> Fragments<I>
where
    I: Iterator<Item = Result<B>>,
    B: AsRef<[u8]>,
{
    /// Create a new fragment iterator
    pub(crate) fn new(chunks: I) -> Self {
        Fragments {
            chunks,
            transducer: Transducer::new(),
            pending: VecDeque::new(),
            error: None,
            done: false,
        }
    }

    /// Get the state machine (for statistics)
    pub fn transducer(&self) -> &Transducer {
        &self.transducer
    }

    /// Pull one chunk of input
    fn pull(&mut self) {
        match self.chunks.next() {
            Some(Ok(chunk)) => {
                let tx = &mut self.transducer;
                if let Err(e) = tx.consume(chunk.as_ref(), &mut self.pending) {
                    self.error = Some(e);
                    self.done = true;
                } else if self.transducer.is_done() {
                    self.done = true;
                }
            }
            Some(Err(e)) => {
                self.error = Some(e);
                self.done = true;
            }
            None => {
                if let Some(b) = self.transducer.finish() {
                    self.pending.push_back(b);
                }
                self.done = true;
            }
        }
    }
}

impl<I, B> Iterator for Fragments<I>
where
    I: Iterator<Item = Result<B>>,
    B: AsRef<[u8]>,
{
    type Item = Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(frag) = self.pending.pop_front() {
                return Some(Ok(frag));
            }
            if let Some(e) = self.error.take() {
                return Some(Err(e));
            }
            if self.done {
                return None;
            }
            self.pull();
        }
    }
}
