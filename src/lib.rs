// lib.rs      stillgif crate.
//
// Copyright (c) 2019-2025  Douglas Lau
//
//! Streaming GIF de-animator.
//!
//! Rewrites a GIF as it passes through, keeping only the first frame and
//! dropping the `NETSCAPE2.0` looping extension.  Input can be split into
//! chunks at arbitrary boundaries; output is produced as soon as each
//! structural unit has been read.
#![forbid(unsafe_code)]

#[macro_use]
extern crate log;

pub mod block;
mod deanimate;
mod error;
mod private;
mod rechunk;
#[cfg(test)]
mod sample;
mod source;
#[cfg(feature = "stream")]
mod stream;

pub use crate::deanimate::{Fragments, Transducer};
pub use crate::error::{Error, Result};
pub use crate::private::{deanimate, Deanimator, MIN_CHUNK_SZ};
pub use crate::rechunk::{Chunks, Rechunker};
pub use crate::source::{ReadChunks, READ_SZ};
#[cfg(feature = "stream")]
pub use crate::stream::DeanimateStream;
