//! Counter-mode initialization vector engine for streaming block ciphers.
//!
//! A CTR keystream is produced by encrypting a per-block IV: the base IV
//! plus the index of the block, taken as a 128-bit big-endian integer.
//! [`CtrIv`] owns that arithmetic. It tracks how many blocks of a stream
//! have been processed, hands out the IV for the next block on demand, and
//! can jump to any block-aligned offset without touching the blocks in
//! between. It never invokes the block cipher itself; the driver feeding
//! it is expected to do that.
//!
//! Mode-specific IV handling is abstracted behind the
//! [`InitializationVector`] trait so that a streaming driver can treat
//! counter mode and chained modes uniformly, querying capabilities such as
//! [`supports_arbitrary_seeking`](InitializationVector::supports_arbitrary_seeking)
//! instead of matching on concrete types.
//!
//! # Example
//! ```
//! use ctr_iv::{CtrIv, InitializationVector, SeekFrom};
//! use hex_literal::hex;
//!
//! let mut iv = CtrIv::new_from_slice(&hex!("f0f1f2f3f4f5f6f7f8f9fafbfcfdfeff")).unwrap();
//! assert_eq!(iv.current_iv()[..], hex!("f0f1f2f3f4f5f6f7f8f9fafbfcfdfeff")[..]);
//!
//! // one 16-byte block was consumed by the driver
//! iv.advance(16);
//! assert_eq!(iv.current_iv()[..], hex!("f0f1f2f3f4f5f6f7f8f9fafbfcfdff00")[..]);
//!
//! // counter mode can seek to any block-aligned offset
//! iv.seek(SeekFrom::Start(5 * 16)).unwrap();
//! assert_eq!(iv.current_iv()[..], hex!("f0f1f2f3f4f5f6f7f8f9fafbfcfdff04")[..]);
//!
//! // misaligned offsets are rejected before any state changes
//! assert!(iv.seek(SeekFrom::Start(5)).is_err());
//! ```

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

#[cfg(feature = "std")]
extern crate std;

pub use cipher;

mod ctr;
mod errors;

pub use crate::ctr::CtrIv;
pub use crate::errors::SeekError;
pub use cipher::InvalidLength;

use cipher::{consts::U16, generic_array::GenericArray};
use core::fmt;

/// Size in bytes of one cipher block.
pub const BLOCK_SIZE: usize = 16;

/// Size in bytes of an initialization vector.
pub const IV_SIZE: usize = 16;

/// Initialization vector value handed to the block-cipher primitive.
pub type Iv = GenericArray<u8, U16>;

/// Block-mode tag, usable for building cipher method names such as
/// `AES-128-CTR`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CipherMode {
    /// Counter mode.
    Ctr,
}

impl CipherMode {
    /// Uppercase mode name.
    pub fn as_str(self) -> &'static str {
        match self {
            CipherMode::Ctr => "CTR",
        }
    }
}

impl fmt::Display for CipherMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position within the logical byte stream to seek to.
///
/// Mirrors the shape of [`std::io::SeekFrom`] so that driver code can map
/// positions one-to-one. All offsets are byte counts and must be multiples
/// of [`BLOCK_SIZE`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SeekFrom {
    /// Absolute byte offset from the start of the stream.
    Start(u64),
    /// Byte offset relative to the current position. Must not be negative:
    /// the engine only ever moves forward.
    Current(i64),
    /// Byte offset relative to the end of the stream. Always rejected: the
    /// engine does not know the stream length.
    End(i64),
}

/// Per-mode IV handling strategy.
///
/// One implementation exists per cipher mode; the streaming driver holds a
/// value of this trait and never needs to know which mode it is driving.
/// The expected call discipline for block *k* is: [`current_iv`] to obtain
/// the IV, run the block-cipher primitive, then [`update`] (or [`advance`])
/// exactly once with the number of bytes just transformed.
///
/// [`current_iv`]: InitializationVector::current_iv
/// [`update`]: InitializationVector::update
/// [`advance`]: InitializationVector::advance
pub trait InitializationVector {
    /// Mode tag for this IV strategy.
    fn cipher_mode(&self) -> CipherMode;

    /// Whether ciphertext must be padded to a whole number of blocks.
    ///
    /// Stream-cipher modes return `false`: ciphertext length equals
    /// plaintext length.
    fn requires_padding(&self) -> bool;

    /// Whether any block-aligned offset can be computed without processing
    /// the intervening blocks.
    ///
    /// When this returns `false` the driver must emulate seeking by
    /// replaying the stream from the start.
    fn supports_arbitrary_seeking(&self) -> bool;

    /// IV for the next block, reflecting every advance and seek so far.
    fn current_iv(&self) -> Iv;

    /// Records that `byte_count` bytes of the stream have been processed.
    ///
    /// A final short block still consumes one full counter increment:
    /// keystream is generated in whole blocks regardless of how many bytes
    /// of the last block are used.
    fn advance(&mut self, byte_count: u64);

    /// Moves to a block-aligned position in the logical stream.
    fn seek(&mut self, pos: SeekFrom) -> Result<(), SeekError>;

    /// Records that `block` has been processed. Equivalent to
    /// `advance(block.len())`; matches the driver's per-block call pattern.
    fn update(&mut self, block: &[u8]) {
        self.advance(block.len() as u64);
    }
}
