//! Streaming CTR-mode encryption and decryption over [`std::io::Read`].
//!
//! [`CtrReader`] wraps any reader and applies a counter-mode keystream to
//! the bytes flowing through it, one cipher block at a time, so arbitrarily
//! large streams are transformed in constant memory. The per-block IV comes
//! from a [`ctr_iv`] engine; the block-cipher primitive is supplied by the
//! caller through the [`cipher`] crate's traits and is never implemented
//! here. Because CTR is an involution, the same reader type both encrypts
//! and decrypts.
//!
//! When the underlying reader is seekable the wrapper is too, limited to
//! block-aligned positions (a CTR keystream block can be regenerated for
//! any block index, but only whole blocks).
//!
//! # Example
//! ```
//! use aes::Aes128;
//! use aes::cipher::KeyInit;
//! use ctr_iv::CtrIv;
//! use ctr_stream::CtrReader;
//! use std::io::{Cursor, Read};
//!
//! let key = [0x42; 16];
//! let iv = [0x24; 16];
//! let plaintext = b"attack at dawn".to_vec();
//!
//! let mut encryptor = CtrReader::new(
//!     Cursor::new(plaintext.clone()),
//!     Aes128::new(&key.into()),
//!     CtrIv::new(&iv.into()),
//! );
//! let mut ciphertext = Vec::new();
//! encryptor.read_to_end(&mut ciphertext)?;
//! assert_eq!(ciphertext.len(), plaintext.len());
//!
//! let mut decryptor = CtrReader::new(
//!     Cursor::new(ciphertext),
//!     Aes128::new(&key.into()),
//!     CtrIv::new(&iv.into()),
//! );
//! let mut recovered = Vec::new();
//! decryptor.read_to_end(&mut recovered)?;
//! assert_eq!(recovered, plaintext);
//! # Ok::<(), std::io::Error>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub use cipher;
pub use ctr_iv;

use cipher::{consts::U16, BlockEncrypt};
use ctr_iv::{BLOCK_SIZE, CtrIv, InitializationVector};
use std::io::{self, Read, Seek, SeekFrom};

#[inline(always)]
fn xor(buf: &mut [u8], key: &[u8]) {
    debug_assert_eq!(buf.len(), key.len());
    for (a, b) in buf.iter_mut().zip(key) {
        *a ^= *b;
    }
}

/// Reader adapter that applies a CTR keystream to the wrapped stream.
///
/// Encrypts when wrapped around plaintext, decrypts when wrapped around
/// ciphertext. Keystream blocks are produced by encrypting the IV engine's
/// current IV with the block cipher `C`; the engine is advanced once per
/// block actually consumed from the inner reader.
pub struct CtrReader<R, C, V = CtrIv> {
    inner: R,
    cipher: C,
    iv: V,
    /// Transformed bytes not yet handed to the caller.
    buffer: [u8; BLOCK_SIZE],
    buf_len: usize,
    buf_pos: usize,
    /// Logical byte position within the transformed stream.
    pos: u64,
    eof: bool,
}

impl<R, C, V> CtrReader<R, C, V>
where
    R: Read,
    C: BlockEncrypt<BlockSize = U16>,
    V: InitializationVector,
{
    /// Wraps `inner`, transforming its bytes with the given cipher
    /// instance and IV engine.
    pub fn new(inner: R, cipher: C, iv: V) -> Self {
        Self {
            inner,
            cipher,
            iv,
            buffer: [0; BLOCK_SIZE],
            buf_len: 0,
            buf_pos: 0,
            pos: 0,
            eof: false,
        }
    }

    /// Unwraps the inner reader.
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Pulls up to one block from the inner reader and transforms it in
    /// place. Leaves the buffer empty at end of stream.
    fn fill_block(&mut self) -> io::Result<()> {
        let mut filled = 0;
        while filled < BLOCK_SIZE {
            match self.inner.read(&mut self.buffer[filled..BLOCK_SIZE]) {
                Ok(0) => {
                    self.eof = true;
                    break;
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }

        self.buf_pos = 0;
        self.buf_len = filled;
        if filled == 0 {
            return Ok(());
        }

        let mut keystream = self.iv.current_iv();
        self.cipher.encrypt_block(&mut keystream);
        xor(&mut self.buffer[..filled], &keystream[..filled]);
        self.iv.update(&self.buffer[..filled]);
        Ok(())
    }
}

impl<R, C, V> Read for CtrReader<R, C, V>
where
    R: Read,
    C: BlockEncrypt<BlockSize = U16>,
    V: InitializationVector,
{
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        if self.buf_pos == self.buf_len {
            if self.eof {
                return Ok(0);
            }
            self.fill_block()?;
            if self.buf_len == 0 {
                return Ok(0);
            }
        }

        let n = (self.buf_len - self.buf_pos).min(buf.len());
        buf[..n].copy_from_slice(&self.buffer[self.buf_pos..self.buf_pos + n]);
        self.buf_pos += n;
        self.pos += n as u64;
        Ok(n)
    }
}

impl<R, C, V> Seek for CtrReader<R, C, V>
where
    R: Read + Seek,
    C: BlockEncrypt<BlockSize = U16>,
    V: InitializationVector,
{
    /// Seeks both the IV engine and the inner reader to the same absolute
    /// byte offset, which must be block-aligned.
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let target = match pos {
            SeekFrom::Start(offset) => offset,
            SeekFrom::Current(offset) => {
                self.pos.checked_add_signed(offset).ok_or_else(|| {
                    io::Error::new(
                        io::ErrorKind::InvalidInput,
                        "invalid seek to a negative or overflowing position",
                    )
                })?
            }
            SeekFrom::End(_) => {
                return Err(io::Error::new(
                    io::ErrorKind::Unsupported,
                    ctr_iv::SeekError::FromEnd,
                ));
            }
        };

        if target == self.pos {
            return Ok(target);
        }
        if !self.iv.supports_arbitrary_seeking() {
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "cipher mode does not support seeking",
            ));
        }

        self.iv
            .seek(ctr_iv::SeekFrom::Start(target))
            .map_err(|e| io::Error::new(io::ErrorKind::Unsupported, e))?;
        self.inner.seek(SeekFrom::Start(target))?;
        self.buf_pos = 0;
        self.buf_len = 0;
        self.eof = false;
        self.pos = target;
        Ok(target)
    }
}
