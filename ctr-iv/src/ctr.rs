//! Counter-mode IV engine.

use crate::errors::SeekError;
use crate::{BLOCK_SIZE, CipherMode, InitializationVector, Iv, IV_SIZE, SeekFrom};
use cipher::InvalidLength;

/// Number of 16-bit words in an IV.
const IV_WORDS: usize = IV_SIZE / 2;

/// Counter-mode IV engine.
///
/// Holds the base IV and a block counter, both as eight big-endian 16-bit
/// words. The IV for the next block is their 128-bit sum; overflow out of
/// the most significant word wraps silently, matching the fixed width of
/// the IV itself.
#[derive(Clone, Debug)]
pub struct CtrIv {
    /// Base IV, fixed at construction.
    iv: [u16; IV_WORDS],
    /// Blocks processed since stream start or the last absolute seek.
    ctr_offset: [u16; IV_WORDS],
}

impl CtrIv {
    /// Creates an engine from a 16-byte IV, with the counter at zero.
    pub fn new(iv: &Iv) -> Self {
        let mut words = [0u16; IV_WORDS];
        for (word, chunk) in words.iter_mut().zip(iv.chunks_exact(2)) {
            *word = u16::from_be_bytes(chunk.try_into().unwrap());
        }
        Self {
            iv: words,
            ctr_offset: [0; IV_WORDS],
        }
    }

    /// Creates an engine from an IV given as a byte slice.
    ///
    /// Fails if the slice is not exactly [`IV_SIZE`] bytes long.
    pub fn new_from_slice(iv: &[u8]) -> Result<Self, InvalidLength> {
        if iv.len() != IV_SIZE {
            return Err(InvalidLength);
        }
        Ok(Self::new(Iv::from_slice(iv)))
    }

    /// Adds `blocks` to the counter in place, least significant word
    /// first, carrying toward word 0. Carry out of word 0 is discarded.
    fn increment_offset(&mut self, blocks: u64) {
        let mut carry = u128::from(blocks);
        for word in self.ctr_offset.iter_mut().rev() {
            let sum = u128::from(*word) + carry;
            *word = (sum & 0xffff) as u16;
            carry = sum >> 16;
        }
    }

    fn reset_offset(&mut self) {
        self.ctr_offset = [0; IV_WORDS];
    }
}

impl InitializationVector for CtrIv {
    fn cipher_mode(&self) -> CipherMode {
        CipherMode::Ctr
    }

    fn requires_padding(&self) -> bool {
        false
    }

    fn supports_arbitrary_seeking(&self) -> bool {
        true
    }

    fn current_iv(&self) -> Iv {
        let mut out = Iv::default();
        let mut carry = 0u32;
        for i in (0..IV_WORDS).rev() {
            let sum = u32::from(self.iv[i]) + u32::from(self.ctr_offset[i]) + carry;
            carry = sum >> 16;
            out[2 * i..2 * i + 2].copy_from_slice(&(sum as u16).to_be_bytes());
        }
        out
    }

    fn advance(&mut self, byte_count: u64) {
        // round up: a short final block still used a whole keystream block
        self.increment_offset(byte_count.div_ceil(BLOCK_SIZE as u64));
    }

    fn seek(&mut self, pos: SeekFrom) -> Result<(), SeekError> {
        match pos {
            SeekFrom::Start(offset) => {
                if offset % BLOCK_SIZE as u64 != 0 {
                    return Err(SeekError::NotBlockAligned);
                }
                self.reset_offset();
                self.increment_offset(offset / BLOCK_SIZE as u64);
                Ok(())
            }
            SeekFrom::Current(offset) => {
                if offset % BLOCK_SIZE as i64 != 0 {
                    return Err(SeekError::NotBlockAligned);
                }
                if offset < 0 {
                    return Err(SeekError::NegativeOffset);
                }
                self.increment_offset(offset as u64 / BLOCK_SIZE as u64);
                Ok(())
            }
            SeekFrom::End(_) => Err(SeekError::FromEnd),
        }
    }
}
