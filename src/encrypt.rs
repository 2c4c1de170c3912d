// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

//! Streaming CBC encryption of a plaintext byte stream.

use crate::{
    cipher::{self, AesCipher, BlockCipher, CipherName, BLOCK_SIZE},
    Result,
};
use bytes::Bytes;

/// Exact ciphertext length produced for a plaintext of the given length:
/// one IV block plus the PKCS#7 padded payload blocks. Pure; lets callers
/// size storage without encrypting.
pub fn encrypted_len(plaintext_len: usize) -> usize {
    BLOCK_SIZE + (plaintext_len / BLOCK_SIZE + 1) * BLOCK_SIZE
}

/// Streaming encryptor: consumes plaintext chunks of arbitrary size and
/// emits `IV || CBC(PKCS#7(plaintext))` as ciphertext becomes available.
///
/// Chunk boundaries need not align with cipher blocks; a fixed one-block
/// accumulator carries the partial block across calls. Each instance owns
/// its chaining state exclusively and is not meant for concurrent use.
/// Dropping an unfinished encryptor discards the buffered plaintext without
/// emitting anything further.
pub struct StreamEncryptor<C = AesCipher> {
    cipher: C,
    chain: [u8; BLOCK_SIZE],
    buffer: [u8; BLOCK_SIZE],
    buffered: usize,
    pending_iv: Option<[u8; BLOCK_SIZE]>,
}

impl StreamEncryptor {
    /// Creates an encryptor with a fresh random IV.
    ///
    /// Fails with `Error::Configuration` when the key length does not match
    /// the cipher profile.
    pub fn new(key: &[u8], cipher_name: CipherName) -> Result<Self> {
        Self::with_iv(key, cipher_name, cipher::random_iv())
    }

    /// Creates an encryptor with a caller supplied IV, for deterministic
    /// output in tests and known-answer vectors.
    ///
    /// An IV must never repeat under the same key; prefer [`StreamEncryptor::new`].
    pub fn with_iv(key: &[u8], cipher_name: CipherName, iv: [u8; BLOCK_SIZE]) -> Result<Self> {
        Ok(Self::from_parts(AesCipher::new(key, cipher_name)?, iv))
    }
}

impl<C: BlockCipher> StreamEncryptor<C> {
    pub(crate) fn from_parts(cipher: C, iv: [u8; BLOCK_SIZE]) -> Self {
        Self {
            cipher,
            chain: iv,
            buffer: [0; BLOCK_SIZE],
            buffered: 0,
            pending_iv: Some(iv),
        }
    }

    /// Consumes one plaintext chunk and returns the ciphertext bytes that
    /// became available, starting with the IV on the first call.
    pub fn update(&mut self, chunk: &[u8]) -> Bytes {
        let mut output = Vec::with_capacity(2 * BLOCK_SIZE + chunk.len());
        self.emit_iv(&mut output);

        let mut input = chunk;
        if self.buffered > 0 {
            let take = (BLOCK_SIZE - self.buffered).min(input.len());
            self.buffer[self.buffered..self.buffered + take].copy_from_slice(&input[..take]);
            self.buffered += take;
            input = &input[take..];
            if self.buffered == BLOCK_SIZE {
                let block = self.buffer;
                self.buffered = 0;
                self.encrypt_block_into(block, &mut output);
            }
        }

        let mut blocks = input.chunks_exact(BLOCK_SIZE);
        for block in &mut blocks {
            let mut owned = [0u8; BLOCK_SIZE];
            owned.copy_from_slice(block);
            self.encrypt_block_into(owned, &mut output);
        }
        let remainder = blocks.remainder();
        self.buffer[..remainder.len()].copy_from_slice(remainder);
        self.buffered = remainder.len();

        Bytes::from(output)
    }

    /// Pads the final partial (possibly empty) block and returns the last
    /// ciphertext bytes. Padding adds between 1 and one whole block, never 0,
    /// so ciphertext length is always `encrypted_len` of the plaintext length.
    pub fn finalize(mut self) -> Bytes {
        let mut output = Vec::with_capacity(2 * BLOCK_SIZE);
        self.emit_iv(&mut output);

        let padding = (BLOCK_SIZE - self.buffered) as u8;
        let mut block = self.buffer;
        for byte in block[self.buffered..].iter_mut() {
            *byte = padding;
        }
        self.encrypt_block_into(block, &mut output);

        Bytes::from(output)
    }

    fn emit_iv(&mut self, output: &mut Vec<u8>) {
        if let Some(iv) = self.pending_iv.take() {
            output.extend_from_slice(&iv);
        }
    }

    fn encrypt_block_into(&mut self, mut block: [u8; BLOCK_SIZE], output: &mut Vec<u8>) {
        for (byte, chained) in block.iter_mut().zip(self.chain.iter()) {
            *byte ^= chained;
        }
        self.cipher.encrypt_block(&mut block);
        self.chain = block;
        output.extend_from_slice(&block);
    }
}
