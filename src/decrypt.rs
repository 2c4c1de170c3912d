// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

//! Streaming CBC decryption, of a whole stream or of a block aligned slice of one.

use crate::{
    cipher::{AesCipher, BlockCipher, CipherName, BLOCK_SIZE},
    range::RangeParams,
    Error, Result,
};
use bytes::Bytes;

/// Streaming decryptor: consumes ciphertext chunks of arbitrary size and
/// emits plaintext.
///
/// The first consumed block is taken as the chaining value: the stream's
/// real IV in full mode, the extra leading block fetched by the range
/// mapper in partial mode. After decryption the configured skip prefix is
/// discarded, then exactly the configured number of bytes is emitted; any
/// further decrypted bytes are dropped, so padding is never inspected.
///
/// Each instance owns its chaining state and partial block accumulator
/// exclusively; dropping it mid-stream releases both without emitting more.
pub struct StreamDecryptor<C = AesCipher> {
    cipher: C,
    chain: Option<[u8; BLOCK_SIZE]>,
    buffer: [u8; BLOCK_SIZE],
    buffered: usize,
    skip_remaining: usize,
    wanted: usize,
    wanted_remaining: usize,
    consumed: usize,
}

impl StreamDecryptor {
    /// Full mode: the input is the complete ciphertext stream and the output
    /// is truncated to exactly `wanted_output_length` bytes. The configured
    /// length is authoritative; padding bytes beyond it are discarded
    /// without being read.
    pub fn new(key: &[u8], cipher_name: CipherName, wanted_output_length: usize) -> Result<Self> {
        Self::partial(key, cipher_name, 0, wanted_output_length)
    }

    /// Partial mode: the input is a block aligned slice of the stream, as
    /// computed by [`calculate_params`](crate::calculate_params). The
    /// slice's first block serves as the chaining value, the first
    /// `skip_prefix_length` decrypted bytes are discarded, then exactly
    /// `wanted_output_length` bytes are emitted.
    pub fn partial(
        key: &[u8],
        cipher_name: CipherName,
        skip_prefix_length: usize,
        wanted_output_length: usize,
    ) -> Result<Self> {
        Ok(Self::from_parts(
            AesCipher::new(key, cipher_name)?,
            skip_prefix_length,
            wanted_output_length,
        ))
    }

    /// Partial mode configured straight from the range mapper's output.
    pub fn from_params(key: &[u8], cipher_name: CipherName, params: &RangeParams) -> Result<Self> {
        Self::partial(
            key,
            cipher_name,
            params.skip_prefix_length,
            params.wanted_output_length,
        )
    }
}

impl<C: BlockCipher> StreamDecryptor<C> {
    pub(crate) fn from_parts(
        cipher: C,
        skip_prefix_length: usize,
        wanted_output_length: usize,
    ) -> Self {
        Self {
            cipher,
            chain: None,
            buffer: [0; BLOCK_SIZE],
            buffered: 0,
            skip_remaining: skip_prefix_length,
            wanted: wanted_output_length,
            wanted_remaining: wanted_output_length,
            consumed: 0,
        }
    }

    /// Consumes one ciphertext chunk and returns the plaintext bytes it
    /// completed. Never emits past the configured output length, however
    /// much ciphertext is still fed in.
    pub fn update(&mut self, chunk: &[u8]) -> Bytes {
        self.consumed += chunk.len();
        let mut output = Vec::with_capacity(chunk.len().min(self.wanted_remaining));

        let mut input = chunk;
        if self.buffered > 0 {
            let take = (BLOCK_SIZE - self.buffered).min(input.len());
            self.buffer[self.buffered..self.buffered + take].copy_from_slice(&input[..take]);
            self.buffered += take;
            input = &input[take..];
            if self.buffered == BLOCK_SIZE {
                let block = self.buffer;
                self.buffered = 0;
                self.process_block(block, &mut output);
            }
        }

        let mut blocks = input.chunks_exact(BLOCK_SIZE);
        for block in &mut blocks {
            let mut owned = [0u8; BLOCK_SIZE];
            owned.copy_from_slice(block);
            self.process_block(owned, &mut output);
        }
        let remainder = blocks.remainder();
        self.buffer[..remainder.len()].copy_from_slice(remainder);
        self.buffered = remainder.len();

        Bytes::from(output)
    }

    /// Validates the end of the stream: the consumed input must have been
    /// block aligned and must have produced every requested byte.
    ///
    /// Fails with `Error::Alignment` when a partial ciphertext block remains
    /// buffered, and with `Error::TruncatedInput` when the stream ended
    /// before the skip prefix plus the wanted output were produced.
    pub fn finalize(self) -> Result<()> {
        if self.buffered != 0 {
            return Err(Error::Alignment {
                length: self.consumed,
                block_size: BLOCK_SIZE,
            });
        }
        if self.skip_remaining > 0 || self.wanted_remaining > 0 {
            return Err(Error::TruncatedInput {
                wanted: self.wanted,
                missing: self.wanted_remaining,
            });
        }
        Ok(())
    }

    fn process_block(&mut self, block: [u8; BLOCK_SIZE], output: &mut Vec<u8>) {
        let chain = match self.chain {
            Some(chain) => chain,
            None => {
                // First block of the stream or slice: chaining value only.
                self.chain = Some(block);
                return;
            }
        };

        let mut plain = block;
        self.cipher.decrypt_block(&mut plain);
        for (byte, chained) in plain.iter_mut().zip(chain.iter()) {
            *byte ^= chained;
        }
        self.chain = Some(block);

        let mut bytes: &[u8] = &plain;
        if self.skip_remaining > 0 {
            let skip = self.skip_remaining.min(bytes.len());
            bytes = &bytes[skip..];
            self.skip_remaining -= skip;
        }
        let take = self.wanted_remaining.min(bytes.len());
        output.extend_from_slice(&bytes[..take]);
        self.wanted_remaining -= take;
    }
}
