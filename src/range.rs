// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

//! The range mapper: translates a requested plaintext interval into the
//! ciphertext interval to fetch and the decryptor parameters to apply to it.

use crate::cipher::BLOCK_SIZE;
use serde::{Deserialize, Serialize};

/// Everything needed to decrypt one plaintext byte range, as produced by
/// [`calculate_params`]: which ciphertext stream bytes to fetch, and how the
/// partial mode decryptor must post-process the decrypted bytes. Computed
/// fresh per request and consumed by one decryptor instance.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RangeParams {
    /// Leading decrypted bytes to discard before emission starts.
    pub skip_prefix_length: usize,
    /// First ciphertext stream byte to fetch (inclusive, block aligned).
    pub encrypted_start_index: usize,
    /// Last ciphertext stream byte to fetch (inclusive; the offset one past
    /// it is block aligned).
    pub encrypted_end_index: usize,
    /// Exact number of plaintext bytes the decryptor will emit.
    pub wanted_output_length: usize,
}

/// Maps an inclusive plaintext byte interval to the minimal ciphertext slice
/// that reproduces it.
///
/// In the stream layout `IV, block 1, block 2, ..` the plaintext blocks
/// covering the interval are recoverable from the ciphertext blocks one
/// earlier through one later, so the returned interval always starts one
/// block before the first covered plaintext block: that extra block is the
/// chaining value (the real IV when the interval starts in plaintext block
/// zero). Feeding exactly the returned slice to a partial mode decryptor
/// configured with the returned skip and output lengths yields exactly the
/// requested plaintext bytes.
///
/// Both indices are zero based and inclusive, and `decrypted_start_index`
/// must not exceed `decrypted_end_index`. Pure; no I/O and no state.
pub fn calculate_params(decrypted_start_index: usize, decrypted_end_index: usize) -> RangeParams {
    assert!(
        decrypted_start_index <= decrypted_end_index,
        "inverted plaintext range"
    );

    let block_index_start = decrypted_start_index / BLOCK_SIZE;
    let block_index_end = decrypted_end_index / BLOCK_SIZE;

    RangeParams {
        skip_prefix_length: decrypted_start_index - block_index_start * BLOCK_SIZE,
        encrypted_start_index: block_index_start * BLOCK_SIZE,
        encrypted_end_index: (block_index_end + 2) * BLOCK_SIZE - 1,
        wanted_output_length: decrypted_end_index - decrypted_start_index + 1,
    }
}
