// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

//! Errors which can arise while encrypting a stream or decrypting a range of one.

use thiserror::Error;

/// Specialisation of `std::Result` for this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors which can arise during stream encryption or range decryption.
///
/// All variants are fatal for the transform that raised them; retrying over
/// flaky storage is the caller's responsibility, by re-running the range
/// mapper and re-fetching.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Invalid transform configuration, e.g. a key whose length does not
    /// match the cipher profile, or an unknown cipher name.
    #[error("Invalid configuration: {0}")]
    Configuration(String),
    /// Ciphertext input was not aligned to the cipher block size. The caller
    /// fed a slice it did not obtain from the range mapper.
    #[error("Ciphertext length {length} is not a multiple of the {block_size} byte block size")]
    Alignment {
        /// Total number of ciphertext bytes consumed.
        length: usize,
        /// Block size of the configured cipher.
        block_size: usize,
    },
    /// The ciphertext stream ended before the requested output was produced.
    /// Distinct from [`Error::Alignment`]: the range was well formed but
    /// storage returned fewer bytes than asked for.
    #[error("Ciphertext ended early: {missing} of {wanted} requested plaintext bytes not produced")]
    TruncatedInput {
        /// Total number of plaintext bytes requested.
        wanted: usize,
        /// Number of requested bytes that were never produced.
        missing: usize,
    },
    /// A failure inside the block cipher primitive, surfaced verbatim.
    #[error("Cipher error: {0}")]
    Cipher(String),
    /// A generic I/O error from the file helpers.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
