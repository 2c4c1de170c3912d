// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

//! Streaming CBC encryption with random access range decryption.
//!
//! This library encrypts a plaintext byte stream into `IV || CBC(PKCS#7(..))`
//! under one of the named AES-CBC profiles, and decrypts either the whole
//! stream or an arbitrary plaintext byte range of it. The range mapper,
//! [`calculate_params`], computes for a requested plaintext interval the
//! minimal block aligned ciphertext slice to fetch, the decrypted prefix to
//! discard and the output length to emit, so a range can be recovered without
//! decrypting from the start of the stream.
//!
//! Where the ciphertext lives is the caller's concern: the transforms consume
//! and produce byte chunks of arbitrary size, and [`RangeDecryptor`] is
//! parameterised over a fetch function for whatever storage holds the stream.
//! There is no integrity protection and no padding inspection on decryption;
//! callers must know the exact plaintext length out-of-band.
//!
//! # Examples
//!
//! ```
//! use range_encryption::{calculate_params, encrypt, CipherName, StreamDecryptor};
//! use range_encryption::test_helpers::{new_test_rng, random_bytes, random_key};
//!
//! fn main() -> range_encryption::Result<()> {
//!     let mut rng = new_test_rng();
//!     let data = random_bytes(&mut rng, 917);
//!     let key = random_key(&mut rng, CipherName::Aes128Cbc);
//!
//!     let encrypted = encrypt(data.clone(), &key, CipherName::Aes128Cbc)?;
//!
//!     // Recover bytes 15..=912 without decrypting from the start.
//!     let params = calculate_params(15, 912);
//!     let slice = &encrypted[params.encrypted_start_index..=params.encrypted_end_index];
//!     let mut decryptor = StreamDecryptor::from_params(&key, CipherName::Aes128Cbc, &params)?;
//!     let range = decryptor.update(slice);
//!     decryptor.finalize()?;
//!     assert_eq!(range, data.slice(15..913));
//!     Ok(())
//! }
//! ```

#![doc(
    html_logo_url = "https://raw.githubusercontent.com/maidsafe/QA/master/Images/maidsafe_logo.png",
    html_favicon_url = "https://maidsafe.net/img/favicon.ico",
    test(attr(forbid(warnings)))
)]
// For explanation of lint checks, run `rustc -W help` or see
// https://github.com/maidsafe/QA/blob/master/Documentation/Rust%20Lint%20Checks.md
#![forbid(
    arithmetic_overflow,
    mutable_transmutes,
    no_mangle_const_items,
    unknown_crate_types
)]
#![deny(
    bad_style,
    deprecated,
    improper_ctypes,
    missing_docs,
    non_shorthand_field_patterns,
    overflowing_literals,
    stable_features,
    unconditional_recursion,
    unknown_lints,
    unsafe_code,
    unused,
    unused_allocation,
    unused_attributes,
    unused_comparisons,
    unused_features,
    unused_parens,
    while_true,
    warnings
)]
#![warn(
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unused_results
)]
#![allow(
    missing_copy_implementations,
    missing_debug_implementations,
    variant_size_differences
)]

mod cipher;
mod decrypt;
mod encrypt;
mod error;
mod range;
mod stream;
pub mod test_helpers;

pub use self::{
    cipher::{AesCipher, BlockCipher, CipherName, BLOCK_SIZE},
    decrypt::StreamDecryptor,
    encrypt::{encrypted_len, StreamEncryptor},
    error::{Error, Result},
    range::{calculate_params, RangeParams},
    stream::{
        decrypt_from_file, encrypt_from_file, file_range_decryptor, RangeDecryptor,
    },
};
use bytes::Bytes;

/// One-shot encryption of a whole plaintext buffer: returns
/// `IV || CBC(PKCS#7(data))` under a fresh random IV. The output length is
/// always [`encrypted_len`] of the input length.
pub fn encrypt(data: Bytes, key: &[u8], cipher_name: CipherName) -> Result<Bytes> {
    let iv = cipher::random_iv();
    let mut output = Vec::with_capacity(encrypted_len(data.len()));
    output.extend_from_slice(&iv);
    output.extend_from_slice(&cipher::cbc_encrypt(&data, key, &iv, cipher_name)?);
    Ok(Bytes::from(output))
}

/// One-shot decryption of a complete ciphertext stream, truncated to the
/// known plaintext length.
///
/// Padding bytes are discarded by length and never inspected, so the caller
/// must know the exact original length out-of-band. For a slice produced by
/// the range mapper use [`StreamDecryptor::from_params`] instead.
pub fn decrypt(
    encrypted: Bytes,
    key: &[u8],
    cipher_name: CipherName,
    output_len: usize,
) -> Result<Bytes> {
    let block_size = cipher_name.block_size();
    if encrypted.len() % block_size != 0 {
        return Err(Error::Alignment {
            length: encrypted.len(),
            block_size,
        });
    }
    let capacity = encrypted.len().saturating_sub(block_size);
    if capacity < output_len {
        return Err(Error::TruncatedInput {
            wanted: output_len,
            missing: output_len - capacity,
        });
    }
    if encrypted.is_empty() {
        return Ok(Bytes::new());
    }

    let mut iv = [0u8; BLOCK_SIZE];
    iv.copy_from_slice(&encrypted[..block_size]);
    let mut decrypted = cipher::cbc_decrypt_unpadded(&encrypted[block_size..], key, &iv, cipher_name)?;
    decrypted.truncate(output_len);
    Ok(Bytes::from(decrypted))
}
