// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

//! Example demonstrating random access decryption with RangeDecryptor.
//!
//! Encrypts a buffer into the `IV || CBC(..)` stream layout, hands the
//! ciphertext to a simple in-memory "store", and reads byte ranges of the
//! original plaintext back without ever decrypting from the start.

use bytes::Bytes;
use range_encryption::{
    calculate_params, encrypt, encrypted_len,
    test_helpers::{new_test_rng, random_bytes, random_key},
    CipherName, RangeDecryptor, Result,
};
use std::ops::Range;

fn main() -> Result<()> {
    let cipher_name = CipherName::Aes256Cbc;
    let data_len = 2_000_000;

    let mut rng = new_test_rng();
    let data = random_bytes(&mut rng, data_len);
    let key = random_key(&mut rng, cipher_name);
    println!("Created {} bytes of test data", data.len());

    // Encrypt and hand the ciphertext to the "store".
    let encrypted = encrypt(data.clone(), &key, cipher_name)?;
    assert_eq!(encrypted.len(), encrypted_len(data_len));
    println!(
        "Encrypted with {} into {} ciphertext bytes (IV {})",
        cipher_name,
        encrypted.len(),
        hex::encode(&encrypted[..16]),
    );

    // The fetch functor is all the reader knows about the store.
    let store = encrypted;
    let reader = RangeDecryptor::new(&key, cipher_name, data_len, move |range: Range<usize>| {
        Ok(store.slice(range))
    })?;

    // Read a few ranges back and check them against the original.
    let ranges: [(usize, usize); 4] = [(0, 1000), (139, 772), (1_500_000, 4096), (data_len - 100, 100)];
    for &(start, len) in &ranges {
        let params = calculate_params(start, start + len - 1);
        let decrypted = reader.get_range(start, len)?;
        assert_eq!(decrypted, data.slice(start..start + len));
        println!(
            "Read {} bytes at {} by fetching ciphertext [{}, {}] and skipping {}",
            decrypted.len(),
            start,
            params.encrypted_start_index,
            params.encrypted_end_index,
            params.skip_prefix_length,
        );
    }

    // Reads past the end clamp to what exists.
    let tail: Bytes = reader.get_range(data_len - 50, 200)?;
    assert_eq!(tail, data.slice(data_len - 50..));
    println!("Read past the end returned the {} available bytes", tail.len());

    let whole = reader.range_full()?;
    assert_eq!(whole, data);
    println!("Full read matches the original");

    Ok(())
}
