// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use bytes::Bytes;
use range_encryption::{
    calculate_params, decrypt, encrypt, encrypted_len,
    test_helpers::{new_test_rng, random_bytes, random_key, TestRng},
    CipherName, Error, RangeDecryptor, Result, StreamDecryptor, StreamEncryptor,
};
use std::ops::Range;

const TEST_CIPHERS: [CipherName; 2] = [CipherName::Aes128Cbc, CipherName::Aes256Cbc];

fn stream_encrypt(
    data: &[u8],
    key: &[u8],
    cipher_name: CipherName,
    chunk_size: usize,
) -> Result<Bytes> {
    let mut encryptor = StreamEncryptor::new(key, cipher_name)?;
    let mut encrypted = Vec::new();
    for chunk in data.chunks(chunk_size.max(1)) {
        encrypted.extend_from_slice(&encryptor.update(chunk));
    }
    encrypted.extend_from_slice(&encryptor.finalize());
    Ok(Bytes::from(encrypted))
}

fn stream_decrypt_full(
    encrypted: &[u8],
    key: &[u8],
    cipher_name: CipherName,
    output_len: usize,
    chunk_size: usize,
) -> Result<Bytes> {
    let mut decryptor = StreamDecryptor::new(key, cipher_name, output_len)?;
    let mut decrypted = Vec::new();
    for chunk in encrypted.chunks(chunk_size.max(1)) {
        decrypted.extend_from_slice(&decryptor.update(chunk));
    }
    decryptor.finalize()?;
    Ok(Bytes::from(decrypted))
}

#[test]
fn full_decrypt_round_trip() -> Result<()> {
    let mut rng = new_test_rng();
    for &cipher_name in &TEST_CIPHERS {
        for &data_len in &[512usize, 1024, 4096, 7333, 13791] {
            let data = random_bytes(&mut rng, data_len);
            let key = random_key(&mut rng, cipher_name);

            let encrypted = stream_encrypt(&data, &key, cipher_name, 1000)?;
            assert_eq!(encrypted.len(), encrypted_len(data_len));

            let decrypted = stream_decrypt_full(&encrypted, &key, cipher_name, data_len, 1000)?;
            assert_eq!(decrypted, data, "{cipher_name} len {data_len}");
        }
    }
    Ok(())
}

// The streaming transforms and the one-shot functions implement the same
// wire format, so output from either side decrypts with the other.
#[test]
fn streaming_and_one_shot_are_interchangeable() -> Result<()> {
    let mut rng = new_test_rng();
    for &cipher_name in &TEST_CIPHERS {
        let data = random_bytes(&mut rng, 7333);
        let key = random_key(&mut rng, cipher_name);

        let streamed = stream_encrypt(&data, &key, cipher_name, 997)?;
        assert_eq!(decrypt(streamed, &key, cipher_name, data.len())?, data);

        let one_shot = encrypt(data.clone(), &key, cipher_name)?;
        assert_eq!(
            stream_decrypt_full(&one_shot, &key, cipher_name, data.len(), 64)?,
            data
        );
    }
    Ok(())
}

#[test]
fn partial_decrypt_ranges() -> Result<()> {
    let data_ranges: [(usize, usize, usize); 5] = [
        (512, 0, 511),
        (917, 15, 912),
        (1024, 139, 771),
        (4096, 0, 4095),
        (7777, 185, 911),
    ];

    let mut rng = new_test_rng();
    for &cipher_name in &TEST_CIPHERS {
        for &(data_len, start, end) in &data_ranges {
            let data = random_bytes(&mut rng, data_len);
            let key = random_key(&mut rng, cipher_name);
            let encrypted = encrypt(data.clone(), &key, cipher_name)?;

            let params = calculate_params(start, end);
            let slice = &encrypted[params.encrypted_start_index..=params.encrypted_end_index];

            let mut decryptor = StreamDecryptor::from_params(&key, cipher_name, &params)?;
            let mut decrypted = Vec::new();
            for chunk in slice.chunks(100) {
                decrypted.extend_from_slice(&decryptor.update(chunk));
            }
            decryptor.finalize()?;

            assert_eq!(
                decrypted,
                data.slice(start..end + 1),
                "{cipher_name} len {data_len} start {start} end {end}"
            );
        }
    }
    Ok(())
}

#[test]
fn random_ranges_via_range_decryptor() -> Result<()> {
    let mut rng = new_test_rng();
    let data_len = 13791;
    for &cipher_name in &TEST_CIPHERS {
        let data = random_bytes(&mut rng, data_len);
        let key = random_key(&mut rng, cipher_name);
        let encrypted = encrypt(data.clone(), &key, cipher_name)?;

        let store = encrypted.clone();
        let reader = RangeDecryptor::new(
            &key,
            cipher_name,
            data_len,
            move |range: Range<usize>| Ok(store.slice(range)),
        )?;

        for _ in 0..32 {
            let start = next_index(&mut rng, data_len);
            let end = start + next_index(&mut rng, data_len - start);
            assert_eq!(
                reader.range_inclusive(start, end)?,
                data.slice(start..end + 1),
                "{cipher_name} start {start} end {end}"
            );
        }

        // The extremes: first byte, last byte, everything.
        assert_eq!(reader.range_inclusive(0, 0)?, data.slice(0..1));
        assert_eq!(
            reader.range_inclusive(data_len - 1, data_len - 1)?,
            data.slice(data_len - 1..)
        );
        assert_eq!(reader.range_full()?, data);
    }
    Ok(())
}

#[test]
fn empty_plaintext_round_trip() -> Result<()> {
    let mut rng = new_test_rng();
    for &cipher_name in &TEST_CIPHERS {
        let key = random_key(&mut rng, cipher_name);
        let encrypted = encrypt(Bytes::new(), &key, cipher_name)?;
        assert_eq!(encrypted.len(), encrypted_len(0));
        assert!(decrypt(encrypted, &key, cipher_name, 0)?.is_empty());
    }
    Ok(())
}

#[test]
fn wrong_key_length_is_a_configuration_error() {
    let key = [0u8; 16];
    assert!(matches!(
        StreamEncryptor::new(&key, CipherName::Aes256Cbc),
        Err(Error::Configuration(_))
    ));
    assert!(matches!(
        StreamDecryptor::new(&key[..7], CipherName::Aes128Cbc, 0),
        Err(Error::Configuration(_))
    ));
    assert!(matches!(
        encrypt(Bytes::new(), &[0u8; 33], CipherName::Aes256Cbc),
        Err(Error::Configuration(_))
    ));
}

#[test]
fn unknown_cipher_name_fails_to_parse() {
    assert!(matches!(
        "des-ede3-cbc".parse::<CipherName>(),
        Err(Error::Configuration(_))
    ));
    assert_eq!(
        "aes-256-cbc".parse::<CipherName>().unwrap(),
        CipherName::Aes256Cbc
    );
}

#[test]
fn seventeen_byte_slice_is_an_alignment_error() -> Result<()> {
    let mut rng = new_test_rng();
    let key = random_key(&mut rng, CipherName::Aes128Cbc);
    let mut decryptor = StreamDecryptor::partial(&key, CipherName::Aes128Cbc, 0, 1)?;
    let _ = decryptor.update(&[0u8; 17]);
    assert!(matches!(
        decryptor.finalize(),
        Err(Error::Alignment { length: 17, .. })
    ));
    Ok(())
}

#[test]
fn short_stream_is_a_truncated_input_error() -> Result<()> {
    let mut rng = new_test_rng();
    let key = random_key(&mut rng, CipherName::Aes128Cbc);
    let data = random_bytes(&mut rng, 512);
    let encrypted = encrypt(data.clone(), &key, CipherName::Aes128Cbc)?;

    // One-shot: the stream is simply too small for the wanted output.
    assert!(matches!(
        decrypt(
            encrypted.slice(..encrypted.len() - 32),
            &key,
            CipherName::Aes128Cbc,
            data.len(),
        ),
        Err(Error::TruncatedInput { .. })
    ));

    // Streaming: same thing, detected at finalize.
    let mut decryptor = StreamDecryptor::new(&key, CipherName::Aes128Cbc, data.len())?;
    let _ = decryptor.update(&encrypted.slice(..encrypted.len() - 32));
    assert!(matches!(
        decryptor.finalize(),
        Err(Error::TruncatedInput { .. })
    ));
    Ok(())
}

fn next_index(rng: &mut TestRng, bound: usize) -> usize {
    use rand::Rng;
    if bound == 0 {
        0
    } else {
        rng.gen_range(0..bound)
    }
}
