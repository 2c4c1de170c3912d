// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use bytes::Bytes;
use criterion::{criterion_group, criterion_main, BatchSize, Bencher, Criterion};
use range_encryption::{
    calculate_params, encrypt,
    test_helpers::{new_test_rng, random_bytes, random_key},
    CipherName, StreamDecryptor, StreamEncryptor,
};

// sample size is _NOT_ the number of times the command is run...
// https://bheisler.github.io/criterion.rs/book/analysis.html#measurement
const SAMPLE_SIZE: usize = 10;

const CIPHER: CipherName = CipherName::Aes128Cbc;

fn custom_criterion() -> Criterion {
    Criterion::default().sample_size(SAMPLE_SIZE)
}

fn setup(bytes_len: usize) -> (Bytes, Vec<u8>) {
    let mut rng = new_test_rng();
    (random_bytes(&mut rng, bytes_len), random_key(&mut rng, CIPHER))
}

fn encrypt_stream(b: &mut Bencher<'_>, bytes_len: usize) {
    b.iter_batched(
        || setup(bytes_len),
        |(bytes, key)| {
            let mut encryptor = StreamEncryptor::new(&key, CIPHER).unwrap();
            let _ = encryptor.update(&bytes);
            let _ = encryptor.finalize();
        },
        BatchSize::SmallInput,
    );
}

fn decrypt_stream(b: &mut Bencher<'_>, bytes_len: usize) {
    b.iter_batched(
        || {
            let (bytes, key) = setup(bytes_len);
            let encrypted = encrypt(bytes, &key, CIPHER).unwrap();
            (encrypted, key)
        },
        |(encrypted, key)| {
            let mut decryptor = StreamDecryptor::new(&key, CIPHER, bytes_len).unwrap();
            let _ = decryptor.update(&encrypted);
            decryptor.finalize().unwrap();
        },
        BatchSize::SmallInput,
    );
}

fn decrypt_range(b: &mut Bencher<'_>, bytes_len: usize, range_len: usize) {
    let params = calculate_params(bytes_len / 2, bytes_len / 2 + range_len - 1);
    b.iter_batched(
        || {
            let (bytes, key) = setup(bytes_len);
            let encrypted = encrypt(bytes, &key, CIPHER).unwrap();
            (
                encrypted.slice(params.encrypted_start_index..=params.encrypted_end_index),
                key,
            )
        },
        |(slice, key)| {
            let mut decryptor = StreamDecryptor::from_params(&key, CIPHER, &params).unwrap();
            let _ = decryptor.update(&slice);
            decryptor.finalize().unwrap();
        },
        BatchSize::SmallInput,
    );
}

fn criterion_benchmark(c: &mut Criterion) {
    let _ = c.bench_function("encrypt 1MiB stream", |b| encrypt_stream(b, 1024 * 1024));
    let _ = c.bench_function("decrypt 1MiB stream", |b| decrypt_stream(b, 1024 * 1024));
    let _ = c.bench_function("decrypt 4KiB range of 1MiB stream", |b| {
        decrypt_range(b, 1024 * 1024, 4096)
    });
}

criterion_group! {
    name = benches;
    config = custom_criterion();
    targets = criterion_benchmark
}
criterion_main!(benches);
