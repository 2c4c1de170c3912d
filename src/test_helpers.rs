// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

#![doc(hidden)]

use crate::CipherName;
use bytes::Bytes;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaChaRng;
use std::env;

pub type TestRng = ChaChaRng;

// Create a new random number generator suitable for tests. To provide
// repeatable results, the seed can be overridden using the "SEED" env
// variable; without it a random one is used, to support soak testing.
pub fn new_test_rng() -> TestRng {
    let seed = env::var("SEED")
        .ok()
        .and_then(|seed| seed.parse().ok())
        .unwrap_or_else(|| rand::thread_rng().gen());
    TestRng::seed_from_u64(seed)
}

/// Generates `size` random bytes from the given rng.
pub fn random_bytes(rng: &mut TestRng, size: usize) -> Bytes {
    let mut bytes = vec![0u8; size];
    rng.fill(bytes.as_mut_slice());
    Bytes::from(bytes)
}

/// Generates a random key of the exact length the cipher profile requires.
pub fn random_key(rng: &mut TestRng, cipher_name: CipherName) -> Vec<u8> {
    let mut key = vec![0u8; cipher_name.key_len()];
    rng.fill(key.as_mut_slice());
    key
}
