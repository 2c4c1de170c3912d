// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

//! Cipher profiles and the narrow block cipher seam the transforms are built on.

use crate::{Error, Result};
use aes::{
    cipher::{
        block_padding::{NoPadding, Pkcs7},
        generic_array::GenericArray,
        BlockDecrypt, BlockDecryptMut, BlockEncrypt, BlockEncryptMut, KeyInit, KeyIvInit,
    },
    Aes128, Aes256,
};
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};
use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

/// Cipher block size in bytes, shared by every supported profile.
pub const BLOCK_SIZE: usize = 16;

type Aes128CbcEnc = cbc::Encryptor<Aes128>;
type Aes128CbcDec = cbc::Decryptor<Aes128>;
type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Named cipher profiles the transforms can be configured with.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum CipherName {
    /// AES with a 128 bit key in CBC mode.
    #[serde(rename = "aes-128-cbc")]
    Aes128Cbc,
    /// AES with a 256 bit key in CBC mode.
    #[serde(rename = "aes-256-cbc")]
    Aes256Cbc,
}

impl CipherName {
    /// Block size of this profile in bytes.
    pub fn block_size(self) -> usize {
        BLOCK_SIZE
    }

    /// Exact key length in bytes this profile requires.
    pub fn key_len(self) -> usize {
        match self {
            CipherName::Aes128Cbc => 16,
            CipherName::Aes256Cbc => 32,
        }
    }

    /// The wire name of this profile, e.g. `aes-128-cbc`.
    pub fn as_str(self) -> &'static str {
        match self {
            CipherName::Aes128Cbc => "aes-128-cbc",
            CipherName::Aes256Cbc => "aes-256-cbc",
        }
    }
}

impl Display for CipherName {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.as_str())
    }
}

impl FromStr for CipherName {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "aes-128-cbc" => Ok(CipherName::Aes128Cbc),
            "aes-256-cbc" => Ok(CipherName::Aes256Cbc),
            _ => Err(Error::Configuration(format!("Unknown cipher name {name}"))),
        }
    }
}

/// One-block encrypt/decrypt seam around the cipher primitive.
///
/// The chaining, padding and range logic never touch the primitive through
/// anything wider than this, so all of it can be exercised against a stub
/// cipher without invoking real cryptography.
pub trait BlockCipher {
    /// Encrypts one block in place.
    fn encrypt_block(&self, block: &mut [u8; BLOCK_SIZE]);
    /// Decrypts one block in place.
    fn decrypt_block(&self, block: &mut [u8; BLOCK_SIZE]);
}

/// The production [`BlockCipher`]: an AES key schedule for one of the
/// supported profiles.
pub struct AesCipher {
    inner: Inner,
}

enum Inner {
    Aes128(Aes128),
    Aes256(Aes256),
}

impl AesCipher {
    /// Builds the key schedule, validating the key length against the profile.
    pub fn new(key: &[u8], cipher_name: CipherName) -> Result<Self> {
        check_key(key, cipher_name)?;
        let inner = match cipher_name {
            CipherName::Aes128Cbc => Aes128::new_from_slice(key)
                .map(Inner::Aes128)
                .map_err(|e| Error::Cipher(format!("{cipher_name} rejected key: {e}")))?,
            CipherName::Aes256Cbc => Aes256::new_from_slice(key)
                .map(Inner::Aes256)
                .map_err(|e| Error::Cipher(format!("{cipher_name} rejected key: {e}")))?,
        };
        Ok(Self { inner })
    }
}

impl BlockCipher for AesCipher {
    fn encrypt_block(&self, block: &mut [u8; BLOCK_SIZE]) {
        match &self.inner {
            Inner::Aes128(schedule) => schedule.encrypt_block(GenericArray::from_mut_slice(block)),
            Inner::Aes256(schedule) => schedule.encrypt_block(GenericArray::from_mut_slice(block)),
        }
    }

    fn decrypt_block(&self, block: &mut [u8; BLOCK_SIZE]) {
        match &self.inner {
            Inner::Aes128(schedule) => schedule.decrypt_block(GenericArray::from_mut_slice(block)),
            Inner::Aes256(schedule) => schedule.decrypt_block(GenericArray::from_mut_slice(block)),
        }
    }
}

pub(crate) fn check_key(key: &[u8], cipher_name: CipherName) -> Result<()> {
    if key.len() != cipher_name.key_len() {
        return Err(Error::Configuration(format!(
            "{cipher_name} requires a {} byte key, got {} bytes",
            cipher_name.key_len(),
            key.len()
        )));
    }
    Ok(())
}

// IVs are not secret but must never repeat under the same key.
pub(crate) fn random_iv() -> [u8; BLOCK_SIZE] {
    let mut iv = [0u8; BLOCK_SIZE];
    OsRng.fill_bytes(&mut iv);
    iv
}

/// One-shot CBC encryption of a whole buffer: PKCS#7 pads and encrypts under
/// the given IV. The IV itself is not part of the output.
pub(crate) fn cbc_encrypt(
    data: &[u8],
    key: &[u8],
    iv: &[u8; BLOCK_SIZE],
    cipher_name: CipherName,
) -> Result<Vec<u8>> {
    check_key(key, cipher_name)?;
    let encrypted = match cipher_name {
        CipherName::Aes128Cbc => Aes128CbcEnc::new_from_slices(key, iv)
            .map_err(|e| Error::Cipher(format!("{e}")))?
            .encrypt_padded_vec_mut::<Pkcs7>(data),
        CipherName::Aes256Cbc => Aes256CbcEnc::new_from_slices(key, iv)
            .map_err(|e| Error::Cipher(format!("{e}")))?
            .encrypt_padded_vec_mut::<Pkcs7>(data),
    };
    Ok(encrypted)
}

/// One-shot CBC decryption of whole blocks under the given IV. Padding is
/// left in place; the caller truncates to the known plaintext length.
pub(crate) fn cbc_decrypt_unpadded(
    data: &[u8],
    key: &[u8],
    iv: &[u8; BLOCK_SIZE],
    cipher_name: CipherName,
) -> Result<Vec<u8>> {
    check_key(key, cipher_name)?;
    let decrypted = match cipher_name {
        CipherName::Aes128Cbc => Aes128CbcDec::new_from_slices(key, iv)
            .map_err(|e| Error::Cipher(format!("{e}")))?
            .decrypt_padded_vec_mut::<NoPadding>(data)
            .map_err(|e| Error::Cipher(format!("{e}")))?,
        CipherName::Aes256Cbc => Aes256CbcDec::new_from_slices(key, iv)
            .map_err(|e| Error::Cipher(format!("{e}")))?
            .decrypt_padded_vec_mut::<NoPadding>(data)
            .map_err(|e| Error::Cipher(format!("{e}")))?,
    };
    Ok(decrypted)
}

/// Stub cipher for exercising the chaining and padding logic through the
/// seam: "encryption" XORs every byte of the block with a constant.
#[cfg(test)]
pub(crate) struct XorCipher(pub(crate) u8);

#[cfg(test)]
impl BlockCipher for XorCipher {
    fn encrypt_block(&self, block: &mut [u8; BLOCK_SIZE]) {
        for byte in block.iter_mut() {
            *byte ^= self.0;
        }
    }

    fn decrypt_block(&self, block: &mut [u8; BLOCK_SIZE]) {
        for byte in block.iter_mut() {
            *byte ^= self.0;
        }
    }
}
