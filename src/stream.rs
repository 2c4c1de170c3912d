// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

//! Random access decryption over externally stored ciphertext, and helpers
//! for streaming whole files through the transforms.

use crate::{
    cipher::{self, CipherName},
    decrypt::StreamDecryptor,
    encrypt::StreamEncryptor,
    range::calculate_params,
    Result,
};
use bytes::Bytes;
use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Seek, SeekFrom, Write},
    ops::Range,
    path::Path,
};

/// Read buffer size used by the file helpers.
const STREAM_BUF_SIZE: usize = 64 * 1024;

/// Random access decryptor over ciphertext held by an external store.
///
/// The fetch functor returns ciphertext stream bytes for an absolute byte
/// offset range; wherever the stream actually lives (file, object store,
/// network) is the caller's concern. Each request runs the range mapper,
/// fetches exactly the computed block aligned slice and drives a partial
/// mode [`StreamDecryptor`] over it, so no request ever decrypts from the
/// start of the stream.
pub struct RangeDecryptor<F> {
    key: Vec<u8>,
    cipher_name: CipherName,
    plaintext_len: usize,
    fetch: F,
}

impl<F> RangeDecryptor<F>
where
    F: Fn(Range<usize>) -> Result<Bytes>,
{
    /// Creates a reader for a ciphertext stream whose original plaintext
    /// length is known out-of-band.
    pub fn new(
        key: &[u8],
        cipher_name: CipherName,
        plaintext_len: usize,
        fetch: F,
    ) -> Result<Self> {
        cipher::check_key(key, cipher_name)?;
        Ok(Self {
            key: key.to_vec(),
            cipher_name,
            plaintext_len,
            fetch,
        })
    }

    /// Original plaintext length of the stream.
    pub fn plaintext_len(&self) -> usize {
        self.plaintext_len
    }

    /// Decrypts `len` bytes starting at plaintext position `start`.
    ///
    /// Requests past the end of the plaintext are clamped to what exists; a
    /// request entirely out of range, or of zero length, returns empty bytes.
    pub fn get_range(&self, start: usize, len: usize) -> Result<Bytes> {
        if start >= self.plaintext_len || len == 0 {
            return Ok(Bytes::new());
        }
        let end_pos = start.saturating_add(len).min(self.plaintext_len);

        let params = calculate_params(start, end_pos - 1);
        let encrypted = (self.fetch)(params.encrypted_start_index..params.encrypted_end_index + 1)?;

        let mut decryptor = StreamDecryptor::from_params(&self.key, self.cipher_name, &params)?;
        let decrypted = decryptor.update(&encrypted);
        decryptor.finalize()?;
        Ok(decrypted)
    }

    /// Convenience method to get a range using `Range` syntax.
    pub fn range(&self, range: Range<usize>) -> Result<Bytes> {
        let len = range.end.saturating_sub(range.start);
        self.get_range(range.start, len)
    }

    /// Convenience method to get a range from `start` to the end of the
    /// plaintext.
    pub fn range_from(&self, start: usize) -> Result<Bytes> {
        let len = self.plaintext_len.saturating_sub(start);
        self.get_range(start, len)
    }

    /// Convenience method to get the first `end` bytes of the plaintext.
    pub fn range_to(&self, end: usize) -> Result<Bytes> {
        self.get_range(0, end)
    }

    /// Convenience method to get the entire plaintext.
    pub fn range_full(&self) -> Result<Bytes> {
        self.get_range(0, self.plaintext_len)
    }

    /// Convenience method to get the inclusive interval `[start, end]`.
    pub fn range_inclusive(&self, start: usize, end: usize) -> Result<Bytes> {
        let len = end.saturating_sub(start) + 1;
        self.get_range(start, len)
    }
}

/// Encrypts a file into `IV || CBC(..)` ciphertext at `dst`, streaming in
/// fixed size chunks. Returns the number of ciphertext bytes written, which
/// is always `encrypted_len` of the source length.
pub fn encrypt_from_file(
    src: &Path,
    dst: &Path,
    key: &[u8],
    cipher_name: CipherName,
) -> Result<usize> {
    let mut encryptor = StreamEncryptor::new(key, cipher_name)?;
    let mut reader = BufReader::with_capacity(STREAM_BUF_SIZE, File::open(src)?);
    let mut writer = BufWriter::new(File::create(dst)?);
    let mut buffer = vec![0u8; STREAM_BUF_SIZE];
    let mut written = 0;

    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        let encrypted = encryptor.update(&buffer[..bytes_read]);
        writer.write_all(&encrypted)?;
        written += encrypted.len();
    }
    let last = encryptor.finalize();
    writer.write_all(&last)?;
    written += last.len();
    writer.flush()?;

    Ok(written)
}

/// Decrypts a complete ciphertext file back into its `plaintext_len` bytes
/// of plaintext at `dst`.
pub fn decrypt_from_file(
    src: &Path,
    dst: &Path,
    key: &[u8],
    cipher_name: CipherName,
    plaintext_len: usize,
) -> Result<()> {
    let mut decryptor = StreamDecryptor::new(key, cipher_name, plaintext_len)?;
    let mut reader = BufReader::with_capacity(STREAM_BUF_SIZE, File::open(src)?);
    let mut writer = BufWriter::new(File::create(dst)?);
    let mut buffer = vec![0u8; STREAM_BUF_SIZE];

    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        let decrypted = decryptor.update(&buffer[..bytes_read]);
        writer.write_all(&decrypted)?;
    }
    decryptor.finalize()?;
    writer.flush()?;

    Ok(())
}

/// Creates a [`RangeDecryptor`] over a ciphertext file; each fetch
/// seek-reads the requested byte range.
///
/// A fetch reads at most the requested range, never failing on a short
/// file, so a storage shortfall surfaces as `Error::TruncatedInput` from
/// the decryptor rather than as an I/O error.
pub fn file_range_decryptor(
    path: &Path,
    key: &[u8],
    cipher_name: CipherName,
    plaintext_len: usize,
) -> Result<RangeDecryptor<impl Fn(Range<usize>) -> Result<Bytes>>> {
    let path = path.to_owned();
    RangeDecryptor::new(key, cipher_name, plaintext_len, move |range: Range<usize>| -> Result<Bytes> {
        let mut file = File::open(&path)?;
        let _ = file.seek(SeekFrom::Start(range.start as u64))?;
        let mut buffer = Vec::with_capacity(range.len());
        let _ = file.take(range.len() as u64).read_to_end(&mut buffer)?;
        Ok(Bytes::from(buffer))
    })
}
