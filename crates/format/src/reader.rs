//! Positioned byte reader.
//!
//! All structural reads go through [`ByteReader`]. It tracks its absolute
//! position so every error can name the offset where it happened, and it
//! turns a premature end of stream into [`DecodeError::TruncatedInput`].
//!
//! Integers are little-endian except the format tag, which is big-endian.

use crate::text::decode_text;
use appinfo_core::{DecodeError, Result};
use byteorder::{BigEndian, LittleEndian, ReadBytesExt};
use std::io::{self, Read, Seek, SeekFrom};

/// Byte cursor over a seekable source
pub struct ByteReader<R> {
    /// Underlying source
    inner: R,

    /// Absolute offset that position 0 of `inner` corresponds to
    base: u64,

    /// Current position within `inner`
    position: u64,
}

impl<R: Read + Seek> ByteReader<R> {
    /// Create a reader over a source positioned at its start.
    pub fn new(inner: R) -> Self {
        Self::with_base(inner, 0)
    }

    /// Create a reader whose offsets are reported relative to `base`.
    ///
    /// Used for length-delimited payloads held in memory, so that errors
    /// still carry absolute file offsets.
    pub fn with_base(inner: R, base: u64) -> Self {
        ByteReader {
            inner,
            base,
            position: 0,
        }
    }

    /// Absolute position of the next byte to be read.
    pub fn tell(&self) -> u64 {
        self.base + self.position
    }

    /// Move to an absolute position.
    pub fn seek(&mut self, offset: u64) -> Result<()> {
        let local = offset.checked_sub(self.base).ok_or_else(|| {
            DecodeError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("seek to {} before reader base {}", offset, self.base),
            ))
        })?;
        self.inner.seek(SeekFrom::Start(local))?;
        self.position = local;
        Ok(())
    }

    /// Number of bytes between the current position and the end of the source.
    pub fn remaining(&mut self) -> Result<u64> {
        let end = self.inner.seek(SeekFrom::End(0))?;
        self.inner.seek(SeekFrom::Start(self.position))?;
        Ok(end.saturating_sub(self.position))
    }

    /// Read one byte.
    pub fn read_u8(&mut self) -> Result<u8> {
        let value = self.inner.read_u8().map_err(|e| self.read_error(e, 1))?;
        self.position += 1;
        Ok(value)
    }

    /// Read a little-endian u32.
    pub fn read_u32(&mut self) -> Result<u32> {
        let value = self
            .inner
            .read_u32::<LittleEndian>()
            .map_err(|e| self.read_error(e, 4))?;
        self.position += 4;
        Ok(value)
    }

    /// Read a big-endian u32. Only the format tag is stored this way.
    pub fn read_u32_be(&mut self) -> Result<u32> {
        let value = self
            .inner
            .read_u32::<BigEndian>()
            .map_err(|e| self.read_error(e, 4))?;
        self.position += 4;
        Ok(value)
    }

    /// Read a little-endian u64.
    pub fn read_u64(&mut self) -> Result<u64> {
        let value = self
            .inner
            .read_u64::<LittleEndian>()
            .map_err(|e| self.read_error(e, 8))?;
        self.position += 8;
        Ok(value)
    }

    /// Read a little-endian f32.
    pub fn read_f32(&mut self) -> Result<f32> {
        let value = self
            .inner
            .read_f32::<LittleEndian>()
            .map_err(|e| self.read_error(e, 4))?;
        self.position += 4;
        Ok(value)
    }

    /// Read exactly `N` bytes into an array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        self.inner
            .read_exact(&mut buf)
            .map_err(|e| self.read_error(e, N as u64))?;
        self.position += N as u64;
        Ok(buf)
    }

    /// Read exactly `len` bytes.
    ///
    /// The buffer grows with the bytes actually read, so a bogus length
    /// cannot force a large allocation.
    pub fn read_fixed(&mut self, len: usize) -> Result<Vec<u8>> {
        let offset = self.tell();
        let buf = self.read_available(len)?;
        if buf.len() < len {
            return Err(DecodeError::TruncatedInput {
                offset,
                needed: len as u64,
            });
        }
        Ok(buf)
    }

    /// Read up to `len` bytes, stopping early only at end of stream.
    pub fn read_available(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        (&mut self.inner).take(len as u64).read_to_end(&mut buf)?;
        self.position += buf.len() as u64;
        Ok(buf)
    }

    /// Read bytes up to a `0x00` terminator; the terminator is consumed but
    /// not returned.
    pub fn read_cstring_bytes(&mut self) -> Result<Vec<u8>> {
        let start = self.tell();
        let mut bytes = Vec::new();
        loop {
            let byte = match self.inner.read_u8() {
                Ok(b) => b,
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    return Err(DecodeError::TruncatedInput {
                        offset: start,
                        needed: bytes.len() as u64 + 1,
                    });
                }
                Err(e) => return Err(e.into()),
            };
            self.position += 1;
            if byte == 0 {
                return Ok(bytes);
            }
            bytes.push(byte);
        }
    }

    /// Read a null-terminated string, decoded as UTF-8 with a Windows-1252
    /// fallback.
    pub fn read_cstring(&mut self) -> Result<String> {
        Ok(decode_text(self.read_cstring_bytes()?))
    }

    fn read_error(&self, e: io::Error, needed: u64) -> DecodeError {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            DecodeError::TruncatedInput {
                offset: self.tell(),
                needed,
            }
        } else {
            DecodeError::Io(e)
        }
    }
}
