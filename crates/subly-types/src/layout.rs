//! Fixed-width byte layouts.
//!
//! Signed messages, proof records and envelopes are all built field by field
//! into buffers whose size is known up front. [`FixedWriter`] and
//! [`FixedReader`] do the offset bookkeeping and report a layout mismatch as
//! [`TypesError::InvalidInputLength`] instead of panicking.

use crate::{Result, TypesError};

/// Writes fields sequentially into a `[u8; N]`.
///
/// [`FixedWriter::finish`] only succeeds if exactly `N` bytes were written.
pub struct FixedWriter<const N: usize> {
    buf: [u8; N],
    pos: usize,
    overflowed: bool,
}

impl<const N: usize> FixedWriter<N> {
    pub fn new() -> Self {
        Self {
            buf: [0u8; N],
            pos: 0,
            overflowed: false,
        }
    }

    /// Append raw bytes.
    pub fn put(&mut self, bytes: &[u8]) -> &mut Self {
        let end = self.pos.saturating_add(bytes.len());
        match self.buf.get_mut(self.pos..end) {
            Some(dst) if !self.overflowed => {
                dst.copy_from_slice(bytes);
                self.pos = end;
            }
            _ => self.overflowed = true,
        }
        self
    }

    pub fn put_u32_le(&mut self, value: u32) -> &mut Self {
        self.put(&value.to_le_bytes())
    }

    pub fn put_i64_le(&mut self, value: i64) -> &mut Self {
        self.put(&value.to_le_bytes())
    }

    /// Return the filled buffer.
    pub fn finish(&self) -> Result<[u8; N]> {
        if self.overflowed || self.pos != N {
            return Err(TypesError::InvalidInputLength {
                expected: N,
                actual: if self.overflowed { N + 1 } else { self.pos },
            });
        }
        Ok(self.buf)
    }
}

impl<const N: usize> Default for FixedWriter<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads fields sequentially out of a byte slice of known total length.
pub struct FixedReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> FixedReader<'a> {
    /// Start reading `data`, which must be exactly `expected_len` bytes.
    pub fn new(data: &'a [u8], expected_len: usize) -> Result<Self> {
        if data.len() != expected_len {
            return Err(TypesError::InvalidInputLength {
                expected: expected_len,
                actual: data.len(),
            });
        }
        Ok(Self { data, pos: 0 })
    }

    /// Take the next `M` bytes as an array.
    pub fn take<const M: usize>(&mut self) -> Result<[u8; M]> {
        let end = self.pos.saturating_add(M);
        let field = self
            .data
            .get(self.pos..end)
            .ok_or(TypesError::InvalidInputLength {
                expected: end,
                actual: self.data.len(),
            })?;
        let mut out = [0u8; M];
        out.copy_from_slice(field);
        self.pos = end;
        Ok(out)
    }

    pub fn u32_le(&mut self) -> Result<u32> {
        self.take::<4>().map(u32::from_le_bytes)
    }

    pub fn i64_le(&mut self) -> Result<i64> {
        self.take::<8>().map(i64::from_le_bytes)
    }
}
