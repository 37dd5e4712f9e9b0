// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Value codec: typed fields to and from the wire's fixed binary layout.
//!
//! There is no message envelope. A request is the concatenation of its
//! fields, so every decoder must consume exactly its own bytes:
//!
//! | Value    | Layout                                                  |
//! |----------|---------------------------------------------------------|
//! | `int32`  | 4 bytes big-endian                                      |
//! | `int64`  | 8 bytes big-endian (handle ids)                         |
//! | `double` | 8 bytes big-endian IEEE-754                             |
//! | xyz      | 3 doubles                                               |
//! | array    | `int32` count, then count doubles; count 0 is null      |
//! | matrix   | `int32` rows, `int32` cols, then column-major doubles   |
//! | pose     | 16 doubles, column-major                                |
//! | line     | UTF-8 bytes terminated by `\n`                          |
//! | handle   | send: `int64` id; receive: `int64` id + `int32` type    |

use crate::buffer::BufferedTransport;
use crate::transport::Transport;
use crate::types::{Handle, ItemType, Matrix, Pose, Xyz};
use crate::WireError;

/// Doubles decoded per read while filling a declared-length payload.
const DOUBLES_PER_READ: usize = 512;

fn doubles_to_bytes(values: &[f64]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(values.len() * 8);
    for v in values {
        bytes.extend_from_slice(&v.to_be_bytes());
    }
    bytes
}

fn wire_count(field: &'static str, len: usize) -> Result<i32, WireError> {
    i32::try_from(len).map_err(|_| WireError::InvalidLength { field, len: len as i64 })
}

/// Write side of the codec.
pub trait Encoder {
    /// Append raw bytes.
    fn put(&mut self, bytes: &[u8]) -> Result<(), WireError>;

    fn put_i32(&mut self, value: i32) -> Result<(), WireError> {
        self.put(&value.to_be_bytes())
    }

    fn put_i64(&mut self, value: i64) -> Result<(), WireError> {
        self.put(&value.to_be_bytes())
    }

    fn put_u64(&mut self, value: u64) -> Result<(), WireError> {
        self.put(&value.to_be_bytes())
    }

    fn put_f64(&mut self, value: f64) -> Result<(), WireError> {
        self.put(&value.to_be_bytes())
    }

    /// Flags travel as `int32` 0/1.
    fn put_bool(&mut self, value: bool) -> Result<(), WireError> {
        self.put_i32(i32::from(value))
    }

    fn put_xyz(&mut self, xyz: &Xyz) -> Result<(), WireError> {
        self.put(&doubles_to_bytes(xyz))
    }

    /// Count-prefixed doubles. An empty slice is the null array.
    fn put_array(&mut self, values: &[f64]) -> Result<(), WireError> {
        let count = wire_count("array", values.len())?;
        let mut bytes = count.to_be_bytes().to_vec();
        bytes.extend(doubles_to_bytes(values));
        self.put(&bytes)
    }

    fn put_matrix(&mut self, matrix: &Matrix) -> Result<(), WireError> {
        let rows = wire_count("matrix rows", matrix.rows())?;
        let cols = wire_count("matrix cols", matrix.cols())?;
        let mut bytes = Vec::with_capacity(8 + matrix.col_major().len() * 8);
        bytes.extend_from_slice(&rows.to_be_bytes());
        bytes.extend_from_slice(&cols.to_be_bytes());
        bytes.extend(doubles_to_bytes(matrix.col_major()));
        self.put(&bytes)
    }

    /// Validated before any byte is written.
    fn put_pose(&mut self, pose: &Pose) -> Result<(), WireError> {
        pose.validate()?;
        self.put(&doubles_to_bytes(pose.col_major()))
    }

    /// Embedded linefeeds become spaces so the terminator stays unique.
    fn put_line(&mut self, text: &str) -> Result<(), WireError> {
        let mut bytes = text.replace('\n', " ").into_bytes();
        bytes.push(b'\n');
        self.put(&bytes)
    }

    /// Handles are sent by id alone.
    fn put_handle(&mut self, handle: &Handle) -> Result<(), WireError> {
        self.put_u64(handle.id)
    }
}

/// Read side of the codec.
pub trait Decoder {
    /// Fill `buf` exactly or fail.
    fn take(&mut self, buf: &mut [u8]) -> Result<(), WireError>;

    /// Read through the next `\n`, returning the text before it.
    fn take_line(&mut self) -> Result<String, WireError>;

    fn get_i32(&mut self) -> Result<i32, WireError> {
        let mut bytes = [0u8; 4];
        self.take(&mut bytes)?;
        Ok(i32::from_be_bytes(bytes))
    }

    fn get_i64(&mut self) -> Result<i64, WireError> {
        let mut bytes = [0u8; 8];
        self.take(&mut bytes)?;
        Ok(i64::from_be_bytes(bytes))
    }

    fn get_u64(&mut self) -> Result<u64, WireError> {
        let mut bytes = [0u8; 8];
        self.take(&mut bytes)?;
        Ok(u64::from_be_bytes(bytes))
    }

    fn get_f64(&mut self) -> Result<f64, WireError> {
        let mut bytes = [0u8; 8];
        self.take(&mut bytes)?;
        Ok(f64::from_be_bytes(bytes))
    }

    fn get_bool(&mut self) -> Result<bool, WireError> {
        Ok(self.get_i32()? != 0)
    }

    fn get_xyz(&mut self) -> Result<Xyz, WireError> {
        let values = self.get_doubles(3, "xyz")?;
        Ok([values[0], values[1], values[2]])
    }

    /// Read a non-negative `int32` count.
    fn get_count(&mut self, field: &'static str) -> Result<usize, WireError> {
        let count = self.get_i32()?;
        usize::try_from(count).map_err(|_| WireError::InvalidLength { field, len: count.into() })
    }

    /// Read `count` doubles of a field whose size was declared up front.
    ///
    /// End-of-stream inside the field is a framing fault, never a short value.
    fn get_doubles(&mut self, count: usize, field: &'static str) -> Result<Vec<f64>, WireError> {
        let expected = count
            .checked_mul(8)
            .ok_or(WireError::InvalidLength { field, len: count as i64 })?;
        let mut values = Vec::with_capacity(count.min(DOUBLES_PER_READ));
        let mut chunk = [0u8; DOUBLES_PER_READ * 8];
        let mut remaining = count;
        while remaining > 0 {
            let n = remaining.min(DOUBLES_PER_READ);
            let bytes = &mut chunk[..n * 8];
            self.take(bytes).map_err(|e| e.truncated(field, expected))?;
            values.extend(bytes.chunks_exact(8).map(|b| {
                let mut raw = [0u8; 8];
                raw.copy_from_slice(b);
                f64::from_be_bytes(raw)
            }));
            remaining -= n;
        }
        Ok(values)
    }

    /// Count-prefixed doubles; a zero count is the null array (`None`).
    fn get_array(&mut self) -> Result<Option<Vec<f64>>, WireError> {
        let count = self.get_count("array")?;
        if count == 0 {
            return Ok(None);
        }
        self.get_doubles(count, "array").map(Some)
    }

    fn get_matrix(&mut self) -> Result<Matrix, WireError> {
        let rows = self.get_count("matrix rows")?;
        let cols = self.get_count("matrix cols")?;
        let count = rows.checked_mul(cols).ok_or(WireError::InvalidLength {
            field: "matrix",
            len: (rows as i64).saturating_mul(cols as i64),
        })?;
        let data = self.get_doubles(count, "matrix")?;
        Matrix::new(rows, cols, data)
    }

    /// Poses are not validated on receive; the peer's values are kept as sent.
    fn get_pose(&mut self) -> Result<Pose, WireError> {
        let values = self.get_doubles(16, "pose")?;
        let mut col_major = [0.0; 16];
        col_major.copy_from_slice(&values);
        Ok(Pose::from_col_major(col_major))
    }

    fn get_line(&mut self) -> Result<String, WireError> {
        self.take_line()
    }

    fn get_handle(&mut self) -> Result<Handle, WireError> {
        let id = self.get_u64()?;
        let kind = ItemType::from(self.get_i32()?);
        Ok(Handle { id, kind })
    }
}

impl Encoder for Vec<u8> {
    fn put(&mut self, bytes: &[u8]) -> Result<(), WireError> {
        self.extend_from_slice(bytes);
        Ok(())
    }
}

/// A byte slice decodes as a finite stream; running out is end-of-stream.
impl Decoder for &[u8] {
    fn take(&mut self, buf: &mut [u8]) -> Result<(), WireError> {
        if self.len() < buf.len() {
            return Err(WireError::ConnectionClosed);
        }
        let (head, tail) = self.split_at(buf.len());
        buf.copy_from_slice(head);
        *self = tail;
        Ok(())
    }

    fn take_line(&mut self) -> Result<String, WireError> {
        let stream: &[u8] = *self;
        let end = stream.iter().position(|b| *b == b'\n').ok_or(WireError::ConnectionClosed)?;
        let line = std::str::from_utf8(&stream[..end]).map_err(|_| WireError::InvalidUtf8)?;
        *self = &stream[end + 1..];
        Ok(line.to_string())
    }
}

impl<T: Transport> Encoder for BufferedTransport<T> {
    fn put(&mut self, bytes: &[u8]) -> Result<(), WireError> {
        self.write(bytes)
    }
}

impl<T: Transport> Decoder for BufferedTransport<T> {
    fn take(&mut self, buf: &mut [u8]) -> Result<(), WireError> {
        self.read_exact(buf)
    }

    fn take_line(&mut self) -> Result<String, WireError> {
        self.read_line()
    }
}

#[cfg(test)]
#[path = "codec_tests.rs"]
mod tests;
