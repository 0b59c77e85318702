// Copyright 2025 Wavebench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Binary marshalling for values crossing an execution boundary.
//!
//! Layout (all integers and floats little-endian):
//!
//! ```text
//! signal:        0x00 | len: u64 | len x f64
//! coefficients:  0x01 | bands: u32 | bands x (len: u64 | len x f64)
//! ```
//!
//! Floats are written as their IEEE-754 bit patterns, so a decoded value is
//! bit-for-bit identical to the encoded one.

use crate::dwt::Coefficients;
use crate::error::{Error, Result};
use bytes::{Buf, BufMut, Bytes, BytesMut};

const TAG_SIGNAL: u8 = 0;
const TAG_COEFFICIENTS: u8 = 1;

/// A value that can be bound inside an isolated context.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A plain sample sequence.
    Signal(Vec<f64>),
    /// A multilevel coefficient set.
    Coefficients(Coefficients),
}

impl Value {
    /// Short type name used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Signal(_) => "signal",
            Value::Coefficients(_) => "coefficients",
        }
    }

    /// Encode this value.
    pub fn encode(&self) -> Bytes {
        match self {
            Value::Signal(samples) => encode_signal(samples),
            Value::Coefficients(coeffs) => encode_coefficients(coeffs),
        }
    }

    /// Decode a value produced by [`Value::encode`], [`encode_signal`] or
    /// [`encode_coefficients`].
    pub fn decode(mut payload: Bytes) -> Result<Self> {
        if !payload.has_remaining() {
            return Err(Error::Codec("empty payload".to_string()));
        }
        let value = match payload.get_u8() {
            TAG_SIGNAL => Value::Signal(read_band(&mut payload)?),
            TAG_COEFFICIENTS => {
                let bands = read_u32(&mut payload)? as usize;
                if bands == 0 {
                    return Err(Error::Codec("coefficient set without bands".to_string()));
                }
                let approx = read_band(&mut payload)?;
                let details = (1..bands)
                    .map(|_| read_band(&mut payload))
                    .collect::<Result<Vec<_>>>()?;
                Value::Coefficients(Coefficients { approx, details })
            }
            tag => return Err(Error::Codec(format!("unknown tag {tag:#04x}"))),
        };
        if payload.has_remaining() {
            return Err(Error::Codec(format!(
                "{} trailing bytes after {}",
                payload.remaining(),
                value.kind()
            )));
        }
        Ok(value)
    }
}

/// Encode a sample sequence without taking ownership of it.
pub fn encode_signal(samples: &[f64]) -> Bytes {
    let mut buf = BytesMut::with_capacity(1 + 8 + samples.len() * 8);
    buf.put_u8(TAG_SIGNAL);
    write_band(&mut buf, samples);
    buf.freeze()
}

/// Encode a coefficient set without taking ownership of it.
pub fn encode_coefficients(coeffs: &Coefficients) -> Bytes {
    let bands = coeffs.level() + 1;
    let mut buf = BytesMut::with_capacity(1 + 4 + bands * 8 + coeffs.total_len() * 8);
    buf.put_u8(TAG_COEFFICIENTS);
    buf.put_u32_le(bands as u32);
    for band in coeffs.bands() {
        write_band(&mut buf, band);
    }
    buf.freeze()
}

fn write_band(buf: &mut BytesMut, band: &[f64]) {
    buf.put_u64_le(band.len() as u64);
    for &x in band {
        buf.put_f64_le(x);
    }
}

fn read_u32(payload: &mut Bytes) -> Result<u32> {
    if payload.remaining() < 4 {
        return Err(Error::Codec("truncated band count".to_string()));
    }
    Ok(payload.get_u32_le())
}

fn read_band(payload: &mut Bytes) -> Result<Vec<f64>> {
    if payload.remaining() < 8 {
        return Err(Error::Codec("truncated band length".to_string()));
    }
    let len = payload.get_u64_le() as usize;
    if payload.remaining() / 8 < len {
        return Err(Error::Codec(format!(
            "band of {len} samples needs {} bytes, {} available",
            len.saturating_mul(8),
            payload.remaining()
        )));
    }
    Ok((0..len).map(|_| payload.get_f64_le()).collect())
}
