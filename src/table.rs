//! Discrete log / antilog tables for GF(2^bits).
//!
//! The nonzero elements of GF(2^bits) form a cyclic group of order
//! `2^bits - 1` generated by `x` modulo a primitive polynomial, so one pass of
//! shift-and-reduce enumerates every power of the generator. Multiplication
//! then becomes `exp((log a + log b) mod (2^bits - 1))`.

use crate::error::{Error, Result};

/// Smallest field exponent with a tabulated primitive polynomial.
pub const MIN_TABLE_BITS: u32 = 2;

/// Largest field exponent with a tabulated primitive polynomial.
pub const MAX_TABLE_BITS: u32 = 30;

/// Low-order terms (sans `x^bits`) of a primitive polynomial for each field
/// exponent. Exponents 0 and 1 have no entry.
///
/// GF(4) uses `x^2 + x + 1`; `x^2 + 1` is reducible and only generates a
/// cycle of length 2.
#[rustfmt::skip]
pub const PRIMITIVE_POLYNOMIALS: [Option<u32>; 31] = [
    None, None, Some(3), Some(3), Some(3), Some(5), Some(3), Some(3),
    Some(29), Some(17), Some(9), Some(5), Some(83), Some(27), Some(43), Some(3),
    Some(45), Some(9), Some(39), Some(39), Some(9), Some(5), Some(3), Some(33),
    Some(27), Some(9), Some(71), Some(39), Some(9), Some(5), Some(83),
];

/// Look up the primitive polynomial for `bits`.
pub fn primitive_polynomial(bits: u32) -> Result<u32> {
    PRIMITIVE_POLYNOMIALS
        .get(bits as usize)
        .copied()
        .flatten()
        .ok_or_else(|| {
            Error::config(format!(
                "bits (2^{bits}) out of range, expecting {MIN_TABLE_BITS}..={MAX_TABLE_BITS}"
            ))
        })
}

/// Log and exp tables for one field size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    bits: u32,
    logs: Vec<u32>,
    exps: Vec<u32>,
}

impl Table {
    /// Build the tables for GF(2^bits).
    ///
    /// Costs `O(2^bits)` time and memory; `bits = 30` allocates 8 GiB.
    pub fn new(bits: u32) -> Result<Self> {
        let primitive = primitive_polynomial(bits)?;
        let size = 1usize << bits;
        let max = (size - 1) as u32;

        let mut logs = vec![0u32; size];
        let mut exps = vec![0u32; size];

        let mut x = 1u32;
        for i in 0..size {
            exps[i] = x;
            // The final step wraps back to x = 1; keep log(1) = 0.
            if i < size - 1 {
                logs[x as usize] = i as u32;
            }
            x <<= 1;
            if x as usize >= size {
                x = (x ^ primitive) & max;
            }
        }

        Ok(Self { bits, logs, exps })
    }

    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// Number of field elements, `2^bits`.
    pub fn size(&self) -> usize {
        self.logs.len()
    }

    /// Order of the multiplicative group, `2^bits - 1`. Also the largest
    /// share id and the modulus for log arithmetic.
    pub fn max_shares(&self) -> u32 {
        (self.size() - 1) as u32
    }

    /// Raw log table. Entry 0 is a placeholder; zero has no logarithm.
    pub fn logs(&self) -> &[u32] {
        &self.logs
    }

    /// Raw antilog table. `exps[max_shares] == exps[0] == 1`.
    pub fn exps(&self) -> &[u32] {
        &self.exps
    }

    /// Discrete log of `x`, or `None` for zero and out-of-field values.
    #[inline]
    pub fn log(&self, x: u32) -> Option<u32> {
        if x == 0 {
            return None;
        }
        self.logs.get(x as usize).copied()
    }

    /// Generator raised to `i`, reduced modulo the group order.
    #[inline]
    pub fn exp(&self, i: u32) -> u32 {
        self.exps[(i % self.max_shares()) as usize]
    }

    /// Field product. Zero absorbs.
    #[inline]
    pub fn mul(&self, a: u32, b: u32) -> u32 {
        match (self.log(a), self.log(b)) {
            (Some(la), Some(lb)) => self.exp(la + lb),
            _ => 0,
        }
    }
}
