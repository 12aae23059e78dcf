//! Transcoding and field arithmetic for one field size.
//!
//! Secrets travel through three textual forms on their way to field
//! elements and back:
//!
//! ```text
//!   bytes ──hex──▶ hex groups ──binary──▶ bit string ──split──▶ chunks (field elements)
//!   bytes ◀──decode── hex groups ◀──hex_bits── bit string ◀──pad/join── chunks
//! ```
//!
//! Hex groups are `2 * bytes_per_char` digits wide and are emitted
//! last-character-first. That ordering is part of the share format shared
//! with other implementations and must not change.

use std::fmt;
use std::sync::Arc;

use zeroize::Zeroizing;

use crate::crypto::{blake2b, Prng, BLAKE2B_SIZE};
use crate::error::{Error, Result};
use crate::share::SharePoint;
use crate::table::Table;

/// Widest character group, in bytes, that decodes into a `u64`.
pub const MAX_BYTES_PER_CHAR: usize = 6;

/// Largest radix whose digits are also hex digits.
pub const MAX_ID_RADIX: u32 = 16;

/// Fresh PRNG bytes mixed into every [`Codec::random`] call, at minimum.
const MIN_RANDOM_SEED: usize = 8;

const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Largest padding multiple, in bits, a split accepts.
pub const MAX_PADDING: usize = 1 << 16;

/// Length of a `len`-long string left-padded to a multiple of `multiple`,
/// or `None` on overflow.
fn padded_len(len: usize, multiple: usize) -> Option<usize> {
    if multiple == 0 || len == 0 {
        return Some(len);
    }
    match len % multiple {
        0 => Some(len),
        rem => len.checked_add(multiple - rem),
    }
}

/// Reject padding multiples above [`MAX_PADDING`].
pub(crate) fn check_padding(padding: usize) -> Result<()> {
    if padding > MAX_PADDING {
        return Err(Error::argument(format!(
            "padding must be at most {MAX_PADDING} bits, got {padding}"
        )));
    }
    Ok(())
}

/// Left-pad `s` with `'0'` until its length is a multiple of `multiple`.
///
/// Empty strings and `multiple == 0` are returned unchanged, as is `s` when
/// the padded length would overflow.
pub(crate) fn pad_left(s: &str, multiple: usize) -> String {
    let width = padded_len(s.len(), multiple).unwrap_or(s.len());
    let mut out = String::with_capacity(width);
    out.extend(std::iter::repeat('0').take(width - s.len()));
    out.push_str(s);
    out
}

/// Render `n` in `radix` with lowercase digits.
pub(crate) fn to_radix(mut n: u32, radix: u32) -> String {
    debug_assert!((2..=36).contains(&radix));
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        digits.push(DIGITS[(n % radix) as usize]);
        n /= radix;
    }
    digits.reverse();
    digits.into_iter().map(char::from).collect()
}

/// Number of radix digits a share id occupies for a given field size.
pub(crate) fn id_width(bits: u32, radix: u32) -> usize {
    to_radix((1u32 << bits) - 1, radix).len()
}

fn check_radix(radix: u32) -> Result<()> {
    if (2..=36).contains(&radix) {
        Ok(())
    } else {
        Err(Error::argument(format!("radix must be in 2..=36, got {radix}")))
    }
}

/// Parse a run of digits, rejecting signs and whitespace.
fn parse_digits(s: &str, radix: u32) -> Result<u32> {
    if s.is_empty() || !s.chars().all(|c| c.is_digit(radix)) {
        return Err(Error::format(format!("{s:?} is not a base {radix} number")));
    }
    u32::from_str_radix(s, radix).map_err(|e| Error::format(format!("{s:?}: {e}")))
}

fn hex_value(chunk: &[u8]) -> Option<u64> {
    chunk
        .iter()
        .try_fold(0u64, |acc, &b| (b as char).to_digit(16).map(|d| (acc << 4) | d as u64))
}

/// Encoder/decoder bound to one field table and one set of text widths.
#[derive(Clone)]
pub struct Codec {
    table: Arc<Table>,
    radix: u32,
    bytes_per_char: usize,
    entropy: Arc<Zeroizing<Vec<u8>>>,
    prng: Arc<dyn Prng>,
}

impl fmt::Debug for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Codec")
            .field("bits", &self.bits())
            .field("radix", &self.radix)
            .field("bytes_per_char", &self.bytes_per_char)
            .field("entropy_len", &self.entropy.len())
            .finish_non_exhaustive()
    }
}

impl Codec {
    /// Build a codec.
    ///
    /// `entropy` is captured for the codec's lifetime and mixed into every
    /// coefficient drawn from `prng`.
    pub fn new(
        table: Arc<Table>,
        radix: u32,
        bytes_per_char: usize,
        entropy: Vec<u8>,
        prng: Arc<dyn Prng>,
    ) -> Result<Self> {
        let entropy = Zeroizing::new(entropy);
        if !(2..=MAX_ID_RADIX).contains(&radix) {
            return Err(Error::config(format!(
                "radix must be in 2..={MAX_ID_RADIX}, got {radix}"
            )));
        }
        if !(1..=MAX_BYTES_PER_CHAR).contains(&bytes_per_char) {
            return Err(Error::config(format!(
                "bytes per char must be in 1..={MAX_BYTES_PER_CHAR}, got {bytes_per_char}"
            )));
        }
        if entropy.is_empty() {
            return Err(Error::config("entropy must not be empty"));
        }
        Ok(Self {
            table,
            radix,
            bytes_per_char,
            entropy: Arc::new(entropy),
            prng,
        })
    }

    pub fn bits(&self) -> u32 {
        self.table.bits()
    }

    pub fn radix(&self) -> u32 {
        self.radix
    }

    pub fn bytes_per_char(&self) -> usize {
        self.bytes_per_char
    }

    pub fn table(&self) -> &Arc<Table> {
        &self.table
    }

    pub fn entropy(&self) -> &[u8] {
        &self.entropy
    }

    pub fn prng(&self) -> &Arc<dyn Prng> {
        &self.prng
    }

    // -----------------------------------------------------------------------
    // Bit strings
    // -----------------------------------------------------------------------

    /// Left-pad to a multiple of `multiple`, defaulting to the field size.
    pub fn pad(&self, s: &str, multiple: Option<usize>) -> Result<String> {
        let multiple = multiple.filter(|&m| m > 0).unwrap_or(self.bits() as usize);
        check_padding(multiple)?;
        Ok(pad_left(s, multiple))
    }

    /// Cut `s` into `bits`-wide chunks from the right, after left-padding to a
    /// multiple of `padding` (0 disables padding).
    ///
    /// The least significant chunk comes first; the last chunk holds whatever
    /// is left over on the left and may be narrower.
    pub fn split(&self, s: &str, padding: usize, radix: u32) -> Result<Vec<u32>> {
        check_radix(radix)?;
        if !s.is_ascii() {
            return Err(Error::format("cannot split non-ASCII text"));
        }
        check_padding(padding)?;
        if padded_len(s.len(), padding).is_none() {
            return Err(Error::argument("padded bit string length overflows"));
        }
        let bits = self.bits() as usize;
        let padded = Zeroizing::new(if padding > 0 {
            pad_left(s, padding)
        } else {
            s.to_string()
        });
        if padded.is_empty() {
            return Err(Error::format("nothing to split"));
        }

        let mut parts = Vec::with_capacity(padded.len() / bits + 1);
        let mut i = padded.len();
        while i > bits {
            parts.push(parse_digits(&padded[i - bits..i], radix)?);
            i -= bits;
        }
        parts.push(parse_digits(&padded[..i], radix)?);
        Ok(parts)
    }

    // -----------------------------------------------------------------------
    // Field arithmetic
    // -----------------------------------------------------------------------

    /// Evaluate the polynomial with coefficients `coef` (constant term first)
    /// at `x` using Horner's rule.
    pub fn horner(&self, x: u32, coef: &[u32]) -> u32 {
        coef.iter()
            .rev()
            .fold(None, |acc, &c| {
                Some(match acc {
                    None => c,
                    Some(b) => self.table.mul(x, b) ^ c,
                })
            })
            .unwrap_or(0)
    }

    /// Evaluate at `x` the polynomial interpolating `points`.
    ///
    /// Points with `y == 0` contribute nothing. A term whose basis
    /// polynomial would divide by zero (`x` equal to another point's x, or
    /// two points sharing an x) is dropped.
    pub fn lagrange(&self, x: u32, points: &[SharePoint]) -> u32 {
        (0..points.len())
            .filter_map(|i| self.lagrange_term(x, i, points))
            .fold(0, |sum, term| sum ^ term)
    }

    fn lagrange_term(&self, x: u32, i: usize, points: &[SharePoint]) -> Option<u32> {
        let n = self.table.max_shares() as i64;
        let xi = points[i].x;
        let mut product = self.table.log(points[i].y)? as i64;

        for (j, pj) in points.iter().enumerate() {
            if i == j {
                continue;
            }
            if x == pj.x {
                return None;
            }
            let num = self.table.log(x ^ pj.x)? as i64;
            let den = self.table.log(xi ^ pj.x)? as i64;
            product = (product + num - den).rem_euclid(n);
        }

        Some(self.table.exp(product as u32))
    }

    /// Hide `secret0` as the constant term of a random polynomial of degree
    /// `threshold - 1` and evaluate it at `x = 1..=shares`.
    pub fn partition(&self, secret0: u32, threshold: u32, shares: u32) -> Result<Vec<SharePoint>> {
        let max = self.table.max_shares();
        if threshold == 0 || threshold > max {
            return Err(Error::argument(format!(
                "threshold must be in 1..={max}, got {threshold}"
            )));
        }
        if shares == 0 || shares > max {
            return Err(Error::argument(format!("shares must be in 1..={max}, got {shares}")));
        }
        if secret0 > max {
            return Err(Error::argument(format!(
                "secret chunk {secret0} does not fit in GF(2^{})",
                self.bits()
            )));
        }

        let mut coef = Zeroizing::new(Vec::with_capacity(threshold as usize));
        coef.push(secret0);
        for _ in 1..threshold {
            coef.push(self.random_element()?);
        }

        Ok((1..=shares)
            .map(|x| SharePoint {
                x,
                y: self.horner(x, &coef),
            })
            .collect())
    }

    // -----------------------------------------------------------------------
    // Randomness
    // -----------------------------------------------------------------------

    /// `size` pseudo-random bytes: BLAKE2b over the codec entropy and fresh
    /// PRNG output, repeated to length.
    ///
    /// Only for polynomial coefficients.
    pub fn random(&self, size: usize) -> Result<Zeroizing<Vec<u8>>> {
        if size == 0 {
            return Err(Error::argument("random: size must be larger than 0"));
        }
        let want = size.max(MIN_RANDOM_SEED);
        let fresh = Zeroizing::new(self.prng.random_bytes(want)?);
        if fresh.len() != want {
            return Err(Error::argument(format!(
                "prng returned {} bytes, expected {want}",
                fresh.len()
            )));
        }
        let digest = Zeroizing::new(blake2b(&[self.entropy.as_slice(), fresh.as_slice()], BLAKE2B_SIZE)?);
        Ok(Zeroizing::new(
            digest.iter().copied().cycle().take(size).collect(),
        ))
    }

    /// A uniformly drawn field element.
    fn random_element(&self) -> Result<u32> {
        let size = (self.bits() as usize).div_ceil(8);
        let bytes = self.random(size)?;
        let value = bytes.iter().fold(0u32, |acc, &b| (acc << 8) | b as u32);
        Ok(value & self.table.max_shares())
    }

    // -----------------------------------------------------------------------
    // Wire format
    // -----------------------------------------------------------------------

    /// Assemble one share: field marker, padded id, hex payload, as bytes.
    ///
    /// The text is prefixed with a `'0'` nibble. If that still leaves an odd
    /// number of nibbles, one more `'0'` goes in front of the payload, where
    /// it only adds leading zero bits.
    pub fn encode(&self, id: u32, data: &str) -> Result<Vec<u8>> {
        let max = self.table.max_shares();
        if id > max {
            return Err(Error::argument(format!("share id {id} exceeds {max}")));
        }
        if data.is_empty() || !data.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::format("share data must be non-empty hex"));
        }

        let bits = self.bits();
        let marker = DIGITS[bits as usize].to_ascii_uppercase() as char;
        let id_text = pad_left(&to_radix(id, self.radix), id_width(bits, self.radix));

        let mut text = String::with_capacity(3 + id_text.len() + data.len());
        text.push('0');
        text.push(marker);
        text.push_str(&id_text);
        if (text.len() + data.len()) % 2 == 1 {
            text.push('0');
        }
        text.push_str(data);

        hex::decode(&text).map_err(|e| Error::format(format!("share text {text:?}: {e}")))
    }

    /// Hex groups of `2 * bytes_per_char` digits, returned in character
    /// order (the rightmost group is the first character).
    pub fn decode_units(&self, hex: &str) -> Result<Vec<u64>> {
        let width = 2 * self.bytes_per_char;
        let padded = Zeroizing::new(pad_left(hex, width));
        padded
            .as_bytes()
            .chunks(width)
            .rev()
            .map(|chunk| hex_value(chunk).ok_or_else(|| Error::format("expected hex digits")))
            .collect()
    }

    /// Decode hex groups into text, one UTF-16 code unit per group.
    ///
    /// Groups wider than 16 bits are truncated to their low 16 bits.
    pub fn decode(&self, hex: &str) -> Result<String> {
        let units: Vec<u16> = self.decode_units(hex)?.into_iter().map(|u| u as u16).collect();
        Ok(String::from_utf16_lossy(&units))
    }

    /// Decode hex groups back into secret bytes.
    ///
    /// When every group fits in a byte the groups are the bytes. Otherwise
    /// the groups are text characters and the result is their UTF-8 encoding.
    pub fn decode_secret(&self, hex: &str) -> Result<Zeroizing<Vec<u8>>> {
        let units = Zeroizing::new(self.decode_units(hex)?);
        if units.iter().all(|&u| u <= 0xff) {
            return Ok(Zeroizing::new(units.iter().map(|&u| u as u8).collect()));
        }
        Ok(Zeroizing::new(self.decode(hex)?.into_bytes()))
    }

    /// Hex groups for raw bytes, last byte first.
    pub fn hex(&self, bytes: &[u8]) -> String {
        let width = 2 * self.bytes_per_char;
        bytes
            .iter()
            .rev()
            .map(|b| pad_left(&format!("{b:x}"), width))
            .collect()
    }

    /// Hex groups for text, one group per UTF-16 code unit, last unit first.
    pub fn hex_utf8(&self, text: &str) -> String {
        let width = 2 * self.bytes_per_char;
        let units: Vec<u16> = text.encode_utf16().collect();
        units
            .iter()
            .rev()
            .map(|u| pad_left(&format!("{u:x}"), width))
            .collect()
    }

    /// Hex rendering of a bit string, left-padded to whole nibbles.
    pub fn hex_bits(&self, bits: &str) -> Result<String> {
        if !bits.bytes().all(|b| b == b'0' || b == b'1') {
            return Err(Error::format("expected a string of binary digits"));
        }
        let padded = Zeroizing::new(pad_left(bits, 4));
        Ok(padded
            .as_bytes()
            .chunks(4)
            .map(|nibble| {
                let v = nibble.iter().fold(0usize, |acc, &b| (acc << 1) | (b - b'0') as usize);
                DIGITS[v] as char
            })
            .collect())
    }

    /// Bit string for a run of `radix` digits, each widened to a multiple of
    /// four bits.
    pub fn binary(&self, digits: &str, radix: u32) -> Result<String> {
        check_radix(radix)?;
        digits
            .chars()
            .map(|c| {
                c.to_digit(radix)
                    .map(|v| pad_left(&format!("{v:b}"), 4))
                    .ok_or_else(|| Error::format(format!("{c:?} is not a base {radix} digit")))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::random_bytes;
    use proptest::prelude::*;
    use rand_chacha::rand_core::{RngCore, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use std::sync::Mutex;

    fn seeded_prng(seed: u64) -> Arc<dyn Prng> {
        let rng = Mutex::new(ChaCha8Rng::seed_from_u64(seed));
        Arc::new(move |size: usize| -> Result<Vec<u8>> {
            let mut buf = vec![0u8; size];
            rng.lock().unwrap().fill_bytes(&mut buf);
            Ok(buf)
        })
    }

    fn codec(bits: u32) -> Codec {
        let table = Arc::new(Table::new(bits).unwrap());
        Codec::new(table, 16, 2, vec![0x5a; 32], seeded_prng(1)).unwrap()
    }

    #[test]
    fn pad_behaviour() {
        let c = codec(8);
        assert_eq!(c.pad("101", None).unwrap(), "00000101");
        assert_eq!(c.pad("101", Some(4)).unwrap(), "0101");
        assert_eq!(c.pad("1010", Some(4)).unwrap(), "1010");
        assert_eq!(c.pad("", Some(4)).unwrap(), "");
        assert_eq!(c.pad("1", Some(0)).unwrap(), "00000001");
        assert_eq!(pad_left("123456789", 4), "000123456789");
        assert!(c.pad("1", Some(MAX_PADDING + 1)).is_err());
    }

    #[test]
    fn oversized_padding_is_an_error() {
        let c = codec(8);
        for padding in [MAX_PADDING + 1, 1 << 40, usize::MAX] {
            assert!(
                matches!(c.split("101", padding, 2), Err(Error::InvalidArgument(_))),
                "padding={padding}"
            );
        }
        assert_eq!(c.split("1", MAX_PADDING, 2).unwrap().len(), MAX_PADDING / 8);
        assert_eq!(padded_len(usize::MAX, 2), None);
    }

    #[test]
    fn split_cuts_from_the_right() {
        let c = codec(3);
        // 1 101 011 -> [0b011, 0b101, 0b1]
        assert_eq!(c.split("1101011", 0, 2).unwrap(), vec![3, 5, 1]);
        // Padding to 9 bits adds two leading zeros: 001 101 011.
        assert_eq!(c.split("1101011", 9, 2).unwrap(), vec![3, 5, 1]);
        assert_eq!(c.split("1101011", 12, 2).unwrap(), vec![3, 5, 1, 0]);
        assert!(c.split("", 0, 2).is_err());
        assert!(c.split("1201", 0, 2).is_err());
    }

    #[test]
    fn horner_matches_direct_evaluation() {
        let c = codec(8);
        let t = c.table().clone();
        let coef = [0x42, 0x17, 0xe3, 0x00, 0x99];
        for x in 1..=255u32 {
            let mut direct = 0;
            let mut power = 1;
            for &a in &coef {
                direct ^= t.mul(a, power);
                power = t.mul(power, x);
            }
            assert_eq!(c.horner(x, &coef), direct, "x={x}");
        }
        assert_eq!(c.horner(7, &[]), 0);
        assert_eq!(c.horner(7, &[0x33]), 0x33);
    }

    #[test]
    fn lagrange_recovers_constant_term() {
        let c = codec(8);
        let coef = [0x6b, 0x11, 0x00, 0xfe];
        let points: Vec<SharePoint> = [3u32, 9, 200, 17]
            .iter()
            .map(|&x| SharePoint { x, y: c.horner(x, &coef) })
            .collect();
        assert_eq!(c.lagrange(0, &points), 0x6b);
        // Reversed order gives the same answer.
        let reversed: Vec<SharePoint> = points.iter().rev().copied().collect();
        assert_eq!(c.lagrange(0, &reversed), 0x6b);
        // Interpolating at a sample point drops every other term.
        assert_eq!(c.lagrange(9, &points), points[1].y);
    }

    #[test]
    fn lagrange_ignores_zero_values() {
        let c = codec(8);
        let points = [SharePoint { x: 1, y: 0 }, SharePoint { x: 2, y: 0 }];
        assert_eq!(c.lagrange(0, &points), 0);
        assert_eq!(c.lagrange(0, &[]), 0);
    }

    #[test]
    fn partition_evaluates_at_sequential_ids() {
        let c = codec(8);
        let points = c.partition(0xab, 3, 6).unwrap();
        assert_eq!(points.iter().map(|p| p.x).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(c.lagrange(0, &points[1..4]), 0xab);
        assert_eq!(c.lagrange(0, &points[3..]), 0xab);
    }

    #[test]
    fn partition_threshold_one_copies_the_secret() {
        let c = codec(8);
        let points = c.partition(0x5c, 1, 4).unwrap();
        assert!(points.iter().all(|p| p.y == 0x5c));
    }

    #[test]
    fn partition_rejects_bad_counts() {
        let c = codec(4);
        assert!(matches!(c.partition(1, 0, 3), Err(Error::InvalidArgument(_))));
        assert!(matches!(c.partition(1, 2, 0), Err(Error::InvalidArgument(_))));
        assert!(matches!(c.partition(1, 2, 16), Err(Error::InvalidArgument(_))));
        assert!(matches!(c.partition(1, 16, 3), Err(Error::InvalidArgument(_))));
        assert!(matches!(c.partition(16, 2, 3), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn random_repeats_the_digest() {
        let c = codec(8);
        let long = c.random(70).unwrap();
        assert_eq!(long.len(), 70);
        assert_eq!(long[..32], long[32..64]);
        assert_eq!(long[..6], long[64..]);
        assert!(c.random(0).is_err());
    }

    #[test]
    fn random_depends_on_entropy() {
        let table = Arc::new(Table::new(8).unwrap());
        let a = Codec::new(table.clone(), 16, 2, vec![1; 32], seeded_prng(9)).unwrap();
        let b = Codec::new(table, 16, 2, vec![2; 32], seeded_prng(9)).unwrap();
        assert_ne!(*a.random(32).unwrap(), *b.random(32).unwrap());
    }

    #[test]
    fn random_rejects_short_prng_output() {
        let table = Arc::new(Table::new(8).unwrap());
        let short = Arc::new(|_: usize| -> Result<Vec<u8>> { Ok(vec![1, 2]) });
        let c = Codec::new(table, 16, 2, vec![1; 32], short).unwrap();
        assert!(c.random(4).is_err());
    }

    #[test]
    fn random_elements_stay_in_the_field() {
        for bits in [3, 9, 12] {
            let c = codec(bits);
            for _ in 0..200 {
                assert!(c.random_element().unwrap() <= c.table().max_shares());
            }
        }
    }

    #[test]
    fn encode_header_layout() {
        let c = codec(8);
        let share = c.encode(1, "a4a3").unwrap();
        assert_eq!(hex::encode(&share), "0801a4a3");

        let c = codec(12);
        // "0" + "C" + "00a" + "ff" is odd; a zero nibble goes before the data.
        let share = c.encode(10, "ff").unwrap();
        assert_eq!(hex::encode(&share), "0c00a0ff");
    }

    #[test]
    fn encode_rejects_bad_input() {
        let c = codec(4);
        assert!(c.encode(16, "ab").is_err());
        assert!(c.encode(1, "").is_err());
        assert!(c.encode(1, "xy").is_err());
    }

    #[test]
    fn hex_reverses_groups() {
        let c = codec(8);
        assert_eq!(c.hex(b"key"), "00790065006b");
        assert_eq!(c.hex_utf8("key"), "00790065006b");
        assert_eq!(c.decode("00790065006b").unwrap(), "key");
        assert_eq!(*c.decode_secret("00790065006b").unwrap(), b"key".to_vec());
    }

    #[test]
    fn decode_secret_keeps_raw_bytes() {
        let c = codec(8);
        let bytes = [0xc3, 0xa9, 0x00, 0xff];
        assert_eq!(*c.decode_secret(&c.hex(&bytes)).unwrap(), bytes.to_vec());
    }

    #[test]
    fn decode_secret_treats_wide_groups_as_text() {
        let c = codec(8);
        // U+00E9 fits in a byte, U+20AC does not.
        let hex = c.hex_utf8("é€");
        assert_eq!(hex, "20ac00e9");
        assert_eq!(*c.decode_secret(&hex).unwrap(), "é€".as_bytes().to_vec());
    }

    #[test]
    fn bits_to_hex_and_back() {
        let c = codec(8);
        assert_eq!(c.hex_bits("1").unwrap(), "1");
        assert_eq!(c.hex_bits("11111").unwrap(), "1f");
        assert_eq!(c.hex_bits("").unwrap(), "");
        assert!(c.hex_bits("102").is_err());
        assert_eq!(c.binary("1f", 16).unwrap(), "00011111");
        assert_eq!(c.binary("07", 8).unwrap(), "00000111");
        assert!(c.binary("g", 16).is_err());
        assert!(c.binary("1", 40).is_err());
    }

    #[test]
    fn codec_rejects_bad_configuration() {
        let table = Arc::new(Table::new(8).unwrap());
        let prng: Arc<dyn Prng> = Arc::new(random_bytes);
        for (radix, bpc, entropy) in [
            (1, 2, vec![1u8]),
            (17, 2, vec![1u8]),
            (16, 0, vec![1u8]),
            (16, 7, vec![1u8]),
            (16, 2, vec![]),
        ] {
            assert!(matches!(
                Codec::new(table.clone(), radix, bpc, entropy, prng.clone()),
                Err(Error::InvalidConfig(_))
            ));
        }
    }

    proptest! {
        #[test]
        fn decode_inverts_hex_for_ascii(text in "[ -~]{0,64}", bpc in 1usize..=6) {
            let table = Arc::new(Table::new(8).unwrap());
            let c = Codec::new(table, 16, bpc, vec![1; 8], seeded_prng(3)).unwrap();
            prop_assert_eq!(c.decode(&c.hex_utf8(&text)).unwrap(), text);
        }

        #[test]
        fn binary_inverts_hex_bits(bytes in proptest::collection::vec(any::<u8>(), 1..32)) {
            let c = codec(8);
            let hex = hex::encode(&bytes);
            let bits = c.binary(&hex, 16).unwrap();
            prop_assert_eq!(bits.len(), hex.len() * 4);
            prop_assert_eq!(c.hex_bits(&bits).unwrap(), hex);
        }
    }
}
