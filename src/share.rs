//! Share representations: polynomial points and parsed wire-format shares.
//!
//! ## Wire format
//!
//! ```text
//! [0]<B><ID><DATA>
//! ```
//!
//! | Field | Width                         | Description                               |
//! |-------|-------------------------------|-------------------------------------------|
//! | `0`   | 1 nibble, optional            | parity nibble added for byte transport    |
//! | `B`   | 1 char                        | field exponent `bits`, base 36, uppercase |
//! | `ID`  | digits of `2^bits - 1` in radix | share x-coordinate, zero-padded         |
//! | `DATA`| 1+ hex digits                 | bit-packed y-values, one per chunk        |
//!
//! Byte shares are the hex decoding of the whole string, parity nibble
//! included.

use crate::codec::id_width;
use crate::error::{Error, Result};
use crate::table::primitive_polynomial;

/// One `(x, y)` evaluation of a chunk polynomial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SharePoint {
    pub x: u32,
    pub y: u32,
}

/// A share parsed from its wire form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareData {
    /// Share x-coordinate.
    pub id: u32,
    /// Field exponent the share was produced with.
    pub bits: u32,
    /// Hex payload, most significant chunk first.
    pub data: String,
}

impl ShareData {
    /// Parse share text, with or without the leading parity nibble.
    ///
    /// `radix` is the base the id was rendered in.
    pub fn parse(text: &str, radix: u32) -> Result<Self> {
        if !(2..=36).contains(&radix) {
            return Err(Error::argument(format!("radix must be in 2..=36, got {radix}")));
        }
        let text = text.trim();
        if !text.is_ascii() {
            return Err(Error::format("share contains non-ASCII characters"));
        }
        let text = text.strip_prefix('0').unwrap_or(text);

        let marker = text
            .chars()
            .next()
            .ok_or_else(|| Error::format("share is empty"))?;
        let bits = marker
            .to_digit(36)
            .ok_or_else(|| Error::format(format!("bad field marker {marker:?}")))?;
        primitive_polynomial(bits)
            .map_err(|_| Error::format(format!("unsupported field size 2^{bits}")))?;

        let width = id_width(bits, radix);
        let rest = &text[1..];
        if rest.len() <= width {
            return Err(Error::format(format!(
                "share is too short: expected {width} id digits followed by data"
            )));
        }

        let (id_text, data) = rest.split_at(width);
        if !id_text.chars().all(|c| c.is_digit(radix)) {
            return Err(Error::format(format!("share id {id_text:?} is not base {radix}")));
        }
        let id = u32::from_str_radix(id_text, radix)
            .map_err(|e| Error::format(format!("share id {id_text:?}: {e}")))?;
        let max_id = (1u32 << bits) - 1;
        if id == 0 || id > max_id {
            return Err(Error::format(format!(
                "share id {id} is outside 1..={max_id} for GF(2^{bits})"
            )));
        }
        if !data.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::format("share data is not hex"));
        }

        Ok(Self {
            id,
            bits,
            data: data.to_string(),
        })
    }
}

/// Anything [`Context::recover`](crate::Context::recover) accepts as a share.
///
/// Text is parsed directly, bytes are hex-encoded first and already
/// parsed [`ShareData`] passes through.
pub trait ShareSource {
    fn share_data(&self, radix: u32) -> Result<ShareData>;
}

impl ShareSource for ShareData {
    fn share_data(&self, _radix: u32) -> Result<ShareData> {
        Ok(self.clone())
    }
}

impl ShareSource for str {
    fn share_data(&self, radix: u32) -> Result<ShareData> {
        ShareData::parse(self, radix)
    }
}

impl ShareSource for String {
    fn share_data(&self, radix: u32) -> Result<ShareData> {
        ShareData::parse(self, radix)
    }
}

impl ShareSource for [u8] {
    fn share_data(&self, radix: u32) -> Result<ShareData> {
        ShareData::parse(&hex::encode(self), radix)
    }
}

impl ShareSource for Vec<u8> {
    fn share_data(&self, radix: u32) -> Result<ShareData> {
        self.as_slice().share_data(radix)
    }
}

impl<T: ShareSource + ?Sized> ShareSource for &T {
    fn share_data(&self, radix: u32) -> Result<ShareData> {
        (**self).share_data(radix)
    }
}
