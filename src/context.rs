//! Configuration plus the split / recover pipeline.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace, warn};
use zeroize::Zeroizing;

use crate::codec::{check_padding, Codec, MAX_BYTES_PER_CHAR, MAX_ID_RADIX, MAX_PADDING};
use crate::crypto::{self, Prng};
use crate::error::{Error, Result};
use crate::secret::{Encoding, Secret, SecretInput};
use crate::share::{SharePoint, ShareSource};
use crate::table::{primitive_polynomial, Table};

pub const DEFAULT_BITS: u32 = 8;
pub const DEFAULT_RADIX: u32 = 16;
pub const DEFAULT_MIN_BITS: u32 = 3;
pub const DEFAULT_MAX_BITS: u32 = 20;
pub const DEFAULT_PADDING: usize = 128;
pub const DEFAULT_BYTES_PER_CHAR: usize = 2;
pub const DEFAULT_ENTROPY_SIZE: usize = 32;

/// Everything a [`Context`] is built from.
///
/// Unset `entropy` is drawn from `prng`; unset `prng` is the OS source.
/// A supplied `codec` brings its own table, entropy and prng, and must agree
/// with `bits`, `radix` and `bytes_per_char`.
#[derive(Clone)]
pub struct Options {
    pub bits: u32,
    pub radix: u32,
    /// Advisory lower bound on `bits`; only warned about.
    pub min_bits: u32,
    /// Advisory upper bound on `bits`; only warned about.
    pub max_bits: u32,
    /// Default bit-string padding for [`Context::shares`].
    pub padding: usize,
    pub bytes_per_char: usize,
    pub max_bytes_per_char: usize,
    pub entropy: Option<Vec<u8>>,
    pub prng: Option<Arc<dyn Prng>>,
    pub table: Option<Arc<Table>>,
    pub codec: Option<Codec>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            bits: DEFAULT_BITS,
            radix: DEFAULT_RADIX,
            min_bits: DEFAULT_MIN_BITS,
            max_bits: DEFAULT_MAX_BITS,
            padding: DEFAULT_PADDING,
            bytes_per_char: DEFAULT_BYTES_PER_CHAR,
            max_bytes_per_char: MAX_BYTES_PER_CHAR,
            entropy: None,
            prng: None,
            table: None,
            codec: None,
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("bits", &self.bits)
            .field("radix", &self.radix)
            .field("min_bits", &self.min_bits)
            .field("max_bits", &self.max_bits)
            .field("padding", &self.padding)
            .field("bytes_per_char", &self.bytes_per_char)
            .field("max_bytes_per_char", &self.max_bytes_per_char)
            .field("entropy", &self.entropy.as_ref().map(|e| e.len()))
            .field("prng", &self.prng.is_some())
            .field("table", &self.table.as_ref().map(|t| t.bits()))
            .field("codec", &self.codec)
            .finish()
    }
}

/// Per-split arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShareOptions {
    /// Number of shares to produce, `N`.
    pub shares: u32,
    /// Shares needed to recover, `K`.
    pub threshold: u32,
    /// Overrides [`Context::padding`]. `Some(0)` disables padding.
    pub padding: Option<usize>,
}

impl ShareOptions {
    pub fn new(shares: u32, threshold: u32) -> Self {
        Self {
            shares,
            threshold,
            padding: None,
        }
    }
}

/// A validated, immutable configuration owning one field table and codec.
///
/// Cheap to clone; the table and entropy are shared.
#[derive(Debug, Clone)]
pub struct Context {
    bits: u32,
    radix: u32,
    min_bits: u32,
    max_bits: u32,
    padding: usize,
    bytes_per_char: usize,
    max_bytes_per_char: usize,
    codec: Codec,
}

impl Context {
    pub fn new(options: Options) -> Result<Self> {
        let Options {
            bits,
            radix,
            min_bits,
            max_bits,
            padding,
            bytes_per_char,
            max_bytes_per_char,
            entropy,
            prng,
            table,
            codec,
        } = options;

        primitive_polynomial(bits)?;
        if !(2..=MAX_ID_RADIX).contains(&radix) {
            return Err(Error::config(format!(
                "radix must be in 2..={MAX_ID_RADIX}, got {radix}"
            )));
        }
        if !(1..=MAX_BYTES_PER_CHAR).contains(&max_bytes_per_char) {
            return Err(Error::config(format!(
                "max bytes per char must be in 1..={MAX_BYTES_PER_CHAR}, got {max_bytes_per_char}"
            )));
        }
        if !(1..=max_bytes_per_char).contains(&bytes_per_char) {
            return Err(Error::config(format!(
                "bytes per char must be in 1..={max_bytes_per_char}, got {bytes_per_char}"
            )));
        }
        if padding > MAX_PADDING {
            return Err(Error::config(format!(
                "padding must be at most {MAX_PADDING} bits, got {padding}"
            )));
        }
        if min_bits > max_bits {
            return Err(Error::config(format!(
                "min bits ({min_bits}) exceeds max bits ({max_bits})"
            )));
        }
        if !(min_bits..=max_bits).contains(&bits) {
            warn!(bits, min_bits, max_bits, "field size outside advisory range");
        }

        let codec = match codec {
            Some(codec) => {
                if codec.bits() != bits
                    || codec.radix() != radix
                    || codec.bytes_per_char() != bytes_per_char
                {
                    return Err(Error::config(format!(
                        "injected codec (bits {}, radix {}, bytes per char {}) does not match options",
                        codec.bits(),
                        codec.radix(),
                        codec.bytes_per_char()
                    )));
                }
                if let Some(table) = &table {
                    if !Arc::ptr_eq(table, codec.table()) && **table != **codec.table() {
                        return Err(Error::config("injected table differs from the codec's table"));
                    }
                }
                codec
            }
            None => {
                let table = match table {
                    Some(table) if table.bits() != bits => {
                        return Err(Error::config(format!(
                            "injected table is for 2^{} but bits is {bits}",
                            table.bits()
                        )));
                    }
                    Some(table) => table,
                    None => Arc::new(Table::new(bits)?),
                };
                let prng: Arc<dyn Prng> = match prng {
                    Some(prng) => prng,
                    None => Arc::new(crypto::random_bytes),
                };
                let entropy = match entropy {
                    Some(entropy) => entropy,
                    None => prng.random_bytes(DEFAULT_ENTROPY_SIZE)?,
                };
                Codec::new(table, radix, bytes_per_char, entropy, prng)?
            }
        };

        debug!(bits, radix, padding, bytes_per_char, "created context");

        Ok(Self {
            bits,
            radix,
            min_bits,
            max_bits,
            padding,
            bytes_per_char,
            max_bytes_per_char,
            codec,
        })
    }

    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// Field size, `2^bits`.
    pub fn size(&self) -> usize {
        self.codec.table().size()
    }

    /// Largest share count and threshold, `2^bits - 1`.
    pub fn max_shares(&self) -> u32 {
        self.codec.table().max_shares()
    }

    pub fn radix(&self) -> u32 {
        self.radix
    }

    pub fn min_bits(&self) -> u32 {
        self.min_bits
    }

    pub fn max_bits(&self) -> u32 {
        self.max_bits
    }

    pub fn padding(&self) -> usize {
        self.padding
    }

    pub fn bytes_per_char(&self) -> usize {
        self.bytes_per_char
    }

    pub fn max_bytes_per_char(&self) -> usize {
        self.max_bytes_per_char
    }

    pub fn entropy(&self) -> &[u8] {
        self.codec.entropy()
    }

    pub fn table(&self) -> &Arc<Table> {
        self.codec.table()
    }

    pub fn codec(&self) -> &Codec {
        &self.codec
    }

    /// Validate and wrap a secret. `encoding` applies to text; bytes and
    /// existing secrets are taken as-is.
    pub fn secret<'a>(
        &self,
        value: impl Into<SecretInput<'a>>,
        encoding: Encoding,
    ) -> Result<Secret> {
        Ok(value.into().into_secret_with(encoding)?.into_owned())
    }

    /// Split a secret into `options.shares` byte shares, any
    /// `options.threshold` of which recover it.
    ///
    /// The secret's bit string is prefixed with a `1` marker, padded, and cut
    /// into field-sized chunks. Each chunk is shared with its own random
    /// polynomial; share `x` carries the value of every chunk polynomial at
    /// `x`, most significant chunk first.
    pub fn shares<'a>(
        &self,
        secret: impl Into<SecretInput<'a>>,
        options: &ShareOptions,
    ) -> Result<Vec<Vec<u8>>> {
        let max = self.max_shares();
        let ShareOptions {
            shares,
            threshold,
            padding,
        } = *options;
        if shares == 0 || shares > max {
            return Err(Error::argument(format!(
                "invalid shares count {shares}, expecting 1..={max}"
            )));
        }
        if threshold == 0 || threshold > max {
            return Err(Error::argument(format!(
                "invalid threshold count {threshold}, expecting 1..={max}"
            )));
        }
        if threshold > shares {
            return Err(Error::argument(format!(
                "threshold ({threshold}) exceeds shares ({shares})"
            )));
        }

        let padding = padding.unwrap_or(self.padding);
        check_padding(padding)?;

        let secret = secret.into().into_secret()?;

        let mut bin = Zeroizing::new(String::from("1"));
        bin.push_str(&secret.to_binary(&self.codec)?);
        let parts = Zeroizing::new(self.codec.split(&bin, padding, 2)?);

        let columns = parts
            .iter()
            .map(|&part| self.codec.partition(part, threshold, shares))
            .collect::<Result<Vec<_>>>()?;
        debug!(chunks = parts.len(), shares, threshold, "split secret");

        let mut out = Vec::with_capacity(shares as usize);
        for j in 0..shares as usize {
            let mut blob = String::with_capacity(parts.len() * self.bits as usize);
            for column in columns.iter().rev() {
                blob.push_str(&self.codec.pad(&format!("{:b}", column[j].y), None)?);
            }
            let x = columns[0][j].x;
            out.push(self.codec.encode(x, &self.codec.hex_bits(&blob)?)?);
        }
        Ok(out)
    }

    /// Rebuild a secret from shares.
    ///
    /// Shares repeating an earlier id are ignored. Fewer than the threshold
    /// number of distinct shares, or shares from another split, produce a
    /// wrong secret rather than an error.
    pub fn recover<I>(&self, shares: I) -> Result<Secret>
    where
        I: IntoIterator,
        I::Item: ShareSource,
    {
        let mut ids = Vec::new();
        let mut chunks: Vec<Vec<u32>> = Vec::new();
        for share in shares {
            let data = share.share_data(self.radix)?;
            if ids.contains(&data.id) {
                trace!(id = data.id, "ignoring duplicate share");
                continue;
            }
            let bin = Zeroizing::new(self.codec.binary(&data.data, 16)?);
            chunks.push(self.codec.split(&bin, 0, 2)?);
            ids.push(data.id);
        }
        if ids.is_empty() {
            return Err(Error::argument("expecting at least one share"));
        }
        debug!(shares = ids.len(), "recovering secret");

        let positions = chunks.iter().map(Vec::len).max().unwrap_or(0);
        let mut bin = Zeroizing::new(String::with_capacity(positions * self.bits as usize));
        for j in (0..positions).rev() {
            let points: Vec<SharePoint> = ids
                .iter()
                .zip(&chunks)
                .map(|(&x, parts)| SharePoint {
                    x,
                    y: parts.get(j).copied().unwrap_or(0),
                })
                .collect();
            let value = self.codec.lagrange(0, &points);
            bin.push_str(&self.codec.pad(&format!("{value:b}"), None)?);
        }

        let payload = match bin.find('1') {
            Some(marker) => &bin[marker + 1..],
            None => &bin[..],
        };
        if payload.is_empty() {
            return Err(Error::argument("recovered secret is empty"));
        }
        let hex = Zeroizing::new(self.codec.hex_bits(payload)?);
        Secret::recovered(self.codec.decode_secret(&hex)?)
    }
}
