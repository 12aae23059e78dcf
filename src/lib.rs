//! Shamir secret sharing over GF(2^bits).
//!
//! A secret is turned into a bit string, cut into field-sized chunks, and
//! each chunk is hidden as the constant term of its own random polynomial.
//! Share `x` carries every chunk polynomial evaluated at `x`; any
//! `threshold` shares interpolate the chunks back at zero.
//!
//! ```no_run
//! use ssshare::{Context, Options, ShareOptions};
//!
//! # fn main() -> ssshare::Result<()> {
//! let ctx = Context::new(Options::default())?;
//! let shares = ctx.shares("correct horse battery staple", &ShareOptions::new(5, 3))?;
//! let secret = ctx.recover(&shares[1..4])?;
//! assert_eq!(secret.as_bytes(), b"correct horse battery staple");
//! # Ok(())
//! # }
//! ```
//!
//! Shares are byte strings whose hex form is `0<bits><id><data>`, the share
//! format used by other implementations, so shares can be exchanged with them
//! as long as both sides use the same `bits`, `radix` and `bytes_per_char`.
//!
//! Recovering with fewer than `threshold` shares, or with shares from
//! different splits, yields a wrong secret and no error.

pub mod codec;
pub mod context;
pub mod crypto;
pub mod error;
pub mod secret;
pub mod share;
pub mod sss;
pub mod table;

pub use codec::Codec;
pub use context::{
    Context, Options, ShareOptions, DEFAULT_BITS, DEFAULT_BYTES_PER_CHAR, DEFAULT_MAX_BITS,
    DEFAULT_MIN_BITS, DEFAULT_PADDING, DEFAULT_RADIX,
};
pub use crypto::Prng;
pub use error::{Error, Result};
pub use secret::{Encoding, Secret, SecretInput};
pub use share::{ShareData, SharePoint, ShareSource};
pub use sss::{init, recover, secret, shares};
pub use table::Table;
