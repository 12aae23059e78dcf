//! One-shot helpers that build a [`Context`] per call.
//!
//! Prefer holding a [`Context`] when splitting or recovering more than once:
//! every call here rebuilds the field table and draws fresh entropy.

use crate::context::{Context, Options, ShareOptions};
use crate::error::Result;
use crate::secret::{Encoding, Secret, SecretInput};
use crate::share::ShareSource;

/// Build a context from `options`, unset fields taking their defaults.
pub fn init(options: Options) -> Result<Context> {
    Context::new(options)
}

/// Validate and wrap a secret under the given configuration. Text is
/// decoded with `encoding`; bytes are taken as-is.
pub fn secret<'a>(
    value: impl Into<SecretInput<'a>>,
    encoding: Encoding,
    options: Options,
) -> Result<Secret> {
    let ctx = init(options)?;
    let secret = ctx.secret(value, encoding)?;
    tracing::trace!(len = secret.len(), bits = ctx.bits(), "wrapped secret");
    Ok(secret)
}

/// Split a secret with a default context.
pub fn shares<'a>(
    secret: impl Into<SecretInput<'a>>,
    options: &ShareOptions,
) -> Result<Vec<Vec<u8>>> {
    init(Options::default())?.shares(secret, options)
}

/// Recover a secret with a context built from `options`.
///
/// `options` must match the configuration the shares were produced with.
pub fn recover<I>(shares: I, options: Options) -> Result<Secret>
where
    I: IntoIterator,
    I::Item: ShareSource,
{
    init(options)?.recover(shares)
}
