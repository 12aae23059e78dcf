use crate::io;
use anyhow::{bail, Context as _, Result};
use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;
use clap::{Args, Subcommand, ValueEnum};
use ssshare::{
    Context, Options, ShareData, ShareOptions, ShareSource, DEFAULT_BITS, DEFAULT_BYTES_PER_CHAR,
    DEFAULT_PADDING, DEFAULT_RADIX,
};
use std::path::PathBuf;
use zeroize::Zeroizing;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Split a secret read from --in (or stdin) into K-of-N shares, one per line
    Split(SplitArgs),
    /// Recover a secret from shares read one per line
    Combine(CombineArgs),
    /// Show the id, field size and payload length of each share
    Inspect(InspectArgs),
}

// ---------------------------------------------------------------------------
// Shared arg groups
// ---------------------------------------------------------------------------

/// Args for file input/output (both default to stdin/stdout).
#[derive(Args, Debug)]
pub struct IoArgs {
    /// Input file (defaults to stdin)
    #[arg(long, value_name = "FILE")]
    pub r#in: Option<PathBuf>,

    /// Output file (defaults to stdout)
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,
}

/// Field and encoding parameters. These must match between split and combine.
#[derive(Args, Debug)]
pub struct ContextArgs {
    /// Field exponent: shares are computed in GF(2^bits), allowing up to 2^bits - 1 shares.
    /// Combine reads it from the first share when omitted.
    #[arg(long, env = "SSSHARE_BITS")]
    pub bits: Option<u32>,

    /// Base used to render share ids (2-16)
    #[arg(long, env = "SSSHARE_RADIX", default_value_t = DEFAULT_RADIX)]
    pub radix: u32,

    /// Pad the secret's bit string to a multiple of this many bits (0 disables)
    #[arg(long, env = "SSSHARE_PADDING", default_value_t = DEFAULT_PADDING)]
    pub padding: usize,

    /// Bytes per character group in the share payload
    #[arg(long, env = "SSSHARE_BYTES_PER_CHAR", default_value_t = DEFAULT_BYTES_PER_CHAR)]
    pub bytes_per_char: usize,
}

impl ContextArgs {
    fn context(&self, bits: u32) -> Result<Context> {
        Context::new(Options {
            bits,
            radix: self.radix,
            padding: self.padding,
            bytes_per_char: self.bytes_per_char,
            ..Options::default()
        })
        .context("invalid sharing parameters")
    }
}

/// How shares are written one per line.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ShareFormat {
    /// Share text, including the leading parity nibble
    #[default]
    Hex,
    /// Standard base64 of the share bytes
    Base64,
}

impl ShareFormat {
    pub fn render(self, share: &[u8]) -> String {
        match self {
            ShareFormat::Hex => hex::encode(share),
            ShareFormat::Base64 => B64.encode(share),
        }
    }

    pub fn parse(self, line: &str) -> Result<Vec<u8>> {
        match self {
            ShareFormat::Hex => {
                // Share text may have dropped its parity nibble.
                let padded;
                let text = if line.len() % 2 == 1 {
                    padded = format!("0{line}");
                    padded.as_str()
                } else {
                    line
                };
                hex::decode(text).with_context(|| format!("share {line:?} is not hex"))
            }
            ShareFormat::Base64 => B64
                .decode(line)
                .with_context(|| format!("share {line:?} is not base64")),
        }
    }
}

// ---------------------------------------------------------------------------
// Per-command args
// ---------------------------------------------------------------------------

#[derive(Args, Debug)]
pub struct SplitArgs {
    #[command(flatten)]
    pub io: IoArgs,

    #[command(flatten)]
    pub params: ContextArgs,

    /// Total number of shares N to create
    #[arg(short = 'n', long)]
    pub num_shares: u32,

    /// Threshold K: minimum shares required to recover the secret
    #[arg(short = 'k', long)]
    pub threshold: u32,

    /// Share encoding
    #[arg(long, value_enum, default_value_t)]
    pub format: ShareFormat,
}

#[derive(Args, Debug)]
pub struct CombineArgs {
    #[command(flatten)]
    pub io: IoArgs,

    #[command(flatten)]
    pub params: ContextArgs,

    /// Share encoding
    #[arg(long, value_enum, default_value_t)]
    pub format: ShareFormat,
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub io: IoArgs,

    /// Base share ids are rendered in
    #[arg(long, env = "SSSHARE_RADIX", default_value_t = DEFAULT_RADIX)]
    pub radix: u32,

    /// Share encoding
    #[arg(long, value_enum, default_value_t)]
    pub format: ShareFormat,
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

pub fn run(command: Command) -> Result<()> {
    match command {
        Command::Split(args) => split(args),
        Command::Combine(args) => combine(args),
        Command::Inspect(args) => inspect(args),
    }
}

fn split(args: SplitArgs) -> Result<()> {
    let ctx = args.params.context(args.params.bits.unwrap_or(DEFAULT_BITS))?;

    let secret = Zeroizing::new(io::read_input(&args.io)?);
    eprintln!("split: read {} bytes of secret", secret.len());

    let shares = ctx
        .shares(secret.as_slice(), &ShareOptions::new(args.num_shares, args.threshold))
        .context("split secret")?;

    let mut out = String::new();
    for share in &shares {
        out.push_str(&args.format.render(share));
        out.push('\n');
    }
    io::write_output(&args.io, out.as_bytes())?;

    eprintln!(
        "split: wrote {} shares in GF(2^{}), any {} recover the secret",
        shares.len(),
        ctx.bits(),
        args.threshold
    );
    Ok(())
}

fn combine(args: CombineArgs) -> Result<()> {
    let shares = read_shares(&args.io, args.format)?;
    if shares.is_empty() {
        bail!("no shares in input");
    }

    let bits = match args.params.bits {
        Some(bits) => bits,
        None => {
            shares[0]
                .share_data(args.params.radix)
                .context("parse first share")?
                .bits
        }
    };
    let ctx = args.params.context(bits)?;
    eprintln!("combine: read {} shares in GF(2^{bits})", shares.len());

    let secret = ctx.recover(&shares).context("recover secret")?;
    io::write_output(&args.io, secret.as_bytes())?;

    eprintln!("combine: recovered {} bytes", secret.len());
    Ok(())
}

fn inspect(args: InspectArgs) -> Result<()> {
    let shares = read_shares(&args.io, args.format)?;

    let mut out = String::new();
    for (line, share) in shares.iter().enumerate() {
        let ShareData { id, bits, data } = share
            .share_data(args.radix)
            .with_context(|| format!("share {}", line + 1))?;
        out.push_str(&format!(
            "id={id} bits={bits} data={} hex digits\n",
            data.len()
        ));
    }
    io::write_output(&args.io, out.as_bytes())
}

/// Decode every share line from the input.
fn read_shares(io_args: &IoArgs, format: ShareFormat) -> Result<Vec<Vec<u8>>> {
    io::read_lines(io_args)?
        .iter()
        .map(|line| format.parse(line))
        .collect()
}
