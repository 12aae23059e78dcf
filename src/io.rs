use crate::cmd::IoArgs;
use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Read};

/// Read all input bytes from --in file or stdin.
pub fn read_input(io_args: &IoArgs) -> Result<Vec<u8>> {
    match &io_args.r#in {
        Some(path) => fs::read(path).with_context(|| format!("read {}", path.display())),
        None => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf).context("read stdin")?;
            Ok(buf)
        }
    }
}

/// Write output bytes to --out file or stdout.
pub fn write_output(io_args: &IoArgs, data: &[u8]) -> Result<()> {
    match &io_args.out {
        Some(path) => fs::write(path, data).with_context(|| format!("write {}", path.display())),
        None => {
            use std::io::Write;
            io::stdout().write_all(data).context("write stdout")?;
            io::stdout().flush().context("flush stdout")
        }
    }
}

/// Read the input as text and return its meaningful lines.
pub fn read_lines(io_args: &IoArgs) -> Result<Vec<String>> {
    let bytes = read_input(io_args)?;
    let text = String::from_utf8(bytes).context("input is not UTF-8")?;
    Ok(share_lines(&text))
}

/// Trimmed lines, skipping blanks and `#` comments.
fn share_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_blank_lines_and_comments() {
        let text = "# shares for the vault\n\n  0801ab  \r\n#0802cd\n0803ef\n";
        assert_eq!(share_lines(text), vec!["0801ab", "0803ef"]);
        assert!(share_lines("").is_empty());
    }

    #[test]
    fn reads_and_writes_files() {
        let dir = std::env::temp_dir().join(format!("ssshare-io-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("shares.txt");
        let args = IoArgs {
            r#in: Some(path.clone()),
            out: Some(path.clone()),
        };
        write_output(&args, b"0801ab\n\n0802cd\n").unwrap();
        assert_eq!(read_lines(&args).unwrap(), vec!["0801ab", "0802cd"]);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn errors_name_the_path() {
        let path = std::env::temp_dir().join("ssshare-missing-dir").join("shares.txt");
        let args = IoArgs {
            r#in: Some(path.clone()),
            out: Some(path.clone()),
        };
        let read = read_input(&args).unwrap_err().to_string();
        assert_eq!(read, format!("read {}", path.display()));
        let write = write_output(&args, b"0801ab\n").unwrap_err().to_string();
        assert_eq!(write, format!("write {}", path.display()));
    }
}
