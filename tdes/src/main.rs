//! Triple DES command-line tool
//!
//! Encrypts or decrypts exactly one 64-bit block. The block and the key
//! material are read as hex from files; whitespace is ignored.

use std::fs;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;
use triple_des::{BitArray, TripleDes};

/// Command-line arguments for the Triple DES program.
#[derive(Parser, Debug)]
#[command(version, about = "Encrypt or decrypt a single block with Triple DES (EDE)")]
struct Cli {
    /// Path to the input file.
    #[arg(short, long, help = "Path to the input file (8 bytes as hex)")]
    file: String,

    /// Key material for the cipher.
    #[arg(short, long, help = "File contains the key material (14, 16, 21 or 24 bytes as hex)")]
    key: String,

    /// Path to the output file.
    #[arg(short, long, help = "Path to the output file")]
    output: String,

    /// Mode of operation (encrypt or decrypt).
    #[arg(short, long, help = "Mode of operation (encrypt/decrypt)")]
    mode: OperationMode,
}

/// Enum representing the mode of operation for the cipher.
#[derive(Clone, Debug, ValueEnum)]
enum OperationMode {
    /// Encrypt mode.
    Encrypt,
    /// Decrypt mode.
    Decrypt,
}

/// Parses hex text, ignoring spaces and line breaks.
fn parse_hex(content: &str) -> Result<BitArray> {
    if content.trim().is_empty() {
        bail!("no hexadecimal data found");
    }

    Ok(BitArray::from_hex(content)?)
}

fn read_hex_from_file(filename: &str) -> Result<BitArray> {
    let content = fs::read_to_string(filename)
        .with_context(|| format!("failed to read {}", filename))?;
    parse_hex(&content).with_context(|| format!("invalid contents in {}", filename))
}

/// Formats bytes as lower-case hex, one space between bytes.
fn format_hex(data: &[u8]) -> String {
    data.iter()
        .map(|b| hex::encode([*b]))
        .collect::<Vec<String>>()
        .join(" ")
}

fn run(cli: &Cli) -> Result<()> {
    let block = read_hex_from_file(&cli.file)?;
    let key = read_hex_from_file(&cli.key)?;
    tracing::debug!(key_bits = key.len(), block_bits = block.len(), mode = ?cli.mode, "inputs read");

    let tdes = TripleDes::new();
    let result = match cli.mode {
        OperationMode::Encrypt => tdes.encrypt_bits(&key, &block),
        OperationMode::Decrypt => tdes.decrypt_bits(&key, &block),
    }
    .context("triple DES operation failed")?;

    fs::write(&cli.output, format_hex(&result.to_bytes()))
        .with_context(|| format!("failed to write {}", cli.output))?;
    tracing::info!(output = %cli.output, "block written");
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    run(&cli)
}
