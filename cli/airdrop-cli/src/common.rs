use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use drop_commitment::Digest;
use solana_program::pubkey::Pubkey;

/// Parses a recipient address.
///
/// Accepts a base58 public key, or `0x`-prefixed 64-char hex in any letter
/// case. Both forms map to the same 32 raw bytes, which is all the leaf hash
/// ever sees.
///
/// # Errors
/// Returns an error for malformed input or the all-zero address.
pub fn parse_address(addr_str: &str) -> Result<Pubkey> {
    let trimmed = addr_str.trim();
    let address = match trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        Some(hex_str) => {
            if hex_str.len() != 64 {
                anyhow::bail!(
                    "Invalid address length: expected 64 hex chars, got {}",
                    hex_str.len()
                );
            }
            let mut bytes = [0u8; 32];
            hex::decode_to_slice(hex_str, &mut bytes)
                .map_err(|e| anyhow::anyhow!("Invalid hex encoding: {}", e))?;
            Pubkey::new_from_array(bytes)
        }
        None => Pubkey::from_str(trimmed)
            .map_err(|e| anyhow::anyhow!("Invalid base58 address '{}': {}", trimmed, e))?,
    };

    if address == Pubkey::default() {
        anyhow::bail!("Zero address not allowed");
    }
    Ok(address)
}

pub fn hex_encode(bytes: impl AsRef<[u8]>) -> String {
    format!("0x{}", hex::encode(bytes))
}

pub fn parse_digest(digest_str: &str) -> Result<Digest> {
    let cleaned = digest_str.trim();
    let cleaned = cleaned.strip_prefix("0x").unwrap_or(cleaned);
    if cleaned.len() != 64 {
        anyhow::bail!(
            "Invalid digest length: expected 64 hex chars, got {}",
            cleaned.len()
        );
    }
    let mut digest = [0u8; 32];
    hex::decode_to_slice(cleaned, &mut digest).context("Invalid digest hex")?;
    Ok(digest)
}

/// Parses a token amount into base units.
///
/// With `decimals == 0` only whole base units are accepted. Otherwise the
/// amount may carry up to `decimals` fractional digits (trailing zeros beyond
/// that are ignored), e.g. `"5963.632583"` with 9 decimals.
pub fn parse_amount(raw: &str, decimals: u8) -> Result<u64> {
    let raw = raw.trim();
    let (whole, fraction) = raw.split_once('.').unwrap_or((raw, ""));
    let fraction = fraction.trim_end_matches('0');

    if whole.is_empty() && fraction.is_empty() {
        anyhow::bail!("Empty amount '{}'", raw);
    }
    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !is_digits(whole) || !is_digits(fraction) {
        anyhow::bail!("Invalid amount '{}'", raw);
    }
    if fraction.len() > usize::from(decimals) {
        anyhow::bail!(
            "Amount '{}' has more than {} fractional digits",
            raw,
            decimals
        );
    }

    let scale = 10u64
        .checked_pow(u32::from(decimals))
        .context("Decimals too large")?;
    let whole: u64 = if whole.is_empty() {
        0
    } else {
        whole
            .parse()
            .with_context(|| format!("Amount '{}' out of range", raw))?
    };
    let fraction: u64 = if decimals == 0 {
        0
    } else {
        format!("{:0<width$}", fraction, width = usize::from(decimals))
            .parse()
            .with_context(|| format!("Amount '{}' out of range", raw))?
    };

    whole
        .checked_mul(scale)
        .and_then(|units| units.checked_add(fraction))
        .with_context(|| format!("Amount '{}' overflows u64 base units", raw))
}

/// Parses the raw allocation table: a header row naming `address` and
/// `amount` columns, then one allocation per line.
///
/// Any malformed row fails the whole parse.
pub fn parse_allocations(content: &str, decimals: u8) -> Result<Vec<(Pubkey, u64)>> {
    let normalized = content.replace("\r\n", "\n").replace('\r', "\n");
    let mut rows = normalized
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let (_, header) = rows.next().context("Allocation file is empty")?;
    // Spreadsheet exports often start with a UTF-8 byte order mark.
    let header = header.trim_start_matches('\u{feff}');
    let columns: Vec<String> = header
        .split(',')
        .map(|column| column.trim().to_ascii_lowercase())
        .collect();
    let address_col = columns
        .iter()
        .position(|column| column == "address")
        .context("Header has no 'address' column")?;
    let amount_col = columns
        .iter()
        .position(|column| column == "amount")
        .context("Header has no 'amount' column")?;

    let mut allocations = Vec::new();
    for (line_num, line) in rows {
        let fields: Vec<&str> = line.split(',').collect();
        let (Some(address), Some(amount)) = (fields.get(address_col), fields.get(amount_col))
        else {
            anyhow::bail!(
                "Invalid row at line {}: expected {} columns, got '{}'",
                line_num + 1,
                columns.len(),
                line.trim()
            );
        };
        let address = parse_address(address)
            .with_context(|| format!("Invalid address at line {}", line_num + 1))?;
        let amount = parse_amount(amount, decimals)
            .with_context(|| format!("Invalid amount at line {}", line_num + 1))?;
        allocations.push((address, amount));
    }

    if allocations.is_empty() {
        anyhow::bail!("Allocation file has a header but no rows");
    }
    Ok(allocations)
}

pub fn read_allocations(path: &Path, decimals: u8) -> Result<Vec<(Pubkey, u64)>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read allocation file {:?}", path))?;
    parse_allocations(&content, decimals)
}

/// Writes via a sibling temp file and a rename so readers never see a
/// partially written artifact.
///
/// The temp file is removed if any step after its creation fails.
pub fn write_file_atomic(path: &Path, content: &str) -> Result<()> {
    let temp_path = path.with_extension("tmp");
    let mut file = File::create(&temp_path).context("Failed to create temp file")?;

    let written = file
        .write_all(content.as_bytes())
        .context("Failed to write to temp file")
        .and_then(|()| file.flush().context("Failed to flush temp file"))
        .and_then(|()| {
            fs::rename(&temp_path, path).context("Failed to move temp file to output")
        });
    if written.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    written
}
