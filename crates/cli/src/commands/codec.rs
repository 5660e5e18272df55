use fxp_lms::{FxpScalar, QFormat};

/// Encodes a real number and prints the word in hex and decimal.
pub fn encode(value: f64, width: u32, frac_bits: u32) -> anyhow::Result<FxpScalar> {
    let fmt = QFormat::new(width, frac_bits)?;
    let word = fmt.encode(value);
    println!(
        "{value} -> {} (raw {}, {fmt})",
        to_hex(&fmt, word),
        word.0
    );
    Ok(word)
}

/// Decodes a word given as `0x`-prefixed bits or a signed decimal.
pub fn decode(raw: &str, width: u32, frac_bits: u32) -> anyhow::Result<f64> {
    let fmt = QFormat::new(width, frac_bits)?;
    let word = parse_word(&fmt, raw)?;
    let value = fmt.decode(word);
    println!("{} -> {value} ({fmt})", to_hex(&fmt, word));
    Ok(value)
}

fn parse_word(fmt: &QFormat, raw: &str) -> anyhow::Result<FxpScalar> {
    let width = fmt.width();
    if let Some(digits) = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        let bits = u64::from_str_radix(digits, 16)?;
        if bits >> width != 0 {
            anyhow::bail!("{raw} does not fit in {width} bits");
        }
        let shift = 64 - width;
        return Ok(FxpScalar((((bits << shift) as i64) >> shift) as i32));
    }

    let value: i64 = raw.parse()?;
    if value < fmt.min_raw() || value > fmt.max_raw() {
        anyhow::bail!("{raw} is outside the {fmt} range");
    }
    Ok(FxpScalar(value as i32))
}

fn to_hex(fmt: &QFormat, word: FxpScalar) -> String {
    let width = fmt.width();
    let mask = (1u64 << width) - 1;
    let digits = width.div_ceil(4) as usize;
    format!("0x{:0digits$x}", (word.0 as i64 as u64) & mask)
}
