//! Amount formatting helpers.

/// Satoshis per BSV.
pub const SATOSHIS_PER_BSV: u64 = 100_000_000;

/// Format a satoshi amount as BSV, trimming trailing zeros.
///
/// `150_000_000` → `"1.5"`, `1` → `"0.00000001"`, `0` → `"0"`.
pub fn format_sat_as_bsv(sat: u64) -> String {
    let whole = sat / SATOSHIS_PER_BSV;
    let frac = sat % SATOSHIS_PER_BSV;
    if frac == 0 {
        return whole.to_string();
    }
    let digits = format!("{frac:08}");
    format!("{whole}.{}", digits.trim_end_matches('0'))
}
