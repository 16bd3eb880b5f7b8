// 💰 Money formatting
// Amounts are shown as "{:.2} BGN" with ties rounded away from zero
// (0.125 → 0.13), not the round-half-to-even that `{:.2}` applies.

/// Two decimals plus the currency suffix
pub fn format_bgn(amount: f64) -> String {
    // `+ 0.0` turns a -0.0 into 0.0
    let cents = (amount * 100.0).round() + 0.0;
    format!("{:.2} BGN", cents / 100.0)
}
