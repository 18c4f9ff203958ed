//! Shared price-selection utility.
//!
//! Some stores expose no structured sale/regular price fields, only free
//! text carrying one or more dollar amounts (list price, member price,
//! strike-through price). For those the rule is: scan every
//! `$<integer>(.<fraction>)?` substring and keep the lowest.

use regex::Regex;

/// Scan `text` for dollar amounts and return the minimum, formatted with a
/// leading `$` and two fractional digits. `None` when no amount is present.
pub fn lowest_dollar(text: &str) -> Option<String> {
    let re = Regex::new(r"\$\d+(?:\.\d+)?").expect("price regex is valid");
    let mut min: Option<f64> = None;
    for m in re.find_iter(text) {
        if let Ok(value) = m.as_str()[1..].parse::<f64>() {
            min = Some(match min {
                Some(current) if current <= value => current,
                _ => value,
            });
        }
    }
    min.map(|v| format!("${v:.2}"))
}
