/// Group the digits of a non-negative integer string with `.` (id-ID style).
fn group_thousands(int_part: &str) -> String {
    let mut grouped = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    grouped.chars().rev().collect()
}

/// Format an amount as Indonesian rupiah with no decimals: Rp 1.234.567
pub fn rupiah(val: f64) -> String {
    let rounded = val.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());
    let grouped = group_thousands(&digits);
    if negative {
        format!("-Rp {grouped}")
    } else {
        format!("Rp {grouped}")
    }
}

/// Format a count with `.` thousands separators: 12.345
pub fn number(n: usize) -> String {
    group_thousands(&n.to_string())
}
