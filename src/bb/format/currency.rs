// Copyright (c) 2026 Billbook. All Rights Reserved.

pub const RUPEE: &str = "\u{20b9}";

// Lakh/crore grouping: the last three digits, then pairs.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

/// An amount with Indian digit grouping and two decimals, no symbol:
/// `12,34,567.50`.
pub fn format_amount(amount: f64) -> String {
    if !amount.is_finite() {
        return "0.00".to_string();
    }
    let paise = (amount.abs() * 100.0).round() as u64;
    let sign = if amount < 0.0 && paise > 0 { "-" } else { "" };
    format!(
        "{}{}.{:02}",
        sign,
        group_indian(&(paise / 100).to_string()),
        paise % 100
    )
}

/// An amount in rupees: `₹12,34,567.50`, `-₹500.00`.
pub fn format_currency(amount: f64) -> String {
    let formatted = format_amount(amount);
    if formatted.starts_with('-') {
        format!("-{}{}", RUPEE, &formatted[1..])
    } else {
        format!("{}{}", RUPEE, formatted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_in_lakhs_and_crores() {
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(999.0), "999.00");
        assert_eq!(format_amount(1000.0), "1,000.00");
        assert_eq!(format_amount(123456.789), "1,23,456.79");
        assert_eq!(format_amount(12345678.5), "1,23,45,678.50");
        assert_eq!(format_amount(999999999.0), "99,99,99,999.00");
    }

    #[test]
    fn currency_puts_the_sign_before_the_symbol() {
        assert_eq!(format_currency(1500.0), "\u{20b9}1,500.00");
        assert_eq!(format_currency(-500.0), "-\u{20b9}500.00");
        assert_eq!(format_currency(-0.001), "\u{20b9}0.00");
    }
}
