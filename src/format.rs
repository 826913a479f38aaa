//! Price rendering for the storefront currency

/// Render an amount with the currency symbol and Indian digit grouping:
/// the last three digits, then groups of two (`₹1,23,456`).
pub fn format_price(amount: u128, symbol: &str) -> String {
    let digits = amount.to_string();
    if digits.len() <= 3 {
        return format!("{symbol}{digits}");
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();

    format!("{symbol}{},{tail}", groups.join(","))
}
