//! Currency display using Indian digit grouping (lakh / crore)

const LAKH: f64 = 100_000.0;
const CRORE: f64 = 10_000_000.0;

/// Group digits as 12,34,56,789: last three, then pairs
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

/// Format a rupee amount rounded to whole rupees, e.g. `₹11,61,695`
///
/// Non-finite values render as `₹0`.
pub fn format_inr(value: f64) -> String {
    if !value.is_finite() {
        return "₹0".to_string();
    }

    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());
    format!("{}₹{}", sign, group_indian(&digits))
}

/// Short form for headline figures: `₹11.62 L`, `₹1.00 Cr`
pub fn format_inr_compact(value: f64) -> String {
    if !value.is_finite() {
        return format_inr(value);
    }

    let magnitude = value.abs();
    let sign = if value < 0.0 { "-" } else { "" };
    if magnitude >= CRORE {
        format!("{}₹{:.2} Cr", sign, magnitude / CRORE)
    } else if magnitude >= LAKH {
        format!("{}₹{:.2} L", sign, magnitude / LAKH)
    } else {
        format_inr(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouping() {
        assert_eq!(format_inr(0.0), "₹0");
        assert_eq!(format_inr(999.0), "₹999");
        assert_eq!(format_inr(1_000.0), "₹1,000");
        assert_eq!(format_inr(100_000.0), "₹1,00,000");
        assert_eq!(format_inr(1_161_695.38), "₹11,61,695");
        assert_eq!(format_inr(10_000_000.0), "₹1,00,00,000");
        assert_eq!(format_inr(123_456_789.0), "₹12,34,56,789");
    }

    #[test]
    fn test_rounding_and_sign() {
        assert_eq!(format_inr(43_040.54), "₹43,041");
        assert_eq!(format_inr(-1_500.0), "-₹1,500");
        assert_eq!(format_inr(-0.4), "₹0");
        assert_eq!(format_inr(f64::NAN), "₹0");
        assert_eq!(format_inr(f64::INFINITY), "₹0");
    }

    #[test]
    fn test_compact() {
        assert_eq!(format_inr_compact(10_000_000.0), "₹1.00 Cr");
        assert_eq!(format_inr_compact(1_161_695.38), "₹11.62 L");
        assert_eq!(format_inr_compact(99_999.0), "₹99,999");
        assert_eq!(format_inr_compact(-250_000.0), "-₹2.50 L");
    }
}
