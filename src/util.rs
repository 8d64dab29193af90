pub fn short_label(label: &str) -> &str {
    label.split_whitespace().next().unwrap_or(label)
}

pub fn format_value(value: f64) -> String {
    let magnitude = value.abs();
    if value == 0.0 {
        "0".to_owned()
    } else if magnitude < 0.001 || magnitude >= 10_000.0 {
        format!("{value:.2e}")
    } else {
        format!("{value:.4}")
    }
}

pub fn format_correlation(value: f64) -> String {
    format!("{value:+.2}")
}

pub fn format_share(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_label_takes_the_first_token() {
        assert_eq!(short_label("Fe K-alpha"), "Fe");
        assert_eq!(short_label("Zn"), "Zn");
        assert_eq!(short_label(""), "");
    }

    #[test]
    fn format_value_picks_a_readable_notation() {
        assert_eq!(format_value(0.0), "0");
        assert_eq!(format_value(0.1234567), "0.1235");
        assert_eq!(format_value(0.000012), "1.20e-5");
    }

    #[test]
    fn format_correlation_keeps_the_sign() {
        assert_eq!(format_correlation(0.5), "+0.50");
        assert_eq!(format_correlation(-1.0), "-1.00");
    }
}
