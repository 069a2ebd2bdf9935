pub fn format_percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

pub fn truncate_label(label: &str, max_chars: usize) -> String {
    if label.chars().count() <= max_chars {
        label.to_owned()
    } else {
        let mut truncated = label.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    }
}

pub fn golden_direction(index: usize, salt: f32) -> (f32, f32) {
    let angle = ((index as f32) * 0.618_034 + salt) * std::f32::consts::TAU;
    (angle.cos(), angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_uses_one_decimal() {
        assert_eq!(format_percent(0.4), "40.0%");
        assert_eq!(format_percent(0.1234), "12.3%");
        assert_eq!(format_percent(0.0), "0.0%");
    }

    #[test]
    fn truncation_keeps_short_labels() {
        assert_eq!(truncate_label("Farms (111CA)", 18), "Farms (111CA)");
        assert_eq!(
            truncate_label("Food and beverage and tobacco products (311FT)", 18),
            "Food and beverage ..."
        );
        assert_eq!(truncate_label("ÉÉÉÉ", 2), "ÉÉ...");
    }

    #[test]
    fn golden_direction_is_unit_length() {
        let (x, y) = golden_direction(7, 0.37);
        assert!(((x * x + y * y) - 1.0).abs() < 1e-5);
    }
}
