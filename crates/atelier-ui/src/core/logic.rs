//! Pure formatting helpers shared by page views.

/// Human-readable label for an identifier such as `RecentlyAdded` or `base_model`.
#[must_use]
pub fn display_name(value: &str) -> String {
    let mut label = String::with_capacity(value.len() + 4);
    let mut previous: Option<char> = None;
    for ch in value.chars() {
        match ch {
            '_' | '-' => {
                if !label.ends_with(' ') && !label.is_empty() {
                    label.push(' ');
                }
            }
            _ => {
                if ch.is_uppercase()
                    && previous.is_some_and(|prev| prev.is_lowercase() || prev.is_ascii_digit())
                {
                    label.push(' ');
                }
                if label.is_empty() || label.ends_with(' ') {
                    label.extend(ch.to_uppercase());
                } else {
                    label.push(ch);
                }
            }
        }
        previous = Some(ch);
    }
    label.trim_end().to_string()
}

/// Render a kilobyte count with binary units and up to two decimals.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn format_kbytes(kb: u64) -> String {
    const UNITS: [&str; 5] = ["KB", "MB", "GB", "TB", "PB"];
    if kb == 0 {
        return "0 Bytes".to_string();
    }
    let mut value = kb as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rounded = (value * 100.0).round() / 100.0;
    format!("{rounded} {}", UNITS[unit])
}

/// Compact count such as `950`, `1.2k` or `3.4M`.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn abbreviate_number(value: u64) -> String {
    const SUFFIXES: [&str; 5] = ["", "k", "M", "B", "T"];
    if value < 1_000 {
        return value.to_string();
    }
    let mut scaled = value as f64;
    let mut index = 0;
    while scaled >= 1_000.0 && index < SUFFIXES.len() - 1 {
        scaled /= 1_000.0;
        index += 1;
    }
    let mut rounded = (scaled * 10.0).round() / 10.0;
    if rounded >= 1_000.0 && index < SUFFIXES.len() - 1 {
        rounded = 1.0;
        index += 1;
    }
    format!("{rounded}{}", SUFFIXES[index])
}

/// Integer with comma thousands separators.
#[must_use]
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_splits_words() {
        assert_eq!(display_name("RecentlyAdded"), "Recently Added");
        assert_eq!(display_name("base_model"), "Base Model");
        assert_eq!(display_name("SD 1.5"), "SD 1.5");
        assert_eq!(display_name("checkpoint"), "Checkpoint");
    }

    #[test]
    fn kbytes_use_binary_units() {
        assert_eq!(format_kbytes(0), "0 Bytes");
        assert_eq!(format_kbytes(512), "512 KB");
        assert_eq!(format_kbytes(1_536), "1.5 MB");
        assert_eq!(format_kbytes(10 * 1_024 * 1_024), "10 GB");
    }

    #[test]
    fn abbreviations_round_to_one_decimal() {
        assert_eq!(abbreviate_number(950), "950");
        assert_eq!(abbreviate_number(1_200), "1.2k");
        assert_eq!(abbreviate_number(3_400_000), "3.4M");
        assert_eq!(abbreviate_number(999_960), "1M");
        assert_eq!(abbreviate_number(2_000), "2k");
    }

    #[test]
    fn thousands_are_grouped() {
        assert_eq!(format_thousands(7), "7");
        assert_eq!(format_thousands(1_234), "1,234");
        assert_eq!(format_thousands(12_345_678), "12,345,678");
    }
}
