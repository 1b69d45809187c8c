use humansize::{format_size as humanize, BINARY};

const KIB: f64 = 1024.0;

/// Format size in human-readable binary units
pub fn format_size(bytes: u64) -> String {
    humanize(bytes, BINARY)
}

/// Parse a size string like "1.5GB" into bytes.
///
/// Units are binary (1 KB = 1024 B). A bare number is taken as megabytes,
/// the unit size thresholds are usually configured in.
pub fn parse_size(s: &str) -> Option<u64> {
    let s = s.trim().to_uppercase();

    let (num_str, unit) = if let Some(n) = s.strip_suffix("TB") {
        (n, KIB.powi(4))
    } else if let Some(n) = s.strip_suffix("GB") {
        (n, KIB.powi(3))
    } else if let Some(n) = s.strip_suffix("MB") {
        (n, KIB.powi(2))
    } else if let Some(n) = s.strip_suffix("KB") {
        (n, KIB)
    } else if let Some(n) = s.strip_suffix('B') {
        (n, 1.0)
    } else {
        (s.as_str(), KIB.powi(2))
    };

    let value = num_str.trim().parse::<f64>().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    Some((value * unit) as u64)
}

/// Convert a megabyte threshold into bytes.
pub fn megabytes(mb: f64) -> u64 {
    (mb.max(0.0) * KIB * KIB) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(512), "512 B");
        assert!(format_size(1536).starts_with("1.5"));
        assert!(format_size(1536).ends_with("KiB"));
        assert!(format_size(1048576 * 5).ends_with("MiB"));
    }

    #[test]
    fn test_parse_size_bare_number_is_megabytes() {
        assert_eq!(parse_size("100"), Some(100 * 1048576));
        assert_eq!(parse_size("0"), Some(0));
        assert_eq!(parse_size("0.5"), Some(524288));
    }

    #[test]
    fn test_parse_size_with_units() {
        assert_eq!(parse_size("1KB"), Some(1024));
        assert_eq!(parse_size("1 KB"), Some(1024));
        assert_eq!(parse_size("1MB"), Some(1048576));
        assert_eq!(parse_size("1GB"), Some(1073741824));
        assert_eq!(parse_size("1TB"), Some(1099511627776));
        assert_eq!(parse_size("100B"), Some(100));
        assert_eq!(parse_size("100 B"), Some(100));
    }

    #[test]
    fn test_parse_size_decimal_and_case() {
        assert_eq!(parse_size("1.5GB"), Some(1610612736));
        assert_eq!(parse_size("2.5mb"), Some(2621440));
        assert_eq!(parse_size("1Kb"), Some(1024));
    }

    #[test]
    fn test_parse_size_invalid() {
        assert_eq!(parse_size("invalid"), None);
        assert_eq!(parse_size("abc KB"), None);
        assert_eq!(parse_size("-5MB"), None);
        assert_eq!(parse_size(""), None);
    }

    #[test]
    fn test_megabytes() {
        assert_eq!(megabytes(100.0), 104857600);
        assert_eq!(megabytes(0.0), 0);
        assert_eq!(megabytes(-1.0), 0);
    }
}
