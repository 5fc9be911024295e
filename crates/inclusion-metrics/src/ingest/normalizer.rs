//! Cell normalization for spreadsheets exported from the field template.

/// Canonicalizes a branch or project code cell.
///
/// Exports arrive with BOM prefixes, zero-width characters, and uneven
/// casing depending on which office saved the workbook.
pub(crate) fn normalize_code(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|ch| !matches!(ch, '\u{feff}' | '\u{200b}' | '\u{200c}' | '\u{200d}'))
        .collect();
    cleaned
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_ascii_uppercase()
}

/// Canonicalizes a period cell to the `YYYY-MM` form.
///
/// Offices write periods as `2026-03`, `2026/03`, or `2026.3`; separators
/// collapse to a hyphen and surrounding noise is dropped.
pub(crate) fn normalize_period(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|ch| !matches!(ch, '\u{feff}' | '\u{200b}' | '\u{200c}' | '\u{200d}'))
        .collect();
    cleaned
        .trim()
        .replace(['/', '.'], "-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_lose_bom_and_casing_noise() {
        assert_eq!(normalize_code("\u{feff}kmb-01"), "KMB-01");
        assert_eq!(normalize_code("  fip   2026  "), "FIP 2026");
        assert_eq!(normalize_code("Kmb-01\u{200b}"), "KMB-01");
    }

    #[test]
    fn periods_collapse_separators() {
        assert_eq!(normalize_period("2026/03"), "2026-03");
        assert_eq!(normalize_period(" 2026.11 "), "2026-11");
        assert_eq!(normalize_period("\u{feff}2026-07"), "2026-07");
    }
}
