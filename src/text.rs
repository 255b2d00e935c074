//! Small pure string heuristics shared by the adapters.
//!
//! The lunch sites publish menus as loosely structured prose, so most of the
//! extraction quality lives in these functions. They are deliberately
//! network-free and unit-tested in isolation.

use std::sync::LazyLock;

use regex::Regex;

static PRICE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(\d{2,3})\s*kr\b").unwrap());

static DASH_SPLIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+[-–—]\s+|\s*[–—]\s*").unwrap());

/// Lines shorter than three characters, or consisting of a bare dash, are
/// layout noise and never menu content.
pub fn is_noise(line: &str) -> bool {
    let trimmed = line.trim();
    matches!(trimmed, "-" | "–" | "—") || trimmed.chars().count() < 3
}

/// Splits `"name – description"` on the *first* dash separator only; any
/// later dashes stay inside the description.
pub fn split_name_description(line: &str) -> (String, Option<String>) {
    if let Some(m) = DASH_SPLIT_RE.find(line) {
        let name = line[..m.start()].trim();
        let desc = line[m.end()..].trim();
        if !name.is_empty() {
            let desc = if desc.is_empty() {
                None
            } else {
                Some(desc.to_string())
            };
            return (name.to_string(), desc);
        }
    }
    (line.trim().to_string(), None)
}

/// True when every alphabetic character in the line is uppercase (and there
/// is at least one). Accented capitals like `Å` or `É` count as uppercase,
/// so diacritics cannot defeat the test.
pub fn is_all_caps(line: &str) -> bool {
    let mut saw_alpha = false;
    for ch in line.chars() {
        if ch.is_alphabetic() {
            saw_alpha = true;
            if ch.is_lowercase() {
                return false;
            }
        }
    }
    saw_alpha
}

/// Extracts a trailing `<number> kr` price from free text. Returns the
/// residue (with any dangling dash or space stripped) and the price.
pub fn extract_price(line: &str) -> (String, Option<String>) {
    match PRICE_RE.captures(line) {
        Some(caps) => {
            let price = format!("{} kr", &caps[1]);
            let m = caps.get(0).unwrap();
            let mut residue = String::with_capacity(line.len());
            residue.push_str(&line[..m.start()]);
            residue.push_str(&line[m.end()..]);
            let residue = residue.trim().trim_matches(['–', '-', ' ']).to_string();
            (residue, Some(price))
        }
        None => (line.trim().to_string(), None),
    }
}

/// Category labels captured from styling markers carry trailing colons and
/// stray whitespace.
pub fn clean_category(raw: &str) -> String {
    raw.trim().trim_end_matches(':').trim().to_string()
}

/// Lowercases and strips diacritics down to ASCII, for comparing Swedish
/// headers and day names regardless of source encoding quirks.
pub fn fold_ascii_lower(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter_map(|ch| match ch {
            'å' | 'ä' | 'à' | 'á' | 'â' | 'Å' | 'Ä' | 'À' | 'Á' | 'Â' => Some('a'),
            'ö' | 'ø' | 'ô' | 'ò' | 'ó' | 'Ö' | 'Ø' | 'Ô' | 'Ò' | 'Ó' => Some('o'),
            'é' | 'è' | 'ê' | 'ë' | 'É' | 'È' | 'Ê' | 'Ë' => Some('e'),
            'ü' | 'ú' | 'ù' | 'Ü' | 'Ú' | 'Ù' => Some('u'),
            'í' | 'ì' | 'î' | 'Í' | 'Ì' | 'Î' => Some('i'),
            c if c.is_ascii() => Some(c.to_ascii_lowercase()),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noise_lines_are_rejected() {
        assert!(is_noise("–"));
        assert!(is_noise(" - "));
        assert!(is_noise("ab"));
        assert!(!is_noise("Fisk"));
    }

    #[test]
    fn splits_on_first_dash_only() {
        let (name, desc) = split_name_description("Kyckling – med ris och sallad");
        assert_eq!(name, "Kyckling");
        assert_eq!(desc.as_deref(), Some("med ris och sallad"));

        let (name, desc) = split_name_description("Kyckling – med ris – extra sås");
        assert_eq!(name, "Kyckling");
        assert_eq!(desc.as_deref(), Some("med ris – extra sås"));
    }

    #[test]
    fn plain_hyphen_needs_surrounding_space() {
        // Hyphenated words are not separators.
        let (name, desc) = split_name_description("Wok-nudlar med kyckling");
        assert_eq!(name, "Wok-nudlar med kyckling");
        assert_eq!(desc, None);

        let (name, desc) = split_name_description("Wok - nudlar");
        assert_eq!(name, "Wok");
        assert_eq!(desc.as_deref(), Some("nudlar"));
    }

    #[test]
    fn no_dash_means_no_description() {
        let (name, desc) = split_name_description("Pannbiff med lök");
        assert_eq!(name, "Pannbiff med lök");
        assert_eq!(desc, None);
    }

    #[test]
    fn all_caps_survives_diacritics() {
        assert!(is_all_caps("GRILLAD LAX MED RÅRAKOR"));
        assert!(is_all_caps("CRÈME BRÛLÉE".to_uppercase().as_str()));
        assert!(!is_all_caps("Grillad LAX"));
        assert!(!is_all_caps("129"));
    }

    #[test]
    fn price_is_extracted_and_residue_cleaned() {
        let (name, price) = extract_price("Dagens pasta – 129 kr");
        assert_eq!(name, "Dagens pasta");
        assert_eq!(price.as_deref(), Some("129 kr"));

        let (name, price) = extract_price("Husmanskost 95kr");
        assert_eq!(name, "Husmanskost");
        assert_eq!(price.as_deref(), Some("95 kr"));

        let (name, price) = extract_price("Sallad");
        assert_eq!(name, "Sallad");
        assert_eq!(price, None);
    }

    #[test]
    fn four_digit_numbers_are_not_prices() {
        let (name, price) = extract_price("Meny 2025");
        assert_eq!(name, "Meny 2025");
        assert_eq!(price, None);
    }

    #[test]
    fn category_cleanup() {
        assert_eq!(clean_category("  Veckans fisk : "), "Veckans fisk");
        assert_eq!(clean_category("Vegetariskt:"), "Vegetariskt");
    }

    #[test]
    fn ascii_fold() {
        assert_eq!(fold_ascii_lower("MÅNDAG"), "mandag");
        assert_eq!(fold_ascii_lower(" Crème "), "creme");
    }
}
