//! Slug derivation and validation.
//!
//! A slug is the URL-safe identifier of a document: lower-case ASCII letters
//! and digits in runs separated by single hyphens.

use quire_core::{Error, Result};

/// Derive a slug from free text (usually a title).
///
/// Common Latin accented letters are folded to ASCII; every run of other
/// characters becomes a single hyphen. The result is empty when `text`
/// contains no letters or digits at all.
///
/// ```
/// use quire_content::slug::slugify;
///
/// assert_eq!(slugify("Python's match statement"), "python-s-match-statement");
/// assert_eq!(slugify("  Zażółć gęślą jaźń  "), "zazolc-gesla-jazn");
/// ```
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for ch in text.chars().flat_map(char::to_lowercase) {
        let ascii = ch.is_ascii_lowercase() || ch.is_ascii_digit();
        let folded = if ascii { "" } else { fold(ch) };
        if !ascii && folded.is_empty() {
            pending_dash = true;
            continue;
        }
        if pending_dash && !slug.is_empty() {
            slug.push('-');
        }
        pending_dash = false;
        if ascii {
            slug.push(ch);
        } else {
            slug.push_str(folded);
        }
    }

    slug
}

/// Whether `slug` already has canonical form.
pub fn is_url_safe(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Check that `slug` is URL-safe.
///
/// # Errors
///
/// Returns [`Error::InvalidData`] naming the offending slug.
pub fn validate_slug(slug: &str) -> Result<()> {
    if is_url_safe(slug) {
        Ok(())
    } else {
        Err(Error::invalid_data(format!(
            "slug '{slug}' must be lowercase kebab-case (a-z, 0-9, single hyphens)"
        )))
    }
}

/// ASCII replacement for a lower-cased non-ASCII letter; empty means "separator".
fn fold(ch: char) -> &'static str {
    match ch {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ą' | 'ā' => "a",
        'æ' => "ae",
        'ç' | 'ć' | 'č' => "c",
        'ď' | 'đ' => "d",
        'è' | 'é' | 'ê' | 'ë' | 'ę' | 'ě' | 'ē' => "e",
        'ì' | 'í' | 'î' | 'ï' | 'ī' => "i",
        'ł' | 'ľ' => "l",
        'ñ' | 'ń' | 'ň' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' => "o",
        'œ' => "oe",
        'ř' => "r",
        'ś' | 'š' => "s",
        'ß' => "ss",
        'ť' => "t",
        'ù' | 'ú' | 'û' | 'ü' | 'ů' | 'ū' => "u",
        'ý' | 'ÿ' => "y",
        'ź' | 'ż' | 'ž' => "z",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_titles() {
        assert_eq!(
            slugify("Solving Sudoku with Integer Programming"),
            "solving-sudoku-with-integer-programming"
        );
        assert_eq!(slugify("Monkeypatching in Python 3.10"), "monkeypatching-in-python-3-10");
        assert_eq!(slugify("Testing   concurrent -- code!"), "testing-concurrent-code");
    }

    #[test]
    fn test_slugify_trims_separators() {
        assert_eq!(slugify("  --Hello, World!--  "), "hello-world");
    }

    #[test]
    fn test_slugify_folds_accents() {
        assert_eq!(slugify("Crème brûlée"), "creme-brulee");
        assert_eq!(slugify("Łódź"), "lodz");
        assert_eq!(slugify("Straße"), "strasse");
    }

    #[test]
    fn test_slugify_empty_when_no_alnum() {
        assert_eq!(slugify("!!! ???"), "");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn test_slugify_output_is_url_safe() {
        for title in [
            "About",
            "IEEE 754: the good, the bad & the ugly",
            "What's new in 2021?",
            "x",
        ] {
            let slug = slugify(title);
            assert!(is_url_safe(&slug), "{title:?} gave {slug:?}");
        }
    }

    #[test]
    fn test_is_url_safe() {
        assert!(is_url_safe("pattern-matching"));
        assert!(is_url_safe("2021"));
        assert!(!is_url_safe(""));
        assert!(!is_url_safe("-leading"));
        assert!(!is_url_safe("trailing-"));
        assert!(!is_url_safe("double--dash"));
        assert!(!is_url_safe("Upper"));
        assert!(!is_url_safe("under_score"));
        assert!(!is_url_safe("with space"));
    }

    #[test]
    fn test_validate_slug() {
        assert!(validate_slug("about").is_ok());
        let err = validate_slug("About Me").unwrap_err();
        assert!(err.to_string().contains("About Me"));
    }
}
