use campaign_core::types::PolicyWarning;

/// Claims that need substantiation before they can run.
pub const FLAGGED_WORDS: [&str; 5] = ["fda", "clinically", "cure", "guarantee", "risk-free"];

/// Scan `text` for flagged claims, case-insensitively, by substring.
///
/// One warning per flagged word present, in list order. A word found
/// inside a longer one still counts ("guaranteed" flags "guarantee").
pub fn check_policy(text: &str) -> Vec<PolicyWarning> {
    let lower = text.to_lowercase();

    FLAGGED_WORDS
        .iter()
        .filter(|word| lower.contains(*word))
        .map(|word| PolicyWarning {
            word: word.to_string(),
            message: format!(
                "Warning: \"{word}\" may violate advertising policies. Claims must be substantiated."
            ),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cure_and_guarantee() {
        let warnings = check_policy("This product can cure anything, guaranteed!");
        let words: Vec<&str> = warnings.iter().map(|w| w.word.as_str()).collect();
        assert_eq!(words, ["cure", "guarantee"]);
        assert_eq!(
            warnings[0].message,
            "Warning: \"cure\" may violate advertising policies. Claims must be substantiated."
        );
    }

    #[test]
    fn test_case_insensitive() {
        let warnings = check_policy("FDA approved and Clinically proven, RISK-FREE");
        let words: Vec<&str> = warnings.iter().map(|w| w.word.as_str()).collect();
        assert_eq!(words, ["fda", "clinically", "risk-free"]);
    }

    #[test]
    fn test_one_warning_per_word() {
        assert_eq!(check_policy("cure cure cure").len(), 1);
    }

    #[test]
    fn test_clean_and_empty_text() {
        assert!(check_policy("").is_empty());
        assert!(check_policy("Premium Coffee Delivered Fresh").is_empty());
    }

    #[test]
    fn test_substring_matches() {
        // "secure" contains "cure".
        let warnings = check_policy("Fast, secure checkout.");
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].word, "cure");
    }
}
