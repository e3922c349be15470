use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for well-formed design ids: uppercase prefix, hyphen, numeric
    /// suffix (zero-padded to at least 3 digits on generation).
    /// - Valid: "BALLOON-001", "FLORAL-042", "FLORAL-1234"
    /// - Invalid: "balloon-001", "FLORAL_001", "FLORAL-", "-001"
    pub static ref DESIGN_ID_REGEX: Regex = Regex::new(r"^([A-Z]+)-(\d+)$").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_design_id_regex_valid() {
        assert!(DESIGN_ID_REGEX.is_match("BALLOON-001"));
        assert!(DESIGN_ID_REGEX.is_match("FLORAL-042"));
        assert!(DESIGN_ID_REGEX.is_match("FLORAL-1234"));
    }

    #[test]
    fn test_design_id_regex_invalid() {
        assert!(!DESIGN_ID_REGEX.is_match("balloon-001")); // lowercase prefix
        assert!(!DESIGN_ID_REGEX.is_match("FLORAL_001")); // underscore
        assert!(!DESIGN_ID_REGEX.is_match("FLORAL-")); // missing number
        assert!(!DESIGN_ID_REGEX.is_match("-001")); // missing prefix
        assert!(!DESIGN_ID_REGEX.is_match("")); // empty
        assert!(!DESIGN_ID_REGEX.is_match("FLORAL-01a")); // trailing junk
    }
}
