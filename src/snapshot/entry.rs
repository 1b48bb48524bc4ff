//! A single configuration value.

/// One parsed configuration value: the raw file contents plus, when the
/// trimmed contents are a base-10 `u64`, that integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    raw_value: String,
    integer_value: Option<u64>,
}

impl Entry {
    /// Build an entry from raw text, attaching an integer form if it parses.
    pub fn new(raw_value: impl Into<String>) -> Self {
        let raw_value = raw_value.into();
        let trimmed = raw_value.trim();
        // `u64::from_str` takes a leading '+'; unsigned config values never carry a sign.
        let integer_value = if trimmed.starts_with('+') {
            None
        } else {
            trimmed.parse::<u64>().ok()
        };
        Self {
            raw_value,
            integer_value,
        }
    }

    /// Entry carrying only raw text, with no integer form regardless of content.
    pub fn text(raw_value: impl Into<String>) -> Self {
        Self {
            raw_value: raw_value.into(),
            integer_value: None,
        }
    }

    /// Exact file contents, untrimmed.
    pub fn raw_value(&self) -> &str {
        &self.raw_value
    }

    pub fn integer_value(&self) -> Option<u64> {
        self.integer_value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_with_whitespace() {
        let entry = Entry::new("\n 34  ");
        assert_eq!(entry.raw_value(), "\n 34  ");
        assert_eq!(entry.integer_value(), Some(34));
    }

    #[test]
    fn test_non_integer_values() {
        assert_eq!(Entry::new("hello").integer_value(), None);
        assert_eq!(Entry::new("-1").integer_value(), None);
        assert_eq!(Entry::new("1.5").integer_value(), None);
        assert_eq!(Entry::new("true").integer_value(), None);
        assert_eq!(Entry::new("").integer_value(), None);
        assert_eq!(Entry::new("+34").integer_value(), None);
        assert_eq!(Entry::new(" +0\n").integer_value(), None);
        assert_eq!(Entry::new("0").integer_value(), Some(0));
    }

    #[test]
    fn test_text_has_no_integer() {
        let entry = Entry::text("42");
        assert_eq!(entry.raw_value(), "42");
        assert_eq!(entry.integer_value(), None);
    }

    #[test]
    fn test_u64_bounds() {
        assert_eq!(Entry::new("18446744073709551615").integer_value(), Some(u64::MAX));
        assert_eq!(Entry::new("18446744073709551616").integer_value(), None);
    }
}
