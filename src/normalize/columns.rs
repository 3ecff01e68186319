//! Date/value column resolution from header names.

/// Header substrings that mark a date column (matched lowercase).
const DATE_TOKENS: [&str; 3] = ["datum", "date", "zeit"];

/// Header substrings that mark a value column (matched lowercase).
const VALUE_TOKENS: [&str; 3] = ["wert", "value", "messwert"];

/// The two header fields the normalizer reads from every row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMapping {
    pub date: Option<String>,
    pub value: Option<String>,
}

impl ColumnMapping {
    /// Resolve date and value columns from an ordered header.
    ///
    /// Name matches win; otherwise the first header is the date column and
    /// the second is the value column.
    pub fn resolve<S: AsRef<str>>(headers: &[S]) -> Self {
        let mut date: Option<&str> = None;
        let mut value: Option<&str> = None;

        for header in headers {
            let header: &str = header.as_ref();
            let lower = header.to_lowercase();

            if date.is_none() && matches_any(&lower, &DATE_TOKENS) {
                date = Some(header);
                continue;
            }
            if value.is_none() && matches_any(&lower, &VALUE_TOKENS) {
                value = Some(header);
            }
        }

        let date = date.or_else(|| headers.first().map(|h| h.as_ref()));
        let value = value.or_else(|| headers.get(1).map(|h| h.as_ref()));

        Self {
            date: date.map(str::to_string),
            value: value.map(str::to_string),
        }
    }

    /// Whether rows can yield records at all.
    pub fn is_resolved(&self) -> bool {
        self.date.is_some()
    }
}

fn matches_any(text: &str, tokens: &[&str]) -> bool {
    tokens.iter().any(|token| text.contains(token))
}
