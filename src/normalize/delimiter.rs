//! Field delimiter detection.

/// Field delimiter of an exported table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Semicolon,
    Comma,
}

impl Delimiter {
    /// Detect the delimiter from the first non-empty line of a table.
    ///
    /// Semicolons win whenever present, even alongside commas: the portal's
    /// German exports use `;` between fields and `,` as decimal separator.
    pub fn detect(first_line: &str) -> Self {
        if first_line.contains(';') {
            Delimiter::Semicolon
        } else {
            Delimiter::Comma
        }
    }

    pub fn as_byte(self) -> u8 {
        match self {
            Delimiter::Semicolon => b';',
            Delimiter::Comma => b',',
        }
    }
}
