//! Text normalization for recognized receipt text
//!
//! OCR output is messy: stray punctuation inside labels, inconsistent
//! whitespace, blank lines. The pipeline works over two parallel views of
//! the same text because label patterns sometimes only match the cleaned
//! variant (e.g. "T*otal :" recognized from a crumpled receipt).

/// Line-oriented views of one recognized document
///
/// Ephemeral: built per extraction call, discarded afterwards.
#[derive(Debug)]
pub struct RecognizedDocument {
    raw_lines: Vec<String>,
    normalized_lines: Vec<String>,
}

impl RecognizedDocument {
    pub fn new(text: &str) -> Self {
        let raw_lines = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();

        let normalized_lines = text
            .lines()
            .map(normalize_line)
            .filter(|l| !l.is_empty())
            .collect();

        Self {
            raw_lines,
            normalized_lines,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.raw_lines.is_empty() && self.normalized_lines.is_empty()
    }

    pub fn raw_lines(&self) -> &[String] {
        &self.raw_lines
    }

    pub fn normalized_lines(&self) -> &[String] {
        &self.normalized_lines
    }

    /// Raw lines followed by normalized lines, each sequence in document order
    pub fn all_lines(&self) -> impl Iterator<Item = &str> {
        self.raw_lines
            .iter()
            .chain(self.normalized_lines.iter())
            .map(String::as_str)
    }

    /// The last `n` raw lines, in document order
    pub fn trailing_raw_lines(&self, n: usize) -> &[String] {
        let start = self.raw_lines.len().saturating_sub(n);
        &self.raw_lines[start..]
    }
}

/// Replace everything except word characters, whitespace and `. , : -` with
/// spaces, then collapse whitespace runs
fn normalize_line(line: &str) -> String {
    let replaced: String = line
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' || c.is_whitespace() || ".,:-".contains(c) {
                c
            } else {
                ' '
            }
        })
        .collect();

    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}
