use tracing::debug;

const DELIMITER: char = ',';
const QUOTE: char = '"';

/// A row whose quoted field was never closed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unterminated quoted field")]
pub struct MalformedRow;

/// Splits one delimited line into trimmed fields.
///
/// `""` inside a quoted field is a literal quote. Delimiters only separate
/// fields outside quotes.
pub fn parse_line(line: &str) -> Result<Vec<String>, MalformedRow> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            QUOTE if quoted && chars.peek() == Some(&QUOTE) => {
                current.push(QUOTE);
                chars.next();
            }
            QUOTE => quoted = !quoted,
            DELIMITER if !quoted => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            other => current.push(other),
        }
    }

    if quoted {
        return Err(MalformedRow);
    }

    fields.push(current.trim().to_string());
    Ok(fields)
}

/// Parses a whole table. Blank lines and `#` comments are skipped; malformed
/// rows are dropped.
pub fn parse_rows(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        match parse_line(line) {
            Ok(fields) => rows.push(fields),
            Err(err) => debug!(line = index + 1, %err, "dropping malformed row"),
        }
    }

    rows
}
