//! Delimited-text reading and writing
//!
//! Handles the RFC 4180 subset the dashboards' input files use: quoted
//! fields, doubled quotes, delimiters and line breaks inside quotes, and
//! CRLF line endings. Blank lines are skipped.

use crate::core::error::{Result, TrendscopeError};
use std::io::Write;

/// Split delimited text into rows of raw field values.
pub fn parse_rows(text: &str, delimiter: char) -> Result<Vec<Vec<String>>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut after_quote = false;
    let mut line = 1;
    let mut row_start_line = 1;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => {
                    in_quotes = false;
                    after_quote = true;
                }
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.is_empty() && !after_quote => in_quotes = true,
            c if c == delimiter => {
                row.push(std::mem::take(&mut field));
                after_quote = false;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\r' | '\n' => {
                row.push(std::mem::take(&mut field));
                push_row(&mut rows, std::mem::take(&mut row));
                after_quote = false;
                line += 1;
                row_start_line = line;
            }
            _ if after_quote => {
                return Err(TrendscopeError::Parse {
                    line,
                    message: format!("unexpected character '{c}' after closing quote"),
                });
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(TrendscopeError::Parse {
            line: row_start_line,
            message: "unterminated quoted field".to_string(),
        });
    }

    if !field.is_empty() || !row.is_empty() || after_quote {
        row.push(field);
        push_row(&mut rows, row);
    }

    Ok(rows)
}

fn push_row(rows: &mut Vec<Vec<String>>, row: Vec<String>) {
    let blank = row.len() == 1 && row[0].trim().is_empty();
    if !blank {
        rows.push(row);
    }
}

/// Quote a field only when it contains the delimiter, a quote or a line break.
pub fn escape_field(value: &str, delimiter: char) -> String {
    let needs_quotes = value.contains(delimiter)
        || value.contains('"')
        || value.contains('\n')
        || value.contains('\r');
    if needs_quotes {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Write one row terminated by `\n`.
pub fn write_row<W, S>(writer: &mut W, fields: &[S], delimiter: char) -> Result<()>
where
    W: Write + ?Sized,
    S: AsRef<str>,
{
    let line = fields
        .iter()
        .map(|field| escape_field(field.as_ref(), delimiter))
        .collect::<Vec<_>>()
        .join(&delimiter.to_string());
    writer.write_all(line.as_bytes())?;
    writer.write_all(b"\n")?;
    Ok(())
}
