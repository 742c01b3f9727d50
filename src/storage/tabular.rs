//! CSV codec for credential input and result artifacts
//!
//! Input is RFC 4180 CSV with a header row. The username and password
//! columns are located by header name. A column that is not named falls
//! back to the first two columns. A `"` opens a quoted field only as the
//! first character of the field; anywhere else it is literal.

use crate::core::models::{Record, RecordStatus};
use crate::utils::error::ParseError;
use std::collections::HashSet;

const BOM: &str = "\u{feff}";

const USERNAME_HEADERS: &[&str] = &["username", "user", "account", "login"];
const PASSWORD_HEADERS: &[&str] = &["password", "pass", "credential"];

/// Header of every result artifact
pub const RESULT_HEADER: [&str; 8] = [
    "Username",
    "Password",
    "Balance",
    "Last Deposit",
    "Deposit Time",
    "Deposit Transaction",
    "Status",
    "Error",
];

/// A parsed row and the 1-based line it starts on
#[derive(Debug, PartialEq)]
struct Row {
    line: usize,
    fields: Vec<String>,
}

impl Row {
    fn is_blank(&self) -> bool {
        self.fields.iter().all(|f| f.trim().is_empty())
    }

    fn field(&self, index: usize) -> &str {
        self.fields.get(index).map(|f| f.trim()).unwrap_or_default()
    }
}

fn split_rows(text: &str) -> Vec<Row> {
    let mut rows = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut field_start = true;
    let mut line = 1;
    let mut row_line = 1;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field_start => {
                in_quotes = true;
                field_start = false;
            }
            ',' => {
                fields.push(std::mem::take(&mut field));
                field_start = true;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' | '\r' => {
                fields.push(std::mem::take(&mut field));
                rows.push(Row {
                    line: row_line,
                    fields: std::mem::take(&mut fields),
                });
                line += 1;
                row_line = line;
                field_start = true;
            }
            _ => {
                field.push(c);
                field_start = false;
            }
        }
    }

    if !field.is_empty() || !fields.is_empty() {
        fields.push(field);
        rows.push(Row {
            line: row_line,
            fields,
        });
    }

    rows
}

fn find_column(header: &Row, names: &[&str]) -> Option<usize> {
    header
        .fields
        .iter()
        .position(|h| names.contains(&h.trim().to_lowercase().as_str()))
}

/// Username and password column of `header`
///
/// A named column wins; the unnamed one takes whichever of the first two
/// columns is still free.
fn locate_columns(header: &Row) -> Result<(usize, usize), ParseError> {
    let named = (
        find_column(header, USERNAME_HEADERS),
        find_column(header, PASSWORD_HEADERS),
    );

    match named {
        (Some(u), Some(p)) => Ok((u, p)),
        _ if header.fields.len() < 2 => Err(ParseError::MissingRequiredFields {
            missing: match named {
                (Some(_), None) => "password",
                (None, Some(_)) => "username",
                _ => "username, password",
            }
            .to_string(),
        }),
        (Some(u), None) => Ok((u, if u == 0 { 1 } else { 0 })),
        (None, Some(p)) => Ok((if p == 0 { 1 } else { 0 }, p)),
        (None, None) => Ok((0, 1)),
    }
}

/// Parse an uploaded credential file into pending records
pub fn parse_records(input: &[u8]) -> Result<Vec<Record>, ParseError> {
    if input.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let text = std::str::from_utf8(input).map_err(|_| ParseError::InvalidEncoding)?;
    let text = text.strip_prefix(BOM).unwrap_or(text);
    if text.trim().is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let mut rows = split_rows(text).into_iter().filter(|row| !row.is_blank());
    let header = rows.next().ok_or(ParseError::EmptyInput)?;

    let (user_col, pass_col) = locate_columns(&header)?;

    let mut seen = HashSet::new();
    let mut records = Vec::new();

    for row in rows {
        let username = row.field(user_col);
        let password = row.field(pass_col);
        if username.is_empty() || password.is_empty() {
            continue;
        }

        if !seen.insert(username.to_string()) {
            return Err(ParseError::DuplicateRecord {
                line: row.line,
                id: username.to_string(),
            });
        }

        records.push(Record::new(username, password));
    }

    if records.is_empty() {
        return Err(ParseError::NoRecognizableRows);
    }

    Ok(records)
}

fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn push_row<'a>(out: &mut String, fields: impl IntoIterator<Item = &'a str>) {
    let line: Vec<String> = fields.into_iter().map(escape).collect();
    out.push_str(&line.join(","));
    out.push_str("\r\n");
}

/// Render records as a result artifact; zero records give a header-only file
pub fn write_records(records: &[Record]) -> String {
    let mut out = String::new();
    push_row(&mut out, RESULT_HEADER);

    for record in records {
        let (balance, last_deposit, deposit_time, txcode) = match &record.account {
            Some(account) => (
                format!("{:.2}", account.balance),
                format!("{:.2}", account.last_deposit),
                account.deposit_time.clone(),
                account.deposit_txcode.clone(),
            ),
            None => Default::default(),
        };
        let error = match (&record.status, &record.failure) {
            (RecordStatus::Failed, Some(failure)) => failure.code.as_str(),
            _ => "",
        };

        push_row(
            &mut out,
            [
                record.credential.username.as_str(),
                record.credential.password.as_str(),
                balance.as_str(),
                last_deposit.as_str(),
                deposit_time.as_str(),
                txcode.as_str(),
                record.status.label(),
                error,
            ],
        );
    }

    out
}
