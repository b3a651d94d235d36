//! # Client Import
//!
//! One client per CSV row, columns matched by position:
//!
//! | # | Column | Notes |
//! |---|--------|-------|
//! | 0 | Client Name | required |
//! | 1 | Contact Email | |
//! | 2 | Contact Phone | |
//! | 3 | Assigned Zip Codes | comma-separated inside a quoted field |
//! | 4 | Status | optional; `active` or `inactive`, defaults to `active` |
//!
//! The first row is a header and is skipped. Postal code entries that are not
//! five digits are dropped with a warning; the row itself is kept. Rows that
//! cannot become a client (no name, unknown status) are reported in
//! [`ImportReport::rejected`] and the rest of the file still imports.

use std::io::Read;

use chrono::NaiveDate;
use serde::Serialize;

use territory_core::{ClientId, ClientStatus, PostalCode};
use territory_engine::{ClientDraft, TerritoryBook};

use crate::error::StoreError;

/// Suggested file name for [`IMPORT_TEMPLATE`].
pub const IMPORT_TEMPLATE_FILE_NAME: &str = "client-import-template.csv";

/// A ready-to-fill import file with two sample rows.
pub const IMPORT_TEMPLATE: &str = "\
Client Name,Contact Email,Contact Phone,Assigned Zip Codes (comma-separated),Status
Acme Events,contact@acme.com,555-0101,\"10001,10002,10003\",active
Premier Productions,info@premier.com,555-0102,\"10004,10005\",active
";

/// A row that could not be imported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedRow {
    /// 1-based line number in the input, counting the header.
    pub line: u64,
    /// Why the row was rejected.
    pub reason: String,
}

/// An accepted row, ready to commit.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRow {
    /// 1-based line number in the input, counting the header.
    pub line: u64,
    /// The client the row describes.
    pub draft: ClientDraft,
}

/// Parsed import file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportReport {
    /// One entry per accepted row, in file order.
    pub drafts: Vec<ParsedRow>,
    /// Rows that failed to parse.
    pub rejected: Vec<RejectedRow>,
    /// Postal code entries dropped from accepted rows.
    pub dropped_postal_codes: Vec<String>,
}

/// Result of committing an [`ImportReport`] to a book.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportOutcome {
    /// Clients created, in file order.
    pub imported: Vec<ClientId>,
    /// Rows rejected while parsing or while committing, in line order.
    pub rejected: Vec<RejectedRow>,
}

/// Parse client rows from CSV.
///
/// Only a reader that cannot be read at all is an error; per-row problems go
/// into the report.
pub fn parse_clients<R: Read>(reader: R) -> Result<ImportReport, StoreError> {
    let mut rows = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut report = ImportReport::default();
    for (index, record) in rows.records().enumerate() {
        let record = record?;
        let line = record
            .position()
            .map(|p| p.line())
            .unwrap_or(index as u64 + 2);

        let field = |i: usize| record.get(i).unwrap_or("").to_string();
        let name = field(0);
        if name.is_empty() {
            report.rejected.push(RejectedRow {
                line,
                reason: "client name is required".to_string(),
            });
            continue;
        }

        let status_field = field(4);
        let status = if status_field.is_empty() {
            ClientStatus::Active
        } else {
            match status_field.parse::<ClientStatus>() {
                Ok(status) => status,
                Err(e) => {
                    report.rejected.push(RejectedRow {
                        line,
                        reason: e.to_string(),
                    });
                    continue;
                }
            }
        };

        let (postal_codes, dropped) = PostalCode::parse_list(&field(3));
        for entry in &dropped {
            tracing::warn!(line, client = %name, entry = %entry, "dropped invalid postal code");
        }
        report.dropped_postal_codes.extend(dropped);

        let mut draft = ClientDraft::new(name, postal_codes);
        draft.contact_email = field(1);
        draft.contact_phone = field(2);
        draft.status = status;
        report.drafts.push(ParsedRow { line, draft });
    }

    tracing::debug!(
        accepted = report.drafts.len(),
        rejected = report.rejected.len(),
        "parsed client import"
    );
    Ok(report)
}

impl ImportReport {
    /// Create every accepted client in `book`. A draft the book refuses (for
    /// example a territory clash with an existing active client) becomes a
    /// rejected row; the others still commit.
    pub fn commit(self, book: &mut TerritoryBook, today: NaiveDate) -> ImportOutcome {
        let mut outcome = ImportOutcome {
            imported: Vec::new(),
            rejected: self.rejected,
        };
        for ParsedRow { line, draft } in self.drafts {
            let name = draft.name.clone();
            match book.upsert_client(draft, today) {
                Ok(id) => outcome.imported.push(id),
                Err(e) => outcome.rejected.push(RejectedRow {
                    line,
                    reason: format!("{name}: {e}"),
                }),
            }
        }
        outcome.rejected.sort_by_key(|row| row.line);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn template_parses_cleanly() {
        let report = parse_clients(IMPORT_TEMPLATE.as_bytes()).unwrap();
        assert!(report.rejected.is_empty());
        assert!(report.dropped_postal_codes.is_empty());
        assert_eq!(report.drafts.len(), 2);

        let acme = &report.drafts[0].draft;
        assert_eq!(acme.name, "Acme Events");
        assert_eq!(acme.contact_email, "contact@acme.com");
        assert_eq!(acme.contact_phone, "555-0101");
        let codes: Vec<_> = acme.postal_codes.iter().map(PostalCode::as_str).collect();
        assert_eq!(codes, vec!["10001", "10002", "10003"]);
        assert_eq!(acme.status, ClientStatus::Active);
    }

    #[test]
    fn status_column_is_optional_and_case_insensitive() {
        let input = "\
Client Name,Contact Email,Contact Phone,Assigned Zip Codes (comma-separated),Status
Alpha,,,10001
Beta,,,10002,INACTIVE
";
        let report = parse_clients(input.as_bytes()).unwrap();
        assert_eq!(report.drafts[0].draft.status, ClientStatus::Active);
        assert_eq!(report.drafts[1].draft.status, ClientStatus::Inactive);
    }

    #[test]
    fn invalid_codes_are_dropped_not_fatal() {
        let input = "\
Client Name,Contact Email,Contact Phone,Assigned Zip Codes (comma-separated),Status
Alpha,,,\"10001, 1234, abcde ,10002\",active
";
        let report = parse_clients(input.as_bytes()).unwrap();
        assert_eq!(report.drafts.len(), 1);
        assert_eq!(report.drafts[0].draft.postal_codes.len(), 2);
        assert_eq!(report.dropped_postal_codes, vec!["1234", "abcde"]);
    }

    #[test]
    fn bad_rows_are_reported_with_line_numbers() {
        let input = "\
Client Name,Contact Email,Contact Phone,Assigned Zip Codes (comma-separated),Status
,missing@name.com,,10001,active
Gamma,,,10003,paused
Delta,,,10004,active
";
        let report = parse_clients(input.as_bytes()).unwrap();
        assert_eq!(report.drafts.len(), 1);
        assert_eq!(report.drafts[0].draft.name, "Delta");
        assert_eq!(report.rejected.len(), 2);
        assert_eq!(report.rejected[0].line, 2);
        assert!(report.rejected[0].reason.contains("name"));
        assert_eq!(report.rejected[1].line, 3);
        assert!(report.rejected[1].reason.contains("paused"));
    }

    #[test]
    fn commit_creates_clients_and_reports_clashes() {
        let input = "\
Client Name,Contact Email,Contact Phone,Assigned Zip Codes (comma-separated),Status
Acme,,,\"10001,10002\",active
Rival,,,10002,active
Dormant,,,10002,inactive
";
        let mut book = TerritoryBook::default();
        let outcome = parse_clients(input.as_bytes())
            .unwrap()
            .commit(&mut book, today());

        assert_eq!(outcome.imported.len(), 2);
        assert_eq!(outcome.rejected.len(), 1);
        assert_eq!(outcome.rejected[0].line, 3);
        assert!(outcome.rejected[0].reason.contains("Rival"));
        assert!(outcome.rejected[0].reason.contains("10002"));
        assert_eq!(book.clients().len(), 2);
    }

    #[test]
    fn commit_merges_rejections_in_line_order() {
        let input = "\
Client Name,Contact Email,Contact Phone,Assigned Zip Codes (comma-separated),Status
Acme,,,10001,active
Rival,,,10001,active
,,,10002,active
";
        let mut book = TerritoryBook::default();
        let outcome = parse_clients(input.as_bytes())
            .unwrap()
            .commit(&mut book, today());

        let lines: Vec<_> = outcome.rejected.iter().map(|r| r.line).collect();
        assert_eq!(lines, vec![3, 4]);
        assert!(outcome.rejected[0].reason.starts_with("Rival:"));
    }

    #[test]
    fn header_only_input_is_empty() {
        let report = parse_clients(
            "Client Name,Contact Email,Contact Phone,Assigned Zip Codes (comma-separated),Status\n"
                .as_bytes(),
        )
        .unwrap();
        assert_eq!(report, ImportReport::default());
    }
}
