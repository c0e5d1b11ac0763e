//! Consistency and SEO-hygiene checks over a manifest stream.
//!
//! The validator never aborts on bad input: unparsable lines, records that
//! are not objects and unknown record types all become issues, and checking
//! continues with the next line.

use crate::error::{Error, Result};
use crate::filter::LinkClass;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Maximum number of issues listed in a report
pub const MAX_REPORTED_ISSUES: usize = 200;

/// How serious an issue is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// What went wrong on a manifest line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    Parse(String),
    NotAnObject,
    MissingDomain,
    EmptyContent { record_type: String },
    RelativePath { path: String },
    DuplicatePath { path: String },
    NonUtf8Charset { path: String },
    EmptyHref { class: LinkClass, path: String },
    EmptyImageSrc { path: String },
    MissingAlt { src: String, path: String },
    UnknownType { found: String },
}

/// A single finding, tied to its 1-based manifest line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub line: usize,
    pub kind: IssueKind,
}

impl Issue {
    pub fn severity(&self) -> Severity {
        match self.kind {
            IssueKind::MissingAlt { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let line = self.line;
        match &self.kind {
            IssueKind::Parse(e) => write!(f, "JSON parse error at line {line}: {e}"),
            IssueKind::NotAnObject => write!(f, "Line {line}: record is not a JSON object"),
            IssueKind::MissingDomain => write!(f, "Line {line}: site.domain missing"),
            IssueKind::EmptyContent { record_type } => {
                write!(f, "Line {line}: {record_type}.content empty")
            }
            IssueKind::RelativePath { path } => {
                write!(f, "Line {line}: page.path must start with \"/\" -> {path}")
            }
            IssueKind::DuplicatePath { path } => {
                write!(f, "Line {line}: duplicate page.path {path}")
            }
            IssueKind::NonUtf8Charset { path } => {
                write!(f, "Line {line}: non-utf8 charset for {path}")
            }
            IssueKind::EmptyHref { class, path } => {
                write!(f, "Line {line}: empty {} href at {path}", class.as_str())
            }
            IssueKind::EmptyImageSrc { path } => {
                write!(f, "Line {line}: empty image src at {path}")
            }
            IssueKind::MissingAlt { src, path } => {
                write!(f, "Line {line}: missing alt for image {src} at {path}")
            }
            IssueKind::UnknownType { found } => write!(f, "Line {line}: unknown type {found}"),
        }
    }
}

/// Counts over the whole stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub pages: usize,
    pub unique_paths: usize,
    /// Total number of issues, including those left out of the report
    pub issues_count: usize,
}

/// Validation result as written by the `validate` command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub summary: Summary,
    /// The first [`MAX_REPORTED_ISSUES`] issues, formatted
    pub issues: Vec<String>,
    #[serde(skip)]
    pub error_count: usize,
}

impl Report {
    /// Whether any issue other than a warning was found
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Single-pass checker; feed it lines in stream order
#[derive(Debug, Default)]
pub struct Validator {
    seen_paths: HashSet<String>,
    pages: usize,
    issues: Vec<Issue>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check one raw manifest line. Blank lines are ignored.
    pub fn check_line(&mut self, line_num: usize, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }

        match serde_json::from_str::<Value>(line) {
            Ok(value) => self.check_record(line_num, &value),
            Err(e) => self.push(line_num, IssueKind::Parse(e.to_string())),
        }
    }

    /// Check one already-parsed record
    pub fn check_record(&mut self, line_num: usize, record: &Value) {
        let Some(obj) = record.as_object() else {
            self.push(line_num, IssueKind::NotAnObject);
            return;
        };

        match obj.get("type").and_then(Value::as_str) {
            Some("site") => {
                if is_blank(obj.get("domain")) {
                    self.push(line_num, IssueKind::MissingDomain);
                }
            }
            Some(record_type @ ("robotsTxt" | "sitemapXml")) => {
                if is_blank(obj.get("content")) {
                    self.push(
                        line_num,
                        IssueKind::EmptyContent {
                            record_type: record_type.to_string(),
                        },
                    );
                }
            }
            Some("page") => self.check_page(line_num, record),
            _ => {
                let found = match obj.get("type") {
                    None => "(missing)".to_string(),
                    Some(Value::String(s)) => s.clone(),
                    Some(other) => other.to_string(),
                };
                self.push(line_num, IssueKind::UnknownType { found });
            }
        }
    }

    fn check_page(&mut self, line_num: usize, page: &Value) {
        self.pages += 1;

        let path = text(page.get("path")).to_string();
        if !path.starts_with('/') {
            self.push(line_num, IssueKind::RelativePath { path: path.clone() });
        }
        if !self.seen_paths.insert(path.clone()) {
            self.push(line_num, IssueKind::DuplicatePath { path: path.clone() });
        }

        let charset = text(page.pointer("/meta/charset")).to_lowercase();
        if charset != "utf-8" && charset != "utf8" {
            self.push(line_num, IssueKind::NonUtf8Charset { path: path.clone() });
        }

        for (field, class) in [
            ("internalLinks", LinkClass::Internal),
            ("externalLinks", LinkClass::External),
        ] {
            for link in items(page.get(field)) {
                if text(link.get("href")).trim().is_empty() {
                    self.push(
                        line_num,
                        IssueKind::EmptyHref {
                            class,
                            path: path.clone(),
                        },
                    );
                }
            }
        }

        for image in items(page.get("images")) {
            let src = text(image.get("src")).trim();
            if src.is_empty() {
                self.push(line_num, IssueKind::EmptyImageSrc { path: path.clone() });
            }
            if text(image.get("alt")).trim().is_empty() {
                self.push(
                    line_num,
                    IssueKind::MissingAlt {
                        src: src.to_string(),
                        path: path.clone(),
                    },
                );
            }
        }
    }

    fn push(&mut self, line: usize, kind: IssueKind) {
        self.issues.push(Issue { line, kind });
    }

    /// All issues found so far, in stream order
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Produce the capped report
    pub fn finish(self) -> Report {
        let error_count = self
            .issues
            .iter()
            .filter(|issue| issue.severity() == Severity::Error)
            .count();

        Report {
            summary: Summary {
                pages: self.pages,
                unique_paths: self.seen_paths.len(),
                issues_count: self.issues.len(),
            },
            issues: self
                .issues
                .iter()
                .take(MAX_REPORTED_ISSUES)
                .map(Issue::to_string)
                .collect(),
            error_count,
        }
    }
}

/// Validate a manifest read line by line. Invalid UTF-8 is replaced, not rejected.
pub fn validate_reader<R: BufRead>(mut reader: R) -> std::io::Result<Report> {
    let mut validator = Validator::new();
    let mut buf = Vec::new();
    let mut line_num = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_num += 1;
        validator.check_line(line_num, &String::from_utf8_lossy(&buf));
    }

    ::log::debug!("Validated {} manifest lines", line_num);
    Ok(validator.finish())
}

/// Validate the manifest stored at `path`
pub fn validate_file<P: AsRef<Path>>(path: P) -> Result<Report> {
    let path = path.as_ref();
    let io_error = |source| Error::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(io_error)?;
    let report = validate_reader(BufReader::new(file)).map_err(io_error)?;

    ::log::info!(
        "Validated {}: {} pages, {} issues",
        path.display(),
        report.summary.pages,
        report.summary.issues_count
    );
    Ok(report)
}

/// JSON truthiness: missing, null, "", false, 0, [] and {} are blank
fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::Bool(b)) => !b,
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(a)) => a.is_empty(),
        Some(Value::Object(o)) => o.is_empty(),
    }
}

/// String value of a field, empty when missing or not a string
fn text(value: Option<&Value>) -> &str {
    value.and_then(Value::as_str).unwrap_or("")
}

/// Elements of an array field, empty when missing or not an array
fn items(value: Option<&Value>) -> &[Value] {
    value
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}
