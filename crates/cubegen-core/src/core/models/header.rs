use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt;

/// Append-only provenance record emitted ahead of the data it describes.
///
/// The header is scoped to one generation request and written by a single
/// stage at a time; the pipeline finalizes it before any voxel or mesh data is
/// produced, so provenance always precedes data.
#[derive(Debug, Clone, Default)]
pub struct HeaderRecord {
    lines: Vec<String>,
    created_at: Option<DateTime<Utc>>,
}

impl HeaderRecord {
    /// Creates an empty header.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one free-form line.
    pub fn append_line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Writes the standard provenance stamp: creator, timestamp, calculation
    /// type, and a free-form comment line.
    ///
    /// The timestamp of the first stamp is retained and observable through
    /// [`HeaderRecord::created_at`].
    pub fn stamp(&mut self, calc_type: &str, comment: &str) {
        let now = Utc::now();
        self.lines.push(format!(
            "#created by cubegen on {}",
            now.to_rfc3339_opts(SecondsFormat::Secs, true)
        ));
        self.lines.push(calc_type.to_string());
        self.lines.push(comment.to_string());
        if self.created_at.is_none() {
            self.created_at = Some(now);
        }
    }

    /// The timestamp recorded by the first [`HeaderRecord::stamp`] call, if any.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    /// The header lines in insertion order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Whether nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl fmt::Display for HeaderRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stamp_records_creator_calc_type_and_comment() {
        let mut header = HeaderRecord::new();
        header.stamp("Esp", "electrostatic potential over selection");

        assert_eq!(header.lines().len(), 3);
        assert!(header.lines()[0].starts_with("#created by cubegen on "));
        assert_eq!(header.lines()[1], "Esp");
        assert_eq!(header.lines()[2], "electrostatic potential over selection");
        assert!(header.created_at().is_some());
    }

    #[test]
    fn first_timestamp_is_retained_across_appends() {
        let mut header = HeaderRecord::new();
        header.stamp("Esp", "");
        let first = header.created_at().unwrap();
        header.append_line("grid 5 x 5 x 5");
        header.stamp("Esp", "second pass");
        assert_eq!(header.created_at(), Some(first));
    }

    #[test]
    fn display_emits_one_line_per_entry() {
        let mut header = HeaderRecord::new();
        header.append_line("a");
        header.append_line("b");
        assert_eq!(header.to_string(), "a\nb\n");
    }

    #[test]
    fn new_header_is_empty() {
        let header = HeaderRecord::new();
        assert!(header.is_empty());
        assert!(header.created_at().is_none());
    }
}
