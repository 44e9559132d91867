use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use log::{debug, info, warn};

use crate::classifier::{Decision, classify};
use crate::clients::{
    catalog::ArtistCatalog,
    errors::{Error, Result},
};

/// Column holding the listed artist name
pub const NAME_COLUMN: &str = "content";
/// Column the recommendation is written to
pub const DECISION_COLUMN: &str = "delete? Y/N";

/// Whole input file held in memory, header order preserved.
///
/// The decision column is always part of `headers`; rows only get a value
/// for it once a decision has been set.
pub struct ArtistTable {
    headers: StringRecord,
    rows: Vec<StringRecord>,
    name_index: Option<usize>,
    decision_index: usize,
}

impl ArtistTable {
    /// Load every row from a CSV source with a header line
    pub fn from_reader<R: Read>(source: R) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(source);
        let mut headers = reader.headers()?.clone();
        let width = headers.len();

        let name_index = headers.iter().position(|h| h == NAME_COLUMN);
        if name_index.is_none() {
            warn!("No '{NAME_COLUMN}' column found, every row will be marked for deletion");
        }
        let decision_index = if let Some(i) = headers.iter().position(|h| h == DECISION_COLUMN) {
            i
        } else {
            headers.push_field(DECISION_COLUMN);
            headers.len() - 1
        };

        let mut rows = Vec::new();
        for record in reader.records() {
            let mut record = record?;
            if record.len() > width {
                let line = record.position().map_or(0, csv::Position::line);
                return Err(Error::ParseError(format!(
                    "line {line} has {} fields but the header has {width}",
                    record.len()
                )));
            }
            // short rows read as empty cells
            while record.len() < width {
                record.push_field("");
            }
            rows.push(record);
        }
        debug!("Loaded {} rows", rows.len());

        Ok(ArtistTable {
            headers,
            rows,
            name_index,
            decision_index,
        })
    }

    /// Load a CSV file
    pub fn read(path: &Path) -> Result<Self> {
        Self::from_reader(File::open(path)?)
    }

    /// Header row, including the decision column
    #[must_use]
    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    /// Number of data rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the file had no data rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Listed name of row `index`, empty when the column is missing
    #[must_use]
    pub fn name(&self, index: usize) -> &str {
        self.name_index
            .and_then(|col| self.rows.get(index).and_then(|row| row.get(col)))
            .unwrap_or("")
    }

    /// Store the decision for row `index`, replacing any previous value
    pub fn set_decision(&mut self, index: usize, decision: Decision) {
        let decision_index = self.decision_index;
        let Some(row) = self.rows.get_mut(index) else {
            return;
        };
        let flag = decision.as_flag();
        let mut updated: StringRecord = row
            .iter()
            .enumerate()
            .map(|(i, field)| if i == decision_index { flag } else { field })
            .collect();
        // pad rows that predate the decision column
        while updated.len() <= decision_index {
            if updated.len() == decision_index {
                updated.push_field(flag);
            } else {
                updated.push_field("");
            }
        }
        *row = updated;
    }

    /// Write header and all rows to `sink`
    pub fn write_to<W: Write>(&self, sink: W) -> Result<()> {
        let mut writer = WriterBuilder::new()
            .flexible(true)
            .terminator(Terminator::CRLF)
            .from_writer(sink);
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Write the table to a new file at `path`
    pub fn write(&self, path: &Path) -> Result<()> {
        self.write_to(File::create(path)?)
    }
}

/// Counts reported at the end of a run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileSummary {
    /// Rows processed
    pub rows: usize,
    /// Rows marked `N`
    pub kept: usize,
    /// Rows marked `Y`
    pub deleted: usize,
}

impl ReconcileSummary {
    fn record(&mut self, decision: Decision) {
        self.rows += 1;
        match decision {
            Decision::Keep => self.kept += 1,
            Decision::Delete => self.deleted += 1,
        }
    }
}

/// Looks up every listed artist and annotates the table with a decision
pub struct Reconciler<C> {
    catalog: C,
    threshold: u8,
}

impl<C: ArtistCatalog> Reconciler<C> {
    /// New reconciler using `threshold` (0-100) as the minimum similarity to keep a row
    pub fn new(catalog: C, threshold: u8) -> Self {
        Reconciler { catalog, threshold }
    }

    /// Catalog used for lookups
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Classify every row of `table` in order. Stops at the first lookup error.
    pub async fn reconcile_table(&self, table: &mut ArtistTable) -> Result<ReconcileSummary> {
        let mut summary = ReconcileSummary::default();
        for index in 0..table.len() {
            let name = table.name(index).to_string();
            let decision = if name.is_empty() {
                debug!("Row {} has no artist name", index + 1);
                Decision::Delete
            } else {
                let lookup = self.catalog.search_artist(&name).await?;
                info!("artist name in csv: {name}");
                info!(
                    "retrieved artist name: {}",
                    lookup.retrieved_name().unwrap_or("<none>")
                );
                classify(&name, lookup.retrieved_name(), self.threshold)
            };
            table.set_decision(index, decision);
            summary.record(decision);
        }
        Ok(summary)
    }

    /// Read `input`, classify every row, then write everything to `output`.
    ///
    /// Nothing is written if any lookup fails.
    pub async fn reconcile(&self, input: &Path, output: &Path) -> Result<ReconcileSummary> {
        info!("Reading artists from {}", input.display());
        let mut table = ArtistTable::read(input)?;
        if table.is_empty() {
            warn!("{} has no artist rows, only the header will be written", input.display());
        }
        let summary = self.reconcile_table(&mut table).await?;
        table.write(output)?;
        info!(
            "CSV processing complete. Updated file saved to {} ({} rows, {} kept, {} marked for deletion)",
            output.display(),
            summary.rows,
            summary.kept,
            summary.deleted
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(csv: &str) -> ArtistTable {
        ArtistTable::from_reader(csv.as_bytes()).unwrap()
    }

    fn written(table: &ArtistTable) -> String {
        let mut out = Vec::new();
        table.write_to(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn appends_decision_column() {
        let t = table("id,content\n1,Madonna\n");
        assert_eq!(
            t.headers().iter().collect::<Vec<_>>(),
            vec!["id", "content", DECISION_COLUMN]
        );
        assert_eq!(t.name(0), "Madonna");
    }

    #[test]
    fn reuses_existing_decision_column() {
        let mut t = table("content,delete? Y/N,notes\nMadonna,Y,x\n");
        assert_eq!(t.headers().len(), 3);
        t.set_decision(0, Decision::Keep);
        assert_eq!(written(&t), "content,delete? Y/N,notes\r\nMadonna,N,x\r\n");
    }

    #[test]
    fn missing_name_column_reads_as_empty() {
        let t = table("artist\nMadonna\n");
        assert_eq!(t.name(0), "");
    }

    #[test]
    fn writes_decisions_in_order() {
        let mut t = table("content,extra\nA,1\n,2\n");
        t.set_decision(0, Decision::Keep);
        t.set_decision(1, Decision::Delete);
        assert_eq!(
            written(&t),
            "content,extra,delete? Y/N\r\nA,1,N\r\n,2,Y\r\n"
        );
    }

    #[test]
    fn short_rows_are_padded() {
        let mut t = table("content,notes\nMadonna\n");
        t.set_decision(0, Decision::Keep);
        assert_eq!(written(&t), "content,notes,delete? Y/N\r\nMadonna,,N\r\n");
    }

    #[test]
    fn short_row_without_name_reads_as_empty() {
        let mut t = table("id,content\n1\n2,Cher\n");
        assert_eq!(t.name(0), "");
        assert_eq!(t.name(1), "Cher");
        t.set_decision(0, Decision::Delete);
        t.set_decision(1, Decision::Keep);
        assert_eq!(
            written(&t),
            "id,content,delete? Y/N\r\n1,,Y\r\n2,Cher,N\r\n"
        );
    }

    #[test]
    fn long_rows_are_rejected() {
        let err = ArtistTable::from_reader("content\nMadonna,extra\n".as_bytes())
            .err()
            .unwrap();
        assert!(matches!(err, Error::ParseError(_)));
    }

    #[test]
    fn header_only_file_has_no_rows() {
        let t = table("content,notes\n");
        assert!(t.is_empty());
        assert_eq!(written(&t), "content,notes,delete? Y/N\r\n");
    }
}
