//! Materialized (actual, predicted) observation sets.
//!
//! An [`ObservationSet`] is the only input of the binary and multi-class
//! matrices. It can be built from in-memory pairs, from pre-aggregated
//! counts, from a Polars `DataFrame` or from CSV. Tabular rows with a missing
//! label or an unusable count are skipped, not reported as errors.

use crate::config::ColumnRoles;
use crate::core::error::{MetricsError, Result, ValidationError};
use crate::core::types::{Count, IngestionMode, Label, Observation};
use crate::metrics::math;
use ndarray::Array2;
use std::collections::BTreeSet;

#[cfg(feature = "polars")]
use polars::prelude::*;

/// A complete, immutable collection of observations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservationSet {
    observations: Vec<Observation>,
    actual_labels: BTreeSet<Label>,
    predicted_labels: BTreeSet<Label>,
    skipped: usize,
}

impl ObservationSet {
    /// Ingest by row: every `(actual, predicted)` pair counts once.
    pub fn from_pairs<I, A, P>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (A, P)>,
        A: Into<Label>,
        P: Into<Label>,
    {
        Self::from_observations(pairs.into_iter().map(|(a, p)| Observation::new(a, p)))
    }

    /// Ingest by count: each `(actual, predicted, count)` triple is one
    /// pre-aggregated cell contribution.
    pub fn from_counted<I, A, P>(triples: I) -> Self
    where
        I: IntoIterator<Item = (A, P, Count)>,
        A: Into<Label>,
        P: Into<Label>,
    {
        Self::from_observations(
            triples
                .into_iter()
                .map(|(a, p, count)| Observation::with_count(a, p, count)),
        )
    }

    /// Collect already-built observations.
    pub fn from_observations<I: IntoIterator<Item = Observation>>(observations: I) -> Self {
        let mut set = ObservationSet::default();
        for observation in observations {
            set.push(observation);
        }
        set
    }

    fn push(&mut self, observation: Observation) {
        if !self.actual_labels.contains(&observation.actual) {
            self.actual_labels.insert(observation.actual.clone());
        }
        if !self.predicted_labels.contains(&observation.predicted) {
            self.predicted_labels.insert(observation.predicted.clone());
        }
        self.observations.push(observation);
    }

    /// Push a tabular row, skipping it when any field is unusable.
    fn push_row(&mut self, row: usize, actual: Option<&str>, predicted: Option<&str>, count: Option<Count>) {
        match (non_blank(actual), non_blank(predicted), count) {
            (Some(actual), Some(predicted), Some(count)) => {
                self.push(Observation::with_count(actual, predicted, count));
            }
            _ => {
                log::debug!("Skipping malformed observation row {}", row);
                self.skipped += 1;
            }
        }
    }

    /// Observations in ingestion order.
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Number of ingested rows.
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Whether no rows were ingested.
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Sum of all observation counts, saturating at `u64::MAX`.
    pub fn total(&self) -> Count {
        math::saturating_sum(self.observations.iter().map(|o| o.count))
    }

    /// Distinct ground-truth labels, ascending.
    pub fn actual_labels(&self) -> &BTreeSet<Label> {
        &self.actual_labels
    }

    /// Distinct predicted labels, ascending.
    pub fn predicted_labels(&self) -> &BTreeSet<Label> {
        &self.predicted_labels
    }

    /// Number of tabular rows dropped during ingestion.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Cross-tabulate into a `[actual][predicted]` grid indexed by the
    /// position of each label in the sorted `labels` slice. Observations
    /// whose labels are not in `labels` are left out. Cells saturate at
    /// `u64::MAX`.
    pub(crate) fn tabulate(&self, labels: &[Label]) -> Array2<Count> {
        let n = labels.len();
        let mut matrix = Array2::zeros((n, n));
        for observation in &self.observations {
            let actual = labels.binary_search(&observation.actual);
            let predicted = labels.binary_search(&observation.predicted);
            if let (Ok(i), Ok(j)) = (actual, predicted) {
                let cell: &mut Count = &mut matrix[[i, j]];
                *cell = cell.saturating_add(observation.count);
            }
        }
        matrix
    }

    fn log_summary(&self, source: &str) {
        log::debug!(
            "Ingested {} observations from {} ({} skipped, total count {})",
            self.len(),
            source,
            self.skipped,
            self.total()
        );
    }

    /// Read observations from a Polars `DataFrame`.
    ///
    /// Label columns of any dtype are cast to strings. In
    /// [`IngestionMode::ByCount`] the count column is cast to integers and
    /// rows with a null or negative count are skipped.
    #[cfg(feature = "polars")]
    pub fn from_dataframe(df: &DataFrame, columns: &ColumnRoles, mode: IngestionMode) -> Result<Self> {
        let actual = string_column(df, &columns.actual)?;
        let predicted = string_column(df, &columns.predicted)?;
        let counts: Vec<Option<Count>> = match mode {
            IngestionMode::ByRow => vec![Some(1); df.height()],
            IngestionMode::ByCount => count_column(df, &columns.count)?,
        };

        let mut set = ObservationSet::default();
        for (row, ((a, p), count)) in actual.iter().zip(predicted.iter()).zip(counts).enumerate() {
            set.push_row(row, a.as_deref(), p.as_deref(), count);
        }
        set.log_summary("DataFrame");
        Ok(set)
    }

    /// Read observations from CSV with a header row.
    ///
    /// Records that fail to parse, have an empty label, or carry an
    /// unparseable count are skipped.
    #[cfg(feature = "csv")]
    pub fn from_csv_reader<R: std::io::Read>(reader: R, columns: &ColumnRoles, mode: IngestionMode) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let position = |name: &str| -> Result<usize> {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| ValidationError::MissingColumn { column: name.to_string() }.into())
        };
        let actual_idx = position(&columns.actual)?;
        let predicted_idx = position(&columns.predicted)?;
        let count_idx = match mode {
            IngestionMode::ByRow => None,
            IngestionMode::ByCount => Some(position(&columns.count)?),
        };

        let mut set = ObservationSet::default();
        for (row, record) in rdr.records().enumerate() {
            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    log::debug!("Skipping unreadable CSV record {}: {}", row, e);
                    set.skipped += 1;
                    continue;
                }
            };
            let count = match count_idx {
                None => Some(1),
                Some(idx) => record.get(idx).and_then(|v| v.parse::<Count>().ok()),
            };
            set.push_row(row, record.get(actual_idx), record.get(predicted_idx), count);
        }
        set.log_summary("CSV");
        Ok(set)
    }

    /// Read observations from a CSV file on disk.
    #[cfg(feature = "csv")]
    pub fn from_csv_path<P: AsRef<std::path::Path>>(path: P, columns: &ColumnRoles, mode: IngestionMode) -> Result<Self> {
        let path = path.as_ref();
        log::info!("Loading observations from CSV: {}", path.display());
        let file = std::fs::File::open(path)
            .map_err(|e| MetricsError::data_loading(format!("Failed to open {}: {}", path.display(), e)))?;
        Self::from_csv_reader(std::io::BufReader::new(file), columns, mode)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(feature = "polars")]
fn lookup<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    df.column(name)
        .map_err(|_| ValidationError::MissingColumn { column: name.to_string() }.into())
}

#[cfg(feature = "polars")]
fn string_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let casted = lookup(df, name)?
        .cast(&DataType::String)
        .map_err(|e| MetricsError::data_loading(format!("Column '{}' is not label-like: {}", name, e)))?;
    let values = casted
        .str()
        .map_err(|e| MetricsError::data_loading(format!("Column '{}' is not label-like: {}", name, e)))?;
    Ok(values.into_iter().map(|v| v.map(str::to_string)).collect())
}

#[cfg(feature = "polars")]
fn count_column(df: &DataFrame, name: &str) -> Result<Vec<Option<Count>>> {
    let casted = lookup(df, name)?
        .cast(&DataType::Int64)
        .map_err(|e| MetricsError::data_loading(format!("Count column '{}' is not numeric: {}", name, e)))?;
    let values = casted
        .i64()
        .map_err(|e| MetricsError::data_loading(format!("Count column '{}' is not numeric: {}", name, e)))?;
    Ok(values
        .into_iter()
        .map(|v| v.and_then(|c| Count::try_from(c).ok()))
        .collect())
}
