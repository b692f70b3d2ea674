use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

use super::synthetic;
use super::variant::{DatasetVariant, LoadFallback};
use super::Dataset;
use crate::core::constants::defaults;
use crate::core::error::{Result, TrendscopeError};
use crate::core::types::DateExtent;

/// Knobs for reading a dataset and for building the fallback dataset.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Field delimiter of the input file
    pub delimiter: char,
    /// Seed for the synthetic placeholder dataset
    pub seed: u64,
    /// Number of synthetic records to generate
    pub synthetic_rows: usize,
    /// Calendar window the synthetic records are spread over
    pub window: DateExtent,
}

impl LoadOptions {
    pub fn new(window: DateExtent) -> Self {
        Self {
            delimiter: defaults::DELIMITER,
            seed: defaults::SEED,
            synthetic_rows: defaults::SYNTHETIC_ROWS,
            window,
        }
    }
}

/// Where the records of a [`LoadOutcome`] came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    File(PathBuf),
    Synthetic { seed: u64 },
    Empty,
}

/// Result of a load that never fails: the dataset to use plus the warning
/// the user should see when a fallback was taken.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub dataset: Dataset,
    pub source: DataSource,
    pub warning: Option<String>,
}

impl LoadOutcome {
    pub fn is_fallback(&self) -> bool {
        !matches!(self.source, DataSource::File(_))
    }
}

/// Read and parse a dataset file, propagating every failure.
pub fn load_dataset<P: AsRef<Path>>(
    path: P,
    variant: DatasetVariant,
    delimiter: char,
) -> Result<Dataset> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(TrendscopeError::FileNotFound(path.display().to_string()));
    }

    let content = fs::read_to_string(path).map_err(|e| {
        TrendscopeError::DataLoad(format!("Could not read '{}': {}", path.display(), e))
    })?;

    let dataset = Dataset::from_delimited(&content, variant, delimiter)?;
    debug!(
        "Parsed {} record(s) with columns [{}] from {}",
        dataset.len(),
        dataset.columns().join(", "),
        path.display()
    );
    Ok(dataset)
}

/// Load a dataset, recovering from any failure with the variant's fallback.
///
/// `None` as the path means "no dataset configured" and goes straight to
/// the fallback.
pub fn load_or_fallback(
    path: Option<&Path>,
    variant: DatasetVariant,
    options: &LoadOptions,
) -> LoadOutcome {
    let failure = match path {
        Some(path) => match load_dataset(path, variant, options.delimiter) {
            Ok(dataset) => {
                return LoadOutcome {
                    dataset,
                    source: DataSource::File(path.to_path_buf()),
                    warning: None,
                };
            }
            Err(e) => e.to_string(),
        },
        None => "no dataset path configured".to_string(),
    };

    warn!("Dataset unavailable for {variant}: {failure}");

    match variant.load_fallback() {
        LoadFallback::Synthetic => LoadOutcome {
            dataset: synthetic::generate_insights(
                options.synthetic_rows,
                options.window,
                options.seed,
            ),
            source: DataSource::Synthetic { seed: options.seed },
            warning: Some(format!("{failure}. Using placeholder data.")),
        },
        LoadFallback::Empty => LoadOutcome {
            dataset: Dataset::empty(variant),
            source: DataSource::Empty,
            warning: Some(format!("{failure}. No records to show.")),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;

    fn window() -> DateExtent {
        DateExtent::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        )
    }

    #[test]
    fn test_load_dataset_from_file() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(b"date,country,text\n2024-01-02,France,hello\n")?;

        let dataset = load_dataset(file.path(), DatasetVariant::Interactions, ',')?;
        assert_eq!(dataset.len(), 1);
        Ok(())
    }

    #[test]
    fn test_load_dataset_missing_file() {
        let err = load_dataset(
            "/path/that/does/not/exist.csv",
            DatasetVariant::Insights,
            ',',
        )
        .unwrap_err();
        assert!(matches!(err, TrendscopeError::FileNotFound(_)));
    }

    #[test]
    fn test_fallback_insights_is_synthetic() {
        let options = LoadOptions::new(window());
        let outcome = load_or_fallback(
            Some(Path::new("/missing/insights_data.csv")),
            DatasetVariant::Insights,
            &options,
        );

        assert!(outcome.is_fallback());
        assert_eq!(outcome.source, DataSource::Synthetic { seed: options.seed });
        assert_eq!(outcome.dataset.len(), options.synthetic_rows);
        assert!(outcome.warning.unwrap().contains("placeholder"));
    }

    #[test]
    fn test_fallback_interactions_is_empty() {
        let options = LoadOptions::new(window());
        let outcome = load_or_fallback(None, DatasetVariant::Interactions, &options);

        assert_eq!(outcome.source, DataSource::Empty);
        assert!(outcome.dataset.is_empty());
        assert_eq!(outcome.dataset.columns().len(), 8);
        assert!(outcome.warning.is_some());
    }

    #[test]
    fn test_fallback_on_malformed_file() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(b"country,text\nFrance,hello\n")?;

        let outcome = load_or_fallback(
            Some(file.path()),
            DatasetVariant::Interactions,
            &LoadOptions::new(window()),
        );
        assert_eq!(outcome.source, DataSource::Empty);
        assert!(outcome.warning.unwrap().contains("'date'"));
        Ok(())
    }

    #[test]
    fn test_successful_load_has_no_warning() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(b"id,created_at,topic\n1,2024-02-01,Safety\n")?;

        let outcome = load_or_fallback(
            Some(file.path()),
            DatasetVariant::Insights,
            &LoadOptions::new(window()),
        );
        assert!(!outcome.is_fallback());
        assert!(outcome.warning.is_none());
        assert_eq!(outcome.dataset.len(), 1);
        Ok(())
    }
}
