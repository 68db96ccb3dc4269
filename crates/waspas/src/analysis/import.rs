use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use super::domain::{Alternative, Criterion, DecisionMatrix, DecisionProblem, Direction};

/// Failure while reading criteria or matrix CSV files.
#[derive(Debug, thiserror::Error)]
pub enum MatrixImportError {
    #[error("failed to read decision data: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: unknown criterion direction '{value}' (expected benefit or cost)")]
    UnknownDirection { row: usize, value: String },
    #[error("row {row}: matrix rows require a 'name' column")]
    MissingName { row: usize },
    #[error("row {row}: column '{column}' holds '{value}', which is not a number")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },
}

#[derive(Debug, Deserialize)]
struct CriterionRow {
    key: String,
    name: String,
    direction: String,
    weight: f64,
}

/// Loads decision problems from spreadsheet-style CSV exports.
///
/// Criteria files use `key,name,direction,weight`; matrix files use `name,<key>,<key>,...`.
pub struct MatrixImporter;

impl MatrixImporter {
    pub fn criteria_from_reader<R: Read>(reader: R) -> Result<Vec<Criterion>, MatrixImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut criteria = Vec::new();

        for (index, record) in csv_reader.deserialize::<CriterionRow>().enumerate() {
            let row = record?;
            let direction = Direction::parse(&row.direction).ok_or_else(|| {
                MatrixImportError::UnknownDirection {
                    row: index + 1,
                    value: row.direction.clone(),
                }
            })?;

            criteria.push(Criterion {
                key: row.key,
                name: row.name,
                direction,
                weight: row.weight,
            });
        }

        Ok(criteria)
    }

    pub fn matrix_from_reader<R: Read>(reader: R) -> Result<DecisionMatrix, MatrixImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut alternatives = Vec::new();

        for (index, record) in csv_reader
            .deserialize::<BTreeMap<String, String>>()
            .enumerate()
        {
            let mut row = record?;
            let row_number = index + 1;

            let name_column = row
                .keys()
                .find(|column| column.eq_ignore_ascii_case("name"))
                .cloned()
                .ok_or(MatrixImportError::MissingName { row: row_number })?;
            let name = row.remove(&name_column).unwrap_or_default();

            let values = row
                .into_iter()
                .filter(|(_, value)| !value.is_empty())
                .map(|(column, value)| match value.parse::<f64>() {
                    Ok(number) => Ok((column, number)),
                    Err(_) => Err(MatrixImportError::InvalidNumber {
                        row: row_number,
                        column,
                        value,
                    }),
                })
                .collect::<Result<BTreeMap<_, _>, _>>()?;

            alternatives.push(Alternative { name, values });
        }

        Ok(DecisionMatrix::new(alternatives))
    }

    pub fn from_readers<C: Read, M: Read>(
        criteria: C,
        matrix: M,
    ) -> Result<DecisionProblem, MatrixImportError> {
        let criteria = Self::criteria_from_reader(criteria)?;
        let matrix = Self::matrix_from_reader(matrix)?;
        Ok(DecisionProblem::new(criteria, matrix))
    }

    pub fn from_paths<P: AsRef<Path>, Q: AsRef<Path>>(
        criteria: P,
        matrix: Q,
    ) -> Result<DecisionProblem, MatrixImportError> {
        let criteria = std::fs::File::open(criteria)?;
        let matrix = std::fs::File::open(matrix)?;
        Self::from_readers(criteria, matrix)
    }

    /// Pair a matrix file with an already known criteria table.
    pub fn matrix_from_path<P: AsRef<Path>>(path: P) -> Result<DecisionMatrix, MatrixImportError> {
        let file = std::fs::File::open(path)?;
        Self::matrix_from_reader(file)
    }

    pub fn criteria_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Criterion>, MatrixImportError> {
        let file = std::fs::File::open(path)?;
        Self::criteria_from_reader(file)
    }
}
