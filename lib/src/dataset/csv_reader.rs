use super::{DatasetError, DatasetSchema, LabeledTable};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::path::Path;
use tracing::{debug, info};

fn position(headers: &StringRecord, column: &str) -> Option<usize> {
    headers.iter().position(|h| h == column)
}

fn parse_cell(value: &str, column: &str, row: usize) -> Result<f64, DatasetError> {
    if value.is_empty() {
        return Ok(f64::NAN);
    }
    value.parse::<f64>().map_err(|_| DatasetError::InvalidValue {
        column: column.to_string(),
        row,
        value: value.to_string(),
    })
}

/// Reads a CSV dataset laid out as described by `schema`.
///
/// Empty feature cells become `NaN` and empty labels become `None`. The label
/// column itself may be missing from the file (test sets ship without it). When
/// the index column is absent, rows are numbered from 0.
///
/// # Errors
/// - [`DatasetError::Csv`] if the file cannot be opened or is malformed
/// - [`DatasetError::MissingColumn`] if a feature column is not in the header
/// - [`DatasetError::InvalidValue`] if a feature or index cell does not parse
pub fn read_csv<P: AsRef<Path>>(path: P, schema: &DatasetSchema) -> Result<LabeledTable, DatasetError> {
    let path = path.as_ref();
    let csv_err = |source| DatasetError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .from_path(path)
        .map_err(csv_err)?;
    let headers = reader.headers().map_err(csv_err)?.clone();

    let feature_pos = schema
        .feature_columns
        .iter()
        .map(|column| {
            position(&headers, column).ok_or_else(|| DatasetError::MissingColumn {
                column: column.clone(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    let label_pos = position(&headers, &schema.label_column);
    let index_pos = position(&headers, &schema.index_column);
    debug!(
        path = %path.display(),
        has_labels = label_pos.is_some(),
        has_index = index_pos.is_some(),
        "dataset header parsed"
    );

    let mut indices = Vec::new();
    let mut features = Vec::new();
    let mut labels = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(csv_err)?;

        let index = match index_pos {
            Some(pos) => {
                let cell = record.get(pos).unwrap_or_default();
                cell.parse::<usize>().map_err(|_| DatasetError::InvalidValue {
                    column: schema.index_column.clone(),
                    row,
                    value: cell.to_string(),
                })?
            }
            None => row,
        };

        let values = feature_pos
            .iter()
            .zip(&schema.feature_columns)
            .map(|(&pos, column)| parse_cell(record.get(pos).unwrap_or_default(), column, row))
            .collect::<Result<Vec<_>, _>>()?;

        let label = label_pos
            .and_then(|pos| record.get(pos))
            .filter(|l| !l.is_empty())
            .map(str::to_string);

        indices.push(index);
        features.push(values);
        labels.push(label);
    }

    info!(path = %path.display(), rows = features.len(), "dataset loaded");
    Ok(LabeledTable::new(
        schema.feature_columns.clone(),
        indices,
        features,
        labels,
    ))
}
