use super::{DatasetError, DatasetSchema};
use csv::Writer;
use std::path::Path;
use tracing::info;

/// Writes one predicted class name per row as `<index column>,<label column>`.
///
/// `indices[i]` is paired with `names[i]`. An existing file at `path` is
/// replaced.
///
/// # Errors
/// - [`DatasetError::LengthMismatch`] if `indices` and `names` differ in length
/// - [`DatasetError::Csv`] if the file cannot be created or written
pub fn write_predictions<P, S>(
    path: P,
    schema: &DatasetSchema,
    indices: &[usize],
    names: &[S],
) -> Result<(), DatasetError>
where
    P: AsRef<Path>,
    S: AsRef<str>,
{
    let path = path.as_ref();
    if indices.len() != names.len() {
        return Err(DatasetError::LengthMismatch {
            indices: indices.len(),
            names: names.len(),
        });
    }
    let csv_err = |source| DatasetError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = Writer::from_path(path).map_err(csv_err)?;
    writer
        .write_record([schema.index_column.as_str(), schema.label_column.as_str()])
        .map_err(csv_err)?;
    for (index, name) in indices.iter().zip(names) {
        writer
            .write_record([index.to_string().as_str(), name.as_ref()])
            .map_err(csv_err)?;
    }
    writer.flush().map_err(|e| csv_err(e.into()))?;

    info!(path = %path.display(), rows = indices.len(), "predictions written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use csv::ReaderBuilder;
    use tempfile::TempDir;

    #[test]
    fn test_writes_header_and_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("houses.csv");
        let schema = DatasetSchema::default();

        write_predictions(&path, &schema, &[0, 1, 7], &["Ravenclaw", "Slytherin", "Gryffindor"])
            .unwrap();

        let mut reader = ReaderBuilder::new().from_path(&path).unwrap();
        let header: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(header, vec!["Index", "Hogwarts House"]);

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 3);
        let index: Vec<&str> = rows.iter().map(|r| &r[0]).collect();
        assert_eq!(index, vec!["0", "1", "7"]);
        assert_eq!(&rows[2][1], "Gryffindor");
    }

    #[test]
    fn test_empty_predictions_write_header_only() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("houses.csv");

        write_predictions::<_, &str>(&path, &DatasetSchema::default(), &[], &[]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "Index,Hogwarts House\n");
    }

    #[test]
    fn test_length_mismatch() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("houses.csv");

        let err = write_predictions(&path, &DatasetSchema::default(), &[0, 1], &["Ravenclaw"])
            .unwrap_err();
        assert!(matches!(err, DatasetError::LengthMismatch { indices: 2, names: 1 }));
        assert!(!path.exists());
    }

    #[test]
    fn test_unwritable_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("houses.csv");

        let err = write_predictions(&path, &DatasetSchema::default(), &[0], &["Ravenclaw"])
            .unwrap_err();
        assert!(matches!(err, DatasetError::Csv { .. }));
    }
}
