use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray, GenericStringArray, OffsetSizeTrait};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{Cell, Column, HouseDataset};
use crate::error::{PipelineError, Result};

/// Cell spellings read as missing values, in addition to the empty string.
const NULL_TOKENS: &[&str] = &["", "NA", "N/A", "NaN", "nan", "NULL", "null", "None"];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a house dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, comma separated (also the fallback for unknown extensions)
/// * `.json`    – `[{ "size": 50, "bedrooms": 1, "price": 100000 }, ...]`
/// * `.parquet` – numeric and string columns, Arrow nulls preserved
pub fn load_file(path: &Path) -> Result<HouseDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        _ => load_csv(path),
    }?;

    log::debug!(
        "loaded {} rows x {} columns from {}",
        dataset.len(),
        dataset.columns().len(),
        path.display()
    );
    Ok(dataset)
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => PipelineError::FileNotFound(path.to_path_buf()),
        _ => PipelineError::io(path, e),
    })
}

fn finish(path: &Path, columns: Vec<Column>) -> Result<HouseDataset> {
    if columns.is_empty() {
        return Err(PipelineError::parse(path, "no columns found"));
    }
    HouseDataset::from_columns(columns).map_err(|msg| PipelineError::parse(path, msg))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<HouseDataset> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(open(path)?);

    let mut columns: Vec<Column> = reader
        .headers()
        .map_err(|e| PipelineError::parse(path, e))?
        .iter()
        .map(|h| Column::new(h, Vec::new()))
        .collect();

    for result in reader.records() {
        // Ragged rows surface here: the reader is not `flexible`.
        let record = result.map_err(|e| PipelineError::parse(path, e))?;
        for (col, value) in columns.iter_mut().zip(record.iter()) {
            col.cells.push(parse_cell(value));
        }
    }

    finish(path, columns)
}

fn parse_cell(s: &str) -> Cell {
    if NULL_TOKENS.contains(&s) {
        return Cell::Null;
    }
    match s.parse::<f64>() {
        Ok(v) => Cell::from(v),
        Err(_) => Cell::Text(s.to_string()),
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "size": 50, "bedrooms": 1, "price": 100000 },
///   { "size": 80, "bedrooms": 2, "price": null }
/// ]
/// ```
///
/// A key missing from a record is a null cell for that row.
fn load_json(path: &Path) -> Result<HouseDataset> {
    let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => PipelineError::FileNotFound(path.to_path_buf()),
        _ => PipelineError::io(path, e),
    })?;
    let root: JsonValue = serde_json::from_str(&text).map_err(|e| PipelineError::parse(path, e))?;

    let records = root
        .as_array()
        .ok_or_else(|| PipelineError::parse(path, "expected top-level JSON array"))?;

    let mut columns: Vec<Column> = Vec::new();

    for (row, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .ok_or_else(|| PipelineError::parse(path, format!("row {row} is not a JSON object")))?;

        for (key, val) in obj {
            let idx = match columns.iter().position(|c| &c.name == key) {
                Some(idx) => idx,
                None => {
                    columns.push(Column::new(key.clone(), vec![Cell::Null; row]));
                    columns.len() - 1
                }
            };
            columns[idx].cells.push(json_to_cell(val));
        }
        for col in columns.iter_mut().filter(|c| c.cells.len() == row) {
            col.cells.push(Cell::Null);
        }
    }

    finish(path, columns)
}

fn json_to_cell(val: &JsonValue) -> Cell {
    match val {
        JsonValue::Number(n) => n.as_f64().map_or(Cell::Null, Cell::from),
        JsonValue::String(s) => Cell::Text(s.clone()),
        JsonValue::Null => Cell::Null,
        other => Cell::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file.  Every numeric Arrow type is cast to `f64`; string,
/// boolean and other castable columns become text cells.  Dictionary columns
/// (pandas categoricals) are decoded to their value type first.
fn load_parquet(path: &Path) -> Result<HouseDataset> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(open(path)?)
        .map_err(|e| PipelineError::parse(path, e))?;

    let mut columns: Vec<Column> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| Column::new(f.name().clone(), Vec::new()))
        .collect();

    let reader = builder.build().map_err(|e| PipelineError::parse(path, e))?;

    for batch_result in reader {
        let batch = batch_result.map_err(|e| PipelineError::parse(path, e))?;
        for (col, array) in columns.iter_mut().zip(batch.columns()) {
            let cells = arrow_cells(array)
                .map_err(|msg| PipelineError::parse(path, format!("column '{}': {msg}", col.name)))?;
            col.cells.extend(cells);
        }
    }

    finish(path, columns)
}

fn arrow_cells(array: &ArrayRef) -> std::result::Result<Vec<Cell>, String> {
    match array.data_type() {
        DataType::Utf8 => Ok(string_cells(array.as_string::<i32>())),
        DataType::LargeUtf8 => Ok(string_cells(array.as_string::<i64>())),
        DataType::Null => Ok(vec![Cell::Null; array.len()]),
        DataType::Boolean => Ok(array
            .as_boolean()
            .iter()
            .map(|v| v.map_or(Cell::Null, |b| Cell::Text(b.to_string())))
            .collect()),
        DataType::Dictionary(_, values) => {
            let decoded = cast(array.as_ref(), values).map_err(|e| e.to_string())?;
            arrow_cells(&decoded)
        }
        dt if dt.is_numeric() => {
            let floats = cast(array.as_ref(), &DataType::Float64).map_err(|e| e.to_string())?;
            Ok(floats
                .as_primitive::<Float64Type>()
                .iter()
                .map(|v| v.map_or(Cell::Null, Cell::from))
                .collect())
        }
        other => {
            let strings = cast(array.as_ref(), &DataType::Utf8)
                .map_err(|_| format!("unsupported column type {other:?}"))?;
            Ok(string_cells(strings.as_string::<i32>()))
        }
    }
}

fn string_cells<O: OffsetSizeTrait>(arr: &GenericStringArray<O>) -> Vec<Cell> {
    arr.iter()
        .map(|v| v.map_or(Cell::Null, |s| Cell::Text(s.to_string())))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::{BooleanArray, DictionaryArray, Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{Field, Int32Type, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    use super::*;

    fn write(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut f = File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn csv_cells_are_typed() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "houses.csv",
            "size,bedrooms,price,city\n50, 1 ,100000,Lisbon\n,2,NA,Porto\n",
        );
        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 2);
        let names: Vec<&str> = ds.column_names().collect();
        assert_eq!(names, ["size", "bedrooms", "price", "city"]);
        assert_eq!(ds.column("bedrooms").unwrap().cells[0], Cell::Number(1.0));
        assert_eq!(ds.column("size").unwrap().cells[1], Cell::Null);
        assert_eq!(ds.column("price").unwrap().cells[1], Cell::Null);
        assert_eq!(ds.column("city").unwrap().cells[0], Cell::Text("Lisbon".into()));
    }

    #[test]
    fn missing_file_is_file_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_file(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, PipelineError::FileNotFound(_)));
    }

    #[test]
    fn ragged_csv_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "bad.csv", "size,price\n1,2\n3\n");
        let err = load_file(&path).unwrap_err();
        assert!(matches!(err, PipelineError::Parse { .. }));
    }

    #[test]
    fn empty_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "empty.csv", "");
        assert!(matches!(
            load_file(&path).unwrap_err(),
            PipelineError::Parse { .. }
        ));
    }

    #[test]
    fn json_missing_keys_become_nulls() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "houses.json",
            r#"[{"size": 50, "price": 100000}, {"size": 80, "bedrooms": 2, "price": null}]"#,
        );
        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 2);
        let bedrooms = ds.column("bedrooms").unwrap();
        assert_eq!(bedrooms.cells, vec![Cell::Null, Cell::Number(2.0)]);
        assert_eq!(ds.column("price").unwrap().cells[1], Cell::Null);
    }

    #[test]
    fn json_must_be_array_of_objects() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "bad.json", r#"{"size": [1, 2]}"#);
        assert!(matches!(
            load_file(&path).unwrap_err(),
            PipelineError::Parse { .. }
        ));
    }

    #[test]
    fn parquet_numeric_columns_cast_to_f64() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("houses.parquet");

        let schema = Arc::new(Schema::new(vec![
            Field::new("size", DataType::Float64, true),
            Field::new("bedrooms", DataType::Int64, false),
            Field::new("city", DataType::Utf8, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Float64Array::from(vec![Some(50.0), None])) as ArrayRef,
                Arc::new(Int64Array::from(vec![1, 2])) as ArrayRef,
                Arc::new(StringArray::from(vec!["Lisbon", "Porto"])) as ArrayRef,
            ],
        )
        .unwrap();
        let file = File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(
            ds.column("size").unwrap().cells,
            vec![Cell::Number(50.0), Cell::Null]
        );
        assert_eq!(
            ds.column("bedrooms").unwrap().cells,
            vec![Cell::Number(1.0), Cell::Number(2.0)]
        );
        assert_eq!(ds.column("city").unwrap().cells[1], Cell::Text("Porto".into()));
    }

    #[test]
    fn parquet_boolean_and_dictionary_columns_become_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("houses.parquet");

        let city_type = DataType::Dictionary(Box::new(DataType::Int32), Box::new(DataType::Utf8));
        let schema = Arc::new(Schema::new(vec![
            Field::new("price", DataType::Float64, false),
            Field::new("garden", DataType::Boolean, true),
            Field::new("city", city_type, false),
        ]));
        let city: DictionaryArray<Int32Type> = vec!["Lisbon", "Porto", "Lisbon"].into_iter().collect();
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Float64Array::from(vec![100_000.0, 200_000.0, 150_000.0])) as ArrayRef,
                Arc::new(BooleanArray::from(vec![Some(true), None, Some(false)])) as ArrayRef,
                Arc::new(city) as ArrayRef,
            ],
        )
        .unwrap();
        let file = File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(
            ds.column("garden").unwrap().cells,
            vec![Cell::Text("true".into()), Cell::Null, Cell::Text("false".into())]
        );
        assert_eq!(
            ds.column("city").unwrap().cells,
            vec![
                Cell::Text("Lisbon".into()),
                Cell::Text("Porto".into()),
                Cell::Text("Lisbon".into())
            ]
        );
        assert_eq!(ds.column("price").unwrap().cells[1], Cell::Number(200_000.0));
    }
}
