//! Parquet storage for dataset frames

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, Float64Array, StringArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use system_params::FillGas;
use tracing::{debug, info};

use crate::error::DatasetError;
use crate::frame::{Column, ColumnData, DatasetFrame};

/// `multirex_spectra_<GAS>.parquet`
pub fn dataset_file_name(fill_gas: &FillGas) -> String {
    format!("multirex_spectra_{}.parquet", fill_gas.identity())
}

/// Where the dataset for `fill_gas` lives inside `dir`
pub fn dataset_path(dir: &Path, fill_gas: &FillGas) -> PathBuf {
    dir.join(dataset_file_name(fill_gas))
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> DatasetError + '_ {
    move |source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn to_record_batch(frame: &DatasetFrame) -> Result<RecordBatch, DatasetError> {
    let mut fields = Vec::with_capacity(frame.n_columns());
    let mut arrays: Vec<ArrayRef> = Vec::with_capacity(frame.n_columns());

    for column in frame.columns() {
        match &column.data {
            ColumnData::Float(values) => {
                fields.push(Field::new(&column.name, DataType::Float64, false));
                arrays.push(Arc::new(Float64Array::from(values.clone())));
            }
            ColumnData::Text(values) => {
                fields.push(Field::new(&column.name, DataType::Utf8, false));
                arrays.push(Arc::new(StringArray::from(values.clone())));
            }
        }
    }

    Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)?)
}

/// Write a frame as one snappy-compressed row group set
///
/// Creates the parent directory if needed.
pub fn write_parquet(frame: &DatasetFrame, path: &Path) -> Result<(), DatasetError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error(parent))?;
    }

    let batch = to_record_batch(frame)?;
    let file = File::create(path).map_err(io_error(path))?;
    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();

    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))?;
    writer.write(&batch)?;
    writer.close()?;

    info!(
        path = %path.display(),
        rows = frame.n_rows(),
        columns = frame.n_columns(),
        "dataset written"
    );
    Ok(())
}

fn empty_column(field: &Field) -> Result<ColumnData, DatasetError> {
    match field.data_type() {
        DataType::Utf8 | DataType::LargeUtf8 => Ok(ColumnData::Text(Vec::new())),
        // categorical columns, e.g. pandas `category`
        DataType::Dictionary(_, value)
            if matches!(value.as_ref(), DataType::Utf8 | DataType::LargeUtf8) =>
        {
            Ok(ColumnData::Text(Vec::new()))
        }
        t if t.is_numeric() => Ok(ColumnData::Float(Vec::new())),
        other => Err(DatasetError::UnsupportedType {
            name: field.name().clone(),
            data_type: other.to_string(),
        }),
    }
}

fn append(name: &str, data: &mut ColumnData, array: &ArrayRef) -> Result<(), DatasetError> {
    let unsupported = || DatasetError::UnsupportedType {
        name: name.to_string(),
        data_type: array.data_type().to_string(),
    };
    match data {
        ColumnData::Float(values) => {
            let floats = cast(array, &DataType::Float64)?;
            let floats = floats
                .as_any()
                .downcast_ref::<Float64Array>()
                .ok_or_else(unsupported)?;
            values.extend(floats.iter().map(|v| v.unwrap_or(f64::NAN)));
        }
        ColumnData::Text(values) => {
            let strings = cast(array, &DataType::Utf8)?;
            let strings = strings
                .as_any()
                .downcast_ref::<StringArray>()
                .ok_or_else(unsupported)?;
            values.extend(strings.iter().map(|v| v.unwrap_or_default().to_string()));
        }
    }
    Ok(())
}

/// Read a parquet file into a frame
///
/// Numeric columns of any width become floats, with nulls read as NaN. String
/// and dictionary-encoded string columns become text, with nulls read as
/// empty strings.
pub fn read_parquet(path: &Path) -> Result<DatasetFrame, DatasetError> {
    let file = File::open(path).map_err(io_error(path))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let schema = builder.schema().clone();

    let mut data = schema
        .fields()
        .iter()
        .map(|field| empty_column(field))
        .collect::<Result<Vec<_>, _>>()?;

    for batch in builder.build()? {
        let batch = batch?;
        let fields = schema.fields().iter();
        for ((field, column), array) in fields.zip(data.iter_mut()).zip(batch.columns()) {
            append(field.name(), column, array)?;
        }
    }

    let columns = schema
        .fields()
        .iter()
        .zip(data)
        .map(|(field, data)| Column {
            name: field.name().clone(),
            data,
        })
        .collect();
    let frame = DatasetFrame::from_columns(columns)?;

    debug!(
        path = %path.display(),
        rows = frame.n_rows(),
        columns = frame.n_columns(),
        "dataset read"
    );
    Ok(frame)
}
