use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use log::{debug, info, warn};
use crate::clustering::ClusterSummary;
use crate::error::{Error, Result};
use crate::types::{ClusteredModes, ModalTable, LABELS_COLUMN};

/// Reads modal observations from a CSV file with a header row.
///
/// `index_column`, when given, must exist and becomes the table index;
/// otherwise rows are indexed by position. Empty cells read as NaN. Columns
/// that are not numeric are skipped.
pub fn read_modal_csv<P: AsRef<Path>>(path: P, index_column: Option<&str>) -> Result<ModalTable> {
    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(::csv::Trim::All)
        .from_path(&path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let index_pos = match index_column {
        Some(name) => Some(
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| Error::MissingColumns(vec![name.to_string()]))?,
        ),
        None => None,
    };

    let mut index = Vec::new();
    let mut raw: Vec<Vec<Option<f64>>> = vec![Vec::new(); headers.len()];
    let mut numeric = vec![true; headers.len()];

    for record in reader.records() {
        let record = record?;
        let row = index.len();
        index.push(match index_pos {
            Some(pos) => record.get(pos).unwrap_or_default().to_string(),
            None => row.to_string(),
        });

        for (col, cell) in record.iter().enumerate() {
            if Some(col) == index_pos || !numeric[col] {
                continue;
            }
            if cell.is_empty() {
                raw[col].push(None);
            } else if let Ok(value) = cell.parse::<f64>() {
                raw[col].push(Some(value));
            } else {
                warn!("Skipping non-numeric column '{}' (row {}: '{}')", headers[col], row, cell);
                numeric[col] = false;
            }
        }
    }

    let columns: Vec<(String, Vec<f64>)> = headers
        .into_iter()
        .zip(raw)
        .enumerate()
        .filter(|(col, _)| Some(*col) != index_pos && numeric[*col])
        .map(|(_, (name, values))| (name, values.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect()))
        .collect();

    let table = ModalTable::with_index(index, columns)?;
    info!(
        "Read {} modes with columns {:?} from {:?}",
        table.len(), table.column_names(), path.as_ref()
    );
    Ok(table)
}

/// Writes the index, every modal column and the `labels` column.
pub fn write_clustered_csv<P: AsRef<Path>>(path: P, clustered: &ClusteredModes) -> Result<()> {
    let modes = clustered.modes();
    let mut writer = ::csv::Writer::from_path(&path)?;

    let mut header = vec!["index".to_string()];
    header.extend(modes.column_names().iter().cloned());
    header.push(LABELS_COLUMN.to_string());
    writer.write_record(&header)?;

    let columns: Vec<&[f64]> = modes
        .column_names()
        .iter()
        .filter_map(|name| modes.column(name))
        .collect();

    for (row, label) in clustered.labels().iter().enumerate() {
        let mut record = Vec::with_capacity(header.len());
        record.push(modes.index()[row].clone());
        record.extend(columns.iter().map(|column| column[row].to_string()));
        record.push(label.to_string());
        writer.write_record(&record)?;
    }

    writer.flush()?;
    debug!("Wrote {} clustered modes to {:?}", clustered.len(), path.as_ref());
    Ok(())
}

pub fn write_summary_json<P: AsRef<Path>>(path: P, summary: &[ClusterSummary]) -> Result<()> {
    let writer = BufWriter::new(File::create(&path)?);
    serde_json::to_writer_pretty(writer, summary)?;
    debug!("Wrote {} cluster summaries to {:?}", summary.len(), path.as_ref());
    Ok(())
}
