use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::models::Series;

/// Load a series saved as a JSON array of candles. `Series` validates while
/// deserializing, so unordered dates or broken OHLC fail here as a serde error.
pub fn load_series(path: &Path) -> Result<Series> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let series = serde_json::from_reader(reader)?;
    Ok(series)
}

pub fn save_series(series: &Series, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, series)?;
    writer.flush()?;
    Ok(())
}
