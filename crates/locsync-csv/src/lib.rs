use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use locsync_core::LocTable;

/// Reads a localization table. The first record is the header (key column
/// first, then one column per language); shorter or longer data records are
/// normalized to the header width.
pub fn read_table<R: Read>(reader: R) -> Result<LocTable> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = rdr.headers()?.clone();
    let mut columns: Vec<String> = headers.iter().map(str::to_string).collect();
    // Excel любит дописывать BOM перед первой ячейкой
    if let Some(first) = columns.first_mut() {
        if let Some(stripped) = first.strip_prefix('\u{feff}') {
            *first = stripped.to_string();
        }
    }

    let mut table = LocTable::new(columns)?;
    for record in rdr.records() {
        let record = record?;
        // an artifact of a lone delimiter-less line, not a data row
        if record.len() <= 1 && record.iter().all(str::is_empty) {
            continue;
        }
        table.push_row(record.iter().map(str::to_string).collect());
    }
    Ok(table)
}

pub fn read_table_from_path(path: &Path) -> Result<LocTable> {
    let file = File::open(path).wrap_err_with(|| format!("open {}", path.display()))?;
    read_table(BufReader::new(file))
}

pub fn write_table<W: Write>(writer: W, table: &LocTable) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(table.columns())?;
    for row in table.rows() {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_table_to_path(path: &Path, table: &LocTable) -> Result<()> {
    let file = File::create(path).wrap_err_with(|| format!("create {}", path.display()))?;
    write_table(BufWriter::new(file), table)
}
