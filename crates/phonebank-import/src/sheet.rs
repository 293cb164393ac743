use crate::error::{ImportError, Result};
use calamine::{Data, Range, Reader, Xls, Xlsx};
use std::io::Cursor;

pub type Headers = Vec<String>;
pub type Records = Vec<Vec<String>>;

pub fn read_csv(bytes: &[u8]) -> Result<(Headers, Records)> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(bytes);

    let headers: Headers = reader
        .headers()?
        .iter()
        .map(str::to_string)
        .collect();

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record?;
        records.push(record.iter().map(str::to_string).collect());
    }
    Ok((headers, records))
}

pub fn read_xlsx(bytes: &[u8]) -> Result<(Headers, Records)> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes.to_vec()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(ImportError::EmptyWorkbook)??;
    Ok(tabulate(range))
}

pub fn read_xls(bytes: &[u8]) -> Result<(Headers, Records)> {
    let mut workbook: Xls<_> = Xls::new(Cursor::new(bytes.to_vec()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(ImportError::EmptyWorkbook)??;
    Ok(tabulate(range))
}

fn tabulate(range: Range<Data>) -> (Headers, Records) {
    let mut rows = range.rows();
    let headers: Headers = match rows.next() {
        Some(row) => row.iter().map(cell_to_string).collect(),
        None => return (Vec::new(), Vec::new()),
    };

    let records: Records = rows
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();
    (headers, records)
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(value) => value.trim().to_string(),
        // Spreadsheets hand phone-like columns back as floats; render whole
        // values without the trailing ".0".
        Data::Float(value) if value.fract() == 0.0 && value.abs() < 9e15 => {
            format!("{}", *value as i64)
        }
        other => other.to_string(),
    }
}
