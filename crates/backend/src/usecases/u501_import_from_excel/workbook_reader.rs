use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use contracts::shared::spreadsheet::{CellAddress, CellSource, CellValue};
use std::io::Cursor;

/// One worksheet's used range, read through [`CellSource`].
pub struct SheetCells {
    range: Range<Data>,
}

impl SheetCells {
    pub fn new(range: Range<Data>) -> Self {
        Self { range }
    }
}

impl CellSource for SheetCells {
    fn cell(&self, address: CellAddress) -> CellValue {
        match self.range.get_value((address.row, address.col)) {
            Some(Data::Int(i)) => CellValue::Number(*i as f64),
            Some(Data::Float(f)) => CellValue::Number(*f),
            Some(Data::String(s)) => CellValue::Text(s.clone()),
            Some(Data::Bool(b)) => CellValue::Bool(*b),
            _ => CellValue::Empty,
        }
    }
}

pub struct WorkbookSheet {
    pub name: String,
    /// `Err` carries the reader's message for a sheet that could not be read.
    pub cells: Result<SheetCells, String>,
}

/// Reads every worksheet of an xlsx/xls/ods upload, in workbook order.
pub fn read_workbook(bytes: Vec<u8>) -> anyhow::Result<Vec<WorkbookSheet>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| anyhow::anyhow!("not a readable workbook: {e}"))?;

    let sheets = workbook
        .sheet_names()
        .into_iter()
        .map(|name| {
            let cells = workbook
                .worksheet_range(&name)
                .map(SheetCells::new)
                .map_err(|e| e.to_string());
            WorkbookSheet { name, cells }
        })
        .collect();

    Ok(sheets)
}
