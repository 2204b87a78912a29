//! CSV file formats for the sales report and the inventory.
//!
//! Sales report: `Fecha,Hora,Producto,Precio,Cantidad Vendida,Ingresos`, prices as
//! `S/<2 decimals>`. Inventory: `Producto,Precio,Cantidad`, bare decimal prices.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

use caja_core::Money;
use caja_inventory::{Inventory, InventoryEntry};
use caja_sales::SalesReport;

use crate::error::FileError;

pub const SALES_REPORT_HEADER: [&str; 6] = [
    "Fecha",
    "Hora",
    "Producto",
    "Precio",
    "Cantidad Vendida",
    "Ingresos",
];

pub const INVENTORY_HEADER: [&str; 3] = ["Producto", "Precio", "Cantidad"];

const CSV_EXTENSION: &str = ".csv";

/// Validate a user-supplied export target.
///
/// Blank names are rejected before touching the filesystem, `.csv` is appended
/// when missing, and the parent directory (if any) must exist.
pub fn resolve_export_path(raw: &Path) -> Result<PathBuf, FileError> {
    ensure_not_blank(raw)?;

    let path = if raw.as_os_str().to_string_lossy().ends_with(CSV_EXTENSION) {
        raw.to_path_buf()
    } else {
        let mut name = OsString::from(raw.as_os_str());
        name.push(CSV_EXTENSION);
        PathBuf::from(name)
    };

    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() && !dir.exists() => {
            Err(FileError::DirectoryNotFound(dir.to_path_buf()))
        }
        _ => Ok(path),
    }
}

/// Validate a user-supplied import source: not blank, and present on disk.
pub fn resolve_import_path(raw: &Path) -> Result<PathBuf, FileError> {
    ensure_not_blank(raw)?;
    if !raw.exists() {
        return Err(FileError::FileNotFound(raw.to_path_buf()));
    }
    Ok(raw.to_path_buf())
}

fn ensure_not_blank(raw: &Path) -> Result<(), FileError> {
    if raw.as_os_str().to_string_lossy().trim().is_empty() {
        return Err(FileError::EmptyFilename);
    }
    Ok(())
}

/// One sales report line as written to disk, in header order.
#[derive(Debug, Serialize)]
struct SalesCsvRow<'a> {
    fecha: String,
    hora: String,
    producto: &'a str,
    precio: String,
    cantidad_vendida: u64,
    ingresos: String,
}

/// One inventory line as written to disk, in header order.
#[derive(Debug, Serialize)]
struct InventoryCsvRow<'a> {
    producto: &'a str,
    precio: String,
    cantidad: u64,
}

/// Headers are written explicitly so an empty file still carries them.
fn csv_writer<W: io::Write>(sink: W) -> csv::Writer<W> {
    csv::WriterBuilder::new().has_headers(false).from_writer(sink)
}

pub fn write_sales_report(path: &Path, report: &SalesReport) -> Result<(), FileError> {
    write_sales_report_to(std::fs::File::create(path)?, report)
}

pub fn write_sales_report_to<W: io::Write>(sink: W, report: &SalesReport) -> Result<(), FileError> {
    let mut writer = csv_writer(sink);
    writer.write_record(SALES_REPORT_HEADER)?;
    for row in report.rows() {
        writer.serialize(SalesCsvRow {
            fecha: row.date.format("%Y-%m-%d").to_string(),
            hora: row.time.format("%H:%M:%S").to_string(),
            producto: &row.product,
            precio: row.unit_price.currency().to_string(),
            cantidad_vendida: row.quantity,
            ingresos: row.revenue.currency().to_string(),
        })?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_inventory(path: &Path, inventory: &Inventory) -> Result<(), FileError> {
    write_inventory_to(std::fs::File::create(path)?, inventory)
}

pub fn write_inventory_to<W: io::Write>(sink: W, inventory: &Inventory) -> Result<(), FileError> {
    let mut writer = csv_writer(sink);
    writer.write_record(INVENTORY_HEADER)?;
    for entry in inventory {
        writer.serialize(InventoryCsvRow {
            producto: entry.name(),
            precio: entry.unit_price().to_string(),
            cantidad: entry.stock_quantity(),
        })?;
    }
    writer.flush()?;
    Ok(())
}

pub fn read_inventory(path: &Path) -> Result<Vec<InventoryEntry>, FileError> {
    let file = std::fs::File::open(path)?;
    read_inventory_from(file)
}

/// Parse `name,price,quantity` rows after a header row.
///
/// The header's contents are not checked. Every following row must parse or
/// the whole read fails; nothing is returned partially.
pub fn read_inventory_from<R: io::Read>(source: R) -> Result<Vec<InventoryEntry>, FileError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(source);
    let mut records = reader.records();

    match records.next() {
        Some(header) => {
            header?;
        }
        None => return Err(FileError::parse(1, "missing header row")),
    }

    let mut entries = Vec::new();
    for result in records {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        entries.push(parse_inventory_row(&record, line)?);
    }
    Ok(entries)
}

fn parse_inventory_row(record: &csv::StringRecord, line: u64) -> Result<InventoryEntry, FileError> {
    if record.len() != INVENTORY_HEADER.len() {
        return Err(FileError::parse(
            line,
            format!(
                "expected {} fields (name,price,quantity), found {}",
                INVENTORY_HEADER.len(),
                record.len()
            ),
        ));
    }

    let name = &record[0];
    let price = Money::parse(&record[1])
        .map_err(|e| FileError::parse(line, format!("price for '{name}': {e}")))?;
    let quantity = record[2].trim().parse::<u64>().map_err(|e| {
        FileError::parse(
            line,
            format!("quantity for '{name}' ('{}'): {e}", &record[2]),
        )
    })?;

    Ok(InventoryEntry::new(name, price, quantity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use caja_sales::{SaleRecord, SalesLedger};
    use chrono::NaiveDateTime;

    fn sales_csv(report: &SalesReport) -> String {
        let mut buf = Vec::new();
        write_sales_report_to(&mut buf, report).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn inventory_csv(inventory: &Inventory) -> String {
        let mut buf = Vec::new();
        write_inventory_to(&mut buf, inventory).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn export_path_rejects_blank_names() {
        for raw in ["", "   ", "\t"] {
            assert!(matches!(
                resolve_export_path(Path::new(raw)),
                Err(FileError::EmptyFilename)
            ));
        }
    }

    #[test]
    fn export_path_appends_csv_extension_once() {
        assert_eq!(
            resolve_export_path(Path::new("ventas")).unwrap(),
            PathBuf::from("ventas.csv")
        );
        assert_eq!(
            resolve_export_path(Path::new("ventas.csv")).unwrap(),
            PathBuf::from("ventas.csv")
        );
        assert_eq!(
            resolve_export_path(Path::new("ventas.txt")).unwrap(),
            PathBuf::from("ventas.txt.csv")
        );
    }

    #[test]
    fn export_path_requires_existing_parent_directory() {
        let missing = Path::new("no-such-dir-for-caja-tests/ventas");
        match resolve_export_path(missing) {
            Err(FileError::DirectoryNotFound(dir)) => {
                assert_eq!(dir, PathBuf::from("no-such-dir-for-caja-tests"));
            }
            other => panic!("Expected DirectoryNotFound, got {other:?}"),
        }
    }

    #[test]
    fn import_path_rejects_blank_and_missing_files() {
        assert!(matches!(
            resolve_import_path(Path::new(" ")),
            Err(FileError::EmptyFilename)
        ));
        assert!(matches!(
            resolve_import_path(Path::new("no-such-inventory-for-caja-tests.csv")),
            Err(FileError::FileNotFound(_))
        ));
    }

    #[test]
    fn sales_report_rows_use_currency_format() {
        let mut ledger = SalesLedger::new();
        let at = NaiveDateTime::parse_from_str("2024-06-01 09:05:07", "%Y-%m-%d %H:%M:%S").unwrap();
        ledger.record(SaleRecord::new(at, "postit", 3));
        let report = SalesReport::generate(&ledger, &Inventory::default_catalog()).unwrap();

        let csv = sales_csv(&report);
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines[0], "Fecha,Hora,Producto,Precio,Cantidad Vendida,Ingresos");
        assert_eq!(lines[1], "2024-06-01,09:05:07,postit,S/3.50,3,S/10.50");
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn inventory_rows_use_bare_prices() {
        let csv = inventory_csv(&Inventory::default_catalog());
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(
            lines,
            [
                "Producto,Precio,Cantidad",
                "pulsera,3,50",
                "sticker,1,200",
                "llavero,10,12",
                "postit,3.5,12",
            ]
        );
    }

    #[test]
    fn read_skips_header_whatever_it_says() {
        let entries = read_inventory_from("name,price,qty\nanillo, 12.5 ,4\n".as_bytes()).unwrap();
        assert_eq!(entries, [InventoryEntry::new("anillo", Money::from_cents(1250), 4)]);
    }

    #[test]
    fn read_skips_blank_lines_between_rows() {
        let input = "Producto,Precio,Cantidad\npulsera,3,50\n\nsticker,1,200\n\n";
        let entries = read_inventory_from(input.as_bytes()).unwrap();
        assert_eq!(
            entries,
            [
                InventoryEntry::new("pulsera", Money::from_cents(300), 50),
                InventoryEntry::new("sticker", Money::from_cents(100), 200),
            ]
        );
    }

    #[test]
    fn empty_report_still_writes_the_header() {
        let csv = sales_csv(&SalesReport::default());
        assert_eq!(csv, "Fecha,Hora,Producto,Precio,Cantidad Vendida,Ingresos\n");
    }

    #[test]
    fn read_of_header_only_is_an_empty_inventory() {
        let entries = read_inventory_from("Producto,Precio,Cantidad\n".as_bytes()).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn read_rejects_missing_header() {
        match read_inventory_from("".as_bytes()) {
            Err(FileError::Parse { line, reason }) => {
                assert_eq!(line, 1);
                assert!(reason.contains("header"));
            }
            other => panic!("Expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn read_rejects_wrong_column_count() {
        let input = "Producto,Precio,Cantidad\npulsera,3,50\nsticker,1\n";
        match read_inventory_from(input.as_bytes()) {
            Err(FileError::Parse { line, reason }) => {
                assert_eq!(line, 3);
                assert!(reason.contains("found 2"));
            }
            other => panic!("Expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn read_rejects_bad_price_and_quantity() {
        let bad_price = "Producto,Precio,Cantidad\npulsera,tres,50\n";
        assert!(matches!(
            read_inventory_from(bad_price.as_bytes()),
            Err(FileError::Parse { line: 2, .. })
        ));

        let fractional_qty = "Producto,Precio,Cantidad\npulsera,3,5.5\n";
        assert!(matches!(
            read_inventory_from(fractional_qty.as_bytes()),
            Err(FileError::Parse { line: 2, .. })
        ));

        let negative_qty = "Producto,Precio,Cantidad\npulsera,3,-1\n";
        assert!(matches!(
            read_inventory_from(negative_qty.as_bytes()),
            Err(FileError::Parse { line: 2, .. })
        ));
    }

    #[test]
    fn quoted_names_survive_a_write_read_cycle() {
        let inventory = Inventory::from_entries([InventoryEntry::new(
            "llavero, grande",
            Money::from_cents(1099),
            3,
        )]);
        let csv = inventory_csv(&inventory);
        let entries = read_inventory_from(csv.as_bytes()).unwrap();
        assert_eq!(Inventory::from_entries(entries), inventory);
    }
}
