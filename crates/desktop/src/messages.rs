//! User-visible notices for purchase and file outcomes.
//!
//! The store reports typed errors; this module is the only place that turns them
//! into text for the person at the till.

use std::path::{Path, PathBuf};

use caja_store::{DomainError, FileError, PurchaseReceipt, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// A message box: title, body and whether it reports a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: &'static str,
    pub body: String,
}

impl Notice {
    pub fn info(title: &'static str, body: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            title,
            body: body.into(),
        }
    }

    pub fn error(title: &'static str, body: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title,
            body: body.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

/// The three file actions offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOperation {
    ExportSalesReport,
    ExportInventory,
    LoadInventory,
}

impl FileOperation {
    pub fn title(self) -> &'static str {
        match self {
            FileOperation::ExportSalesReport => "Exportar Informe de Ventas",
            FileOperation::ExportInventory => "Exportar Inventario",
            FileOperation::LoadInventory => "Cargar Inventario",
        }
    }

    fn failure_prefix(self) -> &'static str {
        match self {
            FileOperation::ExportSalesReport => "Ha ocurrido un error al exportar el informe",
            FileOperation::ExportInventory => "Ha ocurrido un error al exportar el inventario",
            FileOperation::LoadInventory => "Ha ocurrido un error al cargar el inventario",
        }
    }
}

const PURCHASE_TITLE: &str = "Compra";

pub fn purchase_notice(result: Result<PurchaseReceipt, DomainError>) -> Notice {
    match result {
        Ok(receipt) => Notice::info(
            PURCHASE_TITLE,
            format!(
                "El precio total de {} '{}' es: {}",
                receipt.quantity,
                receipt.product,
                receipt.total_price.currency()
            ),
        ),
        Err(err) => Notice::error(PURCHASE_TITLE, describe(&StoreError::from(err), None)),
    }
}

/// Shown when the sales report cannot be computed.
pub fn report_failure_notice(err: DomainError) -> Notice {
    Notice::error("Informe de Ventas", describe(&StoreError::from(err), None))
}

/// Shown when the quantity field does not hold an integer.
pub fn quantity_not_integer_notice() -> Notice {
    Notice::error("Error", "La cantidad debe ser un número entero.")
}

/// Outcome of an export; `written` is the path the store actually wrote.
pub fn export_notice(op: FileOperation, result: Result<PathBuf, FileError>) -> Notice {
    match result {
        Ok(written) => {
            let subject = match op {
                FileOperation::ExportSalesReport => "El informe de ventas",
                _ => "El inventario",
            };
            Notice::info(
                op.title(),
                format!("{subject} ha sido exportado a {}", written.display()),
            )
        }
        Err(err) => Notice::error(op.title(), describe(&StoreError::from(err), Some(op))),
    }
}

pub fn load_notice(requested: &Path, result: Result<usize, FileError>) -> Notice {
    let op = FileOperation::LoadInventory;
    match result {
        Ok(_) => Notice::info(
            op.title(),
            format!("Inventario cargado desde '{}'", requested.display()),
        ),
        Err(err) => Notice::error(op.title(), describe(&StoreError::from(err), Some(op))),
    }
}

/// Text for any store failure. `op` names the file action, if any, for errors
/// that only make sense with that context.
pub fn describe(err: &StoreError, op: Option<FileOperation>) -> String {
    match err {
        StoreError::Purchase(DomainError::UnknownProduct(product)) => {
            format!("'{product}' no está disponible en la tienda.")
        }
        StoreError::Purchase(DomainError::InvalidQuantity(_)) => {
            "La cantidad debe ser un número positivo.".to_string()
        }
        StoreError::Purchase(DomainError::InsufficientStock { product, available }) => format!(
            "Lo sentimos, por ahora no contamos con suficiente stock de '{product}'. \
             Stock disponible: {available} unidades."
        ),
        StoreError::Purchase(DomainError::AmountOverflow(_))
        | StoreError::File(FileError::Domain(DomainError::AmountOverflow(_))) => {
            "El monto excede el máximo que se puede calcular.".to_string()
        }
        StoreError::Purchase(other) => format!("Ha ocurrido un error: {other}"),
        StoreError::File(FileError::EmptyFilename) => {
            "El nombre del archivo no puede estar vacío.".to_string()
        }
        StoreError::File(FileError::DirectoryNotFound(dir)) => {
            format!("La ruta del archivo '{}' no existe.", dir.display())
        }
        StoreError::File(FileError::FileNotFound(path)) => {
            format!("El archivo '{}' no existe.", path.display())
        }
        StoreError::File(other) => match op {
            Some(op) => format!("{}: {other}", op.failure_prefix()),
            None => format!("Ha ocurrido un error: {other}"),
        },
    }
}
