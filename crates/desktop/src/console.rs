//! Line-oriented terminal front-end.
//!
//! Generic over its input and output so the whole menu can be driven from a
//! script in tests.

use std::io::{self, BufRead, Write};

use caja_store::Clock;

use crate::exit::{DISCARD_PROMPT, ExitOutcome, Prompter, SAVE_PROMPT, SaveChoice};
use crate::messages::{FileOperation, Notice};
use crate::session::Session;
use crate::views::{InventoryTable, SALES_REPORT_COLUMNS, SalesReportView, SortColumn};

const TITLE: &str = "Simulador de Caja de Venta";

const MENU: [(&str, &str); 7] = [
    ("1", "Mostrar Inventario"),
    ("2", "Comprar Producto"),
    ("3", "Generar Informe de Ventas"),
    ("4", "Exportar Informe de Ventas a CSV"),
    ("5", "Exportar Inventario a CSV"),
    ("6", "Cargar Inventario desde CSV"),
    ("0", "Salir"),
];

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Serve the main menu until the user exits or input ends.
    pub fn run<C: Clock>(&mut self, session: &mut Session<C>) -> io::Result<()> {
        loop {
            self.print_menu()?;
            let Some(choice) = self.read_line("Opción: ")? else {
                tracing::debug!("input closed at main menu");
                return Ok(());
            };

            match choice.trim() {
                "1" => self.inventory(session)?,
                "2" => self.purchase(session)?,
                "3" => match session.sales_report() {
                    Ok(view) => self.render_report(&view)?,
                    Err(notice) => self.show(&notice)?,
                },
                "4" => {
                    if let Some(path) = self.ask_path(FileOperation::ExportSalesReport)? {
                        let notice = session.export_sales_report(&path);
                        self.show(&notice)?;
                    }
                }
                "5" => {
                    if let Some(path) = self.ask_path(FileOperation::ExportInventory)? {
                        let notice = session.export_inventory(&path);
                        self.show(&notice)?;
                    }
                }
                "6" => {
                    if let Some(path) = self.ask_path(FileOperation::LoadInventory)? {
                        let notice = session.load_inventory(&path);
                        self.show(&notice)?;
                    }
                }
                "0" => {
                    if let ExitOutcome::Exit { notices } = session.request_exit(self) {
                        for notice in &notices {
                            self.show(notice)?;
                        }
                        writeln!(self.output, "Hasta luego.")?;
                        return Ok(());
                    }
                }
                other => writeln!(self.output, "Opción no válida: '{other}'")?,
            }
        }
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "== {TITLE} ==")?;
        for (key, label) in MENU {
            writeln!(self.output, "  {key}) {label}")?;
        }
        Ok(())
    }

    /// Show the table, then keep re-sorting on column picks until a blank line.
    fn inventory<C: Clock>(&mut self, session: &mut Session<C>) -> io::Result<()> {
        let table = session.show_inventory();
        self.render_inventory(&table)?;

        let options = SortColumn::ALL
            .iter()
            .enumerate()
            .map(|(i, column)| format!("{}) {}", i + 1, column.header()))
            .collect::<Vec<_>>()
            .join("  ");
        let prompt = format!("Ordenar por {options} (Enter para volver): ");

        while let Some(pick) = self.read_line(&prompt)? {
            let column = match pick.trim() {
                "" => break,
                "1" => SortColumn::Product,
                "2" => SortColumn::Price,
                "3" => SortColumn::Quantity,
                other => {
                    writeln!(self.output, "Columna no válida: '{other}'")?;
                    continue;
                }
            };
            let table = session.sort_inventory(column);
            self.render_inventory(&table)?;
        }
        Ok(())
    }

    fn purchase<C: Clock>(&mut self, session: &mut Session<C>) -> io::Result<()> {
        let Some(product) = self.read_line("Nombre del Producto: ")? else {
            return Ok(());
        };
        let Some(quantity) = self.read_line("Cantidad: ")? else {
            return Ok(());
        };
        let notice = session.purchase(product.trim(), &quantity);
        self.show(&notice)
    }

    fn render_inventory(&mut self, table: &InventoryTable) -> io::Result<()> {
        let [product, price, quantity] = SortColumn::ALL.map(SortColumn::header);
        writeln!(self.output, "{product:<15} {price:<10} {quantity:<10}")?;
        for row in &table.rows {
            writeln!(
                self.output,
                "{:<15} {:<10} {:<10}",
                row.product, row.price, row.quantity
            )?;
        }
        Ok(())
    }

    fn render_report(&mut self, view: &SalesReportView) -> io::Result<()> {
        let [fecha, hora, producto, precio, cantidad, ingresos] = SALES_REPORT_COLUMNS;
        writeln!(
            self.output,
            "{fecha:<12} {hora:<10} {producto:<15} {precio:<10} {cantidad:<18} {ingresos:<10}"
        )?;
        for line in &view.lines {
            writeln!(
                self.output,
                "{:<12} {:<10} {:<15} {:<10} {:<18} {:<10}",
                line.fecha, line.hora, line.producto, line.precio, line.cantidad, line.ingresos
            )?;
        }
        writeln!(self.output, "{}", view.total_label)
    }

    fn show(&mut self, notice: &Notice) -> io::Result<()> {
        if notice.is_error() {
            writeln!(self.output, "[{}] Error: {}", notice.title, notice.body)
        } else {
            writeln!(self.output, "[{}] {}", notice.title, notice.body)
        }
    }

    fn ask_path(&mut self, op: FileOperation) -> io::Result<Option<String>> {
        self.read_line(&format!("{}. Nombre del archivo: ", op.title()))
    }

    /// `None` once input is exhausted. The trailing line break is dropped.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    /// A prompt whose I/O failed counts as the user closing the dialog.
    fn dialog(&mut self, prompt: &str) -> Option<String> {
        self.read_line(prompt).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "dialog input failed");
            None
        })
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "s" | "si" | "sí" | "y" | "yes"
    )
}

impl<R: BufRead, W: Write> Prompter for Console<R, W> {
    fn ask_save(&mut self) -> SaveChoice {
        let prompt = format!("{SAVE_PROMPT}\n[s]í / [n]o / [c]ancelar: ");
        match self.dialog(&prompt) {
            Some(answer) if is_yes(&answer) => SaveChoice::Save,
            Some(answer) if matches!(answer.trim().to_lowercase().as_str(), "n" | "no") => {
                SaveChoice::DontSave
            }
            _ => SaveChoice::Cancel,
        }
    }

    fn confirm_discard(&mut self) -> bool {
        self.dialog(&format!("{DISCARD_PROMPT} [s/n]: "))
            .is_some_and(|answer| is_yes(&answer))
    }

    fn pick_save_path(&mut self, op: FileOperation) -> Option<String> {
        self.dialog(&format!("{}. Nombre del archivo: ", op.title()))
    }
}
