//! Exit confirmation flow.

use crate::messages::{FileOperation, Notice};

pub const SAVE_PROMPT: &str = "¿Desea guardar el inventario e informe de ventas antes de salir?\n\
     Recuerda: primero se guarda el inventario final y después se guarda el informe de ventas final.";

pub const DISCARD_PROMPT: &str = "¿Está seguro de que desea salir sin guardar?";

/// Answer to [`SAVE_PROMPT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveChoice {
    Save,
    DontSave,
    Cancel,
}

/// The dialogs the exit flow needs from a front-end.
pub trait Prompter {
    /// Ask [`SAVE_PROMPT`].
    fn ask_save(&mut self) -> SaveChoice;

    /// Ask [`DISCARD_PROMPT`]; `true` means leave without saving.
    fn confirm_discard(&mut self) -> bool;

    /// Ask where to save for `op`; `None` when the user dismisses the dialog.
    fn pick_save_path(&mut self, op: FileOperation) -> Option<String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitOutcome {
    /// Close the till. Carries the notices of any saves attempted on the way out.
    Exit { notices: Vec<Notice> },
    /// Keep the till open.
    Stay,
}

impl ExitOutcome {
    pub fn is_exit(&self) -> bool {
        matches!(self, ExitOutcome::Exit { .. })
    }
}
