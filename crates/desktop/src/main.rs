//! Till entry point: terminal front-end over a seeded store.

use std::io;

use anyhow::Context;

use caja_desktop::{AppConfig, Console, Session};

fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("invalid configuration")?;
    caja_observability::init(config.log_format);

    let store = config.build_store();
    tracing::info!(products = store.list_inventory().len(), "till opened");

    let mut session = Session::new(store);
    let stdin = io::stdin();
    let stdout = io::stdout();
    Console::new(stdin.lock(), stdout.lock())
        .run(&mut session)
        .context("terminal I/O failed")?;

    tracing::info!(sales = session.store().ledger().len(), "till closed");
    Ok(())
}
