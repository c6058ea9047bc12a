//! Command dispatch for the `subtrack` binary.

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, bail};
use serde::Serialize;

use subtrack_catalog::{Catalog, CatalogItem, School, Store, load_catalog};
use subtrack_infra::{AppConfig, CsvInvoiceLogStore, OrderExporter};

use crate::args::{Cli, Command, LogCommand, OrderArgs};
use crate::output;

#[derive(Serialize)]
struct MenuView<'a> {
    items: &'a [CatalogItem],
    stores: &'a [Store],
    schools: &'a [School],
}

/// Execute one parsed command, writing user-facing output to `out`.
pub fn run(cli: Cli, out: &mut impl Write) -> anyhow::Result<()> {
    let config = cli.global.config();
    tracing::debug!(?config, "configuration resolved");

    match cli.command {
        Command::Menu { json } => {
            let catalog = open_catalog(&config)?;
            if json {
                output::json(
                    out,
                    &MenuView {
                        items: catalog.items(),
                        stores: catalog.stores(),
                        schools: catalog.schools(),
                    },
                )?;
            } else {
                output::menu(out, &catalog)?;
            }
        }
        Command::Quote(args) => {
            let exporter = open_exporter(&config)?;
            let order = args.to_order(exporter.catalog())?;
            output::quote(out, exporter.catalog(), &order, &exporter.invoice_number(&order))?;
        }
        Command::Invoice { order, csv } => invoice(&config, &order, csv, out)?,
        Command::OrderForm(args) => {
            let exporter = open_exporter(&config)?;
            let order = args.to_order(exporter.catalog())?;
            match exporter
                .finalize_order_form(&order)
                .context("failed to render order form")?
            {
                Some(path) => writeln!(out, "Order form written to {}", path.display())?,
                None => writeln!(out, "No document renderer configured; nothing written.")?,
            }
        }
        Command::Export(args) => {
            let exporter = open_exporter(&config)?;
            let order = args.to_order(exporter.catalog())?;
            let path = exporter
                .export_detail(&order)
                .context("failed to write detail export")?;
            writeln!(out, "Detail export written to {}", path.display())?;
        }
        Command::Log(command) => log_command(&config, command, out)?,
    }
    Ok(())
}

fn invoice(config: &AppConfig, args: &OrderArgs, csv: bool, out: &mut impl Write) -> anyhow::Result<()> {
    let exporter = open_exporter(config)?;
    let order = args.to_order(exporter.catalog())?;
    let invoice_number = exporter.invoice_number(&order);

    output::quote(out, exporter.catalog(), &order, &invoice_number)?;

    match exporter
        .finalize_invoice(&order)
        .with_context(|| format!("failed to finalize invoice {invoice_number}"))?
    {
        Some(finalized) => {
            writeln!(out, "Invoice written to {}", finalized.document_path.display())?;
            if let Some(form) = exporter
                .finalize_order_form(&order)
                .context("failed to render order form")?
            {
                writeln!(out, "Order form written to {}", form.display())?;
            }
        }
        None => writeln!(
            out,
            "No document renderer configured; invoice {invoice_number} was not logged."
        )?,
    }

    if csv {
        let path = exporter
            .export_detail(&order)
            .context("failed to write detail export")?;
        writeln!(out, "Detail export written to {}", path.display())?;
    }
    Ok(())
}

fn log_command(config: &AppConfig, command: LogCommand, out: &mut impl Write) -> anyhow::Result<()> {
    let log = config.invoice_log();

    match command {
        LogCommand::List { limit, json } => {
            let listed = log.list(limit);
            if json {
                output::json(out, &listed)?;
            } else {
                output::invoice_list(out, &listed)?;
            }
        }
        LogCommand::Monthly { json } => {
            let totals = log.monthly_totals();
            if json {
                output::json(out, &totals)?;
            } else {
                output::monthly(out, &totals)?;
            }
        }
        LogCommand::Delete { invoice_number } => {
            let removed = log
                .delete_by_invoice_number(&invoice_number)
                .with_context(|| format!("failed to delete invoice {invoice_number}"))?;
            if !removed {
                bail!("no invoice {invoice_number:?} in the log");
            }
            writeln!(out, "Deleted invoice {invoice_number}.")?;
        }
        LogCommand::Clear { yes } => {
            if !yes {
                bail!("refusing to clear the invoice log without --yes");
            }
            log.delete_all().context("failed to clear the invoice log")?;
            writeln!(out, "Invoice log cleared.")?;
        }
    }
    Ok(())
}

fn open_catalog(config: &AppConfig) -> anyhow::Result<Arc<Catalog>> {
    let catalog = load_catalog(config.catalog_path()).context("failed to load catalog")?;
    Ok(Arc::new(catalog))
}

fn open_exporter(config: &AppConfig) -> anyhow::Result<OrderExporter<CsvInvoiceLogStore>> {
    Ok(config.exporter(open_catalog(config)?))
}
