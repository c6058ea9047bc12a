//! Command-line surface.

use std::collections::HashMap;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use subtrack_catalog::Catalog;
use subtrack_core::{DomainError, DomainResult, Money};
use subtrack_infra::AppConfig;
use subtrack_infra::config::{CATALOG_VAR, DATA_DIR_VAR, RENDERER_VAR};
use subtrack_observability::LogFormat;
use subtrack_pricing::{ExtraItem, Order, order_from_quantities};

#[derive(Debug, Parser)]
#[command(name = "subtrack")]
#[command(about = "Price catering orders, issue invoices and review the invoice log.")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Settings shared by every command. Flags win over the environment.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Root for the invoice log, exports and documents [default: data]
    #[arg(long, global = true, env = "SUBTRACK_DATA_DIR", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// TOML catalog file (built-in catalog when omitted)
    #[arg(long, global = true, env = "SUBTRACK_CATALOG", value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Document renderer: text or none [default: text]
    #[arg(long, global = true, env = "SUBTRACK_RENDERER", value_name = "KIND")]
    pub renderer: Option<String>,

    /// Log output: pretty or json
    #[arg(long, global = true, env = "SUBTRACK_LOG_FORMAT", default_value = "pretty")]
    pub log_format: LogFormat,
}

impl GlobalArgs {
    pub fn config(&self) -> AppConfig {
        AppConfig::from_lookup(|name| match name {
            DATA_DIR_VAR => self.data_dir.as_ref().map(|p| p.display().to_string()),
            CATALOG_VAR => self.catalog.as_ref().map(|p| p.display().to_string()),
            RENDERER_VAR => self.renderer.clone(),
            _ => None,
        })
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List menu items, stores and schools
    Menu {
        #[arg(long)]
        json: bool,
    },
    /// Price an order without writing anything
    Quote(OrderArgs),
    /// Render and log the invoice, then render the order form
    Invoice {
        #[command(flatten)]
        order: OrderArgs,
        /// Also write the detail CSV
        #[arg(long)]
        csv: bool,
    },
    /// Render the order form only (never logged)
    OrderForm(OrderArgs),
    /// Write the detail CSV for an order
    Export(OrderArgs),
    /// Inspect or edit the invoice log
    #[command(subcommand)]
    Log(LogCommand),
}

#[derive(Debug, Subcommand)]
pub enum LogCommand {
    /// Most recent invoices first
    List {
        #[arg(long, default_value_t = 20)]
        limit: usize,
        #[arg(long)]
        json: bool,
    },
    /// Totals per calendar month, newest first
    Monthly {
        #[arg(long)]
        json: bool,
    },
    /// Remove every row with this invoice number
    Delete { invoice_number: String },
    /// Remove all rows
    Clear {
        /// Required; clearing cannot be undone
        #[arg(long)]
        yes: bool,
    },
}

/// One order as entered on the command line.
#[derive(Debug, Clone, Args)]
pub struct OrderArgs {
    /// Store key, e.g. S01
    #[arg(long, value_name = "KEY")]
    pub store: String,

    /// School name as listed in the catalog (free text is accepted)
    #[arg(long, value_name = "NAME")]
    pub school: String,

    /// Delivery date, e.g. 01-15-2025 or 2025-01-15
    #[arg(long, value_name = "DATE")]
    pub date: String,

    /// Menu item quantity; repeat per item
    #[arg(long = "item", value_name = "CODE=QTY", value_parser = parse_item)]
    pub items: Vec<(String, u32)>,

    /// Ad-hoc item; quantity defaults to 1
    #[arg(long = "extra", value_name = "NAME=PRICE*QTY", value_parser = parse_extra)]
    pub extras: Vec<ExtraItem>,
}

impl OrderArgs {
    /// Repeated codes add up.
    pub fn quantities(&self) -> DomainResult<HashMap<String, u32>> {
        let mut quantities: HashMap<String, u32> = HashMap::new();
        for (code, qty) in &self.items {
            let total = quantities.entry(code.clone()).or_insert(0);
            *total = total.checked_add(*qty).ok_or_else(|| {
                DomainError::validation(format!("total quantity for {code} is too large"))
            })?;
        }
        Ok(quantities)
    }

    pub fn to_order(&self, catalog: &Catalog) -> DomainResult<Order> {
        order_from_quantities(
            catalog,
            &self.store,
            &self.school,
            &self.date,
            &self.quantities()?,
            &self.extras,
        )
    }
}

/// `CODE=QTY`, e.g. `M001=3`.
pub fn parse_item(raw: &str) -> Result<(String, u32), String> {
    let (code, qty) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected CODE=QTY, got {raw:?}"))?;
    let code = code.trim();
    if code.is_empty() {
        return Err(format!("missing item code in {raw:?}"));
    }
    let qty = qty
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("invalid quantity in {raw:?}: {e}"))?;
    Ok((code.to_string(), qty))
}

/// `NAME=PRICE*QTY` or `NAME=PRICE`, e.g. `Cookies=1.25*12`.
pub fn parse_extra(raw: &str) -> Result<ExtraItem, String> {
    let (name, rest) = raw
        .rsplit_once('=')
        .ok_or_else(|| format!("expected NAME=PRICE*QTY, got {raw:?}"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing extra name in {raw:?}"));
    }

    let (price, qty) = match rest.split_once('*') {
        Some((price, qty)) => (
            price,
            qty.trim()
                .parse::<u32>()
                .map_err(|e| format!("invalid quantity in {raw:?}: {e}"))?,
        ),
        None => (rest, 1),
    };
    let unit_price: Money = price.parse().map_err(|e| format!("{e}"))?;
    if unit_price.is_negative() {
        return Err(format!("negative price in {raw:?}"));
    }

    Ok(ExtraItem {
        name: name.to_string(),
        unit_price,
        quantity: qty,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_items() {
        assert_eq!(parse_item("M001=3").unwrap(), ("M001".to_string(), 3));
        assert_eq!(parse_item(" M005 = 0 ").unwrap(), ("M005".to_string(), 0));
        assert!(parse_item("M001").is_err());
        assert!(parse_item("=3").is_err());
        assert!(parse_item("M001=-1").is_err());
        assert!(parse_item("M001=two").is_err());
    }

    #[test]
    fn parses_extras() {
        let extra = parse_extra("Cookies=1.25*12").unwrap();
        assert_eq!(extra.name, "Cookies");
        assert_eq!(extra.unit_price, Money::from_cents(125));
        assert_eq!(extra.quantity, 12);

        let single = parse_extra("Juice Box=$0.90").unwrap();
        assert_eq!(single.unit_price, Money::from_cents(90));
        assert_eq!(single.quantity, 1);

        assert!(parse_extra("Cookies").is_err());
        assert!(parse_extra("Cookies=abc").is_err());
        assert!(parse_extra("Cookies=-1*2").is_err());
        assert!(parse_extra("=1.00").is_err());
    }

    #[test]
    fn repeated_codes_add_up() {
        let cli = Cli::try_parse_from([
            "subtrack", "quote", "--store", "S01", "--school", "Lincoln Elementary",
            "--date", "2025-01-15", "--item", "M001=2", "--item", "M001=1", "--item", "M005=2",
        ])
        .unwrap();
        let Command::Quote(args) = cli.command else {
            panic!("expected quote");
        };
        let quantities = args.quantities().unwrap();
        assert_eq!(quantities["M001"], 3);
        assert_eq!(quantities["M005"], 2);

        let order = args.to_order(&Catalog::builtin().unwrap()).unwrap();
        assert_eq!(order.total(), Money::from_cents(1780));
    }

    #[test]
    fn repeated_codes_that_overflow_are_rejected() {
        let cli = Cli::try_parse_from([
            "subtrack", "quote", "--store", "S01", "--school", "Lincoln Elementary",
            "--date", "2025-01-15", "--item", "M001=4000000000", "--item", "M001=4000000000",
        ])
        .unwrap();
        let Command::Quote(args) = cli.command else {
            panic!("expected quote");
        };
        assert!(matches!(args.quantities(), Err(DomainError::Validation(_))));
        assert!(args.to_order(&Catalog::builtin().unwrap()).is_err());
    }

    #[test]
    fn flags_override_environment_settings() {
        let cli = Cli::try_parse_from([
            "subtrack", "menu", "--data-dir", "/tmp/subtrack", "--renderer", "none",
        ])
        .unwrap();
        let config = cli.global.config();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/subtrack"));
        assert_eq!(config.renderer, subtrack_infra::RendererKind::None);
    }
}
