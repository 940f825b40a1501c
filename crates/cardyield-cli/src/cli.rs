use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Parses `NAME=VALUE` pairs used by `--balance` and `--point-value`.
pub fn parse_key_value(value: &str) -> Result<(String, f64), String> {
    let Some((key, raw_number)) = value.split_once('=') else {
        return Err("expected NAME=VALUE".to_string());
    };

    let key = key.trim();
    if key.is_empty() {
        return Err("NAME must not be empty".to_string());
    }

    let number = raw_number
        .trim()
        .replace('_', "")
        .parse::<f64>()
        .map_err(|_| format!("`{}` is not a number", raw_number.trim()))?;
    if !number.is_finite() {
        return Err("VALUE must be a finite number".to_string());
    }

    Ok((key.to_string(), number))
}

pub fn parse_amount(value: &str) -> Result<f64, String> {
    let number = value
        .trim()
        .replace('_', "")
        .parse::<f64>()
        .map_err(|_| format!("`{value}` is not a number"))?;
    if !number.is_finite() || number < 0.0 {
        return Err("amount must be a non-negative number".to_string());
    }
    Ok(number)
}

/// Extended help shown after `cardyield validate --help`.
pub const SPENDING_AFTER_HELP: &str = "\
Spending input:
  <spending> is a local file path. Use `-` to read stdin explicitly,
  or omit it and pipe the profile in.

  JSON example:
  {
    \"total\": 2400000,
    \"breakdown\": { \"amazon\": 240000, \"rakuten\": 300000 },
    \"additional_info\": {
      \"balances\": { \"deposit_balance\": 3000000 },
      \"enable_multi_card\": true
    }
  }

  CSV example (header + rows; without a `total` row, total is the
  sum of the category rows):
  category,amount
  total,2400000
  amazon,240000
  rakuten,300000

Rules:
  total must be at least 1 and at most 100,000,000.
  Category amounts must be non-negative and may not add up to more than total.
  Spend not assigned to a category earns the base rate.
";

#[derive(Debug, Parser)]
#[command(
    name = "cardyield",
    version,
    about = "reward card yield calculator and allocation optimizer",
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Args, Default)]
pub struct CatalogArg {
    /// Read instruments from this catalog file instead of the home catalog
    #[arg(long, value_name = "PATH")]
    pub catalog: Option<PathBuf>,
}

#[derive(Debug, Clone, Args, Default)]
pub struct CalcArgs {
    #[command(flatten)]
    pub catalog: CatalogArg,
    /// Set a balance parameter, e.g. `deposit_balance=3000000` (repeatable)
    #[arg(long = "balance", value_name = "NAME=VALUE", value_parser = parse_key_value)]
    pub balances: Vec<(String, f64)>,
    /// Override an instrument's point value, e.g. `miles-card=1.5` (repeatable)
    #[arg(long = "point-value", value_name = "ID=VALUE", value_parser = parse_key_value)]
    pub point_values: Vec<(String, f64)>,
    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Rank every instrument by net annual return for a spending profile
    #[command(after_long_help = SPENDING_AFTER_HELP)]
    Rank {
        /// Path to a JSON or CSV spending profile (use `-` for stdin)
        spending: Option<String>,
        #[command(flatten)]
        args: CalcArgs,
        /// Number of instruments to show
        #[arg(long, value_name = "N")]
        top: Option<usize>,
    },
    /// Rank single instruments and search two- and three-card allocations
    #[command(after_long_help = SPENDING_AFTER_HELP)]
    Recommend {
        /// Path to a JSON or CSV spending profile (use `-` for stdin)
        spending: Option<String>,
        #[command(flatten)]
        args: CalcArgs,
        /// Only search combinations when the profile enables them
        #[arg(long)]
        single_only: bool,
        /// Maximum number of merged results
        #[arg(long, value_name = "N")]
        limit: Option<usize>,
    },
    /// Check a spending profile without calculating anything
    #[command(after_long_help = SPENDING_AFTER_HELP)]
    Validate {
        /// Path to a JSON or CSV spending profile (use `-` for stdin)
        spending: Option<String>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Browse the instrument catalog
    #[command(arg_required_else_help = true)]
    Cards {
        #[command(subcommand)]
        command: CardsCommand,
    },
    /// Show how one instrument's effective rate changes with annual spend
    Curve {
        /// Instrument id (see `cardyield cards list`)
        id: String,
        /// Evaluate at a single balance instead of every tier
        #[arg(long, value_parser = parse_amount)]
        balance: Option<f64>,
        /// Largest annual spend on the curve
        #[arg(long = "max", value_parser = parse_amount)]
        max_amount: Option<f64>,
        /// Spend increment between points
        #[arg(long, value_parser = parse_amount)]
        step: Option<f64>,
        #[command(flatten)]
        catalog: CatalogArg,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Run a recommendation for a bundled sample profile
    Demo {
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum CardsCommand {
    /// List instruments, optionally filtered by issuer or annual fee
    List {
        /// Only show instruments from this issuer
        #[arg(long)]
        issuer: Option<String>,
        /// Only show instruments whose annual fee is at most this amount
        #[arg(long, value_parser = parse_amount)]
        max_fee: Option<f64>,
        #[command(flatten)]
        catalog: CatalogArg,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Show one instrument's full definition and spend thresholds
    Show {
        /// Instrument id
        id: String,
        #[command(flatten)]
        catalog: CatalogArg,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
pub fn parse_from<I, T>(itr: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(itr)
}
