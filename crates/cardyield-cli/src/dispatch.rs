use cardyield_client::commands;
use cardyield_client::commands::cards::{CardsListOptions, CardsShowOptions};
use cardyield_client::commands::common::ProfileOverrides;
use cardyield_client::commands::curve::CurveOptions;
use cardyield_client::commands::rank::RankOptions;
use cardyield_client::commands::recommend::RecommendOptions;
use cardyield_client::{ClientResult, SuccessEnvelope};
use tracing::debug;

use crate::cli::{CalcArgs, CardsCommand, Cli, Commands};

pub fn dispatch(cli: &Cli) -> ClientResult<SuccessEnvelope> {
    debug!(command = ?cli.command, "dispatching command");
    match &cli.command {
        Commands::Rank {
            spending,
            args,
            top,
        } => commands::rank::run_with_options(RankOptions {
            path: spending.clone(),
            top: *top,
            overrides: overrides_from(args),
            catalog_path: args.catalog.catalog.as_deref(),
            ..RankOptions::default()
        }),
        Commands::Recommend {
            spending,
            args,
            single_only,
            limit,
        } => commands::recommend::run_with_options(RecommendOptions {
            path: spending.clone(),
            force_multi_card: !*single_only,
            limit: *limit,
            overrides: overrides_from(args),
            catalog_path: args.catalog.catalog.as_deref(),
            ..RecommendOptions::default()
        }),
        Commands::Validate { spending, .. } => commands::validate::run(spending.clone()),
        Commands::Cards { command } => match command {
            CardsCommand::List {
                issuer,
                max_fee,
                catalog,
                ..
            } => commands::cards::list_with_options(CardsListOptions {
                issuer: issuer.clone(),
                max_fee: *max_fee,
                catalog_path: catalog.catalog.as_deref(),
                ..CardsListOptions::default()
            }),
            CardsCommand::Show { id, catalog, .. } => {
                commands::cards::show_with_options(CardsShowOptions {
                    id: id.clone(),
                    catalog_path: catalog.catalog.as_deref(),
                    ..CardsShowOptions::default()
                })
            }
        },
        Commands::Curve {
            id,
            balance,
            max_amount,
            step,
            catalog,
            ..
        } => commands::curve::run_with_options(CurveOptions {
            id: id.clone(),
            balance: *balance,
            max_amount: *max_amount,
            step: *step,
            catalog_path: catalog.catalog.as_deref(),
            ..CurveOptions::default()
        }),
        Commands::Demo { .. } => commands::demo::run(),
    }
}

fn overrides_from(args: &CalcArgs) -> ProfileOverrides {
    ProfileOverrides {
        balances: args.balances.clone(),
        point_values: args.point_values.clone(),
    }
}
