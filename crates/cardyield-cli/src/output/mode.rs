use crate::cli::{CardsCommand, Commands};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum OutputMode {
    Text,
    Json,
}

pub fn mode_for_command(command: &Commands) -> OutputMode {
    let json = match command {
        Commands::Rank { args, .. } | Commands::Recommend { args, .. } => args.json,
        Commands::Cards { command } => match command {
            CardsCommand::List { json, .. } | CardsCommand::Show { json, .. } => *json,
        },
        Commands::Validate { json, .. } | Commands::Curve { json, .. } | Commands::Demo { json } => {
            *json
        }
    };

    if json {
        OutputMode::Json
    } else {
        OutputMode::Text
    }
}
