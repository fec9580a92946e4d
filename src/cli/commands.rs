//! Command dispatch: load settings, run the tree service, print results.

use std::io;

use clap::CommandFactory;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::{TreeRequest, TreeService, Value};
use crate::cli::args::{Cli, Commands, ConfigCommands, TreeArgs};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Build { tree, assoc }) => _build(&load_settings(cli)?, tree, *assoc),
        Some(Commands::Flatten { tree }) => _flatten(&load_settings(cli)?, tree),
        Some(Commands::Height { tree }) => {
            output::info(&service(&load_settings(cli)?, tree).height()?);
            Ok(())
        }
        Some(Commands::Count { tree }) => {
            output::info(&service(&load_settings(cli)?, tree).count()?);
            Ok(())
        }
        Some(Commands::Leaves { tree }) => {
            for leaf in service(&load_settings(cli)?, tree).leaves()? {
                output::info(&leaf);
            }
            Ok(())
        }
        Some(Commands::Config { command }) => _config(cli, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Cli::command()
            .print_help()
            .map_err(|e| CliError::Usage(e.to_string())),
    }
}

/// Layered settings; only commands that read them call this.
fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let settings = Settings::load(cli.config.as_deref())?;
    debug!("effective settings: {:?}", settings);
    Ok(settings)
}

/// Settings first, then command line overrides.
pub fn resolve_request(settings: &Settings, args: &TreeArgs) -> TreeRequest {
    let mut request = TreeRequest::from(settings);
    if let Some(height) = args.height {
        request.height = height;
    }
    if let Some(root) = args.root {
        request.root = root;
    }
    if let Some(left) = &args.left {
        request.left = left.clone();
    }
    if let Some(right) = &args.right {
        request.right = right.clone();
    }
    request.memoize |= args.memoize;
    request
}

fn service(settings: &Settings, args: &TreeArgs) -> TreeService {
    TreeService::new(resolve_request(settings, args))
}

/// Render a level-order listing, `None` marking absent children.
pub fn format_level_order(values: &[Option<Value>]) -> String {
    let body = values
        .iter()
        .map(|v| v.map_or_else(|| "None".to_string(), |v| v.to_string()))
        .join(", ");
    format!("[{body}]")
}

#[instrument(skip(settings))]
fn _build(settings: &Settings, args: &TreeArgs, assoc: bool) -> CliResult<()> {
    let service = service(settings, args);
    let rendered = if assoc {
        service.build_associative()?.map(|tree| tree.to_string())
    } else {
        service.build()?.map(|tree| tree.to_string())
    };
    match rendered {
        Some(text) => print!("{text}"),
        None => output::warning("height 0: no tree"),
    }
    Ok(())
}

#[instrument(skip(settings))]
fn _flatten(settings: &Settings, args: &TreeArgs) -> CliResult<()> {
    let values = service(settings, args).flatten()?;
    output::info(&format_level_order(&values));
    Ok(())
}

#[instrument(skip(cli))]
fn _config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(load_settings(cli)?.to_toml()?.trim_end()),
        ConfigCommands::Template => print!("{}", Settings::template()),
        ConfigCommands::Path => {
            let path = global_config_path()
                .ok_or_else(|| CliError::Usage("no home directory found".into()))?;
            output::info(&path.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_override_settings() {
        let args = TreeArgs {
            height: Some(2),
            root: Some(1),
            left: Some("mul:2".into()),
            right: None,
            memoize: true,
        };
        let request = resolve_request(&Settings::default(), &args);
        assert_eq!(request.height, 2);
        assert_eq!(request.root, 1);
        assert_eq!(request.left, "mul:2");
        assert_eq!(request.right, "double-minus-one");
        assert!(request.memoize);
    }

    #[test]
    fn test_format_level_order() {
        assert_eq!(format_level_order(&[]), "[]");
        assert_eq!(
            format_level_order(&[Some(1), None, Some(3)]),
            "[1, None, 3]"
        );
    }
}
