//! Argument parsing and request resolution

use clap::Parser;
use rstest::rstest;

use bintree::cli::args::{Cli, Commands, ConfigCommands};
use bintree::cli::commands::{format_level_order, resolve_request};
use bintree::cli::CliError;
use bintree::config::Settings;
use bintree::exitcode;

#[test]
fn given_build_flags_when_parsing_then_tree_args_set() {
    let cli = Cli::try_parse_from([
        "bintree", "build", "--height", "3", "--root", "-2", "--left", "mul:2", "--assoc",
    ])
    .unwrap();

    match cli.command {
        Some(Commands::Build { tree, assoc }) => {
            assert_eq!(tree.height, Some(3));
            assert_eq!(tree.root, Some(-2));
            assert_eq!(tree.left.as_deref(), Some("mul:2"));
            assert!(tree.right.is_none());
            assert!(assoc);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn given_negative_height_flag_when_parsing_then_accepted() {
    let cli = Cli::try_parse_from(["bintree", "height", "--height", "-1"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Height { ref tree }) if tree.height == Some(-1)
    ));
}

#[rstest]
#[case(&["bintree", "-ddd", "flatten"], 3)]
#[case(&["bintree", "count", "-d"], 1)]
#[case(&["bintree", "leaves"], 0)]
fn given_debug_flags_when_parsing_then_counted(#[case] args: &[&str], #[case] expected: u8) {
    let cli = Cli::try_parse_from(args).unwrap();
    assert_eq!(cli.debug, expected);
}

#[test]
fn given_config_subcommand_when_parsing_then_dispatched() {
    let cli = Cli::try_parse_from(["bintree", "-c", "~/x.toml", "config", "show"]).unwrap();
    assert_eq!(cli.config.as_deref().map(|p| p.to_string_lossy().to_string()), Some("~/x.toml".into()));
    assert!(matches!(
        cli.command,
        Some(Commands::Config { command: ConfigCommands::Show })
    ));
}

#[test]
fn given_partial_flags_when_resolving_then_settings_fill_gaps() {
    let cli = Cli::try_parse_from(["bintree", "flatten", "--right", "add:3", "--memoize"]).unwrap();
    let Some(Commands::Flatten { tree }) = cli.command else {
        panic!("expected flatten");
    };

    let request = resolve_request(&Settings::default(), &tree);
    assert_eq!(request.height, 4);
    assert_eq!(request.root, 12);
    assert_eq!(request.left, "cube");
    assert_eq!(request.right, "add:3");
    assert!(request.memoize);
}

#[test]
fn given_values_when_formatting_then_none_marks_gaps() {
    assert_eq!(format_level_order(&[Some(12), None, Some(-3)]), "[12, None, -3]");
}

#[test]
fn given_usage_error_when_exiting_then_usage_code() {
    assert_eq!(CliError::Usage("x".into()).exit_code(), exitcode::USAGE);
}
