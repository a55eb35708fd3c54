//! deptrans command-line entry point

use anyhow::Result;
use clap::Parser;
use deptrans_cli::commands::Commands;

/// Transition-based dependency parsing toolkit
#[derive(Debug, Parser)]
#[command(name = "deptrans", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    Cli::parse().command.execute()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_oracle_flags() {
        let cli = Cli::try_parse_from([
            "deptrans", "oracle", "-i", "a.conllu", "-i", "b.conllu", "-f", "json", "-p", "-t",
            "2", "-vv",
        ])
        .unwrap();
        match cli.command {
            Commands::Oracle(args) => {
                assert_eq!(args.input, ["a.conllu", "b.conllu"]);
                assert!(args.parallel);
                assert_eq!(args.threads, Some(2));
                assert_eq!(args.verbose, 2);
            }
            other => panic!("expected oracle, got {other:?}"),
        }
    }

    #[test]
    fn test_evaluate_requires_both_corpora() {
        assert!(Cli::try_parse_from(["deptrans", "evaluate", "--gold", "g.conllu"]).is_err());
    }
}
