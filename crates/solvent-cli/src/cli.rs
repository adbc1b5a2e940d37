//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use solvent::Category;

/// Problem type passed to the solver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ProblemType {
    /// Equations and expression manipulation
    Algebra,
    /// Derivatives, integrals and limits
    Calculus,
    /// Areas and volumes
    Geometry,
    /// Let the classifier decide
    #[default]
    General,
}

impl From<ProblemType> for Category {
    fn from(t: ProblemType) -> Self {
        match t {
            ProblemType::Algebra => Category::Algebra,
            ProblemType::Calculus => Category::Calculus,
            ProblemType::Geometry => Category::Geometry,
            ProblemType::General => Category::General,
        }
    }
}

/// CLI arguments for solvent
#[derive(Parser, Debug)]
#[command(name = "solvent")]
#[command(author, version, about = "Solve math problems written in plain English")]
#[command(long_about = r#"
Solvent reads a math problem in plain English and answers it with a
computer algebra system: equations, derivatives, integrals, limits,
simplification, factoring, expansion, areas and volumes.

Without a PROBLEM argument, one problem is read per line from stdin.

Configuration files are loaded from (lowest to highest priority):
1. ~/.config/solvent/config.toml   Global config
2. ./solvent.toml                  Project-level config
3. --config <path>                 Explicit config file
4. SOLVENT_* environment variables (SOLVENT_LIMITS__MAX_DEPTH=10)

Example:
  solvent "Solve for x: 2x + 3 = 7"
  solvent --type calculus "find the derivative of f(x) = x^2 + 3x - 2"
  echo "what is 2+2" | solvent --json
"#)]
pub struct Cli {
    /// The problem to solve (reads stdin when omitted)
    pub problem: Option<String>,

    /// Problem type hint
    #[arg(short = 't', long = "type", value_enum, default_value = "general")]
    pub problem_type: ProblemType,

    /// Print each result as a JSON object
    #[arg(long)]
    pub json: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_args() {
        let cli = Cli::try_parse_from(["solvent", "-vv", "--type", "calculus", "--json", "integrate x"])
            .unwrap();
        assert_eq!(cli.problem.as_deref(), Some("integrate x"));
        assert_eq!(cli.problem_type, ProblemType::Calculus);
        assert_eq!(cli.verbose, 2);
        assert!(cli.json);
        assert!(!cli.no_config);
    }

    #[test]
    fn test_stdin_mode() {
        let cli = Cli::try_parse_from(["solvent"]).unwrap();
        assert!(cli.problem.is_none());
        assert_eq!(Category::from(cli.problem_type), Category::General);
    }
}
