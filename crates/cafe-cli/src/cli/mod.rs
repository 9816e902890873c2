//! CLI argument definitions using the clap derive API.
//!
//! Only argument names, help text and value enums live here; no forum logic.

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "cafe",
    bin_name = "cafe",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{2615} Coffee community forum",
    long_about = "cafe runs the coffee community forum: members, discussions, \
                  moderated topics and the shared activity log.",
    after_help = "EXAMPLES:\n\
        \x20 cafe demo forum\n\
        \x20 cafe demo moderation -v\n\
        \x20 cafe log --raw\n\
        \x20 cafe completions bash > /usr/share/bash-completion/completions/cafe",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run a scripted community scenario.
    #[command(
        about = "Run a community scenario",
        after_help = "EXAMPLES:\n\
            \x20 cafe demo forum\n\
            \x20 cafe demo ranking --output-format json\n\
            \x20 cafe demo catalog --no-color"
    )]
    Demo(DemoArgs),

    /// Print the activity log.
    #[command(
        about = "Show the activity log",
        after_help = "EXAMPLES:\n\
            \x20 cafe log\n\
            \x20 cafe log --raw > activity.txt"
    )]
    Log(LogArgs),

    /// Write a default configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 cafe init\n\
            \x20 cafe init --force"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 cafe completions bash > ~/.local/share/bash-completion/completions/cafe\n\
            \x20 cafe completions zsh  > ~/.zfunc/_cafe\n\
            \x20 cafe completions fish > ~/.config/fish/completions/cafe.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 cafe config get log.path\n\
            \x20 cafe config list\n\
            \x20 cafe config path"
    )]
    Config(ConfigCommands),
}

// ── demo ──────────────────────────────────────────────────────────────────────

/// Arguments for `cafe demo`.
#[derive(Debug, Args)]
pub struct DemoArgs {
    /// Which scenario to run.
    #[arg(value_enum, help = "Scenario to run")]
    pub scenario: Scenario,
}

/// The built-in scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Scenario {
    /// Members, a discussion, messages, replies and likes.
    Forum,
    /// Topics whose lifecycle notifies moderators.
    Moderation,
    /// Member scores under each ranking strategy.
    Ranking,
    /// Establishments, menus, ratings and built listings.
    Catalog,
    /// Mixed topic content and role capabilities.
    Content,
}

// ── log ───────────────────────────────────────────────────────────────────────

/// Arguments for `cafe log`.
#[derive(Debug, Args)]
pub struct LogArgs {
    /// Print the log text exactly as stored.
    #[arg(long = "raw", help = "Print lines without styling")]
    pub raw: bool,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `cafe init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `cafe completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `cafe config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `log.path`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the default configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_demo_command() {
        let cli = Cli::parse_from(["cafe", "demo", "forum"]);
        match cli.command {
            Commands::Demo(args) => assert_eq!(args.scenario, Scenario::Forum),
            other => panic!("expected Demo command, got {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["cafe", "log", "--raw", "-vv", "--no-color"]);
        assert_eq!(cli.global.verbose, 2);
        assert!(cli.global.no_color);
        assert!(matches!(cli.command, Commands::Log(LogArgs { raw: true })));
    }

    #[test]
    fn unknown_scenario_is_rejected() {
        assert!(Cli::try_parse_from(["cafe", "demo", "karaoke"]).is_err());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["cafe", "--quiet", "--verbose", "log"]);
        assert!(result.is_err());
    }

    #[test]
    fn config_get_takes_a_key() {
        let cli = Cli::parse_from(["cafe", "config", "get", "forum.name"]);
        assert!(matches!(
            cli.command,
            Commands::Config(ConfigCommands::Get { key }) if key == "forum.name"
        ));
    }

    #[test]
    fn output_format_from_config() {
        assert_eq!(OutputFormat::from_config("JSON"), OutputFormat::Json);
        assert_eq!(OutputFormat::from_config("plain"), OutputFormat::Plain);
        assert_eq!(OutputFormat::from_config("sparkly"), OutputFormat::Auto);
    }
}
