//! Command-Line Interface

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Routine Miner - Find repeatable routines in recorded desktop sessions
#[derive(Parser, Debug)]
#[command(name = "routine-miner")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract keyframe pairs from a recorded session
    Keyframes {
        /// Input session file
        #[arg(short, long)]
        input: PathBuf,

        /// Write the pairs as JSON to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Override the configured before-frame tolerance (seconds)
        #[arg(long)]
        tolerance: Option<f64>,

        /// Override the configured settle delay (seconds)
        #[arg(long)]
        after_delay: Option<f64>,
    },

    /// Run the full pipeline over a recorded session
    Analyze {
        /// Input session file
        #[arg(short, long)]
        input: PathBuf,

        /// Override the configured minimum pattern length
        #[arg(long)]
        min_length: Option<usize>,

        /// Override the configured minimum occurrence count
        #[arg(long)]
        min_occurrences: Option<usize>,

        /// Report consecutive single-action runs instead of general patterns
        #[arg(long)]
        runs: bool,

        /// Write the full report as JSON to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Mine an already-labeled action list for patterns
    Mine {
        /// Input labeled-actions file (JSON array)
        #[arg(short, long)]
        input: PathBuf,

        /// Override the configured minimum pattern length
        #[arg(long)]
        min_length: Option<usize>,

        /// Override the configured minimum occurrence count
        #[arg(long)]
        min_occurrences: Option<usize>,

        /// Report consecutive single-action runs instead of general patterns
        #[arg(long)]
        runs: bool,

        /// Write the patterns as JSON to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate a synthetic session and run the pipeline over it
    Demo {
        /// Number of synthetic frames
        #[arg(long, default_value = "40")]
        frames: usize,

        /// Number of synthetic click events
        #[arg(long, default_value = "12")]
        events: usize,

        /// Synthetic session duration in seconds
        #[arg(short, long, default_value = "20.0")]
        duration: f64,

        /// Also save the generated session to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List stored sessions
    List {
        /// Show detailed information
        #[arg(short, long)]
        detailed: bool,
    },

    /// Initialize configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Delete a stored session
    Delete {
        /// Session name or ID to delete
        name: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// View or modify configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "sync.tolerance", "patterns.min_length")
        key: String,

        /// Value to set
        value: String,
    },

    /// Get a specific configuration value
    Get {
        /// Configuration key
        key: String,
    },

    /// Reset configuration to defaults
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the stored sessions directory
    pub fn sessions_dir() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".routine_miner").join("sessions"))
            .unwrap_or_else(|| PathBuf::from("sessions"))
    }

    /// Get the reports output directory
    pub fn reports_dir() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".routine_miner").join("reports"))
            .unwrap_or_else(|| PathBuf::from("reports"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_sessions_dir() {
        let dir = Cli::sessions_dir();
        assert!(dir.to_string_lossy().contains("sessions"));
    }

    #[test]
    fn test_reports_dir() {
        let dir = Cli::reports_dir();
        assert!(dir.to_string_lossy().contains("reports"));
    }

    #[test]
    fn test_cli_parse_keyframes_command() {
        let args = vec![
            "routine-miner",
            "keyframes",
            "--input", "/path/to/session.json",
            "--tolerance", "0.2",
        ];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Keyframes { input, output, tolerance, after_delay } => {
                assert_eq!(input, PathBuf::from("/path/to/session.json"));
                assert!(output.is_none());
                assert_eq!(tolerance, Some(0.2));
                assert!(after_delay.is_none());
            }
            _ => panic!("Expected Keyframes command"),
        }
    }

    #[test]
    fn test_cli_parse_analyze_command_with_defaults() {
        let args = vec!["routine-miner", "analyze", "--input", "session.json"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Analyze { input, min_length, min_occurrences, runs, output } => {
                assert_eq!(input, PathBuf::from("session.json"));
                assert!(min_length.is_none());
                assert!(min_occurrences.is_none());
                assert!(!runs);
                assert!(output.is_none());
            }
            _ => panic!("Expected Analyze command"),
        }
    }

    #[test]
    fn test_cli_parse_analyze_command_with_all_options() {
        let args = vec![
            "routine-miner",
            "analyze",
            "--input", "session.json",
            "--min-length", "3",
            "--min-occurrences", "4",
            "--runs",
            "--output", "report.json",
        ];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Analyze { input, min_length, min_occurrences, runs, output } => {
                assert_eq!(input, PathBuf::from("session.json"));
                assert_eq!(min_length, Some(3));
                assert_eq!(min_occurrences, Some(4));
                assert!(runs);
                assert_eq!(output, Some(PathBuf::from("report.json")));
            }
            _ => panic!("Expected Analyze command"),
        }
    }

    #[test]
    fn test_cli_parse_mine_command() {
        let args = vec![
            "routine-miner",
            "mine",
            "--input", "actions.json",
            "--min-occurrences", "3",
        ];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Mine { input, min_occurrences, runs, .. } => {
                assert_eq!(input, PathBuf::from("actions.json"));
                assert_eq!(min_occurrences, Some(3));
                assert!(!runs);
            }
            _ => panic!("Expected Mine command"),
        }
    }

    #[test]
    fn test_cli_parse_demo_command_defaults() {
        let args = vec!["routine-miner", "demo"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Demo { frames, events, duration, output } => {
                assert_eq!(frames, 40);
                assert_eq!(events, 12);
                assert_eq!(duration, 20.0);
                assert!(output.is_none());
            }
            _ => panic!("Expected Demo command"),
        }
    }

    #[test]
    fn test_cli_parse_demo_command_with_options() {
        let args = vec![
            "routine-miner",
            "demo",
            "--frames", "100",
            "--events", "30",
            "--duration", "60",
            "--output", "demo-session.json",
        ];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Demo { frames, events, duration, output } => {
                assert_eq!(frames, 100);
                assert_eq!(events, 30);
                assert_eq!(duration, 60.0);
                assert_eq!(output, Some(PathBuf::from("demo-session.json")));
            }
            _ => panic!("Expected Demo command"),
        }
    }

    #[test]
    fn test_cli_parse_list_command() {
        let args = vec!["routine-miner", "list", "--detailed"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::List { detailed } => {
                assert!(detailed);
            }
            _ => panic!("Expected List command"),
        }
    }

    #[test]
    fn test_cli_parse_list_command_defaults() {
        let args = vec!["routine-miner", "list"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::List { detailed } => {
                assert!(!detailed);
            }
            _ => panic!("Expected List command"),
        }
    }

    #[test]
    fn test_cli_parse_init_command() {
        let args = vec!["routine-miner", "init", "--force"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Init { force } => {
                assert!(force);
            }
            _ => panic!("Expected Init command"),
        }
    }

    #[test]
    fn test_cli_global_verbose_flag() {
        let args = vec!["routine-miner", "--verbose", "list"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_global_config_flag() {
        let args = vec![
            "routine-miner",
            "--config", "/path/to/config.toml",
            "list",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/path/to/config.toml")));
    }

    #[test]
    fn test_cli_verbose_shorthand() {
        let args = vec!["routine-miner", "-v", "list"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_config_shorthand() {
        let args = vec!["routine-miner", "-c", "/custom/config.toml", "list"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_cli_demo_duration_shorthand() {
        let args = vec!["routine-miner", "demo", "-d", "5.5"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Demo { duration, .. } => {
                assert_eq!(duration, 5.5);
            }
            _ => panic!("Expected Demo command"),
        }
    }

    #[test]
    fn test_cli_invalid_command_fails() {
        let args = vec!["routine-miner", "invalid-command"];
        let result = Cli::try_parse_from(args);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_missing_required_argument_fails() {
        let args = vec!["routine-miner", "analyze"];
        let result = Cli::try_parse_from(args);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_verify_command_structure() {
        let cmd = Cli::command();

        // Verify subcommands exist
        let subcommands: Vec<_> = cmd.get_subcommands().map(|s| s.get_name()).collect();
        assert!(subcommands.contains(&"keyframes"));
        assert!(subcommands.contains(&"analyze"));
        assert!(subcommands.contains(&"mine"));
        assert!(subcommands.contains(&"demo"));
        assert!(subcommands.contains(&"list"));
        assert!(subcommands.contains(&"init"));
        assert!(subcommands.contains(&"delete"));
        assert!(subcommands.contains(&"config"));
    }

    #[test]
    fn test_sessions_dir_fallback() {
        // Even if home_dir returns None, we should get a fallback
        let dir = Cli::sessions_dir();
        assert!(!dir.as_os_str().is_empty());
    }

    #[test]
    fn test_cli_parse_delete_command() {
        let args = vec!["routine-miner", "delete", "my-session"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Delete { name, force } => {
                assert_eq!(name, "my-session");
                assert!(!force);
            }
            _ => panic!("Expected Delete command"),
        }
    }

    #[test]
    fn test_cli_parse_delete_command_force() {
        let args = vec!["routine-miner", "delete", "old-session", "--force"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Delete { name, force } => {
                assert_eq!(name, "old-session");
                assert!(force);
            }
            _ => panic!("Expected Delete command"),
        }
    }

    #[test]
    fn test_cli_parse_config_show() {
        let args = vec!["routine-miner", "config", "show"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Config { action: ConfigAction::Show } => {}
            _ => panic!("Expected Config Show"),
        }
    }

    #[test]
    fn test_cli_parse_config_set() {
        let args = vec![
            "routine-miner",
            "config",
            "set",
            "sync.tolerance",
            "0.15",
        ];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Config { action: ConfigAction::Set { key, value } } => {
                assert_eq!(key, "sync.tolerance");
                assert_eq!(value, "0.15");
            }
            _ => panic!("Expected Config Set"),
        }
    }

    #[test]
    fn test_cli_parse_config_get() {
        let args = vec!["routine-miner", "config", "get", "patterns.min_length"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Config { action: ConfigAction::Get { key } } => {
                assert_eq!(key, "patterns.min_length");
            }
            _ => panic!("Expected Config Get"),
        }
    }

    #[test]
    fn test_cli_parse_config_reset() {
        let args = vec!["routine-miner", "config", "reset", "--force"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Config { action: ConfigAction::Reset { force } } => {
                assert!(force);
            }
            _ => panic!("Expected Config Reset"),
        }
    }

    #[test]
    fn test_cli_parse_config_reset_defaults() {
        let args = vec!["routine-miner", "config", "reset"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Config { action: ConfigAction::Reset { force } } => {
                assert!(!force);
            }
            _ => panic!("Expected Config Reset"),
        }
    }

    #[test]
    fn test_cli_demo_with_zero_events() {
        let args = vec!["routine-miner", "demo", "--events", "0"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Demo { events, .. } => {
                assert_eq!(events, 0);
            }
            _ => panic!("Expected Demo command"),
        }
    }
}
