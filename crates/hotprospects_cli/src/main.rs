//! CLI entry point for the local prospect roster.
//!
//! # Responsibility
//! - Wire config, logging, storage and the store for local use.
//! - Keep output plain and line-oriented.

use clap::{Parser, Subcommand, ValueEnum};
use hotprospects_core::{
    core_version, default_log_level, init_logging, AuthorizationStatus,
    JsonFileProspectRepository, LogConfig, LogLevel, NotificationCenter, NotificationError,
    NotificationReminderScheduler, ProspectFilter, ProspectStore, ReminderOutcome,
    ReminderRequest, SortOrder, StoreConfig, DEFAULT_REMINDER_DELAY,
};
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "hotprospects")]
#[command(about = "Track scanned prospects from first contact to follow-up")]
#[command(
    after_help = "Environment:\n  HOTPROSPECTS_DATA_DIR   Data directory override"
)]
struct Cli {
    /// Directory holding the roster file and logs.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    /// Log verbosity: trace|debug|info|warn|error.
    #[arg(long, global = true, value_parser = LogLevel::parse)]
    log_level: Option<LogLevel>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print prospects in roster order.
    List {
        #[arg(value_enum, default_value_t = FilterArg::All)]
        filter: FilterArg,
    },
    /// Add a prospect from `name\nemail` read on stdin.
    Scan {
        #[arg(value_enum, default_value_t = FilterArg::All)]
        filter: FilterArg,
    },
    /// Flip contacted state.
    Toggle { id: Uuid },
    /// Reorder the roster.
    Sort {
        #[arg(value_enum)]
        order: SortArg,
    },
    /// Schedule a follow-up reminder.
    Remind { id: Uuid },
    /// Print core version.
    Version,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FilterArg {
    All,
    Contacted,
    Uncontacted,
}

impl From<FilterArg> for ProspectFilter {
    fn from(value: FilterArg) -> Self {
        match value {
            FilterArg::All => Self::All,
            FilterArg::Contacted => Self::Contacted,
            FilterArg::Uncontacted => Self::Uncontacted,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SortArg {
    Name,
    Recents,
}

impl From<SortArg> for SortOrder {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::Name => Self::Name,
            SortArg::Recents => Self::Recency,
        }
    }
}

/// Prints reminders to stdout; terminals need no permission prompt.
struct TerminalNotificationCenter;

impl NotificationCenter for TerminalNotificationCenter {
    fn authorization_status(&self) -> AuthorizationStatus {
        AuthorizationStatus::Authorized
    }

    fn request_authorization(&self) -> Result<bool, NotificationError> {
        Ok(true)
    }

    fn submit(&self, request: ReminderRequest) -> Result<(), NotificationError> {
        println!(
            "reminder in {}s: {} <{}>",
            request.delay_seconds(),
            request.title,
            request.subtitle
        );
        Ok(())
    }
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let config = match cli.data_dir {
        Some(dir) => StoreConfig::new(dir),
        None => StoreConfig::resolve(),
    }
    .map_err(|err| err.to_string())?;

    let level = cli.log_level.unwrap_or_else(default_log_level);
    if let Err(err) = init_logging(&LogConfig::new(level, config.log_dir())) {
        eprintln!("logging disabled: {err}");
    }

    let mut store = ProspectStore::new(JsonFileProspectRepository::from_config(&config));
    store.load();

    match cli.command.unwrap_or(Command::List {
        filter: FilterArg::All,
    }) {
        Command::List { filter } => {
            let filter = ProspectFilter::from(filter);
            println!("# {}", filter.title());
            for prospect in store.query(filter) {
                let mark = if prospect.is_contacted() { "x" } else { " " };
                println!(
                    "[{mark}] {} {} <{}>",
                    prospect.id(),
                    prospect.name(),
                    prospect.email()
                );
            }
        }
        Command::Scan { filter } => {
            let mut payload = String::new();
            std::io::stdin()
                .read_to_string(&mut payload)
                .map_err(|err| format!("cannot read scan payload: {err}"))?;
            // Shell pipes usually end the payload with a newline.
            let payload = payload.strip_suffix('\n').unwrap_or(&payload);
            let id = store
                .add_scanned(payload, filter.into())
                .map_err(|err| err.to_string())?;
            println!("added {id}");
        }
        Command::Toggle { id } => {
            let contacted = store.toggle(id).map_err(|err| err.to_string())?;
            println!("{id} contacted={contacted}");
        }
        Command::Sort { order } => store.sort(order.into()),
        Command::Remind { id } => {
            let scheduler = NotificationReminderScheduler::new(TerminalNotificationCenter);
            let outcome = store
                .remind(id, &scheduler, DEFAULT_REMINDER_DELAY)
                .map_err(|err| err.to_string())?;
            if outcome == ReminderOutcome::SkippedContacted {
                println!("{id} is already contacted");
            }
        }
        Command::Version => println!("hotprospects_core version={}", core_version()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command, FilterArg, SortArg};
    use clap::error::ErrorKind;
    use clap::{CommandFactory, Parser};
    use hotprospects_core::LogLevel;
    use std::path::PathBuf;
    use uuid::Uuid;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn help_is_not_an_error() {
        let err = Cli::try_parse_from(["hotprospects", "--help"])
            .err()
            .unwrap();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn data_dir_accepts_equals_form_after_subcommand() {
        let cli = Cli::try_parse_from(["hotprospects", "list", "--data-dir=/srv/prospects"])
            .unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/srv/prospects")));
        assert!(matches!(
            cli.command,
            Some(Command::List {
                filter: FilterArg::All
            })
        ));
    }

    #[test]
    fn extra_arguments_are_rejected() {
        let err = Cli::try_parse_from(["hotprospects", "list", "all", "junk"])
            .err()
            .unwrap();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn ids_and_value_enums_are_parsed() {
        let id = Uuid::new_v4();
        let raw_id = id.to_string();
        let cli = Cli::try_parse_from(["hotprospects", "toggle", raw_id.as_str()]).unwrap();
        assert!(matches!(cli.command, Some(Command::Toggle { id: parsed }) if parsed == id));

        let cli = Cli::try_parse_from(["hotprospects", "sort", "recents"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Sort {
                order: SortArg::Recents
            })
        ));

        assert!(Cli::try_parse_from(["hotprospects", "remind", "not-a-uuid"]).is_err());
        assert!(Cli::try_parse_from(["hotprospects", "list", "everyone"]).is_err());
    }

    #[test]
    fn log_level_flag_uses_core_parser() {
        let cli = Cli::try_parse_from(["hotprospects", "--log-level", "WARNING"]).unwrap();
        assert_eq!(cli.log_level, Some(LogLevel::Warn));
        assert!(Cli::try_parse_from(["hotprospects", "--log-level", "loud"]).is_err());
    }
}
