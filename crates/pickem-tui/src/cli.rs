// Command-line definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "pickem")]
#[command(about = "College football pick'em pool: scoring, standings, and administration")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch current season records from CollegeFootballData and store them
    Refresh {
        /// Season year (defaults to season.year in config)
        #[arg(long)]
        year: Option<i32>,
    },

    /// Import preseason ranks from a CSV file or the configured poll
    Ranks {
        /// CSV file with `team,rank` columns
        #[arg(long, conflicts_with = "fetch")]
        csv: Option<PathBuf>,

        /// Fetch the preseason poll from CollegeFootballData
        #[arg(long)]
        fetch: bool,

        /// Season year for --fetch (defaults to season.year in config)
        #[arg(long, requires = "fetch")]
        year: Option<i32>,

        /// Poll name for --fetch (defaults to season.poll in config)
        #[arg(long, requires = "fetch")]
        poll: Option<String>,
    },

    /// Submit picks from a TOML file
    Submit {
        /// Picks file with `name`, `email`, and a `[picks]` table
        path: PathBuf,
    },

    /// Print a leaderboard
    Standings {
        #[arg(long, value_enum, default_value_t = Game::Main)]
        game: Game,
    },

    /// Print one player's picks and scores
    Picks {
        email: String,
    },

    /// Print every team with its record, rank, and tier
    Teams,

    /// Write the team table as CSV
    Export {
        path: PathBuf,
    },

    /// Player administration
    Player {
        #[command(subcommand)]
        action: PlayerAction,
    },

    /// Add or remove a single pick, bypassing submission rules
    Pick {
        #[command(subcommand)]
        action: PickAction,
    },

    /// Interactive standings dashboard
    Dashboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Game {
    Main,
    RatKing,
    ConfChamp,
}

#[derive(Debug, Subcommand)]
pub enum PlayerAction {
    /// Register a player (or update name/paid for an existing email)
    Add {
        name: String,
        email: String,
        #[arg(long)]
        paid: bool,
    },
    /// Mark a player as paid or unpaid
    Paid {
        email: String,
        #[arg(long, action = clap::ArgAction::Set, default_value_t = true)]
        value: bool,
    },
    /// Delete a player and all of their picks
    Delete {
        email: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum PickAction {
    Add { email: String, team: String },
    Remove { email: String, team: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_standings_game() {
        let cli = Cli::try_parse_from(["pickem", "standings", "--game", "rat-king"]).unwrap();
        match cli.command {
            Command::Standings { game } => assert_eq!(game, Game::RatKing),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn ranks_csv_and_fetch_conflict() {
        assert!(Cli::try_parse_from(["pickem", "ranks", "--csv", "r.csv", "--fetch"]).is_err());
        assert!(Cli::try_parse_from(["pickem", "ranks", "--poll", "AP Top 25"]).is_err());
    }

    #[test]
    fn player_paid_accepts_explicit_false() {
        let cli =
            Cli::try_parse_from(["pickem", "player", "paid", "a@b.c", "--value", "false"]).unwrap();
        match cli.command {
            Command::Player {
                action: PlayerAction::Paid { email, value },
            } => {
                assert_eq!(email, "a@b.c");
                assert!(!value);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
