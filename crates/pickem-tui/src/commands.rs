// Command dispatch: one function per subcommand, all writing plain text to
// the supplied writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use pickem_app::export::export_teams_csv;
use pickem_app::picks_file::parse_picks_file;
use pickem_app::refresh::{import_ranks, refresh_records};
use pickem_app::standings::StandingsService;
use pickem_app::submission::{SubmissionService, SubmitError};
use pickem_cfb::ranks_csv::load_rank_csv;
use pickem_cfb::{CfbdClient, SportsDataProvider};
use pickem_core::config::Config;
use pickem_core::db::Database;
use pickem_core::model::{Player, Team};
use tracing::info;

use crate::cli::{Command, Game, PickAction, PlayerAction};
use crate::report;
use crate::tui;

pub async fn execute<W: Write>(
    command: Command,
    config: &Config,
    db: &Database,
    out: &mut W,
) -> Result<()> {
    match command {
        Command::Refresh { year } => {
            let year = year.unwrap_or(config.season.year);
            let client = CfbdClient::from_config(config)?;
            let summary = refresh_records(&client, db, year).await?;
            writeln!(out, "{}", report::format_refresh(&summary))?;
        }
        Command::Ranks {
            csv,
            fetch,
            year,
            poll,
        } => ranks(config, db, csv.as_deref(), fetch, year, poll, out).await?,
        Command::Submit { path } => submit(config, db, &path, out)?,
        Command::Standings { game } => {
            let boards = StandingsService::new(db, config.main_tie_break).leaderboards()?;
            let text = match game {
                Game::Main => report::format_main(&boards.main),
                Game::RatKing => report::format_rat_king(&boards.rat_king),
                Game::ConfChamp => report::format_conf_champ(&boards.conf_champ),
            };
            write!(out, "{text}")?;
        }
        Command::Picks { email } => {
            let breakdown = StandingsService::new(db, config.main_tie_break)
                .player_breakdown(&email)?
                .with_context(|| format!("no player registered with email {email}"))?;
            write!(out, "{}", report::format_breakdown(&breakdown))?;
        }
        Command::Teams => {
            let rows = StandingsService::new(db, config.main_tie_break).team_overview()?;
            write!(out, "{}", report::format_teams(&rows))?;
        }
        Command::Export { path } => {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let n = export_teams_csv(db, BufWriter::new(file))?;
            info!("exported {n} teams to {}", path.display());
            writeln!(out, "Exported {n} teams to {}.", path.display())?;
        }
        Command::Player { action } => player(db, action, out)?,
        Command::Pick { action } => pick(db, action, out)?,
        Command::Dashboard => tui::run(db, config).await?,
    }
    Ok(())
}

async fn ranks<W: Write>(
    config: &Config,
    db: &Database,
    csv: Option<&Path>,
    fetch: bool,
    year: Option<i32>,
    poll: Option<String>,
    out: &mut W,
) -> Result<()> {
    if let Some(path) = csv {
        let parsed = load_rank_csv(path)?;
        let summary = import_ranks(db, &parsed.ranks)?;
        write!(out, "{}", report::format_rank_import(&summary, &parsed.rejected))?;
        return Ok(());
    }
    if !fetch {
        bail!("pass --csv <file> or --fetch to choose a rank source");
    }
    let year = year.unwrap_or(config.season.year);
    let poll = poll.unwrap_or_else(|| config.season.poll.clone());
    let client = CfbdClient::from_config(config)?;
    let ranks = client.fetch_preseason_ranks(year, &poll).await?;
    if ranks.is_empty() {
        bail!("no {poll} preseason poll found for {year}");
    }
    let summary = import_ranks(db, &ranks)?;
    write!(out, "{}", report::format_rank_import(&summary, &[]))?;
    Ok(())
}

fn submit<W: Write>(config: &Config, db: &Database, path: &Path, out: &mut W) -> Result<()> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let submission = parse_picks_file(&text)?;
    match SubmissionService::new(db, &config.schedule).submit(&submission) {
        Ok(receipt) => {
            writeln!(out, "{}", report::format_receipt(&receipt))?;
            Ok(())
        }
        Err(SubmitError::Rejected(violations)) => {
            write!(out, "{}", report::format_violations(&violations))?;
            bail!("submission rejected with {} problem(s)", violations.len())
        }
        Err(e) => Err(e.into()),
    }
}

// ---------------------------------------------------------------------------
// Administration
// ---------------------------------------------------------------------------

fn lookup_player(db: &Database, email: &str) -> Result<Player> {
    db.find_player_by_email(email)?
        .with_context(|| format!("no player registered with email {email}"))
}

fn lookup_team(db: &Database, name: &str) -> Result<Team> {
    db.find_team_by_name(name)?
        .with_context(|| format!("no team named '{name}'"))
}

fn player<W: Write>(db: &Database, action: PlayerAction, out: &mut W) -> Result<()> {
    match action {
        PlayerAction::Add { name, email, paid } => {
            let player = db.add_player(&name, &email, paid)?;
            writeln!(out, "Player {} <{}> saved.", player.name, player.email)?;
        }
        PlayerAction::Paid { email, value } => {
            let player = lookup_player(db, &email)?;
            db.set_paid(player.id, value)?;
            writeln!(
                out,
                "{} marked {}.",
                player.name,
                if value { "paid" } else { "unpaid" }
            )?;
        }
        PlayerAction::Delete { email } => {
            let player = lookup_player(db, &email)?;
            db.delete_player(player.id)?;
            writeln!(out, "Deleted {} and their picks.", player.name)?;
        }
    }
    Ok(())
}

fn pick<W: Write>(db: &Database, action: PickAction, out: &mut W) -> Result<()> {
    match action {
        PickAction::Add { email, team } => {
            let player = lookup_player(db, &email)?;
            let team = lookup_team(db, &team)?;
            db.add_pick(player.id, team.id)?;
            writeln!(out, "Added {} to {}'s picks.", team.name, player.name)?;
        }
        PickAction::Remove { email, team } => {
            let player = lookup_player(db, &email)?;
            let team = lookup_team(db, &team)?;
            if db.remove_pick(player.id, team.id)? {
                writeln!(out, "Removed {} from {}'s picks.", team.name, player.name)?;
            } else {
                writeln!(out, "{} had not picked {}.", player.name, team.name)?;
            }
        }
    }
    Ok(())
}
