// SQLite persistence layer for teams, players, and picks.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use anyhow::Context;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;

use crate::model::{normalize_email, Player, PlayerId, Team, TeamId, TeamRecordUpdate, TeamStats};
use crate::store::{DbContext, PickemStore, StoreError, StoreResult};
use crate::tier::{classify, Tier};
use crate::validate::{IdentityField, ValidSubmission};

const TEAM_COLUMNS: &str =
    "id, name, wins, losses, ties, conf_wins, conf_losses, preseason_rank, tier";

/// SQLite-backed store for the pick'em pool.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open (or create) a SQLite database at `path` and ensure all tables
    /// exist. Pass `":memory:"` for an ephemeral in-memory database.
    pub fn open(path: &str) -> anyhow::Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open database at {path}"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;
             PRAGMA foreign_keys = ON;",
        )
        .context("failed to set database pragmas")?;

        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS teams (
                id             INTEGER PRIMARY KEY AUTOINCREMENT,
                name           TEXT NOT NULL UNIQUE,
                wins           INTEGER NOT NULL DEFAULT 0,
                losses         INTEGER NOT NULL DEFAULT 0,
                ties           INTEGER NOT NULL DEFAULT 0,
                conf_wins      INTEGER NOT NULL DEFAULT 0,
                conf_losses    INTEGER NOT NULL DEFAULT 0,
                preseason_rank INTEGER CHECK (preseason_rank IS NULL OR preseason_rank > 0),
                tier           INTEGER CHECK (tier IS NULL OR tier BETWEEN 1 AND 5)
            );

            CREATE TABLE IF NOT EXISTS players (
                id    INTEGER PRIMARY KEY AUTOINCREMENT,
                name  TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                paid  INTEGER NOT NULL DEFAULT 0
            );

            CREATE TABLE IF NOT EXISTS player_picks (
                id           INTEGER PRIMARY KEY AUTOINCREMENT,
                player_id    INTEGER NOT NULL REFERENCES players(id) ON DELETE CASCADE,
                team_id      INTEGER NOT NULL REFERENCES teams(id) ON DELETE CASCADE,
                submitted_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
                UNIQUE(player_id, team_id)
            );

            CREATE INDEX IF NOT EXISTS idx_player_picks_player ON player_picks(player_id);
            ",
        )
        .context("failed to create database schema")?;

        debug!("opened pick'em database at {path}");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// A poisoned lock still guards a usable connection; SQLite rolls back
    /// any transaction the panicking holder left open.
    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // ------------------------------------------------------------------
    // Lookups
    // ------------------------------------------------------------------

    pub fn find_team_by_name(&self, name: &str) -> StoreResult<Option<Team>> {
        let conn = self.conn();
        conn.query_row(
            &format!("SELECT {TEAM_COLUMNS} FROM teams WHERE name = ?1"),
            params![name],
            team_from_row,
        )
        .optional()
        .db("failed to look up team")
    }

    pub fn team(&self, id: TeamId) -> StoreResult<Team> {
        let conn = self.conn();
        conn.query_row(
            &format!("SELECT {TEAM_COLUMNS} FROM teams WHERE id = ?1"),
            params![id],
            team_from_row,
        )
        .optional()
        .db("failed to look up team")?
        .ok_or(StoreError::UnknownTeam(id))
    }

    /// Look up a player by email. The email is normalized first.
    pub fn find_player_by_email(&self, email: &str) -> StoreResult<Option<Player>> {
        let conn = self.conn();
        conn.query_row(
            "SELECT id, name, email, paid FROM players WHERE email = ?1",
            params![normalize_email(email)],
            player_from_row,
        )
        .optional()
        .db("failed to look up player")
    }

    /// Number of players who picked each team, most popular first. Teams
    /// nobody picked are omitted.
    pub fn pick_counts(&self) -> StoreResult<Vec<(String, u32)>> {
        let conn = self.conn();
        let mut stmt = conn
            .prepare(
                "SELECT t.name, COUNT(*) AS picks
                 FROM player_picks p JOIN teams t ON t.id = p.team_id
                 GROUP BY t.id
                 ORDER BY picks DESC, t.name",
            )
            .db("failed to prepare pick_counts query")?;
        let rows = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
            .db("failed to query pick counts")?
            .collect::<Result<Vec<_>, _>>()
            .db("failed to map pick count rows")?;
        Ok(rows)
    }

    // ------------------------------------------------------------------
    // Team maintenance
    // ------------------------------------------------------------------

    /// Apply a batch of provider records in one transaction. Returns the
    /// number of teams written.
    pub fn apply_team_records(&self, records: &[TeamRecordUpdate]) -> StoreResult<usize> {
        let mut conn = self.conn();
        let tx = conn.transaction().db("failed to begin refresh transaction")?;
        for record in records {
            upsert_team_in(&tx, record)?;
        }
        tx.commit().db("failed to commit team records")?;
        debug!("applied {} team records", records.len());
        Ok(records.len())
    }

    /// Set preseason ranks by team name, re-deriving each tier. Names with no
    /// matching team are returned untouched. All writes commit together; an
    /// invalid rank rolls back the whole batch.
    pub fn set_preseason_ranks(&self, ranks: &[(String, Option<u32>)]) -> StoreResult<Vec<String>> {
        let mut conn = self.conn();
        let tx = conn.transaction().db("failed to begin rank transaction")?;
        let mut unknown = Vec::new();
        for (name, rank) in ranks {
            let tier = classify(rank.map(i64::from))?;
            let changed = tx
                .execute(
                    "UPDATE teams SET preseason_rank = ?1, tier = ?2 WHERE name = ?3",
                    params![rank, tier.map(|t| t.number()), name],
                )
                .db("failed to set preseason rank")?;
            if changed == 0 {
                unknown.push(name.clone());
            }
        }
        tx.commit().db("failed to commit preseason ranks")?;
        Ok(unknown)
    }

    /// Overwrite one team's record and preseason rank (admin edit). The tier
    /// follows the rank.
    pub fn update_team_stats(
        &self,
        team: TeamId,
        stats: TeamStats,
        preseason_rank: Option<u32>,
    ) -> StoreResult<()> {
        let tier = classify(preseason_rank.map(i64::from))?;
        let conn = self.conn();
        let changed = conn
            .execute(
                "UPDATE teams SET wins = ?1, losses = ?2, ties = ?3,
                    conf_wins = ?4, conf_losses = ?5, preseason_rank = ?6, tier = ?7
                 WHERE id = ?8",
                params![
                    stats.wins,
                    stats.losses,
                    stats.ties,
                    stats.conf_wins,
                    stats.conf_losses,
                    preseason_rank,
                    tier.map(|t| t.number()),
                    team,
                ],
            )
            .db("failed to update team stats")?;
        if changed == 0 {
            return Err(StoreError::UnknownTeam(team));
        }
        Ok(())
    }

    /// Remove a team along with every pick referencing it.
    pub fn delete_team(&self, team: TeamId) -> StoreResult<()> {
        let conn = self.conn();
        let changed = conn
            .execute("DELETE FROM teams WHERE id = ?1", params![team])
            .db("failed to delete team")?;
        if changed == 0 {
            return Err(StoreError::UnknownTeam(team));
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Player maintenance
    // ------------------------------------------------------------------

    /// Register a player from the admin side. An existing email keeps its id
    /// and takes the new name and paid flag. Blank names and emails are
    /// refused.
    pub fn add_player(&self, name: &str, email: &str, paid: bool) -> StoreResult<Player> {
        let name = name.trim();
        let email = normalize_email(email);
        if name.is_empty() {
            return Err(StoreError::MissingIdentity(IdentityField::Name));
        }
        if email.is_empty() {
            return Err(StoreError::MissingIdentity(IdentityField::Email));
        }
        let conn = self.conn();
        conn.query_row(
            "INSERT INTO players (name, email, paid) VALUES (?1, ?2, ?3)
             ON CONFLICT(email) DO UPDATE SET name = excluded.name, paid = excluded.paid
             RETURNING id, name, email, paid",
            params![name, email, paid],
            player_from_row,
        )
        .db("failed to add player")
    }

    pub fn set_paid(&self, player: PlayerId, paid: bool) -> StoreResult<()> {
        let conn = self.conn();
        let changed = conn
            .execute(
                "UPDATE players SET paid = ?1 WHERE id = ?2",
                params![paid, player],
            )
            .db("failed to update paid flag")?;
        if changed == 0 {
            return Err(StoreError::UnknownPlayer(player));
        }
        Ok(())
    }

    /// Delete a player and all of their picks.
    pub fn delete_player(&self, player: PlayerId) -> StoreResult<()> {
        let mut conn = self.conn();
        let tx = conn.transaction().db("failed to begin transaction")?;
        tx.execute("DELETE FROM player_picks WHERE player_id = ?1", params![player])
            .db("failed to delete player picks")?;
        let changed = tx
            .execute("DELETE FROM players WHERE id = ?1", params![player])
            .db("failed to delete player")?;
        if changed == 0 {
            return Err(StoreError::UnknownPlayer(player));
        }
        tx.commit().db("failed to commit delete_player")?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Single-pick edits
    // ------------------------------------------------------------------

    /// Add one pick outside the submission flow. No tier or count rules are
    /// applied here.
    pub fn add_pick(&self, player: PlayerId, team: TeamId) -> StoreResult<()> {
        let conn = self.conn();
        ensure_player(&conn, player)?;
        ensure_team(&conn, team)?;
        let inserted = conn
            .execute(
                "INSERT OR IGNORE INTO player_picks (player_id, team_id) VALUES (?1, ?2)",
                params![player, team],
            )
            .db("failed to add pick")?;
        if inserted == 0 {
            return Err(StoreError::DuplicatePick {
                player_id: player,
                team_id: team,
            });
        }
        Ok(())
    }

    /// Remove one pick. Returns `false` if the player had not picked the team.
    pub fn remove_pick(&self, player: PlayerId, team: TeamId) -> StoreResult<bool> {
        let conn = self.conn();
        let removed = conn
            .execute(
                "DELETE FROM player_picks WHERE player_id = ?1 AND team_id = ?2",
                params![player, team],
            )
            .db("failed to remove pick")?;
        Ok(removed > 0)
    }
}

// ---------------------------------------------------------------------------
// PickemStore
// ---------------------------------------------------------------------------

impl PickemStore for Database {
    fn teams(&self) -> StoreResult<Vec<Team>> {
        let conn = self.conn();
        let mut stmt = conn
            .prepare(&format!("SELECT {TEAM_COLUMNS} FROM teams ORDER BY name"))
            .db("failed to prepare teams query")?;
        let teams = stmt
            .query_map([], team_from_row)
            .db("failed to query teams")?
            .collect::<Result<Vec<_>, _>>()
            .db("failed to map team rows")?;
        Ok(teams)
    }

    fn players(&self) -> StoreResult<Vec<Player>> {
        let conn = self.conn();
        let mut stmt = conn
            .prepare("SELECT id, name, email, paid FROM players ORDER BY id")
            .db("failed to prepare players query")?;
        let players = stmt
            .query_map([], player_from_row)
            .db("failed to query players")?
            .collect::<Result<Vec<_>, _>>()
            .db("failed to map player rows")?;
        Ok(players)
    }

    fn picks_for_player(&self, player: PlayerId) -> StoreResult<Vec<Team>> {
        let conn = self.conn();
        ensure_player(&conn, player)?;
        let mut stmt = conn
            .prepare(
                "SELECT t.id, t.name, t.wins, t.losses, t.ties, t.conf_wins, t.conf_losses,
                        t.preseason_rank, t.tier
                 FROM player_picks p JOIN teams t ON t.id = p.team_id
                 WHERE p.player_id = ?1
                 ORDER BY t.preseason_rank IS NULL, t.preseason_rank, t.name",
            )
            .db("failed to prepare picks query")?;
        let teams = stmt
            .query_map(params![player], team_from_row)
            .db("failed to query picks")?
            .collect::<Result<Vec<_>, _>>()
            .db("failed to map pick rows")?;
        Ok(teams)
    }

    fn replace_picks(&self, player: PlayerId, teams: &[TeamId]) -> StoreResult<()> {
        let mut conn = self.conn();
        let tx = conn.transaction().db("failed to begin picks transaction")?;
        replace_picks_in(&tx, player, teams)?;
        tx.commit().db("failed to commit picks")?;
        Ok(())
    }

    fn upsert_team(&self, update: &TeamRecordUpdate) -> StoreResult<TeamId> {
        let conn = self.conn();
        upsert_team_in(&conn, update)
    }

    fn upsert_player(&self, name: &str, email: &str) -> StoreResult<Player> {
        let conn = self.conn();
        upsert_player_in(&conn, name, email)
    }

    fn record_submission(&self, submission: &ValidSubmission) -> StoreResult<Player> {
        let mut conn = self.conn();
        let tx = conn.transaction().db("failed to begin submission transaction")?;
        let player = upsert_player_in(&tx, &submission.name, &submission.email)?;
        replace_picks_in(&tx, player.id, &submission.team_ids)?;
        tx.commit().db("failed to commit submission")?;
        Ok(player)
    }

    /// Players and picks come from one read transaction, so a concurrent
    /// refresh or submission is seen either entirely or not at all.
    fn all_picks(&self) -> StoreResult<Vec<(Player, Vec<Team>)>> {
        let mut conn = self.conn();
        let tx = conn.transaction().db("failed to begin read transaction")?;

        let players = {
            let mut stmt = tx
                .prepare("SELECT id, name, email, paid FROM players ORDER BY id")
                .db("failed to prepare players query")?;
            let rows = stmt
                .query_map([], player_from_row)
                .db("failed to query players")?
                .collect::<Result<Vec<_>, _>>()
                .db("failed to map player rows")?;
            rows
        };

        let mut picks: HashMap<PlayerId, Vec<Team>> = HashMap::new();
        {
            let mut stmt = tx
                .prepare(
                    "SELECT p.player_id, t.id, t.name, t.wins, t.losses, t.ties, t.conf_wins,
                            t.conf_losses, t.preseason_rank, t.tier
                     FROM player_picks p JOIN teams t ON t.id = p.team_id
                     ORDER BY p.player_id, t.preseason_rank IS NULL, t.preseason_rank, t.name",
                )
                .db("failed to prepare all-picks query")?;
            let rows = stmt
                .query_map([], |row| {
                    let player: PlayerId = row.get(0)?;
                    Ok((player, team_from_row_at(row, 1)?))
                })
                .db("failed to query all picks")?;
            for row in rows {
                let (player, team) = row.db("failed to map pick rows")?;
                picks.entry(player).or_default().push(team);
            }
        }
        tx.commit().db("failed to end read transaction")?;

        Ok(players
            .into_iter()
            .map(|player| {
                let teams = picks.remove(&player.id).unwrap_or_default();
                (player, teams)
            })
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Statement helpers shared by plain connections and transactions
// ---------------------------------------------------------------------------

fn upsert_team_in(conn: &Connection, update: &TeamRecordUpdate) -> StoreResult<TeamId> {
    let s = &update.stats;
    conn.query_row(
        "INSERT INTO teams (name, wins, losses, ties, conf_wins, conf_losses)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT(name) DO UPDATE SET
            wins        = excluded.wins,
            losses      = excluded.losses,
            ties        = excluded.ties,
            conf_wins   = excluded.conf_wins,
            conf_losses = excluded.conf_losses
         RETURNING id",
        params![update.name, s.wins, s.losses, s.ties, s.conf_wins, s.conf_losses],
        |row| row.get(0),
    )
    .db("failed to upsert team")
}

fn upsert_player_in(conn: &Connection, name: &str, email: &str) -> StoreResult<Player> {
    conn.query_row(
        "INSERT INTO players (name, email) VALUES (?1, ?2)
         ON CONFLICT(email) DO UPDATE SET name = excluded.name
         RETURNING id, name, email, paid",
        params![name.trim(), normalize_email(email)],
        player_from_row,
    )
    .db("failed to upsert player")
}

fn replace_picks_in(conn: &Connection, player: PlayerId, teams: &[TeamId]) -> StoreResult<()> {
    ensure_player(conn, player)?;
    let mut seen = HashSet::new();
    for &team in teams {
        if !seen.insert(team) {
            return Err(StoreError::DuplicatePick {
                player_id: player,
                team_id: team,
            });
        }
        ensure_team(conn, team)?;
    }

    conn.execute("DELETE FROM player_picks WHERE player_id = ?1", params![player])
        .db("failed to clear previous picks")?;
    let mut stmt = conn
        .prepare("INSERT INTO player_picks (player_id, team_id) VALUES (?1, ?2)")
        .db("failed to prepare pick insert")?;
    for &team in teams {
        stmt.execute(params![player, team])
            .db("failed to insert pick")?;
    }
    Ok(())
}

fn ensure_player(conn: &Connection, player: PlayerId) -> StoreResult<()> {
    let exists: bool = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM players WHERE id = ?1)",
            params![player],
            |row| row.get(0),
        )
        .db("failed to check player existence")?;
    if exists {
        Ok(())
    } else {
        Err(StoreError::UnknownPlayer(player))
    }
}

fn ensure_team(conn: &Connection, team: TeamId) -> StoreResult<()> {
    let exists: bool = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM teams WHERE id = ?1)",
            params![team],
            |row| row.get(0),
        )
        .db("failed to check team existence")?;
    if exists {
        Ok(())
    } else {
        Err(StoreError::UnknownTeam(team))
    }
}

fn team_from_row(row: &Row<'_>) -> rusqlite::Result<Team> {
    team_from_row_at(row, 0)
}

/// Read the `TEAM_COLUMNS` starting at column `start`.
fn team_from_row_at(row: &Row<'_>, start: usize) -> rusqlite::Result<Team> {
    let tier_idx = start + 8;
    let tier: Option<i64> = row.get(tier_idx)?;
    let tier = tier
        .map(Tier::from_number)
        .transpose()
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(tier_idx, Type::Integer, Box::new(e))
        })?;
    Ok(Team {
        id: row.get(start)?,
        name: row.get(start + 1)?,
        wins: row.get(start + 2)?,
        losses: row.get(start + 3)?,
        ties: row.get(start + 4)?,
        conf_wins: row.get(start + 5)?,
        conf_losses: row.get(start + 6)?,
        preseason_rank: row.get(start + 7)?,
        tier,
    })
}

fn player_from_row(row: &Row<'_>) -> rusqlite::Result<Player> {
    Ok(Player {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        paid: row.get(3)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper: create a fresh in-memory database for each test.
    fn test_db() -> Database {
        Database::open(":memory:").expect("in-memory database should open")
    }

    fn record(name: &str, wins: u32, losses: u32) -> TeamRecordUpdate {
        TeamRecordUpdate {
            name: name.to_string(),
            stats: TeamStats {
                wins,
                losses,
                ties: 0,
                conf_wins: wins / 2,
                conf_losses: losses / 2,
            },
        }
    }

    /// Seed three teams with ranks 5, 30, and unranked.
    fn seeded() -> (Database, TeamId, TeamId, TeamId) {
        let db = test_db();
        let a = db.upsert_team(&record("Alabama", 10, 2)).unwrap();
        let b = db.upsert_team(&record("Baylor", 7, 5)).unwrap();
        let c = db.upsert_team(&record("Charlotte", 3, 9)).unwrap();
        db.set_preseason_ranks(&[
            ("Alabama".to_string(), Some(5)),
            ("Baylor".to_string(), Some(30)),
        ])
        .unwrap();
        (db, a, b, c)
    }

    #[test]
    fn open_creates_tables() {
        let db = test_db();
        let conn = db.conn();
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'
                 AND name IN ('teams', 'players', 'player_picks')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 3);
    }

    #[test]
    fn upsert_team_overwrites_record_but_keeps_rank() {
        let (db, a, _, _) = seeded();
        let again = db.upsert_team(&record("Alabama", 11, 3)).unwrap();
        assert_eq!(again, a);

        let team = db.team(a).unwrap();
        assert_eq!((team.wins, team.losses), (11, 3));
        assert_eq!(team.preseason_rank, Some(5));
        assert_eq!(team.tier, Some(Tier::One));
        assert_eq!(db.teams().unwrap().len(), 3);
    }

    #[test]
    fn set_preseason_ranks_derives_tier_and_reports_unknown() {
        let (db, _, b, c) = seeded();
        let unknown = db
            .set_preseason_ranks(&[
                ("Charlotte".to_string(), Some(76)),
                ("Nowhere State".to_string(), Some(3)),
            ])
            .unwrap();
        assert_eq!(unknown, vec!["Nowhere State".to_string()]);
        assert_eq!(db.team(c).unwrap().tier, Some(Tier::Five));
        assert_eq!(db.team(b).unwrap().tier, Some(Tier::Three));
    }

    #[test]
    fn clearing_rank_clears_tier() {
        let (db, a, _, _) = seeded();
        db.set_preseason_ranks(&[("Alabama".to_string(), None)]).unwrap();
        let team = db.team(a).unwrap();
        assert_eq!(team.preseason_rank, None);
        assert_eq!(team.tier, None);
    }

    #[test]
    fn invalid_rank_rolls_back_batch() {
        let (db, _, _, c) = seeded();
        let err = db
            .set_preseason_ranks(&[
                ("Charlotte".to_string(), Some(80)),
                ("Baylor".to_string(), Some(0)),
            ])
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidRank(_)));
        assert_eq!(db.team(c).unwrap().preseason_rank, None);
    }

    #[test]
    fn upsert_player_normalizes_email_and_updates_name() {
        let db = test_db();
        let first = db.upsert_player("Alice", "  Alice@Example.com ").unwrap();
        assert_eq!(first.email, "alice@example.com");
        let second = db.upsert_player("Alice B.", "alice@example.COM").unwrap();
        assert_eq!(second.id, first.id);
        assert_eq!(second.name, "Alice B.");
        assert_eq!(db.players().unwrap().len(), 1);
    }

    #[test]
    fn replace_picks_swaps_whole_set() {
        let (db, a, b, c) = seeded();
        let p = db.upsert_player("Alice", "alice@example.com").unwrap();
        db.replace_picks(p.id, &[a, b]).unwrap();
        db.replace_picks(p.id, &[c]).unwrap();
        let picks = db.picks_for_player(p.id).unwrap();
        let names: Vec<&str> = picks.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Charlotte"]);
    }

    #[test]
    fn replace_picks_rejects_unknown_team_without_touching_existing() {
        let (db, a, _, _) = seeded();
        let p = db.upsert_player("Alice", "alice@example.com").unwrap();
        db.replace_picks(p.id, &[a]).unwrap();
        let err = db.replace_picks(p.id, &[a, 999]).unwrap_err();
        assert!(matches!(err, StoreError::UnknownTeam(999)));
        assert_eq!(db.picks_for_player(p.id).unwrap().len(), 1);
    }

    #[test]
    fn replace_picks_rejects_duplicates() {
        let (db, a, _, _) = seeded();
        let p = db.upsert_player("Alice", "alice@example.com").unwrap();
        let err = db.replace_picks(p.id, &[a, a]).unwrap_err();
        assert!(matches!(err, StoreError::DuplicatePick { .. }));
    }

    #[test]
    fn picks_for_unknown_player_fails() {
        let db = test_db();
        assert!(matches!(
            db.picks_for_player(42),
            Err(StoreError::UnknownPlayer(42))
        ));
    }

    #[test]
    fn picks_are_ordered_by_rank_then_unranked() {
        let (db, a, b, c) = seeded();
        let p = db.upsert_player("Alice", "alice@example.com").unwrap();
        db.replace_picks(p.id, &[c, b, a]).unwrap();
        let names: Vec<String> = db
            .picks_for_player(p.id)
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["Alabama", "Baylor", "Charlotte"]);
    }

    #[test]
    fn record_submission_resubmits_in_place() {
        let (db, a, b, c) = seeded();
        let sub = ValidSubmission {
            name: "Alice".into(),
            email: "alice@example.com".into(),
            team_ids: vec![a, b],
        };
        let first = db.record_submission(&sub).unwrap();
        let second = db
            .record_submission(&ValidSubmission {
                name: "Alice Again".into(),
                team_ids: vec![c],
                ..sub
            })
            .unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(second.name, "Alice Again");
        assert_eq!(db.picks_for_player(first.id).unwrap().len(), 1);
    }

    #[test]
    fn record_submission_with_bad_team_creates_nothing() {
        let db = test_db();
        let err = db
            .record_submission(&ValidSubmission {
                name: "Bob".into(),
                email: "bob@example.com".into(),
                team_ids: vec![7],
            })
            .unwrap_err();
        assert!(matches!(err, StoreError::UnknownTeam(7)));
        assert!(db.find_player_by_email("bob@example.com").unwrap().is_none());
    }

    #[test]
    fn add_and_remove_single_picks() {
        let (db, a, b, _) = seeded();
        let p = db.add_player("Carol", "carol@example.com", true).unwrap();
        assert!(p.paid);
        db.add_pick(p.id, a).unwrap();
        assert!(matches!(
            db.add_pick(p.id, a),
            Err(StoreError::DuplicatePick { .. })
        ));
        assert!(matches!(db.add_pick(p.id, 404), Err(StoreError::UnknownTeam(404))));
        assert!(db.remove_pick(p.id, a).unwrap());
        assert!(!db.remove_pick(p.id, b).unwrap());
        assert!(db.picks_for_player(p.id).unwrap().is_empty());
    }

    #[test]
    fn add_player_refuses_blank_identity() {
        let db = test_db();
        assert!(matches!(
            db.add_player("  ", "someone@example.com", false),
            Err(StoreError::MissingIdentity(IdentityField::Name))
        ));
        assert!(matches!(
            db.add_player("Frank", "   ", false),
            Err(StoreError::MissingIdentity(IdentityField::Email))
        ));
        assert!(db.players().unwrap().is_empty());
    }

    #[test]
    fn set_paid_and_delete_player_cascade() {
        let (db, a, _, _) = seeded();
        let p = db.add_player("Dan", "dan@example.com", false).unwrap();
        db.add_pick(p.id, a).unwrap();
        db.set_paid(p.id, true).unwrap();
        assert!(db.find_player_by_email("DAN@example.com").unwrap().unwrap().paid);

        db.delete_player(p.id).unwrap();
        assert!(db.players().unwrap().is_empty());
        assert!(db.pick_counts().unwrap().is_empty());
        assert!(matches!(db.set_paid(p.id, false), Err(StoreError::UnknownPlayer(_))));
        assert!(matches!(db.delete_player(p.id), Err(StoreError::UnknownPlayer(_))));
    }

    #[test]
    fn delete_team_removes_its_picks() {
        let (db, a, b, _) = seeded();
        let p = db.add_player("Eve", "eve@example.com", false).unwrap();
        db.replace_picks(p.id, &[a, b]).unwrap();
        db.delete_team(a).unwrap();
        assert_eq!(db.picks_for_player(p.id).unwrap().len(), 1);
        assert!(matches!(db.delete_team(a), Err(StoreError::UnknownTeam(_))));
    }

    #[test]
    fn update_team_stats_sets_record_and_tier() {
        let (db, _, _, c) = seeded();
        let stats = TeamStats {
            wins: 4,
            losses: 4,
            ties: 1,
            conf_wins: 2,
            conf_losses: 3,
        };
        db.update_team_stats(c, stats, Some(55)).unwrap();
        let team = db.team(c).unwrap();
        assert_eq!(team.ties, 1);
        assert_eq!(team.conf_record(), "2-3");
        assert_eq!(team.tier, Some(Tier::Four));

        assert!(matches!(
            db.update_team_stats(c, stats, Some(0)),
            Err(StoreError::InvalidRank(_))
        ));
        assert!(matches!(
            db.update_team_stats(999, stats, None),
            Err(StoreError::UnknownTeam(999))
        ));
    }

    #[test]
    fn pick_counts_most_popular_first() {
        let (db, a, b, _) = seeded();
        let p1 = db.add_player("P1", "p1@example.com", false).unwrap();
        let p2 = db.add_player("P2", "p2@example.com", false).unwrap();
        db.replace_picks(p1.id, &[a, b]).unwrap();
        db.replace_picks(p2.id, &[b]).unwrap();
        assert_eq!(
            db.pick_counts().unwrap(),
            vec![("Baylor".to_string(), 2), ("Alabama".to_string(), 1)]
        );
    }

    #[test]
    fn apply_team_records_batch() {
        let db = test_db();
        let n = db
            .apply_team_records(&[record("A", 1, 0), record("B", 0, 1)])
            .unwrap();
        assert_eq!(n, 2);
        let found = db.find_team_by_name("B").unwrap().unwrap();
        assert_eq!(found.losses, 1);
        assert_eq!(found.tier, None);
        assert!(db.find_team_by_name("C").unwrap().is_none());
    }

    #[test]
    fn all_picks_pairs_players_with_teams() {
        let (db, a, _, c) = seeded();
        let p1 = db.add_player("P1", "p1@example.com", false).unwrap();
        db.add_player("P2", "p2@example.com", false).unwrap();
        db.replace_picks(p1.id, &[a, c]).unwrap();
        let all = db.all_picks().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].1.len(), 2);
        assert!(all[1].1.is_empty());
    }

    #[test]
    fn all_picks_matches_per_player_reads() {
        let (db, a, b, c) = seeded();
        let p1 = db.add_player("P1", "p1@example.com", false).unwrap();
        let p2 = db.add_player("P2", "p2@example.com", true).unwrap();
        db.replace_picks(p1.id, &[c, a]).unwrap();
        db.replace_picks(p2.id, &[b]).unwrap();

        let all = db.all_picks().unwrap();
        let players: Vec<Player> = all.iter().map(|(p, _)| p.clone()).collect();
        assert_eq!(players, db.players().unwrap());
        for (player, teams) in &all {
            assert_eq!(teams, &db.picks_for_player(player.id).unwrap());
        }
    }
}
