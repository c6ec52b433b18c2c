// Plain-text rendering of standings and summaries for the CLI commands.

use std::fmt::Write;

use pickem_app::refresh::{RankImportSummary, RefreshSummary};
use pickem_app::standings::{PlayerBreakdown, TeamOverviewRow};
use pickem_app::submission::SubmissionReceipt;
use pickem_cfb::ranks_csv::RejectedRank;
use pickem_core::leaderboard::Standing;
use pickem_core::scoring::{PlayerScores, RatKingScore};
use pickem_core::tier::Tier;
use pickem_core::validate::Violation;

/// Short tier label for tables: "T1".."T5", or "-" for unranked.
pub fn tier_cell(tier: Option<Tier>) -> String {
    match tier {
        Some(t) => format!("T{}", t.number()),
        None => "-".to_string(),
    }
}

pub fn rank_cell(rank: Option<u32>) -> String {
    rank.map(|r| r.to_string()).unwrap_or_else(|| "-".to_string())
}

/// Rat King value to three places, or "n/a" when there are no tier-5 picks.
pub fn rat_king_cell(score: RatKingScore) -> String {
    match score {
        RatKingScore::NoData => "n/a".to_string(),
        RatKingScore::Average(avg) => format!("{avg:.3}"),
    }
}

pub fn format_main(board: &[Standing<PlayerScores>]) -> String {
    let mut out = format!("{:>4}  {:<24} {:>6} {:>5}\n", "#", "Player", "Score", "Wins");
    for s in board {
        let _ = writeln!(
            out,
            "{:>4}  {:<24} {:>6} {:>5}",
            s.rank, s.player.name, s.score.main, s.score.total_wins
        );
    }
    out
}

pub fn format_rat_king(board: &[Standing<RatKingScore>]) -> String {
    let mut out = format!("{:>4}  {:<24} {:>8}\n", "#", "Player", "Win %");
    for s in board {
        let _ = writeln!(
            out,
            "{:>4}  {:<24} {:>8}",
            s.rank,
            s.player.name,
            rat_king_cell(s.score)
        );
    }
    out
}

pub fn format_conf_champ(board: &[Standing<i64>]) -> String {
    let mut out = format!("{:>4}  {:<24} {:>7}\n", "#", "Player", "Margin");
    for s in board {
        let _ = writeln!(out, "{:>4}  {:<24} {:>+7}", s.rank, s.player.name, s.score);
    }
    out
}

pub fn format_breakdown(b: &PlayerBreakdown) -> String {
    let mut out = format!(
        "{} <{}>{}\n",
        b.player.name,
        b.player.email,
        if b.player.paid { "" } else { " (unpaid)" }
    );
    let _ = writeln!(
        out,
        "{:<24} {:>4} {:>8} {:>6} {:>6}",
        "Team", "Tier", "Record", "Conf", "Points"
    );
    for line in &b.lines {
        let _ = writeln!(
            out,
            "{:<24} {:>4} {:>8} {:>6} {:>6}",
            line.team,
            tier_cell(line.tier),
            line.record,
            line.conf_record,
            line.points
        );
    }
    let _ = writeln!(
        out,
        "Main {} | Rat King {} | Conference {:+} | Wins {}",
        b.scores.main,
        rat_king_cell(b.scores.rat_king),
        b.scores.conf_margin,
        b.scores.total_wins
    );
    out
}

pub fn format_teams(rows: &[TeamOverviewRow]) -> String {
    let mut out = format!(
        "{:<24} {:>8} {:>6} {:>5} {:>4} {:>6}\n",
        "Team", "Record", "Conf", "Rank", "Tier", "Picked"
    );
    for row in rows {
        let t = &row.team;
        let _ = writeln!(
            out,
            "{:<24} {:>8} {:>6} {:>5} {:>4} {:>6}",
            t.name,
            t.record(),
            t.conf_record(),
            rank_cell(t.preseason_rank),
            tier_cell(t.tier),
            row.picked_by
        );
    }
    out
}

pub fn format_refresh(summary: &RefreshSummary) -> String {
    format!("Updated {} team records for {}.", summary.updated, summary.year)
}

pub fn format_rank_import(summary: &RankImportSummary, rejected_rows: &[RejectedRank]) -> String {
    let mut out = format!(
        "Wrote {} preseason ranks ({} unranked).\n",
        summary.written, summary.unranked
    );
    for (team, rank) in &summary.invalid {
        let _ = writeln!(out, "  rejected {team}: invalid rank {rank}");
    }
    for row in rejected_rows {
        let _ = writeln!(
            out,
            "  rejected line {} ({}): rank '{}' is not a number",
            row.line, row.team, row.value
        );
    }
    for team in &summary.unknown_teams {
        let _ = writeln!(out, "  unknown team: {team}");
    }
    out
}

pub fn format_violations(violations: &[Violation]) -> String {
    let mut out = format!("Submission rejected ({} problem(s)):\n", violations.len());
    for v in violations {
        let _ = writeln!(out, "  - {v}");
    }
    out
}

pub fn format_receipt(receipt: &SubmissionReceipt) -> String {
    format!(
        "{} {} picks for {} <{}> at {}.",
        if receipt.resubmission { "Replaced" } else { "Recorded" },
        receipt.picks.len(),
        receipt.player.name,
        receipt.player.email,
        receipt.submitted_at.format("%Y-%m-%d %H:%M UTC")
    )
}
