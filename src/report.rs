//! Human-readable rendering of optimised plans.

use std::fmt::Write;

use crate::catalog::Player;
use crate::model::{PeriodPlan, PlanEntry, RosterPlan};

const NAME_WIDTH: usize = 20;

fn truncate(name: &str) -> String {
    if name.chars().count() > NAME_WIDTH {
        let mut short: String = name.chars().take(NAME_WIDTH - 3).collect();
        short.push_str("...");
        short
    } else {
        name.to_string()
    }
}

fn header(out: &mut String) {
    let _ = writeln!(
        out,
        "{:>3} {:<6} {:<16} {:<4} {:<20} {:>6} {:>7}",
        "#", "ID", "Team", "Pos", "Name", "Price", "Pts"
    );
}

fn entry_row(out: &mut String, rank: usize, entry: &PlanEntry) {
    let name = if entry.is_captain {
        truncate(&format!("{} (c)", entry.name))
    } else {
        truncate(&entry.name)
    };
    let _ = writeln!(
        out,
        "{:>3} {:<6} {:<16} {:<4} {:<20} {:>6.1} {:>7.2}",
        rank,
        entry.id.to_string(),
        entry.team,
        entry.position.to_string(),
        name,
        entry.price,
        entry.scored_points()
    );
}

fn transfer_lines(out: &mut String, period: &PeriodPlan) {
    if period.transfers_out.is_empty() && period.transfers_in.is_empty() {
        return;
    }
    for entry in &period.transfers_out {
        let _ = writeln!(out, "OUT: {}", entry.name);
    }
    for entry in &period.transfers_in {
        let _ = writeln!(out, "IN: {}", entry.name);
    }
    out.push('\n');
}

/// Render one gameweek: transfers, line-up then bench, cost and points.
pub fn render_period(period: &PeriodPlan) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "GW {}", period.gameweek);
    transfer_lines(&mut out, period);

    header(&mut out);
    for (rank, entry) in period.squad().enumerate() {
        entry_row(&mut out, rank + 1, entry);
    }

    let _ = writeln!(out, "\nCost: £{:.1}m", period.squad_value);
    let _ = writeln!(
        out,
        "Points: {:.2} (+{:.2} on the bench)",
        period.points(),
        period.bench_points
    );
    out
}

/// Render a full plan with a closing horizon total, preceded by the current
/// squad when the plan starts from one.
pub fn render_plan(plan: &RosterPlan) -> String {
    let mut out = String::new();
    if let Some(held) = &plan.current_squad {
        out.push_str("CURRENT SQUAD\n");
        out.push_str(&render_squad(&held.players, held.bank));
        out.push('\n');
    }
    for period in &plan.periods {
        out.push_str(&render_period(period));
        out.push('\n');
    }

    if let (Some(first), Some(last)) = (plan.first_gameweek(), plan.last_gameweek()) {
        let _ = writeln!(
            out,
            "Total points from GW {}-{}: {:.2} (+{:.2} on the bench)",
            first, last, plan.total_starting_points, plan.total_bench_points
        );
    }
    out
}

/// Render a manager's current squad with its first-gameweek projections.
pub fn render_squad(players: &[Player], bank: f64) -> String {
    let mut out = String::new();
    header(&mut out);

    let mut sorted: Vec<&Player> = players.iter().collect();
    sorted.sort_by_key(|p| p.position);
    for (rank, player) in sorted.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3} {:<6} {:<16} {:<4} {:<20} {:>6.1} {:>7.2}",
            rank + 1,
            player.id.to_string(),
            player.team,
            player.position.to_string(),
            truncate(&player.name),
            player.sale_value,
            player.points_at(0)
        );
    }

    let value: f64 = players.iter().map(|p| p.sale_value).sum();
    let _ = writeln!(out, "\nSquad value: £{:.1}m, in the bank: £{:.1}m", value, bank);
    out
}
