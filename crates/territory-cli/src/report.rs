//! # Reports
//!
//! `territory conflicts` lists every conflicting pair with the distance
//! between the two events, then any postal codes listed by more than one
//! active client. `territory stats` prints the four summary counts.
//!
//! Both accept `--json` for machine-readable output.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use territory_core::{EventId, PostalCode};
use territory_engine::{Statistics, TerritoryBook};
use territory_geo::distance_miles;

use crate::Context;

/// Arguments for the `territory conflicts` subcommand.
#[derive(Args, Debug)]
pub struct ConflictsArgs {
    /// Emit JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `territory stats` subcommand.
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Emit JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// One conflicting pair, as reported.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConflictLine {
    /// First event (smaller id).
    pub first: EventId,
    /// First event name.
    pub first_name: String,
    /// Second event.
    pub second: EventId,
    /// Second event name.
    pub second_name: String,
    /// Great-circle distance between the two events in miles.
    pub distance_miles: f64,
}

/// Full conflict report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConflictReport {
    /// Every conflicting pair.
    pub pairs: Vec<ConflictLine>,
    /// Postal codes claimed by several active clients, with holder names.
    pub contested: Vec<(PostalCode, Vec<String>)>,
}

impl ConflictReport {
    /// Build the report from a book.
    pub fn build(book: &TerritoryBook) -> Self {
        let pairs = book
            .conflict_pairs()
            .into_iter()
            .filter_map(|(a, b)| Some((book.event(a)?, book.event(b)?)))
            .map(|(a, b)| ConflictLine {
                first: a.id,
                first_name: a.name.clone(),
                second: b.id,
                second_name: b.name.clone(),
                distance_miles: distance_miles(a.coordinate, b.coordinate),
            })
            .collect();

        let contested = book
            .contested_codes()
            .into_iter()
            .map(|(code, holders)| {
                let names = holders
                    .iter()
                    .filter_map(|id| book.client(*id))
                    .map(|c| c.name.clone())
                    .collect();
                (code, names)
            })
            .collect();

        Self { pairs, contested }
    }
}

/// Execute the conflicts subcommand.
pub fn run_conflicts(args: &ConflictsArgs, ctx: &Context) -> Result<u8> {
    let book = ctx.load_book()?;
    let report = ConflictReport::build(&book);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(0);
    }

    if report.pairs.is_empty() {
        println!("No conflicts.");
    } else {
        println!(
            "{} conflict(s) within {} miles:",
            report.pairs.len(),
            ctx.rule.radius_miles
        );
        for line in &report.pairs {
            println!(
                "  {} <-> {}  ({:.1} mi)",
                line.first_name, line.second_name, line.distance_miles
            );
        }
    }

    for (code, holders) in &report.contested {
        println!(
            "CONTESTED: {code} is listed by active clients {}",
            holders.join(", ")
        );
    }
    Ok(0)
}

/// Execute the stats subcommand.
pub fn run_stats(args: &StatsArgs, ctx: &Context) -> Result<u8> {
    let book = ctx.load_book()?;
    let stats: Statistics = book.statistics();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(0);
    }

    println!("Active events:   {}", stats.active_events);
    println!("Conflicts:       {}", stats.conflict_pairs);
    println!("Active clients:  {}", stats.active_clients);
    println!("Postal codes:    {}", stats.claimed_postal_codes);
    Ok(0)
}
