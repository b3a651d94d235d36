//! # Event Subcommand
//!
//! - `add` / `edit`: Save an event. The client must be allowed to use the
//!   postal code. If the event would conflict with existing events the save
//!   is refused with exit code 2 and the conflicts are listed; `--force`
//!   saves anyway.
//! - `status`: Set an event's status.
//! - `remove`: Delete an event.
//! - `list`: Filterable event list.
//! - `show`: Full details of one event, including its conflicts.

use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};

use territory_core::{ClientId, DateRange, EventId, EventStatus, PostalCode};
use territory_engine::{CommitError, ConflictPolicy, EventDraft, EventFilter};

use crate::Context;

/// Exit code when a save is refused because of scheduling conflicts.
pub const EXIT_CONFLICT: u8 = 2;

/// Arguments for the `territory event` subcommand.
#[derive(Args, Debug)]
pub struct EventArgs {
    #[command(subcommand)]
    pub command: EventCommand,
}

/// Event subcommands.
#[derive(Subcommand, Debug)]
pub enum EventCommand {
    /// Create a new event.
    Add {
        /// Owning client id.
        #[arg(long)]
        client: ClientId,
        /// Event name.
        #[arg(long)]
        name: String,
        /// Postal code (5 digits).
        #[arg(long)]
        zip: PostalCode,
        /// First day, YYYY-MM-DD.
        #[arg(long)]
        start: String,
        /// Last day, YYYY-MM-DD. Defaults to the start date.
        #[arg(long)]
        end: Option<String>,
        /// Street address.
        #[arg(long)]
        address: Option<String>,
        /// Free-text notes.
        #[arg(long, default_value = "")]
        notes: String,
        /// Save even if the event conflicts with existing events.
        #[arg(long)]
        force: bool,
    },

    /// Update an existing event. Omitted fields are unchanged.
    Edit {
        /// Event id.
        #[arg(long)]
        id: EventId,
        /// New owning client id.
        #[arg(long)]
        client: Option<ClientId>,
        /// New name.
        #[arg(long)]
        name: Option<String>,
        /// New postal code.
        #[arg(long)]
        zip: Option<PostalCode>,
        /// New first day, YYYY-MM-DD.
        #[arg(long)]
        start: Option<String>,
        /// New last day, YYYY-MM-DD.
        #[arg(long)]
        end: Option<String>,
        /// New street address.
        #[arg(long)]
        address: Option<String>,
        /// New notes.
        #[arg(long)]
        notes: Option<String>,
        /// New status.
        #[arg(long)]
        status: Option<EventStatus>,
        /// Save even if the event conflicts with existing events.
        #[arg(long)]
        force: bool,
    },

    /// Set an event's status.
    Status {
        /// Event id.
        #[arg(long)]
        id: EventId,
        /// active, completed, or cancelled.
        #[arg(long)]
        status: EventStatus,
    },

    /// Delete an event.
    Remove {
        /// Event id.
        #[arg(long)]
        id: EventId,
    },

    /// List events.
    List {
        /// Match event names (case-insensitive) or postal codes.
        #[arg(long)]
        search: Option<String>,
        /// Only events of this client.
        #[arg(long)]
        client: Option<ClientId>,
        /// Only events with this status.
        #[arg(long)]
        status: Option<EventStatus>,
        /// Only active events.
        #[arg(long)]
        active_only: bool,
        /// Only events that have conflicts.
        #[arg(long)]
        conflicted: bool,
    },

    /// Show one event with its conflicts.
    Show {
        /// Event id.
        #[arg(long)]
        id: EventId,
    },
}

/// Execute the event subcommand.
pub fn run_event(args: &EventArgs, ctx: &Context) -> Result<u8> {
    match &args.command {
        EventCommand::Add {
            client,
            name,
            zip,
            start,
            end,
            address,
            notes,
            force,
        } => {
            let schedule = DateRange::parse(start, end.as_deref())?;
            let mut draft = EventDraft::new(*client, name.clone(), zip.clone(), schedule);
            draft.address = address.clone();
            draft.notes = notes.clone();
            cmd_submit(ctx, draft, *force)
        }

        EventCommand::Edit {
            id,
            client,
            name,
            zip,
            start,
            end,
            address,
            notes,
            status,
            force,
        } => {
            let book = ctx.load_book()?;
            let event = book
                .event(*id)
                .with_context(|| format!("event not found: {id}"))?;
            let mut draft = EventDraft::from_event(event);
            if let Some(client) = client {
                draft.client_id = *client;
            }
            if let Some(name) = name {
                draft.name = name.clone();
            }
            if let Some(zip) = zip {
                draft.postal_code = zip.clone();
            }
            if start.is_some() || end.is_some() {
                let start = start
                    .clone()
                    .unwrap_or_else(|| draft.schedule.start().to_string());
                let end = end.clone().unwrap_or_else(|| draft.schedule.end().to_string());
                draft.schedule = DateRange::parse(&start, Some(&end))?;
            }
            if let Some(address) = address {
                draft.address = Some(address.clone());
            }
            if let Some(notes) = notes {
                draft.notes = notes.clone();
            }
            if let Some(status) = status {
                draft.status = *status;
            }
            cmd_submit(ctx, draft, *force)
        }

        EventCommand::Status { id, status } => cmd_set_status(ctx, *id, *status),
        EventCommand::Remove { id } => cmd_remove(ctx, *id),

        EventCommand::List {
            search,
            client,
            status,
            active_only,
            conflicted,
        } => {
            let filter = EventFilter {
                search: search.clone(),
                client: *client,
                status: *status,
                active_only: *active_only,
            };
            cmd_list(ctx, &filter, *conflicted)
        }

        EventCommand::Show { id } => cmd_show(ctx, *id),
    }
}

fn cmd_submit(ctx: &Context, draft: EventDraft, force: bool) -> Result<u8> {
    let updating = draft.id.is_some();
    let policy = if force {
        ConflictPolicy::Proceed
    } else {
        ConflictPolicy::Abort
    };

    let mut book = ctx.load_book()?;
    let submission = match book.submit_event(draft, &ctx.geocoder, policy) {
        Ok(submission) => submission,
        Err(CommitError::SchedulingConflict { conflicts }) => {
            println!(
                "CONFLICT: this event overlaps {} existing event(s) within {} miles:",
                conflicts.len(),
                ctx.rule.radius_miles
            );
            for conflict in &conflicts {
                println!("  - {conflict}");
            }
            println!("Nothing saved. Re-run with --force to save anyway.");
            return Ok(EXIT_CONFLICT);
        }
        Err(e) => return Err(e.into()),
    };
    ctx.save_book(&book)?;

    let verb = if updating { "updated" } else { "created" };
    println!("OK: {verb} event {}", submission.id);
    if !submission.conflicts.is_empty() {
        println!(
            "WARNING: saved with {} conflict(s):",
            submission.conflicts.len()
        );
        for conflict in &submission.conflicts {
            println!("  - {conflict}");
        }
    }
    Ok(0)
}

fn cmd_set_status(ctx: &Context, id: EventId, status: EventStatus) -> Result<u8> {
    let mut book = ctx.load_book()?;
    book.set_event_status(id, status)?;
    ctx.save_book(&book)?;
    println!("OK: event {id} is now {status}");
    Ok(0)
}

fn cmd_remove(ctx: &Context, id: EventId) -> Result<u8> {
    let mut book = ctx.load_book()?;
    let event = book.remove_event(id)?;
    ctx.save_book(&book)?;
    println!("OK: removed event {id} ({})", event.name);
    Ok(0)
}

fn cmd_list(ctx: &Context, filter: &EventFilter, conflicted: bool) -> Result<u8> {
    let book = ctx.load_book()?;
    let events: Vec<_> = filter
        .apply(book.events())
        .into_iter()
        .filter(|e| !conflicted || e.has_conflicts())
        .collect();

    if events.is_empty() {
        println!("No events.");
        return Ok(0);
    }
    for event in events {
        let client = book
            .client(event.client_id)
            .map(|c| c.name.as_str())
            .unwrap_or("(unknown client)");
        let marker = if event.has_conflicts() { "!" } else { " " };
        println!(
            "{marker} {}  {:<9}  {}  {} @ {}  ({client})",
            event.id, event.status, event.schedule, event.name, event.postal_code
        );
    }
    Ok(0)
}

fn cmd_show(ctx: &Context, id: EventId) -> Result<u8> {
    let book = ctx.load_book()?;
    let event = book
        .event(id)
        .with_context(|| format!("event not found: {id}"))?;
    let client = book
        .client(event.client_id)
        .map(|c| c.name.as_str())
        .unwrap_or("(unknown client)");

    println!("Event: {}", event.name);
    println!("  Id: {}", event.id);
    println!("  Client: {client}");
    println!("  Status: {}", event.status);
    println!("  Dates: {}", event.schedule);
    println!("  Postal code: {}", event.postal_code);
    if let Some(address) = &event.address {
        println!("  Address: {address}");
    }
    println!("  Location: {}", event.coordinate);
    if !event.notes.is_empty() {
        println!("  Notes: {}", event.notes);
    }
    println!("  Conflicts: {}", event.conflicts.len());
    for other in event.conflicts.iter().filter_map(|c| book.event(*c)) {
        println!(
            "    {} @ {} ({})",
            other.name, other.postal_code, other.schedule
        );
    }
    Ok(0)
}
