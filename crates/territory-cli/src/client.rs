//! # Client Subcommand
//!
//! - `add`: Create a client. Active clients may not claim codes held by
//!   another active client.
//! - `edit`: Change any field of an existing client.
//! - `activate` / `deactivate`: Flip status. Reactivation re-checks
//!   territory.
//! - `remove`: Delete a client and all of its events.
//! - `list`: One line per client.
//! - `show`: Full details of one client and its events.
//!
//! Postal code lists are comma-separated. Entries that are not five digits
//! are dropped with a notice, as the client form does.

use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};

use territory_core::{ClientId, ClientStatus, Color, PostalCode};
use territory_engine::ClientDraft;

use crate::Context;

/// Arguments for the `territory client` subcommand.
#[derive(Args, Debug)]
pub struct ClientArgs {
    #[command(subcommand)]
    pub command: ClientCommand,
}

/// Client subcommands.
#[derive(Subcommand, Debug)]
pub enum ClientCommand {
    /// Create a new client.
    Add {
        /// Client name.
        #[arg(long)]
        name: String,
        /// Contact email.
        #[arg(long, default_value = "")]
        email: String,
        /// Contact phone.
        #[arg(long, default_value = "")]
        phone: String,
        /// Assigned postal codes, comma-separated (e.g. "10001,10002").
        #[arg(long, default_value = "")]
        zips: String,
        /// Display color as #rrggbb. Random when omitted.
        #[arg(long)]
        color: Option<String>,
        /// Initial status.
        #[arg(long, default_value = "active")]
        status: ClientStatus,
    },

    /// Update an existing client. Omitted fields are unchanged.
    Edit {
        /// Client id.
        #[arg(long)]
        id: ClientId,
        /// New name.
        #[arg(long)]
        name: Option<String>,
        /// New contact email.
        #[arg(long)]
        email: Option<String>,
        /// New contact phone.
        #[arg(long)]
        phone: Option<String>,
        /// Replacement postal code list, comma-separated.
        #[arg(long)]
        zips: Option<String>,
        /// New display color as #rrggbb.
        #[arg(long)]
        color: Option<String>,
    },

    /// Mark a client active.
    Activate {
        /// Client id.
        #[arg(long)]
        id: ClientId,
    },

    /// Mark a client inactive, releasing its territory.
    Deactivate {
        /// Client id.
        #[arg(long)]
        id: ClientId,
    },

    /// Delete a client and all of its events.
    Remove {
        /// Client id.
        #[arg(long)]
        id: ClientId,
    },

    /// List all clients.
    List,

    /// Show one client with its events.
    Show {
        /// Client id.
        #[arg(long)]
        id: ClientId,
    },
}

/// Execute the client subcommand.
pub fn run_client(args: &ClientArgs, ctx: &Context) -> Result<u8> {
    match &args.command {
        ClientCommand::Add {
            name,
            email,
            phone,
            zips,
            color,
            status,
        } => {
            let mut draft = ClientDraft::new(name.clone(), parse_zips(zips));
            draft.contact_email = email.clone();
            draft.contact_phone = phone.clone();
            draft.color = color.as_deref().map(parse_color).transpose()?;
            draft.status = *status;
            cmd_save(ctx, draft)
        }

        ClientCommand::Edit {
            id,
            name,
            email,
            phone,
            zips,
            color,
        } => {
            let book = ctx.load_book()?;
            let client = book
                .client(*id)
                .with_context(|| format!("client not found: {id}"))?;
            let mut draft = ClientDraft::from_client(client);
            if let Some(name) = name {
                draft.name = name.clone();
            }
            if let Some(email) = email {
                draft.contact_email = email.clone();
            }
            if let Some(phone) = phone {
                draft.contact_phone = phone.clone();
            }
            if let Some(zips) = zips {
                draft.postal_codes = parse_zips(zips);
            }
            if let Some(color) = color {
                draft.color = Some(parse_color(color)?);
            }
            cmd_save(ctx, draft)
        }

        ClientCommand::Activate { id } => cmd_set_status(ctx, *id, ClientStatus::Active),
        ClientCommand::Deactivate { id } => cmd_set_status(ctx, *id, ClientStatus::Inactive),
        ClientCommand::Remove { id } => cmd_remove(ctx, *id),
        ClientCommand::List => cmd_list(ctx),
        ClientCommand::Show { id } => cmd_show(ctx, *id),
    }
}

fn parse_zips(list: &str) -> Vec<PostalCode> {
    let (codes, dropped) = PostalCode::parse_list(list);
    for entry in &dropped {
        println!("NOTE: ignoring invalid postal code {entry:?}");
    }
    codes
}

fn parse_color(value: &str) -> Result<Color> {
    Color::new(value).with_context(|| format!("invalid --color {value:?}"))
}

fn cmd_save(ctx: &Context, draft: ClientDraft) -> Result<u8> {
    let updating = draft.id.is_some();
    let mut book = ctx.load_book()?;
    let id = book.upsert_client(draft, crate::today())?;
    ctx.save_book(&book)?;

    let verb = if updating { "updated" } else { "created" };
    println!("OK: {verb} client {id}");
    Ok(0)
}

fn cmd_set_status(ctx: &Context, id: ClientId, status: ClientStatus) -> Result<u8> {
    let mut book = ctx.load_book()?;
    book.set_client_status(id, status)?;
    ctx.save_book(&book)?;
    println!("OK: client {id} is now {status}");
    Ok(0)
}

fn cmd_remove(ctx: &Context, id: ClientId) -> Result<u8> {
    let mut book = ctx.load_book()?;
    let removal = book.remove_client(id)?;
    ctx.save_book(&book)?;
    println!(
        "OK: removed client {} ({}) and {} event(s)",
        id, removal.client.name, removal.removed_events
    );
    Ok(0)
}

fn cmd_list(ctx: &Context) -> Result<u8> {
    let book = ctx.load_book()?;
    if book.clients().is_empty() {
        println!("No clients.");
        return Ok(0);
    }
    for client in book.clients() {
        let codes: Vec<&str> = client.postal_codes.iter().map(PostalCode::as_str).collect();
        println!(
            "{}  {:<8}  {}  [{}]  {} event(s)",
            client.id,
            client.status,
            client.name,
            codes.join(", "),
            book.events_for_client(client.id).len()
        );
    }
    Ok(0)
}

fn cmd_show(ctx: &Context, id: ClientId) -> Result<u8> {
    let book = ctx.load_book()?;
    let client = book
        .client(id)
        .with_context(|| format!("client not found: {id}"))?;

    println!("Client: {}", client.name);
    println!("  Id: {}", client.id);
    println!("  Status: {}", client.status);
    println!("  Email: {}", client.contact_email);
    println!("  Phone: {}", client.contact_phone);
    println!("  Color: {}", client.color);
    println!("  Created: {}", client.created_on);
    let codes: Vec<&str> = client.postal_codes.iter().map(PostalCode::as_str).collect();
    println!("  Postal codes: {}", codes.join(", "));

    let events = book.events_for_client(id);
    println!("  Events: {}", events.len());
    for event in events {
        println!(
            "    {} {} @ {} [{}] {} conflict(s)",
            event.schedule,
            event.name,
            event.postal_code,
            event.status,
            event.conflicts.len()
        );
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    fn add(ctx: &Context, name: &str, zips: &str) -> Result<u8> {
        run_client(
            &ClientArgs {
                command: ClientCommand::Add {
                    name: name.to_string(),
                    email: String::new(),
                    phone: String::new(),
                    zips: zips.to_string(),
                    color: None,
                    status: ClientStatus::Active,
                },
            },
            ctx,
        )
    }

    fn only_client(ctx: &Context) -> territory_core::Client {
        let book = ctx.load_book().unwrap();
        assert_eq!(book.clients().len(), 1);
        book.clients()[0].clone()
    }

    #[test]
    fn client_add_persists() {
        let (_dir, ctx) = testing::context();
        assert_eq!(add(&ctx, "Acme", "10001, 10002").unwrap(), 0);

        let client = only_client(&ctx);
        assert_eq!(client.name, "Acme");
        assert_eq!(client.postal_codes.len(), 2);
        assert!(client.is_active());
    }

    #[test]
    fn client_add_drops_invalid_zips() {
        let (_dir, ctx) = testing::context();
        add(&ctx, "Acme", "10001,abc,123456").unwrap();
        assert_eq!(only_client(&ctx).postal_codes.len(), 1);
    }

    #[test]
    fn client_add_rejects_held_territory() {
        let (_dir, ctx) = testing::context();
        add(&ctx, "Acme", "10001").unwrap();
        let err = add(&ctx, "Rival", "10001").unwrap_err();
        assert!(format!("{err:#}").contains("10001"));
        assert_eq!(ctx.load_book().unwrap().clients().len(), 1);
    }

    #[test]
    fn client_add_rejects_bad_color() {
        let (_dir, ctx) = testing::context();
        let args = ClientArgs {
            command: ClientCommand::Add {
                name: "Acme".to_string(),
                email: String::new(),
                phone: String::new(),
                zips: String::new(),
                color: Some("blue".to_string()),
                status: ClientStatus::Active,
            },
        };
        assert!(run_client(&args, &ctx).is_err());
    }

    #[test]
    fn client_edit_changes_only_given_fields() {
        let (_dir, ctx) = testing::context();
        add(&ctx, "Acme", "10001").unwrap();
        let before = only_client(&ctx);

        let args = ClientArgs {
            command: ClientCommand::Edit {
                id: before.id,
                name: None,
                email: Some("hello@acme.com".to_string()),
                phone: None,
                zips: Some("10001,10005".to_string()),
                color: Some("#FF0000".to_string()),
            },
        };
        run_client(&args, &ctx).unwrap();

        let after = only_client(&ctx);
        assert_eq!(after.name, "Acme");
        assert_eq!(after.contact_email, "hello@acme.com");
        assert_eq!(after.postal_codes.len(), 2);
        assert_eq!(after.color.as_str(), "#ff0000");
        assert_eq!(after.created_on, before.created_on);
    }

    #[test]
    fn client_deactivate_then_activate() {
        let (_dir, ctx) = testing::context();
        add(&ctx, "Acme", "10001").unwrap();
        let id = only_client(&ctx).id;

        let deactivate = ClientArgs {
            command: ClientCommand::Deactivate { id },
        };
        run_client(&deactivate, &ctx).unwrap();
        assert_eq!(only_client(&ctx).status, ClientStatus::Inactive);

        let activate = ClientArgs {
            command: ClientCommand::Activate { id },
        };
        run_client(&activate, &ctx).unwrap();
        assert_eq!(only_client(&ctx).status, ClientStatus::Active);
    }

    #[test]
    fn client_remove_unknown_fails() {
        let (_dir, ctx) = testing::context();
        let args = ClientArgs {
            command: ClientCommand::Remove { id: ClientId::new() },
        };
        let err = run_client(&args, &ctx).unwrap_err();
        assert!(format!("{err}").contains("client not found"));
    }

    #[test]
    fn client_list_and_show() {
        let (_dir, ctx) = testing::context();
        let list = ClientArgs {
            command: ClientCommand::List,
        };
        assert_eq!(run_client(&list, &ctx).unwrap(), 0);

        add(&ctx, "Acme", "10001").unwrap();
        assert_eq!(run_client(&list, &ctx).unwrap(), 0);

        let show = ClientArgs {
            command: ClientCommand::Show {
                id: only_client(&ctx).id,
            },
        };
        assert_eq!(run_client(&show, &ctx).unwrap(), 0);
    }
}
