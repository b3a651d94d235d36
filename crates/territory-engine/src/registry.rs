//! # Territory Registry
//!
//! A postal code listed by an active client is that client's exclusive
//! territory. No other active client may schedule events there.
//!
//! ## Rules
//!
//! - Inactive clients never block anyone.
//! - A client may always use a code it already lists, even when stored data
//!   has another active client listing the same code (idempotent
//!   re-assignment).
//! - An unknown client is refused.
//!
//! The data model does not hard-enforce exclusivity, so [`contested_codes`]
//! exists to surface codes that several active clients list at once.

use std::collections::BTreeMap;

use territory_core::{Client, ClientId, PostalCode};

use crate::error::TerritoryViolation;

/// Whether `client_id` may use `postal_code`.
pub fn may_assign(client_id: ClientId, postal_code: &PostalCode, clients: &[Client]) -> bool {
    check_assignment(client_id, postal_code, clients).is_ok()
}

/// Same decision as [`may_assign`], with the reason on refusal.
pub fn check_assignment(
    client_id: ClientId,
    postal_code: &PostalCode,
    clients: &[Client],
) -> Result<(), TerritoryViolation> {
    let Some(client) = clients.iter().find(|c| c.id == client_id) else {
        return Err(TerritoryViolation::UnknownClient(client_id));
    };

    if client.owns(postal_code) {
        return Ok(());
    }

    match other_active_holder(client_id, postal_code, clients) {
        Some(holder) => Err(TerritoryViolation::ClaimedByOther {
            postal_code: postal_code.clone(),
            holder: holder.id,
            holder_name: holder.name.clone(),
        }),
        None => Ok(()),
    }
}

/// Check that none of `codes` is held by an active client other than
/// `client_id`. Used when an active client is saved with new codes, so the
/// client itself need not be in `clients` yet.
///
/// Returns the first violation in `codes` order.
pub fn check_new_claims(
    client_id: ClientId,
    codes: &[PostalCode],
    clients: &[Client],
) -> Result<(), TerritoryViolation> {
    for code in codes {
        if let Some(holder) = other_active_holder(client_id, code, clients) {
            return Err(TerritoryViolation::ClaimedByOther {
                postal_code: code.clone(),
                holder: holder.id,
                holder_name: holder.name.clone(),
            });
        }
    }
    Ok(())
}

/// The exclusive territory map: each actively claimed code and its holder.
///
/// When stored data lists a code under several active clients, the first one
/// wins here; see [`contested_codes`].
pub fn active_claims(clients: &[Client]) -> BTreeMap<PostalCode, ClientId> {
    let mut claims = BTreeMap::new();
    for client in clients.iter().filter(|c| c.is_active()) {
        for code in &client.postal_codes {
            claims.entry(code.clone()).or_insert(client.id);
        }
    }
    claims
}

/// Codes listed by more than one active client, with every active holder in
/// client order.
pub fn contested_codes(clients: &[Client]) -> BTreeMap<PostalCode, Vec<ClientId>> {
    let mut holders: BTreeMap<PostalCode, Vec<ClientId>> = BTreeMap::new();
    for client in clients.iter().filter(|c| c.is_active()) {
        for code in client.distinct_postal_codes() {
            holders.entry(code.clone()).or_default().push(client.id);
        }
    }
    holders.retain(|code, ids| {
        let contested = ids.len() > 1;
        if contested {
            tracing::warn!(postal_code = %code, holders = ids.len(), "postal code is contested");
        }
        contested
    });
    holders
}

fn other_active_holder<'a>(
    client_id: ClientId,
    postal_code: &PostalCode,
    clients: &'a [Client],
) -> Option<&'a Client> {
    clients
        .iter()
        .find(|c| c.id != client_id && c.is_active() && c.owns(postal_code))
}
