use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Binary};
use cw_storage_plus::{Item, Map};
use dao_interface::state::{Action, PermissionAuthorizer};

/// An action batch whose submessages are still being dispatched.
#[cw_serde]
pub struct PendingBatch {
    /// The account that requested execution.
    pub executor: Addr,
    pub actions: Vec<Action>,
    /// Data returned by the actions that have completed so far.
    pub results: Vec<Binary>,
}

/// Opaque metadata describing the DAO.
pub const METADATA: Item<Binary> = Item::new("metadata");

/// Contract answering signature validation queries for the DAO.
pub const SIGNATURE_VALIDATOR: Item<Option<Addr>> = Item::new("signature_validator");

/// The permission table, keyed by (target, permission, bearer). The
/// wildcard bearer is stored as `Addr::unchecked(ANY_ADDR)`.
pub const PERMISSIONS: Map<(&Addr, &str, &Addr), PermissionAuthorizer> = Map::new("permissions");

/// Identifier given to the next action batch. Wraps, as batches are
/// removed once their last action has replied.
pub const BATCH_COUNT: Item<u32> = Item::new("batch_count");

pub const PENDING_BATCHES: Map<u32, PendingBatch> = Map::new("pending_batches");
