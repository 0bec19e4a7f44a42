use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Binary, Uint128};
use cw_storage_plus::{Item, Map};
use dao_voting::threshold::VoteSettings;

use crate::msg::TokenSettings;

#[cw_serde]
pub struct Config {
    pub core_code_id: u64,
    pub voting_code_id: u64,
    pub token_code_id: u64,
    /// Wraps an existing cw20 token given in `TokenSettings::address`.
    pub wrapper_code_id: u64,
}

/// A DAO in the middle of being created. Exists only while a `NewDao`
/// message is being processed.
#[cw_serde]
pub struct PendingDao {
    pub name: String,
    pub creator: Addr,
    pub metadata: Binary,
    pub token_settings: TokenSettings,
    pub initial_balances: Vec<(Addr, Uint128)>,
    pub vote_settings: VoteSettings,
    pub open_proposal_creation: bool,
    pub core: Option<Addr>,
    pub token: Option<Addr>,
    pub voting: Option<Addr>,
}

pub const CONFIG: Item<Config> = Item::new("config");
/// Registered DAO names, case sensitive, mapped to the DAO's core
/// contract.
pub const REGISTRY: Map<&str, Addr> = Map::new("registry");
pub const PENDING: Item<PendingDao> = Item::new("pending");
