use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::{Item, Map};
use dao_voting::{threshold::VoteSettings, voting::Vote};

use crate::proposal::TokenProposal;

/// A vote cast for a proposal.
#[cw_serde]
pub struct Ballot {
    /// The amount of voting power behind the vote.
    pub power: Uint128,
    /// The position.
    pub vote: Vote,
}

/// The voting module's configuration.
#[cw_serde]
pub struct Config {
    /// The DAO whose permission table gates this module and which
    /// executes passed proposals.
    pub dao: Addr,
    /// The snapshot token voting power is read from.
    pub token: Addr,
    /// Settings copied onto each new proposal.
    pub settings: VoteSettings,
}

pub const CONFIG: Item<Config> = Item::new("config");
/// The number of proposals that have been created.
pub const PROPOSAL_COUNT: Item<u64> = Item::new("proposal_count");
pub const PROPOSALS: Map<u64, TokenProposal> = Map::new("proposals");
pub const BALLOTS: Map<(u64, &Addr), Ballot> = Map::new("ballots");
