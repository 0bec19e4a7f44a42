use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use dao_voting::{status::Status, voting::Vote};

use crate::proposal::TokenProposal;

/// Information about a proposal returned by proposal queries.
#[cw_serde]
pub struct ProposalResponse {
    pub id: u64,
    /// Computed from the block the query was made at.
    pub status: Status,
    pub proposal: TokenProposal,
}

/// A list of proposals returned by `ListProposals` and
/// `ReverseProposals`.
#[cw_serde]
pub struct ProposalListResponse {
    pub proposals: Vec<ProposalResponse>,
}

/// Information about a vote that was cast.
#[cw_serde]
pub struct VoteInfo {
    pub voter: Addr,
    pub vote: Vote,
    pub power: Uint128,
}

#[cw_serde]
pub struct VoteResponse {
    /// None if no such vote, Some otherwise.
    pub vote: Option<VoteInfo>,
}

#[cw_serde]
pub struct VoteListResponse {
    pub votes: Vec<VoteInfo>,
}
