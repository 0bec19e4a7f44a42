use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Uint128;

/// Snapshot queries a governance token answers. Heights must already
/// be in the past, and answers reflect the state at the end of that
/// block.
#[cw_serde]
#[derive(QueryResponses)]
pub enum Query {
    /// Returns the voting power for an address at a given height.
    #[returns(VotingPowerAtHeightResponse)]
    PastVotes { address: String, height: u64 },
    /// Returns the total voting power at a given height.
    #[returns(TotalPowerAtHeightResponse)]
    PastTotalSupply { height: u64 },
}

#[cw_serde]
pub struct VotingPowerAtHeightResponse {
    pub power: Uint128,
    pub height: u64,
}

#[cw_serde]
pub struct TotalPowerAtHeightResponse {
    pub power: Uint128,
    pub height: u64,
}
