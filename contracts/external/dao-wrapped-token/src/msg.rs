use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Uint128};
use cw20::Cw20ReceiveMsg;
use dao_interface::voting::{TotalPowerAtHeightResponse, VotingPowerAtHeightResponse};

#[cw_serde]
pub struct InstantiateMsg {
    /// The cw20 token to wrap. Decimals are copied from it.
    pub token: String,
    pub name: String,
    pub symbol: String,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Deposits of the underlying token arrive here.
    Receive(Cw20ReceiveMsg),
    /// Burns wrapped tokens and returns the underlying tokens to the
    /// sender.
    Withdraw { amount: Uint128 },
    Transfer { recipient: String, amount: Uint128 },
}

#[cw_serde]
pub enum ReceiveMsg {
    Deposit {},
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(cw20::BalanceResponse)]
    Balance { address: String },
    #[returns(cw20::TokenInfoResponse)]
    TokenInfo {},
    #[returns(Addr)]
    Underlying {},
    /// The wrapped balance of `address` at the end of block `height`.
    #[returns(VotingPowerAtHeightResponse)]
    PastVotes { address: String, height: u64 },
    /// The wrapped supply at the end of block `height`.
    #[returns(TotalPowerAtHeightResponse)]
    PastTotalSupply { height: u64 },
}

#[cw_serde]
pub struct MigrateMsg {}
