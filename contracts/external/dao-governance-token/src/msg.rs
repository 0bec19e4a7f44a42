use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Uint128;
use cw20::Cw20Coin;
use dao_interface::voting::{TotalPowerAtHeightResponse, VotingPowerAtHeightResponse};

#[cw_serde]
pub struct InstantiateMsg {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub initial_balances: Vec<Cw20Coin>,
    /// The account allowed to mint tokens. If None, the supply is fixed.
    pub minter: Option<String>,
}

#[cw_serde]
pub enum ExecuteMsg {
    Transfer { recipient: String, amount: Uint128 },
    Burn { amount: Uint128 },
    /// Only callable by the minter.
    Mint { recipient: String, amount: Uint128 },
    /// Only callable by the minter. Setting None fixes the supply.
    UpdateMinter { new_minter: Option<String> },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(cw20::BalanceResponse)]
    Balance { address: String },
    #[returns(cw20::TokenInfoResponse)]
    TokenInfo {},
    #[returns(Option<cw20::MinterResponse>)]
    Minter {},
    /// The balance of `address` at the end of block `height`.
    #[returns(VotingPowerAtHeightResponse)]
    PastVotes { address: String, height: u64 },
    /// The total supply at the end of block `height`.
    #[returns(TotalPowerAtHeightResponse)]
    PastTotalSupply { height: u64 },
}

#[cw_serde]
pub struct MigrateMsg {}
