use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Decimal, Uint128};

use crate::state::Config;

#[cw_serde]
pub struct InstantiateMsg {
    pub core_code_id: u64,
    pub voting_code_id: u64,
    pub token_code_id: u64,
    pub wrapper_code_id: u64,
}

#[cw_serde]
pub struct DaoSettings {
    /// Unique across DAOs created by this factory.
    pub name: String,
    pub metadata: Binary,
}

#[cw_serde]
pub struct TokenSettings {
    /// Wrap an existing cw20 token instead of creating one. Holders
    /// get voting power by depositing into the wrapper.
    pub address: Option<String>,
    /// Name and symbol of the new token, or of the wrapper.
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// Initial balances for a new token. `receivers[i]` gets `amounts[i]`.
#[cw_serde]
pub struct MintSettings {
    pub receivers: Vec<String>,
    pub amounts: Vec<Uint128>,
}

#[cw_serde]
pub struct VotingSettings {
    pub support_threshold: Decimal,
    pub min_participation: Decimal,
    pub min_duration: u64,
    /// If true anyone may create proposals. Otherwise only the DAO
    /// itself may.
    pub open_proposal_creation: bool,
}

#[cw_serde]
pub enum ExecuteMsg {
    NewDao {
        dao: DaoSettings,
        token: TokenSettings,
        mint: MintSettings,
        voting: VotingSettings,
    },
}

#[cw_serde]
pub struct DaoEntry {
    pub name: String,
    pub dao: Addr,
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(Config)]
    Config {},
    /// The core contract registered under `name`, if any.
    #[returns(Option<Addr>)]
    DaoAddress { name: String },
    #[returns(Vec<DaoEntry>)]
    ListDaos {
        start_after: Option<String>,
        limit: Option<u32>,
    },
}

#[cw_serde]
pub struct MigrateMsg {}
