use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary};

#[cw_serde]
pub struct InstantiateMsg {
    /// The DAO allowed to edit the list.
    pub dao: String,
    pub allowed: Vec<String>,
}

#[cw_serde]
pub enum ExecuteMsg {
    Allow { addr: String },
    Remove { addr: String },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Same shape as `dao_interface::authorizer::AuthorizerQueryMsg`.
    #[returns(bool)]
    IsAuthorized {
        target: String,
        bearer: String,
        permission_id: String,
        data: Option<Binary>,
    },
    #[returns(Addr)]
    Dao {},
    #[returns(Vec<Addr>)]
    ListAllowed {
        start_after: Option<String>,
        limit: Option<u32>,
    },
}

#[cw_serde]
pub struct MigrateMsg {}
