use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Binary;
use cw_utils::Expiration;

use crate::state::Config;

#[cw_serde]
pub struct InstantiateMsg {
    pub dao: String,
    pub expiration: Expiration,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Only callable by the DAO.
    SetExpiration { expiration: Expiration },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(bool)]
    IsAuthorized {
        target: String,
        bearer: String,
        permission_id: String,
        data: Option<Binary>,
    },
    #[returns(Config)]
    Config {},
}

#[cw_serde]
pub struct MigrateMsg {}
