use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Binary;

/// Query a contract must answer to be used as a permission's
/// authorizer. Authorizer contracts include this variant, with the same
/// fields, in their own `QueryMsg`.
#[cw_serde]
#[derive(QueryResponses)]
pub enum AuthorizerQueryMsg {
    /// Whether `bearer` may use `permission_id` on `target` right now.
    /// `data` is whatever the checking contract chose to forward about
    /// the call being authorized.
    #[returns(bool)]
    IsAuthorized {
        target: String,
        bearer: String,
        permission_id: String,
        data: Option<Binary>,
    },
}

/// Query a signature validator set on a DAO must answer.
#[cw_serde]
#[derive(QueryResponses)]
pub enum SignatureValidatorQueryMsg {
    #[returns(bool)]
    IsValidSignature { hash: Binary, signature: Binary },
}
