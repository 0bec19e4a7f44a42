use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;
use cw2::ContractVersion;

use crate::state::PermissionAuthorizer;

#[cw_serde]
pub struct PermissionResponse {
    /// None if the permission was never granted or has been revoked.
    pub authorizer: Option<PermissionAuthorizer>,
}

#[cw_serde]
pub struct PermissionEntry {
    pub target: Addr,
    pub permission_id: String,
    pub bearer: Addr,
    pub authorizer: PermissionAuthorizer,
}

#[cw_serde]
pub struct InfoResponse {
    pub info: ContractVersion,
}
