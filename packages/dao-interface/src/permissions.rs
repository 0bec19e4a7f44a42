use cosmwasm_std::{Addr, Binary, QuerierWrapper, StdResult};

use crate::msg::QueryMsg;

/// Bearer that matches every caller. Never a valid account address, so
/// it can not collide with a real bearer.
pub const ANY_ADDR: &str = "*";

/// Allows granting and revoking permissions on a target.
pub const ROOT_PERMISSION: &str = "ROOT_PERMISSION";
/// Allows executing a batch of actions through the DAO.
pub const EXECUTE_PERMISSION: &str = "EXECUTE_PERMISSION";
/// Allows replacing the DAO's metadata.
pub const SET_METADATA_PERMISSION: &str = "SET_METADATA_PERMISSION";
/// Allows moving funds out of the DAO's treasury.
pub const WITHDRAW_PERMISSION: &str = "WITHDRAW_PERMISSION";
/// Allows migrating the DAO contract to new code.
pub const UPGRADE_PERMISSION: &str = "UPGRADE_PERMISSION";
/// Allows setting the contract that validates signatures for the DAO.
pub const SET_SIGNATURE_VALIDATOR_PERMISSION: &str = "SET_SIGNATURE_VALIDATOR_PERMISSION";
/// Allows changing a voting contract's settings.
pub const MODIFY_CONFIG_PERMISSION: &str = "MODIFY_CONFIG_PERMISSION";
/// Allows creating proposals on a voting contract.
pub const CREATE_PROPOSAL_PERMISSION: &str = "CREATE_PROPOSAL_PERMISSION";

/// Asks the DAO at `dao` whether `bearer` holds `permission_id` on
/// `target`. Used by contracts whose privileged operations are gated
/// by a DAO's permission table.
pub fn query_has_permission(
    querier: &QuerierWrapper,
    dao: &Addr,
    target: &Addr,
    bearer: &Addr,
    permission_id: &str,
    data: Option<Binary>,
) -> StdResult<bool> {
    querier.query_wasm_smart(
        dao,
        &QueryMsg::HasPermission {
            target: target.to_string(),
            bearer: bearer.to_string(),
            permission_id: permission_id.to_string(),
            data,
        },
    )
}
