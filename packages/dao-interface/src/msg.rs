use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Uint128};
use cw20::{Cw20ReceiveMsg, Denom};

use crate::query::{InfoResponse, PermissionEntry, PermissionResponse};
use crate::state::Action;

#[cw_serde]
pub struct InstantiateMsg {
    /// Opaque metadata describing the DAO, usually a JSON document or
    /// a content hash.
    pub metadata: Binary,
    /// An account granted `ROOT_PERMISSION` on the DAO when it is
    /// created, typically the factory wiring the DAO together. The
    /// DAO always grants itself root.
    pub initial_owner: Option<String>,
}

/// A single change applied by `ExecuteMsg::Bulk`.
#[cw_serde]
pub enum PermissionOperation {
    Grant {},
    GrantWithAuthorizer { authorizer: String },
    Revoke {},
}

#[cw_serde]
pub struct PermissionItem {
    pub operation: PermissionOperation,
    pub target: String,
    pub bearer: String,
    pub permission_id: String,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Allows `bearer` to use `permission_id` on `target`. The sender
    /// must hold `ROOT_PERMISSION` on `target` or on the DAO.
    Grant {
        target: String,
        bearer: String,
        permission_id: String,
    },
    /// As `Grant`, but the permission only resolves when `authorizer`
    /// approves the check.
    GrantWithAuthorizer {
        target: String,
        bearer: String,
        permission_id: String,
        authorizer: String,
    },
    /// Removes the permission. Revoking a permission that was never
    /// granted does nothing.
    Revoke {
        target: String,
        bearer: String,
        permission_id: String,
    },
    /// Applies a list of grants and revokes in order. Each item is
    /// authorized against the permissions left by the items before it.
    Bulk { items: Vec<PermissionItem> },
    /// Executes the actions in order, failing the whole batch if any
    /// of them fails. Requires `EXECUTE_PERMISSION`.
    Execute { actions: Vec<Action> },
    /// Replaces the DAO's metadata. Requires `SET_METADATA_PERMISSION`.
    SetMetadata { metadata: Binary },
    /// Sends treasury funds. Requires `WITHDRAW_PERMISSION`.
    Withdraw {
        token: Denom,
        to: String,
        amount: Uint128,
        reference: String,
    },
    /// Migrates the DAO contract. Requires `UPGRADE_PERMISSION` and the
    /// DAO being its own contract admin.
    Upgrade { new_code_id: u64, msg: Binary },
    /// Sets or clears the contract that validates signatures on the
    /// DAO's behalf. Requires `SET_SIGNATURE_VALIDATOR_PERMISSION`.
    SetSignatureValidator { validator: Option<String> },
    /// Deposits the native funds sent with the message.
    Deposit { reference: String },
    /// Deposits cw20 tokens.
    Receive(Cw20ReceiveMsg),
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Whether `bearer` currently holds `permission_id` on `target`,
    /// resolving the wildcard bearer and authorizer contracts.
    #[returns(bool)]
    HasPermission {
        target: String,
        bearer: String,
        permission_id: String,
        data: Option<Binary>,
    },
    /// The stored record for the exact triple, if any.
    #[returns(PermissionResponse)]
    GetPermission {
        target: String,
        bearer: String,
        permission_id: String,
    },
    /// Lists stored permission records ordered by target, permission,
    /// and bearer.
    #[returns(Vec<PermissionEntry>)]
    ListPermissions {
        start_after: Option<PermissionEntryKey>,
        limit: Option<u32>,
    },
    #[returns(Binary)]
    Metadata {},
    #[returns(Option<Addr>)]
    SignatureValidator {},
    /// Asks the signature validator, if one is set, whether
    /// `signature` is valid for `hash`.
    #[returns(bool)]
    IsValidSignature { hash: Binary, signature: Binary },
    #[returns(InfoResponse)]
    Info {},
}

/// Pagination key for `QueryMsg::ListPermissions`.
#[cw_serde]
pub struct PermissionEntryKey {
    pub target: String,
    pub permission_id: String,
    pub bearer: String,
}

#[cw_serde]
pub struct MigrateMsg {}
