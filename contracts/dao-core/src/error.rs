use cosmwasm_std::StdError;
use cw_utils::{ParseReplyError, PaymentError};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error(transparent)]
    Std(#[from] StdError),

    #[error(transparent)]
    ParseReplyError(#[from] ParseReplyError),

    #[error(transparent)]
    Payment(#[from] PaymentError),

    #[error("unauthorized: dao requires permission {permission_id}")]
    Unauthorized { permission_id: String },

    #[error("permission {permission_id} is already granted with authorizer ({current})")]
    PermissionAlreadySet {
        permission_id: String,
        current: String,
    },

    #[error("the DAO and the permission's target can not authorize the permission")]
    InvalidAuthorizer {},

    #[error("root permission can not be granted to every address")]
    RootForAnyone {},

    #[error("batch has more than ({max}) actions")]
    TooManyActions { max: usize },

    #[error("action ({index}) neither calls a contract nor transfers funds")]
    EmptyAction { index: usize },

    #[error("withdraw amount must be non-zero")]
    ZeroWithdraw {},

    #[error("received a reply for an unknown action batch: ({id})")]
    UnknownReplyID { id: u64 },
}
