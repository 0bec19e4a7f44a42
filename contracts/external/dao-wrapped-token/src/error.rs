use cosmwasm_std::{Addr, StdError};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error(transparent)]
    Std(#[from] StdError),

    #[error("invalid token. got ({received}), expected ({expected})")]
    InvalidToken { received: Addr, expected: Addr },

    #[error("amount must be non-zero")]
    ZeroAmount {},
}
