use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error(transparent)]
    Std(#[from] StdError),

    #[error("only the minter may do that")]
    Unauthorized {},

    #[error("amount must be non-zero")]
    ZeroAmount {},
}
