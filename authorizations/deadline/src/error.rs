use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("only the dao can change the deadline")]
    Unauthorized {},

    #[error("expiration is already in the past")]
    AlreadyExpired {},
}
