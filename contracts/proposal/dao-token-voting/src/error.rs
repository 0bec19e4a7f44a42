use cosmwasm_std::{StdError, Timestamp};
use dao_voting::status::Status;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error(transparent)]
    Std(#[from] StdError),

    #[error(transparent)]
    ThresholdError(#[from] dao_voting::threshold::ThresholdError),

    #[error("unauthorized: token-voting requires permission {permission_id}")]
    Unauthorized { permission_id: String },

    #[error("no such proposal ({id})")]
    NoSuchProposal { id: u64 },

    #[error("proposal is ({size}) bytes, must be <= ({max}) bytes")]
    ProposalTooLarge { size: u64, max: u64 },

    #[error("proposal has ({count}) actions, must be <= ({max})")]
    TooManyActions { count: usize, max: usize },

    #[error("start date ({start}) is in the past")]
    StartInPast { start: Timestamp },

    #[error("end date must be at or after ({min_end})")]
    EndTooSoon { min_end: Timestamp },

    #[error("proposal dates are out of range")]
    InvalidDates {},

    #[error("early execution can not be combined with vote replacement")]
    EarlyExecutionWithReplacement {},

    #[error("proposal ({id}) is not active, status is ({status})")]
    NotActive { id: u64, status: Status },

    #[error("not registered to vote (no voting power) at time of proposal creation")]
    NotRegistered {},

    #[error("already voted. this proposal does not support vote replacement")]
    AlreadyVoted {},

    #[error("already cast a vote with that option. change your vote to revote")]
    AlreadyCast {},

    #[error("proposal already executed")]
    AlreadyExecuted {},

    #[error("proposal not decidable")]
    NotDecidable {},
}
