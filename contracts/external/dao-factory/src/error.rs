use cosmwasm_std::StdError;
use cw_utils::ParseReplyError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    ParseReplyError(#[from] ParseReplyError),

    #[error(transparent)]
    ThresholdError(#[from] dao_voting::threshold::ThresholdError),

    #[error("name already in use")]
    NameTaken { name: String },

    #[error("dao name can not be empty")]
    EmptyName {},

    #[error("got ({receivers}) mint receivers and ({amounts}) amounts")]
    MintMismatch { receivers: usize, amounts: usize },

    #[error("can not mint when using an existing token")]
    MintWithExistingToken {},

    #[error("factory still holds root permission on the dao")]
    FactoryStillRoot {},

    #[error("voting contract can not execute on the dao")]
    VotingCannotExecute {},

    #[error("no dao is being created")]
    NoPendingDao {},

    #[error("received a reply with an unknown ID: ({id})")]
    UnknownReplyID { id: u64 },
}
