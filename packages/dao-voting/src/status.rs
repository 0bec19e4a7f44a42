use cosmwasm_schema::cw_serde;

#[cw_serde]
#[derive(Copy)]
pub enum Status {
    /// Voting has not started yet.
    Pending,
    /// The proposal is open for voting.
    Active,
    /// The proposal has been decided in favor and may be executed.
    Succeeded,
    /// Voting closed without the proposal reaching its thresholds.
    Defeated,
    /// The proposal's actions have been executed by the DAO.
    Executed,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Pending => write!(f, "pending"),
            Status::Active => write!(f, "active"),
            Status::Succeeded => write!(f, "succeeded"),
            Status::Defeated => write!(f, "defeated"),
            Status::Executed => write!(f, "executed"),
        }
    }
}
