use cosmwasm_schema::cw_serde;
use cosmwasm_std::Decimal;

use thiserror::Error;

/// Longest allowed minimum voting duration, one year in seconds.
pub const MAX_DURATION: u64 = 365 * 24 * 60 * 60;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ThresholdError {
    #[error("Required threshold cannot be zero")]
    ZeroThreshold {},

    #[error("Not possible to reach required (passing) threshold")]
    UnreachableThreshold {},

    #[error("Minimum participation cannot be greater than 100%")]
    UnreachableParticipation {},

    #[error("Minimum voting duration cannot be zero")]
    ZeroDuration {},

    #[error("Minimum voting duration cannot be longer than ({max}) seconds")]
    DurationTooLong { max: u64 },
}

/// The rules a voting contract applies to the proposals created under
/// it. Proposals keep a copy of the settings they were created with.
#[cw_serde]
#[derive(Copy)]
pub struct VoteSettings {
    /// Share of the yes and no power that must vote yes. Abstentions
    /// do not count towards support.
    pub support_threshold: Decimal,
    /// Share of the total voting power that must vote, abstentions
    /// included. May be zero.
    pub min_participation: Decimal,
    /// Minimum number of seconds a proposal is open for voting.
    pub min_duration: u64,
}

impl VoteSettings {
    /// Validates the settings.
    ///
    /// - Support must be over 0% and at most 100%.
    /// - Participation must be at most 100%.
    /// - The minimum duration must be non-zero and at most a year.
    pub fn validate(&self) -> Result<(), ThresholdError> {
        if self.support_threshold.is_zero() {
            return Err(ThresholdError::ZeroThreshold {});
        }
        if self.support_threshold > Decimal::one() {
            return Err(ThresholdError::UnreachableThreshold {});
        }
        if self.min_participation > Decimal::one() {
            return Err(ThresholdError::UnreachableParticipation {});
        }
        if self.min_duration == 0 {
            return Err(ThresholdError::ZeroDuration {});
        }
        if self.min_duration > MAX_DURATION {
            return Err(ThresholdError::DurationTooLong { max: MAX_DURATION });
        }
        Ok(())
    }
}
