use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Decimal, Deps, StdResult, Uint128, Uint256};
use dao_interface::voting::{
    Query as TokenQuery, TotalPowerAtHeightResponse, VotingPowerAtHeightResponse,
};

// Both sides of a comparison are scaled by this before the threshold
// is applied so that fractional thresholds do not truncate to zero.
const PRECISION_FACTOR: u128 = 10u128.pow(9);

#[cw_serde]
pub struct Votes {
    pub yes: Uint128,
    pub no: Uint128,
    pub abstain: Uint128,
}

#[cw_serde]
#[derive(Copy)]
pub enum Vote {
    /// Marks support for the proposal.
    Yes,
    /// Marks opposition to the proposal.
    No,
    /// Counts towards participation but not towards support.
    Abstain,
}

/// Whether `votes >= total_power * percentage`, computed without
/// rounding.
///
/// ```rust
/// use dao_voting::voting::compare_vote_count;
/// use cosmwasm_std::{Decimal, Uint128};
///
/// assert!(compare_vote_count(Uint128::new(7), Uint128::new(14), Decimal::percent(50)));
/// assert!(!compare_vote_count(Uint128::new(7), Uint128::new(15), Decimal::percent(50)));
/// ```
pub fn compare_vote_count(votes: Uint128, total_power: Uint128, percentage: Decimal) -> bool {
    let votes = votes.full_mul(PRECISION_FACTOR);
    let total_power = total_power.full_mul(PRECISION_FACTOR);
    let threshold = total_power.multiply_ratio(
        percentage.atomics(),
        Uint256::from(10u64).pow(percentage.decimal_places()),
    );
    votes >= threshold
}

impl Votes {
    /// Constructs an zero'd out votes struct.
    pub fn zero() -> Self {
        Self {
            yes: Uint128::zero(),
            no: Uint128::zero(),
            abstain: Uint128::zero(),
        }
    }

    /// Adds a vote to the votes.
    pub fn add_vote(&mut self, vote: Vote, power: Uint128) {
        match vote {
            Vote::Yes => self.yes += power,
            Vote::No => self.no += power,
            Vote::Abstain => self.abstain += power,
        }
    }

    /// Removes a vote from the votes. The vote being removed must
    /// have been previously added or this method will cause an
    /// overflow.
    pub fn remove_vote(&mut self, vote: Vote, power: Uint128) {
        match vote {
            Vote::Yes => self.yes -= power,
            Vote::No => self.no -= power,
            Vote::Abstain => self.abstain -= power,
        }
    }

    /// Computes the total number of votes cast.
    ///
    /// Every voter is counted once and power comes from a single token
    /// snapshot, so the sum can not exceed the token's total supply.
    pub fn total(&self) -> Uint128 {
        self.yes + self.no + self.abstain
    }
}

impl std::fmt::Display for Vote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Vote::Yes => write!(f, "yes"),
            Vote::No => write!(f, "no"),
            Vote::Abstain => write!(f, "abstain"),
        }
    }
}

/// Voting power of `address` at the end of block `height`.
pub fn get_past_votes(deps: Deps, token: &Addr, address: &Addr, height: u64) -> StdResult<Uint128> {
    let response: VotingPowerAtHeightResponse = deps.querier.query_wasm_smart(
        token,
        &TokenQuery::PastVotes {
            address: address.to_string(),
            height,
        },
    )?;
    Ok(response.power)
}

/// Total voting power at the end of block `height`.
pub fn get_past_total_supply(deps: Deps, token: &Addr, height: u64) -> StdResult<Uint128> {
    let response: TotalPowerAtHeightResponse = deps
        .querier
        .query_wasm_smart(token, &TokenQuery::PastTotalSupply { height })?;
    Ok(response.power)
}
