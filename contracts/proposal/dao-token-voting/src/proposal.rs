use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Binary, BlockInfo, StdResult, Storage, Timestamp, Uint128};
use dao_interface::state::Action;
use dao_voting::status::Status;
use dao_voting::threshold::VoteSettings;
use dao_voting::voting::{compare_vote_count, Votes};

use crate::query::ProposalResponse;
use crate::state::PROPOSAL_COUNT;

#[cw_serde]
pub struct TokenProposal {
    /// The address that created this proposal.
    pub creator: Addr,
    pub metadata: Binary,
    /// Executed in order by the DAO should this proposal succeed.
    pub actions: Vec<Action>,
    pub early_execution: bool,
    pub vote_replacement: bool,
    /// Voting opens at this time.
    pub start_date: Timestamp,
    /// Voting closes at this time.
    pub end_date: Timestamp,
    /// Voting power is read at the end of this block, the one before
    /// the proposal was created.
    pub snapshot_height: u64,
    /// The token's total supply at `snapshot_height`.
    pub total_power: Uint128,
    pub votes: Votes,
    /// The module's settings when the proposal was created.
    pub settings: VoteSettings,
    pub executed: bool,
}

/// Returns the id for the next proposal and advances the counter.
/// Ids start at zero.
pub fn advance_proposal_id(store: &mut dyn Storage) -> StdResult<u64> {
    let id = PROPOSAL_COUNT.may_load(store)?.unwrap_or_default();
    PROPOSAL_COUNT.save(store, &(id + 1))?;
    Ok(id)
}

impl TokenProposal {
    pub fn into_response(self, block: &BlockInfo, id: u64) -> ProposalResponse {
        ProposalResponse {
            id,
            status: self.current_status(block),
            proposal: self,
        }
    }

    /// The proposal's status as of `block`. Statuses are never stored;
    /// they follow from the tallies, the dates, and `executed`.
    pub fn current_status(&self, block: &BlockInfo) -> Status {
        if self.executed {
            Status::Executed
        } else if block.time < self.start_date {
            Status::Pending
        } else if block.time < self.end_date {
            if self.early_execution && self.is_decided_early() {
                Status::Succeeded
            } else {
                Status::Active
            }
        } else if self.is_passed() {
            Status::Succeeded
        } else {
            Status::Defeated
        }
    }

    /// True if the proposal may be executed at `block`.
    pub fn can_execute(&self, block: &BlockInfo) -> bool {
        self.current_status(block) == Status::Succeeded
    }

    fn is_participation_met(&self) -> bool {
        compare_vote_count(
            self.votes.total(),
            self.total_power,
            self.settings.min_participation,
        )
    }

    /// Outcome once voting has closed: support is measured against the
    /// yes and no power actually cast.
    pub fn is_passed(&self) -> bool {
        let options = self.votes.yes + self.votes.no;
        if self.total_power.is_zero() || options.is_zero() {
            return false;
        }
        self.is_participation_met()
            && compare_vote_count(self.votes.yes, options, self.settings.support_threshold)
    }

    /// Outcome while voting is open: support must hold even if every
    /// voter who has not yet voted votes no.
    pub fn is_decided_early(&self) -> bool {
        if self.total_power.is_zero() {
            return false;
        }
        let options = self.total_power - self.votes.abstain;
        if options.is_zero() {
            return false;
        }
        self.is_participation_met()
            && compare_vote_count(self.votes.yes, options, self.settings.support_threshold)
    }
}
