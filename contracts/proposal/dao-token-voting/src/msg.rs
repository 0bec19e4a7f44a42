use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Decimal, Timestamp};
use dao_interface::{query::InfoResponse, state::Action};
use dao_voting::{threshold::VoteSettings, voting::Vote};

use crate::query::{ProposalListResponse, ProposalResponse, VoteListResponse, VoteResponse};
use crate::state::Config;

#[cw_serde]
pub struct InstantiateMsg {
    /// The DAO this module creates and executes proposals for.
    pub dao: String,
    /// A token answering `PastVotes` and `PastTotalSupply`.
    pub token: String,
    pub settings: VoteSettings,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Creates a proposal. Requires `CREATE_PROPOSAL_PERMISSION` on
    /// this contract. The new proposal's id is returned as response
    /// data.
    CreateProposal {
        metadata: Binary,
        actions: Vec<Action>,
        /// Defaults to the current block time. May not be in the past.
        start_date: Option<Timestamp>,
        /// Defaults to `start_date + min_duration`, and may not be any
        /// earlier than that.
        end_date: Option<Timestamp>,
        /// Allows execution before the end date once the remaining
        /// voting power can no longer change the outcome.
        early_execution: bool,
        /// Allows voters to change their vote while the proposal is
        /// active.
        vote_replacement: bool,
    },
    /// Votes on an active proposal. If `execute_if_decided` is set and
    /// the vote makes the proposal executable, it is executed in the
    /// same transaction.
    Vote {
        proposal_id: u64,
        option: Vote,
        execute_if_decided: bool,
    },
    /// Executes a succeeded proposal. Callable by anyone.
    Execute { proposal_id: u64 },
    /// Changes the settings used for future proposals. Requires
    /// `MODIFY_CONFIG_PERMISSION` on this contract. Omitted fields are
    /// left unchanged.
    ChangeVoteConfig {
        support_threshold: Option<Decimal>,
        min_participation: Option<Decimal>,
        min_duration: Option<u64>,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(Config)]
    Config {},
    #[returns(Addr)]
    Dao {},
    #[returns(Addr)]
    Token {},
    #[returns(ProposalResponse)]
    Proposal { proposal_id: u64 },
    /// Lists proposals in ascending id order.
    #[returns(ProposalListResponse)]
    ListProposals {
        start_after: Option<u64>,
        limit: Option<u64>,
    },
    /// Lists proposals in descending id order.
    #[returns(ProposalListResponse)]
    ReverseProposals {
        start_before: Option<u64>,
        limit: Option<u64>,
    },
    #[returns(u64)]
    ProposalCount {},
    #[returns(VoteResponse)]
    GetVote { proposal_id: u64, voter: String },
    #[returns(VoteListResponse)]
    ListVotes {
        proposal_id: u64,
        start_after: Option<String>,
        limit: Option<u64>,
    },
    /// Whether `Execute` would succeed right now.
    #[returns(bool)]
    CanExecute { proposal_id: u64 },
    /// Whether `voter` may vote on the proposal right now.
    #[returns(bool)]
    CanVote { proposal_id: u64, voter: String },
    #[returns(InfoResponse)]
    Info {},
}

#[cw_serde]
pub struct MigrateMsg {}
