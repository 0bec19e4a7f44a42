use cosmwasm_std::Addr;
use cw_multi_test::App;

use crate::{
    msg::QueryMsg,
    query::{ProposalListResponse, ProposalResponse, VoteListResponse, VoteResponse},
    state::Config,
};

pub(crate) fn query_config(app: &App, voting: &Addr) -> Config {
    app.wrap()
        .query_wasm_smart(voting, &QueryMsg::Config {})
        .unwrap()
}

pub(crate) fn query_proposal(app: &App, voting: &Addr, proposal_id: u64) -> ProposalResponse {
    app.wrap()
        .query_wasm_smart(voting, &QueryMsg::Proposal { proposal_id })
        .unwrap()
}

pub(crate) fn query_list_proposals(
    app: &App,
    voting: &Addr,
    start_after: Option<u64>,
    limit: Option<u64>,
) -> ProposalListResponse {
    app.wrap()
        .query_wasm_smart(voting, &QueryMsg::ListProposals { start_after, limit })
        .unwrap()
}

pub(crate) fn query_reverse_proposals(
    app: &App,
    voting: &Addr,
    start_before: Option<u64>,
    limit: Option<u64>,
) -> ProposalListResponse {
    app.wrap()
        .query_wasm_smart(
            voting,
            &QueryMsg::ReverseProposals {
                start_before,
                limit,
            },
        )
        .unwrap()
}

pub(crate) fn query_proposal_count(app: &App, voting: &Addr) -> u64 {
    app.wrap()
        .query_wasm_smart(voting, &QueryMsg::ProposalCount {})
        .unwrap()
}

pub(crate) fn query_vote(app: &App, voting: &Addr, proposal_id: u64, voter: &str) -> VoteResponse {
    app.wrap()
        .query_wasm_smart(
            voting,
            &QueryMsg::GetVote {
                proposal_id,
                voter: voter.to_string(),
            },
        )
        .unwrap()
}

pub(crate) fn query_list_votes(
    app: &App,
    voting: &Addr,
    proposal_id: u64,
    start_after: Option<String>,
    limit: Option<u64>,
) -> VoteListResponse {
    app.wrap()
        .query_wasm_smart(
            voting,
            &QueryMsg::ListVotes {
                proposal_id,
                start_after,
                limit,
            },
        )
        .unwrap()
}

pub(crate) fn query_can_execute(app: &App, voting: &Addr, proposal_id: u64) -> bool {
    app.wrap()
        .query_wasm_smart(voting, &QueryMsg::CanExecute { proposal_id })
        .unwrap()
}

pub(crate) fn query_can_vote(app: &App, voting: &Addr, proposal_id: u64, voter: &str) -> bool {
    app.wrap()
        .query_wasm_smart(
            voting,
            &QueryMsg::CanVote {
                proposal_id,
                voter: voter.to_string(),
            },
        )
        .unwrap()
}

pub(crate) fn query_target_value(app: &App, target: &Addr) -> Option<String> {
    app.wrap()
        .query_wasm_smart(target, &dao_action_target::msg::QueryMsg::Value {})
        .unwrap()
}
