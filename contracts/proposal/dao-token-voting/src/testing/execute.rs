use cosmwasm_std::{from_json, Addr, Binary, Timestamp};
use cw_multi_test::{App, AppResponse, Executor};
use dao_interface::state::Action;
use dao_voting::voting::Vote;

use crate::msg::ExecuteMsg;

/// An action asking the test target to store `value`.
pub(crate) fn set_value_action(target: &Addr, value: &str) -> Action {
    Action::wasm(
        target.as_str(),
        &dao_action_target::msg::ExecuteMsg::SetValue {
            value: value.to_string(),
        },
        vec![],
    )
    .unwrap()
}

#[derive(Default)]
pub(crate) struct ProposalOptions {
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub early_execution: bool,
    pub vote_replacement: bool,
}

pub(crate) fn create_proposal(
    app: &mut App,
    voting: &Addr,
    sender: &str,
    actions: Vec<Action>,
    options: ProposalOptions,
) -> anyhow::Result<u64> {
    let res = app.execute_contract(
        Addr::unchecked(sender),
        voting.clone(),
        &ExecuteMsg::CreateProposal {
            metadata: Binary::from(b"ipfs://proposal"),
            actions,
            start_date: options.start_date,
            end_date: options.end_date,
            early_execution: options.early_execution,
            vote_replacement: options.vote_replacement,
        },
        &[],
    )?;
    Ok(from_json(res.data.unwrap())?)
}

/// Creates a proposal with default dates that stores `value` on the
/// test target.
pub(crate) fn make_proposal(
    app: &mut App,
    voting: &Addr,
    target: &Addr,
    value: &str,
    options: ProposalOptions,
) -> u64 {
    create_proposal(
        app,
        voting,
        super::CREATOR_ADDR,
        vec![set_value_action(target, value)],
        options,
    )
    .unwrap()
}

pub(crate) fn vote(
    app: &mut App,
    voting: &Addr,
    voter: &str,
    proposal_id: u64,
    option: Vote,
    execute_if_decided: bool,
) -> anyhow::Result<AppResponse> {
    app.execute_contract(
        Addr::unchecked(voter),
        voting.clone(),
        &ExecuteMsg::Vote {
            proposal_id,
            option,
            execute_if_decided,
        },
        &[],
    )
}

pub(crate) fn execute_proposal(
    app: &mut App,
    voting: &Addr,
    sender: &str,
    proposal_id: u64,
) -> anyhow::Result<AppResponse> {
    app.execute_contract(
        Addr::unchecked(sender),
        voting.clone(),
        &ExecuteMsg::Execute { proposal_id },
        &[],
    )
}

/// Moves block time forward by `seconds`.
pub(crate) fn advance_time(app: &mut App, seconds: u64) {
    app.update_block(|block| {
        block.height += 1;
        block.time = block.time.plus_seconds(seconds);
    });
}
