#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Addr, Binary, Decimal, Deps, DepsMut, Env, Event, MessageInfo, Order,
    Response, StdResult, Timestamp, WasmMsg,
};
use cw2::set_contract_version;
use cw_storage_plus::Bound;
use dao_interface::permissions::{
    query_has_permission, CREATE_PROPOSAL_PERMISSION, MODIFY_CONFIG_PERMISSION,
};
use dao_interface::query::InfoResponse;
use dao_interface::state::{Action, MAX_ACTIONS};
use dao_voting::proposal::{DEFAULT_LIMIT, MAX_PROPOSAL_SIZE};
use dao_voting::status::Status;
use dao_voting::threshold::VoteSettings;
use dao_voting::voting::{get_past_total_supply, get_past_votes, Vote, Votes};

use crate::error::ContractError;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::proposal::{advance_proposal_id, TokenProposal};
use crate::query::{
    ProposalListResponse, ProposalResponse, VoteInfo, VoteListResponse, VoteResponse,
};
use crate::state::{Ballot, Config, BALLOTS, CONFIG, PROPOSALS, PROPOSAL_COUNT};

pub(crate) const CONTRACT_NAME: &str = "crates.io:dao-token-voting";
pub(crate) const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    msg.settings.validate()?;

    let config = Config {
        dao: deps.api.addr_validate(&msg.dao)?,
        token: deps.api.addr_validate(&msg.token)?,
        settings: msg.settings,
    };

    // Initialize proposal count to zero so that queries return zero
    // instead of None.
    PROPOSAL_COUNT.save(deps.storage, &0)?;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::default()
        .add_event(config_event(&config.settings, None))
        .add_attribute("action", "instantiate")
        .add_attribute("dao", config.dao)
        .add_attribute("token", config.token))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::CreateProposal {
            metadata,
            actions,
            start_date,
            end_date,
            early_execution,
            vote_replacement,
        } => execute_create_proposal(
            deps,
            env,
            info.sender,
            metadata,
            actions,
            start_date,
            end_date,
            early_execution,
            vote_replacement,
        ),
        ExecuteMsg::Vote {
            proposal_id,
            option,
            execute_if_decided,
        } => execute_vote(deps, env, info, proposal_id, option, execute_if_decided),
        ExecuteMsg::Execute { proposal_id } => execute_execute(deps, env, info, proposal_id),
        ExecuteMsg::ChangeVoteConfig {
            support_threshold,
            min_participation,
            min_duration,
        } => execute_change_vote_config(
            deps,
            env,
            info,
            support_threshold,
            min_participation,
            min_duration,
        ),
    }
}

/// Fails unless the DAO's permission table allows `sender` to use
/// `permission_id` on this contract.
fn assert_permission(
    deps: Deps,
    env: &Env,
    config: &Config,
    sender: &Addr,
    permission_id: &str,
) -> Result<(), ContractError> {
    let allowed = query_has_permission(
        &deps.querier,
        &config.dao,
        &env.contract.address,
        sender,
        permission_id,
        None,
    )?;
    if allowed {
        Ok(())
    } else {
        Err(ContractError::Unauthorized {
            permission_id: permission_id.to_string(),
        })
    }
}

fn config_event(settings: &VoteSettings, old: Option<&VoteSettings>) -> Event {
    let event = Event::new("update_config")
        .add_attribute("support_threshold", settings.support_threshold.to_string())
        .add_attribute("min_participation", settings.min_participation.to_string())
        .add_attribute("min_duration", settings.min_duration.to_string());
    match old {
        Some(old) => event
            .add_attribute("old_support_threshold", old.support_threshold.to_string())
            .add_attribute("old_min_participation", old.min_participation.to_string())
            .add_attribute("old_min_duration", old.min_duration.to_string()),
        None => event,
    }
}

#[allow(clippy::too_many_arguments)]
pub fn execute_create_proposal(
    deps: DepsMut,
    env: Env,
    sender: Addr,
    metadata: Binary,
    actions: Vec<Action>,
    start_date: Option<Timestamp>,
    end_date: Option<Timestamp>,
    early_execution: bool,
    vote_replacement: bool,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    assert_permission(
        deps.as_ref(),
        &env,
        &config,
        &sender,
        CREATE_PROPOSAL_PERMISSION,
    )?;

    // A replaced vote could undo an early decision after the fact.
    if early_execution && vote_replacement {
        return Err(ContractError::EarlyExecutionWithReplacement {});
    }
    if actions.len() > MAX_ACTIONS {
        return Err(ContractError::TooManyActions {
            count: actions.len(),
            max: MAX_ACTIONS,
        });
    }

    let start_date = start_date.unwrap_or(env.block.time);
    if start_date < env.block.time {
        return Err(ContractError::StartInPast { start: start_date });
    }
    let min_end = config
        .settings
        .min_duration
        .checked_mul(1_000_000_000)
        .and_then(|duration| start_date.nanos().checked_add(duration))
        .map(Timestamp::from_nanos)
        .ok_or(ContractError::InvalidDates {})?;
    let end_date = end_date.unwrap_or(min_end);
    if end_date < min_end {
        return Err(ContractError::EndTooSoon { min_end });
    }

    // The current block is not final, so power is read from the one
    // before it.
    let snapshot_height = env.block.height.saturating_sub(1);
    let total_power = get_past_total_supply(deps.as_ref(), &config.token, snapshot_height)?;

    let proposal = TokenProposal {
        creator: sender.clone(),
        metadata,
        actions,
        early_execution,
        vote_replacement,
        start_date,
        end_date,
        snapshot_height,
        total_power,
        votes: Votes::zero(),
        settings: config.settings,
        executed: false,
    };

    // Limit the size of proposals so that they can always be read
    // back through a query.
    let proposal_size = cosmwasm_std::to_json_vec(&proposal)?.len() as u64;
    if proposal_size > MAX_PROPOSAL_SIZE {
        return Err(ContractError::ProposalTooLarge {
            size: proposal_size,
            max: MAX_PROPOSAL_SIZE,
        });
    }

    let id = advance_proposal_id(deps.storage)?;
    PROPOSALS.save(deps.storage, id, &proposal)?;

    Ok(Response::default()
        .add_event(
            Event::new("proposal_created")
                .add_attribute("proposal_id", id.to_string())
                .add_attribute("creator", sender.clone())
                .add_attribute("start_date", start_date.seconds().to_string())
                .add_attribute("end_date", end_date.seconds().to_string())
                .add_attribute("snapshot_height", snapshot_height.to_string())
                .add_attribute("total_power", total_power)
                .add_attribute("actions", proposal.actions.len().to_string()),
        )
        .add_attribute("action", "create_proposal")
        .add_attribute("sender", sender)
        .add_attribute("proposal_id", id.to_string())
        .add_attribute("status", proposal.current_status(&env.block).to_string())
        .set_data(to_json_binary(&id)?))
}

pub fn execute_vote(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    proposal_id: u64,
    vote: Vote,
    execute_if_decided: bool,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let mut prop = PROPOSALS
        .may_load(deps.storage, proposal_id)?
        .ok_or(ContractError::NoSuchProposal { id: proposal_id })?;

    let status = prop.current_status(&env.block);
    if status != Status::Active {
        return Err(ContractError::NotActive {
            id: proposal_id,
            status,
        });
    }

    let vote_power = get_past_votes(
        deps.as_ref(),
        &config.token,
        &info.sender,
        prop.snapshot_height,
    )?;
    if vote_power.is_zero() {
        return Err(ContractError::NotRegistered {});
    }

    BALLOTS.update(deps.storage, (proposal_id, &info.sender), |bal| match bal {
        Some(current_ballot) => {
            if prop.vote_replacement {
                if current_ballot.vote == vote {
                    Err(ContractError::AlreadyCast {})
                } else {
                    prop.votes
                        .remove_vote(current_ballot.vote, current_ballot.power);
                    Ok(Ballot {
                        power: vote_power,
                        vote,
                    })
                }
            } else {
                Err(ContractError::AlreadyVoted {})
            }
        }
        None => Ok(Ballot {
            power: vote_power,
            vote,
        }),
    })?;

    prop.votes.add_vote(vote, vote_power);
    PROPOSALS.save(deps.storage, proposal_id, &prop)?;

    let response = Response::default()
        .add_attribute("action", "vote")
        .add_attribute("sender", info.sender.clone())
        .add_attribute("proposal_id", proposal_id.to_string())
        .add_attribute("position", vote.to_string())
        .add_attribute("power", vote_power);

    if execute_if_decided && prop.can_execute(&env.block) {
        // Only the messages and events of the execution are kept, so
        // the response has a single `action`.
        let execute = execute_execute(deps, env, info, proposal_id)?;
        Ok(response
            .add_attribute("status", Status::Executed.to_string())
            .add_submessages(execute.messages)
            .add_events(execute.events))
    } else {
        Ok(response.add_attribute("status", prop.current_status(&env.block).to_string()))
    }
}

pub fn execute_execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    proposal_id: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let mut prop = PROPOSALS
        .may_load(deps.storage, proposal_id)?
        .ok_or(ContractError::NoSuchProposal { id: proposal_id })?;

    if prop.executed {
        return Err(ContractError::AlreadyExecuted {});
    }
    if !prop.can_execute(&env.block) {
        return Err(ContractError::NotDecidable {});
    }

    prop.executed = true;
    PROPOSALS.save(deps.storage, proposal_id, &prop)?;

    let execute_message = WasmMsg::Execute {
        contract_addr: config.dao.to_string(),
        msg: to_json_binary(&dao_interface::msg::ExecuteMsg::Execute {
            actions: prop.actions,
        })?,
        funds: vec![],
    };

    Ok(Response::default()
        .add_message(execute_message)
        .add_event(
            Event::new("proposal_executed")
                .add_attribute("proposal_id", proposal_id.to_string())
                .add_attribute("executor", info.sender.clone()),
        )
        .add_attribute("action", "execute")
        .add_attribute("sender", info.sender)
        .add_attribute("proposal_id", proposal_id.to_string())
        .add_attribute("dao", config.dao))
}

pub fn execute_change_vote_config(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    support_threshold: Option<Decimal>,
    min_participation: Option<Decimal>,
    min_duration: Option<u64>,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    assert_permission(
        deps.as_ref(),
        &env,
        &config,
        &info.sender,
        MODIFY_CONFIG_PERMISSION,
    )?;

    let old = config.settings;
    let settings = VoteSettings {
        support_threshold: support_threshold.unwrap_or(old.support_threshold),
        min_participation: min_participation.unwrap_or(old.min_participation),
        min_duration: min_duration.unwrap_or(old.min_duration),
    };
    settings.validate()?;

    config.settings = settings;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::default()
        .add_event(config_event(&settings, Some(&old)))
        .add_attribute("action", "change_vote_config")
        .add_attribute("sender", info.sender))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&CONFIG.load(deps.storage)?),
        QueryMsg::Dao {} => to_json_binary(&CONFIG.load(deps.storage)?.dao),
        QueryMsg::Token {} => to_json_binary(&CONFIG.load(deps.storage)?.token),
        QueryMsg::Proposal { proposal_id } => query_proposal(deps, env, proposal_id),
        QueryMsg::ListProposals { start_after, limit } => {
            query_list_proposals(deps, env, start_after, limit)
        }
        QueryMsg::ReverseProposals {
            start_before,
            limit,
        } => query_reverse_proposals(deps, env, start_before, limit),
        QueryMsg::ProposalCount {} => to_json_binary(&PROPOSAL_COUNT.load(deps.storage)?),
        QueryMsg::GetVote { proposal_id, voter } => query_vote(deps, proposal_id, voter),
        QueryMsg::ListVotes {
            proposal_id,
            start_after,
            limit,
        } => query_list_votes(deps, proposal_id, start_after, limit),
        QueryMsg::CanExecute { proposal_id } => {
            let proposal = PROPOSALS.load(deps.storage, proposal_id)?;
            to_json_binary(&proposal.can_execute(&env.block))
        }
        QueryMsg::CanVote { proposal_id, voter } => query_can_vote(deps, env, proposal_id, voter),
        QueryMsg::Info {} => {
            let info = cw2::get_contract_version(deps.storage)?;
            to_json_binary(&InfoResponse { info })
        }
    }
}

pub fn query_proposal(deps: Deps, env: Env, id: u64) -> StdResult<Binary> {
    let proposal = PROPOSALS.load(deps.storage, id)?;
    to_json_binary(&proposal.into_response(&env.block, id))
}

pub fn query_list_proposals(
    deps: Deps,
    env: Env,
    start_after: Option<u64>,
    limit: Option<u64>,
) -> StdResult<Binary> {
    let min = start_after.map(Bound::exclusive);
    let limit = limit.unwrap_or(DEFAULT_LIMIT);
    let proposals = PROPOSALS
        .range(deps.storage, min, None, Order::Ascending)
        .take(limit as usize)
        .map(|item| item.map(|(id, proposal)| proposal.into_response(&env.block, id)))
        .collect::<StdResult<Vec<ProposalResponse>>>()?;

    to_json_binary(&ProposalListResponse { proposals })
}

pub fn query_reverse_proposals(
    deps: Deps,
    env: Env,
    start_before: Option<u64>,
    limit: Option<u64>,
) -> StdResult<Binary> {
    let max = start_before.map(Bound::exclusive);
    let limit = limit.unwrap_or(DEFAULT_LIMIT);
    let proposals = PROPOSALS
        .range(deps.storage, None, max, Order::Descending)
        .take(limit as usize)
        .map(|item| item.map(|(id, proposal)| proposal.into_response(&env.block, id)))
        .collect::<StdResult<Vec<ProposalResponse>>>()?;

    to_json_binary(&ProposalListResponse { proposals })
}

pub fn query_vote(deps: Deps, proposal_id: u64, voter: String) -> StdResult<Binary> {
    let voter = deps.api.addr_validate(&voter)?;
    let ballot = BALLOTS.may_load(deps.storage, (proposal_id, &voter))?;
    let vote = ballot.map(|ballot| VoteInfo {
        voter,
        vote: ballot.vote,
        power: ballot.power,
    });
    to_json_binary(&VoteResponse { vote })
}

pub fn query_list_votes(
    deps: Deps,
    proposal_id: u64,
    start_after: Option<String>,
    limit: Option<u64>,
) -> StdResult<Binary> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT);
    let start_after = start_after
        .map(|addr| deps.api.addr_validate(&addr))
        .transpose()?;
    let min = start_after.as_ref().map(Bound::<&Addr>::exclusive);

    let votes = BALLOTS
        .prefix(proposal_id)
        .range(deps.storage, min, None, Order::Ascending)
        .take(limit as usize)
        .map(|item| {
            let (voter, ballot) = item?;
            Ok(VoteInfo {
                voter,
                vote: ballot.vote,
                power: ballot.power,
            })
        })
        .collect::<StdResult<Vec<_>>>()?;

    to_json_binary(&VoteListResponse { votes })
}

pub fn query_can_vote(deps: Deps, env: Env, proposal_id: u64, voter: String) -> StdResult<Binary> {
    let voter = deps.api.addr_validate(&voter)?;
    let config = CONFIG.load(deps.storage)?;
    let proposal = PROPOSALS.load(deps.storage, proposal_id)?;

    let can_vote = proposal.current_status(&env.block) == Status::Active
        && (proposal.vote_replacement || !BALLOTS.has(deps.storage, (proposal_id, &voter)))
        && !get_past_votes(deps, &config.token, &voter, proposal.snapshot_height)?.is_zero();

    to_json_binary(&can_vote)
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::default())
}
