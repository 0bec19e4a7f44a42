#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Addr, Binary, Deps, DepsMut, Env, Event, MessageInfo, Order, Reply, Response,
    StdResult, SubMsg, WasmMsg,
};
use cw2::set_contract_version;
use cw20::Cw20Coin;
use cw_storage_plus::Bound;
use cw_utils::parse_reply_instantiate_data;
use dao_interface::msg::{PermissionItem, PermissionOperation};
use dao_interface::permissions::{
    query_has_permission, ANY_ADDR, CREATE_PROPOSAL_PERMISSION, EXECUTE_PERMISSION,
    MODIFY_CONFIG_PERMISSION, ROOT_PERMISSION, SET_METADATA_PERMISSION,
    SET_SIGNATURE_VALIDATOR_PERMISSION, UPGRADE_PERMISSION, WITHDRAW_PERMISSION,
};
use dao_voting::threshold::VoteSettings;

use crate::error::ContractError;
use crate::msg::{
    DaoEntry, DaoSettings, ExecuteMsg, InstantiateMsg, MigrateMsg, MintSettings, QueryMsg,
    TokenSettings, VotingSettings,
};
use crate::state::{Config, PendingDao, CONFIG, PENDING, REGISTRY};

pub(crate) const CONTRACT_NAME: &str = "crates.io:dao-factory";
pub(crate) const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const INSTANTIATE_CORE_REPLY_ID: u64 = 0;
pub const INSTANTIATE_TOKEN_REPLY_ID: u64 = 1;
pub const INSTANTIATE_VOTING_REPLY_ID: u64 = 2;
pub const SETUP_PERMISSIONS_REPLY_ID: u64 = 3;

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 100;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    CONFIG.save(
        deps.storage,
        &Config {
            core_code_id: msg.core_code_id,
            voting_code_id: msg.voting_code_id,
            token_code_id: msg.token_code_id,
            wrapper_code_id: msg.wrapper_code_id,
        },
    )?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("creator", info.sender))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::NewDao {
            dao,
            token,
            mint,
            voting,
        } => execute_new_dao(deps, env, info, dao, token, mint, voting),
    }
}

pub fn execute_new_dao(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    dao: DaoSettings,
    token: TokenSettings,
    mint: MintSettings,
    voting: VotingSettings,
) -> Result<Response, ContractError> {
    if dao.name.is_empty() {
        return Err(ContractError::EmptyName {});
    }
    if REGISTRY.has(deps.storage, &dao.name) {
        return Err(ContractError::NameTaken { name: dao.name });
    }
    if mint.receivers.len() != mint.amounts.len() {
        return Err(ContractError::MintMismatch {
            receivers: mint.receivers.len(),
            amounts: mint.amounts.len(),
        });
    }
    if token.address.is_some() && !mint.receivers.is_empty() {
        return Err(ContractError::MintWithExistingToken {});
    }

    let vote_settings = VoteSettings {
        support_threshold: voting.support_threshold,
        min_participation: voting.min_participation,
        min_duration: voting.min_duration,
    };
    vote_settings.validate()?;

    let initial_balances = mint
        .receivers
        .iter()
        .zip(mint.amounts)
        .map(|(receiver, amount)| Ok((deps.api.addr_validate(receiver)?, amount)))
        .collect::<StdResult<Vec<_>>>()?;

    PENDING.save(
        deps.storage,
        &PendingDao {
            name: dao.name.clone(),
            creator: info.sender.clone(),
            metadata: dao.metadata.clone(),
            token_settings: token,
            initial_balances,
            vote_settings,
            open_proposal_creation: voting.open_proposal_creation,
            core: None,
            token: None,
            voting: None,
        },
    )?;

    let config = CONFIG.load(deps.storage)?;
    // The factory starts out as the core's admin and root bearer and
    // hands both over before the transaction ends.
    let instantiate = WasmMsg::Instantiate {
        admin: Some(env.contract.address.to_string()),
        code_id: config.core_code_id,
        msg: to_json_binary(&dao_interface::msg::InstantiateMsg {
            metadata: dao.metadata,
            initial_owner: Some(env.contract.address.to_string()),
        })?,
        funds: vec![],
        label: format!("{} core", dao.name),
    };

    Ok(Response::default()
        .add_attribute("action", "new_dao")
        .add_attribute("sender", info.sender)
        .add_attribute("name", dao.name)
        .add_submessage(SubMsg::reply_on_success(
            instantiate,
            INSTANTIATE_CORE_REPLY_ID,
        )))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&CONFIG.load(deps.storage)?),
        QueryMsg::DaoAddress { name } => to_json_binary(&REGISTRY.may_load(deps.storage, &name)?),
        QueryMsg::ListDaos { start_after, limit } => query_list_daos(deps, start_after, limit),
    }
}

pub fn query_list_daos(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let daos = REGISTRY
        .range(
            deps.storage,
            start_after.as_deref().map(Bound::exclusive),
            None,
            Order::Ascending,
        )
        .take(limit)
        .map(|item| item.map(|(name, dao)| DaoEntry { name, dao }))
        .collect::<StdResult<Vec<_>>>()?;
    to_json_binary(&daos)
}

fn instantiate_voting_msg(
    deps: Deps,
    pending: &PendingDao,
    core: &Addr,
    token: &Addr,
) -> Result<SubMsg, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let instantiate = WasmMsg::Instantiate {
        admin: Some(core.to_string()),
        code_id: config.voting_code_id,
        msg: to_json_binary(&dao_token_voting::msg::InstantiateMsg {
            dao: core.to_string(),
            token: token.to_string(),
            settings: pending.vote_settings,
        })?,
        funds: vec![],
        label: format!("{} voting", pending.name),
    };
    Ok(SubMsg::reply_on_success(
        instantiate,
        INSTANTIATE_VOTING_REPLY_ID,
    ))
}

/// The grants and revokes that hand the DAO over to its own
/// governance. The factory's root is revoked last so that it can
/// authorize everything before it.
fn permission_items(
    factory: &Addr,
    core: &Addr,
    voting: &Addr,
    open_proposal_creation: bool,
) -> Vec<PermissionItem> {
    let grant = |target: &Addr, bearer: &str, permission_id: &str| PermissionItem {
        operation: PermissionOperation::Grant {},
        target: target.to_string(),
        bearer: bearer.to_string(),
        permission_id: permission_id.to_string(),
    };

    // The core already holds root on itself from its instantiate.
    let mut items: Vec<PermissionItem> = [
        SET_METADATA_PERMISSION,
        WITHDRAW_PERMISSION,
        UPGRADE_PERMISSION,
        SET_SIGNATURE_VALIDATOR_PERMISSION,
    ]
    .into_iter()
    .map(|permission_id| grant(core, core.as_str(), permission_id))
    .collect();

    items.push(grant(voting, core.as_str(), MODIFY_CONFIG_PERMISSION));
    items.push(grant(core, voting.as_str(), EXECUTE_PERMISSION));
    let proposer = if open_proposal_creation {
        ANY_ADDR
    } else {
        core.as_str()
    };
    items.push(grant(voting, proposer, CREATE_PROPOSAL_PERMISSION));
    items.push(PermissionItem {
        operation: PermissionOperation::Revoke {},
        target: core.to_string(),
        bearer: factory.to_string(),
        permission_id: ROOT_PERMISSION.to_string(),
    });
    items
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, env: Env, msg: Reply) -> Result<Response, ContractError> {
    let mut pending = PENDING
        .may_load(deps.storage)?
        .ok_or(ContractError::NoPendingDao {})?;

    match msg.id {
        INSTANTIATE_CORE_REPLY_ID => {
            let res = parse_reply_instantiate_data(msg)?;
            let core = deps.api.addr_validate(&res.contract_address)?;
            pending.core = Some(core.clone());

            // Make the core its own admin so that it can upgrade
            // itself through governance.
            let update_admin = WasmMsg::UpdateAdmin {
                contract_addr: core.to_string(),
                admin: core.to_string(),
            };

            let response = Response::default()
                .add_attribute("core", core.clone())
                .add_message(update_admin);

            let config = CONFIG.load(deps.storage)?;
            let settings = &pending.token_settings;
            let instantiate = match settings.address.as_ref() {
                Some(token) => WasmMsg::Instantiate {
                    admin: Some(core.to_string()),
                    code_id: config.wrapper_code_id,
                    msg: to_json_binary(&dao_wrapped_token::msg::InstantiateMsg {
                        token: deps.api.addr_validate(token)?.into_string(),
                        name: settings.name.clone(),
                        symbol: settings.symbol.clone(),
                    })?,
                    funds: vec![],
                    label: format!("{} wrapped token", pending.name),
                },
                None => WasmMsg::Instantiate {
                    admin: Some(core.to_string()),
                    code_id: config.token_code_id,
                    msg: to_json_binary(&dao_governance_token::msg::InstantiateMsg {
                        name: settings.name.clone(),
                        symbol: settings.symbol.clone(),
                        decimals: settings.decimals,
                        initial_balances: pending
                            .initial_balances
                            .iter()
                            .map(|(address, amount)| Cw20Coin {
                                address: address.to_string(),
                                amount: *amount,
                            })
                            .collect(),
                        minter: Some(core.to_string()),
                    })?,
                    funds: vec![],
                    label: format!("{} token", pending.name),
                },
            };

            PENDING.save(deps.storage, &pending)?;
            Ok(response.add_submessage(SubMsg::reply_on_success(
                instantiate,
                INSTANTIATE_TOKEN_REPLY_ID,
            )))
        }
        INSTANTIATE_TOKEN_REPLY_ID => {
            let res = parse_reply_instantiate_data(msg)?;
            let token = deps.api.addr_validate(&res.contract_address)?;
            let core = pending.core.clone().ok_or(ContractError::NoPendingDao {})?;

            let voting = instantiate_voting_msg(deps.as_ref(), &pending, &core, &token)?;
            pending.token = Some(token.clone());
            PENDING.save(deps.storage, &pending)?;

            Ok(Response::default()
                .add_attribute("token", token)
                .add_submessage(voting))
        }
        INSTANTIATE_VOTING_REPLY_ID => {
            let res = parse_reply_instantiate_data(msg)?;
            let voting = deps.api.addr_validate(&res.contract_address)?;
            let core = pending.core.clone().ok_or(ContractError::NoPendingDao {})?;
            pending.voting = Some(voting.clone());
            PENDING.save(deps.storage, &pending)?;

            let bulk = WasmMsg::Execute {
                contract_addr: core.to_string(),
                msg: to_json_binary(&dao_interface::msg::ExecuteMsg::Bulk {
                    items: permission_items(
                        &env.contract.address,
                        &core,
                        &voting,
                        pending.open_proposal_creation,
                    ),
                })?,
                funds: vec![],
            };

            Ok(Response::default()
                .add_attribute("voting", voting)
                .add_submessage(SubMsg::reply_on_success(
                    bulk,
                    SETUP_PERMISSIONS_REPLY_ID,
                )))
        }
        SETUP_PERMISSIONS_REPLY_ID => {
            let (core, token, voting) = match (pending.core, pending.token, pending.voting) {
                (Some(core), Some(token), Some(voting)) => (core, token, voting),
                _ => return Err(ContractError::NoPendingDao {}),
            };

            let factory_is_root = query_has_permission(
                &deps.querier,
                &core,
                &core,
                &env.contract.address,
                ROOT_PERMISSION,
                None,
            )?;
            if factory_is_root {
                return Err(ContractError::FactoryStillRoot {});
            }
            let voting_can_execute = query_has_permission(
                &deps.querier,
                &core,
                &core,
                &voting,
                EXECUTE_PERMISSION,
                None,
            )?;
            if !voting_can_execute {
                return Err(ContractError::VotingCannotExecute {});
            }

            REGISTRY.save(deps.storage, &pending.name, &core)?;
            PENDING.remove(deps.storage);

            Ok(Response::default()
                .add_event(
                    Event::new("new_dao_registered")
                        .add_attribute("name", pending.name)
                        .add_attribute("dao", core.clone())
                        .add_attribute("token", token)
                        .add_attribute("creator", pending.creator),
                )
                .add_event(Event::new("dao_created").add_attribute("voting", voting))
                .set_data(to_json_binary(&core)?))
        }
        id => Err(ContractError::UnknownReplyID { id }),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::default())
}
