#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, to_json_string, Addr, BankMsg, Binary, Coin, CosmosMsg, Deps, DepsMut, Env,
    Event, MessageInfo, Order, Reply, Response, StdError, StdResult, SubMsg, Uint128, WasmMsg,
};
use cw2::{get_contract_version, set_contract_version};
use cw20::{Cw20ExecuteMsg, Cw20ReceiveMsg, Denom};
use cw_storage_plus::Bound;
use cw_utils::{one_coin, parse_execute_response_data};
use dao_interface::{
    authorizer::SignatureValidatorQueryMsg,
    msg::{
        ExecuteMsg, InstantiateMsg, MigrateMsg, PermissionEntryKey, PermissionItem,
        PermissionOperation, QueryMsg,
    },
    permissions::{
        EXECUTE_PERMISSION, ROOT_PERMISSION, SET_METADATA_PERMISSION,
        SET_SIGNATURE_VALIDATOR_PERMISSION, UPGRADE_PERMISSION, WITHDRAW_PERMISSION,
    },
    query::{InfoResponse, PermissionEntry, PermissionResponse},
    state::{Action, PermissionAuthorizer, MAX_ACTIONS},
};

use crate::error::ContractError;
use crate::permissions::{
    assert_can_manage, assert_permission, grant, has_permission, revoke, validate_bearer,
};
use crate::state::{
    PendingBatch, BATCH_COUNT, METADATA, PENDING_BATCHES, PERMISSIONS, SIGNATURE_VALIDATOR,
};

pub(crate) const CONTRACT_NAME: &str = "crates.io:dao-core";
pub(crate) const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 100;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    METADATA.save(deps.storage, &msg.metadata)?;
    SIGNATURE_VALIDATOR.save(deps.storage, &None)?;
    BATCH_COUNT.save(deps.storage, &0)?;

    let dao = env.contract.address;
    let mut events = vec![Event::new("set_metadata")
        .add_attribute("metadata", msg.metadata.to_base64())];

    // The DAO must be able to manage its own permissions before anyone
    // else is allowed to, so root is granted here without a check.
    events.extend(grant(
        deps.storage,
        &dao,
        ROOT_PERMISSION,
        &dao,
        PermissionAuthorizer::Allow {},
        &dao,
    )?);
    if let Some(owner) = msg.initial_owner {
        let owner = deps.api.addr_validate(&owner)?;
        events.extend(grant(
            deps.storage,
            &dao,
            ROOT_PERMISSION,
            &owner,
            PermissionAuthorizer::Allow {},
            &dao,
        )?);
    }

    Ok(Response::default()
        .add_attribute("action", "instantiate")
        .add_attribute("sender", info.sender)
        .add_events(events))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Grant {
            target,
            bearer,
            permission_id,
        } => execute_bulk(
            deps,
            env,
            info.sender,
            vec![PermissionItem {
                operation: PermissionOperation::Grant {},
                target,
                bearer,
                permission_id,
            }],
        ),
        ExecuteMsg::GrantWithAuthorizer {
            target,
            bearer,
            permission_id,
            authorizer,
        } => execute_bulk(
            deps,
            env,
            info.sender,
            vec![PermissionItem {
                operation: PermissionOperation::GrantWithAuthorizer { authorizer },
                target,
                bearer,
                permission_id,
            }],
        ),
        ExecuteMsg::Revoke {
            target,
            bearer,
            permission_id,
        } => execute_bulk(
            deps,
            env,
            info.sender,
            vec![PermissionItem {
                operation: PermissionOperation::Revoke {},
                target,
                bearer,
                permission_id,
            }],
        ),
        ExecuteMsg::Bulk { items } => execute_bulk(deps, env, info.sender, items),
        ExecuteMsg::Execute { actions } => execute_actions(deps, env, info.sender, actions),
        ExecuteMsg::SetMetadata { metadata } => {
            execute_set_metadata(deps, env, info.sender, metadata)
        }
        ExecuteMsg::Withdraw {
            token,
            to,
            amount,
            reference,
        } => execute_withdraw(deps, env, info.sender, token, to, amount, reference),
        ExecuteMsg::Upgrade { new_code_id, msg } => {
            execute_upgrade(deps, env, info.sender, new_code_id, msg)
        }
        ExecuteMsg::SetSignatureValidator { validator } => {
            execute_set_signature_validator(deps, env, info.sender, validator)
        }
        ExecuteMsg::Deposit { reference } => execute_deposit(info, reference),
        ExecuteMsg::Receive(msg) => execute_receive_cw20(info.sender, msg),
    }
}

pub fn execute_bulk(
    deps: DepsMut,
    env: Env,
    sender: Addr,
    items: Vec<PermissionItem>,
) -> Result<Response, ContractError> {
    let mut events = vec![];
    for item in items {
        let target = deps.api.addr_validate(&item.target)?;
        let bearer = validate_bearer(deps.api, &item.bearer)?;

        // Checked per item, so a bulk that ends by revoking the
        // sender's root can still apply everything before it.
        assert_can_manage(deps.as_ref(), &env, &sender, &target)?;

        let event = match item.operation {
            PermissionOperation::Grant {} => grant(
                deps.storage,
                &target,
                &item.permission_id,
                &bearer,
                PermissionAuthorizer::Allow {},
                &sender,
            )?,
            PermissionOperation::GrantWithAuthorizer { authorizer } => {
                let authorizer = deps.api.addr_validate(&authorizer)?;
                if authorizer == env.contract.address || authorizer == target {
                    return Err(ContractError::InvalidAuthorizer {});
                }
                grant(
                    deps.storage,
                    &target,
                    &item.permission_id,
                    &bearer,
                    PermissionAuthorizer::Authorizer { addr: authorizer },
                    &sender,
                )?
            }
            PermissionOperation::Revoke {} => revoke(
                deps.storage,
                &target,
                &item.permission_id,
                &bearer,
                &sender,
            )?,
        };
        events.extend(event);
    }

    Ok(Response::default()
        .add_attribute("action", "update_permissions")
        .add_attribute("sender", sender)
        .add_attribute("changes", events.len().to_string())
        .add_events(events))
}

pub fn execute_actions(
    deps: DepsMut,
    env: Env,
    sender: Addr,
    actions: Vec<Action>,
) -> Result<Response, ContractError> {
    assert_permission(deps.as_ref(), &env, &sender, EXECUTE_PERMISSION)?;

    if actions.len() > MAX_ACTIONS {
        return Err(ContractError::TooManyActions { max: MAX_ACTIONS });
    }
    let msgs = actions
        .iter()
        .cloned()
        .enumerate()
        .map(|(index, action)| {
            action
                .into_cosmos_msg()
                .ok_or(ContractError::EmptyAction { index })
        })
        .collect::<Result<Vec<CosmosMsg>, ContractError>>()?;

    let response = Response::default()
        .add_attribute("action", "execute")
        .add_attribute("sender", sender.clone());

    if msgs.is_empty() {
        let results: Vec<Binary> = vec![];
        return Ok(response
            .add_event(executed_event(&sender, &actions, &results)?)
            .set_data(to_json_binary(&results)?));
    }

    let batch = BATCH_COUNT.may_load(deps.storage)?.unwrap_or_default();
    BATCH_COUNT.save(deps.storage, &batch.wrapping_add(1))?;
    PENDING_BATCHES.save(
        deps.storage,
        batch,
        &PendingBatch {
            executor: sender,
            actions,
            results: vec![],
        },
    )?;

    let submessages = msgs
        .into_iter()
        .enumerate()
        .map(|(index, msg)| SubMsg::reply_on_success(msg, action_reply_id(batch, index)));

    Ok(response
        .add_attribute("batch", batch.to_string())
        .add_submessages(submessages))
}

pub fn execute_set_metadata(
    deps: DepsMut,
    env: Env,
    sender: Addr,
    metadata: Binary,
) -> Result<Response, ContractError> {
    assert_permission(deps.as_ref(), &env, &sender, SET_METADATA_PERMISSION)?;

    METADATA.save(deps.storage, &metadata)?;

    Ok(Response::default()
        .add_attribute("action", "set_metadata")
        .add_attribute("sender", sender)
        .add_event(Event::new("set_metadata").add_attribute("metadata", metadata.to_base64())))
}

pub fn execute_withdraw(
    deps: DepsMut,
    env: Env,
    sender: Addr,
    token: Denom,
    to: String,
    amount: Uint128,
    reference: String,
) -> Result<Response, ContractError> {
    assert_permission(deps.as_ref(), &env, &sender, WITHDRAW_PERMISSION)?;

    if amount.is_zero() {
        return Err(ContractError::ZeroWithdraw {});
    }
    let to = deps.api.addr_validate(&to)?;

    let (token, msg): (String, CosmosMsg) = match token {
        Denom::Native(denom) => (
            denom.clone(),
            BankMsg::Send {
                to_address: to.to_string(),
                amount: vec![Coin { denom, amount }],
            }
            .into(),
        ),
        Denom::Cw20(addr) => {
            let addr = deps.api.addr_validate(addr.as_str())?;
            (
                addr.to_string(),
                WasmMsg::Execute {
                    contract_addr: addr.into_string(),
                    msg: to_json_binary(&Cw20ExecuteMsg::Transfer {
                        recipient: to.to_string(),
                        amount,
                    })?,
                    funds: vec![],
                }
                .into(),
            )
        }
    };

    Ok(Response::default()
        .add_attribute("action", "withdraw")
        .add_attribute("sender", sender)
        .add_event(
            Event::new("withdrawn")
                .add_attribute("token", token)
                .add_attribute("to", to)
                .add_attribute("amount", amount)
                .add_attribute("reference", reference),
        )
        .add_message(msg))
}

pub fn execute_upgrade(
    deps: DepsMut,
    env: Env,
    sender: Addr,
    new_code_id: u64,
    msg: Binary,
) -> Result<Response, ContractError> {
    assert_permission(deps.as_ref(), &env, &sender, UPGRADE_PERMISSION)?;

    Ok(Response::default()
        .add_attribute("action", "upgrade")
        .add_attribute("sender", sender)
        .add_event(Event::new("upgraded").add_attribute("new_code_id", new_code_id.to_string()))
        .add_message(WasmMsg::Migrate {
            contract_addr: env.contract.address.into_string(),
            new_code_id,
            msg,
        }))
}

pub fn execute_set_signature_validator(
    deps: DepsMut,
    env: Env,
    sender: Addr,
    validator: Option<String>,
) -> Result<Response, ContractError> {
    assert_permission(
        deps.as_ref(),
        &env,
        &sender,
        SET_SIGNATURE_VALIDATOR_PERMISSION,
    )?;

    let validator = validator
        .map(|v| deps.api.addr_validate(&v))
        .transpose()?;
    SIGNATURE_VALIDATOR.save(deps.storage, &validator)?;

    Ok(Response::default()
        .add_attribute("action", "set_signature_validator")
        .add_attribute("sender", sender)
        .add_event(Event::new("set_signature_validator").add_attribute(
            "validator",
            validator.map(Addr::into_string).unwrap_or_else(|| "None".to_string()),
        )))
}

pub fn execute_deposit(info: MessageInfo, reference: String) -> Result<Response, ContractError> {
    let coin = one_coin(&info)?;

    Ok(Response::default()
        .add_attribute("action", "deposit")
        .add_attribute("sender", info.sender.clone())
        .add_event(deposited_event(
            info.sender.as_str(),
            &coin.denom,
            coin.amount,
            &reference,
        )))
}

pub fn execute_receive_cw20(
    token: Addr,
    msg: Cw20ReceiveMsg,
) -> Result<Response, ContractError> {
    // The attached message, if any, is used as the deposit reference.
    let reference = String::from_utf8(msg.msg.to_vec()).unwrap_or_default();

    Ok(Response::default()
        .add_attribute("action", "receive_cw20")
        .add_attribute("sender", msg.sender.clone())
        .add_event(deposited_event(
            &msg.sender,
            token.as_str(),
            msg.amount,
            &reference,
        )))
}

fn deposited_event(sender: &str, token: &str, amount: Uint128, reference: &str) -> Event {
    Event::new("deposited")
        .add_attribute("sender", sender)
        .add_attribute("token", token)
        .add_attribute("amount", amount)
        .add_attribute("reference", reference)
}

fn executed_event(executor: &Addr, actions: &[Action], results: &[Binary]) -> StdResult<Event> {
    Ok(Event::new("executed")
        .add_attribute("executor", executor)
        .add_attribute("actions", to_json_string(actions)?)
        .add_attribute("results", to_json_string(results)?))
}

/// Reply IDs carry the batch in the upper 32 bits and the index of
/// the action within the batch in the lower 32.
pub(crate) fn action_reply_id(batch: u32, index: usize) -> u64 {
    ((batch as u64) << 32) | index as u64
}

pub(crate) fn parse_action_reply_id(id: u64) -> (u32, usize) {
    ((id >> 32) as u32, (id & u32::MAX as u64) as usize)
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::HasPermission {
            target,
            bearer,
            permission_id,
            data,
        } => query_has_permission(deps, target, bearer, permission_id, data),
        QueryMsg::GetPermission {
            target,
            bearer,
            permission_id,
        } => query_get_permission(deps, target, bearer, permission_id),
        QueryMsg::ListPermissions { start_after, limit } => {
            query_list_permissions(deps, start_after, limit)
        }
        QueryMsg::Metadata {} => to_json_binary(&METADATA.load(deps.storage)?),
        QueryMsg::SignatureValidator {} => to_json_binary(&SIGNATURE_VALIDATOR.load(deps.storage)?),
        QueryMsg::IsValidSignature { hash, signature } => {
            query_is_valid_signature(deps, env, hash, signature)
        }
        QueryMsg::Info {} => query_info(deps),
    }
}

pub fn query_has_permission(
    deps: Deps,
    target: String,
    bearer: String,
    permission_id: String,
    data: Option<Binary>,
) -> StdResult<Binary> {
    let target = deps.api.addr_validate(&target)?;
    let bearer = validate_bearer(deps.api, &bearer)?;
    to_json_binary(&has_permission(
        deps,
        &target,
        &bearer,
        &permission_id,
        data,
    )?)
}

pub fn query_get_permission(
    deps: Deps,
    target: String,
    bearer: String,
    permission_id: String,
) -> StdResult<Binary> {
    let target = deps.api.addr_validate(&target)?;
    let bearer = validate_bearer(deps.api, &bearer)?;
    let authorizer = PERMISSIONS.may_load(deps.storage, (&target, &permission_id, &bearer))?;
    to_json_binary(&PermissionResponse { authorizer })
}

pub fn query_list_permissions(
    deps: Deps,
    start_after: Option<PermissionEntryKey>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start_after = start_after
        .map(|key| -> StdResult<_> {
            Ok((
                deps.api.addr_validate(&key.target)?,
                key.permission_id,
                validate_bearer(deps.api, &key.bearer)?,
            ))
        })
        .transpose()?;
    let min = start_after
        .as_ref()
        .map(|(target, permission_id, bearer)| {
            Bound::exclusive((target, permission_id.as_str(), bearer))
        });

    let entries = PERMISSIONS
        .range(deps.storage, min, None, Order::Ascending)
        .take(limit)
        .map(|item| {
            item.map(
                |((target, permission_id, bearer), authorizer)| PermissionEntry {
                    target,
                    permission_id,
                    bearer,
                    authorizer,
                },
            )
        })
        .collect::<StdResult<Vec<PermissionEntry>>>()?;

    to_json_binary(&entries)
}

pub fn query_is_valid_signature(
    deps: Deps,
    _env: Env,
    hash: Binary,
    signature: Binary,
) -> StdResult<Binary> {
    let valid = match SIGNATURE_VALIDATOR.load(deps.storage)? {
        Some(validator) => deps
            .querier
            .query_wasm_smart(
                validator,
                &SignatureValidatorQueryMsg::IsValidSignature { hash, signature },
            )
            .unwrap_or(false),
        None => false,
    };
    to_json_binary(&valid)
}

pub fn query_info(deps: Deps) -> StdResult<Binary> {
    let info = get_contract_version(deps.storage)?;
    to_json_binary(&InfoResponse { info })
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    let (batch, index) = parse_action_reply_id(msg.id);
    let mut pending = PENDING_BATCHES
        .may_load(deps.storage, batch)?
        .ok_or(ContractError::UnknownReplyID { id: msg.id })?;

    let data = match msg.result.into_result().map_err(StdError::generic_err)?.data {
        Some(data) => parse_execute_response_data(&data)?
            .data
            .unwrap_or_default(),
        None => Binary::default(),
    };
    pending.results.push(data);

    if index + 1 < pending.actions.len() {
        PENDING_BATCHES.save(deps.storage, batch, &pending)?;
        return Ok(Response::default());
    }

    PENDING_BATCHES.remove(deps.storage, batch);
    Ok(Response::default()
        .add_attribute("action", "execute_completed")
        .add_attribute("batch", batch.to_string())
        .add_event(executed_event(
            &pending.executor,
            &pending.actions,
            &pending.results,
        )?)
        .set_data(to_json_binary(&pending.results)?))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::default().add_attribute("action", "migrate"))
}
