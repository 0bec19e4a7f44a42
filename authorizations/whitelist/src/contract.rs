#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Addr, Binary, Deps, DepsMut, Empty, Env, MessageInfo, Order, Response,
    StdResult,
};
use cw2::set_contract_version;
use cw_storage_plus::Bound;

use crate::error::ContractError;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::state::{ALLOWED, DAO};

const CONTRACT_NAME: &str = "crates.io:dao-authorizer-whitelist";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 100;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let dao = deps.api.addr_validate(&msg.dao)?;
    DAO.save(deps.storage, &dao)?;
    for addr in msg.allowed {
        let addr = deps.api.addr_validate(&addr)?;
        ALLOWED.save(deps.storage, &addr, &Empty {})?;
    }

    Ok(Response::default()
        .add_attribute("action", "instantiate")
        .add_attribute("dao", dao))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    if info.sender != DAO.load(deps.storage)? {
        return Err(ContractError::Unauthorized {});
    }

    match msg {
        ExecuteMsg::Allow { addr } => {
            let addr = deps.api.addr_validate(&addr)?;
            ALLOWED.save(deps.storage, &addr, &Empty {})?;
            Ok(Response::default()
                .add_attribute("action", "allow")
                .add_attribute("addr", addr))
        }
        ExecuteMsg::Remove { addr } => {
            let addr = deps.api.addr_validate(&addr)?;
            ALLOWED.remove(deps.storage, &addr);
            Ok(Response::default()
                .add_attribute("action", "remove")
                .add_attribute("addr", addr))
        }
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::IsAuthorized { bearer, .. } => {
            // The wildcard bearer is not an address and is never listed.
            let authorized = match deps.api.addr_validate(&bearer) {
                Ok(bearer) => ALLOWED.has(deps.storage, &bearer),
                Err(_) => false,
            };
            to_json_binary(&authorized)
        }
        QueryMsg::Dao {} => to_json_binary(&DAO.load(deps.storage)?),
        QueryMsg::ListAllowed { start_after, limit } => {
            query_list_allowed(deps, start_after, limit)
        }
    }
}

fn query_list_allowed(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start_after = start_after
        .map(|addr| deps.api.addr_validate(&addr))
        .transpose()?;
    let allowed = ALLOWED
        .keys(
            deps.storage,
            start_after.as_ref().map(Bound::exclusive),
            None,
            Order::Ascending,
        )
        .take(limit)
        .collect::<StdResult<Vec<Addr>>>()?;
    to_json_binary(&allowed)
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::default())
}
