#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::state::{Config, CONFIG};

const CONTRACT_NAME: &str = "crates.io:dao-authorizer-deadline";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    if msg.expiration.is_expired(&env.block) {
        return Err(ContractError::AlreadyExpired {});
    }
    let config = Config {
        dao: deps.api.addr_validate(&msg.dao)?,
        expiration: msg.expiration,
    };
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::default()
        .add_attribute("action", "instantiate")
        .add_attribute("dao", config.dao)
        .add_attribute("expiration", config.expiration.to_string()))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::SetExpiration { expiration } => {
            let mut config = CONFIG.load(deps.storage)?;
            if info.sender != config.dao {
                return Err(ContractError::Unauthorized {});
            }
            if expiration.is_expired(&env.block) {
                return Err(ContractError::AlreadyExpired {});
            }
            let old = config.expiration;
            config.expiration = expiration;
            CONFIG.save(deps.storage, &config)?;

            Ok(Response::default()
                .add_attribute("action", "set_expiration")
                .add_attribute("expiration", expiration.to_string())
                .add_attribute("old_expiration", old.to_string()))
        }
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::IsAuthorized { .. } => {
            let config = CONFIG.load(deps.storage)?;
            to_json_binary(&!config.expiration.is_expired(&env.block))
        }
        QueryMsg::Config {} => to_json_binary(&CONFIG.load(deps.storage)?),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::default())
}
