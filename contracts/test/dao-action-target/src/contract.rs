#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::msg::{ExecuteMsg, InstantiateMsg, QueryMsg};
use crate::state::{CALL_COUNT, LAST_SENDER, SHOULD_ERROR, VALUE};

const CONTRACT_NAME: &str = "crates.io:dao-action-target";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    SHOULD_ERROR.save(deps.storage, &msg.should_error)?;
    VALUE.save(deps.storage, &None)?;
    LAST_SENDER.save(deps.storage, &None)?;
    CALL_COUNT.save(deps.storage, &0)?;

    Ok(Response::new().add_attribute("action", "instantiate"))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    if SHOULD_ERROR.load(deps.storage)? {
        return Err(ContractError::Failed {});
    }

    match msg {
        ExecuteMsg::SetValue { value } => {
            VALUE.save(deps.storage, &Some(value.clone()))?;
            LAST_SENDER.save(deps.storage, &Some(info.sender.clone()))?;
            CALL_COUNT.update(deps.storage, |count| -> StdResult<_> { Ok(count + 1) })?;

            Ok(Response::new()
                .add_attribute("action", "set_value")
                .add_attribute("sender", info.sender)
                .set_data(to_json_binary(&value)?))
        }
        ExecuteMsg::Fail {} => Err(ContractError::Failed {}),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Value {} => to_json_binary(&VALUE.load(deps.storage)?),
        QueryMsg::LastSender {} => to_json_binary(&LAST_SENDER.load(deps.storage)?),
        QueryMsg::CallCount {} => to_json_binary(&CALL_COUNT.load(deps.storage)?),
    }
}
