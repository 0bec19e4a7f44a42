#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    from_json, to_json_binary, Addr, Binary, Deps, DepsMut, Env, MessageInfo, Response,
    StdError, StdResult, Storage, Uint128, WasmMsg,
};
use cw2::set_contract_version;
use cw20::{BalanceResponse, Cw20ExecuteMsg, Cw20QueryMsg, Cw20ReceiveMsg, TokenInfoResponse};
use dao_interface::voting::{TotalPowerAtHeightResponse, VotingPowerAtHeightResponse};

use crate::error::ContractError;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg, ReceiveMsg};
use crate::state::{TokenInfo, BALANCES, TOKEN_INFO, TOTAL_SUPPLY, UNDERLYING};

pub(crate) const CONTRACT_NAME: &str = "crates.io:dao-wrapped-token";
pub(crate) const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let underlying = deps.api.addr_validate(&msg.token)?;
    // Fails if the address is not a cw20 token.
    let underlying_info: TokenInfoResponse = deps
        .querier
        .query_wasm_smart(&underlying, &Cw20QueryMsg::TokenInfo {})?;

    UNDERLYING.save(deps.storage, &underlying)?;
    TOKEN_INFO.save(
        deps.storage,
        &TokenInfo {
            name: msg.name,
            symbol: msg.symbol,
            decimals: underlying_info.decimals,
        },
    )?;
    TOTAL_SUPPLY.save(deps.storage, &Uint128::zero(), env.block.height)?;

    Ok(Response::default()
        .add_attribute("action", "instantiate")
        .add_attribute("underlying", underlying))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Receive(msg) => execute_receive(deps, env, info, msg),
        ExecuteMsg::Withdraw { amount } => execute_withdraw(deps, env, info, amount),
        ExecuteMsg::Transfer { recipient, amount } => {
            execute_transfer(deps, env, info, recipient, amount)
        }
    }
}

fn credit(
    storage: &mut dyn Storage,
    height: u64,
    owner: &Addr,
    amount: Uint128,
) -> StdResult<()> {
    BALANCES.update(storage, owner, height, |balance| -> StdResult<_> {
        Ok(balance.unwrap_or_default().checked_add(amount)?)
    })?;
    Ok(())
}

fn debit(
    storage: &mut dyn Storage,
    height: u64,
    owner: &Addr,
    amount: Uint128,
) -> StdResult<()> {
    BALANCES.update(storage, owner, height, |balance| -> StdResult<_> {
        Ok(balance.unwrap_or_default().checked_sub(amount)?)
    })?;
    Ok(())
}

pub fn execute_receive(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    wrapper: Cw20ReceiveMsg,
) -> Result<Response, ContractError> {
    let underlying = UNDERLYING.load(deps.storage)?;
    if info.sender != underlying {
        return Err(ContractError::InvalidToken {
            received: info.sender,
            expected: underlying,
        });
    }
    let msg: ReceiveMsg = from_json(&wrapper.msg)?;
    let sender = deps.api.addr_validate(&wrapper.sender)?;
    match msg {
        ReceiveMsg::Deposit {} => execute_deposit(deps, env, sender, wrapper.amount),
    }
}

pub fn execute_deposit(
    deps: DepsMut,
    env: Env,
    sender: Addr,
    amount: Uint128,
) -> Result<Response, ContractError> {
    if amount.is_zero() {
        return Err(ContractError::ZeroAmount {});
    }

    credit(deps.storage, env.block.height, &sender, amount)?;
    TOTAL_SUPPLY.update(deps.storage, env.block.height, |supply| -> StdResult<_> {
        Ok(supply.unwrap_or_default().checked_add(amount)?)
    })?;

    Ok(Response::default()
        .add_attribute("action", "deposit")
        .add_attribute("from", sender)
        .add_attribute("amount", amount))
}

pub fn execute_withdraw(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    amount: Uint128,
) -> Result<Response, ContractError> {
    if amount.is_zero() {
        return Err(ContractError::ZeroAmount {});
    }

    debit(deps.storage, env.block.height, &info.sender, amount)?;
    TOTAL_SUPPLY.update(deps.storage, env.block.height, |supply| -> StdResult<_> {
        Ok(supply.unwrap_or_default().checked_sub(amount)?)
    })?;

    let transfer = WasmMsg::Execute {
        contract_addr: UNDERLYING.load(deps.storage)?.into_string(),
        msg: to_json_binary(&Cw20ExecuteMsg::Transfer {
            recipient: info.sender.to_string(),
            amount,
        })?,
        funds: vec![],
    };

    Ok(Response::default()
        .add_message(transfer)
        .add_attribute("action", "withdraw")
        .add_attribute("to", info.sender)
        .add_attribute("amount", amount))
}

pub fn execute_transfer(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    recipient: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    if amount.is_zero() {
        return Err(ContractError::ZeroAmount {});
    }
    let recipient = deps.api.addr_validate(&recipient)?;

    debit(deps.storage, env.block.height, &info.sender, amount)?;
    credit(deps.storage, env.block.height, &recipient, amount)?;

    Ok(Response::default()
        .add_attribute("action", "transfer")
        .add_attribute("from", info.sender)
        .add_attribute("to", recipient)
        .add_attribute("amount", amount))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Balance { address } => query_balance(deps, address),
        QueryMsg::TokenInfo {} => query_token_info(deps),
        QueryMsg::Underlying {} => to_json_binary(&UNDERLYING.load(deps.storage)?),
        QueryMsg::PastVotes { address, height } => query_past_votes(deps, env, address, height),
        QueryMsg::PastTotalSupply { height } => query_past_total_supply(deps, env, height),
    }
}

pub fn query_balance(deps: Deps, address: String) -> StdResult<Binary> {
    let address = deps.api.addr_validate(&address)?;
    let balance = BALANCES
        .may_load(deps.storage, &address)?
        .unwrap_or_default();
    to_json_binary(&BalanceResponse { balance })
}

pub fn query_token_info(deps: Deps) -> StdResult<Binary> {
    let info = TOKEN_INFO.load(deps.storage)?;
    to_json_binary(&TokenInfoResponse {
        name: info.name,
        symbol: info.symbol,
        decimals: info.decimals,
        total_supply: TOTAL_SUPPLY.load(deps.storage)?,
    })
}

// Same reading rule as the governance token: the end of `height` is
// the snapshot at `height + 1`.
fn assert_past_height(env: &Env, height: u64) -> StdResult<()> {
    if height >= env.block.height {
        return Err(StdError::generic_err(format!(
            "height ({height}) is not in the past, current height is ({})",
            env.block.height
        )));
    }
    Ok(())
}

pub fn query_past_votes(deps: Deps, env: Env, address: String, height: u64) -> StdResult<Binary> {
    assert_past_height(&env, height)?;
    let address = deps.api.addr_validate(&address)?;
    let power = BALANCES
        .may_load_at_height(deps.storage, &address, height + 1)?
        .unwrap_or_default();
    to_json_binary(&VotingPowerAtHeightResponse { power, height })
}

pub fn query_past_total_supply(deps: Deps, env: Env, height: u64) -> StdResult<Binary> {
    assert_past_height(&env, height)?;
    let power = TOTAL_SUPPLY
        .may_load_at_height(deps.storage, height + 1)?
        .unwrap_or_default();
    to_json_binary(&TotalPowerAtHeightResponse { power, height })
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::default())
}
