#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Addr, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdError, StdResult,
    Storage, Uint128,
};
use cw2::set_contract_version;
use cw20::{BalanceResponse, MinterResponse, TokenInfoResponse};
use dao_interface::voting::{TotalPowerAtHeightResponse, VotingPowerAtHeightResponse};

use crate::error::ContractError;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::state::{TokenInfo, BALANCES, MINTER, TOKEN_INFO, TOTAL_SUPPLY};

pub(crate) const CONTRACT_NAME: &str = "crates.io:dao-governance-token";
pub(crate) const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    TOKEN_INFO.save(
        deps.storage,
        &TokenInfo {
            name: msg.name,
            symbol: msg.symbol,
            decimals: msg.decimals,
        },
    )?;
    let minter = msg
        .minter
        .map(|m| deps.api.addr_validate(&m))
        .transpose()?;
    MINTER.save(deps.storage, &minter)?;

    TOTAL_SUPPLY.save(deps.storage, &Uint128::zero(), env.block.height)?;
    for coin in msg.initial_balances {
        let address = deps.api.addr_validate(&coin.address)?;
        mint(deps.storage, env.block.height, &address, coin.amount)?;
    }

    Ok(Response::default()
        .add_attribute("action", "instantiate")
        .add_attribute(
            "minter",
            minter
                .map(Addr::into_string)
                .unwrap_or_else(|| "None".to_string()),
        ))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Transfer { recipient, amount } => {
            execute_transfer(deps, env, info, recipient, amount)
        }
        ExecuteMsg::Burn { amount } => execute_burn(deps, env, info, amount),
        ExecuteMsg::Mint { recipient, amount } => execute_mint(deps, env, info, recipient, amount),
        ExecuteMsg::UpdateMinter { new_minter } => execute_update_minter(deps, info, new_minter),
    }
}

fn mint(
    storage: &mut dyn Storage,
    height: u64,
    recipient: &Addr,
    amount: Uint128,
) -> Result<(), ContractError> {
    BALANCES.update(storage, recipient, height, |balance| -> StdResult<_> {
        Ok(balance.unwrap_or_default().checked_add(amount)?)
    })?;
    TOTAL_SUPPLY.update(storage, height, |supply| -> StdResult<_> {
        Ok(supply.unwrap_or_default().checked_add(amount)?)
    })?;
    Ok(())
}

fn debit(
    storage: &mut dyn Storage,
    height: u64,
    owner: &Addr,
    amount: Uint128,
) -> Result<(), ContractError> {
    BALANCES.update(storage, owner, height, |balance| -> StdResult<_> {
        Ok(balance.unwrap_or_default().checked_sub(amount)?)
    })?;
    Ok(())
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
    BALANCES.update(
        deps.storage,
        &recipient,
        env.block.height,
        |balance| -> StdResult<_> { Ok(balance.unwrap_or_default().checked_add(amount)?) },
    )?;

    Ok(Response::default()
        .add_attribute("action", "transfer")
        .add_attribute("from", info.sender)
        .add_attribute("to", recipient)
        .add_attribute("amount", amount))
}

pub fn execute_burn(
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

    Ok(Response::default()
        .add_attribute("action", "burn")
        .add_attribute("from", info.sender)
        .add_attribute("amount", amount))
}

pub fn execute_mint(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    recipient: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    if MINTER.load(deps.storage)?.as_ref() != Some(&info.sender) {
        return Err(ContractError::Unauthorized {});
    }
    if amount.is_zero() {
        return Err(ContractError::ZeroAmount {});
    }
    let recipient = deps.api.addr_validate(&recipient)?;

    mint(deps.storage, env.block.height, &recipient, amount)?;

    Ok(Response::default()
        .add_attribute("action", "mint")
        .add_attribute("to", recipient)
        .add_attribute("amount", amount))
}

pub fn execute_update_minter(
    deps: DepsMut,
    info: MessageInfo,
    new_minter: Option<String>,
) -> Result<Response, ContractError> {
    if MINTER.load(deps.storage)?.as_ref() != Some(&info.sender) {
        return Err(ContractError::Unauthorized {});
    }
    let new_minter = new_minter
        .map(|m| deps.api.addr_validate(&m))
        .transpose()?;
    MINTER.save(deps.storage, &new_minter)?;

    Ok(Response::default()
        .add_attribute("action", "update_minter")
        .add_attribute(
            "new_minter",
            new_minter
                .map(Addr::into_string)
                .unwrap_or_else(|| "None".to_string()),
        ))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Balance { address } => query_balance(deps, address),
        QueryMsg::TokenInfo {} => query_token_info(deps),
        QueryMsg::Minter {} => query_minter(deps),
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

pub fn query_minter(deps: Deps) -> StdResult<Binary> {
    let minter = MINTER.load(deps.storage)?.map(|minter| MinterResponse {
        minter: minter.into_string(),
        cap: None,
    });
    to_json_binary(&minter)
}

// Snapshots hold the value at the start of a block, so the end of
// `height` is read at `height + 1`. Only finished blocks are final.
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
