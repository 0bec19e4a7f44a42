use std::fmt::Debug;

use cosmwasm_std::{Addr, Binary, Decimal, Uint128};
use cw_multi_test::{next_block, App, AppResponse, Executor};
use dao_factory::msg::{DaoSettings, ExecuteMsg, MintSettings, TokenSettings, VotingSettings};
use serde::Serialize;

use crate::contracts::{
    dao_core_contract, dao_factory_contract, governance_token_contract, token_voting_contract,
    wrapped_token_contract,
};

pub const CREATOR_ADDR: &str = "creator";

/// Minimum voting duration, in seconds, used by `voting_settings`.
pub const MIN_DURATION: u64 = 3600;

pub struct CodeIds {
    pub core: u64,
    pub voting: u64,
    pub token: u64,
    pub wrapper: u64,
    pub factory: u64,
}

/// Addresses of a DAO created through the factory.
#[derive(Clone, Debug)]
pub struct DaoAddrs {
    pub core: Addr,
    pub token: Addr,
    pub voting: Addr,
}

pub fn store_codes(app: &mut App) -> CodeIds {
    CodeIds {
        core: app.store_code(dao_core_contract()),
        voting: app.store_code(token_voting_contract()),
        token: app.store_code(governance_token_contract()),
        wrapper: app.store_code(wrapped_token_contract()),
        factory: app.store_code(dao_factory_contract()),
    }
}

pub fn instantiate_factory(app: &mut App, code_ids: &CodeIds) -> Addr {
    app.instantiate_contract(
        code_ids.factory,
        Addr::unchecked(CREATOR_ADDR),
        &dao_factory::msg::InstantiateMsg {
            core_code_id: code_ids.core,
            voting_code_id: code_ids.voting,
            token_code_id: code_ids.token,
            wrapper_code_id: code_ids.wrapper,
        },
        &[],
        "dao factory",
        None,
    )
    .unwrap()
}

/// 50% support, 20% participation, `MIN_DURATION` seconds.
pub fn voting_settings(open_proposal_creation: bool) -> VotingSettings {
    VotingSettings {
        support_threshold: Decimal::percent(50),
        min_participation: Decimal::percent(20),
        min_duration: MIN_DURATION,
        open_proposal_creation,
    }
}

/// A `NewDao` message minting a fresh token to `balances`.
pub fn new_dao_msg(name: &str, balances: &[(&str, u128)], voting: VotingSettings) -> ExecuteMsg {
    ExecuteMsg::NewDao {
        dao: DaoSettings {
            name: name.to_string(),
            metadata: Binary::from(format!(r#"{{"name":"{name}"}}"#).as_bytes()),
        },
        token: TokenSettings {
            address: None,
            name: format!("{name} token"),
            symbol: "DAO".to_string(),
            decimals: 6,
        },
        mint: MintSettings {
            receivers: balances.iter().map(|(addr, _)| addr.to_string()).collect(),
            amounts: balances
                .iter()
                .map(|(_, amount)| Uint128::new(*amount))
                .collect(),
        },
        voting,
    }
}

fn event_addr(res: &AppResponse, ty: &str, key: &str) -> Addr {
    res.events
        .iter()
        .filter(|event| event.ty == ty)
        .flat_map(|event| event.attributes.iter())
        .find(|attr| attr.key == key)
        .map(|attr| Addr::unchecked(&attr.value))
        .unwrap()
}

/// Executes `msg` on the factory and returns the new DAO's addresses.
/// Advances one block afterwards so that the initial balances can be
/// used as voting power.
pub fn create_dao<T: Serialize + Debug>(app: &mut App, factory: &Addr, msg: T) -> DaoAddrs {
    let res = app
        .execute_contract(Addr::unchecked(CREATOR_ADDR), factory.clone(), &msg, &[])
        .unwrap();
    app.update_block(next_block);

    DaoAddrs {
        core: event_addr(&res, "wasm-new_dao_registered", "dao"),
        token: event_addr(&res, "wasm-new_dao_registered", "token"),
        voting: event_addr(&res, "wasm-dao_created", "voting"),
    }
}

/// Stores every code, instantiates a factory, and creates a DAO named
/// `name` with the default voting settings.
pub fn setup_dao(app: &mut App, name: &str, balances: &[(&str, u128)]) -> (Addr, DaoAddrs) {
    let code_ids = store_codes(app);
    let factory = instantiate_factory(app, &code_ids);
    let dao = create_dao(
        app,
        &factory,
        new_dao_msg(name, balances, voting_settings(true)),
    );
    (factory, dao)
}
