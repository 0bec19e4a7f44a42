use cosmwasm_std::{Addr, Binary, Decimal, Uint128};
use cw20::Cw20Coin;
use cw_multi_test::{next_block, App, Executor};
use dao_interface::msg::{PermissionItem, PermissionOperation};
use dao_interface::permissions::{
    ANY_ADDR, CREATE_PROPOSAL_PERMISSION, EXECUTE_PERMISSION, MODIFY_CONFIG_PERMISSION,
};
use dao_testing::contracts::{action_target_contract, dao_core_contract, governance_token_contract};
use dao_voting::threshold::VoteSettings;

use crate::msg::InstantiateMsg;

use super::{contracts::token_voting_contract, CREATOR_ADDR};

pub(crate) const MIN_DURATION: u64 = 3600;

pub(crate) struct Suite {
    pub app: App,
    pub core: Addr,
    pub token: Addr,
    pub voting: Addr,
    pub target: Addr,
}

pub(crate) fn settings() -> VoteSettings {
    VoteSettings {
        support_threshold: Decimal::percent(50),
        min_participation: Decimal::percent(20),
        min_duration: MIN_DURATION,
    }
}

pub(crate) fn instantiate_voting(
    app: &mut App,
    core: &Addr,
    token: &Addr,
    settings: VoteSettings,
) -> anyhow::Result<Addr> {
    let code_id = app.store_code(token_voting_contract());
    app.instantiate_contract(
        code_id,
        Addr::unchecked(CREATOR_ADDR),
        &InstantiateMsg {
            dao: core.to_string(),
            token: token.to_string(),
            settings,
        },
        &[],
        "token voting",
        Some(core.to_string()),
    )
}

/// A DAO wired by hand the way the factory wires it, except that
/// `CREATOR_ADDR` keeps root so tests can adjust permissions. If
/// `open` is false only `CREATOR_ADDR` may create proposals.
pub(crate) fn setup(balances: &[(&str, u128)], open: bool) -> Suite {
    let mut app = App::default();

    let core_id = app.store_code(dao_core_contract());
    let core = app
        .instantiate_contract(
            core_id,
            Addr::unchecked(CREATOR_ADDR),
            &dao_interface::msg::InstantiateMsg {
                metadata: Binary::from(b"{}"),
                initial_owner: Some(CREATOR_ADDR.to_string()),
            },
            &[],
            "core",
            None,
        )
        .unwrap();

    let token_id = app.store_code(governance_token_contract());
    let token = app
        .instantiate_contract(
            token_id,
            Addr::unchecked(CREATOR_ADDR),
            &dao_governance_token::msg::InstantiateMsg {
                name: "DAO".to_string(),
                symbol: "DAO".to_string(),
                decimals: 6,
                initial_balances: balances
                    .iter()
                    .map(|(address, amount)| Cw20Coin {
                        address: address.to_string(),
                        amount: Uint128::new(*amount),
                    })
                    .collect(),
                minter: Some(core.to_string()),
            },
            &[],
            "token",
            None,
        )
        .unwrap();

    let voting = instantiate_voting(&mut app, &core, &token, settings()).unwrap();

    let target_id = app.store_code(action_target_contract());
    let target = app
        .instantiate_contract(
            target_id,
            Addr::unchecked(CREATOR_ADDR),
            &dao_action_target::msg::InstantiateMsg {
                should_error: false,
            },
            &[],
            "target",
            None,
        )
        .unwrap();

    let grant = |target: &Addr, bearer: &str, permission_id: &str| PermissionItem {
        operation: PermissionOperation::Grant {},
        target: target.to_string(),
        bearer: bearer.to_string(),
        permission_id: permission_id.to_string(),
    };
    app.execute_contract(
        Addr::unchecked(CREATOR_ADDR),
        core.clone(),
        &dao_interface::msg::ExecuteMsg::Bulk {
            items: vec![
                grant(&core, voting.as_str(), EXECUTE_PERMISSION),
                grant(&voting, core.as_str(), MODIFY_CONFIG_PERMISSION),
                grant(
                    &voting,
                    if open { ANY_ADDR } else { CREATOR_ADDR },
                    CREATE_PROPOSAL_PERMISSION,
                ),
            ],
        },
        &[],
    )
    .unwrap();

    // Balances minted at instantiation become voting power once their
    // block is finished.
    app.update_block(next_block);

    Suite {
        app,
        core,
        token,
        voting,
        target,
    }
}
