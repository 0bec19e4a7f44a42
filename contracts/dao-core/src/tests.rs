use cosmwasm_std::{
    coin, coins, from_json,
    testing::{mock_dependencies, mock_env},
    to_json_binary, Addr, Binary, CosmosMsg, Deps, DepsMut, Empty, Env, MessageInfo, Response,
    StdResult, Uint128, WasmMsg,
};
use cw2::{get_contract_version, set_contract_version};
use cw20::{Cw20Coin, Cw20ReceiveMsg, Denom};
use cw_multi_test::{App, AppResponse, Contract, ContractWrapper, Executor};
use cw_utils::PaymentError;
use dao_interface::{
    authorizer::SignatureValidatorQueryMsg,
    msg::{
        ExecuteMsg, InstantiateMsg, MigrateMsg, PermissionEntryKey, PermissionItem,
        PermissionOperation, QueryMsg,
    },
    permissions::{
        ANY_ADDR, EXECUTE_PERMISSION, ROOT_PERMISSION, SET_METADATA_PERMISSION,
        SET_SIGNATURE_VALIDATOR_PERMISSION, UPGRADE_PERMISSION, WITHDRAW_PERMISSION,
    },
    query::{InfoResponse, PermissionEntry, PermissionResponse},
    state::{Action, PermissionAuthorizer, MAX_ACTIONS},
};
use dao_testing::contracts::{
    action_target_contract, governance_token_contract, whitelist_authorizer_contract,
};

use crate::{
    contract::{migrate, CONTRACT_NAME, CONTRACT_VERSION},
    ContractError,
};

const CREATOR_ADDR: &str = "creator";
const ALICE: &str = "alice";
const BOB: &str = "bob";
const DENOM: &str = "ujuno";

fn dao_core_contract() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        crate::contract::execute,
        crate::contract::instantiate,
        crate::contract::query,
    )
    .with_reply(crate::contract::reply)
    .with_migrate(crate::contract::migrate);
    Box::new(contract)
}

fn validator_instantiate(
    _deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    _msg: Empty,
) -> StdResult<Response> {
    Ok(Response::default())
}

fn validator_execute(
    _deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    _msg: Empty,
) -> StdResult<Response> {
    Ok(Response::default())
}

/// Accepts a signature iff it equals the hash.
fn validator_query(_deps: Deps, _env: Env, msg: SignatureValidatorQueryMsg) -> StdResult<Binary> {
    match msg {
        SignatureValidatorQueryMsg::IsValidSignature { hash, signature } => {
            to_json_binary(&(hash == signature))
        }
    }
}

fn signature_validator_contract() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(validator_execute, validator_instantiate, validator_query);
    Box::new(contract)
}

fn instantiate_core(app: &mut App, initial_owner: Option<&str>) -> Addr {
    let code_id = app.store_code(dao_core_contract());
    app.instantiate_contract(
        code_id,
        Addr::unchecked(CREATOR_ADDR),
        &InstantiateMsg {
            metadata: Binary::from(br#"{"name":"DAO DAO"}"#),
            initial_owner: initial_owner.map(str::to_string),
        },
        &[],
        "dao core",
        Some(CREATOR_ADDR.to_string()),
    )
    .unwrap()
}

fn instantiate_target(app: &mut App) -> Addr {
    let code_id = app.store_code(action_target_contract());
    app.instantiate_contract(
        code_id,
        Addr::unchecked(CREATOR_ADDR),
        &dao_action_target::msg::InstantiateMsg {
            should_error: false,
        },
        &[],
        "target",
        None,
    )
    .unwrap()
}

fn instantiate_whitelist(app: &mut App, core: &Addr, allowed: &[&str]) -> Addr {
    let code_id = app.store_code(whitelist_authorizer_contract());
    app.instantiate_contract(
        code_id,
        Addr::unchecked(CREATOR_ADDR),
        &dao_authorizer_whitelist::msg::InstantiateMsg {
            dao: core.to_string(),
            allowed: allowed.iter().map(|a| a.to_string()).collect(),
        },
        &[],
        "whitelist",
        None,
    )
    .unwrap()
}

fn grant(
    app: &mut App,
    core: &Addr,
    sender: &str,
    target: &str,
    bearer: &str,
    permission_id: &str,
) -> anyhow::Result<AppResponse> {
    app.execute_contract(
        Addr::unchecked(sender),
        core.clone(),
        &ExecuteMsg::Grant {
            target: target.to_string(),
            bearer: bearer.to_string(),
            permission_id: permission_id.to_string(),
        },
        &[],
    )
}

fn execute_actions(
    app: &mut App,
    core: &Addr,
    sender: &str,
    actions: Vec<Action>,
) -> anyhow::Result<AppResponse> {
    app.execute_contract(
        Addr::unchecked(sender),
        core.clone(),
        &ExecuteMsg::Execute { actions },
        &[],
    )
}

fn has_permission(app: &App, core: &Addr, target: &str, bearer: &str, permission_id: &str) -> bool {
    app.wrap()
        .query_wasm_smart(
            core,
            &QueryMsg::HasPermission {
                target: target.to_string(),
                bearer: bearer.to_string(),
                permission_id: permission_id.to_string(),
                data: None,
            },
        )
        .unwrap()
}

fn set_value(target: &Addr, value: &str) -> Action {
    Action::wasm(
        target.as_str(),
        &dao_action_target::msg::ExecuteMsg::SetValue {
            value: value.to_string(),
        },
        vec![],
    )
    .unwrap()
}

fn has_event(res: &AppResponse, ty: &str) -> bool {
    res.events.iter().any(|event| event.ty == ty)
}

fn event_attr(res: &AppResponse, ty: &str, key: &str) -> String {
    res.events
        .iter()
        .filter(|event| event.ty == ty)
        .flat_map(|event| event.attributes.iter())
        .find(|attr| attr.key == key)
        .map(|attr| attr.value.clone())
        .unwrap()
}

#[test]
fn test_instantiate() {
    let mut app = App::default();
    let core = instantiate_core(&mut app, Some(CREATOR_ADDR));

    assert!(has_permission(&app, &core, core.as_str(), core.as_str(), ROOT_PERMISSION));
    assert!(has_permission(&app, &core, core.as_str(), CREATOR_ADDR, ROOT_PERMISSION));
    assert!(!has_permission(&app, &core, core.as_str(), ALICE, ROOT_PERMISSION));

    let metadata: Binary = app
        .wrap()
        .query_wasm_smart(&core, &QueryMsg::Metadata {})
        .unwrap();
    assert_eq!(metadata, Binary::from(br#"{"name":"DAO DAO"}"#));

    let info: InfoResponse = app
        .wrap()
        .query_wasm_smart(&core, &QueryMsg::Info {})
        .unwrap();
    assert_eq!(info.info.contract, CONTRACT_NAME);
    assert_eq!(info.info.version, CONTRACT_VERSION);

    let validator: Option<Addr> = app
        .wrap()
        .query_wasm_smart(&core, &QueryMsg::SignatureValidator {})
        .unwrap();
    assert_eq!(validator, None);
}

#[test]
fn test_instantiate_without_owner() {
    let mut app = App::default();
    let core = instantiate_core(&mut app, None);

    assert!(has_permission(&app, &core, core.as_str(), core.as_str(), ROOT_PERMISSION));
    assert!(!has_permission(&app, &core, core.as_str(), CREATOR_ADDR, ROOT_PERMISSION));

    let err: ContractError = grant(
        &mut app,
        &core,
        CREATOR_ADDR,
        core.as_str(),
        CREATOR_ADDR,
        EXECUTE_PERMISSION,
    )
    .unwrap_err()
    .downcast()
    .unwrap();
    assert_eq!(
        err,
        ContractError::Unauthorized {
            permission_id: ROOT_PERMISSION.to_string()
        }
    );
}

#[test]
fn test_grant_and_revoke() {
    let mut app = App::default();
    let core = instantiate_core(&mut app, Some(CREATOR_ADDR));

    let res = grant(
        &mut app,
        &core,
        CREATOR_ADDR,
        core.as_str(),
        ALICE,
        EXECUTE_PERMISSION,
    )
    .unwrap();
    assert_eq!(event_attr(&res, "wasm-granted", "bearer"), ALICE);
    assert_eq!(event_attr(&res, "wasm-granted", "granted_by"), CREATOR_ADDR);
    assert_eq!(event_attr(&res, "wasm-granted", "authorizer"), "allow");
    assert!(has_permission(&app, &core, core.as_str(), ALICE, EXECUTE_PERMISSION));
    assert!(!has_permission(&app, &core, core.as_str(), ALICE, WITHDRAW_PERMISSION));

    // Granting the same record again changes nothing.
    let res = grant(
        &mut app,
        &core,
        CREATOR_ADDR,
        core.as_str(),
        ALICE,
        EXECUTE_PERMISSION,
    )
    .unwrap();
    assert!(!has_event(&res, "wasm-granted"));

    let err: ContractError = app
        .execute_contract(
            Addr::unchecked(CREATOR_ADDR),
            core.clone(),
            &ExecuteMsg::GrantWithAuthorizer {
                target: core.to_string(),
                bearer: ALICE.to_string(),
                permission_id: EXECUTE_PERMISSION.to_string(),
                authorizer: "authorizer".to_string(),
            },
            &[],
        )
        .unwrap_err()
        .downcast()
        .unwrap();
    assert_eq!(
        err,
        ContractError::PermissionAlreadySet {
            permission_id: EXECUTE_PERMISSION.to_string(),
            current: "allow".to_string(),
        }
    );

    // Only root may change permissions.
    let err: ContractError = grant(
        &mut app,
        &core,
        ALICE,
        core.as_str(),
        BOB,
        EXECUTE_PERMISSION,
    )
    .unwrap_err()
    .downcast()
    .unwrap();
    assert_eq!(
        err,
        ContractError::Unauthorized {
            permission_id: ROOT_PERMISSION.to_string()
        }
    );

    let revoke = ExecuteMsg::Revoke {
        target: core.to_string(),
        bearer: ALICE.to_string(),
        permission_id: EXECUTE_PERMISSION.to_string(),
    };
    let res = app
        .execute_contract(Addr::unchecked(CREATOR_ADDR), core.clone(), &revoke, &[])
        .unwrap();
    assert_eq!(event_attr(&res, "wasm-revoked", "revoked_by"), CREATOR_ADDR);
    assert!(!has_permission(&app, &core, core.as_str(), ALICE, EXECUTE_PERMISSION));

    let res = app
        .execute_contract(Addr::unchecked(CREATOR_ADDR), core.clone(), &revoke, &[])
        .unwrap();
    assert!(!has_event(&res, "wasm-revoked"));

    let record: PermissionResponse = app
        .wrap()
        .query_wasm_smart(
            &core,
            &QueryMsg::GetPermission {
                target: core.to_string(),
                bearer: ALICE.to_string(),
                permission_id: EXECUTE_PERMISSION.to_string(),
            },
        )
        .unwrap();
    assert_eq!(record.authorizer, None);
}

#[test]
fn test_root_on_target() {
    let mut app = App::default();
    let core = instantiate_core(&mut app, Some(CREATOR_ADDR));
    let target = instantiate_target(&mut app);

    grant(
        &mut app,
        &core,
        CREATOR_ADDR,
        target.as_str(),
        ALICE,
        ROOT_PERMISSION,
    )
    .unwrap();

    // Root on the target lets alice manage the target's permissions
    // but not the DAO's.
    grant(&mut app, &core, ALICE, target.as_str(), BOB, "SET_VALUE").unwrap();
    assert!(has_permission(&app, &core, target.as_str(), BOB, "SET_VALUE"));

    let err: ContractError = grant(
        &mut app,
        &core,
        ALICE,
        core.as_str(),
        BOB,
        EXECUTE_PERMISSION,
    )
    .unwrap_err()
    .downcast()
    .unwrap();
    assert_eq!(
        err,
        ContractError::Unauthorized {
            permission_id: ROOT_PERMISSION.to_string()
        }
    );
}

#[test]
fn test_bulk_applies_in_order() {
    let mut app = App::default();
    let core = instantiate_core(&mut app, Some(CREATOR_ADDR));

    let item = |operation, bearer: &str, permission_id: &str| PermissionItem {
        operation,
        target: core.to_string(),
        bearer: bearer.to_string(),
        permission_id: permission_id.to_string(),
    };
    let res = app
        .execute_contract(
            Addr::unchecked(CREATOR_ADDR),
            core.clone(),
            &ExecuteMsg::Bulk {
                items: vec![
                    item(PermissionOperation::Grant {}, ALICE, EXECUTE_PERMISSION),
                    item(PermissionOperation::Grant {}, BOB, WITHDRAW_PERMISSION),
                    item(PermissionOperation::Revoke {}, CREATOR_ADDR, ROOT_PERMISSION),
                ],
            },
            &[],
        )
        .unwrap();
    assert_eq!(event_attr(&res, "wasm", "changes"), "3");

    assert!(has_permission(&app, &core, core.as_str(), ALICE, EXECUTE_PERMISSION));
    assert!(has_permission(&app, &core, core.as_str(), BOB, WITHDRAW_PERMISSION));
    assert!(!has_permission(&app, &core, core.as_str(), CREATOR_ADDR, ROOT_PERMISSION));

    // With root revoked the creator can no longer change anything.
    let err: ContractError = app
        .execute_contract(
            Addr::unchecked(CREATOR_ADDR),
            core.clone(),
            &ExecuteMsg::Bulk {
                items: vec![item(PermissionOperation::Grant {}, ALICE, ROOT_PERMISSION)],
            },
            &[],
        )
        .unwrap_err()
        .downcast()
        .unwrap();
    assert_eq!(
        err,
        ContractError::Unauthorized {
            permission_id: ROOT_PERMISSION.to_string()
        }
    );
}

#[test]
fn test_wildcard_bearer() {
    let mut app = App::default();
    let core = instantiate_core(&mut app, Some(CREATOR_ADDR));
    let whitelist = instantiate_whitelist(&mut app, &core, &[]);

    grant(
        &mut app,
        &core,
        CREATOR_ADDR,
        core.as_str(),
        ANY_ADDR,
        EXECUTE_PERMISSION,
    )
    .unwrap();
    assert!(has_permission(&app, &core, core.as_str(), ALICE, EXECUTE_PERMISSION));
    assert!(has_permission(&app, &core, core.as_str(), BOB, EXECUTE_PERMISSION));
    execute_actions(&mut app, &core, ALICE, vec![]).unwrap();

    // An exact record for bob takes precedence over the wildcard.
    app.execute_contract(
        Addr::unchecked(CREATOR_ADDR),
        core.clone(),
        &ExecuteMsg::GrantWithAuthorizer {
            target: core.to_string(),
            bearer: BOB.to_string(),
            permission_id: EXECUTE_PERMISSION.to_string(),
            authorizer: whitelist.to_string(),
        },
        &[],
    )
    .unwrap();
    assert!(has_permission(&app, &core, core.as_str(), ALICE, EXECUTE_PERMISSION));
    assert!(!has_permission(&app, &core, core.as_str(), BOB, EXECUTE_PERMISSION));

    // Root is never open to everyone.
    let err: ContractError = grant(
        &mut app,
        &core,
        CREATOR_ADDR,
        core.as_str(),
        ANY_ADDR,
        ROOT_PERMISSION,
    )
    .unwrap_err()
    .downcast()
    .unwrap();
    assert_eq!(err, ContractError::RootForAnyone {});
    assert!(!has_permission(&app, &core, core.as_str(), ALICE, ROOT_PERMISSION));
}

#[test]
fn test_authorizer() {
    let mut app = App::default();
    let core = instantiate_core(&mut app, Some(CREATOR_ADDR));
    let whitelist = instantiate_whitelist(&mut app, &core, &[ALICE]);

    let grant_with = |authorizer: &Addr| ExecuteMsg::GrantWithAuthorizer {
        target: core.to_string(),
        bearer: ANY_ADDR.to_string(),
        permission_id: EXECUTE_PERMISSION.to_string(),
        authorizer: authorizer.to_string(),
    };

    let err: ContractError = app
        .execute_contract(
            Addr::unchecked(CREATOR_ADDR),
            core.clone(),
            &grant_with(&core),
            &[],
        )
        .unwrap_err()
        .downcast()
        .unwrap();
    assert_eq!(err, ContractError::InvalidAuthorizer {});

    let res = app
        .execute_contract(
            Addr::unchecked(CREATOR_ADDR),
            core.clone(),
            &grant_with(&whitelist),
            &[],
        )
        .unwrap();
    assert_eq!(
        event_attr(&res, "wasm-granted", "authorizer"),
        whitelist.to_string()
    );

    assert!(has_permission(&app, &core, core.as_str(), ALICE, EXECUTE_PERMISSION));
    assert!(!has_permission(&app, &core, core.as_str(), BOB, EXECUTE_PERMISSION));

    let err: ContractError = execute_actions(&mut app, &core, BOB, vec![])
        .unwrap_err()
        .downcast()
        .unwrap();
    assert_eq!(
        err,
        ContractError::Unauthorized {
            permission_id: EXECUTE_PERMISSION.to_string()
        }
    );

    // The DAO edits the whitelist through its own execution engine.
    execute_actions(
        &mut app,
        &core,
        ALICE,
        vec![Action::wasm(
            whitelist.as_str(),
            &dao_authorizer_whitelist::msg::ExecuteMsg::Allow {
                addr: BOB.to_string(),
            },
            vec![],
        )
        .unwrap()],
    )
    .unwrap();
    assert!(has_permission(&app, &core, core.as_str(), BOB, EXECUTE_PERMISSION));
    execute_actions(&mut app, &core, BOB, vec![]).unwrap();
}

#[test]
fn test_authorizer_can_not_be_target() {
    let mut app = App::default();
    let core = instantiate_core(&mut app, Some(CREATOR_ADDR));
    let target = instantiate_target(&mut app);

    let err: ContractError = app
        .execute_contract(
            Addr::unchecked(CREATOR_ADDR),
            core.clone(),
            &ExecuteMsg::GrantWithAuthorizer {
                target: target.to_string(),
                bearer: ALICE.to_string(),
                permission_id: "SET_VALUE".to_string(),
                authorizer: target.to_string(),
            },
            &[],
        )
        .unwrap_err()
        .downcast()
        .unwrap();
    assert_eq!(err, ContractError::InvalidAuthorizer {});
}

#[test]
fn test_execute_batch() {
    let mut app = App::default();
    let core = instantiate_core(&mut app, Some(CREATOR_ADDR));
    let target = instantiate_target(&mut app);

    let err: ContractError = execute_actions(&mut app, &core, CREATOR_ADDR, vec![])
        .unwrap_err()
        .downcast()
        .unwrap();
    assert_eq!(
        err,
        ContractError::Unauthorized {
            permission_id: EXECUTE_PERMISSION.to_string()
        }
    );

    grant(
        &mut app,
        &core,
        CREATOR_ADDR,
        core.as_str(),
        CREATOR_ADDR,
        EXECUTE_PERMISSION,
    )
    .unwrap();

    let res = execute_actions(
        &mut app,
        &core,
        CREATOR_ADDR,
        vec![set_value(&target, "first"), set_value(&target, "second")],
    )
    .unwrap();

    let results: Vec<Binary> = from_json(res.data.clone().unwrap()).unwrap();
    assert_eq!(
        results,
        vec![
            to_json_binary("first").unwrap(),
            to_json_binary("second").unwrap()
        ]
    );
    assert_eq!(event_attr(&res, "wasm-executed", "executor"), CREATOR_ADDR);

    let value: Option<String> = app
        .wrap()
        .query_wasm_smart(&target, &dao_action_target::msg::QueryMsg::Value {})
        .unwrap();
    assert_eq!(value, Some("second".to_string()));
    let sender: Option<Addr> = app
        .wrap()
        .query_wasm_smart(&target, &dao_action_target::msg::QueryMsg::LastSender {})
        .unwrap();
    assert_eq!(sender, Some(core.clone()));
    let count: u64 = app
        .wrap()
        .query_wasm_smart(&target, &dao_action_target::msg::QueryMsg::CallCount {})
        .unwrap();
    assert_eq!(count, 2);

    // An empty batch succeeds with no results.
    let res = execute_actions(&mut app, &core, CREATOR_ADDR, vec![]).unwrap();
    let results: Vec<Binary> = from_json(res.data.clone().unwrap()).unwrap();
    assert!(results.is_empty());
    assert!(has_event(&res, "wasm-executed"));
}

#[test]
fn test_execute_batch_is_atomic() {
    let mut app = App::default();
    let core = instantiate_core(&mut app, Some(CREATOR_ADDR));
    let target = instantiate_target(&mut app);
    grant(
        &mut app,
        &core,
        CREATOR_ADDR,
        core.as_str(),
        CREATOR_ADDR,
        EXECUTE_PERMISSION,
    )
    .unwrap();

    let err = execute_actions(
        &mut app,
        &core,
        CREATOR_ADDR,
        vec![
            set_value(&target, "first"),
            Action::wasm(
                target.as_str(),
                &dao_action_target::msg::ExecuteMsg::Fail {},
                vec![],
            )
            .unwrap(),
        ],
    )
    .unwrap_err();
    assert!(err
        .root_cause()
        .to_string()
        .contains("action target asked to fail"));

    let value: Option<String> = app
        .wrap()
        .query_wasm_smart(&target, &dao_action_target::msg::QueryMsg::Value {})
        .unwrap();
    assert_eq!(value, None);
    let count: u64 = app
        .wrap()
        .query_wasm_smart(&target, &dao_action_target::msg::QueryMsg::CallCount {})
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn test_execute_rejects_bad_batches() {
    let mut app = App::default();
    let core = instantiate_core(&mut app, Some(CREATOR_ADDR));
    let target = instantiate_target(&mut app);
    grant(
        &mut app,
        &core,
        CREATOR_ADDR,
        core.as_str(),
        CREATOR_ADDR,
        EXECUTE_PERMISSION,
    )
    .unwrap();

    let actions = (0..=MAX_ACTIONS)
        .map(|i| set_value(&target, &i.to_string()))
        .collect();
    let err: ContractError = execute_actions(&mut app, &core, CREATOR_ADDR, actions)
        .unwrap_err()
        .downcast()
        .unwrap();
    assert_eq!(err, ContractError::TooManyActions { max: MAX_ACTIONS });

    let err: ContractError = execute_actions(
        &mut app,
        &core,
        CREATOR_ADDR,
        vec![
            set_value(&target, "first"),
            Action::transfer(BOB, vec![]),
        ],
    )
    .unwrap_err()
    .downcast()
    .unwrap();
    assert_eq!(err, ContractError::EmptyAction { index: 1 });
}

#[test]
fn test_set_metadata() {
    let mut app = App::default();
    let core = instantiate_core(&mut app, Some(CREATOR_ADDR));
    let metadata = Binary::from(b"ipfs://new-metadata");

    let set_metadata = ExecuteMsg::SetMetadata {
        metadata: metadata.clone(),
    };
    let err: ContractError = app
        .execute_contract(Addr::unchecked(CREATOR_ADDR), core.clone(), &set_metadata, &[])
        .unwrap_err()
        .downcast()
        .unwrap();
    assert_eq!(
        err,
        ContractError::Unauthorized {
            permission_id: SET_METADATA_PERMISSION.to_string()
        }
    );

    grant(
        &mut app,
        &core,
        CREATOR_ADDR,
        core.as_str(),
        CREATOR_ADDR,
        SET_METADATA_PERMISSION,
    )
    .unwrap();
    let res = app
        .execute_contract(Addr::unchecked(CREATOR_ADDR), core.clone(), &set_metadata, &[])
        .unwrap();
    assert_eq!(
        event_attr(&res, "wasm-set_metadata", "metadata"),
        metadata.to_base64()
    );

    let stored: Binary = app
        .wrap()
        .query_wasm_smart(&core, &QueryMsg::Metadata {})
        .unwrap();
    assert_eq!(stored, metadata);
}

#[test]
fn test_native_treasury() {
    let mut app = App::new(|router, _, storage| {
        router
            .bank
            .init_balance(
                storage,
                &Addr::unchecked(CREATOR_ADDR),
                vec![coin(1_000, DENOM), coin(1_000, "uatom")],
            )
            .unwrap();
    });
    let core = instantiate_core(&mut app, Some(CREATOR_ADDR));

    let deposit = ExecuteMsg::Deposit {
        reference: "membership fee".to_string(),
    };
    let err: ContractError = app
        .execute_contract(Addr::unchecked(CREATOR_ADDR), core.clone(), &deposit, &[])
        .unwrap_err()
        .downcast()
        .unwrap();
    assert_eq!(err, ContractError::Payment(PaymentError::NoFunds {}));

    let err: ContractError = app
        .execute_contract(
            Addr::unchecked(CREATOR_ADDR),
            core.clone(),
            &deposit,
            &[coin(10, DENOM), coin(10, "uatom")],
        )
        .unwrap_err()
        .downcast()
        .unwrap();
    assert_eq!(err, ContractError::Payment(PaymentError::MultipleDenoms {}));

    let res = app
        .execute_contract(
            Addr::unchecked(CREATOR_ADDR),
            core.clone(),
            &deposit,
            &coins(100, DENOM),
        )
        .unwrap();
    assert_eq!(event_attr(&res, "wasm-deposited", "sender"), CREATOR_ADDR);
    assert_eq!(event_attr(&res, "wasm-deposited", "token"), DENOM);
    assert_eq!(event_attr(&res, "wasm-deposited", "amount"), "100");
    assert_eq!(
        event_attr(&res, "wasm-deposited", "reference"),
        "membership fee"
    );

    let withdraw = |amount: u128| ExecuteMsg::Withdraw {
        token: Denom::Native(DENOM.to_string()),
        to: BOB.to_string(),
        amount: Uint128::new(amount),
        reference: "grant".to_string(),
    };
    let err: ContractError = app
        .execute_contract(Addr::unchecked(CREATOR_ADDR), core.clone(), &withdraw(40), &[])
        .unwrap_err()
        .downcast()
        .unwrap();
    assert_eq!(
        err,
        ContractError::Unauthorized {
            permission_id: WITHDRAW_PERMISSION.to_string()
        }
    );

    grant(
        &mut app,
        &core,
        CREATOR_ADDR,
        core.as_str(),
        CREATOR_ADDR,
        WITHDRAW_PERMISSION,
    )
    .unwrap();

    let err: ContractError = app
        .execute_contract(Addr::unchecked(CREATOR_ADDR), core.clone(), &withdraw(0), &[])
        .unwrap_err()
        .downcast()
        .unwrap();
    assert_eq!(err, ContractError::ZeroWithdraw {});

    let res = app
        .execute_contract(Addr::unchecked(CREATOR_ADDR), core.clone(), &withdraw(40), &[])
        .unwrap();
    assert_eq!(event_attr(&res, "wasm-withdrawn", "to"), BOB);
    assert_eq!(event_attr(&res, "wasm-withdrawn", "reference"), "grant");
    assert_eq!(
        app.wrap().query_balance(BOB, DENOM).unwrap().amount,
        Uint128::new(40)
    );

    // Plain transfers go through the execution engine as well.
    grant(
        &mut app,
        &core,
        CREATOR_ADDR,
        core.as_str(),
        CREATOR_ADDR,
        EXECUTE_PERMISSION,
    )
    .unwrap();
    execute_actions(
        &mut app,
        &core,
        CREATOR_ADDR,
        vec![Action::transfer(BOB, coins(10, DENOM))],
    )
    .unwrap();
    assert_eq!(
        app.wrap().query_balance(BOB, DENOM).unwrap().amount,
        Uint128::new(50)
    );
    assert_eq!(
        app.wrap().query_balance(&core, DENOM).unwrap().amount,
        Uint128::new(50)
    );
}

#[test]
fn test_cw20_treasury() {
    let mut app = App::default();
    let core = instantiate_core(&mut app, Some(CREATOR_ADDR));

    let token_id = app.store_code(governance_token_contract());
    let token = app
        .instantiate_contract(
            token_id,
            Addr::unchecked(CREATOR_ADDR),
            &dao_governance_token::msg::InstantiateMsg {
                name: "DAO".to_string(),
                symbol: "DAO".to_string(),
                decimals: 6,
                initial_balances: vec![Cw20Coin {
                    address: core.to_string(),
                    amount: Uint128::new(100),
                }],
                minter: None,
            },
            &[],
            "token",
            None,
        )
        .unwrap();

    let res = app
        .execute_contract(
            token.clone(),
            core.clone(),
            &ExecuteMsg::Receive(Cw20ReceiveMsg {
                sender: ALICE.to_string(),
                amount: Uint128::new(5),
                msg: Binary::from(b"invoice 42"),
            }),
            &[],
        )
        .unwrap();
    assert_eq!(event_attr(&res, "wasm-deposited", "sender"), ALICE);
    assert_eq!(event_attr(&res, "wasm-deposited", "token"), token.to_string());
    assert_eq!(event_attr(&res, "wasm-deposited", "reference"), "invoice 42");

    grant(
        &mut app,
        &core,
        CREATOR_ADDR,
        core.as_str(),
        CREATOR_ADDR,
        WITHDRAW_PERMISSION,
    )
    .unwrap();
    app.execute_contract(
        Addr::unchecked(CREATOR_ADDR),
        core.clone(),
        &ExecuteMsg::Withdraw {
            token: Denom::Cw20(token.clone()),
            to: BOB.to_string(),
            amount: Uint128::new(30),
            reference: "bounty".to_string(),
        },
        &[],
    )
    .unwrap();

    let balance = |app: &App, address: &str| -> Uint128 {
        let res: cw20::BalanceResponse = app
            .wrap()
            .query_wasm_smart(
                &token,
                &dao_governance_token::msg::QueryMsg::Balance {
                    address: address.to_string(),
                },
            )
            .unwrap();
        res.balance
    };
    assert_eq!(balance(&app, BOB), Uint128::new(30));
    assert_eq!(balance(&app, core.as_str()), Uint128::new(70));
}

#[test]
fn test_signature_validator() {
    let mut app = App::default();
    let core = instantiate_core(&mut app, Some(CREATOR_ADDR));
    let validator_id = app.store_code(signature_validator_contract());
    let validator = app
        .instantiate_contract(
            validator_id,
            Addr::unchecked(CREATOR_ADDR),
            &Empty {},
            &[],
            "validator",
            None,
        )
        .unwrap();

    let is_valid = |app: &App, signature: &[u8]| -> bool {
        app.wrap()
            .query_wasm_smart(
                &core,
                &QueryMsg::IsValidSignature {
                    hash: Binary::from(b"hash"),
                    signature: Binary::from(signature),
                },
            )
            .unwrap()
    };
    assert!(!is_valid(&app, b"hash"));

    let set_validator = |validator: Option<&Addr>| ExecuteMsg::SetSignatureValidator {
        validator: validator.map(Addr::to_string),
    };
    let err: ContractError = app
        .execute_contract(
            Addr::unchecked(CREATOR_ADDR),
            core.clone(),
            &set_validator(Some(&validator)),
            &[],
        )
        .unwrap_err()
        .downcast()
        .unwrap();
    assert_eq!(
        err,
        ContractError::Unauthorized {
            permission_id: SET_SIGNATURE_VALIDATOR_PERMISSION.to_string()
        }
    );

    grant(
        &mut app,
        &core,
        CREATOR_ADDR,
        core.as_str(),
        CREATOR_ADDR,
        SET_SIGNATURE_VALIDATOR_PERMISSION,
    )
    .unwrap();
    app.execute_contract(
        Addr::unchecked(CREATOR_ADDR),
        core.clone(),
        &set_validator(Some(&validator)),
        &[],
    )
    .unwrap();

    let stored: Option<Addr> = app
        .wrap()
        .query_wasm_smart(&core, &QueryMsg::SignatureValidator {})
        .unwrap();
    assert_eq!(stored, Some(validator.clone()));
    assert!(is_valid(&app, b"hash"));
    assert!(!is_valid(&app, b"forged"));

    let res = app
        .execute_contract(
            Addr::unchecked(CREATOR_ADDR),
            core.clone(),
            &set_validator(None),
            &[],
        )
        .unwrap();
    assert_eq!(
        event_attr(&res, "wasm-set_signature_validator", "validator"),
        "None"
    );
    assert!(!is_valid(&app, b"hash"));
}

#[test]
fn test_list_permissions() {
    let mut app = App::default();
    let core = instantiate_core(&mut app, Some(CREATOR_ADDR));
    grant(
        &mut app,
        &core,
        CREATOR_ADDR,
        core.as_str(),
        ALICE,
        EXECUTE_PERMISSION,
    )
    .unwrap();

    let list = |app: &App, start_after: Option<PermissionEntryKey>, limit: Option<u32>| {
        let entries: Vec<PermissionEntry> = app
            .wrap()
            .query_wasm_smart(&core, &QueryMsg::ListPermissions { start_after, limit })
            .unwrap();
        entries
    };

    // Keys are ordered by their storage encoding, where the permission
    // id is length prefixed.
    let entries = list(&app, None, None);
    assert_eq!(
        entries
            .iter()
            .map(|e| (e.permission_id.as_str(), e.bearer.as_str()))
            .collect::<Vec<_>>(),
        vec![
            (ROOT_PERMISSION, core.as_str()),
            (ROOT_PERMISSION, CREATOR_ADDR),
            (EXECUTE_PERMISSION, ALICE),
        ]
    );
    assert!(entries
        .iter()
        .all(|e| e.target == core && e.authorizer == PermissionAuthorizer::Allow {}));

    let page = list(
        &app,
        Some(PermissionEntryKey {
            target: core.to_string(),
            permission_id: ROOT_PERMISSION.to_string(),
            bearer: core.to_string(),
        }),
        Some(5),
    );
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].bearer, Addr::unchecked(CREATOR_ADDR));
    assert_eq!(page[1].bearer, Addr::unchecked(ALICE));

    assert_eq!(list(&app, None, Some(1)).len(), 1);
}

#[test]
fn test_upgrade() {
    let mut app = App::default();
    let core = instantiate_core(&mut app, Some(CREATOR_ADDR));
    let new_code_id = app.store_code(dao_core_contract());

    let upgrade = ExecuteMsg::Upgrade {
        new_code_id,
        msg: to_json_binary(&MigrateMsg {}).unwrap(),
    };
    let err: ContractError = app
        .execute_contract(Addr::unchecked(CREATOR_ADDR), core.clone(), &upgrade, &[])
        .unwrap_err()
        .downcast()
        .unwrap();
    assert_eq!(
        err,
        ContractError::Unauthorized {
            permission_id: UPGRADE_PERMISSION.to_string()
        }
    );

    // The DAO migrates itself, so it must be its own admin.
    app.execute(
        Addr::unchecked(CREATOR_ADDR),
        CosmosMsg::Wasm(WasmMsg::UpdateAdmin {
            contract_addr: core.to_string(),
            admin: core.to_string(),
        }),
    )
    .unwrap();
    grant(
        &mut app,
        &core,
        CREATOR_ADDR,
        core.as_str(),
        CREATOR_ADDR,
        UPGRADE_PERMISSION,
    )
    .unwrap();

    let res = app
        .execute_contract(Addr::unchecked(CREATOR_ADDR), core.clone(), &upgrade, &[])
        .unwrap();
    assert_eq!(
        event_attr(&res, "wasm-upgraded", "new_code_id"),
        new_code_id.to_string()
    );
    assert_eq!(
        app.wrap().query_wasm_contract_info(&core).unwrap().code_id,
        new_code_id
    );
    // Permissions survive the migration.
    assert!(has_permission(&app, &core, core.as_str(), CREATOR_ADDR, ROOT_PERMISSION));
}

#[test]
pub fn test_migrate_update_version() {
    let mut deps = mock_dependencies();
    set_contract_version(&mut deps.storage, "my-contract", "old-version").unwrap();
    migrate(deps.as_mut(), mock_env(), MigrateMsg {}).unwrap();
    let version = get_contract_version(&deps.storage).unwrap();
    assert_eq!(version.version, CONTRACT_VERSION);
    assert_eq!(version.contract, CONTRACT_NAME);
}
