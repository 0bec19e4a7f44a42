use cosmwasm_std::Empty;

use cw_multi_test::{Contract, ContractWrapper};

pub fn dao_core_contract() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        dao_core::contract::execute,
        dao_core::contract::instantiate,
        dao_core::contract::query,
    )
    .with_reply(dao_core::contract::reply)
    .with_migrate(dao_core::contract::migrate);
    Box::new(contract)
}

pub fn token_voting_contract() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        dao_token_voting::contract::execute,
        dao_token_voting::contract::instantiate,
        dao_token_voting::contract::query,
    )
    .with_migrate(dao_token_voting::contract::migrate);
    Box::new(contract)
}

pub fn governance_token_contract() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        dao_governance_token::contract::execute,
        dao_governance_token::contract::instantiate,
        dao_governance_token::contract::query,
    )
    .with_migrate(dao_governance_token::contract::migrate);
    Box::new(contract)
}

pub fn wrapped_token_contract() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        dao_wrapped_token::contract::execute,
        dao_wrapped_token::contract::instantiate,
        dao_wrapped_token::contract::query,
    )
    .with_migrate(dao_wrapped_token::contract::migrate);
    Box::new(contract)
}

pub fn cw20_base_contract() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        cw20_base::contract::execute,
        cw20_base::contract::instantiate,
        cw20_base::contract::query,
    );
    Box::new(contract)
}

pub fn dao_factory_contract() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        dao_factory::contract::execute,
        dao_factory::contract::instantiate,
        dao_factory::contract::query,
    )
    .with_reply(dao_factory::contract::reply);
    Box::new(contract)
}

pub fn whitelist_authorizer_contract() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        dao_authorizer_whitelist::contract::execute,
        dao_authorizer_whitelist::contract::instantiate,
        dao_authorizer_whitelist::contract::query,
    );
    Box::new(contract)
}

pub fn deadline_authorizer_contract() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        dao_authorizer_deadline::contract::execute,
        dao_authorizer_deadline::contract::instantiate,
        dao_authorizer_deadline::contract::query,
    );
    Box::new(contract)
}

pub fn action_target_contract() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        dao_action_target::contract::execute,
        dao_action_target::contract::instantiate,
        dao_action_target::contract::query,
    );
    Box::new(contract)
}
