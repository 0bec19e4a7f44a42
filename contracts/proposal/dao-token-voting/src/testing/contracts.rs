use cosmwasm_std::Empty;
use cw_multi_test::{Contract, ContractWrapper};

// Registered from this crate so that errors downcast to our
// `ContractError`.
pub(crate) fn token_voting_contract() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        crate::contract::execute,
        crate::contract::instantiate,
        crate::contract::query,
    )
    .with_migrate(crate::contract::migrate);
    Box::new(contract)
}
