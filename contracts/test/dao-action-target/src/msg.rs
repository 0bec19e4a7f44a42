use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Addr;

#[cw_serde]
pub struct InstantiateMsg {
    /// If true, every execute message fails.
    pub should_error: bool,
}

#[cw_serde]
pub enum ExecuteMsg {
    SetValue { value: String },
    Fail {},
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(Option<String>)]
    Value {},
    #[returns(Option<Addr>)]
    LastSender {},
    #[returns(u64)]
    CallCount {},
}
