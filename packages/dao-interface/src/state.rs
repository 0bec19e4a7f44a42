use std::fmt;

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{to_json_binary, Addr, BankMsg, Binary, Coin, CosmosMsg, StdResult, WasmMsg};
use serde::Serialize;

/// Maximum number of actions the DAO executes in a single batch.
pub const MAX_ACTIONS: usize = 256;

/// A single call made by the DAO when it executes a batch of actions.
#[cw_serde]
pub struct Action {
    /// The account or contract being called.
    pub to: String,
    /// Funds sent along with the call.
    pub value: Vec<Coin>,
    /// JSON encoded execute message for `to`. Leave empty for a plain
    /// transfer of `value`.
    pub data: Binary,
}

impl Action {
    /// An action calling `to` with the JSON encoding of `msg`.
    pub fn wasm<T: Serialize>(to: impl Into<String>, msg: &T, value: Vec<Coin>) -> StdResult<Self> {
        Ok(Self {
            to: to.into(),
            value,
            data: to_json_binary(msg)?,
        })
    }

    /// An action transferring `value` to `to`.
    pub fn transfer(to: impl Into<String>, value: Vec<Coin>) -> Self {
        Self {
            to: to.into(),
            value,
            data: Binary::default(),
        }
    }

    /// Converts the action into the message the DAO dispatches. Returns
    /// None for an action that neither calls a contract nor moves
    /// funds.
    pub fn into_cosmos_msg(self) -> Option<CosmosMsg> {
        if !self.data.is_empty() {
            Some(
                WasmMsg::Execute {
                    contract_addr: self.to,
                    msg: self.data,
                    funds: self.value,
                }
                .into(),
            )
        } else if !self.value.is_empty() {
            Some(
                BankMsg::Send {
                    to_address: self.to,
                    amount: self.value,
                }
                .into(),
            )
        } else {
            None
        }
    }
}

/// How a granted permission is resolved when it is checked.
#[cw_serde]
pub enum PermissionAuthorizer {
    /// The bearer holds the permission unconditionally.
    Allow {},
    /// The bearer holds the permission whenever the contract at `addr`
    /// answers an `IsAuthorized` query with `true`.
    Authorizer { addr: Addr },
}

impl fmt::Display for PermissionAuthorizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PermissionAuthorizer::Allow {} => write!(f, "allow"),
            PermissionAuthorizer::Authorizer { addr } => write!(f, "{addr}"),
        }
    }
}
