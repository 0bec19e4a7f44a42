use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;
use cw_storage_plus::Item;
use cw_utils::Expiration;

#[cw_serde]
pub struct Config {
    pub dao: Addr,
    pub expiration: Expiration,
}

pub const CONFIG: Item<Config> = Item::new("config");
