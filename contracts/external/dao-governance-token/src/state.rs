use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::{Item, SnapshotItem, SnapshotMap, Strategy};

#[cw_serde]
pub struct TokenInfo {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

pub const TOKEN_INFO: Item<TokenInfo> = Item::new("token_info");

/// Account allowed to mint new tokens, if any.
pub const MINTER: Item<Option<Addr>> = Item::new("minter");

pub const BALANCES: SnapshotMap<&Addr, Uint128> = SnapshotMap::new(
    "balances",
    "balances__checkpoints",
    "balances__changelog",
    Strategy::EveryBlock,
);

pub const TOTAL_SUPPLY: SnapshotItem<Uint128> = SnapshotItem::new(
    "total_supply",
    "total_supply__checkpoints",
    "total_supply__changelog",
    Strategy::EveryBlock,
);
