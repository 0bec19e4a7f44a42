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

/// The cw20 token held one to one against wrapped balances.
pub const UNDERLYING: Item<Addr> = Item::new("underlying");

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
