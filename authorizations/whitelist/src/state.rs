use cosmwasm_std::{Addr, Empty};
use cw_storage_plus::{Item, Map};

pub const DAO: Item<Addr> = Item::new("dao");
pub const ALLOWED: Map<&Addr, Empty> = Map::new("allowed");
