use cosmwasm_std::Addr;
use cw_storage_plus::Item;

pub const SHOULD_ERROR: Item<bool> = Item::new("should_error");
pub const VALUE: Item<Option<String>> = Item::new("value");
pub const LAST_SENDER: Item<Option<Addr>> = Item::new("last_sender");
pub const CALL_COUNT: Item<u64> = Item::new("call_count");
