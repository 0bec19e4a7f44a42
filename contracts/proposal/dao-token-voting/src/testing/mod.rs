mod contracts;
mod execute;
mod instantiate;
mod queries;

pub(crate) const CREATOR_ADDR: &str = "creator";
pub(crate) const ALICE: &str = "alice";
pub(crate) const BOB: &str = "bob";
pub(crate) const CAROL: &str = "carol";
