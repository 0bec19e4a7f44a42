/// Default limit for proposal pagination.
pub const DEFAULT_LIMIT: u64 = 30;
/// Maximum size of a serialized proposal, in bytes.
pub const MAX_PROPOSAL_SIZE: u64 = 30_000;
