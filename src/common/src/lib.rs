#![no_std]

pub mod fee;
pub mod math;
pub mod ownable;
pub mod pausable;


pub use fee::FeeState;
pub use ownable::Ownable;
pub use pausable::Pausable;

/// Instance storage is bumped to roughly seven days on every entry point.
pub const INSTANCE_BUMP_AMOUNT: u32 = 120_960;
pub const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - 17_280;

/// One whole unit of any asset handled by these contracts (18 decimals).
pub const UNIT: i128 = 1_000_000_000_000_000_000;
