use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum PoolError {
    AlreadyInitialized = 200,
    NotInitialized = 201,
    ZeroAddress = 202,
    IdenticalTokens = 203,
    OnlyOwner = 204,
    Unmintable = 205,
    InsufficientLiquidity = 206,
    InsufficientDeposit = 207,
    InsufficientOutputAmount = 208,
    InvalidK = 209,
    InvalidAmount = 210,
    InsufficientBalance = 211,
    InsufficientAllowance = 212,
    Locked = 213,
    Overflow = 214,
}
