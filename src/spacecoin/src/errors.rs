use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum TokenError {
    AlreadyInitialized = 100,
    NotInitialized = 101,
    OnlyOwner = 102,
    NegativeAmount = 103,
    InsufficientBalance = 104,
    InsufficientAllowance = 105,
    InvalidExpiration = 106,
    Overflow = 107,
}
