use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum RouterError {
    AlreadyInitialized = 300,
    NotInitialized = 301,
    OnlyOwner = 302,
    InsufficientAmount = 303,
    InsufficientInputAmount = 304,
    InsufficientLiquidity = 305,
    Slippage = 306,
    Overflow = 307,
}
