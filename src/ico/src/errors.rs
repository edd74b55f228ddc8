use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum IcoError {
    AlreadyInitialized = 400,
    NotInitialized = 401,
    OnlyTreasury = 402,
    InvalidAmount = 403,
    PausedCampaign = 404,
    Whitelist = 405,
    ExceedsMaxContribution = 406,
    InsufficientAvailability = 407,
    IncorrectPhase = 408,
    NoTokens = 409,
    IcoActive = 410,
    Overflow = 411,
}
