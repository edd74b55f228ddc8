use soroban_sdk::{contractevent, Address};

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Mint {
    pub to: Address,
    pub base_amount: i128,
    pub token_amount: i128,
    pub credits: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Burn {
    pub to: Address,
    pub credits: i128,
    pub base_out: i128,
    pub token_out: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Swap {
    pub to: Address,
    pub base_in: i128,
    pub token_in: i128,
    pub base_out: i128,
    pub token_out: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReservesSynced {
    pub reserve_base: i128,
    pub reserve_token: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CreditTransfer {
    pub from: Address,
    pub to: Address,
    pub amount: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CreditApproval {
    pub from: Address,
    pub spender: Address,
    pub amount: i128,
}
