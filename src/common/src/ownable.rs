use soroban_sdk::{contractevent, contracttype, Address, Env};

#[contracttype]
#[derive(Clone)]
pub enum OwnableKey {
    Owner,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnershipTransferred {
    pub previous_owner: Address,
    pub new_owner: Address,
}

/// Single privileged account stored in the contract's instance storage.
///
/// Each contract picks the errors it reports through the two associated
/// constants, so `require_owner` composes with `?` inside its entry points.
pub trait Ownable {
    type Error;

    const NOT_OWNER: Self::Error;
    const NOT_INITIALIZED: Self::Error;

    fn has_owner(env: &Env) -> bool {
        env.storage().instance().has(&OwnableKey::Owner)
    }

    fn read_owner(env: &Env) -> Result<Address, Self::Error> {
        env.storage()
            .instance()
            .get(&OwnableKey::Owner)
            .ok_or(Self::NOT_INITIALIZED)
    }

    fn write_owner(env: &Env, owner: &Address) {
        env.storage().instance().set(&OwnableKey::Owner, owner);
    }

    /// Authenticates `caller`, then checks it is the stored owner.
    fn require_owner(env: &Env, caller: &Address) -> Result<(), Self::Error> {
        caller.require_auth();
        let owner = Self::read_owner(env)?;
        if &owner != caller {
            return Err(Self::NOT_OWNER);
        }
        Ok(())
    }

    fn transfer_owner(env: &Env, caller: &Address, new_owner: &Address) -> Result<(), Self::Error> {
        Self::require_owner(env, caller)?;
        Self::write_owner(env, new_owner);

        OwnershipTransferred {
            previous_owner: caller.clone(),
            new_owner: new_owner.clone(),
        }
        .publish(env);

        Ok(())
    }
}
