use soroban_sdk::{contractevent, contracttype, Env};

#[contracttype]
#[derive(Clone)]
pub enum PausableKey {
    Paused,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PauseToggled {
    pub paused: bool,
}

/// A stored pause flag. Only the entry points that call
/// `require_not_paused` are blocked by it.
pub trait Pausable {
    type Error;

    const PAUSED: Self::Error;

    fn paused(env: &Env) -> bool {
        env.storage()
            .instance()
            .get(&PausableKey::Paused)
            .unwrap_or(false)
    }

    fn write_paused(env: &Env, paused: bool) {
        env.storage().instance().set(&PausableKey::Paused, &paused);
        PauseToggled { paused }.publish(env);
    }

    fn require_not_paused(env: &Env) -> Result<(), Self::Error> {
        if Self::paused(env) {
            return Err(Self::PAUSED);
        }
        Ok(())
    }
}
