use crate::domain::intents::Intent;

/// Port for dispatching state-mutating intents to the host store.
pub trait IntentSink: Send + Sync {
    /// Hands an intent to the host application.
    fn dispatch(&self, intent: Intent);
}
