use tracing::{info, trace};

use crate::components::{Holder, KillCause, Respawner};

/// Delivered once per processed kill.
#[derive(Debug, Clone, PartialEq)]
pub struct DeathEvent {
    pub actor: String,
    pub cause: KillCause,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type DeathListener = Box<dyn FnMut(&DeathEvent)>;

/// Observer list for actor deaths (score, UI, respawn orchestration).
#[derive(Default)]
pub struct DeathChannel {
    next_id: u64,
    listeners: Vec<(SubscriptionId, DeathListener)>,
}

impl DeathChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&DeathEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    fn emit(&mut self, event: &DeathEvent) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(event);
        }
    }
}

/// Guards kill processing so one death is handled exactly once per respawn
/// cycle.
#[derive(Default)]
pub struct LifeCycleGate {
    last_cause: Option<KillCause>,
    kills: u32,
    pub deaths: DeathChannel,
}

impl LifeCycleGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a kill. A kill arriving while the respawner is mid-cycle is
    /// dropped. Returns whether the kill was processed.
    pub fn kill(
        &mut self,
        actor: &str,
        cause: KillCause,
        holder: &mut Holder,
        respawner: &mut Respawner,
    ) -> bool {
        if respawner.is_respawning() {
            trace!(actor, %cause, "kill ignored, respawn in progress");
            return false;
        }

        let dropped = holder.on_holder_died();
        respawner.register();

        info!(actor, %cause, ?dropped, "actor killed");

        // Every cause shares the same handling for now.
        match cause {
            KillCause::EnvironmentalHazard
            | KillCause::Pitfall
            | KillCause::Projectile
            | KillCause::FriendlyFire => {}
        }

        self.last_cause = Some(cause);
        self.kills += 1;
        self.deaths.emit(&DeathEvent {
            actor: actor.to_string(),
            cause,
        });
        true
    }

    pub fn last_cause(&self) -> Option<KillCause> {
        self.last_cause
    }

    pub fn kills(&self) -> u32 {
        self.kills
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn second_kill_during_respawn_is_dropped() {
        let mut gate = LifeCycleGate::new();
        let mut holder = Holder::new();
        let mut respawner = Respawner::new();

        assert!(gate.kill("p1", KillCause::Pitfall, &mut holder, &mut respawner));
        assert!(!gate.kill("p1", KillCause::Projectile, &mut holder, &mut respawner));

        assert_eq!(holder.deaths(), 1);
        assert_eq!(respawner.registrations(), 1);
        assert_eq!(gate.last_cause(), Some(KillCause::Pitfall));
    }

    #[test]
    fn kill_after_respawn_completes_is_processed() {
        let mut gate = LifeCycleGate::new();
        let mut holder = Holder::new();
        let mut respawner = Respawner::new();

        gate.kill("p1", KillCause::Pitfall, &mut holder, &mut respawner);
        respawner.complete();
        assert!(gate.kill("p1", KillCause::FriendlyFire, &mut holder, &mut respawner));
        assert_eq!(gate.kills(), 2);
        assert_eq!(respawner.registrations(), 2);
    }

    #[test]
    fn listeners_fire_once_per_processed_kill() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut gate = LifeCycleGate::new();
        let sink = seen.clone();
        gate.deaths
            .subscribe(move |e: &DeathEvent| sink.borrow_mut().push(e.cause));

        let mut holder = Holder::new();
        let mut respawner = Respawner::new();
        gate.kill("p1", KillCause::Projectile, &mut holder, &mut respawner);
        gate.kill("p1", KillCause::Projectile, &mut holder, &mut respawner);

        assert_eq!(*seen.borrow(), vec![KillCause::Projectile]);
    }

    #[test]
    fn unsubscribed_listener_is_silent() {
        let count = Rc::new(RefCell::new(0));
        let mut channel = DeathChannel::new();
        let sink = count.clone();
        let id = channel.subscribe(move |_| *sink.borrow_mut() += 1);
        assert!(channel.unsubscribe(id));
        assert!(!channel.unsubscribe(id));
        assert!(channel.listeners.is_empty());

        channel.emit(&DeathEvent {
            actor: "p1".into(),
            cause: KillCause::Pitfall,
        });
        assert_eq!(*count.borrow(), 0);
    }
}
