//! Keyed transition group: children animate in when their key appears and out when it
//! disappears, staying rendered until the exit completes.

use std::fmt::{self, Debug};

use leptos::logging;

use crate::{
    listener::TransitionListener,
    machine::TransitionMachine,
    model::{TransitionConfig, TransitionRequest, TransitionStatus},
    scheduler::ManualScheduler,
    timer::{PhaseScheduler, TimerHandle},
};

type Spawn<K, S, L> = Box<dyn FnMut(&K) -> (S, L)>;

struct GroupEntry<K, S: PhaseScheduler, L: TransitionListener> {
    key: K,
    machine: TransitionMachine<S, L>,
}

impl<K, S: PhaseScheduler, L: TransitionListener> GroupEntry<K, S, L> {
    fn is_departed(&self) -> bool {
        !self.machine.is_visible() && self.machine.status().is_hidden()
    }
}

/// Ordered set of keyed transition machines sharing one config.
pub struct TransitionGroup<K, S: PhaseScheduler, L: TransitionListener = ()> {
    config: TransitionConfig,
    entries: Vec<GroupEntry<K, S, L>>,
    spawn: Spawn<K, S, L>,
}

impl<K: Debug, S: PhaseScheduler, L: TransitionListener> Debug for TransitionGroup<K, S, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionGroup")
            .field("config", &self.config)
            .field(
                "entries",
                &self
                    .entries
                    .iter()
                    .map(|entry| (&entry.key, entry.machine.status()))
                    .collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

impl<K, S, L> TransitionGroup<K, S, L>
where
    K: Clone + PartialEq + Debug,
    S: PhaseScheduler,
    L: TransitionListener,
{
    /// Creates a group whose `initial` keys are shown without animating. Repeated keys keep
    /// their first position.
    ///
    /// `spawn` supplies the scheduler and listener for every entry, including re-added keys.
    pub fn new(
        config: TransitionConfig,
        initial: &[K],
        spawn: impl FnMut(&K) -> (S, L) + 'static,
    ) -> Self {
        let mut group = Self {
            config,
            entries: Vec::with_capacity(initial.len()),
            spawn: Box::new(spawn),
        };
        for (index, key) in initial.iter().enumerate() {
            if initial[..index].contains(key) {
                continue;
            }
            let entry = group.spawn_entry(key, TransitionRequest::new(true));
            group.entries.push(entry);
        }
        group
    }

    /// Reconciles the group with the caller's current key list.
    ///
    /// New keys enter with an animation, missing keys start exiting and stay in place until
    /// they finish, and keys that come back while exiting reverse into entering. Departing
    /// entries keep their position relative to the surviving keys. Repeated keys keep their
    /// first position.
    pub fn sync(&mut self, keys: &[K]) {
        let mut previous: Vec<GroupEntry<K, S, L>> = std::mem::take(&mut self.entries);
        let mut next = Vec::with_capacity(keys.len().max(previous.len()));

        for (index, key) in keys.iter().enumerate() {
            if keys[..index].contains(key) {
                continue;
            }
            if let Some(position) = previous.iter().position(|entry| entry.key == *key) {
                let mut carried = Vec::new();
                for entry in previous.drain(..=position) {
                    if entry.key == *key {
                        let mut entry = entry;
                        entry.machine.set_visible(true);
                        next.push(entry);
                    } else if keys.contains(&entry.key) {
                        carried.push(entry);
                    } else {
                        next.push(Self::depart(entry));
                    }
                }
                // Keys listed later that sat before this one are revisited in caller order.
                for (offset, entry) in carried.into_iter().enumerate() {
                    previous.insert(offset, entry);
                }
            } else {
                let entry = self.spawn_entry(key, TransitionRequest::new(true).transition_on_mount(true));
                next.push(entry);
            }
        }
        for entry in previous {
            next.push(Self::depart(entry));
        }

        next.retain(|entry| !entry.is_departed());
        self.entries = next;
    }

    /// Delivers a phase timer fire to the entry for `key`.
    ///
    /// Returns whether the fire advanced that entry. Entries whose exit completes are dropped.
    pub fn timer_fired(&mut self, key: &K, handle: TimerHandle) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|entry| entry.key == *key) else {
            logging::debug_warn!("transition group has no entry for {key:?}");
            return false;
        };
        let advanced = entry.machine.timer_fired(handle);
        if advanced {
            self.entries.retain(|entry| !entry.is_departed());
        }
        advanced
    }

    /// Replaces the config for every current and future entry.
    pub fn set_config(&mut self, config: TransitionConfig) {
        for entry in &mut self.entries {
            entry.machine.set_config(config.clone());
        }
        self.config = config;
    }

    /// Shared config.
    pub fn config(&self) -> &TransitionConfig {
        &self.config
    }

    /// Status of the entry for `key`.
    pub fn status_of(&self, key: &K) -> Option<TransitionStatus> {
        self.machine(key).map(TransitionMachine::status)
    }

    /// Machine of the entry for `key`.
    pub fn machine(&self, key: &K) -> Option<&TransitionMachine<S, L>> {
        self.entries
            .iter()
            .find(|entry| entry.key == *key)
            .map(|entry| &entry.machine)
    }

    /// Iterates entries in render order, including ones still exiting.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &TransitionMachine<S, L>)> {
        self.entries.iter().map(|entry| (&entry.key, &entry.machine))
    }

    /// Keys in render order.
    pub fn keys(&self) -> Vec<K> {
        self.entries.iter().map(|entry| entry.key.clone()).collect()
    }

    /// Number of rendered entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether nothing is rendered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn spawn_entry(&mut self, key: &K, request: TransitionRequest) -> GroupEntry<K, S, L> {
        let (scheduler, listener) = (self.spawn)(key);
        GroupEntry {
            key: key.clone(),
            machine: TransitionMachine::new(request, self.config.clone(), scheduler, listener),
        }
    }

    fn depart(mut entry: GroupEntry<K, S, L>) -> GroupEntry<K, S, L> {
        entry.machine.set_visible(false);
        entry
    }
}

impl<K, L> TransitionGroup<K, ManualScheduler, L>
where
    K: Clone + PartialEq + Debug,
    L: TransitionListener,
{
    /// Advances every entry's virtual clock by `ms`, delivering due fires and dropping entries
    /// whose exit completed.
    pub fn advance(&mut self, ms: u64) {
        for entry in &mut self.entries {
            entry.machine.advance(ms);
        }
        self.entries.retain(|entry| !entry.is_departed());
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::listener::{EventQueue, TransitionEvent};
    use crate::model::TransitionStatus::{Entered, Entering, Exiting};

    fn group(initial: &[&'static str]) -> TransitionGroup<&'static str, ManualScheduler> {
        TransitionGroup::new(
            TransitionConfig::new("fade").with_duration(100),
            initial,
            |_| (ManualScheduler::new(), ()),
        )
    }

    #[test]
    fn initial_keys_rest_entered() {
        let group = group(&["a", "b"]);
        assert_eq!(group.keys(), vec!["a", "b"]);
        assert_eq!(group.status_of(&"a"), Some(Entered));
        assert!(group.machine(&"b").and_then(|m| m.pending_timer()).is_none());
    }

    #[test]
    fn added_keys_enter_and_removed_keys_exit_then_leave() {
        let mut group = group(&["a", "b"]);

        group.sync(&["b", "c"]);

        assert_eq!(group.keys(), vec!["a", "b", "c"]);
        assert_eq!(group.status_of(&"a"), Some(Exiting));
        assert_eq!(group.status_of(&"b"), Some(Entered));
        assert_eq!(group.status_of(&"c"), Some(Entering));

        group.advance(100);

        assert_eq!(group.keys(), vec!["b", "c"]);
        assert_eq!(group.status_of(&"c"), Some(Entered));
        assert_eq!(group.status_of(&"a"), None);
    }

    #[test]
    fn key_returning_while_exiting_reverses() {
        let mut group = group(&["a"]);
        group.sync(&[]);
        group.advance(40);
        group.sync(&["a"]);

        assert_eq!(group.status_of(&"a"), Some(Entering));
        group.advance(100);
        assert_eq!(group.keys(), vec!["a"]);
        assert_eq!(group.status_of(&"a"), Some(Entered));
    }

    #[test]
    fn reordered_keys_follow_caller_order() {
        let mut group = group(&["a", "b", "c"]);
        group.sync(&["c", "a", "b"]);
        assert_eq!(group.keys(), vec!["c", "a", "b"]);
    }

    #[test]
    fn repeated_keys_collapse_to_one_entry() {
        let mut group = group(&["a", "a", "b"]);
        assert_eq!(group.keys(), vec!["a", "b"]);

        group.sync(&["c", "b", "c", "a"]);
        assert_eq!(group.keys(), vec!["c", "b", "a"]);

        let handle = group
            .machine(&"c")
            .and_then(TransitionMachine::pending_timer)
            .expect("enter timer");
        assert!(group.timer_fired(&"c", handle));
        assert_eq!(group.status_of(&"c"), Some(Entered));
        assert!(group.iter().all(|(_, machine)| !machine.status().is_transient()));
    }

    #[test]
    fn routed_fires_reach_the_matching_entry() {
        let queue = EventQueue::new();
        let spawn_queue = queue.clone();
        let mut group: TransitionGroup<u32, ManualScheduler, EventQueue> = TransitionGroup::new(
            TransitionConfig::new("scale").with_duration(10),
            &[],
            move |_| (ManualScheduler::new(), spawn_queue.clone()),
        );

        group.sync(&[7]);
        let handle = group
            .machine(&7)
            .and_then(TransitionMachine::pending_timer)
            .expect("enter timer");

        assert!(!group.timer_fired(&8, handle));
        assert!(group.timer_fired(&7, handle));
        assert_eq!(
            queue.drain(),
            vec![
                TransitionEvent::StatusChanged(Entering),
                TransitionEvent::Started(Entering),
                TransitionEvent::StatusChanged(Entered),
                TransitionEvent::Completed(Entered),
                TransitionEvent::Shown(Entered),
            ]
        );
    }
}
