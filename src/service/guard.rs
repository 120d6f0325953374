use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Rejects a save while another save for the same key is in flight or started
/// less than `cooldown` ago. Rejected saves are not queued.
#[derive(Clone)]
pub struct SaveGuard {
    cooldown: Duration,
    slots: Arc<Mutex<HashMap<String, Slot>>>,
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    started: Instant,
    in_flight: bool,
}

/// Held for the duration of a save; dropping it marks the save finished.
pub struct SaveTicket {
    key: String,
    slots: Arc<Mutex<HashMap<String, Slot>>>,
}

impl SaveGuard {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            slots: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn try_acquire(&self, key: &str) -> Option<SaveTicket> {
        self.try_acquire_at(key, Instant::now())
    }

    fn try_acquire_at(&self, key: &str, now: Instant) -> Option<SaveTicket> {
        let mut slots = self.slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        slots.retain(|_, slot| slot.in_flight || now.duration_since(slot.started) < self.cooldown);

        if slots.contains_key(key) {
            return None;
        }

        slots.insert(
            key.to_string(),
            Slot {
                started: now,
                in_flight: true,
            },
        );

        Some(SaveTicket {
            key: key.to_string(),
            slots: Arc::clone(&self.slots),
        })
    }
}

impl Drop for SaveTicket {
    fn drop(&mut self) {
        let mut slots = self.slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(slot) = slots.get_mut(&self.key) {
            slot.in_flight = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COOLDOWN: Duration = Duration::from_millis(1100);

    #[test]
    fn test_second_save_while_in_flight_is_rejected() {
        let guard = SaveGuard::new(COOLDOWN);
        let _ticket = guard.try_acquire("a").unwrap();
        assert!(guard.try_acquire("a").is_none());
    }

    #[test]
    fn test_cooldown_applies_after_save_finishes() {
        let guard = SaveGuard::new(COOLDOWN);
        let start = Instant::now();

        drop(guard.try_acquire_at("a", start).unwrap());

        assert!(guard.try_acquire_at("a", start + Duration::from_millis(500)).is_none());
        assert!(guard.try_acquire_at("a", start + Duration::from_millis(1200)).is_some());
    }

    #[test]
    fn test_slow_save_blocks_past_cooldown() {
        let guard = SaveGuard::new(COOLDOWN);
        let start = Instant::now();

        let _ticket = guard.try_acquire_at("a", start).unwrap();

        assert!(guard.try_acquire_at("a", start + Duration::from_secs(5)).is_none());
    }

    #[test]
    fn test_keys_are_independent() {
        let guard = SaveGuard::new(COOLDOWN);
        let _a = guard.try_acquire("a").unwrap();
        assert!(guard.try_acquire("b").is_some());
    }
}
