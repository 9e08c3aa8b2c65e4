// SPDX-License-Identifier: AGPL-3.0
// PetPals Core - Adoption simulation
//
// Picks one favorite at random and celebrates it. Nothing is persisted:
// the favorite stays a favorite.

use crate::notify::{dispatch, Haptic, Notification, Notifier};
use crate::types::{AppError, PetRecord};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

/// Source of uniformly chosen indices
pub trait IndexPicker {
    /// Pick an index in `0..len`. Never called with `len == 0`.
    fn pick(&mut self, len: usize) -> usize;
}

/// `IndexPicker` backed by a `rand` generator
pub struct RandomPicker<R: Rng = StdRng> {
    rng: R,
}

impl RandomPicker<StdRng> {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible picks for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> RandomPicker<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> IndexPicker for RandomPicker<R> {
    fn pick(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Haptic pattern played once the adoption notification is out
const CELEBRATION: [Haptic; 3] = [Haptic::Light, Haptic::Success, Haptic::Light];

pub struct AdoptionSimulator<P: IndexPicker = RandomPicker> {
    picker: P,
    notifier: Arc<dyn Notifier>,
    notifications_enabled: bool,
}

impl<P: IndexPicker> AdoptionSimulator<P> {
    pub fn new(picker: P, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            picker,
            notifier,
            notifications_enabled: true,
        }
    }

    /// Skip the notification (but still pick) when the user turned them off
    pub fn with_notifications(mut self, enabled: bool) -> Self {
        self.notifications_enabled = enabled;
        self
    }

    /// Choose one of `favorites` and announce its adoption
    pub fn simulate(&mut self, favorites: &[PetRecord]) -> Result<PetRecord, AppError> {
        if favorites.is_empty() {
            return Err(AppError::EmptySelection);
        }

        let pet = favorites[self.picker.pick(favorites.len())].clone();
        tracing::info!("Simulated adoption of {} ({})", pet.name, pet.id);

        if self.notifications_enabled
            && dispatch(self.notifier.as_ref(), Notification::adopted(&pet.name))
        {
            for feedback in CELEBRATION {
                self.notifier.haptic(feedback);
            }
        }

        Ok(pet)
    }
}

/// Confirmation shown once an adoption was simulated
pub fn adoption_message(pet: &PetRecord) -> String {
    format!("{} has been adopted", pet.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::seed_pets;
    use std::sync::Mutex;

    struct FixedPicker(usize);

    impl IndexPicker for FixedPicker {
        fn pick(&mut self, _len: usize) -> usize {
            self.0
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        sent: Mutex<Vec<Notification>>,
        haptics: Mutex<Vec<Haptic>>,
        offline: bool,
    }

    impl Notifier for RecordingNotifier {
        fn send(&self, notification: Notification) -> Result<(), AppError> {
            if self.offline {
                return Err(AppError::Notification("offline".to_string()));
            }
            self.sent.lock().unwrap().push(notification);
            Ok(())
        }

        fn haptic(&self, feedback: Haptic) {
            self.haptics.lock().unwrap().push(feedback);
        }
    }

    fn luna_and_milo() -> Vec<PetRecord> {
        seed_pets()
            .into_iter()
            .filter(|p| p.name == "Luna" || p.name == "Milo")
            .collect()
    }

    #[test]
    fn test_fixed_pick_notifies_with_name() {
        let notifier = Arc::new(RecordingNotifier::default());
        let mut simulator = AdoptionSimulator::new(FixedPicker(0), notifier.clone());

        let pet = simulator.simulate(&luna_and_milo()).unwrap();
        assert_eq!(pet.name, "Luna");
        assert_eq!(adoption_message(&pet), "Luna has been adopted");

        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].data["petName"], "Luna");
        assert_eq!(
            *notifier.haptics.lock().unwrap(),
            vec![Haptic::Light, Haptic::Success, Haptic::Light]
        );
    }

    #[test]
    fn test_failed_notification_gives_medium_haptic_only() {
        let notifier = Arc::new(RecordingNotifier {
            offline: true,
            ..Default::default()
        });
        let mut simulator = AdoptionSimulator::new(FixedPicker(0), notifier.clone());

        let pet = simulator.simulate(&luna_and_milo()).unwrap();
        assert_eq!(pet.name, "Luna");
        assert!(notifier.sent.lock().unwrap().is_empty());
        assert_eq!(*notifier.haptics.lock().unwrap(), vec![Haptic::Medium]);
    }

    #[test]
    fn test_empty_favorites_sends_nothing() {
        let notifier = Arc::new(RecordingNotifier::default());
        let mut simulator = AdoptionSimulator::new(FixedPicker(0), notifier.clone());

        assert!(matches!(
            simulator.simulate(&[]),
            Err(AppError::EmptySelection)
        ));
        assert!(notifier.sent.lock().unwrap().is_empty());
    }

    #[test]
    fn test_disabled_notifications_still_pick() {
        let notifier = Arc::new(RecordingNotifier::default());
        let mut simulator =
            AdoptionSimulator::new(FixedPicker(1), notifier.clone()).with_notifications(false);

        let pet = simulator.simulate(&luna_and_milo()).unwrap();
        assert_eq!(pet.name, "Milo");
        assert!(notifier.sent.lock().unwrap().is_empty());
        assert!(notifier.haptics.lock().unwrap().is_empty());
    }

    #[test]
    fn test_seeded_picker_is_reproducible() {
        let mut a = RandomPicker::seeded(7);
        let mut b = RandomPicker::seeded(7);
        let picks_a: Vec<_> = (0..20).map(|_| a.pick(5)).collect();
        let picks_b: Vec<_> = (0..20).map(|_| b.pick(5)).collect();
        assert_eq!(picks_a, picks_b);
        assert!(picks_a.iter().all(|&i| i < 5));
    }
}
