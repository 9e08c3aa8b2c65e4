// SPDX-License-Identifier: AGPL-3.0
// PetPals Core - Swipe deck

use crate::notify::{Haptic, Notifier};
use crate::types::PetRecord;
use std::sync::Arc;

/// Number of cards stacked behind the current one
pub const STACK_SIZE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Like,
    Nope,
}

/// Endless deck of pet cards. Swiping past the last card starts over.
pub struct SwipeDeck {
    cards: Vec<PetRecord>,
    index: usize,
    notifier: Option<Arc<dyn Notifier>>,
}

impl SwipeDeck {
    pub fn new(cards: Vec<PetRecord>) -> Self {
        Self {
            cards,
            index: 0,
            notifier: None,
        }
    }

    /// Give a success haptic on every like and a heavy one on every nope
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&PetRecord> {
        self.cards.get(self.index)
    }

    /// The current card followed by the ones stacked behind it
    pub fn stack(&self) -> Vec<&PetRecord> {
        if self.cards.is_empty() {
            return Vec::new();
        }
        (0..STACK_SIZE.min(self.cards.len()))
            .map(|offset| &self.cards[(self.index + offset) % self.cards.len()])
            .collect()
    }

    /// Swipe the current card away and return it
    pub fn swipe(&mut self, direction: SwipeDirection) -> Option<PetRecord> {
        let pet = self.current()?.clone();

        if let Some(notifier) = &self.notifier {
            notifier.haptic(match direction {
                SwipeDirection::Like => Haptic::Success,
                SwipeDirection::Nope => Haptic::Heavy,
            });
        }

        self.index = if self.index + 1 >= self.cards.len() {
            0
        } else {
            self.index + 1
        };

        Some(pet)
    }
}
