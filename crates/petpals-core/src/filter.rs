// SPDX-License-Identifier: AGPL-3.0
// PetPals Core - Listing filter
//
// Narrow the catalog by species button and free-text search.
// Pure functions, cheap enough to rerun on every keystroke.

use crate::types::PetRecord;

/// Species buttons on the listing screen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SpeciesFilter {
    #[default]
    All,
    Dog,
    Cat,
    Rabbit,
}

impl SpeciesFilter {
    pub const ALL: [SpeciesFilter; 4] = [
        SpeciesFilter::All,
        SpeciesFilter::Dog,
        SpeciesFilter::Cat,
        SpeciesFilter::Rabbit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Dog => "Dog",
            Self::Cat => "Cat",
            Self::Rabbit => "Rabbit",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.label().eq_ignore_ascii_case(label.trim()))
    }

    /// Exact, case-sensitive species match
    pub fn matches(&self, pet: &PetRecord) -> bool {
        match self {
            Self::All => true,
            other => pet.species == other.label(),
        }
    }
}

/// Search text and species selection of one listing session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search_query: String,
    pub selected_species: SpeciesFilter,
}

impl FilterState {
    pub fn new(search_query: impl Into<String>, selected_species: SpeciesFilter) -> Self {
        Self {
            search_query: search_query.into(),
            selected_species,
        }
    }

    pub fn apply(&self, catalog: &[PetRecord]) -> FilterResult {
        FilterResult::from(filter_pets(
            catalog,
            &self.search_query,
            self.selected_species,
        ))
    }
}

/// Outcome of filtering, with the empty case spelled out for the listing
#[derive(Debug, Clone, PartialEq)]
pub enum FilterResult {
    Pets(Vec<PetRecord>),
    NoResults,
}

impl From<Vec<PetRecord>> for FilterResult {
    fn from(pets: Vec<PetRecord>) -> Self {
        if pets.is_empty() {
            Self::NoResults
        } else {
            Self::Pets(pets)
        }
    }
}

impl FilterResult {
    pub fn pets(&self) -> &[PetRecord] {
        match self {
            Self::Pets(pets) => pets,
            Self::NoResults => &[],
        }
    }
}

/// Pets matching `species` and containing `query` in name, breed or species.
///
/// Species is checked first; an all-blank query matches everything.
/// A non-blank query is matched as typed, surrounding spaces included.
pub fn filter_pets(catalog: &[PetRecord], query: &str, species: SpeciesFilter) -> Vec<PetRecord> {
    let blank = query.trim().is_empty();
    let query = query.to_lowercase();

    catalog
        .iter()
        .filter(|pet| species.matches(pet))
        .filter(|pet| blank || matches_query(pet, &query))
        .cloned()
        .collect()
}

fn matches_query(pet: &PetRecord, query: &str) -> bool {
    pet.name.to_lowercase().contains(query)
        || pet.breed.to_lowercase().contains(query)
        || pet.species.to_lowercase().contains(query)
}
