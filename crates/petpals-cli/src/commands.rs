// SPDX-License-Identifier: AGPL-3.0
// PetPals CLI - Command Handlers
//
// Each handler returns the text to print so the screens can be tested
// without capturing stdout.

use crate::state::AppState;
use petpals_core::{
    adoption_message, nearby_pets, toggle_message, AdoptionSimulator, AppError, Coordinates,
    FilterResult, FilterState, FixedLocation, Language, PetDraft, PetImage, PetRecord,
    RandomPicker, Species, SpeciesFilter, SwipeDeck, SwipeDirection, Theme,
};
use std::collections::HashSet;
use std::fmt::Write;

type CommandResult<T> = Result<T, AppError>;

fn pet_line(pet: &PetRecord, custom: bool) -> String {
    format!(
        "[{}] {} - {} {} ({}){}",
        pet.id,
        pet.name,
        pet.species,
        pet.breed,
        pet.age,
        if custom { " *" } else { "" }
    )
}

/// List pets matching a search and species button
pub fn list(state: &AppState, query: &str, species: &str) -> CommandResult<String> {
    let species = SpeciesFilter::from_label(species).ok_or_else(|| {
        AppError::Validation(format!(
            "Unknown species filter {:?}. Choose All, Dog, Cat or Rabbit.",
            species
        ))
    })?;

    let catalog = state.catalog.load();
    let custom: HashSet<String> = state
        .catalog
        .custom_pets()
        .unwrap_or_default()
        .into_iter()
        .map(|p| p.id)
        .collect();

    match FilterState::new(query, species).apply(&catalog) {
        FilterResult::NoResults => Ok("No pets found.".to_string()),
        FilterResult::Pets(pets) => Ok(pets
            .iter()
            .map(|p| pet_line(p, custom.contains(&p.id)))
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

/// Show one pet's profile
pub fn show(state: &AppState, id: &str) -> CommandResult<String> {
    let pet = state
        .catalog
        .get(id)
        .ok_or_else(|| AppError::Validation(format!("No pet with id {}", id)))?;
    let favorite = state.favorites.is_favorite(&pet.id)?;

    let mut out = String::new();
    let _ = writeln!(out, "{}", pet.name);
    let _ = writeln!(out, "{} \u{2022} {}", pet.breed, pet.age);
    let _ = writeln!(out, "{}", pet.species);
    let _ = writeln!(out, "{}", pet.description);
    let _ = write!(
        out,
        "{}",
        if favorite {
            "Remove from Favorites"
        } else {
            "Add to Favorites"
        }
    );
    Ok(out)
}

/// Fields of the add-pet form
pub struct AddArgs {
    pub name: String,
    pub age: String,
    pub breed: String,
    pub description: String,
    pub species: String,
    pub image: Option<String>,
}

pub fn add(state: &AppState, args: AddArgs) -> CommandResult<String> {
    let species = Species::from_name(&args.species).ok_or_else(|| {
        AppError::Validation(format!("Unknown species {:?}", args.species))
    })?;

    let draft = PetDraft {
        name: args.name,
        age: args.age,
        breed: args.breed,
        description: args.description,
        species,
        image: args.image.map(PetImage::uri),
    };

    let pet = state.catalog.add_pet(draft)?;
    Ok(format!("{} was added successfully. (id {})", pet.name, pet.id))
}

pub fn delete(state: &AppState, id: &str) -> CommandResult<String> {
    if !state.catalog.is_custom(id) {
        return Ok(format!("Pet {} is not a user-added pet; nothing deleted.", id));
    }
    state.catalog.delete_pet(id)?;
    Ok(format!("Deleted pet {}.", id))
}

/// Toggle a pet on the profile screen
pub fn favorite(state: &AppState, id: &str) -> CommandResult<String> {
    let pet = state
        .catalog
        .get(id)
        .ok_or_else(|| AppError::Validation(format!("No pet with id {}", id)))?;
    let now_favorite = state.favorites.toggle(&pet.id)?;
    Ok(toggle_message(&pet, now_favorite))
}

pub fn favorites(state: &AppState) -> CommandResult<String> {
    let pets = state.favorites.favorite_pets(&state.catalog)?;
    if pets.is_empty() {
        return Ok("No favorites yet.".to_string());
    }
    Ok(pets
        .iter()
        .map(|p| pet_line(p, false))
        .collect::<Vec<_>>()
        .join("\n"))
}

pub fn adopt(state: &AppState, seed: Option<u64>) -> CommandResult<String> {
    let favorites = state.favorites.favorite_pets(&state.catalog)?;
    let picker = match seed {
        Some(seed) => RandomPicker::seeded(seed),
        None => RandomPicker::from_entropy(),
    };

    let mut simulator = AdoptionSimulator::new(picker, state.notifier.clone())
        .with_notifications(state.settings.get().notifications_enabled);
    let pet = simulator.simulate(&favorites)?;
    Ok(adoption_message(&pet))
}

/// Swipe through the built-in pets
pub fn swipe(state: &AppState, moves: &[SwipeDirection]) -> CommandResult<String> {
    let mut deck =
        SwipeDeck::new(state.catalog.seed().to_vec()).with_notifier(state.notifier.clone());

    let mut out = String::new();
    for direction in moves {
        if let Some(pet) = deck.swipe(*direction) {
            let verdict = match direction {
                SwipeDirection::Like => "LIKE",
                SwipeDirection::Nope => "NOPE",
            };
            let _ = writeln!(out, "{} {}", verdict, pet.name);
        }
    }

    let upcoming: Vec<_> = deck.stack().into_iter().map(|p| p.name.as_str()).collect();
    let _ = write!(out, "Next up: {}", upcoming.join(", "));
    Ok(out)
}

pub fn nearby(state: &AppState, lat: Option<f64>, lon: Option<f64>) -> CommandResult<String> {
    let origin = match (lat, lon) {
        (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
        _ => None,
    };

    let (region, markers) = nearby_pets(&FixedLocation(origin), &state.catalog.load())?;

    let mut out = String::new();
    let _ = writeln!(
        out,
        "You are here: {:.4}, {:.4}",
        region.center.latitude, region.center.longitude
    );
    for marker in markers {
        let _ = writeln!(
            out,
            "{:>6.2} km  {} ({})",
            marker.distance_km, marker.title, marker.description
        );
    }
    Ok(out.trim_end().to_string())
}

/// What to change on the settings screen
pub enum SettingsChange {
    Show,
    ToggleTheme,
    Language(String),
    Notifications(bool),
}

pub fn settings(state: &AppState, change: SettingsChange) -> CommandResult<String> {
    match change {
        SettingsChange::Show => {}
        SettingsChange::ToggleTheme => {
            state.settings.toggle_theme()?;
        }
        SettingsChange::Language(code) => {
            if state.settings.set_language(&code)?.is_none() {
                let supported: Vec<_> = Language::ALL.iter().map(|l| l.code()).collect();
                return Ok(format!(
                    "Unsupported language {:?}; choose one of {}",
                    code,
                    supported.join(", ")
                ));
            }
        }
        SettingsChange::Notifications(enabled) => {
            state.settings.set_notifications_enabled(enabled)?;
        }
    }

    let current = state.settings.get();
    Ok(format!(
        "Dark mode: {}\nLanguage: {}\nNotifications: {}",
        if current.theme == Theme::Dark { "on" } else { "off" },
        current.language.label(),
        if current.notifications_enabled { "on" } else { "off" }
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use petpals_core::{AppEvent, Storage};

    fn state() -> (AppState, async_channel::Receiver<AppEvent>) {
        AppState::with_storage(Storage::in_memory())
    }

    fn buddy() -> AddArgs {
        AddArgs {
            name: "Buddy".to_string(),
            age: "2".to_string(),
            breed: "Beagle".to_string(),
            description: "Loves walks".to_string(),
            species: "dog".to_string(),
            image: Some("file:///buddy.jpg".to_string()),
        }
    }

    #[test]
    fn test_list_marks_custom_pets() {
        let (state, _events) = state();
        add(&state, buddy()).unwrap();

        let out = list(&state, "beagle", "Dog").unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Charlie") && !lines[0].ends_with('*'));
        assert!(lines[1].contains("Buddy") && lines[1].ends_with('*'));
    }

    #[test]
    fn test_list_no_results_and_bad_species() {
        let (state, _events) = state();
        assert_eq!(list(&state, "buddy", "All").unwrap(), "No pets found.");
        assert!(matches!(
            list(&state, "", "Bird"),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_add_without_image_is_rejected() {
        let (state, _events) = state();
        let mut args = buddy();
        args.image = None;
        let err = add(&state, args).unwrap_err();
        assert!(err.user_message().contains("image"));
    }

    #[test]
    fn test_favorite_then_adopt_notifies() {
        let (state, events) = state();
        assert_eq!(
            favorite(&state, "2").unwrap(),
            "Mochi has been added to your favorites!"
        );
        assert_eq!(adopt(&state, Some(1)).unwrap(), "Mochi has been adopted");
        assert!(matches!(events.try_recv(), Ok(AppEvent::Notification(_))));
        assert!(show(&state, "2").unwrap().ends_with("Remove from Favorites"));
    }

    #[test]
    fn test_adopt_respects_disabled_notifications() {
        let (state, events) = state();
        favorite(&state, "1").unwrap();
        settings(&state, SettingsChange::Notifications(false)).unwrap();

        assert_eq!(adopt(&state, None).unwrap(), "Luna has been adopted");
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn test_adopt_without_favorites() {
        let (state, _events) = state();
        assert!(matches!(adopt(&state, None), Err(AppError::EmptySelection)));
    }

    #[test]
    fn test_delete_refuses_seed_pets() {
        let (state, _events) = state();
        assert!(delete(&state, "1").unwrap().contains("nothing deleted"));
        assert_eq!(state.catalog.load().len(), 10);
    }

    #[test]
    fn test_swipe_reports_next_cards() {
        let (state, events) = state();
        let out = swipe(&state, &[SwipeDirection::Like, SwipeDirection::Nope]).unwrap();
        assert!(out.starts_with("LIKE Luna\nNOPE Mochi\n"));
        assert!(out.ends_with("Next up: Charlie, Bella, Simba"));
        assert!(matches!(events.try_recv(), Ok(AppEvent::Haptic(_))));
    }

    #[test]
    fn test_nearby_requires_location() {
        let (state, _events) = state();
        let err = nearby(&state, None, None).unwrap_err();
        assert_eq!(err.user_message(), "Permission to access location was denied");

        let out = nearby(&state, Some(1.39), Some(103.85)).unwrap();
        assert!(out.lines().nth(1).unwrap().contains("Max"));
    }

    #[test]
    fn test_settings_changes() {
        let (state, _events) = state();
        let out = settings(&state, SettingsChange::ToggleTheme).unwrap();
        assert!(out.starts_with("Dark mode: on"));

        let out = settings(&state, SettingsChange::Language("ms".to_string())).unwrap();
        assert!(out.contains("Language: Malay"));

        let out = settings(&state, SettingsChange::Language("xx".to_string())).unwrap();
        assert!(out.starts_with("Unsupported language"));
    }
}
