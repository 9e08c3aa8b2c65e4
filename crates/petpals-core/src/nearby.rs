// SPDX-License-Identifier: AGPL-3.0
// PetPals Core - Nearby pets
//
// Turns located pets into map markers around the user's position.
// Rendering the map is the frontend's job.

use crate::types::{AppError, Coordinates, PetRecord};

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Span shown around the user when the map opens
pub const DEFAULT_REGION_DELTA: f64 = 0.03;

/// Visible map area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapRegion {
    pub center: Coordinates,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl MapRegion {
    pub fn around(center: Coordinates) -> Self {
        Self {
            center,
            latitude_delta: DEFAULT_REGION_DELTA,
            longitude_delta: DEFAULT_REGION_DELTA,
        }
    }
}

/// One pin on the map
#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    pub pet_id: String,
    pub title: String,
    pub description: String,
    pub coordinates: Coordinates,
    pub distance_km: f64,
}

/// Supplies the user's current position
pub trait LocationProvider {
    /// Fails with `AppError::PermissionDenied` if location access was refused
    fn current_position(&self) -> Result<Coordinates, AppError>;
}

/// A position known up front, e.g. passed on the command line
pub struct FixedLocation(pub Option<Coordinates>);

impl LocationProvider for FixedLocation {
    fn current_position(&self) -> Result<Coordinates, AppError> {
        self.0
            .ok_or_else(|| AppError::PermissionDenied("location".to_string()))
    }
}

/// Great-circle distance in kilometres
pub fn distance_km(a: Coordinates, b: Coordinates) -> f64 {
    let (lat1, lat2) = (a.latitude.to_radians(), b.latitude.to_radians());
    let dlat = lat2 - lat1;
    let dlon = (b.longitude - a.longitude).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Markers for every pet with a location, nearest first
pub fn map_markers(pets: &[PetRecord], origin: Coordinates) -> Vec<MapMarker> {
    let mut markers: Vec<MapMarker> = pets
        .iter()
        .filter_map(|pet| {
            let coordinates = pet.location?;
            Some(MapMarker {
                pet_id: pet.id.clone(),
                title: pet.name.clone(),
                description: pet.breed.clone(),
                coordinates,
                distance_km: distance_km(origin, coordinates),
            })
        })
        .collect();

    markers.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    markers
}

/// Locate the user and build the map contents
pub fn nearby_pets(
    provider: &dyn LocationProvider,
    pets: &[PetRecord],
) -> Result<(MapRegion, Vec<MapMarker>), AppError> {
    let origin = provider.current_position().map_err(|e| {
        tracing::warn!("Could not get location: {}", e);
        e
    })?;

    Ok((MapRegion::around(origin), map_markers(pets, origin)))
}
