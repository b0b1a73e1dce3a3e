use crate::driver::geo::LatLng;
use crate::maps::polyline;
use serde::Deserialize;
use std::env;

/// Third-party mapping service, consumed as an opaque collaborator. Every
/// call builds its own client and reads the key from the environment, so a
/// missing key degrades per call instead of failing startup.

#[derive(Debug)]
pub struct GeocodedPlace {
    pub location: LatLng,
    pub formatted_address: String,
}

#[derive(Debug)]
pub struct DirectionsSummary {
    pub distance_text: String,
    pub duration_text: String,
    pub path: Vec<LatLng>,
}

#[derive(Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Deserialize)]
struct GeocodeResult {
    formatted_address: String,
    geometry: Geometry,
}

#[derive(Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Deserialize)]
struct DirectionsResponse {
    status: String,
    #[serde(default)]
    routes: Vec<Route>,
}

#[derive(Deserialize)]
struct Route {
    overview_polyline: OverviewPolyline,
    #[serde(default)]
    legs: Vec<Leg>,
}

#[derive(Deserialize)]
struct OverviewPolyline {
    points: String,
}

#[derive(Deserialize)]
struct Leg {
    distance: TextValue,
    duration: TextValue,
}

#[derive(Deserialize)]
struct TextValue {
    text: String,
}

fn base_url() -> String {
    env::var("MAPS_BASE_URL").unwrap_or_else(|_| "https://maps.googleapis.com/maps/api".to_owned())
}

fn api_key() -> Result<String, String> {
    env::var("MAPS_API_KEY").map_err(|e| format!("maps api key must be set: {}", e))
}

pub async fn geocode(address: &str) -> Result<Option<GeocodedPlace>, String> {
    let key = api_key()?;

    let response: GeocodeResponse = reqwest::Client::new()
        .get(format!("{}/geocode/json", base_url()))
        .query(&[("address", address), ("key", key.as_str())])
        .send()
        .await
        .map_err(|e| format!("geocode request failed: {}", e))?
        .json()
        .await
        .map_err(|e| format!("geocode response unreadable: {}", e))?;

    if response.status != "OK" {
        return Ok(None);
    }

    Ok(response.results.into_iter().next().map(|result| GeocodedPlace {
        location: result.geometry.location,
        formatted_address: result.formatted_address,
    }))
}

pub async fn reverse_geocode(location: LatLng) -> Result<Option<String>, String> {
    let key = api_key()?;
    let latlng = format!("{},{}", location.lat, location.lng);

    let response: GeocodeResponse = reqwest::Client::new()
        .get(format!("{}/geocode/json", base_url()))
        .query(&[("latlng", latlng.as_str()), ("key", key.as_str())])
        .send()
        .await
        .map_err(|e| format!("reverse geocode request failed: {}", e))?
        .json()
        .await
        .map_err(|e| format!("reverse geocode response unreadable: {}", e))?;

    if response.status != "OK" {
        return Ok(None);
    }

    Ok(response
        .results
        .into_iter()
        .next()
        .map(|result| result.formatted_address))
}

pub async fn directions(
    origin: LatLng,
    destination: LatLng,
) -> Result<Option<DirectionsSummary>, String> {
    let key = api_key()?;
    let origin = format!("{},{}", origin.lat, origin.lng);
    let destination = format!("{},{}", destination.lat, destination.lng);

    let response: DirectionsResponse = reqwest::Client::new()
        .get(format!("{}/directions/json", base_url()))
        .query(&[
            ("origin", origin.as_str()),
            ("destination", destination.as_str()),
            ("mode", "driving"),
            ("key", key.as_str()),
        ])
        .send()
        .await
        .map_err(|e| format!("directions request failed: {}", e))?
        .json()
        .await
        .map_err(|e| format!("directions response unreadable: {}", e))?;

    if response.status != "OK" {
        return Ok(None);
    }

    let Some(route) = response.routes.into_iter().next() else {
        return Ok(None);
    };
    let Some(leg) = route.legs.into_iter().next() else {
        return Ok(None);
    };

    Ok(Some(DirectionsSummary {
        distance_text: leg.distance.text,
        duration_text: leg.duration.text,
        path: polyline::decode(&route.overview_polyline.points),
    }))
}
