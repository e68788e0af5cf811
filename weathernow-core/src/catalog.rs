//! Static weather-code table for Open-Meteo condition codes.
//!
//! Icon and colour keys are renderer-neutral; a front end maps them onto
//! its own glyphs and palette.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::ConditionDescriptor;

use ColorKey::*;
use IconKey::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconKey {
    Sun,
    CloudSun,
    Cloud,
    CloudFog,
    CloudRain,
    CloudSnow,
    CloudLightning,
}

impl IconKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            IconKey::Sun => "sun",
            IconKey::CloudSun => "cloud_sun",
            IconKey::Cloud => "cloud",
            IconKey::CloudFog => "cloud_fog",
            IconKey::CloudRain => "cloud_rain",
            IconKey::CloudSnow => "cloud_snow",
            IconKey::CloudLightning => "cloud_lightning",
        }
    }
}

impl std::fmt::Display for IconKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorKey {
    Yellow,
    Orange,
    Gray,
    Blue,
    Cyan,
    Purple,
}

impl ColorKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorKey::Yellow => "yellow",
            ColorKey::Orange => "orange",
            ColorKey::Gray => "gray",
            ColorKey::Blue => "blue",
            ColorKey::Cyan => "cyan",
            ColorKey::Purple => "purple",
        }
    }
}

impl std::fmt::Display for ColorKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub code: i32,
    pub icon: IconKey,
    pub color: ColorKey,
    pub description: &'static str,
}

const fn entry(code: i32, icon: IconKey, color: ColorKey, description: &'static str) -> CatalogEntry {
    CatalogEntry { code, icon, color, description }
}

/// Codes 71/75 are listed as freezing rain and 76/78 as snow, matching the
/// table the app has always shipped rather than the WMO assignments.
static CATALOG: [CatalogEntry; 26] = [
    entry(0, Sun, Yellow, "Clear sky"),
    entry(1, Sun, Yellow, "Mainly clear"),
    entry(2, CloudSun, Orange, "Partly cloudy"),
    entry(3, Cloud, Gray, "Overcast"),
    entry(45, CloudFog, Gray, "Fog"),
    entry(48, CloudFog, Gray, "Rime fog"),
    entry(51, CloudRain, Blue, "Light drizzle"),
    entry(53, CloudRain, Blue, "Moderate drizzle"),
    entry(55, CloudRain, Blue, "Dense drizzle"),
    entry(61, CloudRain, Blue, "Slight rain"),
    entry(63, CloudRain, Blue, "Moderate rain"),
    entry(65, CloudRain, Blue, "Heavy rain"),
    entry(71, CloudSnow, Cyan, "Slight freezing rain"),
    entry(73, CloudSnow, Cyan, "Slight snow"),
    entry(75, CloudSnow, Cyan, "Heavy freezing rain"),
    entry(76, CloudSnow, Cyan, "Moderate snow"),
    entry(77, CloudSnow, Cyan, "Heavy snow"),
    entry(78, CloudSnow, Cyan, "Snow grains"),
    entry(80, CloudRain, Blue, "Slight rain showers"),
    entry(81, CloudRain, Blue, "Moderate rain showers"),
    entry(82, CloudRain, Blue, "Violent rain showers"),
    entry(85, CloudSnow, Cyan, "Slight snow showers"),
    entry(86, CloudSnow, Cyan, "Heavy snow showers"),
    entry(95, CloudLightning, Purple, "Slight thunderstorm"),
    entry(96, CloudLightning, Purple, "Moderate thunderstorm"),
    entry(99, CloudLightning, Purple, "Heavy thunderstorm"),
];

/// Look up a weather code. Unknown codes resolve to the "Clear sky" entry.
pub fn describe(code: i32) -> &'static CatalogEntry {
    CATALOG
        .iter()
        .find(|e| e.code == code)
        .unwrap_or(&CATALOG[0])
}

/// Whether `code` has its own entry (as opposed to the clear-sky fallback).
pub fn is_known(code: i32) -> bool {
    CATALOG.iter().any(|e| e.code == code)
}

/// Build the descriptor carried by a forecast point. `code` keeps the raw
/// API value even when the catalog falls back.
pub fn condition_for(code: i32) -> ConditionDescriptor {
    if !is_known(code) {
        debug!(code, "unknown weather code, using clear sky");
    }
    let entry = describe(code);
    ConditionDescriptor {
        code,
        main: entry.description.to_string(),
        description: entry.description.to_string(),
        icon: entry.icon,
        color: entry.color,
    }
}
