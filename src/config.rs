//! Game constants, overridable from a JSON document embedded in the page.

use crate::error::{GameError, Result};
use serde::{Deserialize, Serialize};

/// Id of the optional `<script type="application/json">` element holding overrides.
pub const CONFIG_ELEMENT_ID: &str = "game-config";

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TargetPlacement {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub content_width: f64,
    pub content_height: f64,
    pub initial_zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Countdown length in whole seconds.
    pub time_limit_secs: u32,
    /// Unscaled sprite size of a target, in content pixels.
    pub sprite_width: f64,
    pub sprite_height: f64,
    pub targets: Vec<TargetPlacement>,
    pub map_image: String,
    /// Sprite paths; target `i` uses `target_images[i % len]`.
    pub target_images: Vec<String>,
    pub storage_key: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        let targets = [
            (2742.0, 694.0, 0.3),
            (321.0, 671.0, 0.4),
            (1255.0, 916.0, 0.4),
            (1174.0, 1535.0, 0.29),
            (2866.0, 1738.0, 0.3),
        ]
        .into_iter()
        .map(|(x, y, scale)| TargetPlacement { x, y, scale })
        .collect();
        Self {
            content_width: 3000.0,
            content_height: 2000.0,
            initial_zoom: 0.5,
            min_zoom: 0.5,
            max_zoom: 2.0,
            time_limit_secs: 45,
            sprite_width: 400.0,
            sprite_height: 400.0,
            targets,
            map_image: "assets/Map3k.jpg".into(),
            target_images: (1..=5).map(|i| format!("assets/Stag{i}.png")).collect(),
            storage_key: "stag_hunt_last_result".into(),
        }
    }
}

impl GameConfig {
    /// Parses overrides on top of the defaults and validates the result.
    pub fn from_json(raw: &str) -> Result<Self> {
        let cfg: GameConfig = serde_json::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        let finite = [self.min_zoom, self.max_zoom, self.initial_zoom]
            .iter()
            .all(|z| z.is_finite());
        if !finite || self.min_zoom <= 0.0 || self.min_zoom > self.max_zoom {
            return Err(GameError::InvalidConfig(format!(
                "zoom range [{}, {}] is empty or non-positive",
                self.min_zoom, self.max_zoom
            )));
        }
        if self.initial_zoom < self.min_zoom || self.initial_zoom > self.max_zoom {
            return Err(GameError::InvalidConfig(format!(
                "initial zoom {} outside [{}, {}]",
                self.initial_zoom, self.min_zoom, self.max_zoom
            )));
        }
        if !(self.content_width > 0.0 && self.content_height > 0.0) {
            return Err(GameError::InvalidConfig("content size must be positive".into()));
        }
        if self.time_limit_secs == 0 {
            return Err(GameError::InvalidConfig("time limit must be at least one second".into()));
        }
        if self.targets.is_empty() {
            return Err(GameError::InvalidConfig("no targets configured".into()));
        }
        if !(self.sprite_width.is_finite()
            && self.sprite_height.is_finite()
            && self.sprite_width > 0.0
            && self.sprite_height > 0.0)
        {
            return Err(GameError::InvalidConfig(format!(
                "sprite size {}x{} must be positive",
                self.sprite_width, self.sprite_height
            )));
        }
        // A target must have a non-empty hit box the camera can reach.
        for (i, t) in self.targets.iter().enumerate() {
            if !(t.scale.is_finite() && t.scale > 0.0) {
                return Err(GameError::InvalidConfig(format!(
                    "target {i} has non-positive scale {}",
                    t.scale
                )));
            }
            let on_map = (0.0..=self.content_width).contains(&t.x)
                && (0.0..=self.content_height).contains(&t.y);
            if !on_map {
                return Err(GameError::InvalidConfig(format!(
                    "target {i} at ({}, {}) lies outside the {}x{} map",
                    t.x, t.y, self.content_width, self.content_height
                )));
            }
        }
        Ok(())
    }

    pub fn target_image(&self, index: usize) -> Option<&str> {
        if self.target_images.is_empty() {
            return None;
        }
        Some(&self.target_images[index % self.target_images.len()])
    }
}

/// Reads overrides from the page, falling back to defaults on any problem.
pub fn load_from_page() -> GameConfig {
    match read_page_config() {
        Ok(Some(cfg)) => cfg,
        Ok(None) => GameConfig::default(),
        Err(err) => {
            log::warn!("{err}; using default config");
            GameConfig::default()
        }
    }
}

fn read_page_config() -> Result<Option<GameConfig>> {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return Err(GameError::MissingElement("document".into()));
    };
    let Some(el) = document.get_element_by_id(CONFIG_ELEMENT_ID) else {
        return Ok(None);
    };
    let raw = el.text_content().unwrap_or_default();
    if raw.trim().is_empty() {
        return Ok(None);
    }
    GameConfig::from_json(&raw).map(Some)
}
