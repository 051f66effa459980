//! Image manifest
//!
//! The simulation never touches pixels. It only needs to know how many
//! obstacle variants and background layers exist so it can pick indices the
//! renderer will later resolve into loaded images.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::renderer::Sprite;

/// Asset loading failures. All of these are fatal at startup.
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("failed to load image {path}: {reason}")]
    Load { path: String, reason: String },

    #[error("manifest has no {0} images")]
    Empty(&'static str),
}

/// Paths of every image the game needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetManifest {
    /// One background per level, cycled
    pub backgrounds: Vec<String>,
    pub character: String,
    pub coin: String,
    pub magnet: String,
    /// Obstacle visual variants, chosen uniformly at spawn
    pub obstacles: Vec<String>,
}

impl Default for AssetManifest {
    fn default() -> Self {
        Self {
            backgrounds: owned(&[
                "assets/summer.png",
                "assets/spring.png",
                "assets/snow.png",
                "assets/rain.png",
                "assets/city.png",
                "assets/oriental.png",
                "assets/desert.png",
            ]),
            character: "assets/billy.png".to_string(),
            coin: "assets/coin.png".to_string(),
            magnet: "assets/magnet.png".to_string(),
            obstacles: owned(&["assets/rock.png", "assets/log.png", "assets/bush.png"]),
        }
    }
}

fn owned(paths: &[&str]) -> Vec<String> {
    paths.iter().map(|p| p.to_string()).collect()
}

impl AssetManifest {
    /// Every path in load order: backgrounds, character, coin, magnet, obstacles
    pub fn all_paths(&self) -> impl Iterator<Item = &str> {
        self.backgrounds
            .iter()
            .map(String::as_str)
            .chain([
                self.character.as_str(),
                self.coin.as_str(),
                self.magnet.as_str(),
            ])
            .chain(self.obstacles.iter().map(String::as_str))
    }

    /// A manifest must name at least one background and one obstacle variant
    pub fn validate(&self) -> Result<(), AssetError> {
        if self.backgrounds.is_empty() {
            return Err(AssetError::Empty("background"));
        }
        if self.obstacles.is_empty() {
            return Err(AssetError::Empty("obstacle"));
        }
        Ok(())
    }
}

/// Loaded images, keyed the same way as the manifest
#[derive(Debug, Clone)]
pub struct AssetCatalog<H> {
    pub backgrounds: Vec<H>,
    pub character: H,
    pub coin: H,
    pub magnet: H,
    pub obstacles: Vec<H>,
}

impl<H> AssetCatalog<H> {
    /// Load every manifest entry with `load`; the first failure aborts
    pub fn load_with<F>(manifest: &AssetManifest, mut load: F) -> Result<Self, AssetError>
    where
        F: FnMut(&str) -> Result<H, AssetError>,
    {
        manifest.validate()?;
        let backgrounds = manifest
            .backgrounds
            .iter()
            .map(|p| load(p.as_str()))
            .collect::<Result<Vec<_>, _>>()?;
        let character = load(manifest.character.as_str())?;
        let coin = load(manifest.coin.as_str())?;
        let magnet = load(manifest.magnet.as_str())?;
        let obstacles = manifest
            .obstacles
            .iter()
            .map(|p| load(p.as_str()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            backgrounds,
            character,
            coin,
            magnet,
            obstacles,
        })
    }

    /// Number of obstacle variants the spawner may pick from
    pub fn obstacle_variants(&self) -> usize {
        self.obstacles.len()
    }

    /// Image for a sprite; out-of-range variants yield None
    pub fn sprite(&self, sprite: Sprite) -> Option<&H> {
        match sprite {
            Sprite::Background(i) => self.backgrounds.get(i),
            Sprite::Character => Some(&self.character),
            Sprite::Coin => Some(&self.coin),
            Sprite::Magnet => Some(&self.magnet),
            Sprite::Obstacle(i) => self.obstacles.get(i),
        }
    }

    /// Every image in manifest load order (matches [`AssetManifest::all_paths`])
    pub fn iter(&self) -> impl Iterator<Item = &H> {
        self.backgrounds
            .iter()
            .chain([&self.character, &self.coin, &self.magnet])
            .chain(self.obstacles.iter())
    }
}
