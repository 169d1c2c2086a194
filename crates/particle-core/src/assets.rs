//! Decoded assets and the join that gates scene construction.
//!
//! Both loads start together; the scene is built only after each one has
//! reported back. Every slot keeps its own outcome so a failure names the
//! resource that caused it.

use crate::error::{AssetKind, ParticleError};
use crate::font::Font;

/// RGBA8 pixels of the point-sprite texture.
#[derive(Clone, Debug)]
pub struct SpriteImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl SpriteImage {
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, ParticleError> {
        if width == 0 || height == 0 {
            return Err(ParticleError::SpriteFormat(format!(
                "empty image {}x{}",
                width, height
            )));
        }
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(ParticleError::SpriteFormat(format!(
                "{}x{} needs {} bytes, got {}",
                width,
                height,
                expected,
                rgba.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba,
        })
    }
}

#[derive(Debug)]
pub enum LoadState<T> {
    Pending,
    Loaded(T),
    Failed(ParticleError),
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        LoadState::Pending
    }
}

impl<T> LoadState<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, LoadState::Pending)
    }

    fn settle(&mut self, kind: AssetKind, result: Result<T, ParticleError>) {
        if !self.is_pending() {
            log::warn!("[assets] {} resolved twice; keeping first result", kind);
            return;
        }
        *self = match result {
            Ok(v) => {
                log::info!("[assets] {} loaded", kind);
                LoadState::Loaded(v)
            }
            Err(e) => {
                log::error!("[assets] {} failed: {}", kind, e);
                LoadState::Failed(e)
            }
        };
    }

    fn into_result(self, kind: AssetKind) -> Result<T, ParticleError> {
        match self {
            LoadState::Loaded(v) => Ok(v),
            LoadState::Failed(e) => Err(e),
            LoadState::Pending => Err(ParticleError::asset(kind, "never resolved")),
        }
    }
}

pub struct LoadedAssets {
    pub font: Font,
    pub sprite: SpriteImage,
}

#[derive(Debug, Default)]
pub struct AssetJoin {
    font: LoadState<Font>,
    sprite: LoadState<SpriteImage>,
}

impl AssetJoin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve_font(&mut self, result: Result<Font, ParticleError>) {
        self.font.settle(AssetKind::Font, result);
    }

    pub fn resolve_sprite(&mut self, result: Result<SpriteImage, ParticleError>) {
        self.sprite.settle(AssetKind::Sprite, result);
    }

    pub fn font(&self) -> &LoadState<Font> {
        &self.font
    }

    pub fn sprite(&self) -> &LoadState<SpriteImage> {
        &self.sprite
    }

    pub fn pending(&self) -> usize {
        self.font.is_pending() as usize + self.sprite.is_pending() as usize
    }

    pub fn is_complete(&self) -> bool {
        self.pending() == 0
    }

    /// Both assets, or every error collected from the slots that did not load.
    pub fn finish(self) -> Result<LoadedAssets, Vec<ParticleError>> {
        match (
            self.font.into_result(AssetKind::Font),
            self.sprite.into_result(AssetKind::Sprite),
        ) {
            (Ok(font), Ok(sprite)) => Ok(LoadedAssets { font, sprite }),
            (font, sprite) => Err([font.err(), sprite.err()].into_iter().flatten().collect()),
        }
    }
}
