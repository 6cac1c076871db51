//! Texture manifest and loading boundary
//!
//! The simulation only ever refers to textures by `TextureKey`. Decoding and
//! GPU upload belong to the render backend; this module just resolves keys to
//! files, checks they are usable, and hands out opaque handles.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Logical texture name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TextureKey {
    /// Untextured quad
    #[default]
    Blank,
    Paddle,
    Ball,
    /// Font sheet used by the Pong banner
    PongFont,
    Rocket,
    Mountain,
    Platform,
    Fire,
    Explosion,
    /// Font sheet used by the lander and shooter HUDs
    PixelFont,
    /// 4x4 directional butterfly sheet
    ButterflySheet,
    Skull,
    Rose,
    /// Single-frame butterfly used in the showcase
    Butterfly,
}

impl TextureKey {
    /// File name relative to the asset directory, `None` for `Blank`
    pub fn file_name(self) -> Option<&'static str> {
        let name = match self {
            TextureKey::Blank => return None,
            TextureKey::Paddle => "Pong_Sweet_White_Tail.png",
            TextureKey::Ball => "Pong_Candy.png",
            TextureKey::PongFont => "MisterF_Fonts_Sprite_Sheet.png",
            TextureKey::Rocket => "Lunar_Landar_Rocket.png",
            TextureKey::Mountain => "Lunar_Landar_Mountain.png",
            TextureKey::Platform => "platform.png",
            TextureKey::Fire => "Lunar_Landar_Rocket_Fire.png",
            TextureKey::Explosion => "Lunar_Landar_Explosion.png",
            TextureKey::PixelFont => "LLPixel_Fonts_Sprite_Sheet.png",
            TextureKey::ButterflySheet => "Butterfly_Anim_Sprite_Sheet.png",
            TextureKey::Skull => "Skull_a1.png",
            TextureKey::Rose => "rose_a1.png",
            TextureKey::Butterfly => "butterfly_a1.png",
        };
        Some(name)
    }
}

/// Opaque backend texture id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureHandle(pub u32);

/// Asset loading errors. All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("texture {key:?} not found at {path}")]
    Missing { key: TextureKey, path: PathBuf },

    #[error("texture {key:?} at {path} is empty")]
    Empty { key: TextureKey, path: PathBuf },

    #[error("failed to read texture {key:?}: {source}")]
    Io {
        key: TextureKey,
        #[source]
        source: std::io::Error,
    },
}

/// Backend hook that turns a key into a loaded texture
pub trait TextureLoader {
    fn load(&mut self, key: TextureKey) -> Result<TextureHandle, AssetError>;
}

/// Loader that only checks the file on disk and numbers handles sequentially
#[derive(Debug, Clone)]
pub struct FsTextureLoader {
    root: PathBuf,
    next_handle: u32,
}

impl FsTextureLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            next_handle: 1,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl TextureLoader for FsTextureLoader {
    fn load(&mut self, key: TextureKey) -> Result<TextureHandle, AssetError> {
        let Some(name) = key.file_name() else {
            return Ok(TextureHandle(0));
        };
        let path = self.root.join(name);

        let metadata = match std::fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(AssetError::Missing { key, path });
            }
            Err(source) => return Err(AssetError::Io { key, source }),
        };
        if metadata.len() == 0 {
            return Err(AssetError::Empty { key, path });
        }

        let handle = TextureHandle(self.next_handle);
        self.next_handle += 1;
        log::debug!("loaded {:?} from {} as {:?}", key, path.display(), handle);
        Ok(handle)
    }
}

/// Key to handle lookup for one game
#[derive(Debug, Clone, Default)]
pub struct TextureCatalog {
    handles: HashMap<TextureKey, TextureHandle>,
}

impl TextureCatalog {
    /// Load every key, stopping at the first failure
    pub fn load_all(loader: &mut dyn TextureLoader, keys: &[TextureKey]) -> Result<Self, AssetError> {
        let mut handles = HashMap::with_capacity(keys.len());
        for &key in keys {
            if handles.contains_key(&key) {
                continue;
            }
            handles.insert(key, loader.load(key)?);
        }
        log::info!("loaded {} textures", handles.len());
        Ok(Self { handles })
    }

    pub fn get(&self, key: TextureKey) -> Option<TextureHandle> {
        self.handles.get(&key).copied()
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}
