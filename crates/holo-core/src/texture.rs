//! Texture acquisition as a ticket/completer pair.
//!
//! A [`TextureLoader`] hands out a [`TextureTicket`] immediately and keeps the
//! matching [`TextureCompleter`]; whoever finishes the fetch (a loader thread,
//! an `onload` callback, a test) calls [`TextureCompleter::complete`]. The
//! renderer polls its tickets once per frame and draws the fallback quad
//! until both are ready. Dropping a ticket releases interest in the result:
//! a late completion for a superseded request is discarded.

use glam::{Vec2, Vec4};
use std::sync::{Arc, Mutex, Weak};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TextureError {
    #[error("failed to fetch {locator}: {reason}")]
    Fetch { locator: String, reason: String },
    #[error("failed to decode {locator}: {reason}")]
    Decode { locator: String, reason: String },
    #[error("pixel buffer for {width}x{height} texture has {len} bytes")]
    BadDimensions { width: u32, height: u32, len: usize },
    #[error("loader dropped the request for {0}")]
    Abandoned(String),
}

/// Decoded RGBA8 image, row 0 at the top.
#[derive(Clone, Debug, PartialEq)]
pub struct TexturePixels {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl TexturePixels {
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, TextureError> {
        if width == 0 || height == 0 || rgba.len() != width as usize * height as usize * 4 {
            return Err(TextureError::BadDimensions {
                width,
                height,
                len: rgba.len(),
            });
        }
        Ok(Self {
            width,
            height,
            rgba,
        })
    }

    pub fn solid(width: u32, height: u32, color: [u8; 4]) -> Self {
        let n = width.max(1) as usize * height.max(1) as usize;
        Self {
            width: width.max(1),
            height: height.max(1),
            rgba: color.repeat(n),
        }
    }

    /// Texel at integer coordinates, clamped to the edge, as normalized RGBA.
    /// A buffer that does not cover its dimensions reads as transparent black.
    pub fn texel(&self, x: i64, y: i64) -> Vec4 {
        if self.width == 0 || self.height == 0 {
            return Vec4::ZERO;
        }
        let x = x.clamp(0, self.width as i64 - 1) as usize;
        let y = y.clamp(0, self.height as i64 - 1) as usize;
        let i = (y * self.width as usize + x) * 4;
        match self.rgba.get(i..i + 4) {
            Some(p) => Vec4::new(p[0] as f32, p[1] as f32, p[2] as f32, p[3] as f32) / 255.0,
            None => Vec4::ZERO,
        }
    }

    /// Bilinear, clamp-to-edge sample. `uv.y = 1` is the top row, as on the GPU
    /// path where the vertical flip happens in the fragment stage.
    pub fn sample(&self, uv: Vec2) -> Vec4 {
        let x = uv.x * self.width as f32 - 0.5;
        let y = (1.0 - uv.y) * self.height as f32 - 0.5;
        let (x0, y0) = (x.floor(), y.floor());
        let (fx, fy) = (x - x0, y - y0);
        let (x0, y0) = (x0 as i64, y0 as i64);
        let top = self.texel(x0, y0).lerp(self.texel(x0 + 1, y0), fx);
        let bottom = self.texel(x0, y0 + 1).lerp(self.texel(x0 + 1, y0 + 1), fx);
        top.lerp(bottom, fy)
    }
}

/// A resolved texture bound into a material. Equality is identity.
#[derive(Clone, Debug)]
pub struct TextureHandle {
    pub id: u64,
    pub locator: Arc<str>,
    pub pixels: Arc<TexturePixels>,
}

impl PartialEq for TextureHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

type Slot = Mutex<Option<Result<TexturePixels, TextureError>>>;

/// Receiving half of a texture request.
#[derive(Debug)]
pub struct TextureTicket {
    locator: String,
    slot: Arc<Slot>,
}

/// Sending half of a texture request; completing consumes it.
#[derive(Debug)]
pub struct TextureCompleter {
    locator: String,
    slot: Option<Weak<Slot>>,
}

/// Create a linked ticket/completer for `locator`.
pub fn texture_request(locator: &str) -> (TextureCompleter, TextureTicket) {
    let slot = Arc::new(Mutex::new(None));
    (
        TextureCompleter {
            locator: locator.to_string(),
            slot: Some(Arc::downgrade(&slot)),
        },
        TextureTicket {
            locator: locator.to_string(),
            slot,
        },
    )
}

impl TextureTicket {
    #[inline]
    pub fn locator(&self) -> &str {
        &self.locator
    }

    /// Take the result if the request has finished. Returns `None` while pending
    /// and after the result has been taken once.
    pub fn try_take(&self) -> Option<Result<TexturePixels, TextureError>> {
        self.slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take()
    }
}

impl TextureCompleter {
    #[inline]
    pub fn locator(&self) -> &str {
        &self.locator
    }

    /// Deliver the result. Returns `false` when the ticket was already dropped.
    pub fn complete(mut self, result: Result<TexturePixels, TextureError>) -> bool {
        self.deliver(result)
    }

    fn deliver(&mut self, result: Result<TexturePixels, TextureError>) -> bool {
        let Some(slot) = self.slot.take().and_then(|w| w.upgrade()) else {
            log::debug!("[texture] dropping late result for {}", self.locator);
            return false;
        };
        *slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(result);
        true
    }
}

impl Drop for TextureCompleter {
    fn drop(&mut self) {
        if self.slot.is_some() {
            let locator = self.locator.clone();
            self.deliver(Err(TextureError::Abandoned(locator)));
        }
    }
}

/// Something that can start fetching a texture by locator.
pub trait TextureLoader {
    fn load(&mut self, locator: &str) -> TextureTicket;
}
