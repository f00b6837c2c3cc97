//! Texture loading for the desktop host.
//!
//! Each request runs on its own loader thread: HTTP(S) locators are fetched
//! with a blocking client, anything else is read from disk relative to the
//! asset root (a leading `/` means "from the asset root"). Decoding happens
//! on the same thread so the render loop only ever sees finished pixels.

use holo_core::{texture_request, TextureError, TextureLoader, TexturePixels, TextureTicket};
use std::path::{Path, PathBuf};
use std::thread;

pub struct FileTextureLoader {
    asset_root: PathBuf,
}

impl FileTextureLoader {
    pub fn new(asset_root: PathBuf) -> Self {
        Self { asset_root }
    }
}

impl TextureLoader for FileTextureLoader {
    fn load(&mut self, locator: &str) -> TextureTicket {
        let (completer, ticket) = texture_request(locator);
        let locator = locator.to_string();
        let root = self.asset_root.clone();
        let spawned = thread::Builder::new()
            .name("texture-loader".into())
            .spawn(move || {
                let result = fetch(&root, &locator).and_then(|bytes| decode(&locator, &bytes));
                if let Err(err) = &result {
                    log::warn!("[loader] {err}");
                }
                completer.complete(result);
            });
        // A failed spawn drops the completer, which fails the ticket.
        if let Err(err) = spawned {
            log::error!("[loader] could not start loader thread: {err}");
        }
        ticket
    }
}

fn is_remote(locator: &str) -> bool {
    locator.starts_with("http://") || locator.starts_with("https://")
}

fn resolve_path(root: &Path, locator: &str) -> PathBuf {
    let relative = locator.trim_start_matches('/');
    let direct = Path::new(locator);
    if direct.is_absolute() && direct.exists() {
        direct.to_path_buf()
    } else {
        root.join(relative)
    }
}

fn fetch(root: &Path, locator: &str) -> Result<Vec<u8>, TextureError> {
    let fetch_err = |reason: String| TextureError::Fetch {
        locator: locator.to_string(),
        reason,
    };
    if is_remote(locator) {
        let response = reqwest::blocking::get(locator)
            .and_then(|r| r.error_for_status())
            .map_err(|e| fetch_err(e.to_string()))?;
        let bytes = response.bytes().map_err(|e| fetch_err(e.to_string()))?;
        Ok(bytes.to_vec())
    } else {
        let path = resolve_path(root, locator);
        std::fs::read(&path).map_err(|e| fetch_err(format!("{}: {e}", path.display())))
    }
}

fn decode(locator: &str, bytes: &[u8]) -> Result<TexturePixels, TextureError> {
    let image = image::load_from_memory(bytes)
        .map_err(|e| TextureError::Decode {
            locator: locator.to_string(),
            reason: e.to_string(),
        })?
        .to_rgba8();
    let (width, height) = image.dimensions();
    TexturePixels::new(width, height, image.into_raw())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn rooted_locators_resolve_under_asset_root() {
        let root = Path::new("assets");
        assert_eq!(
            resolve_path(root, "/sample_imgs/face.jpg"),
            PathBuf::from("assets/sample_imgs/face.jpg")
        );
        assert_eq!(
            resolve_path(root, "maps/depth.png"),
            PathBuf::from("assets/maps/depth.png")
        );
    }

    #[test]
    fn remote_locators_are_detected() {
        assert!(is_remote("https://example.com/a.png"));
        assert!(is_remote("http://example.com/a.png"));
        assert!(!is_remote("/sample_imgs/a.png"));
    }

    #[test]
    fn missing_file_is_a_fetch_error() {
        let err = fetch(Path::new("does-not-exist"), "/nope.png").unwrap_err();
        assert!(matches!(err, TextureError::Fetch { .. }));
    }

    #[test]
    fn garbage_bytes_are_a_decode_error() {
        let err = decode("x.png", b"not an image").unwrap_err();
        assert!(matches!(err, TextureError::Decode { ref locator, .. } if locator == "x.png"));
    }

    #[test]
    fn png_decodes_to_rgba() {
        let img = image::RgbaImage::from_fn(3, 2, |x, y| image::Rgba([x as u8 * 80, y as u8 * 100, 7, 255]));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        let pixels = decode("mem.png", &bytes).unwrap();
        assert_eq!((pixels.width, pixels.height), (3, 2));
        assert_eq!(pixels.rgba.len(), 3 * 2 * 4);
        assert_eq!(&pixels.rgba[4..8], &[80, 0, 7, 255]);
    }

    #[test]
    fn loader_thread_completes_the_ticket() {
        let mut loader = FileTextureLoader::new(PathBuf::from("does-not-exist"));
        let ticket = loader.load("/missing.png");
        let mut result = None;
        for _ in 0..200 {
            result = ticket.try_take();
            if result.is_some() {
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(10));
        }
        assert!(matches!(result, Some(Err(TextureError::Fetch { .. }))));
    }
}
