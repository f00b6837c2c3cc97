// In-memory texture loader shared by the host-side tests.
// Tickets stay pending until the test completes them.

#![allow(dead_code)]

use holo_core::{texture_request, TextureCompleter, TextureError, TextureLoader, TexturePixels, TextureTicket};

#[derive(Default)]
pub struct ManualLoader {
    pub requested: Vec<String>,
    pending: Vec<TextureCompleter>,
}

impl TextureLoader for ManualLoader {
    fn load(&mut self, locator: &str) -> TextureTicket {
        let (completer, ticket) = texture_request(locator);
        self.requested.push(locator.to_string());
        self.pending.push(completer);
        ticket
    }
}

impl ManualLoader {
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Complete every outstanding request with a small opaque white image.
    pub fn complete_all(&mut self) {
        for completer in self.pending.drain(..) {
            completer.complete(Ok(TexturePixels::solid(2, 2, [255, 255, 255, 255])));
        }
    }

    /// Complete outstanding requests with `pixels` keyed by locator.
    pub fn complete_with(&mut self, f: impl Fn(&str) -> TexturePixels) {
        for completer in self.pending.drain(..) {
            let pixels = f(completer.locator());
            completer.complete(Ok(pixels));
        }
    }

    pub fn fail_all(&mut self) {
        for completer in self.pending.drain(..) {
            let locator = completer.locator().to_string();
            completer.complete(Err(TextureError::Fetch {
                locator,
                reason: "404".into(),
            }));
        }
    }
}
