//! Word-by-word title reveal followed by the subtitle.
//!
//! Timers run on the host's frame timeline: [`RevealSequencer::advance`] is
//! fed the same delta as the renderer, so a long frame may reveal several
//! steps at once.

use crate::config::{ConfigField, ConfigListener, SceneConfig};
use crate::constants::{SUBTITLE_REVEAL_DELAY_MS, WORD_REVEAL_DELAY_MS};
use std::time::Duration;

const WORD_DELAY: Duration = Duration::from_millis(WORD_REVEAL_DELAY_MS);
const SUBTITLE_DELAY: Duration = Duration::from_millis(SUBTITLE_REVEAL_DELAY_MS);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RevealState {
    pub visible_words: usize,
    pub subtitle_visible: bool,
}

#[derive(Clone, Debug)]
pub struct RevealSequencer {
    theme: String,
    title: String,
    words: Vec<String>,
    subtitle: String,
    state: RevealState,
    since_step: Duration,
}

impl RevealSequencer {
    pub fn new(config: &SceneConfig) -> Self {
        let title = config.effective_title().to_string();
        Self {
            theme: config.theme.clone(),
            words: split_words(&title),
            title,
            subtitle: config.effective_subtitle().to_string(),
            state: RevealState::default(),
            since_step: Duration::ZERO,
        }
    }

    /// Track `config`. Restarts from nothing when the theme or the effective
    /// title changed and returns whether it did.
    pub fn sync(&mut self, config: &SceneConfig) -> bool {
        self.subtitle = config.effective_subtitle().to_string();
        let title = config.effective_title();
        if config.theme == self.theme && title == self.title {
            return false;
        }
        self.theme = config.theme.clone();
        self.title = title.to_string();
        self.words = split_words(&self.title);
        self.restart();
        log::debug!("[reveal] restarting for \"{}\"", self.title);
        true
    }

    pub fn restart(&mut self) {
        self.state = RevealState::default();
        self.since_step = Duration::ZERO;
    }

    pub fn advance(&mut self, dt: Duration) {
        self.since_step += dt;
        loop {
            let delay = if self.state.visible_words < self.words.len() {
                WORD_DELAY
            } else if !self.state.subtitle_visible {
                SUBTITLE_DELAY
            } else {
                self.since_step = Duration::ZERO;
                return;
            };
            if self.since_step < delay {
                return;
            }
            self.since_step -= delay;
            if self.state.visible_words < self.words.len() {
                self.state.visible_words += 1;
            } else {
                self.state.subtitle_visible = true;
            }
        }
    }

    #[inline]
    pub fn state(&self) -> RevealState {
        self.state
    }

    #[inline]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[inline]
    pub fn subtitle(&self) -> &str {
        &self.subtitle
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn visible_words(&self) -> &[String] {
        &self.words[..self.state.visible_words.min(self.words.len())]
    }

    /// Revealed part of the title, words joined by single spaces.
    pub fn visible_title(&self) -> String {
        self.visible_words().join(" ")
    }

    pub fn is_complete(&self) -> bool {
        self.state.visible_words >= self.words.len() && self.state.subtitle_visible
    }
}

fn split_words(title: &str) -> Vec<String> {
    title.split(' ').map(str::to_string).collect()
}

impl ConfigListener for RevealSequencer {
    fn config_committed(&mut self, config: &SceneConfig, _changes: &[ConfigField]) {
        self.sync(config);
    }
}
