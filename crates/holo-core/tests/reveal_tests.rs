// Host-side tests for the title reveal timeline.

use holo_core::{ConfigField, ConfigListener, RevealSequencer, RevealState, SceneConfig};
use std::time::Duration;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn neural_link_reveals_word_by_word_then_subtitle() {
    let mut reveal = RevealSequencer::new(&SceneConfig::default());
    assert_eq!(reveal.words(), ["NEURAL", "LINK"]);
    assert_eq!(reveal.state(), RevealState::default());

    reveal.advance(ms(399));
    assert_eq!(reveal.state().visible_words, 0);
    reveal.advance(ms(1));
    assert_eq!(reveal.state().visible_words, 1);
    assert_eq!(reveal.visible_title(), "NEURAL");

    reveal.advance(ms(400));
    assert_eq!(reveal.state().visible_words, 2);
    assert!(!reveal.state().subtitle_visible);

    reveal.advance(ms(599));
    assert!(!reveal.state().subtitle_visible);
    reveal.advance(ms(1));
    assert!(reveal.state().subtitle_visible);
    assert!(reveal.is_complete());
    assert_eq!(
        reveal.subtitle(),
        "Connection established. Accessing mainframe..."
    );
}

#[test]
fn one_long_frame_can_reveal_everything() {
    let mut reveal = RevealSequencer::new(&SceneConfig::default());
    reveal.advance(ms(1400));
    assert_eq!(
        reveal.state(),
        RevealState {
            visible_words: 2,
            subtitle_visible: true
        }
    );
}

#[test]
fn finished_sequence_stays_finished() {
    let mut reveal = RevealSequencer::new(&SceneConfig::default());
    reveal.advance(ms(10_000));
    reveal.advance(ms(10_000));
    assert!(reveal.is_complete());
    assert_eq!(reveal.visible_words().len(), 2);
}

#[test]
fn title_change_restarts() {
    let mut config = SceneConfig::default();
    let mut reveal = RevealSequencer::new(&config);
    reveal.advance(ms(2000));
    assert!(reveal.is_complete());

    config.custom_title = "HELLO THERE WORLD".into();
    reveal.config_committed(&config, &[ConfigField::CustomTitle]);
    assert_eq!(reveal.state(), RevealState::default());
    assert_eq!(reveal.words().len(), 3);
}

#[test]
fn theme_change_restarts_even_with_same_custom_title() {
    let mut config = SceneConfig {
        custom_title: "SAME".into(),
        ..SceneConfig::default()
    };
    let mut reveal = RevealSequencer::new(&config);
    reveal.advance(ms(2000));

    config.theme = "neon".into();
    assert!(reveal.sync(&config));
    assert_eq!(reveal.state(), RevealState::default());
}

#[test]
fn subtitle_change_alone_does_not_restart() {
    let mut config = SceneConfig::default();
    let mut reveal = RevealSequencer::new(&config);
    reveal.advance(ms(2000));

    config.custom_subtitle = "new subtitle".into();
    assert!(!reveal.sync(&config));
    assert!(reveal.is_complete());
    assert_eq!(reveal.subtitle(), "new subtitle");
}

#[test]
fn restart_cancels_partial_progress() {
    let mut config = SceneConfig::default();
    let mut reveal = RevealSequencer::new(&config);
    reveal.advance(ms(350));
    config.theme = "matrix".into();
    reveal.sync(&config);
    // the 350 ms already elapsed must not count toward the new sequence
    reveal.advance(ms(100));
    assert_eq!(reveal.state().visible_words, 0);
    reveal.advance(ms(300));
    assert_eq!(reveal.visible_title(), "THE");
}

#[test]
fn words_split_on_single_spaces() {
    let config = SceneConfig {
        custom_title: "A  B".into(),
        ..SceneConfig::default()
    };
    let reveal = RevealSequencer::new(&config);
    assert_eq!(reveal.words(), ["A", "", "B"]);
}
