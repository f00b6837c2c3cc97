// Host-side tests for the theme and texture-set tables.

use holo_core::constants::{DEFAULT_TEXTURE_SET_ID, DEFAULT_THEME_ID};
use holo_core::texture_set::{find_texture_set, TextureSelection, TEXTURE_SETS};
use holo_core::theme::{find_theme, theme_or_default, THEMES};
use holo_core::{GeometryKind, TextureSet};

#[test]
fn themes_are_listed_in_declaration_order() {
    let ids: Vec<&str> = THEMES.ids().collect();
    assert_eq!(
        ids,
        vec!["cyberpunk", "matrix", "neon", "plasma", "arctic", "fire"]
    );
    assert_eq!(THEMES.len(), 6);
}

#[test]
fn theme_values_match_table() {
    let cyberpunk = find_theme("cyberpunk").unwrap();
    assert_eq!(cyberpunk.name, "Cyberpunk");
    assert_eq!(cyberpunk.scan_color, [1.0, 0.0, 0.0]);
    assert_eq!(cyberpunk.title, "NEURAL LINK");
    assert_eq!(
        cyberpunk.subtitle,
        "Connection established. Accessing mainframe..."
    );
    assert_eq!(cyberpunk.scan_speed, 0.5);
    assert_eq!(cyberpunk.bloom_strength, 1.2);
    assert_eq!(cyberpunk.glitch_intensity, 0.07);
    assert_eq!(cyberpunk.text_color, "text-red-400");

    let matrix = find_theme("matrix").unwrap();
    assert_eq!(matrix.scan_color, [0.0, 1.0, 0.0]);
    assert_eq!(matrix.title, "THE MATRIX");
    assert_eq!(matrix.scan_speed, 0.3);

    let arctic = find_theme("arctic").unwrap();
    assert_eq!(arctic.scan_color, [0.3, 0.7, 1.0]);
    assert_eq!(arctic.bg_gradient, "from-gray-900 via-blue-900 to-cyan-900");

    let fire = find_theme("fire").unwrap();
    assert_eq!(fire.title, "INFERNO MODE");
    assert_eq!(fire.scan_speed, 0.8);
    assert_eq!(fire.glitch_intensity, 0.12);
}

#[test]
fn unknown_theme_is_absent_but_default_lookup_never_fails() {
    assert!(find_theme("vaporwave").is_none());
    assert!(!THEMES.contains("vaporwave"));
    assert_eq!(theme_or_default("vaporwave").id, DEFAULT_THEME_ID);
}

#[test]
fn registry_positions_follow_declaration_order() {
    assert_eq!(THEMES.position("cyberpunk"), Some(0));
    assert_eq!(THEMES.position("fire"), Some(5));
    assert_eq!(THEMES.at(1).map(|t| t.id), Some("matrix"));
    assert!(THEMES.at(6).is_none());
}

#[test]
fn palette_is_derived_from_scan_color() {
    let palette = find_theme("cyberpunk").unwrap().palette();
    assert_eq!(palette.border, "rgb(255,0,0)");
    assert_eq!(palette.highlight, "rgb(255,0,0)");
    assert_eq!(palette.text, "rgb(255,55,55)");
    assert_eq!(palette.button_hover, "rgba(255,0,0, 0.2)");

    let matrix = find_theme("matrix").unwrap().palette();
    assert_eq!(matrix.text, "rgb(55,255,55)");
}

#[test]
fn texture_sets_match_table() {
    let ids: Vec<&str> = TEXTURE_SETS.ids().collect();
    assert_eq!(ids, vec!["face", "custom1", "sphere"]);

    let face = find_texture_set("face").unwrap();
    assert_eq!(face.name, "Face Scan");
    assert_eq!(face.scale, [3.0, 3.0, 1.0]);
    assert_eq!(face.geometry, GeometryKind::Plane);

    let sphere = find_texture_set("sphere").unwrap();
    assert_eq!(sphere.geometry, GeometryKind::Sphere);
    assert_eq!(sphere.scale, [1.0, 1.0, 1.0]);
    assert_eq!(sphere.color, sphere.depth);
}

#[test]
fn selection_resolves_unknown_ids_to_default_set() {
    let unknown = TextureSelection::Registered("nope".into());
    assert_eq!(unknown.resolve().id, DEFAULT_TEXTURE_SET_ID);
    assert_eq!(TextureSelection::default().resolve().id, "face");
}

#[test]
fn custom_selection_uses_its_own_locators() {
    let set = TextureSet::custom("a.png", "b.png", [2.0, 2.0, 1.0], GeometryKind::Torus);
    let selection = TextureSelection::Custom(set);
    assert!(selection.is_custom());
    assert_eq!(selection.registered_id(), None);
    assert_eq!(selection.display_name(), "Custom");
    let locators = selection.resolve().locators();
    assert_eq!(locators.color, "a.png");
    assert_eq!(locators.depth, "b.png");
}
