// Host-side tests for the staged configuration session.

use holo_core::session::{leading_number, parse_geometry_arg, parse_scale, PanelState};
use holo_core::{
    ConfigSession, CustomTextureOutcome, GeometryKind, ScanMode, SceneConfig, SessionError,
    TextureSelection,
};

fn open_session(live: &SceneConfig) -> ConfigSession {
    let mut session = ConfigSession::new();
    session.open(live);
    session
}

#[test]
fn starts_closed_and_rejects_edits() {
    let mut session = ConfigSession::new();
    assert_eq!(session.state(), &PanelState::Closed);
    assert!(session.draft().is_none());
    assert_eq!(session.select_theme("matrix"), Err(SessionError::Closed));
    assert_eq!(session.commit(), Err(SessionError::Closed));
}

#[test]
fn unedited_commit_equals_live() {
    let live = SceneConfig::default();
    let mut session = open_session(&live);
    let committed = session.commit().unwrap();
    assert_eq!(committed, live);
    assert!(committed.changes_since(&live).is_empty());
    assert!(!session.is_open());
}

#[test]
fn edits_only_touch_the_draft() {
    let live = SceneConfig::default();
    let mut session = open_session(&live);
    session.select_theme("fire").unwrap();
    session.set_scan_mode(1).unwrap();
    session.set_custom_title("HELLO WORLD").unwrap();
    assert_eq!(live, SceneConfig::default());

    let draft = session.draft().unwrap();
    assert_eq!(draft.theme, "fire");
    assert_eq!(draft.scan_mode, ScanMode::Vertical);
    assert_eq!(draft.effective_title(), "HELLO WORLD");
}

#[test]
fn close_drops_the_draft_and_reopen_resnapshots() {
    let live = SceneConfig::default();
    let mut session = open_session(&live);
    session.select_theme("neon").unwrap();
    session.close();
    assert!(session.draft().is_none());

    session.open(&live);
    assert_eq!(session.draft().unwrap().theme, "cyberpunk");
}

#[test]
fn revert_keeps_the_panel_open() {
    let live = SceneConfig::default();
    let mut session = open_session(&live);
    session.set_auto_rotate(true).unwrap();
    session.revert(&live).unwrap();
    assert!(session.is_open());
    assert_eq!(session.draft(), Some(&live));
}

#[test]
fn unknown_ids_are_rejected() {
    let mut session = open_session(&SceneConfig::default());
    assert_eq!(
        session.select_theme("vaporwave"),
        Err(SessionError::UnknownTheme("vaporwave".into()))
    );
    assert_eq!(
        session.select_texture_set("moon"),
        Err(SessionError::UnknownTextureSet("moon".into()))
    );
    assert_eq!(session.set_scan_mode(3), Err(SessionError::InvalidScanMode(3)));
    assert_eq!(session.set_scale(3, 1.0), Err(SessionError::ScaleAxis(3)));
    assert!(session.set_geometry_kind_id("teapot").is_err());
    assert_eq!(session.draft(), Some(&SceneConfig::default()));
}

#[test]
fn scale_is_clamped_and_text_is_coerced() {
    let mut session = open_session(&SceneConfig::default());
    session.set_scale(0, 50.0).unwrap();
    session.set_scale(1, -2.0).unwrap();
    session.set_scale_text(2, "abc").unwrap();
    assert_eq!(session.draft().unwrap().object.scale, [10.0, 0.1, 0.1]);

    session.set_scale_text(0, " 2.5 ").unwrap();
    assert_eq!(session.draft().unwrap().object.scale[0], 2.5);

    assert_eq!(parse_scale(""), 0.1);
    assert_eq!(parse_scale("NaN"), 0.1);
}

#[test]
fn changing_geometry_kind_clears_args() {
    let mut session = open_session(&SceneConfig::default());
    session.set_geometry_arg(0, 4.0).unwrap();
    assert!(!session.draft().unwrap().object.geometry_args.is_empty());

    session.set_geometry_kind(GeometryKind::Torus).unwrap();
    let object = &session.draft().unwrap().object;
    assert_eq!(object.geometry, GeometryKind::Torus);
    assert!(object.geometry_args.is_empty());
    assert_eq!(object.resolved_args(), GeometryKind::Torus.default_args());
}

#[test]
fn first_arg_edit_prefills_defaults() {
    let mut session = open_session(&SceneConfig::default());
    session.set_geometry_kind(GeometryKind::Sphere).unwrap();
    session.set_geometry_arg(1, 12.0).unwrap();
    assert_eq!(
        session.draft().unwrap().object.geometry_args.as_slice(),
        &[1.0, 12.0, 32.0]
    );
    assert_eq!(
        session.set_geometry_arg(3, 1.0),
        Err(SessionError::GeometryArgIndex {
            kind: GeometryKind::Sphere,
            index: 3
        })
    );
}

#[test]
fn unparsable_geometry_arg_becomes_zero() {
    let mut session = open_session(&SceneConfig::default());
    session.set_geometry_arg_text(0, "wide").unwrap();
    assert_eq!(session.draft().unwrap().object.geometry_args[0], 0.0);
    assert_eq!(parse_geometry_arg("1.5"), 1.5);
    assert_eq!(parse_geometry_arg("inf"), 0.0);
}

#[test]
fn field_text_reads_its_numeric_prefix() {
    assert_eq!(parse_geometry_arg("3px"), 3.0);
    assert_eq!(parse_geometry_arg("  -2.5 units"), -2.5);
    assert_eq!(parse_geometry_arg(".5"), 0.5);
    assert_eq!(parse_geometry_arg("1e2x"), 100.0);
    assert_eq!(parse_geometry_arg("4e"), 4.0);
    assert_eq!(parse_geometry_arg("-"), 0.0);
    assert_eq!(parse_geometry_arg("."), 0.0);
    assert_eq!(parse_geometry_arg("px3"), 0.0);
    assert_eq!(parse_geometry_arg("1e40"), 0.0);
    assert_eq!(leading_number("7."), Some(7.0));
    assert_eq!(parse_scale("2.5x"), 2.5);

    let mut session = open_session(&SceneConfig::default());
    session.set_geometry_arg_text(1, "24 segments").unwrap();
    assert_eq!(session.draft().unwrap().object.geometry_args[1], 24.0);
}

#[test]
fn reset_defaults_restores_baseline_but_keeps_selection() {
    let mut live = SceneConfig::default();
    live.theme = "plasma".into();
    live.texture = TextureSelection::Registered("sphere".into());
    live.scan_mode = ScanMode::Radial;
    live.custom_title = "X".into();
    live.custom_subtitle = "Y".into();
    live.object.geometry = GeometryKind::Cone;
    live.object.scale = [1.0, 1.0, 1.0];

    let mut session = open_session(&live);
    session.reset_defaults().unwrap();
    let draft = session.draft().unwrap();
    assert_eq!(draft.object.scale, [3.0, 3.0, 1.0]);
    assert_eq!(draft.object.geometry, GeometryKind::Plane);
    assert!(draft.object.geometry_args.is_empty());
    assert!(draft.custom_title.is_empty());
    assert!(draft.custom_subtitle.is_empty());
    assert!(draft.auto_rotate);
    assert_eq!(draft.theme, "plasma");
    assert_eq!(draft.texture, TextureSelection::Registered("sphere".into()));
    assert_eq!(draft.scan_mode, ScanMode::Radial);
}

#[test]
fn incomplete_custom_texture_is_a_no_op() {
    let mut session = open_session(&SceneConfig::default());
    let outcome = session.submit_custom_texture("", "depth.png").unwrap();
    assert_eq!(outcome, CustomTextureOutcome::Incomplete);
    assert_eq!(session.draft(), Some(&SceneConfig::default()));
    assert!(session.form().visible);
    assert_eq!(session.form().depth, "depth.png");
}

#[test]
fn custom_texture_inherits_draft_scale_and_geometry() {
    let mut session = open_session(&SceneConfig::default());
    session.set_scale(0, 2.0).unwrap();
    session.set_geometry_kind(GeometryKind::Sphere).unwrap();
    session.toggle_custom_form().unwrap();

    let outcome = session.submit_custom_texture("a.png", "b.png").unwrap();
    assert_eq!(outcome, CustomTextureOutcome::Applied);
    assert!(!session.form().visible);

    let draft = session.draft().unwrap();
    match &draft.texture {
        TextureSelection::Custom(set) => {
            assert_eq!(set.name, "Custom");
            assert_eq!(set.color, "a.png");
            assert_eq!(set.depth, "b.png");
            assert_eq!(set.scale, [2.0, 3.0, 1.0]);
            assert_eq!(set.geometry, GeometryKind::Sphere);
        }
        other => panic!("expected custom selection, got {other:?}"),
    }
}

#[test]
fn selecting_a_registered_set_replaces_a_custom_override() {
    let mut session = open_session(&SceneConfig::default());
    session.submit_custom_texture("a.png", "b.png").unwrap();
    session.select_texture_set("custom1").unwrap();
    assert_eq!(
        session.draft().unwrap().texture,
        TextureSelection::Registered("custom1".into())
    );
}

#[test]
fn toggle_custom_form_flips_visibility() {
    let mut session = open_session(&SceneConfig::default());
    assert_eq!(session.toggle_custom_form(), Ok(true));
    assert_eq!(session.toggle_custom_form(), Ok(false));
    session.close();
    assert_eq!(session.toggle_custom_form(), Err(SessionError::Closed));
}
