// Host-side tests for the scene renderer: texture acquisition, fallback,
// per-frame uniforms, rotation and geometry rebuilds.

mod common;

use common::ManualLoader;
use glam::{Vec2, Vec4};
use holo_core::constants::FALLBACK_COLOR;
use holo_core::shader::{scan_progress, scan_progress_at};
use std::f32::consts::TAU;
use holo_core::{
    ConfigField, ConfigListener, Frame, GeometryKind, SceneConfig, SceneRenderer, ScanMode,
    TextureSelection, TextureSet,
};

fn ready_renderer(config: SceneConfig) -> SceneRenderer<ManualLoader> {
    let mut renderer = SceneRenderer::new(config, ManualLoader::default());
    renderer.loader_mut().complete_all();
    renderer
}

#[test]
fn requests_both_textures_of_the_default_set() {
    let renderer = SceneRenderer::new(SceneConfig::default(), ManualLoader::default());
    let requested = &renderer.loader().requested;
    assert_eq!(requested.len(), 2);
    assert!(requested[0].ends_with("img-4.png"));
    assert!(requested[1].ends_with("raw-4.webp"));
}

#[test]
fn fallback_until_both_textures_resolve() {
    let mut renderer = SceneRenderer::new(SceneConfig::default(), ManualLoader::default());
    match renderer.tick(0.016, Vec2::ZERO) {
        Frame::Fallback { mesh, color } => {
            assert_eq!(mesh.triangle_count(), 2);
            assert_eq!(color, Vec4::from(FALLBACK_COLOR));
        }
        Frame::Effect { .. } => panic!("effect before textures resolved"),
    }
    assert!(!renderer.textures_ready());

    renderer.loader_mut().complete_all();
    let frame = renderer.tick(0.016, Vec2::ZERO);
    assert!(!frame.is_fallback());
}

#[test]
fn failed_texture_keeps_the_fallback() {
    let mut renderer = SceneRenderer::new(SceneConfig::default(), ManualLoader::default());
    renderer.loader_mut().fail_all();
    for _ in 0..3 {
        assert!(renderer.tick(0.1, Vec2::ZERO).is_fallback());
    }
    assert!(renderer.texture_failure().is_some());
}

#[test]
fn dropped_loader_request_is_a_failure() {
    let mut renderer = SceneRenderer::new(SceneConfig::default(), ManualLoader::default());
    // dropping the completers without completing them
    *renderer.loader_mut() = ManualLoader::default();
    assert!(renderer.tick(0.1, Vec2::ZERO).is_fallback());
    assert!(renderer.texture_failure().is_some());
}

#[test]
fn uniforms_follow_theme_time_and_pointer() {
    let mut renderer = ready_renderer(SceneConfig::default());
    renderer.tick(1.0, Vec2::ZERO);
    let frame = renderer.tick(1.0, Vec2::new(0.5, -0.25));
    let u = frame.uniforms().expect("effect frame");
    assert_eq!(u.time, 2.0);
    assert_eq!(u.pointer, Vec2::new(0.5, -0.25));
    assert_eq!(u.scan_color.to_array(), [1.0, 0.0, 0.0]);
    assert_eq!(u.scan_mode, ScanMode::Horizontal);
    assert_eq!(u.progress, scan_progress_at(2.0, 0.5));
    assert!((u.progress - scan_progress(2.0, 0.5)).abs() < 1e-6);
    assert_eq!(u.glitch_intensity, 0.07);
}

#[test]
fn auto_rotate_advances_and_freezes() {
    let config = SceneConfig {
        auto_rotate: true,
        ..SceneConfig::default()
    };
    let mut renderer = ready_renderer(config.clone());
    renderer.tick(2.0, Vec2::ZERO);
    assert!((renderer.rotation_y() - 0.4).abs() < 1e-6);

    let frozen = SceneConfig {
        auto_rotate: false,
        ..config
    };
    renderer.config_committed(&frozen, &[ConfigField::AutoRotate]);
    renderer.tick(5.0, Vec2::ZERO);
    assert!((renderer.rotation_y() - 0.4).abs() < 1e-6);
}

#[test]
fn no_rotation_by_default() {
    let mut renderer = ready_renderer(SceneConfig::default());
    renderer.tick(3.0, Vec2::ZERO);
    assert_eq!(renderer.rotation_y(), 0.0);
}

#[test]
fn theme_change_keeps_textures_and_updates_tint() {
    let mut renderer = ready_renderer(SceneConfig::default());
    let before = renderer.tick(0.1, Vec2::ZERO).uniforms().unwrap().color_texture.id;

    let mut next = renderer.config().clone();
    next.theme = "matrix".into();
    next.scan_mode = ScanMode::Radial;
    renderer.config_committed(&next, &[ConfigField::Theme, ConfigField::ScanMode]);

    assert_eq!(renderer.loader().requested.len(), 2, "no new acquisition");
    let frame = renderer.tick(0.1, Vec2::ZERO);
    let u = frame.uniforms().expect("still drawing the effect");
    assert_eq!(u.scan_color.to_array(), [0.0, 1.0, 0.0]);
    assert_eq!(u.scan_mode, ScanMode::Radial);
    assert_eq!(u.color_texture.id, before);
}

#[test]
fn texture_change_reacquires_and_falls_back_meanwhile() {
    let mut renderer = ready_renderer(SceneConfig::default());
    assert!(!renderer.tick(0.1, Vec2::ZERO).is_fallback());

    let mut next = renderer.config().clone();
    next.texture = TextureSelection::Custom(TextureSet::custom(
        "a.png",
        "b.png",
        [3.0, 3.0, 1.0],
        GeometryKind::Plane,
    ));
    renderer.config_committed(&next, &[ConfigField::TextureSet]);
    assert_eq!(renderer.loader().requested[2..], ["a.png", "b.png"]);
    assert!(renderer.tick(0.1, Vec2::ZERO).is_fallback());

    renderer.loader_mut().complete_all();
    let frame = renderer.tick(0.1, Vec2::ZERO);
    let u = frame.uniforms().unwrap();
    assert_eq!(&*u.color_texture.locator, "a.png");
    assert_eq!(&*u.depth_texture.locator, "b.png");
}

#[test]
fn same_locators_do_not_reacquire() {
    let mut renderer = ready_renderer(SceneConfig::default());
    let mut next = renderer.config().clone();
    // a different registered id that resolves to the same pair would still be
    // a no-op; here the selection is literally unchanged
    next.custom_title = "HELLO".into();
    renderer.config_committed(&next, &[ConfigField::CustomTitle]);
    assert_eq!(renderer.loader().requested.len(), 2);
    assert!(renderer.textures_ready());
}

#[test]
fn geometry_rebuilds_only_when_kind_or_args_change() {
    let mut renderer = ready_renderer(SceneConfig::default());
    let first = renderer.mesh_revision();

    let mut next = renderer.config().clone();
    next.object.scale = [1.0, 2.0, 3.0];
    renderer.config_committed(&next, &[ConfigField::ObjectConfig]);
    assert_eq!(renderer.mesh_revision(), first, "scale is a transform only");

    next.object.geometry = GeometryKind::Sphere;
    renderer.config_committed(&next, &[ConfigField::ObjectConfig]);
    assert_eq!(renderer.mesh_revision(), first + 1);
    assert_eq!(renderer.mesh().triangle_count(), 2 * 32 * 31);

    match renderer.tick(0.0, Vec2::ZERO) {
        Frame::Effect {
            model,
            mesh_revision,
            ..
        } => {
            assert_eq!(mesh_revision, first + 1);
            let p = model.transform_point3(glam::Vec3::ONE);
            assert_eq!(p.to_array(), [1.0, 2.0, 3.0]);
        }
        Frame::Fallback { .. } => panic!("expected effect"),
    }
}

#[test]
fn late_completion_for_superseded_request_is_ignored() {
    let mut renderer = SceneRenderer::new(SceneConfig::default(), ManualLoader::default());
    let mut stale = ManualLoader::default();
    std::mem::swap(renderer.loader_mut(), &mut stale);

    let mut next = renderer.config().clone();
    next.texture = TextureSelection::Registered("sphere".into());
    renderer.config_committed(&next, &[ConfigField::TextureSet]);

    // the face pair finishes after the switch; nobody holds its tickets anymore
    stale.complete_all();
    assert!(renderer.tick(0.1, Vec2::ZERO).is_fallback());
    renderer.loader_mut().complete_all();
    let frame = renderer.tick(0.1, Vec2::ZERO);
    assert!(frame
        .uniforms()
        .unwrap()
        .color_texture
        .locator
        .ends_with("image.png"));
}

#[test]
fn negative_or_nan_dt_does_not_move_time_backwards() {
    let mut renderer = ready_renderer(SceneConfig::default());
    renderer.tick(1.0, Vec2::ZERO);
    renderer.tick(-5.0, Vec2::ZERO);
    renderer.tick(f32::NAN, Vec2::ZERO);
    assert_eq!(renderer.elapsed(), 1.0);
}

#[test]
fn ticket_hands_out_its_result_once() {
    let (completer, ticket) = holo_core::texture_request("mem://a");
    assert_eq!(ticket.locator(), "mem://a");
    assert!(ticket.try_take().is_none());
    assert!(completer.complete(Ok(holo_core::TexturePixels::solid(1, 1, [0, 0, 0, 255]))));
    assert!(ticket.try_take().is_some());
    assert!(ticket.try_take().is_none());
}

#[test]
fn completing_after_the_ticket_is_dropped_reports_false() {
    let (completer, ticket) = holo_core::texture_request("mem://b");
    drop(ticket);
    assert!(!completer.complete(Ok(holo_core::TexturePixels::solid(1, 1, [0; 4]))));
}

#[test]
fn clock_keeps_running_after_a_week() {
    let mut config = SceneConfig::default();
    config.auto_rotate = true;
    let mut renderer = ready_renderer(config);
    for _ in 0..168 {
        renderer.tick(3600.0, Vec2::ZERO);
    }
    let week = renderer.elapsed();
    let progress_before = renderer.progress();
    let yaw_before = renderer.rotation_y();
    assert!((0.0..TAU).contains(&yaw_before));

    let mut last = week;
    for _ in 0..600 {
        renderer.tick(1.0 / 60.0, Vec2::ZERO);
        assert!(renderer.elapsed() > last);
        last = renderer.elapsed();
    }
    assert!((renderer.elapsed() - week - 10.0).abs() < 1e-3);
    assert!((renderer.progress() - progress_before).abs() > 1e-4);

    let turned = (renderer.rotation_y() - yaw_before).rem_euclid(TAU);
    assert!((turned - 10.0 * 0.2).abs() < 1e-3);

    match renderer.tick(1.0 / 60.0, Vec2::ZERO) {
        Frame::Effect { uniforms, .. } => {
            assert!(uniforms.time.is_finite());
            assert!(uniforms.time < 3600.0);
        }
        Frame::Fallback { .. } => panic!("textures were resolved"),
    }
}
