//! Parse + validate the WGSL shaders without touching a GPU.

use naga::valid::{Capabilities, ValidationFlags, Validator};

fn validate(label: &str, source: &str) {
    let module = naga::front::wgsl::parse_str(source)
        .unwrap_or_else(|e| panic!("{label}: WGSL parse error: {}", e.emit_to_string(source)));
    Validator::new(ValidationFlags::all(), Capabilities::all())
        .validate(&module)
        .unwrap_or_else(|e| panic!("{label}: validation error: {e:?}"));
}

#[test]
fn scene_shader_is_valid() {
    validate("scene.wgsl", include_str!("../shaders/scene.wgsl"));
}

#[test]
fn composite_shader_is_valid() {
    validate("composite.wgsl", include_str!("../shaders/composite.wgsl"));
}

#[test]
fn composite_shader_has_both_entry_points() {
    let module = naga::front::wgsl::parse_str(include_str!("../shaders/composite.wgsl")).unwrap();
    let names: Vec<_> = module.entry_points.iter().map(|ep| ep.name.as_str()).collect();
    assert!(names.contains(&"vs_main"));
    assert!(names.contains(&"fs_main"));
}
