//! Browser tests, run with `wasm-pack test --headless --firefox`.

#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;
use wasm_region_loader::RegionLoaderHandle;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn invalid_shape_is_js_error() {
    assert!(RegionLoaderHandle::sphere(-1).is_err());
    assert!(RegionLoaderHandle::cube(1, -1, 1, false, true).is_err());
}

#[wasm_bindgen_test]
fn invalid_chunk_size_is_js_error() {
    let mut handle = RegionLoaderHandle::sphere(1).unwrap();
    assert!(handle.refresh(0.0, 0.0, 0.0, 16, 0, 16).is_err());
    assert_eq!(handle.loaded_count(), 0);
}

#[wasm_bindgen_test]
fn from_toml_roundtrip() {
    let text = "show_debug = true\n[shape]\nkind = \"cube\"\nsize = [1, 0, 1]\nper_axis = true";
    let mut handle = RegionLoaderHandle::from_toml(text).unwrap();

    let delta = handle.refresh(8.0, 8.0, 8.0, 16, 16, 16).unwrap();
    assert_eq!(delta.entered_count(), 9);
    assert_eq!(handle.debug_lines().len(), 9 * 72);

    assert!(RegionLoaderHandle::from_toml("[shape]\nkind = \"cone\"").is_err());
}

#[wasm_bindgen_test]
fn version_is_set() {
    assert!(!wasm_region_loader::get_version().is_empty());
}
