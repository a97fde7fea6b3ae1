// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

#![cfg(target_arch = "wasm32")]

use clipbox_wasm::BoxAPI;
use js_sys::Reflect;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn options(open_front: bool) -> JsValue {
    let source = if open_front {
        r#"{"height":30,"width":50,"depth":40,"wall":2,"bottom":3,
            "radii":{"frontLeft":6,"frontRight":6,"backLeft":6,"backRight":6},
            "openFront":{"openness":0.2,"bottomOffset":2,"cutoutRadius":3}}"#
    } else {
        r#"{"height":30,"width":50,"depth":40,"wall":2,"bottom":3,
            "radii":{"frontLeft":6,"frontRight":6,"backLeft":6,"backRight":6}}"#
    };
    js_sys::JSON::parse(source).unwrap()
}

fn draft_api() -> BoxAPI {
    let config = js_sys::JSON::parse(r#"{"cornerSegments":4,"clipArcSegments":8}"#).unwrap();
    BoxAPI::new(config).unwrap()
}

#[wasm_bindgen_test]
fn limits_report_corner_bound() {
    let api = BoxAPI::new(JsValue::UNDEFINED).unwrap();
    let limits = api.limits(options(false)).unwrap();
    let max_corner = Reflect::get(&limits, &"maxCornerRadius".into())
        .unwrap()
        .as_f64()
        .unwrap();
    assert!((max_corner - 20.0).abs() < 1e-9);
}

#[wasm_bindgen_test]
fn clamp_request_caps_radii() {
    let api = BoxAPI::new(JsValue::UNDEFINED).unwrap();
    let raw = js_sys::JSON::parse(
        r#"{"height":30,"width":50,"depth":40,"wall":2,"bottom":3,
            "radii":{"frontLeft":500,"frontRight":-1,"backLeft":6,"backRight":6}}"#,
    )
    .unwrap();
    let clamped = api.clamp_request(raw).unwrap();
    let radii = Reflect::get(&clamped, &"radii".into()).unwrap();
    let front_left = Reflect::get(&radii, &"frontLeft".into())
        .unwrap()
        .as_f64()
        .unwrap();
    let front_right = Reflect::get(&radii, &"frontRight".into())
        .unwrap()
        .as_f64()
        .unwrap();
    assert!((front_left - 20.0).abs() < 1e-9);
    assert_eq!(front_right, 0.0);
}

#[wasm_bindgen_test]
fn malformed_config_is_rejected() {
    let config = js_sys::JSON::parse(r#"{"cornerSegments":"many"}"#).unwrap();
    assert!(BoxAPI::new(config).is_err());
}

#[wasm_bindgen_test]
async fn generate_resolves_mesh() {
    let api = draft_api();
    let value = JsFuture::from(api.generate(options(true))).await.unwrap();
    assert!(!value.is_null());
    let request = Reflect::get(&value, &"requestId".into()).unwrap();
    assert_eq!(request.as_f64(), Some(1.0));
    let triangles = Reflect::get(&value, &"triangleCount".into()).unwrap();
    assert!(triangles.as_f64().unwrap() > 0.0);
}

#[wasm_bindgen_test]
async fn superseded_request_resolves_null() {
    let api = draft_api();
    let first = api.generate(options(false));
    let second = api.generate(options(true));
    assert_eq!(api.latest_request(), 2);

    assert!(JsFuture::from(first).await.unwrap().is_null());
    let second = JsFuture::from(second).await.unwrap();
    assert!(!second.is_null());
}

#[wasm_bindgen_test]
async fn cancel_discards_pending_request() {
    let api = draft_api();
    let pending = api.generate(options(false));
    api.cancel();
    assert!(JsFuture::from(pending).await.unwrap().is_null());
}

#[wasm_bindgen_test]
async fn malformed_options_reject() {
    let api = draft_api();
    let options = js_sys::JSON::parse(r#"{"height":30}"#).unwrap();
    assert!(JsFuture::from(api.generate(options)).await.is_err());
}
