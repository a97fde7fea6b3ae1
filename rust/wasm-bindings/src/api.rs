// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Main Clipbox API
//!
//! Options objects use the camelCase field names of [`BoxRequest`]:
//!
//! ```javascript
//! const api = new BoxAPI();
//! const mesh = await api.generate({
//!   height: 52, width: 80, depth: 60, wall: 2, bottom: 3,
//!   radii: { frontLeft: 6, frontRight: 6, backLeft: 6, backRight: 6 },
//!   openFront: { openness: 0.4, bottomOffset: 5, cutoutRadius: 4 },
//! });
//! if (mesh) renderer.upload(mesh.positions, mesh.normals, mesh.indices);
//! ```

use crate::mesh_js::BoxMeshJs;
use crate::utils;
use clipbox_geometry::{
    clamp_request, BoxGenerator, BoxRequest, CsgKernel, GeneratorConfig, Limits,
};
use gloo_timers::future::TimeoutFuture;
use js_sys::Promise;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

/// Box generator bound to one configuration.
///
/// Requests are answered newest-first: a `generate` call that is overtaken
/// by a later one before it starts resolves to `null` instead of a mesh.
#[wasm_bindgen]
pub struct BoxAPI {
    generator: Rc<BoxGenerator<CsgKernel>>,
    latest: Rc<Cell<u32>>,
}

#[wasm_bindgen]
impl BoxAPI {
    /// Create a new API instance. `config` may be omitted for the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<BoxAPI, JsValue> {
        let config: GeneratorConfig = if config.is_undefined() || config.is_null() {
            GeneratorConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        Ok(Self {
            generator: Rc::new(BoxGenerator::new(CsgKernel::new(), config)),
            latest: Rc::new(Cell::new(0)),
        })
    }

    /// Id of the most recent `generate` call
    #[wasm_bindgen(getter, js_name = latestRequest)]
    pub fn latest_request(&self) -> u32 {
        self.latest.get()
    }

    /// Generate a box mesh.
    ///
    /// Resolves to a `BoxMeshJs`, or to `null` when a newer request arrived
    /// first. Rejects with a message when the geometry cannot be built.
    #[wasm_bindgen]
    pub fn generate(&self, options: JsValue) -> Promise {
        let request_id = self.latest.get().wrapping_add(1);
        self.latest.set(request_id);
        let parsed = serde_wasm_bindgen::from_value::<BoxRequest>(options);

        Promise::new(&mut |resolve, reject| {
            let request = match &parsed {
                Ok(request) => *request,
                Err(err) => {
                    let _ = reject.call1(&JsValue::NULL, &JsValue::from_str(&err.to_string()));
                    return;
                }
            };
            let generator = Rc::clone(&self.generator);
            let latest = Rc::clone(&self.latest);

            spawn_local(async move {
                // Let queued parameter updates land before committing to a build
                TimeoutFuture::new(0).await;
                if latest.get() != request_id {
                    utils::debug(&format!("[Clipbox] request {} superseded", request_id));
                    let _ = resolve.call1(&JsValue::NULL, &JsValue::NULL);
                    return;
                }

                let start = utils::now_ms();
                match generator.generate_mesh(&request) {
                    Ok(mesh) => {
                        let build_ms = utils::now_ms() - start;
                        utils::debug(&format!(
                            "[Clipbox] request {}: {} triangles in {:.1} ms",
                            request_id,
                            mesh.triangle_count(),
                            build_ms
                        ));
                        let mesh = BoxMeshJs::new(request_id, build_ms, mesh);
                        let _ = resolve.call1(&JsValue::NULL, &mesh.into());
                    }
                    Err(err) => {
                        utils::warn(&format!("[Clipbox] request {} failed: {}", request_id, err));
                        let _ = reject.call1(&JsValue::NULL, &JsValue::from_str(&err.to_string()));
                    }
                }
            });
        })
    }

    /// Drop every pending `generate` call; they resolve to `null`
    #[wasm_bindgen]
    pub fn cancel(&self) {
        self.latest.set(self.latest.get().wrapping_add(1));
    }

    /// Slider bounds for the given options
    #[wasm_bindgen]
    pub fn limits(&self, options: JsValue) -> Result<JsValue, JsValue> {
        let request: BoxRequest = serde_wasm_bindgen::from_value(options)?;
        Ok(serde_wasm_bindgen::to_value(&Limits::compute(&request))?)
    }

    /// The options as the generator will actually use them
    #[wasm_bindgen(js_name = clampRequest)]
    pub fn clamp_request(&self, options: JsValue) -> Result<JsValue, JsValue> {
        let request: BoxRequest = serde_wasm_bindgen::from_value(options)?;
        Ok(serde_wasm_bindgen::to_value(&clamp_request(&request))?)
    }
}
