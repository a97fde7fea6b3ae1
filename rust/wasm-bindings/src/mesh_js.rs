// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Box mesh handed to the renderer

use clipbox_geometry::Mesh;
use wasm_bindgen::prelude::*;

/// Triangulated box plus the request it answers
#[wasm_bindgen]
pub struct BoxMeshJs {
    request_id: u32,
    build_ms: f64,
    mesh: Mesh,
}

#[wasm_bindgen]
impl BoxMeshJs {
    /// Id returned by the `generate` call that produced this mesh
    #[wasm_bindgen(getter, js_name = requestId)]
    pub fn request_id(&self) -> u32 {
        self.request_id
    }

    /// Wall-clock build time in milliseconds
    #[wasm_bindgen(getter, js_name = buildMs)]
    pub fn build_ms(&self) -> f64 {
        self.build_ms
    }

    /// Get positions as Float32Array (copy to JS)
    #[wasm_bindgen(getter)]
    pub fn positions(&self) -> js_sys::Float32Array {
        js_sys::Float32Array::from(&self.mesh.positions[..])
    }

    /// Get normals as Float32Array (copy to JS)
    #[wasm_bindgen(getter)]
    pub fn normals(&self) -> js_sys::Float32Array {
        js_sys::Float32Array::from(&self.mesh.normals[..])
    }

    /// Get indices as Uint32Array (copy to JS)
    #[wasm_bindgen(getter)]
    pub fn indices(&self) -> js_sys::Uint32Array {
        js_sys::Uint32Array::from(&self.mesh.indices[..])
    }

    #[wasm_bindgen(getter, js_name = vertexCount)]
    pub fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    #[wasm_bindgen(getter, js_name = triangleCount)]
    pub fn triangle_count(&self) -> usize {
        self.mesh.triangle_count()
    }

    /// Enclosed volume in mm³
    #[wasm_bindgen]
    pub fn volume(&self) -> f64 {
        self.mesh.signed_volume()
    }

    /// Surface area in mm²
    #[wasm_bindgen(js_name = surfaceArea)]
    pub fn surface_area(&self) -> f64 {
        self.mesh.surface_area()
    }

    /// Bounding box size [dx, dy, dz] in mm
    #[wasm_bindgen(js_name = boundingBoxDimensions)]
    pub fn bounding_box_dimensions(&self) -> Vec<f32> {
        let (min, max) = self.mesh.bounds();
        vec![max.x - min.x, max.y - min.y, max.z - min.z]
    }
}

impl BoxMeshJs {
    pub fn new(request_id: u32, build_ms: f64, mesh: Mesh) -> Self {
        Self {
            request_id,
            build_ms,
            mesh,
        }
    }
}
