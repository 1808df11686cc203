//! WebAssembly bindings for the FlowLang translator.
//!
//! Every function answers with the same `{success, ...}` envelope the JSON
//! API uses, so the editor handles both transports identically.
//!
//! # Example (JavaScript)
//!
//! ```javascript
//! import init, { parse_flowlang, sync_diagram } from './flowlang_parser.js';
//!
//! await init();
//!
//! const parsed = parse_flowlang(source);
//! if (parsed.success) {
//!   setNodes(parsed.nodes);
//!   setEdges(parsed.edges);
//! }
//!
//! const { flowlang_code } = sync_diagram({ nodes, edges, diagram_title: "Orders" });
//! ```

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::response::{respond, Response};
use crate::serializer::SyncRequest;

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn to_js<T: Serialize>(response: &Response<T>) -> Result<JsValue, JsValue> {
    // Envelope keys must come out as plain object properties, not a Map.
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    response
        .serialize(&serializer)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Parse FlowLang source into `{success, nodes, edges, diagram_info}`.
#[wasm_bindgen]
pub fn parse_flowlang(source: &str) -> Result<JsValue, JsValue> {
    to_js(&crate::parse_flowlang(source))
}

/// Serialize a canvas (`{nodes, edges, diagram_title}`) into
/// `{success, flowlang_code}`.
#[wasm_bindgen]
pub fn sync_diagram(request: JsValue) -> Result<JsValue, JsValue> {
    let response = match serde_wasm_bindgen::from_value::<SyncRequest>(request) {
        Ok(request) => respond(|| crate::sync_diagram(&request)),
        Err(e) => Response::failure(format!("malformed diagram data: {}", e)),
    };
    to_js(&response)
}

/// Glyph for an icon name, or the default glyph.
#[wasm_bindgen]
pub fn icon_glyph(name: &str) -> String {
    crate::icons::name_to_glyph(name).to_string()
}

/// Icon name for a glyph, or `circle`.
#[wasm_bindgen]
pub fn icon_name(glyph: &str) -> String {
    crate::icons::glyph_to_name(glyph).to_string()
}

/// Get the version of the translator.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
