//! Canvas lookup, context acquisition, and the one-shot render.

use quadblend_core::{DemoOptions, Pipeline, RenderError};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, WebGl2RenderingContext, Window};

const NO_WEBGL2: &str = "the browser does not appear to support WebGL2";

/// Renders the demo once into the canvas with the given element id.
///
/// `options_json` may be a JSON object overriding any of the
/// [`DemoOptions`] fields; `None` (or `{}`) uses the original demo's
/// constants. Returns an error (after alerting the user) if the canvas
/// cannot be found, WebGL2 is unavailable, or pipeline setup fails.
#[wasm_bindgen]
pub fn run(canvas_id: &str, options_json: Option<String>) -> Result<(), JsValue> {
    let options = match options_json {
        Some(json) => DemoOptions::from_json(&json)
            .map_err(|err| JsValue::from_str(&format!("invalid options: {err}")))?,
        None => DemoOptions::default(),
    };

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window object"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document object"))?;
    let canvas: HtmlCanvasElement = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| JsValue::from_str(&format!("no element with id '{canvas_id}'")))?
        .dyn_into()
        .map_err(|_| JsValue::from_str(&format!("element '{canvas_id}' is not a canvas")))?;

    // Context acquisition must fail before any GPU object is allocated;
    // without a context there is nothing to release.
    let context = match webgl2_context(&canvas) {
        Ok(context) => context,
        Err(err) => return Err(fatal(&window, &err)),
    };
    let gl = glow::Context::from_webgl2_context(context);

    let (canvas_width, canvas_height) = (canvas.width(), canvas.height());
    render_once(&gl, &options, canvas_width, canvas_height).map_err(|err| fatal(&window, &err))
}

fn webgl2_context(canvas: &HtmlCanvasElement) -> Result<WebGl2RenderingContext, RenderError> {
    canvas
        .get_context("webgl2")
        .ok()
        .flatten()
        .ok_or_else(|| RenderError::ContextUnavailable(NO_WEBGL2.to_owned()))?
        .dyn_into::<WebGl2RenderingContext>()
        .map_err(|_| RenderError::ContextUnavailable(NO_WEBGL2.to_owned()))
}

fn render_once(
    gl: &glow::Context,
    options: &DemoOptions,
    canvas_width: u32,
    canvas_height: u32,
) -> Result<(), RenderError> {
    let pipeline = Pipeline::new(gl, options)?;
    pipeline.render(gl, canvas_width, canvas_height);
    pipeline.destroy(gl);
    Ok(())
}

fn fatal(window: &Window, err: &RenderError) -> JsValue {
    log::error!("{err}");
    let message = err.to_string();
    let _ = window.alert_with_message(&message);
    JsValue::from_str(&message)
}
