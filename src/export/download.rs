use wasm_bindgen::JsCast;

use crate::error::AppError;

fn js_error(context: &str, value: wasm_bindgen::JsValue) -> AppError {
    AppError::Export(format!("{}: {:?}", context, value))
}

/// Save `bytes` as `file_name` through a temporary download link.
///
/// The object URL and the hidden anchor only live for the duration of
/// the click.
pub fn save_pdf(file_name: &str, bytes: &[u8]) -> Result<(), AppError> {
    let window = web_sys::window().ok_or_else(|| AppError::Export("no window".to_string()))?;
    let document = window
        .document()
        .ok_or_else(|| AppError::Export("no document".to_string()))?;
    let body = document
        .body()
        .ok_or_else(|| AppError::Export("no document body".to_string()))?;

    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(bytes));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("application/pdf");
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(|e| js_error("blob", e))?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)
        .map_err(|e| js_error("object URL", e))?;

    let anchor: web_sys::HtmlAnchorElement = document
        .create_element("a")
        .map_err(|e| js_error("anchor", e))?
        .dyn_into()
        .map_err(|_| AppError::Export("anchor has unexpected type".to_string()))?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    let _ = anchor.set_attribute("style", "display: none");

    let clicked = body
        .append_child(&anchor)
        .map(|_| anchor.click())
        .map_err(|e| js_error("attach anchor", e));

    anchor.remove();
    let _ = web_sys::Url::revoke_object_url(&url);
    clicked
}
