use super::{listen, Listener};
use wasm_bindgen::JsCast;
use web_sys as web;

/// Call `handler` with the client (page viewport) coordinates of every
/// pointer move anywhere in the document, so effects keep tracking when the
/// pointer is outside their canvas.
pub fn wire_pointermove(
    document: &web::Document,
    mut handler: impl FnMut(f32, f32) + 'static,
) -> anyhow::Result<Listener> {
    listen(document.clone().into(), "pointermove", move |ev| {
        if let Some(ev) = ev.dyn_ref::<web::MouseEvent>() {
            handler(ev.client_x() as f32, ev.client_y() as f32);
        }
    })
}
