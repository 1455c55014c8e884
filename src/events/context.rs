use super::{listen, Listener};
use web_sys as web;

/// Report loss and restore of the GL context behind `canvas`.
pub fn wire_context_loss(
    canvas: &web::HtmlCanvasElement,
    mut on_lost: impl FnMut() + 'static,
    mut on_restored: impl FnMut() + 'static,
) -> anyhow::Result<[Listener; 2]> {
    let target: web::EventTarget = canvas.clone().into();
    let lost = listen(target.clone(), "webglcontextlost", move |ev| {
        // the browser only restores a context whose loss was default-prevented
        ev.prevent_default();
        on_lost();
    })?;
    let restored = listen(target, "webglcontextrestored", move |_| on_restored())?;
    Ok([lost, restored])
}
