#![cfg(target_arch = "wasm32")]
use fx_core::{Animation, FrameDriver, LiquidParams, LiquidScene, TrailParams, TrailScene};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod gl;

use constants::{LIQUID_CANVAS_ID, TRAIL_ENABLE_ATTR};
use dom::CanvasSurface;
use events::Listener;
use frame::LoopHandle;

/// One effect attached to the page.
struct Mounted {
    listeners: Vec<Listener>,
    frame_loop: LoopHandle,
    // canvases the engine created itself and must take out of the page again
    owned_canvas: Option<web::HtmlCanvasElement>,
}

impl Mounted {
    fn unmount(self) {
        let Mounted {
            listeners,
            frame_loop,
            owned_canvas,
        } = self;
        // listeners first so no event reaches a stopped driver
        drop(listeners);
        frame_loop.stop();
        if let Some(canvas) = owned_canvas {
            canvas.remove();
        }
    }
}

thread_local! {
    static MOUNTED: RefCell<Vec<Mounted>> = RefCell::new(Vec::new());
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("fx-web starting");

    if let Err(e) = mount_effects() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

/// Attach the effects to the current page. Returns how many are running.
/// Calling it again while effects are mounted changes nothing.
#[wasm_bindgen]
pub fn mount_effects() -> Result<u32, JsValue> {
    let already = MOUNTED.with(|m| m.borrow().len());
    if already > 0 {
        return Ok(already as u32);
    }
    let document = dom::window_document().ok_or("no document")?;

    let mut mounted = Vec::new();
    match mount_liquid(&document) {
        Ok(Some(m)) => mounted.push(m),
        Ok(None) => {}
        Err(e) => log::error!("[liquid] {:?}", e),
    }
    let trail_enabled = document
        .body()
        .is_some_and(|b| b.has_attribute(TRAIL_ENABLE_ATTR));
    if trail_enabled {
        match mount_trail(&document) {
            Ok(Some(m)) => mounted.push(m),
            Ok(None) => {}
            Err(e) => log::error!("[trail] {:?}", e),
        }
    }

    let count = mounted.len() as u32;
    MOUNTED.with(|m| m.borrow_mut().extend(mounted));
    log::info!("{} effect(s) mounted", count);
    Ok(count)
}

/// Stop every running effect and release its GPU objects and listeners.
/// Returns how many were stopped.
#[wasm_bindgen]
pub fn unmount_effects() -> u32 {
    let mounted = MOUNTED.with(|m| std::mem::take(&mut *m.borrow_mut()));
    let count = mounted.len() as u32;
    for m in mounted {
        m.unmount();
    }
    count
}

/// Pointer moves and context loss/restore for the scene run by `driver`.
fn wire_scene<A: Animation + 'static>(
    document: &web::Document,
    canvas: &web::HtmlCanvasElement,
    driver: &Rc<RefCell<FrameDriver<A>>>,
    on_pointer_move: fn(&mut A, f32, f32),
) -> anyhow::Result<Vec<Listener>> {
    let driver_pointer = driver.clone();
    let pointer = events::wire_pointermove(document, move |x, y| {
        if let Some(scene) = driver_pointer.borrow_mut().animation_mut() {
            on_pointer_move(scene, x, y);
        }
    })?;
    let driver_lost = driver.clone();
    let driver_restored = driver.clone();
    let [lost, restored] = events::wire_context_loss(
        canvas,
        move || driver_lost.borrow_mut().context_lost(),
        move || driver_restored.borrow_mut().context_restored(),
    )?;
    Ok(vec![pointer, lost, restored])
}

fn mount_liquid(document: &web::Document) -> anyhow::Result<Option<Mounted>> {
    let Some(canvas) = dom::find_canvas(document, LIQUID_CANVAS_ID) else {
        log::info!("[liquid] no #{} on this page", LIQUID_CANVAS_ID);
        return Ok(None);
    };
    let gl = match dom::webgl_context(&canvas, false) {
        Ok(gl) => gl,
        Err(e) => {
            log::error!("[liquid] {}", e);
            return Ok(None);
        }
    };

    let surface = CanvasSurface::layout(canvas.clone());
    let scene = LiquidScene::new(gl, surface, LiquidParams::default());
    let driver = Rc::new(RefCell::new(FrameDriver::new("liquid", scene)));

    let listeners = wire_scene(document, &canvas, &driver, LiquidScene::on_pointer_move)?;
    let frame_loop = frame::start_loop("liquid", driver)?;

    Ok(Some(Mounted {
        listeners,
        frame_loop,
        owned_canvas: None,
    }))
}

fn mount_trail(document: &web::Document) -> anyhow::Result<Option<Mounted>> {
    let params = TrailParams::default();
    let canvas = dom::append_overlay_canvas(document)?;
    let gl = match dom::webgl_context(&canvas, true) {
        Ok(gl) => gl,
        Err(e) => {
            log::error!("[trail] {}", e);
            canvas.remove();
            return Ok(None);
        }
    };

    let surface = CanvasSurface::full_window(canvas.clone(), params.dpr);
    let scene = TrailScene::new(gl, surface, params);
    let driver = Rc::new(RefCell::new(FrameDriver::new("trail", scene)));

    let wired = wire_scene(document, &canvas, &driver, TrailScene::on_pointer_move)
        .and_then(|listeners| Ok((listeners, frame::start_loop("trail", driver)?)));

    match wired {
        Ok((listeners, frame_loop)) => Ok(Some(Mounted {
            listeners,
            frame_loop,
            owned_canvas: Some(canvas),
        })),
        Err(e) => {
            canvas.remove();
            Err(e)
        }
    }
}
