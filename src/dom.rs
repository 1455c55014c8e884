use crate::gl::WebGl;
use fx_core::{RenderError, Surface, SurfaceRect};
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn find_canvas(document: &web::Document, id: &str) -> Option<web::HtmlCanvasElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web::HtmlCanvasElement>().ok())
}

/// Fixed, full-window, click-through canvas appended to `<body>`.
pub fn append_overlay_canvas(document: &web::Document) -> anyhow::Result<web::HtmlCanvasElement> {
    let body = document.body().ok_or_else(|| anyhow::anyhow!("no <body>"))?;
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    canvas
        .set_attribute("style", crate::constants::OVERLAY_CANVAS_STYLE)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    body.append_child(&canvas)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(canvas)
}

/// WebGL 1 context of `canvas`; `transparent` asks for a premultiplied alpha buffer.
pub fn webgl_context(
    canvas: &web::HtmlCanvasElement,
    transparent: bool,
) -> Result<WebGl, RenderError> {
    let ctx = if transparent {
        let attrs = web::WebGlContextAttributes::new();
        attrs.set_alpha(true);
        attrs.set_premultiplied_alpha(true);
        canvas.get_context_with_context_options("webgl", &attrs)
    } else {
        canvas.get_context("webgl")
    };
    ctx.ok()
        .flatten()
        .and_then(|obj| obj.dyn_into::<web::WebGlRenderingContext>().ok())
        .map(WebGl)
        .ok_or(RenderError::ContextUnavailable)
}

#[derive(Clone, Copy, Debug)]
enum Sizing {
    // backing buffer follows the element's layout size
    Layout,
    // backing buffer follows the window size times a pixel ratio
    Window { dpr: f32 },
}

/// An `HtmlCanvasElement` seen as the engine's drawable surface.
#[derive(Clone)]
pub struct CanvasSurface {
    canvas: web::HtmlCanvasElement,
    sizing: Sizing,
}

impl CanvasSurface {
    pub fn layout(canvas: web::HtmlCanvasElement) -> Self {
        Self {
            canvas,
            sizing: Sizing::Layout,
        }
    }

    pub fn full_window(canvas: web::HtmlCanvasElement, dpr: f32) -> Self {
        Self {
            canvas,
            sizing: Sizing::Window { dpr },
        }
    }
}

impl Surface for CanvasSurface {
    fn display_size(&self) -> (u32, u32) {
        match self.sizing {
            Sizing::Layout => (
                self.canvas.client_width().max(0) as u32,
                self.canvas.client_height().max(0) as u32,
            ),
            Sizing::Window { dpr } => {
                let (w, h) = window_inner_size();
                ((w * dpr) as u32, (h * dpr) as u32)
            }
        }
    }

    fn backing_size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn set_backing_size(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn bounding_rect(&self) -> SurfaceRect {
        let rect = self.canvas.get_bounding_client_rect();
        SurfaceRect {
            left: rect.left() as f32,
            top: rect.top() as f32,
            width: rect.width() as f32,
            height: rect.height() as f32,
        }
    }
}

fn window_inner_size() -> (f32, f32) {
    let Some(w) = web::window() else {
        return (0.0, 0.0);
    };
    let read = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
    };
    (read(w.inner_width()), read(w.inner_height()))
}
