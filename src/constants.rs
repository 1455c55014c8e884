// Page wiring for the web front-end. Tuning of the effects themselves lives in
// `fx_core::constants`.

// Hero canvas the liquid shader renders into
pub const LIQUID_CANVAS_ID: &str = "liquid-canvas";

// `<body data-pointer-trail>` opts into the spring trail overlay
pub const TRAIL_ENABLE_ATTR: &str = "data-pointer-trail";

pub const OVERLAY_CANVAS_STYLE: &str =
    "position:fixed;top:0;left:0;width:100vw;height:100vh;pointer-events:none;z-index:9999;";
