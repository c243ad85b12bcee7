// Page integration constants.

// Canvas mounted automatically at startup when present
pub const AUTO_CANVAS_ID: &str = "globe-canvas";
pub const DATA_SIZE_ATTR: &str = "data-size";
pub const DATA_DARK_ATTR: &str = "data-dark";

// Initial canvas styling; the presenter fades opacity in after the first frame
pub const INITIAL_OPACITY: &str = "0";
pub const FADE_EASING: &str = "ease";
