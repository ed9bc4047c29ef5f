/// Icon-wide constants: palette, output defaults and proportional geometry

pub mod palette {
    /// Base fill behind the motif (indigo)
    pub const BACKGROUND: &str = "#6366f1";
    /// Top row of the gradient variant (darker purple)
    pub const GRADIENT_START: &str = "#4f46e5";
    /// Bottom row of the gradient variant (lighter purple)
    pub const GRADIENT_END: &str = "#818cf8";
    /// Phone body, circle outline and wave strokes
    pub const FOREGROUND: &str = "#ffffff";
    pub const SCREEN: &str = "#e0e0e0";
    pub const SPEAKER: &str = "#9e9e9e";
}

pub mod output {
    /// Sizes the web app manifest and service worker expect
    pub const DEFAULT_SIZES: [u32; 2] = [192, 512];

    /// `{size}` is replaced by the pixel size
    pub const FILE_TEMPLATE: &str = "icon-{size}.png";
    pub const SIZE_PLACEHOLDER: &str = "{size}";

    /// Vector source for the convert path
    pub const SVG_INPUT: &str = "icon.svg";

    /// Style file picked up from the working directory when present
    pub const CONFIG_FILE: &str = "icons.yaml";
}

/// Geometry as fractions of the canvas size. Bounding boxes are
/// `[x0, y0, x1, y1]` and get truncated to whole pixels per size.
pub mod geometry {
    pub const PHONE_BODY: [f32; 4] = [0.35, 0.20, 0.65, 0.80];
    pub const PHONE_CORNER_RADIUS: f32 = 0.05;
    pub const PHONE_SCREEN: [f32; 4] = [0.38, 0.29, 0.62, 0.71];
    pub const PHONE_SPEAKER: [f32; 4] = [0.46, 0.235, 0.54, 0.26];

    pub const CIRCLE: [f32; 4] = [0.32, 0.32, 0.68, 0.68];
    pub const CIRCLE_STROKE: f32 = 0.035;

    /// Radius of the innermost wave, measured from the canvas center
    pub const WAVE_BASE_RADIUS: f32 = 0.22;
    /// Radius added per wave step
    pub const WAVE_STEP: f32 = 0.07;
    pub const WAVE_STROKE: f32 = 0.025;

    /// Stroke widths never drop below one pixel, even on tiny canvases
    pub const MIN_STROKE_PX: u32 = 1;
}

pub mod waves {
    pub const DEFAULT_COUNT: u32 = 3;
    /// Upper bound keeps the outermost arc inside the canvas
    pub const MAX_COUNT: u32 = 4;

    /// Opacity of the innermost wave
    pub const START_OPACITY: f32 = 1.0;
    /// Opacity removed per step when fading
    pub const FADE_STEP: f32 = 0.25;
}
