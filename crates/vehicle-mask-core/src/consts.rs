/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// ITU-R BT.601 luminance coefficient for the red channel.
pub const LUMINANCE_R: f32 = 0.299;

/// ITU-R BT.601 luminance coefficient for the green channel.
pub const LUMINANCE_G: f32 = 0.587;

/// ITU-R BT.601 luminance coefficient for the blue channel.
pub const LUMINANCE_B: f32 = 0.114;

/// Number of channels in a color image.
pub const COLOR_CHANNEL_COUNT: usize = 3;

/// Pixel value for foreground in a binary mask.
pub const FOREGROUND: u8 = 255;

/// Pixel value for background in a binary mask.
pub const BACKGROUND: u8 = 0;

/// Side length of the median filter applied before edge detection.
pub const DENOISE_MEDIAN_SIZE: usize = 5;

/// Cut-off applied after feathering: values above it become foreground.
pub const FEATHER_BINARIZE_THRESHOLD: u8 = 127;

/// Upper bound on the half-width of the white-cycle sampling bands.
pub const WHITE_BAND_MAX_HALF_WIDTH: usize = 40;

/// Band height is the image height divided by this.
pub const WHITE_BAND_HEIGHT_DIVISOR: usize = 10;

/// Margin subtracted from the darker band mean to get the auto threshold.
pub const WHITE_AUTO_MARGIN: f64 = 5.0;

/// Lowest luminance the automatic white threshold may settle on.
pub const WHITE_AUTO_MIN: f64 = 200.0;

/// Highest luminance the automatic white threshold may settle on.
pub const WHITE_AUTO_MAX: f64 = 255.0;

pub const DEFAULT_EDGE_LOW: i32 = 50;
pub const DEFAULT_EDGE_HIGH: i32 = 150;
pub const DEFAULT_KERNEL_SIZE: i32 = 7;
pub const DEFAULT_DILATE_ITERS: i32 = 2;
pub const DEFAULT_ERODE_ITERS: i32 = 0;
/// Negative means "derive from the image".
pub const DEFAULT_WHITE_THRESHOLD: i32 = -1;
pub const DEFAULT_MIN_AREA: i32 = 5000;
pub const DEFAULT_FEATHER: i32 = 0;

/// Environment variable whose presence gates the model-backed entry point.
pub const SAM2_MODEL_ENV: &str = "SAM2_MODEL";

/// Environment variable overriding the external segmenter script path.
pub const SAM2_SCRIPT_ENV: &str = "SAM2_MASK_SCRIPT";

/// Script path used when `SAM2_MASK_SCRIPT` is unset.
pub const DEFAULT_SAM2_SCRIPT: &str = "scripts/sam2_vehicle_mask.py";

/// Suffix appended to the input stem for batch output names.
pub const BATCH_MASK_SUFFIX: &str = "_mask";
