/// Default lower HSV bound (H in degrees / 2, S and V in 0..=255).
pub const DEFAULT_LOWER_HSV: [u8; 3] = [35, 52, 72];

/// Default upper HSV bound.
pub const DEFAULT_UPPER_HSV: [u8; 3] = [102, 255, 255];

/// Largest hue value in the 8-bit HSV convention (360 degrees / 2, exclusive).
pub const HUE_MAX: u8 = 179;

/// Default minimum contour area (pixels) for a region to be kept.
pub const DEFAULT_MIN_AREA: u32 = 1000;

/// Upper bound accepted for the minimum contour area.
pub const MAX_MIN_AREA: u32 = 5000;

/// Default side length of the square dilation kernel.
pub const DEFAULT_DILATION_KERNEL_SIZE: u32 = 50;

/// Accepted range for the dilation kernel side length.
pub const DILATION_KERNEL_RANGE: (u32, u32) = (1, 100);

/// Default number of regions kept after ranking.
pub const DEFAULT_MAX_REGIONS: usize = 24;

/// Accepted range for the number of kept regions.
pub const MAX_REGIONS_RANGE: (usize, usize) = (1, 50);

/// Default grid shape of the visualization.
pub const DEFAULT_GRID_ROWS: u32 = 6;
pub const DEFAULT_GRID_COLUMNS: u32 = 4;

/// Accepted ranges for the grid shape.
pub const GRID_ROWS_RANGE: (u32, u32) = (1, 20);
pub const GRID_COLUMNS_RANGE: (u32, u32) = (1, 10);

/// Physical samples per row band of the tray.
pub const DEFAULT_SAMPLES_PER_ROW: usize = 4;

/// Decimal digits kept for reported areas.
pub const AREA_DECIMALS: i32 = 4;

/// Default unit label of the real-world distance.
pub const DEFAULT_UNIT: &str = "cm";

/// Maximum (width, height) of the calibration preview.
pub const CALIBRATION_PREVIEW_MAX: (u32, u32) = (800, 600);

/// Maximum (width, height) used when displaying the grid visualization.
pub const GRID_DISPLAY_MAX: (u32, u32) = (1000, 700);

/// Side length in pixels of one grid cell image.
pub const GRID_CELL_SIZE: u32 = 160;

/// Height in pixels of the caption band above each grid cell.
pub const GRID_CAPTION_HEIGHT: u32 = 44;

/// Padding between grid cells.
pub const GRID_PADDING: u32 = 8;

/// Caption font size (pixels) in the grid visualization.
pub const GRID_FONT_PX: f32 = 18.0;

/// Label font size (pixels) in the full-image overlay.
pub const OVERLAY_FONT_PX: f32 = 90.0;

/// Stroke width of the squares drawn on the overlay.
pub const OVERLAY_LINE_THICKNESS: u32 = 3;

/// Gap between a square's top edge and its label baseline on the overlay.
pub const OVERLAY_LABEL_OFFSET: i32 = 10;
