pub mod calibrate;
pub mod config;
pub mod info;
pub mod preview;
pub mod run;

use anyhow::{bail, Context, Result};
use plante_core::calibration::CalibrationPoint;

/// Parse `WxH` (e.g. `800x600`).
pub fn parse_size(s: &str) -> Result<(u32, u32)> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .with_context(|| format!("Expected WIDTHxHEIGHT, got {s:?}"))?;
    let w: u32 = w.trim().parse().with_context(|| format!("Invalid width in {s:?}"))?;
    let h: u32 = h.trim().parse().with_context(|| format!("Invalid height in {s:?}"))?;
    if w == 0 || h == 0 {
        bail!("Size must be non-zero, got {s:?}");
    }
    Ok((w, h))
}

/// Parse `x1,y1,x2,y2` into two points.
pub fn parse_points(s: &str) -> Result<Vec<CalibrationPoint>> {
    let values: Vec<f64> = s
        .split(',')
        .map(|v| {
            v.trim()
                .parse()
                .with_context(|| format!("Invalid coordinate {v:?}"))
        })
        .collect::<Result<_>>()?;
    if values.len() != 4 {
        bail!("Expected x1,y1,x2,y2, got {} value(s)", values.len());
    }
    Ok(values
        .chunks(2)
        .map(|c| CalibrationPoint::new(c[0], c[1]))
        .collect())
}
