//! Configuration for piece segmentation, region filtering and classification

/// Frame size the default area thresholds were tuned for
pub const REFERENCE_WIDTH: u32 = 640;
pub const REFERENCE_HEIGHT: u32 = 480;

#[derive(Debug, Clone, PartialEq)]
pub struct DetectionConfig {
    /// Chebyshev radius of the square structuring element (2 => 5x5)
    pub morph_radius: u8,
    /// Regions enclosing less area than this are sensor noise
    pub min_area: f64,
    /// Regions enclosing more area than this are desk or background
    pub max_area: f64,
    /// Aspect ratio above which a region counts as elongated (triangle-like)
    pub elongation_threshold: f64,
    /// Elongated regions above this area are large triangles
    pub large_area: f64,
    /// Elongated regions above this area (and not large) are medium triangles
    pub medium_area: f64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            morph_radius: 2,
            min_area: 500.0,
            max_area: 80_000.0,
            elongation_threshold: 1.3,
            large_area: 8_000.0,
            medium_area: 4_000.0,
        }
    }
}

impl DetectionConfig {
    /// Default thresholds with every area scaled to the given frame size
    pub fn for_resolution(width: u32, height: u32) -> Self {
        let reference = (REFERENCE_WIDTH * REFERENCE_HEIGHT) as f64;
        let factor = (width as f64 * height as f64) / reference;
        Self::default().scaled(factor)
    }

    /// Multiply all area thresholds by `factor`
    pub fn scaled(mut self, factor: f64) -> Self {
        if !(factor.is_finite() && factor > 0.0) {
            log::warn!("Ignoring invalid area scale factor {}", factor);
            return self;
        }
        self.min_area *= factor;
        self.max_area *= factor;
        self.large_area *= factor;
        self.medium_area *= factor;
        self
    }

    /// Check whether an area lies inside the accepted band
    pub fn accepts_area(&self, area: f64) -> bool {
        area >= self.min_area && area <= self.max_area
    }
}
