/// A geolocated dot drawn on the globe surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Marker {
    pub latitude: f32,
    pub longitude: f32,
    pub size: f32,
}

impl Marker {
    pub const fn new(latitude: f32, longitude: f32, size: f32) -> Self {
        Self {
            latitude,
            longitude,
            size,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
            && self.size.is_finite()
            && self.size > 0.0
    }

    /// Clamp coordinates into range and replace unusable values.
    pub fn sanitized(&self) -> Self {
        let latitude = if self.latitude.is_finite() {
            self.latitude.clamp(-90.0, 90.0)
        } else {
            0.0
        };
        let longitude = if self.longitude.is_finite() {
            self.longitude.clamp(-180.0, 180.0)
        } else {
            0.0
        };
        let size = if self.size.is_finite() && self.size > 0.0 {
            self.size
        } else {
            MIN_MARKER_SIZE
        };
        Self {
            latitude,
            longitude,
            size,
        }
    }
}

const MIN_MARKER_SIZE: f32 = 0.01;

// Major carbon-tracking hubs shown on the landing page
const CARBON_HUBS: [Marker; 15] = [
    Marker::new(37.7749, -122.4194, 0.06), // San Francisco
    Marker::new(51.5074, -0.1278, 0.07),   // London
    Marker::new(35.6762, 139.6503, 0.06),  // Tokyo
    Marker::new(1.3521, 103.8198, 0.05),   // Singapore
    Marker::new(-33.8688, 151.2093, 0.05), // Sydney
    Marker::new(48.8566, 2.3522, 0.06),    // Paris
    Marker::new(55.7558, 37.6173, 0.05),   // Moscow
    Marker::new(19.076, 72.8777, 0.06),    // Mumbai
    Marker::new(-23.5505, -46.6333, 0.05), // São Paulo
    Marker::new(31.2304, 121.4737, 0.06),  // Shanghai
    Marker::new(25.2048, 55.2708, 0.05),   // Dubai
    Marker::new(39.9042, 116.4074, 0.05),  // Beijing
    Marker::new(40.7128, -74.006, 0.06),   // New York
    Marker::new(-1.2921, 36.8219, 0.04),   // Nairobi
    Marker::new(52.52, 13.405, 0.05),      // Berlin
];

/// Ordered, read-only list of markers. Draw order follows list order.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkerCatalog {
    markers: Vec<Marker>,
}

impl MarkerCatalog {
    /// Build a catalog, clamping malformed entries instead of rejecting them.
    pub fn new(markers: Vec<Marker>) -> Self {
        let markers = markers
            .into_iter()
            .enumerate()
            .map(|(i, m)| {
                if m.is_valid() {
                    m
                } else {
                    let fixed = m.sanitized();
                    log::warn!(
                        "[markers] marker {} out of range ({}, {}, size {}); clamped to ({}, {}, size {})",
                        i,
                        m.latitude,
                        m.longitude,
                        m.size,
                        fixed.latitude,
                        fixed.longitude,
                        fixed.size
                    );
                    fixed
                }
            })
            .collect();
        Self { markers }
    }

    pub fn carbon_hubs() -> Self {
        Self {
            markers: CARBON_HUBS.to_vec(),
        }
    }

    pub fn empty() -> Self {
        Self {
            markers: Vec::new(),
        }
    }

    pub fn as_slice(&self) -> &[Marker] {
        &self.markers
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Marker> {
        self.markers.iter()
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

impl Default for MarkerCatalog {
    fn default() -> Self {
        Self::carbon_hubs()
    }
}
