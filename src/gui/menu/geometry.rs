use crate::config::MenuConfiguration;
use crate::gui::menu::MenuError;
use strum::Display as StrumDisplay;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Point at `radius` from `self` along `angle` (degrees, clockwise on screen).
    pub fn polar(&self, radius: f64, angle: f64) -> Point {
        let rad = angle.to_radians();
        Point::new(self.x + radius * rad.cos(), self.y + radius * rad.sin())
    }
}

/// Result of hit-testing a pointer position against the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay)]
pub enum Region {
    Outside,
    #[strum(to_string = "Wedge({0})")]
    Wedge(usize),
    Close,
    Pin,
}

/// One pie-slice button.
///
/// Angles are in degrees, measured clockwise from the positive x axis in widget
/// coordinates (y grows downward). The slice is traced counter-clockwise from
/// `start_angle`, so it covers `[start_angle - sweep_angle, start_angle]`.
#[derive(Debug, Clone, PartialEq)]
pub struct WedgeRegion {
    pub index: usize,
    pub center: Point,
    pub radius: f64,
    pub start_angle: f64,
    pub sweep_angle: f64,
}

impl WedgeRegion {
    pub fn end_angle(&self) -> f64 {
        self.start_angle - self.sweep_angle
    }

    pub fn bisector(&self) -> f64 {
        self.start_angle - self.sweep_angle / 2.0
    }

    /// Point on the outer arc halfway through the slice. Hit-testing measures
    /// distances to this point.
    pub fn reference_point(&self) -> Point {
        self.center.polar(self.radius, self.bisector())
    }

    pub fn covers_angle(&self, angle: f64) -> bool {
        let offset = (angle - self.end_angle()).rem_euclid(360.0);
        offset <= self.sweep_angle
    }
}

/// Circular close or pin button.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AuxButton {
    pub center: Point,
    pub radius: f64,
}

impl AuxButton {
    /// Hit radius includes the outline stroke.
    fn hit(&self, point: Point, stroke_width: f64) -> bool {
        point.distance(self.center) < self.radius + stroke_width
    }
}

/// Widget-local layout derived from a [`MenuConfiguration`].
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub size: f64,
    pub center: Point,
    pub stroke_width: f64,
    pub wedges: Vec<WedgeRegion>,
    pub close: AuxButton,
    pub pin: AuxButton,
    icon_radius: f64,
}

impl Geometry {
    pub fn new(config: &MenuConfiguration) -> Result<Self, MenuError> {
        config.validate()?;

        let stroke = config.stroke_width;
        let size = config.widget_size();
        let center = Point::new(size / 2.0, size / 2.0);

        let geometry = Self {
            size,
            center,
            stroke_width: stroke,
            wedges: Self::recompute_wedges(config, center),
            close: AuxButton {
                center,
                radius: config.close_button_radius,
            },
            pin: AuxButton {
                center: Point::new(
                    config.pie_radius * 2.0 - config.pin_button_radius,
                    stroke + config.pin_button_radius,
                ),
                radius: config.pin_button_radius,
            },
            icon_radius: config.pie_radius + config.close_button_radius / 2.0 + stroke
                - config.pie_icon_size as f64 / 2.0,
        };

        log::debug!(
            "Menu geometry: {} wedges of {:.2} deg, size {:.1}",
            geometry.wedges.len(),
            config.angle_per_button(),
            size
        );

        Ok(geometry)
    }

    fn recompute_wedges(config: &MenuConfiguration, center: Point) -> Vec<WedgeRegion> {
        let step = config.angle_per_button();

        (0..config.button_count)
            .map(|i| WedgeRegion {
                index: i,
                center,
                radius: config.pie_radius,
                start_angle: step * (i as f64 - 1.0) + config.base_angle,
                sweep_angle: step,
            })
            .collect()
    }

    /// Where the icon of `wedge` is centred: two thirds of the way from the
    /// widget centre towards the outer arc.
    pub fn icon_center(&self, wedge: &WedgeRegion) -> Point {
        self.center
            .polar(self.icon_radius * 2.0 / 3.0, wedge.bisector())
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x > 0.0 && point.x < self.size && point.y >= 0.0 && point.y < self.size
    }

    /// Classifies a widget-local point. The pin button is only considered when
    /// it is shown.
    pub fn classify(&self, point: Point, show_pin: bool) -> Region {
        if !self.contains(point) {
            return Region::Outside;
        }

        let nearest = self.nearest_wedge(point);

        if show_pin && self.pin.hit(point, self.stroke_width) {
            return Region::Pin;
        }
        if self.close.hit(point, self.stroke_width) {
            return Region::Close;
        }

        nearest.map_or(Region::Outside, Region::Wedge)
    }

    /// Scans wedges starting at index 1 and wrapping round to 0, keeping the
    /// first strictly closer reference point. Equal distances resolve to the
    /// wedge scanned first. Distances keep full `f64` precision rather than
    /// being truncated to whole pixels, so points a fraction of a pixel from
    /// a boundary go to the strictly closer wedge.
    fn nearest_wedge(&self, point: Point) -> Option<usize> {
        let mut nearest = None;
        let mut best = f64::INFINITY;

        for wedge in self.wedges.iter().cycle().skip(1).take(self.wedges.len()) {
            let distance = point.distance(wedge.reference_point());
            if distance < best {
                best = distance;
                nearest = Some(wedge.index);
            }
        }

        nearest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn config(count: usize, base_angle: f64) -> MenuConfiguration {
        MenuConfiguration {
            button_count: count,
            base_angle,
            ..MenuConfiguration::default()
        }
    }

    #[test]
    fn test_wedges_partition_circle() {
        for count in 1..=16 {
            let geometry = Geometry::new(&config(count, 37.0)).unwrap();
            assert_eq!(geometry.wedges.len(), count);

            let total: f64 = geometry.wedges.iter().map(|w| w.sweep_angle).sum();
            assert!((total - 360.0).abs() < EPS, "count {count}: {total}");

            for pair in geometry.wedges.windows(2) {
                // each wedge ends where the previous one started
                assert!((pair[1].end_angle() - pair[0].start_angle).abs() < EPS);
            }
            let first = &geometry.wedges[0];
            let last = &geometry.wedges[count - 1];
            assert!((last.start_angle - (first.end_angle() + 360.0)).abs() < EPS);
        }
    }

    #[test]
    fn test_zero_buttons_rejected() {
        let err = Geometry::new(&config(0, 0.0)).unwrap_err();
        assert!(matches!(err, MenuError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_reference_point_of_second_scan_maps_to_next_index() {
        let geometry = Geometry::new(&config(4, 0.0)).unwrap();
        // scan position 1 bisects 0..90 degrees
        let point = geometry.center.polar(100.0, 45.0);
        assert_eq!(geometry.classify(point, true), Region::Wedge(2));
        assert!(geometry.wedges[2].covers_angle(45.0));
    }

    #[test]
    fn test_every_reference_point_hits_its_own_wedge() {
        for count in 1..=10 {
            let geometry = Geometry::new(&config(count, 12.0)).unwrap();
            for wedge in &geometry.wedges {
                // pull the point inside the arc so it is within bounds
                let point = geometry.center.polar(wedge.radius * 0.8, wedge.bisector());
                assert_eq!(
                    geometry.classify(point, false),
                    Region::Wedge(wedge.index),
                    "count {count}"
                );
            }
        }
    }

    #[test]
    fn test_boundary_tie_goes_to_first_scanned_wedge() {
        // reference points of wedges 1 and 2 sit at 0 and 90 degrees
        let geometry = Geometry::new(&config(4, 45.0)).unwrap();
        assert_eq!(geometry.wedges[1].reference_point(), Point::new(204.0, 104.0));
        assert_eq!(geometry.wedges[2].reference_point(), Point::new(104.0, 204.0));

        // on the 45 degree boundary both are equally close; wedge 1 is scanned first
        let point = Point::new(184.0, 184.0);
        assert_eq!(geometry.classify(point, false), Region::Wedge(1));
        assert_eq!(geometry.classify(point, false), Region::Wedge(1));
    }

    #[test]
    fn test_close_and_pin_hits() {
        let cfg = config(6, 0.0);
        let geometry = Geometry::new(&cfg).unwrap();

        assert_eq!(geometry.classify(geometry.center, true), Region::Close);
        let edge = geometry
            .center
            .polar(cfg.close_button_radius + cfg.stroke_width - 0.5, 10.0);
        assert_eq!(geometry.classify(edge, true), Region::Close);

        assert_eq!(geometry.classify(geometry.pin.center, true), Region::Pin);
        assert!(matches!(
            geometry.classify(geometry.pin.center, false),
            Region::Wedge(_)
        ));
    }

    #[test]
    fn test_outside_bounds() {
        let geometry = Geometry::new(&config(4, 0.0)).unwrap();
        assert_eq!(geometry.classify(Point::new(0.0, 10.0), true), Region::Outside);
        assert_eq!(geometry.classify(Point::new(-3.0, 50.0), true), Region::Outside);
        assert_eq!(
            geometry.classify(Point::new(10.0, geometry.size), true),
            Region::Outside
        );
        assert_ne!(geometry.classify(Point::new(10.0, 0.0), true), Region::Outside);
    }

    #[test]
    fn test_recompute_is_deterministic() {
        let a = Geometry::new(&config(4, 90.0)).unwrap();
        let b = Geometry::new(&config(4, 90.0)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_region_display() {
        assert_eq!(Region::Wedge(3).to_string(), "Wedge(3)");
        assert_eq!(Region::Pin.to_string(), "Pin");
    }
}
