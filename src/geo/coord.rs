use std::fmt::{Debug, Display, Formatter};

use geo::{coord, LineString, Point};

use crate::geo::error::GeoError;

pub type Degree = f64;

/// `Coordinate`
/// A validated latitude, longitude pair, as captured from a click on the map.
///
/// ```rust
/// use routepick::geo::Coordinate;
/// let coordinate = Coordinate::new(39.5, -0.4).unwrap();
/// assert_eq!(coordinate.lat(), 39.5);
/// ```
#[derive(Clone, Copy, PartialEq, PartialOrd)]
pub struct Coordinate {
    lat: Degree,
    lng: Degree,
}

impl Coordinate {
    /// Constructs a new `Coordinate`, rejecting non-finite or out-of-range degrees.
    pub fn new(lat: Degree, lng: Degree) -> Result<Self, GeoError> {
        if !lat.is_finite() || !(-90f64..=90f64).contains(&lat) {
            return Err(GeoError::InvalidCoordinate(format!(
                "Latitude must be within [-90, 90]. Given: {}",
                lat
            )));
        }

        if !lng.is_finite() || !(-180f64..=180f64).contains(&lng) {
            return Err(GeoError::InvalidCoordinate(format!(
                "Longitude must be within [-180, 180]. Given: {}",
                lng
            )));
        }

        Ok(Coordinate { lat, lng })
    }

    /// Builds a `Coordinate` from a `[lng, lat]` pair, the axis order
    /// the routing backend answers with.
    pub fn from_lng_lat([lng, lat]: [Degree; 2]) -> Result<Self, GeoError> {
        Self::new(lat, lng)
    }

    pub fn lat(&self) -> Degree {
        self.lat
    }

    pub fn lng(&self) -> Degree {
        self.lng
    }

    // Returns a [`lng`, `lat`] pair
    pub fn slice(&self) -> [Degree; 2] {
        [self.lng, self.lat]
    }

    pub fn point(&self) -> Point {
        Point::from(*self)
    }

    /// Collects a path of coordinates into a [`LineString`] (x = lng, y = lat).
    pub fn linestring(path: &[Coordinate]) -> LineString {
        path.iter()
            .map(|c| coord! { x: c.lng, y: c.lat })
            .collect::<LineString>()
    }
}

impl From<Coordinate> for Point {
    fn from(value: Coordinate) -> Self {
        Point(coord! { x: value.lng, y: value.lat })
    }
}

impl TryFrom<Point> for Coordinate {
    type Error = GeoError;

    fn try_from(value: Point) -> Result<Self, Self::Error> {
        Coordinate::new(value.y(), value.x())
    }
}

impl Debug for Coordinate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "POINT({} {})", self.lng, self.lat)
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.lat, self.lng)
    }
}
