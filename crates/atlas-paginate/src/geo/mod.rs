//! Geographic primitives

mod coordinate;
mod extent;

pub use coordinate::Coordinate;
pub use extent::{
    Extent, Growth, Side, cm_to_degrees_lat, cm_to_degrees_lon, degrees_lat_to_cm,
    degrees_lon_to_cm,
};
