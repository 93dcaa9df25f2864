use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum GeoError {
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(String),
}
