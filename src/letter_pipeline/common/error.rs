use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Invalid image: width={width}, height={height} has no pixels")]
    InvalidImage { width: u32, height: u32 },

    #[error("Bounding box ({left}, {top}, {right}, {bottom}) does not fit a {width}x{height} image")]
    BoundsOutOfRange {
        left: u32,
        top: u32,
        right: u32,
        bottom: u32,
        width: u32,
        height: u32,
    },

    #[error("Invalid normalization config: {0}")]
    InvalidConfig(String),

    #[error("Classifier unavailable: {0}")]
    ClassificationUnavailable(String),

    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Failed to decode canvas image: {0}")]
    DecodeError(String),

    #[error("Image dimensions exceed limit: width={0}, height={1}")]
    InvalidDimensions(u32, u32),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
