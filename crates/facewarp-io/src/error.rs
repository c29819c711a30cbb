/// An error type for the io module.
#[derive(thiserror::Error, Debug)]
pub enum IoError {
    /// Error when the file does not exist.
    #[error("File does not exist: {0}")]
    FileDoesNotExist(std::path::PathBuf),

    /// Invalid file extension.
    #[error("File does not have a valid extension: {0}")]
    InvalidFileExtension(std::path::PathBuf),

    /// Error to open the file.
    #[error("Failed to manipulate the file. {0}")]
    FileError(#[from] std::io::Error),

    /// Error to create the image.
    #[error("Failed to create image. {0}")]
    ImageCreationError(#[from] facewarp_image::ImageError),

    /// Error to decode or encode the image.
    #[error("Failed to decode the image. {0}")]
    ImageDecodeError(#[from] image::ImageError),

    /// A line of a text file could not be parsed.
    #[error("Parse error at line {line}: {message}")]
    ParseError {
        /// 1-based line number.
        line: usize,
        /// What went wrong.
        message: String,
    },

    /// A triangulation file does not fit the point set.
    #[error("Invalid triangulation. {0}")]
    InvalidTriangulation(#[from] facewarp_geometry::GeometryError),

    /// Error to read or write the configuration.
    #[error("Failed to parse the configuration. {0}")]
    ConfigError(#[from] serde_json::Error),
}
