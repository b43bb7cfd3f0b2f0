use std::fmt;

#[derive(Debug)]
pub enum KnnError {
    Io(std::io::Error),
    Dataset(String),
    DimensionMismatch { expected: usize, actual: usize },
    InvalidInput { message: String },
    Configuration(String),
}

impl fmt::Display for KnnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO Error: {e}"),
            Self::Dataset(s) => write!(f, "Dataset Error: {s}"),
            Self::DimensionMismatch { expected, actual } => {
                write!(f, "Dimension mismatch: expected = {expected}, actual = {actual}")
            }
            Self::InvalidInput { message } => write!(f, "Invalid input: {message}"),
            Self::Configuration(s) => write!(f, "Configuration error: {s}"),
        }
    }
}

impl std::error::Error for KnnError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for KnnError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_variants() {
        let e = KnnError::DimensionMismatch { expected: 784, actual: 10 };
        assert_eq!(e.to_string(), "Dimension mismatch: expected = 784, actual = 10");

        let e = KnnError::Dataset("bad magic".to_string());
        assert_eq!(e.to_string(), "Dataset Error: bad magic");
    }

    #[test]
    fn io_errors_convert_and_expose_source() {
        use std::error::Error;

        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "short read");
        let e = KnnError::from(io);
        assert!(matches!(e, KnnError::Io(_)));
        assert!(e.source().is_some());
    }
}
