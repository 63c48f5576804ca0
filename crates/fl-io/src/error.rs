use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum IoError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failure on a caller-supplied reader or writer (no path to report).
    Stream(std::io::Error),
    Parse {
        line: usize,
        message: String,
    },
    EmptyPattern,
    NoFrames,
    Image(image::ImageError),
}

impl fmt::Display for IoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IoError::Io { path, source } => write!(f, "{}: {source}", path.display()),
            IoError::Stream(e) => write!(f, "stream error: {e}"),
            IoError::Parse { line, message } => write!(f, "line {line}: {message}"),
            IoError::EmptyPattern => write!(f, "pattern has no live cells"),
            IoError::NoFrames => write!(f, "no frames were recorded"),
            IoError::Image(e) => write!(f, "image error: {e}"),
        }
    }
}

impl std::error::Error for IoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IoError::Io { source, .. } | IoError::Stream(source) => Some(source),
            IoError::Image(e) => Some(e),
            _ => None,
        }
    }
}

impl From<image::ImageError> for IoError {
    fn from(e: image::ImageError) -> Self {
        IoError::Image(e)
    }
}

impl IoError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        IoError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, IoError>;
