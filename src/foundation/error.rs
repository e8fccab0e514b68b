pub type PosterResult<T> = Result<T, PosterError>;

#[derive(thiserror::Error, Debug)]
pub enum PosterError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("surface creation failed: {0}")]
    SurfaceCreation(String),

    #[error("unresolvable theme color: {0}")]
    UnresolvableThemeColor(String),

    #[error("encoding failed: {0}")]
    Encoding(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PosterError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_geometry(msg: impl Into<String>) -> Self {
        Self::InvalidGeometry(msg.into())
    }

    pub fn surface(msg: impl Into<String>) -> Self {
        Self::SurfaceCreation(msg.into())
    }

    pub fn theme_color(key: impl Into<String>) -> Self {
        Self::UnresolvableThemeColor(key.into())
    }

    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}
