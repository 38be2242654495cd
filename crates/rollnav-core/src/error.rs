/// Setup-time failures. Ticking a controller never fails; a bad configuration
/// is the only thing that can be rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The configuration file could not be read.
    Io(String),
    /// The configuration text is not valid TOML for [`crate::config::RollConfig`].
    Parse(String),
    /// `object_radius` must be a finite value greater than zero.
    NonPositiveRadius(f32),
    /// A tuning value fell outside its authoring range.
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(m) | Self::Parse(m) => write!(f, "{m}"),
            Self::NonPositiveRadius(r) => {
                write!(f, "object_radius must be positive and finite, got {r}")
            },
            Self::OutOfRange {
                field,
                value,
                min,
                max,
            } => write!(f, "{field} = {value} is outside [{min}, {max}]"),
        }
    }
}

impl std::error::Error for ConfigError {}
