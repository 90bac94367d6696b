use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The monthly statistic that drives cell color: the monthly maximum of the
/// daily highs, or the monthly minimum of the daily lows.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Max,
    Min,
}

impl Mode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            Mode::Max => Mode::Min,
            Mode::Min => Mode::Max,
        }
    }

    /// Label for the statistic this mode selects.
    pub fn statistic_label(self) -> &'static str {
        match self {
            Mode::Max => "Monthly MAX",
            Mode::Min => "Monthly MIN",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Max => write!(f, "max"),
            Mode::Min => write!(f, "min"),
        }
    }
}

impl FromStr for Mode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "max" => Ok(Mode::Max),
            "min" => Ok(Mode::Min),
            other => Err(anyhow::anyhow!("unknown mode `{other}`, expected `max` or `min`")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Mode;

    #[test]
    fn test_default_is_max() {
        assert_eq!(Mode::default(), Mode::Max);
    }

    #[test]
    fn test_toggle_round_trips() {
        assert_eq!(Mode::Max.toggled(), Mode::Min);
        assert_eq!(Mode::Min.toggled(), Mode::Max);
        assert_eq!(Mode::Max.toggled().toggled(), Mode::Max);
    }

    #[test]
    fn test_parse() {
        assert_eq!("max".parse::<Mode>().unwrap(), Mode::Max);
        assert_eq!(" MIN ".parse::<Mode>().unwrap(), Mode::Min);
        assert!("median".parse::<Mode>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Mode::Min).unwrap(), "\"min\"");
    }
}
