use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown method '{0}'. Expected 'simplex' or 'bland'")]
pub struct UnknownMethod(pub String);

/// Pivoting strategy used by the simplex engine
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    /// Dantzig pricing (largest reduced cost), switching to Bland's rule
    /// after a run of degenerate pivots
    #[default]
    Simplex,
    /// Bland's smallest-index rule for every pivot
    Bland,
}

impl Method {
    pub fn name(&self) -> &'static str {
        match self {
            Method::Simplex => "simplex",
            Method::Bland => "bland",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Method {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simplex" => Ok(Method::Simplex),
            "bland" => Ok(Method::Bland),
            _ => Err(UnknownMethod(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_method() {
        assert_eq!("simplex".parse::<Method>(), Ok(Method::Simplex));
        assert_eq!(" Bland ".parse::<Method>(), Ok(Method::Bland));
        let err = "highs".parse::<Method>().unwrap_err();
        assert_eq!(err, UnknownMethod("highs".to_string()));
        assert!(err.to_string().contains("highs"));
    }

    #[test]
    fn test_default_and_display() {
        assert_eq!(Method::default(), Method::Simplex);
        assert_eq!(Method::Bland.to_string(), "bland");
    }
}
