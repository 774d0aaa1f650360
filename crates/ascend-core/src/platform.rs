use crate::{Error, Result};
use std::fmt;

/// Platform whose version record is being prepared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Ios,
    Tvos,
}

impl Platform {
    /// Label used by the console's version picker and in messages
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Ios => "iOS",
            Platform::Tvos => "tvOS",
        }
    }

    /// Heading text of the platform's section on the app page
    pub fn section_heading(&self) -> &'static str {
        match self {
            Platform::Ios => "IOS APP",
            Platform::Tvos => "TVOS APP",
        }
    }

    /// Link destination suffix of the platform's ready-for-sale page
    pub fn ready_for_sale_route(&self) -> Result<&'static str> {
        match self {
            Platform::Ios => Ok("ios/versioninfo/deliverable"),
            Platform::Tvos => Err(Error::UnsupportedPlatform(*self)),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_headings() {
        assert_eq!(Platform::Ios.section_heading(), "IOS APP");
        assert_eq!(Platform::Tvos.section_heading(), "TVOS APP");
    }

    #[test]
    fn test_ready_for_sale_route_ios() {
        assert_eq!(
            Platform::Ios.ready_for_sale_route().unwrap(),
            "ios/versioninfo/deliverable"
        );
    }

    #[test]
    fn test_ready_for_sale_route_tvos_is_unsupported() {
        let err = Platform::Tvos.ready_for_sale_route().unwrap_err();
        assert!(matches!(err, Error::UnsupportedPlatform(Platform::Tvos)));
        assert!(err.to_string().contains("Not implemented"));
    }
}
