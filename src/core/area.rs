//! Managed repository identifiers.
//!
//! An [`Area`] names one repository the tool is responsible for. The set is fixed at
//! compile time; the filesystem location of each area comes from configuration.
//! Areas are processed in declaration order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Area {
    Core,
    GatewayInews,
    Blueprints,
    Tsr,
}

impl Area {
    pub const ALL: [Area; 4] = [Area::Core, Area::GatewayInews, Area::Blueprints, Area::Tsr];

    /// Stable label used in logs and configuration keys
    pub fn label(self) -> &'static str {
        match self {
            Area::Core => "CORE",
            Area::GatewayInews => "GATEWAY_INEWS",
            Area::Blueprints => "BLUEPRINTS",
            Area::Tsr => "TSR",
        }
    }

    /// Directory name of the repository checkout used by the default configuration
    pub fn default_checkout_name(self) -> &'static str {
        match self {
            Area::Core => "tv-automation-server-core",
            Area::GatewayInews => "inews-ftp-gateway",
            Area::Blueprints => "sofie-blueprints-inews",
            Area::Tsr => "tv-automation-state-timeline-resolver",
        }
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Area {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        Area::ALL
            .into_iter()
            .find(|area| area.label() == normalized)
            .ok_or_else(|| {
                let known: Vec<&str> = Area::ALL.iter().map(|a| a.label()).collect();
                format!("unknown area '{s}' (expected one of: {})", known.join(", "))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_label() {
        assert_eq!(Area::GatewayInews.to_string(), "GATEWAY_INEWS");
        assert_eq!(Area::Core.to_string(), "CORE");
    }

    #[test]
    fn test_from_str_accepts_cli_spellings() {
        assert_eq!("core".parse::<Area>(), Ok(Area::Core));
        assert_eq!("gateway-inews".parse::<Area>(), Ok(Area::GatewayInews));
        assert_eq!("BLUEPRINTS".parse::<Area>(), Ok(Area::Blueprints));
        assert!("unknown".parse::<Area>().is_err());
    }

    #[test]
    fn test_serde_label_matches_display() {
        for area in Area::ALL {
            let json = serde_json::to_string(&area).unwrap();
            assert_eq!(json, format!("\"{}\"", area.label()));
        }
    }

    #[test]
    fn test_ordering_follows_declaration() {
        let mut areas = vec![Area::Tsr, Area::Blueprints, Area::Core, Area::GatewayInews];
        areas.sort();
        assert_eq!(areas, Area::ALL.to_vec());
    }
}
