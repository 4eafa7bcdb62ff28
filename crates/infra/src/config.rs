//! Infrastructure configuration adapters.

use async_trait::async_trait;
use chrono_tz::Tz;
use teambeat_core::OrgTimezoneResolver;
use teambeat_domain::{Result, TeamBeatError};

/// Organization-timezone resolver backed by a single configured value.
///
/// Per-organization timezone storage does not exist yet; every organization
/// resolves to the same zone. Callers depend on the
/// [`OrgTimezoneResolver`] trait, so swapping in a store-backed resolver
/// later is a drop-in change.
#[derive(Debug, Clone, Copy)]
pub struct FixedOrgTimezoneResolver {
    tz: Tz,
}

impl FixedOrgTimezoneResolver {
    /// Create a resolver for a known timezone.
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Create a resolver from an IANA timezone name (e.g. from deployment
    /// configuration).
    pub fn from_name(name: &str) -> Result<Self> {
        name.parse::<Tz>()
            .map(Self::new)
            .map_err(|_| TeamBeatError::Config(format!("invalid timezone name: {name}")))
    }
}

#[async_trait]
impl OrgTimezoneResolver for FixedOrgTimezoneResolver {
    async fn organization_timezone(&self, _organization_id: &str) -> Result<Tz> {
        Ok(self.tz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn resolves_the_configured_zone_for_any_organization() {
        let resolver = FixedOrgTimezoneResolver::from_name("Europe/Berlin").unwrap();

        let tz = resolver.organization_timezone("org-1").await.unwrap();
        assert_eq!(tz.to_string(), "Europe/Berlin");

        let other = resolver.organization_timezone("org-2").await.unwrap();
        assert_eq!(other, tz);
    }

    #[test]
    fn invalid_name_is_a_config_error() {
        let err = FixedOrgTimezoneResolver::from_name("Invalid/Zone").unwrap_err();
        assert!(matches!(err, TeamBeatError::Config(_)));
    }
}
