//! The fixed catalogue of per-clan resources and the `type` selector.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceType {
    Info,
    Members,
    War,
    WarLog,
    RiverRace,
    RiverRaceLog,
}

impl ResourceType {
    /// Every resource type, in the order bundle keys are listed.
    pub const ALL: [Self; 6] = [
        Self::Info,
        Self::Members,
        Self::War,
        Self::WarLog,
        Self::RiverRace,
        Self::RiverRaceLog,
    ];

    /// The name used in the `type` query parameter and as the bundle key.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Members => "members",
            Self::War => "war",
            Self::WarLog => "warlog",
            Self::RiverRace => "riverrace",
            Self::RiverRaceLog => "riverracelog",
        }
    }

    /// Upstream resource path for an already-encoded clan tag.
    #[must_use]
    pub fn path(self, encoded_tag: &str) -> String {
        let suffix = match self {
            Self::Info => "",
            Self::Members => "/members",
            Self::War => "/currentwar",
            Self::WarLog => "/warlog",
            Self::RiverRace => "/currentriverrace",
            Self::RiverRaceLog => "/riverracelog",
        };
        format!("/clans/{encoded_tag}{suffix}")
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown resource type '{0}'")]
pub struct UnknownResource(pub String);

impl FromStr for ResourceType {
    type Err = UnknownResource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.name() == s)
            .ok_or_else(|| UnknownResource(s.to_string()))
    }
}

/// What a `/api/clash` request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    One(ResourceType),
    /// Every resource type, fetched concurrently into a bundle.
    Full,
}

impl Selector {
    /// Parse the optional `type` parameter. Absent means `info`.
    pub fn parse(raw: Option<&str>) -> Result<Self, UnknownResource> {
        match raw {
            None => Ok(Self::One(ResourceType::Info)),
            Some("full" | "all") => Ok(Self::Full),
            Some(other) => other.parse().map(Self::One),
        }
    }
}
