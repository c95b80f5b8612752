use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

/// Administrator grade picked when promoting an account
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdminRole {
    /// Staff member: moderation and catalog management
    Normal,
    /// Staff member with superuser rights
    Power,
}

impl AdminRole {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Power => "Power",
        }
    }

    #[inline]
    pub fn is_superuser(&self) -> bool {
        matches!(self, Self::Power)
    }
}

impl Display for AdminRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdminRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Normal" => Ok(Self::Normal),
            "Power" => Ok(Self::Power),
            other => Err(format!("unknown admin role: {other}")),
        }
    }
}

/// Uploaded file attached to an application
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Icon,
    Archive,
}

impl AssetKind {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Icon => "icon",
            Self::Archive => "archive",
        }
    }
}

impl Display for AssetKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vote {
    Like,
    Dislike,
}

/// How an application left the catalog
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalKind {
    /// The owner deleted it
    SelfRemoval,
    /// Staff took it down; the owner is notified
    Moderated,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_role_is_a_closed_set() {
        assert_eq!("Normal".parse::<AdminRole>(), Ok(AdminRole::Normal));
        assert_eq!("Power".parse::<AdminRole>(), Ok(AdminRole::Power));
        assert!("Root".parse::<AdminRole>().is_err());
        assert!("power".parse::<AdminRole>().is_err());
    }

    #[test]
    fn only_power_is_superuser() {
        assert!(AdminRole::Power.is_superuser());
        assert!(!AdminRole::Normal.is_superuser());
    }
}
