//! Stored roles and caller role claims.
//!
//! A [`UserRole`] is what the profile directory records for an identity.
//! A [`RoleClaim`] is what a caller asserts on the sign-in form. The claim
//! type has no admin variant: admin profiles exist (created from the CLI)
//! but can never be claimed through the role-scoped sign-in.

use serde::{Deserialize, Serialize};
use sqlx::{
    Database, Decode, Encode, Type,
    postgres::PgTypeInfo,
};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown user type '{0}'")]
pub struct RoleParseError(pub String);

/// Role stored on a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Student,
    Staff,
    Parent,
    Admin,
}

impl UserRole {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Staff => "staff",
            Self::Parent => "parent",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Self::Student),
            "staff" => Ok(Self::Staff),
            "parent" => Ok(Self::Parent),
            "admin" => Ok(Self::Admin),
            other => Err(RoleParseError(other.to_string())),
        }
    }
}

// Stored as TEXT guarded by a CHECK constraint.
impl Type<sqlx::Postgres> for UserRole {
    fn type_info() -> PgTypeInfo {
        <String as Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <String as Type<sqlx::Postgres>>::compatible(ty)
    }
}

impl<'q> Encode<'q, sqlx::Postgres> for UserRole {
    fn encode_by_ref(
        &self,
        buf: &mut <sqlx::Postgres as Database>::ArgumentBuffer<'q>,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <&str as Encode<'q, sqlx::Postgres>>::encode_by_ref(&self.as_str(), buf)
    }
}

impl<'r> Decode<'r, sqlx::Postgres> for UserRole {
    fn decode(
        value: <sqlx::Postgres as Database>::ValueRef<'r>,
    ) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <&str as Decode<'r, sqlx::Postgres>>::decode(value)?;
        Ok(s.parse()?)
    }
}

/// Role asserted by a caller at sign-in or sign-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RoleClaim {
    Student,
    Staff,
    Parent,
}

impl RoleClaim {
    /// The stored role this claim corresponds to.
    pub const fn as_role(&self) -> UserRole {
        match self {
            Self::Student => UserRole::Student,
            Self::Staff => UserRole::Staff,
            Self::Parent => UserRole::Parent,
        }
    }

    pub fn matches(&self, stored: UserRole) -> bool {
        self.as_role() == stored
    }

    pub const fn as_str(&self) -> &'static str {
        self.as_role().as_str()
    }
}

impl fmt::Display for RoleClaim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoleClaim {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Self::Student),
            "staff" => Ok(Self::Staff),
            "parent" => Ok(Self::Parent),
            other => Err(RoleParseError(other.to_string())),
        }
    }
}

impl From<RoleClaim> for UserRole {
    fn from(claim: RoleClaim) -> Self {
        claim.as_role()
    }
}
