//! Player profiles
//!
//! Biographical context attached to an account. A profile is created
//! explicitly by the account-creation workflow through
//! [`PlayerProfile::for_account`], a synchronous factory, so the
//! dependency is visible and testable without any event-bus machinery.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fielding positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Position {
    P,
    C,
    #[serde(rename = "1B")]
    FirstBase,
    #[serde(rename = "2B")]
    SecondBase,
    #[serde(rename = "3B")]
    ThirdBase,
    SS,
    OF,
}

impl Position {
    pub fn code(&self) -> &'static str {
        match self {
            Position::P => "P",
            Position::C => "C",
            Position::FirstBase => "1B",
            Position::SecondBase => "2B",
            Position::ThirdBase => "3B",
            Position::SS => "SS",
            Position::OF => "OF",
        }
    }

    pub fn display(&self) -> &'static str {
        match self {
            Position::P => "Pitcher",
            Position::C => "Catcher",
            Position::FirstBase => "First Base",
            Position::SecondBase => "Second Base",
            Position::ThirdBase => "Third Base",
            Position::SS => "Shortstop",
            Position::OF => "Outfield",
        }
    }
}

/// Throwing/batting handedness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handedness {
    Right,
    Left,
    Switch,
}

/// Biographical profile for one account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub account_id: String,
    #[serde(default)]
    pub positions: Vec<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graduation_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_in: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_lb: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub throws: Option<Handedness>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hits: Option<Handedness>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl PlayerProfile {
    /// Blank profile for a newly created account. Called synchronously
    /// by the account-creation workflow.
    pub fn for_account(account_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            account_id: account_id.into(),
            positions: Vec::new(),
            team: None,
            school: None,
            graduation_year: None,
            height_in: None,
            weight_lb: None,
            city: None,
            state: None,
            throws: None,
            hits: None,
            bio: None,
            created_at: now,
        }
    }

    /// Position display names joined for presentation, or "Not set"
    pub fn positions_display(&self) -> String {
        if self.positions.is_empty() {
            return "Not set".to_string();
        }
        self.positions
            .iter()
            .map(|p| p.display())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_factory_creates_blank_profile() {
        let now = Utc::now();
        let profile = PlayerProfile::for_account("acct-42", now);

        assert_eq!(profile.account_id, "acct-42");
        assert!(profile.positions.is_empty());
        assert!(profile.team.is_none());
        assert_eq!(profile.created_at, now);
    }

    #[test]
    fn test_positions_display() {
        let mut profile = PlayerProfile::for_account("acct-1", Utc::now());
        assert_eq!(profile.positions_display(), "Not set");

        profile.positions = vec![Position::P, Position::SS];
        assert_eq!(profile.positions_display(), "Pitcher, Shortstop");
    }

    #[test]
    fn test_position_codes_round_trip() {
        for pos in [
            Position::P,
            Position::C,
            Position::FirstBase,
            Position::SecondBase,
            Position::ThirdBase,
            Position::SS,
            Position::OF,
        ] {
            let json = serde_json::to_string(&pos).unwrap();
            assert_eq!(json, format!("\"{}\"", pos.code()));
            let back: Position = serde_json::from_str(&json).unwrap();
            assert_eq!(back, pos);
        }
    }
}
