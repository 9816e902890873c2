//! Member ranking strategies.
//!
//! A [`Ranker`] scores an [`ActivityProfile`] with whichever
//! [`RankingStrategy`] it currently holds; the strategy can be swapped at
//! runtime.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::domain::error::DomainError;

/// The activity numbers a strategy may look at.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ActivityProfile {
    pub name: String,
    pub comments: Vec<String>,
    pub topics: Vec<String>,
    pub ratings: Vec<f64>,
    pub months_active: u32,
}

impl ActivityProfile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

pub trait RankingStrategy: Send + Sync {
    fn score(&self, profile: &ActivityProfile) -> f64;

    fn kind(&self) -> RankingKind;
}

/// Comments are worth 1.5, topics 2.
#[derive(Debug, Clone, Copy, Default)]
pub struct ByParticipation;

impl RankingStrategy for ByParticipation {
    fn score(&self, profile: &ActivityProfile) -> f64 {
        profile.comments.len() as f64 * 1.5 + profile.topics.len() as f64 * 2.0
    }

    fn kind(&self) -> RankingKind {
        RankingKind::Participation
    }
}

/// Mean rating received; 0 when unrated.
#[derive(Debug, Clone, Copy, Default)]
pub struct ByRatings;

impl RankingStrategy for ByRatings {
    fn score(&self, profile: &ActivityProfile) -> f64 {
        if profile.ratings.is_empty() {
            return 0.0;
        }
        profile.ratings.iter().sum::<f64>() / profile.ratings.len() as f64
    }

    fn kind(&self) -> RankingKind {
        RankingKind::Ratings
    }
}

/// 0.8 per active month.
#[derive(Debug, Clone, Copy, Default)]
pub struct ByTenure;

impl RankingStrategy for ByTenure {
    fn score(&self, profile: &ActivityProfile) -> f64 {
        f64::from(profile.months_active) * 0.8
    }

    fn kind(&self) -> RankingKind {
        RankingKind::Tenure
    }
}

/// Named strategies, for selection from configuration or the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RankingKind {
    Participation,
    Ratings,
    Tenure,
}

impl RankingKind {
    pub const ALL: [Self; 3] = [Self::Participation, Self::Ratings, Self::Tenure];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Participation => "participation",
            Self::Ratings => "ratings",
            Self::Tenure => "tenure",
        }
    }

    pub fn strategy(self) -> Box<dyn RankingStrategy> {
        match self {
            Self::Participation => Box::new(ByParticipation),
            Self::Ratings => Box::new(ByRatings),
            Self::Tenure => Box::new(ByTenure),
        }
    }
}

impl fmt::Display for RankingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RankingKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "participation" => Ok(Self::Participation),
            "ratings" | "rating" => Ok(Self::Ratings),
            "tenure" | "time" => Ok(Self::Tenure),
            other => Err(DomainError::InvalidRanking(other.to_owned())),
        }
    }
}

/// Holds the active strategy.
pub struct Ranker {
    strategy: Box<dyn RankingStrategy>,
}

impl Ranker {
    pub fn new(strategy: Box<dyn RankingStrategy>) -> Self {
        Self { strategy }
    }

    pub fn set_strategy(&mut self, strategy: Box<dyn RankingStrategy>) {
        self.strategy = strategy;
    }

    pub fn kind(&self) -> RankingKind {
        self.strategy.kind()
    }

    pub fn score(&self, profile: &ActivityProfile) -> f64 {
        self.strategy.score(profile)
    }
}

impl From<RankingKind> for Ranker {
    fn from(kind: RankingKind) -> Self {
        Self::new(kind.strategy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carlos() -> ActivityProfile {
        ActivityProfile {
            name: "Carlos".into(),
            comments: vec!["good".into(), "excellent".into()],
            topics: vec!["Specialty coffee".into(), "Brewing tips".into()],
            ratings: vec![4.0, 5.0, 4.5],
            months_active: 12,
        }
    }

    #[test]
    fn strategies_swap_at_runtime() {
        let profile = carlos();
        let mut ranker = Ranker::from(RankingKind::Participation);
        assert_eq!(ranker.score(&profile), 7.0);

        ranker.set_strategy(Box::new(ByRatings));
        assert_eq!(ranker.score(&profile), 4.5);
        assert_eq!(ranker.kind(), RankingKind::Ratings);

        ranker.set_strategy(Box::new(ByTenure));
        assert!((ranker.score(&profile) - 9.6).abs() < 1e-9);
    }

    #[test]
    fn unrated_profile_scores_zero() {
        assert_eq!(ByRatings.score(&ActivityProfile::new("nobody")), 0.0);
    }

    #[test]
    fn kind_parses_and_rejects() {
        assert_eq!("Tenure".parse::<RankingKind>().unwrap(), RankingKind::Tenure);
        assert!(matches!(
            "karma".parse::<RankingKind>(),
            Err(DomainError::InvalidRanking(_))
        ));
    }
}
