//! Panel content served to the dashboard.
//!
//! All types serialize in camelCase, matching what the dashboard front-end reads.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Esport, Platform};

// ═══════════════════════════════════════════════════════════════════════════════
// RESOURCE KIND
// ═══════════════════════════════════════════════════════════════════════════════

/// The logical resource a panel is populated from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// News feed
    News,
    /// Team roster
    Team,
    /// Upcoming matches
    Schedule,
    /// Team statistics
    Stats,
    /// Social trending topics
    Trends,
    /// Videos
    Videos,
}

impl ResourceKind {
    /// Lowercase resource name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::News => "news",
            ResourceKind::Team => "team",
            ResourceKind::Schedule => "schedule",
            ResourceKind::Stats => "stats",
            ResourceKind::Trends => "trends",
            ResourceKind::Videos => "videos",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// NEWS
// ═══════════════════════════════════════════════════════════════════════════════

/// A news article card.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    /// Unique identifier
    pub id: String,
    /// Headline
    pub title: String,
    /// Short teaser
    pub excerpt: String,
    /// Full body
    pub content: String,
    /// Cover image
    pub image_url: String,
    /// Category label (uppercase esport name)
    pub category: String,
    /// Publisher
    pub source: String,
    /// Publication date
    pub date: DateTime<Utc>,
    /// Link to the full article
    pub url: String,
}

// ═══════════════════════════════════════════════════════════════════════════════
// TEAM
// ═══════════════════════════════════════════════════════════════════════════════

/// A rostered player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// Position in the roster
    pub id: u32,
    /// Real name
    pub name: String,
    /// In-game name
    pub nickname: String,
    /// In-game role (AWPer, Duelist, Mid, ...)
    pub role: String,
    /// Country of origin
    pub country: String,
    /// Portrait
    pub image_url: String,
    /// Game-specific figures (rating, kd, acs, kda, ...)
    pub stats: BTreeMap<String, f64>,
}

/// Head coach.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coach {
    /// Real name
    pub name: String,
    /// Known as
    pub nickname: String,
}

/// A trophy or placement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    /// What was won
    pub title: String,
    /// Season
    pub year: String,
}

/// Roster for one esport.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    /// Organization name
    pub name: String,
    /// Organization logo
    pub logo_url: String,
    /// Which game this roster plays
    pub esport: Esport,
    /// Active players
    pub players: Vec<Player>,
    /// Head coach
    pub coach: Coach,
    /// Trophy cabinet
    pub achievements: Vec<Achievement>,
}

// ═══════════════════════════════════════════════════════════════════════════════
// SCHEDULE
// ═══════════════════════════════════════════════════════════════════════════════

/// Series length.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchFormat {
    /// Best of three
    Bo3,
    /// Best of five
    Bo5,
}

/// The other side of a match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Opponent {
    /// Team name
    pub name: String,
    /// Team logo
    pub logo_url: String,
}

/// An upcoming match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Match {
    /// Unique identifier
    pub id: String,
    /// Competition
    pub tournament: String,
    /// Opposing team
    pub opponent: Opponent,
    /// Scheduled start
    pub date: DateTime<Utc>,
    /// Series length
    pub format: MatchFormat,
    /// Stream or match page
    pub link: String,
}

// ═══════════════════════════════════════════════════════════════════════════════
// STATS
// ═══════════════════════════════════════════════════════════════════════════════

/// A statistic value: either a number or a preformatted label.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    /// Plain figure
    Number(f64),
    /// Preformatted text ("Mirage", "52.4%")
    Text(String),
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatValue::Number(n) => write!(f, "{}", n),
            StatValue::Text(s) => f.write_str(s),
        }
    }
}

/// One bar in the team statistics panel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeamStat {
    /// Caption
    pub label: String,
    /// Displayed value
    pub value: StatValue,
    /// Bar fill, 0–100
    pub percentage: u8,
}

// ═══════════════════════════════════════════════════════════════════════════════
// TRENDS
// ═══════════════════════════════════════════════════════════════════════════════

/// Social engagement counters of a trend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Engagement {
    /// Likes / upvotes
    pub likes: u32,
    /// Shares / retweets
    pub shares: u32,
    /// Replies
    pub comments: u32,
}

/// A trending social post.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    /// Unique identifier
    pub id: String,
    /// Post text
    pub content: String,
    /// Where it trends
    pub platform: Platform,
    /// When it was posted
    pub timestamp: DateTime<Utc>,
    /// Engagement counters
    pub stats: Engagement,
}

// ═══════════════════════════════════════════════════════════════════════════════
// VIDEOS
// ═══════════════════════════════════════════════════════════════════════════════

/// A video card.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    /// Unique identifier
    pub id: String,
    /// Title
    pub title: String,
    /// Thumbnail image
    pub thumbnail_url: String,
    /// Uploading channel
    pub channel_name: String,
    /// Formatted view count ("320K")
    pub views: String,
    /// Upload date
    pub date: DateTime<Utc>,
    /// Watch link
    pub link: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_value_untagged() {
        let stats = vec![
            TeamStat {
                label: "Wins".into(),
                value: StatValue::Number(68.0),
                percentage: 68,
            },
            TeamStat {
                label: "Best map".into(),
                value: StatValue::Text("Mirage".into()),
                percentage: 85,
            },
        ];

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json[0]["value"], 68.0);
        assert_eq!(json[1]["value"], "Mirage");

        let back: Vec<TeamStat> = serde_json::from_value(json).unwrap();
        assert_eq!(back, stats);
    }

    #[test]
    fn test_news_item_camel_case() {
        let item = NewsItem {
            id: "news-1".into(),
            title: "t".into(),
            excerpt: "e".into(),
            content: "c".into(),
            image_url: "img.jpg".into(),
            category: "CSGO".into(),
            source: "FURIA News".into(),
            date: Utc::now(),
            url: "#".into(),
        };
        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("imageUrl").is_some());
        assert!(json.get("image_url").is_none());
    }

    #[test]
    fn test_resource_kind_names() {
        assert_eq!(ResourceKind::Schedule.to_string(), "schedule");
        assert_eq!(
            serde_json::to_string(&ResourceKind::Trends).unwrap(),
            "\"trends\""
        );
    }
}
