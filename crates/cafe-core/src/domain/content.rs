//! Topic content kinds behind one interface.
//!
//! News, equipment, recipes and events share nothing structurally; a
//! [`ContentItem`] wraps whichever one a topic is about and renders a
//! uniform label for it.

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct News {
    pub category: String,
    pub author: String,
    pub body: String,
    pub published_on: String,
    pub image: Option<String>,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Equipment {
    pub model: String,
    pub kind: String,
    pub brand: String,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeNote {
    pub coffee: String,
    pub origin: String,
    pub created_on: String,
    pub creator: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventNotice {
    pub venue: String,
    pub date: String,
    pub kind: String,
    pub organizer: String,
}

/// One piece of topic content.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentItem {
    News(News),
    Equipment(Equipment),
    Recipe(RecipeNote),
    Event(EventNotice),
}

impl ContentItem {
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::News(_) => "news",
            Self::Equipment(_) => "equipment",
            Self::Recipe(_) => "recipe",
            Self::Event(_) => "event",
        }
    }

    /// Printable one-line summary.
    pub fn label(&self) -> String {
        match self {
            Self::News(n) => format!("News: {} - {} - {}", n.category, n.author, n.source),
            Self::Equipment(e) => format!("Equipment: {} - {}", e.model, e.brand),
            Self::Recipe(r) => format!("Recipe: {} - {}", r.coffee, r.origin),
            Self::Event(e) => format!("Event: {} at {} by {}", e.kind, e.venue, e.organizer),
        }
    }
}

impl fmt::Display for ContentItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl From<News> for ContentItem {
    fn from(n: News) -> Self {
        Self::News(n)
    }
}

impl From<Equipment> for ContentItem {
    fn from(e: Equipment) -> Self {
        Self::Equipment(e)
    }
}

impl From<RecipeNote> for ContentItem {
    fn from(r: RecipeNote) -> Self {
        Self::Recipe(r)
    }
}

impl From<EventNotice> for ContentItem {
    fn from(e: EventNotice) -> Self {
        Self::Event(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_per_kind() {
        let news: ContentItem = News {
            category: "Technology".into(),
            author: "Maria".into(),
            body: "New brewing method.".into(),
            published_on: "2025-05-31".into(),
            image: Some("news1.png".into()),
            source: "Coffee News".into(),
        }
        .into();
        assert_eq!(news.label(), "News: Technology - Maria - Coffee News");

        let gear: ContentItem = Equipment {
            model: "XPTO Brewer".into(),
            kind: "Brewer".into(),
            brand: "CafeTop".into(),
            price: 499.90,
        }
        .into();
        assert_eq!(gear.to_string(), "Equipment: XPTO Brewer - CafeTop");

        let event: ContentItem = EventNotice {
            venue: "Central Hall".into(),
            date: "2025-06-10".into(),
            kind: "Workshop".into(),
            organizer: "Coffee Association".into(),
        }
        .into();
        assert_eq!(event.kind(), "event");
        assert_eq!(
            event.label(),
            "Event: Workshop at Central Hall by Coffee Association"
        );
    }

    #[test]
    fn serializes_with_type_tag() {
        let recipe: ContentItem = RecipeNote {
            coffee: "Arabica".into(),
            origin: "Minas Gerais".into(),
            created_on: "2025-05-30".into(),
            creator: "Joao".into(),
        }
        .into();
        let json = serde_json::to_value(&recipe).unwrap();
        assert_eq!(json["type"], "recipe");
        assert_eq!(json["origin"], "Minas Gerais");
    }
}
