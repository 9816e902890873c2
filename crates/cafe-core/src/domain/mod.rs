// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for the coffee community.
//!
//! Pure business logic: records, the topic subject and its observers, roles,
//! ranking strategies, content kinds, listing builders and the establishment
//! directory. Clock, log storage and every other side effect live behind the
//! ports in the application layer.
//!
//! ## Rules
//!
//! - **No I/O**: nothing here touches the filesystem or a terminal
//! - **No logging**: rejections are returned as [`DomainError`] values and the
//!   application layer decides what to record
//! - **Rich domain model**: behavior lives in the records, services only
//!   orchestrate and lock
pub mod content;
pub mod entities;
pub mod error;
pub mod establishment;
pub mod listing;
pub mod moderation;
pub mod ranking;
pub mod roles;
pub mod value_objects;

pub use content::{ContentItem, EventNotice, Equipment, News, RecipeNote};
pub use entities::{
    Discussion, LogEntry, Member, Message, NewDiscussion, Reply, TIMESTAMP_FORMAT, Topic,
    TopicReport, TopicStatus,
};
pub use error::{DomainError, ErrorCategory};
pub use establishment::{Establishment, EstablishmentDirectory};
pub use listing::{
    Director, EventListing, EventListingBuilder, ListingBuilder, ProductListing,
    ProductListingBuilder, RecipeListing, RecipeListingBuilder,
};
pub use moderation::{
    ModerationState, Moderator, NotificationError, Notified, ObserverError, ObserverFailure,
    TopicChange, TopicEvent, TopicObserver,
};
pub use ranking::{
    ActivityProfile, ByParticipation, ByRatings, ByTenure, Ranker, RankingKind, RankingStrategy,
};
pub use roles::{Capability, Role, RoleKind};
pub use value_objects::{Credential, Handle, PermissionLevel, Severity};
