//! `cafe demo` - scripted community scenarios.
//!
//! The forum scenario drives the process-wide registry, so every step lands
//! in the configured activity log. Expected rejections (a duplicate
//! registration, a post by a stranger) are printed as warnings and do not
//! fail the command.

use std::sync::Arc;

use serde::Serialize;
use serde_json::json;
use tracing::{info, instrument};

use cafe_adapters::{SystemClock, global};
use cafe_core::application::{Clock as _, Receipt, TopicBoard};
use cafe_core::domain::{
    ActivityProfile, Capability, ContentItem, Credential, Director, DomainError, Equipment,
    EstablishmentDirectory, EventListingBuilder, EventNotice, Handle, ListingBuilder, Member,
    Moderator, NewDiscussion, News, ProductListingBuilder, Ranker, RankingKind,
    RecipeListingBuilder, RecipeNote, Role, Topic,
};

use crate::{
    cli::{DemoArgs, Scenario},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

const DISCUSSION: &str = "Best espresso beans";

/// One registry call and how it went.
#[derive(Debug, Serialize)]
struct Step {
    accepted: bool,
    message: String,
}

impl From<Result<Receipt, DomainError>> for Step {
    fn from(outcome: Result<Receipt, DomainError>) -> Self {
        match outcome {
            Ok(receipt) => Self {
                accepted: true,
                message: receipt.message().to_owned(),
            },
            Err(e) => Self {
                accepted: false,
                message: e.to_string(),
            },
        }
    }
}

pub fn execute(args: DemoArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    info!(scenario = ?args.scenario, "Running demo");
    match args.scenario {
        Scenario::Forum => forum(&config, &output),
        Scenario::Moderation => moderation(&output),
        Scenario::Ranking => ranking(&output),
        Scenario::Catalog => catalog(&output),
        Scenario::Content => content(&output),
    }
}

// ── forum ─────────────────────────────────────────────────────────────────────

#[instrument(skip_all)]
fn forum(config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let community = global::community();
    let member = |handle: &str, name: &str| Member::new(handle, name, Credential::new("espresso"));

    let steps: Vec<Step> = vec![
        community.add_member(member("alice", "Alice Ramos")).into(),
        community.add_member(member("bruno", "Bruno Lima")).into(),
        community.add_member(member("carla", "Carla Souza")).into(),
        community.add_member(member("alice", "Alice Again")).into(),
        community
            .start_discussion(
                NewDiscussion::new(DISCUSSION, "alice")
                    .category("Beans")
                    .description("Which beans do you pull your shots with?"),
            )
            .into(),
        community
            .post_message(DISCUSSION, "bruno", "A natural Ethiopian, medium roast")
            .into(),
        community
            .post_message(DISCUSSION, "carla", "Brazilian Yellow Bourbon every day")
            .into(),
        community
            .post_message(DISCUSSION, "ghost", "Anyone here?")
            .into(),
        community
            .reply_to_message(DISCUSSION, 0, "alice", "Trying it tomorrow")
            .into(),
        community.like_message(DISCUSSION, 0).into(),
        community.like_message(DISCUSSION, 1).into(),
        community.follow_discussion("carla", DISCUSSION).into(),
        community.follow_member("bruno", "alice").into(),
    ];
    let discussion = community.discussion(DISCUSSION);

    if output.is_json() {
        return output.json(&json!({
            "forum": config.forum.name,
            "steps": steps,
            "discussion": discussion,
        }));
    }

    output.header(&format!("{} - forum", config.forum.name))?;
    for step in &steps {
        if step.accepted {
            output.success(&step.message)?;
        } else {
            output.warning(&step.message)?;
        }
    }

    if let Some(discussion) = discussion {
        output.print("")?;
        output.header(&format!(
            "{} [{}] by {}",
            discussion.title(),
            discussion.category(),
            discussion.owner()
        ))?;
        for (index, message) in discussion.messages().iter().enumerate() {
            output.print(&format!(
                "  #{index} {}: {} ({} likes)",
                message.author(),
                message.text(),
                message.likes()
            ))?;
            for reply in message.replies() {
                output.print(&format!("      \u{21b3} {}: {}", reply.author(), reply.text()))?;
            }
        }
    }
    output.info(&format!(
        "{} members registered; see 'cafe log' for the activity log",
        community.member_count()
    ))?;
    Ok(())
}

// ── moderation ────────────────────────────────────────────────────────────────

#[instrument(skip_all)]
fn moderation(output: &OutputManager) -> CliResult<()> {
    let now = SystemClock.now();
    let joao = Handle::new("joao123");
    let ana = Arc::new(Moderator::new("ana_mod", 1));
    let caio = Arc::new(Moderator::new("caio_mod", 2));

    let mut board = TopicBoard::new();
    for (title, category) in [("First Topic", "Question"), ("Second Topic", "Discussion")] {
        let mut topic = Topic::new(title, joao.clone(), now)
            .with_category(category)
            .with_description("Opened during the moderation demo");
        topic.bind(ana.clone());
        topic.bind(caio.clone());
        board.publish(topic, &joao)?;
    }
    board.edit("First Topic", &joao, "Updated description")?;
    board.report("Second Topic", &Handle::new("bruno"), "Inappropriate content")?;
    board.approve("First Topic", ana.handle())?;

    let moderators = [ana, caio];
    if output.is_json() {
        let report: Vec<_> = moderators
            .iter()
            .map(|m| {
                json!({
                    "moderator": m.handle(),
                    "inbox": m.inbox(),
                    "states": board
                        .topics()
                        .iter()
                        .map(|t| json!({ "title": t.title(), "state": m.topic_state(t.title()) }))
                        .collect::<Vec<_>>(),
                })
            })
            .collect();
        return output.json(&report);
    }

    output.header("Topic moderation")?;
    for topic in board.topics() {
        let status = if topic.is_approved() { "approved" } else { "pending" };
        output.print(&format!("  {topic} - {status}, {} report(s)", topic.reports().len()))?;
    }
    for moderator in &moderators {
        output.print("")?;
        output.header(&format!(
            "{} ({} notifications)",
            moderator.handle(),
            moderator.notification_count()
        ))?;
        for event in moderator.inbox() {
            output.print(&format!("  '{}' {} by {}", event.title, event.change, event.actor))?;
        }
        for topic in board.topics() {
            output.info(&format!(
                "{} is {}",
                topic.title(),
                moderator.topic_state(topic.title())
            ))?;
        }
    }
    Ok(())
}

// ── ranking ───────────────────────────────────────────────────────────────────

#[instrument(skip_all)]
fn ranking(output: &OutputManager) -> CliResult<()> {
    let profile = ActivityProfile {
        comments: vec!["good".into(), "excellent".into()],
        topics: vec!["Specialty coffee".into(), "Brewing tips".into()],
        ratings: vec![4.0, 5.0, 4.5],
        months_active: 12,
        ..ActivityProfile::new("Carlos")
    };

    let mut ranker = Ranker::from(RankingKind::Participation);
    let mut scores = Vec::with_capacity(RankingKind::ALL.len());
    for kind in RankingKind::ALL {
        ranker.set_strategy(kind.strategy());
        scores.push((ranker.kind(), ranker.score(&profile)));
    }

    if output.is_json() {
        let scores: Vec<_> = scores
            .iter()
            .map(|(kind, score)| json!({ "strategy": kind, "score": score }))
            .collect();
        return output.json(&json!({ "profile": profile, "scores": scores }));
    }

    output.header(&format!("Rank for {}", profile.name))?;
    for (kind, score) in scores {
        output.print(&format!("  {kind:<14} {score:.2}"))?;
    }
    Ok(())
}

// ── catalog ───────────────────────────────────────────────────────────────────

#[instrument(skip_all)]
fn catalog(output: &OutputManager) -> CliResult<()> {
    let mut products = ProductListingBuilder::new();
    Director::construct_product(&mut products);
    products
        .category("Beans")
        .price(39.90)
        .description("Yellow Bourbon beans, medium roast")
        .available(true);
    let bourbon = products.build()?;

    let mut events = EventListingBuilder::new();
    Director::construct_event(&mut events);
    events
        .entry_fee(50.0)
        .city("Sao Paulo")
        .district("Centro")
        .street("Rua do Cafe")
        .confirmed(true);
    let workshop = events.build()?;

    let mut recipes = RecipeListingBuilder::new();
    Director::construct_recipe(&mut recipes);
    recipes
        .category("Iced")
        .origin("Ethiopia")
        .description("Slow infusion with cinnamon");
    let cold_brew = recipes.build()?;

    let mut espresso = ProductListingBuilder::new();
    espresso.title("Espresso").price(8.0);
    let espresso = espresso.build()?;

    let mut directory = EstablishmentDirectory::new();
    directory.register_shopkeeper("Ana");
    directory.register_shopkeeper("Bia");
    directory.open_establishment("Ana", "Central Coffee", "Downtown")?;
    directory.open_establishment("Bia", "Bean There", "Savassi")?;
    directory.add_product("Central Coffee", bourbon)?;
    directory.add_product("Central Coffee", espresso)?;
    for score in [5.0, 4.0, 4.5] {
        directory.rate("Central Coffee", score)?;
    }

    if output.is_json() {
        return output.json(&json!({
            "establishments": directory.all_shops(),
            "event": workshop,
            "recipe": cold_brew,
        }));
    }

    output.header("Establishments")?;
    for shop in directory.all_shops() {
        let rating = shop
            .average_rating()
            .map_or_else(|| "not rated yet".to_owned(), |avg| format!("{avg:.1} stars"));
        output.print(&format!("  {} ({}) - {rating}", shop.name, shop.location))?;
        for product in shop.products() {
            output.print(&format!("    {}", product.summary()))?;
        }
    }
    output.print("")?;
    output.header("Listings")?;
    for product in directory.products("Central Coffee")? {
        output.print(&format!("  {product}"))?;
    }
    output.print(&format!("  {workshop}"))?;
    output.print(&format!("  {cold_brew}"))?;
    Ok(())
}

// ── content ───────────────────────────────────────────────────────────────────

#[instrument(skip_all)]
fn content(output: &OutputManager) -> CliResult<()> {
    let items: Vec<ContentItem> = vec![
        News {
            category: "Harvest".into(),
            author: "Maria Barista".into(),
            body: "Record harvest in the south of Minas".into(),
            published_on: "2025-06-01".into(),
            image: None,
            source: "Coffee Times".into(),
        }
        .into(),
        Equipment {
            model: "Classic Pro".into(),
            kind: "Espresso machine".into(),
            brand: "Gaggia".into(),
            price: 4200.0,
        }
        .into(),
        RecipeNote {
            coffee: "Cinnamon Cold Brew".into(),
            origin: "Ethiopia".into(),
            created_on: "2025-06-01".into(),
            creator: "Maria Barista".into(),
        }
        .into(),
        EventNotice {
            venue: "Central Coffee".into(),
            date: "2025-06-10".into(),
            kind: "Latte Art Workshop".into(),
            organizer: "Joao Cafe".into(),
        }
        .into(),
    ];

    let mut shopkeeper = Role::Shopkeeper {
        establishment: None,
    };
    shopkeeper.open_establishment("Cafe dos Sonhos");
    let roles = [
        Role::Guest,
        Role::Member {
            rank: "bronze".into(),
        },
        shopkeeper,
        Role::Moderator { moderator_id: 101 },
        Role::Administrator { admin_id: 1 },
    ];

    if output.is_json() {
        let roles: Vec<_> = roles
            .iter()
            .map(|r| json!({ "role": r, "capabilities": r.capabilities() }))
            .collect();
        return output.json(&json!({ "content": items, "roles": roles }));
    }

    output.header("Topic content")?;
    for item in &items {
        output.print(&format!("  [{}] {item}", item.kind()))?;
    }
    output.print("")?;
    output.header("Roles")?;
    for role in &roles {
        let capabilities: Vec<String> = role.capabilities().iter().map(capability_name).collect();
        output.print(&format!("  {role}: {}", capabilities.join(", ")))?;
    }
    Ok(())
}

fn capability_name(capability: &Capability) -> String {
    serde_json::to_value(capability)
        .ok()
        .and_then(|v| v.as_str().map(str::to_owned))
        .unwrap_or_else(|| format!("{capability:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capability_names_are_kebab_case() {
        assert_eq!(capability_name(&Capability::ReadTopics), "read-topics");
        assert_eq!(
            capability_name(&Capability::OpenEstablishment),
            "open-establishment"
        );
    }

    #[test]
    fn rejected_step_keeps_error_text() {
        let step = Step::from(Err(DomainError::UnknownMember {
            handle: Handle::new("ghost"),
        }));
        assert!(!step.accepted);
        assert_eq!(step.message, "Member @ghost not found");
    }
}
