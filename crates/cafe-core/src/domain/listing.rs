//! Step-by-step builders for products, events and recipes.
//!
//! All three share the [`ListingBuilder`] steps (creator, creation date,
//! title); each adds its own setters. A [`Director`] drives the shared steps
//! to produce the standard listings used by the demo catalogue.
//!
//! `build()` hands over the finished listing and leaves the builder reset,
//! so one builder can produce many listings.

use std::fmt;

use serde::Serialize;

use crate::domain::error::DomainError;

/// Steps common to every listing builder.
pub trait ListingBuilder {
    type Output;

    /// Discard everything set so far.
    fn reset(&mut self);

    fn creator(&mut self, name: impl Into<String>) -> &mut Self;

    fn created_on(&mut self, date: impl Into<String>) -> &mut Self;

    fn title(&mut self, title: impl Into<String>) -> &mut Self;

    /// Fails with `MissingRequiredField` when no title was set.
    fn build(&mut self) -> Result<Self::Output, DomainError>;
}

// ── Product ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductListing {
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    pub available: bool,
    pub image: Option<String>,
    pub establishment: Option<String>,
    pub created_on: Option<String>,
}

impl Default for ProductListing {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            category: String::new(),
            price: 0.0,
            available: true,
            image: None,
            establishment: None,
            created_on: None,
        }
    }
}

impl ProductListing {
    /// `name - R$price`
    pub fn summary(&self) -> String {
        format!("{} - R${:.2}", self.name, self.price)
    }
}

impl fmt::Display for ProductListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[Product] {} - R${:.2} ({}) - [Description] {}",
            self.name,
            self.price,
            if self.available { "Available" } else { "Unavailable" },
            self.description
        )
    }
}

#[derive(Debug, Default)]
pub struct ProductListingBuilder {
    product: ProductListing,
}

impl ProductListingBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(&mut self, category: impl Into<String>) -> &mut Self {
        self.product.category = category.into();
        self
    }

    pub fn price(&mut self, price: f64) -> &mut Self {
        self.product.price = price;
        self
    }

    pub fn description(&mut self, description: impl Into<String>) -> &mut Self {
        self.product.description = description.into();
        self
    }

    pub fn available(&mut self, available: bool) -> &mut Self {
        self.product.available = available;
        self
    }

    pub fn image(&mut self, image: impl Into<String>) -> &mut Self {
        self.product.image = Some(image.into());
        self
    }
}

impl ListingBuilder for ProductListingBuilder {
    type Output = ProductListing;

    fn reset(&mut self) {
        self.product = ProductListing::default();
    }

    /// For products the creator is the selling establishment.
    fn creator(&mut self, name: impl Into<String>) -> &mut Self {
        self.product.establishment = Some(name.into());
        self
    }

    fn created_on(&mut self, date: impl Into<String>) -> &mut Self {
        self.product.created_on = Some(date.into());
        self
    }

    fn title(&mut self, title: impl Into<String>) -> &mut Self {
        self.product.name = title.into();
        self
    }

    fn build(&mut self) -> Result<ProductListing, DomainError> {
        if self.product.name.is_empty() {
            return Err(DomainError::MissingRequiredField { field: "title" });
        }
        Ok(std::mem::take(&mut self.product))
    }
}

// ── Event ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EventListing {
    pub organizer: String,
    pub kind: String,
    pub entry_fee: f64,
    pub date: Option<String>,
    pub city: String,
    pub district: String,
    pub street: String,
    pub confirmed: bool,
}

impl fmt::Display for EventListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[Event] {} by {} on {} - {}, {}",
            self.kind,
            self.organizer,
            self.date.as_deref().unwrap_or("TBD"),
            self.city,
            self.district
        )
    }
}

#[derive(Debug, Default)]
pub struct EventListingBuilder {
    event: EventListing,
}

impl EventListingBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry_fee(&mut self, fee: f64) -> &mut Self {
        self.event.entry_fee = fee;
        self
    }

    pub fn street(&mut self, street: impl Into<String>) -> &mut Self {
        self.event.street = street.into();
        self
    }

    pub fn district(&mut self, district: impl Into<String>) -> &mut Self {
        self.event.district = district.into();
        self
    }

    pub fn city(&mut self, city: impl Into<String>) -> &mut Self {
        self.event.city = city.into();
        self
    }

    pub fn confirmed(&mut self, confirmed: bool) -> &mut Self {
        self.event.confirmed = confirmed;
        self
    }
}

impl ListingBuilder for EventListingBuilder {
    type Output = EventListing;

    fn reset(&mut self) {
        self.event = EventListing::default();
    }

    fn creator(&mut self, name: impl Into<String>) -> &mut Self {
        self.event.organizer = name.into();
        self
    }

    fn created_on(&mut self, date: impl Into<String>) -> &mut Self {
        self.event.date = Some(date.into());
        self
    }

    /// For events the title is the event kind ("Latte Art Workshop").
    fn title(&mut self, title: impl Into<String>) -> &mut Self {
        self.event.kind = title.into();
        self
    }

    fn build(&mut self) -> Result<EventListing, DomainError> {
        if self.event.kind.is_empty() {
            return Err(DomainError::MissingRequiredField { field: "title" });
        }
        Ok(std::mem::take(&mut self.event))
    }
}

// ── Recipe ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecipeListing {
    pub coffee: String,
    pub origin: String,
    pub created_on: Option<String>,
    pub creator: String,
    pub category: String,
    pub description: String,
}

impl fmt::Display for RecipeListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[Recipe] {} by {} - {} ({})",
            self.coffee, self.creator, self.category, self.origin
        )
    }
}

#[derive(Debug, Default)]
pub struct RecipeListingBuilder {
    recipe: RecipeListing,
}

impl RecipeListingBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(&mut self, category: impl Into<String>) -> &mut Self {
        self.recipe.category = category.into();
        self
    }

    pub fn origin(&mut self, origin: impl Into<String>) -> &mut Self {
        self.recipe.origin = origin.into();
        self
    }

    pub fn description(&mut self, description: impl Into<String>) -> &mut Self {
        self.recipe.description = description.into();
        self
    }
}

impl ListingBuilder for RecipeListingBuilder {
    type Output = RecipeListing;

    fn reset(&mut self) {
        self.recipe = RecipeListing::default();
    }

    fn creator(&mut self, name: impl Into<String>) -> &mut Self {
        self.recipe.creator = name.into();
        self
    }

    fn created_on(&mut self, date: impl Into<String>) -> &mut Self {
        self.recipe.created_on = Some(date.into());
        self
    }

    /// For recipes the title is the coffee name.
    fn title(&mut self, title: impl Into<String>) -> &mut Self {
        self.recipe.coffee = title.into();
        self
    }

    fn build(&mut self) -> Result<RecipeListing, DomainError> {
        if self.recipe.coffee.is_empty() {
            return Err(DomainError::MissingRequiredField { field: "title" });
        }
        Ok(std::mem::take(&mut self.recipe))
    }
}

// ── Director ──────────────────────────────────────────────────────────────────

/// Seeds the shared steps of the standard catalogue listings.
///
/// Callers finish the type-specific fields on the builder afterwards.
pub struct Director;

impl Director {
    pub fn construct_recipe<B: ListingBuilder>(builder: &mut B) {
        builder.reset();
        builder
            .creator("Maria Barista")
            .created_on("2025-06-01")
            .title("Cinnamon Cold Brew");
    }

    pub fn construct_event<B: ListingBuilder>(builder: &mut B) {
        builder.reset();
        builder
            .creator("Joao Cafe")
            .created_on("2025-06-10")
            .title("Latte Art Workshop");
    }

    pub fn construct_product<B: ListingBuilder>(builder: &mut B) {
        builder.reset();
        builder
            .creator("Central Coffee")
            .created_on("2025-06-01")
            .title("Yellow Bourbon 500g Pack");
    }
}
