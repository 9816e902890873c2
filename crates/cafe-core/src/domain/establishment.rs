//! One entry point over shopkeepers, establishments, products and ratings.

use serde::Serialize;

use crate::domain::error::DomainError;
use crate::domain::listing::ProductListing;

/// A coffee shop with its menu and the ratings it received.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Establishment {
    pub name: String,
    pub location: String,
    products: Vec<ProductListing>,
    ratings: Vec<f64>,
}

impl Establishment {
    fn new(name: String, location: String) -> Self {
        Self {
            name,
            location,
            products: Vec::new(),
            ratings: Vec::new(),
        }
    }

    pub fn products(&self) -> &[ProductListing] {
        &self.products
    }

    /// Mean of all ratings, `None` when nobody rated yet.
    pub fn average_rating(&self) -> Option<f64> {
        if self.ratings.is_empty() {
            return None;
        }
        Some(self.ratings.iter().sum::<f64>() / self.ratings.len() as f64)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct Shopkeeper {
    name: String,
    shops: Vec<String>,
}

/// Facade over the shop side of the community.
///
/// Establishments are kept in opening order; shopkeepers in registration
/// order. Establishment names are unique across shopkeepers.
#[derive(Debug, Default)]
pub struct EstablishmentDirectory {
    shopkeepers: Vec<Shopkeeper>,
    establishments: Vec<Establishment>,
}

impl EstablishmentDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when the shopkeeper was already registered.
    pub fn register_shopkeeper(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.shopkeepers.iter().any(|s| s.name == name) {
            return false;
        }
        self.shopkeepers.push(Shopkeeper {
            name,
            shops: Vec::new(),
        });
        true
    }

    pub fn open_establishment(
        &mut self,
        shopkeeper: &str,
        name: impl Into<String>,
        location: impl Into<String>,
    ) -> Result<&Establishment, DomainError> {
        let name = name.into();
        if self.establishments.iter().any(|e| e.name == name) {
            return Err(DomainError::DuplicateEstablishment { name });
        }
        let owner = self
            .shopkeepers
            .iter_mut()
            .find(|s| s.name == shopkeeper)
            .ok_or_else(|| DomainError::UnknownShopkeeper {
                name: shopkeeper.to_owned(),
            })?;

        owner.shops.push(name.clone());
        self.establishments
            .push(Establishment::new(name, location.into()));
        let index = self.establishments.len() - 1;
        Ok(&self.establishments[index])
    }

    /// Adds `product` to the menu; its establishment field is overwritten.
    pub fn add_product(
        &mut self,
        establishment: &str,
        mut product: ProductListing,
    ) -> Result<(), DomainError> {
        let shop = self.find_mut(establishment)?;
        product.establishment = Some(shop.name.clone());
        shop.products.push(product);
        Ok(())
    }

    pub fn rate(&mut self, establishment: &str, score: f64) -> Result<(), DomainError> {
        self.find_mut(establishment)?.ratings.push(score);
        Ok(())
    }

    pub fn average_rating(&self, establishment: &str) -> Result<Option<f64>, DomainError> {
        Ok(self.find(establishment)?.average_rating())
    }

    pub fn products(&self, establishment: &str) -> Result<&[ProductListing], DomainError> {
        Ok(self.find(establishment)?.products())
    }

    /// Every establishment in opening order.
    pub fn establishments(&self) -> &[Establishment] {
        &self.establishments
    }

    /// Every establishment grouped by shopkeeper, in registration order.
    pub fn all_shops(&self) -> Vec<&Establishment> {
        self.shopkeepers
            .iter()
            .flat_map(|s| s.shops.iter())
            .filter_map(|name| self.establishments.iter().find(|e| &e.name == name))
            .collect()
    }

    fn find(&self, name: &str) -> Result<&Establishment, DomainError> {
        self.establishments
            .iter()
            .find(|e| e.name == name)
            .ok_or_else(|| DomainError::UnknownEstablishment {
                name: name.to_owned(),
            })
    }

    fn find_mut(&mut self, name: &str) -> Result<&mut Establishment, DomainError> {
        self.establishments
            .iter_mut()
            .find(|e| e.name == name)
            .ok_or_else(|| DomainError::UnknownEstablishment {
                name: name.to_owned(),
            })
    }
}
