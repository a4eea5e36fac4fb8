//! Package Catalog
//!
//! The fixed price list shown on the storefront. Prices are USD major units
//! held as `Decimal`.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StorefrontError};

/// Package category
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Group {
    /// Filming plus editing
    #[serde(rename = "Full Service")]
    FullService,

    /// Editing of client-supplied footage
    #[serde(rename = "Editing Only")]
    EditingOnly,
}

impl Group {
    /// Display order on the storefront
    pub const ALL: [Self; 2] = [Self::FullService, Self::EditingOnly];

    pub const fn label(self) -> &'static str {
        match self {
            Self::FullService => "Full Service",
            Self::EditingOnly => "Editing Only",
        }
    }
}

impl std::fmt::Display for Group {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A purchasable offering
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    /// Display label, only unique within a group
    pub name: String,

    /// Price in USD
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Category the package is listed under
    pub group: Group,
}

impl Package {
    pub fn new(name: impl Into<String>, price: Decimal, group: Group) -> Self {
        Self {
            name: name.into(),
            price,
            group,
        }
    }

    /// True when `other` is the same catalog entry (name and group)
    pub fn same_entry(&self, other: &Self) -> bool {
        self.name == other.name && self.group == other.group
    }
}

/// Note printed under the package list
pub const EDITING_MINIMUM_NOTE: &str =
    "* Editing\u{2011}only packages require a minimum block of 1\u{2013}4 reels.";

/// The storefront's price list
#[derive(Clone, Debug)]
pub struct Catalog {
    packages: Vec<Package>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl Catalog {
    /// Build a catalog from an explicit list
    pub const fn new(packages: Vec<Package>) -> Self {
        Self { packages }
    }

    /// The published packages
    pub fn standard() -> Self {
        use Group::{EditingOnly, FullService};

        Self::new(vec![
            Package::new("1 reel", dec!(250), FullService),
            Package::new("2 reels", dec!(400), FullService),
            Package::new("4 reels", dec!(600), FullService),
            Package::new("8 reels", dec!(1000), FullService),
            Package::new("12 reels", dec!(1500), FullService),
            // Minimum purchase covers 1-4 reels
            Package::new("1\u{2013}4 reels", dec!(250), EditingOnly),
            Package::new("8 reels", dec!(300), EditingOnly),
            Package::new("12 reels", dec!(450), EditingOnly),
        ])
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    /// Groups that have at least one package, in display order
    pub fn groups(&self) -> Vec<Group> {
        Group::ALL
            .into_iter()
            .filter(|g| self.packages.iter().any(|p| p.group == *g))
            .collect()
    }

    /// Packages listed under `group`, in catalog order
    pub fn in_group(&self, group: Group) -> impl Iterator<Item = &Package> {
        self.packages.iter().filter(move |p| p.group == group)
    }

    /// Look up a package by name, narrowed by group when one is given.
    ///
    /// A bare name that appears in several groups is ambiguous.
    pub fn find(&self, name: &str, group: Option<Group>) -> Result<&Package> {
        let mut matches = self
            .packages
            .iter()
            .filter(|p| p.name == name && group.is_none_or(|g| p.group == g));

        let first = matches.next().ok_or_else(|| {
            StorefrontError::UnknownPackage(match group {
                Some(g) => format!("{g} / {name}"),
                None => name.to_string(),
            })
        })?;

        if matches.next().is_some() {
            return Err(StorefrontError::AmbiguousPackage(name.to_string()));
        }

        Ok(first)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_layout() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.packages().len(), 8);
        assert_eq!(catalog.groups(), vec![Group::FullService, Group::EditingOnly]);
        assert_eq!(catalog.in_group(Group::FullService).count(), 5);
        assert_eq!(catalog.in_group(Group::EditingOnly).count(), 3);
    }

    #[test]
    fn test_find_with_group() {
        let catalog = Catalog::standard();
        let pkg = catalog.find("8 reels", Some(Group::EditingOnly)).unwrap();
        assert_eq!(pkg.price, dec!(300));

        let pkg = catalog.find("8 reels", Some(Group::FullService)).unwrap();
        assert_eq!(pkg.price, dec!(1000));
    }

    #[test]
    fn test_find_ambiguous_without_group() {
        let catalog = Catalog::standard();
        assert_eq!(
            catalog.find("8 reels", None),
            Err(StorefrontError::AmbiguousPackage("8 reels".into()))
        );
        assert_eq!(catalog.find("4 reels", None).unwrap().price, dec!(600));
    }

    #[test]
    fn test_find_unknown() {
        let catalog = Catalog::standard();
        assert!(matches!(
            catalog.find("4 reels", Some(Group::EditingOnly)),
            Err(StorefrontError::UnknownPackage(_))
        ));
    }

    #[test]
    fn test_group_labels_serialize() {
        let json = serde_json::to_value(Package::new("1 reel", dec!(250), Group::FullService)).unwrap();
        assert_eq!(json["group"], "Full Service");
        assert_eq!(json["price"], 250.0);
    }
}
