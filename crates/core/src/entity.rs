//! Entity trait: identity plus the text fields shown and searched everywhere.

/// Catalog entry marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entry identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entry identifier.
    fn id(&self) -> &Self::Id;

    /// Display name.
    fn name(&self) -> &str;

    /// One-line description.
    fn description(&self) -> &str;
}

/// Entries that belong to exactly one member of a closed category enum.
pub trait Categorized {
    type Category: Copy + Eq;

    fn category(&self) -> Self::Category;
}

/// Entries in `category`, in authored order.
pub fn filter_by<T: Categorized>(items: &[T], category: T::Category) -> Vec<&T> {
    items.iter().filter(|i| i.category() == category).collect()
}

/// Like [`filter_by`], where `None` is the "all" tab.
pub fn filter_by_opt<T: Categorized>(items: &[T], category: Option<T::Category>) -> Vec<&T> {
    match category {
        Some(c) => filter_by(items, c),
        None => items.iter().collect(),
    }
}

pub fn count_by<T: Categorized>(items: &[T], category: T::Category) -> usize {
    items.iter().filter(|i| i.category() == category).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Shade {
        Light,
        Dark,
    }

    struct Tile(Shade);

    impl Categorized for Tile {
        type Category = Shade;

        fn category(&self) -> Shade {
            self.0
        }
    }

    #[test]
    fn filter_and_count_agree() {
        let tiles = [Tile(Shade::Light), Tile(Shade::Dark), Tile(Shade::Light)];
        assert_eq!(filter_by(&tiles, Shade::Light).len(), 2);
        assert_eq!(count_by(&tiles, Shade::Dark), 1);
        assert_eq!(filter_by_opt(&tiles, None).len(), 3);
    }
}
