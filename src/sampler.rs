//! Random selection of the locations asked in a session

use itertools::Itertools;

use crate::location::Location;

/// Picks `count` distinct locations in random order and appends `required`
///
/// The catalog is shuffled as a copy (Fisher–Yates, so every ordering is
/// equally likely) and left untouched. If `count` exceeds the catalog size
/// the selection is truncated to the whole catalog.
pub fn sample(
    catalog: &[Location],
    count: usize,
    required: &Location,
    rng: &mut fastrand::Rng,
) -> Vec<Location> {
    if count > catalog.len() {
        log::warn!(
            "asked for {count} locations but the catalog only has {}, truncating",
            catalog.len()
        );
    }

    let mut pool = catalog.iter().collect_vec();
    rng.shuffle(&mut pool);

    pool.into_iter()
        .take(count)
        .chain(std::iter::once(required))
        .cloned()
        .collect_vec()
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_required_location_is_last() {
        let catalog = Catalog::default();
        let mut rng = fastrand::Rng::with_seed(7);

        for _ in 0..50 {
            let picked = sample(catalog.locations(), 4, catalog.required(), &mut rng);
            assert_eq!(picked.len(), 5);
            assert_eq!(picked.last(), Some(catalog.required()));
        }
    }

    #[test]
    fn test_picks_distinct_catalog_members() {
        let catalog = Catalog::default();
        let mut rng = fastrand::Rng::with_seed(11);

        for _ in 0..50 {
            let picked = sample(catalog.locations(), 6, catalog.required(), &mut rng);
            let (required, rest) = picked.split_last().unwrap();

            assert_eq!(required, catalog.required());
            assert!(rest.iter().map(|l| &l.name).all_unique());
            assert!(rest.iter().all(|l| catalog.locations().contains(l)));
        }
    }

    #[test]
    fn test_source_catalog_untouched() {
        let catalog = Catalog::default();
        let before = catalog.locations().to_vec();
        let mut rng = fastrand::Rng::with_seed(3);

        let _ = sample(catalog.locations(), 4, catalog.required(), &mut rng);

        assert_eq!(catalog.locations(), before.as_slice());
    }

    #[test]
    fn test_zero_count_yields_only_required() {
        let catalog = Catalog::default();
        let mut rng = fastrand::Rng::with_seed(1);

        let picked = sample(catalog.locations(), 0, catalog.required(), &mut rng);
        assert_eq!(picked, vec![catalog.required().clone()]);
    }

    #[test]
    fn test_oversized_count_truncates() {
        let catalog = Catalog::default();
        let mut rng = fastrand::Rng::with_seed(5);

        let picked = sample(catalog.locations(), 100, catalog.required(), &mut rng);
        assert_eq!(picked.len(), catalog.len() + 1);
        assert_eq!(picked.last(), Some(catalog.required()));
    }

    #[test]
    fn test_every_location_gets_picked_eventually() {
        let catalog = Catalog::default();
        let mut rng = fastrand::Rng::with_seed(42);

        let seen = (0..200)
            .flat_map(|_| sample(catalog.locations(), 1, catalog.required(), &mut rng))
            .map(|l| l.name)
            .unique()
            .count();

        assert_eq!(seen, catalog.len() + 1);
    }
}
