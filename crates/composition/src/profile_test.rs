use std::collections::BTreeSet;

use approx::assert_relative_eq;

use crate::error::CompositionError;
use crate::profile::{AbundanceBounds, CompositionClass, ProfileSet, ProfileSettings};
use crate::species::GasSpecies;

fn settings_with_margin(margin: f64) -> ProfileSettings {
    ProfileSettings {
        margin,
        ..ProfileSettings::default()
    }
}

#[test]
fn default_profiles_match_stratification_table() {
    let set = ProfileSet::build(ProfileSettings::default()).unwrap();

    let bio = set.get(CompositionClass::Biosignature);
    assert_eq!(bio.get(GasSpecies::CH4), Some(&AbundanceBounds::new(-6.0, -3.0)));
    assert_eq!(bio.get(GasSpecies::O3), Some(&AbundanceBounds::new(-7.0, -1.0)));

    let ch4_only = set.get(CompositionClass::NonbioCh4);
    assert_eq!(ch4_only.get(GasSpecies::CH4), Some(&AbundanceBounds::new(-6.0, -3.0)));
    assert_eq!(ch4_only.get(GasSpecies::O3), Some(&AbundanceBounds::new(-10.0, -7.0)));

    let o3_only = set.get(CompositionClass::NonbioO3);
    assert_eq!(o3_only.get(GasSpecies::CH4), Some(&AbundanceBounds::new(-9.0, -6.0)));
    assert_eq!(o3_only.get(GasSpecies::O3), Some(&AbundanceBounds::new(-7.0, -1.0)));

    let none = set.get(CompositionClass::NonbioNone);
    assert_eq!(none.get(GasSpecies::CH4), Some(&AbundanceBounds::new(-9.0, -6.0)));
    assert_eq!(none.get(GasSpecies::O3), Some(&AbundanceBounds::new(-10.0, -7.0)));
}

#[test]
fn background_species_identical_across_classes() {
    let set = ProfileSet::build(settings_with_margin(0.5)).unwrap();
    let reference = set.get(CompositionClass::Biosignature);

    for profile in set.iter() {
        assert_eq!(profile.bounds.len(), GasSpecies::ALL.len());
        for species in [GasSpecies::H2O, GasSpecies::CO, GasSpecies::CO2, GasSpecies::NH3] {
            assert_eq!(
                profile.get(species),
                reference.get(species),
                "{} differs for {}",
                species,
                profile.class
            );
        }
    }
}

#[test]
fn presence_regions_partition_the_two_by_two_space() {
    for margin in [0.0, 0.25, 1.0, 2.5, 3.0] {
        let set = ProfileSet::build(settings_with_margin(margin)).unwrap();
        let thresholds = *set.thresholds();

        let patterns: BTreeSet<(bool, bool)> = set
            .iter()
            .map(|profile| {
                let derived = profile.presence(&thresholds);
                assert_eq!(
                    derived,
                    profile.class.presence(),
                    "bounds of {} disagree with its intent at margin {}",
                    profile.class,
                    margin
                );
                derived
            })
            .collect();

        // Four distinct patterns out of four possible: disjoint and exhaustive
        assert_eq!(patterns.len(), 4, "margin {}", margin);
    }
}

#[test]
fn margin_separates_above_and_below_ranges() {
    let margin = 0.75;
    let set = ProfileSet::build(settings_with_margin(margin)).unwrap();

    let above = set.get(CompositionClass::Biosignature);
    let below = set.get(CompositionClass::NonbioNone);

    for species in [GasSpecies::CH4, GasSpecies::O3] {
        let gap = above.get(species).unwrap().lower - below.get(species).unwrap().upper;
        assert_relative_eq!(gap, 2.0 * margin, epsilon = 1e-12);
    }
}

#[test]
fn negative_margin_is_rejected() {
    let err = ProfileSet::build(settings_with_margin(-0.1)).unwrap_err();
    assert_eq!(err, CompositionError::NegativeMargin(-0.1));

    assert!(ProfileSet::build(settings_with_margin(f64::NAN)).is_err());
}

#[test]
fn margin_that_inverts_bounds_is_rejected() {
    // CH4 "above" range would start at -2, past its -3 ceiling
    let err = ProfileSet::build(settings_with_margin(4.0)).unwrap_err();
    assert!(matches!(
        err,
        CompositionError::InvertedBounds {
            species: GasSpecies::CH4,
            ..
        }
    ));
}

#[test]
fn lookup_resolves_plan_names() {
    let set = ProfileSet::build(ProfileSettings::default()).unwrap();

    for class in CompositionClass::ALL {
        assert_eq!(set.lookup(class.name()).unwrap().class, class);
    }

    assert_eq!(
        set.lookup("nonbio_nh3").unwrap_err(),
        CompositionError::UnknownClass("nonbio_nh3".to_string())
    );
}

#[test]
fn interior_shrinks_symmetrically() {
    let bounds = AbundanceBounds::new(-9.0, -6.0);
    let inner = bounds.interior(0.1);

    assert_relative_eq!(inner.lower, -8.7, epsilon = 1e-12);
    assert_relative_eq!(inner.upper, -6.3, epsilon = 1e-12);
    assert_relative_eq!(inner.lower + inner.upper, bounds.lower + bounds.upper, epsilon = 1e-12);
    assert!(bounds.contains(inner.lower) && bounds.contains(inner.upper));
}
