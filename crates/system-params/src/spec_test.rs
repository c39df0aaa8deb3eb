use composition::{CompositionClass, ProfileSet, ProfileSettings};

use crate::envelope::PlanetEnvelope;
use crate::fill_gas::FillGas;
use crate::range::ParamRange;
use crate::spec::SystemSpec;

fn profiles() -> ProfileSet {
    ProfileSet::build(ProfileSettings::default()).unwrap()
}

#[test]
fn spec_carries_profile_and_fill_gas() {
    let set = profiles();
    let profile = set.get(CompositionClass::NonbioO3).clone();
    let spec = SystemSpec::for_profile(FillGas::H2, profile.clone());

    assert_eq!(spec.fill_gas(), &FillGas::H2);
    assert_eq!(spec.composition(), &profile);
    assert_eq!(spec.planet.radius, PlanetEnvelope::HYDROGEN.radius);
    assert_eq!(spec.planet.mass, PlanetEnvelope::HYDROGEN.mass);
}

#[test]
fn bulk_ranges_do_not_depend_on_composition() {
    let set = profiles();
    let specs: Vec<SystemSpec> = CompositionClass::ALL
        .into_iter()
        .map(|class| {
            SystemSpec::with_envelope(FillGas::N2, PlanetEnvelope::NITROGEN, set.get(class).clone())
        })
        .collect();

    for spec in &specs[1..] {
        assert_eq!(spec.star, specs[0].star);
        assert_eq!(spec.sma, specs[0].sma);
        assert_eq!(spec.planet.radius, specs[0].planet.radius);
        assert_eq!(spec.planet.atmosphere.temperature, specs[0].planet.atmosphere.temperature);
        assert_eq!(spec.planet.atmosphere.base_pressure, specs[0].planet.atmosphere.base_pressure);
    }
}

#[test]
fn default_spec_validates() {
    let spec = SystemSpec::for_profile(
        FillGas::N2,
        profiles().get(CompositionClass::Biosignature).clone(),
    );
    assert!(spec.validate().is_ok());
    assert!(spec.planet.atmosphere.top_pressure.high < spec.planet.atmosphere.base_pressure.low);
}

#[test]
fn broken_range_fails_validation() {
    let mut spec = SystemSpec::for_profile(
        FillGas::N2,
        profiles().get(CompositionClass::NonbioNone).clone(),
    );
    spec.sma = ParamRange::from((0.5, 0.01));
    assert!(spec.validate().is_err());
}
