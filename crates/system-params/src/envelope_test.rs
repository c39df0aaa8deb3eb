use approx::assert_relative_eq;

use crate::envelope::{PlanetEnvelope, planet_envelope};
use crate::fill_gas::FillGas;

#[test]
fn hydrogen_envelope_excludes_small_planets() {
    let envelope = planet_envelope(&FillGas::H2);
    assert_relative_eq!(envelope.radius.low, 5.0);
    assert_relative_eq!(envelope.radius.high, 15.0);
    assert_relative_eq!(envelope.mass.low, 20.0);
    assert_relative_eq!(envelope.mass.high, 300.0);
}

#[test]
fn nitrogen_envelope_spans_rocky_to_giant() {
    let envelope = planet_envelope(&FillGas::N2);
    assert_relative_eq!(envelope.radius.low, 1.0);
    assert_relative_eq!(envelope.mass.high, 500.0);
}

#[test]
fn unsupported_gas_falls_back_to_default() {
    let envelope = planet_envelope(&FillGas::parse("CH4"));
    assert_eq!(envelope, PlanetEnvelope::DEFAULT);
    assert_eq!(envelope, PlanetEnvelope::NITROGEN);
}

#[test]
fn envelopes_are_valid_ranges() {
    for envelope in [PlanetEnvelope::HYDROGEN, PlanetEnvelope::NITROGEN] {
        assert!(envelope.radius.validate().is_ok());
        assert!(envelope.mass.validate().is_ok());
    }
}
