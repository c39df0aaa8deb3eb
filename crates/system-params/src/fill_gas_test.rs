use crate::fill_gas::FillGas;

#[test]
fn parse_normalizes_case_and_whitespace() {
    assert_eq!(FillGas::parse("h2"), FillGas::H2);
    assert_eq!(FillGas::parse(" N2 "), FillGas::N2);
    assert_eq!(FillGas::parse("n2").identity(), "N2");
}

#[test]
fn unknown_identity_is_kept_uppercased() {
    let gas = FillGas::parse("co2");
    assert_eq!(gas, FillGas::Unsupported("CO2".to_string()));
    assert_eq!(gas.identity(), "CO2");
    assert!(!gas.is_supported());
}

#[test]
fn hydrogen_is_lighter_than_nitrogen() {
    assert!(FillGas::H2.mean_molecular_weight() < FillGas::N2.mean_molecular_weight());
    assert_eq!(
        FillGas::parse("xe").mean_molecular_weight(),
        FillGas::N2.mean_molecular_weight()
    );
}

#[test]
fn converts_through_string() {
    let gas: FillGas = String::from("h2").into();
    assert_eq!(gas, FillGas::H2);
    assert_eq!(String::from(FillGas::N2), "N2");
}
