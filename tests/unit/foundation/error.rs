use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        MapError::incomplete("x")
            .to_string()
            .contains("incomplete map data:")
    );
    assert!(
        MapError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        MapError::evaluation("x")
            .to_string()
            .contains("evaluation error:")
    );
    assert!(
        MapError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
    assert!(MapError::InvalidRotation(45).to_string().contains("45"));
}

#[test]
fn rotation_is_not_a_data_error() {
    assert!(MapError::incomplete("size").is_data_error());
    assert!(!MapError::InvalidRotation(45).is_data_error());
    assert!(!MapError::validation("crop").is_data_error());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = MapError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
