use pipedns_domain::{domain_id, zone_discriminator};

#[test]
fn test_domain_id_matches_fnv1a_reference_vectors() {
    assert_eq!(domain_id(""), 2_166_136_261);
    assert_eq!(domain_id("a"), 3_826_002_220);
    assert_eq!(domain_id("foobar"), 0xbf9c_f968);
}

#[test]
fn test_domain_id_is_deterministic() {
    let first = domain_id("example.com");
    let second = domain_id("example.com");
    assert_eq!(first, second);
}

#[test]
fn test_domain_id_is_order_sensitive() {
    assert_ne!(domain_id("ab.com"), domain_id("ba.com"));
}

#[test]
fn test_zone_discriminator_is_unsigned_decimal() {
    let rendered = zone_discriminator("a");
    assert_eq!(rendered, "3826002220");
    assert!(rendered.chars().all(|c| c.is_ascii_digit()));
}
