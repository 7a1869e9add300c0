//! Zone discriminator derivation.
//!
//! Plain `Q` lines carry no zone reference, only an opaque `id`. Every answer we
//! emit puts a hash of its zone's name into that field so a later A/CNAME query
//! for the same zone can be mapped back to it. The hash is 32-bit FNV-1a over the
//! UTF-8 bytes of the name. It has no seed, so every instance and every restart
//! computes the same value.
//!
//! Two configured domains with the same hash are not disambiguated: the first
//! one listed by the store wins.

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// FNV-1a 32-bit hash of a domain name.
pub fn domain_id(name: &str) -> u32 {
    name.bytes().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u32::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

/// Decimal rendering of [`domain_id`], as written into the protocol `id` field.
pub fn zone_discriminator(name: &str) -> String {
    domain_id(name).to_string()
}
