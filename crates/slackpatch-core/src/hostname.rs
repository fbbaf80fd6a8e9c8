//! Master-server hostname generation.
//!
//! Reproduces the classic enctypex-style hash bit for bit: a 32-bit wrapping
//! fold over the lowercased name, reduced mod 20 to pick the `msNN` host.
//! The constant and the arithmetic must not change, the resulting hostnames
//! are a fixed external identifier space.

const HASH_MULTIPLIER: u32 = 0x63306ce7;
const SERVER_SLOTS: u32 = 20;

/// 32-bit accumulator for `name`, before the mod-20 reduction.
pub fn server_hash(name: &str) -> u32 {
    name.bytes().fold(0u32, |acc, c| {
        (c.to_ascii_lowercase() as u32).wrapping_sub(acc.wrapping_mul(HASH_MULTIPLIER))
    })
}

/// Server slot (0..20) for `name`.
pub fn server_slot(name: &str) -> u32 {
    server_hash(name) % SERVER_SLOTS
}

/// Full master-server hostname for `name`, e.g. `test.ms4.nintendowifi.net`.
pub fn master_hostname(name: &str) -> String {
    format!("{}.ms{}.nintendowifi.net", name, server_slot(name))
}
