//! Public reference generation
//!
//! References are the only identifiers ever shown to customers. They need no
//! coordination service: a millisecond base36 prefix keeps them time-sortable
//! for support triage, a short random suffix makes same-millisecond clashes
//! overwhelmingly unlikely. Uniqueness is probabilistic, not verified against
//! the repository — an accepted risk; the storage layer still detects and
//! logs a collision if one ever lands.

use rand::Rng;

use shared::util::now_millis;

const BASE36: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const SUFFIX_LEN: usize = 4;

/// Generate a public order reference, e.g. `XT-LX2E8Q1A-7K3M`
pub fn order_ref() -> String {
    generate("XT")
}

/// Generate a public quote reference, e.g. `XTQ-LX2E8Q1A-7K3M`
pub fn quote_ref() -> String {
    generate("XTQ")
}

fn generate(prefix: &str) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("{}-{}-{}", prefix, base36_upper(now_millis()), suffix)
}

/// Uppercase base36 rendering of a non-negative number
fn base36_upper(mut n: i64) -> String {
    if n <= 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        digits.push(BASE36[(n % 36) as usize]);
        n /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}
