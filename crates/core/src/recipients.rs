//! Recipient list composition for threshold notifications.

/// Whether an owner email is dispatchable.
///
/// The bar is deliberately low: a single `@` with non-empty local and
/// domain parts. Anything stricter belongs to the mail transport, which
/// rejects unparseable addresses at send time.
pub fn is_dispatchable_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty(),
        None => false,
    }
}

/// Compose the final CC list for one dispatch.
///
/// Concatenates the tier lists in order, drops the owner's own address
/// (case-insensitive), and removes duplicates keeping the first occurrence.
pub fn compose_cc(owner: &str, tiers: &[&[String]]) -> Vec<String> {
    let owner_lower = owner.to_ascii_lowercase();
    let mut seen = std::collections::HashSet::new();
    let mut cc = Vec::new();
    for tier in tiers {
        for addr in *tier {
            let lower = addr.to_ascii_lowercase();
            if lower == owner_lower {
                continue;
            }
            if seen.insert(lower) {
                cc.push(addr.clone());
            }
        }
    }
    cc
}
