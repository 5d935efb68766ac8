//! Fallback cart ids for sessions without a `cart` cookie.

use chrono::Utc;
use fitment_ledger::CartId;
use rand::Rng;

/// Exclusive upper bound of the random suffix.
const NONCE_RANGE: u32 = 1_000_000;

/// Generate a `temp_<unix-millis>_<random>` cart id.
pub fn fallback_cart_id() -> CartId {
    let millis = u128::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
    let nonce = rand::thread_rng().gen_range(0..NONCE_RANGE);
    CartId::temporary(millis, nonce)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_shape() {
        let id = fallback_cart_id();
        assert!(id.is_temporary());
        let parts: Vec<&str> = id.as_str().split('_').collect();
        assert_eq!(parts.len(), 3);
        assert!(parts[1].parse::<u128>().unwrap() > 1_600_000_000_000);
        assert!(parts[2].parse::<u32>().unwrap() < NONCE_RANGE);
    }
}
