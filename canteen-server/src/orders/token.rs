//! Pickup token allocation
//!
//! Tokens are four-digit strings, unique among orders that are not yet
//! COMPLETED. A completed order's token goes back into the pool.

use std::collections::HashSet;

use rand::Rng;
use shared::error::ErrorCode;

use crate::utils::{AppError, AppResult};

pub const TOKEN_MIN: u32 = 1000;
pub const TOKEN_MAX: u32 = 9999;

/// Random draws before falling back to a scan
const RANDOM_ATTEMPTS: usize = 100;

/// Pick a token not present in `taken`
///
/// Random first; when the space is crowded, the first free token in
/// ascending order.
pub fn allocate_token<R: Rng>(taken: &HashSet<String>, rng: &mut R) -> AppResult<String> {
    for _ in 0..RANDOM_ATTEMPTS {
        let token = rng.gen_range(TOKEN_MIN..=TOKEN_MAX).to_string();
        if !taken.contains(&token) {
            return Ok(token);
        }
    }

    (TOKEN_MIN..=TOKEN_MAX)
        .map(|n| n.to_string())
        .find(|token| !taken.contains(token))
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::TokenSpaceExhausted,
                "All pickup tokens are in use, complete some orders first",
            )
        })
}
