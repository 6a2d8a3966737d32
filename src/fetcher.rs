use std::future::Future;

use crate::error::Result;

/// Source of a player's current K/D.
///
/// Errors are per-player: the refresh driver logs them and moves on to the
/// next player, so implementations should not retry internally.
pub trait StatFetcher {
    fn fetch_kd(&self, player: &str) -> impl Future<Output = Result<f64>>;
}

impl<F: StatFetcher + ?Sized> StatFetcher for &F {
    fn fetch_kd(&self, player: &str) -> impl Future<Output = Result<f64>> {
        (**self).fetch_kd(player)
    }
}
