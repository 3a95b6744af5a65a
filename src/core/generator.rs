//! Batch link generation
//!
//! Resolves the selected credential profile, filters the candidate items, and
//! issues one exchange call per surviving item. Item failures are recovered
//! into the positional result list; only the two precondition checks fail the
//! batch as a whole.

use crate::core::exchange::LinkExchange;
use crate::core::store::ProfileStore;
use crate::models::{EnvVariant, LinkRequestItem, LinkResult};
use crate::utils::GenerateError;
use std::sync::Arc;

pub struct LinkGenerator {
    exchange: Arc<dyn LinkExchange>,
}

impl LinkGenerator {
    pub fn new(exchange: Arc<dyn LinkExchange>) -> Self {
        LinkGenerator { exchange }
    }

    /// Generate one link per non-blank-path item, in input order
    ///
    /// Preconditions (checked before any remote call):
    /// - `profile_id` must be non-blank and resolve in the store, else
    ///   [`GenerateError::NoProfileSelected`]
    /// - at least one item must have a non-blank path, else
    ///   [`GenerateError::NoValidItems`]
    ///
    /// Each surviving item gets exactly one attempt; a failed item does not
    /// abort or skip later items, and the result list preserves count and
    /// order of the filtered input.
    pub async fn generate(
        &self,
        store: &ProfileStore,
        profile_id: &str,
        env: EnvVariant,
        items: &[LinkRequestItem],
    ) -> Result<Vec<LinkResult>, GenerateError> {
        let profile = if profile_id.trim().is_empty() {
            None
        } else {
            store.resolve(profile_id)
        }
        .ok_or(GenerateError::NoProfileSelected)?;

        let filtered: Vec<&LinkRequestItem> = items
            .iter()
            .filter(|item| !item.path.trim().is_empty())
            .collect();

        if filtered.is_empty() {
            return Err(GenerateError::NoValidItems);
        }

        // App identifiers are credentials; log the human label instead
        log::debug!(
            "Generating {} link(s) for profile '{}' ({})",
            filtered.len(),
            profile.name(),
            env
        );

        let mut results = Vec::with_capacity(filtered.len());
        for item in filtered {
            let outcome = self
                .exchange
                .exchange(profile.app_id(), profile.secret(), env, &item.path, &item.query)
                .await;

            match outcome {
                Ok(link) => results.push(LinkResult::success(item, link)),
                Err(err) => {
                    log::warn!("Link exchange failed for path '{}': {}", item.path, err);
                    results.push(LinkResult::failure(item, err.to_string()));
                }
            }
        }

        Ok(results)
    }
}
