//! A scraping session: one view, the navigator that drives it, and the config that describes the
//! page. The caller creates a session once per login and passes it around; nothing here is global.

use crate::api::{Navigator, View};
use crate::config::Config;
use crate::error::Result;
use crate::model::{Account, TransactionsResult};
use crate::pipeline::{scrape_transactions, TransactionMode};
use tracing::debug;

/// Owns a view and runs pipeline calls against it. Calls take `&mut self`, so two calls can never
/// be in flight against the same view. Callers that share a `Scraper` between tasks should wrap it
/// in a `tokio::sync::Mutex`.
pub struct Scraper<V, N> {
    view: V,
    navigator: N,
    config: Config,
}

impl<V, N> Scraper<V, N>
where
    V: View + Send,
    N: Navigator<V> + Send,
{
    pub fn new(view: V, navigator: N, config: Config) -> Self {
        Self {
            view,
            navigator,
            config,
        }
    }

    /// Reads the posted or pending transactions of `account`.
    pub async fn transactions(
        &mut self,
        account: &Account,
        mode: TransactionMode,
    ) -> Result<TransactionsResult> {
        scrape_transactions(
            &mut self.view,
            &mut self.navigator,
            &self.config,
            account,
            mode,
        )
        .await
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// Holds at most one session, keyed by the username it was logged in with. Asking for a different
/// username replaces the held session.
#[derive(Debug)]
pub struct ScraperCache<S> {
    slot: Option<(String, S)>,
}

impl<S> Default for ScraperCache<S> {
    fn default() -> Self {
        Self { slot: None }
    }
}

impl<S> ScraperCache<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the held session if it belongs to `username`, otherwise creates one with `create`
    /// and holds it in place of the old one. If `create` fails the old session is kept.
    pub async fn get_or_create<F, Fut, E>(
        &mut self,
        username: &str,
        create: F,
    ) -> std::result::Result<&mut S, E>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = std::result::Result<S, E>>,
    {
        let entry = match self.slot.take() {
            Some((user, session)) if user == username => (user, session),
            previous => {
                debug!("Creating a new session for '{username}'");
                match create().await {
                    Ok(session) => (username.to_string(), session),
                    Err(e) => {
                        self.slot = previous;
                        return Err(e);
                    }
                }
            }
        };
        Ok(&mut self.slot.insert(entry).1)
    }

    /// The username of the held session.
    pub fn username(&self) -> Option<&str> {
        self.slot.as_ref().map(|(user, _)| user.as_str())
    }

    /// Drops the held session, e.g. after logging out.
    pub fn clear(&mut self) -> Option<S> {
        self.slot.take().map(|(_, session)| session)
    }
}
