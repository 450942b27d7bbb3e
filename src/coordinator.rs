//! # Coordinator
//!
//! Runs the effects that `core::action::update` asks for and feeds the
//! results back in as actions. This is the only place where the view state
//! meets the network.
//!
//! ```text
//!   Action ──► update(app) ──► Effect ──► tokio::spawn(gateway call)
//!     ▲                                              │
//!     └──────────── mpsc::UnboundedSender ◄──────────┘
//! ```
//!
//! The periodic refresh pushes `Action::Refresh` into the same channel, so
//! background and user-triggered loads share one request ordering.
//! Startup uses the channel too: the health probe runs as a task and its
//! verdict arrives as `Action::ServiceProbed`, so the first frame never
//! waits on the network.
//!
//! Nothing here returns an error. A failed step downgrades functionality and
//! raises a notification instead.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::task::JoinHandle;

use crate::core::action::{Action, Effect, update};
use crate::core::articles::LoadRequest;
use crate::core::config::ProbePolicy;
use crate::core::state::App;
use crate::gateway::NewsGateway;

pub struct Coordinator {
    gateway: Arc<dyn NewsGateway>,
    app: App,
    tx: UnboundedSender<Action>,
    rx: UnboundedReceiver<Action>,
    auto_refresh: Option<JoinHandle<()>>,
    quit: bool,
}

impl Coordinator {
    pub fn new(gateway: Arc<dyn NewsGateway>, app: App) -> Self {
        let (tx, rx) = unbounded_channel();
        Self {
            gateway,
            app,
            tx,
            rx,
            auto_refresh: None,
            quit: false,
        }
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Probes the service in the background and queues the verdict as
    /// `Action::ServiceProbed`.
    ///
    /// Returns at once, so the UI can draw while the probe retries. A healthy
    /// verdict loads categories and the first page; otherwise the reducer
    /// installs fallback data.
    pub fn begin_startup(&self, policy: ProbePolicy) {
        info!("Probing gateway '{}'", self.gateway.name());
        self.spawn_call(move |gateway| async move {
            Action::ServiceProbed {
                reachable: probe(gateway.as_ref(), policy).await,
            }
        });
    }

    /// Sends `Action::Refresh` every `every`, through the normal channel.
    pub fn start_auto_refresh(&mut self, every: Duration) {
        if let Some(handle) = self.auto_refresh.take() {
            handle.abort();
        }
        if every.is_zero() {
            info!("Auto refresh disabled");
            return;
        }

        let tx = self.tx.clone();
        self.auto_refresh = Some(tokio::spawn(async move {
            let start = tokio::time::Instant::now() + every;
            let mut ticker = tokio::time::interval_at(start, every);
            loop {
                ticker.tick().await;
                if tx.send(Action::Refresh { manual: false }).is_err() {
                    debug!("Auto refresh stopped: receiver dropped");
                    break;
                }
            }
        }));
        info!("Auto refresh every {}s", every.as_secs());
    }

    /// Runs one action through the reducer and starts its effect.
    pub fn dispatch(&mut self, action: Action) {
        let effect = update(&mut self.app, action);
        self.run_effect(effect);
    }

    /// Applies every result that has already arrived. Never blocks.
    pub fn drain_ready(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(action) = self.rx.try_recv() {
            self.dispatch(action);
            applied += 1;
        }
        applied
    }

    /// Waits for the next queued action and applies it.
    pub async fn process_next(&mut self) -> bool {
        match self.rx.recv().await {
            Some(action) => {
                self.dispatch(action);
                true
            }
            None => false,
        }
    }

    /// Hides an expired toast. Returns true if the screen changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.app.surface.expire(now)
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::None => {}
            Effect::Quit => {
                info!("Quit requested");
                self.quit = true;
            }
            Effect::LoadArticles(LoadRequest { token, query }) => {
                debug!("Loading articles (token={}, query={:?})", token, query);
                self.spawn_call(move |gateway| async move {
                    Action::ArticlesLoaded {
                        token,
                        result: gateway.list_articles(&query).await,
                    }
                });
            }
            Effect::LoadCategories => {
                self.spawn_call(|gateway| async move {
                    Action::CategoriesLoaded(gateway.get_category_tree().await)
                });
            }
            Effect::LoadInitial(request) => {
                self.run_effect(Effect::LoadCategories);
                self.run_effect(Effect::LoadArticles(request));
            }
            Effect::LoadArticle { token, id } => {
                debug!("Loading article {} (token={})", id, token);
                self.spawn_call(move |gateway| async move {
                    Action::ArticleLoaded {
                        token,
                        result: gateway.get_article(&id).await,
                    }
                });
            }
            Effect::ProcessUrl { url, mode } => {
                self.spawn_call(move |gateway| async move {
                    Action::ProcessFinished(gateway.submit_url_for_processing(&url, mode).await)
                });
            }
        }
    }

    fn spawn_call<F, Fut>(&self, call: F)
    where
        F: FnOnce(Arc<dyn NewsGateway>) -> Fut,
        Fut: Future<Output = Action> + Send + 'static,
    {
        let task = call(Arc::clone(&self.gateway));
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let action = task.await;
            if tx.send(action).is_err() {
                warn!("Failed to deliver gateway result: receiver dropped");
            }
        });
    }
}

/// Bounded health probe. Any answer counts as reachable, even a degraded one.
async fn probe(gateway: &dyn NewsGateway, policy: ProbePolicy) -> bool {
    for attempt in 1..=policy.attempts {
        match gateway.health_check().await {
            Ok(health) => {
                if health.is_healthy() {
                    info!("News service healthy");
                } else {
                    warn!(
                        "News service reachable but {}: {:?}",
                        health.status, health.services
                    );
                }
                return true;
            }
            Err(e) => {
                warn!(
                    "Health check {}/{} failed: {}",
                    attempt, policy.attempts, e
                );
                if attempt < policy.attempts {
                    tokio::time::sleep(policy.interval).await;
                }
            }
        }
    }
    false
}

impl Drop for Coordinator {
    fn drop(&mut self) {
        if let Some(handle) = self.auto_refresh.take() {
            handle.abort();
        }
    }
}
