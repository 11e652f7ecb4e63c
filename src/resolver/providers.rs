use crate::resolver::{
    Result,
    activation::{FetchState, FetchTracker, Generation},
    client::ProviderDiscovery,
    types::{
        MediaIdentity, MediaKind, NavigationTarget, ProviderCriteria, ProviderOption,
        Translation, WatchRequest, active_translation,
    },
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Title used to search providers for movies and tv shows
///
/// An English translation's title wins over the catalog title.
fn search_title(identity: &MediaIdentity, translations: &[Translation]) -> String {
    active_translation(translations)
        .and_then(|t| t.title.as_deref())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| identity.raw_title())
        .to_string()
}

/// Criteria for a movie
pub fn movie_criteria(identity: &MediaIdentity, translations: &[Translation]) -> ProviderCriteria {
    ProviderCriteria {
        title: search_title(identity, translations),
        kind: MediaKind::Movie,
        original_title: identity.original_title.clone(),
        year: identity.release_year,
        season: None,
        episode_id: None,
    }
}

/// Criteria for one season of a tv show
pub fn tv_criteria(
    identity: &MediaIdentity,
    translations: &[Translation],
    season: u32,
) -> ProviderCriteria {
    ProviderCriteria {
        title: search_title(identity, translations),
        kind: MediaKind::Tv,
        original_title: identity.original_title.clone(),
        year: identity.release_year,
        season: Some(season),
        episode_id: None,
    }
}

/// Criteria for an anime episode; translations are never consulted
pub fn anime_criteria(identity: &MediaIdentity, episode_id: impl Into<String>) -> ProviderCriteria {
    ProviderCriteria {
        title: identity.raw_title().to_string(),
        kind: MediaKind::Anime,
        original_title: identity.original_title.clone(),
        year: identity.release_year,
        season: None,
        episode_id: Some(episode_id.into()),
    }
}

/// Navigation target for the chosen provider
pub fn build_watch_target(request: &WatchRequest, option: &ProviderOption) -> NavigationTarget {
    let mut query = vec![
        ("provider".to_string(), option.provider.clone()),
        ("id".to_string(), option.id.clone()),
    ];

    let path = match request {
        WatchRequest::Movie { id } => format!("/movies/{id}/watch"),
        WatchRequest::Tv {
            id,
            season,
            episode,
        } => format!("/tv-shows/{id}/season/{season}/episode/{episode}"),
        WatchRequest::Anime {
            id,
            episode_id,
            episode,
        } => {
            query.push(("episode".to_string(), episode.to_string()));
            format!(
                "/anime/{}/episode/{}",
                urlencoding::encode(id),
                urlencoding::encode(episode_id)
            )
        }
    };

    NavigationTarget { path, query }
}

/// Queries provider discovery for streaming sources
#[derive(Clone)]
pub struct ProviderResolver {
    discovery: Option<Arc<dyn ProviderDiscovery>>,
}

impl ProviderResolver {
    pub fn new(discovery: Option<Arc<dyn ProviderDiscovery>>) -> Self {
        Self { discovery }
    }

    /// One discovery query, upstream order preserved
    pub async fn try_resolve(&self, criteria: &ProviderCriteria) -> Result<Vec<ProviderOption>> {
        let Some(discovery) = self.discovery.as_ref() else {
            debug!("No provider discovery configured");
            return Ok(Vec::new());
        };

        info!(
            "Discovering providers for {} {:?} ({:?})",
            criteria.kind, criteria.title, criteria.year
        );
        discovery.find_providers(criteria).await
    }

    /// Like `try_resolve`, but a failed query yields no options
    pub async fn resolve(&self, criteria: &ProviderCriteria) -> Vec<ProviderOption> {
        match self.try_resolve(criteria).await {
            Ok(options) => options,
            Err(e) => {
                warn!("Provider discovery for {:?} failed: {}", criteria.title, e);
                Vec::new()
            }
        }
    }
}

/// Query to run after the selector became visible
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderActivation {
    pub generation: Generation,
    pub criteria: ProviderCriteria,
}

/// Provider selection surface state
///
/// Discovery runs once per hidden-to-visible transition, never per render.
#[derive(Debug)]
pub struct ProviderSelector {
    criteria: ProviderCriteria,
    request: WatchRequest,
    visible: bool,
    tracker: FetchTracker<Vec<ProviderOption>>,
}

impl ProviderSelector {
    pub fn new(criteria: ProviderCriteria, request: WatchRequest) -> Self {
        Self {
            criteria,
            request,
            visible: false,
            tracker: FetchTracker::new(),
        }
    }

    /// Update visibility; returns the query to run on activation
    pub fn set_visible(&mut self, visible: bool) -> Option<ProviderActivation> {
        let activated = visible && !self.visible;
        self.visible = visible;

        activated.then(|| ProviderActivation {
            generation: self.tracker.begin(),
            criteria: self.criteria.clone(),
        })
    }

    /// Apply a discovery result; stale generations are ignored
    pub fn complete(
        &mut self,
        generation: Generation,
        result: Result<Vec<ProviderOption>>,
    ) -> bool {
        self.tracker.complete(generation, result)
    }

    /// Show the selector and run discovery if this is an activation
    pub async fn open(&mut self, resolver: &ProviderResolver) {
        if let Some(activation) = self.set_visible(true) {
            let result = resolver.try_resolve(&activation.criteria).await;
            self.complete(activation.generation, result);
        }
    }

    /// Hide the selector; a discovery still in flight is discarded
    pub fn close(&mut self) {
        self.set_visible(false);
        self.tracker.reset();
    }

    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub const fn state(&self) -> &FetchState<Vec<ProviderOption>> {
        self.tracker.state()
    }

    /// `None` until discovery finished; a failed discovery shows no options
    pub fn options(&self) -> Option<&[ProviderOption]> {
        match self.tracker.state() {
            FetchState::Resolved(options) => Some(options),
            FetchState::Failed(_) => Some(&[]),
            FetchState::Idle | FetchState::Fetching(_) => None,
        }
    }

    /// Navigation target for the option at `index`
    pub fn choose(&self, index: usize) -> Option<NavigationTarget> {
        let option = self.options()?.get(index)?;
        Some(build_watch_target(&self.request, option))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option() -> ProviderOption {
        ProviderOption::new("Loklok", "ref-9")
    }

    #[test]
    fn test_movie_watch_target() {
        let target = build_watch_target(&WatchRequest::Movie { id: 42 }, &option());
        assert_eq!(target.to_url(), "/movies/42/watch?provider=Loklok&id=ref-9");
    }

    #[test]
    fn test_tv_watch_target() {
        let request = WatchRequest::Tv {
            id: 1399,
            season: 2,
            episode: 5,
        };
        let target = build_watch_target(&request, &option());
        assert_eq!(
            target.to_url(),
            "/tv-shows/1399/season/2/episode/5?provider=Loklok&id=ref-9"
        );
    }

    #[test]
    fn test_anime_watch_target() {
        let request = WatchRequest::Anime {
            id: "21".to_string(),
            episode_id: "one-piece-episode-1".to_string(),
            episode: 1,
        };
        let target = build_watch_target(&request, &option());
        assert_eq!(
            target.to_url(),
            "/anime/21/episode/one-piece-episode-1?provider=Loklok&id=ref-9&episode=1"
        );
    }

    #[test]
    fn test_anime_criteria_ignore_translations() {
        let identity = MediaIdentity::new(21, MediaKind::Anime, "ワンピース", "ja")
            .with_title(Some("One Piece".to_string()))
            .with_year(Some(1999));

        let criteria = anime_criteria(&identity, "ep-1");
        assert_eq!(criteria.title, "One Piece");
        assert_eq!(criteria.original_title, "ワンピース");
        assert_eq!(criteria.episode_id.as_deref(), Some("ep-1"));
        assert_eq!(criteria.season, None);
    }

    #[test]
    fn test_tv_criteria_use_english_name() {
        let identity = MediaIdentity::new(70523, MediaKind::Tv, "Dark", "de")
            .with_title(Some("Dunkel".to_string()));
        let translations = vec![
            Translation::new("de").with_title("Dunkel"),
            Translation::new("en").with_title("Dark"),
        ];

        let criteria = tv_criteria(&identity, &translations, 3);
        assert_eq!(criteria.title, "Dark");
        assert_eq!(criteria.season, Some(3));
        assert_eq!(criteria.kind, MediaKind::Tv);
    }

    #[test]
    fn test_selector_activates_once_per_transition() {
        let criteria = movie_criteria(&MediaIdentity::new(1, MediaKind::Movie, "Heat", "en"), &[]);
        let mut selector = ProviderSelector::new(criteria, WatchRequest::Movie { id: 1 });

        assert!(selector.options().is_none());
        let first = selector.set_visible(true).unwrap();
        assert!(selector.set_visible(true).is_none());

        selector.close();
        let second = selector.set_visible(true).unwrap();
        assert!(second.generation > first.generation);

        // The superseded query's answer is dropped
        assert!(!selector.complete(first.generation, Ok(vec![option()])));
        assert!(selector.options().is_none());

        assert!(selector.complete(second.generation, Ok(Vec::new())));
        assert_eq!(selector.options(), Some(&[][..]));
        assert!(selector.choose(0).is_none());
    }

    #[test]
    fn test_close_discards_pending_discovery() {
        let criteria = movie_criteria(&MediaIdentity::new(1, MediaKind::Movie, "Heat", "en"), &[]);
        let mut selector = ProviderSelector::new(criteria, WatchRequest::Movie { id: 1 });

        let pending = selector.set_visible(true).unwrap();
        selector.close();

        assert!(!selector.is_visible());
        assert_eq!(selector.state(), &FetchState::Idle);
        assert!(!selector.complete(pending.generation, Ok(vec![option()])));
        assert!(selector.options().is_none());
    }
}
