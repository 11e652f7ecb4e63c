use crate::resolver::{
    Result, ResolverError,
    client::{CatalogClient, RatingClient, TranslationClient},
    types::{MediaIdentity, MediaKind, Rating, Translation},
};
use futures::future::OptionFuture;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Language for which no supplementary lookups are needed
const BASE_LANGUAGE: &str = "en";

/// Detail view model: catalog detail plus optional supplements
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateResult {
    pub detail: MediaIdentity,
    /// Present only when translations were needed and fetched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translations: Option<Vec<Translation>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
}

/// Whether translation lookups are worth paying for
///
/// English content viewed in an English locale needs none.
pub fn needs_supplements(original_language: &str, locale: &str) -> bool {
    original_language != BASE_LANGUAGE || locale != BASE_LANGUAGE
}

/// Composes catalog detail with conditional translation and rating lookups
#[derive(Clone)]
pub struct DetailAggregator {
    catalog: Arc<dyn CatalogClient>,
    translations: Option<Arc<dyn TranslationClient>>,
    rating: Option<Arc<dyn RatingClient>>,
}

impl DetailAggregator {
    pub fn new(
        catalog: Arc<dyn CatalogClient>,
        translations: Option<Arc<dyn TranslationClient>>,
        rating: Option<Arc<dyn RatingClient>>,
    ) -> Self {
        Self {
            catalog,
            translations,
            rating,
        }
    }

    /// Resolve detail, translations and rating for one title
    pub async fn aggregate(
        &self,
        kind: MediaKind,
        id: u64,
        locale: &str,
    ) -> Result<AggregateResult> {
        info!("Aggregating {} {} (locale: {})", kind, id, locale);

        // Detail and cross-reference ID are independent; a missing detail
        // aborts the cross-reference lookup.
        let (detail, cross_reference_id) = tokio::try_join!(
            self.fetch_detail(kind, id, locale),
            self.fetch_cross_reference_id(kind, id),
        )?;

        let (translations, rating) =
            if needs_supplements(&detail.original_language, locale) {
                tokio::join!(
                    self.fetch_translations(kind, id),
                    self.fetch_rating(cross_reference_id.as_deref()),
                )
            } else {
                debug!("Skipping translations for {} {}", kind, id);
                (None, self.fetch_rating(cross_reference_id.as_deref()).await)
            };

        Ok(AggregateResult {
            detail,
            translations,
            rating,
        })
    }

    async fn fetch_detail(&self, kind: MediaKind, id: u64, locale: &str) -> Result<MediaIdentity> {
        self.catalog
            .get_detail(kind, id, locale)
            .await?
            .ok_or_else(|| ResolverError::NotFound(format!("{kind} {id}")))
    }

    async fn fetch_cross_reference_id(&self, kind: MediaKind, id: u64) -> Result<Option<String>> {
        match self.catalog.get_cross_reference_id(kind, id).await {
            Ok(xref) => Ok(xref),
            Err(e) => {
                warn!("Cross-reference lookup for {} {} failed: {}", kind, id, e);
                Ok(None)
            }
        }
    }

    async fn fetch_translations(&self, kind: MediaKind, id: u64) -> Option<Vec<Translation>> {
        let client = self.translations.as_ref()?;

        match client.get_translations(kind, id).await {
            Ok(translations) => Some(translations),
            Err(e) => {
                warn!("Translation lookup for {} {} failed: {}", kind, id, e);
                None
            }
        }
    }

    async fn fetch_rating(&self, cross_reference_id: Option<&str>) -> Option<Rating> {
        let client = self.rating.as_ref()?;
        let lookup: OptionFuture<_> = cross_reference_id.map(|xref| client.get_rating(xref)).into();

        match lookup.await? {
            Ok(rating) => rating,
            Err(e) => {
                warn!("Rating lookup failed: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_supplements() {
        assert!(!needs_supplements("en", "en"));
        assert!(needs_supplements("fr", "en"));
        assert!(needs_supplements("en", "vi"));
        assert!(needs_supplements("ja", "ja"));
    }
}
