use crate::resolver::{
    Result, ResolverError,
    client::CatalogClient,
    types::{MediaKind, RecommendationPage},
};
use std::sync::Arc;
use tracing::info;

/// Highest page the catalog serves
pub const MAX_PAGE: u32 = 1000;

/// Normalize a requested page
///
/// `None` stays unspecified so the catalog default applies; a page outside
/// `1..=MAX_PAGE` becomes page 1.
pub fn normalize_page(requested: Option<i64>) -> Option<u32> {
    let page = requested?;

    match u32::try_from(page) {
        Ok(p) if (1..=MAX_PAGE).contains(&p) => Some(p),
        _ => Some(1),
    }
}

/// Normalize a raw `page` query value
///
/// Missing, empty or non-numeric text is unspecified; a number outside the
/// served range is page 1.
pub fn parse_page_param(raw: Option<&str>) -> Option<u32> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;
    normalize_page(raw.parse::<i64>().ok())
}

/// Fetches recommendation pages with a normalized cursor
#[derive(Clone)]
pub struct RecommendationPaginator {
    catalog: Arc<dyn CatalogClient>,
}

impl RecommendationPaginator {
    pub fn new(catalog: Arc<dyn CatalogClient>) -> Self {
        Self { catalog }
    }

    pub async fn recommendations(
        &self,
        kind: MediaKind,
        id: u64,
        requested_page: Option<i64>,
        locale: &str,
    ) -> Result<RecommendationPage> {
        let page = normalize_page(requested_page);
        info!("Recommendations for {} {} (page: {:?})", kind, id, page);

        self.catalog
            .get_recommendations(kind, id, page, locale)
            .await?
            .ok_or_else(|| ResolverError::NotFound(format!("recommendations for {kind} {id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_page_valid_range() {
        assert_eq!(normalize_page(Some(1)), Some(1));
        assert_eq!(normalize_page(Some(500)), Some(500));
        assert_eq!(normalize_page(Some(1000)), Some(1000));
    }

    #[test]
    fn test_normalize_page_out_of_range() {
        assert_eq!(normalize_page(Some(0)), Some(1));
        assert_eq!(normalize_page(Some(-3)), Some(1));
        assert_eq!(normalize_page(Some(1001)), Some(1));
        assert_eq!(normalize_page(Some(5000)), Some(1));
        assert_eq!(normalize_page(Some(i64::MAX)), Some(1));
    }

    #[test]
    fn test_normalize_page_unspecified() {
        assert_eq!(normalize_page(None), None);
    }

    #[test]
    fn test_normalize_page_is_one_of_three_outcomes() {
        for p in [-10_i64, 0, 1, 2, 999, 1000, 1001, 40_000] {
            let normalized = normalize_page(Some(p));
            let expected = if (1..=1000).contains(&p) {
                Some(u32::try_from(p).unwrap())
            } else {
                Some(1)
            };
            assert_eq!(normalized, expected, "page {p}");
        }
    }

    #[test]
    fn test_parse_page_param() {
        assert_eq!(parse_page_param(None), None);
        assert_eq!(parse_page_param(Some("")), None);
        assert_eq!(parse_page_param(Some("7")), Some(7));
        assert_eq!(parse_page_param(Some("5000")), Some(1));
        assert_eq!(parse_page_param(Some("0")), Some(1));
        assert_eq!(parse_page_param(Some("-4")), Some(1));
    }

    #[test]
    fn test_parse_page_param_non_numeric_is_unspecified() {
        assert_eq!(parse_page_param(Some("abc")), None);
        assert_eq!(parse_page_param(Some("2.5")), None);
        assert_eq!(parse_page_param(Some("  ")), None);
    }
}
