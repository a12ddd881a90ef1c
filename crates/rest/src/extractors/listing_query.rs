//! Listing query extractor.

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use realty_persistence::search::ListingParams;

use crate::error::RestError;

/// Axum extractor for the listing and export query options.
///
/// Decodes the query string into ordered pairs and hands them to
/// [`ListingParams::from_pairs`], so unknown keys are dropped and the first
/// occurrence of a repeated key wins. Values are not interpreted here.
///
/// # Example
///
/// ```rust,ignore
/// use realty_rest::extractors::ListingQuery;
///
/// async fn handler(ListingQuery(params): ListingQuery) {
///     println!("{:?}", params.city);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ListingQuery(pub ListingParams);

impl ListingQuery {
    /// Consumes the extractor and returns the parameters.
    pub fn into_inner(self) -> ListingParams {
        self.0
    }
}

impl<S> FromRequestParts<S> for ListingQuery
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|e| RestError::BadRequest {
                message: format!("Invalid query string: {}", e.body_text()),
            })?;
        Ok(ListingQuery(ListingParams::from_pairs(pairs)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(uri: &str) -> ListingParams {
        let (mut parts, _) = Request::builder().uri(uri).body(()).unwrap().into_parts();
        ListingQuery::from_request_parts(&mut parts, &())
            .await
            .unwrap()
            .into_inner()
    }

    #[tokio::test]
    async fn test_decodes_percent_encoded_values() {
        let params = extract("/api/listings?city=Alicante&search=gran%20v%C3%ADa&sort=price:asc").await;
        assert_eq!(params.city.as_deref(), Some("Alicante"));
        assert_eq!(params.search.as_deref(), Some("gran vía"));
        assert_eq!(params.sort.as_deref(), Some("price:asc"));
    }

    #[tokio::test]
    async fn test_repeated_key_keeps_first() {
        let params = extract("/api/listings?status=sold&status=available").await;
        assert_eq!(params.status.as_deref(), Some("sold"));
    }

    #[tokio::test]
    async fn test_empty_query() {
        assert_eq!(extract("/api/listings").await, ListingParams::default());
    }
}
