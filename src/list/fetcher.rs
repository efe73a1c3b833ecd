//! Turning a `FilterState` into a page of entities.

use super::ListPage;
use super::local::derive_page;
use crate::api::Backend;
use crate::api::envelope::parse_list;
use crate::entities::{Entity, ListSource};
use crate::error::Result;
use crate::query::{FilterState, QueryParams, build_query};

/// Fetch the page `filter` describes.
///
/// Server-paginated entities send the filter as query parameters. Entities
/// whose endpoint returns the whole collection are fetched unfiltered and
/// paginated locally. Either way the result has the same shape.
pub async fn fetch_page<B, T>(backend: &B, filter: &FilterState) -> Result<ListPage<T>>
where
    B: Backend,
    T: Entity,
{
    match T::SOURCE {
        ListSource::Remote(mapping) => {
            let params = build_query(filter, &mapping, T::FILTERS);
            let data = backend.get(T::ENDPOINT, &params).await?;
            Ok(parse_list::<T>(data)?.into_page(filter))
        }
        ListSource::Local => {
            let data = backend.get(T::ENDPOINT, &QueryParams::new()).await?;
            let items = parse_list::<T>(data)?.into_items();
            Ok(derive_page(&items, filter))
        }
    }
}
