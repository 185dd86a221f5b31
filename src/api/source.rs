use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::paging::{Identified, Page, PageSource};

use super::client::ApiClient;
use super::query::ListQuery;

/// Pages of `T` from the endpoint described by the filter type `F`.
pub struct ApiSource<F, T> {
    client: Arc<ApiClient>,
    _marker: PhantomData<fn(F) -> T>,
}

impl<F, T> ApiSource<F, T> {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            _marker: PhantomData,
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }
}

impl<F, T> PageSource for ApiSource<F, T>
where
    F: ListQuery,
    T: Identified + DeserializeOwned + Clone + Send + Sync + 'static,
{
    type Filters = F;
    type Item = T;

    async fn fetch_page(&self, filters: &F, page: u32, page_size: u32) -> Result<Page<T>> {
        self.client.fetch_page(filters, page, page_size).await
    }
}
