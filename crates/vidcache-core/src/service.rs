//! Capability boundary towards the media cache service.

use std::future::Future;

use url::Url;

use crate::{Endpoint, ServiceResponse};

/// Something that can answer queries against the media cache service.
///
/// Implementations fold every transport problem (connection errors,
/// non-2xx statuses, empty bodies) into `None`; callers decide whether an
/// empty answer is fatal.
pub trait MediaService {
    /// Base address the service's relative stream paths resolve against.
    fn base_url(&self) -> &Url;

    /// Issue one request. `None` when no usable response came back.
    fn query(&self, endpoint: Endpoint<'_>) -> impl Future<Output = Option<ServiceResponse>>;
}
