pub(crate) mod api;
pub(crate) mod http_client;
