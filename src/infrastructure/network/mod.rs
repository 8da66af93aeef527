pub mod api_client;
pub mod http_fetcher;

pub use api_client::ApiClient;
pub use http_fetcher::ReqwestPageFetcher;
