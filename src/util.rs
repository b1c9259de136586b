pub mod checksum;
pub mod validating_http_downloader;
