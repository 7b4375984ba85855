pub mod release_client;

pub use release_client::{GitHubReleaseClient, ReleaseSource, LATEST_RELEASE_URL, RELEASES_PAGE_URL};
